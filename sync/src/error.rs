use db::models::ClassStatus;
use thiserror::Error;

/// Form field a validation or conflict error is scoped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Course,
    Semester,
    Day,
    Time,
    Room,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm password",
            Self::Course => "course",
            Self::Semester => "semester",
            Self::Day => "day",
            Self::Time => "time",
            Self::Room => "room",
        };
        f.write_str(s)
    }
}

/// Errors surfaced to the caller of the sync coordinator.
///
/// Store unavailability is deliberately absent: it is recovered into the
/// optimistic-local path and never reaches the caller.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyncError {
    /// Local, field-scoped check failed. No state changed, locally or remotely.
    #[error("{field}: {message}")]
    Validation { field: Field, message: &'static str },

    /// The store rejected the mutation on a uniqueness constraint. The remote
    /// is authoritative at commit time even though local validation passed.
    #[error("{field}: {message}")]
    Conflict { field: Field, message: &'static str },

    /// One combined message; unknown email and wrong password are not
    /// distinguished on this surface.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("no class with id {0}")]
    UnknownClass(i64),

    #[error("class {0} belongs to another teacher")]
    NotClassOwner(i64),

    #[error("class cannot change from {from} to {to}")]
    InvalidTransition { from: ClassStatus, to: ClassStatus },
}

/// Transport-level failures of the record service.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RemoteError {
    /// Uniqueness violation at commit time (HTTP 409).
    #[error("already registered")]
    Conflict,

    /// Authentication rejected (HTTP 401).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Unreachable, timed out, 5xx or malformed payload. Callers degrade to
    /// local-only operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
