use crate::error::{Field, SyncError};
use crate::mirror::MirrorData;
use crate::remote::Role;

/// Institutional mail domain, with the `@` separator included.
pub const DOMAIN_SUFFIX: &str = "@mbstu.ac.bd";

/// Any address on the institutional domain that is not a student address.
pub fn is_valid_teacher_email(email: &str) -> bool {
    let email = email.to_ascii_lowercase();
    email.len() > DOMAIN_SUFFIX.len()
        && email.ends_with(DOMAIN_SUFFIX)
        && !is_valid_student_email(&email)
}

/// `it` followed by exactly five digits on the institutional domain.
pub fn is_valid_student_email(email: &str) -> bool {
    let email = email.to_ascii_lowercase();

    match email.strip_suffix(DOMAIN_SUFFIX) {
        Some(local) => {
            local.len() == 7
                && local.starts_with("it")
                && local[2..].chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Field checks applied before any network attempt, in form order; the first
/// failing field rejects the registration outright.
pub fn validate_registration(
    mirror: &MirrorData,
    role: Role,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), SyncError> {
    if name.len() < 2 {
        return Err(SyncError::Validation {
            field: Field::Name,
            message: "Name is required",
        });
    }

    match role {
        Role::Teacher => {
            if !is_valid_teacher_email(email) {
                return Err(SyncError::Validation {
                    field: Field::Email,
                    message: "Valid teacher email required (ending with @mbstu.ac.bd)",
                });
            }
            if mirror.teacher_by_email(email).is_some() {
                return Err(SyncError::Validation {
                    field: Field::Email,
                    message: "This email is already registered",
                });
            }
        }
        Role::Student => {
            if !is_valid_student_email(email) {
                return Err(SyncError::Validation {
                    field: Field::Email,
                    message: "Valid student email required (it22002@mbstu.ac.bd format)",
                });
            }
            if mirror.student_by_email(email).is_some() {
                return Err(SyncError::Validation {
                    field: Field::Email,
                    message: "This student ID is already registered",
                });
            }
        }
    }

    if password.len() < 6 {
        return Err(SyncError::Validation {
            field: Field::Password,
            message: "Password must be at least 6 characters",
        });
    }

    if password != confirm_password {
        return Err(SyncError::Validation {
            field: Field::ConfirmPassword,
            message: "Passwords do not match",
        });
    }

    Ok(())
}
