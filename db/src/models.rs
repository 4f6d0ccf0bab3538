use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Email local part, upper-cased (`it22002@...` -> `IT22002`).
    pub student_id: String,
    pub registered_at: DateTime<Utc>,
}

/// One scheduled occurrence of a course. `teacher` is a denormalized display
/// name; `teacher_email` is the ownership key for mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: i64,
    pub course: String,
    pub course_name: String,
    pub semester: String,
    pub day: String,
    pub time: String,
    pub room: String,
    pub teacher: String,
    pub teacher_email: String,
    pub status: ClassStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Scheduled,
    Cancelled,
    Rescheduled,
}

impl std::fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
            Self::Rescheduled => "rescheduled",
        };
        f.write_str(s)
    }
}

/// Broadcast notification. Append-only: never mutated or deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub message: String,
    pub time: DateTime<Utc>,
    pub email_sent: bool,
    /// Per-user targeting is declared but unused; always true.
    pub for_all: bool,
}

/// Derives the student id from the email's local part.
pub fn student_id_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .unwrap_or(email)
        .to_ascii_uppercase()
}
