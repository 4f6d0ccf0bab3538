use chrono::Utc;

use crate::mirror::LocalMirror;
use crate::remote::RecordService;
use db::models::{ClassSession, Notification, Student};

/// A class mutation worth announcing to the whole department.
#[derive(Clone, Debug)]
pub enum ClassEvent {
    Created,
    Cancelled,
    /// Carries the pre-mutation day/time/room so the announcement can show
    /// both schedules.
    Rescheduled { previous: Schedule },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    pub day: String,
    pub time: String,
    pub room: String,
}

impl Schedule {
    pub fn of(class: &ClassSession) -> Self {
        Self {
            day: class.day.clone(),
            time: class.time.clone(),
            room: class.room.clone(),
        }
    }
}

/// Builds the broadcast message for `event`, records the simulated email
/// send to every student in the mirror, and persists the notification with
/// the optimistic-remote-then-local-fallback policy. Never fails: the class
/// mutation that triggered the event is already decided, and a notification
/// the store never saw still lands in the mirror with a local id and
/// timestamp.
pub async fn broadcast_class_event<S: RecordService>(
    mirror: &mut LocalMirror,
    remote: &S,
    event: ClassEvent,
    class: &ClassSession,
) -> Notification {
    let message = event_message(&event, class);

    send_email_to_students(&mirror.data().students, &event_subject(&event, class), &message);

    let notification = match remote.create_notification(&message, true, true).await {
        Ok(notification) => notification,
        Err(err) => {
            log::warn!("notification not persisted remotely, saving locally: {}", err);
            Notification {
                id: mirror.data().next_local_id(),
                message,
                time: Utc::now(),
                email_sent: true,
                for_all: true,
            }
        }
    };

    mirror.push_notification(notification.clone());
    mirror.persist();

    notification
}

fn event_subject(event: &ClassEvent, class: &ClassSession) -> String {
    match event {
        ClassEvent::Created => format!("New Class Added - {}", class.course),
        ClassEvent::Cancelled => format!("Class Cancelled - {}", class.course),
        ClassEvent::Rescheduled { .. } => format!("Class Rescheduled - {}", class.course),
    }
}

fn event_message(event: &ClassEvent, class: &ClassSession) -> String {
    match event {
        ClassEvent::Created => format!(
            "New class added: {} ({}) on {} at {}",
            class.course, class.course_name, class.day, class.time
        ),
        ClassEvent::Cancelled => format!(
            "Class cancelled: {} ({}) on {} at {} in {}, taught by {}",
            class.course, class.course_name, class.day, class.time, class.room, class.teacher
        ),
        ClassEvent::Rescheduled { previous } => format!(
            "Class rescheduled: {} ({}). Previous: {} at {} in {}. New: {} at {} in {}",
            class.course,
            class.course_name,
            previous.day,
            previous.time,
            previous.room,
            class.day,
            class.time,
            class.room
        ),
    }
}

/// Simulated delivery: one log entry per student, no real transport behind
/// it.
fn send_email_to_students(students: &[Student], subject: &str, message: &str) {
    log::info!("sending email notification: {}", subject);
    log::info!("{}", message);

    for student in students {
        log::info!(
            "email sent to {} <{}> ({})",
            student.name,
            student.email,
            student.student_id
        );
    }

    log::info!("total emails sent: {} students", students.len());
}
