use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

mod json;
pub mod models;
mod seed;

use json::JsonDatabase;
use models::{ClassSession, ClassStatus, Notification, Student, Teacher};

pub type Db = Arc<Mutex<JsonDatabase>>;

pub fn new_db(filename: String) -> Db {
    Arc::new(Mutex::new(JsonDatabase::new(filename)))
}

// While the trait is not used at runtime, it allows checking that the impl is complete
pub trait Database {
    fn reset(&mut self);
    fn seed(
        &mut self,
        teachers: impl Iterator<Item = NewTeacher>,
        students: impl Iterator<Item = NewStudent>,
        classes: impl Iterator<Item = NewClassSession>,
    );
    fn dump_as_json(&self) -> Result<String, serde_json::Error>;

    /// Returns `None` when the email is already registered. The check and the
    /// insert run under the same store guard, so two racing registrations for
    /// one email collapse to a single conflict.
    fn teacher_add(&mut self, teacher: NewTeacher) -> Option<&Teacher>;
    fn teacher_authenticate(&self, email: &str, password: &str) -> Option<&Teacher>;
    fn teacher_list(&self) -> Vec<&Teacher>;

    fn student_add(&mut self, student: NewStudent) -> Option<&Student>;
    fn student_authenticate(&self, email: &str, password: &str) -> Option<&Student>;
    fn student_list(&self) -> Vec<&Student>;

    fn class_add(&mut self, class: NewClassSession) -> &ClassSession;
    fn class_get(&self, id: i64) -> Option<&ClassSession>;
    fn class_replace(&mut self, id: i64, class: NewClassSession) -> Option<&ClassSession>;
    fn class_remove(&mut self, id: i64) -> bool;
    fn class_list(&self) -> Vec<&ClassSession>;

    fn notification_add(&mut self, notification: NewNotification) -> &Notification;
    fn notification_list(&self) -> Vec<&Notification>;
}

#[derive(Deserialize)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassSession {
    pub course: String,
    #[serde(default)]
    pub course_name: String,
    pub semester: String,
    pub day: String,
    pub time: String,
    pub room: String,
    pub teacher: String,
    pub teacher_email: String,
    #[serde(default)]
    pub status: Option<ClassStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub message: String,
    #[serde(default)]
    pub email_sent: bool,
    #[serde(default = "default_for_all")]
    pub for_all: bool,
}

fn default_for_all() -> bool {
    true
}
