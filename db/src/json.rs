use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::{collections::HashMap, fs::File};

use super::{
    models::{ClassSession, ClassStatus, Notification, Student, Teacher},
    seed::seed_db,
    Database, NewClassSession, NewNotification, NewStudent, NewTeacher,
};

#[derive(Serialize, Deserialize)]
pub struct JsonDatabase {
    filename: String,
    teachers: HashMap<i64, Teacher>,
    students: HashMap<i64, Student>,
    classes: HashMap<i64, ClassSession>,
    notifications: HashMap<i64, Notification>,
    next_teacher_id: i64,
    next_student_id: i64,
    next_class_id: i64,
    next_notification_id: i64,
}

impl JsonDatabase {
    pub fn new(filename: String) -> Self {
        // Try to read from disk
        if let Ok(db) = Self::from_file(&filename) {
            return db;
        }

        let mut db = Self {
            filename,
            teachers: HashMap::new(),
            students: HashMap::new(),
            classes: HashMap::new(),
            notifications: HashMap::new(),
            next_teacher_id: 1,
            next_student_id: 1,
            next_class_id: 1,
            next_notification_id: 1,
        };

        db.reset();

        db
    }

    fn from_file(filename: &str) -> Result<Self, std::io::Error> {
        let contents = {
            let mut file = File::open(filename)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            contents
        };

        Ok(serde_json::from_str(&contents)?)
    }

    fn persist(&self) -> Result<(), std::io::Error> {
        let mut output = File::create(&self.filename)?;
        write!(output, "{}", self.dump_as_json()?)?;
        Ok(())
    }
}

impl Database for JsonDatabase {
    fn reset(&mut self) {
        self.teachers.clear();
        self.students.clear();
        self.classes.clear();
        self.notifications.clear();
        self.next_teacher_id = 1;
        self.next_student_id = 1;
        self.next_class_id = 1;
        self.next_notification_id = 1;

        seed_db(self);

        self.persist().expect("could not save DB");
    }

    fn seed(
        &mut self,
        teachers: impl Iterator<Item = NewTeacher>,
        students: impl Iterator<Item = NewStudent>,
        classes: impl Iterator<Item = NewClassSession>,
    ) {
        teachers.for_each(|t| {
            self._teacher_add(t);
        });
        students.for_each(|s| {
            self._student_add(s);
        });
        classes.for_each(|c| {
            self._class_add(c);
        });
        self.persist().expect("could not save DB");
    }

    fn dump_as_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self)
    }

    fn teacher_add(&mut self, teacher: NewTeacher) -> Option<&Teacher> {
        if self.teacher_email_taken(&teacher.email) {
            return None;
        }

        let id = self._teacher_add(teacher);
        self.persist().expect("could not save DB");
        self.teachers.get(&id)
    }

    fn teacher_authenticate(&self, email: &str, password: &str) -> Option<&Teacher> {
        self.teachers
            .values()
            .find(|t| t.email.eq_ignore_ascii_case(email) && t.password == password)
    }

    fn teacher_list(&self) -> Vec<&Teacher> {
        sorted_by_id(self.teachers.values(), |t| t.id)
    }

    fn student_add(&mut self, student: NewStudent) -> Option<&Student> {
        if self.student_email_taken(&student.email) {
            return None;
        }

        let id = self._student_add(student);
        self.persist().expect("could not save DB");
        self.students.get(&id)
    }

    fn student_authenticate(&self, email: &str, password: &str) -> Option<&Student> {
        self.students
            .values()
            .find(|s| s.email.eq_ignore_ascii_case(email) && s.password == password)
    }

    fn student_list(&self) -> Vec<&Student> {
        sorted_by_id(self.students.values(), |s| s.id)
    }

    fn class_add(&mut self, class: NewClassSession) -> &ClassSession {
        let id = self._class_add(class);
        self.persist().expect("could not save DB");
        &self.classes[&id]
    }

    fn class_get(&self, id: i64) -> Option<&ClassSession> {
        self.classes.get(&id)
    }

    fn class_replace(&mut self, id: i64, class: NewClassSession) -> Option<&ClassSession> {
        if !self.classes.contains_key(&id) {
            return None;
        }

        let class = ClassSession {
            id,
            course: class.course,
            course_name: class.course_name,
            semester: class.semester,
            day: class.day,
            time: class.time,
            room: class.room,
            teacher: class.teacher,
            teacher_email: class.teacher_email,
            status: class.status.unwrap_or(ClassStatus::Scheduled),
        };

        self.classes.insert(id, class);
        self.persist().expect("could not save DB");
        self.classes.get(&id)
    }

    fn class_remove(&mut self, id: i64) -> bool {
        let removed = self.classes.remove(&id).is_some();
        if removed {
            self.persist().expect("could not save DB");
        }
        removed
    }

    fn class_list(&self) -> Vec<&ClassSession> {
        sorted_by_id(self.classes.values(), |c| c.id)
    }

    fn notification_add(&mut self, notification: NewNotification) -> &Notification {
        let id = self.next_notification_id;
        self.next_notification_id += 1;

        self.notifications.insert(
            id,
            Notification {
                id,
                message: notification.message,
                time: Utc::now(),
                email_sent: notification.email_sent,
                for_all: notification.for_all,
            },
        );

        self.persist().expect("could not save DB");
        &self.notifications[&id]
    }

    fn notification_list(&self) -> Vec<&Notification> {
        sorted_by_id(self.notifications.values(), |n| n.id)
    }
}

impl JsonDatabase {
    fn teacher_email_taken(&self, email: &str) -> bool {
        self.teachers
            .values()
            .any(|t| t.email.eq_ignore_ascii_case(email))
    }

    fn student_email_taken(&self, email: &str) -> bool {
        self.students
            .values()
            .any(|s| s.email.eq_ignore_ascii_case(email))
    }

    fn _teacher_add(&mut self, teacher: NewTeacher) -> i64 {
        let id = self.next_teacher_id;
        self.next_teacher_id += 1;

        self.teachers.insert(
            id,
            Teacher {
                id,
                name: teacher.name,
                email: teacher.email,
                password: teacher.password,
                registered_at: Utc::now(),
            },
        );

        id
    }

    fn _student_add(&mut self, student: NewStudent) -> i64 {
        let id = self.next_student_id;
        self.next_student_id += 1;

        let student_id = super::models::student_id_from_email(&student.email);

        self.students.insert(
            id,
            Student {
                id,
                name: student.name,
                email: student.email,
                password: student.password,
                student_id,
                registered_at: Utc::now(),
            },
        );

        id
    }

    fn _class_add(&mut self, class: NewClassSession) -> i64 {
        let id = self.next_class_id;
        self.next_class_id += 1;

        self.classes.insert(
            id,
            ClassSession {
                id,
                course: class.course,
                course_name: class.course_name,
                semester: class.semester,
                day: class.day,
                time: class.time,
                room: class.room,
                teacher: class.teacher,
                teacher_email: class.teacher_email,
                status: class.status.unwrap_or(ClassStatus::Scheduled),
            },
        );

        id
    }
}

/// Lists are served in id order so that two identical fetches observe
/// identical payloads.
fn sorted_by_id<'a, T, F>(collection: impl Iterator<Item = &'a T>, id: F) -> Vec<&'a T>
where
    F: Fn(&T) -> i64,
{
    let mut rows: Vec<&T> = collection.collect();
    rows.sort_by_key(|row| id(*row));
    rows
}
