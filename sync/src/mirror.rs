use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::{
    fs::File,
    path::{Path, PathBuf},
};

use db::models::{ClassSession, Notification, Student, Teacher};

/// Server-assigned ids are positive; locally synthesized fallback records
/// live in a negative id namespace so the two can never collide.
pub fn is_local_id(id: i64) -> bool {
    id < 0
}

/// The four record collections: the payload of a full sync and of the
/// persisted snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MirrorData {
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub classes: Vec<ClassSession>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl MirrorData {
    pub fn teacher_by_email(&self, email: &str) -> Option<&Teacher> {
        self.teachers
            .iter()
            .find(|t| t.email.eq_ignore_ascii_case(email))
    }

    pub fn student_by_email(&self, email: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|s| s.email.eq_ignore_ascii_case(email))
    }

    pub fn class_by_id(&self, id: i64) -> Option<&ClassSession> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Next free id in the local namespace, descending from -1.
    pub fn next_local_id(&self) -> i64 {
        let lowest = self
            .teachers
            .iter()
            .map(|t| t.id)
            .chain(self.students.iter().map(|s| s.id))
            .chain(self.classes.iter().map(|c| c.id))
            .chain(self.notifications.iter().map(|n| n.id))
            .filter(|id| is_local_id(*id))
            .min()
            .unwrap_or(0);

        lowest - 1
    }
}

/// Client-held snapshot of all server collections, used as the source of
/// truth for rendering when the server is unreachable. Owned by exactly one
/// client session: constructed at session start, dropped at session end.
pub struct LocalMirror {
    path: PathBuf,
    data: MirrorData,
}

impl LocalMirror {
    /// Loads the last persisted snapshot, or starts empty when none exists
    /// (or the snapshot cannot be parsed).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let data = match Self::from_file(&path) {
            Ok(data) => data,
            Err(_) => MirrorData::default(),
        };

        Self { path, data }
    }

    fn from_file(path: &Path) -> Result<MirrorData, std::io::Error> {
        let contents = {
            let mut file = File::open(path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            contents
        };

        Ok(serde_json::from_str(&contents)?)
    }

    pub fn data(&self) -> &MirrorData {
        &self.data
    }

    /// Wholesale replacement; only the full-resync path uses this. All other
    /// mutations are incremental appends or in-place updates.
    pub fn replace(&mut self, data: MirrorData) {
        self.data = data;
    }

    /// Overwrites the snapshot with the current contents. Mirror state always
    /// wins over snapshot durability: a write failure is logged and the
    /// session continues.
    pub fn persist(&self) {
        if let Err(err) = self.try_persist() {
            log::warn!(
                "could not persist mirror snapshot to {}: {}",
                self.path.display(),
                err
            );
        }
    }

    fn try_persist(&self) -> Result<(), std::io::Error> {
        let mut output = File::create(&self.path)?;
        write!(output, "{}", serde_json::to_string(&self.data)?)?;
        Ok(())
    }

    pub fn push_teacher(&mut self, teacher: Teacher) {
        self.data.teachers.push(teacher);
    }

    pub fn push_student(&mut self, student: Student) {
        self.data.students.push(student);
    }

    pub fn push_class(&mut self, class: ClassSession) {
        self.data.classes.push(class);
    }

    pub fn push_notification(&mut self, notification: Notification) {
        self.data.notifications.push(notification);
    }

    pub fn class_mut(&mut self, id: i64) -> Option<&mut ClassSession> {
        self.data.classes.iter_mut().find(|c| c.id == id)
    }

    /// Swaps a class for the authoritative record returned by the store.
    pub fn replace_class(&mut self, authoritative: ClassSession) {
        if let Some(class) = self.class_mut(authoritative.id) {
            *class = authoritative;
        }
    }

    pub fn remove_class(&mut self, id: i64) -> bool {
        let before = self.data.classes.len();
        self.data.classes.retain(|c| c.id != id);
        self.data.classes.len() != before
    }
}
