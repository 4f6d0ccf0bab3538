use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use db::models::{
    student_id_from_email, ClassSession, ClassStatus, Notification, Student, Teacher,
};
use sync::{Account, MirrorData, RecordService, RemoteError, Role};

/// In-memory record service: behaves like the real backend when `available`,
/// and like an unplugged network cable when not. Clones share one store, so
/// a test can keep a handle while the coordinator owns another.
#[derive(Clone)]
pub struct FakeRecordService {
    state: Arc<Mutex<FakeState>>,
}

struct FakeState {
    data: MirrorData,
    next_id: i64,
    available: bool,
}

impl FakeRecordService {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                data: MirrorData::default(),
                next_id: 1,
                available: true,
            })),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.state.lock().unwrap().available = available;
    }

    /// The store's authoritative contents, for assertions.
    pub fn snapshot(&self) -> MirrorData {
        self.state.lock().unwrap().data.clone()
    }

    pub fn seed_teacher(&self, name: &str, email: &str, password: &str) -> Teacher {
        let mut state = self.state.lock().unwrap();
        let teacher = Teacher {
            id: state.take_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            registered_at: Utc::now(),
        };
        state.data.teachers.push(teacher.clone());
        teacher
    }

    pub fn seed_student(&self, name: &str, email: &str, password: &str) -> Student {
        let mut state = self.state.lock().unwrap();
        let student = Student {
            id: state.take_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            student_id: student_id_from_email(email),
            registered_at: Utc::now(),
        };
        state.data.students.push(student.clone());
        student
    }

    pub fn seed_class(&self, course: &str, owner: &Teacher) -> ClassSession {
        let mut state = self.state.lock().unwrap();
        let class = ClassSession {
            id: state.take_id(),
            course: course.to_string(),
            course_name: format!("{} course", course),
            semester: "6th".to_string(),
            day: "Saturday".to_string(),
            time: "09:00-09:50".to_string(),
            room: "R-206".to_string(),
            teacher: owner.name.clone(),
            teacher_email: owner.email.clone(),
            status: ClassStatus::Scheduled,
        };
        state.data.classes.push(class.clone());
        class
    }
}

impl FakeState {
    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check_available(&self) -> Result<(), RemoteError> {
        if self.available {
            Ok(())
        } else {
            Err(RemoteError::Unavailable("connection refused".to_string()))
        }
    }
}

#[async_trait]
impl RecordService for FakeRecordService {
    async fn fetch_all(&self) -> Result<MirrorData, RemoteError> {
        let state = self.state.lock().unwrap();
        state.check_available()?;
        Ok(state.data.clone())
    }

    async fn create_teacher(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Teacher, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;

        if state
            .data
            .teachers
            .iter()
            .any(|t| t.email.eq_ignore_ascii_case(email))
        {
            return Err(RemoteError::Conflict);
        }

        let teacher = Teacher {
            id: state.take_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            registered_at: Utc::now(),
        };
        state.data.teachers.push(teacher.clone());
        Ok(teacher)
    }

    async fn create_student(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Student, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;

        if state
            .data
            .students
            .iter()
            .any(|s| s.email.eq_ignore_ascii_case(email))
        {
            return Err(RemoteError::Conflict);
        }

        let student = Student {
            id: state.take_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            student_id: student_id_from_email(email),
            registered_at: Utc::now(),
        };
        state.data.students.push(student.clone());
        Ok(student)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, RemoteError> {
        let state = self.state.lock().unwrap();
        state.check_available()?;

        let account = match role {
            Role::Teacher => state
                .data
                .teachers
                .iter()
                .find(|t| t.email.eq_ignore_ascii_case(email) && t.password == password)
                .cloned()
                .map(Account::Teacher),
            Role::Student => state
                .data
                .students
                .iter()
                .find(|s| s.email.eq_ignore_ascii_case(email) && s.password == password)
                .cloned()
                .map(Account::Student),
        };

        account.ok_or(RemoteError::InvalidCredentials)
    }

    async fn create_class(&self, class: &ClassSession) -> Result<ClassSession, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;

        let mut class = class.clone();
        class.id = state.take_id();
        state.data.classes.push(class.clone());
        Ok(class)
    }

    async fn update_class(&self, class: &ClassSession) -> Result<ClassSession, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;

        let stored = state
            .data
            .classes
            .iter_mut()
            .find(|c| c.id == class.id)
            .ok_or_else(|| RemoteError::Unavailable("no such class".to_string()))?;

        *stored = class.clone();
        Ok(stored.clone())
    }

    async fn delete_class(&self, id: i64) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;

        state.data.classes.retain(|c| c.id != id);
        Ok(())
    }

    async fn create_notification(
        &self,
        message: &str,
        email_sent: bool,
        for_all: bool,
    ) -> Result<Notification, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;

        let notification = Notification {
            id: state.take_id(),
            message: message.to_string(),
            time: Utc::now(),
            email_sent,
            for_all,
        };
        state.data.notifications.push(notification.clone());
        Ok(notification)
    }
}
