use chrono::Utc;

use crate::error::{Field, RemoteError, SyncError};
use crate::fanout::{broadcast_class_event, ClassEvent, Schedule};
use crate::mirror::{is_local_id, LocalMirror, MirrorData};
use crate::remote::{Account, RecordService, Role};
use crate::validate;
use db::models::{student_id_from_email, ClassSession, ClassStatus, Student, Teacher};

/// Fields a teacher fills in when adding a class. The owning teacher's name
/// and email are stamped on by the coordinator, never taken from the form.
#[derive(Clone, Debug, Default)]
pub struct NewClassFields {
    pub course: String,
    pub course_name: String,
    pub semester: String,
    pub day: String,
    pub time: String,
    pub room: String,
}

/// Keeps the local mirror a best-effort copy of the authoritative store,
/// preferring availability over strict consistency: every mutation is
/// validated locally, attempted remotely exactly once, and applied to the
/// mirror either as the authoritative record or as a locally synthesized
/// fallback. No mutation is queued or retried.
pub struct SyncCoordinator<S> {
    mirror: LocalMirror,
    remote: S,
}

impl<S: RecordService> SyncCoordinator<S> {
    pub fn new(mirror: LocalMirror, remote: S) -> Self {
        Self { mirror, remote }
    }

    /// Current mirror contents, for rendering.
    pub fn mirror(&self) -> &MirrorData {
        self.mirror.data()
    }

    /// Full resync: replaces the whole mirror with the store's snapshot and
    /// re-persists it. On any failure the mirror keeps whatever it already
    /// holds (last snapshot, or empty). Safe to call repeatedly.
    pub async fn initialize(&mut self) {
        match self.remote.fetch_all().await {
            Ok(data) => {
                self.surface_discarded_local_records();
                self.mirror.replace(data);
                self.mirror.persist();
            }
            Err(err) => {
                log::warn!("full sync failed, using local snapshot: {}", err);
            }
        }
    }

    /// A resync drops records the store never confirmed; they are surfaced
    /// here rather than silently merged or retried.
    fn surface_discarded_local_records(&self) {
        let data = self.mirror.data();

        for teacher in data.teachers.iter().filter(|t| is_local_id(t.id)) {
            log::warn!("discarding unconfirmed local teacher {}", teacher.email);
        }
        for student in data.students.iter().filter(|s| is_local_id(s.id)) {
            log::warn!("discarding unconfirmed local student {}", student.email);
        }
        for class in data.classes.iter().filter(|c| is_local_id(c.id)) {
            log::warn!("discarding unconfirmed local class {}", class.course);
        }
        for notification in data.notifications.iter().filter(|n| is_local_id(n.id)) {
            log::warn!(
                "discarding unconfirmed local notification {}",
                notification.id
            );
        }
    }

    pub async fn register_teacher(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Teacher, SyncError> {
        let name = name.trim();
        let email = email.trim().to_ascii_lowercase();

        validate::validate_registration(
            self.mirror.data(),
            Role::Teacher,
            name,
            &email,
            password,
            confirm_password,
        )?;

        let teacher = match self.remote.create_teacher(name, &email, password).await {
            Ok(teacher) => teacher,
            Err(RemoteError::Conflict) => {
                return Err(SyncError::Conflict {
                    field: Field::Email,
                    message: "This email is already registered",
                })
            }
            Err(err) => {
                log::warn!("registration not persisted remotely, saving locally: {}", err);
                Teacher {
                    id: self.mirror.data().next_local_id(),
                    name: name.to_string(),
                    email,
                    password: password.to_string(),
                    registered_at: Utc::now(),
                }
            }
        };

        self.mirror.push_teacher(teacher.clone());
        self.mirror.persist();

        Ok(teacher)
    }

    pub async fn register_student(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Student, SyncError> {
        let name = name.trim();
        let email = email.trim().to_ascii_lowercase();

        validate::validate_registration(
            self.mirror.data(),
            Role::Student,
            name,
            &email,
            password,
            confirm_password,
        )?;

        let student = match self.remote.create_student(name, &email, password).await {
            Ok(student) => student,
            Err(RemoteError::Conflict) => {
                return Err(SyncError::Conflict {
                    field: Field::Email,
                    message: "This student ID is already registered",
                })
            }
            Err(err) => {
                log::warn!("registration not persisted remotely, saving locally: {}", err);
                Student {
                    id: self.mirror.data().next_local_id(),
                    name: name.to_string(),
                    student_id: student_id_from_email(&email),
                    email,
                    password: password.to_string(),
                    registered_at: Utc::now(),
                }
            }
        };

        self.mirror.push_student(student.clone());
        self.mirror.persist();

        Ok(student)
    }

    /// A store-side rejection is terminal; only an unreachable store falls
    /// back to checking credentials against the mirror.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, SyncError> {
        let email = email.trim().to_ascii_lowercase();

        match self.remote.authenticate(&email, password, role).await {
            Ok(account) => Ok(account),
            Err(RemoteError::InvalidCredentials) => Err(SyncError::InvalidCredentials),
            Err(err) => {
                log::warn!("remote login failed, checking local snapshot: {}", err);
                self.login_local(&email, password, role)
            }
        }
    }

    fn login_local(&self, email: &str, password: &str, role: Role) -> Result<Account, SyncError> {
        let data = self.mirror.data();

        let account = match role {
            Role::Teacher => data
                .teacher_by_email(email)
                .filter(|t| t.password == password)
                .cloned()
                .map(Account::Teacher),
            Role::Student => data
                .student_by_email(email)
                .filter(|s| s.password == password)
                .cloned()
                .map(Account::Student),
        };

        account.ok_or(SyncError::InvalidCredentials)
    }

    pub async fn create_class(
        &mut self,
        teacher: &Teacher,
        fields: NewClassFields,
    ) -> Result<ClassSession, SyncError> {
        validate_class_fields(&fields)?;

        let provisional = ClassSession {
            id: self.mirror.data().next_local_id(),
            course: fields.course,
            course_name: fields.course_name,
            semester: fields.semester,
            day: fields.day,
            time: fields.time,
            room: fields.room,
            teacher: teacher.name.clone(),
            teacher_email: teacher.email.clone(),
            status: ClassStatus::Scheduled,
        };

        let class = match self.remote.create_class(&provisional).await {
            Ok(created) => created,
            Err(err) => {
                log::warn!("class not persisted remotely, saving locally: {}", err);
                provisional
            }
        };

        self.mirror.push_class(class.clone());
        self.mirror.persist();

        broadcast_class_event(&mut self.mirror, &self.remote, ClassEvent::Created, &class).await;

        Ok(class)
    }

    /// Terminal transition: a cancelled class keeps its slot in the table
    /// and can never be revived or moved.
    pub async fn cancel_class(
        &mut self,
        teacher: &Teacher,
        class_id: i64,
    ) -> Result<ClassSession, SyncError> {
        let updated = {
            let class = self.locked_class(teacher, class_id)?;

            if class.status != ClassStatus::Scheduled {
                return Err(SyncError::InvalidTransition {
                    from: class.status,
                    to: ClassStatus::Cancelled,
                });
            }

            class.status = ClassStatus::Cancelled;
            class.clone()
        };

        let updated = self.push_class_update(updated).await;
        self.mirror.persist();

        broadcast_class_event(
            &mut self.mirror,
            &self.remote,
            ClassEvent::Cancelled,
            &updated,
        )
        .await;

        Ok(updated)
    }

    /// Re-entrant: a rescheduled class can move again, each time announcing
    /// the schedule it moved away from.
    pub async fn reschedule_class(
        &mut self,
        teacher: &Teacher,
        class_id: i64,
        day: &str,
        time: &str,
        room: &str,
    ) -> Result<ClassSession, SyncError> {
        let (previous, updated) = {
            let class = self.locked_class(teacher, class_id)?;

            if class.status == ClassStatus::Cancelled {
                return Err(SyncError::InvalidTransition {
                    from: class.status,
                    to: ClassStatus::Rescheduled,
                });
            }

            let previous = Schedule::of(class);
            class.day = day.to_string();
            class.time = time.to_string();
            class.room = room.to_string();
            class.status = ClassStatus::Rescheduled;

            (previous, class.clone())
        };

        let updated = self.push_class_update(updated).await;
        self.mirror.persist();

        broadcast_class_event(
            &mut self.mirror,
            &self.remote,
            ClassEvent::Rescheduled { previous },
            &updated,
        )
        .await;

        Ok(updated)
    }

    /// Removes a class without announcing anything; not part of the normal
    /// schedule flow.
    pub async fn delete_class(&mut self, teacher: &Teacher, class_id: i64) -> Result<(), SyncError> {
        self.locked_class(teacher, class_id)?;

        self.mirror.remove_class(class_id);
        self.mirror.persist();

        if !is_local_id(class_id) {
            if let Err(err) = self.remote.delete_class(class_id).await {
                log::warn!("class deletion not persisted remotely: {}", err);
            }
        }

        Ok(())
    }

    /// Looks the class up and enforces the ownership invariant: only the
    /// teacher whose email is on the record may mutate it.
    fn locked_class(
        &mut self,
        teacher: &Teacher,
        class_id: i64,
    ) -> Result<&mut ClassSession, SyncError> {
        match self.mirror.class_mut(class_id) {
            None => Err(SyncError::UnknownClass(class_id)),
            Some(class) if !class.teacher_email.eq_ignore_ascii_case(&teacher.email) => {
                Err(SyncError::NotClassOwner(class_id))
            }
            Some(class) => Ok(class),
        }
    }

    /// Reconciles an already-applied local update with the store: on success
    /// the authoritative record replaces the optimistic one; on failure the
    /// optimistic record stands. Records the store never confirmed are not
    /// sent at all, since an optimistic write is never retried.
    async fn push_class_update(&mut self, class: ClassSession) -> ClassSession {
        if is_local_id(class.id) {
            return class;
        }

        match self.remote.update_class(&class).await {
            Ok(authoritative) => {
                self.mirror.replace_class(authoritative.clone());
                authoritative
            }
            Err(err) => {
                log::warn!("class update not persisted remotely, keeping local state: {}", err);
                class
            }
        }
    }
}

fn validate_class_fields(fields: &NewClassFields) -> Result<(), SyncError> {
    let required = [
        (Field::Course, &fields.course, "Course code is required"),
        (Field::Semester, &fields.semester, "Semester is required"),
        (Field::Day, &fields.day, "Day is required"),
        (Field::Time, &fields.time, "Time is required"),
        (Field::Room, &fields.room, "Room is required"),
    ];

    for &(field, value, message) in required.iter() {
        if value.trim().is_empty() {
            return Err(SyncError::Validation { field, message });
        }
    }

    Ok(())
}
