use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::error::RemoteError;
use crate::mirror::MirrorData;
use db::models::{ClassSession, Notification, Student, Teacher};

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Remote calls answer or fail within this window; a timeout is handled
/// exactly like an unreachable store.
const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

/// A logged-in user: the record the store matched at authentication time.
#[derive(Clone, Debug, PartialEq)]
pub enum Account {
    Teacher(Teacher),
    Student(Student),
}

impl Account {
    pub fn name(&self) -> &str {
        match self {
            Self::Teacher(t) => &t.name,
            Self::Student(s) => &s.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Teacher(t) => &t.email,
            Self::Student(s) => &s.email,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Teacher(_) => Role::Teacher,
            Self::Student(_) => Role::Student,
        }
    }
}

/// The record-service operations the sync coordinator consumes. The trait is
/// the seam that lets tests drive the coordinator against an in-memory store.
#[async_trait]
pub trait RecordService {
    async fn fetch_all(&self) -> Result<MirrorData, RemoteError>;

    async fn create_teacher(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Teacher, RemoteError>;

    async fn create_student(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Student, RemoteError>;

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, RemoteError>;

    /// The provisional id in `class` is ignored by the store, which assigns
    /// its own.
    async fn create_class(&self, class: &ClassSession) -> Result<ClassSession, RemoteError>;

    async fn update_class(&self, class: &ClassSession) -> Result<ClassSession, RemoteError>;

    async fn delete_class(&self, id: i64) -> Result<(), RemoteError>;

    async fn create_notification(
        &self,
        message: &str,
        email_sent: bool,
        for_all: bool,
    ) -> Result<Notification, RemoteError>;
}

/// `RecordService` over HTTP, matching the REST surface of the backend.
pub struct HttpRecordService {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationRequest<'a> {
    message: &'a str,
    email_sent: bool,
    for_all: bool,
}

impl HttpRecordService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REMOTE_TIMEOUT)
            .build()
            .expect("could not build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RecordService for HttpRecordService {
    async fn fetch_all(&self) -> Result<MirrorData, RemoteError> {
        expect_json(self.client.get(&self.url("/sync"))).await
    }

    async fn create_teacher(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Teacher, RemoteError> {
        let request = self
            .client
            .post(&self.url("/register/teacher"))
            .json(&RegisterRequest {
                name,
                email,
                password,
            });

        expect_json(request).await
    }

    async fn create_student(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Student, RemoteError> {
        let request = self
            .client
            .post(&self.url("/register/student"))
            .json(&RegisterRequest {
                name,
                email,
                password,
            });

        expect_json(request).await
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, RemoteError> {
        let request = self.client.post(&self.url("/login")).json(&LoginRequest {
            email,
            password,
            role,
        });

        match role {
            Role::Teacher => expect_json(request).await.map(Account::Teacher),
            Role::Student => expect_json(request).await.map(Account::Student),
        }
    }

    async fn create_class(&self, class: &ClassSession) -> Result<ClassSession, RemoteError> {
        expect_json(self.client.post(&self.url("/classes")).json(class)).await
    }

    async fn update_class(&self, class: &ClassSession) -> Result<ClassSession, RemoteError> {
        let url = self.url(&format!("/classes/{}", class.id));
        expect_json(self.client.put(&url).json(class)).await
    }

    async fn delete_class(&self, id: i64) -> Result<(), RemoteError> {
        let url = self.url(&format!("/classes/{}", id));
        expect_status(self.client.delete(&url)).await
    }

    async fn create_notification(
        &self,
        message: &str,
        email_sent: bool,
        for_all: bool,
    ) -> Result<Notification, RemoteError> {
        let request = self
            .client
            .post(&self.url("/notifications"))
            .json(&NotificationRequest {
                message,
                email_sent,
                for_all,
            });

        expect_json(request).await
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, RemoteError> {
    let response = request
        .send()
        .await
        .map_err(|err| RemoteError::Unavailable(err.to_string()))?;

    match response.status() {
        reqwest::StatusCode::CONFLICT => Err(RemoteError::Conflict),
        reqwest::StatusCode::UNAUTHORIZED => Err(RemoteError::InvalidCredentials),
        status if status.is_success() => Ok(response),
        status => Err(RemoteError::Unavailable(format!(
            "server returned {}",
            status
        ))),
    }
}

/// A payload that fails to decode counts as an unavailable store.
async fn expect_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, RemoteError> {
    send(request)
        .await?
        .json()
        .await
        .map_err(|err| RemoteError::Unavailable(err.to_string()))
}

async fn expect_status(request: reqwest::RequestBuilder) -> Result<(), RemoteError> {
    send(request).await.map(|_| ())
}
