use serde::Deserialize;
use warp::{http::StatusCode, Filter, Rejection, Reply};

use super::{ErrorCode, FailureResponse};
use db::{Database, Db};
use filters::{json_body, with_db};

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
    role: Role,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    Teacher,
    Student,
}

pub fn routes(db: &Db) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "login")
        .and(warp::post())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(login)
        .boxed()
}

async fn login(request: LoginRequest, db: Db) -> Result<impl warp::Reply, warp::Rejection> {
    let db = db.lock().await;

    // One combined failure for unknown email and wrong password
    let matched = match request.role {
        Role::Teacher => db
            .teacher_authenticate(&request.email, &request.password)
            .map(warp::reply::json),
        Role::Student => db
            .student_authenticate(&request.email, &request.password)
            .map(warp::reply::json),
    };

    match matched {
        Some(record) => Ok(warp::reply::with_status(record, StatusCode::OK)),
        None => Ok(warp::reply::with_status(
            FailureResponse::new_reply(ErrorCode::InvalidCredentials),
            StatusCode::UNAUTHORIZED,
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use db::new_db;
    use serde_json::json;

    fn temp_db(name: &str) -> db::Db {
        let path = std::env::temp_dir().join(format!("class_routine_api_{}.json", name));
        let _ = std::fs::remove_file(&path);
        new_db(path.to_string_lossy().into_owned())
    }

    #[tokio::test]
    async fn seeded_teacher_can_log_in() {
        let db = temp_db("login_ok");
        let api = routes(&db);

        let response = warp::test::request()
            .method("POST")
            .path("/api/login")
            .json(&json!({
                "email": "anowarkabir@mbstu.ac.bd",
                "password": "teacher123",
                "role": "teacher",
            }))
            .reply(&api)
            .await;
        assert_eq!(response.status(), 200);

        let record: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(record["email"], "anowarkabir@mbstu.ac.bd");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let db = temp_db("login_combined");
        let api = routes(&db);

        let wrong_password = warp::test::request()
            .method("POST")
            .path("/api/login")
            .json(&json!({
                "email": "anowarkabir@mbstu.ac.bd",
                "password": "nope",
                "role": "teacher",
            }))
            .reply(&api)
            .await;

        let unknown_email = warp::test::request()
            .method("POST")
            .path("/api/login")
            .json(&json!({
                "email": "nobody@mbstu.ac.bd",
                "password": "nope",
                "role": "teacher",
            }))
            .reply(&api)
            .await;

        assert_eq!(wrong_password.status(), 401);
        assert_eq!(unknown_email.status(), 401);
        assert_eq!(wrong_password.body(), unknown_email.body());
    }
}
