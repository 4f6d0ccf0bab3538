use warp::{http::StatusCode, Filter, Rejection, Reply};

use super::{ErrorCode, FailureResponse};
use db::{Database, Db, NewStudent, NewTeacher};
use filters::{json_body, with_db};

pub fn routes(db: &Db) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let teacher_route = warp::path!("api" / "register" / "teacher")
        .and(warp::post())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(register_teacher)
        .boxed();

    let student_route = warp::path!("api" / "register" / "student")
        .and(warp::post())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(register_student)
        .boxed();

    teacher_route.or(student_route)
}

async fn register_teacher(
    request: NewTeacher,
    db: Db,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut db = db.lock().await;

    // The duplicate check and the insert share the store guard, so two racing
    // registrations for one email cannot both pass.
    match db.teacher_add(request) {
        Some(teacher) => Ok(warp::reply::with_status(
            warp::reply::json(teacher),
            StatusCode::CREATED,
        )),
        None => Ok(warp::reply::with_status(
            FailureResponse::new_reply(ErrorCode::EmailAlreadyRegistered),
            StatusCode::CONFLICT,
        )),
    }
}

async fn register_student(
    request: NewStudent,
    db: Db,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut db = db.lock().await;

    match db.student_add(request) {
        Some(student) => Ok(warp::reply::with_status(
            warp::reply::json(student),
            StatusCode::CREATED,
        )),
        None => Ok(warp::reply::with_status(
            FailureResponse::new_reply(ErrorCode::StudentIdAlreadyRegistered),
            StatusCode::CONFLICT,
        )),
    }
}
