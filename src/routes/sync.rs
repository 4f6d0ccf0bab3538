use serde::Serialize;
use warp::{Filter, Rejection, Reply};

use db::{
    models::{ClassSession, Notification, Student, Teacher},
    Database, Db,
};
use filters::with_db;

pub fn routes(db: &Db) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "sync")
        .and(warp::get())
        .and(with_db(db.clone()))
        .and_then(sync)
        .boxed()
}

/// Snapshot of every collection, in id order, for clients rebuilding their
/// local mirror.
#[derive(Serialize)]
struct SyncResponse<'a> {
    teachers: Vec<&'a Teacher>,
    students: Vec<&'a Student>,
    classes: Vec<&'a ClassSession>,
    notifications: Vec<&'a Notification>,
}

async fn sync(db: Db) -> Result<impl warp::Reply, warp::Rejection> {
    let db = db.lock().await;

    Ok(warp::reply::json(&SyncResponse {
        teachers: db.teacher_list(),
        students: db.student_list(),
        classes: db.class_list(),
        notifications: db.notification_list(),
    }))
}
