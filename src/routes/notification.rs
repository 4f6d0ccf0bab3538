use warp::{http::StatusCode, Filter, Rejection, Reply};

use db::{Database, Db, NewNotification};
use filters::{json_body, with_db};

pub fn routes(db: &Db) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let list_route = warp::path!("api" / "notifications")
        .and(warp::get())
        .and(with_db(db.clone()))
        .and_then(list)
        .boxed();

    let create_route = warp::path!("api" / "notifications")
        .and(warp::post())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(create)
        .boxed();

    list_route.or(create_route)
}

async fn list(db: Db) -> Result<impl warp::Reply, warp::Rejection> {
    let db = db.lock().await;
    Ok(warp::reply::json(&db.notification_list()))
}

async fn create(request: NewNotification, db: Db) -> Result<impl warp::Reply, warp::Rejection> {
    let mut db = db.lock().await;
    let notification = db.notification_add(request);

    Ok(warp::reply::with_status(
        warp::reply::json(notification),
        StatusCode::CREATED,
    ))
}
