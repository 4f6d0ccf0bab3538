use warp::{http::StatusCode, Filter, Rejection, Reply};

use super::{globals::SimpleSuccessResponse, ErrorCode, FailureResponse};
use db::{Database, Db, NewClassSession};
use filters::{json_body, with_db};

pub fn routes(db: &Db) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let create_route = warp::path!("api" / "classes")
        .and(warp::post())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(create)
        .boxed();

    let update_route = warp::path!("api" / "classes" / i64)
        .and(warp::put())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(update)
        .boxed();

    let delete_route = warp::path!("api" / "classes" / i64)
        .and(warp::delete())
        .and(with_db(db.clone()))
        .and_then(delete)
        .boxed();

    create_route.or(update_route).or(delete_route)
}

async fn create(request: NewClassSession, db: Db) -> Result<impl warp::Reply, warp::Rejection> {
    let mut db = db.lock().await;
    let class = db.class_add(request);

    Ok(warp::reply::with_status(
        warp::reply::json(class),
        StatusCode::CREATED,
    ))
}

async fn update(
    id: i64,
    request: NewClassSession,
    db: Db,
) -> Result<impl warp::Reply, warp::Rejection> {
    let mut db = db.lock().await;

    match db.class_replace(id, request) {
        Some(class) => Ok(warp::reply::with_status(
            warp::reply::json(class),
            StatusCode::OK,
        )),
        None => Ok(warp::reply::with_status(
            FailureResponse::new_reply(ErrorCode::InvalidId),
            StatusCode::NOT_FOUND,
        )),
    }
}

async fn delete(id: i64, db: Db) -> Result<impl warp::Reply, warp::Rejection> {
    let mut db = db.lock().await;

    if db.class_remove(id) {
        Ok(warp::reply::with_status(
            warp::reply::json(&SimpleSuccessResponse::new()),
            StatusCode::OK,
        ))
    } else {
        Ok(warp::reply::with_status(
            FailureResponse::new_reply(ErrorCode::InvalidId),
            StatusCode::NOT_FOUND,
        ))
    }
}
