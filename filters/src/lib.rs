use db::Db;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use warp::{Filter, Rejection};

/// Simple filter to add the database to the request
pub fn with_db(db: Db) -> impl Filter<Extract = (Db,), Error = Infallible> + Clone {
    warp::any().map(move || db.clone())
}

/// JSON request body, capped so a client cannot feed the store arbitrarily
/// large payloads.
pub fn json_body<T: DeserializeOwned + Send>(
) -> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(1024 * 16).and(warp::body::json())
}
