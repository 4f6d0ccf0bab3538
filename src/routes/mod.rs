use warp::{Filter, Rejection, Reply};

use db::Db;

mod class;
mod globals;
mod login;
mod notification;
mod register;
mod sync;

pub use globals::{ErrorCode, FailureResponse};

pub fn routes(db: &Db) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    sync::routes(db)
        .or(register::routes(db))
        .or(login::routes(db))
        .or(class::routes(db))
        .or(notification::routes(db))
}
