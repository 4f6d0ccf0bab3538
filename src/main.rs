use fern::colors::{Color, ColoredLevelConfig};
use warp::{http::StatusCode, Filter, Rejection, Reply};

mod routes;

use db::new_db;
use routes::{routes, ErrorCode, FailureResponse};

#[tokio::main]
async fn main() {
    setup_logging();

    let db_file = std::env::var("DB_FILE").unwrap_or_else(|_| "db.json".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let global_db = new_db(db_file);
    let filters = routes(&global_db);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_headers(vec!["content-type"]);

    let filters = filters
        .with(cors)
        // Before logging for correct status codes
        .recover(handle_rejection)
        .with(warp::log("class_routine"));

    log::info!("backend listening on port {}", port);
    warp::serve(filters).run(([127, 0, 0, 1], port)).await;
}

fn setup_logging() {
    let colors = ColoredLevelConfig::new().debug(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}{} {}",
                colors.color(record.level()),
                chrono::Local::now().format("[%H:%M:%S]"),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()
        .expect("Could not apply logging configuration");
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, std::convert::Infallible> {
    let error_code;
    let status_code;

    if err.is_not_found() {
        error_code = ErrorCode::NotFound;
        status_code = StatusCode::NOT_FOUND;
    } else if let Some(_) = err.find::<warp::filters::body::BodyDeserializeError>() {
        error_code = ErrorCode::MalformedData;
        status_code = StatusCode::BAD_REQUEST;
    } else if let Some(_) = err.find::<warp::reject::MethodNotAllowed>() {
        error_code = ErrorCode::MethodNotAllowed;
        status_code = StatusCode::METHOD_NOT_ALLOWED;
    } else {
        error_code = ErrorCode::InternalServerError;
        status_code = StatusCode::INTERNAL_SERVER_ERROR;
    }

    let json = warp::reply::json(&FailureResponse::new(error_code));
    Ok(warp::reply::with_status(json, status_code))
}
