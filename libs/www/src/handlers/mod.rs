pub mod analysis_handler;
pub mod filters;

pub use self::analysis_handler::AnalysisRouter;

use std::convert::Infallible;

use log::error;
use pipeline::AnalysisRunner;
use warp::{
    filters::BoxedFilter,
    http::{Response, StatusCode},
    Rejection, Reply,
};

pub fn routes(runner: AnalysisRunner) -> BoxedFilter<(impl Reply,)> {
    AnalysisRouter::new(runner).routes()
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed".to_string(),
        )
    } else {
        error!("unhandled error: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    let response = Response::new(message);
    let (mut parts, body) = response.into_parts();
    parts.status = code;
    Ok(Response::from_parts(parts, body))
}
