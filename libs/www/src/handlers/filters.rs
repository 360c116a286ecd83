use pipeline::AnalysisRunner;
use warp::{Filter, Rejection};

pub fn with_runner(
    runner: AnalysisRunner,
) -> impl Filter<Extract = (AnalysisRunner,), Error = Rejection> + Clone {
    warp::any().map(move || runner.clone()).boxed()
}
