use std::{
    net::{SocketAddr, ToSocketAddrs},
    sync::Arc,
};

use log::info;
use pipeline::{AnalysisRunner, FetchError, Fetcher};
use settings::Config;
use textstats::JiebaSegmenter;
use thiserror::Error;
use warp::Filter;

pub mod handlers;

pub use handlers::{handle_rejection, routes};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("could not resolve {0}")]
    Address(String),
    #[error("could not resolve address: {0}")]
    Resolve(#[from] std::io::Error),
    #[error("could not create fetcher: {0}")]
    Fetcher(#[from] FetchError),
    #[error("could not bind server: {0}")]
    Bind(#[from] warp::Error),
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| ServerError::Address(format!("{}:{}", host, port)))
}

pub async fn server(config: Config) -> Result<(), ServerError> {
    let addr = resolve(&config.general.host, config.general.port)?;
    let fetcher = Fetcher::spawn(config.fetch.clone()).await?;
    let segmenter = JiebaSegmenter::new();
    segmenter.warm_up();
    let runner = AnalysisRunner::new(Arc::new(fetcher), Arc::new(segmenter));
    let app = routes(runner)
        .recover(handle_rejection)
        .with(warp::log("cipin::www"));
    let (bound, serving) = warp::serve(app).try_bind_ephemeral(addr)?;
    info!("Starting server at: http://{}", bound);
    serving.await;
    Ok(())
}
