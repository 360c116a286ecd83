use std::{io::Read, time::Duration};

use encoding_rs::{Encoding, UTF_8};
use log::debug;
use reqwest::{blocking::Client, header::CONTENT_TYPE};
use settings::Fetch;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("no URL given")]
    EmptyUrl,
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported URL scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
    #[error("could not build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("could not read response body: {0}")]
    Body(#[from] std::io::Error),
    #[error("analysis was aborted")]
    Aborted,
}

/// Anything that can hand back the body behind a URL.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// A single-attempt blocking HTTP GET with a bounded timeout and body size.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_body_bytes: u64,
}

impl Fetcher {
    pub fn new(settings: &Fetch) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    /// `new` for async callers. The blocking client must not be built on a runtime thread.
    pub async fn spawn(settings: Fetch) -> Result<Self, FetchError> {
        tokio::task::spawn_blocking(move || Self::new(&settings))
            .await
            .map_err(|_| FetchError::Aborted)?
    }
}

pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FetchError::EmptyUrl);
    }
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_owned(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_owned())),
    }
}

impl DocumentSource for Fetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = parse_url(url)?;
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if matches!(response.content_length(), Some(len) if len > self.max_body_bytes) {
            return Err(FetchError::TooLarge {
                limit: self.max_body_bytes,
            });
        }
        let encoding = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_of)
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        // Read one byte past the limit to tell "exactly at" from "over".
        let mut raw = Vec::new();
        response
            .take(self.max_body_bytes + 1)
            .read_to_end(&mut raw)?;
        if raw.len() as u64 > self.max_body_bytes {
            return Err(FetchError::TooLarge {
                limit: self.max_body_bytes,
            });
        }
        let (text, _, _) = encoding.decode(&raw);
        Ok(text.into_owned())
    }
}

fn charset_of(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches('"'))
        })
}
