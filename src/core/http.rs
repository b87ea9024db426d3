//! HTTP transport for FPL API communication

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, StatusCode,
};
use serde_json::Value;
use std::time::Duration;

use crate::{error::FplError, Result};

/// Query-string pairs for a GET request.
pub type QueryParams = [(String, String)];

/// One GET attempt against a fully-built URL, with no retry or caching.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str, params: Option<&QueryParams>) -> Result<Value>;
}

/// Default headers sent with every FPL request.
pub fn default_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h
}

/// Map a non-success status to the access-layer error taxonomy.
pub fn status_error(status: StatusCode, url: &str) -> FplError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        FplError::RateLimited {
            url: url.to_string(),
        }
    } else {
        FplError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        }
    }
}

/// reqwest-backed transport with a per-request timeout.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(default_headers())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str, params: Option<&QueryParams>) -> Result<Value> {
        let mut builder = self.client.get(url);
        if let Some(params) = params {
            builder = builder.query(params);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, url));
        }

        Ok(response.json::<Value>().await?)
    }
}
