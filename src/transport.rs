//! The GET-with-query-parameters collaborator every pipeline stage talks through.
//!
//! [`HttpTransport`] is the production implementation (blocking `reqwest`).
//! Anything else implementing [`Transport`] can stand in for it, e.g. a
//! scripted transport in tests.
use crate::config::ClientConfig;
use crate::error::OnsError;
use anyhow::{Context, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;

/// Query string as ordered `(key, value)` pairs.
pub type Query = [(String, String)];

pub trait Transport {
    /// Perform `GET url?query` and return the decoded JSON body.
    ///
    /// Network failures, non-2xx statuses, and undecodable bodies are all
    /// errors. Implementations must not retry on their own behalf.
    fn get_json(&self, url: &str, query: &Query) -> Result<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_json(&self, url: &str, query: &Query) -> Result<Value> {
        (**self).get_json(url, query)
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(Policy::limited(5))
            .user_agent(concat!("ons_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str, query: &Query) -> Result<Value> {
        log::debug!("GET {} {:?}", url, query);
        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .with_context(|| format!("GET {}", url))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(OnsError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }
        resp.json().with_context(|| format!("decode json from {}", url))
    }
}
