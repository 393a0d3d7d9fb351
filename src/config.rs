use std::time::Duration;

/// Root of the public ONS beta API.
pub const DEFAULT_BASE_URL: &str = "https://api.beta.ons.gov.uk/v1";

/// Edition most datasets publish their full series under.
pub const DEFAULT_EDITION: &str = "time-series";

/// Settings for [`crate::Client`] and the HTTP transport behind it.
///
/// All fields have working defaults; override with the `with_*` setters:
/// ```
/// # use ons_rs::ClientConfig;
/// let cfg = ClientConfig::default()
///     .with_base_url("http://localhost:8080/v1")
///     .with_option_page_limit(100);
/// assert_eq!(cfg.option_page_limit, 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Total request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Stop paging the dataset listing once this many entries are held.
    pub dataset_cap: usize,
    /// `limit` sent with every options request.
    pub option_page_limit: usize,
    pub preferred_edition: String,
    /// Follow `offset` across option pages instead of keeping only the first one.
    pub paginate_options: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            dataset_cap: 100,
            option_page_limit: 50,
            preferred_edition: DEFAULT_EDITION.into(),
            paginate_options: false,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        // Endpoints are joined with '/', so keep the root bare.
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_dataset_cap(mut self, cap: usize) -> Self {
        self.dataset_cap = cap;
        self
    }

    pub fn with_option_page_limit(mut self, limit: usize) -> Self {
        self.option_page_limit = limit.max(1);
        self
    }

    pub fn with_preferred_edition(mut self, edition: impl Into<String>) -> Self {
        self.preferred_edition = edition.into();
        self
    }

    pub fn with_paginate_options(mut self, on: bool) -> Self {
        self.paginate_options = on;
        self
    }
}
