//! Synchronous client for the **ONS beta API (v1)**.
//!
//! The client walks the dataset → edition → dimensions → observations chain
//! and returns results as a tidy [`ObservationTable`]. Every stage is a method
//! on [`Client`] (see `catalog`, `dimensions`, `observations`); this module
//! holds the client itself and [`Client::get_timeseries`], which composes them.
//!
//! ### Notes
//! - Requests are issued one at a time, in order. Nothing is cached or retried.
//! - HTTP goes through a [`Transport`]; the default is [`HttpTransport`]
//!   (blocking `reqwest`, 30s timeout), but any implementation can be plugged in
//!   with [`Client::with_transport`].
//!
//! Typical usage:
//! ```no_run
//! # use ons_rs::{Client, Timeseries};
//! # use indexmap::IndexMap;
//! let client = Client::default();
//! let dims = IndexMap::from([("sex".to_string(), "all-adults".to_string())]);
//! if let Timeseries::Series(series) = client.get_timeseries("UK Labour Market", Some(&dims))? {
//!     println!("{} rows", series.table.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::catalog::get_dataset_by_name;
use crate::config::ClientConfig;
use crate::dimensions::{DimensionCatalog, DimensionOverrides, EditionChoice, choose_dimensions};
use crate::error::OnsError;
use crate::models::{DatasetSummary, ObservationTable};
use crate::transport::{HttpTransport, Query, Transport};
use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default()).expect("reqwest client build")
    }
}

impl Client {
    /// Client over HTTP with the given settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

// Allow -, _, . unescaped in path segments (common for dimension ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

pub(crate) fn enc_segment(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string()
}

/// What [`Client::get_timeseries`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Timeseries {
    /// Discovery mode: no selection was supplied, so only the valid options are returned.
    Dimensions(DimensionCatalog),
    /// Full fetch.
    Series(Series),
}

/// A fetched series plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Rows in API order (not sorted).
    pub table: ObservationTable,
    pub dataset: DatasetSummary,
    pub edition: EditionChoice,
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url` and decode the body into `D`.
    pub(crate) fn get<D: DeserializeOwned>(&self, url: &str, query: &Query) -> Result<D> {
        let v = self
            .transport
            .get_json(url, query)
            .with_context(|| format!("GET {}", url))?;
        serde_json::from_value(v).with_context(|| format!("parse response of {}", url))
    }

    /// Get a dataset time series by (partial) name, with a given set of dimensions.
    ///
    /// - `dataset_name`: any case-insensitive substring of the dataset title;
    ///   the first match in catalog order wins.
    /// - `dimension_values`: `None` returns the dimension catalog only
    ///   (no observation request is made). `Some(overrides)` selects one option
    ///   per dimension (first option by default, `time` = `*`) with the overrides
    ///   merged in last, then fetches the observations.
    ///
    /// ### Errors
    /// - [`OnsError::DatasetNotFound`] when no title contains `dataset_name`
    /// - Any transport or decoding failure along the chain
    pub fn get_timeseries(
        &self,
        dataset_name: &str,
        dimension_values: Option<&DimensionOverrides>,
    ) -> Result<Timeseries> {
        let datasets = self.get_list_of_datasets()?;
        let dataset = get_dataset_by_name(&datasets, dataset_name)
            .cloned()
            .ok_or_else(|| OnsError::DatasetNotFound {
                name: dataset_name.to_string(),
            })?;
        let edition = self.get_edition(&dataset, &self.config.preferred_edition)?;
        let valid_dims = self.get_dimensions(edition.url())?;
        log::info!("{} dimensions available", valid_dims.len());

        let Some(overrides) = dimension_values else {
            return Ok(Timeseries::Dimensions(valid_dims));
        };

        let chosen = choose_dimensions(&valid_dims, overrides);
        let table = self.get_observations(edition.url(), &chosen)?;
        log::info!("{} observations", table.len());
        Ok(Timeseries::Series(Series {
            table,
            dataset,
            edition,
        }))
    }
}
