//! ons_rs
//!
//! A lightweight Rust library for discovering, slicing, and retrieving
//! time series from the ONS (UK Office for National Statistics) beta API.
//! Pairs with the `ons` CLI.
//!
//! ### Features
//! - List every published dataset and find one by (partial) title
//! - Inspect the valid options of every dimension of a dataset edition
//! - Pick one option per dimension (sensible defaults, caller overrides)
//! - Fetch the observations as an `id`/`observation` table
//! - Save as CSV or JSON, plus quick summary statistics
//!
//! ### Example
//! ```no_run
//! use indexmap::IndexMap;
//! use ons_rs::{Client, Timeseries};
//!
//! let client = Client::default();
//! // Discovery: which options does each dimension accept?
//! if let Timeseries::Dimensions(dims) = client.get_timeseries("UK Labour Market", None)? {
//!     for (name, options) in dims.iter() {
//!         println!("{name}: {} options", options.len());
//!     }
//! }
//! let choice = IndexMap::from([
//!     ("sex".to_string(), "all-adults".to_string()),
//!     ("agegroups".to_string(), "16+".to_string()),
//! ]);
//! if let Timeseries::Series(mut series) = client.get_timeseries("UK Labour Market", Some(&choice))? {
//!     series.table.sort_by_year();
//!     ons_rs::storage::save_csv(&series.table, "labour.csv")?;
//!     println!("{:#?}", ons_rs::stats::summary(&series.table));
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod models;
pub mod observations;
pub mod stats;
pub mod storage;
pub mod transport;

pub use api::{Client, Series, Timeseries};
pub use catalog::get_dataset_by_name;
pub use config::ClientConfig;
pub use dimensions::{
    DimensionCatalog, DimensionOverrides, DimensionSelection, DimensionValue, EditionChoice,
    WILDCARD, choose_dimensions,
};
pub use error::OnsError;
pub use models::{DatasetSummary, ObservationRow, ObservationTable};
pub use transport::{HttpTransport, Transport};
