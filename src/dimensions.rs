//! Editions, dimension catalogs, and dimension selection.
//!
//! A dataset edition exposes a set of dimensions (sex, age group, time, ...),
//! each with a finite list of option codes. [`Client::get_dimensions`] collects
//! those into a [`DimensionCatalog`]; [`choose_dimensions`] turns a catalog plus
//! caller overrides into the one-value-per-dimension [`DimensionSelection`] the
//! observations endpoint needs.
use crate::api::{Client, enc_segment};
use crate::error::OnsError;
use crate::models::{DatasetSummary, DimensionsPage, EditionsPage, OptionsPage};
use crate::transport::Transport;
use anyhow::Result;
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Serialize;

/// Query value meaning "every option of this dimension".
pub const WILDCARD: &str = "*";

/// Dimension whose default is [`WILDCARD`] rather than its first option.
pub const TIME_DIMENSION: &str = "time";

/// Option code → human-readable label, in API order.
pub type OptionLabels = IndexMap<String, String>;

/// Caller-supplied dimension name → option code.
pub type DimensionOverrides = IndexMap<String, String>;

/// How the edition URL was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EditionChoice {
    /// The preferred edition was listed; `url` is its latest version.
    Found { edition: String, url: String },
    /// The preferred edition was not listed; `url` is the dataset's own latest version.
    FallbackToLatest { url: String },
}

impl EditionChoice {
    pub fn url(&self) -> &str {
        match self {
            EditionChoice::Found { url, .. } | EditionChoice::FallbackToLatest { url } => url,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, EditionChoice::FallbackToLatest { .. })
    }
}

/// Every dimension of an edition with its valid options.
///
/// Built once by [`Client::get_dimensions`] (or collected from pairs) and
/// only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DimensionCatalog {
    dimensions: IndexMap<String, OptionLabels>,
    truncated: Vec<String>,
}

impl DimensionCatalog {
    pub fn get(&self, dimension: &str) -> Option<&OptionLabels> {
        self.dimensions.get(dimension)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, OptionLabels> {
        self.dimensions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dimensions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Dimensions whose option list was cut off at the page limit.
    pub fn truncated(&self) -> &[String] {
        &self.truncated
    }
}

impl FromIterator<(String, OptionLabels)> for DimensionCatalog {
    fn from_iter<I: IntoIterator<Item = (String, OptionLabels)>>(iter: I) -> Self {
        Self {
            dimensions: iter.into_iter().collect(),
            truncated: Vec::new(),
        }
    }
}

/// One chosen value for a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum DimensionValue {
    Code(String),
    Wildcard,
}

impl DimensionValue {
    pub fn as_query_value(&self) -> &str {
        match self {
            DimensionValue::Code(code) => code,
            DimensionValue::Wildcard => WILDCARD,
        }
    }
}

impl From<&str> for DimensionValue {
    fn from(s: &str) -> Self {
        if s == WILDCARD {
            DimensionValue::Wildcard
        } else {
            DimensionValue::Code(s.to_string())
        }
    }
}

impl From<String> for DimensionValue {
    fn from(s: String) -> Self {
        if s == WILDCARD {
            DimensionValue::Wildcard
        } else {
            DimensionValue::Code(s)
        }
    }
}

/// Dimension name → chosen value; the query for one observation slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DimensionSelection(IndexMap<String, DimensionValue>);

impl DimensionSelection {
    pub fn get(&self, dimension: &str) -> Option<&DimensionValue> {
        self.0.get(dimension)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, DimensionValue> {
        self.0.iter()
    }

    /// `(dimension, value)` query pairs; the wildcard is sent as `*`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.as_query_value().to_string()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<DimensionValue>> FromIterator<(K, V)> for DimensionSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Choose one value per dimension.
///
/// Defaults to the first option (catalog order) of every dimension, then sets
/// `time` to the wildcard so the whole series comes back, then applies
/// `overrides` key by key. An explicit `time` override therefore beats the
/// wildcard. Override values are not checked against the catalog, and keys
/// absent from the catalog are passed through as extra query parameters.
pub fn choose_dimensions(
    valid_dims: &DimensionCatalog,
    overrides: &DimensionOverrides,
) -> DimensionSelection {
    let mut chosen: IndexMap<String, DimensionValue> = IndexMap::new();
    for (name, options) in valid_dims.iter() {
        match options.keys().next() {
            Some(first) => {
                chosen.insert(name.clone(), DimensionValue::Code(first.clone()));
            }
            None => warn!("dimension '{}' has no options; leaving it unselected", name),
        }
    }
    chosen.insert(TIME_DIMENSION.to_string(), DimensionValue::Wildcard);
    for (name, value) in overrides {
        chosen.insert(name.clone(), DimensionValue::from(value.as_str()));
    }
    DimensionSelection(chosen)
}

impl<T: Transport> Client<T> {
    /// Get one edition of a dataset.
    ///
    /// Scans the dataset's editions for `preferred_edition` and returns that
    /// edition's latest version. When it is not listed (or the dataset has no
    /// editions link), falls back to the dataset's own latest version.
    pub fn get_edition(
        &self,
        dataset: &DatasetSummary,
        preferred_edition: &str,
    ) -> Result<EditionChoice> {
        if let Some(editions) = &dataset.links.editions {
            let page: EditionsPage = self.get(&editions.href, &[])?;
            if let Some(row) = page.items.iter().find(|e| e.edition == preferred_edition) {
                let url = row
                    .links
                    .latest_version
                    .as_ref()
                    .ok_or_else(|| OnsError::MissingField {
                        what: format!("edition '{}' of '{}'", row.edition, dataset.title),
                        field: "links.latest_version",
                    })?
                    .href
                    .clone();
                info!("Using edition '{}': {}", row.edition, url);
                return Ok(EditionChoice::Found {
                    edition: row.edition.clone(),
                    url,
                });
            }
        } else {
            debug!("dataset '{}' lists no editions link", dataset.title);
        }

        let url = dataset
            .links
            .latest_version
            .as_ref()
            .ok_or_else(|| OnsError::MissingField {
                what: format!("dataset '{}'", dataset.title),
                field: "links.latest_version",
            })?
            .href
            .clone();
        info!(
            "Edition '{}' not found; falling back to latest version {}",
            preferred_edition, url
        );
        Ok(EditionChoice::FallbackToLatest { url })
    }

    /// Build the map of all valid options for all dimensions of an edition.
    ///
    /// Options are requested with `limit = option_page_limit`. Unless
    /// `paginate_options` is set, only that first page is kept and any
    /// dimension with more options is listed in [`DimensionCatalog::truncated`].
    /// Dimensions are fetched one after another.
    pub fn get_dimensions(&self, edition_url: &str) -> Result<DimensionCatalog> {
        let page: DimensionsPage = self.get(&format!("{}/dimensions", edition_url), &[])?;

        let mut catalog = DimensionCatalog::default();
        for dimension in page.items {
            info!("{}: \t{}", dimension.name, dimension.label);
            let options_url = format!(
                "{}/dimensions/{}/options",
                edition_url,
                enc_segment(&dimension.links.options.id)
            );
            let (options, truncated) = self.get_options(&options_url)?;
            info!("\tHas {} options", options.len());
            if options.is_empty() {
                warn!("dimension '{}' has no options", dimension.name);
            }
            if truncated {
                warn!(
                    "dimension '{}' has more options than the page limit of {}; list is truncated",
                    dimension.name,
                    self.config().option_page_limit
                );
                catalog.truncated.push(dimension.name.clone());
            }
            debug!("{}: {:?}", dimension.name, options);
            catalog.dimensions.insert(dimension.name, options);
        }
        Ok(catalog)
    }

    /// Options of one dimension and whether the list is incomplete.
    fn get_options(&self, options_url: &str) -> Result<(OptionLabels, bool)> {
        let limit = self.config().option_page_limit;
        let mut options = OptionLabels::new();
        let mut offset = 0usize;
        loop {
            let mut query = vec![("limit".to_string(), limit.to_string())];
            if offset > 0 {
                query.push(("offset".to_string(), offset.to_string()));
            }
            let page: OptionsPage = self.get(options_url, &query)?;
            let n = page.items.len();
            options.extend(page.items.into_iter().map(|o| (o.option, o.label)));
            offset += n;

            let more = match page.total_count {
                Some(total) => offset < total,
                None => false,
            };
            if !more || n == 0 {
                return Ok((options, more && n > 0));
            }
            if !self.config().paginate_options {
                return Ok((options, true));
            }
        }
    }
}
