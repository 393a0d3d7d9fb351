//! Dataset listing and lookup by title.
use crate::api::Client;
use crate::models::{DatasetPage, DatasetSummary};
use crate::transport::Transport;
use anyhow::Result;
use log::{debug, info};

impl<T: Transport> Client<T> {
    /// Get the list of all datasets available from the API.
    ///
    /// Pages are requested with an increasing `offset` (advanced by each page's
    /// `count`) until `dataset_cap` entries are held or a page reports zero items.
    /// Pages are concatenated as returned; nothing is deduplicated.
    pub fn get_list_of_datasets(&self) -> Result<Vec<DatasetSummary>> {
        let url = format!("{}/datasets", self.config().base_url);
        let cap = self.config().dataset_cap;

        let mut datasets: Vec<DatasetSummary> = Vec::new();
        let mut offset = 0usize;
        while datasets.len() < cap {
            let page: DatasetPage = self.get(&url, &[("offset".to_string(), offset.to_string())])?;
            for ds in &page.items {
                debug!("{}", ds.title);
            }
            datasets.extend(page.items);
            offset += page.count;
            // An exhausted endpoint keeps answering with empty pages.
            if page.count == 0 {
                break;
            }
        }
        info!("Found {} datasets", datasets.len());
        Ok(datasets)
    }
}

/// First dataset whose title contains `target_name`, ignoring case.
///
/// Returns `None` when nothing matches; several matches resolve to the first
/// in catalog order.
pub fn get_dataset_by_name<'a>(
    datasets: &'a [DatasetSummary],
    target_name: &str,
) -> Option<&'a DatasetSummary> {
    let needle = target_name.to_lowercase();
    let found = datasets
        .iter()
        .find(|ds| ds.title.to_lowercase().contains(&needle));
    match found {
        Some(ds) => info!("Found dataset '{}'", ds.title),
        None => info!("No dataset found containing '{}'", target_name),
    }
    found
}
