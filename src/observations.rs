use crate::api::Client;
use crate::dimensions::DimensionSelection;
use crate::error::OnsError;
use crate::models::{ObservationRow, ObservationTable, ObservationsResponse};
use crate::transport::Transport;
use anyhow::Result;

impl<T: Transport> Client<T> {
    /// Fetch the observations for one slice of an edition.
    ///
    /// Every entry of `dimensions` (wildcards included) becomes a query parameter.
    /// The response is read as a single page and projected to `(id, observation)`
    /// rows in response order.
    pub fn get_observations(
        &self,
        edition_url: &str,
        dimensions: &DimensionSelection,
    ) -> Result<ObservationTable> {
        let url = format!("{}/observations", edition_url);
        let resp: ObservationsResponse = self.get(&url, &dimensions.to_query())?;
        let observations = resp.observations.ok_or_else(|| OnsError::MissingField {
            what: url.clone(),
            field: "observations",
        })?;
        Ok(observations.into_iter().map(ObservationRow::from).collect())
    }
}
