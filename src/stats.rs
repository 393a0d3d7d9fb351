use crate::models::ObservationTable;
use serde::{Deserialize, Serialize};

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Rows with a numeric observation.
    pub count: usize,
    /// Rows whose observation is absent or not a number.
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute summary statistics over the numeric observations of a table.
pub fn summary(table: &ObservationTable) -> Summary {
    let mut vals: Vec<f64> = table.iter().filter_map(|r| r.value_f64()).collect();
    let missing = table.len() - vals.len();
    vals.sort_by(f64::total_cmp);

    let count = vals.len();
    let min = vals.first().cloned();
    let max = vals.last().cloned();
    let mean = if count > 0 {
        Some(vals.iter().copied().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    Summary {
        count,
        missing,
        min,
        max,
        mean,
        median,
    }
}
