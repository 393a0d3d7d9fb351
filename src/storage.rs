use crate::models::ObservationTable;
use anyhow::Result;
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> Cow<'_, str> {
    if s.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{}", s))
    } else {
        Cow::Borrowed(s)
    }
}

/// Save a table as CSV with the header `id,observation`.
pub fn save_csv<P: AsRef<Path>>(table: &ObservationTable, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["id", "observation"])?;
    for row in table {
        let obs = row.observation.as_deref().unwrap_or("");
        // Negative numbers are data, not formulas.
        let obs = if row.value_f64().is_some() {
            Cow::Borrowed(obs)
        } else {
            sanitize_cell(obs)
        };
        wtr.write_record([sanitize_cell(&row.id).as_ref(), obs.as_ref()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a table as a pretty JSON array of `{ "id", "observation" }` objects.
pub fn save_json<P: AsRef<Path>>(table: &ObservationTable, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(table)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
