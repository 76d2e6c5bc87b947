use crate::models::{AnalyzerError, EventRecord};
use log::info;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 8] = [
    "event_id",
    "previous_event_id",
    "contract_address",
    "sender",
    "block_number",
    "block_timestamp",
    "status",
    "event_type",
];

/// Reads the whole dataset from a headered CSV file. A missing column or a
/// malformed row aborts the run; there is no partial dataset.
pub fn load_events(path: &Path) -> Result<Vec<EventRecord>, AnalyzerError> {
    let mut reader = csv::Reader::from_path(path)?;

    // check headers up front so the abort names the missing column
    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == required) {
            return Err(AnalyzerError::Schema(format!(
                "required column `{required}` is absent"
            )));
        }
    }

    let mut events = Vec::new();
    for (row_index, row) in reader.deserialize().enumerate() {
        let event: EventRecord = row.map_err(|e| {
            AnalyzerError::Schema(format!("row {}: {e}", row_index + 1))
        })?;
        events.push(event);
    }

    info!("loaded {} events from {}", events.len(), path.display());
    Ok(events)
}
