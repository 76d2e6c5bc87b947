use crate::models::{AnalyzerError, BotFlag};
use csv::Writer;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct BotFlagCsv<'a> {
    sender: &'a str,
    total_events: usize,
    blockchain_coverage: &'a str,
    reasons: String,
}

/// Flattens flagged senders to one CSV row each for downstream triage.
pub fn export_bot_flags_csv(
    bots: &BTreeMap<String, BotFlag>,
    path: &str,
) -> Result<(), AnalyzerError> {
    let mut wtr = Writer::from_path(path)?;
    for (sender, flag) in bots {
        wtr.serialize(BotFlagCsv {
            sender,
            total_events: flag.total_events,
            blockchain_coverage: &flag.blockchain_coverage,
            reasons: flag
                .reasons
                .iter()
                .map(|reason| reason.as_str())
                .collect::<Vec<_>>()
                .join(","),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
