use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One row of the contract-event dataset. Loaded once and never mutated;
/// analyzers only ever see it behind a shared slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: String,
    pub previous_event_id: Option<String>,
    pub contract_address: String,
    pub sender: String,
    pub block_number: u64,
    #[serde(deserialize_with = "de_timestamp")]
    pub block_timestamp: DateTime<Utc>,
    pub status: String,
    pub event_type: String,
}

/// Accepts both the `2024-01-01 00:00:00` form pandas-style CSV exports use
/// and RFC 3339. Anything else is a schema violation surfaced by the loader.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, AnalyzerError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| AnalyzerError::Schema(format!("unparseable block_timestamp {raw:?}")))
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("schema violation: {0}")]
    Schema(String),
    #[error("dataset read failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("chart rendering failed: {0}")]
    Plot(String),
}

/// Bot-detection criteria, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BotReason {
    UnrealisticCoverage,
    PerfectlyDistributedActivity,
    CoordinatedBotNetwork,
    RegularBlockSpacing,
}

impl BotReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BotReason::UnrealisticCoverage => "unrealistic_coverage",
            BotReason::PerfectlyDistributedActivity => "perfectly_distributed_activity",
            BotReason::CoordinatedBotNetwork => "coordinated_bot_network",
            BotReason::RegularBlockSpacing => "regular_block_spacing",
        }
    }
}

/// Evidence collected for one suspected bot sender.
#[derive(Debug, Clone, Serialize)]
pub struct BotFlag {
    pub reasons: Vec<BotReason>,
    pub details: BTreeMap<BotReason, String>,
    pub total_events: usize,
    pub blockchain_coverage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampIssue {
    pub event_id: String,
    pub issue: String,
}

/// Output of the data-quality audit. Findings here are analysis results,
/// not errors; a dataset full of problems still audits cleanly.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QualityReport {
    pub total_records: usize,
    pub missing_values: BTreeMap<String, usize>,
    pub duplicate_events: usize,
    pub invalid_statuses: Vec<String>,
    pub timestamp_issues: Vec<TimestampIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataOverview {
    pub total_events: usize,
    pub unique_contracts: usize,
    pub unique_senders: usize,
    pub date_range: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrphanSummary {
    pub count: usize,
    pub event_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeDeltaSummary {
    pub average_seconds_between_events: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SenderAnalysis {
    pub total_unique_senders: usize,
    pub top_5_most_active: Vec<(String, usize)>,
    pub sender_contract_mapping_sample: BTreeMap<String, Vec<String>>,
    pub sender_peak_blocks: Vec<(String, u64, usize)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BotSummary {
    pub suspected_bots: Vec<String>,
    pub count: usize,
    pub details: BTreeMap<String, BotFlag>,
}

/// The full structured report. Every map inside is a `BTreeMap`, so
/// serializing the same dataset twice yields byte-identical output.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub data_overview: DataOverview,
    pub orphan_events: OrphanSummary,
    pub contract_time_deltas: TimeDeltaSummary,
    pub sender_analysis: SenderAnalysis,
    pub data_quality: QualityReport,
    pub bot_detection: BotSummary,
}
