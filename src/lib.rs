/// # Modules Overview
///
/// This crate contains modules for analyzing a batch dataset of blockchain
/// contract events: structural checks, activity profiling, data-quality
/// auditing, heuristic bot detection and report assembly.

/// `analysis`
///
/// Contains the aggregate analyses that run over the loaded dataset: orphan
/// detection, per-contract inter-event timing, sender ranking and peak-block
/// mapping, event-type counting and the data-quality audit. All of them are
/// pure functions over a shared `&[EventRecord]` slice.
///
/// Example usage:
/// ```rust,ignore
/// let orphans = analysis::find_orphan_events(&events);
/// let quality = analysis::analyze_data_quality(&events);
/// ```
pub mod analysis;

/// `bots`
///
/// The heuristic bot detector. Evaluates coverage, activity distribution,
/// coordinated-network and block-spacing criteria per sender and returns
/// flagged senders with supporting evidence.
///
/// Example usage:
/// ```rust,ignore
/// let bots = bots::detect_bots(&events);
/// ```
pub mod bots;

/// `config`
///
/// Named heuristic thresholds and the expected status domain. Detection
/// logic never carries inline literals; tuning happens here.
pub mod config;

/// `csv`
///
/// Exports flagged bot senders to a CSV file via `csv::Writer`.
///
/// Example usage:
/// ```rust,ignore
/// csv::export_bot_flags_csv(&bots, "suspected_bots.csv")?;
/// ```
pub mod csv;

/// `loader`
///
/// Reads the contract-event dataset from a headered CSV file, validating
/// the schema up front. Malformed input aborts the run with a named
/// condition; there is no partial dataset.
///
/// Example usage:
/// ```rust,ignore
/// let events = loader::load_events(Path::new("contract_events.csv"))?;
/// ```
pub mod loader;

/// `models`
///
/// Defines the core data structures:
/// * `EventRecord` – one immutable row of the dataset.
/// * `QualityReport`, `TimestampIssue` – data-quality audit output.
/// * `BotReason`, `BotFlag` – bot-detection criteria and evidence.
/// * `SummaryReport` and its sections – the full structured report.
/// * `AnalyzerError` – the crate error type.
pub mod models;

/// `plot`
///
/// Renders the event-type frequency distribution as bar and pie charts
/// using `plotters`.
pub mod plot;

/// `report`
///
/// Composes every analyzer's output into one serializable `SummaryReport`.
///
/// Example usage:
/// ```rust,ignore
/// let report = report::generate_summary_report(&events);
/// let json = serde_json::to_string_pretty(&report)?;
/// ```
pub mod report;
