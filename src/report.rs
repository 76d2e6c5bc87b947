use crate::{
    analysis::{
        analyze_data_quality, calculate_time_deltas, find_orphan_events, find_sender_peak_blocks,
        map_senders_to_contracts, rank_senders_by_activity,
    },
    bots::detect_bots,
    config::{MAPPING_SAMPLE_SIZE, TOP_ACTIVE_SENDERS, TOP_PEAK_BLOCKS},
    models::{
        BotSummary, DataOverview, EventRecord, OrphanSummary, SenderAnalysis, SummaryReport,
        TimeDeltaSummary,
    },
};
use log::info;
use std::collections::HashSet;

/// Runs every analyzer over the dataset and composes the results into one
/// structured report. Pure composition; nothing is computed here that an
/// analyzer does not already produce.
pub fn generate_summary_report(events: &[EventRecord]) -> SummaryReport {
    let orphans = find_orphan_events(events);
    let time_deltas = calculate_time_deltas(events);
    let sender_contracts = map_senders_to_contracts(events);
    let rankings = rank_senders_by_activity(events);
    let peak_blocks = find_sender_peak_blocks(events);
    let quality = analyze_data_quality(events);
    let bots = detect_bots(events);

    let unique_contracts = events
        .iter()
        .map(|e| e.contract_address.as_str())
        .collect::<HashSet<&str>>()
        .len();

    let first = events.iter().map(|e| e.block_timestamp).min();
    let last = events.iter().map(|e| e.block_timestamp).max();
    let date_range = match (first, last) {
        (Some(first), Some(last)) => format!(
            "{} to {}",
            first.format("%Y-%m-%d %H:%M:%S"),
            last.format("%Y-%m-%d %H:%M:%S")
        ),
        _ => "n/a".to_string(),
    };

    info!(
        "assembled report: {} events, {} senders, {} suspected bots",
        events.len(),
        sender_contracts.len(),
        bots.len()
    );

    SummaryReport {
        data_overview: DataOverview {
            total_events: events.len(),
            unique_contracts,
            unique_senders: sender_contracts.len(),
            date_range,
        },
        orphan_events: OrphanSummary {
            count: orphans.len(),
            event_ids: orphans,
        },
        contract_time_deltas: TimeDeltaSummary {
            average_seconds_between_events: time_deltas,
        },
        sender_analysis: SenderAnalysis {
            total_unique_senders: sender_contracts.len(),
            top_5_most_active: rankings.into_iter().take(TOP_ACTIVE_SENDERS).collect(),
            sender_contract_mapping_sample: sender_contracts
                .into_iter()
                .take(MAPPING_SAMPLE_SIZE)
                .collect(),
            sender_peak_blocks: peak_blocks.into_iter().take(TOP_PEAK_BLOCKS).collect(),
        },
        data_quality: quality,
        bot_detection: BotSummary {
            suspected_bots: bots.keys().cloned().collect(),
            count: bots.len(),
            details: bots,
        },
    }
}
