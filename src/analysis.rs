use crate::{
    config::VALID_STATUSES,
    models::{EventRecord, QualityReport, TimestampIssue},
};
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Returns the sorted, deduplicated ids of events whose declared
/// predecessor does not exist anywhere in the dataset.
pub fn find_orphan_events(events: &[EventRecord]) -> Vec<String> {
    let all_ids: HashSet<&str> = events.iter().map(|e| e.event_id.as_str()).collect();

    let mut orphans: BTreeSet<String> = BTreeSet::new();
    for event in events {
        if let Some(previous) = &event.previous_event_id {
            if !all_ids.contains(previous.as_str()) {
                orphans.insert(event.event_id.clone());
            }
        }
    }
    orphans.into_iter().collect()
}

/// Average seconds between consecutive events, per contract. A contract
/// with a single event maps to 0.0 rather than NaN.
pub fn calculate_time_deltas(events: &[EventRecord]) -> BTreeMap<String, f64> {
    let mut by_contract: BTreeMap<&str, Vec<&EventRecord>> = BTreeMap::new();
    for event in events {
        by_contract
            .entry(event.contract_address.as_str())
            .or_default()
            .push(event);
    }

    let mut deltas = BTreeMap::new();
    for (contract, mut group) in by_contract {
        group.sort_by_key(|e| e.block_timestamp);
        let average = if group.len() <= 1 {
            0.0
        } else {
            let total: f64 = group
                .windows(2)
                .map(|pair| {
                    (pair[1].block_timestamp - pair[0].block_timestamp).num_milliseconds() as f64
                        / 1000.0
                })
                .sum();
            total / (group.len() - 1) as f64
        };
        deltas.insert(contract.to_string(), average);
    }
    deltas
}

/// Maps each sender to the sorted distinct contracts they touched.
pub fn map_senders_to_contracts(events: &[EventRecord]) -> BTreeMap<String, Vec<String>> {
    let mut mapping: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for event in events {
        mapping
            .entry(event.sender.clone())
            .or_default()
            .insert(event.contract_address.clone());
    }
    mapping
        .into_iter()
        .map(|(sender, contracts)| (sender, contracts.into_iter().collect()))
        .collect()
}

/// All senders ordered by total event count, descending. Ties break to
/// lexicographic sender order so the ranking is deterministic.
pub fn rank_senders_by_activity(events: &[EventRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for event in events {
        *counts.entry(event.sender.as_str()).or_insert(0) += 1;
    }

    let mut ranking: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(sender, count)| (sender.to_string(), count))
        .collect();
    // stable sort keeps the lexicographic order within equal counts
    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking
}

/// For each sender, the block where they produced the most events; ties go
/// to the smallest block number. Triples come back sorted by event count
/// descending and the required console table is printed along the way.
pub fn find_sender_peak_blocks(events: &[EventRecord]) -> Vec<(String, u64, usize)> {
    let mut block_counts: BTreeMap<(&str, u64), usize> = BTreeMap::new();
    for event in events {
        *block_counts
            .entry((event.sender.as_str(), event.block_number))
            .or_insert(0) += 1;
    }

    // entries for one sender are contiguous in (sender, block) order
    let mut peaks: Vec<(String, u64, usize)> = Vec::new();
    for ((sender, block), count) in block_counts {
        match peaks.last_mut() {
            Some(last) if last.0 == sender => {
                if count > last.2 {
                    last.1 = block;
                    last.2 = count;
                }
            }
            _ => peaks.push((sender.to_string(), block, count)),
        }
    }
    // stable sort keeps sender order within equal counts
    peaks.sort_by(|a, b| b.2.cmp(&a.2));

    println!("Sender Mapping - Peak Blocks by Event Frequency:");
    println!("{}", "=".repeat(60));
    println!(
        "{:<5} {:<42} {:<12} {:<12}",
        "Rank", "Sender", "Block Number", "Event Count"
    );
    println!("{}", "-".repeat(60));
    for (rank, (sender, block, count)) in peaks.iter().enumerate() {
        println!("{:<5} {:<42} {:<12} {:<12}", rank + 1, sender, block, count);
    }

    peaks
}

/// Per-event-type counts, descending; ties break to lexicographic order.
/// This is the surface the chart and CLI collaborators consume.
pub fn event_type_counts(events: &[EventRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for event in events {
        *counts.entry(event.event_type.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(event_type, count)| (event_type.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Scans for missing fields, duplicate ids, out-of-domain statuses and
/// timestamp/block ordering inversions. Everything found here is a
/// finding, never an error.
pub fn analyze_data_quality(events: &[EventRecord]) -> QualityReport {
    let mut report = QualityReport {
        total_records: events.len(),
        ..Default::default()
    };

    let missing_counts: [(&str, usize); 6] = [
        (
            "event_id",
            events.iter().filter(|e| e.event_id.is_empty()).count(),
        ),
        (
            "previous_event_id",
            events.iter().filter(|e| e.previous_event_id.is_none()).count(),
        ),
        (
            "contract_address",
            events.iter().filter(|e| e.contract_address.is_empty()).count(),
        ),
        (
            "sender",
            events.iter().filter(|e| e.sender.is_empty()).count(),
        ),
        (
            "status",
            events.iter().filter(|e| e.status.is_empty()).count(),
        ),
        (
            "event_type",
            events.iter().filter(|e| e.event_type.is_empty()).count(),
        ),
    ];
    for (column, count) in missing_counts {
        if count > 0 {
            report.missing_values.insert(column.to_string(), count);
        }
    }

    let mut seen_ids: HashSet<&str> = HashSet::new();
    report.duplicate_events = events
        .iter()
        .filter(|e| !seen_ids.insert(e.event_id.as_str()))
        .count();

    // distinct out-of-domain statuses, first-appearance order, once each
    let mut seen_statuses: HashSet<&str> = HashSet::new();
    for event in events {
        if !VALID_STATUSES.contains(event.status.as_str())
            && seen_statuses.insert(event.status.as_str())
        {
            report.invalid_statuses.push(event.status.clone());
        }
    }

    // Flags a row only when timestamp order reverses while block_number
    // says the predecessor was the earlier block. Kept as the literal
    // condition; broader inversions are intentionally not covered.
    let mut by_time: Vec<&EventRecord> = events.iter().collect();
    by_time.sort_by_key(|e| e.block_timestamp);
    for pair in by_time.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if previous.block_timestamp > current.block_timestamp
            && previous.block_number < current.block_number
        {
            report.timestamp_issues.push(TimestampIssue {
                event_id: current.event_id.clone(),
                issue: "timestamp_before_previous_block".to_string(),
            });
        }
    }

    debug!(
        "quality audit: {} duplicates, {} invalid statuses, {} timestamp issues",
        report.duplicate_events,
        report.invalid_statuses.len(),
        report.timestamp_issues.len()
    );
    report
}
