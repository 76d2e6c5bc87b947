use crate::{
    config::{
        ACTIVITY_CV_THRESHOLD, ACTIVITY_PERIODS, COVERAGE_THRESHOLD, DISTRIBUTION_MIN_EVENTS,
        NETWORK_COUNT_TOLERANCE, NETWORK_COVERAGE_TOLERANCE, NETWORK_MIN_PEERS, NULL_SENDER,
        SPACING_CV_THRESHOLD, SPACING_MEAN_GAP, SPACING_MIN_EVENTS,
    },
    models::{BotFlag, BotReason, EventRecord},
};
use log::info;
use std::collections::BTreeMap;

/// Applies the four bot heuristics to every sender except the null
/// address. A sender appears in the output only if at least one criterion
/// matched; the reasons vector keeps evaluation order.
pub fn detect_bots(events: &[EventRecord]) -> BTreeMap<String, BotFlag> {
    let mut flagged = BTreeMap::new();
    if events.is_empty() {
        return flagged;
    }

    let min_block = events.iter().map(|e| e.block_number).min().unwrap_or(0);
    let max_block = events.iter().map(|e| e.block_number).max().unwrap_or(0);
    let total_block_span = max_block - min_block + 1;

    let mut by_sender: BTreeMap<&str, Vec<&EventRecord>> = BTreeMap::new();
    for event in events {
        by_sender.entry(event.sender.as_str()).or_default().push(event);
    }
    by_sender.remove(NULL_SENDER);

    // (count, coverage) aggregates computed once; the peer scan below reads
    // these instead of re-walking the dataset per sender pair
    let aggregates: Vec<(usize, f64)> = by_sender
        .values()
        .map(|group| (group.len(), coverage_ratio(group.len(), total_block_span)))
        .collect();

    for (index, (sender, group)) in by_sender.iter().enumerate() {
        let mut reasons = Vec::new();
        let mut details = BTreeMap::new();

        let count = group.len();
        let coverage = coverage_ratio(count, total_block_span);

        if coverage > COVERAGE_THRESHOLD {
            reasons.push(BotReason::UnrealisticCoverage);
            details.insert(
                BotReason::UnrealisticCoverage,
                format!("{coverage:.3} events per block across {total_block_span} blocks"),
            );
        }

        if count > DISTRIBUTION_MIN_EVENTS {
            let activity_cv = activity_partition_cv(count);
            if activity_cv < ACTIVITY_CV_THRESHOLD {
                reasons.push(BotReason::PerfectlyDistributedActivity);
                details.insert(
                    BotReason::PerfectlyDistributedActivity,
                    format!("CV: {activity_cv:.3} across time periods"),
                );
            }
        }

        let similar_senders = aggregates
            .iter()
            .enumerate()
            .filter(|(other_index, (other_count, other_coverage))| {
                *other_index != index
                    && other_count.abs_diff(count) < NETWORK_COUNT_TOLERANCE
                    && (other_coverage - coverage).abs() < NETWORK_COVERAGE_TOLERANCE
            })
            .count();
        if similar_senders >= NETWORK_MIN_PEERS {
            reasons.push(BotReason::CoordinatedBotNetwork);
            details.insert(
                BotReason::CoordinatedBotNetwork,
                format!("{} addresses with identical patterns", similar_senders + 1),
            );
        }

        if count > SPACING_MIN_EVENTS {
            let (mean_gap, gap_cv) = block_gap_stats(group);
            if gap_cv < SPACING_CV_THRESHOLD && mean_gap < SPACING_MEAN_GAP {
                reasons.push(BotReason::RegularBlockSpacing);
                details.insert(
                    BotReason::RegularBlockSpacing,
                    format!("Avg gap: {mean_gap:.1} blocks, CV: {gap_cv:.3}"),
                );
            }
        }

        if !reasons.is_empty() {
            flagged.insert(
                sender.to_string(),
                BotFlag {
                    reasons,
                    details,
                    total_events: count,
                    blockchain_coverage: format!("{coverage:.3}"),
                },
            );
        }
    }

    info!("flagged {} suspected bot senders", flagged.len());
    flagged
}

fn coverage_ratio(count: usize, total_block_span: u64) -> f64 {
    if total_block_span == 0 {
        return 0.0;
    }
    count as f64 / total_block_span as f64
}

/// CV of the sizes of ten contiguous partitions of the sender's timeline;
/// the division remainder folds into the last partition.
fn activity_partition_cv(count: usize) -> f64 {
    let period_size = count / ACTIVITY_PERIODS;
    let mut sizes: Vec<f64> = Vec::with_capacity(ACTIVITY_PERIODS);
    for period in 0..ACTIVITY_PERIODS {
        let start = period * period_size;
        let end = if period < ACTIVITY_PERIODS - 1 {
            start + period_size
        } else {
            count
        };
        sizes.push((end - start) as f64);
    }

    let mean = sizes.iter().sum::<f64>() / sizes.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }
    population_std(&sizes, mean) / mean
}

/// Mean and CV of the gaps between the sender's consecutive blocks.
fn block_gap_stats(group: &[&EventRecord]) -> (f64, f64) {
    let mut blocks: Vec<u64> = group.iter().map(|e| e.block_number).collect();
    blocks.sort_unstable();

    let gaps: Vec<f64> = blocks.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    if gaps.is_empty() {
        return (0.0, 0.0);
    }
    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    if mean <= 0.0 {
        return (mean, 0.0);
    }
    (mean, sample_std(&gaps, mean) / mean)
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
