use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Burn address excluded from all per-sender heuristics.
pub const NULL_SENDER: &str = "0x000000";

/// Fraction of the total block span above which a single sender's event
/// count is considered implausible.
pub const COVERAGE_THRESHOLD: f64 = 0.1;

/// Minimum event count before the activity-distribution heuristic applies.
pub const DISTRIBUTION_MIN_EVENTS: usize = 1000;
/// Number of contiguous partitions the sender's timeline is split into.
pub const ACTIVITY_PERIODS: usize = 10;
/// Partition-size CV below which activity is suspiciously uniform.
pub const ACTIVITY_CV_THRESHOLD: f64 = 0.1;

/// Event-count difference below which two senders look alike.
pub const NETWORK_COUNT_TOLERANCE: usize = 200;
/// Coverage-ratio difference below which two senders look alike.
pub const NETWORK_COVERAGE_TOLERANCE: f64 = 0.01;
/// Minimum number of near-identical peers that makes a network.
pub const NETWORK_MIN_PEERS: usize = 3;

/// Minimum event count before the block-spacing heuristic applies.
pub const SPACING_MIN_EVENTS: usize = 100;
/// Gap CV below which spacing is suspiciously regular.
pub const SPACING_CV_THRESHOLD: f64 = 0.8;
/// Mean gap (in blocks) below which spacing is suspiciously tight.
pub const SPACING_MEAN_GAP: f64 = 10.0;

/// How many ranked senders the summary report keeps.
pub const TOP_ACTIVE_SENDERS: usize = 5;
/// How many sender->contract entries the summary report samples.
pub const MAPPING_SAMPLE_SIZE: usize = 5;
/// How many peak-block triples the summary report keeps.
pub const TOP_PEAK_BLOCKS: usize = 10;

/// Expected `status` domain; anything else is an audit finding.
pub static VALID_STATUSES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["Confirmed", "Pending", "Reorged"].into_iter().collect());
