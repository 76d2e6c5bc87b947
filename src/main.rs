use event_analyzer::{analysis, bots, csv, loader, models::AnalyzerError, plot};
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_CSV_PATH: &str = "contract_events.csv";
const BOT_CSV_PATH: &str = "suspected_bots.csv";
const CHART_PATH: &str = "event_type_frequency.png";

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("aborting: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AnalyzerError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CSV_PATH.to_string());

    println!("\n{}", "=".repeat(60));
    println!("BLOCKCHAIN EVENT ANALYSIS");
    println!("{}", "=".repeat(60));

    let events = loader::load_events(Path::new(&path))?;
    println!("\nLoaded {} events from {}", events.len(), path);

    println!("\n1. ORPHAN EVENTS");
    println!("{}", "-".repeat(40));
    let orphans = analysis::find_orphan_events(&events);
    println!(
        "Found {} orphan events (referenced but not in dataset)",
        orphans.len()
    );
    println!("First 10: {:?}", &orphans[..orphans.len().min(10)]);

    println!("\n2. TIME DELTAS PER CONTRACT");
    println!("{}", "-".repeat(40));
    let time_deltas = analysis::calculate_time_deltas(&events);
    for (contract, delta) in &time_deltas {
        println!("{contract}: {delta:.2} seconds average");
    }

    println!("\n3. SENDER ACTIVITY RANKING");
    println!("{}", "-".repeat(40));
    let rankings = analysis::rank_senders_by_activity(&events);
    for (sender, count) in rankings.iter().take(5) {
        println!("{sender}: {count} events");
    }

    println!("\n3.1. SENDER MAPPING - PEAK BLOCKS");
    println!("{}", "-".repeat(40));
    analysis::find_sender_peak_blocks(&events);

    println!("\n4. DATA QUALITY ANALYSIS");
    println!("{}", "-".repeat(40));
    let quality = analysis::analyze_data_quality(&events);
    println!("Missing values: {:?}", quality.missing_values);
    println!("Duplicate events: {}", quality.duplicate_events);
    println!("Invalid statuses: {:?}", quality.invalid_statuses);
    println!("Timestamp issues: {}", quality.timestamp_issues.len());

    println!("\n5. BOT DETECTION");
    println!("{}", "-".repeat(40));
    let bot_flags = bots::detect_bots(&events);
    if bot_flags.is_empty() {
        println!("No clear bot patterns detected with current thresholds.");
    } else {
        println!("Found {} suspected bot addresses:\n", bot_flags.len());
        for (sender, flag) in &bot_flags {
            println!("Address: {sender} ({} events)", flag.total_events);
            println!(
                "   Detection criteria: {}",
                flag.reasons
                    .iter()
                    .map(|reason| reason.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            for (reason, evidence) in &flag.details {
                println!("   - {}: {evidence}", reason.as_str());
            }
            println!();
        }
        csv::export_bot_flags_csv(&bot_flags, BOT_CSV_PATH)?;
        println!("Wrote flagged senders to {BOT_CSV_PATH}");
    }

    println!("\n6. EVENT TYPE FREQUENCY ANALYSIS");
    println!("{}", "-".repeat(40));
    let type_counts = analysis::event_type_counts(&events);
    println!("Total unique event types: {}", type_counts.len());
    for (event_type, count) in type_counts.iter().take(10) {
        let share = if events.is_empty() {
            0.0
        } else {
            *count as f64 / events.len() as f64 * 100.0
        };
        println!("  {event_type}: {count} events ({share:.1}%)");
    }
    plot::plot_event_type_frequency(&type_counts, CHART_PATH)?;

    println!("\n{}", "=".repeat(60));
    println!("Analysis complete!");
    println!("{}", "=".repeat(60));
    Ok(())
}
