#[cfg(test)]
mod test {
    use chrono::{Duration, TimeZone, Utc};
    use event_analyzer::{
        analysis::{
            analyze_data_quality, calculate_time_deltas, event_type_counts, find_orphan_events,
            find_sender_peak_blocks, map_senders_to_contracts, rank_senders_by_activity,
        },
        bots::detect_bots,
        csv::export_bot_flags_csv,
        loader::load_events,
        models::{AnalyzerError, BotReason, EventRecord},
        report::generate_summary_report,
    };
    use std::collections::HashSet;
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn make_event(
        event_id: &str,
        previous_event_id: Option<&str>,
        contract: &str,
        sender: &str,
        block_number: u64,
        offset_secs: i64,
        status: &str,
        event_type: &str,
    ) -> EventRecord {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        EventRecord {
            event_id: event_id.to_string(),
            previous_event_id: previous_event_id.map(str::to_string),
            contract_address: contract.to_string(),
            sender: sender.to_string(),
            block_number,
            block_timestamp: base + Duration::seconds(offset_secs),
            status: status.to_string(),
            event_type: event_type.to_string(),
        }
    }

    fn simple_event(event_id: &str, sender: &str, block_number: u64, offset_secs: i64) -> EventRecord {
        make_event(
            event_id,
            None,
            "0xcontract",
            sender,
            block_number,
            offset_secs,
            "Confirmed",
            "Transfer",
        )
    }

    #[test]
    fn orphans_are_sorted_deduplicated_and_confirmed_absent() {
        let events = vec![
            make_event("b", Some("nope"), "c1", "s1", 1, 0, "Confirmed", "Transfer"),
            make_event("b", Some("nope"), "c1", "s1", 2, 1, "Confirmed", "Transfer"),
            make_event("a", Some("zzz"), "c1", "s1", 3, 2, "Confirmed", "Transfer"),
            make_event("c", Some("a"), "c1", "s1", 4, 3, "Confirmed", "Transfer"),
            make_event("d", None, "c1", "s1", 5, 4, "Confirmed", "Transfer"),
        ];

        let orphans = find_orphan_events(&events);
        assert_eq!(orphans, vec!["a".to_string(), "b".to_string()]);

        let all_ids: HashSet<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
        for orphan in &orphans {
            let row = events.iter().find(|e| &e.event_id == orphan).unwrap();
            let previous = row.previous_event_id.as_deref().unwrap();
            assert!(!all_ids.contains(previous));
        }
    }

    #[test]
    fn orphans_empty_dataset_yields_empty_list() {
        assert!(find_orphan_events(&[]).is_empty());
    }

    #[test]
    fn time_deltas_average_and_single_event_contract() {
        let events = vec![
            make_event("e1", None, "cX", "s1", 1, 0, "Confirmed", "Transfer"),
            make_event("e2", None, "cX", "s1", 2, 10, "Confirmed", "Transfer"),
            make_event("e3", None, "cX", "s1", 3, 20, "Confirmed", "Transfer"),
            make_event("e4", None, "cY", "s1", 4, 100, "Confirmed", "Transfer"),
        ];

        let deltas = calculate_time_deltas(&events);
        assert_eq!(deltas["cX"], 10.0);
        assert_eq!(deltas["cY"], 0.0);
    }

    #[test]
    fn sender_ranking_totals_match_and_counts_are_non_increasing() {
        let events = vec![
            simple_event("e1", "s1", 1, 0),
            simple_event("e2", "s1", 2, 1),
            simple_event("e3", "s1", 3, 2),
            simple_event("e4", "s3", 4, 3),
            simple_event("e5", "s2", 5, 4),
        ];

        let ranking = rank_senders_by_activity(&events);
        let total: usize = ranking.iter().map(|(_, count)| count).sum();
        assert_eq!(total, events.len());
        for pair in ranking.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        // equal counts break to lexicographic sender order
        assert_eq!(ranking[0], ("s1".to_string(), 3));
        assert_eq!(ranking[1], ("s2".to_string(), 1));
        assert_eq!(ranking[2], ("s3".to_string(), 1));
    }

    #[test]
    fn peak_block_picks_busiest_block_and_smallest_on_ties() {
        let events = vec![
            simple_event("e1", "S", 5, 0),
            simple_event("e2", "S", 5, 1),
            simple_event("e3", "S", 5, 2),
            simple_event("e4", "S", 6, 3),
            simple_event("e5", "T", 7, 4),
            simple_event("e6", "T", 7, 5),
            simple_event("e7", "T", 8, 6),
            simple_event("e8", "T", 8, 7),
        ];

        let peaks = find_sender_peak_blocks(&events);
        assert_eq!(peaks[0], ("S".to_string(), 5, 3));
        assert_eq!(peaks[1], ("T".to_string(), 7, 2));
    }

    #[test]
    fn sender_contract_mapping_is_sorted_and_distinct() {
        let events = vec![
            make_event("e1", None, "c2", "s1", 1, 0, "Confirmed", "Transfer"),
            make_event("e2", None, "c1", "s1", 2, 1, "Confirmed", "Transfer"),
            make_event("e3", None, "c2", "s1", 3, 2, "Confirmed", "Transfer"),
        ];

        let mapping = map_senders_to_contracts(&events);
        assert_eq!(mapping["s1"], vec!["c1".to_string(), "c2".to_string()]);
    }

    #[test]
    fn quality_audit_counts_duplicates_and_reports_invalid_status_once() {
        let mut events = vec![
            simple_event("e1", "s1", 1, 0),
            simple_event("e2", "s1", 2, 1),
            make_event("e3", None, "c1", "s1", 3, 2, "Weird", "Transfer"),
            make_event("e4", None, "c1", "s1", 4, 3, "Weird", "Transfer"),
        ];
        let baseline = analyze_data_quality(&events);
        assert_eq!(baseline.duplicate_events, 0);

        events.push(simple_event("e1", "s1", 5, 4));
        let audited = analyze_data_quality(&events);
        assert_eq!(audited.duplicate_events, baseline.duplicate_events + 1);
        assert_eq!(audited.invalid_statuses, vec!["Weird".to_string()]);
        assert_eq!(audited.total_records, 5);
        assert_eq!(audited.missing_values["previous_event_id"], 5);
    }

    #[test]
    fn quality_audit_ignores_consistent_backward_rows() {
        // timestamp and block number both decrease together, which the
        // inversion rule deliberately does not flag
        let events = vec![
            simple_event("e1", "s1", 10, 100),
            simple_event("e2", "s1", 5, 50),
            simple_event("e3", "s1", 1, 0),
        ];

        let audited = analyze_data_quality(&events);
        assert!(audited.timestamp_issues.is_empty());

        let single = analyze_data_quality(&events[..1]);
        assert!(single.timestamp_issues.is_empty());
    }

    #[test]
    fn bot_coverage_rule_flags_dense_sender_and_skips_null_address() {
        // total span is 5 blocks; one event from the sender is coverage 0.2
        let events = vec![
            simple_event("e1", "0x000000", 1, 0),
            simple_event("e2", "0x000000", 5, 10),
            simple_event("e3", "0xbot", 3, 5),
        ];

        let bots = detect_bots(&events);
        assert!(!bots.contains_key("0x000000"));

        let flag = &bots["0xbot"];
        assert_eq!(flag.reasons, vec![BotReason::UnrealisticCoverage]);
        assert_eq!(flag.total_events, 1);
        assert_eq!(flag.blockchain_coverage, "0.200");
        assert!(flag.details[&BotReason::UnrealisticCoverage].contains("5 blocks"));
    }

    #[test]
    fn bot_network_rule_flags_four_near_identical_senders() {
        // four senders with identical counts and coverage; the wide 20-block
        // spacing keeps the other heuristics quiet
        let mut events = Vec::new();
        for sender in ["0xa1", "0xa2", "0xa3", "0xa4"] {
            for i in 0..500u64 {
                events.push(simple_event(
                    &format!("{sender}-{i}"),
                    sender,
                    i * 20,
                    i as i64,
                ));
            }
        }

        let bots = detect_bots(&events);
        assert_eq!(bots.len(), 4);
        for sender in ["0xa1", "0xa2", "0xa3", "0xa4"] {
            let flag = &bots[sender];
            assert_eq!(flag.reasons, vec![BotReason::CoordinatedBotNetwork]);
            assert!(flag.details[&BotReason::CoordinatedBotNetwork]
                .contains("4 addresses"));
        }
    }

    #[test]
    fn bot_reasons_keep_evaluation_order() {
        // one event per block over 1010 blocks trips coverage, perfectly
        // uniform partitions and tight regular spacing at once
        let events: Vec<EventRecord> = (0..1010u64)
            .map(|i| simple_event(&format!("e{i}"), "0xmachine", i, i as i64))
            .collect();

        let bots = detect_bots(&events);
        let flag = &bots["0xmachine"];
        assert_eq!(
            flag.reasons,
            vec![
                BotReason::UnrealisticCoverage,
                BotReason::PerfectlyDistributedActivity,
                BotReason::RegularBlockSpacing,
            ]
        );
    }

    #[test]
    fn bot_spacing_rule_flags_tight_regular_gaps() {
        // null-address events stretch the total span so the coverage rule
        // stays quiet for the regular sender
        let mut events = vec![
            simple_event("null-lo", "0x000000", 0, 0),
            simple_event("null-hi", "0x000000", 100_000, 1),
        ];
        for i in 0..150u64 {
            events.push(simple_event(
                &format!("fast-{i}"),
                "0xfast",
                1000 + i * 2,
                10 + i as i64,
            ));
        }

        let bots = detect_bots(&events);
        let flag = &bots["0xfast"];
        assert_eq!(flag.reasons, vec![BotReason::RegularBlockSpacing]);
        assert!(flag.details[&BotReason::RegularBlockSpacing].contains("Avg gap: 2.0"));
    }

    #[test]
    fn bot_detection_empty_dataset_is_empty() {
        assert!(detect_bots(&[]).is_empty());
    }

    #[test]
    fn event_type_counts_are_descending() {
        let events = vec![
            make_event("e1", None, "c1", "s1", 1, 0, "Confirmed", "Transfer"),
            make_event("e2", None, "c1", "s1", 2, 1, "Confirmed", "Approval"),
            make_event("e3", None, "c1", "s1", 3, 2, "Confirmed", "Transfer"),
        ];

        let counts = event_type_counts(&events);
        assert_eq!(counts[0], ("Transfer".to_string(), 2));
        assert_eq!(counts[1], ("Approval".to_string(), 1));
    }

    #[test]
    fn end_to_end_report_over_small_messy_dataset() {
        let events = vec![
            make_event("e1", None, "c1", "s1", 0, 0, "Confirmed", "Transfer"),
            make_event("e2", Some("missing_evt"), "c1", "s1", 10, 10, "Confirmed", "Transfer"),
            make_event("e3", Some("e1"), "c1", "s1", 20, 20, "Pending", "Approval"),
            make_event("e4", Some("e2"), "c2", "s2", 30, 30, "Confirmed", "Transfer"),
            make_event("e4", Some("e3"), "c2", "s2", 40, 40, "Confirmed", "Transfer"),
            make_event("e5", Some("e4"), "c2", "s2", 59, 50, "Weird", "Mint"),
        ];

        let report = generate_summary_report(&events);

        assert_eq!(report.data_overview.total_events, 6);
        assert_eq!(report.data_overview.unique_contracts, 2);
        assert_eq!(report.data_overview.unique_senders, 2);
        assert_eq!(
            report.data_overview.date_range,
            "2024-01-01 00:00:00 to 2024-01-01 00:00:50"
        );

        assert_eq!(report.orphan_events.count, 1);
        assert_eq!(report.orphan_events.event_ids, vec!["e2".to_string()]);
        assert_eq!(report.data_quality.duplicate_events, 1);
        assert_eq!(report.data_quality.invalid_statuses, vec!["Weird".to_string()]);
        // two senders with identical counts and coverage are not enough
        // peers to trigger the network rule
        assert_eq!(report.bot_detection.count, 0);
        assert!(report.bot_detection.suspected_bots.is_empty());

        assert_eq!(report.sender_analysis.total_unique_senders, 2);
        assert_eq!(report.sender_analysis.top_5_most_active.len(), 2);
        assert_eq!(report.sender_analysis.sender_contract_mapping_sample.len(), 2);
    }

    #[test]
    fn report_serialization_is_idempotent() {
        let events = vec![
            make_event("e1", None, "c1", "s1", 1, 0, "Confirmed", "Transfer"),
            make_event("e2", Some("e1"), "c1", "s2", 2, 10, "Pending", "Approval"),
            make_event("e3", Some("gone"), "c2", "s2", 3, 20, "Confirmed", "Transfer"),
        ];

        let first = serde_json::to_string(&generate_summary_report(&events)).unwrap();
        let second = serde_json::to_string(&generate_summary_report(&events)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn loader_round_trips_a_csv_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "event_id,previous_event_id,contract_address,sender,block_number,block_timestamp,status,event_type"
        )
        .unwrap();
        writeln!(
            file,
            "e1,,0xc1,0xs1,100,2024-01-01 00:00:00,Confirmed,Transfer"
        )
        .unwrap();
        writeln!(
            file,
            "e2,e1,0xc1,0xs2,101,2024-01-01T00:00:12+00:00,Pending,Approval"
        )
        .unwrap();
        file.flush().unwrap();

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].previous_event_id, None);
        assert_eq!(events[1].previous_event_id, Some("e1".to_string()));
        assert_eq!(events[1].block_number, 101);
        assert_eq!(
            (events[1].block_timestamp - events[0].block_timestamp).num_seconds(),
            12
        );
    }

    #[test]
    fn loader_rejects_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "event_id,previous_event_id,contract_address,sender,block_number,block_timestamp,event_type"
        )
        .unwrap();
        writeln!(file, "e1,,0xc1,0xs1,100,2024-01-01 00:00:00,Transfer").unwrap();
        file.flush().unwrap();

        match load_events(file.path()) {
            Err(AnalyzerError::Schema(detail)) => assert!(detail.contains("status")),
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn loader_rejects_malformed_row() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "event_id,previous_event_id,contract_address,sender,block_number,block_timestamp,status,event_type"
        )
        .unwrap();
        writeln!(
            file,
            "e1,,0xc1,0xs1,not_a_number,2024-01-01 00:00:00,Confirmed,Transfer"
        )
        .unwrap();
        file.flush().unwrap();

        assert!(matches!(
            load_events(file.path()),
            Err(AnalyzerError::Schema(_))
        ));
    }

    #[test]
    fn export_writes_one_row_per_flagged_sender() {
        let events = vec![
            simple_event("e1", "0x000000", 1, 0),
            simple_event("e2", "0x000000", 5, 10),
            simple_event("e3", "0xbot", 3, 5),
        ];
        let bots = detect_bots(&events);

        let file = NamedTempFile::new().unwrap();
        export_bot_flags_csv(&bots, file.path().to_str().unwrap()).unwrap();

        let written = fs::read_to_string(file.path()).unwrap();
        assert!(written.contains("0xbot"));
        assert!(written.contains("unrealistic_coverage"));
        assert!(written.contains("0.200"));
    }
}
