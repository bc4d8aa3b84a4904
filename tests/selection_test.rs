//! Integration tests for the selection pipeline.
//!
//! Tests cover:
//! - Category-weighted selection over a parsed catalog
//! - Score-based ranking with known metrics and exact expected scores
//! - Criteria layering: catalog overrides, INI settings, validation
//! - The refreshing pair list holding its selection within a window
//! - Whitelist rendering of a full run's output

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::*;
use pairsift::adapters::file_config_adapter::FileConfigAdapter;
use pairsift::adapters::json_catalog::parse_catalog;
use pairsift::adapters::synthetic_source::SyntheticSource;
use pairsift::adapters::whitelist::render_pair_whitelist;
use pairsift::domain::criteria::SelectionCriteria;
use pairsift::domain::metrics::MetricError;
use pairsift::domain::refresh::RefreshingPairList;
use pairsift::domain::select::scored::select_by_score;
use pairsift::domain::select::weighted::select_weighted;
use pairsift::ports::metrics_port::MetricsPort;

const CATALOG_JSON: &str = r#"{
    "categories": {
        "blue_chips": ["BTC/USDT:USDT", "ETH/USDT:USDT"],
        "defi_tokens": ["UNI/USDT:USDT"]
    },
    "selection_strategy": {
        "blue_chips_weight": 0.5,
        "defi_weight": 0.5,
        "layer1_weight": 0.0,
        "gaming_weight": 0.0
    },
    "selection_criteria": {
        "volume_min": 1000000
    }
}"#;

mod weighted_selection {
    use super::*;

    #[test]
    fn weighted_selection_from_parsed_catalog() {
        let parsed = parse_catalog(CATALOG_JSON, "catalog.json").unwrap();
        let weights = parsed.strategy.as_ref().unwrap().category_weights();

        let selected = select_weighted(&parsed.catalog, &weights, 2);
        assert_eq!(selected, vec!["BTC/USDT:USDT", "UNI/USDT:USDT"]);
    }

    #[test]
    fn weighted_selection_fills_remaining_slots_in_catalog_order() {
        let catalog = make_catalog(&[
            ("blue_chips", &["BTC/USDT:USDT", "ETH/USDT:USDT"]),
            ("defi_tokens", &["UNI/USDT:USDT", "AAVE/USDT:USDT"]),
        ]);
        let weights = make_weights(&[("blue_chips", 0.25), ("defi_tokens", 0.25)]);

        // quotas floor(4*0.25)=1 each, fill pass completes from catalog head
        let selected = select_weighted(&catalog, &weights, 4);
        assert_eq!(
            selected,
            vec![
                "BTC/USDT:USDT",
                "UNI/USDT:USDT",
                "ETH/USDT:USDT",
                "AAVE/USDT:USDT"
            ]
        );
    }
}

mod scored_selection {
    use super::*;

    #[test]
    fn known_metrics_produce_exact_scores() {
        // A: volume 100, cap 1000; B: volume 200, cap 500; both at optimal
        // volatility so the volatility score is 1.0 for each. With default
        // weights 0.4/0.3/0.3 A scores 0.6 and B scores 0.7.
        let catalog = make_catalog(&[("blue_chips", &["A/USDT:USDT", "B/USDT:USDT"])]);
        let criteria = permissive_criteria();
        let optimal = criteria.optimal_volatility();

        let port = MockMetricsPort::new()
            .with_metrics("A/USDT:USDT", make_metrics(100.0, 1000.0, optimal))
            .with_metrics("B/USDT:USDT", make_metrics(200.0, 500.0, optimal));
        let candidates = pairs(&["A/USDT:USDT", "B/USDT:USDT"]);
        let snapshot = port.fetch_metrics(&candidates).unwrap();

        let report = select_by_score(&candidates, &catalog, &snapshot, &criteria);

        assert_eq!(report.selected[0].pair, "B/USDT:USDT");
        assert!((report.selected[0].score - 0.7).abs() < 1e-12);
        assert_eq!(report.selected[1].pair, "A/USDT:USDT");
        assert!((report.selected[1].score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn skipped_and_filtered_pairs_are_reported_separately() {
        let catalog = make_catalog(&[(
            "blue_chips",
            &["A/USDT:USDT", "B/USDT:USDT", "C/USDT:USDT", "D/USDT:USDT"],
        )]);
        let criteria = SelectionCriteria {
            min_volume: 150.0,
            min_market_cap: 0.0,
            min_volatility: 0.0,
            max_volatility: 10.0,
            ..Default::default()
        };

        let port = MockMetricsPort::new()
            .with_metrics("A/USDT:USDT", make_metrics(200.0, 1000.0, 0.05))
            .with_metrics("B/USDT:USDT", make_metrics(100.0, 1000.0, 0.05))
            .with_error("C/USDT:USDT", MetricError::InvalidPrice { price: 0.0 });
        let candidates = pairs(&["A/USDT:USDT", "B/USDT:USDT", "C/USDT:USDT", "D/USDT:USDT"]);
        let snapshot = port.fetch_metrics(&candidates).unwrap();

        let report = select_by_score(&candidates, &catalog, &snapshot, &criteria);

        assert_eq!(report.selected.len(), 1);
        assert_eq!(report.selected[0].pair, "A/USDT:USDT");
        assert_eq!(report.filtered_out, 1);
        assert_eq!(report.skipped.len(), 2);
        // D has no snapshot entry at all
        assert!(report
            .skipped
            .iter()
            .any(|s| s.pair == "D/USDT:USDT" && s.reason == MetricError::NoData));
    }

    #[test]
    fn synthetic_source_is_deterministic_end_to_end() {
        let catalog = make_catalog(&[(
            "blue_chips",
            &["BTC/USDT:USDT", "ETH/USDT:USDT", "SOL/USDT:USDT"],
        )]);
        let criteria = permissive_criteria();
        let candidates = catalog.flatten();

        let snapshot_a = SyntheticSource::new(42).fetch_metrics(&candidates).unwrap();
        let snapshot_b = SyntheticSource::new(42).fetch_metrics(&candidates).unwrap();
        let report_a = select_by_score(&candidates, &catalog, &snapshot_a, &criteria);
        let report_b = select_by_score(&candidates, &catalog, &snapshot_b, &criteria);

        let pairs_a: Vec<&str> = report_a.selected.iter().map(|m| m.pair.as_str()).collect();
        let pairs_b: Vec<&str> = report_b.selected.iter().map(|m| m.pair.as_str()).collect();
        assert_eq!(pairs_a, pairs_b);
    }
}

mod criteria_layering {
    use super::*;

    #[test]
    fn catalog_then_ini_then_validation() {
        let parsed = parse_catalog(CATALOG_JSON, "catalog.json").unwrap();
        let mut criteria = SelectionCriteria::default();
        criteria.apply_catalog(parsed.criteria.as_ref().unwrap());
        assert_eq!(criteria.min_volume, 1_000_000.0);

        let settings = FileConfigAdapter::from_string(
            "[selection]\nmin_volume = 2000000\nmax_pairs = 3\n",
        )
        .unwrap();
        criteria.apply_config(&settings).unwrap();
        assert_eq!(criteria.min_volume, 2_000_000.0);
        assert_eq!(criteria.max_pairs, 3);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn invalid_merged_criteria_fail_validation() {
        let settings = FileConfigAdapter::from_string(
            "[selection]\nmin_volatility = 0.5\nmax_volatility = 0.1\n",
        )
        .unwrap();
        let mut criteria = SelectionCriteria::default();
        criteria.apply_config(&settings).unwrap();
        assert!(criteria.validate().is_err());
    }
}

mod refreshing_pair_list {
    use super::*;

    #[test]
    fn selection_is_stable_within_the_refresh_window() {
        let catalog = make_catalog(&[("blue_chips", &["BTC/USDT:USDT", "ETH/USDT:USDT"])]);
        let criteria = permissive_criteria();
        let port = MockMetricsPort::new()
            .with_metrics("BTC/USDT:USDT", make_metrics(200.0, 1000.0, 0.05))
            .with_metrics("ETH/USDT:USDT", make_metrics(100.0, 500.0, 0.05));

        let mut list = RefreshingPairList::new(catalog, criteria, Box::new(port));
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let first = list.filter_pairlist(&pairs(&["BTC/USDT:USDT", "ETH/USDT:USDT"]), t0);
        // within the window even a changed candidate pool returns the
        // cached selection untouched
        let second = list.filter_pairlist(&pairs(&["ETH/USDT:USDT"]), t0 + Duration::hours(2));
        assert_eq!(first, second);
        assert_eq!(list.last_refresh(), Some(t0));
    }

    #[test]
    fn selection_refreshes_after_the_window() {
        let catalog = make_catalog(&[("blue_chips", &["BTC/USDT:USDT", "ETH/USDT:USDT"])]);
        let criteria = permissive_criteria();
        let port = MockMetricsPort::new()
            .with_metrics("BTC/USDT:USDT", make_metrics(200.0, 1000.0, 0.05))
            .with_metrics("ETH/USDT:USDT", make_metrics(100.0, 500.0, 0.05));

        let mut list = RefreshingPairList::new(catalog, criteria, Box::new(port));
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        list.filter_pairlist(&pairs(&["BTC/USDT:USDT", "ETH/USDT:USDT"]), t0);
        let refreshed = list.filter_pairlist(&pairs(&["ETH/USDT:USDT"]), t0 + Duration::hours(5));
        assert_eq!(refreshed, vec!["ETH/USDT:USDT"]);
    }

    #[test]
    fn provider_failure_yields_cached_empty_selection() {
        let catalog = make_catalog(&[("blue_chips", &["BTC/USDT:USDT"])]);
        let port = MockMetricsPort::new().failing("connection refused");
        let mut list = RefreshingPairList::new(catalog, permissive_criteria(), Box::new(port));
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        assert!(list.filter_pairlist(&pairs(&["BTC/USDT:USDT"]), t0).is_empty());
        assert!(list
            .filter_pairlist(&pairs(&["BTC/USDT:USDT"]), t0 + Duration::hours(1))
            .is_empty());
    }
}

mod rendering {
    use super::*;

    #[test]
    fn full_run_renders_a_paste_ready_whitelist() {
        let parsed = parse_catalog(CATALOG_JSON, "catalog.json").unwrap();
        let weights = parsed.strategy.as_ref().unwrap().category_weights();
        let selected = select_weighted(&parsed.catalog, &weights, 2);

        let rendered = render_pair_whitelist(&selected);
        assert_eq!(
            rendered,
            "\"pair_whitelist\": [\n    \"BTC/USDT:USDT\",\n    \"UNI/USDT:USDT\"\n],\n"
        );
    }
}
