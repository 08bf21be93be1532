use odds_arb_core::{MarketType, OddsSnapshot};
use odds_arb_detector::{ArbitrageDetector, DetectionReport};

const SNAPSHOT: &str = r#"{
    "fanduel": {
        "yankees vs red sox": {
            "teams": ["new york yankees", "boston red sox"],
            "moneyline": [-110, -110],
            "spread": [-115, -105],
            "total": [null, -110],
            "timestamp": 1700000000.0
        },
        "dodgers vs giants": {
            "teams": ["los angeles dodgers", "san francisco giants"],
            "moneyline": [-155, 160],
            "timestamp": 1700000000.0
        }
    },
    "draftkings": {
        "yankees vs red sox": {
            "teams": ["NY Yankees", "Red Sox"],
            "moneyline": [-110, -110],
            "spread": [0, -110],
            "total": [-110, -110],
            "timestamp": 1700000001.0
        },
        "astros vs rangers": {
            "teams": ["houston astros", "texas rangers"],
            "moneyline": [-120, 100],
            "timestamp": 1700000001.0
        }
    },
    "betmgm": {
        "dodgers vs giants": {
            "teams": ["LA Dodgers", "SF Giants"],
            "moneyline": [-150, 150],
            "timestamp": 1700000002.0
        }
    }
}"#;

fn scan() -> DetectionReport {
    let snapshot: OddsSnapshot = serde_json::from_str(SNAPSHOT).expect("fixture parses");
    ArbitrageDetector::new().scan_at(&snapshot, 1_700_000_010.0)
}

#[test]
fn test_snapshot_fixture_shape() {
    let snapshot: OddsSnapshot = serde_json::from_str(SNAPSHOT).unwrap();

    assert_eq!(snapshot.book_count(), 3);
    assert_eq!(snapshot.game_count(), 5);

    let dk = &snapshot.books["draftkings"]["yankees vs red sox"];
    assert!(dk.spread.unwrap()[0].is_empty());
}

#[test]
fn test_pipeline_counts() {
    let report = scan();

    assert_eq!(report.summary.books, 3);
    assert_eq!(report.summary.games_seen, 3);
    assert_eq!(report.summary.games_matched, 2);
}

#[test]
fn test_pipeline_records() {
    let report = scan();
    let opps = &report.opportunities;

    // yankees vs red sox (draftkings, fanduel):
    //   moneyline: both cross legs -110/-110
    //   spread: (0,1) zero price skipped, (1,0) -110 vs -115
    //   total: (0,1) -110 vs -110, (1,0) -110 vs null skipped
    // dodgers vs giants (betmgm, fanduel):
    //   (0,1) -150 vs +160 and (1,0) +150 vs -155, both below margin
    assert_eq!(report.summary.leg_pairs_evaluated, 6);
    assert_eq!(report.summary.opportunities_found, 4);
    assert_eq!(opps.len(), 4);

    assert!(opps.iter().all(|o| o.game == "yankees vs red sox"));
    assert!(opps.iter().all(|o| o.book1 == "draftkings" && o.book2 == "fanduel"));
    assert!(opps.iter().all(|o| o.team1 == "yankees" && o.team2 == "red sox"));
    assert!(opps.iter().all(|o| o.total_stake == 0.0 && o.roi == 0.0));
    assert!(opps.iter().all(|o| (o.timestamp - 1_700_000_010.0).abs() < 1e-6));

    let markets: Vec<MarketType> = opps.iter().map(|o| o.market).collect();
    assert_eq!(
        markets,
        vec![
            MarketType::Moneyline,
            MarketType::Moneyline,
            MarketType::Spread,
            MarketType::Total
        ]
    );

    let spread = &opps[2];
    assert_eq!((spread.odds1, spread.odds2), (-110, -115));
}

#[test]
fn test_report_serializes_column_names() {
    let report = scan();
    let json = serde_json::to_value(&report.opportunities[0]).unwrap();

    for column in [
        "game",
        "market",
        "book1",
        "book2",
        "team1",
        "team2",
        "odds1",
        "odds2",
        "stake1",
        "stake2",
        "total_stake",
        "profit",
        "roi",
        "arb_percent",
        "timestamp",
    ] {
        assert!(json.get(column).is_some(), "missing column {column}");
    }
    assert_eq!(json["market"], "moneyline");
}

#[test]
fn test_repeated_scans_are_identical() {
    let snapshot: OddsSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
    let detector = ArbitrageDetector::new();

    let first = detector.scan_at(&snapshot, 1.0);
    let second = detector.scan_at(&snapshot, 1.0);

    assert_eq!(first, second);
}
