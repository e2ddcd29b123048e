use alert_core::filter::{filter_alerts, AlertStats, SeverityFilters};
use alert_core::geo;
use alert_core::severity::{classify, Severity};
use alert_core::wire::{parse_alerts, sort_newest_first};
use serde_json::json;

fn mixed_snapshot() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "report_id": 1,
            "disaster_type": "flood",
            "severity_score": 75,
            "summary": "Heavy flooding in downtown area",
            "location_name": "Downtown City",
            "lat": 40.7,
            "lon": -89.6,
            "created_at": "2024-01-15T10:30:00"
        },
        {
            "id": 2,
            "alert_type": "earthquake",
            "summary": "Magnitude 6.5 earthquake reported",
            "location": "Mountain Region",
            "lat": 35.2,
            "lon": -118.9,
            "severity": 90,
            "timestamp": "2024-01-15T11:00:00Z",
            "source": "seismograph"
        },
        {
            "id": 3,
            "alert_type": "storm",
            "summary": "Tropical storm approaching the coast",
            "location": "Gulf Coast",
            "lat": 29.3,
            "lon": -94.8,
            "severity": 38,
            "timestamp": "2024-01-15T09:15:00Z",
            "source": "weather-station"
        },
        { "id": 99, "summary": "malformed, no coordinates or timestamp" }
    ])
}

#[test]
fn refresh_pipeline_normalizes_sorts_filters_and_counts() {
    let (mut alerts, dropped) = parse_alerts(&mixed_snapshot());
    assert_eq!(alerts.len(), 3, "malformed entry must be dropped");
    assert_eq!(dropped.len(), 1);

    sort_newest_first(&mut alerts);
    let ids: Vec<i64> = alerts.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2, 1, 3], "newest first across both wire shapes");

    let stats = AlertStats::aggregate(&alerts);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.low + stats.medium + stats.high, stats.total);
    assert_eq!(stats.high, 2);
    assert_eq!(stats.low, 1);

    let everything = filter_alerts(&alerts, &SeverityFilters::default());
    assert_eq!(everything, alerts, "all-true filter is the identity");

    let high_only = SeverityFilters {
        low: false,
        medium: false,
        high: true,
    };
    let filtered = filter_alerts(&alerts, &high_only);
    assert!(filtered.iter().all(|a| classify(a.severity) == Severity::High));
    assert_eq!(filtered.len(), 2);

    // Filtering never changes the statistics basis.
    assert_eq!(AlertStats::aggregate(&alerts).total, 3);
}

#[test]
fn viewport_follows_the_snapshot_until_it_empties() {
    let (mut alerts, _) = parse_alerts(&mixed_snapshot());
    sort_newest_first(&mut alerts);

    let bounds = geo::fit_bounds(&alerts, 0.2).expect("markers present");
    assert!(bounds.south < 29.3 && bounds.north > 40.7);
    assert!(bounds.west < -118.9 && bounds.east > -89.6);

    alerts.clear();
    assert_eq!(geo::fit_bounds(&alerts, 0.2), None, "empty snapshot leaves the viewport alone");
}
