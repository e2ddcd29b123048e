//! Normalization of backend payloads onto the pinned domain model.
//!
//! The alert endpoint has shipped more than one field vocabulary
//! (`severity` vs `severity_score`, `location` vs `location_name`,
//! `timestamp` vs `created_at`), and the health endpoint likewise. Every
//! shape is mapped here, at the client boundary, so nothing downstream ever
//! sees a raw payload.

use crate::model::{Alert, HealthStatus};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

fn str_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| value.get(key).and_then(Value::as_str))
}

fn num_field(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| value.get(key).and_then(Value::as_f64))
}

/// Accepts RFC 3339 as well as the backend's naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("bad timestamp '{raw}': {e}"))
}

pub fn parse_alert(value: &Value) -> Result<Alert, String> {
    let id = value
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| "alert missing id".to_string())?;

    let lat = num_field(value, &["lat"]).ok_or_else(|| format!("alert {id} missing lat"))?;
    let lon = num_field(value, &["lon"]).ok_or_else(|| format!("alert {id} missing lon"))?;

    let timestamp = str_field(value, &["timestamp", "created_at"])
        .ok_or_else(|| format!("alert {id} missing timestamp"))
        .and_then(parse_timestamp)?;

    Ok(Alert {
        id,
        alert_type: str_field(value, &["alert_type", "disaster_type"])
            .unwrap_or("other")
            .to_string(),
        summary: str_field(value, &["summary"]).unwrap_or_default().to_string(),
        location: str_field(value, &["location", "location_name"])
            .unwrap_or_default()
            .to_string(),
        lat,
        lon,
        severity: num_field(value, &["severity", "severity_score"]).unwrap_or(0.0),
        timestamp,
        source: str_field(value, &["source"]).unwrap_or("unknown").to_string(),
    })
}

/// Tolerant batch parse: malformed entries are dropped and reported, the
/// rest of the snapshot survives.
pub fn parse_alerts(value: &Value) -> (Vec<Alert>, Vec<String>) {
    let Some(items) = value.as_array() else {
        return (Vec::new(), vec!["alerts payload is not an array".into()]);
    };

    let mut alerts = Vec::with_capacity(items.len());
    let mut dropped = Vec::new();
    for item in items {
        match parse_alert(item) {
            Ok(alert) => alerts.push(alert),
            Err(reason) => dropped.push(reason),
        }
    }
    (alerts, dropped)
}

/// Most recent first. Stable, so equal timestamps keep their payload order.
pub fn sort_newest_first(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

pub fn parse_health(value: &Value) -> HealthStatus {
    if !value.is_object() {
        return HealthStatus::default();
    }

    let status = match str_field(value, &["status"]) {
        Some("ok") => "ok",
        _ => "unhealthy",
    };
    let database = match str_field(value, &["database"]) {
        Some("ok") | Some("connected") => "ok",
        _ => "disconnected",
    };
    let mock_ai = match str_field(value, &["mock_ai", "ai_service"]) {
        Some("ok") | Some("mock") | Some("real") => "ok",
        _ => "disconnected",
    };

    HealthStatus {
        status: status.into(),
        database: database.into(),
        mock_ai: mock_ai.into(),
    }
}

/// Server-provided error detail from a rejection body, when present.
pub fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_the_current_alert_shape() {
        let payload = json!({
            "id": 7,
            "alert_type": "earthquake",
            "summary": "Magnitude 6.5 earthquake reported",
            "location": "Mountain Region",
            "lat": 35.2,
            "lon": -118.9,
            "severity": 90,
            "timestamp": "2024-01-15T11:00:00Z",
            "source": "seismograph"
        });
        let alert = parse_alert(&payload).expect("parse");
        assert_eq!(alert.id, 7);
        assert_eq!(alert.alert_type, "earthquake");
        assert_eq!(alert.severity, 90.0);
        assert_eq!(alert.source, "seismograph");
    }

    #[test]
    fn parses_the_legacy_field_vocabulary() {
        let payload = json!({
            "id": 1,
            "report_id": 1,
            "disaster_type": "flood",
            "severity_score": 75,
            "summary": "Heavy flooding in downtown area",
            "location_name": "Downtown City",
            "lat": 40.1,
            "lon": -88.2,
            "created_at": "2024-01-15T10:30:00"
        });
        let alert = parse_alert(&payload).expect("parse");
        assert_eq!(alert.alert_type, "flood");
        assert_eq!(alert.location, "Downtown City");
        assert_eq!(alert.severity, 75.0);
        assert_eq!(alert.source, "unknown");
        assert_eq!(alert.timestamp, parse_timestamp("2024-01-15T10:30:00Z").unwrap());
    }

    #[test]
    fn naive_timestamps_are_taken_as_utc() {
        let naive = parse_timestamp("2024-01-15T10:30:00").expect("naive");
        let explicit = parse_timestamp("2024-01-15T10:30:00+00:00").expect("rfc3339");
        assert_eq!(naive, explicit);
    }

    #[test]
    fn malformed_entries_are_dropped_not_fatal() {
        let payload = json!([
            {
                "id": 1,
                "alert_type": "fire",
                "summary": "Brush fire",
                "location": "Hillside",
                "lat": 34.0,
                "lon": -118.0,
                "severity": 45,
                "timestamp": "2024-01-15T10:30:00Z",
                "source": "satellite"
            },
            { "id": 2, "summary": "no coordinates" },
            "not even an object"
        ]);
        let (alerts, dropped) = parse_alerts(&payload);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, 1);
        assert_eq!(dropped.len(), 2);
    }

    #[test]
    fn non_array_payload_yields_empty_snapshot() {
        let (alerts, dropped) = parse_alerts(&json!({"detail": "oops"}));
        assert!(alerts.is_empty());
        assert_eq!(dropped.len(), 1);
    }

    #[test]
    fn sorts_newest_first_for_unordered_input() {
        let payload = json!([
            {"id": 1, "lat": 0.0, "lon": 0.0, "severity": 10, "timestamp": "2024-01-15T08:00:00Z"},
            {"id": 2, "lat": 0.0, "lon": 0.0, "severity": 10, "timestamp": "2024-01-15T12:00:00Z"},
            {"id": 3, "lat": 0.0, "lon": 0.0, "severity": 10, "timestamp": "2024-01-15T10:00:00Z"}
        ]);
        let (mut alerts, dropped) = parse_alerts(&payload);
        assert!(dropped.is_empty());
        sort_newest_first(&mut alerts);
        let ids: Vec<i64> = alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn health_maps_the_rich_backend_shape() {
        let payload = json!({
            "status": "ok",
            "service": "Alertrix API",
            "database": "connected",
            "ai_service": "mock",
            "report_count": 12,
            "alert_count": 4,
            "version": "1.0.0"
        });
        let health = parse_health(&payload);
        assert_eq!(health.status, "ok");
        assert_eq!(health.database, "ok");
        assert_eq!(health.mock_ai, "ok");
    }

    #[test]
    fn health_garbage_degrades_to_disconnected() {
        assert_eq!(parse_health(&json!("nope")), HealthStatus::default());
        assert_eq!(parse_health(&json!(null)), HealthStatus::default());
        let partial = parse_health(&json!({"status": "ok"}));
        assert_eq!(partial.status, "ok");
        assert_eq!(partial.database, "disconnected");
        assert_eq!(partial.mock_ai, "disconnected");
    }

    #[test]
    fn detail_is_extracted_when_present() {
        assert_eq!(
            extract_detail(r#"{"detail": "duplicate report"}"#).as_deref(),
            Some("duplicate report")
        );
        assert_eq!(extract_detail(r#"{"error": "other"}"#), None);
        assert_eq!(extract_detail("not json"), None);
    }
}
