use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single reported or detected disaster event.
///
/// Alerts are immutable once fetched; each refresh replaces the whole
/// snapshot rather than patching individual records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub alert_type: String,
    pub summary: String,
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub severity: f64,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

/// Normalized service health, in the vocabulary the dashboard renders:
/// `status` is `ok`/`unhealthy`, the other two are `ok`/`disconnected`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    pub mock_ai: String,
}

impl Default for HealthStatus {
    /// The fully-disconnected status reported when the backend is unreachable.
    fn default() -> Self {
        HealthStatus {
            status: "unhealthy".into(),
            database: "disconnected".into(),
            mock_ai: "disconnected".into(),
        }
    }
}

impl Alert {
    /// Timestamp in the medium date-plus-time style shown in the alert table
    /// and in map popups, e.g. `Jan 15, 2024, 10:30 AM`.
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%b %-d, %Y, %-I:%M %p").to_string()
    }
}

impl HealthStatus {
    pub fn field_ok(value: &str) -> bool {
        value == "ok"
    }
}
