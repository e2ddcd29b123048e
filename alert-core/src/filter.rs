use crate::model::Alert;
use crate::severity::{classify, Severity};
use serde::{Deserialize, Serialize};

/// Which severity categories the user wants to see. Session-local state,
/// never persisted; affects the displayed list only, not the statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityFilters {
    pub low: bool,
    pub medium: bool,
    pub high: bool,
}

impl Default for SeverityFilters {
    fn default() -> Self {
        SeverityFilters {
            low: true,
            medium: true,
            high: true,
        }
    }
}

impl SeverityFilters {
    pub fn allows(&self, severity: &Severity) -> bool {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }

    pub fn toggle(&mut self, severity: &Severity) {
        match severity {
            Severity::Low => self.low = !self.low,
            Severity::Medium => self.medium = !self.medium,
            Severity::High => self.high = !self.high,
        }
    }
}

/// Subset of the snapshot whose classified category is enabled, in the
/// snapshot's original order.
pub fn filter_alerts(alerts: &[Alert], filters: &SeverityFilters) -> Vec<Alert> {
    alerts
        .iter()
        .filter(|alert| filters.allows(&classify(alert.severity)))
        .cloned()
        .collect()
}

/// Per-category counts over the unfiltered snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlertStats {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub total: usize,
}

impl AlertStats {
    pub fn aggregate(alerts: &[Alert]) -> Self {
        let mut stats = AlertStats::default();
        for alert in alerts {
            match classify(alert.severity) {
                Severity::Low => stats.low += 1,
                Severity::Medium => stats.medium += 1,
                Severity::High => stats.high += 1,
            }
            stats.total += 1;
        }
        stats
    }
}
