use serde::{Deserialize, Serialize};

/// Severity category derived from a numeric score, in ascending order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Thresholds: score < 40 is low, 40..70 is medium, 70 and above is high.
pub fn classify(score: f64) -> Severity {
    if score < 40.0 {
        Severity::Low
    } else if score < 70.0 {
        Severity::Medium
    } else {
        Severity::High
    }
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Marker color used on the map and in badges.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Low => "hsl(142, 64%, 42%)",
            Severity::Medium => "hsl(48, 96%, 53%)",
            Severity::High => "hsl(0, 72%, 51%)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_below_forty_as_low() {
        assert_eq!(classify(0.0), Severity::Low);
        assert_eq!(classify(39.9), Severity::Low);
    }

    #[test]
    fn boundary_forty_is_medium() {
        assert_eq!(classify(40.0), Severity::Medium);
        assert_eq!(classify(69.9), Severity::Medium);
    }

    #[test]
    fn boundary_seventy_is_high() {
        assert_eq!(classify(70.0), Severity::High);
        assert_eq!(classify(100.0), Severity::High);
    }

    #[test]
    fn classification_is_stable() {
        for score in [0.0, 39.0, 40.0, 55.5, 70.0, 99.0] {
            assert_eq!(classify(score), classify(score));
        }
    }
}
