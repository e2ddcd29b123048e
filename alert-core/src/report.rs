use crate::geo;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE: &str = "WebApp User";
pub const MIN_TEXT_CHARS: usize = 10;
pub const MIN_SOURCE_CHARS: usize = 2;

pub const SUCCESS_MESSAGE: &str = "Report received! Analysis in progress.";
const GENERIC_FAILURE_MESSAGE: &str = "An unknown error occurred while submitting the report.";

/// Raw form state, exactly as typed. Kept as strings so invalid input stays
/// on screen for correction instead of being coerced away.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportDraft {
    pub text: String,
    pub lat: String,
    pub lon: String,
    pub source: String,
}

impl Default for ReportDraft {
    fn default() -> Self {
        ReportDraft {
            text: String::new(),
            lat: String::new(),
            lon: String::new(),
            source: DEFAULT_SOURCE.into(),
        }
    }
}

/// Validated submission body: `{text, lat, lon, source}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub text: String,
    pub lat: f64,
    pub lon: f64,
    pub source: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub text: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub source: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.lat.is_none() && self.lon.is_none() && self.source.is_none()
    }
}

/// Checks every field and reports all failures at once. No network call is
/// made on the error path.
pub fn validate(draft: &ReportDraft) -> Result<ReportPayload, FieldErrors> {
    let mut errors = FieldErrors::default();

    if draft.text.chars().count() < MIN_TEXT_CHARS {
        errors.text = Some("Description must be at least 10 characters long.".into());
    }

    let lat = match draft.lat.trim().parse::<f64>() {
        Ok(lat) if geo::valid_lat(lat) => Some(lat),
        Ok(_) => {
            errors.lat = Some("Latitude must be between -90 and 90.".into());
            None
        }
        Err(_) => {
            errors.lat = Some("Latitude must be a number.".into());
            None
        }
    };

    let lon = match draft.lon.trim().parse::<f64>() {
        Ok(lon) if geo::valid_lon(lon) => Some(lon),
        Ok(_) => {
            errors.lon = Some("Longitude must be between -180 and 180.".into());
            None
        }
        Err(_) => {
            errors.lon = Some("Longitude must be a number.".into());
            None
        }
    };

    if draft.source.chars().count() < MIN_SOURCE_CHARS {
        errors.source = Some("Source must be at least 2 characters long.".into());
    }

    match (lat, lon) {
        (Some(lat), Some(lon)) if errors.is_empty() => Ok(ReportPayload {
            text: draft.text.clone(),
            lat,
            lon,
            source: draft.source.clone(),
        }),
        _ => Err(errors),
    }
}

/// Result surfaced to the user after a submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub success: bool,
    pub message: String,
}

impl SubmitOutcome {
    pub fn accepted() -> Self {
        SubmitOutcome {
            success: true,
            message: SUCCESS_MESSAGE.into(),
        }
    }

    pub fn rejected(detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) => format!("Failed to submit report: {detail}"),
            None => GENERIC_FAILURE_MESSAGE.into(),
        };
        SubmitOutcome {
            success: false,
            message,
        }
    }
}
