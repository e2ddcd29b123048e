use crate::model::Alert;

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

pub fn valid_lat(lat: f64) -> bool {
    (LAT_MIN..=LAT_MAX).contains(&lat)
}

pub fn valid_lon(lon: f64) -> bool {
    (LON_MIN..=LON_MAX).contains(&lon)
}

/// A south-west / north-east bounding box, in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Bounding box covering every alert, expanded on each side by `pad` times
/// the box dimensions. Returns `None` for an empty snapshot so the caller
/// leaves the viewport where it was.
pub fn fit_bounds(alerts: &[Alert], pad: f64) -> Option<LatLngBounds> {
    let first = alerts.first()?;
    let mut bounds = LatLngBounds {
        south: first.lat,
        west: first.lon,
        north: first.lat,
        east: first.lon,
    };
    for alert in &alerts[1..] {
        bounds.south = bounds.south.min(alert.lat);
        bounds.west = bounds.west.min(alert.lon);
        bounds.north = bounds.north.max(alert.lat);
        bounds.east = bounds.east.max(alert.lon);
    }

    let lat_margin = (bounds.north - bounds.south) * pad;
    let lon_margin = (bounds.east - bounds.west) * pad;
    bounds.south -= lat_margin;
    bounds.north += lat_margin;
    bounds.west -= lon_margin;
    bounds.east += lon_margin;
    Some(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn alert_at(lat: f64, lon: f64) -> Alert {
        Alert {
            id: 0,
            alert_type: "flood".into(),
            summary: String::new(),
            location: String::new(),
            lat,
            lon,
            severity: 10.0,
            timestamp: Utc::now(),
            source: "test".into(),
        }
    }

    #[test]
    fn latitude_range_is_inclusive() {
        assert!(valid_lat(90.0));
        assert!(valid_lat(-90.0));
        assert!(!valid_lat(90.0001));
        assert!(!valid_lat(-90.0001));
    }

    #[test]
    fn longitude_range_is_inclusive() {
        assert!(valid_lon(180.0));
        assert!(valid_lon(-180.0));
        assert!(!valid_lon(180.0001));
        assert!(!valid_lon(-180.0001));
    }

    #[test]
    fn empty_snapshot_has_no_bounds() {
        assert_eq!(fit_bounds(&[], 0.2), None);
    }

    #[test]
    fn bounds_cover_all_markers_with_padding() {
        let alerts = vec![alert_at(0.0, 0.0), alert_at(10.0, 20.0)];
        let bounds = fit_bounds(&alerts, 0.2).expect("bounds");
        assert_eq!(bounds.south, -2.0);
        assert_eq!(bounds.north, 12.0);
        assert_eq!(bounds.west, -4.0);
        assert_eq!(bounds.east, 24.0);
    }

    #[test]
    fn single_marker_yields_degenerate_bounds() {
        let alerts = vec![alert_at(34.05, -118.24)];
        let bounds = fit_bounds(&alerts, 0.2).expect("bounds");
        assert_eq!(bounds.south, bounds.north);
        assert_eq!(bounds.west, bounds.east);
    }
}
