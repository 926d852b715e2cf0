//! Coordinates and bounding boxes shared by the gateway, map and backend payloads.

use serde::{Deserialize, Serialize};

/// Coordinate returned when geocoding fails.
pub const FALLBACK_COORD: LatLng = LatLng {
    lat: 35.0,
    lng: -105.0,
};

/// Route points are sent to the backend rounded to this many decimals.
pub const POINT_DECIMALS: i32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `[lat, lng]` rounded to [`POINT_DECIMALS`], the backend's point format.
    pub fn to_pair(self) -> [f64; 2] {
        let scale = 10f64.powi(POINT_DECIMALS);
        [
            (self.lat * scale).round() / scale,
            (self.lng * scale).round() / scale,
        ]
    }

    /// Human readable `"lat, lng"` with five decimals.
    pub fn label(&self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lng)
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Smallest box containing every point, or `None` for an empty path.
    pub fn enclosing(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut sw = *first;
        let mut ne = *first;
        for p in &points[1..] {
            sw.lat = sw.lat.min(p.lat);
            sw.lng = sw.lng.min(p.lng);
            ne.lat = ne.lat.max(p.lat);
            ne.lng = ne.lng.max(p.lng);
        }
        Some(Self::new(sw, ne))
    }

    pub fn is_valid(&self) -> bool {
        self.south_west.is_finite()
            && self.north_east.is_finite()
            && self.south_west.lat <= self.north_east.lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_rounded_to_seven_decimals() {
        let p = LatLng::new(33.748995123456, -84.387982987654);
        assert_eq!(p.to_pair(), [33.7489951, -84.387983]);
    }

    #[test]
    fn label_uses_five_decimals() {
        assert_eq!(LatLng::new(32.0809, -81.0912).label(), "32.08090, -81.09120");
    }

    #[test]
    fn enclosing_box_covers_all_points() {
        let points = [
            LatLng::new(33.7, -84.4),
            LatLng::new(32.1, -81.1),
            LatLng::new(32.8, -83.6),
        ];
        let bounds = Bounds::enclosing(&points).unwrap();
        assert_eq!(bounds.south_west, LatLng::new(32.1, -84.4));
        assert_eq!(bounds.north_east, LatLng::new(33.7, -81.1));
        assert!(bounds.is_valid());
        assert!(Bounds::enclosing(&[]).is_none());
    }

    #[test]
    fn inverted_or_nan_bounds_are_invalid() {
        let inverted = Bounds::new(LatLng::new(34.0, -84.0), LatLng::new(33.0, -83.0));
        assert!(!inverted.is_valid());
        let nan = Bounds::new(LatLng::new(f64::NAN, 0.0), LatLng::new(1.0, 1.0));
        assert!(!nan.is_valid());
    }
}
