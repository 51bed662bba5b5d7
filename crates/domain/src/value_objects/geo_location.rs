//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic location with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180] (NaN is rejected as well)
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Re-check the coordinate range, e.g. after deserialization
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` when out of range.
    pub fn validated(self) -> Result<Self, DomainError> {
        Self::new(self.latitude, self.longitude)
    }

    /// Calculate approximate distance to another location in kilometers
    ///
    /// Uses the Haversine formula for great-circle distance
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Hong Kong, the default map center
    #[must_use]
    pub const fn hong_kong() -> Self {
        Self::new_unchecked(22.3193, 114.1694)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Axis-aligned bounding box spanning a set of locations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// South-west corner
    pub south_west: GeoLocation,
    /// North-east corner
    pub north_east: GeoLocation,
}

impl GeoBounds {
    /// Smallest bounds containing every point, `None` for an empty slice
    #[must_use]
    pub fn enclosing(points: &[GeoLocation]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self {
            south_west: *first,
            north_east: *first,
        };
        for point in rest {
            bounds.extend(*point);
        }
        Some(bounds)
    }

    /// Grow the bounds to include a point
    pub fn extend(&mut self, point: GeoLocation) {
        self.south_west = GeoLocation::new_unchecked(
            self.south_west.latitude.min(point.latitude),
            self.south_west.longitude.min(point.longitude),
        );
        self.north_east = GeoLocation::new_unchecked(
            self.north_east.latitude.max(point.latitude),
            self.north_east.longitude.max(point.longitude),
        );
    }

    /// Whether a point lies inside (or on the edge of) the bounds
    #[must_use]
    pub fn contains(&self, point: &GeoLocation) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }

    /// Midpoint of the bounds
    #[must_use]
    pub fn center(&self) -> GeoLocation {
        GeoLocation::new_unchecked(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let loc = GeoLocation::new(22.28, 114.15).expect("valid coordinates");
        assert!((loc.latitude() - 22.28).abs() < f64::EPSILON);
        assert!((loc.longitude() - 114.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_validated_rejects_unchecked_out_of_range() {
        assert!(GeoLocation::new_unchecked(120.0, 0.0).validated().is_err());
        assert!(GeoLocation::hong_kong().validated().is_ok());
    }

    #[test]
    fn test_display() {
        let loc = GeoLocation::new(22.28, 114.15).expect("valid");
        assert_eq!(format!("{loc}"), "22.280000, 114.150000");
    }

    #[test]
    fn test_distance_same_location() {
        let loc = GeoLocation::hong_kong();
        assert!(loc.distance_km(&loc).abs() < 0.001);
    }

    #[test]
    fn test_distance_short_walk() {
        let input = GeoLocation::new(22.280, 114.160).expect("valid");
        let station = GeoLocation::new(22.282, 114.158).expect("valid");
        let distance = input.distance_km(&station);
        // Roughly 300 meters
        assert!((distance - 0.3).abs() < 0.05);
    }

    #[test]
    fn test_bounds_enclose_points() {
        let a = GeoLocation::new(22.280, 114.160).expect("valid");
        let b = GeoLocation::new(22.282, 114.158).expect("valid");
        let bounds = GeoBounds::enclosing(&[a, b]).expect("non-empty");

        assert!(bounds.contains(&a));
        assert!(bounds.contains(&b));
        assert!((bounds.south_west.latitude() - 22.280).abs() < f64::EPSILON);
        assert!((bounds.north_east.longitude() - 114.160).abs() < f64::EPSILON);
        assert!((bounds.center().latitude() - 22.281).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(GeoBounds::enclosing(&[]).is_none());
    }

    #[test]
    fn test_serialization() {
        let loc = GeoLocation::new(22.28, 114.15).expect("valid");
        let json = serde_json::to_string(&loc).expect("serialize");
        assert!(json.contains("\"latitude\":22.28"));

        let deserialized: GeoLocation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, deserialized);
    }
}
