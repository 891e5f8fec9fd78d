use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input rejected before it reaches the store or the geocoder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Longitude must be between -180 and 180, got {0}")]
    Longitude(f64),
    #[error("Latitude must be between -90 and 90, got {0}")]
    Latitude(f64),
    #[error("Distance must be a non-negative number of kilometers, got {0}")]
    Distance(f64),
    #[error("Must be a full name containing a space")]
    FullName,
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// A point on the globe in degrees. Only constructible through [`Coordinates::new`],
/// so a value of this type is always within geographic range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, ValidationError> {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::Longitude(longitude));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::Latitude(latitude));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

/// Inclusive latitude/longitude rectangle.
///
/// `min_longitude > max_longitude` means the box crosses the antimeridian and
/// covers `[min_longitude, 180] ∪ [-180, max_longitude]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_longitude > self.max_longitude
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        let lat = point.latitude();
        let lon = point.longitude();
        if lat < self.min_latitude || lat > self.max_latitude {
            return false;
        }
        if self.crosses_antimeridian() {
            lon >= self.min_longitude || lon <= self.max_longitude
        } else {
            lon >= self.min_longitude && lon <= self.max_longitude
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub address: Option<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_accept_range_edges() {
        assert!(Coordinates::new(-180.0, -90.0).is_ok());
        assert!(Coordinates::new(180.0, 90.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn coordinates_reject_out_of_range() {
        assert_eq!(
            Coordinates::new(180.5, 0.0),
            Err(ValidationError::Longitude(180.5))
        );
        assert_eq!(
            Coordinates::new(-181.0, 0.0),
            Err(ValidationError::Longitude(-181.0))
        );
        assert_eq!(
            Coordinates::new(0.0, 90.01),
            Err(ValidationError::Latitude(90.01))
        );
        assert_eq!(
            Coordinates::new(0.0, -91.0),
            Err(ValidationError::Latitude(-91.0))
        );
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn bounding_box_edges_are_inclusive() {
        let bbox = BoundingBox {
            min_latitude: 10.0,
            max_latitude: 20.0,
            min_longitude: 100.0,
            max_longitude: 110.0,
        };
        assert!(bbox.contains(Coordinates::new(100.0, 10.0).unwrap()));
        assert!(bbox.contains(Coordinates::new(110.0, 20.0).unwrap()));
        assert!(!bbox.contains(Coordinates::new(110.1, 15.0).unwrap()));
        assert!(!bbox.contains(Coordinates::new(105.0, 9.9).unwrap()));
    }

    #[test]
    fn bounding_box_across_antimeridian() {
        let bbox = BoundingBox {
            min_latitude: -5.0,
            max_latitude: 5.0,
            min_longitude: 179.0,
            max_longitude: -179.0,
        };
        assert!(bbox.crosses_antimeridian());
        assert!(bbox.contains(Coordinates::new(179.5, 0.0).unwrap()));
        assert!(bbox.contains(Coordinates::new(-179.5, 0.0).unwrap()));
        assert!(!bbox.contains(Coordinates::new(0.0, 0.0).unwrap()));
    }

    #[test]
    fn user_without_address_serializes_null() {
        let user = User {
            id: "u1".into(),
            name: "Juan Dela Cruz".into(),
            address: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["address"], serde_json::Value::Null);
        assert_eq!(json["name"], "Juan Dela Cruz");
    }
}
