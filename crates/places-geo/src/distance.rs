use places_types::{BoundingBox, Coordinates};

/// Mean Earth radius (IUGG), kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Slack added to each box edge, in degrees, so a point exactly on the circle
/// is never cut off by rounding in the box arithmetic.
const BOX_MARGIN_DEG: f64 = 1e-9;

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

pub fn within_radius(center: Coordinates, radius_km: f64, point: Coordinates) -> bool {
    haversine_km(center, point) <= radius_km
}

/// Smallest lat/lon rectangle containing every point within `radius_km` of
/// `center`. Only a pre-filter: callers still run [`within_radius`] on what it
/// selects.
pub fn bounding_box_around(center: Coordinates, radius_km: f64) -> BoundingBox {
    let angular = radius_km.max(0.0) / EARTH_RADIUS_KM;
    let dlat = angular.to_degrees() + BOX_MARGIN_DEG;
    let lat = center.latitude();
    let lon = center.longitude();

    let min_latitude = lat - dlat;
    let max_latitude = lat + dlat;

    if min_latitude <= -90.0 || max_latitude >= 90.0 {
        // The circle reaches a pole, so every meridian passes through it.
        return BoundingBox {
            min_latitude: min_latitude.max(-90.0),
            max_latitude: max_latitude.min(90.0),
            min_longitude: -180.0,
            max_longitude: 180.0,
        };
    }

    let dlon = (angular.sin() / lat.to_radians().cos()).asin().to_degrees() + BOX_MARGIN_DEG;
    let mut min_longitude = lon - dlon;
    let mut max_longitude = lon + dlon;
    if min_longitude < -180.0 {
        min_longitude += 360.0;
    }
    if max_longitude > 180.0 {
        max_longitude -= 360.0;
    }

    BoundingBox {
        min_latitude,
        max_latitude,
        min_longitude,
        max_longitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(longitude: f64, latitude: f64) -> Coordinates {
        Coordinates::new(longitude, latitude).unwrap()
    }

    #[test]
    fn distance_to_self_is_zero() {
        for p in [
            point(0.0, 0.0),
            point(120.9817, 14.5896),
            point(-180.0, -90.0),
            point(180.0, 90.0),
            point(-73.9857, 40.7484),
        ] {
            assert_eq!(haversine_km(p, p), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (point(120.9817, 14.5896), point(121.0509, 14.6515)),
            (point(-0.1278, 51.5074), point(2.3522, 48.8566)),
            (point(179.9, 0.0), point(-179.9, 0.0)),
            (point(0.0, 89.0), point(180.0, -89.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(haversine_km(a, b), haversine_km(b, a));
        }
    }

    #[test]
    fn known_distances() {
        let one_degree = haversine_km(point(0.0, 0.0), point(0.0, 1.0));
        assert!((one_degree - 111.195).abs() < 0.01, "{one_degree}");

        let london_paris = haversine_km(point(-0.1278, 51.5074), point(2.3522, 48.8566));
        assert!((340.0..347.0).contains(&london_paris), "{london_paris}");

        let across_antimeridian = haversine_km(point(179.9, 0.0), point(-179.9, 0.0));
        assert!(across_antimeridian < 23.0, "{across_antimeridian}");
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let center = point(120.9817, 14.5896);
        assert!(within_radius(center, 0.0, center));

        let other = point(121.0509, 14.6515);
        let d = haversine_km(center, other);
        assert!(within_radius(center, d, other));
        assert!(!within_radius(center, d - 0.001, other));
    }

    #[test]
    fn zero_radius_box_hugs_the_point() {
        let center = point(120.9817, 14.5896);
        let bbox = bounding_box_around(center, 0.0);
        assert!(bbox.contains(center));
        assert!((bbox.max_latitude - bbox.min_latitude) < 1e-8);
        assert!((bbox.max_longitude - bbox.min_longitude) < 1e-8);
        assert!(!bbox.contains(point(120.9817, 14.5897)));
        assert!(!bbox.contains(point(120.9818, 14.5896)));
    }

    #[test]
    fn box_contains_points_exactly_on_the_circle() {
        let centers = [
            point(0.0, 0.0),
            point(120.9817, 0.0),
            point(120.9817, 14.5896),
            point(-70.0, -60.0),
            point(179.5, 45.0),
        ];
        for center in centers {
            let mut lat = center.latitude() - 3.0;
            while lat <= center.latitude() + 3.0 {
                let mut lon = center.longitude() - 3.0;
                while lon <= center.longitude() + 3.0 {
                    let wrapped = if lon > 180.0 { lon - 360.0 } else { lon };
                    let p = point(wrapped, lat);
                    let radius = haversine_km(center, p);
                    let bbox = bounding_box_around(center, radius);
                    assert!(
                        bbox.contains(p),
                        "{p:?} at exactly {radius} km from {center:?} outside {bbox:?}"
                    );
                    lon += 0.0479;
                }
                lat += 0.0479;
            }
        }
    }

    #[test]
    fn box_reaching_pole_spans_all_longitudes() {
        let bbox = bounding_box_around(point(10.0, 89.5), 200.0);
        assert_eq!(bbox.max_latitude, 90.0);
        assert_eq!(bbox.min_longitude, -180.0);
        assert_eq!(bbox.max_longitude, 180.0);
    }

    #[test]
    fn box_wraps_antimeridian() {
        let center = point(179.9, 0.0);
        let bbox = bounding_box_around(center, 50.0);
        assert!(bbox.crosses_antimeridian());
        assert!(bbox.contains(point(-179.9, 0.0)));
        assert!(!bbox.contains(point(0.0, 0.0)));
    }

    #[test]
    fn box_contains_every_point_in_radius() {
        let centers = [
            point(0.0, 0.0),
            point(120.9817, 14.5896),
            point(-70.0, -60.0),
            point(179.5, 45.0),
            point(-179.5, -45.0),
        ];
        for center in centers {
            for radius in [1.0, 50.0, 500.0, 3000.0] {
                let bbox = bounding_box_around(center, radius);
                let mut lat = -89.95;
                while lat < 90.0 {
                    let mut lon = -179.95;
                    while lon < 180.0 {
                        let p = point(lon, lat);
                        if within_radius(center, radius, p) {
                            assert!(
                                bbox.contains(p),
                                "{p:?} within {radius} km of {center:?} but outside {bbox:?}"
                            );
                        }
                        lon += 0.7;
                    }
                    lat += 0.7;
                }
            }
        }
    }
}
