pub mod distance;
pub mod geocoder;

pub use distance::{EARTH_RADIUS_KM, bounding_box_around, haversine_km, within_radius};
pub use geocoder::{GeocodeError, Geocoder, NominatimGeocoder, StaticGeocoder};
