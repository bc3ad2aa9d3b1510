//! Spherical (web) mercator projection and the coordinate validation gate.

use super::coord::{Coord, GeoCoord};
use super::space::World;

/// Sphere radius used by web mercator, in metres.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude at which web mercator becomes a square world.
pub const MAX_LATITUDE: f64 = 85.051_128_78;
pub const MIN_LATITUDE: f64 = -MAX_LATITUDE;
pub const MAX_LONGITUDE: f64 = 180.0;
pub const MIN_LONGITUDE: f64 = -180.0;

/// Returns true if the position can be placed on the map.
///
/// Rejects NaN and anything outside the mercator latitude band or the
/// [-180, 180] longitude range. Every operation that accepts a geographic
/// position goes through this check.
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    if latitude.is_nan() || longitude.is_nan() {
        log::debug!("coordinate contains NaN");
        return false;
    }
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        log::debug!(
            "latitude {latitude:.6} is outside the map ({MIN_LATITUDE} to {MAX_LATITUDE})"
        );
        return false;
    }
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        log::debug!(
            "longitude {longitude:.6} is outside the map ({MIN_LONGITUDE} to {MAX_LONGITUDE})"
        );
        return false;
    }
    true
}

/// Projects a geographic position to mercator metres.
pub fn from_lon_lat(geo: GeoCoord) -> Coord<World> {
    let x = EARTH_RADIUS * geo.longitude.to_radians();
    let lat = geo.latitude.to_radians();
    let y = EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
    Coord::new(x, y)
}

/// Inverse of [`from_lon_lat`].
pub fn to_lon_lat(world: Coord<World>) -> GeoCoord {
    let longitude = (world.x / EARTH_RADIUS).to_degrees();
    let latitude =
        (2.0 * (world.y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    GeoCoord::new(latitude, longitude)
}
