//! Geographic and projected geometry primitives.
//!
//! Positions entered by the user live in geographic degrees
//! ([`GeoCoord`]); the map works in spherical-mercator metres
//! ([`Coord<World>`]) and the view in pixels ([`Coord<Screen>`]). The
//! marker types keep those spaces from being mixed up.

mod bounds;
mod color;
mod coord;
pub mod mercator;
mod space;

pub use bounds::GeoBounds;
pub use color::Argb;
pub use coord::{Coord, GeoCoord};
pub use mercator::is_valid_coordinate;
pub use space::{Screen, World};
