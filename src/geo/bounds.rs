//! Axis-aligned bounding boxes over geographic positions.

use super::coord::{Coord, GeoCoord};
use super::mercator;
use super::space::World;

/// Latitude/longitude extent of a set of positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub min: GeoCoord,
    pub max: GeoCoord,
}

impl GeoBounds {
    /// Computes the bounding box of the given positions.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_coords<'a>(coords: impl IntoIterator<Item = &'a GeoCoord>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for c in iter {
            bounds.min.latitude = bounds.min.latitude.min(c.latitude);
            bounds.min.longitude = bounds.min.longitude.min(c.longitude);
            bounds.max.latitude = bounds.max.latitude.max(c.latitude);
            bounds.max.longitude = bounds.max.longitude.max(c.longitude);
        }
        Some(bounds)
    }

    /// South-west corner in mercator metres.
    pub fn world_min(&self) -> Coord<World> {
        mercator::from_lon_lat(self.min)
    }

    /// North-east corner in mercator metres.
    pub fn world_max(&self) -> Coord<World> {
        mercator::from_lon_lat(self.max)
    }

    /// Projected centre of the box (midpoint of the projected corners).
    pub fn world_center(&self) -> Coord<World> {
        let min = self.world_min();
        let max = self.world_max();
        Coord::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0)
    }

    /// Projected width and height in metres.
    pub fn world_size(&self) -> (f64, f64) {
        let min = self.world_min();
        let max = self.world_max();
        ((max.x - min.x).abs(), (max.y - min.y).abs())
    }
}
