//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between projected map coordinates and on-screen pixel positions at
//! compile time.

use std::fmt;

/// Marker type for projected spherical-mercator coordinates (metres).
///
/// The origin is the intersection of the equator and the prime meridian,
/// with y growing northwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum World {}

/// Marker type for screen coordinates (pixels).
///
/// (0, 0) is the top-left corner of the map view, with y growing downwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {}

impl fmt::Debug for World {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
