//! Viewport math: conversion between projected and screen coordinates.

use std::time::Duration;

use crate::geo::{Coord, Screen, World};
use crate::model::DEFAULT_RESOLUTION;

/// The visible window onto the projected map.
///
/// `resolution` is projected metres per screen pixel, so a larger value
/// means further zoomed out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Coord<World>,
    pub resolution: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl Viewport {
    /// Creates a viewport of the given pixel size centred on the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            center: Coord::new(0.0, 0.0),
            resolution: DEFAULT_RESOLUTION,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Projects a map position onto the screen.
    pub fn world_to_screen(&self, world: Coord<World>) -> Coord<Screen> {
        Coord::new(
            (world.x - self.center.x) / self.resolution + self.width / 2.0,
            (self.center.y - world.y) / self.resolution + self.height / 2.0,
        )
    }

    /// Inverse of [`Viewport::world_to_screen`].
    pub fn screen_to_world(&self, screen: Coord<Screen>) -> Coord<World> {
        Coord::new(
            self.center.x + (screen.x - self.width / 2.0) * self.resolution,
            self.center.y - (screen.y - self.height / 2.0) * self.resolution,
        )
    }
}

/// A camera move requested by the adapter.
///
/// The viewport jumps to the target immediately; `duration` tells the
/// host how long to animate the transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Navigation {
    pub center: Coord<World>,
    pub resolution: f64,
    pub duration: Duration,
}
