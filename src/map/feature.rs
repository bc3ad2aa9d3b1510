//! Visual features drawn on the map and the layers holding them.

use std::collections::BTreeMap;
use std::fmt;

use crate::geo::{Argb, Coord, World};

/// Opaque token identifying a feature owned by the map adapter.
///
/// Entities keep a copy as a back-reference; only the adapter can
/// resolve it to a [`Feature`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureHandle(pub u64);

impl fmt::Debug for FeatureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeatureHandle({})", self.0)
    }
}

impl fmt::Display for FeatureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Marker symbol styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolStyle {
    pub fill: Argb,
    pub outline: Argb,
    pub outline_width: f64,
    pub scale: f64,
}

/// Polygon styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VectorStyle {
    pub fill: Argb,
    pub outline: Argb,
    pub outline_width: f64,
}

/// A drawable element.
#[derive(Clone, Debug, PartialEq)]
pub enum Feature {
    Point {
        position: Coord<World>,
        style: SymbolStyle,
    },
    /// Closed ring: the last coordinate repeats the first.
    Polygon {
        ring: Vec<Coord<World>>,
        style: VectorStyle,
    },
}

impl Feature {
    pub fn is_point(&self) -> bool {
        matches!(self, Feature::Point { .. })
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self, Feature::Polygon { .. })
    }
}

/// A named, writable collection of features drawn in handle order.
#[derive(Clone, Debug)]
pub struct FeatureLayer {
    name: &'static str,
    opacity: f64,
    features: BTreeMap<FeatureHandle, Feature>,
}

impl FeatureLayer {
    pub fn new(name: &'static str, opacity: f64) -> Self {
        Self {
            name,
            opacity,
            features: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub(crate) fn insert(&mut self, handle: FeatureHandle, feature: Feature) {
        self.features.insert(handle, feature);
    }

    pub(crate) fn get_mut(&mut self, handle: FeatureHandle) -> Option<&mut Feature> {
        self.features.get_mut(&handle)
    }

    pub(crate) fn remove(&mut self, handle: FeatureHandle) -> Option<Feature> {
        self.features.remove(&handle)
    }

    pub(crate) fn clear(&mut self) {
        self.features.clear();
    }

    pub fn get(&self, handle: FeatureHandle) -> Option<&Feature> {
        self.features.get(&handle)
    }

    pub fn contains(&self, handle: FeatureHandle) -> bool {
        self.features.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureHandle, &Feature)> {
        self.features.iter().map(|(h, f)| (*h, f))
    }
}
