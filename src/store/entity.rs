//! Live point and area entities.

use super::ids::{AreaId, PointId};
use crate::geo::{Argb, GeoCoord};
use crate::map::FeatureHandle;

/// Default display size of a point marker.
pub const DEFAULT_POINT_SIZE: f64 = 1.0;

/// Default name given to a new area.
pub const DEFAULT_AREA_NAME: &str = "Area";

/// Default semi-transparent red area fill.
pub const DEFAULT_AREA_FILL: Argb = Argb::new(0x80, 0xFF, 0x00, 0x00);

/// Default opaque red area border.
pub const DEFAULT_AREA_BORDER: Argb = Argb::RED;

/// A labelled point on the map.
///
/// `feature` is a back-reference to the marker drawn by the
/// [`MapAdapter`](crate::map::MapAdapter); the point never owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub(crate) id: PointId,
    pub position: GeoCoord,
    pub name: String,
    pub color: Argb,
    pub size: f64,
    pub(crate) feature: Option<FeatureHandle>,
}

impl Point {
    /// Creates an unnamed red point of default size.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            id: PointId(0),
            position: GeoCoord::new(latitude, longitude),
            name: String::new(),
            color: Argb::RED,
            size: DEFAULT_POINT_SIZE,
            feature: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: Argb) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Store-assigned identity. Zero until the point is committed.
    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn latitude(&self) -> f64 {
        self.position.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.position.longitude
    }

    /// Handle of the marker currently drawn for this point, if any.
    pub fn feature(&self) -> Option<FeatureHandle> {
        self.feature
    }

    /// Text shown in point lists.
    pub fn display_text(&self) -> String {
        if self.name.is_empty() {
            format!("{:.4}, {:.4}", self.latitude(), self.longitude())
        } else {
            format!(
                "{} ({:.4}, {:.4})",
                self.name,
                self.latitude(),
                self.longitude()
            )
        }
    }
}

/// Fill and border colours of an area polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaStyle {
    pub fill: Argb,
    pub border: Argb,
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self {
            fill: DEFAULT_AREA_FILL,
            border: DEFAULT_AREA_BORDER,
        }
    }
}

/// A named polygon. Vertex order is the ring's winding order; the ring is
/// closed implicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    pub(crate) id: AreaId,
    pub name: String,
    pub vertices: Vec<GeoCoord>,
    pub style: AreaStyle,
    pub(crate) feature: Option<FeatureHandle>,
}

impl Area {
    /// Creates an area with the default name and colours.
    pub fn new(vertices: Vec<GeoCoord>) -> Self {
        Self {
            id: AreaId(0),
            name: DEFAULT_AREA_NAME.to_string(),
            vertices,
            style: AreaStyle::default(),
            feature: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_style(mut self, style: AreaStyle) -> Self {
        self.style = style;
        self
    }

    /// Store-assigned identity. Zero until the area is committed.
    pub fn id(&self) -> AreaId {
        self.id
    }

    /// Handle of the polygon currently drawn for this area, if any.
    pub fn feature(&self) -> Option<FeatureHandle> {
        self.feature
    }

    /// An area needs at least three vertices to enclose anything.
    pub fn is_complete(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Text shown in area lists.
    pub fn display_text(&self) -> String {
        format!("{} ({} points)", self.name, self.vertices.len())
    }
}
