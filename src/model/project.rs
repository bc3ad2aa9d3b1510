//! Saved-project records.
//!
//! These are plain data-transfer types mirroring the project JSON file.
//! They are deliberately permissive: colours stay as strings and
//! coordinates are not range-checked, so that [`crate::validation`] can
//! report problems instead of the parser rejecting the whole file.

use serde::{Deserialize, Serialize};

/// Default camera resolution (mercator metres per pixel) used when a
/// saved camera carries no usable zoom.
pub const DEFAULT_RESOLUTION: f64 = 40_000.0;

/// A complete saved project: camera plus ordered points and areas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProjectFile {
    pub camera: CameraRecord,
    pub points: Vec<PointRecord>,
    pub areas: Vec<AreaRecord>,
}

impl ProjectFile {
    /// Returns true if the project holds no annotations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.areas.is_empty()
    }
}

/// Viewport state in projected map units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CameraRecord {
    pub center_x: f64,
    pub center_y: f64,
    /// Inverse zoom; zero means "not set".
    pub resolution: f64,
    pub rotation: f64,
}

impl CameraRecord {
    /// Returns the resolution to restore, substituting
    /// [`DEFAULT_RESOLUTION`] for zero, negative or non-finite values.
    pub fn effective_resolution(&self) -> f64 {
        if self.resolution.is_finite() && self.resolution > 0.0 {
            self.resolution
        } else {
            DEFAULT_RESOLUTION
        }
    }
}

/// A saved point annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PointRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub name: String,
    pub color: String,
    pub size: f64,
}

impl Default for PointRecord {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            name: String::new(),
            color: "#FFFF0000".into(),
            size: 1.0,
        }
    }
}

/// A saved area vertex. Extra fields written by older saves are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AreaPointRecord {
    pub longitude: f64,
    pub latitude: f64,
}

/// A saved polygonal area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AreaRecord {
    pub name: String,
    pub points: Vec<AreaPointRecord>,
    pub fill_color: String,
    pub border_color: String,
}

impl Default for AreaRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            points: Vec::new(),
            fill_color: "#80FF0000".into(),
            border_color: "#FFFF0000".into(),
        }
    }
}
