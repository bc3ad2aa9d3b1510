//! Persistence model: the records written to and read from disk.
//!
//! # Example
//!
//! ```
//! use geomark::model::{ProjectFile, PointRecord};
//! use geomark::model::io_json::{from_json_str, to_json_string};
//!
//! let project = ProjectFile {
//!     points: vec![PointRecord {
//!         longitude: 10.0,
//!         latitude: 20.0,
//!         name: "A".into(),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//! let json = to_json_string(&project).unwrap();
//! assert_eq!(from_json_str(&json).unwrap(), project);
//! ```

pub mod io_json;
mod project;
mod settings;

pub use project::{
    AreaPointRecord, AreaRecord, CameraRecord, PointRecord, ProjectFile, DEFAULT_RESOLUTION,
};
pub use settings::{AppSettings, Theme};
