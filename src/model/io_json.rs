//! JSON reading and writing for project and settings files.
//!
//! These functions surface every failure to the caller. The recovering
//! "missing or broken file means defaults" policy lives one level up in
//! [`crate::persistence`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::project::ProjectFile;
use super::settings::AppSettings;
use crate::error::GeomarkError;

/// Reads a project from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed.
pub fn read_project_json(path: &Path) -> Result<ProjectFile, GeomarkError> {
    let file = File::open(path).map_err(GeomarkError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| GeomarkError::ProjectJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a project to a JSON file (indented).
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_project_json(path: &Path, project: &ProjectFile) -> Result<(), GeomarkError> {
    let file = File::create(path).map_err(GeomarkError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, project).map_err(|source| {
        GeomarkError::ProjectJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush()?;
    Ok(())
}

/// Reads settings from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed.
pub fn read_settings_json(path: &Path) -> Result<AppSettings, GeomarkError> {
    let file = File::open(path).map_err(GeomarkError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| GeomarkError::SettingsJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes settings to a JSON file, creating the parent directory if needed.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_settings_json(path: &Path, settings: &AppSettings) -> Result<(), GeomarkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).map_err(GeomarkError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, settings).map_err(|source| {
        GeomarkError::SettingsJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush()?;
    Ok(())
}

/// Reads a project from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<ProjectFile, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a project from raw bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<ProjectFile, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a project to an indented JSON string.
pub fn to_json_string(project: &ProjectFile) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(project)
}
