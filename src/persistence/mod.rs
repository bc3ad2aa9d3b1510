//! Project and settings file service.
//!
//! Wraps [`crate::model::io_json`] with the recovery policy the
//! application needs:
//!
//! - loading a missing project or settings file yields the defaults;
//! - loading a broken file logs the problem and yields the defaults;
//! - saving to an explicit path returns the error to the caller;
//! - saving to the default path logs the error and carries on.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::GeomarkError;
use crate::model::io_json;
use crate::model::{AppSettings, ProjectFile};

/// File name of the default project, next to the executable.
pub const DEFAULT_DATA_FILE: &str = "mapdata.json";

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Reads and writes project files.
#[derive(Clone, Debug)]
pub struct PersistenceService {
    data_path: PathBuf,
}

impl PersistenceService {
    /// Uses `data_path` as the default project file.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    /// Uses [`DEFAULT_DATA_FILE`] in the directory of the running
    /// executable, or the working directory if that is unknown.
    pub fn in_app_dir() -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(DEFAULT_DATA_FILE))
    }

    /// Path of the default project file.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Loads the default project file, recovering to an empty project.
    pub fn load_project(&self) -> ProjectFile {
        self.load_project_from(&self.data_path)
    }

    /// Loads a project, recovering to an empty project if the file is
    /// missing or unreadable.
    pub fn load_project_from(&self, path: &Path) -> ProjectFile {
        log::info!("loading project from {}", path.display());
        match io_json::read_project_json(path) {
            Ok(project) => project,
            Err(GeomarkError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                log::info!("{} does not exist, starting empty", path.display());
                ProjectFile::default()
            }
            Err(e) => {
                log::warn!("failed to load project: {e}");
                ProjectFile::default()
            }
        }
    }

    /// Saves to the default project file. Failures are logged, not
    /// returned; the return value tells whether the save happened.
    pub fn save_project(&self, project: &ProjectFile) -> bool {
        match self.save_project_to(&self.data_path, project) {
            Ok(()) => true,
            Err(_) => false,
        }
    }

    /// Saves a project to `path`.
    ///
    /// # Errors
    /// Returns the I/O or serialization error after logging it.
    pub fn save_project_to(&self, path: &Path, project: &ProjectFile) -> Result<(), GeomarkError> {
        log::info!(
            "saving {} point(s) and {} area(s) to {}",
            project.points.len(),
            project.areas.len(),
            path.display()
        );
        io_json::write_project_json(path, project).inspect_err(|e| {
            log::error!("failed to save project: {e}");
        })
    }
}

impl Default for PersistenceService {
    fn default() -> Self {
        Self::in_app_dir()
    }
}

/// Default settings location: `<config dir>/geomark/settings.json`,
/// falling back to the working directory.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SETTINGS_FILE)
}

/// Loads settings, recovering to the defaults on any failure.
pub fn load_settings(path: &Path) -> AppSettings {
    match io_json::read_settings_json(path) {
        Ok(settings) => settings,
        Err(GeomarkError::Io(e)) if e.kind() == ErrorKind::NotFound => AppSettings::default(),
        Err(e) => {
            log::warn!("failed to load settings: {e}");
            AppSettings::default()
        }
    }
}

/// Saves settings.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<(), GeomarkError> {
    io_json::write_settings_json(path, settings).inspect_err(|e| {
        log::error!("failed to save settings: {e}");
    })
}
