//! Application settings.

use serde::{Deserialize, Serialize};

/// UI colour theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Settings loaded once at startup and saved once at shutdown.
///
/// Passed explicitly into the controller rather than held globally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AppSettings {
    pub theme: Theme,
    pub last_save_directory: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.last_save_directory.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let settings = AppSettings {
            theme: Theme::Dark,
            last_save_directory: "/tmp/maps".into(),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"Theme":"Dark","LastSaveDirectory":"/tmp/maps"}"#);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"Theme":"Dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.last_save_directory, "");
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
