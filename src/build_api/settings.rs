// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::{fs, path::{Path, PathBuf}, time::Duration};
use configparser::ini::Ini;
use directories::ProjectDirs;
use thiserror::Error as TeError;
use tracing::debug;

pub const SETTINGS_FILE_NAME: &str = "settings.ini";
pub const DEFAULT_API_URL: &str = "http://localhost:3000/build";
const SECTION: &str = "build_api";

#[derive(TeError, Debug)]
pub enum SettingsError {
    #[error("Can not read settings file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("Fail to parse settings file: {0}")]
    ParseError(String),
}

/// `[build_api]` section of the per-user `settings.ini`.
///
/// ```ini
/// [build_api]
/// url = https://build.example.org/build
/// max_retries = 3
/// initial_backoff_ms = 1000
/// timeout_secs = 300
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BuildApiSettings {
    pub url: String,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub timeout: Duration,
}

impl Default for BuildApiSettings {
    fn default() -> Self {
        BuildApiSettings {
            url: DEFAULT_API_URL.to_string(),
            max_retries: 3,
            initial_backoff: Duration::from_millis(1000),
            timeout: Duration::from_secs(300),
        }
    }
}

impl BuildApiSettings {
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let mut config = Ini::new();
        config.read(content.to_string())
            .map_err(SettingsError::ParseError)?;
        let mut settings = BuildApiSettings::default();
        if let Some(url) = config.get(SECTION, "url").filter(|u| !u.trim().is_empty()) {
            settings.url = url.trim().to_string();
        }
        let number = |key: &str| config.getuint(SECTION, key)
            .map_err(|err| SettingsError::ParseError(format!("{SECTION}.{key}: {err}")));
        if let Some(max_retries) = number("max_retries")? {
            settings.max_retries = u32::try_from(max_retries)
                .map_err(|_| SettingsError::ParseError(format!("{SECTION}.max_retries is too large")))?;
        }
        if let Some(backoff) = number("initial_backoff_ms")? {
            settings.initial_backoff = Duration::from_millis(backoff);
        }
        if let Some(timeout) = number("timeout_secs")? {
            settings.timeout = Duration::from_secs(timeout);
        }
        Ok(settings)
    }

    /// Loads `path`, or returns the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.is_file() {
            debug!("No settings file at {path:?}, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "CoMapeo", "comapeo-config-utils")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    pub fn load_default() -> Result<Self, SettingsError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub const TEST_SETTINGS_CONTENT: &str = r#"[build_api]
url = https://build.example.org/build
max_retries = 5
initial_backoff_ms = 250
"#;

    #[test]
    fn tst_parse_settings() {
        let settings = BuildApiSettings::from_str(TEST_SETTINGS_CONTENT).unwrap();
        assert_eq!(settings.url, "https://build.example.org/build");
        assert_eq!(settings.max_retries, 5);
        assert_eq!(settings.initial_backoff, Duration::from_millis(250));
        assert_eq!(settings.timeout, Duration::from_secs(300));
    }

    #[test]
    fn tst_bad_number_is_an_error() {
        let result = BuildApiSettings::from_str("[build_api]\nmax_retries = many\n");
        assert!(matches!(result, Err(SettingsError::ParseError(_))));
    }

    #[test]
    fn tst_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = BuildApiSettings::load(&dir.path().join(SETTINGS_FILE_NAME)).unwrap();
        assert_eq!(settings, BuildApiSettings::default());
    }
}
