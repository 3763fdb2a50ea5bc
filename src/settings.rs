//! Settings file loading.
//!
//! Settings hold the defaults used when deriving services: where each source
//! repository lives locally and where its archives are downloaded from. The
//! settings file path is taken from an explicit argument, else from the
//! `EMULATION_SETTINGS_FILE` environment variable, else `configuration.json`
//! in the working directory.

use crate::config::OpentronsRepository;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable selecting the settings file
pub const SETTINGS_FILE_ENV_VAR: &str = "EMULATION_SETTINGS_FILE";

/// Settings file used when nothing else is specified
pub const DEFAULT_SETTINGS_FILE: &str = "configuration.json";

/// Errors that can occur while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode settings file '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One value per source repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepositoryValues {
    pub opentrons: String,
    pub ot3_firmware: String,
    pub modules: String,
}

impl RepositoryValues {
    pub fn get(&self, repo: OpentronsRepository) -> &str {
        match repo {
            OpentronsRepository::Opentrons => &self.opentrons,
            OpentronsRepository::Ot3Firmware => &self.ot3_firmware,
            OpentronsRepository::OpentronsModules => &self.modules,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalSettings {
    pub default_folder_paths: RepositoryValues,
}

/// Archive locations: `heads` are used for `latest`, `commits` are format
/// strings containing a `{{commit-sha}}` placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceDownloadLocations {
    pub heads: RepositoryValues,
    pub commits: RepositoryValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmulationSettings {
    pub source_download_locations: SourceDownloadLocations,
}

/// Root of the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub global_settings: GlobalSettings,
    pub emulation_settings: EmulationSettings,
}

impl Settings {
    /// Load and parse the settings file at `path`
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        info!("Loading settings from: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Pick the settings file: explicit path, environment variable, default
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match std::env::var_os(SETTINGS_FILE_ENV_VAR) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from(DEFAULT_SETTINGS_FILE),
        }
    }

    /// Resolve the settings path and load it
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        Self::from_file(&Self::resolve_path(explicit))
    }

    /// Download location of `repo` at the head of its default branch
    pub fn head(&self, repo: OpentronsRepository) -> &str {
        self.emulation_settings.source_download_locations.heads.get(repo)
    }

    /// Download location format string of `repo` at a given commit
    pub fn commit_format(&self, repo: OpentronsRepository) -> &str {
        self.emulation_settings.source_download_locations.commits.get(repo)
    }

    /// Local checkout of `repo`
    pub fn default_folder_path(&self, repo: OpentronsRepository) -> &str {
        self.global_settings.default_folder_paths.get(repo)
    }
}
