//! Shared config utilities for loading/saving JSON config files, and the
//! mood-configuration entry points built on them.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::mood::MoodConfig;

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("[{label}] failed to read {path}: {source}")]
    Io {
        label: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[{label}] failed to parse {path}: {source}")]
    Parse {
        label: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("[{label}] failed to serialize config: {source}")]
    Serialize {
        label: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Generic load for any Serde config type with a `Default` implementation.
///
/// A missing file yields `T::default()`. A file that exists but cannot be
/// read or parsed is an error.
pub fn load_json_config<T: DeserializeOwned + Default>(
    path: &Path,
    label: &'static str,
) -> Result<T, ConfigFileError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                config = label,
                path = %path.display(),
                "No config file, using defaults"
            );
            return Ok(T::default());
        }
        Err(source) => {
            return Err(ConfigFileError::Io {
                label,
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = serde_json::from_str::<T>(&content).map_err(|source| ConfigFileError::Parse {
        label,
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(config = label, path = %path.display(), "Loaded config");
    Ok(config)
}

/// Generic save for any Serde config type. Creates parent directories.
pub fn save_json_config<T: Serialize>(
    path: &Path,
    config: &T,
    label: &'static str,
) -> Result<(), ConfigFileError> {
    let io_err = |source: std::io::Error| ConfigFileError::Io {
        label,
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|source| ConfigFileError::Serialize { label, source })?;
    std::fs::write(path, json).map_err(io_err)?;
    tracing::info!(config = label, path = %path.display(), "Saved config");
    Ok(())
}

/// `<platform config dir>/moodtune/moods.json`, or `./moods.json` when the
/// platform has no config dir.
pub fn default_mood_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("moodtune"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moods.json")
}

pub fn load_mood_config(path: &Path) -> Result<MoodConfig, ConfigFileError> {
    load_json_config(path, "Moods")
}

pub fn save_mood_config(path: &Path, config: &MoodConfig) -> Result<(), ConfigFileError> {
    save_json_config(path, config, "Moods")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodDefinition;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_mood_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, MoodConfig::default());
    }

    #[test]
    fn save_then_load_preserves_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("moods.json");

        let mut config = MoodConfig::with_moods(vec![
            MoodDefinition::new("Happy", ["happy"]).with_opposite("Sad"),
            MoodDefinition::new("Sad", ["sad"]),
        ]);
        config.engine.confidence_step = 30;

        save_mood_config(&path, &config).unwrap();
        assert_eq!(load_mood_config(&path).unwrap(), config);
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moods.json");
        std::fs::write(&path, "{ moods: oops").unwrap();

        let err = load_mood_config(&path).unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse { label: "Moods", .. }));
    }

    #[test]
    fn default_path_ends_with_moods_json() {
        assert!(default_mood_config_path().ends_with("moods.json"));
    }
}
