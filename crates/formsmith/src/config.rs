//! Studio settings, read from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use formsmith_spec::FALLBACK_FILE_NAME;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the CLI prints previews and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frontend {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Name used when saving a form without a document name.
    pub fallback_file_name: String,
    /// Directory new forms are saved into; the working directory if unset.
    pub output_dir: Option<PathBuf>,
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub log_filter: String,
    pub frontend: Frontend,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            fallback_file_name: FALLBACK_FILE_NAME.to_string(),
            output_dir: None,
            log_filter: "warn".to_string(),
            frontend: Frontend::Text,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("fallback_file_name must end in .json, got '{0}'")]
    FallbackNotJson(String),
}

/// `<config_dir>/formsmith/config.toml` for the current user.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "formsmith").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load settings. An explicit path must exist; the default location is
/// optional and falls back to built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<StudioConfig, ConfigError> {
    let config = match explicit {
        Some(path) => read_config(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => read_config(&path)?,
            _ => StudioConfig::default(),
        },
    };
    if !formsmith_spec::has_json_extension(&config.fallback_file_name) {
        return Err(ConfigError::FallbackNotJson(config.fallback_file_name));
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<StudioConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config: StudioConfig = toml::from_str("frontend = \"json\"\n").expect("parse");
        assert_eq!(config.frontend, Frontend::Json);
        assert_eq!(config.fallback_file_name, "form.json");
        assert_eq!(config.log_filter, "warn");
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn explicit_path_must_exist_and_parse() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "frontend = 3").expect("write");
        assert!(matches!(
            load_config(Some(&bad)),
            Err(ConfigError::Parse { .. })
        ));

        let good = dir.path().join("good.toml");
        fs::write(
            &good,
            "fallback_file_name = \"untitled.json\"\noutput_dir = \"forms\"\n",
        )
        .expect("write");
        let config = load_config(Some(&good)).expect("load");
        assert_eq!(config.fallback_file_name, "untitled.json");
        assert_eq!(config.output_dir, Some(PathBuf::from("forms")));
    }

    #[test]
    fn fallback_name_must_be_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "fallback_file_name = \"form.txt\"\n").expect("write");
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::FallbackNotJson(_))
        ));
    }
}
