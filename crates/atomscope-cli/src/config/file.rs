use crate::error::{CliError, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSniffConfig {
    pub ceiling_bytes: Option<u64>,
    pub max_bytes: Option<usize>,
    pub max_lines: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileTextConfig {
    pub display_limit_bytes: Option<usize>,
    /// Shows whole files regardless of `display-limit-bytes`.
    pub unlimited: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileViewerConfig {
    pub command: Option<Vec<String>>,
    pub startup_grace_ms: Option<u64>,
    pub playback_min_frames: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRulesConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileTreeConfig {
    pub depth: Option<usize>,
}

/// The user's TOML settings file. Every field is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub sniff: Option<FileSniffConfig>,
    pub text: Option<FileTextConfig>,
    pub viewer: Option<FileViewerConfig>,
    pub rules: Option<FileRulesConfig>,
    pub tree: Option<FileTreeConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `explicit` if given, otherwise the per-user config file if one exists.
    ///
    /// An explicit path that cannot be read is an error; a missing per-user file
    /// just yields the defaults.
    pub fn locate_and_load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found; using defaults.");
                Ok(Self::default())
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "atomscope", "atomscope")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
