use crate::core::classify::{Classifier, RuleLoadError, RuleOverrides, SniffLimits};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TEXT_DISPLAY_LIMIT_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_PLAYBACK_MIN_FRAMES: usize = 2;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: &'static str,
    },
}

/// Settings for one open workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    pub sniff: SniffLimits,
    /// Cap on the bytes shown by a text viewer; `None` shows whole files.
    pub text_display_limit_bytes: Option<usize>,
    /// Trajectories with fewer frames are shown without arming playback.
    pub playback_min_frames: usize,
    /// Optional rule-override TOML file extending the classification tables.
    pub rule_overrides: Option<PathBuf>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            sniff: SniffLimits::default(),
            text_display_limit_bytes: Some(DEFAULT_TEXT_DISPLAY_LIMIT_BYTES),
            playback_min_frames: DEFAULT_PLAYBACK_MIN_FRAMES,
            rule_overrides: None,
        }
    }
}

impl WorkspaceConfig {
    pub fn builder() -> WorkspaceConfigBuilder {
        WorkspaceConfigBuilder::new()
    }

    /// Builds the classifier for this workspace, loading the rule overrides if a
    /// file was configured.
    pub fn classifier(&self) -> Result<Classifier, RuleLoadError> {
        let overrides = match &self.rule_overrides {
            Some(path) => RuleOverrides::load(path)?,
            None => RuleOverrides::default(),
        };
        Ok(Classifier::new(self.sniff, overrides))
    }
}

#[derive(Default)]
pub struct WorkspaceConfigBuilder {
    sniff_ceiling_bytes: Option<u64>,
    sniff_max_bytes: Option<usize>,
    sniff_max_lines: Option<usize>,
    text_display_limit_bytes: Option<Option<usize>>,
    playback_min_frames: Option<usize>,
    rule_overrides: Option<PathBuf>,
}

impl WorkspaceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sniff_ceiling_bytes(mut self, bytes: u64) -> Self {
        self.sniff_ceiling_bytes = Some(bytes);
        self
    }
    pub fn sniff_max_bytes(mut self, bytes: usize) -> Self {
        self.sniff_max_bytes = Some(bytes);
        self
    }
    pub fn sniff_max_lines(mut self, lines: usize) -> Self {
        self.sniff_max_lines = Some(lines);
        self
    }
    pub fn text_display_limit_bytes(mut self, limit: Option<usize>) -> Self {
        self.text_display_limit_bytes = Some(limit);
        self
    }
    pub fn playback_min_frames(mut self, frames: usize) -> Self {
        self.playback_min_frames = Some(frames);
        self
    }
    pub fn rule_overrides(mut self, path: impl AsRef<Path>) -> Self {
        self.rule_overrides = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Result<WorkspaceConfig, ConfigError> {
        let defaults = WorkspaceConfig::default();

        let sniff = SniffLimits {
            ceiling_bytes: positive(
                "sniff_ceiling_bytes",
                self.sniff_ceiling_bytes
                    .unwrap_or(defaults.sniff.ceiling_bytes),
            )?,
            max_bytes: positive(
                "sniff_max_bytes",
                self.sniff_max_bytes.unwrap_or(defaults.sniff.max_bytes),
            )?,
            max_lines: positive(
                "sniff_max_lines",
                self.sniff_max_lines.unwrap_or(defaults.sniff.max_lines),
            )?,
        };

        let text_display_limit_bytes = self
            .text_display_limit_bytes
            .unwrap_or(defaults.text_display_limit_bytes);
        if text_display_limit_bytes == Some(0) {
            return Err(ConfigError::InvalidValue {
                parameter: "text_display_limit_bytes",
                reason: "must be greater than zero or unset",
            });
        }

        Ok(WorkspaceConfig {
            sniff,
            text_display_limit_bytes,
            playback_min_frames: positive(
                "playback_min_frames",
                self.playback_min_frames
                    .unwrap_or(defaults.playback_min_frames),
            )?,
            rule_overrides: self.rule_overrides,
        })
    }
}

fn positive<T>(parameter: &'static str, value: T) -> Result<T, ConfigError>
where
    T: PartialOrd + Default,
{
    if value > T::default() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            parameter,
            reason: "must be greater than zero",
        })
    }
}
