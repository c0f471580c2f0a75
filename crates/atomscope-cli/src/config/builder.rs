use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, ViewerSettings};
use crate::cli::SettingsArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use atomscope::engine::config::WorkspaceConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Resolves the effective configuration.
///
/// Precedence, highest first: command-line flags, `-S key=value` pairs, the
/// config file, built-in defaults. Flags that only some commands have (tree
/// depth, viewer command) are applied by those commands on the returned value.
pub fn build_config(config_path: Option<&Path>, settings: &SettingsArgs) -> Result<AppConfig> {
    let file_config = FileConfig::locate_and_load(config_path)?;
    resolve(file_config, settings)
}

fn resolve(file_config: FileConfig, settings: &SettingsArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = apply_set_values(file_config, &settings.set_values)?;

    let sniff = file_config.sniff.take().unwrap_or_default();
    let text = file_config.text.take().unwrap_or_default();
    let viewer = file_config.viewer.take().unwrap_or_default();
    let rules = file_config.rules.take().unwrap_or_default();
    let tree = file_config.tree.take().unwrap_or_default();

    let text_limit = if text.unlimited.unwrap_or(false) {
        None
    } else {
        Some(
            text.display_limit_bytes
                .unwrap_or(defaults.text_display_limit_bytes),
        )
    };

    let mut builder = WorkspaceConfig::builder()
        .text_display_limit_bytes(text_limit)
        .playback_min_frames(
            viewer
                .playback_min_frames
                .unwrap_or(defaults.playback_min_frames),
        );
    if let Some(bytes) = sniff.ceiling_bytes {
        builder = builder.sniff_ceiling_bytes(bytes);
    }
    if let Some(bytes) = sniff.max_bytes {
        builder = builder.sniff_max_bytes(bytes);
    }
    if let Some(lines) = sniff.max_lines {
        builder = builder.sniff_max_lines(lines);
    }
    if let Some(path) = settings.rules.as_ref().or(rules.path.as_ref()) {
        builder = builder.rule_overrides(path);
    }
    let workspace = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let command = viewer.command.unwrap_or(defaults.viewer_command);
    if command.is_empty() {
        return Err(CliError::Config(ParseError::EmptyCommand.to_string()));
    }

    let config = AppConfig {
        workspace,
        viewer: ViewerSettings {
            command,
            startup_grace: Duration::from_millis(
                viewer.startup_grace_ms.unwrap_or(defaults.startup_grace_ms),
            ),
        },
        tree_depth: tree.depth.unwrap_or(defaults.tree_depth),
    };
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "sniff.ceiling-bytes" => {
                config.sniff.get_or_insert_with(Default::default).ceiling_bytes =
                    Some(parse_number(key, value_str)?);
            }
            "sniff.max-bytes" => {
                config.sniff.get_or_insert_with(Default::default).max_bytes =
                    Some(parse_number(key, value_str)?);
            }
            "sniff.max-lines" => {
                config.sniff.get_or_insert_with(Default::default).max_lines =
                    Some(parse_number(key, value_str)?);
            }
            "text.display-limit-bytes" => {
                config
                    .text
                    .get_or_insert_with(Default::default)
                    .display_limit_bytes = Some(parse_number(key, value_str)?);
            }
            "text.unlimited" => {
                config.text.get_or_insert_with(Default::default).unlimited = Some(
                    parser::parse_bool(value_str).map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "viewer.command" => {
                config.viewer.get_or_insert_with(Default::default).command = Some(
                    parser::parse_command(value_str)
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "viewer.startup-grace-ms" => {
                config
                    .viewer
                    .get_or_insert_with(Default::default)
                    .startup_grace_ms = Some(parse_number(key, value_str)?);
            }
            "viewer.playback-min-frames" => {
                config
                    .viewer
                    .get_or_insert_with(Default::default)
                    .playback_min_frames = Some(parse_number(key, value_str)?);
            }
            "rules.path" => {
                config.rules.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value_str));
            }
            "tree.depth" => {
                config.tree.get_or_insert_with(Default::default).depth =
                    Some(parse_number(key, value_str)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unknown configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid integer value for {}: {}", key, value)))
}
