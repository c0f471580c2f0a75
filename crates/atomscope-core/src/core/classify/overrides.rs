use super::kind::FileKind;
use super::rules::normalize_extension;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct KindRules {
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct OverrideFile {
    structure: Option<KindRules>,
    trajectory: Option<KindRules>,
    volumetric: Option<KindRules>,
    text_input: Option<KindRules>,
}

/// User-supplied additions to the static classification tables.
///
/// Overrides are consulted before the built-in tables of the same tier, so a
/// project can, for example, declare `SPOSCAR` a structure or `.cube` a
/// volumetric extension. A name or extension may be listed under one kind only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOverrides {
    names: HashMap<String, FileKind>,
    extensions: HashMap<String, FileKind>,
}

impl RuleOverrides {
    pub fn load(path: &Path) -> Result<Self, RuleLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RuleLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            RuleLoadError::Toml { source, .. } => RuleLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RuleLoadError> {
        let file: OverrideFile = toml::from_str(content).map_err(|e| RuleLoadError::Toml {
            path: "<inline>".to_string(),
            source: e,
        })?;

        let mut overrides = Self::default();
        let sections = [
            (FileKind::Structure, file.structure),
            (FileKind::Trajectory, file.trajectory),
            (FileKind::Volumetric, file.volumetric),
            (FileKind::TextInput, file.text_input),
        ];
        for (kind, rules) in sections {
            let Some(rules) = rules else { continue };
            for name in rules.names {
                overrides.insert_name(name, kind)?;
            }
            for ext in rules.extensions {
                overrides.insert_extension(&ext, kind)?;
            }
        }
        Ok(overrides)
    }

    pub fn insert_name(&mut self, name: String, kind: FileKind) -> Result<(), RuleLoadError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(RuleLoadError::Empty { kind });
        }
        insert_unique(&mut self.names, name, kind)
    }

    pub fn insert_extension(&mut self, raw: &str, kind: FileKind) -> Result<(), RuleLoadError> {
        let ext = normalize_extension(raw).ok_or(RuleLoadError::Empty { kind })?;
        insert_unique(&mut self.extensions, ext, kind)
    }

    pub fn kind_by_name(&self, file_name: &str) -> Option<FileKind> {
        self.names.get(file_name).copied()
    }

    pub fn kind_by_extension(&self, extension: &str) -> Option<FileKind> {
        self.extensions.get(extension).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len() + self.extensions.len()
    }
}

fn insert_unique(
    map: &mut HashMap<String, FileKind>,
    entry: String,
    kind: FileKind,
) -> Result<(), RuleLoadError> {
    match map.get(&entry) {
        Some(existing) if *existing != kind => Err(RuleLoadError::Conflict {
            entry,
            first: *existing,
            second: kind,
        }),
        Some(_) => Err(RuleLoadError::Duplicate { entry, kind }),
        None => {
            map.insert(entry, kind);
            Ok(())
        }
    }
}

#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("'{entry}' is listed as both {first} and {second}")]
    Conflict {
        entry: String,
        first: FileKind,
        second: FileKind,
    },
    #[error("'{entry}' is listed more than once in the {kind} rules")]
    Duplicate { entry: String, kind: FileKind },
    #[error("Empty name or extension in the {kind} rules")]
    Empty { kind: FileKind },
}
