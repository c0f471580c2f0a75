use thiserror::Error;

use super::config::ConfigError;
use crate::core::classify::RuleLoadError;
use crate::core::tree::TreeError;

/// A failure reported by a viewer collaborator. Carries a human-readable cause
/// that is shown to the user next to the offending path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ViewerError {
    reason: String,
}

impl ViewerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Fatal errors while opening a workspace. Once a workspace is open, selection
/// failures are reported as notices instead.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Cannot open workspace tree: {source}")]
    Tree {
        #[from]
        source: TreeError,
    },

    #[error("Invalid workspace configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Cannot load classification rules: {source}")]
    Rules {
        #[from]
        source: RuleLoadError,
    },
}
