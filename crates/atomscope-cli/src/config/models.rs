use atomscope::engine::config::WorkspaceConfig;
use std::time::Duration;

/// How the external structure viewer is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSettings {
    /// Program and leading arguments; the file path is appended.
    pub command: Vec<String>,
    /// How long a freshly spawned viewer is watched for an early failure.
    pub startup_grace: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workspace: WorkspaceConfig,
    pub viewer: ViewerSettings,
    pub tree_depth: usize,
}
