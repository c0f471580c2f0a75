use atomscope::engine::config::{DEFAULT_PLAYBACK_MIN_FRAMES, DEFAULT_TEXT_DISPLAY_LIMIT_BYTES};

pub struct DefaultsConfig {
    pub viewer_command: Vec<String>,
    pub startup_grace_ms: u64,
    pub playback_min_frames: usize,
    pub text_display_limit_bytes: usize,
    pub tree_depth: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            viewer_command: vec!["ase".to_string(), "gui".to_string()],
            startup_grace_ms: 300,
            playback_min_frames: DEFAULT_PLAYBACK_MIN_FRAMES,
            text_display_limit_bytes: DEFAULT_TEXT_DISPLAY_LIMIT_BYTES,
            tree_depth: 1,
        }
    }
}
