use super::error::ViewerError;
use crate::core::io::text::TextDocument;
use std::path::Path;

/// What a structure viewer reports after loading a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummary {
    /// Number of frames loaded, or `None` when the viewer cannot tell (for
    /// example an external program that reads the file itself).
    pub frames: Option<usize>,
}

impl FrameSummary {
    pub fn single() -> Self {
        Self { frames: Some(1) }
    }

    pub fn frames(frames: usize) -> Self {
        Self {
            frames: Some(frames),
        }
    }

    pub fn unknown() -> Self {
        Self { frames: None }
    }
}

/// The structure-viewer collaborator.
///
/// Implementations render atomic structures and trajectories and own all parsing
/// of coordinate data; the workspace only hands them paths. Every method reports
/// failure through a [`ViewerError`] whose reason is shown to the user.
pub trait StructureViewer {
    /// The in-memory structure produced by [`extract_structure_from`](Self::extract_structure_from).
    type Structure;

    /// Loads `path` as a single- or multi-frame structure and displays it.
    fn load_structure(&mut self, path: &Path) -> Result<FrameSummary, ViewerError>;

    /// Loads every frame of a trajectory and displays it.
    fn load_trajectory(&mut self, path: &Path) -> Result<FrameSummary, ViewerError>;

    /// Activates frame playback for the trajectory loaded from `path`.
    fn start_playback(&mut self, path: &Path);

    /// Extracts only the atomic structure from a file that carries more than
    /// that, such as a volumetric grid.
    fn extract_structure_from(&mut self, path: &Path) -> Result<Self::Structure, ViewerError>;

    /// Displays a structure obtained from [`extract_structure_from`](Self::extract_structure_from).
    fn display(&mut self, path: &Path, structure: Self::Structure);
}

/// One open secondary text viewer window.
pub trait TextWindow {
    /// Replaces the displayed content with `document`.
    fn show(&mut self, document: &TextDocument);

    fn close(&mut self);
}

/// Creates text viewer windows.
pub trait TextViewerHost {
    fn create_window(&mut self, path: &Path) -> Result<Box<dyn TextWindow>, ViewerError>;
}
