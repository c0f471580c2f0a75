use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Why a notice was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeCategory {
    /// A viewer failed to load the file.
    FileLoadFailed,
    /// A best-effort structure load of an unknown file failed.
    UnrecognizedFile,
    /// Only the structure of a volumetric file is shown.
    VolumetricPreview,
    /// A volumetric file fell back to raw text display.
    RawContentFallback,
    DirectoryUnreadable,
    /// An open viewer shows a file that no longer exists.
    ViewerStale,
    NotAFile,
}

impl NoticeCategory {
    pub fn severity(self) -> Severity {
        match self {
            NoticeCategory::FileLoadFailed => Severity::Error,
            NoticeCategory::RawContentFallback
            | NoticeCategory::DirectoryUnreadable
            | NoticeCategory::ViewerStale => Severity::Warning,
            NoticeCategory::UnrecognizedFile
            | NoticeCategory::VolumetricPreview
            | NoticeCategory::NotAFile => Severity::Info,
        }
    }
}

/// A user-facing message produced while handling a selection or a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub category: NoticeCategory,
    pub path: PathBuf,
    pub message: String,
}

impl Notice {
    pub fn new(category: NoticeCategory, path: &Path, message: impl Into<String>) -> Self {
        Self {
            category,
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.category.severity()
    }

    pub(crate) fn log(&self) {
        match self.severity() {
            Severity::Info => info!(path = %self.path.display(), "{}", self.message),
            Severity::Warning => warn!(path = %self.path.display(), "{}", self.message),
            Severity::Error => error!(path = %self.path.display(), "{}", self.message),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

pub type NoticeCallback<'a> = Box<dyn Fn(&Notice) + 'a>;
