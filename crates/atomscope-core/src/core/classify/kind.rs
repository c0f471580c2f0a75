use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The semantic category of a filesystem entry.
///
/// Every non-directory entry carries exactly one tag. The set is closed: adding a
/// variant forces every `match` over it (most importantly the dispatch plans in
/// [`crate::engine::dispatch`]) to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    /// A single- or multi-frame atomic structure (POSCAR, `.cif`, `.xyz`, ...).
    Structure,
    /// A multi-frame trajectory (XDATCAR, `.traj`, `.dcd`, ...).
    Trajectory,
    /// Volumetric grid data (CHGCAR, LOCPOT, ...).
    Volumetric,
    /// A keyworded text input or output file (INCAR, KPOINTS, `.log`, ...).
    TextInput,
    /// Nothing recognized the entry.
    Unknown,
}

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        FileKind::Structure,
        FileKind::Trajectory,
        FileKind::Volumetric,
        FileKind::TextInput,
        FileKind::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Structure => "structure",
            FileKind::Trajectory => "trajectory",
            FileKind::Volumetric => "volumetric",
            FileKind::TextInput => "text-input",
            FileKind::Unknown => "unknown",
        }
    }

    pub fn is_structure(self) -> bool {
        self == FileKind::Structure
    }

    pub fn is_trajectory(self) -> bool {
        self == FileKind::Trajectory
    }

    pub fn is_volumetric(self) -> bool {
        self == FileKind::Volumetric
    }

    pub fn is_text_input(self) -> bool {
        self == FileKind::TextInput
    }

    pub fn is_unknown(self) -> bool {
        self == FileKind::Unknown
    }

    /// Whether the structure viewer is expected to read this kind directly.
    pub fn is_readable_as_structure(self) -> bool {
        matches!(self, FileKind::Structure | FileKind::Trajectory)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown file kind '{0}'. Expected one of: structure, trajectory, volumetric, text-input, unknown.")]
pub struct ParseFileKindError(pub String);

impl FromStr for FileKind {
    type Err = ParseFileKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        FileKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseFileKindError(s.to_string()))
    }
}

/// The content marker that decided a sniffed classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentMarker {
    CifBlock,
    PoscarHeader,
    CubeGrid,
    KeywordAssignments,
}

impl ContentMarker {
    pub fn kind(self) -> FileKind {
        match self {
            ContentMarker::CifBlock | ContentMarker::PoscarHeader => FileKind::Structure,
            ContentMarker::CubeGrid => FileKind::Volumetric,
            ContentMarker::KeywordAssignments => FileKind::TextInput,
        }
    }
}

/// Which rule tier produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchedRule {
    Name,
    NamePrefix,
    Extension,
    Content(ContentMarker),
    /// No tier matched: name and extension were inconclusive and the content was
    /// ineligible, unreadable, or ambiguous.
    Unresolved,
}

impl MatchedRule {
    pub fn label(self) -> &'static str {
        match self {
            MatchedRule::Name => "name",
            MatchedRule::NamePrefix => "name-prefix",
            MatchedRule::Extension => "extension",
            MatchedRule::Content(_) => "content",
            MatchedRule::Unresolved => "unresolved",
        }
    }
}

/// A kind together with the rule that assigned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub kind: FileKind,
    pub rule: MatchedRule,
}

impl Classification {
    pub fn new(kind: FileKind, rule: MatchedRule) -> Self {
        Self { kind, rule }
    }

    pub fn unresolved() -> Self {
        Self::new(FileKind::Unknown, MatchedRule::Unresolved)
    }

    /// Classifications that depend on file content must be recomputed when the
    /// content may have changed.
    pub fn depends_on_content(&self) -> bool {
        matches!(
            self.rule,
            MatchedRule::Content(_) | MatchedRule::Unresolved
        )
    }
}
