//! # Classification Module
//!
//! Assigns a semantic [`FileKind`] to a filesystem entry so that a selection can be
//! routed to the viewer able to show it.
//!
//! ## Resolution Order
//!
//! The first tier that matches wins:
//!
//! 1. Exact file name (case-sensitive): user overrides, then the built-in tables
//! 2. Name prefix (`AECCAR*` is volumetric)
//! 3. Extension (case-insensitive, last suffix): user overrides, then built-in tables
//! 4. Content sniff, for regular files below the size ceiling ([`sniff`])
//! 5. Otherwise [`FileKind::Unknown`]
//!
//! The built-in tables are pairwise disjoint, so the order only breaks ties that
//! cannot occur; it is what makes a name like `movie.xyz` a trajectory even though
//! `.xyz` is a structure extension.
//!
//! Classification never fails. An entry that cannot be inspected is `Unknown`.

mod kind;
pub mod overrides;
pub mod rules;
pub mod sniff;

pub use kind::{Classification, ContentMarker, FileKind, MatchedRule, ParseFileKindError};
pub use overrides::{RuleLoadError, RuleOverrides};

use crate::core::io::bounded::read_bounded;
use sniff::SniffVerdict;
use std::path::Path;
use tracing::{debug, trace};

/// Size limits for content sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffLimits {
    /// Files of this size or larger are never sniffed.
    pub ceiling_bytes: u64,
    /// At most this many bytes are read from the head of the file.
    pub max_bytes: usize,
    /// At most this many lines of the head are inspected.
    pub max_lines: usize,
}

impl Default for SniffLimits {
    fn default() -> Self {
        Self {
            ceiling_bytes: 100_000,
            max_bytes: 8192,
            max_lines: 10,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    limits: SniffLimits,
    overrides: RuleOverrides,
}

impl Classifier {
    pub fn new(limits: SniffLimits, overrides: RuleOverrides) -> Self {
        Self { limits, overrides }
    }

    pub fn limits(&self) -> SniffLimits {
        self.limits
    }

    pub fn classify(&self, path: &Path) -> FileKind {
        self.classify_detailed(path).kind
    }

    /// Classifies `path` and reports which rule tier decided.
    pub fn classify_detailed(&self, path: &Path) -> Classification {
        if let Some(classification) = self.classify_by_path(path) {
            return classification;
        }
        self.classify_by_content(path)
    }

    /// Name and extension tiers only; performs no I/O.
    pub fn classify_by_path(&self, path: &Path) -> Option<Classification> {
        let file_name = path.file_name()?.to_str()?;

        if let Some(kind) = self
            .overrides
            .kind_by_name(file_name)
            .or_else(|| rules::kind_by_name(file_name))
        {
            return Some(Classification::new(kind, MatchedRule::Name));
        }

        if let Some(kind) = rules::kind_by_name_prefix(file_name) {
            return Some(Classification::new(kind, MatchedRule::NamePrefix));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(rules::normalize_extension)?;

        self.overrides
            .kind_by_extension(&extension)
            .or_else(|| rules::kind_by_extension(&extension))
            .map(|kind| Classification::new(kind, MatchedRule::Extension))
    }

    fn classify_by_content(&self, path: &Path) -> Classification {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return Classification::unresolved(),
            Err(e) => {
                trace!("Cannot stat {:?} for sniffing: {}", path, e);
                return Classification::unresolved();
            }
        };

        if metadata.len() >= self.limits.ceiling_bytes {
            trace!(
                "{:?} is {} bytes, above the sniffing ceiling of {}.",
                path,
                metadata.len(),
                self.limits.ceiling_bytes
            );
            return Classification::unresolved();
        }

        let head = match read_bounded(path, self.limits.max_bytes) {
            Ok(head) => head,
            Err(e) => {
                debug!("Cannot read {:?} for sniffing: {}", path, e);
                return Classification::unresolved();
            }
        };

        match sniff::sniff(&head.bytes, self.limits.max_lines) {
            SniffVerdict::Match { kind, marker } => {
                debug!("Sniffed {:?} as {} ({:?}).", path, kind, marker);
                Classification::new(kind, MatchedRule::Content(marker))
            }
            SniffVerdict::Ambiguous(_) | SniffVerdict::NoMatch => Classification::unresolved(),
        }
    }

    pub fn is_structure(&self, path: &Path) -> bool {
        self.classify(path).is_structure()
    }

    pub fn is_trajectory(&self, path: &Path) -> bool {
        self.classify(path).is_trajectory()
    }

    pub fn is_volumetric(&self, path: &Path) -> bool {
        self.classify(path).is_volumetric()
    }

    pub fn is_text_input(&self, path: &Path) -> bool {
        self.classify(path).is_text_input()
    }
}
