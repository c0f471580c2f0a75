use super::ids::NodeId;
use crate::core::classify::{Classification, FileKind};
use std::path::{Path, PathBuf};

/// Expansion state of a directory node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirState {
    pub(crate) children: Vec<NodeId>,
    pub(crate) expanded: bool,
    pub(crate) warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeEntry {
    Directory(DirState),
    File(Classification),
}

/// One filesystem entry in a [`FileTree`](super::FileTree).
///
/// A directory node has no children until it has been expanded. An expanded
/// directory with no children is distinguishable from an unexpanded one through
/// [`is_expanded`](Self::is_expanded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub(crate) path: PathBuf,
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) entry: NodeEntry,
}

impl TreeNode {
    pub(crate) fn directory(path: PathBuf, name: String, parent: Option<NodeId>) -> Self {
        Self {
            path,
            name,
            parent,
            entry: NodeEntry::Directory(DirState::default()),
        }
    }

    pub(crate) fn file(
        path: PathBuf,
        name: String,
        parent: Option<NodeId>,
        classification: Classification,
    ) -> Self {
        Self {
            path,
            name,
            parent,
            entry: NodeEntry::File(classification),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn entry(&self) -> &NodeEntry {
        &self.entry
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.entry, NodeEntry::Directory(_))
    }

    pub fn is_expanded(&self) -> bool {
        matches!(&self.entry, NodeEntry::Directory(state) if state.expanded)
    }

    /// The kind of a file node; `None` for directories.
    pub fn kind(&self) -> Option<FileKind> {
        self.classification().map(|c| c.kind)
    }

    pub fn classification(&self) -> Option<&Classification> {
        match &self.entry {
            NodeEntry::File(classification) => Some(classification),
            NodeEntry::Directory(_) => None,
        }
    }

    /// Child ids in presentation order. Empty for files and unexpanded directories.
    pub fn children(&self) -> &[NodeId] {
        match &self.entry {
            NodeEntry::Directory(state) => &state.children,
            NodeEntry::File(_) => &[],
        }
    }

    /// The warning recorded when this directory could not be listed.
    pub fn warning(&self) -> Option<&str> {
        match &self.entry {
            NodeEntry::Directory(state) => state.warning.as_deref(),
            NodeEntry::File(_) => None,
        }
    }

    pub(crate) fn dir_state_mut(&mut self) -> Option<&mut DirState> {
        match &mut self.entry {
            NodeEntry::Directory(state) => Some(state),
            NodeEntry::File(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::MatchedRule;

    #[test]
    fn new_directory_is_unexpanded_and_childless() {
        let node = TreeNode::directory(PathBuf::from("/w/run"), "run".into(), None);

        assert!(node.is_dir());
        assert!(!node.is_expanded());
        assert!(node.children().is_empty());
        assert_eq!(node.kind(), None);
        assert_eq!(node.warning(), None);
    }

    #[test]
    fn file_node_exposes_its_classification() {
        let node = TreeNode::file(
            PathBuf::from("/w/POSCAR"),
            "POSCAR".into(),
            None,
            Classification::new(FileKind::Structure, MatchedRule::Name),
        );

        assert!(!node.is_dir());
        assert!(!node.is_expanded());
        assert_eq!(node.kind(), Some(FileKind::Structure));
        assert_eq!(node.classification().map(|c| c.rule), Some(MatchedRule::Name));
        assert!(node.children().is_empty());
    }
}
