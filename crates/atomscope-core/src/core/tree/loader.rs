use super::ids::NodeId;
use super::listing::{DirEntryInfo, list_dir};
use super::node::{NodeEntry, TreeNode};
use crate::core::classify::{Classifier, FileKind};
use slotmap::SlotMap;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Workspace root not found: {0}")]
    RootNotFound(PathBuf),
    #[error("Workspace root is not a directory: {0}")]
    RootNotDirectory(PathBuf),
    #[error("Workspace root cannot be listed: {path}: {source}")]
    RootUnreadable { path: PathBuf, source: io::Error },
    #[error("Node does not belong to this tree")]
    UnknownNode,
    #[error("Path is not part of the workspace tree: {0}")]
    PathNotInTree(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// What a [`FileTree::refresh`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Paths that are new in the listing.
    pub added: Vec<PathBuf>,
    /// Paths dropped from the tree, including every node of a removed subtree.
    pub removed: Vec<PathBuf>,
    /// Surviving files whose kind changed after a new content sniff.
    pub reclassified: Vec<PathBuf>,
}

impl RefreshSummary {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.reclassified.is_empty()
    }
}

/// A lazily expanded directory tree rooted at a canonical path.
///
/// The tree stores its nodes in a slot map so that node ids stay valid across
/// refreshes for every entry that survives, and keeps a path index for lookups
/// by filesystem path.
#[derive(Debug, Clone)]
pub struct FileTree {
    root_path: PathBuf,
    root_id: NodeId,
    nodes: SlotMap<NodeId, TreeNode>,
    path_index: HashMap<PathBuf, NodeId>,
    classifier: Classifier,
}

impl FileTree {
    /// Opens `root` and lists its immediate children.
    ///
    /// # Arguments
    ///
    /// * `root` - The workspace directory. It is canonicalized before use.
    /// * `classifier` - Used to assign a kind to every file entry.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError`] if the root does not exist, is not a directory, or
    /// cannot be listed. These are the only fatal listing failures.
    pub fn new(root: &Path, classifier: Classifier) -> Result<Self, TreeError> {
        let root_path = root.canonicalize().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TreeError::RootNotFound(root.to_path_buf()),
            _ => TreeError::RootUnreadable {
                path: root.to_path_buf(),
                source: e,
            },
        })?;

        if !root_path.is_dir() {
            return Err(TreeError::RootNotDirectory(root_path));
        }

        let entries = list_dir(&root_path).map_err(|e| TreeError::RootUnreadable {
            path: root_path.clone(),
            source: e,
        })?;

        let name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root_path.display().to_string());

        let mut nodes = SlotMap::with_key();
        let root_id = nodes.insert(TreeNode::directory(root_path.clone(), name, None));
        let mut path_index = HashMap::new();
        path_index.insert(root_path.clone(), root_id);

        let mut tree = Self {
            root_path,
            root_id,
            nodes,
            path_index,
            classifier,
        };

        let children = entries
            .iter()
            .map(|entry| tree.insert_entry(root_id, entry))
            .collect();
        tree.set_listing(root_id, children, None);

        debug!(
            "Opened workspace tree at {:?} with {} top-level entries.",
            tree.root_path,
            tree.children(root_id).len()
        );
        Ok(tree)
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn node_by_path(&self, path: &Path) -> Option<NodeId> {
        self.path_index.get(path).copied()
    }

    /// Returns the cached kind of a file already present in the tree.
    pub fn kind_of(&self, path: &Path) -> Option<FileKind> {
        self.node_by_path(path)
            .and_then(|id| self.nodes.get(id))
            .and_then(TreeNode::kind)
    }

    /// Child ids of `id` in presentation order, or an empty slice.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(TreeNode::children).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Distance from the root; the root itself has depth zero.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.nodes.get(id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Lists the children of a directory node the first time it is called.
    ///
    /// Subsequent calls return the cached children without touching the
    /// filesystem; use [`refresh`](Self::refresh) to resynchronize. A directory
    /// that cannot be listed is marked expanded with no children and a warning.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] for a stale id and
    /// [`TreeError::NotADirectory`] for a file node.
    pub fn expand(&mut self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let node = self.directory_node(id)?;
        if node.is_expanded() {
            trace!("{:?} is already expanded.", node.path);
            return Ok(node.children().to_vec());
        }

        let dir = node.path.clone();
        match list_dir(&dir) {
            Ok(entries) => {
                let children: Vec<NodeId> = entries
                    .iter()
                    .map(|entry| self.insert_entry(id, entry))
                    .collect();
                debug!("Expanded {:?}: {} entries.", dir, children.len());
                self.set_listing(id, children.clone(), None);
                Ok(children)
            }
            Err(e) => {
                warn!("Cannot list directory {:?}: {}", dir, e);
                self.set_listing(id, Vec::new(), Some(e.to_string()));
                Ok(Vec::new())
            }
        }
    }

    /// Re-lists a directory and reconciles its children with the filesystem.
    ///
    /// Surviving entries keep their ids and, for directories, their expanded
    /// subtrees. Files whose kind was decided by content are sniffed again. An
    /// entry that changed between file and directory is reported as removed and
    /// added. Refreshing a directory that was never expanded expands it.
    ///
    /// # Errors
    ///
    /// Same as [`expand`](Self::expand).
    pub fn refresh(&mut self, id: NodeId) -> Result<RefreshSummary, TreeError> {
        let node = self.directory_node(id)?;
        if !node.is_expanded() {
            let children = self.expand(id)?;
            return Ok(RefreshSummary {
                added: children
                    .iter()
                    .filter_map(|child| self.nodes.get(*child))
                    .map(|child| child.path.clone())
                    .collect(),
                ..RefreshSummary::default()
            });
        }

        let dir = node.path.clone();
        let previous = node.children().to_vec();
        let mut summary = RefreshSummary::default();

        let entries = match list_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list directory {:?} during refresh: {}", dir, e);
                for child in previous {
                    self.remove_subtree(child, &mut summary.removed);
                }
                self.set_listing(id, Vec::new(), Some(e.to_string()));
                return Ok(summary);
            }
        };

        let mut survivors: HashMap<PathBuf, NodeId> = previous
            .iter()
            .filter_map(|child| self.nodes.get(*child).map(|n| (n.path.clone(), *child)))
            .collect();

        let mut children = Vec::with_capacity(entries.len());
        for entry in &entries {
            match survivors.remove(&entry.path) {
                Some(existing) if self.same_shape(existing, entry) => {
                    if self.resniff(existing) {
                        summary.reclassified.push(entry.path.clone());
                    }
                    children.push(existing);
                }
                Some(existing) => {
                    self.remove_subtree(existing, &mut summary.removed);
                    children.push(self.insert_entry(id, entry));
                    summary.added.push(entry.path.clone());
                }
                None => {
                    children.push(self.insert_entry(id, entry));
                    summary.added.push(entry.path.clone());
                }
            }
        }

        for vanished in survivors.into_values() {
            self.remove_subtree(vanished, &mut summary.removed);
        }

        self.set_listing(id, children, None);
        debug!(
            "Refreshed {:?}: {} added, {} removed, {} reclassified.",
            dir,
            summary.added.len(),
            summary.removed.len(),
            summary.reclassified.len()
        );
        Ok(summary)
    }

    /// Drops the subtree below a directory and marks it unexpanded.
    pub fn collapse(&mut self, id: NodeId) -> Result<(), TreeError> {
        let children = self.directory_node(id)?.children().to_vec();
        let mut dropped = Vec::new();
        for child in children {
            self.remove_subtree(child, &mut dropped);
        }
        if let Some(state) = self.nodes.get_mut(id).and_then(TreeNode::dir_state_mut) {
            state.children.clear();
            state.expanded = false;
            state.warning = None;
        }
        trace!("Collapsed node, dropping {} descendants.", dropped.len());
        Ok(())
    }

    /// Expands every ancestor of `path` and returns its node.
    ///
    /// `path` may be absolute or relative to the root and is resolved with
    /// [`entry_path`](Self::entry_path).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PathNotInTree`] if `path` lies outside the root, is
    /// hidden, or does not exist in the listing.
    pub fn reveal(&mut self, path: &Path) -> Result<NodeId, TreeError> {
        let target = self.entry_path(path);

        if let Some(id) = self.node_by_path(&target) {
            return Ok(id);
        }

        let relative = target
            .strip_prefix(&self.root_path)
            .map_err(|_| TreeError::PathNotInTree(target.clone()))?
            .to_path_buf();

        let mut current = self.root_id;
        let mut current_path = self.root_path.clone();
        for component in relative.components() {
            let Component::Normal(name) = component else {
                return Err(TreeError::PathNotInTree(target));
            };
            current_path.push(name);
            self.expand(current)?;
            current = self
                .node_by_path(&current_path)
                .ok_or_else(|| TreeError::PathNotInTree(target.clone()))?;
        }
        Ok(current)
    }

    /// The path this tree keys `path` by.
    ///
    /// Relative paths are taken relative to the root. A path that already lies
    /// under the root is used as given, so symlinks inside the workspace keep
    /// their own names. Any other spelling has its parent canonicalized, which
    /// maps a symlinked spelling of the root onto the root itself.
    pub fn entry_path(&self, path: &Path) -> PathBuf {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_path.join(path)
        };
        if self.path_index.contains_key(&absolute) {
            return absolute;
        }

        let lexical = absolute.components().all(|c| {
            matches!(
                c,
                Component::RootDir | Component::Prefix(_) | Component::Normal(_)
            )
        });
        if lexical && absolute.starts_with(&self.root_path) {
            return absolute;
        }

        match (absolute.parent(), absolute.file_name()) {
            (Some(parent), Some(name)) => match parent.canonicalize() {
                Ok(parent) => parent.join(name),
                Err(_) => absolute,
            },
            _ => absolute.canonicalize().unwrap_or(absolute),
        }
    }

    /// Every node reachable through expanded directories, depth-first in
    /// presentation order. The root itself is not included.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        let mut visible = Vec::new();
        let mut stack: Vec<NodeId> = self.children(self.root_id).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            visible.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        visible
    }

    fn directory_node(&self, id: NodeId) -> Result<&TreeNode, TreeError> {
        let node = self.nodes.get(id).ok_or(TreeError::UnknownNode)?;
        if node.is_dir() {
            Ok(node)
        } else {
            Err(TreeError::NotADirectory(node.path.clone()))
        }
    }

    fn insert_entry(&mut self, parent: NodeId, entry: &DirEntryInfo) -> NodeId {
        let node = if entry.is_dir {
            TreeNode::directory(entry.path.clone(), entry.name.clone(), Some(parent))
        } else {
            let classification = self.classifier.classify_detailed(&entry.path);
            TreeNode::file(
                entry.path.clone(),
                entry.name.clone(),
                Some(parent),
                classification,
            )
        };
        let id = self.nodes.insert(node);
        self.path_index.insert(entry.path.clone(), id);
        id
    }

    fn set_listing(&mut self, id: NodeId, children: Vec<NodeId>, warning: Option<String>) {
        if let Some(state) = self.nodes.get_mut(id).and_then(TreeNode::dir_state_mut) {
            state.children = children;
            state.expanded = true;
            state.warning = warning;
        }
    }

    fn same_shape(&self, id: NodeId, entry: &DirEntryInfo) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.is_dir() == entry.is_dir)
    }

    // Returns true when the kind of a content-classified file changed.
    fn resniff(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        let NodeEntry::File(previous) = &node.entry else {
            return false;
        };
        if !previous.depends_on_content() {
            return false;
        }

        let previous_kind = previous.kind;
        let updated = self.classifier.classify_detailed(&node.path);
        let changed = updated.kind != previous_kind;
        if changed {
            debug!(
                "{:?} reclassified from {} to {}.",
                node.path, previous_kind, updated.kind
            );
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.entry = NodeEntry::File(updated);
        }
        changed
    }

    fn remove_subtree(&mut self, id: NodeId, removed: &mut Vec<PathBuf>) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend_from_slice(node.children());
                self.path_index.remove(&node.path);
                removed.push(node.path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    const POSCAR: &str = "Si\n1.0\n5.43 0 0\n0 5.43 0\n0 0 5.43\n";
    const INCAR: &str = "ENCUT = 520\nISMEAR = 0\n";

    fn names(tree: &FileTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| tree.node(*id).unwrap().name().to_string())
            .collect()
    }

    fn workspace() -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::create_dir(dir.path().join("A")).unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::write(dir.path().join("a.cif"), "").unwrap();
        dir
    }

    fn open(dir: &TempDir) -> FileTree {
        FileTree::new(dir.path(), Classifier::default()).unwrap()
    }

    #[test]
    fn root_listing_is_ordered_with_hidden_entries_excluded() {
        let dir = workspace();
        let tree = open(&dir);

        let root = tree.root_id();

        assert_eq!(names(&tree, tree.children(root)), vec!["A", "a.cif", "b.txt"]);
        assert!(tree.node(root).unwrap().is_expanded());
        assert_eq!(tree.root_path(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn child_directories_are_not_listed_until_expanded() {
        let dir = workspace();
        fs::write(dir.path().join("A").join("POSCAR"), POSCAR).unwrap();
        let mut tree = open(&dir);
        let a = tree.children(tree.root_id())[0];

        assert!(!tree.node(a).unwrap().is_expanded());
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.node_count(), 4);

        let children = tree.expand(a).unwrap();

        assert_eq!(names(&tree, &children), vec!["POSCAR"]);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth(children[0]), Some(2));
    }

    #[test]
    fn expanding_twice_yields_the_same_children() {
        let dir = workspace();
        let mut tree = open(&dir);
        let root = tree.root_id();

        let first = tree.expand(root).unwrap();
        fs::write(dir.path().join("new.xyz"), "").unwrap();
        let second = tree.expand(root).unwrap();

        assert_eq!(first, second);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn empty_but_expanded_directories_are_distinguishable() {
        let dir = workspace();
        let mut tree = open(&dir);
        let a = tree.children(tree.root_id())[0];

        tree.expand(a).unwrap();

        let node = tree.node(a).unwrap();
        assert!(node.is_expanded());
        assert!(node.children().is_empty());
        assert!(node.warning().is_none());
    }

    #[test]
    fn files_carry_their_kind() {
        let dir = workspace();
        let tree = open(&dir);
        let root = tree.root_path().to_path_buf();

        assert_eq!(tree.kind_of(&root.join("a.cif")), Some(FileKind::Structure));
        assert_eq!(tree.kind_of(&root.join("b.txt")), Some(FileKind::TextInput));
        assert_eq!(tree.kind_of(&root.join("A")), None);
        assert_eq!(tree.kind_of(&root.join(".hidden")), None);
    }

    #[test]
    fn expand_rejects_files_and_stale_ids() {
        let dir = workspace();
        let mut tree = open(&dir);
        let file = tree.children(tree.root_id())[1];
        let a = tree.children(tree.root_id())[0];

        assert!(matches!(tree.expand(file), Err(TreeError::NotADirectory(_))));

        fs::remove_dir(dir.path().join("A")).unwrap();
        tree.refresh(tree.root_id()).unwrap();

        assert!(matches!(tree.expand(a), Err(TreeError::UnknownNode)));
    }

    #[test]
    fn unreadable_directory_gets_a_warning_and_no_children() {
        let dir = workspace();
        let mut tree = open(&dir);
        let a = tree.children(tree.root_id())[0];
        fs::remove_dir(dir.path().join("A")).unwrap();

        let children = tree.expand(a).unwrap();

        assert!(children.is_empty());
        let node = tree.node(a).unwrap();
        assert!(node.is_expanded());
        assert!(node.warning().is_some());
        // Siblings are unaffected.
        assert_eq!(tree.children(tree.root_id()).len(), 3);
    }

    #[test]
    fn refresh_reports_added_and_removed_entries() {
        let dir = workspace();
        let mut tree = open(&dir);
        let root = tree.root_id();
        let a = tree.children(root)[0];
        let root_path = tree.root_path().to_path_buf();

        fs::remove_file(dir.path().join("b.txt")).unwrap();
        fs::write(dir.path().join("CHGCAR"), "").unwrap();
        fs::write(dir.path().join(".swp"), "").unwrap();
        let summary = tree.refresh(root).unwrap();

        assert_eq!(summary.added, vec![root_path.join("CHGCAR")]);
        assert_eq!(summary.removed, vec![root_path.join("b.txt")]);
        assert!(summary.reclassified.is_empty());
        assert_eq!(names(&tree, tree.children(root)), vec!["A", "a.cif", "CHGCAR"]);
        // Surviving entries keep their ids.
        assert_eq!(tree.children(root)[0], a);
        assert_eq!(tree.node_by_path(&root_path.join("b.txt")), None);
        assert_eq!(tree.kind_of(&root_path.join("CHGCAR")), Some(FileKind::Volumetric));
    }

    #[test]
    fn refresh_without_changes_is_empty() {
        let dir = workspace();
        let mut tree = open(&dir);

        let summary = tree.refresh(tree.root_id()).unwrap();

        assert!(summary.is_empty());
    }

    #[test]
    fn refresh_reclassifies_sniffed_files_whose_content_changed() {
        let dir = workspace();
        let sniffed = dir.path().join("mystery");
        let named = dir.path().join("POSCAR");
        fs::write(&sniffed, POSCAR).unwrap();
        fs::write(&named, POSCAR).unwrap();
        let mut tree = open(&dir);
        let root_path = tree.root_path().to_path_buf();
        assert_eq!(tree.kind_of(&root_path.join("mystery")), Some(FileKind::Structure));

        fs::write(&sniffed, INCAR).unwrap();
        fs::write(&named, INCAR).unwrap();
        let summary = tree.refresh(tree.root_id()).unwrap();

        assert_eq!(summary.reclassified, vec![root_path.join("mystery")]);
        assert_eq!(tree.kind_of(&root_path.join("mystery")), Some(FileKind::TextInput));
        // Name rules do not depend on content.
        assert_eq!(tree.kind_of(&root_path.join("POSCAR")), Some(FileKind::Structure));
    }

    #[test]
    fn removing_an_expanded_directory_drops_its_whole_subtree() {
        let dir = workspace();
        fs::create_dir(dir.path().join("A").join("inner")).unwrap();
        fs::write(dir.path().join("A").join("inner").join("INCAR"), INCAR).unwrap();
        let mut tree = open(&dir);
        let root_path = tree.root_path().to_path_buf();
        let incar = tree.reveal(&root_path.join("A/inner/INCAR")).unwrap();
        assert!(tree.node(incar).is_some());
        assert_eq!(tree.node_count(), 6);

        fs::remove_dir_all(dir.path().join("A")).unwrap();
        let summary = tree.refresh(tree.root_id()).unwrap();

        assert_eq!(summary.removed.len(), 3);
        assert!(summary.removed.contains(&root_path.join("A/inner/INCAR")));
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.node_by_path(&root_path.join("A/inner")), None);
        assert!(tree.node(incar).is_none());
    }

    #[test]
    fn an_entry_that_changes_type_is_removed_and_added() {
        let dir = workspace();
        let mut tree = open(&dir);
        let root_path = tree.root_path().to_path_buf();

        fs::remove_file(dir.path().join("b.txt")).unwrap();
        fs::create_dir(dir.path().join("b.txt")).unwrap();
        let summary = tree.refresh(tree.root_id()).unwrap();

        assert_eq!(summary.added, vec![root_path.join("b.txt")]);
        assert_eq!(summary.removed, vec![root_path.join("b.txt")]);
        let id = tree.node_by_path(&root_path.join("b.txt")).unwrap();
        assert!(tree.node(id).unwrap().is_dir());
        assert_eq!(names(&tree, tree.children(tree.root_id())), vec!["A", "b.txt", "a.cif"]);
    }

    #[test]
    fn refresh_of_an_unexpanded_directory_expands_it() {
        let dir = workspace();
        fs::write(dir.path().join("A").join("OUTCAR"), "").unwrap();
        let mut tree = open(&dir);
        let a = tree.children(tree.root_id())[0];

        let summary = tree.refresh(a).unwrap();

        assert_eq!(summary.added.len(), 1);
        assert!(tree.node(a).unwrap().is_expanded());
    }

    #[test]
    fn refresh_of_a_vanished_directory_drops_children_and_warns() {
        let dir = workspace();
        fs::write(dir.path().join("A").join("OUTCAR"), "").unwrap();
        let mut tree = open(&dir);
        let a = tree.children(tree.root_id())[0];
        tree.expand(a).unwrap();

        fs::remove_dir_all(dir.path().join("A")).unwrap();
        let summary = tree.refresh(a).unwrap();

        assert_eq!(summary.removed.len(), 1);
        assert!(tree.node(a).unwrap().warning().is_some());
        assert!(tree.children(a).is_empty());
    }

    #[test]
    fn collapse_forgets_the_subtree() {
        let dir = workspace();
        fs::write(dir.path().join("A").join("OUTCAR"), "").unwrap();
        let mut tree = open(&dir);
        let a = tree.children(tree.root_id())[0];
        tree.expand(a).unwrap();
        assert_eq!(tree.node_count(), 5);

        tree.collapse(a).unwrap();

        assert!(!tree.node(a).unwrap().is_expanded());
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.expand(a).unwrap().len(), 1);
    }

    #[test]
    fn reveal_expands_ancestors_and_accepts_relative_paths() {
        let dir = workspace();
        fs::create_dir_all(dir.path().join("A").join("relax")).unwrap();
        fs::write(dir.path().join("A").join("relax").join("CONTCAR"), POSCAR).unwrap();
        let mut tree = open(&dir);

        let id = tree.reveal(Path::new("A/relax/CONTCAR")).unwrap();

        assert_eq!(tree.node(id).unwrap().name(), "CONTCAR");
        assert_eq!(tree.depth(id), Some(3));
        let a = tree.children(tree.root_id())[0];
        assert!(tree.node(a).unwrap().is_expanded());
    }

    #[test]
    fn reveal_rejects_paths_outside_the_root_and_hidden_entries() {
        let dir = workspace();
        let outside = tempdir().unwrap();
        let mut tree = open(&dir);

        assert!(matches!(
            tree.reveal(outside.path()),
            Err(TreeError::PathNotInTree(_))
        ));
        assert!(matches!(
            tree.reveal(&dir.path().join(".hidden")),
            Err(TreeError::PathNotInTree(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn reveal_keeps_symlinked_entries_under_their_own_names() {
        let dir = workspace();
        fs::create_dir(dir.path().join("common")).unwrap();
        fs::write(dir.path().join("common").join("kpts_gamma"), "Automatic\n0\nGamma\n").unwrap();
        fs::create_dir(dir.path().join("run")).unwrap();
        std::os::unix::fs::symlink("../common/kpts_gamma", dir.path().join("run").join("KPOINTS"))
            .unwrap();
        let mut tree = open(&dir);
        let kpoints = tree.root_path().join("run").join("KPOINTS");

        let id = tree.reveal(&kpoints).unwrap();

        assert_eq!(tree.node(id).unwrap().path(), kpoints.as_path());
        assert_eq!(tree.kind_of(&kpoints), Some(FileKind::TextInput));
        assert_eq!(tree.entry_path(Path::new("run/KPOINTS")), kpoints);
    }

    #[cfg(unix)]
    #[test]
    fn entry_path_maps_a_symlinked_root_spelling_onto_the_root() {
        let dir = workspace();
        let links = tempdir().unwrap();
        let alias = links.path().join("alias");
        std::os::unix::fs::symlink(dir.path(), &alias).unwrap();
        let tree = open(&dir);

        assert_eq!(
            tree.entry_path(&alias.join("b.txt")),
            tree.root_path().join("b.txt")
        );
    }

    #[test]
    fn visible_nodes_follow_expansion_state() {
        let dir = workspace();
        fs::write(dir.path().join("A").join("INCAR"), INCAR).unwrap();
        let mut tree = open(&dir);

        assert_eq!(
            names(&tree, &tree.visible_nodes()),
            vec!["A", "a.cif", "b.txt"]
        );

        let a = tree.children(tree.root_id())[0];
        tree.expand(a).unwrap();

        assert_eq!(
            names(&tree, &tree.visible_nodes()),
            vec!["A", "INCAR", "a.cif", "b.txt"]
        );
    }

    #[test]
    fn root_errors_are_fatal() {
        let dir = workspace();

        assert!(matches!(
            FileTree::new(&dir.path().join("missing"), Classifier::default()),
            Err(TreeError::RootNotFound(_))
        ));
        assert!(matches!(
            FileTree::new(&dir.path().join("a.cif"), Classifier::default()),
            Err(TreeError::RootNotDirectory(_))
        ));
    }
}
