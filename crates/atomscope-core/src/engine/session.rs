use super::viewer::TextWindow;
use crate::core::io::text::TextDocument;
use crate::core::tree::FileTree;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The live state of one open text viewer window.
pub struct ViewerHandle {
    path: PathBuf,
    window: Box<dyn TextWindow>,
    document: TextDocument,
    reloads: usize,
    stale: bool,
}

impl ViewerHandle {
    pub(crate) fn open(path: PathBuf, mut window: Box<dyn TextWindow>, document: TextDocument) -> Self {
        window.show(&document);
        Self {
            path,
            window,
            document,
            reloads: 0,
            stale: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The content most recently shown in the window.
    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    /// How many times the window was reloaded by a repeated selection.
    pub fn reloads(&self) -> usize {
        self.reloads
    }

    /// Whether a refresh observed the file vanish after it was opened.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub(crate) fn reload(&mut self, document: TextDocument) {
        self.window.show(&document);
        self.document = document;
        self.reloads += 1;
        self.stale = false;
    }

    pub(crate) fn set_stale(&mut self, stale: bool) {
        self.stale = stale;
    }

    pub(crate) fn close(mut self) {
        self.window.close();
    }
}

impl fmt::Debug for ViewerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerHandle")
            .field("path", &self.path)
            .field("reloads", &self.reloads)
            .field("stale", &self.stale)
            .finish_non_exhaustive()
    }
}

/// Open text viewers keyed by canonical path. Holds at most one handle per path.
#[derive(Debug, Default)]
pub struct ViewerRegistry {
    handles: BTreeMap<PathBuf, ViewerHandle>,
}

impl ViewerRegistry {
    pub fn get(&self, path: &Path) -> Option<&ViewerHandle> {
        self.handles.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.handles.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewerHandle> {
        self.handles.values()
    }

    pub(crate) fn get_mut(&mut self, path: &Path) -> Option<&mut ViewerHandle> {
        self.handles.get_mut(path)
    }

    pub(crate) fn insert(&mut self, handle: ViewerHandle) {
        self.handles.insert(handle.path.clone(), handle);
    }

    pub(crate) fn remove(&mut self, path: &Path) -> Option<ViewerHandle> {
        self.handles.remove(path)
    }

    pub(crate) fn drain(&mut self) -> Vec<ViewerHandle> {
        std::mem::take(&mut self.handles).into_values().collect()
    }
}

/// Everything that belongs to one open workspace.
///
/// The session owns the directory tree, the registry of open text viewers and
/// both viewer collaborators. Its registry is only mutated through
/// [`WorkspaceController`](super::router::WorkspaceController).
pub struct WorkspaceSession<V, H> {
    pub(crate) root: PathBuf,
    pub(crate) tree: FileTree,
    pub(crate) viewers: ViewerRegistry,
    pub(crate) structure_viewer: V,
    pub(crate) text_host: H,
}

impl<V, H> WorkspaceSession<V, H> {
    pub fn new(tree: FileTree, structure_viewer: V, text_host: H) -> Self {
        Self {
            root: tree.root_path().to_path_buf(),
            tree,
            viewers: ViewerRegistry::default(),
            structure_viewer,
            text_host,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    /// Mutable tree access for presentation-only operations such as
    /// [`FileTree::reveal`] and [`FileTree::collapse`]. Refreshes should go
    /// through the controller so that open viewers are reconciled.
    pub fn tree_mut(&mut self) -> &mut FileTree {
        &mut self.tree
    }

    pub fn viewers(&self) -> &ViewerRegistry {
        &self.viewers
    }

    pub fn structure_viewer(&self) -> &V {
        &self.structure_viewer
    }

    pub fn structure_viewer_mut(&mut self) -> &mut V {
        &mut self.structure_viewer
    }

    pub fn text_host(&self) -> &H {
        &self.text_host
    }
}

impl<V, H> fmt::Debug for WorkspaceSession<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceSession")
            .field("root", &self.root)
            .field("nodes", &self.tree.node_count())
            .field("viewers", &self.viewers)
            .finish_non_exhaustive()
    }
}
