use crate::core::tree::FileTree;
use crate::engine::config::WorkspaceConfig;
use crate::engine::error::WorkspaceError;
use crate::engine::router::WorkspaceController;
use crate::engine::session::WorkspaceSession;
use crate::engine::viewer::{StructureViewer, TextViewerHost};
use std::path::Path;
use tracing::{info, instrument};

/// Opens `root` as a workspace.
///
/// Builds the classifier from `config` (loading its rule overrides, if any) and
/// lists the root directory. Any failure here leaves no workspace open.
///
/// # Errors
///
/// Returns [`WorkspaceError::Rules`] if the rule overrides cannot be loaded and
/// [`WorkspaceError::Tree`] if the root is missing, not a directory, or cannot be
/// listed.
#[instrument(skip_all, name = "open_workspace", fields(root = %root.display()))]
pub fn open<V, H>(
    root: &Path,
    config: &WorkspaceConfig,
    structure_viewer: V,
    text_host: H,
) -> Result<WorkspaceSession<V, H>, WorkspaceError>
where
    V: StructureViewer,
    H: TextViewerHost,
{
    let classifier = config.classifier()?;
    let tree = FileTree::new(root, classifier)?;

    info!(
        root = %tree.root_path().display(),
        entries = tree.children(tree.root_id()).len(),
        "Workspace opened."
    );
    Ok(WorkspaceSession::new(tree, structure_viewer, text_host))
}

/// Tears a workspace down, closing every text viewer before the session and its
/// collaborators are dropped.
///
/// # Return
///
/// The number of text viewers that were closed.
#[instrument(skip_all, name = "close_workspace")]
pub fn close<V, H>(controller: &WorkspaceController<'_>, mut session: WorkspaceSession<V, H>) -> usize {
    let closed = controller.close_all_viewers(&mut session);
    info!(
        root = %session.root().display(),
        closed,
        "Workspace closed."
    );
    drop(session);
    closed
}
