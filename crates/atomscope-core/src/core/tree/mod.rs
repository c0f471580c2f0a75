//! Lazily populated directory tree.
//!
//! A [`FileTree`] is an arena of [`TreeNode`]s rooted at a canonical directory.
//! Only the root listing is read eagerly; every other directory is listed the first
//! time it is expanded, so opening a workspace costs one directory level no matter
//! how large the tree below it is.

mod ids;
mod listing;
mod loader;
mod node;

pub use ids::NodeId;
pub use listing::{DirEntryInfo, entry_order, is_hidden, list_dir};
pub use loader::{FileTree, RefreshSummary, TreeError};
pub use node::{DirState, NodeEntry, TreeNode};
