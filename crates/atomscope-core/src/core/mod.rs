//! # Core Module
//!
//! This module provides the stateless building blocks of the workspace browser:
//! everything that can be decided from a path, a directory listing, or a bounded read
//! of a file, without knowing anything about open windows or viewers.
//!
//! ## Architecture
//!
//! - **Classification** ([`classify`]) - Assigns a [`FileKind`](classify::FileKind) to
//!   a filesystem entry from its name, its extension and, when both are inconclusive,
//!   a bounded sniff of its content
//! - **Bounded I/O** ([`io`]) - Size-capped reads and the text documents shown by
//!   secondary text viewers
//! - **Directory Tree** ([`tree`]) - A lazily expanded arena of directory entries
//!   annotated with their classification
//!
//! ## Key Capabilities
//!
//! - **Deterministic classification** with name rules taking precedence over
//!   extension rules and content sniffing as a last, size-limited resort
//! - **Lazy traversal** whose cost is bounded by the size of one directory level
//! - **Stable presentation order** (directories first, then case-insensitive names)
//! - **Failure isolation**: unreadable entries degrade to `Unknown` or to an empty,
//!   annotated directory instead of aborting the traversal

pub mod classify;
pub mod io;
pub mod tree;
