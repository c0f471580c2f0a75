//! # atomscope Core Library
//!
//! Directory-browsing support for a single-file atomic-structure viewer: given a
//! directory, present its contents, decide what kind of scientific-data file each
//! entry is, and route a selection to the viewer that can show it.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that each concern can be
//! tested in isolation.
//!
//! - **[`core`]: The Foundation.** Stateless building blocks: the file [`Classifier`]
//!   with its static rule tables and content sniffing, bounded I/O helpers, and the
//!   lazily populated [`FileTree`] arena.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. It owns the
//!   [`WorkspaceSession`], the collaborator traits for the structure viewer and text
//!   windows, the per-kind fallback plans, and the [`WorkspaceController`] that turns a
//!   selected path into exactly one viewer action.
//!
//! - **[`workflows`]: The Public API.** High-level entry points that open and close a
//!   workspace and perform bounded multi-level expansions.
//!
//! [`Classifier`]: core::classify::Classifier
//! [`FileTree`]: core::tree::FileTree
//! [`WorkspaceSession`]: engine::session::WorkspaceSession
//! [`WorkspaceController`]: engine::router::WorkspaceController

pub mod core;
pub mod engine;
pub mod workflows;
