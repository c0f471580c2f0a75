//! # Engine Module
//!
//! This module implements the stateful side of the workspace browser: the open
//! session, the routing of selections to viewers, and the lifecycle of the text
//! viewer windows the router creates.
//!
//! ## Overview
//!
//! A [`WorkspaceSession`](session::WorkspaceSession) holds one open workspace: its
//! directory tree, the registry of open text viewers, and the viewer collaborators.
//! The [`WorkspaceController`](router::WorkspaceController) is the only component
//! that mutates the viewer registry. It resolves a selected path to a
//! [`FileKind`](crate::core::classify::FileKind), walks that kind's fallback plan,
//! and turns every collaborator failure into a [`Notice`](notice::Notice).
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Sniffing limits, text display cap, playback threshold
//! - **Collaborators** ([`viewer`]) - Traits for the structure viewer and text windows
//! - **Fallback Plans** ([`dispatch`]) - Ordered `(attempt, on failure)` steps per kind
//! - **Session State** ([`session`]) - The open workspace and its viewer registry
//! - **Routing** ([`router`]) - Selection handling, refresh reconciliation and teardown
//! - **Notices** ([`notice`]) - User-facing outcomes of failures and fallbacks
//! - **Progress Monitoring** ([`progress`]) - Progress events for long expansions
//! - **Error Handling** ([`error`]) - Collaborator and workspace-initialization errors
//!
//! ## Key Capabilities
//!
//! - **Exactly one terminal action** per selection, enforced by exhaustive plans
//! - **At most one text viewer per canonical path**, reloaded on repeated selection
//! - **Failure containment**: nothing a viewer reports escapes the router
//! - **Idempotent teardown** of every open viewer

pub mod config;
pub mod dispatch;
pub mod error;
pub mod notice;
pub mod progress;
pub mod router;
pub mod session;
pub mod viewer;
