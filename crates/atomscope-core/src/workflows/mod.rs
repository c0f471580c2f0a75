//! # Workflows Module
//!
//! High-level entry points for front-ends embedding the workspace browser.
//!
//! - **Workspace Lifecycle** ([`workspace`]) - Open a directory as a workspace and
//!   tear it down again, closing every secondary viewer first.
//! - **Browsing** ([`browse`]) - Bounded multi-level expansion for non-interactive
//!   listings, with progress reporting.

pub mod browse;
pub mod workspace;
