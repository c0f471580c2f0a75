//! Provides bounded input functionality for workspace files.
//!
//! Every read performed by the workspace core is size-capped: content sniffing
//! uses a strict cap of a few kilobytes, while text viewers use a much larger
//! display limit. This module contains the shared bounded-read primitive and the
//! [`TextDocument`](text::TextDocument) model shown by secondary text viewers.

pub mod bounded;
pub mod text;
