//! Bounded directory printing.
//!
//! This module turns a decoded directory into human-readable text under the
//! saturating-formatter contract: callers supply a fixed-capacity buffer,
//! the printer writes at most that many bytes, and the returned length is
//! what the text would have occupied unbounded.
//!
//! # Key Concepts
//!
//! - **Saturating accumulation**: every fragment is appended through one
//!   bounded accumulator; truncation never loses the logical length, so a
//!   zero-capacity call is a valid measuring pass.
//!
//! - **Layered dispatch**: the orchestrator phrases the canonical tag
//!   sequence inline, offers each custom tag to the special-case table,
//!   and falls back to generic type-directed rendering.
//!
//! - **No failure path**: absence, type mismatches, and unknown datatypes
//!   all degrade to skipped or marker output, never to an error.

pub(crate) mod buffer;
mod directory;
mod escape;
mod render;
mod special;

pub use directory::{format_directory, print_directory, PrintFlags};
pub use escape::{print_ascii, print_ascii_tag};

pub(crate) use directory::is_canonical_tag;
