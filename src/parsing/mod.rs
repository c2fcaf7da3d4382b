//! Line-level parsing utilities.
//!
//! This module holds the header grammar table and the [`LineClassifier`]
//! the message parser uses to tell header lines from continuation lines.

pub mod header;

// Re-export commonly used items
pub use header::{HeaderFormat, HeaderLine, LineClassifier, LineKind};
