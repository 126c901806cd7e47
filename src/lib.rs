//! # Hexheat
//!
//! A terminal viewer for byte-by-byte comparison of binary files.
//!
//! Hexheat scrolls over a virtual address space the size of the first input
//! file, reads the byte at each visible offset from every file on demand,
//! and highlights the offsets where the files diverge — without ever
//! loading a whole file into memory.
//!
//! ## Core Concepts
//!
//! - **Comparison extent**: the first file's length defines the scrollable
//!   address space; other files may be shorter or longer
//! - **Absent marker**: a file shorter than the extent has no byte at an
//!   offset; that is rendered distinctly and never compares equal
//! - **Stateless viewport**: [`materialize`] is a pure function of the file
//!   set, a scroll offset, and a height — the UI shell owns all state
//!
//! ## Example
//!
//! ```rust,ignore
//! use hexheat::{materialize, FileSet};
//!
//! let mut files = FileSet::open(&["a.bin", "b.bin"])?;
//! let rows = materialize(&mut files, 0, 24)?;
//! for row in rows {
//!     println!("{:#06x} equal={}", row.offset, row.all_equal);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod engine;
pub mod error;
pub mod format;
pub mod source;

// Re-exports for convenience
pub use app::{Viewer, ViewerConfig};
pub use engine::{materialize, max_scroll_offset, Row};
pub use error::{Error, Result};
pub use format::{DisplayBase, WordSize};
pub use source::FileSet;
