//! Engine module: the byte-comparison viewport.
//!
//! This module contains:
//! - [`Row`]: one line of the comparison, with the byte read from each file
//!   at a single offset and a cross-file equality flag
//! - [`materialize`]: map a scroll position and viewport height to the rows
//!   currently visible
//!
//! The engine is stateless: every call receives the scroll position and
//! height from the caller, reads through [`FileSet`](crate::FileSet), and
//! returns fresh [`Row`] values. Presentation (colors, hex/binary layout)
//! is layered on top by the caller.

mod row;
mod viewport;

pub use row::Row;
pub use viewport::{materialize, max_scroll_offset};
