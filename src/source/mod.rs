//! Source module: synchronized random-access reads across the compared files.
//!
//! This module contains:
//! - [`FileSet`]: the ordered set of open file handles sharing one comparison
//!   address space
//! - [`cache`]: a read-through page cache that keeps scrolling from re-issuing
//!   a syscall per byte

pub mod cache;
mod file_set;

pub use cache::PageCache;
pub use file_set::FileSet;
