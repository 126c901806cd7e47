//! Error types for file access and viewport materialization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the comparison core.
#[derive(Error, Debug)]
pub enum Error {
    /// A supplied path could not be opened for reading.
    ///
    /// Fatal at startup: construction of a [`FileSet`](crate::FileSet) fails
    /// atomically and no handles are left open.
    #[error("cannot open {path}: {source}")]
    FileOpen {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying OS error.
        source: std::io::Error,
    },

    /// A read offset is at or beyond a file's own length.
    ///
    /// Inside the comparison extent this is recovered by the viewport engine
    /// as an absent marker; it only surfaces to callers reading past the
    /// extent programmatically.
    #[error("read past end of file #{file_index} at offset {offset:#x}")]
    ShortRead {
        /// Index of the file in the set.
        file_index: usize,
        /// The offset that could not be read.
        offset: u64,
    },

    /// A file index was out of range of the opened set.
    ///
    /// This is a contract violation, not a runtime condition: callers are
    /// expected to respect [`FileSet::file_count`](crate::FileSet::file_count).
    #[error("file index {file_index} out of range (set has {count} files)")]
    InvalidIndex {
        /// The offending index.
        file_index: usize,
        /// Number of files in the set.
        count: usize,
    },

    /// A comparison needs at least one file.
    #[error("at least one file is required")]
    EmptySet,

    /// An unexpected I/O fault (device error, permission revoked mid-session).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check whether this error is a recoverable end-of-file condition.
    ///
    /// The viewport engine uses this to distinguish "this file is simply
    /// shorter than the comparison extent" from faults that must propagate.
    pub const fn is_short_read(&self) -> bool {
        matches!(self, Self::ShortRead { .. })
    }
}

/// Convenient crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;
