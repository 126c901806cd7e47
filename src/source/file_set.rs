//! `FileSet`: ordered random-access byte sources sharing one address space.

use super::cache::{PageCache, PAGE_SIZE};
use crate::error::{Error, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// One open file plus the metadata sampled at open time.
#[derive(Debug)]
struct Handle {
    file: File,
    path: PathBuf,
    /// Byte length, sampled once at open. Files are not resized during a
    /// session, so this never goes stale.
    length: u64,
}

/// An ordered set of open files compared over a common address space.
///
/// The *comparison extent* is the length of the first file; other files may
/// be shorter or longer. Reads past a file's own end fail with
/// [`Error::ShortRead`] rather than silently returning zeros.
///
/// Handles are released when the set is dropped, or earlier via an explicit
/// [`close`](Self::close).
#[derive(Debug)]
pub struct FileSet {
    handles: Vec<Handle>,
    total_length: u64,
    cache: PageCache,
}

impl FileSet {
    /// Open every path for binary random-access read.
    ///
    /// Construction is atomic: if any path fails to open, handles already
    /// opened for earlier paths are closed before the error propagates.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySet`] for an empty path list, [`Error::FileOpen`] naming
    /// the first path that could not be opened.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        if paths.is_empty() {
            return Err(Error::EmptySet);
        }

        // Earlier handles live in this Vec; dropping it on an open failure
        // closes them, so partial construction never leaks a descriptor.
        let mut handles = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let mut file = File::open(path).map_err(|source| Error::FileOpen {
                path: path.to_path_buf(),
                source,
            })?;
            let length = file.seek(SeekFrom::End(0))?;
            handles.push(Handle {
                file,
                path: path.to_path_buf(),
                length,
            });
        }

        let total_length = handles[0].length;
        info!(
            "opened {} file(s), comparison extent {:#x} bytes",
            handles.len(),
            total_length
        );

        Ok(Self {
            handles,
            total_length,
            cache: PageCache::new(),
        })
    }

    /// The authoritative comparison extent: the byte length of the first
    /// file, sampled at open time.
    pub const fn total_length(&self) -> u64 {
        self.total_length
    }

    /// Number of files in the set. Zero after [`close`](Self::close).
    pub fn file_count(&self) -> usize {
        self.handles.len()
    }

    /// Byte length of one file, sampled at open time.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIndex`] if `file_index` is out of range.
    pub fn file_length(&self, file_index: usize) -> Result<u64> {
        self.handles
            .get(file_index)
            .map(|handle| handle.length)
            .ok_or(Error::InvalidIndex {
                file_index,
                count: self.handles.len(),
            })
    }

    /// Path of one file, in the order the set was opened with.
    pub fn path(&self, file_index: usize) -> Option<&Path> {
        self.handles.get(file_index).map(|handle| handle.path.as_path())
    }

    /// Iterate over the opened paths in display order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.handles.iter().map(|handle| handle.path.as_path())
    }

    /// Read exactly one byte from one file at an absolute offset.
    ///
    /// Each call reseeks the handle, so no seek position leaks between
    /// calls. Repeat reads are served from the page cache with semantics
    /// identical to an uncached seek+read.
    ///
    /// # Errors
    ///
    /// [`Error::ShortRead`] if `offset` is at or beyond that file's length,
    /// [`Error::InvalidIndex`] for an out-of-range index, [`Error::Io`] for
    /// unexpected faults.
    pub fn read_byte(&mut self, file_index: usize, offset: u64) -> Result<u8> {
        let count = self.handles.len();
        let length = self
            .handles
            .get(file_index)
            .map(|handle| handle.length)
            .ok_or(Error::InvalidIndex { file_index, count })?;

        if offset >= length {
            return Err(Error::ShortRead { file_index, offset });
        }

        let block = PageCache::block_of(offset);
        let within = PageCache::offset_in_block(offset);

        if let Some(data) = self.cache.get(file_index, block) {
            return data
                .get(within)
                .copied()
                .ok_or(Error::ShortRead { file_index, offset });
        }

        let data = self.read_block(file_index, block)?;
        let byte = data.get(within).copied();
        self.cache.insert(file_index, block, data);
        byte.ok_or(Error::ShortRead { file_index, offset })
    }

    /// Release all handles. Idempotent; also discards the page cache.
    ///
    /// After closing, the set reports zero files and every read fails with
    /// [`Error::InvalidIndex`]. Dropping the set has the same effect.
    pub fn close(&mut self) {
        if !self.handles.is_empty() {
            debug!("closing {} file handle(s)", self.handles.len());
        }
        self.handles.clear();
        self.cache.clear();
    }

    /// Seek to an aligned block and read up to [`PAGE_SIZE`] bytes. A block
    /// shorter than [`PAGE_SIZE`] contains the end of the file.
    fn read_block(&mut self, file_index: usize, block: u64) -> Result<Vec<u8>> {
        let handle = &mut self.handles[file_index];
        handle.file.seek(SeekFrom::Start(block * PAGE_SIZE))?;

        let mut data = vec![0u8; PAGE_SIZE as usize];
        let mut filled = 0;
        loop {
            let read = handle.file.read(&mut data[filled..])?;
            if read == 0 {
                break;
            }
            filled += read;
            if filled == data.len() {
                break;
            }
        }
        data.truncate(filled);
        Ok(data)
    }
}

impl Drop for FileSet {
    fn drop(&mut self) {
        self.close();
    }
}
