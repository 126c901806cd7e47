//! Page cache: read-through cache for file blocks.
//!
//! The viewer re-reads the same offsets on every redraw (scrolling one line
//! re-materializes the whole viewport), so a naive seek+read per byte turns
//! into thousands of syscalls per frame on large windows. This cache holds a
//! fixed number of aligned blocks per `(file, block)` key and serves repeat
//! reads from memory.
//!
//! The cache is invisible at the [`FileSet`](super::FileSet) contract level:
//! files are not resized during a session, so a cached block is always
//! byte-identical to what a fresh read would return.

use std::collections::HashMap;

/// Size of one cached block in bytes.
pub const PAGE_SIZE: u64 = 4096;

/// Default number of blocks retained (256 KiB of cached data).
pub const DEFAULT_CAPACITY: usize = 64;

/// One cached block. A block shorter than [`PAGE_SIZE`] marks the end of the
/// file inside this block.
#[derive(Debug)]
struct Page {
    data: Vec<u8>,
    /// Logical access time, used for least-recently-used eviction.
    stamp: u64,
}

/// Statistics for cache behaviour, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads served from a cached block.
    pub hits: u64,
    /// Reads that required I/O.
    pub misses: u64,
    /// Blocks discarded to make room.
    pub evictions: u64,
}

/// Fixed-capacity LRU cache of file blocks, keyed by file index and aligned
/// block number.
#[derive(Debug)]
pub struct PageCache {
    pages: HashMap<(usize, u64), Page>,
    capacity: usize,
    clock: u64,
    stats: CacheStats,
}

impl PageCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache retaining at most `capacity` blocks.
    ///
    /// A capacity of zero disables caching entirely (every read misses).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pages: HashMap::with_capacity(capacity),
            capacity,
            clock: 0,
            stats: CacheStats::default(),
        }
    }

    /// Block number containing `offset`.
    #[inline]
    pub const fn block_of(offset: u64) -> u64 {
        offset / PAGE_SIZE
    }

    /// Byte position of `offset` within its block.
    #[inline]
    pub const fn offset_in_block(offset: u64) -> usize {
        (offset % PAGE_SIZE) as usize
    }

    /// Look up a cached block, refreshing its recency on hit.
    pub fn get(&mut self, file_index: usize, block: u64) -> Option<&[u8]> {
        self.clock += 1;
        match self.pages.get_mut(&(file_index, block)) {
            Some(page) => {
                page.stamp = self.clock;
                self.stats.hits += 1;
                Some(&page.data)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Insert a freshly-read block, evicting the least recently used block
    /// if the cache is full.
    pub fn insert(&mut self, file_index: usize, block: u64, data: Vec<u8>) {
        if self.capacity == 0 {
            return;
        }

        if self.pages.len() >= self.capacity && !self.pages.contains_key(&(file_index, block)) {
            self.evict_oldest();
        }

        self.clock += 1;
        self.pages.insert(
            (file_index, block),
            Page {
                data,
                stamp: self.clock,
            },
        );
    }

    /// Number of blocks currently cached.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the cache holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get a copy of the running statistics.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Discard all cached blocks. Statistics are retained.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Drop the block with the smallest stamp. Capacity is small, so a
    /// linear scan beats maintaining a separate recency list.
    fn evict_oldest(&mut self) {
        if let Some(key) = self
            .pages
            .iter()
            .min_by_key(|(_, page)| page.stamp)
            .map(|(key, _)| *key)
        {
            self.pages.remove(&key);
            self.stats.evictions += 1;
        }
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let mut cache = PageCache::new();
        assert!(cache.get(0, 0).is_none());

        cache.insert(0, 0, vec![1, 2, 3]);
        assert_eq!(cache.get(0, 0), Some(&[1u8, 2, 3][..]));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_keys_are_per_file() {
        let mut cache = PageCache::new();
        cache.insert(0, 5, vec![0xaa]);
        cache.insert(1, 5, vec![0xbb]);

        assert_eq!(cache.get(0, 5), Some(&[0xaa][..]));
        assert_eq!(cache.get(1, 5), Some(&[0xbb][..]));
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = PageCache::with_capacity(2);
        cache.insert(0, 0, vec![0]);
        cache.insert(0, 1, vec![1]);

        // Touch block 0 so block 1 becomes the eviction candidate.
        assert!(cache.get(0, 0).is_some());

        cache.insert(0, 2, vec![2]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(0, 1).is_none());
        assert!(cache.get(0, 0).is_some());
        assert!(cache.get(0, 2).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let mut cache = PageCache::with_capacity(0);
        cache.insert(0, 0, vec![1]);
        assert!(cache.get(0, 0).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_block_math() {
        assert_eq!(PageCache::block_of(0), 0);
        assert_eq!(PageCache::block_of(PAGE_SIZE - 1), 0);
        assert_eq!(PageCache::block_of(PAGE_SIZE), 1);
        assert_eq!(PageCache::offset_in_block(PAGE_SIZE + 7), 7);
    }
}
