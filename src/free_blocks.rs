use alloc::collections::BTreeMap;

use crate::iter::{FreeBlockIntoIter, FreeBlockIter};

/// A maximal run of unoccupied slots, covering `start..start + length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreeBlock {
    pub start: usize,
    pub length: usize,
}

impl FreeBlock {
    #[must_use]
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// One past the last index of the block.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end()
    }
}

/// Ordered index of free blocks, keyed by block start.
///
/// Stored blocks never overlap and never touch: releasing an index next to an
/// existing block grows that block, and releasing the last gap between two
/// blocks fuses them into one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FreeBlocks {
    /// start -> length
    blocks: BTreeMap<usize, usize>,
    /// Sum of all block lengths.
    free_len: usize,
}

impl FreeBlocks {
    pub(crate) const fn new() -> Self {
        Self {
            blocks: BTreeMap::new(),
            free_len: 0,
        }
    }

    /// Number of stored blocks.
    pub(crate) fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of free slots across all blocks.
    pub(crate) fn free_len(&self) -> usize {
        self.free_len
    }

    /// Sums the block lengths from scratch, for checking the cached `free_len`.
    #[cfg(test)]
    pub(crate) fn recount(&self) -> usize {
        self.blocks.values().sum()
    }

    /// Hands out the lowest free index, shrinking or dropping its block.
    ///
    /// Returns `None` when there is no free slot.
    pub(crate) fn take_first(&mut self) -> Option<usize> {
        let (start, length) = self.blocks.pop_first()?;
        if length > 1 {
            self.blocks.insert(start + 1, length - 1);
        }
        self.free_len -= 1;
        Some(start)
    }

    /// Marks `index` as free, merging with the blocks directly below and above.
    ///
    /// `index` must not already be covered by a block.
    pub(crate) fn release(&mut self, index: usize) {
        debug_assert!(
            !self.contains(index),
            "Index {index} released twice into the free block index"
        );

        let below = self
            .blocks
            .range(..index)
            .next_back()
            .map(|(&start, &length)| FreeBlock::new(start, length))
            .filter(|block| block.end() == index);
        let above = self.blocks.remove(&(index + 1));

        match (below, above) {
            (Some(below), Some(above_length)) => {
                self.blocks.insert(below.start, below.length + 1 + above_length);
            }
            (Some(below), None) => {
                self.blocks.insert(below.start, below.length + 1);
            }
            (None, Some(above_length)) => {
                self.blocks.insert(index, above_length + 1);
            }
            (None, None) => {
                self.blocks.insert(index, 1);
            }
        }
        self.free_len += 1;
    }

    /// Returns whether `index` lies inside one of the stored blocks.
    pub(crate) fn contains(&self, index: usize) -> bool {
        self.blocks
            .range(..=index)
            .next_back()
            .is_some_and(|(&start, &length)| FreeBlock::new(start, length).contains(index))
    }

    pub(crate) fn iter(&self) -> FreeBlockIter<'_> {
        FreeBlockIter::new(self.blocks.iter())
    }

    pub(crate) fn into_blocks(self) -> FreeBlockIntoIter {
        FreeBlockIntoIter::new(self.blocks.into_iter())
    }

    pub(crate) fn clear(&mut self) {
        self.blocks.clear();
        self.free_len = 0;
    }
}
