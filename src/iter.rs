use alloc::collections::btree_map;
use alloc::vec;
use core::iter::{Enumerate, FusedIterator};
use core::slice;

use crate::core::PackedVec;
use crate::free_blocks::FreeBlock;

/// Iterator over the free blocks of a `PackedVec`, lowest start first
///
/// This iterator implements `Clone`.
#[derive(Clone, Debug)]
pub struct FreeBlockIter<'a> {
    inner: btree_map::Iter<'a, usize, usize>,
}

impl<'a> FreeBlockIter<'a> {
    pub(crate) fn new(inner: btree_map::Iter<'a, usize, usize>) -> Self {
        Self { inner }
    }
}

impl Iterator for FreeBlockIter<'_> {
    type Item = FreeBlock;

    fn next(&mut self) -> Option<Self::Item> {
        let (&start, &length) = self.inner.next()?;
        Some(FreeBlock::new(start, length))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for FreeBlockIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (&start, &length) = self.inner.next_back()?;
        Some(FreeBlock::new(start, length))
    }
}

impl ExactSizeIterator for FreeBlockIter<'_> {}
impl FusedIterator for FreeBlockIter<'_> {}

/// Owning iterator over free blocks, used when a `PackedVec` is consumed
#[derive(Debug)]
pub(crate) struct FreeBlockIntoIter {
    inner: btree_map::IntoIter<usize, usize>,
}

impl FreeBlockIntoIter {
    pub(crate) fn new(inner: btree_map::IntoIter<usize, usize>) -> Self {
        Self { inner }
    }
}

impl Iterator for FreeBlockIntoIter {
    type Item = FreeBlock;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, length) = self.inner.next()?;
        Some(FreeBlock::new(start, length))
    }
}

/// Walks enumerated slots and jumps over every free block it meets.
///
/// Blocks arrive in ascending order and slots are visited in ascending order,
/// so only the next upcoming block has to be tracked.
#[derive(Clone, Debug)]
struct Occupied<S, F> {
    slots: Enumerate<S>,
    free: F,
    next_free: Option<FreeBlock>,
    remaining: usize,
}

impl<S: Iterator, F: Iterator<Item = FreeBlock>> Occupied<S, F> {
    fn new(slots: S, mut free: F, remaining: usize) -> Self {
        let next_free = free.next();
        Self {
            slots: slots.enumerate(),
            free,
            next_free,
            remaining,
        }
    }
}

impl<S: Iterator, F: Iterator<Item = FreeBlock>> Iterator for Occupied<S, F> {
    type Item = (usize, S::Item);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let (index, slot) = self.slots.next()?;
            if let Some(block) = self.next_free.filter(|block| block.contains(index)) {
                let skip = block.end() - index - 1;
                if skip > 0 {
                    self.slots.nth(skip - 1);
                }
                self.next_free = self.free.next();
                continue;
            }
            self.remaining -= 1;
            return Some((index, slot));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Iterator over occupied slots of a `PackedVec` as `(index, &value)`
#[derive(Debug)]
pub struct Iter<'a, T> {
    inner: Occupied<slice::Iter<'a, T>, FreeBlockIter<'a>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slots: &'a [T], free: FreeBlockIter<'a>, len: usize) -> Self {
        Self {
            inner: Occupied::new(slots.iter(), free, len),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over occupied slots of a `PackedVec` as `(index, &mut value)`
#[derive(Debug)]
pub struct IterMut<'a, T> {
    inner: Occupied<slice::IterMut<'a, T>, FreeBlockIter<'a>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(slots: &'a mut [T], free: FreeBlockIter<'a>, len: usize) -> Self {
        Self {
            inner: Occupied::new(slots.iter_mut(), free, len),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (usize, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Iterator over the indices of occupied slots
#[derive(Debug)]
pub struct Indices<'a, T> {
    inner: Iter<'a, T>,
}

impl<'a, T> Indices<'a, T> {
    pub(crate) fn new(inner: Iter<'a, T>) -> Self {
        Self { inner }
    }
}

impl<T> Iterator for Indices<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(index, _)| index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> Clone for Indices<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> ExactSizeIterator for Indices<'_, T> {}
impl<T> FusedIterator for Indices<'_, T> {}

/// Owning iterator over occupied slots as `(index, value)`
///
/// Values left behind in erased slots are dropped without being yielded.
#[derive(Debug)]
pub struct IntoIter<T> {
    inner: Occupied<vec::IntoIter<T>, FreeBlockIntoIter>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T, P> IntoIterator for &'a PackedVec<T, P> {
    type Item = (usize, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, P> IntoIterator for &'a mut PackedVec<T, P> {
    type Item = (usize, &'a mut T);
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, P> IntoIterator for PackedVec<T, P> {
    type Item = (usize, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let len = self.len();
        IntoIter {
            inner: Occupied::new(self.slots.into_iter(), self.free.into_blocks(), len),
        }
    }
}
