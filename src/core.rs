use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Index, IndexMut};

use crate::error::{PackedVecError, Result};
use crate::free_blocks::FreeBlocks;
use crate::iter::{FreeBlockIter, Indices, Iter, IterMut};
use crate::policy::{ClearOnErase, ErasePolicy};

/// A growable vector whose indices stay put, refilling the lowest freed slots
/// before it grows.
///
/// `P` decides what erasing does to the old value, see [`ErasePolicy`].
pub struct PackedVec<T, P = ClearOnErase> {
    pub(crate) slots: Vec<T>,
    pub(crate) free: FreeBlocks,
    policy: PhantomData<fn() -> P>,
}

impl<T> PackedVec<T> {
    /// Creates an empty `PackedVec` that clears slots on erase.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_policy()
    }
}

impl<T, P> PackedVec<T, P> {
    /// Creates an empty `PackedVec` with the erase policy named by `P`.
    ///
    /// ```
    /// # use packed_vec::{KeepOnErase, PackedVec};
    /// let mut names: PackedVec<&str, KeepOnErase> = PackedVec::with_policy();
    /// let id = names.insert("ada");
    /// names.erase(id);
    /// assert_eq!(names[id], "ada"); // stale, but still there
    /// ```
    #[must_use]
    pub const fn with_policy() -> Self {
        Self {
            slots: Vec::new(),
            free: FreeBlocks::new(),
            policy: PhantomData,
        }
    }

    /// Stores `value` and returns its index.
    ///
    /// The lowest free index is reused if there is one; otherwise a new slot is
    /// appended. O(log F) where F is the number of free blocks.
    #[must_use = "the returned index is the only way to reach the value"]
    #[allow(clippy::indexing_slicing)] // free indices are always below capacity
    pub fn insert(&mut self, value: T) -> usize {
        match self.free.take_first() {
            Some(index) => {
                self.slots[index] = value;
                index
            }
            None => {
                self.slots.push(value);
                self.slots.len() - 1
            }
        }
    }

    /// Builds a value with `make` and stores it, see [`PackedVec::insert`].
    ///
    /// If `make` panics the container is left untouched.
    #[must_use = "the returned index is the only way to reach the value"]
    pub fn insert_with<F>(&mut self, make: F) -> usize
    where
        F: FnOnce() -> T,
    {
        let value = make();
        self.insert(value)
    }

    /// Builds a value with the fallible `make` and stores it.
    ///
    /// # Errors
    ///
    /// Returns whatever `make` returns on failure. No slot is claimed in that
    /// case and the free blocks are unchanged.
    pub fn try_insert_with<F, E>(&mut self, make: F) -> core::result::Result<usize, E>
    where
        F: FnOnce() -> core::result::Result<T, E>,
    {
        let value = make()?;
        Ok(self.insert(value))
    }

    /// Overwrites the value at `index` and returns the previous one.
    ///
    /// The free blocks are not consulted: `index` is expected to be occupied.
    /// Replacing a vacant slot stores a value that the next insert will
    /// overwrite.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`PackedVec::capacity`].
    #[allow(clippy::indexing_slicing)]
    pub fn replace(&mut self, index: usize, value: T) -> T {
        mem::replace(&mut self.slots[index], value)
    }

    /// Returns whether `index` currently holds a live value. O(log F).
    #[must_use]
    pub fn is_valid(&self, index: usize) -> bool {
        index < self.slots.len() && !self.free.contains(index)
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.free_len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever allocated, occupied or free.
    ///
    /// Only grows, until [`PackedVec::clear`].
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of free slots waiting to be reused.
    #[must_use]
    pub fn free_len(&self) -> usize {
        self.free.free_len()
    }

    #[must_use]
    pub fn free_block_count(&self) -> usize {
        self.free.block_count()
    }

    /// Iterator over the free blocks, lowest start first.
    #[must_use]
    pub fn free_blocks(&self) -> FreeBlockIter<'_> {
        self.free.iter()
    }

    fn check_bounds(&self, index: usize) -> Result<()> {
        if index >= self.slots.len() {
            Err(PackedVecError::IndexOutOfBounds {
                index,
                capacity: self.slots.len(),
            })
        } else {
            Ok(())
        }
    }

    fn check_occupied(&self, index: usize) -> Result<()> {
        self.check_bounds(index)?;
        if self.free.contains(index) {
            return Err(PackedVecError::Vacant { index });
        }
        Ok(())
    }

    /// Bounds-checked access to the slot at `index`.
    ///
    /// Only the bounds are checked: an erased slot is returned as the erase
    /// policy left it. Use [`PackedVec::try_get`] to reject vacant slots too.
    ///
    /// # Errors
    ///
    /// Returns `PackedVecError::IndexOutOfBounds` if `index >= capacity()`.
    #[allow(clippy::indexing_slicing)] // Bounds checked above
    pub fn at(&self, index: usize) -> Result<&T> {
        self.check_bounds(index)?;
        Ok(&self.slots[index])
    }

    /// Mutable variant of [`PackedVec::at`].
    ///
    /// # Errors
    ///
    /// Returns `PackedVecError::IndexOutOfBounds` if `index >= capacity()`.
    #[allow(clippy::indexing_slicing)] // Bounds checked above
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_bounds(index)?;
        Ok(&mut self.slots[index])
    }

    /// Returns the value at `index` if the slot is occupied.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.try_get(index).ok()
    }

    /// Returns the value at `index` mutably if the slot is occupied.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.try_get_mut(index).ok()
    }

    /// Occupancy-checked access to the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns `PackedVecError::IndexOutOfBounds` if `index >= capacity()`,
    /// or `PackedVecError::Vacant` if `index` has been erased.
    #[allow(clippy::indexing_slicing)] // Bounds checked above
    pub fn try_get(&self, index: usize) -> Result<&T> {
        self.check_occupied(index)?;
        Ok(&self.slots[index])
    }

    /// Mutable variant of [`PackedVec::try_get`].
    ///
    /// # Errors
    ///
    /// Same as [`PackedVec::try_get`].
    #[allow(clippy::indexing_slicing)] // Bounds checked above
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_occupied(index)?;
        Ok(&mut self.slots[index])
    }

    /// Returns the slot at `index` without any check.
    ///
    /// # Safety
    ///
    /// `index` must be below [`PackedVec::capacity`]. Occupancy is not
    /// required for soundness; a vacant slot yields what the erase policy left.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // SAFETY: caller guarantees index < capacity
        unsafe { self.slots.get_unchecked(index) }
    }

    /// Mutable variant of [`PackedVec::get_unchecked`].
    ///
    /// # Safety
    ///
    /// `index` must be below [`PackedVec::capacity`].
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: caller guarantees index < capacity
        unsafe { self.slots.get_unchecked_mut(index) }
    }

    /// Drops every slot and every free block. All issued indices become stale
    /// and the next insert returns 0.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Reserves backing storage for at least `additional` more appended slots.
    ///
    /// [`PackedVec::capacity`] counts allocated slots, not reserved memory, so
    /// it does not change.
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Iterator over occupied slots as `(index, &value)`.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.slots, self.free.iter(), self.len())
    }

    /// Iterator over occupied slots as `(index, &mut value)`.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len();
        IterMut::new(&mut self.slots, self.free.iter(), len)
    }

    /// Iterator over the indices of occupied slots.
    #[must_use]
    pub fn indices(&self) -> Indices<'_, T> {
        Indices::new(self.iter())
    }
}

impl<T, P: ErasePolicy<T>> PackedVec<T, P> {
    /// Frees the slot at `index` so a later insert can reuse it.
    ///
    /// The free block below and the one above are merged with `index` when
    /// they touch it, so free blocks always stay maximal. O(log F).
    ///
    /// `index` must be occupied. This is only asserted in debug builds:
    /// erasing a vacant index in a release build corrupts the free blocks and
    /// lets two later inserts share a slot. Use [`PackedVec::try_erase`] when
    /// occupancy is not tracked by the caller.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`PackedVec::capacity`], and in debug
    /// builds if `index` is vacant.
    #[allow(clippy::indexing_slicing)]
    pub fn erase(&mut self, index: usize) {
        debug_assert!(
            !self.free.contains(index),
            "Cannot erase vacant index {index}"
        );
        P::on_erase(&mut self.slots[index]);
        self.free.release(index);
    }

    /// Frees the slot at `index` after checking that it is occupied.
    ///
    /// # Errors
    ///
    /// Returns `PackedVecError::IndexOutOfBounds` if `index >= capacity()`,
    /// or `PackedVecError::Vacant` if `index` is already free. Nothing is
    /// changed in either case.
    pub fn try_erase(&mut self, index: usize) -> Result<()> {
        self.check_occupied(index)?;
        self.erase(index);
        Ok(())
    }
}

impl<T, P> Index<usize> for PackedVec<T, P> {
    type Output = T;

    /// Unchecked for occupancy: an erased slot yields what the erase policy
    /// left there.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`PackedVec::capacity`].
    #[allow(clippy::indexing_slicing)]
    fn index(&self, index: usize) -> &T {
        &self.slots[index]
    }
}

impl<T, P> IndexMut<usize> for PackedVec<T, P> {
    #[allow(clippy::indexing_slicing)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }
}

impl<T, P> Default for PackedVec<T, P> {
    fn default() -> Self {
        Self::with_policy()
    }
}

impl<T: Clone, P> Clone for PackedVec<T, P> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            free: self.free.clone(),
            policy: PhantomData,
        }
    }
}

impl<T: fmt::Debug, P> fmt::Debug for PackedVec<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two containers are equal when they have the same capacity and the same
/// values at the same occupied indices. Leftovers in free slots are ignored.
impl<T: PartialEq, P> PartialEq for PackedVec<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self.len() == other.len()
            && self.iter().eq(other.iter())
    }
}

impl<T: Eq, P> Eq for PackedVec<T, P> {}

impl<T, P> Extend<T> for PackedVec<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            let _ = self.insert(value);
        }
    }
}

impl<T, P> FromIterator<T> for PackedVec<T, P> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut packed = Self::with_policy();
        packed.extend(iter);
        packed
    }
}
