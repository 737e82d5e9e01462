#![no_std]

//! `PackedVec`: a growable vector with stable indices and lowest-first slot reuse.
//!
//! Inserting a value returns a plain `usize` index. That index keeps naming
//! the same value until the value is erased, no matter what else is inserted
//! or erased in between. Erased slots are recycled before the vector grows,
//! always starting with the free slot closest to the front, which keeps live
//! values packed towards index 0.
//!
//! This crate is `no_std` compatible and only needs `alloc`.
//!
//! Storage layout: [slot 0][slot 1]...[slot capacity-1] plus an ordered index
//! of free blocks. A free block is a maximal run of vacant slots stored as
//! (`start`, `length`); two blocks never touch.
//!
//! # Performance Characteristics
//!
//! ## Time Complexity
//! F is the number of free blocks, not the number of free slots.
//! - `insert()`, `insert_with()`: O(log F) - lowest free block lookup, or amortized O(1) append
//! - `erase()`: O(log F) - neighbour lookup and merge
//! - `is_valid()`, `get()`, `try_get()`: O(log F)
//! - `at()`, `[]`, `replace()`: O(1)
//! - `len()`, `capacity()`: O(1)
//! - Iterator operations: O(capacity) worst case, free blocks are skipped whole
//!
//! ## Space Complexity
//! - One `T` per slot ever allocated; storage never shrinks until `clear()`
//! - One ordered-map entry per free block
//!
//! ## `no_std` Compatibility
//!
//! Enable the optional `std` feature to get `std::error::Error` on
//! [`PackedVecError`]:
//! ```toml
//! [dependencies]
//! packed_vec = { version = "0.1", features = ["std"] }
//! ```
//!
//! # Stable Indices and Reuse
//!
//! ```
//! # use packed_vec::PackedVec;
//! let mut packed = PackedVec::new();
//!
//! let a = packed.insert("a");
//! let b = packed.insert("b");
//! let c = packed.insert("c");
//! assert_eq!((a, b, c), (0, 1, 2));
//!
//! packed.erase(b);
//! assert!(!packed.is_valid(b));
//! assert_eq!(packed[c], "c"); // other indices are untouched
//!
//! // The hole is filled before the vector grows
//! let d = packed.insert("d");
//! assert_eq!(d, 1);
//! assert_eq!(packed.capacity(), 3);
//! assert_eq!(packed.len(), 3);
//! ```
//!
//! # Free Blocks
//!
//! Neighbouring free slots are always merged, so the free-block index stays
//! as small as the layout allows:
//!
//! ```
//! # use packed_vec::{FreeBlock, PackedVec};
//! let mut packed: PackedVec<u32> = (0..6).collect();
//!
//! packed.erase(1);
//! packed.erase(3);
//! assert_eq!(packed.free_block_count(), 2);
//!
//! packed.erase(2); // bridges the two blocks
//! let blocks: Vec<FreeBlock> = packed.free_blocks().collect();
//! assert_eq!(blocks, [FreeBlock::new(1, 3)]);
//! ```
//!
//! # Checked and Unchecked Access
//!
//! `[]`, [`PackedVec::at`] and [`PackedVec::replace`] do not look at the free
//! blocks: an erased index reads as whatever the erase policy left behind.
//! [`PackedVec::get`], [`PackedVec::try_get`] and [`PackedVec::try_erase`]
//! check occupancy too:
//!
//! ```
//! # use packed_vec::{PackedVec, PackedVecError};
//! let mut packed = PackedVec::new();
//! let id = packed.insert(String::from("x"));
//! packed.erase(id);
//!
//! assert_eq!(packed.at(id).unwrap(), ""); // cleared on erase
//! assert_eq!(packed.try_get(id), Err(PackedVecError::Vacant { index: id }));
//! assert_eq!(
//!     packed.at(5),
//!     Err(PackedVecError::IndexOutOfBounds { index: 5, capacity: 1 })
//! );
//! ```
//!
//! # Erase Policies
//!
//! [`ClearOnErase`] (the default) overwrites erased slots with `T::default()`.
//! [`KeepOnErase`] leaves the old value in place and works for types without a
//! `Default`:
//!
//! ```
//! # use packed_vec::{KeepOnErase, PackedVec};
//! struct Handle(u32);
//!
//! let mut handles: PackedVec<Handle, KeepOnErase> = PackedVec::with_policy();
//! let id = handles.insert(Handle(7));
//! handles.erase(id);
//! assert_eq!(handles.len(), 0);
//! ```

extern crate alloc;

mod core;
mod error;
mod free_blocks;
mod iter;
mod policy;

pub use crate::core::PackedVec;
pub use crate::error::{PackedVecError, Result};
pub use crate::free_blocks::FreeBlock;
pub use crate::iter::{FreeBlockIter, Indices, IntoIter, Iter, IterMut};
pub use crate::policy::{ClearOnErase, ErasePolicy, KeepOnErase};
