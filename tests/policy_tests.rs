use std::cell::Cell;
use std::rc::Rc;

use packed_vec::{ClearOnErase, ErasePolicy, KeepOnErase, PackedVec};

/// Counts how many times it has been dropped through a shared counter.
#[derive(Default)]
struct DropProbe {
    drops: Option<Rc<Cell<usize>>>,
}

impl DropProbe {
    fn new(drops: &Rc<Cell<usize>>) -> Self {
        Self {
            drops: Some(Rc::clone(drops)),
        }
    }
}

impl Drop for DropProbe {
    fn drop(&mut self) {
        if let Some(drops) = &self.drops {
            drops.set(drops.get() + 1);
        }
    }
}

#[test]
fn test_clear_on_erase_is_the_default() {
    let mut packed = PackedVec::new();
    let index = packed.insert(String::from("secret"));
    packed.erase(index);

    assert_eq!(packed[index], "");
}

#[test]
fn test_clear_on_erase_drops_immediately() {
    let drops = Rc::new(Cell::new(0));
    let mut packed: PackedVec<DropProbe, ClearOnErase> = PackedVec::with_policy();
    let index = packed.insert(DropProbe::new(&drops));

    packed.erase(index);
    assert_eq!(drops.get(), 1);

    let _ = packed.insert(DropProbe::default());
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_keep_on_erase_leaves_stale_value() {
    let mut packed: PackedVec<&str, KeepOnErase> = PackedVec::with_policy();
    let index = packed.insert("stale");
    packed.erase(index);

    assert_eq!(packed[index], "stale");
    assert_eq!(packed.at(index), Ok(&"stale"));
    assert_eq!(packed.get(index), None);
    assert!(!packed.is_valid(index));
}

#[test]
fn test_keep_on_erase_drops_on_reuse() {
    let drops = Rc::new(Cell::new(0));
    let mut packed: PackedVec<DropProbe, KeepOnErase> = PackedVec::with_policy();
    let index = packed.insert(DropProbe::new(&drops));

    packed.erase(index);
    assert_eq!(drops.get(), 0);

    assert_eq!(packed.insert(DropProbe::new(&drops)), index);
    assert_eq!(drops.get(), 1);

    packed.clear();
    assert_eq!(drops.get(), 2);
}

#[test]
fn test_keep_on_erase_without_default() {
    struct NoDefault(u32);

    let mut packed: PackedVec<NoDefault, KeepOnErase> = PackedVec::with_policy();
    let first = packed.insert(NoDefault(1));
    let second = packed.insert(NoDefault(2));
    packed.erase(first);

    assert_eq!(packed.insert(NoDefault(3)), first);
    assert_eq!(packed[first].0, 3);
    assert_eq!(packed[second].0, 2);
}

#[test]
fn test_into_iter_drops_stale_values_once() {
    let drops = Rc::new(Cell::new(0));
    let mut packed: PackedVec<DropProbe, KeepOnErase> = PackedVec::with_policy();
    for _ in 0..4 {
        let _ = packed.insert(DropProbe::new(&drops));
    }
    packed.erase(1);
    packed.erase(2);

    let live: Vec<(usize, DropProbe)> = packed.into_iter().collect();
    assert_eq!(drops.get(), 2);
    assert_eq!(
        live.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
        [0, 3]
    );

    drop(live);
    assert_eq!(drops.get(), 4);
}

/// Erase policy that scrambles the slot, to check custom policies plug in.
struct Poison;

impl ErasePolicy<i64> for Poison {
    fn on_erase(slot: &mut i64) {
        *slot = -1;
    }
}

#[test]
fn test_custom_policy() {
    let mut packed: PackedVec<i64, Poison> = (10..13).collect();
    packed.erase(1);

    assert_eq!(packed[1], -1);
    assert_eq!(packed.len(), 2);
}
