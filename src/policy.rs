/// What happens to the contents of a slot when its index is erased.
///
/// The slot itself stays in storage either way; the policy only decides
/// whether the old value is dropped right away or lingers until the slot is
/// reused.
pub trait ErasePolicy<T> {
    fn on_erase(slot: &mut T);
}

/// Drops the erased value immediately and leaves `T::default()` in its slot.
///
/// Costs one extra write per erase and requires `T: Default`, but erased
/// slots never keep resources (or stale data) alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearOnErase;

impl<T: Default> ErasePolicy<T> for ClearOnErase {
    fn on_erase(slot: &mut T) {
        *slot = T::default();
    }
}

/// Leaves the erased value in place until the slot is reused or the container
/// is cleared.
///
/// Works for any `T`. Reading an erased index through the unchecked accessors
/// returns the stale value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepOnErase;

impl<T> ErasePolicy<T> for KeepOnErase {
    #[inline]
    fn on_erase(_slot: &mut T) {}
}
