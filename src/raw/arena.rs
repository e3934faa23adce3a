use alloc::vec::Vec;

use super::handle::Handle;

/// Slab of node slots addressed by [`Handle`].
///
/// Freed slots are recycled through a free list, so handles are only ever
/// reused after the node they named has been destroyed.
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `element` and returns its handle, or `None` once the handle
    /// space is exhausted. The caller surfaces exhaustion as an allocation
    /// failure rather than a crash.
    pub(crate) fn alloc(&mut self, element: T) -> Option<Handle> {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()] = Some(element);
            Some(h)
        } else if self.slots.len() < Handle::MAX {
            self.slots.push(Some(element));
            Some(Handle::from_index(self.slots.len() - 1))
        } else {
            None
        }
    }

    /// Returns `true` if `handle` names a live element.
    #[inline]
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        matches!(self.slots.get(handle.to_index()), Some(Some(_)))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
