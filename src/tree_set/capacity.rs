use core::cmp::Ordering;
use core::sync::atomic::AtomicUsize;

use crate::raw::RawTree;

use super::TreeSet;

/// Inclusive occupancy bounds for a [`TreeSet`].
///
/// Bounds are enforced per mutation: an insert that would push the count
/// above `maximum` and a removal that would drop it below `minimum` are both
/// refused with [`Error::Unavailable`], leaving the set unchanged. A freshly
/// constructed set may sit below `minimum` until inserts catch up; only
/// mutations are policed.
///
/// [`Error::Unavailable`]: crate::Error::Unavailable
///
/// # Examples
///
/// ```
/// use garnet_tree::{Capacity, Error, TreeSet};
///
/// let bound = Capacity::new(0, 2);
/// let mut set = TreeSet::with_bounds(8, bound, |a: &[u8], b: &[u8]| a.cmp(b));
///
/// set.insert(&1u64.to_be_bytes()).unwrap();
/// set.insert(&2u64.to_be_bytes()).unwrap();
/// assert_eq!(set.insert(&3u64.to_be_bytes()), Err(Error::Unavailable));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Capacity {
    minimum: usize,
    maximum: usize,
}

impl Capacity {
    /// Makes a new bound.
    ///
    /// # Panics
    ///
    /// Panics if `minimum > maximum`.
    #[must_use]
    pub const fn new(minimum: usize, maximum: usize) -> Self {
        assert!(minimum <= maximum, "`Capacity::new()` - `minimum` exceeds `maximum`!");
        Self { minimum, maximum }
    }

    /// Returns the inclusive lower bound on occupancy.
    #[must_use]
    pub const fn minimum(self) -> usize {
        self.minimum
    }

    /// Returns the inclusive upper bound on occupancy.
    #[must_use]
    pub const fn maximum(self) -> usize {
        self.maximum
    }
}

impl<C: Fn(&[u8], &[u8]) -> Ordering> TreeSet<C> {
    /// Makes a new, empty `TreeSet` whose occupancy is policed by
    /// `capacity`; see [`Capacity`].
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn with_bounds(element_size: usize, capacity: Capacity, compare: C) -> Self {
        Self {
            tree: RawTree::new(compare),
            element_size,
            count: 0,
            capacity: Some(capacity),
            generation: AtomicUsize::new(0),
        }
    }
}

impl<C> TreeSet<C> {
    /// Returns the occupancy bound, or `None` for an unbounded set.
    #[must_use]
    pub const fn capacity(&self) -> Option<Capacity> {
        self.capacity
    }
}
