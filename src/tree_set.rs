use core::cmp::Ordering;
use core::iter::FusedIterator;
use core::sync::atomic::AtomicUsize;
use core::sync::atomic::Ordering::Relaxed;

use crate::error::{Error, Result};
use crate::raw::{Handle, RawTree, SearchOutcome};

mod capacity;

pub use capacity::Capacity;

/// An ordered set of fixed-size byte elements.
///
/// Every element is exactly `element_size` bytes, copied into the set on
/// insert and ordered by the caller's comparator, which must define a strict
/// total order over element bytes and stay stable for the set's lifetime.
///
/// The set is single-threaded by contract: no operation blocks or performs
/// I/O, and there is no internal synchronization. The [`generation`]
/// counter is a staleness detector for externally held cursors, not a
/// synchronization primitive.
///
/// [`generation`]: TreeSet::generation
///
/// # Examples
///
/// ```
/// use garnet_tree::TreeSet;
///
/// let mut set = TreeSet::new(8, |a: &[u8], b: &[u8]| a.cmp(b));
///
/// set.insert(&3u64.to_be_bytes()).unwrap();
/// set.insert(&1u64.to_be_bytes()).unwrap();
/// set.insert(&2u64.to_be_bytes()).unwrap();
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.first().unwrap(), 1u64.to_be_bytes());
/// assert_eq!(set.last().unwrap(), 3u64.to_be_bytes());
/// ```
pub struct TreeSet<C> {
    tree: RawTree<C>,
    element_size: usize,
    count: usize,
    capacity: Option<Capacity>,
    generation: AtomicUsize,
}

/// An iterator over a [`TreeSet`]'s elements in comparator order.
///
/// Created by [`TreeSet::iter`]. Each step is an in-order successor walk:
/// worst-case logarithmic, amortized constant time per element.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, C> {
    tree: &'a RawTree<C>,
    next: Option<Handle>,
}

impl<C: Fn(&[u8], &[u8]) -> Ordering> TreeSet<C> {
    /// Makes a new, empty `TreeSet` holding `element_size`-byte elements
    /// ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::TreeSet;
    ///
    /// let mut set = TreeSet::new(2, |a: &[u8], b: &[u8]| a.cmp(b));
    /// set.insert(&[0x01, 0x02]).unwrap();
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new(element_size: usize, compare: C) -> Self {
        Self {
            tree: RawTree::new(compare),
            element_size,
            count: 0,
            capacity: None,
            generation: AtomicUsize::new(0),
        }
    }

    /// Copies `element` into the set.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValue`] if `element` is not `element_size` bytes.
    /// - [`Error::AlreadyExists`] if an equal element is present.
    /// - [`Error::Unavailable`] if the insert would exceed the capacity
    ///   bound's maximum.
    ///
    /// On any error the set is unchanged and the generation counter does not
    /// move.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, element: &[u8]) -> Result<()> {
        if element.len() != self.element_size {
            return Err(Error::InvalidValue);
        }
        let at = match self.tree.search(None, element) {
            SearchOutcome::Found(_) => return Err(Error::AlreadyExists),
            SearchOutcome::Miss(at) => at,
        };
        if let Some(bound) = self.capacity {
            if self.count + 1 > bound.maximum() {
                return Err(Error::Unavailable);
            }
        }
        self.tree.insert(at, element.into())?;
        self.count += 1;
        self.generation.fetch_add(1, Relaxed);
        Ok(())
    }

    /// Removes the element matching `probe`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no element matches.
    /// - [`Error::Unavailable`] if the removal would drop the count below
    ///   the capacity bound's minimum; the set is left unmodified.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, probe: &[u8]) -> Result<()> {
        let found = match self.tree.search(None, probe) {
            SearchOutcome::Found(handle) => handle,
            SearchOutcome::Miss(_) => return Err(Error::NotFound),
        };
        if let Some(bound) = self.capacity {
            if self.count - 1 < bound.minimum() {
                return Err(Error::Unavailable);
            }
        }
        self.tree.delete(found)?;
        self.count -= 1;
        self.generation.fetch_add(1, Relaxed);
        Ok(())
    }

    /// Returns `true` if an element matching `probe` is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::TreeSet;
    ///
    /// let mut set = TreeSet::new(8, |a: &[u8], b: &[u8]| a.cmp(b));
    /// set.insert(&7u64.to_be_bytes()).unwrap();
    ///
    /// assert!(set.contains(&7u64.to_be_bytes()));
    /// assert!(!set.contains(&8u64.to_be_bytes()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, probe: &[u8]) -> bool {
        matches!(self.tree.search(None, probe), SearchOutcome::Found(_))
    }

    /// Borrows the stored element matching `probe`.
    ///
    /// The borrow is valid until the element is removed or the set is torn
    /// down, which the borrow checker enforces through the `&self` lifetime.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no element matches.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get(&self, probe: &[u8]) -> Result<&[u8]> {
        match self.tree.search(None, probe) {
            SearchOutcome::Found(handle) => Ok(self.tree.element(handle)),
            SearchOutcome::Miss(_) => Err(Error::NotFound),
        }
    }

    /// Borrows the stored element strictly after the one matching `probe`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no element matches `probe`.
    /// - [`Error::EndOfSequence`] if the match is the last element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn next_after(&self, probe: &[u8]) -> Result<&[u8]> {
        let found = match self.tree.search(None, probe) {
            SearchOutcome::Found(handle) => handle,
            SearchOutcome::Miss(_) => return Err(Error::NotFound),
        };
        let next = self.tree.next(found)?;
        Ok(self.tree.element(next))
    }

    /// Borrows the stored element strictly before the one matching `probe`;
    /// mirror of [`Self::next_after`].
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no element matches `probe`.
    /// - [`Error::EndOfSequence`] if the match is the first element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn prev_before(&self, probe: &[u8]) -> Result<&[u8]> {
        let found = match self.tree.search(None, probe) {
            SearchOutcome::Found(handle) => handle,
            SearchOutcome::Miss(_) => return Err(Error::NotFound),
        };
        let prev = self.tree.prev(found)?;
        Ok(self.tree.element(prev))
    }

    /// Overwrites the stored bytes of the element matching `probe` in place.
    /// Not an upsert; the element's ordering position must not change, which
    /// holds whenever the comparator only reads bytes `element` agrees with
    /// `probe` on.
    pub(crate) fn update_in_place(&mut self, probe: &[u8], element: &[u8]) -> Result<()> {
        if element.len() != self.element_size {
            return Err(Error::InvalidValue);
        }
        match self.tree.search(None, probe) {
            SearchOutcome::Found(handle) => {
                self.tree.element_mut(handle).copy_from_slice(element);
                Ok(())
            }
            SearchOutcome::Miss(_) => Err(Error::NotFound),
        }
    }
}

impl<C> TreeSet<C> {
    /// Returns the number of elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the fixed element size in bytes.
    #[must_use]
    pub const fn element_size(&self) -> usize {
        self.element_size
    }

    /// Returns the generation counter.
    ///
    /// The counter increases by exactly one for every successful structural
    /// mutation (insert, remove, non-empty teardown) and never moves on a
    /// failed attempt, so a caller holding an external cursor can compare
    /// generations to detect that the set changed underneath it.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::TreeSet;
    ///
    /// let mut set = TreeSet::new(8, |a: &[u8], b: &[u8]| a.cmp(b));
    /// let before = set.generation();
    ///
    /// set.insert(&1u64.to_be_bytes()).unwrap();
    /// assert_eq!(set.generation(), before + 1);
    ///
    /// // A failed insert leaves the generation untouched.
    /// set.insert(&1u64.to_be_bytes()).unwrap_err();
    /// assert_eq!(set.generation(), before + 1);
    /// ```
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation.load(Relaxed)
    }

    /// Borrows the smallest element.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the set is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn first(&self) -> Result<&[u8]> {
        let handle = self.tree.first()?;
        Ok(self.tree.element(handle))
    }

    /// Borrows the largest element.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the set is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn last(&self) -> Result<&[u8]> {
        let handle = self.tree.last()?;
        Ok(self.tree.element(handle))
    }

    /// Gets an iterator over the elements in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::TreeSet;
    ///
    /// let mut set = TreeSet::new(1, |a: &[u8], b: &[u8]| a.cmp(b));
    /// for byte in [3u8, 1, 2] {
    ///     set.insert(&[byte]).unwrap();
    /// }
    ///
    /// let ordered: Vec<u8> = set.iter().map(|e| e[0]).collect();
    /// assert_eq!(ordered, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, C> {
        Iter {
            tree: &self.tree,
            next: self.tree.first().ok(),
        }
    }

    /// Removes every element.
    ///
    /// Equivalent to [`Self::clear_with`] with a no-op destroy hook. The
    /// capacity bound's minimum is not consulted: teardown always empties
    /// the set.
    ///
    /// # Complexity
    ///
    /// O(n), iterative; never recurses.
    pub fn clear(&mut self) {
        self.clear_with(|_| {});
    }

    /// Removes every element, invoking `on_destroy` with each element's
    /// bytes immediately before that node is freed. The hook is the seam
    /// for releasing external resources an element refers to; the set
    /// treats it as opaque.
    ///
    /// # Complexity
    ///
    /// O(n), iterative; never recurses.
    pub fn clear_with(&mut self, on_destroy: impl FnMut(&[u8])) {
        if self.count == 0 {
            return;
        }
        self.tree.clear_with(on_destroy);
        self.count = 0;
        self.generation.fetch_add(1, Relaxed);
    }
}

impl<'a, C> Iterator for Iter<'a, C> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let handle = self.next?;
        self.next = self.tree.next(handle).ok();
        Some(self.tree.element(handle))
    }
}

impl<C> FusedIterator for Iter<'_, C> {}

impl<'a, C> IntoIterator for &'a TreeSet<C> {
    type Item = &'a [u8];
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Iter<'a, C> {
        self.iter()
    }
}
