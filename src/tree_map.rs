use core::cmp::Ordering;
use core::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::tree_set::{self, Capacity, TreeSet};

/// An ordered map from fixed-size byte keys to fixed-size byte values.
///
/// Each entry is stored as one contiguous block: `key_size` key bytes
/// followed by `value_size` value bytes. The map is a thin layer over
/// [`TreeSet`]; the comparator orders entries and must read only the
/// leading `key_size` bytes of each argument, because lookups probe the
/// tree with bare keys.
///
/// # Examples
///
/// ```
/// use garnet_tree::TreeMap;
///
/// let mut map = TreeMap::new(8, 8, |a: &[u8], b: &[u8]| a[..8].cmp(&b[..8]));
///
/// let mut entry = [0u8; 16];
/// entry[..8].copy_from_slice(&87u64.to_be_bytes());
/// entry[8..].copy_from_slice(&83_621u64.to_be_bytes());
/// map.insert(&entry).unwrap();
///
/// let value = map.get(&87u64.to_be_bytes()).unwrap();
/// assert_eq!(u64::from_be_bytes(value.try_into().unwrap()), 83_621);
/// ```
pub struct TreeMap<C> {
    key_size: usize,
    value_size: usize,
    set: TreeSet<C>,
}

/// An iterator over a [`TreeMap`]'s `(key, value)` pairs in key order.
///
/// Created by [`TreeMap::iter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, C> {
    entries: tree_set::Iter<'a, C>,
    key_size: usize,
}

impl<C: Fn(&[u8], &[u8]) -> Ordering> TreeMap<C> {
    /// Makes a new, empty `TreeMap` with `key_size`-byte keys and
    /// `value_size`-byte values ordered by `compare`.
    ///
    /// `compare` receives entry slices and must derive its ordering from the
    /// first `key_size` bytes alone.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new(key_size: usize, value_size: usize, compare: C) -> Self {
        Self {
            key_size,
            value_size,
            set: TreeSet::new(key_size + value_size, compare),
        }
    }

    /// Makes a new, empty `TreeMap` whose occupancy is policed by
    /// `capacity`; see [`Capacity`].
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn with_bounds(key_size: usize, value_size: usize, capacity: Capacity, compare: C) -> Self {
        Self {
            key_size,
            value_size,
            set: TreeSet::with_bounds(key_size + value_size, capacity, compare),
        }
    }

    /// Copies `entry` (key bytes followed by value bytes) into the map.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValue`] if `entry` is not `key_size + value_size`
    ///   bytes.
    /// - [`Error::AlreadyExists`] if the key is present; use [`Self::set`]
    ///   to overwrite.
    /// - [`Error::Unavailable`] if the insert would exceed the capacity
    ///   bound's maximum.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, entry: &[u8]) -> Result<()> {
        self.set.insert(entry)
    }

    /// Removes the entry for `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValue`] if `key` is not `key_size` bytes.
    /// - [`Error::NotFound`] if the key is absent.
    /// - [`Error::Unavailable`] if the removal would drop the count below
    ///   the capacity bound's minimum.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, key: &[u8]) -> Result<()> {
        if key.len() != self.key_size {
            return Err(Error::InvalidValue);
        }
        self.set.remove(key)
    }

    /// Returns `true` if `key` has an entry.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        key.len() == self.key_size && self.set.contains(key)
    }

    /// Borrows the value stored for `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValue`] if `key` is not `key_size` bytes.
    /// - [`Error::NotFound`] if the key is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get(&self, key: &[u8]) -> Result<&[u8]> {
        let (_, value) = self.get_key_value(key)?;
        Ok(value)
    }

    /// Borrows the stored key and value for `key` as separate slices.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_key_value(&self, key: &[u8]) -> Result<(&[u8], &[u8])> {
        if key.len() != self.key_size {
            return Err(Error::InvalidValue);
        }
        let entry = self.set.get(key)?;
        Ok(entry.split_at(self.key_size))
    }

    /// Overwrites the value stored for `entry`'s key in place. Not an
    /// upsert: the key must already be present, and neither the tree
    /// structure nor the generation counter changes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValue`] if `entry` is not `key_size + value_size`
    ///   bytes.
    /// - [`Error::NotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::TreeMap;
    ///
    /// let mut map = TreeMap::new(1, 1, |a: &[u8], b: &[u8]| a[..1].cmp(&b[..1]));
    /// map.insert(&[9, 1]).unwrap();
    ///
    /// map.set(&[9, 2]).unwrap();
    /// assert_eq!(map.get(&[9]).unwrap(), &[2]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn set(&mut self, entry: &[u8]) -> Result<()> {
        if entry.len() != self.key_size + self.value_size {
            return Err(Error::InvalidValue);
        }
        self.set.update_in_place(&entry[..self.key_size], entry)
    }

    /// Borrows the `(key, value)` pair ordered immediately after `key`'s
    /// entry.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValue`] if `key` is not `key_size` bytes.
    /// - [`Error::NotFound`] if the key is absent.
    /// - [`Error::EndOfSequence`] if the entry is the last one.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn next_after(&self, key: &[u8]) -> Result<(&[u8], &[u8])> {
        if key.len() != self.key_size {
            return Err(Error::InvalidValue);
        }
        let entry = self.set.next_after(key)?;
        Ok(entry.split_at(self.key_size))
    }

    /// Borrows the `(key, value)` pair ordered immediately before `key`'s
    /// entry; mirror of [`Self::next_after`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidValue`] if `key` is not `key_size` bytes.
    /// - [`Error::NotFound`] if the key is absent.
    /// - [`Error::EndOfSequence`] if the entry is the first one.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn prev_before(&self, key: &[u8]) -> Result<(&[u8], &[u8])> {
        if key.len() != self.key_size {
            return Err(Error::InvalidValue);
        }
        let entry = self.set.prev_before(key)?;
        Ok(entry.split_at(self.key_size))
    }
}

impl<C> TreeMap<C> {
    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns the fixed key size in bytes.
    #[must_use]
    pub const fn key_size(&self) -> usize {
        self.key_size
    }

    /// Returns the fixed value size in bytes.
    #[must_use]
    pub const fn value_size(&self) -> usize {
        self.value_size
    }

    /// Returns the occupancy bound, or `None` for an unbounded map.
    #[must_use]
    pub const fn capacity(&self) -> Option<Capacity> {
        self.set.capacity()
    }

    /// Returns the generation counter; see [`TreeSet::generation`].
    /// [`Self::set`] rewrites bytes in place without moving the counter.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.set.generation()
    }

    /// Borrows the `(key, value)` pair with the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn first(&self) -> Result<(&[u8], &[u8])> {
        Ok(self.set.first()?.split_at(self.key_size))
    }

    /// Borrows the `(key, value)` pair with the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn last(&self) -> Result<(&[u8], &[u8])> {
        Ok(self.set.last()?.split_at(self.key_size))
    }

    /// Gets an iterator over the `(key, value)` pairs in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use garnet_tree::TreeMap;
    ///
    /// let mut map = TreeMap::new(1, 1, |a: &[u8], b: &[u8]| a[..1].cmp(&b[..1]));
    /// map.insert(&[2, 20]).unwrap();
    /// map.insert(&[1, 10]).unwrap();
    ///
    /// let pairs: Vec<(u8, u8)> = map.iter().map(|(k, v)| (k[0], v[0])).collect();
    /// assert_eq!(pairs, [(1, 10), (2, 20)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, C> {
        Iter {
            entries: self.set.iter(),
            key_size: self.key_size,
        }
    }

    /// Removes every entry; see [`TreeSet::clear`].
    ///
    /// # Complexity
    ///
    /// O(n), iterative; never recurses.
    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Removes every entry, invoking `on_destroy` with each entry's full
    /// `[key | value]` bytes immediately before that node is freed.
    ///
    /// # Complexity
    ///
    /// O(n), iterative; never recurses.
    pub fn clear_with(&mut self, on_destroy: impl FnMut(&[u8])) {
        self.set.clear_with(on_destroy);
    }
}

impl<'a, C> Iterator for Iter<'a, C> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<(&'a [u8], &'a [u8])> {
        self.entries.next().map(|entry| entry.split_at(self.key_size))
    }
}

impl<C> FusedIterator for Iter<'_, C> {}

impl<'a, C> IntoIterator for &'a TreeMap<C> {
    type Item = (&'a [u8], &'a [u8]);
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Iter<'a, C> {
        self.iter()
    }
}
