//! Ordered byte-element collections backed by a red-black tree.
//!
//! This crate provides [`TreeSet`] and [`TreeMap`], ordered containers whose
//! elements are opaque, fixed-size byte blocks ordered by a caller-supplied
//! comparator:
//!
//! - [`TreeSet`] - an ordered set of `element_size`-byte elements
//! - [`TreeMap`] - a key/value layer storing `[key|value]` byte entries and
//!   comparing only the leading key bytes
//!
//! # Example
//!
//! ```
//! use garnet_tree::TreeMap;
//!
//! // Keys and values are both big-endian u64 (8 bytes each).
//! let mut map = TreeMap::new(8, 8, |a: &[u8], b: &[u8]| a[..8].cmp(&b[..8]));
//!
//! let mut entry = [0u8; 16];
//! entry[..8].copy_from_slice(&87u64.to_be_bytes());
//! entry[8..].copy_from_slice(&83_621u64.to_be_bytes());
//! map.insert(&entry).unwrap();
//!
//! let value = map.get(&87u64.to_be_bytes()).unwrap();
//! assert_eq!(value, 83_621u64.to_be_bytes());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Fixed-size elements** - Element size is set at construction and enforced on insert
//! - **Capacity bounds** - Optional inclusive `{minimum, maximum}` element-count limits
//! - **Generation counter** - Monotonic counter for detecting stale external cursors
//!
//! # Implementation
//!
//! The collections are implemented as a red-black tree over an arena of nodes
//! addressed by integer handles, so `Option<Handle>` stands in for the classic
//! NIL sentinel without pointer tagging. Search, insert, delete, and traversal
//! are all iterative; no operation recurses, so adversarial shapes cannot
//! overflow the stack.
//!
//! The containers are single-threaded by contract. Nothing blocks or performs
//! I/O, and no internal synchronization exists; concurrent access requires an
//! external lock. Every fallible operation returns a [`Result`] and leaves the
//! container in its prior, invariant-preserving state on failure.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod tree_map;
pub mod tree_set;

pub use error::{Error, Result};
pub use tree_map::TreeMap;
pub use tree_set::{Capacity, TreeSet};
