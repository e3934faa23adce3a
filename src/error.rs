use thiserror::Error;

/// The failure kinds reported by every fallible operation in this crate.
///
/// Failures are reported at the point of detection and never leave a
/// container partially mutated: an operation that returns an error has not
/// changed the tree, the element count, or the generation counter.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The handle names a node that is absent or no longer lives in the tree.
    #[error("handle does not refer to a live node")]
    NullHandle,
    /// A required argument was absent.
    #[error("required argument is absent")]
    NullArgument,
    /// An argument is malformed: wrong element length, or a node that is not
    /// in the position the operation requires.
    #[error("argument is malformed or out of place")]
    InvalidValue,
    /// An equal element is already present; inserts never overwrite.
    #[error("an equal element already exists")]
    AlreadyExists,
    /// No element matched the search.
    #[error("no matching element was found")]
    NotFound,
    /// The mutation would violate the container's capacity bound. The
    /// container is left unmodified.
    #[error("operation would violate the capacity bound")]
    Unavailable,
    /// Iteration is exhausted, or a neighbor query was made on the NIL
    /// sentinel rather than a live node.
    #[error("end of sequence")]
    EndOfSequence,
    /// The node arena has exhausted its handle space.
    #[error("memory allocation failed")]
    AllocationFailed,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
