mod arena;
mod handle;
mod node;
mod raw_tree;
mod rotate;

pub(crate) use handle::Handle;
pub(crate) use raw_tree::{RawTree, SearchOutcome};
