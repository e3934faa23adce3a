use alloc::boxed::Box;
use core::cmp::Ordering;

use crate::error::{Error, Result};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, RbNode, Side};

/// The red-black tree core backing `TreeSet` (and, through it, `TreeMap`).
///
/// Nodes live in an [`Arena`] and reference each other by [`Handle`]; an
/// absent handle is the NIL sentinel, which is always black. `compare` is the
/// caller's three-way ordering over raw element bytes and must be a strict
/// total order, stable for the tree's lifetime.
pub(crate) struct RawTree<C> {
    pub(super) nodes: Arena<RbNode>,
    pub(super) root: Option<Handle>,
    compare: C,
}

/// Result of walking the tree for an element.
pub(crate) enum SearchOutcome {
    /// An equal element exists at this node.
    Found(Handle),
    /// No match; the handle is the last node visited, i.e. the leaf a
    /// subsequent insert of this element would hang off (`None` only when
    /// the searched subtree was empty).
    Miss(Option<Handle>),
}

impl<C> RawTree<C> {
    pub(crate) const fn new(compare: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            compare,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(super) fn node(&self, handle: Handle) -> &RbNode {
        self.nodes.get(handle)
    }

    pub(super) fn node_mut(&mut self, handle: Handle) -> &mut RbNode {
        self.nodes.get_mut(handle)
    }

    /// Borrows the element bytes stored at `handle`.
    pub(crate) fn element(&self, handle: Handle) -> &[u8] {
        self.node(handle).element()
    }

    /// Mutably borrows the element bytes stored at `handle`. Callers must
    /// not change the portion of the element the comparator orders by.
    pub(crate) fn element_mut(&mut self, handle: Handle) -> &mut [u8] {
        self.node_mut(handle).element_mut()
    }

    /// Color of a possibly-NIL node. NIL is black by definition, so this is
    /// total, unlike the child accessors below.
    pub(crate) fn color_of(&self, handle: Option<Handle>) -> Color {
        match handle {
            Some(h) => self.node(h).color(),
            None => Color::Black,
        }
    }

    /// Left child of `handle`. Asking NIL for a child is an error; asking a
    /// live node whose slot is empty succeeds and reports `None`.
    pub(crate) fn left_of(&self, handle: Option<Handle>) -> Result<Option<Handle>> {
        let handle = handle.ok_or(Error::EndOfSequence)?;
        Ok(self.node(handle).left())
    }

    /// Right child of `handle`; same NIL contract as [`Self::left_of`].
    pub(crate) fn right_of(&self, handle: Option<Handle>) -> Result<Option<Handle>> {
        let handle = handle.ok_or(Error::EndOfSequence)?;
        Ok(self.node(handle).right())
    }

    /// Parent of `handle`; same NIL contract as [`Self::left_of`].
    pub(crate) fn parent_of(&self, handle: Option<Handle>) -> Result<Option<Handle>> {
        let handle = handle.ok_or(Error::EndOfSequence)?;
        Ok(self.node(handle).parent())
    }

    /// Which slot of `parent` holds `child`.
    pub(super) fn side_under(&self, parent: Handle, child: Handle) -> Side {
        if self.node(parent).left() == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Repoints the slot that held `old` (or the root pointer) at `new`.
    pub(super) fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_under(p, old);
                self.node_mut(p).set_child(side, new);
            }
        }
    }

    /// Leftmost node of the subtree rooted at `handle`.
    pub(super) fn min_of(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(left) = self.node(current).left() {
            current = left;
        }
        current
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub(super) fn max_of(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(right) = self.node(current).right() {
            current = right;
        }
        current
    }

    /// Smallest element's node, or `NotFound` on an empty tree.
    pub(crate) fn first(&self) -> Result<Handle> {
        let root = self.root.ok_or(Error::NotFound)?;
        Ok(self.min_of(root))
    }

    /// Largest element's node, or `NotFound` on an empty tree.
    pub(crate) fn last(&self) -> Result<Handle> {
        let root = self.root.ok_or(Error::NotFound)?;
        Ok(self.max_of(root))
    }

    /// In-order successor: minimum of the right subtree when present,
    /// otherwise the first ancestor reached from its left side.
    pub(crate) fn next(&self, handle: Handle) -> Result<Handle> {
        if let Some(right) = self.node(handle).right() {
            return Ok(self.min_of(right));
        }
        let mut child = handle;
        while let Some(parent) = self.node(child).parent() {
            if self.node(parent).left() == Some(child) {
                return Ok(parent);
            }
            child = parent;
        }
        Err(Error::EndOfSequence)
    }

    /// In-order predecessor; mirror of [`Self::next`].
    pub(crate) fn prev(&self, handle: Handle) -> Result<Handle> {
        if let Some(left) = self.node(handle).left() {
            return Ok(self.max_of(left));
        }
        let mut child = handle;
        while let Some(parent) = self.node(child).parent() {
            if self.node(parent).right() == Some(child) {
                return Ok(parent);
            }
            child = parent;
        }
        Err(Error::EndOfSequence)
    }

    fn alloc(&mut self, node: RbNode) -> Result<Handle> {
        self.nodes.alloc(node).ok_or(Error::AllocationFailed)
    }

    /// Unlinks and destroys the node at `handle`, returning its element.
    ///
    /// The two-child case first structurally exchanges links and color with
    /// the in-order successor (no element bytes move), so handles held to
    /// other nodes keep referring to correctly-positioned nodes; the target
    /// then has at most one child and is removed, followed by the six-case
    /// double-black repair when a black node left a deficiency.
    pub(crate) fn delete(&mut self, handle: Handle) -> Result<Box<[u8]>> {
        if !self.nodes.contains(handle) {
            return Err(Error::NullHandle);
        }

        while self.node(handle).left().is_some() {
            let Some(right) = self.node(handle).right() else { break };
            let successor = self.min_of(right);
            self.swap_links(handle, successor);
        }

        let parent = self.node(handle).parent();
        let color = self.node(handle).color();
        let child = self.node(handle).left().or_else(|| self.node(handle).right());

        match child {
            Some(child) => {
                // The child takes the node's place, recolored black; if both
                // were black the subtree is short one black node.
                let child_color = self.node(child).color();
                self.replace_child(parent, handle, Some(child));
                self.node_mut(child).set_parent(parent);
                self.node_mut(child).set_color(Color::Black);
                if color == Color::Black && child_color == Color::Black {
                    if let Some(p) = parent {
                        let side = self.side_under(p, child);
                        self.fix_deficiency(p, side);
                    }
                }
            }
            None => {
                if let (Color::Black, Some(p)) = (color, parent) {
                    let side = self.side_under(p, handle);
                    self.node_mut(p).set_child(side, None);
                    self.fix_deficiency(p, side);
                } else {
                    self.replace_child(parent, handle, None);
                }
            }
        }

        Ok(self.nodes.take(handle).into_element())
    }

    /// Structurally exchanges two nodes' links and colors.
    ///
    /// Only called with `b` the in-order successor inside `a`'s right
    /// subtree, so `b` is either `a`'s direct child or in a disjoint
    /// position below it; `a` and `b` are never siblings.
    fn swap_links(&mut self, a: Handle, b: Handle) {
        let (a_parent, a_left, a_right, a_color) = {
            let n = self.node(a);
            (n.parent(), n.left(), n.right(), n.color())
        };
        let (b_parent, b_left, b_right, b_color) = {
            let n = self.node(b);
            (n.parent(), n.left(), n.right(), n.color())
        };

        self.node_mut(a).set_color(b_color);
        self.node_mut(b).set_color(a_color);

        if b_parent == Some(a) {
            let side = self.side_under(a, b);

            self.replace_child(a_parent, a, Some(b));
            self.node_mut(b).set_parent(a_parent);

            self.node_mut(a).set_left(b_left);
            self.node_mut(a).set_right(b_right);
            if let Some(h) = b_left {
                self.node_mut(h).set_parent(Some(a));
            }
            if let Some(h) = b_right {
                self.node_mut(h).set_parent(Some(a));
            }

            let other = side.opposite();
            let other_child = match other {
                Side::Left => a_left,
                Side::Right => a_right,
            };
            self.node_mut(b).set_child(other, other_child);
            if let Some(h) = other_child {
                self.node_mut(h).set_parent(Some(b));
            }
            self.node_mut(b).set_child(side, Some(a));
            self.node_mut(a).set_parent(Some(b));
        } else {
            self.replace_child(a_parent, a, Some(b));
            self.replace_child(b_parent, b, Some(a));
            self.node_mut(a).set_parent(b_parent);
            self.node_mut(b).set_parent(a_parent);

            self.node_mut(a).set_left(b_left);
            self.node_mut(a).set_right(b_right);
            if let Some(h) = b_left {
                self.node_mut(h).set_parent(Some(a));
            }
            if let Some(h) = b_right {
                self.node_mut(h).set_parent(Some(a));
            }

            self.node_mut(b).set_left(a_left);
            self.node_mut(b).set_right(a_right);
            if let Some(h) = a_left {
                self.node_mut(h).set_parent(Some(b));
            }
            if let Some(h) = a_right {
                self.node_mut(h).set_parent(Some(b));
            }
        }
    }

    /// Repairs a double-black deficiency sitting in `parent`'s `side` slot
    /// (the slot may be empty). Iterative; the deficiency either resolves
    /// locally or moves one level up per pass.
    fn fix_deficiency(&mut self, mut parent: Handle, mut side: Side) {
        loop {
            let sibling = self
                .node(parent)
                .child(side.opposite())
                .expect("`RawTree::fix_deficiency()` - sibling is missing, black-height invariant broken!");

            // Red sibling: rotate it over the parent so the deficiency faces
            // a black sibling, then re-examine.
            if self.node(sibling).color() == Color::Red {
                self.node_mut(sibling).set_color(Color::Black);
                self.node_mut(parent).set_color(Color::Red);
                self.rotate_toward(parent, side);
                continue;
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(side.opposite());

            if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                // Black sibling, black nephews: push the deficiency up.
                self.node_mut(sibling).set_color(Color::Red);
                if self.node(parent).color() == Color::Red {
                    self.node_mut(parent).set_color(Color::Black);
                    return;
                }
                match self.node(parent).parent() {
                    // The root absorbs the extra black.
                    None => return,
                    Some(grand) => {
                        side = self.side_under(grand, parent);
                        parent = grand;
                        continue;
                    }
                }
            }

            if self.color_of(far) == Color::Black {
                // Near nephew red: rotate within the sibling to expose a red
                // far nephew, then settle on the next pass.
                let near = near.expect("`RawTree::fix_deficiency()` - near nephew is red but missing!");
                self.node_mut(near).set_color(Color::Black);
                self.node_mut(sibling).set_color(Color::Red);
                self.rotate_toward(sibling, side.opposite());
                continue;
            }

            // Far nephew red: one rotation through the parent finishes.
            let far = far.expect("`RawTree::fix_deficiency()` - far nephew is red but missing!");
            let parent_color = self.node(parent).color();
            self.node_mut(sibling).set_color(parent_color);
            self.node_mut(parent).set_color(Color::Black);
            self.node_mut(far).set_color(Color::Black);
            self.rotate_toward(parent, side);
            return;
        }
    }

    /// Destructive full teardown. Descends left-then-right without
    /// recursing, frees each node once it has no remaining children, and
    /// invokes `on_destroy` with the node's element just before the free.
    pub(crate) fn clear_with(&mut self, mut on_destroy: impl FnMut(&[u8])) {
        let mut current = self.root;
        while let Some(handle) = current {
            if let Some(left) = self.node(handle).left() {
                current = Some(left);
            } else if let Some(right) = self.node(handle).right() {
                current = Some(right);
            } else {
                let parent = self.node(handle).parent();
                if let Some(p) = parent {
                    let side = self.side_under(p, handle);
                    self.node_mut(p).set_child(side, None);
                }
                let node = self.nodes.take(handle);
                on_destroy(node.element());
                current = parent;
            }
        }
        self.root = None;
        self.nodes.clear();
    }
}

impl<C: Fn(&[u8], &[u8]) -> Ordering> RawTree<C> {
    /// Walks by the comparator from `start` (or the root when `start` is
    /// `None`), returning the match or the would-be insertion point.
    pub(crate) fn search(&self, start: Option<Handle>, element: &[u8]) -> SearchOutcome {
        let mut current = match start {
            Some(h) => Some(h),
            None => self.root,
        };
        let mut visited = None;
        while let Some(handle) = current {
            visited = Some(handle);
            match (self.compare)(element, self.node(handle).element()) {
                Ordering::Equal => return SearchOutcome::Found(handle),
                Ordering::Less => current = self.node(handle).left(),
                Ordering::Greater => current = self.node(handle).right(),
            }
        }
        SearchOutcome::Miss(visited)
    }

    /// Links a new red node holding `element` under the insertion point
    /// `at`, then rebalances bottom-up.
    ///
    /// `at` must be the leaf position a search for `element` just reported:
    /// an equal element is `AlreadyExists`, and an occupied destination slot
    /// is `InvalidValue` - restructuring around an occupied slot cannot be
    /// proven order-preserving, so a non-leaf insertion point is treated as
    /// a caller error.
    pub(crate) fn insert(&mut self, at: Option<Handle>, element: Box<[u8]>) -> Result<Handle> {
        if self.root.is_none() {
            let handle = self.alloc(RbNode::new(element))?;
            self.node_mut(handle).set_color(Color::Black);
            self.root = Some(handle);
            return Ok(handle);
        }

        let at = at.ok_or(Error::NullArgument)?;
        let side = match (self.compare)(&element, self.node(at).element()) {
            Ordering::Equal => return Err(Error::AlreadyExists),
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
        };
        if self.node(at).child(side).is_some() {
            return Err(Error::InvalidValue);
        }

        let handle = self.alloc(RbNode::new(element))?;
        self.node_mut(handle).set_parent(Some(at));
        self.node_mut(at).set_child(side, Some(handle));
        self.insert_fixup(handle)?;
        Ok(handle)
    }

    /// Bottom-up insertion repair: recolor through red uncles, resolve a
    /// black uncle with one single or compound rotation.
    fn insert_fixup(&mut self, mut node: Handle) -> Result<()> {
        loop {
            let Some(parent) = self.node(node).parent() else {
                self.node_mut(node).set_color(Color::Black);
                return Ok(());
            };
            if self.node(parent).color() == Color::Black {
                return Ok(());
            }

            // A red parent cannot be the root, so the grandparent exists.
            let grand = self
                .node(parent)
                .parent()
                .expect("`RawTree::insert_fixup()` - red parent without a grandparent!");
            let parent_side = self.side_under(grand, parent);
            let uncle = self.node(grand).child(parent_side.opposite());

            if self.color_of(uncle) == Color::Red {
                let uncle = uncle.expect("`RawTree::insert_fixup()` - red uncle is missing!");
                self.node_mut(parent).set_color(Color::Black);
                self.node_mut(uncle).set_color(Color::Black);
                self.node_mut(grand).set_color(Color::Red);
                node = grand;
                continue;
            }

            let node_side = self.side_under(parent, node);
            if node_side == parent_side {
                // Same-side configuration: single rotation around the parent.
                match parent_side {
                    Side::Left => self.rotate_right(Some(parent))?,
                    Side::Right => self.rotate_left(Some(parent))?,
                }
                self.node_mut(parent).set_color(Color::Black);
            } else {
                // Opposite-side configuration: compound rotation around the
                // node itself.
                match parent_side {
                    Side::Left => self.rotate_left_right(Some(node))?,
                    Side::Right => self.rotate_right_left(Some(node))?,
                }
                self.node_mut(node).set_color(Color::Black);
            }
            self.node_mut(grand).set_color(Color::Red);
            return Ok(());
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
impl<C: Fn(&[u8], &[u8]) -> Ordering> RawTree<C> {
    /// Asserts every red-black invariant plus link and ordering consistency.
    /// Test-only; panics with a description of the first violation.
    pub(crate) fn validate_invariants(&self) {
        match self.root {
            None => assert!(self.nodes.is_empty(), "empty tree with live nodes"),
            Some(root) => {
                assert_eq!(self.node(root).color(), Color::Black, "root must be black");
                assert_eq!(self.node(root).parent(), None, "root must have no parent");
                let (count, _) = self.validate_node(root);
                assert_eq!(count, self.nodes.len(), "unreachable nodes left in the arena");
            }
        }
    }

    fn validate_node(&self, handle: Handle) -> (usize, usize) {
        let node = self.node(handle);
        if node.color() == Color::Red {
            assert_eq!(self.color_of(node.left()), Color::Black, "red node with a red left child");
            assert_eq!(self.color_of(node.right()), Color::Black, "red node with a red right child");
        }

        let mut count = 1;
        // A NIL child contributes black-height 1.
        let mut heights = [1usize; 2];
        for (index, child) in [node.left(), node.right()].into_iter().enumerate() {
            if let Some(child) = child {
                assert_eq!(self.node(child).parent(), Some(handle), "child/parent link mismatch");
                let ordering = (self.compare)(self.node(child).element(), node.element());
                let expected = if index == 0 { Ordering::Less } else { Ordering::Greater };
                assert_eq!(ordering, expected, "child violates the search order");
                let (child_count, child_height) = self.validate_node(child);
                count += child_count;
                heights[index] = child_height;
            }
        }
        assert_eq!(heights[0], heights[1], "black-height mismatch between subtrees");

        let own = usize::from(node.color() == Color::Black);
        (count, heights[0] + own)
    }
}
