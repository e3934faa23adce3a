use crate::error::{Error, Result};

use super::handle::Handle;
use super::node::Side;
use super::raw_tree::RawTree;

impl<C> RawTree<C> {
    /// Single left rotation around `y`'s parent.
    ///
    /// `y` must be the right child of its parent `x`; `y` takes `x`'s place
    /// (updating the root pointer when `x` was the root), `x` becomes `y`'s
    /// left child, and `y`'s former left subtree is reattached as `x`'s
    /// right subtree. In-order sequence is unchanged.
    pub(crate) fn rotate_left(&mut self, y: Option<Handle>) -> Result<()> {
        let y = y.ok_or(Error::NullArgument)?;
        let x = self.node(y).parent().ok_or(Error::InvalidValue)?;
        if self.node(x).right() != Some(y) {
            return Err(Error::InvalidValue);
        }
        self.rotate(x, y, Side::Left);
        Ok(())
    }

    /// Single right rotation around `y`'s parent; mirror of
    /// [`Self::rotate_left`], requiring `y` on its parent's left.
    pub(crate) fn rotate_right(&mut self, y: Option<Handle>) -> Result<()> {
        let y = y.ok_or(Error::NullArgument)?;
        let x = self.node(y).parent().ok_or(Error::InvalidValue)?;
        if self.node(x).left() != Some(y) {
            return Err(Error::InvalidValue);
        }
        self.rotate(x, y, Side::Right);
        Ok(())
    }

    /// Compound rotation for the left-right configuration: `y` on the right
    /// of its parent `x`, `x` on the left of the grandparent `z`. The inner
    /// left rotation lifts `y` into `x`'s place; the outer right rotation
    /// then lifts it over `z`.
    ///
    /// Every role is validated before the inner rotation shifts them, so a
    /// precondition failure is always reported against the original x/z
    /// roles rather than the post-rotation ones.
    pub(crate) fn rotate_left_right(&mut self, y: Option<Handle>) -> Result<()> {
        let y = y.ok_or(Error::NullArgument)?;
        let x = self.node(y).parent().ok_or(Error::InvalidValue)?;
        if self.node(x).right() != Some(y) {
            return Err(Error::InvalidValue);
        }
        let z = self.node(x).parent().ok_or(Error::InvalidValue)?;
        if self.node(z).left() != Some(x) {
            return Err(Error::InvalidValue);
        }
        self.rotate(x, y, Side::Left);
        self.rotate(z, y, Side::Right);
        Ok(())
    }

    /// Compound rotation for the right-left configuration; mirror of
    /// [`Self::rotate_left_right`].
    pub(crate) fn rotate_right_left(&mut self, y: Option<Handle>) -> Result<()> {
        let y = y.ok_or(Error::NullArgument)?;
        let x = self.node(y).parent().ok_or(Error::InvalidValue)?;
        if self.node(x).left() != Some(y) {
            return Err(Error::InvalidValue);
        }
        let z = self.node(x).parent().ok_or(Error::InvalidValue)?;
        if self.node(z).right() != Some(x) {
            return Err(Error::InvalidValue);
        }
        self.rotate(x, y, Side::Right);
        self.rotate(z, y, Side::Left);
        Ok(())
    }

    /// Rotation addressed by direction instead of pivot: `x` descends toward
    /// `side` and its opposite-side child rises. Used by the deletion fixup,
    /// whose cases are parameterized by the deficiency side. The pivot must
    /// exist.
    pub(super) fn rotate_toward(&mut self, x: Handle, side: Side) {
        let pivot = self
            .node(x)
            .child(side.opposite())
            .expect("`RawTree::rotate_toward()` - rotation pivot is missing!");
        self.rotate(x, pivot, side);
    }

    /// Shared rewiring for all rotation entry points. `y` is `x`'s child on
    /// the side opposite `side`; `y` rises over `x` and the middle subtree
    /// (`y`'s `side` child) moves across to `x`.
    fn rotate(&mut self, x: Handle, y: Handle, side: Side) {
        debug_assert_eq!(self.node(x).child(side.opposite()), Some(y));

        let middle = self.node(y).child(side);
        self.node_mut(x).set_child(side.opposite(), middle);
        if let Some(m) = middle {
            self.node_mut(m).set_parent(Some(x));
        }

        let grand = self.node(x).parent();
        self.node_mut(y).set_parent(grand);
        self.replace_child(grand, x, Some(y));

        self.node_mut(y).set_child(side, Some(x));
        self.node_mut(x).set_parent(Some(y));
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::boxed::Box;
    use core::cmp::Ordering;

    use pretty_assertions::assert_eq;

    use super::super::node::RbNode;
    use super::*;

    type Tree = RawTree<fn(&[u8], &[u8]) -> Ordering>;

    fn tree() -> Tree {
        RawTree::new(|a, b| a.cmp(b))
    }

    fn raw_node(tree: &mut Tree, value: u8) -> Handle {
        tree.nodes.alloc(RbNode::new(Box::from([value]))).unwrap()
    }

    fn link(tree: &mut Tree, parent: Handle, side: Side, child: Handle) {
        tree.node_mut(parent).set_child(side, Some(child));
        tree.node_mut(child).set_parent(Some(parent));
    }

    /// Hand-builds `x` as root with right child `y`, `y` holding subtrees
    /// `b` (left, the middle subtree) and `c` (right); `a` on `x`'s left.
    fn left_rotation_fixture(tree: &mut Tree) -> (Handle, Handle, Handle, Handle, Handle) {
        let x = raw_node(tree, 10);
        let y = raw_node(tree, 20);
        let a = raw_node(tree, 5);
        let b = raw_node(tree, 15);
        let c = raw_node(tree, 25);
        tree.root = Some(x);
        link(tree, x, Side::Left, a);
        link(tree, x, Side::Right, y);
        link(tree, y, Side::Left, b);
        link(tree, y, Side::Right, c);
        (x, y, a, b, c)
    }

    #[test]
    fn rotate_left_rewires_the_middle_subtree_and_the_root() {
        let mut tree = tree();
        let (x, y, a, b, c) = left_rotation_fixture(&mut tree);

        tree.rotate_left(Some(y)).unwrap();

        // y took x's place as root.
        assert_eq!(tree.root, Some(y));
        assert_eq!(tree.node(y).parent(), None);
        assert_eq!(tree.node(y).left(), Some(x));
        assert_eq!(tree.node(y).right(), Some(c));

        // x kept its left subtree and adopted the middle subtree.
        assert_eq!(tree.node(x).parent(), Some(y));
        assert_eq!(tree.node(x).left(), Some(a));
        assert_eq!(tree.node(x).right(), Some(b));
        assert_eq!(tree.node(b).parent(), Some(x));
    }

    #[test]
    fn rotate_right_undoes_rotate_left() {
        let mut tree = tree();
        let (x, y, a, b, c) = left_rotation_fixture(&mut tree);

        tree.rotate_left(Some(y)).unwrap();
        tree.rotate_right(Some(x)).unwrap();

        assert_eq!(tree.root, Some(x));
        assert_eq!(tree.node(x).left(), Some(a));
        assert_eq!(tree.node(x).right(), Some(y));
        assert_eq!(tree.node(y).left(), Some(b));
        assert_eq!(tree.node(y).right(), Some(c));
        assert_eq!(tree.node(b).parent(), Some(y));
    }

    #[test]
    fn rotations_rewire_below_the_root() {
        // Same fixture hung off an extra root so the grandparent's child
        // slot, not the root pointer, must be updated.
        let mut tree = tree();
        let top = raw_node(&mut tree, 99);
        tree.root = Some(top);
        let (x, y, ..) = {
            let x = raw_node(&mut tree, 10);
            let y = raw_node(&mut tree, 20);
            link(&mut tree, top, Side::Left, x);
            link(&mut tree, x, Side::Right, y);
            (x, y)
        };

        tree.rotate_left(Some(y)).unwrap();

        assert_eq!(tree.root, Some(top));
        assert_eq!(tree.node(top).left(), Some(y));
        assert_eq!(tree.node(y).parent(), Some(top));
        assert_eq!(tree.node(y).left(), Some(x));
    }

    #[test]
    fn single_rotation_preconditions_are_reported() {
        let mut tree = tree();
        let (x, y, a, ..) = left_rotation_fixture(&mut tree);

        // NIL pivot.
        assert_eq!(tree.rotate_left(None), Err(Error::NullArgument));
        // The root has no parent to rotate around.
        assert_eq!(tree.rotate_left(Some(x)), Err(Error::InvalidValue));
        // `a` is a LEFT child; rotating left around it is malformed.
        assert_eq!(tree.rotate_left(Some(a)), Err(Error::InvalidValue));
        // Mirror check for the right rotation.
        assert_eq!(tree.rotate_right(Some(y)), Err(Error::InvalidValue));

        // Nothing moved.
        assert_eq!(tree.root, Some(x));
        assert_eq!(tree.node(x).right(), Some(y));
    }

    #[test]
    fn compound_rotation_lifts_the_inner_grandchild() {
        // z with left child x, x with right child y: the left-right case.
        let mut tree = tree();
        let z = raw_node(&mut tree, 30);
        let x = raw_node(&mut tree, 10);
        let y = raw_node(&mut tree, 20);
        tree.root = Some(z);
        link(&mut tree, z, Side::Left, x);
        link(&mut tree, x, Side::Right, y);

        tree.rotate_left_right(Some(y)).unwrap();

        assert_eq!(tree.root, Some(y));
        assert_eq!(tree.node(y).parent(), None);
        assert_eq!(tree.node(y).left(), Some(x));
        assert_eq!(tree.node(y).right(), Some(z));
        assert_eq!(tree.node(x).parent(), Some(y));
        assert_eq!(tree.node(z).parent(), Some(y));
    }

    #[test]
    fn compound_rotation_validates_the_grandparent_side() {
        // z with RIGHT child x, x with right child y: rotate_left_right
        // requires x on z's LEFT, so this must be rejected up front.
        let mut tree = tree();
        let z = raw_node(&mut tree, 10);
        let x = raw_node(&mut tree, 20);
        let y = raw_node(&mut tree, 30);
        tree.root = Some(z);
        link(&mut tree, z, Side::Right, x);
        link(&mut tree, x, Side::Right, y);

        assert_eq!(tree.rotate_left_right(Some(y)), Err(Error::InvalidValue));
        // No grandparent at all is rejected the same way.
        assert_eq!(tree.rotate_left_right(Some(x)), Err(Error::InvalidValue));
        assert_eq!(tree.rotate_left_right(None), Err(Error::NullArgument));

        // The failed compound rotation left the tree untouched.
        assert_eq!(tree.root, Some(z));
        assert_eq!(tree.node(z).right(), Some(x));
        assert_eq!(tree.node(x).right(), Some(y));
    }

    #[test]
    fn mirrored_compound_rotation() {
        // z with right child x, x with left child y: the right-left case.
        let mut tree = tree();
        let z = raw_node(&mut tree, 10);
        let x = raw_node(&mut tree, 30);
        let y = raw_node(&mut tree, 20);
        tree.root = Some(z);
        link(&mut tree, z, Side::Right, x);
        link(&mut tree, x, Side::Left, y);

        tree.rotate_right_left(Some(y)).unwrap();

        assert_eq!(tree.root, Some(y));
        assert_eq!(tree.node(y).left(), Some(z));
        assert_eq!(tree.node(y).right(), Some(x));
    }
}
