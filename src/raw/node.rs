use alloc::boxed::Box;

use super::handle::Handle;

/// Node color. NIL (an absent handle) is always treated as black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree node: link fields plus the caller's element bytes, copied in at
/// insert and owned by the node until it is destroyed.
pub(crate) struct RbNode {
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    color: Color,
    element: Box<[u8]>,
}

impl RbNode {
    /// Creates an unlinked node. New nodes start red; insertion fixup
    /// restores the tree invariants afterwards.
    pub(crate) fn new(element: Box<[u8]>) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            color: Color::Red,
            element,
        }
    }

    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    /// Relinks the parent. The color is a separate field, so unlike a
    /// pointer-tagged layout this never disturbs it.
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(crate) fn element(&self) -> &[u8] {
        &self.element
    }

    pub(crate) fn element_mut(&mut self) -> &mut [u8] {
        &mut self.element
    }

    pub(crate) fn into_element(self) -> Box<[u8]> {
        self.element
    }
}
