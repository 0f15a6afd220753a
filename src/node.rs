use crate::arena::Handle;
use std::fmt;

/// Which child link of a node is meant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

pub type Link = Option<Handle>;

/// A struct representing a vertex of the tree. `extra` is whatever the balancing strategy
/// tracks per node.
pub struct Node<T, X> {
    pub element: T,
    pub extra: X,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<T, X> Node<T, X> {
    pub fn new(element: T, extra: X, parent: Link) -> Self {
        Node {
            element,
            extra,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn replace_child(&mut self, side: Side, child: Link) -> Link {
        match side {
            Side::Left => std::mem::replace(&mut self.left, child),
            Side::Right => std::mem::replace(&mut self.right, child),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn is_full(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}
