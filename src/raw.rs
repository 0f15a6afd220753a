//! The structural half of the tree: node storage, descent, linking and unlinking.
//!
//! Nothing in here knows about balance. Strategies receive a `&mut RawTree` in their hooks and
//! restore their invariant with the primitives in `rotate`.

use crate::arena::{Handle, TypedArena};
use crate::compare::Compare;
use crate::node::{Link, Node, Side};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::mem;
use std::ops::ControlFlow;

/// Result of descending the tree looking for an element.
pub enum Search {
    Found(Handle),
    /// The element is absent. It belongs on `side` of `parent`, or at the root if there is no
    /// parent.
    Vacant { parent: Link, side: Side },
}

/// Describes a physical unlink so a strategy can repair the tree around the hole.
#[derive(Debug)]
pub struct Removed<X> {
    /// Parent of the unlinked node and which of its links was vacated. `None` if the root was
    /// unlinked.
    pub slot: Option<(Handle, Side)>,
    /// The child that was spliced into the vacated position, if any.
    pub replacement: Link,
    /// Auxiliary field of the unlinked node.
    pub extra: X,
}

pub struct RawTree<T, X> {
    arena: TypedArena<Node<T, X>>,
    pub(crate) root: Link,
    len: usize,
    /// Set while the tree is stored as the mirror image of its comparator order.
    mirrored: bool,
}

impl<T, X> RawTree<T, X> {
    pub fn with_capacity(capacity: usize) -> Self {
        RawTree {
            arena: TypedArena::with_capacity(capacity),
            root: None,
            len: 0,
            mirrored: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn allocated(&self) -> usize {
        self.arena.len()
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
        self.mirrored = false;
    }

    pub fn node(&self, handle: Handle) -> &Node<T, X> {
        &self.arena[handle]
    }

    pub fn node_mut(&mut self, handle: Handle) -> &mut Node<T, X> {
        &mut self.arena[handle]
    }

    pub fn parent(&self, handle: Handle) -> Link {
        self.arena[handle].parent
    }

    pub fn child(&self, handle: Handle, side: Side) -> Link {
        self.arena[handle].child(side)
    }

    pub fn set_child(&mut self, handle: Handle, side: Side, child: Link) {
        self.arena[handle].replace_child(side, child);
    }

    /// Which side of its parent `handle` hangs off, or `None` for the root.
    pub fn side_of(&self, handle: Handle) -> Option<Side> {
        let parent = self.parent(handle)?;
        if self.child(parent, Side::Left) == Some(handle) {
            Some(Side::Left)
        } else {
            debug_assert_eq!(self.child(parent, Side::Right), Some(handle));
            Some(Side::Right)
        }
    }

    pub fn sibling(&self, handle: Handle) -> Link {
        let parent = self.parent(handle)?;
        let side = self.side_of(handle)?;
        self.child(parent, side.opposite())
    }

    /// Points whatever referred to `old` (its parent's link or the root) at `new`.
    pub fn replace_in_parent(&mut self, old: Handle, new: Link) {
        match self.parent(old) {
            Some(parent) => {
                let side = self
                    .side_of(old)
                    .expect("Expected a node with a parent to hang off one of its sides.");
                self.set_child(parent, side, new);
            }
            None => self.root = new,
        }
    }

    /// Leftmost node of the subtree rooted at `handle`.
    pub fn first(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.child(handle, Side::Left) {
            handle = left;
        }
        handle
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub fn last(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.child(handle, Side::Right) {
            handle = right;
        }
        handle
    }

    /// The node visited right after `handle` by an in-order walk.
    pub fn successor(&self, handle: Handle) -> Link {
        self.step(handle, Side::Right)
    }

    /// The node visited right before `handle` by an in-order walk.
    pub fn predecessor(&self, handle: Handle) -> Link {
        self.step(handle, Side::Left)
    }

    fn step(&self, handle: Handle, side: Side) -> Link {
        if let Some(child) = self.child(handle, side) {
            return Some(match side {
                Side::Right => self.first(child),
                Side::Left => self.last(child),
            });
        }

        // climb while we are the `side` child; the first ancestor reached from the other side
        // is the answer
        let mut curr = handle;
        while let Some(parent) = self.parent(curr) {
            if self.child(parent, side) != Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Direction to descend for an element that compared `ordering` against a node.
    fn direction(&self, ordering: Ordering) -> Option<Side> {
        let side = match ordering {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => return None,
        };
        Some(if self.mirrored { side.opposite() } else { side })
    }

    /// Compares two elements in the order the tree is currently laid out in.
    pub fn layout_order<C>(&self, comparator: &C, lhs: &T, rhs: &T) -> Ordering
    where
        C: Compare<T>,
    {
        let ordering = comparator.compare(lhs, rhs);
        if self.mirrored {
            ordering.reverse()
        } else {
            ordering
        }
    }

    pub fn search<C>(&self, comparator: &C, element: &T) -> Search
    where
        C: Compare<T>,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let ordering = comparator.compare(element, &self.node(handle).element);
            match self.direction(ordering) {
                None => return Search::Found(handle),
                Some(next) => {
                    parent = Some(handle);
                    side = next;
                    curr = self.child(handle, next);
                }
            }
        }
        Search::Vacant { parent, side }
    }

    pub fn find<C>(&self, comparator: &C, element: &T) -> Link
    where
        C: Compare<T>,
    {
        match self.search(comparator, element) {
            Search::Found(handle) => Some(handle),
            Search::Vacant { .. } => None,
        }
    }

    /// Links a new leaf into a vacant position found by `search`.
    pub fn attach(&mut self, element: T, extra: X, parent: Link, side: Side) -> Handle {
        let handle = self.arena.allocate(Node::new(element, extra, parent));
        match parent {
            Some(parent) => {
                debug_assert!(self.child(parent, side).is_none());
                self.set_child(parent, side, Some(handle));
            }
            None => {
                debug_assert!(self.root.is_none());
                self.root = Some(handle);
            }
        }
        self.len += 1;
        handle
    }

    /// Unlinks a node with at most one child, splicing that child into its place, and frees
    /// it.
    pub fn splice_out(&mut self, handle: Handle) -> (T, Removed<X>) {
        let node = self.node(handle);
        debug_assert!(!node.is_full(), "cannot splice out a node with two children");
        let replacement = node.left.or(node.right);
        let parent = node.parent;

        let slot = parent.map(|parent| {
            let side = self
                .side_of(handle)
                .expect("Expected a node with a parent to hang off one of its sides.");
            (parent, side)
        });
        self.replace_in_parent(handle, replacement);
        if let Some(replacement) = replacement {
            self.node_mut(replacement).parent = parent;
        }

        let Node { element, extra, .. } = self.arena.free(handle);
        self.len -= 1;
        (
            element,
            Removed {
                slot,
                replacement,
                extra,
            },
        )
    }

    /// Mirrors the tree by swapping the children of every node, breadth first.
    pub fn invert(&mut self) {
        let mut queue: VecDeque<Handle> = self.root.into_iter().collect();
        while let Some(handle) = queue.pop_front() {
            let node = self.node_mut(handle);
            mem::swap(&mut node.left, &mut node.right);
            queue.extend(node.left);
            queue.extend(node.right);
        }
        self.mirrored = !self.mirrored;
    }

    /// Removes every node and returns the elements in in-order sequence.
    pub fn take_in_order(&mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.len);
        let _ = self.inorder(|handle| {
            handles.push(handle);
            ControlFlow::<()>::Continue(())
        });
        let elements = handles
            .into_iter()
            .map(|handle| self.arena.free(handle).element)
            .collect();
        self.clear();
        elements
    }
}
