//! Iterative traversals and shape queries.
//!
//! All walks use an explicit stack or queue so their native stack usage does not depend on the
//! height of the tree. Visitors return `ControlFlow::Break` to stop early.

use crate::arena::Handle;
use crate::node::Side;
use crate::raw::RawTree;
use std::collections::VecDeque;
use std::ops::ControlFlow;

impl<T, X> RawTree<T, X> {
    pub fn preorder<R, F>(&self, mut visit: F) -> ControlFlow<R>
    where
        F: FnMut(Handle) -> ControlFlow<R>,
    {
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            visit(handle)?;
            let node = self.node(handle);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        ControlFlow::Continue(())
    }

    pub fn inorder<R, F>(&self, mut visit: F) -> ControlFlow<R>
    where
        F: FnMut(Handle) -> ControlFlow<R>,
    {
        let mut stack = Vec::new();
        let mut curr = self.root;
        loop {
            if let Some(handle) = curr {
                stack.push(handle);
                curr = self.child(handle, Side::Left);
            } else if let Some(handle) = stack.pop() {
                visit(handle)?;
                curr = self.child(handle, Side::Right);
            } else {
                return ControlFlow::Continue(());
            }
        }
    }

    pub fn postorder<R, F>(&self, mut visit: F) -> ControlFlow<R>
    where
        F: FnMut(Handle) -> ControlFlow<R>,
    {
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        let mut prev: Option<Handle> = None;
        while let Some(&top) = stack.last() {
            let node = self.node(top);
            // children are pushed above their parent, so once the last visited node is a child
            // of `top`, every child of `top` is done
            let children_done = prev.map_or(false, |prev| self.parent(prev) == Some(top));
            if node.is_leaf() || children_done {
                stack.pop();
                visit(top)?;
                prev = Some(top);
            } else {
                stack.extend(node.right);
                stack.extend(node.left);
            }
        }
        ControlFlow::Continue(())
    }

    pub fn level_order<R, F>(&self, mut visit: F) -> ControlFlow<R>
    where
        F: FnMut(Handle) -> ControlFlow<R>,
    {
        let mut queue: VecDeque<Handle> = self.root.into_iter().collect();
        while let Some(handle) = queue.pop_front() {
            visit(handle)?;
            let node = self.node(handle);
            queue.extend(node.left);
            queue.extend(node.right);
        }
        ControlFlow::Continue(())
    }

    /// Number of levels, counted breadth first. The empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut queue: VecDeque<Handle> = self.root.into_iter().collect();
        let mut height = 0;
        while !queue.is_empty() {
            height += 1;
            for _ in 0..queue.len() {
                let handle = queue.pop_front().expect("Expected the level to be non-empty.");
                let node = self.node(handle);
                queue.extend(node.left);
                queue.extend(node.right);
            }
        }
        height
    }

    /// Whether every level is full except possibly the last, which is filled left to right.
    /// The empty tree is not considered complete.
    pub fn is_complete(&self) -> bool {
        let mut queue: VecDeque<Handle> = match self.root {
            Some(root) => VecDeque::from(vec![root]),
            None => return false,
        };

        // set once a node is missing a child: from then on every node must be a leaf
        let mut leaves_only = false;
        while let Some(handle) = queue.pop_front() {
            let node = self.node(handle);
            if leaves_only && !node.is_leaf() {
                return false;
            }

            match (node.left, node.right) {
                (Some(left), Some(right)) => {
                    queue.push_back(left);
                    queue.push_back(right);
                }
                (Some(left), None) => {
                    queue.push_back(left);
                    leaves_only = true;
                }
                (None, Some(_)) => return false,
                (None, None) => leaves_only = true,
            }
        }
        true
    }
}
