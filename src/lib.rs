//! Binary search trees with pluggable balancing strategies.
//!
//! `Tree<T, B, C>` is an ordered set of `T`. The balancing strategy `B` is chosen at compile
//! time: `Unbalanced` never restructures, `Avl` keeps subtree heights within one of each other
//! and `RedBlack` keeps every root-to-leaf path within a factor of two. All three share the same
//! search, insertion and removal code and differ only in how they repair the tree afterwards.
//!
//! Nodes live in an arena and refer to their parent and children by index, so no node is ever
//! owned through a chain of boxes and every traversal is iterative.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{AvlTree, Entry};
//! use std::ops::ControlFlow;
//!
//! let mut tree = AvlTree::new();
//! for x in [85, 19, 69, 3, 7, 99, 95] {
//!     tree.insert(x);
//! }
//!
//! let mut levels = Vec::new();
//! let _ = tree.level_order(|x| {
//!     levels.push(*x);
//!     ControlFlow::<()>::Continue(())
//! });
//! assert_eq!(levels, vec![69, 7, 95, 3, 19, 85, 99]);
//! assert_eq!(tree.height(), 3);
//! assert!(tree.is_complete());
//!
//! let mut map = AvlTree::new();
//! map.insert(Entry::new("b", 2));
//! map.insert(Entry::new("a", 1));
//! assert_eq!(map.min().map(|entry| entry.key), Some("a"));
//! ```

mod arena;
mod balance;
mod compare;
mod dot;
mod entry;
mod iter;
mod node;
mod raw;
mod rotate;
mod serde_impls;
mod traverse;
mod tree;

pub use crate::balance::{Avl, Balance, Color, RedBlack, Unbalanced};
pub use crate::compare::{Compare, Natural};
pub use crate::dot::Dot;
pub use crate::entry::Entry;
pub use crate::iter::{IntoIter, Iter};
pub use crate::node::Side;
pub use crate::tree::{AvlTree, BsTree, RedBlackTree, Tree};
