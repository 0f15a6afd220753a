use crate::arena::Handle;
use crate::balance::{Avl, Balance, RedBlack, Unbalanced};
use crate::compare::{Compare, Natural};
use crate::dot::Dot;
use crate::iter::{IntoIter, Iter};
use crate::node::Side;
use crate::raw::{RawTree, Search};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ops::ControlFlow;
use tracing::trace;

/// An ordered set backed by a binary search tree with a pluggable balancing strategy.
///
/// `B` selects how the tree keeps itself balanced (`Unbalanced`, `Avl` or `RedBlack`) and `C`
/// is the order the elements are kept in. Elements that compare equal are the same key, so
/// storing `Entry` values makes the tree an ordered map.
///
/// # Examples
///
/// ```
/// use balanced_bst::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(3);
/// tree.insert(1);
/// tree.insert(2);
///
/// assert_eq!(tree.len(), 3);
/// assert!(tree.contains(&2));
/// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
///
/// assert_eq!(tree.remove(&2), Some(2));
/// assert_eq!(tree.remove(&2), None);
/// ```
pub struct Tree<T, B = Unbalanced, C = Natural>
where
    B: Balance,
{
    raw: RawTree<T, B::Extra>,
    comparator: C,
    _balance: PhantomData<B>,
}

/// A binary search tree that never rebalances.
pub type BsTree<T, C = Natural> = Tree<T, Unbalanced, C>;

/// A binary search tree kept height balanced.
pub type AvlTree<T, C = Natural> = Tree<T, Avl, C>;

/// A binary search tree kept color balanced.
pub type RedBlackTree<T, C = Natural> = Tree<T, RedBlack, C>;

impl<T, B> Tree<T, B, Natural>
where
    T: Ord,
    B: Balance,
{
    /// Constructs a new, empty tree ordered by `T`'s `Ord` implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree: AvlTree<u32> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty tree with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<T, B, C> Tree<T, B, C>
where
    B: Balance,
    C: Compare<T>,
{
    /// Constructs a new, empty tree ordered by `comparator` instead of `T`'s own order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let mut tree = AvlTree::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// tree.extend(vec![1, 3, 2]);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&3, &2, &1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Tree {
            raw: RawTree::with_capacity(capacity),
            comparator,
            _balance: PhantomData,
        }
    }

    /// Inserts an element into the tree. If an equal element already exists, it is replaced in
    /// place and returned; the shape of the tree does not change.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert(1), None);
    /// assert_eq!(tree.insert(1), Some(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[doc(alias = "add")]
    pub fn insert(&mut self, element: T) -> Option<T> {
        match self.raw.search(&self.comparator, &element) {
            Search::Found(handle) => {
                let old = mem::replace(&mut self.raw.node_mut(handle).element, element);
                Some(old)
            }
            Search::Vacant { parent, side } => {
                let handle = self.raw.attach(element, B::leaf(), parent, side);
                trace!(?handle, ?parent, %side, "attached leaf");
                B::after_insert(&mut self.raw, handle);
                None
            }
        }
    }

    /// Removes an element from the tree and returns it. Returns `None` if no equal element
    /// exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, element: &T) -> Option<T> {
        let target = self.raw.find(&self.comparator, element)?;

        // a node with two children trades places with its successor, which has at most one
        // child and is the node that actually gets unlinked
        let victim = if self.raw.node(target).is_full() {
            self.raw
                .successor(target)
                .expect("Expected a node with a right child to have a successor.")
        } else {
            target
        };

        let (element, removed) = self.raw.splice_out(victim);
        trace!(?target, ?victim, slot = ?removed.slot, "unlinked node");
        let element = if victim == target {
            element
        } else {
            mem::replace(&mut self.raw.node_mut(target).element, element)
        };
        B::after_remove(&mut self.raw, removed);
        Some(element)
    }

    /// Checks if an equal element exists in the tree.
    pub fn contains(&self, element: &T) -> bool {
        self.raw.find(&self.comparator, element).is_some()
    }

    /// Returns the stored element equal to `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{BsTree, Entry};
    ///
    /// let mut tree = BsTree::new();
    /// tree.insert(Entry::new(1, "one"));
    /// assert_eq!(tree.get(&Entry::new(1, "")).map(|entry| entry.value), Some("one"));
    /// assert!(tree.get(&Entry::new(2, "")).is_none());
    /// ```
    #[doc(alias = "find")]
    pub fn get(&self, element: &T) -> Option<&T> {
        self.element(self.raw.find(&self.comparator, element))
    }

    /// Returns the element that follows `element` in the tree's order. Returns `None` if
    /// `element` is not in the tree or is the last element.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree: AvlTree<_> = vec![1, 3, 5].into_iter().collect();
    /// assert_eq!(tree.successor(&3), Some(&5));
    /// assert_eq!(tree.successor(&5), None);
    /// assert_eq!(tree.successor(&4), None);
    /// ```
    pub fn successor(&self, element: &T) -> Option<&T> {
        let handle = self.raw.find(&self.comparator, element)?;
        self.element(self.raw.successor(handle))
    }

    /// Returns the element that precedes `element` in the tree's order. Returns `None` if
    /// `element` is not in the tree or is the first element.
    pub fn predecessor(&self, element: &T) -> Option<&T> {
        let handle = self.raw.find(&self.comparator, element)?;
        self.element(self.raw.predecessor(handle))
    }

    /// Asserts every invariant of the tree: parent and child links agree, the elements are
    /// strictly ordered, the count matches and the balancing strategy's own rules hold.
    ///
    /// # Panics
    ///
    /// Panics with a description of the first violation found.
    #[track_caller]
    pub fn assert_valid(&self) {
        if let Some(root) = self.raw.root {
            assert_eq!(self.raw.parent(root), None, "link violation: the root has a parent");
        }

        let mut count = 0;
        let mut prev: Option<&T> = None;
        let _ = self.raw.inorder(|handle| {
            count += 1;
            for side in [Side::Left, Side::Right] {
                if let Some(child) = self.raw.child(handle, side) {
                    assert_eq!(
                        self.raw.parent(child),
                        Some(handle),
                        "link violation: {side} child of {handle:?} points elsewhere",
                    );
                }
            }

            let element = &self.raw.node(handle).element;
            if let Some(prev) = prev {
                assert!(
                    self.raw.layout_order(&self.comparator, prev, element) == Ordering::Less,
                    "ordering violation: in-order walk is not strictly increasing at {handle:?}",
                );
            }
            prev = Some(element);
            ControlFlow::<()>::Continue(())
        });

        assert_eq!(count, self.raw.len(), "count violation: reachable nodes differ from len");
        assert_eq!(
            self.raw.allocated(),
            self.raw.len(),
            "count violation: unreachable nodes are still allocated",
        );
        B::assert_valid(&self.raw);
    }
}

impl<T, B, C> Tree<T, B, C>
where
    B: Balance,
{
    fn element(&self, link: Option<Handle>) -> Option<&T> {
        link.map(|handle| &self.raw.node(handle).element)
    }

    /// Returns the number of elements in the tree.
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first element in the tree's order.
    pub fn min(&self) -> Option<&T> {
        self.element(self.raw.root.map(|root| self.raw.first(root)))
    }

    /// Returns the last element in the tree's order.
    pub fn max(&self) -> Option<&T> {
        self.element(self.raw.root.map(|root| self.raw.last(root)))
    }

    /// Visits each node before its left subtree and then its right subtree. Stops at the
    /// first `ControlFlow::Break` and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    /// use std::ops::ControlFlow;
    ///
    /// let tree: AvlTree<_> = vec![1, 2, 3].into_iter().collect();
    /// let mut seen = Vec::new();
    /// let _ = tree.preorder(|x| {
    ///     seen.push(*x);
    ///     ControlFlow::<()>::Continue(())
    /// });
    /// assert_eq!(seen, vec![2, 1, 3]);
    /// ```
    pub fn preorder<'a, R, F>(&'a self, mut visit: F) -> ControlFlow<R>
    where
        F: FnMut(&'a T) -> ControlFlow<R>,
    {
        let raw = &self.raw;
        raw.preorder(|handle| visit(&raw.node(handle).element))
    }

    /// Visits every element in the tree's order. Stops at the first `ControlFlow::Break` and
    /// returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BsTree;
    /// use std::ops::ControlFlow;
    ///
    /// let tree: BsTree<_> = vec![5, 2, 8, 1].into_iter().collect();
    /// let first_even = tree.inorder(|x| {
    ///     if x % 2 == 0 {
    ///         ControlFlow::Break(*x)
    ///     } else {
    ///         ControlFlow::Continue(())
    ///     }
    /// });
    /// assert_eq!(first_even, ControlFlow::Break(2));
    /// ```
    pub fn inorder<'a, R, F>(&'a self, mut visit: F) -> ControlFlow<R>
    where
        F: FnMut(&'a T) -> ControlFlow<R>,
    {
        let raw = &self.raw;
        raw.inorder(|handle| visit(&raw.node(handle).element))
    }

    /// Visits both subtrees of a node before the node itself.
    pub fn postorder<'a, R, F>(&'a self, mut visit: F) -> ControlFlow<R>
    where
        F: FnMut(&'a T) -> ControlFlow<R>,
    {
        let raw = &self.raw;
        raw.postorder(|handle| visit(&raw.node(handle).element))
    }

    /// Visits the elements level by level, left to right.
    pub fn level_order<'a, R, F>(&'a self, mut visit: F) -> ControlFlow<R>
    where
        F: FnMut(&'a T) -> ControlFlow<R>,
    {
        let raw = &self.raw;
        raw.level_order(|handle| visit(&raw.node(handle).element))
    }

    /// Returns the number of levels in the tree. The empty tree has height 0.
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns `true` if every level of the tree is full except possibly the last, which is
    /// filled from the left. The empty tree is not complete.
    pub fn is_complete(&self) -> bool {
        self.raw.is_complete()
    }

    /// Mirrors the tree by swapping the children of every node.
    ///
    /// Afterwards the tree iterates in descending order of its comparator. Lookups, inserts and
    /// removals keep working; inverting again restores the original layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let mut tree: AvlTree<_> = vec![1, 2, 3].into_iter().collect();
    /// tree.invert();
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&3, &2, &1]);
    /// tree.insert(4);
    /// assert_eq!(tree.min(), Some(&4));
    /// ```
    #[doc(alias = "invert_tree")]
    pub fn invert(&mut self) {
        self.raw.invert();
    }

    /// Returns an iterator over the tree. The iterator yields elements in the tree's order.
    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter::new(&self.raw)
    }

    /// Returns a Graphviz `digraph` description of the tree's shape. Each node is labelled with
    /// its element and the strategy's bookkeeping. An empty tree formats as an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BsTree;
    ///
    /// let tree: BsTree<_> = vec![2, 1].into_iter().collect();
    /// let dot = tree.dot().to_string();
    /// assert!(dot.starts_with("digraph"));
    /// assert!(dot.contains("n0 [label=\"2\"]"));
    /// assert!(dot.contains("n0 -> n1"));
    /// ```
    pub fn dot(&self) -> Dot<'_, T, B> {
        Dot::new(&self.raw)
    }
}

impl<T, B, C> Default for Tree<T, B, C>
where
    B: Balance,
    C: Compare<T> + Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, B, C> fmt::Debug for Tree<T, B, C>
where
    T: fmt::Debug,
    B: Balance,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two trees are equal if they hold equal elements in the same comparator order. Shape and
/// inversion are ignored, so an inverted tree equals an uninverted one with the same elements.
impl<T, B, C> PartialEq for Tree<T, B, C>
where
    T: PartialEq,
    B: Balance,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.raw.is_mirrored() == other.raw.is_mirrored() {
            self.iter().eq(other.iter())
        } else {
            self.iter().eq(other.iter().rev())
        }
    }
}

impl<T, B, C> Eq for Tree<T, B, C>
where
    T: Eq,
    B: Balance,
{
}

impl<T, B, C> Extend<T> for Tree<T, B, C>
where
    B: Balance,
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T, B, C> FromIterator<T> for Tree<T, B, C>
where
    B: Balance,
    C: Compare<T> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T, B, C> IntoIterator for Tree<T, B, C>
where
    B: Balance,
{
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.raw.take_in_order())
    }
}

impl<'a, T, B, C> IntoIterator for &'a Tree<T, B, C>
where
    B: Balance,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{AvlTree, BsTree, RedBlackTree};
    use std::ops::ControlFlow;

    #[test]
    fn test_len_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert!(!tree.is_complete());
    }

    #[test]
    fn test_min_max_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn test_insert_replace_keeps_shape() {
        let mut tree: AvlTree<u32> = vec![4, 2, 6, 1, 3].into_iter().collect();
        let before = tree.dot().to_string();
        assert_eq!(tree.insert(2), Some(2));
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.dot().to_string(), before);
    }

    #[test]
    fn test_remove_two_children() {
        let mut tree: BsTree<u32> = vec![7, 4, 9, 2, 5, 8, 11].into_iter().collect();
        assert_eq!(tree.remove(&7), Some(7));
        tree.assert_valid();

        let mut seen = Vec::new();
        let _ = tree.preorder(|x| {
            seen.push(*x);
            ControlFlow::<()>::Continue(())
        });
        assert_eq!(seen, vec![8, 4, 2, 5, 9, 11]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut tree: RedBlackTree<u32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(tree.remove(&4), None);
        assert_eq!(tree.len(), 3);
        tree.assert_valid();
    }

    #[test]
    fn test_successor_predecessor() {
        let tree: RedBlackTree<u32> = (0..10).map(|x| x * 2).collect();
        assert_eq!(tree.successor(&4), Some(&6));
        assert_eq!(tree.predecessor(&4), Some(&2));
        assert_eq!(tree.predecessor(&0), None);
        assert_eq!(tree.successor(&18), None);
        assert_eq!(tree.successor(&5), None);
    }

    #[test]
    fn test_clear() {
        let mut tree: AvlTree<u32> = (0..10).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.iter().next(), None);
        tree.insert(1);
        tree.assert_valid();
    }

    #[test]
    fn test_invert_twice_restores_shape() {
        let mut tree: AvlTree<u32> = vec![85, 19, 69, 3, 7, 99, 95].into_iter().collect();
        let before = tree.dot().to_string();
        tree.invert();
        tree.assert_valid();
        assert_eq!(tree.iter().next(), Some(&99));
        tree.invert();
        assert_eq!(tree.dot().to_string(), before);
    }

    #[test]
    fn test_inverted_tree_stays_searchable() {
        let mut tree: RedBlackTree<u32> = (0..20).collect();
        tree.invert();
        for x in 20..40 {
            tree.insert(x);
            tree.assert_valid();
        }
        for x in (0..40).step_by(3) {
            assert_eq!(tree.remove(&x), Some(x));
            tree.assert_valid();
        }
        assert!(tree.contains(&1));
        assert!(!tree.contains(&3));
        assert_eq!(tree.iter().next(), Some(&38));
    }

    #[test]
    fn test_debug_and_eq() {
        let a: AvlTree<u32> = vec![3, 1, 2].into_iter().collect();
        let b: AvlTree<u32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), "{1, 2, 3}");
    }

    #[test]
    fn test_eq_ignores_inversion() {
        let mut a: RedBlackTree<u32> = (0..16).collect();
        let b: RedBlackTree<u32> = (0..16).rev().collect();
        a.invert();
        assert_eq!(a, b);
        assert_eq!(b, a);

        let c: RedBlackTree<u32> = (1..17).collect();
        assert_ne!(a, c);
        a.invert();
        assert_eq!(a, b);
    }

    #[test]
    fn test_into_iter() {
        let tree: BsTree<u32> = vec![5, 1, 3].into_iter().collect();
        assert_eq!(tree.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }
}
