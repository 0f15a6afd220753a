use crate::balance::Balance;
use crate::node::Link;
use crate::raw::RawTree;
use std::iter::FusedIterator;
use std::vec;

/// An iterator over a `Tree` in the tree's order.
///
/// This iterator follows parent links from one node to the next, so it needs no stack.
pub struct Iter<'a, T, B>
where
    B: Balance,
{
    raw: &'a RawTree<T, B::Extra>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, T, B> Iter<'a, T, B>
where
    B: Balance,
{
    pub(crate) fn new(raw: &'a RawTree<T, B::Extra>) -> Self {
        Iter {
            raw,
            front: raw.root.map(|root| raw.first(root)),
            back: raw.root.map(|root| raw.last(root)),
            remaining: raw.len(),
        }
    }
}

impl<'a, T, B> Clone for Iter<'a, T, B>
where
    B: Balance,
{
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T, B> Iterator for Iter<'a, T, B>
where
    B: Balance,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.front = self.raw.successor(handle);
        self.remaining -= 1;
        Some(&self.raw.node(handle).element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, B> DoubleEndedIterator for Iter<'a, T, B>
where
    B: Balance,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.back = self.raw.predecessor(handle);
        self.remaining -= 1;
        Some(&self.raw.node(handle).element)
    }
}

impl<'a, T, B> ExactSizeIterator for Iter<'a, T, B> where B: Balance {}

impl<'a, T, B> FusedIterator for Iter<'a, T, B> where B: Balance {}

/// An owning iterator over a `Tree` in the tree's order.
pub struct IntoIter<T> {
    elements: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(elements: Vec<T>) -> Self {
        IntoIter {
            elements: elements.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.elements.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.elements.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
