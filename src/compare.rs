use std::cmp::Ordering;

/// A total order over `T`.
///
/// Implementations must be a strict total order: the tree relies on `Ordering::Equal` meaning
/// "same key" and never checks that the order is consistent.
///
/// Every `Fn(&T, &T) -> Ordering` is a comparator, so a closure can be passed straight to
/// `Tree::with_comparator`.
///
/// # Examples
///
/// ```
/// use balanced_bst::{Compare, Natural};
/// use std::cmp::Ordering;
///
/// assert_eq!(Natural.compare(&1, &2), Ordering::Less);
///
/// let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
/// assert_eq!(by_len.compare(&"abc", &"de"), Ordering::Greater);
/// ```
pub trait Compare<T: ?Sized> {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// The comparator that defers to the element's own `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<T> Compare<T> for Natural
where
    T: Ord + ?Sized,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<T, F> Compare<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::{Compare, Natural};
    use std::cmp::Ordering;

    #[test]
    fn test_natural() {
        assert_eq!(Natural.compare(&3, &1), Ordering::Greater);
        assert_eq!(Natural.compare("a", "a"), Ordering::Equal);
    }

    #[test]
    fn test_closure() {
        let reverse = |a: &u32, b: &u32| b.cmp(a);
        assert_eq!(reverse.compare(&3, &1), Ordering::Less);
    }
}
