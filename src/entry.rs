use serde_derive::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A key-value pair that is ordered by its key alone.
///
/// Storing entries in a tree turns it into an ordered map: inserting an entry whose key is
/// already present overwrites the old entry in place, value included.
///
/// # Examples
///
/// ```
/// use balanced_bst::{AvlTree, Entry};
///
/// let mut map = AvlTree::new();
/// map.insert(Entry::new("a", 1));
/// let old = map.insert(Entry::new("a", 2));
///
/// assert_eq!(old, Some(Entry::new("a", 1)));
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get(&Entry::new("a", 0)).map(|entry| entry.value), Some(2));
/// ```
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }
}

impl<K, V> fmt::Debug for Entry<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {:?}", self.key, self.value)
    }
}

impl<K, V> fmt::Display for Entry<K, V>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

impl<K, V> Ord for Entry<K, V>
where
    K: Ord,
{
    fn cmp(&self, other: &Entry<K, V>) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> PartialOrd for Entry<K, V>
where
    K: Ord,
{
    fn partial_cmp(&self, other: &Entry<K, V>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> PartialEq for Entry<K, V>
where
    K: Ord,
{
    fn eq(&self, other: &Entry<K, V>) -> bool {
        self.key == other.key
    }
}

impl<K, V> Eq for Entry<K, V> where K: Ord {}
