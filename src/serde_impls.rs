//! A tree serializes as the sequence of its elements in the tree's order. Deserializing inserts
//! the elements one by one, so the input does not have to be sorted and later duplicates
//! overwrite earlier ones.

use crate::balance::Balance;
use crate::compare::Compare;
use crate::tree::Tree;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::cmp;
use std::fmt;
use std::marker::PhantomData;

const MAX_PREALLOCATED: usize = 4096;

impl<T, B, C> Serialize for Tree<T, B, C>
where
    T: Serialize,
    B: Balance,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

struct TreeVisitor<T, B, C> {
    marker: PhantomData<fn() -> (T, B, C)>,
}

impl<'de, T, B, C> Visitor<'de> for TreeVisitor<T, B, C>
where
    T: Deserialize<'de>,
    B: Balance,
    C: Compare<T> + Default,
{
    type Value = Tree<T, B, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of tree elements")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        // the hint comes from the input, so it is capped before preallocating
        let capacity = cmp::min(seq.size_hint().unwrap_or(0), MAX_PREALLOCATED);
        let mut tree = Tree::with_capacity_and_comparator(capacity, C::default());
        while let Some(element) = seq.next_element()? {
            tree.insert(element);
        }
        Ok(tree)
    }
}

impl<'de, T, B, C> Deserialize<'de> for Tree<T, B, C>
where
    T: Deserialize<'de>,
    B: Balance,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(TreeVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::entry::Entry;
    use crate::tree::{AvlTree, BsTree, RedBlackTree};
    use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn test_tokens_in_order() {
        let tree: AvlTree<u32> = vec![3, 1, 2].into_iter().collect();
        assert_tokens(
            &tree,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_tokens(&tree, &[Token::Seq { len: Some(0) }, Token::SeqEnd]);
    }

    #[test]
    fn test_de_unsorted_with_duplicates() {
        let tree: BsTree<u32> = vec![1, 2].into_iter().collect();
        assert_de_tokens(
            &tree,
            &[
                Token::Seq { len: None },
                Token::U32(2),
                Token::U32(1),
                Token::U32(2),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_de_oversized_length_hint() {
        let tree: AvlTree<u32> = vec![1].into_iter().collect();
        assert_de_tokens(
            &tree,
            &[
                Token::Seq { len: Some(usize::MAX / 2) },
                Token::U32(1),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_de_invalid_element() {
        assert_de_tokens_error::<RedBlackTree<u32>>(
            &[
                Token::Seq { len: Some(usize::MAX / 2) },
                Token::Str("one"),
            ],
            "invalid type: string \"one\", expected u32",
        );
    }

    #[test]
    fn test_entries() {
        let mut tree = AvlTree::new();
        tree.insert(Entry::new(1u32, 'a'));
        assert_tokens(
            &tree,
            &[
                Token::Seq { len: Some(1) },
                Token::Struct {
                    name: "Entry",
                    len: 2,
                },
                Token::Str("key"),
                Token::U32(1),
                Token::Str("value"),
                Token::Char('a'),
                Token::StructEnd,
                Token::SeqEnd,
            ],
        );
    }
}
