mod common;

use balanced_bst::{AvlTree, BsTree, RedBlackTree};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16),
    Remove(u16),
    Invert,
}

fn ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            6 => (0..512u16).prop_map(Op::Insert),
            4 => (0..512u16).prop_map(Op::Remove),
            1 => Just(Op::Invert),
        ],
        1..max_len,
    )
}

macro_rules! run_ops {
    ($tree:ident, $ops:ident) => {{
        common::init_tracing();
        let mut expected = BTreeSet::new();
        let mut inverted = false;

        for op in $ops {
            tracing::debug!(?op, "applying");
            match op {
                Op::Insert(x) => {
                    prop_assert_eq!($tree.insert(x).is_some(), !expected.insert(x));
                }
                Op::Remove(x) => {
                    prop_assert_eq!($tree.remove(&x), expected.take(&x));
                }
                Op::Invert => {
                    $tree.invert();
                    inverted = !inverted;
                }
            }
            $tree.assert_valid();
            prop_assert_eq!($tree.len(), expected.len());
        }

        let walked: Vec<u16> = $tree.iter().copied().collect();
        let mut sorted: Vec<u16> = expected.into_iter().collect();
        if inverted {
            sorted.reverse();
        }
        prop_assert_eq!(walked, sorted);
    }};
}

proptest! {
    #[test]
    fn random_ops_bs_tree(input in ops(300)) {
        let mut tree = BsTree::new();
        run_ops!(tree, input);
    }

    #[test]
    fn random_ops_avl_tree(input in ops(500)) {
        let mut tree = AvlTree::new();
        run_ops!(tree, input);
    }

    #[test]
    fn random_ops_red_black_tree(input in ops(500)) {
        let mut tree = RedBlackTree::new();
        run_ops!(tree, input);
    }

    #[test]
    fn height_is_logarithmic(input in proptest::collection::vec(any::<u32>(), 1..1_000)) {
        let avl: AvlTree<u32> = input.iter().copied().collect();
        let red_black: RedBlackTree<u32> = input.iter().copied().collect();
        let n = avl.len() as f64;

        prop_assert!((avl.height() as f64) <= 1.45 * (n + 2.0).log2());
        prop_assert!((red_black.height() as f64) <= 2.0 * (n + 1.0).log2());
    }
}
