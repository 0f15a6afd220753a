use crate::arena::Handle;
use crate::balance::Balance;
use crate::node::{Link, Side};
use crate::raw::{RawTree, Removed};
use crate::rotate::{rotate_left, rotate_right};
use std::cmp;
use tracing::trace;

/// Height balancing: the heights of the two subtrees of any node differ by at most one.
///
/// Each node stores the height of its subtree, with a leaf at height 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

fn height<T>(raw: &RawTree<T, usize>, link: Link) -> usize {
    match link {
        None => 0,
        Some(handle) => raw.node(handle).extra,
    }
}

fn update<T>(raw: &mut RawTree<T, usize>, handle: Handle) {
    let node = raw.node(handle);
    let new_height = cmp::max(height(raw, node.left), height(raw, node.right)) + 1;
    raw.node_mut(handle).extra = new_height;
}

fn balance_factor<T>(raw: &RawTree<T, usize>, handle: Handle) -> isize {
    let node = raw.node(handle);
    height(raw, node.left) as isize - height(raw, node.right) as isize
}

fn is_balanced<T>(raw: &RawTree<T, usize>, handle: Handle) -> bool {
    balance_factor(raw, handle).abs() <= 1
}

/// The child with the greater height. Ties go to the side `handle` itself hangs off, which
/// turns the fix into a single rotation whenever possible.
fn taller_child<T>(raw: &RawTree<T, usize>, handle: Handle) -> Link {
    let side = match balance_factor(raw, handle) {
        bf if bf > 0 => Side::Left,
        bf if bf < 0 => Side::Right,
        _ => raw.side_of(handle).unwrap_or(Side::Right),
    };
    raw.child(handle, side)
}

fn rebalance<T>(raw: &mut RawTree<T, usize>, grand: Handle) {
    let parent = taller_child(raw, grand).expect("Expected an unbalanced node to have a taller child.");
    let node = taller_child(raw, parent).expect("Expected the taller child to have a taller child.");

    let shape = (raw.side_of(parent), raw.side_of(node));
    trace!(?grand, ?shape, "avl rebalance");
    match shape {
        (Some(Side::Left), Some(Side::Left)) => {
            rotate_right::<T, Avl>(raw, grand);
        }
        (Some(Side::Left), Some(Side::Right)) => {
            rotate_left::<T, Avl>(raw, parent);
            rotate_right::<T, Avl>(raw, grand);
        }
        (Some(Side::Right), Some(Side::Left)) => {
            rotate_right::<T, Avl>(raw, parent);
            rotate_left::<T, Avl>(raw, grand);
        }
        (Some(Side::Right), Some(Side::Right)) => {
            rotate_left::<T, Avl>(raw, grand);
        }
        _ => unreachable!(),
    }
}

fn check_subtree<T>(raw: &RawTree<T, usize>, link: Link) -> usize {
    let handle = match link {
        None => return 0,
        Some(handle) => handle,
    };
    let node = raw.node(handle);
    let left = check_subtree(raw, node.left);
    let right = check_subtree(raw, node.right);
    assert!(
        (left as isize - right as isize).abs() <= 1,
        "AVL violation: subtree heights {left} and {right} differ by more than one at {handle:?}",
    );
    let expected = cmp::max(left, right) + 1;
    assert_eq!(
        node.extra, expected,
        "AVL violation: stored height {} at {handle:?} should be {expected}",
        node.extra,
    );
    expected
}

impl Balance for Avl {
    type Extra = usize;

    fn leaf() -> usize {
        1
    }

    fn refresh<T>(raw: &mut RawTree<T, usize>, handle: Handle) {
        update(raw, handle);
    }

    fn after_insert<T>(raw: &mut RawTree<T, usize>, handle: Handle) {
        let mut curr = raw.parent(handle);
        while let Some(node) = curr {
            if is_balanced(raw, node) {
                update(raw, node);
            } else {
                // the lowest unbalanced ancestor regains its pre-insert height, so nothing above
                // it can be out of balance
                rebalance(raw, node);
                break;
            }
            curr = raw.parent(node);
        }
    }

    fn after_remove<T>(raw: &mut RawTree<T, usize>, removed: Removed<usize>) {
        let mut curr = removed.slot.map(|(parent, _)| parent);
        while let Some(node) = curr {
            if is_balanced(raw, node) {
                update(raw, node);
            } else {
                // a rotation can shrink the subtree, so keep walking up
                rebalance(raw, node);
            }
            curr = raw.parent(node);
        }
    }

    fn assert_valid<T>(raw: &RawTree<T, usize>) {
        check_subtree(raw, raw.root);
    }
}

#[cfg(test)]
mod tests {
    use super::Avl;
    use crate::balance::Balance;
    use crate::compare::Natural;
    use crate::raw::{RawTree, Search};
    use std::ops::ControlFlow;

    fn insert(raw: &mut RawTree<u32, usize>, element: u32) {
        if let Search::Vacant { parent, side } = raw.search(&Natural, &element) {
            let handle = raw.attach(element, Avl::leaf(), parent, side);
            Avl::after_insert(raw, handle);
        }
    }

    fn preorder(raw: &RawTree<u32, usize>) -> Vec<(u32, usize)> {
        let mut out = Vec::new();
        let _ = raw.preorder(|handle| {
            let node = raw.node(handle);
            out.push((node.element, node.extra));
            ControlFlow::<()>::Continue(())
        });
        out
    }

    #[test]
    fn test_single_rotation() {
        let mut raw = RawTree::with_capacity(3);
        for element in [1, 2, 3] {
            insert(&mut raw, element);
        }
        assert_eq!(preorder(&raw), vec![(2, 2), (1, 1), (3, 1)]);
        Avl::assert_valid(&raw);
    }

    #[test]
    fn test_double_rotation() {
        let mut raw = RawTree::with_capacity(3);
        for element in [3, 1, 2] {
            insert(&mut raw, element);
        }
        assert_eq!(preorder(&raw), vec![(2, 2), (1, 1), (3, 1)]);

        let mut raw = RawTree::with_capacity(3);
        for element in [1, 3, 2] {
            insert(&mut raw, element);
        }
        assert_eq!(preorder(&raw), vec![(2, 2), (1, 1), (3, 1)]);
    }

    #[test]
    fn test_heights_after_inserts() {
        let mut raw = RawTree::with_capacity(7);
        for element in [85, 19, 69, 3, 7, 99, 95] {
            insert(&mut raw, element);
            Avl::assert_valid(&raw);
        }
        assert_eq!(
            preorder(&raw),
            vec![(69, 3), (7, 2), (3, 1), (19, 1), (95, 2), (85, 1), (99, 1)],
        );
    }

    #[test]
    #[should_panic]
    fn test_assert_valid_catches_stale_height() {
        let mut raw = RawTree::with_capacity(2);
        insert(&mut raw, 1);
        insert(&mut raw, 2);
        let root = raw.root.unwrap();
        raw.node_mut(root).extra = 5;
        Avl::assert_valid(&raw);
    }
}
