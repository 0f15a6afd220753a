use crate::arena::Handle;
use crate::balance::Balance;
use crate::node::{Link, Side};
use crate::raw::{RawTree, Removed};
use crate::rotate::{rotate, rotate_left, rotate_right};
use tracing::trace;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// Color balancing: the root is black, red nodes have black children and every path down to
/// an absent link crosses the same number of black nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedBlack;

// absent links count as black
fn color_of<T>(raw: &RawTree<T, Color>, link: Link) -> Color {
    match link {
        None => Color::Black,
        Some(handle) => raw.node(handle).extra,
    }
}

fn is_red<T>(raw: &RawTree<T, Color>, link: Link) -> bool {
    color_of(raw, link) == Color::Red
}

fn is_black<T>(raw: &RawTree<T, Color>, link: Link) -> bool {
    color_of(raw, link) == Color::Black
}

fn paint<T>(raw: &mut RawTree<T, Color>, link: Link, color: Color) {
    if let Some(handle) = link {
        raw.node_mut(handle).extra = color;
    }
}

/// Restores the invariant after the subtree on `side` of `parent` lost one black node.
fn fix_deficit<T>(raw: &mut RawTree<T, Color>, mut parent: Handle, mut side: Side) {
    loop {
        let far_side = side.opposite();
        let mut sibling = raw
            .child(parent, far_side)
            .expect("Expected a black-height deficit to have a sibling subtree.");

        if is_red(raw, Some(sibling)) {
            trace!(?parent, %side, "red sibling, rotating it above the parent");
            paint(raw, Some(sibling), Color::Black);
            paint(raw, Some(parent), Color::Red);
            rotate::<T, RedBlack>(raw, parent, side);
            sibling = raw
                .child(parent, far_side)
                .expect("Expected the red sibling's child to become the new sibling.");
        }

        let near = raw.child(sibling, side);
        let far = raw.child(sibling, far_side);
        if is_black(raw, near) && is_black(raw, far) {
            // merge the parent down with the sibling
            let parent_was_black = is_black(raw, Some(parent));
            paint(raw, Some(parent), Color::Black);
            paint(raw, Some(sibling), Color::Red);
            if !parent_was_black {
                trace!(?parent, "black sibling, red parent absorbs the deficit");
                return;
            }

            trace!(?parent, "black sibling, deficit moves up");
            match (raw.parent(parent), raw.side_of(parent)) {
                (Some(grand), Some(parent_side)) => {
                    parent = grand;
                    side = parent_side;
                    continue;
                }
                _ => return,
            }
        }

        // borrow a red node from the sibling
        trace!(?parent, %side, "black sibling with a red child");
        if is_black(raw, far) {
            rotate::<T, RedBlack>(raw, sibling, far_side);
            sibling = raw
                .child(parent, far_side)
                .expect("Expected the rotated sibling to still hang off the parent.");
        }
        let parent_color = color_of(raw, Some(parent));
        paint(raw, Some(sibling), parent_color);
        let far = raw.child(sibling, far_side);
        paint(raw, far, Color::Black);
        paint(raw, Some(parent), Color::Black);
        rotate::<T, RedBlack>(raw, parent, side);
        return;
    }
}

/// Returns the black height of the subtree, counting the absent links below it.
fn check_subtree<T>(raw: &RawTree<T, Color>, link: Link) -> usize {
    let handle = match link {
        None => return 1,
        Some(handle) => handle,
    };
    let node = raw.node(handle);
    if node.extra == Color::Red {
        assert!(
            is_black(raw, node.left) && is_black(raw, node.right),
            "red-black violation: red node {handle:?} has a red child",
        );
    }
    let left = check_subtree(raw, node.left);
    let right = check_subtree(raw, node.right);
    assert_eq!(
        left, right,
        "red-black violation: black heights {left} and {right} differ below {handle:?}",
    );
    left + usize::from(node.extra == Color::Black)
}

impl Balance for RedBlack {
    type Extra = Color;

    fn leaf() -> Color {
        Color::Red
    }

    fn after_insert<T>(raw: &mut RawTree<T, Color>, handle: Handle) {
        let mut node = handle;
        loop {
            let parent = match raw.parent(node) {
                None => {
                    paint(raw, Some(node), Color::Black);
                    return;
                }
                Some(parent) => parent,
            };
            if is_black(raw, Some(parent)) {
                return;
            }

            // the root is black, so a red parent always has a parent of its own
            let grand = raw
                .parent(parent)
                .expect("Expected a red node to have a parent.");
            let uncle = raw.sibling(parent);
            paint(raw, Some(grand), Color::Red);

            if is_red(raw, uncle) {
                trace!(?grand, "red uncle, recoloring and moving up");
                paint(raw, Some(parent), Color::Black);
                paint(raw, uncle, Color::Black);
                node = grand;
                continue;
            }

            let shape = (raw.side_of(parent), raw.side_of(node));
            trace!(?grand, ?shape, "black uncle, rotating");
            match shape {
                (Some(Side::Left), Some(Side::Left)) => {
                    paint(raw, Some(parent), Color::Black);
                    rotate_right::<T, RedBlack>(raw, grand);
                }
                (Some(Side::Left), Some(Side::Right)) => {
                    paint(raw, Some(node), Color::Black);
                    rotate_left::<T, RedBlack>(raw, parent);
                    rotate_right::<T, RedBlack>(raw, grand);
                }
                (Some(Side::Right), Some(Side::Left)) => {
                    paint(raw, Some(node), Color::Black);
                    rotate_right::<T, RedBlack>(raw, parent);
                    rotate_left::<T, RedBlack>(raw, grand);
                }
                (Some(Side::Right), Some(Side::Right)) => {
                    paint(raw, Some(parent), Color::Black);
                    rotate_left::<T, RedBlack>(raw, grand);
                }
                _ => unreachable!(),
            }
            return;
        }
    }

    fn after_remove<T>(raw: &mut RawTree<T, Color>, removed: Removed<Color>) {
        match removed.replacement {
            Some(replacement) if is_red(raw, Some(replacement)) => {
                paint(raw, Some(replacement), Color::Black);
                return;
            }
            None if removed.extra == Color::Red => return,
            _ => {},
        }

        if let Some((parent, side)) = removed.slot {
            fix_deficit(raw, parent, side);
        }
    }

    fn assert_valid<T>(raw: &RawTree<T, Color>) {
        assert!(
            is_black(raw, raw.root),
            "red-black violation: the root is red",
        );
        check_subtree(raw, raw.root);
    }
}
