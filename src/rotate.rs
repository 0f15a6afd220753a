//! Rotation primitives shared by the balancing strategies.

use crate::arena::Handle;
use crate::balance::Balance;
use crate::node::Side;
use crate::raw::RawTree;
use tracing::trace;

/// Rotates `grand` down towards `side`: its child on the opposite side rises into its slot and
/// that child's inner subtree moves across to `grand`. Returns the risen child.
///
/// # Panics
///
/// Panics if `grand` has no child on the opposite side.
pub fn rotate<T, B>(raw: &mut RawTree<T, B::Extra>, grand: Handle, side: Side) -> Handle
where
    B: Balance,
{
    let parent = raw
        .child(grand, side.opposite())
        .expect("Expected the rising child of a rotation to be `Some`.");
    trace!(?grand, ?parent, %side, "rotating");

    let child = raw.child(parent, side);
    raw.set_child(grand, side.opposite(), child);
    raw.set_child(parent, side, Some(grand));
    after_rotate::<T, B>(raw, grand, parent, child);
    parent
}

pub fn rotate_left<T, B>(raw: &mut RawTree<T, B::Extra>, grand: Handle) -> Handle
where
    B: Balance,
{
    rotate::<T, B>(raw, grand, Side::Left)
}

pub fn rotate_right<T, B>(raw: &mut RawTree<T, B::Extra>, grand: Handle) -> Handle
where
    B: Balance,
{
    rotate::<T, B>(raw, grand, Side::Right)
}

fn after_rotate<T, B>(
    raw: &mut RawTree<T, B::Extra>,
    grand: Handle,
    parent: Handle,
    child: Option<Handle>,
) where
    B: Balance,
{
    // `grand` is still linked from its old parent at this point
    let grand_parent = raw.parent(grand);
    raw.replace_in_parent(grand, Some(parent));
    raw.node_mut(parent).parent = grand_parent;

    if let Some(child) = child {
        raw.node_mut(child).parent = Some(grand);
    }
    raw.node_mut(grand).parent = Some(parent);

    // `grand` is now below `parent`, so it has to be refreshed first
    B::refresh(raw, grand);
    B::refresh(raw, parent);
}
