//! Balancing strategies.
//!
//! The engine in `Tree` performs every structural edit itself and then hands the edited
//! position to the strategy's hook. A strategy owns one auxiliary field per node (`Extra`) and
//! restores its invariant by recoloring, recomputing and rotating.

mod avl;
mod red_black;

pub use self::avl::Avl;
pub use self::red_black::{Color, RedBlack};

use crate::arena::Handle;
use crate::raw::{RawTree, Removed};
use std::fmt;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Unbalanced {}
    impl Sealed for super::Avl {}
    impl Sealed for super::RedBlack {}
}

/// A balancing strategy for `Tree`.
///
/// This trait is sealed: the available strategies are `Unbalanced`, `Avl` and `RedBlack`.
pub trait Balance: sealed::Sealed + Sized {
    /// Per-node bookkeeping: nothing, a height or a color.
    type Extra: Copy + fmt::Debug;

    /// Value given to a freshly attached leaf.
    #[doc(hidden)]
    fn leaf() -> Self::Extra;

    /// Recomputes `handle`'s auxiliary field from its children. Called bottom-up after every
    /// rotation.
    #[doc(hidden)]
    fn refresh<T>(_raw: &mut RawTree<T, Self::Extra>, _handle: Handle) {}

    /// Restores the invariant after `handle` was attached as a new leaf.
    #[doc(hidden)]
    fn after_insert<T>(raw: &mut RawTree<T, Self::Extra>, handle: Handle);

    /// Restores the invariant after a node was unlinked.
    #[doc(hidden)]
    fn after_remove<T>(raw: &mut RawTree<T, Self::Extra>, removed: Removed<Self::Extra>);

    /// Panics if the strategy's invariant does not hold.
    #[doc(hidden)]
    fn assert_valid<T>(_raw: &RawTree<T, Self::Extra>) {}
}

/// A plain binary search tree that never rebalances.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    type Extra = ();

    fn leaf() {}

    fn after_insert<T>(_raw: &mut RawTree<T, Self::Extra>, _handle: Handle) {}

    fn after_remove<T>(_raw: &mut RawTree<T, Self::Extra>, _removed: Removed<Self::Extra>) {}
}
