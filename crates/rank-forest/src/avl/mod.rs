//! AVL machinery shared by [`crate::list`] and [`crate::set`].
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`rotation`] | single/double rotation primitives |
//! | [`insert`] | balance repair after attaching a leaf |
//! | [`remove`] | excision (with successor swap) and upward repair |
//! | [`util`] | traversal, validators, debug printer |

pub mod insert;
pub mod remove;
pub mod rotation;
pub mod util;

pub use insert::rebalance_after_insert;
pub use remove::{excise, rebalance_after_remove, Excision};
pub use rotation::{double_rotation, single_rotation};
pub use util::{assert_avl_tree, assert_ranks, first, last, next, prev, print, root};
