//! Rank-augmented AVL trees with parent links.
//!
//! The main type, [`RankList`], is an indexable ordered sequence: elements
//! are inserted at, removed from and read at arbitrary positions in
//! O(log n). The [`FindList`] flavour also keeps a value → node index so
//! that, for unique values, [`RankList::index_of`] runs in O(log n) by
//! climbing parent links instead of searching.
//!
//! All nodes live in a `Vec` arena and refer to each other by `u32` slot.
//! Parent links are plain slots, never ownership. Slot [`types::HEAD`] is
//! a sentinel whose right child is the root. Insertion and removal are
//! iterative; removal repairs balances upward through parent links.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Direction`], [`AvlNode`]/[`RankNode`] traits, rank helpers |
//! | [`avl`] | rotations, insert/remove rebalancing, validators, printer |
//! | [`list`] | [`RankList`], [`PositionalList`], [`FindList`], value index |
//! | [`set`] | [`AvlSet`], the ordered-set companion |
//! | [`error`] | [`ListError`] |
//!
//! ```
//! use rank_forest::FindList;
//!
//! let mut list = FindList::new();
//! list.insert(0, 10).unwrap();
//! list.insert(1, 20).unwrap();
//! list.insert(0, 5).unwrap();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![5, 10, 20]);
//! assert_eq!(list.index_of(&10), Some(1));
//! assert_eq!(list.get(3), None);
//! ```

pub mod avl;
pub mod error;
pub mod list;
pub mod set;
pub mod types;

pub use error::ListError;
pub use list::{FindList, NoIndex, PositionalList, RankList, ValueIndex, ValueMap};
pub use set::AvlSet;
pub use types::{AvlNode, Balance, Direction, RankNode};
