//! Indexable ordered sequence backed by a rank-augmented AVL tree.
//!
//! Elements can be inserted, removed and read at any position in
//! O(log n). With a [`ValueMap`] index, the position of a value can also be
//! recovered in O(log n) by climbing parent links from the node holding it.

mod iter;
pub mod node;
pub mod value_index;

use std::fmt;
use std::hash::Hash;
use std::mem;
use std::ops::Index;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::avl::rotation::attach;
use crate::avl::{
    assert_avl_tree, assert_ranks, excise, first, last, next, print, rebalance_after_insert,
    rebalance_after_remove,
};
use crate::error::ListError;
use crate::types::{left_rank, rank_of, AvlNode, Direction, HEAD};

pub use iter::Iter;
pub use node::ListNode;
pub use value_index::{NoIndex, ValueIndex, ValueMap};

/// Positional list without value lookup.
pub type PositionalList<V> = RankList<V, NoIndex>;

/// Positional list that can also find the index of a value.
///
/// Values must be unique. Inserting a value that is already present is not
/// rejected, but afterwards [`RankList::index_of`] for that value is only
/// defined for the most recently inserted copy.
pub type FindList<V> = RankList<V, ValueMap<V>>;

/// An AVL tree used as a list: the in-order position of a node is its index.
///
/// Slot [`HEAD`] of the arena is a permanent sentinel whose right child is
/// the root, so an empty list is not a special case for the algorithms.
/// Released slots are recycled through a free list.
#[derive(Clone)]
pub struct RankList<V, X = NoIndex> {
    arena: Vec<ListNode<V>>,
    vacant: Vec<u32>,
    index: X,
}

impl<V, X: ValueIndex<V> + Default> RankList<V, X> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-sizes the arena and the value index for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = Vec::with_capacity(capacity + 1);
        arena.push(ListNode::head());
        let mut index = X::default();
        index.reserve(capacity);
        Self {
            arena,
            vacant: Vec::new(),
            index,
        }
    }
}

impl<V, X: ValueIndex<V> + Default> Default for RankList<V, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, X: ValueIndex<V>> RankList<V, X> {
    #[inline]
    fn root(&self) -> Option<u32> {
        self.arena[HEAD as usize].child[Direction::Right.index()]
    }

    pub fn len(&self) -> usize {
        rank_of(&self.arena, self.root())
    }

    pub fn is_empty(&self) -> bool {
        self.root().is_none()
    }

    /// Removes every element, keeping the allocated arena.
    pub fn clear(&mut self) {
        self.arena.truncate(1);
        self.arena[HEAD as usize] = ListNode::head();
        self.vacant.clear();
        self.index.clear();
    }

    fn node_at(&self, index: usize) -> Option<u32> {
        let mut p = self.root();
        let mut index = index;
        while let Some(i) = p {
            let lr = left_rank(&self.arena, i);
            if index < lr {
                p = self.arena[i as usize].child(Direction::Left);
            } else if index == lr {
                return Some(i);
            } else {
                index -= lr + 1;
                p = self.arena[i as usize].child(Direction::Right);
            }
        }
        None
    }

    /// Value at `index`, or `None` when `index >= len`.
    pub fn get(&self, index: usize) -> Option<&V> {
        let i = self.node_at(index)?;
        self.arena[i as usize].value.as_ref()
    }

    pub fn first(&self) -> Option<&V> {
        let i = first(&self.arena, self.root())?;
        self.arena[i as usize].value.as_ref()
    }

    pub fn last(&self) -> Option<&V> {
        let i = last(&self.arena, self.root())?;
        self.arena[i as usize].value.as_ref()
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.arena, first(&self.arena, self.root()), self.len())
    }

    fn alloc(&mut self, value: V) -> u32 {
        let node = ListNode::new(value);
        match self.vacant.pop() {
            Some(i) => {
                self.arena[i as usize] = node;
                i
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    fn release(&mut self, i: u32) {
        self.arena[i as usize] = ListNode::head();
        self.vacant.push(i);
    }

    /// Inserts `value` so that it ends up at `index`, shifting later
    /// elements one position up.
    pub fn insert(&mut self, index: usize, value: V) -> Result<(), ListError> {
        let len = self.len();
        if index > len {
            return Err(ListError::IndexOutOfBounds { index, len });
        }
        self.insert_unchecked(index, value);
        Ok(())
    }

    /// Appends `value` at the end.
    pub fn push(&mut self, value: V) {
        let len = self.len();
        self.insert_unchecked(len, value);
    }

    fn insert_unchecked(&mut self, index: usize, value: V) {
        if self.index.lookup(&value).is_some() {
            log::warn!("duplicate value inserted at {index}; value lookup now targets the new copy");
        }
        let q = self.alloc(value);
        if let Some(v) = self.arena[q as usize].value.as_ref() {
            self.index.bind(v, q);
        }

        let Some(mut p) = self.root() else {
            attach(&mut self.arena, HEAD, Direction::Right, Some(q));
            return;
        };

        // s: deepest node on the path with a non-zero balance.
        let mut s = p;
        let mut index = index;
        loop {
            let lr = left_rank(&self.arena, p);
            let d = if index <= lr {
                Direction::Left
            } else {
                index -= lr + 1;
                Direction::Right
            };
            self.arena[p as usize].rank += 1;

            match self.arena[p as usize].child(d) {
                Some(c) => {
                    if self.arena[c as usize].balance != 0 {
                        s = c;
                    }
                    p = c;
                }
                None => {
                    attach(&mut self.arena, p, d, Some(q));
                    break;
                }
            }
        }

        rebalance_after_insert(&mut self.arena, s, q);
    }

    /// Removes and returns the element at `index`.
    ///
    /// Out-of-range indices are accepted and ignored: the list is left
    /// untouched and `None` is returned.
    pub fn remove(&mut self, index: usize) -> Option<V> {
        let len = self.len();
        if index >= len {
            log::debug!("remove at {index} ignored, length is {len}");
            return None;
        }

        let mut p = self.root()?;
        let mut index = index;
        loop {
            self.arena[p as usize].shrink();
            let lr = left_rank(&self.arena, p);
            let d = if index < lr {
                Direction::Left
            } else if index > lr {
                index -= lr + 1;
                Direction::Right
            } else {
                break;
            };
            p = self.arena[p as usize]
                .child(d)
                .expect("rank promises a child on the way to an in-range index");
        }

        let cut = excise(&mut self.arena, p);
        let value = match cut.survivor {
            Some(keep) => {
                // Successor swap: the successor's value moves into `keep`.
                let moved = self.arena[cut.removed as usize].value.take();
                let old = mem::replace(&mut self.arena[keep as usize].value, moved);
                if let Some(v) = old.as_ref() {
                    self.index.unbind(v, keep);
                }
                if let Some(v) = self.arena[keep as usize].value.as_ref() {
                    self.index.bind(v, keep);
                }
                old
            }
            None => {
                let old = self.arena[cut.removed as usize].value.take();
                if let Some(v) = old.as_ref() {
                    self.index.unbind(v, cut.removed);
                }
                old
            }
        };
        self.release(cut.removed);
        rebalance_after_remove(&mut self.arena, cut.adjust, cut.side);
        value
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<V> {
        let last = self.len().checked_sub(1)?;
        self.remove(last)
    }

    /// Checks every structural invariant: links, directions, balances,
    /// ranks, slot bookkeeping and the value index.
    pub fn assert_valid(&self) -> Result<(), String> {
        let count = assert_avl_tree(&self.arena)?;
        let len = assert_ranks(&self.arena, self.root())?;
        if count != len {
            return Err(format!("Reached {count} nodes but root rank is {len}"));
        }
        if count + self.vacant.len() + 1 != self.arena.len() {
            return Err(format!(
                "Arena holds {} slots, {} linked and {} vacant",
                self.arena.len(),
                count,
                self.vacant.len()
            ));
        }

        let mut live = Vec::with_capacity(len);
        let mut curr = first(&self.arena, self.root());
        while let Some(i) = curr {
            match self.arena[i as usize].value.as_ref() {
                Some(v) => live.push((i, v)),
                None => return Err(format!("Linked slot {i} has no value")),
            }
            curr = next(&self.arena, i);
        }
        self.index.verify(&live)
    }
}

impl<V: Hash + Eq + Clone> RankList<V, ValueMap<V>> {
    /// Position of `value`, or `None` if it is not in the list.
    ///
    /// Finds the owning node through the value index, then climbs to the
    /// root adding the left subtree plus one for every right edge.
    pub fn index_of(&self, value: &V) -> Option<usize> {
        let mut p = self.index.lookup(value)?;
        if self.arena[p as usize].value.as_ref() != Some(value) {
            return None;
        }
        let root = self.root()?;
        let mut index = left_rank(&self.arena, p);
        while p != root {
            let n = &self.arena[p as usize];
            let parent = n.parent.expect("non-root node has a parent");
            if n.direction == Direction::Right {
                index += left_rank(&self.arena, parent) + 1;
            }
            p = parent;
        }
        Some(index)
    }

    pub fn contains(&self, value: &V) -> bool {
        self.index_of(value).is_some()
    }
}

impl<V: fmt::Debug, X: ValueIndex<V>> RankList<V, X> {
    /// Renders the tree with balance and rank of every node.
    pub fn print(&self) -> String {
        print(&self.arena, self.root(), "", &|n: &ListNode<V>| {
            format!("[rank={}] {:?}", n.rank, n.value)
        })
    }
}

impl<V: fmt::Debug, X: ValueIndex<V>> fmt::Debug for RankList<V, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: PartialEq, X: ValueIndex<V>, Y: ValueIndex<V>> PartialEq<RankList<V, Y>>
    for RankList<V, X>
{
    fn eq(&self, other: &RankList<V, Y>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq, X: ValueIndex<V>> Eq for RankList<V, X> {}

impl<V, X: ValueIndex<V>> Index<usize> for RankList<V, X> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        match self.get(index) {
            Some(v) => v,
            None => panic!("index {index} out of bounds for length {}", self.len()),
        }
    }
}

impl<V, X: ValueIndex<V> + Default> FromIterator<V> for RankList<V, X> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<V, X: ValueIndex<V>> Extend<V> for RankList<V, X> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

impl<'a, V, X: ValueIndex<V>> IntoIterator for &'a RankList<V, X> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Serialize, X: ValueIndex<V>> Serialize for RankList<V, X> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, V: Deserialize<'de>, X: ValueIndex<V> + Default> Deserialize<'de> for RankList<V, X> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<V>::deserialize(deserializer)?;
        let mut list = Self::with_capacity(values.len());
        list.extend(values);
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[i32]) -> FindList<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn insert_into_empty_hangs_root_off_head() {
        let mut list = FindList::new();
        list.insert(0, 42).unwrap();
        let root = list.root().unwrap();
        assert_eq!(list.arena[root as usize].parent, Some(HEAD));
        assert_eq!(list.arena[root as usize].direction, Direction::Right);
        assert_eq!(list.arena[root as usize].rank, 1);
        list.assert_valid().unwrap();
    }

    #[test]
    fn released_slots_are_reused() {
        let mut list = list_of(&[1, 2, 3, 4]);
        let slots = list.arena.len();
        assert_eq!(list.remove(1), Some(2));
        assert_eq!(list.vacant.len(), 1);
        list.insert(0, 9).unwrap();
        assert_eq!(list.arena.len(), slots);
        assert!(list.vacant.is_empty());
        list.assert_valid().unwrap();
    }

    #[test]
    fn successor_swap_repoints_value_index() {
        let mut list = list_of(&[1, 2, 3, 4, 5, 6, 7]);
        let root = list.root().unwrap();
        let at_root = *list.arena[root as usize].value.as_ref().unwrap();
        let pos = list.index_of(&at_root).unwrap();

        assert_eq!(list.remove(pos), Some(at_root));
        assert_eq!(list.root(), Some(root));
        let moved = *list.arena[root as usize].value.as_ref().unwrap();
        assert_eq!(moved, at_root + 1);
        assert_eq!(list.index.lookup(&moved), Some(root));
        assert_eq!(list.index_of(&at_root), None);
        list.assert_valid().unwrap();
    }

    #[test]
    fn stale_lookup_after_duplicate_is_rejected() {
        let mut list = list_of(&[1, 2, 3]);
        list.insert(0, 3).unwrap();
        assert_eq!(list.index_of(&3), Some(0));
        list.remove(0);
        // The newest copy was removed; the older one is no longer indexed.
        assert_eq!(list.index_of(&3), None);
        assert_eq!(list.get(2), Some(&3));
    }

    #[test]
    fn clear_resets_arena() {
        let mut list = list_of(&[1, 2, 3]);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.arena.len(), 1);
        assert_eq!(list.index_of(&1), None);
        list.push(5);
        assert_eq!(list.get(0), Some(&5));
        list.assert_valid().unwrap();
    }
}
