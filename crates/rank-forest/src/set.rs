//! Ordered set over the same parent-linked AVL engine as the list.
//!
//! Nodes carry no rank; rotations and removal repairs are shared with
//! [`crate::RankList`].

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::avl::rotation::attach;
use crate::avl::{
    assert_avl_tree, excise, first, last, next, print, rebalance_after_insert,
    rebalance_after_remove,
};
use crate::types::{AvlNode, Balance, Direction, HEAD};

#[derive(Clone, Debug)]
pub struct SetNode<V> {
    pub child: [Option<u32>; 2],
    pub parent: Option<u32>,
    pub direction: Direction,
    pub balance: Balance,
    pub value: Option<V>,
}

impl<V> SetNode<V> {
    fn new(value: Option<V>) -> Self {
        Self {
            child: [None, None],
            parent: None,
            direction: Direction::Right,
            balance: 0,
            value,
        }
    }
}

impl<V> AvlNode for SetNode<V> {
    fn child(&self, d: Direction) -> Option<u32> {
        self.child[d.index()]
    }

    fn set_child(&mut self, d: Direction, v: Option<u32>) {
        self.child[d.index()] = v;
    }

    fn parent(&self) -> Option<u32> {
        self.parent
    }

    fn set_parent(&mut self, v: Option<u32>) {
        self.parent = v;
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn set_direction(&mut self, d: Direction) {
        self.direction = d;
    }

    fn balance(&self) -> Balance {
        self.balance
    }

    fn set_balance(&mut self, b: Balance) {
        self.balance = b;
    }
}

/// AVL set with parent links, keyed by [`Ord`].
#[derive(Clone)]
pub struct AvlSet<V> {
    arena: Vec<SetNode<V>>,
    vacant: Vec<u32>,
    len: usize,
}

impl<V> Default for AvlSet<V> {
    fn default() -> Self {
        Self {
            arena: vec![SetNode::new(None)],
            vacant: Vec::new(),
            len: 0,
        }
    }
}

impl<V> AvlSet<V> {
    #[inline]
    fn root(&self) -> Option<u32> {
        self.arena[HEAD as usize].child[Direction::Right.index()]
    }

    #[inline]
    fn value(&self, i: u32) -> &V {
        self.arena[i as usize]
            .value
            .as_ref()
            .expect("linked set node holds a value")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.arena.truncate(1);
        self.arena[HEAD as usize] = SetNode::new(None);
        self.vacant.clear();
        self.len = 0;
    }

    /// Smallest value.
    pub fn first(&self) -> Option<&V> {
        first(&self.arena, self.root()).map(|i| self.value(i))
    }

    /// Largest value.
    pub fn last(&self) -> Option<&V> {
        last(&self.arena, self.root()).map(|i| self.value(i))
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        let mut curr = first(&self.arena, self.root());
        std::iter::from_fn(move || {
            let i = curr?;
            curr = next(&self.arena, i);
            self.arena[i as usize].value.as_ref()
        })
    }

    fn alloc(&mut self, value: V) -> u32 {
        let node = SetNode::new(Some(value));
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

    pub fn assert_valid(&self) -> Result<(), String>
    where
        V: Ord,
    {
        let count = assert_avl_tree(&self.arena)?;
        if count != self.len {
            return Err(format!("Reached {count} nodes but length is {}", self.len));
        }
        if count + self.vacant.len() + 1 != self.arena.len() {
            return Err("Arena slot bookkeeping is inconsistent".to_string());
        }
        let mut prev: Option<&V> = None;
        for v in self.iter() {
            if prev.is_some_and(|p| p >= v) {
                return Err("Node order violated".to_string());
            }
            prev = Some(v);
        }
        Ok(())
    }
}

impl<V: Ord> AvlSet<V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, value: &V) -> Option<u32> {
        let mut curr = self.root();
        while let Some(i) = curr {
            curr = match value.cmp(self.value(i)) {
                Ordering::Less => self.arena[i as usize].child(Direction::Left),
                Ordering::Equal => return Some(i),
                Ordering::Greater => self.arena[i as usize].child(Direction::Right),
            };
        }
        None
    }

    pub fn contains(&self, value: &V) -> bool {
        self.find(value).is_some()
    }

    /// Adds `value`. Returns `false` and leaves the set untouched if it is
    /// already present.
    pub fn insert(&mut self, value: V) -> bool {
        let Some(mut p) = self.root() else {
            let q = self.alloc(value);
            attach(&mut self.arena, HEAD, Direction::Right, Some(q));
            self.len += 1;
            return true;
        };

        let mut s = p;
        let d = loop {
            let d = match value.cmp(self.value(p)) {
                Ordering::Less => Direction::Left,
                Ordering::Equal => return false,
                Ordering::Greater => Direction::Right,
            };
            match self.arena[p as usize].child(d) {
                Some(c) => {
                    if self.arena[c as usize].balance != 0 {
                        s = c;
                    }
                    p = c;
                }
                None => break d,
            }
        };

        let q = self.alloc(value);
        attach(&mut self.arena, p, d, Some(q));
        rebalance_after_insert(&mut self.arena, s, q);
        self.len += 1;
        true
    }

    /// Removes `value`. Returns whether it was present.
    pub fn remove(&mut self, value: &V) -> bool {
        self.take(value).is_some()
    }

    /// Removes `value` and returns the stored copy.
    pub fn take(&mut self, value: &V) -> Option<V> {
        let p = self.find(value)?;
        let cut = excise(&mut self.arena, p);
        let moved = self.arena[cut.removed as usize].value.take();
        let old = match cut.survivor {
            Some(keep) => mem::replace(&mut self.arena[keep as usize].value, moved),
            None => moved,
        };
        self.arena[cut.removed as usize] = SetNode::new(None);
        self.vacant.push(cut.removed);
        rebalance_after_remove(&mut self.arena, cut.adjust, cut.side);
        self.len -= 1;
        old
    }
}

impl<V: fmt::Debug> AvlSet<V> {
    pub fn print(&self) -> String {
        print(&self.arena, self.root(), "", &|n: &SetNode<V>| {
            format!("{:?}", n.value)
        })
    }
}

impl<V: fmt::Debug> fmt::Debug for AvlSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V: Ord> FromIterator<V> for AvlSet<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<V: Ord> Extend<V> for AvlSet<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<V: Serialize> Serialize for AvlSet<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, V: Deserialize<'de> + Ord> Deserialize<'de> for AvlSet<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<V>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}
