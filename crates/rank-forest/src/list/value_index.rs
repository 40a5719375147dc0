use std::collections::HashMap;
use std::hash::Hash;

/// Association from a stored value to the arena slot holding it.
///
/// Kept in sync by [`super::RankList`] on insertion, on removal and on the
/// successor swap. Rotations never move values between slots, so they never
/// touch the index. Only meaningful while values are unique.
pub trait ValueIndex<V> {
    fn bind(&mut self, value: &V, node: u32);

    /// Drops the entry for `value` if it still points at `node`.
    fn unbind(&mut self, value: &V, node: u32);

    fn lookup(&self, value: &V) -> Option<u32>;

    fn clear(&mut self);

    fn reserve(&mut self, _additional: usize) {}

    /// Checks the index against the `(slot, value)` pairs currently linked
    /// into the tree.
    fn verify(&self, _live: &[(u32, &V)]) -> Result<(), String> {
        Ok(())
    }
}

/// Index for lists that only need positional access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoIndex;

impl<V> ValueIndex<V> for NoIndex {
    #[inline]
    fn bind(&mut self, _value: &V, _node: u32) {}

    #[inline]
    fn unbind(&mut self, _value: &V, _node: u32) {}

    #[inline]
    fn lookup(&self, _value: &V) -> Option<u32> {
        None
    }

    #[inline]
    fn clear(&mut self) {}
}

/// Hash-based value index.
#[derive(Clone, Debug)]
pub struct ValueMap<V> {
    map: HashMap<V, u32>,
}

impl<V> Default for ValueMap<V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<V: Hash + Eq> ValueMap<V> {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<V: Hash + Eq + Clone> ValueIndex<V> for ValueMap<V> {
    fn bind(&mut self, value: &V, node: u32) {
        match self.map.get_mut(value) {
            Some(slot) => *slot = node,
            None => {
                self.map.insert(value.clone(), node);
            }
        }
    }

    fn unbind(&mut self, value: &V, node: u32) {
        if self.map.get(value) == Some(&node) {
            self.map.remove(value);
        }
    }

    fn lookup(&self, value: &V) -> Option<u32> {
        self.map.get(value).copied()
    }

    fn clear(&mut self) {
        self.map.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
    }

    fn verify(&self, live: &[(u32, &V)]) -> Result<(), String> {
        if self.map.len() != live.len() {
            return Err(format!(
                "Value index holds {} entries for {} nodes",
                self.map.len(),
                live.len()
            ));
        }
        for (i, (node, value)) in live.iter().enumerate() {
            if self.map.get(*value) != Some(node) {
                return Err(format!(
                    "Value index entry for position {i} does not point at slot {node}"
                ));
            }
        }
        Ok(())
    }
}
