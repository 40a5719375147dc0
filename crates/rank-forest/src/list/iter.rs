use crate::avl::next;

use super::node::ListNode;

/// In-order iterator over a [`super::RankList`]. Each step is O(log n)
/// worst case, O(1) amortised.
pub struct Iter<'a, V> {
    arena: &'a [ListNode<V>],
    curr: Option<u32>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(arena: &'a [ListNode<V>], curr: Option<u32>, remaining: usize) -> Self {
        Self {
            arena,
            curr,
            remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = next(self.arena, i);
        self.remaining -= 1;
        self.arena[i as usize].value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
