use crate::types::{rerank, AvlNode, Balance, Direction, RankNode};

/// Arena node of a [`super::RankList`].
///
/// `value` is `None` only for the head sentinel and for released slots.
#[derive(Clone, Debug)]
pub struct ListNode<V> {
    pub child: [Option<u32>; 2],
    pub parent: Option<u32>,
    pub direction: Direction,
    pub balance: Balance,
    /// Number of nodes in the subtree rooted here, this one included.
    pub rank: usize,
    pub value: Option<V>,
}

impl<V> ListNode<V> {
    pub fn new(value: V) -> Self {
        Self {
            value: Some(value),
            rank: 1,
            ..Self::head()
        }
    }

    pub fn head() -> Self {
        Self {
            child: [None, None],
            parent: None,
            direction: Direction::Right,
            balance: 0,
            rank: 0,
            value: None,
        }
    }
}

impl<V> AvlNode for ListNode<V> {
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

    fn shrink(&mut self) {
        self.rank -= 1;
    }

    fn refresh(arena: &mut [Self], i: u32) {
        rerank(arena, i);
    }
}

impl<V> RankNode for ListNode<V> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }
}
