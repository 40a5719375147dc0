//! Node trait definitions shared by the list and set trees.
//!
//! Every "pointer" is an `Option<u32>` slot in a [`Vec`]-backed arena. Tree
//! functions take the arena as `&mut [N]` and work with slots. Slot
//! [`HEAD`] always holds the sentinel whose right child is the real root.

/// Balance factor, `height(right) - height(left)`.
pub type Balance = i8;

/// Arena slot of the sentinel head node.
pub const HEAD: u32 = 0;

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = 0,
    Right = 1,
}

impl Direction {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Balance contribution of growing on this side.
    #[inline]
    pub fn sign(self) -> Balance {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn from_sign(sign: Balance) -> Option<Self> {
        match sign {
            -1 => Some(Direction::Left),
            1 => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Structural links of an AVL node with parent back-references.
///
/// The parent link is a traversal aid only; a node's lifetime is owned by
/// the arena, never by its parent or children.
pub trait AvlNode {
    fn child(&self, d: Direction) -> Option<u32>;
    fn set_child(&mut self, d: Direction, v: Option<u32>);
    fn parent(&self) -> Option<u32>;
    fn set_parent(&mut self, v: Option<u32>);
    fn direction(&self) -> Direction;
    fn set_direction(&mut self, d: Direction);
    fn balance(&self) -> Balance;
    fn set_balance(&mut self, b: Balance);

    /// Called on each node passed while descending to remove below it.
    fn shrink(&mut self) {}

    /// Recomputes derived subtree data for `i` from its children.
    fn refresh(_arena: &mut [Self], _i: u32)
    where
        Self: Sized,
    {
    }
}

/// AVL node augmented with subtree size.
pub trait RankNode: AvlNode {
    fn rank(&self) -> usize;
    fn set_rank(&mut self, rank: usize);
}

/// Subtree size below `slot`, zero for an empty slot.
#[inline]
pub fn rank_of<N: RankNode>(arena: &[N], slot: Option<u32>) -> usize {
    slot.map_or(0, |i| arena[i as usize].rank())
}

/// Size of the left subtree of `i`.
#[inline]
pub fn left_rank<N: RankNode>(arena: &[N], i: u32) -> usize {
    rank_of(arena, arena[i as usize].child(Direction::Left))
}

/// `rank = 1 + rank(left) + rank(right)`.
pub fn rerank<N: RankNode>(arena: &mut [N], i: u32) {
    let node = &arena[i as usize];
    let rank = 1
        + rank_of(arena, node.child(Direction::Left))
        + rank_of(arena, node.child(Direction::Right));
    arena[i as usize].set_rank(rank);
}
