use crate::types::{AvlNode, Direction};

use super::rotation::{attach, bf, child, detach, double_rotation, set_bf, single_rotation};

/// Outcome of unlinking a node from the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Excision {
    /// Slot that is no longer linked into the tree and can be released.
    pub removed: u32,
    /// When the target had two children, its in-order successor was unlinked
    /// instead; the target stays in place and must receive the successor's
    /// value.
    pub survivor: Option<u32>,
    /// Parent whose subtree lost a node.
    pub adjust: u32,
    /// Side of `adjust` that got shorter.
    pub side: Direction,
}

/// Unlinks `p` from the tree, or its in-order successor when `p` has two
/// children. Every node on the way to the successor is notified through
/// [`AvlNode::shrink`]. Balances are left for [`rebalance_after_remove`].
pub fn excise<N: AvlNode>(arena: &mut [N], p: u32) -> Excision {
    let l = child(arena, p, Direction::Left);
    let r = child(arena, p, Direction::Right);

    if let (Some(_), Some(r)) = (l, r) {
        let mut adjust = p;
        let mut side = Direction::Right;
        let mut succ = r;
        while let Some(next) = child(arena, succ, Direction::Left) {
            arena[succ as usize].shrink();
            adjust = succ;
            side = Direction::Left;
            succ = next;
        }
        let tail = child(arena, succ, Direction::Right);
        attach(arena, adjust, side, tail);
        detach(arena, succ);
        return Excision {
            removed: succ,
            survivor: Some(p),
            adjust,
            side,
        };
    }

    let adjust = arena[p as usize]
        .parent()
        .expect("a linked node always has a parent");
    let side = arena[p as usize].direction();
    attach(arena, adjust, side, l.or(r));
    detach(arena, p);
    Excision {
        removed: p,
        survivor: None,
        adjust,
        side,
    }
}

/// Walks from `adjust` towards the head, repairing balances after the
/// `side` subtree of `adjust` became one level shorter. Stops as soon as a
/// subtree keeps its height.
pub fn rebalance_after_remove<N: AvlNode>(arena: &mut [N], mut adjust: u32, mut side: Direction) {
    while let Some(next) = arena[adjust as usize].parent() {
        let next_side = arena[adjust as usize].direction();
        let a = side.sign();
        let b = bf(arena, adjust);

        if b == a {
            set_bf(arena, adjust, 0);
        } else if b == 0 {
            set_bf(arena, adjust, -a);
            return;
        } else {
            let heavy = side.flip();
            let r = child(arena, adjust, heavy).expect("tilted node must have a heavy child");
            match bf(arena, r) {
                rb if rb == -a => {
                    single_rotation(arena, adjust, heavy);
                }
                rb if rb == a => {
                    double_rotation(arena, adjust, heavy);
                }
                // Height of the rotated subtree is unchanged.
                0 => {
                    single_rotation(arena, adjust, heavy);
                    return;
                }
                rb => unreachable!("heavy child {r} carries balance {rb}"),
            }
        }

        adjust = next;
        side = next_side;
    }
}
