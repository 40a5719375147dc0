//! Single and double rotations over parent-linked arena nodes.
//!
//! Both primitives re-link every moved node (child slot, parent, direction),
//! assign balances from a fixed case table and refresh derived subtree data
//! bottom-up. The rotated subtree is re-attached to the parent slot the
//! pivot occupied before the rotation.

use crate::types::{AvlNode, Balance, Direction};

#[inline]
pub(crate) fn child<N: AvlNode>(arena: &[N], i: u32, d: Direction) -> Option<u32> {
    arena[i as usize].child(d)
}

#[inline]
pub(crate) fn bf<N: AvlNode>(arena: &[N], i: u32) -> Balance {
    arena[i as usize].balance()
}

#[inline]
pub(crate) fn set_bf<N: AvlNode>(arena: &mut [N], i: u32, b: Balance) {
    arena[i as usize].set_balance(b);
}

/// Puts `node` into slot `d` of `parent` and points it back at `parent`.
pub(crate) fn attach<N: AvlNode>(arena: &mut [N], parent: u32, d: Direction, node: Option<u32>) {
    arena[parent as usize].set_child(d, node);
    if let Some(n) = node {
        arena[n as usize].set_parent(Some(parent));
        arena[n as usize].set_direction(d);
    }
}

/// Clears all links of `i`.
pub(crate) fn detach<N: AvlNode>(arena: &mut [N], i: u32) {
    let n = &mut arena[i as usize];
    n.set_child(Direction::Left, None);
    n.set_child(Direction::Right, None);
    n.set_parent(None);
    n.set_balance(0);
}

fn slot_of<N: AvlNode>(arena: &[N], i: u32) -> (u32, Direction) {
    let n = &arena[i as usize];
    let parent = n
        .parent()
        .expect("rotation pivot must hang below the head sentinel");
    (parent, n.direction())
}

/// Rotates `r = s.child[d]` up into the place of `s`.
///
/// ```text
///      |               ->            |
///      s               ->            r
///    /   \                         /   \
/// alpha   r            ->        s     gamma
///       /   \          ->      /   \
///    beta   gamma      ->  alpha   beta
/// ```
///
/// Drawn for `d = Right`; `Left` is the mirror image. Returns `r`.
pub fn single_rotation<N: AvlNode>(arena: &mut [N], s: u32, d: Direction) -> u32 {
    let (t, ts) = slot_of(arena, s);
    let r = child(arena, s, d).expect("single rotation needs a child on the heavy side");
    let beta = child(arena, r, d.flip());

    attach(arena, s, d, beta);
    attach(arena, r, d.flip(), Some(s));
    attach(arena, t, ts, Some(r));

    let a = d.sign();
    match bf(arena, r) {
        b if b == a => {
            set_bf(arena, s, 0);
            set_bf(arena, r, 0);
        }
        // Only reachable from removal: beta was as tall as gamma.
        0 => {
            set_bf(arena, s, a);
            set_bf(arena, r, -a);
        }
        b => unreachable!("single rotation towards {d:?} with child balance {b}"),
    }

    N::refresh(arena, s);
    N::refresh(arena, r);
    log::trace!("single rotation {d:?}: slot {r} replaces slot {s}");
    r
}

/// Rotates `p = s.child[d].child[!d]` up into the place of `s`.
///
/// ```text
///         |            ->                     |
///         s            ->                     p
///       /   \                               /    \
///    alpha   r         ->                 s        r
///          /   \       ->               /   \    /   \
///         p    delta   ->           alpha beta gamma delta
///       /   \          ->
///     beta  gamma      ->
/// ```
///
/// Drawn for `d = Right`; `Left` is the mirror image. Returns `p`.
pub fn double_rotation<N: AvlNode>(arena: &mut [N], s: u32, d: Direction) -> u32 {
    let (t, ts) = slot_of(arena, s);
    let r = child(arena, s, d).expect("double rotation needs a child on the heavy side");
    let p = child(arena, r, d.flip()).expect("double rotation needs an inner grandchild");
    let beta = child(arena, p, d.flip());
    let gamma = child(arena, p, d);

    attach(arena, r, d.flip(), gamma);
    attach(arena, s, d, beta);
    attach(arena, p, d, Some(r));
    attach(arena, p, d.flip(), Some(s));
    attach(arena, t, ts, Some(p));

    let a = d.sign();
    let (sb, rb) = match bf(arena, p) {
        b if b == a => (-a, 0),
        0 => (0, 0),
        b if b == -a => (0, a),
        b => unreachable!("double rotation towards {d:?} with grandchild balance {b}"),
    };
    set_bf(arena, s, sb);
    set_bf(arena, r, rb);
    set_bf(arena, p, 0);

    N::refresh(arena, s);
    N::refresh(arena, r);
    N::refresh(arena, p);
    log::trace!("double rotation {d:?}: slot {p} replaces slot {s}");
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::util::{assert_avl_tree, assert_ranks, root};
    use crate::list::ListNode;
    use crate::types::{rerank, HEAD};
    use Direction::{Left, Right};

    fn arena(n: i32) -> Vec<ListNode<i32>> {
        let mut arena = vec![ListNode::head()];
        arena.extend((1..=n).map(ListNode::new));
        arena
    }

    fn rank(arena: &[ListNode<i32>], i: u32) -> usize {
        arena[i as usize].rank
    }

    #[test]
    fn single_rotation_after_right_right_growth() {
        let mut a = arena(3);
        attach(&mut a, HEAD, Right, Some(1));
        attach(&mut a, 1, Right, Some(2));
        attach(&mut a, 2, Right, Some(3));
        set_bf(&mut a, 1, 1);
        set_bf(&mut a, 2, 1);
        for i in [3, 2, 1] {
            rerank(&mut a, i);
        }

        let top = single_rotation(&mut a, 1, Right);
        assert_eq!(top, 2);
        assert_eq!(root(&a), Some(2));
        assert_eq!(a[1].parent, Some(2));
        assert_eq!(a[1].direction, Left);
        assert_eq!((bf(&a, 1), bf(&a, 2)), (0, 0));
        assert_eq!((rank(&a, 1), rank(&a, 2)), (1, 3));
        assert_eq!(assert_avl_tree(&a), Ok(3));
        assert_eq!(assert_ranks(&a, root(&a)), Ok(3));
    }

    #[test]
    fn single_rotation_with_balanced_child_keeps_height() {
        // s has lost its left subtree; r = s.right has two leaves.
        let mut a = arena(4);
        attach(&mut a, HEAD, Right, Some(1));
        attach(&mut a, 1, Right, Some(2));
        attach(&mut a, 2, Left, Some(3));
        attach(&mut a, 2, Right, Some(4));
        set_bf(&mut a, 1, 1);
        for i in [3, 4, 2, 1] {
            rerank(&mut a, i);
        }

        let top = single_rotation(&mut a, 1, Right);
        assert_eq!(top, 2);
        assert_eq!(a[1].child, [None, Some(3)]);
        assert_eq!(a[3].parent, Some(1));
        assert_eq!(a[3].direction, Right);
        assert_eq!((bf(&a, 1), bf(&a, 2)), (1, -1));
        assert_eq!((rank(&a, 1), rank(&a, 2)), (2, 4));
        assert_eq!(assert_avl_tree(&a), Ok(4));
        assert_eq!(assert_ranks(&a, root(&a)), Ok(4));
    }

    #[test]
    fn double_rotation_after_right_left_growth() {
        let mut a = arena(3);
        attach(&mut a, HEAD, Right, Some(1));
        attach(&mut a, 1, Right, Some(2));
        attach(&mut a, 2, Left, Some(3));
        set_bf(&mut a, 1, 1);
        set_bf(&mut a, 2, -1);
        for i in [3, 2, 1] {
            rerank(&mut a, i);
        }

        let top = double_rotation(&mut a, 1, Right);
        assert_eq!(top, 3);
        assert_eq!(root(&a), Some(3));
        assert_eq!(a[3].child, [Some(1), Some(2)]);
        assert_eq!((a[1].direction, a[2].direction), (Left, Right));
        assert_eq!((bf(&a, 1), bf(&a, 2), bf(&a, 3)), (0, 0, 0));
        assert_eq!(rank(&a, 3), 3);
        assert_eq!(assert_avl_tree(&a), Ok(3));
        assert_eq!(assert_ranks(&a, root(&a)), Ok(3));
    }

    #[test]
    fn double_rotation_mirror_with_leaning_grandchild() {
        // s = 1 leans left towards r = 2; p = 3 (r's right child) leans left
        // towards 4. 5 is r's left child and 6 is s's right child.
        let mut a = arena(6);
        attach(&mut a, HEAD, Right, Some(1));
        attach(&mut a, 1, Left, Some(2));
        attach(&mut a, 1, Right, Some(6));
        attach(&mut a, 2, Left, Some(5));
        attach(&mut a, 2, Right, Some(3));
        attach(&mut a, 3, Left, Some(4));
        set_bf(&mut a, 1, -1);
        set_bf(&mut a, 2, 1);
        set_bf(&mut a, 3, -1);
        for i in [4, 3, 5, 2, 6, 1] {
            rerank(&mut a, i);
        }

        let top = double_rotation(&mut a, 1, Left);
        assert_eq!(top, 3);
        assert_eq!(a[3].child, [Some(2), Some(1)]);
        assert_eq!(a[2].child, [Some(5), Some(4)]);
        assert_eq!(a[1].child, [None, Some(6)]);
        assert_eq!((bf(&a, 2), bf(&a, 1), bf(&a, 3)), (0, 1, 0));
        assert_eq!((rank(&a, 2), rank(&a, 1), rank(&a, 3)), (3, 2, 6));
        assert_eq!(assert_avl_tree(&a), Ok(6));
        assert_eq!(assert_ranks(&a, root(&a)), Ok(6));
    }
}
