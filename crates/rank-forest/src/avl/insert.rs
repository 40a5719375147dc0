use crate::types::AvlNode;

use super::rotation::{bf, double_rotation, set_bf, single_rotation};

/// Restores balance after `q` was attached as a fresh leaf.
///
/// `s` is the deepest node on the insertion path whose balance was non-zero
/// before the descent (the root when there is none). Every node strictly
/// between `s` and `q` was balanced and now leans towards `q`. At most one
/// rotation, rooted at `s`, is performed.
pub fn rebalance_after_insert<N: AvlNode>(arena: &mut [N], s: u32, q: u32) {
    let mut r = q;
    loop {
        let p = arena[r as usize]
            .parent()
            .expect("inserted node must descend from the rebalance point");
        if p == s {
            break;
        }
        let lean = arena[r as usize].direction().sign();
        set_bf(arena, p, lean);
        r = p;
    }

    let d = arena[r as usize].direction();
    let a = d.sign();
    match bf(arena, s) {
        // Only possible at the root: the whole tree grew one level.
        0 => set_bf(arena, s, a),
        b if b == -a => set_bf(arena, s, 0),
        _ => match bf(arena, r) {
            b if b == a => {
                single_rotation(arena, s, d);
            }
            b if b == -a => {
                double_rotation(arena, s, d);
            }
            b => unreachable!("insertion left slot {r} with balance {b} under a tilted parent"),
        },
    }
}
