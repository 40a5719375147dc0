//! Traversal, validation and debug printing for head-rooted AVL arenas.

use crate::types::{AvlNode, Direction, RankNode, HEAD};

#[inline]
fn get_l<N: AvlNode>(arena: &[N], i: u32) -> Option<u32> {
    arena[i as usize].child(Direction::Left)
}

#[inline]
fn get_r<N: AvlNode>(arena: &[N], i: u32) -> Option<u32> {
    arena[i as usize].child(Direction::Right)
}

/// The real root, i.e. the right child of the head sentinel.
#[inline]
pub fn root<N: AvlNode>(arena: &[N]) -> Option<u32> {
    get_r(arena, HEAD)
}

/// Leftmost node below `node`.
pub fn first<N: AvlNode>(arena: &[N], node: Option<u32>) -> Option<u32> {
    let mut curr = node?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node below `node`.
pub fn last<N: AvlNode>(arena: &[N], node: Option<u32>) -> Option<u32> {
    let mut curr = node?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor, climbing parent links. Never yields the head.
pub fn next<N: AvlNode>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return first(arena, Some(r));
    }
    let mut curr = node;
    while let Some(p) = arena[curr as usize].parent() {
        if p == HEAD {
            return None;
        }
        if arena[curr as usize].direction() == Direction::Left {
            return Some(p);
        }
        curr = p;
    }
    None
}

/// In-order predecessor, climbing parent links. Never yields the head.
pub fn prev<N: AvlNode>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        return last(arena, Some(l));
    }
    let mut curr = node;
    while let Some(p) = arena[curr as usize].parent() {
        if p == HEAD {
            return None;
        }
        if arena[curr as usize].direction() == Direction::Right {
            return Some(p);
        }
        curr = p;
    }
    None
}

/// Checks links, directions and balance factors of every reachable node.
///
/// Returns the number of nodes below the head.
pub fn assert_avl_tree<N: AvlNode>(arena: &[N]) -> Result<usize, String> {
    let head = &arena[HEAD as usize];
    if head.parent().is_some() {
        return Err("Head has parent".to_string());
    }
    if head.child(Direction::Left).is_some() {
        return Err("Head has a left child".to_string());
    }
    let Some(root) = root(arena) else {
        return Ok(0);
    };
    if arena[root as usize].parent() != Some(HEAD) {
        return Err("Root is not linked to head".to_string());
    }
    if arena[root as usize].direction() != Direction::Right {
        return Err("Root direction is not right".to_string());
    }

    fn validate<N: AvlNode>(
        arena: &[N],
        node: u32,
        seen: &mut [bool],
        count: &mut usize,
    ) -> Result<i32, String> {
        if node == HEAD || seen[node as usize] {
            return Err(format!("Cycle through node {node}"));
        }
        seen[node as usize] = true;
        *count += 1;

        let mut heights = [0i32; 2];
        for d in [Direction::Left, Direction::Right] {
            let Some(c) = arena[node as usize].child(d) else {
                continue;
            };
            if arena[c as usize].parent() != Some(node) {
                return Err(format!("Broken parent link on {d:?} child of {node}"));
            }
            if arena[c as usize].direction() != d {
                return Err(format!("Wrong direction on {d:?} child of {node}"));
            }
            heights[d.index()] = validate(arena, c, seen, count)?;
        }

        let expected = heights[1] - heights[0];
        if !(-1..=1).contains(&expected) {
            return Err(format!("AVL balance violated at {node}: {expected}"));
        }
        let actual = i32::from(arena[node as usize].balance());
        if actual != expected {
            return Err(format!(
                "Balance factor mismatch at {node}: expected {expected}, got {actual}"
            ));
        }
        Ok(1 + heights[0].max(heights[1]))
    }

    let mut seen = vec![false; arena.len()];
    let mut count = 0;
    validate(arena, root, &mut seen, &mut count)?;
    Ok(count)
}

/// Checks that every rank equals the size of its subtree.
pub fn assert_ranks<N: RankNode>(arena: &[N], node: Option<u32>) -> Result<usize, String> {
    let Some(i) = node else {
        return Ok(0);
    };
    let l = assert_ranks(arena, get_l(arena, i))?;
    let r = assert_ranks(arena, get_r(arena, i))?;
    let expected = 1 + l + r;
    let actual = arena[i as usize].rank();
    if actual != expected {
        return Err(format!("Rank mismatch at {i}: expected {expected}, got {actual}"));
    }
    Ok(expected)
}

/// Debug printer; `label` renders the payload of a node.
pub fn print<N, F>(arena: &[N], node: Option<u32>, tab: &str, label: &F) -> String
where
    N: AvlNode,
    F: Fn(&N) -> String,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print(arena, get_l(arena, i), &format!("{tab}  "), label);
            let right = print(arena, get_r(arena, i), &format!("{tab}  "), label);
            format!(
                "Node[{i}] [bf={}] {}\n{tab}L={left}\n{tab}R={right}",
                n.balance(),
                label(n)
            )
        }
    }
}
