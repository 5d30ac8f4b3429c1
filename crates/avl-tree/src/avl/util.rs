use std::cmp::Ordering;
use std::fmt::Write;

use crate::error::AvlError;

use super::rebalance::{subtree_growth, subtree_shrink};
use super::types::{AvlNode, Link, Side};

// ── mutation ──────────────────────────────────────────────────────────────

/// Inserts `key` into the tree held by `root`.
///
/// Returns whether the height of the tree changed. On error the tree is left
/// untouched.
pub fn insert(key: i32, root: &mut Link) -> Result<bool, AvlError> {
    let Some(node) = root.as_deref_mut() else {
        *root = Some(AvlNode::try_boxed(key)?);
        return Ok(true);
    };
    match key.cmp(&node.key) {
        Ordering::Equal => Err(AvlError::AlreadyInserted),
        Ordering::Less => {
            let grew = insert(key, &mut node.left)?;
            Ok(subtree_growth(root, grew, Side::Left))
        }
        Ordering::Greater => {
            let grew = insert(key, &mut node.right)?;
            Ok(subtree_growth(root, grew, Side::Right))
        }
    }
}

/// Removes `key` from the tree held by `root`.
///
/// A node with two children keeps its place in the tree and takes over the
/// key of its in-order successor, which is then removed from the right
/// subtree instead. Returns whether the height of the tree changed.
pub fn remove(key: i32, root: &mut Link) -> Result<bool, AvlError> {
    let Some(node) = root.as_deref_mut() else {
        return Err(AvlError::InvalidRemove);
    };
    match key.cmp(&node.key) {
        Ordering::Less => {
            let shrank = remove(key, &mut node.left)?;
            Ok(subtree_shrink(root, shrank, Side::Left))
        }
        Ordering::Greater => {
            let shrank = remove(key, &mut node.right)?;
            Ok(subtree_shrink(root, shrank, Side::Right))
        }
        Ordering::Equal if node.left.is_some() && node.right.is_some() => {
            let successor = first(node.right.as_deref()).expect("right subtree is not empty");
            node.key = successor;
            let shrank = remove(successor, &mut node.right)?;
            Ok(subtree_shrink(root, shrank, Side::Right))
        }
        Ordering::Equal => {
            let mut matched = root.take().expect("matched node is present");
            *root = matched.left.take().or_else(|| matched.right.take());
            Ok(true)
        }
    }
}

/// Drops every node reachable from `root`, children before parents, and
/// leaves `root` empty.
pub fn release(root: &mut Link) {
    if let Some(mut node) = root.take() {
        release(&mut node.left);
        release(&mut node.right);
    }
}

// ── diagnostics ───────────────────────────────────────────────────────────

/// Height of a subtree; `-1` for the empty subtree.
pub fn height(node: Option<&AvlNode>) -> i32 {
    match node {
        None => -1,
        Some(n) => 1 + height(n.left.as_deref()).max(height(n.right.as_deref())),
    }
}

/// Height of a subtree whose nodes all hold their true balance factor within
/// `[-1, 1]`, or `None` at the first node that does not.
fn balanced_height(node: Option<&AvlNode>) -> Option<i32> {
    let Some(n) = node else {
        return Some(-1);
    };
    let hl = balanced_height(n.left.as_deref())?;
    let hr = balanced_height(n.right.as_deref())?;
    let computed = hr - hl;
    let in_range = (-1..=1).contains(&computed) && (-1..=1).contains(&n.bf);
    (in_range && i32::from(n.bf) == computed).then_some(1 + hl.max(hr))
}

/// Whether every node's stored balance factor equals its true height
/// difference and lies in `[-1, 1]`.
pub fn is_valid_avl(node: Option<&AvlNode>) -> bool {
    balanced_height(node).is_some()
}

pub fn count(node: Option<&AvlNode>) -> usize {
    match node {
        None => 0,
        Some(n) => 1 + count(n.left.as_deref()) + count(n.right.as_deref()),
    }
}

/// Checks balance factors and strict key order, describing the first
/// violation found.
pub fn assert_avl_tree(node: Option<&AvlNode>) -> Result<(), String> {
    fn validate(n: &AvlNode) -> Result<i32, String> {
        let hl = n.left.as_deref().map(validate).transpose()?.unwrap_or(-1);
        let hr = n.right.as_deref().map(validate).transpose()?.unwrap_or(-1);
        let expected_bf = hr - hl;
        let actual_bf = i32::from(n.bf);
        if actual_bf != expected_bf {
            return Err(format!(
                "Balance factor mismatch at {}: expected {expected_bf}, got {actual_bf}",
                n.key
            ));
        }
        if !(-1..=1).contains(&actual_bf) {
            return Err(format!("AVL balance violated at {}", n.key));
        }
        Ok(1 + hl.max(hr))
    }

    if let Some(n) = node {
        validate(n)?;
    }

    let mut prev: Option<i32> = None;
    for n in iter(node) {
        if let Some(p) = prev {
            if p >= n.key {
                return Err(format!("Node order violated: {p} before {}", n.key));
            }
        }
        prev = Some(n.key);
    }

    Ok(())
}

// ── queries ───────────────────────────────────────────────────────────────

pub fn contains(key: i32, node: Option<&AvlNode>) -> bool {
    let mut curr = node;
    while let Some(n) = curr {
        curr = match key.cmp(&n.key) {
            Ordering::Less => n.left.as_deref(),
            Ordering::Equal => return true,
            Ordering::Greater => n.right.as_deref(),
        };
    }
    false
}

/// Smallest key in the subtree.
pub fn first(node: Option<&AvlNode>) -> Option<i32> {
    let mut curr = node?;
    while let Some(l) = curr.left.as_deref() {
        curr = l;
    }
    Some(curr.key)
}

/// Largest key in the subtree.
pub fn last(node: Option<&AvlNode>) -> Option<i32> {
    let mut curr = node?;
    while let Some(r) = curr.right.as_deref() {
        curr = r;
    }
    Some(curr.key)
}

/// In-order iterator over the nodes of a subtree.
pub struct Iter<'a> {
    stack: Vec<&'a AvlNode>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut node: Option<&'a AvlNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a AvlNode;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left(n.right.as_deref());
        Some(n)
    }
}

pub fn iter(node: Option<&AvlNode>) -> Iter<'_> {
    let mut it = Iter { stack: Vec::new() };
    it.push_left(node);
    it
}

/// Visits `(key, balance factor)` pairs in ascending key order.
pub fn for_each<F: FnMut(i32, i8)>(node: Option<&AvlNode>, mut f: F) {
    for n in iter(node) {
        f(n.key, n.bf);
    }
}

/// `(elem: K, bal: B), ` for every node in ascending key order.
pub fn format_in_order(node: Option<&AvlNode>) -> String {
    let mut out = String::new();
    for_each(node, |key, bf| {
        let _ = write!(out, "(elem: {key}, bal: {bf}), ");
    });
    out
}

/// Debug printer for AVL trees.
pub fn print(node: Option<&AvlNode>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(n) => {
            let left = print(n.left.as_deref(), &format!("{tab}  "));
            let right = print(n.right.as_deref(), &format!("{tab}  "));
            format!("Node [bf={}] {}\n{tab}L={left}\n{tab}R={right}", n.bf, n.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[i32]) -> Link {
        let mut root = None;
        for &k in keys {
            insert(k, &mut root).unwrap();
        }
        root
    }

    fn preorder(node: Option<&AvlNode>, out: &mut Vec<i32>) {
        if let Some(n) = node {
            out.push(n.key);
            preorder(n.left.as_deref(), out);
            preorder(n.right.as_deref(), out);
        }
    }

    fn shape(root: &Link) -> Vec<i32> {
        let mut out = Vec::new();
        preorder(root.as_deref(), &mut out);
        out
    }

    #[test]
    fn insert_into_empty_grows() {
        let mut root = None;
        assert_eq!(insert(5, &mut root), Ok(true));
        assert_eq!(root.as_ref().unwrap().key, 5);
        assert_eq!(height(root.as_deref()), 0);
    }

    #[test]
    fn insert_duplicate_is_rejected() {
        let mut root = build(&[2, 1, 3]);
        let before = root.clone();
        assert_eq!(insert(3, &mut root), Err(AvlError::AlreadyInserted));
        assert_eq!(root, before);
    }

    #[test]
    fn insert_sibling_does_not_grow() {
        let mut root = build(&[2, 1]);
        assert_eq!(insert(3, &mut root), Ok(false));
        assert_eq!(root.as_ref().unwrap().bf, 0);
    }

    #[test]
    fn insert_rotations_at_root() {
        assert_eq!(shape(&build(&[1, 2, 3])), vec![2, 1, 3]);
        assert_eq!(shape(&build(&[3, 2, 1])), vec![2, 1, 3]);
        assert_eq!(shape(&build(&[3, 1, 2])), vec![2, 1, 3]);
        assert_eq!(shape(&build(&[1, 3, 2])), vec![2, 1, 3]);
    }

    #[test]
    fn remove_from_empty_is_invalid() {
        let mut root: Link = None;
        assert_eq!(remove(1, &mut root), Err(AvlError::InvalidRemove));
    }

    #[test]
    fn remove_missing_key_leaves_tree_alone() {
        let mut root = build(&[2, 1, 3]);
        let before = root.clone();
        assert_eq!(remove(4, &mut root), Err(AvlError::InvalidRemove));
        assert_eq!(root, before);
    }

    #[test]
    fn remove_leaf_and_single_child() {
        let mut root = build(&[2, 1, 3, 4]);
        assert_eq!(remove(3, &mut root), Ok(true));
        assert_eq!(shape(&root), vec![2, 1, 4]);
        assert_eq!(remove(1, &mut root), Ok(false));
        assert_eq!(shape(&root), vec![2, 4]);
        assert_eq!(remove(2, &mut root), Ok(true));
        assert_eq!(shape(&root), vec![4]);
        assert_eq!(remove(4, &mut root), Ok(true));
        assert!(root.is_none());
    }

    #[test]
    fn remove_two_children_promotes_successor() {
        let mut root = build(&[2, 1, 3]);
        let root_addr: *const AvlNode = root.as_deref().unwrap();
        assert_eq!(remove(2, &mut root), Ok(false));
        assert_eq!(shape(&root), vec![3, 1]);
        assert_eq!(root.as_ref().unwrap().bf, -1);
        let after: *const AvlNode = root.as_deref().unwrap();
        assert_eq!(root_addr, after);
    }

    #[test]
    fn remove_triggers_single_rotation_without_shrinking() {
        let mut root = build(&[2, 1, 4, 3, 5]);
        assert_eq!(remove(1, &mut root), Ok(false));
        assert_eq!(shape(&root), vec![4, 2, 3, 5]);
        assert!(is_valid_avl(root.as_deref()));
    }

    #[test]
    fn remove_triggers_double_rotation() {
        let mut root = build(&[2, 1, 4, 3]);
        assert_eq!(remove(1, &mut root), Ok(true));
        assert_eq!(shape(&root), vec![3, 2, 4]);
    }

    #[test]
    fn remove_cascades_rotations_to_root() {
        let keys = [8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1];
        let mut root = build(&keys);
        assert_eq!(shape(&root), vec![8, 5, 3, 2, 1, 4, 7, 6, 11, 10, 9, 12]);
        assert_eq!(remove(12, &mut root), Ok(true));
        assert_eq!(shape(&root), vec![5, 3, 2, 1, 4, 8, 7, 6, 10, 9, 11]);
        assert!(is_valid_avl(root.as_deref()));
        assert_eq!(height(root.as_deref()), 3);
    }

    #[test]
    fn diagnostics_on_empty_tree() {
        assert_eq!(height(None), -1);
        assert!(is_valid_avl(None));
        assert_eq!(count(None), 0);
        assert_eq!(first(None), None);
        assert_eq!(last(None), None);
        assert!(assert_avl_tree(None).is_ok());
    }

    #[test]
    fn stale_balance_factor_is_invalid() {
        let mut root = build(&[2, 1, 3]);
        root.as_mut().unwrap().bf = 1;
        assert!(!is_valid_avl(root.as_deref()));
        assert!(assert_avl_tree(root.as_deref())
            .unwrap_err()
            .starts_with("Balance factor mismatch"));
    }

    #[test]
    fn unbalanced_chain_is_invalid() {
        let mut a = AvlNode::new(1);
        let mut b = AvlNode::new(2);
        b.bf = 1;
        b.right = Some(Box::new(AvlNode::new(3)));
        a.bf = 2;
        a.right = Some(Box::new(b));
        assert!(!is_valid_avl(Some(&a)));
        assert_eq!(
            assert_avl_tree(Some(&a)),
            Err("AVL balance violated at 1".to_string())
        );
    }

    #[test]
    fn misordered_keys_are_reported() {
        let mut root = build(&[2, 1, 3]);
        root.as_mut().unwrap().key = 0;
        assert!(is_valid_avl(root.as_deref()));
        assert_eq!(
            assert_avl_tree(root.as_deref()),
            Err("Node order violated: 1 before 0".to_string())
        );
    }

    #[test]
    fn release_empties_handle() {
        let mut root = build(&[5, 3, 8, 1]);
        release(&mut root);
        assert!(root.is_none());
        assert_eq!(count(root.as_deref()), 0);
        release(&mut root);
        assert!(root.is_none());
    }

    #[test]
    fn queries() {
        let root = build(&[10, 5, 15, 3, 7]);
        assert!(contains(7, root.as_deref()));
        assert!(!contains(8, root.as_deref()));
        assert_eq!(first(root.as_deref()), Some(3));
        assert_eq!(last(root.as_deref()), Some(15));
        let keys: Vec<i32> = iter(root.as_deref()).map(|n| n.key).collect();
        assert_eq!(keys, vec![3, 5, 7, 10, 15]);
    }

    #[test]
    fn print_shows_balance_factors() {
        let root = build(&[2, 1]);
        assert_eq!(
            print(root.as_deref(), ""),
            "Node [bf=-1] 2\nL=Node [bf=0] 1\n  L=∅\n  R=∅\nR=∅"
        );
    }
}
