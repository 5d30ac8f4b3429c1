//! Growth and shrink propagation.
//!
//! Both run in the frame of an ancestor after the recursive call into one of
//! its subtrees returns. They take the slot holding the ancestor, whether the
//! child subtree changed height, and which side the change happened on, and
//! return whether the ancestor's own subtree changed height. A rotation
//! replaces the node in the slot.

use super::rotate::{rotate_left, rotate_left_ext, rotate_right, rotate_right_ext};
use super::types::{Link, Side};

/// Balances the subtree in `slot` after one of its children grew by one level.
pub fn subtree_growth(slot: &mut Link, grew: bool, side: Side) -> bool {
    if !grew {
        return false;
    }
    let node = slot.as_deref_mut().expect("growth on an empty subtree");
    match (side, node.bf) {
        (Side::Left, -1) => {
            let p = slot.take().expect("growth on an empty subtree");
            *slot = Some(rotate_right(p));
            false
        }
        (Side::Left, 0) => {
            node.bf = -1;
            true
        }
        (Side::Left, 1) => {
            node.bf = 0;
            false
        }
        (Side::Right, -1) => {
            node.bf = 0;
            false
        }
        (Side::Right, 0) => {
            node.bf = 1;
            true
        }
        (Side::Right, 1) => {
            let p = slot.take().expect("growth on an empty subtree");
            *slot = Some(rotate_left(p));
            false
        }
        (_, bf) => unreachable!("balance factor out of range: {bf}"),
    }
}

/// Balances the subtree in `slot` after one of its children shrank by one
/// level.
pub fn subtree_shrink(slot: &mut Link, shrank: bool, side: Side) -> bool {
    if !shrank {
        return false;
    }
    let node = slot.as_deref_mut().expect("shrink on an empty subtree");
    match (side, node.bf) {
        (Side::Left, -1) => {
            node.bf = 0;
            true
        }
        (Side::Left, 0) => {
            node.bf = 1;
            false
        }
        (Side::Left, 1) => {
            let p = slot.take().expect("shrink on an empty subtree");
            let (root, shorter) = rotate_left_ext(p);
            let settled = root.bf == -1;
            *slot = Some(root);
            shorter && !settled
        }
        (Side::Right, 1) => {
            node.bf = 0;
            true
        }
        (Side::Right, 0) => {
            node.bf = -1;
            false
        }
        (Side::Right, -1) => {
            let p = slot.take().expect("shrink on an empty subtree");
            let (root, shorter) = rotate_right_ext(p);
            let settled = root.bf == 1;
            *slot = Some(root);
            shorter && !settled
        }
        (_, bf) => unreachable!("balance factor out of range: {bf}"),
    }
}
