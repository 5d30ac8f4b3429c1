//! Rotation primitives.
//!
//! Each rotation consumes the root `p` of a subtree whose heavy child `u`
//! exists, relinks `p`, `u` and (for the double case) `v`, fixes the balance
//! factors from the pre-rotation factors of the children, and returns the new
//! subtree root. The caller stores the result back into the slot `p` came
//! from.
//!
//! The `_ext` variants are used while unwinding a removal. They also accept a
//! perfectly balanced heavy child, which cannot happen after an insertion, and
//! report whether the subtree ended up shorter than before the removal.

use log::trace;

use super::types::AvlNode;

// ── helpers ───────────────────────────────────────────────────────────────

/// Factors of `(p, u)` after a left-right double rotation, keyed on the
/// factor of the grandchild `v = p.left.right`.
fn left_right_factors(v_bf: i8) -> (i8, i8) {
    match v_bf {
        -1 => (1, 0),
        0 => (0, 0),
        1 => (0, -1),
        bf => unreachable!("grandchild balance factor out of range: {bf}"),
    }
}

/// Factors of `(p, u)` after a right-left double rotation, keyed on the
/// factor of the grandchild `v = p.right.left`.
fn right_left_factors(v_bf: i8) -> (i8, i8) {
    match v_bf {
        -1 => (0, 1),
        0 => (0, 0),
        1 => (-1, 0),
        bf => unreachable!("grandchild balance factor out of range: {bf}"),
    }
}

fn single_right(mut p: Box<AvlNode>, mut u: Box<AvlNode>, p_bf: i8, u_bf: i8) -> Box<AvlNode> {
    p.left = u.right.take();
    p.bf = p_bf;
    u.bf = u_bf;
    u.right = Some(p);
    u
}

fn single_left(mut p: Box<AvlNode>, mut u: Box<AvlNode>, p_bf: i8, u_bf: i8) -> Box<AvlNode> {
    p.right = u.left.take();
    p.bf = p_bf;
    u.bf = u_bf;
    u.left = Some(p);
    u
}

fn double_right(mut p: Box<AvlNode>, mut u: Box<AvlNode>) -> Box<AvlNode> {
    let mut v = u.right.take().expect("left-right rotation needs u.right");
    u.right = v.left.take();
    p.left = v.right.take();
    (p.bf, u.bf) = left_right_factors(v.bf);
    v.bf = 0;
    v.left = Some(u);
    v.right = Some(p);
    v
}

fn double_left(mut p: Box<AvlNode>, mut u: Box<AvlNode>) -> Box<AvlNode> {
    let mut v = u.left.take().expect("right-left rotation needs u.left");
    u.left = v.right.take();
    p.right = v.left.take();
    (p.bf, u.bf) = right_left_factors(v.bf);
    v.bf = 0;
    v.left = Some(p);
    v.right = Some(u);
    v
}

// ── insertion rotations ───────────────────────────────────────────────────

/// Restores a subtree whose left side grew past the AVL bound.
pub fn rotate_right(mut p: Box<AvlNode>) -> Box<AvlNode> {
    let u = p.left.take().expect("right rotation needs a left child");
    trace!("rotate right at {} (left child bf={})", p.key, u.bf);
    match u.bf {
        -1 => single_right(p, u, 0, 0),
        1 => double_right(p, u),
        bf => unreachable!("right rotation with balanced left child (bf={bf})"),
    }
}

/// Mirror of [`rotate_right`].
pub fn rotate_left(mut p: Box<AvlNode>) -> Box<AvlNode> {
    let u = p.right.take().expect("left rotation needs a right child");
    trace!("rotate left at {} (right child bf={})", p.key, u.bf);
    match u.bf {
        1 => single_left(p, u, 0, 0),
        -1 => double_left(p, u),
        bf => unreachable!("left rotation with balanced right child (bf={bf})"),
    }
}

// ── removal rotations ─────────────────────────────────────────────────────

/// Restores a subtree whose right side shrank past the AVL bound.
///
/// Returns the new root and whether the subtree is now one level shorter.
pub fn rotate_right_ext(mut p: Box<AvlNode>) -> (Box<AvlNode>, bool) {
    let u = p.left.take().expect("right rotation needs a left child");
    trace!("rotate right (ext) at {} (left child bf={})", p.key, u.bf);
    match u.bf {
        -1 => (single_right(p, u, 0, 0), true),
        0 => (single_right(p, u, -1, 1), false),
        1 => (double_right(p, u), true),
        bf => unreachable!("left child balance factor out of range: {bf}"),
    }
}

/// Mirror of [`rotate_right_ext`].
pub fn rotate_left_ext(mut p: Box<AvlNode>) -> (Box<AvlNode>, bool) {
    let u = p.right.take().expect("left rotation needs a right child");
    trace!("rotate left (ext) at {} (right child bf={})", p.key, u.bf);
    match u.bf {
        1 => (single_left(p, u, 0, 0), true),
        0 => (single_left(p, u, 1, -1), false),
        -1 => (double_left(p, u), true),
        bf => unreachable!("right child balance factor out of range: {bf}"),
    }
}
