//! Height-balanced binary search tree (AVL) over unique `i32` keys.
//!
//! A tree is nothing more than its root slot, a [`Link`]: an optional owned
//! node. Every mutating operation takes the slot by `&mut` so that a rotation
//! or removal at the top can replace the root in place. Each node stores its
//! balance factor, so rebalancing never recomputes subtree heights.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`avl::types`] | [`AvlNode`], [`Link`], [`Side`] |
//! [`avl::rotate`] | single and double rotations, plus the removal variants |
//! [`avl::rebalance`] | growth / shrink propagation run while unwinding |
//! [`avl::util`] | `insert`, `remove`, diagnostics and traversal |
//! [`avl::avl_set`] | [`AvlSet`], an owning wrapper that tracks its size |
//! [`fuzzer`] | seeded key generator |
//! [`stress`] | randomized insert/remove harness |
//!
//! ```
//! use avl_tree::{count, insert, is_valid_avl, remove, AvlError, Link};
//!
//! let mut root: Link = None;
//! for key in [16, 7, 19, 6, 12] {
//!     insert(key, &mut root).unwrap();
//! }
//! assert_eq!(insert(7, &mut root), Err(AvlError::AlreadyInserted));
//! remove(16, &mut root).unwrap();
//! assert_eq!(count(root.as_deref()), 4);
//! assert!(is_valid_avl(root.as_deref()));
//! ```

pub mod avl;
pub mod error;
pub mod fuzzer;
pub mod stress;

pub use avl::{
    assert_avl_tree, contains, count, first, for_each, format_in_order, height, insert,
    is_valid_avl, iter, last, print, release, remove, AvlNode, AvlSet, Link, Side,
};
pub use error::AvlError;
