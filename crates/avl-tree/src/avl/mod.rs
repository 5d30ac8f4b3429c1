//! Box-owned AVL tree over unique `i32` keys.

#[path = "AvlSet.rs"]
pub mod avl_set;
pub mod rebalance;
pub mod rotate;
pub mod types;
pub mod util;

pub use avl_set::AvlSet;
pub use types::{AvlNode, Link, Side};
pub use util::*;
