use std::alloc::{alloc, Layout};

use crate::error::AvlError;

/// Owning link to a subtree. `None` is the empty subtree.
///
/// The whole tree is one of these: the root slot. Every operation that can
/// restructure the tree takes the slot by `&mut` so the root may be replaced.
pub type Link = Option<Box<AvlNode>>;

/// A tree node. Owned exclusively by its parent's link or by the root slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvlNode {
    pub key: i32,
    pub left: Link,
    pub right: Link,
    /// Balance factor, `height(right) - height(left)`.
    pub bf: i8,
}

impl AvlNode {
    pub fn new(key: i32) -> Self {
        Self {
            key,
            left: None,
            right: None,
            bf: 0,
        }
    }

    /// Heap-allocates a detached leaf, reporting allocator failure as
    /// [`AvlError::NotEnoughMemory`] instead of aborting the process.
    pub fn try_boxed(key: i32) -> Result<Box<Self>, AvlError> {
        let layout = Layout::new::<Self>();
        // SAFETY: `AvlNode` is not zero-sized, so `layout` has a non-zero size.
        let ptr = unsafe { alloc(layout) }.cast::<Self>();
        if ptr.is_null() {
            return Err(AvlError::NotEnoughMemory);
        }
        // SAFETY: `ptr` is non-null and was returned by the global allocator
        // for `Layout::new::<Self>()`; it is initialised before `Box` owns it.
        unsafe {
            ptr.write(Self::new(key));
            Ok(Box::from_raw(ptr))
        }
    }
}

/// Which child link of a node an operation descended into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}
