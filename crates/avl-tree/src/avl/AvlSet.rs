use log::debug;

use crate::error::AvlError;

use super::types::{AvlNode, Link};
use super::util::{self, Iter};

/// AVL set of `i32` keys that owns its root slot and keeps a running size.
///
/// The free functions in [`util`](super::util) remain the primary interface;
/// this wrapper saves callers from threading the root handle and counting
/// nodes themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvlSet {
    root: Link,
    size: usize,
}

impl AvlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key`. Returns whether the tree height changed.
    pub fn add(&mut self, key: i32) -> Result<bool, AvlError> {
        let grew = util::insert(key, &mut self.root).inspect_err(|e| {
            debug!("add({key}) rejected: {e}");
        })?;
        self.size += 1;
        Ok(grew)
    }

    /// Removes `key`. Returns whether the tree height changed.
    pub fn del(&mut self, key: i32) -> Result<bool, AvlError> {
        let shrank = util::remove(key, &mut self.root).inspect_err(|e| {
            debug!("del({key}) rejected: {e}");
        })?;
        self.size -= 1;
        Ok(shrank)
    }

    pub fn clear(&mut self) {
        util::release(&mut self.root);
        self.size = 0;
    }

    pub fn has(&self, key: i32) -> bool {
        util::contains(key, self.root.as_deref())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn height(&self) -> i32 {
        util::height(self.root.as_deref())
    }

    pub fn first(&self) -> Option<i32> {
        util::first(self.root.as_deref())
    }

    pub fn last(&self) -> Option<i32> {
        util::last(self.root.as_deref())
    }

    pub fn iter(&self) -> Iter<'_> {
        util::iter(self.root.as_deref())
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.iter().map(|n| n.key)
    }

    pub fn root(&self) -> Option<&AvlNode> {
        self.root.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        util::is_valid_avl(self.root.as_deref())
    }

    /// Full structural check, including that the tracked size matches the
    /// number of reachable nodes.
    pub fn assert_valid(&self) -> Result<(), String> {
        util::assert_avl_tree(self.root.as_deref())?;
        let counted = util::count(self.root.as_deref());
        if counted != self.size {
            return Err(format!("Size mismatch: tracked {}, counted {counted}", self.size));
        }
        Ok(())
    }

    /// Adds every key, skipping ones already present. Stops at the first
    /// allocation failure; keys added before it stay in the set.
    pub fn try_extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) -> Result<(), AvlError> {
        for key in iter {
            match self.add(key) {
                Ok(_) | Err(AvlError::AlreadyInserted) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl Extend<i32> for AvlSet {
    /// Adds every key, skipping ones already present.
    ///
    /// Panics if a node cannot be allocated, like the std collections do.
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        if let Err(e) = self.try_extend(iter) {
            panic!("AvlSet::extend: {e}");
        }
    }
}

impl FromIterator<i32> for AvlSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a AvlSet {
    type Item = &'a AvlNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
