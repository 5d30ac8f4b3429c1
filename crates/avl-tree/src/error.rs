use thiserror::Error;

/// Rejected-operation outcomes reported by [`insert`](crate::insert) and
/// [`remove`](crate::remove).
///
/// None of these leave the tree in a modified state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AvlError {
    /// The allocator could not provide memory for a new node.
    #[error("NOT_ENOUGH_MEMORY")]
    NotEnoughMemory,
    /// The key is already stored in the tree.
    #[error("ALREADY_INSERTED")]
    AlreadyInserted,
    /// The key is not stored in the tree, or the tree is empty.
    #[error("INVALID_REMOVE")]
    InvalidRemove,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_upper_snake_codes() {
        assert_eq!(AvlError::NotEnoughMemory.to_string(), "NOT_ENOUGH_MEMORY");
        assert_eq!(AvlError::AlreadyInserted.to_string(), "ALREADY_INSERTED");
        assert_eq!(AvlError::InvalidRemove.to_string(), "INVALID_REMOVE");
    }
}
