//! Error handling and result types for AvlTree operations.
//!
//! Most tree operations cannot fail: a duplicate insert is reported through
//! the `inserted` flag and a missing key through a zero erase count. The
//! errors below cover the fallible `try_*` API, cursor access and the
//! internal invariant checks of the rebalancing engine.

use thiserror::Error;

use crate::types::NodeId;

/// Error type for AVL tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvlTreeError {
    /// Key not found in the tree.
    #[error("Key not found in tree")]
    KeyNotFound,
    /// A rotation was asked to run without the child it pivots on.
    #[error("Invariant violation: {rotation} rotation requires a child that is absent")]
    MissingChild { rotation: &'static str },
    /// A cursor was dereferenced after the end of its traversal.
    #[error("Cursor is exhausted")]
    ExhaustedCursor,
    /// A handle refers to a slot that holds no node.
    #[error("Handle {0} does not refer to a live node")]
    InvalidHandle(NodeId),
    /// Internal data structure integrity violation.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),
    /// Tree corruption detected.
    #[error("Corrupted tree: {0}")]
    CorruptedTree(String),
    /// Arena bookkeeping disagrees with the tree.
    #[error("Arena error: {0}")]
    ArenaError(String),
}

impl AvlTreeError {
    /// Create a MissingChild error for the named rotation
    pub fn missing_child(rotation: &'static str) -> Self {
        Self::MissingChild { rotation }
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Create an ArenaError with context
    pub fn arena_error(operation: &str, details: &str) -> Self {
        Self::ArenaError(format!("{} failed: {}", operation, details))
    }

    /// True for errors that can only come from a bug in the engine itself.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingChild { .. } | Self::CorruptedTree(_) | Self::ArenaError(_)
        )
    }
}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, AvlTreeError>;

/// Public result type for tree operations that may fail
pub type AvlResult<T> = Result<T, AvlTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, AvlTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, AvlTreeError>;

/// Result extension trait for attaching context to errors
pub trait AvlResultExt<T> {
    /// Convert to an AvlResult with additional context
    fn with_context(self, context: &str) -> AvlResult<T>;

    /// Convert to an AvlResult with operation context
    fn with_operation(self, operation: &str) -> AvlResult<T>;
}

impl<T> AvlResultExt<T> for Result<T, AvlTreeError> {
    fn with_context(self, context: &str) -> AvlResult<T> {
        self.map_err(|e| match e {
            AvlTreeError::DataIntegrityError(msg) => AvlTreeError::data_integrity(context, &msg),
            AvlTreeError::CorruptedTree(msg) => AvlTreeError::corrupted_tree(context, &msg),
            AvlTreeError::ArenaError(msg) => AvlTreeError::arena_error(context, &msg),
            other => other,
        })
    }

    fn with_operation(self, operation: &str) -> AvlResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }
}
