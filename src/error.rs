use thiserror::Error;

/// Errors reported by [`Trie`](crate::Trie) and [`SubTrie`](crate::SubTrie) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrieError {
    /// The requested key or path segment does not exist.
    #[error("key not found")]
    NotFound,
    /// The cursor refers to a node that has been erased, or climbing from it
    /// hit a node without the expected parent link.
    #[error("cursor has been invalidated")]
    InvalidatedIterator,
    /// The operation is not meaningful for the given state.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    /// The cursor was produced by a different trie or view.
    #[error("cursor belongs to a different trie")]
    ForeignCursor,
}
