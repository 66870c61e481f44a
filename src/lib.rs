//! A character trie mapping strings to values.
//!
//! This crate provides a [`Trie`], which stores one node per character of
//! every key and keeps its keys in sorted order. Besides the usual map
//! operations it exposes the tree itself through detached [`Cursor`]s and
//! lets callers work on a subtree through a [`SubTrie`] view.
//!
//! # Features
//!
//! - Key lookups with O(k) complexity where k is the key length
//! - Pre-order cursors over every node, path nodes included
//! - Sub-trie views that share storage with their source trie
//! - Prefix-based iteration
//! - Entry API for efficient in-place updates
//!
//! # Example
//!
//! ```
//! use chartrie::Trie;
//!
//! let mut trie = Trie::from([("ab", 1), ("ac", 2), ("acde", 3), ("acf", 4)]);
//!
//! let mut cursor = trie.begin();
//! let mut walked = Vec::new();
//! while cursor != trie.end() {
//!     walked.push(trie.full_key(cursor)?);
//!     cursor = trie.advance(cursor)?;
//! }
//! assert_eq!(walked, ["a", "ab", "ac", "acd", "acde", "acf"]);
//!
//! let view = trie.get_sub_trie("ac")?;
//! assert_eq!(view.keys().collect::<Vec<_>>(), ["", "de", "f"]);
//! # Ok::<(), chartrie::TrieError>(())
//! ```

mod as_chars;
mod cursor;
mod entry;
mod error;
mod iter;
mod node;
mod node_pool;
mod sub_trie;
mod trie;

pub use as_chars::AsChars;
pub use cursor::Cursor;
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::TrieError;
pub use iter::{Cursors, IntoIter, Iter, Keys, Values};
pub use sub_trie::SubTrie;
pub use trie::Trie;

pub type Result<T, E = TrieError> = std::result::Result<T, E>;

#[cfg(test)]
mod proptest_trie;
