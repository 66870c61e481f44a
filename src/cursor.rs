//! Cursors and the pre-order walk they follow.
//!
//! A [`Cursor`] is a detached position: it holds no borrow of its trie, so it
//! can be kept across mutations and handed back to operations such as
//! [`Trie::erase`](crate::Trie::erase). Every operation that consumes a cursor
//! re-validates it against the arena first.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::TrieError;
use crate::node::{NodeIdx, TrieNode};
use crate::node_pool::NodePool;

/// Identity of one owning trie instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TrieId(u64);

impl TrieId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        TrieId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A position in the pre-order walk of a [`Trie`](crate::Trie) or
/// [`SubTrie`](crate::SubTrie).
///
/// A cursor denotes either a node, key-bearing or a plain path node, or the
/// end of the walk. Two cursors are equal when they denote the same node, or
/// are both the end of the same trie.
///
/// Erasing a node invalidates every cursor at or below it; using such a
/// cursor afterwards fails with [`TrieError::InvalidatedIterator`]. Cursors
/// taken from a sub-trie view are only accepted by that view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub(crate) owner: TrieId,
    pub(crate) scope: NodeIdx,
    pub(crate) node: Option<NodeIdx>,
}

impl Cursor {
    /// Returns `true` if this cursor is past the last node.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

/// Pre-order successor of `idx`, never leaving the subtree rooted at `scope`.
pub(crate) fn successor<V>(
    pool: &NodePool<V>,
    scope: NodeIdx,
    idx: NodeIdx,
) -> Result<Option<NodeIdx>, TrieError> {
    let node = pool.get(idx).ok_or(TrieError::InvalidatedIterator)?;
    match node.first_child() {
        Some(child) => Ok(Some(child)),
        None => skip_subtree(pool, scope, idx),
    }
}

/// First node after the whole subtree of `idx` in pre-order.
pub(crate) fn skip_subtree<V>(
    pool: &NodePool<V>,
    scope: NodeIdx,
    idx: NodeIdx,
) -> Result<Option<NodeIdx>, TrieError> {
    let mut current = idx;
    while current != scope {
        let node = pool.get(current).ok_or(TrieError::InvalidatedIterator)?;
        let (Some(parent), Some(label)) = (node.parent, node.label) else {
            return Err(TrieError::InvalidatedIterator);
        };
        let parent_node = pool.get(parent).ok_or(TrieError::InvalidatedIterator)?;
        if let Some(next) = parent_node.next_child_after(label) {
            return Ok(Some(next));
        }
        current = parent;
    }
    Ok(None)
}

/// Concatenated edge labels from `scope` down to `idx`.
pub(crate) fn full_key<V>(
    pool: &NodePool<V>,
    scope: NodeIdx,
    idx: NodeIdx,
) -> Result<String, TrieError> {
    let mut labels = Vec::new();
    let mut current = idx;
    while current != scope {
        let node = pool.get(current).ok_or(TrieError::InvalidatedIterator)?;
        let (Some(parent), Some(label)) = (node.parent, node.label) else {
            return Err(TrieError::InvalidatedIterator);
        };
        labels.push(label);
        current = parent;
    }
    Ok(labels.into_iter().rev().collect())
}

/// The walk over one traversal domain: a whole trie, or the subtree a view aliases.
pub(crate) struct Walk<'a, V> {
    pub(crate) pool: &'a NodePool<V>,
    pub(crate) owner: TrieId,
    pub(crate) scope: NodeIdx,
}

impl<'a, V> Walk<'a, V> {
    pub(crate) fn cursor(&self, node: Option<NodeIdx>) -> Cursor {
        Cursor {
            owner: self.owner,
            scope: self.scope,
            node,
        }
    }

    /// Validates `cursor` for this domain and returns the node it denotes.
    pub(crate) fn resolve(&self, cursor: Cursor) -> Result<Option<NodeIdx>, TrieError> {
        if cursor.owner != self.owner || cursor.scope != self.scope {
            return Err(TrieError::ForeignCursor);
        }
        match cursor.node {
            Some(idx) if !self.pool.contains(idx) => Err(TrieError::InvalidatedIterator),
            node => Ok(node),
        }
    }

    /// Like [`Walk::resolve`], but the end cursor is rejected.
    pub(crate) fn resolve_node(&self, cursor: Cursor) -> Result<NodeIdx, TrieError> {
        self.resolve(cursor)?
            .ok_or(TrieError::InvalidOperation("cursor is at the end"))
    }

    pub(crate) fn node(&self, cursor: Cursor) -> Result<&'a TrieNode<V>, TrieError> {
        let idx = self.resolve_node(cursor)?;
        self.pool.get(idx).ok_or(TrieError::InvalidatedIterator)
    }

    pub(crate) fn begin(&self) -> Cursor {
        match self.pool.get(self.scope) {
            Some(root) if root.is_key() => self.cursor(Some(self.scope)),
            Some(_) => match successor(self.pool, self.scope, self.scope) {
                Ok(first) => self.cursor(first),
                Err(err) => unreachable!("live traversal root failed to advance: {err}"),
            },
            None => self.end(),
        }
    }

    pub(crate) fn end(&self) -> Cursor {
        self.cursor(None)
    }

    pub(crate) fn advance(&self, cursor: Cursor) -> Result<Cursor, TrieError> {
        let idx = self
            .resolve(cursor)?
            .ok_or(TrieError::InvalidOperation("cannot advance past the end"))?;
        Ok(self.cursor(successor(self.pool, self.scope, idx)?))
    }

    pub(crate) fn full_key(&self, cursor: Cursor) -> Result<String, TrieError> {
        full_key(self.pool, self.scope, self.resolve_node(cursor)?)
    }

    pub(crate) fn get(&self, cursor: Cursor) -> Result<(Option<char>, &'a V), TrieError> {
        let node = self.node(cursor)?;
        Ok((node.label, node.value()?))
    }
}
