use std::collections::BTreeMap;
use std::ops::Bound;

use crate::error::TrieError;

/// Stable handle to a node in a [`NodePool`](crate::node_pool::NodePool).
///
/// The stamp is unique per allocation, so a handle to a released slot never
/// resolves to whatever node later reuses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx {
    pub(crate) slot: usize,
    pub(crate) stamp: u64,
}

#[derive(Clone, Debug)]
pub(crate) struct TrieNode<V> {
    pub(crate) stamp: u64,
    /// `None` only for the root of a trie.
    pub(crate) label: Option<char>,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) children: BTreeMap<char, NodeIdx>,
    pub(crate) value: Option<V>,
}

impl<V> TrieNode<V> {
    pub(crate) fn root(stamp: u64) -> Self {
        TrieNode {
            stamp,
            label: None,
            parent: None,
            children: BTreeMap::new(),
            value: None,
        }
    }

    pub(crate) fn path(stamp: u64, parent: NodeIdx, label: char) -> Self {
        TrieNode {
            stamp,
            label: Some(label),
            parent: Some(parent),
            children: BTreeMap::new(),
            value: None,
        }
    }

    #[inline(always)]
    pub(crate) fn has_child(&self, label: char) -> bool {
        self.children.contains_key(&label)
    }

    #[inline(always)]
    pub(crate) fn child(&self, label: char) -> Result<NodeIdx, TrieError> {
        self.children
            .get(&label)
            .copied()
            .ok_or(TrieError::NotFound)
    }

    #[inline(always)]
    pub(crate) fn first_child(&self) -> Option<NodeIdx> {
        self.children.values().next().copied()
    }

    /// Child whose label is the next greater one after `label`.
    #[inline(always)]
    pub(crate) fn next_child_after(&self, label: char) -> Option<NodeIdx> {
        self.children
            .range((Bound::Excluded(label), Bound::Unbounded))
            .next()
            .map(|(_, &idx)| idx)
    }

    #[inline(always)]
    pub(crate) fn is_key(&self) -> bool {
        self.value.is_some()
    }

    /// Marks the node as a key and stores `value`, returning the value it replaced.
    pub(crate) fn set_value(&mut self, value: V) -> Option<V> {
        self.value.replace(value)
    }

    pub(crate) fn value(&self) -> Result<&V, TrieError> {
        self.value
            .as_ref()
            .ok_or(TrieError::InvalidOperation("node does not hold a key"))
    }

    pub(crate) fn value_mut(&mut self) -> Result<&mut V, TrieError> {
        self.value
            .as_mut()
            .ok_or(TrieError::InvalidOperation("node does not hold a key"))
    }

    /// A path node that holds no key and has no children must not stay in the trie.
    #[inline(always)]
    pub(crate) fn is_dangling(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }
}
