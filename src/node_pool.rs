use std::ops::{Index, IndexMut};

use slab::Slab;
use tracing::trace;

use crate::cursor::skip_subtree;
use crate::error::TrieError;
use crate::node::{NodeIdx, TrieNode};

/// Arena holding every node of a trie.
///
/// Ownership flows strictly downward through `children`; `parent` links are
/// plain handles and never keep a node alive.
#[derive(Clone, Debug)]
pub(crate) struct NodePool<V> {
    pub(crate) nodes: Slab<TrieNode<V>>,
    next_stamp: u64,
}

impl<V> NodePool<V> {
    pub(crate) fn new() -> Self {
        NodePool {
            nodes: Slab::new(),
            next_stamp: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        NodePool {
            nodes: Slab::with_capacity(capacity),
            next_stamp: 0,
        }
    }

    fn stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }

    pub(crate) fn alloc_root(&mut self) -> NodeIdx {
        let stamp = self.stamp();
        let slot = self.nodes.insert(TrieNode::root(stamp));
        NodeIdx { slot, stamp }
    }

    /// Resolves a handle, returning `None` if its node has been released.
    #[inline(always)]
    pub(crate) fn get(&self, idx: NodeIdx) -> Option<&TrieNode<V>> {
        self.nodes.get(idx.slot).filter(|node| node.stamp == idx.stamp)
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, idx: NodeIdx) -> Option<&mut TrieNode<V>> {
        self.nodes
            .get_mut(idx.slot)
            .filter(|node| node.stamp == idx.stamp)
    }

    #[inline(always)]
    pub(crate) fn contains(&self, idx: NodeIdx) -> bool {
        self.get(idx).is_some()
    }

    /// Links a new path node under `parent` for `label`. If the child already
    /// exists it is returned untouched.
    pub(crate) fn add_child(&mut self, parent: NodeIdx, label: char) -> NodeIdx {
        if self[parent].has_child(label) {
            return self[parent].children[&label];
        }
        let stamp = self.stamp();
        let slot = self.nodes.insert(TrieNode::path(stamp, parent, label));
        let child = NodeIdx { slot, stamp };
        self[parent].children.insert(label, child);
        child
    }

    /// Detaches the child labelled `label` and releases its whole subtree.
    ///
    /// Returns the number of keys that lived in the released subtree.
    pub(crate) fn remove_child(
        &mut self,
        parent: NodeIdx,
        label: char,
    ) -> Result<usize, TrieError> {
        let child = self
            .get_mut(parent)
            .ok_or(TrieError::InvalidatedIterator)?
            .children
            .remove(&label)
            .ok_or(TrieError::NotFound)?;
        Ok(self.release(child))
    }

    fn release(&mut self, top: NodeIdx) -> usize {
        let mut keys = 0;
        let mut released = 0;
        let mut stack = vec![top];
        while let Some(idx) = stack.pop() {
            let node = self.nodes.remove(idx.slot);
            if node.is_key() {
                keys += 1;
            }
            released += 1;
            stack.extend(node.children.into_values());
        }
        trace!(released, keys, "released subtree");
        keys
    }

    /// Walks `key` down from `from`, returning the node it ends on.
    pub(crate) fn walk(&self, from: NodeIdx, key: impl Iterator<Item = char>) -> Option<NodeIdx> {
        let mut current = from;
        for label in key {
            current = self.get(current)?.child(label).ok()?;
        }
        Some(current)
    }

    /// Walks `key` down from `from`, creating path nodes as needed.
    pub(crate) fn walk_or_create(
        &mut self,
        from: NodeIdx,
        key: impl Iterator<Item = char>,
    ) -> NodeIdx {
        let mut current = from;
        for label in key {
            current = match self[current].child(label) {
                Ok(existing) => existing,
                Err(_) => self.add_child(current, label),
            };
        }
        current
    }

    /// Removes dangling path nodes from `from` upward, never removing `stop`.
    ///
    /// Returns the number of nodes removed.
    pub(crate) fn prune_upward(&mut self, from: NodeIdx, stop: NodeIdx) -> usize {
        let mut pruned = 0;
        let mut current = from;
        while current != stop {
            let node = &self[current];
            if !node.is_dangling() {
                break;
            }
            let (Some(parent), Some(label)) = (node.parent, node.label) else {
                break;
            };
            self[parent].children.remove(&label);
            self.nodes.remove(current.slot);
            pruned += 1;
            current = parent;
        }
        if pruned > 0 {
            trace!(pruned, "pruned dangling path nodes");
        }
        pruned
    }

    /// Removes the key held by `idx` inside the domain rooted at `scope`.
    ///
    /// A node with descendants stays as a path node; a leaf is released along
    /// with every ancestor left dangling. Returns the removed value and the
    /// node that follows `idx` in pre-order, computed before anything moves.
    pub(crate) fn erase_key(
        &mut self,
        scope: NodeIdx,
        idx: NodeIdx,
    ) -> Result<(V, Option<NodeIdx>), TrieError> {
        let node = self.get(idx).ok_or(TrieError::InvalidatedIterator)?;
        if !node.is_key() {
            return Err(TrieError::InvalidOperation("cursor is not at a key"));
        }
        let next = match node.first_child() {
            Some(child) => Some(child),
            None => skip_subtree(self, scope, idx)?,
        };
        let value = self[idx]
            .value
            .take()
            .ok_or(TrieError::InvalidOperation("cursor is not at a key"))?;
        self.prune_upward(idx, scope);
        Ok((value, next))
    }

    /// Releases `idx` and everything below it. The domain root `scope` is
    /// emptied in place instead of released.
    ///
    /// Returns the number of keys removed and the node that now follows the
    /// released subtree.
    pub(crate) fn erase_subtree(
        &mut self,
        scope: NodeIdx,
        idx: NodeIdx,
    ) -> Result<(usize, Option<NodeIdx>), TrieError> {
        if idx == scope {
            return Ok((self.empty_node(scope), None));
        }
        let next = skip_subtree(self, scope, idx)?;
        let node = &self[idx];
        let (Some(parent), Some(label)) = (node.parent, node.label) else {
            return Err(TrieError::InvalidatedIterator);
        };
        let keys = self.remove_child(parent, label)?;
        self.prune_upward(parent, scope);
        Ok((keys, next))
    }

    /// Number of key-bearing nodes in the subtree rooted at `top`, `top` included.
    pub(crate) fn count_keys(&self, top: NodeIdx) -> usize {
        let mut keys = 0;
        let mut stack = vec![top];
        while let Some(idx) = stack.pop() {
            let node = &self[idx];
            if node.is_key() {
                keys += 1;
            }
            stack.extend(node.children.values().copied());
        }
        keys
    }

    /// Releases every child of `idx` and drops its value, keeping `idx` itself.
    ///
    /// Returns the number of keys removed.
    pub(crate) fn empty_node(&mut self, idx: NodeIdx) -> usize {
        let node = &mut self[idx];
        let mut keys = usize::from(node.value.take().is_some());
        let children = std::mem::take(&mut node.children);
        for child in children.into_values() {
            keys += self.release(child);
        }
        keys
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.nodes
            .iter_mut()
            .filter_map(|(_, node)| node.value.as_mut())
    }
}

impl<V: Clone> NodePool<V> {
    /// Copies the subtree below `src_top` in `src` under `dst_top`, including
    /// the value held by `src_top` itself.
    pub(crate) fn copy_subtree_from(
        &mut self,
        dst_top: NodeIdx,
        src: &NodePool<V>,
        src_top: NodeIdx,
    ) {
        let mut stack = vec![(src_top, dst_top)];
        while let Some((from, to)) = stack.pop() {
            let node = &src[from];
            self[to].value = node.value.clone();
            for (&label, &child) in &node.children {
                let copy = self.add_child(to, label);
                stack.push((child, copy));
            }
        }
    }
}

impl<V> Index<NodeIdx> for NodePool<V> {
    type Output = TrieNode<V>;

    fn index(&self, idx: NodeIdx) -> &Self::Output {
        match self.get(idx) {
            Some(node) => node,
            None => panic!("stale node handle {idx:?}"),
        }
    }
}

impl<V> IndexMut<NodeIdx> for NodePool<V> {
    fn index_mut(&mut self, idx: NodeIdx) -> &mut Self::Output {
        match self.get_mut(idx) {
            Some(node) => node,
            None => panic!("stale node handle {idx:?}"),
        }
    }
}
