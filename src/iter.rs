use crate::Trie;
use crate::cursor::{Cursor, Walk, full_key, successor};
use crate::node::NodeIdx;
use crate::node_pool::NodePool;

/// Pre-order walk over node handles, driven only by parent links and child
/// order.
pub(crate) struct Preorder<'a, V> {
    pool: &'a NodePool<V>,
    scope: NodeIdx,
    next: Option<NodeIdx>,
}

impl<'a, V> Preorder<'a, V> {
    pub(crate) fn new(pool: &'a NodePool<V>, scope: NodeIdx, start: Option<NodeIdx>) -> Self {
        Preorder { pool, scope, next: start }
    }
}

impl<V> Iterator for Preorder<'_, V> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        // the pool is borrowed for the whole walk, so no node can be released under it
        self.next = match successor(self.pool, self.scope, idx) {
            Ok(next) => next,
            Err(err) => unreachable!("pre-order walk reached a released node: {err}"),
        };
        Some(idx)
    }
}

/// An iterator over the keys and values of a [`Trie`] or [`SubTrie`](crate::SubTrie).
///
/// This struct is created by the [`iter`] method on [`Trie`].
///
/// [`iter`]: Trie::iter
pub struct Iter<'a, V> {
    nodes: Preorder<'a, V>,
    prefix: String,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(pool: &'a NodePool<V>, scope: NodeIdx, len: usize) -> Self {
        Self::with_prefix(pool, scope, String::new(), len)
    }

    pub(crate) fn with_prefix(
        pool: &'a NodePool<V>,
        scope: NodeIdx,
        prefix: String,
        len: usize,
    ) -> Self {
        Iter {
            nodes: Preorder::new(pool, scope, Some(scope)),
            prefix,
            remaining: len,
        }
    }

    pub(crate) fn empty(pool: &'a NodePool<V>, scope: NodeIdx) -> Self {
        Iter {
            nodes: Preorder::new(pool, scope, None),
            prefix: String::new(),
            remaining: 0,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let pool = self.nodes.pool;
        let scope = self.nodes.scope;
        for idx in self.nodes.by_ref() {
            if let Some(value) = pool.get(idx).and_then(|node| node.value.as_ref()) {
                let mut key = self.prefix.clone();
                match full_key(pool, scope, idx) {
                    Ok(suffix) => key.push_str(&suffix),
                    Err(err) => unreachable!("walked node lost its parent chain: {err}"),
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// An iterator over the keys of a [`Trie`].
///
/// This struct is created by the [`keys`] method on [`Trie`].
///
/// [`keys`]: Trie::keys
pub struct Keys<'a, V> {
    pub(crate) inner: Iter<'a, V>,
}

impl<V> Iterator for Keys<'_, V> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

/// An iterator over the values of a [`Trie`], in key order.
///
/// This struct is created by the [`values`] method on [`Trie`].
///
/// [`values`]: Trie::values
pub struct Values<'a, V> {
    pub(crate) inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

/// An iterator over the cursors of every node of a [`Trie`], path nodes
/// included.
///
/// This struct is created by the [`cursors`] method on [`Trie`].
///
/// [`cursors`]: Trie::cursors
pub struct Cursors<'a, V> {
    walk: Walk<'a, V>,
    nodes: Preorder<'a, V>,
}

impl<'a, V> Cursors<'a, V> {
    pub(crate) fn new(walk: Walk<'a, V>) -> Self {
        let nodes = Preorder::new(walk.pool, walk.scope, walk.begin().node);
        Cursors { walk, nodes }
    }
}

impl<V> Iterator for Cursors<'_, V> {
    type Item = Cursor;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|idx| self.walk.cursor(Some(idx)))
    }
}

/// An owning iterator over the keys and values of a [`Trie`], in key order.
///
/// This struct is created when a [`Trie`] is consumed using `into_iter()`.
pub struct IntoIter<V> {
    pool: NodePool<V>,
    order: std::vec::IntoIter<(String, NodeIdx)>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        for (key, idx) in self.order.by_ref() {
            if let Some(value) = self.pool.get_mut(idx).and_then(|node| node.value.take()) {
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> IntoIterator for Trie<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    /// Consumes the trie into an iterator yielding owned keys and values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let trie = Trie::from([("b", 2), ("a", 1)]);
    /// let pairs: Vec<_> = trie.into_iter().collect();
    /// assert_eq!(pairs, [("a".to_string(), 1), ("b".to_string(), 2)]);
    /// ```
    fn into_iter(self) -> Self::IntoIter {
        let order = Preorder::new(&self.pool, self.root, Some(self.root))
            .filter(|&idx| self.pool[idx].is_key())
            .map(|idx| match full_key(&self.pool, self.root, idx) {
                Ok(key) => (key, idx),
                Err(err) => unreachable!("walked node lost its parent chain: {err}"),
            })
            .collect::<Vec<_>>();

        IntoIter {
            pool: self.pool,
            order: order.into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    /// Returns an iterator over references to the keys and values of the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let trie = Trie::from([("a", 1), ("b", 2)]);
    ///
    /// for (key, value) in &trie {
    ///     println!("{key}: {value}");
    /// }
    /// ```
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
