use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use crate::as_chars::AsChars;
use crate::cursor::{Cursor, TrieId, Walk, full_key, successor};
use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::error::TrieError;
use crate::iter::{Cursors, Iter, Keys, Values};
use crate::node::NodeIdx;
use crate::node_pool::NodePool;
use crate::sub_trie::SubTrie;

/// A `Trie` maps strings to values, storing one node per character of every
/// key.
///
/// Keys are kept in lexicographic order of their characters, so every walk
/// over the trie visits them sorted. Nodes that only exist to lead to longer
/// keys are *path nodes*; the cursor API exposes them, the map-style
/// iterators skip them.
///
/// # Features
///
/// - O(k) insertion, lookup and removal, where k is the key length
/// - Detached [`Cursor`]s that survive mutation of other parts of the trie
/// - Sub-trie views sharing storage with the trie they were taken from
/// - Entry API for in-place updates
///
/// # Examples
///
/// ```
/// use chartrie::Trie;
///
/// let mut trie = Trie::new();
///
/// trie.insert("ab", 1);
/// trie.insert("ac", 2);
/// trie.insert("acde", 3);
/// trie.insert("acf", 4);
///
/// assert!(trie.contains_key("ac"));
/// assert!(!trie.contains_key("acd"));
/// assert_eq!(trie.get("acde"), Some(&3));
///
/// let keys: Vec<String> = trie.keys().collect();
/// assert_eq!(keys, ["ab", "ac", "acde", "acf"]);
///
/// assert_eq!(trie.erase_key("ac"), 1);
/// assert_eq!(trie.get("acde"), Some(&3));
/// ```
///
/// # Cursors and mutation
///
/// The trie performs no locking. A cursor positioned at or below an erased
/// node becomes invalid and every later use of it fails with
/// [`TrieError::InvalidatedIterator`]; keeping cursors away from the region
/// being erased is up to the caller.
pub struct Trie<V> {
    pub(crate) id: TrieId,
    pub(crate) pool: NodePool<V>,
    pub(crate) root: NodeIdx,
    pub(crate) size: usize,
}

impl<V, K: AsChars, const N: usize> From<[(K, V); N]> for Trie<V> {
    fn from(array: [(K, V); N]) -> Self {
        let mut trie = Trie::with_capacity(N);
        for (key, value) in array {
            trie.insert_or_assign(key, value);
        }
        trie
    }
}

impl<V: Hash> Hash for Trie<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        for (key, value) in self.iter() {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<V: Clone> Clone for Trie<V> {
    /// Deep copy: the clone owns its own nodes and its cursors are not
    /// interchangeable with the original's.
    fn clone(&self) -> Self {
        Trie {
            id: TrieId::fresh(),
            pool: self.pool.clone(),
            root: self.root,
            size: self.size,
        }
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for Trie<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size {
            return false;
        }

        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<V: Eq> Eq for Trie<V> {}

impl<V, Q: AsChars + ?Sized> Index<&Q> for Trie<V> {
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

impl<V, Q: AsChars + ?Sized> IndexMut<&Q> for Trie<V> {
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("no entry found for key")
    }
}

impl<V, K: AsChars> Extend<(K, V)> for Trie<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert_or_assign(key, value);
        }
    }
}

impl<V, K: AsChars> FromIterator<(K, V)> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl<V> From<HashMap<String, V>> for Trie<V> {
    fn from(map: HashMap<String, V>) -> Self {
        let mut trie = Trie::with_capacity(map.len());
        trie.extend(map);
        trie
    }
}

impl<V> From<BTreeMap<String, V>> for Trie<V> {
    fn from(map: BTreeMap<String, V>) -> Self {
        let mut trie = Trie::with_capacity(map.len());
        trie.extend(map);
        trie
    }
}

impl<V> Default for Trie<V> {
    /// Creates a new empty `Trie`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let trie: Trie<i32> = Default::default();
    /// assert!(trie.is_empty());
    /// ```
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    /// Creates a new empty `Trie`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let trie: Trie<i32> = Trie::new();
    /// assert!(trie.is_empty());
    /// assert_eq!(trie.begin(), trie.end());
    /// ```
    pub fn new() -> Self {
        Self::from_pool(NodePool::new())
    }

    /// Creates a new `Trie` with room for at least `capacity` nodes.
    ///
    /// Every character of a key may need its own node, so size this by the
    /// total key length you expect rather than the number of keys.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let trie: Trie<i32> = Trie::with_capacity(64);
    /// assert!(trie.capacity() >= 64);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_pool(NodePool::with_capacity(capacity))
    }

    fn from_pool(mut pool: NodePool<V>) -> Self {
        let root = pool.alloc_root();
        Trie {
            id: TrieId::fresh(),
            pool,
            root,
            size: 0,
        }
    }

    pub(crate) fn walk(&self) -> Walk<'_, V> {
        Walk {
            pool: &self.pool,
            owner: self.id,
            scope: self.root,
        }
    }

    /// Returns the number of keys in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    /// assert_eq!(trie.len(), 0);
    ///
    /// trie.insert("abc", 1);
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of nodes the trie can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Reserves room for at least `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) {
        self.pool.reserve(additional);
    }

    /// Shrinks the node storage as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.pool.shrink_to_fit();
    }

    /// Removes every key from the trie.
    ///
    /// Cursors at released nodes become invalid. The root stays, so the end
    /// cursor is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    /// trie.insert("a", 1);
    /// trie.insert("b", 2);
    ///
    /// trie.clear();
    /// assert!(trie.is_empty());
    /// assert_eq!(trie.get("a"), None);
    /// ```
    pub fn clear(&mut self) {
        debug!(keys = self.size, nodes = self.pool.len(), "clearing trie");
        self.pool.empty_node(self.root);
        self.size = 0;
    }

    /// Exchanges the contents of two tries.
    ///
    /// Cursors follow the nodes they denote: a cursor taken from `self` before
    /// the swap is accepted by `other` afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut a = Trie::from([("x", 1)]);
    /// let mut b = Trie::from([("y", 2), ("z", 3)]);
    ///
    /// a.swap(&mut b);
    /// assert_eq!(a.len(), 2);
    /// assert_eq!(b.get("x"), Some(&1));
    /// ```
    pub fn swap(&mut self, other: &mut Trie<V>) {
        std::mem::swap(self, other);
    }

    /// Moves the contents out, leaving `self` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut source = Trie::from([("a", 1)]);
    /// let moved = source.take();
    ///
    /// assert_eq!(moved.len(), 1);
    /// assert_eq!(source.len(), 0);
    /// ```
    pub fn take(&mut self) -> Trie<V> {
        std::mem::take(self)
    }

    /// Inserts `key` with `value` unless the key is already present.
    ///
    /// Returns a cursor at the key's node and whether a new key was created.
    /// An existing value is left untouched. The empty key is stored on the
    /// root node.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    ///
    /// let (cursor, inserted) = trie.insert("abc", 1);
    /// assert!(inserted);
    /// assert_eq!(trie.full_key(cursor).unwrap(), "abc");
    ///
    /// let (_, inserted) = trie.insert("abc", 2);
    /// assert!(!inserted);
    /// assert_eq!(trie.get("abc"), Some(&1));
    /// ```
    pub fn insert<K: AsChars>(&mut self, key: K, value: V) -> (Cursor, bool) {
        let idx = self.pool.walk_or_create(self.root, key.as_chars());
        let node = &mut self.pool[idx];
        let inserted = !node.is_key();
        if inserted {
            node.set_value(value);
            self.size += 1;
        }
        (self.walk().cursor(Some(idx)), inserted)
    }

    /// Inserts `key` with `value`, overwriting the value if the key exists.
    ///
    /// Returns a cursor at the key's node and whether a new key was created;
    /// `false` means an existing value was assigned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    /// trie.insert("k", 1);
    ///
    /// let (_, inserted) = trie.insert_or_assign("k", 2);
    /// assert!(!inserted);
    /// assert_eq!(trie.get("k"), Some(&2));
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn insert_or_assign<K: AsChars>(&mut self, key: K, value: V) -> (Cursor, bool) {
        let idx = self.pool.walk_or_create(self.root, key.as_chars());
        let inserted = self.pool[idx].set_value(value).is_none();
        if inserted {
            self.size += 1;
        }
        (self.walk().cursor(Some(idx)), inserted)
    }

    /// Inserts every pair with [`Trie::insert`] semantics.
    ///
    /// Returns the number of keys that were created.
    pub fn insert_many<K: AsChars, I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) -> usize {
        pairs
            .into_iter()
            .map(|(key, value)| self.insert(key, value).1)
            .filter(|&inserted| inserted)
            .count()
    }

    /// Inserts every pair with [`Trie::insert_or_assign`] semantics.
    ///
    /// Returns the number of keys that were created.
    pub fn insert_or_assign_many<K, I>(&mut self, pairs: I) -> usize
    where
        K: AsChars,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| self.insert_or_assign(key, value).1)
            .filter(|&inserted| inserted)
            .count()
    }

    /// Returns the entry for `key`, for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    /// for word in ["to", "tea", "to"] {
    ///     *trie.entry(word).or_insert(0) += 1;
    /// }
    /// assert_eq!(trie.get("to"), Some(&2));
    /// ```
    pub fn entry<K: AsChars>(&mut self, key: K) -> Entry<'_, V> {
        let key = key.to_key_string();
        match self.pool.walk(self.root, key.chars()) {
            Some(node) if self.pool[node].is_key() => Entry::Occupied(OccupiedEntry {
                trie: self,
                key,
                node,
            }),
            _ => Entry::Vacant(VacantEntry { trie: self, key }),
        }
    }

    /// Returns the value for `key`, inserting `V::default()` first if the key
    /// is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie: Trie<Vec<u32>> = Trie::new();
    /// trie.get_or_insert_default("odd").push(1);
    /// trie.get_or_insert_default("odd").push(3);
    /// assert_eq!(trie.get("odd"), Some(&vec![1, 3]));
    /// ```
    pub fn get_or_insert_default<K: AsChars>(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Returns a cursor at the node for `key`.
    ///
    /// The node is found whenever its character path exists, so the cursor may
    /// denote a path node rather than a key; check with [`Trie::is_key`].
    /// Returns [`Trie::end`] when the path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    /// trie.insert("abc", 1);
    ///
    /// let path = trie.find("ab");
    /// assert_ne!(path, trie.end());
    /// assert_eq!(trie.is_key(path), Ok(false));
    ///
    /// assert_eq!(trie.find("abd"), trie.end());
    /// ```
    pub fn find<K: AsChars>(&self, key: K) -> Cursor {
        let walk = self.walk();
        match self.pool.walk(self.root, key.as_chars()) {
            Some(idx) if idx != self.root || self.pool[idx].is_key() => walk.cursor(Some(idx)),
            _ => walk.end(),
        }
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    /// trie.insert("a", 1);
    /// assert_eq!(trie.get("a"), Some(&1));
    /// assert_eq!(trie.get("b"), None);
    /// ```
    pub fn get<K: AsChars>(&self, key: K) -> Option<&V> {
        let idx = self.pool.walk(self.root, key.as_chars())?;
        self.pool[idx].value.as_ref()
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<K: AsChars>(&mut self, key: K) -> Option<&mut V> {
        let idx = self.pool.walk(self.root, key.as_chars())?;
        self.pool[idx].value.as_mut()
    }

    /// Returns `true` if `key` is stored in the trie. Path nodes do not count.
    pub fn contains_key<K: AsChars>(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if any stored key starts with `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    /// trie.insert("apple", 1);
    ///
    /// assert!(trie.starts_with("app"));
    /// assert!(!trie.starts_with("ban"));
    /// ```
    pub fn starts_with<K: AsChars>(&self, prefix: K) -> bool {
        // path nodes always lead to at least one key
        match self.pool.walk(self.root, prefix.as_chars()) {
            Some(idx) if idx == self.root => !self.is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    /// Returns a cursor at the first node of the pre-order walk, or
    /// [`Trie::end`] if the trie is empty.
    pub fn begin(&self) -> Cursor {
        self.walk().begin()
    }

    /// Returns the end cursor, which every exhausted cursor compares equal to.
    pub fn end(&self) -> Cursor {
        self.walk().end()
    }

    /// Moves `cursor` to the next node in pre-order.
    ///
    /// The walk visits path nodes as well as keys. Advancing the end cursor is
    /// an [`TrieError::InvalidOperation`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let trie = Trie::from([("ab", 1), ("ac", 2), ("acde", 3), ("acf", 4)]);
    ///
    /// let mut keys = Vec::new();
    /// let mut cursor = trie.begin();
    /// while cursor != trie.end() {
    ///     if trie.is_key(cursor)? {
    ///         keys.push(trie.full_key(cursor)?);
    ///     }
    ///     cursor = trie.advance(cursor)?;
    /// }
    /// assert_eq!(keys, ["ab", "ac", "acde", "acf"]);
    /// # Ok::<(), chartrie::TrieError>(())
    /// ```
    pub fn advance(&self, cursor: Cursor) -> Result<Cursor, TrieError> {
        self.walk().advance(cursor)
    }

    /// Returns `true` if `cursor` denotes a key rather than a path node.
    pub fn is_key(&self, cursor: Cursor) -> Result<bool, TrieError> {
        Ok(self.walk().node(cursor)?.is_key())
    }

    /// Rebuilds the full key of the node `cursor` denotes.
    pub fn full_key(&self, cursor: Cursor) -> Result<String, TrieError> {
        self.walk().full_key(cursor)
    }

    /// Dereferences `cursor`: the label of the edge into its node and the value.
    ///
    /// The label is `None` only for the empty key. Dereferencing a path node
    /// is an [`TrieError::InvalidOperation`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    /// let (cursor, _) = trie.insert("abc", 7);
    /// assert_eq!(trie.value_at(cursor), Ok((Some('c'), &7)));
    /// assert!(trie.value_at(trie.find("ab")).is_err());
    /// ```
    pub fn value_at(&self, cursor: Cursor) -> Result<(Option<char>, &V), TrieError> {
        self.walk().get(cursor)
    }

    /// Mutable access to the value at `cursor`.
    pub fn value_at_mut(&mut self, cursor: Cursor) -> Result<&mut V, TrieError> {
        let idx = self.walk().resolve_node(cursor)?;
        self.pool
            .get_mut(idx)
            .ok_or(TrieError::InvalidatedIterator)?
            .value_mut()
    }

    /// Removes the key at `cursor` and returns a cursor at the node that
    /// followed it.
    ///
    /// If the key's node has descendants they stay in place and the node
    /// turns into a path node. Otherwise the node is released together with
    /// every ancestor that no longer leads to a key. Erasing the end cursor
    /// does nothing; erasing a path node is an
    /// [`TrieError::InvalidOperation`] (see [`Trie::erase_subtree`]).
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("ac", 1), ("acde", 2)]);
    ///
    /// let next = trie.erase(trie.find("ac"))?;
    /// assert_eq!(trie.full_key(next)?, "acd");
    /// assert_eq!(trie.len(), 1);
    /// assert_eq!(trie.get("acde"), Some(&2));
    /// # Ok::<(), chartrie::TrieError>(())
    /// ```
    pub fn erase(&mut self, cursor: Cursor) -> Result<Cursor, TrieError> {
        let Some(idx) = self.walk().resolve(cursor)? else {
            return Ok(cursor);
        };
        let (_, next) = self.pool.erase_key(self.root, idx)?;
        self.size -= 1;
        Ok(self.walk().cursor(next))
    }

    /// Removes `key`, returning the number of keys removed (0 or 1).
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("abc", 1)]);
    /// assert_eq!(trie.erase_key("ab"), 0);
    /// assert_eq!(trie.erase_key("abc"), 1);
    /// assert_eq!(trie.erase_key("abc"), 0);
    /// ```
    pub fn erase_key<K: AsChars>(&mut self, key: K) -> usize {
        usize::from(self.remove(key).is_some())
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<K: AsChars>(&mut self, key: K) -> Option<V> {
        let idx = self.pool.walk(self.root, key.as_chars())?;
        if !self.pool[idx].is_key() {
            return None;
        }
        match self.pool.erase_key(self.root, idx) {
            Ok((value, _)) => {
                self.size -= 1;
                Some(value)
            }
            Err(err) => unreachable!("key node refused erase: {err}"),
        }
    }

    /// Removes every key in `[first, last)` of the pre-order walk.
    ///
    /// Path nodes in the range are skipped. Returns the number of keys removed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    ///
    /// let removed = trie.erase_range(trie.find("b"), trie.find("d"))?;
    /// assert_eq!(removed, 2);
    /// assert_eq!(trie.keys().collect::<Vec<_>>(), ["a", "d"]);
    /// # Ok::<(), chartrie::TrieError>(())
    /// ```
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Result<usize, TrieError> {
        let walk = self.walk();
        let mut current = walk.resolve(first)?;
        let stop = walk.resolve(last)?;
        let mut removed = 0;
        while let Some(idx) = current {
            if Some(idx) == stop {
                break;
            }
            current = if self.pool[idx].is_key() {
                let (_, next) = self.pool.erase_key(self.root, idx)?;
                self.size -= 1;
                removed += 1;
                next
            } else {
                successor(&self.pool, self.root, idx)?
            };
        }
        trace!(removed, "erased range");
        Ok(removed)
    }

    /// Removes the node at `cursor` together with all of its descendants.
    ///
    /// Returns the number of keys removed. Erasing the subtree of the root
    /// empties the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("ab", 1), ("ac", 2), ("acde", 3), ("acf", 4)]);
    /// assert_eq!(trie.erase_subtree(trie.find("ac"))?, 3);
    /// assert_eq!(trie.keys().collect::<Vec<_>>(), ["ab"]);
    /// # Ok::<(), chartrie::TrieError>(())
    /// ```
    pub fn erase_subtree(&mut self, cursor: Cursor) -> Result<usize, TrieError> {
        let idx = self.walk().resolve_node(cursor)?;
        let (keys, _) = self.pool.erase_subtree(self.root, idx)?;
        self.size -= keys;
        Ok(keys)
    }

    /// Keeps only the keys for which `f` returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    /// trie.retain(|_, v| *v % 2 == 0);
    /// assert_eq!(trie.keys().collect::<Vec<_>>(), ["b", "d"]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut V) -> bool,
    {
        let mut current = self.begin().node;
        while let Some(idx) = current {
            let drop_key = if self.pool[idx].is_key() {
                let key = match full_key(&self.pool, self.root, idx) {
                    Ok(key) => key,
                    Err(err) => unreachable!("retain reached a released node: {err}"),
                };
                self.pool[idx].value.as_mut().is_some_and(|value| !f(&key, value))
            } else {
                false
            };
            let next = if drop_key {
                self.pool.erase_key(self.root, idx).map(|(_, next)| {
                    self.size -= 1;
                    next
                })
            } else {
                successor(&self.pool, self.root, idx)
            };
            current = match next {
                Ok(next) => next,
                Err(err) => unreachable!("retain reached a released node: {err}"),
            };
        }
    }

    /// Returns a view of the subtree below `prefix`, sharing this trie's nodes.
    ///
    /// Keys seen through the view are relative to `prefix`. Fails with
    /// [`TrieError::NotFound`] if no node exists for `prefix`, and with
    /// [`TrieError::InvalidOperation`] for the empty prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("ab", 1), ("ac", 2), ("acde", 3), ("acf", 4)]);
    ///
    /// let mut view = trie.get_sub_trie("ac")?;
    /// assert_eq!(view.keys().collect::<Vec<_>>(), ["", "de", "f"]);
    ///
    /// view.insert("g", 5);
    /// drop(view);
    /// assert_eq!(trie.get("acg"), Some(&5));
    /// # Ok::<(), chartrie::TrieError>(())
    /// ```
    pub fn get_sub_trie<K: AsChars>(&mut self, prefix: K) -> Result<SubTrie<'_, V>, TrieError> {
        let prefix = prefix.to_key_string();
        if prefix.is_empty() {
            return Err(TrieError::InvalidOperation("a sub-trie needs a non-empty prefix"));
        }
        let node = self
            .pool
            .walk(self.root, prefix.chars())
            .ok_or(TrieError::NotFound)?;
        trace!(prefix = %prefix, "creating sub-trie view");
        Ok(SubTrie::new(self, prefix, node))
    }

    /// Returns an iterator over the keys and values, in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let trie = Trie::from([("b", 2), ("a", 1)]);
    /// let pairs: Vec<_> = trie.iter().collect();
    /// assert_eq!(pairs, [("a".to_string(), &1), ("b".to_string(), &2)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.pool, self.root, self.size)
    }

    /// Returns an iterator over the keys, in order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values, in key order.
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    /// Returns a mutable iterator over the values, in no particular order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("a", 1), ("b", 2)]);
    /// for value in trie.values_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(trie.get("b"), Some(&20));
    /// ```
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.pool.values_mut()
    }

    /// Returns an iterator over the keys starting with `prefix` and their
    /// values, in key order. Keys are reported in full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let trie = Trie::from([("apple", 1), ("application", 2), ("banana", 3)]);
    /// let keys: Vec<_> = trie.prefix_iter("app").map(|(k, _)| k).collect();
    /// assert_eq!(keys, ["apple", "application"]);
    /// ```
    pub fn prefix_iter<K: AsChars>(&self, prefix: K) -> Iter<'_, V> {
        let prefix = prefix.to_key_string();
        match self.pool.walk(self.root, prefix.chars()) {
            Some(node) => Iter::with_prefix(&self.pool, node, prefix, self.pool.count_keys(node)),
            None => Iter::empty(&self.pool, self.root),
        }
    }

    /// Returns an iterator over the cursors of every node, path nodes
    /// included, in pre-order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let trie = Trie::from([("ab", 1)]);
    /// let keys: Vec<_> = trie
    ///     .cursors()
    ///     .map(|c| (trie.full_key(c).unwrap(), trie.is_key(c).unwrap()))
    ///     .collect();
    /// assert_eq!(keys, [("a".to_string(), false), ("ab".to_string(), true)]);
    /// ```
    pub fn cursors(&self) -> Cursors<'_, V> {
        Cursors::new(self.walk())
    }
}
