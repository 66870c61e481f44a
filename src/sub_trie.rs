//! Views of a subtree of a [`Trie`].
//!
//! A [`SubTrie`] aliases one node of its source trie and treats it as its
//! root. It owns nothing: every insertion or erasure through the view lands
//! in the source trie's nodes and is reflected in the source's key count.
//! The view holds the source mutably borrowed, so the aliased node cannot be
//! erased out from under it.

use tracing::trace;

use crate::Trie;
use crate::as_chars::AsChars;
use crate::cursor::{Cursor, Walk, successor};
use crate::error::TrieError;
use crate::iter::{Iter, Keys, Values};
use crate::node::NodeIdx;

/// A trie rooted at an existing node of another [`Trie`].
///
/// Keys seen and accepted by the view are relative to its prefix. Cursors
/// taken from the view are only accepted by the view.
///
/// If the view is emptied, its root node is pruned from the source trie when
/// the view is dropped.
///
/// # Examples
///
/// ```
/// # use chartrie::Trie;
/// let mut trie = Trie::from([("ac", 1), ("acde", 2), ("acf", 3), ("b", 4)]);
///
/// let mut view = trie.get_sub_trie("ac")?;
/// assert_eq!(view.prefix(), "ac");
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.get("de"), Some(&2));
///
/// assert_eq!(view.erase_key("f"), 1);
/// drop(view);
///
/// assert_eq!(trie.len(), 3);
/// assert!(!trie.contains_key("acf"));
/// # Ok::<(), chartrie::TrieError>(())
/// ```
pub struct SubTrie<'a, V> {
    trie: &'a mut Trie<V>,
    prefix: String,
    root: NodeIdx,
    len: usize,
}

impl<'a, V> SubTrie<'a, V> {
    pub(crate) fn new(trie: &'a mut Trie<V>, prefix: String, root: NodeIdx) -> Self {
        let len = trie.pool.count_keys(root);
        SubTrie {
            trie,
            prefix,
            root,
            len,
        }
    }

    fn walk(&self) -> Walk<'_, V> {
        Walk {
            pool: &self.trie.pool,
            owner: self.trie.id,
            scope: self.root,
        }
    }

    fn removed(&mut self, keys: usize) {
        self.len -= keys;
        self.trie.size -= keys;
    }

    /// The key of the aliased node in the source trie.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of keys at or below the view's root.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no key lives at or below the view's root.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a cursor at the view's root if it holds a key, otherwise at
    /// the first node below it, or [`SubTrie::end`] for an empty view.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("abc", 1)]);
    /// let view = trie.get_sub_trie("a")?;
    /// assert_eq!(view.full_key(view.begin())?, "b");
    /// # Ok::<(), chartrie::TrieError>(())
    /// ```
    pub fn begin(&self) -> Cursor {
        self.walk().begin()
    }

    /// Returns the view's end cursor. It differs from the source trie's end.
    pub fn end(&self) -> Cursor {
        self.walk().end()
    }

    /// Moves `cursor` to the next node in pre-order, never leaving the view.
    pub fn advance(&self, cursor: Cursor) -> Result<Cursor, TrieError> {
        self.walk().advance(cursor)
    }

    /// Returns `true` if `cursor` denotes a key rather than a path node.
    pub fn is_key(&self, cursor: Cursor) -> Result<bool, TrieError> {
        Ok(self.walk().node(cursor)?.is_key())
    }

    /// Key of the node at `cursor`, relative to the view's prefix.
    pub fn full_key(&self, cursor: Cursor) -> Result<String, TrieError> {
        self.walk().full_key(cursor)
    }

    /// Dereferences `cursor`. See [`Trie::value_at`].
    pub fn value_at(&self, cursor: Cursor) -> Result<(Option<char>, &V), TrieError> {
        self.walk().get(cursor)
    }

    /// Mutable access to the value at `cursor`.
    pub fn value_at_mut(&mut self, cursor: Cursor) -> Result<&mut V, TrieError> {
        let idx = self.walk().resolve_node(cursor)?;
        self.trie
            .pool
            .get_mut(idx)
            .ok_or(TrieError::InvalidatedIterator)?
            .value_mut()
    }

    /// Returns a cursor at the node for `suffix`, or [`SubTrie::end`].
    pub fn find<K: AsChars>(&self, suffix: K) -> Cursor {
        let walk = self.walk();
        match self.trie.pool.walk(self.root, suffix.as_chars()) {
            Some(idx) if idx != self.root || self.trie.pool[idx].is_key() => walk.cursor(Some(idx)),
            _ => walk.end(),
        }
    }

    /// Returns the value stored for `prefix + suffix`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("ab", 1), ("abc", 2)]);
    /// let view = trie.get_sub_trie("ab")?;
    /// assert_eq!(view.get(""), Some(&1));
    /// assert_eq!(view.get("c"), Some(&2));
    /// assert_eq!(view.get("ab"), None);
    /// # Ok::<(), chartrie::TrieError>(())
    /// ```
    pub fn get<K: AsChars>(&self, suffix: K) -> Option<&V> {
        let idx = self.trie.pool.walk(self.root, suffix.as_chars())?;
        self.trie.pool[idx].value.as_ref()
    }

    /// Returns a mutable reference to the value stored for `prefix + suffix`.
    pub fn get_mut<K: AsChars>(&mut self, suffix: K) -> Option<&mut V> {
        let idx = self.trie.pool.walk(self.root, suffix.as_chars())?;
        self.trie.pool[idx].value.as_mut()
    }

    /// Returns `true` if `prefix + suffix` is a key.
    pub fn contains_key<K: AsChars>(&self, suffix: K) -> bool {
        self.get(suffix).is_some()
    }

    /// Inserts `prefix + suffix` unless present. See [`Trie::insert`].
    pub fn insert<K: AsChars>(&mut self, suffix: K, value: V) -> (Cursor, bool) {
        let idx = self.trie.pool.walk_or_create(self.root, suffix.as_chars());
        let inserted = !self.trie.pool[idx].is_key();
        if inserted {
            self.trie.pool[idx].set_value(value);
            self.len += 1;
            self.trie.size += 1;
        }
        (self.walk().cursor(Some(idx)), inserted)
    }

    /// Inserts or overwrites `prefix + suffix`. See [`Trie::insert_or_assign`].
    pub fn insert_or_assign<K: AsChars>(&mut self, suffix: K, value: V) -> (Cursor, bool) {
        let idx = self.trie.pool.walk_or_create(self.root, suffix.as_chars());
        let inserted = self.trie.pool[idx].set_value(value).is_none();
        if inserted {
            self.len += 1;
            self.trie.size += 1;
        }
        (self.walk().cursor(Some(idx)), inserted)
    }

    /// Returns the value for `prefix + suffix`, inserting `V::default()` first
    /// if the key is absent.
    pub fn get_or_insert_default<K: AsChars>(&mut self, suffix: K) -> &mut V
    where
        V: Default,
    {
        let idx = self.trie.pool.walk_or_create(self.root, suffix.as_chars());
        if !self.trie.pool[idx].is_key() {
            self.len += 1;
            self.trie.size += 1;
        }
        self.trie.pool[idx].value.get_or_insert_with(V::default)
    }

    /// Removes the key at `cursor`. See [`Trie::erase`].
    ///
    /// Pruning stops at the view's root, which stays in place while the view
    /// is alive.
    pub fn erase(&mut self, cursor: Cursor) -> Result<Cursor, TrieError> {
        let Some(idx) = self.walk().resolve(cursor)? else {
            return Ok(cursor);
        };
        let (_, next) = self.trie.pool.erase_key(self.root, idx)?;
        self.removed(1);
        Ok(self.walk().cursor(next))
    }

    /// Removes `prefix + suffix`, returning the number of keys removed (0 or 1).
    pub fn erase_key<K: AsChars>(&mut self, suffix: K) -> usize {
        usize::from(self.remove(suffix).is_some())
    }

    /// Removes `prefix + suffix`, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("ab", 1), ("abc", 2)]);
    /// let mut view = trie.get_sub_trie("ab")?;
    /// assert_eq!(view.remove("c"), Some(2));
    /// assert_eq!(view.remove("c"), None);
    /// drop(view);
    /// assert_eq!(trie.len(), 1);
    /// # Ok::<(), chartrie::TrieError>(())
    /// ```
    pub fn remove<K: AsChars>(&mut self, suffix: K) -> Option<V> {
        let idx = self.trie.pool.walk(self.root, suffix.as_chars())?;
        if !self.trie.pool[idx].is_key() {
            return None;
        }
        match self.trie.pool.erase_key(self.root, idx) {
            Ok((value, _)) => {
                self.removed(1);
                Some(value)
            }
            Err(err) => unreachable!("key node refused erase: {err}"),
        }
    }

    /// Removes every key in `[first, last)` of the view's walk. Path nodes
    /// are skipped. Returns the number of keys removed.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Result<usize, TrieError> {
        let walk = self.walk();
        let mut current = walk.resolve(first)?;
        let stop = walk.resolve(last)?;
        let mut removed = 0;
        while let Some(idx) = current {
            if Some(idx) == stop {
                break;
            }
            current = if self.trie.pool[idx].is_key() {
                let (_, next) = self.trie.pool.erase_key(self.root, idx)?;
                self.removed(1);
                removed += 1;
                next
            } else {
                successor(&self.trie.pool, self.root, idx)?
            };
        }
        Ok(removed)
    }

    /// Removes the node at `cursor` and its descendants. See [`Trie::erase_subtree`].
    pub fn erase_subtree(&mut self, cursor: Cursor) -> Result<usize, TrieError> {
        let idx = self.walk().resolve_node(cursor)?;
        let (keys, _) = self.trie.pool.erase_subtree(self.root, idx)?;
        self.removed(keys);
        Ok(keys)
    }

    /// Removes every key of the view from the source trie.
    pub fn clear(&mut self) {
        let keys = self.trie.pool.empty_node(self.root);
        trace!(prefix = %self.prefix, keys, "cleared sub-trie");
        self.removed(keys);
    }

    /// Iterates the view's keys, relative to its prefix, and values.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.trie.pool, self.root, self.len)
    }

    /// Returns an iterator over the view's keys, relative to its prefix.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the view's values, in key order.
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    /// Copies the viewed keys into a new, independent trie. Keys stay
    /// relative to the prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::from([("ac", 1), ("acde", 2)]);
    /// let copy = trie.get_sub_trie("ac")?.to_trie();
    /// assert_eq!(copy.keys().collect::<Vec<_>>(), ["", "de"]);
    /// # Ok::<(), chartrie::TrieError>(())
    /// ```
    pub fn to_trie(&self) -> Trie<V>
    where
        V: Clone,
    {
        let mut copy = Trie::new();
        copy.pool.copy_subtree_from(copy.root, &self.trie.pool, self.root);
        copy.size = self.len;
        copy
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for SubTrie<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Drop for SubTrie<'_, V> {
    fn drop(&mut self) {
        self.trie.pool.prune_upward(self.root, self.trie.root);
    }
}
