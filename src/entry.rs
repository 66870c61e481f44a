use crate::Trie;
use crate::node::NodeIdx;

/// Represents an entry in a [`Trie`] which may either be vacant or occupied.
///
/// This is part of the `Entry API` and is used to ensure that only a single lookup is performed.
///
/// # Examples
///
/// ```
/// use chartrie::{Trie, Entry};
///
/// let mut trie = Trie::new();
///
/// match trie.entry("a") {
///     Entry::Vacant(entry) => {
///         entry.insert(1);
///     }
///     Entry::Occupied(entry) => {
///         *entry.into_mut() += 1;
///     }
/// }
/// ```
pub enum Entry<'a, V> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, V>),
    /// A vacant entry. The key's node may exist as a path node.
    Vacant(VacantEntry<'a, V>),
}

/// A view into an occupied entry in a [`Trie`].
///
/// It is part of the [`Entry`] API.
pub struct OccupiedEntry<'a, V> {
    pub(crate) trie: &'a mut Trie<V>,
    pub(crate) key: String,
    pub(crate) node: NodeIdx,
}

/// A view into a vacant entry in a [`Trie`].
///
/// It is part of the [`Entry`] API.
pub struct VacantEntry<'a, V> {
    pub(crate) trie: &'a mut Trie<V>,
    pub(crate) key: String,
}

impl<'a, V> Entry<'a, V> {
    /// Ensures a value is in the entry by inserting the default if empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie: Trie<u32> = Trie::new();
    ///
    /// trie.entry("a").or_default();
    /// assert_eq!(trie.get("a"), Some(&0));
    /// ```
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// Ensures a value is in the entry by inserting the given value if empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    ///
    /// trie.entry("a").or_insert(1);
    /// assert_eq!(trie.get("a"), Some(&1));
    ///
    /// *trie.entry("a").or_insert(10) *= 2;
    /// assert_eq!(trie.get("a"), Some(&2));
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the function if empty.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the function if empty.
    ///
    /// The function is given a reference to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    ///
    /// trie.entry("héllo").or_insert_with_key(|key| key.chars().count());
    /// assert_eq!(trie.get("héllo"), Some(&5));
    /// ```
    pub fn or_insert_with_key<F: FnOnce(&str) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Returns a reference to the key in the entry.
    pub fn key(&self) -> &str {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::Trie;
    /// let mut trie = Trie::new();
    ///
    /// trie.entry("a")
    ///    .and_modify(|v| *v += 1)
    ///    .or_insert(1);
    /// assert_eq!(trie.get("a"), Some(&1));
    ///
    /// trie.entry("a")
    ///    .and_modify(|v| *v += 1)
    ///    .or_insert(0);
    /// assert_eq!(trie.get("a"), Some(&2));
    /// ```
    pub fn and_modify<F: FnOnce(&mut V)>(self, f: F) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        match self.trie.pool[self.node].value.as_ref() {
            Some(value) => value,
            None => unreachable!("occupied entry without a value"),
        }
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        match self.trie.pool[self.node].value.as_mut() {
            Some(value) => value,
            None => unreachable!("occupied entry without a value"),
        }
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        let trie = self.trie;
        match trie.pool[self.node].value.as_mut() {
            Some(value) => value,
            None => unreachable!("occupied entry without a value"),
        }
    }

    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replaces the value in the entry, returning the old value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::{Trie, Entry};
    /// let mut trie = Trie::new();
    /// trie.insert("a", 1);
    ///
    /// if let Entry::Occupied(mut entry) = trie.entry("a") {
    ///     assert_eq!(entry.insert(2), 1);
    /// }
    /// assert_eq!(trie.get("a"), Some(&2));
    /// ```
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, returning the value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::{Trie, Entry};
    /// let mut trie = Trie::new();
    /// trie.insert("a", 1);
    ///
    /// if let Entry::Occupied(entry) = trie.entry("a") {
    ///     assert_eq!(entry.remove(), 1);
    /// }
    /// assert!(!trie.contains_key("a"));
    /// ```
    pub fn remove(self) -> V {
        match self.trie.pool.erase_key(self.trie.root, self.node) {
            Ok((value, _)) => {
                self.trie.size -= 1;
                value
            }
            Err(err) => unreachable!("occupied entry lost its key: {err}"),
        }
    }
}

impl<'a, V> VacantEntry<'a, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Inserts the given value into the entry, and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chartrie::{Trie, Entry};
    /// let mut trie = Trie::new();
    ///
    /// if let Entry::Vacant(entry) = trie.entry("a") {
    ///     entry.insert(1);
    /// }
    /// assert_eq!(trie.get("a"), Some(&1));
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let trie = self.trie;
        let idx = trie.pool.walk_or_create(trie.root, self.key.chars());
        trie.size += 1;
        trie.pool[idx].value.insert(value)
    }
}
