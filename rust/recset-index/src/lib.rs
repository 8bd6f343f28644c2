//! Generic secondary-index storage: named tables mapping arbitrary keys to
//! ordered value lists.
//!
//! An [`IndexTable`] maps a key to the ordered list of values recorded under
//! it, preserving both per-key insertion order and first-insertion order of
//! the keys themselves. An [`IndexCatalog`] is a named collection of such
//! tables. Neither type knows anything about what the values mean; the record
//! layer stores positional segment handles in them, but any value type works.

use ahash::AHashMap;
use std::hash::Hash;

/// A mapping from keys to ordered value lists.
///
/// Keys enumerate in first-insertion order; each key's value list preserves
/// the order in which values were appended.
///
/// # Examples
///
/// ```
/// use recset_index::IndexTable;
///
/// let mut table = IndexTable::new();
/// table.append("b", 1);
/// table.append("a", 2);
/// table.append("b", 3);
///
/// assert_eq!(table.keys().collect::<Vec<_>>(), [&"b", &"a"]);
/// assert_eq!(table.get(&"b"), Some(&[1, 3][..]));
/// ```
pub struct IndexTable<K, V> {
    /// Key-value-list entries in first-insertion order of the keys.
    entries: Vec<(K, Vec<V>)>,
    /// Maps a key to its position in `entries`.
    positions: AHashMap<K, usize>,
}

impl<K, V> IndexTable<K, V> {
    /// Creates a new empty `IndexTable`.
    pub fn new() -> IndexTable<K, V> {
        IndexTable {
            entries: Vec::new(),
            positions: AHashMap::new(),
        }
    }

    /// Returns the number of distinct keys in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns the `(key, values)` entries in first-insertion order of the keys.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Returns the entry at `position` in first-insertion order.
    pub fn entry_at(&self, position: usize) -> Option<(&K, &[V])> {
        self.entries.get(position).map(|(k, v)| (k, v.as_slice()))
    }
}

impl<K, V> IndexTable<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the value list recorded under `key`, or `None` if the key was
    /// never inserted.
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    /// Returns a mutable handle to `key`'s value list, registering an empty
    /// list first if the key is absent.
    pub fn get_or_create(&mut self, key: K) -> &mut Vec<V> {
        let pos = match self.positions.get(&key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.positions.insert(key.clone(), pos);
                self.entries.push((key, Vec::new()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    /// Appends `value` to `key`'s list, creating the key's entry if absent.
    pub fn append(&mut self, key: K, value: V) {
        self.get_or_create(key).push(value);
    }
}

impl<K, V> Default for IndexTable<K, V> {
    fn default() -> IndexTable<K, V> {
        IndexTable::new()
    }
}

impl<K, V> std::fmt::Debug for IndexTable<K, V>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexTable")
            .field("keys", &self.entries.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// A named collection of [`IndexTable`]s.
///
/// Replacing a table under an existing name fully discards the prior table.
/// There is no ordering guarantee across tables.
#[derive(Debug)]
pub struct IndexCatalog<K, V> {
    tables: AHashMap<String, IndexTable<K, V>>,
}

impl<K, V> IndexCatalog<K, V> {
    /// Creates a new empty catalog.
    pub fn new() -> IndexCatalog<K, V> {
        IndexCatalog {
            tables: AHashMap::new(),
        }
    }

    /// Returns the number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no tables are registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the table registered under `name`.
    pub fn get(&self, name: &str) -> Option<&IndexTable<K, V>> {
        self.tables.get(name)
    }

    /// Returns the table registered under `name`, registering a new empty
    /// table first if the name is absent.
    pub fn get_or_create(&mut self, name: &str) -> &mut IndexTable<K, V> {
        self.tables
            .entry(name.to_string())
            .or_insert_with(IndexTable::new)
    }

    /// Registers `table` under `name`, fully discarding any prior table with
    /// that name.
    pub fn insert(&mut self, name: impl Into<String>, table: IndexTable<K, V>) {
        self.tables.insert(name.into(), table);
    }

    /// Drops the table registered under `name`, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<IndexTable<K, V>> {
        self.tables.remove(name)
    }

    /// Drops all registered tables.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Returns the registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|n| n.as_str())
    }
}

impl<K, V> Default for IndexCatalog<K, V> {
    fn default() -> IndexCatalog<K, V> {
        IndexCatalog::new()
    }
}
