use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use crate::FixedHashBuilder;
use crate::bounded_table;
use crate::bounded_table::BoundedTable;
use crate::cursor::Cursor;
use crate::error::Error;
use crate::hash_map::Entry;
use crate::hash_map::Iter;
use crate::hash_map::IterMut;
use crate::hash_map::Keys;
use crate::hash_map::Values;

/// A hash map with room for exactly `N` pairs, stored inline.
///
/// The map never allocates and never grows. Adding a new key to a full map
/// through [`insert`](Self::insert), [`entry`](Self::entry),
/// [`get_or_insert_default`](Self::get_or_insert_default) or
/// [`FromIterator`] panics; [`try_insert`](Self::try_insert) reports
/// [`Error::CapacityExceeded`] instead.
///
/// The default hasher is deterministic, so the iteration order of a map is
/// the same for every run that inserts the same pairs in the same order.
///
/// # Examples
///
/// ```rust
/// use mad_hash::BoundedHashMap;
///
/// let map: BoundedHashMap<&str, i32, 3> =
///     BoundedHashMap::from_array([("a", 1), ("b", 2), ("c", 3)]);
/// assert!(map.exists("a"));
/// assert!(map.exists("b"));
/// assert!(map.exists("c"));
/// assert_eq!(map.size(), 3);
/// ```
#[derive(Clone)]
pub struct BoundedHashMap<K, V, const N: usize, S = FixedHashBuilder> {
    table: BoundedTable<(K, V), N>,
    hash_builder: S,
}

impl<K, V, const N: usize, S> Debug for BoundedHashMap<K, V, N, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, const N: usize, S> BoundedHashMap<K, V, N, S> {
    /// Creates an empty map with the given hasher builder.
    pub const fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: BoundedTable::new(),
            hash_builder,
        }
    }

    /// Returns the number of pairs in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no pairs.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns `true` if all `N` slots are occupied.
    pub fn is_full(&self) -> bool {
        self.table.is_full()
    }

    /// Returns the fixed number of slots, `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all pairs.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// An iterator visiting all key-value pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// An iterator visiting all key-value pairs in slot order, with mutable
    /// references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// An iterator visiting all keys in slot order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns a cursor at the first occupied slot.
    pub fn cursor_front(&self) -> Cursor<'_, (K, V)> {
        self.table.cursor_front()
    }

    /// Returns occupancy and probe-length statistics for the underlying
    /// table.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::DebugStats {
        self.table.debug_stats()
    }
}

impl<K, V, const N: usize, S> BoundedHashMap<K, V, N, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// # Panics
    ///
    /// Panics if the key is new and the map is full.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Inserts a key-value pair, returning the previous value for the key,
    /// or [`Error::CapacityExceeded`] if the key is new and the map is full.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::BoundedHashMap;
    /// use mad_hash::Error;
    ///
    /// let mut map: BoundedHashMap<u8, u8, 1> = BoundedHashMap::new();
    /// assert_eq!(map.try_insert(1, 10), Ok(None));
    /// assert_eq!(map.try_insert(1, 11), Ok(Some(10)));
    /// assert_eq!(map.try_insert(2, 20), Err(Error::CapacityExceeded { capacity: 1 }));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        let hash = self.hash_builder.hash_one(&key);
        let entry = self.table.try_entry(hash, |(k, _)| k == &key)?;
        Ok(match Entry::wrap(entry, key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        })
    }

    /// Gets the given key's corresponding entry for in-place manipulation.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent and the map is full.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_builder.hash_one(&key);
        let entry = self.table.entry(hash, |(k, _)| k == &key);
        Entry::wrap(entry, key)
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |(k, _)| key.eq(k.borrow()))
            .map(|(_, v)| v)
    }

    /// Alias for [`get`](Self::get).
    pub fn try_get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find_mut(hash, |(k, _)| key.eq(k.borrow()))
            .map(|(_, v)| v)
    }

    /// Returns the value corresponding to the key, or
    /// [`Error::KeyNotFound`] if the key is absent.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent and the map is full.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Returns `true` if the map contains a value for the key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Alias for [`contains_key`](Self::contains_key).
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.contains_key(key)
    }

    /// Returns the number of entries for `key`, which is either 0 or 1.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        usize::from(self.contains_key(key))
    }

    /// Returns a cursor at the pair for `key`, or at the end position if the
    /// key is absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, (K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.cursor(hash, |(k, _)| key.eq(k.borrow()))
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// The pair is dropped out of its slot right away.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| key.eq(k.borrow()))
    }
}

impl<K, V, const N: usize, S> BoundedHashMap<K, V, N, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Builds a map from a literal list of pairs.
    ///
    /// Supplying more pairs than the map has slots is rejected at compile
    /// time. A key listed more than once keeps its last value.
    ///
    /// ```compile_fail
    /// use mad_hash::BoundedHashMap;
    ///
    /// let map: BoundedHashMap<u8, u8, 1> = BoundedHashMap::from_array([(1, 1), (2, 2)]);
    /// ```
    pub fn from_array<const M: usize>(pairs: [(K, V); M]) -> Self {
        const {
            assert!(M <= N, "more initial pairs than slots");
        }

        let mut map = Self::new();
        for (key, value) in pairs {
            map.insert(key, value);
        }
        map
    }
}

impl<K, V, const N: usize, S> Default for BoundedHashMap<K, V, N, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, Q, V, const N: usize, S> Index<&Q> for BoundedHashMap<K, V, N, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}", Error::KeyNotFound),
        }
    }
}

impl<K, V, const N: usize, S> PartialEq for BoundedHashMap<K, V, N, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K, V, const N: usize, S> Extend<(K, V)> for BoundedHashMap<K, V, N, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// # Panics
    ///
    /// Panics when a new key does not fit.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, const N: usize, S> FromIterator<(K, V)> for BoundedHashMap<K, V, N, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// # Panics
    ///
    /// Panics if the iterator yields more than `N` distinct keys.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize, S> IntoIterator for BoundedHashMap<K, V, N, S> {
    type IntoIter = bounded_table::IntoIter<(K, V), N>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, K, V, const N: usize, S> IntoIterator for &'a BoundedHashMap<K, V, N, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
