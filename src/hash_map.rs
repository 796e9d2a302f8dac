use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::DefaultHashBuilder;
use crate::cursor::Cursor;
use crate::error::Error;
use crate::hash_table;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::policy::GrowthPolicy;

/// A hash map backed by a growable linear-probing [`HashTable`].
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq` and uses a configurable hasher builder `S` to hash keys. Each
/// pair lives directly in a slot next to its 64-bit hash; a lookup compares
/// the stored hash first and the key only when the hashes agree.
///
/// The map starts with 7 slots and grows according to its
/// [`GrowthPolicy`], by default once more than 70% of the slots are in use.
///
/// # Examples
///
/// ```rust
/// use mad_hash::HashMap;
///
/// let mut map: HashMap<_, _> = HashMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map.get("a"), Some(&1));
/// assert_eq!(map["b"], 2);
/// assert!(map.at("c").is_err());
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _> = HashMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the growth policy of the underlying table.
    pub fn policy(&self) -> GrowthPolicy {
        self.table.policy()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all key-value pairs, keeping the allocated slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _> = HashMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Rehashes the map into exactly [`len`](Self::len) slots.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Grows the map so that `additional` more pairs fit without crossing
    /// the load threshold.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Keeps only the pairs for which `f` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert_eq!(map.len(), 4);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        self.table.retain(|(k, v)| f(k, v));
    }

    /// An iterator visiting all key-value pairs in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _> = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// let mut pairs: Vec<_> = map.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(&"a", &1), (&"b", &2)]);
    /// ```
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

    /// An iterator visiting all values mutably in slot order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Clears the map, returning all key-value pairs as an iterator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _> = HashMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let mut drained: Vec<_> = map.drain().collect();
    /// drained.sort();
    /// assert_eq!(drained, [(1, "a"), (2, "b")]);
    /// assert!(map.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
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

    /// Computes a histogram of how far pairs sit from their home slots.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> crate::ProbeHistogram {
        self.table.probe_histogram()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use mad_hash::HashMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let map: HashMap<i32, String, _> = HashMap::with_hasher(SimpleHasher);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Creates a new hash map with exactly `capacity` slots and the given
    /// hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates a new hash map that grows according to `policy`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::DefaultHashBuilder;
    /// use mad_hash::GrowthPolicy;
    /// use mad_hash::HashMap;
    ///
    /// let policy = GrowthPolicy::new(50, 1.5);
    /// let mut map = HashMap::with_policy_and_hasher(policy, DefaultHashBuilder::default());
    /// for n in 0..4 {
    ///     map.insert(n, n);
    /// }
    /// // 4 of 7 slots is above 50%.
    /// map.insert(4, 4);
    /// assert_eq!(map.capacity(), 10);
    /// ```
    pub fn with_policy_and_hasher(policy: GrowthPolicy, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_policy(policy),
            hash_builder,
        }
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    /// Otherwise the value is updated and the old value is returned; the key
    /// is not updated.
    ///
    /// # Panics
    ///
    /// Panics if the underlying table is still full after growing, which
    /// indicates a broken invariant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _> = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => {
                Some(core::mem::replace(&mut entry.get_mut().1, value))
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// This never creates an entry and never grows the map.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the key-value pair corresponding to the key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |(k, _)| key.eq(k.borrow()))
            .map(|(k, v)| (k, v))
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
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::Error;
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _> = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    /// ```
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
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut counts: HashMap<&str, u32> = HashMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts["a"], 2);
    /// assert_eq!(counts["b"], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Returns `true` if the map contains a value for the specified key.
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
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _> = HashMap::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.find(&1).get(), Some(&(1, "a")));
    /// assert!(map.find(&2).is_end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, (K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.cursor(hash, |(k, _)| key.eq(k.borrow()))
    }

    /// Removes a key from the map, returning the value if the key was
    /// present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _> = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
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

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _> = HashMap::new();
    /// map.entry("poneyland").or_insert(3);
    /// *map.entry("poneyland").or_insert(10) *= 2;
    /// assert_eq!(map["poneyland"], 6);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_builder.hash_one(&key);
        let entry = self.table.entry(hash, |(k, _)| k == &key);
        Entry::wrap(entry, key)
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new hash map using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new hash map with exactly `capacity` slots using the default
    /// hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, Q, V, S> Index<&Q> for HashMap<K, V, S>
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
    /// Panics if the key is not present in the map. Use
    /// [`at`](HashMap::at) for a recoverable lookup.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}", Error::KeyNotFound),
        }
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
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

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Pairs a raw table entry with the key it was looked up by.
    pub(crate) fn wrap(entry: TableEntry<'a, (K, V)>, key: K) -> Self {
        match entry {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Inserts a value into the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}

/// An iterator over the key-value pairs of a `HashMap`.
pub struct Iter<'a, K, V> {
    pub(crate) inner: hash_table::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the key-value pairs of a `HashMap`.
pub struct IterMut<'a, K, V> {
    pub(crate) inner: hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a `HashMap`.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the key-value pairs of a `HashMap`.
pub struct IntoIter<K, V> {
    inner: hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// A draining iterator over the key-value pairs of a `HashMap`.
pub struct Drain<'a, K, V> {
    inner: hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    type SipMap<K, V> = HashMap<K, V, SipHashBuilder>;

    fn symbols() -> SipMap<String, u32> {
        ["alpha", "beta", "gamma", "delta"]
            .iter()
            .enumerate()
            .map(|(id, name)| (name.to_string(), id as u32))
            .collect()
    }

    #[test]
    fn constructors() {
        let map: SipMap<u8, u8> = HashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 7);
        assert_eq!(map.policy(), GrowthPolicy::default());

        let sized: SipMap<u8, u8> = HashMap::with_capacity(40);
        assert_eq!(sized.capacity(), 40);
        assert_eq!(sized.size(), 0);

        let tuned = SipMap::<u8, u8>::with_policy_and_hasher(
            GrowthPolicy::new(50, 1.5),
            SipHashBuilder::default(),
        );
        assert_eq!(tuned.policy().max_load_percent(), 50);

        let defaulted: SipMap<u8, u8> = HashMap::default();
        assert_eq!(defaulted.capacity(), 7);
    }

    #[test]
    fn insert_overwrites_and_reports_old_value() {
        let mut map = symbols();
        assert_eq!(map.len(), 4);
        assert_eq!(map.insert("epsilon".to_string(), 4), None);
        assert_eq!(map.insert("beta".to_string(), 11), Some(1));
        assert_eq!(map.len(), 5);

        assert_eq!(map.get("beta"), Some(&11));
        assert_eq!(map.get_key_value("gamma"), Some((&"gamma".to_string(), &2)));
        assert_eq!(map.get("omega"), None);

        if let Some(id) = map.get_mut("alpha") {
            *id += 100;
        }
        assert_eq!(map["alpha"], 100);
        assert_eq!(map.get_mut("omega"), None);
    }

    #[test]
    fn non_creating_lookups() {
        let map = symbols();

        assert_eq!(map.at("delta"), Ok(&3));
        assert_eq!(map.at("omega"), Err(Error::KeyNotFound));
        assert_eq!(map["gamma"], 2);
        assert!(map.exists("alpha") && map.contains_key("beta"));
        assert_eq!(map.count("alpha"), 1);
        assert_eq!(map.count("omega"), 0);
        assert!(map.find("omega").is_end());
        assert_eq!(map.len(), 4);
    }

    #[test]
    #[should_panic(expected = "key does not exist")]
    fn index_on_missing_key_panics() {
        let map: SipMap<u16, u16> = HashMap::new();
        let _ = map[&5];
    }

    #[test]
    fn get_or_insert_default_creates_once() {
        let mut adjacency: SipMap<u32, Vec<u32>> = HashMap::new();
        for (from, to) in [(1, 2), (1, 3), (2, 3), (1, 4)] {
            adjacency.get_or_insert_default(from).push(to);
        }
        assert_eq!(adjacency.len(), 2);
        assert_eq!(adjacency[&1], vec![2, 3, 4]);
        assert_eq!(adjacency[&2], vec![3]);
    }

    #[test]
    fn remove_and_remove_entry() {
        let mut map = symbols();

        assert_eq!(map.remove("beta"), Some(1));
        assert_eq!(map.remove("beta"), None);
        assert_eq!(map.remove_entry("delta"), Some(("delta".to_string(), 3)));
        assert_eq!(map.len(), 2);
        assert!(map.exists("alpha") && map.exists("gamma"));

        map.clear();
        assert!(map.is_empty());
        assert!(!map.exists("alpha"));
        assert!(map.capacity() > 0);
    }

    #[test]
    fn reserve_avoids_growth() {
        let mut map: SipMap<u32, u32> = HashMap::new();
        map.reserve(500);
        let capacity = map.capacity();
        for i in 0..500 {
            map.insert(i, i);
        }
        assert_eq!(map.capacity(), capacity);
    }

    #[test]
    fn entry_combinators() {
        let mut counts: SipMap<char, usize> = HashMap::new();
        for c in "mississippi".chars() {
            counts.entry(c).and_modify(|n| *n += 1).or_insert(1);
        }
        assert_eq!(counts[&'s'], 4);
        assert_eq!(counts[&'m'], 1);

        let tally = counts.entry('z').or_insert_with(|| 26);
        assert_eq!(*tally, 26);
        assert_eq!(counts.entry('q').key(), &'q');
        *counts.entry('q').or_default() += 2;
        assert_eq!(counts.get(&'q'), Some(&2));
    }

    #[test]
    fn occupied_and_vacant_entries() {
        let mut map = symbols();

        match map.entry("gamma".to_string()) {
            Entry::Occupied(mut entry) => {
                assert_eq!(entry.key(), "gamma");
                *entry.get_mut() += 10;
                assert_eq!(entry.insert(7), 12);
                assert_eq!(entry.get(), &7);
                assert_eq!(entry.remove_entry(), ("gamma".to_string(), 7));
            }
            Entry::Vacant(_) => panic!("gamma should be present"),
        }
        assert!(!map.exists("gamma"));

        match map.entry("zeta".to_string()) {
            Entry::Vacant(entry) => {
                assert_eq!(entry.key(), "zeta");
                *entry.insert(5) += 1;
            }
            Entry::Occupied(_) => panic!("zeta should be absent"),
        }
        assert_eq!(map["zeta"], 6);

        let key = match map.entry("eta".to_string()) {
            Entry::Vacant(entry) => entry.into_key(),
            Entry::Occupied(_) => unreachable!(),
        };
        assert_eq!(key, "eta");
        assert!(!map.exists("eta"));
    }

    #[test]
    fn iterators_visit_every_pair() {
        let mut map = symbols();

        let mut ids: Vec<u32> = map.values().copied().collect();
        ids.sort();
        assert_eq!(ids, [0, 1, 2, 3]);

        let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
        names.sort();
        assert_eq!(names, ["alpha", "beta", "delta", "gamma"]);

        for id in map.values_mut() {
            *id *= 10;
        }
        for (name, id) in &mut map {
            *id += name.len() as u32;
        }
        assert_eq!(map["beta"], 14);
        assert_eq!(map.iter().len(), 4);
        assert_eq!((&map).into_iter().count(), 4);
    }

    #[test]
    fn find_returns_cursor_into_slots() {
        let mut map: SipMap<u64, u64> = HashMap::new();
        for i in 0..10 {
            map.insert(i, i * i);
        }

        let cursor = map.find(&4);
        assert_eq!(cursor.get(), Some(&(4, 16)));
        assert!(cursor.index().is_some());

        let mut walked = 0;
        let mut cursor = map.cursor_front();
        while !cursor.is_end() {
            walked += 1;
            cursor.move_next();
        }
        assert_eq!(walked, 10);
    }

    #[test]
    fn drain_empties_the_map() {
        let mut map = symbols();
        let capacity = map.capacity();

        let mut drained: Vec<(String, u32)> = map.drain().collect();
        drained.sort_by_key(|&(_, id)| id);
        assert_eq!(drained[0], ("alpha".to_string(), 0));
        assert_eq!(drained.len(), 4);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
    }

    #[test]
    fn survives_growth_and_bulk_removal() {
        let mut map: SipMap<u32, u32> = HashMap::new();
        for i in 0..2000 {
            map.insert(i, i ^ 0xAAAA);
        }
        assert_eq!(map.len(), 2000);

        for i in (0..2000).filter(|i| i % 3 != 0) {
            assert_eq!(map.remove(&i), Some(i ^ 0xAAAA));
        }
        assert_eq!(map.len(), 667);
        for i in 0..2000 {
            let expected = (i % 3 == 0).then_some(i ^ 0xAAAA);
            assert_eq!(map.get(&i).copied(), expected);
        }
    }

    #[test]
    fn collect_extend_and_eq() {
        let a: SipMap<i32, i32> = (0..20).map(|i| (i, -i)).collect();
        let mut b: SipMap<i32, i32> = HashMap::new();
        b.extend((0..20).rev().map(|i| (i, -i)));
        assert_eq!(a, b);

        b.insert(0, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn retain_and_shrink() {
        let mut map: SipMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
        map.retain(|k, v| {
            *v += 1;
            k % 10 == 0
        });
        assert_eq!(map.len(), 10);
        assert_eq!(map[&30], 31);

        map.shrink_to_fit();
        assert_eq!(map.capacity(), 10);
        for i in (0..100).step_by(10) {
            assert_eq!(map.get(&i), Some(&(i + 1)));
        }
    }

    #[test]
    fn into_iter_and_debug() {
        let mut map: SipMap<i32, &str> = HashMap::new();
        map.insert(7, "seven");

        assert_eq!(format!("{map:?}"), r#"{7: "seven"}"#);

        let owned: Vec<(i32, &str)> = map.into_iter().collect();
        assert_eq!(owned, [(7, "seven")]);
    }
}
