use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::FixedHashBuilder;
use crate::bounded_table;
use crate::bounded_table::BoundedTable;
use crate::cursor::Cursor;
use crate::entry::Entry;
use crate::error::Error;
use crate::hash_set::Iter;

/// A hash set with room for exactly `N` values, stored inline.
///
/// Adding a new value to a full set through [`insert`](Self::insert),
/// [`Extend`] or [`FromIterator`] panics; [`try_insert`](Self::try_insert)
/// reports [`Error::CapacityExceeded`] instead.
///
/// # Examples
///
/// ```rust
/// use mad_hash::BoundedHashSet;
///
/// let set: BoundedHashSet<&str, 4> = BoundedHashSet::from_array(["x", "y"]);
/// assert!(set.exists("x"));
/// assert_eq!(set.count("z"), 0);
/// assert_eq!(set.capacity(), 4);
/// ```
#[derive(Clone)]
pub struct BoundedHashSet<T, const N: usize, S = FixedHashBuilder> {
    table: BoundedTable<T, N>,
    hash_builder: S,
}

impl<T: Debug, const N: usize, S> Debug for BoundedHashSet<T, N, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, const N: usize, S> BoundedHashSet<T, N, S> {
    /// Creates an empty set with the given hasher builder.
    pub const fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: BoundedTable::new(),
            hash_builder,
        }
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
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

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// An iterator visiting all values in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns a cursor at the first occupied slot.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.table.cursor_front()
    }
}

impl<T, const N: usize, S> BoundedHashSet<T, N, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Adds a value to the set. Returns `true` if the value was not present.
    ///
    /// # Panics
    ///
    /// Panics if the value is new and the set is full.
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    /// Adds a value to the set, or reports [`Error::CapacityExceeded`] if the
    /// value is new and the set is full.
    pub fn try_insert(&mut self, value: T) -> Result<bool, Error> {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.try_entry(hash, |v| v == &value)? {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(true)
            }
        }
    }

    /// Returns `true` if the set contains the value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(value).is_some()
    }

    /// Alias for [`contains`](Self::contains).
    pub fn exists<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.contains(value)
    }

    /// Returns the number of elements equal to `value`, which is either 0 or
    /// 1.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        usize::from(self.contains(value))
    }

    /// Returns a reference to the stored value equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| value.eq(v.borrow()))
    }

    /// Returns a cursor at the stored value equal to `value`, or at the end
    /// position if there is none.
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(value);
        self.table.cursor(hash, |v| value.eq(v.borrow()))
    }

    /// Removes a value from the set. Returns whether the value was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the stored value equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| value.eq(v.borrow()))
    }
}

impl<T, const N: usize, S> BoundedHashSet<T, N, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty set using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Builds a set from a literal list of values.
    ///
    /// Supplying more values than the set has slots is rejected at compile
    /// time. Duplicates collapse into one element.
    ///
    /// ```compile_fail
    /// use mad_hash::BoundedHashSet;
    ///
    /// let set: BoundedHashSet<u8, 2> = BoundedHashSet::from_array([1, 2, 3]);
    /// ```
    pub fn from_array<const M: usize>(values: [T; M]) -> Self {
        const {
            assert!(M <= N, "more initial values than slots");
        }

        let mut set = Self::new();
        for value in values {
            set.insert(value);
        }
        set
    }
}

impl<T, const N: usize, S> Default for BoundedHashSet<T, N, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize, S> PartialEq for BoundedHashSet<T, N, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|value| other.contains(value))
    }
}

impl<T, const N: usize, S> Extend<T> for BoundedHashSet<T, N, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// # Panics
    ///
    /// Panics when a new value does not fit.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, const N: usize, S> FromIterator<T> for BoundedHashSet<T, N, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// # Panics
    ///
    /// Panics if the iterator yields more than `N` distinct values.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, const N: usize, S> IntoIterator for BoundedHashSet<T, N, S> {
    type IntoIter = bounded_table::IntoIter<T, N>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, T, const N: usize, S> IntoIterator for &'a BoundedHashSet<T, N, S> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
