use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::Chain;
use core::iter::FusedIterator;

use crate::DefaultHashBuilder;
use crate::cursor::Cursor;
use crate::hash_table;
use crate::hash_table::Entry;
use crate::hash_table::HashTable;
use crate::policy::GrowthPolicy;

/// A hash set backed by a growable linear-probing [`HashTable`].
///
/// `HashSet<T, S>` stores values of type `T` where `T` implements
/// `Hash + Eq` and uses a configurable hasher builder `S` to hash values.
/// Each value lives directly in a slot next to its 64-bit hash.
///
/// # Examples
///
/// ```rust
/// use mad_hash::HashSet;
///
/// let mut set: HashSet<_> = HashSet::new();
/// assert!(set.insert("a"));
/// assert!(!set.insert("a"));
/// assert!(set.exists("a"));
/// assert_eq!(set.count("b"), 0);
/// ```
#[derive(Clone)]
pub struct HashSet<T, S = DefaultHashBuilder> {
    table: HashTable<T>,
    hash_builder: S,
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> HashSet<T, S> {
    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
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

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all elements, keeping the allocated slots.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Rehashes the set into exactly [`len`](Self::len) slots.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Grows the set so that `additional` more values fit without crossing
    /// the load threshold.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = (1..=4).collect();
    /// set.retain(|&x| x % 2 == 0);
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(&2));
    /// assert!(set.contains(&4));
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&T) -> bool) {
        self.table.retain(|v| f(v));
    }

    /// An iterator visiting all elements in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Clears the set, returning all elements as an iterator.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Returns a cursor at the first occupied slot.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.table.cursor_front()
    }

    /// Returns occupancy and probe-length statistics for the underlying
    /// table.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::DebugStats {
        self.table.debug_stats()
    }

    /// Computes a histogram of how far values sit from their home slots.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> crate::ProbeHistogram {
        self.table.probe_histogram()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash set with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::hash::RandomState;
    ///
    /// use mad_hash::hash_set::HashSet;
    ///
    /// let set: HashSet<i32, _> = HashSet::with_hasher(RandomState::new());
    /// assert!(set.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
        }
    }

    /// Creates a new hash set with exactly `capacity` slots and the given
    /// hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates a new hash set that grows according to `policy`.
    pub fn with_policy_and_hasher(policy: GrowthPolicy, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_policy(policy),
            hash_builder,
        }
    }

    /// Adds a value to the set.
    ///
    /// Returns `true` if the value was not present. An existing equal value
    /// is left untouched.
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

    /// Adds a value to the set, replacing and returning an existing equal
    /// value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashSet;
    ///
    /// let mut set: HashSet<Vec<i32>> = HashSet::new();
    /// set.insert(Vec::new());
    /// assert_eq!(set.get(&[][..]).unwrap().capacity(), 0);
    ///
    /// set.replace(Vec::with_capacity(10));
    /// assert!(set.get(&[][..]).unwrap().capacity() >= 10);
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(mut entry) => Some(core::mem::replace(entry.get_mut(), value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
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

    /// Returns `true` if `self` has no elements in common with `other`.
    pub fn is_disjoint(&self, other: &HashSet<T, S>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if `other` contains at least all the elements in
    /// `self`.
    pub fn is_subset(&self, other: &HashSet<T, S>) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if `self` contains at least all the elements in
    /// `other`.
    pub fn is_superset(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Returns an iterator over the union of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashSet;
    ///
    /// let a: HashSet<i32> = [1, 2].into_iter().collect();
    /// let b: HashSet<i32> = [2, 3].into_iter().collect();
    ///
    /// let mut union: Vec<_> = a.union(&b).copied().collect();
    /// union.sort();
    /// assert_eq!(union, [1, 2, 3]);
    /// ```
    pub fn union<'a>(&'a self, other: &'a HashSet<T, S>) -> Union<'a, T, S> {
        Union(self.iter().chain(other.difference(self)))
    }

    /// Returns an iterator over the values present in both sets.
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, S>) -> Intersection<'a, T, S> {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        Intersection(small.filter_by(large, true))
    }

    /// Returns an iterator over the values in `self` but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, S>) -> Difference<'a, T, S> {
        Difference(self.filter_by(other, false))
    }

    fn filter_by<'a>(&'a self, other: &'a HashSet<T, S>, shared: bool) -> Membership<'a, T, S> {
        Membership {
            iter: self.iter(),
            other,
            shared,
        }
    }

    /// Returns an iterator over the values in exactly one of the sets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashSet;
    ///
    /// let a: HashSet<i32> = [1, 2].into_iter().collect();
    /// let b: HashSet<i32> = [2, 3].into_iter().collect();
    ///
    /// let mut diff: Vec<_> = a.symmetric_difference(&b).copied().collect();
    /// diff.sort();
    /// assert_eq!(diff, [1, 3]);
    /// ```
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<T, S>,
    ) -> SymmetricDifference<'a, T, S> {
        SymmetricDifference(self.difference(other).chain(other.difference(self)))
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new hash set using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new hash set with exactly `capacity` slots using the default
    /// hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> IntoIterator for HashSet<T, S> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// An iterator over the values of a `HashSet`.
pub struct Iter<'a, T> {
    pub(crate) inner: hash_table::Iter<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A draining iterator over the values of a `HashSet`.
pub struct Drain<'a, T> {
    inner: hash_table::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

/// A consuming iterator over the values of a `HashSet`.
pub struct IntoIter<T> {
    inner: hash_table::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// Values of one set kept or dropped by membership in another.
struct Membership<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
    shared: bool,
}

impl<'a, T, S> Iterator for Membership<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let (other, shared) = (self.other, self.shared);
        self.iter.find(|v| other.contains(*v) == shared)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

/// An iterator over the union of two sets.
pub struct Union<'a, T, S>(Chain<Iter<'a, T>, Difference<'a, T, S>>);

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, T, S>(Membership<'a, T, S>);

/// An iterator over the difference of two sets.
pub struct Difference<'a, T, S>(Membership<'a, T, S>);

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, T, S>(Chain<Difference<'a, T, S>, Difference<'a, T, S>>);

macro_rules! forward_set_iterator {
    ($($name:ident),*) => {$(
        impl<'a, T, S> Iterator for $name<'a, T, S>
        where
            T: Hash + Eq,
            S: BuildHasher,
        {
            type Item = &'a T;

            fn next(&mut self) -> Option<Self::Item> {
                self.0.next()
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.0.size_hint()
            }
        }

        impl<T, S> FusedIterator for $name<'_, T, S>
        where
            T: Hash + Eq,
            S: BuildHasher,
        {
        }
    )*};
}

forward_set_iterator!(Union, Intersection, Difference, SymmetricDifference);

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
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
            Self {
                k1: OsRng.try_next_u64().unwrap_or(0),
                k2: OsRng.try_next_u64().unwrap_or(0),
            }
        }
    }

    fn set_of(values: impl IntoIterator<Item = i32>) -> HashSet<i32, SipHashBuilder> {
        values.into_iter().collect()
    }

    fn sorted<'a>(values: impl Iterator<Item = &'a i32>) -> Vec<i32> {
        let mut values: Vec<i32> = values.copied().collect();
        values.sort();
        values
    }

    #[test]
    fn test_new_and_with_hasher() {
        let set: HashSet<i32, SipHashBuilder> = HashSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.capacity(), 7);

        let set2 = HashSet::<i32, _>::with_capacity_and_hasher(30, SipHashBuilder::default());
        assert_eq!(set2.capacity(), 30);
    }

    #[test]
    fn test_insert_contains_remove() {
        let mut set: HashSet<i32, SipHashBuilder> = HashSet::new();
        assert!(set.insert(1));
        assert!(set.insert(2));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 2);
        assert_eq!(set.size(), 2);

        assert!(set.contains(&1));
        assert!(set.exists(&2));
        assert_eq!(set.count(&2), 1);
        assert_eq!(set.count(&3), 0);

        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert!(!set.contains(&1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_take_and_get() {
        let mut set: HashSet<String, SipHashBuilder> = HashSet::new();
        set.insert("hello".to_string());

        assert_eq!(set.get("hello").map(String::as_str), Some("hello"));
        assert_eq!(set.take("hello"), Some("hello".to_string()));
        assert_eq!(set.take("hello"), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_replace() {
        let mut set: HashSet<i32, SipHashBuilder> = HashSet::new();
        assert_eq!(set.replace(5), None);
        assert_eq!(set.replace(5), Some(5));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_find_cursor() {
        let set = set_of(0..10);
        assert_eq!(set.find(&3).get(), Some(&3));
        assert!(set.find(&30).is_end());

        let mut cursor = set.find(&3);
        cursor.move_next();
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&3));
    }

    #[test]
    fn test_set_relations() {
        let a = set_of([1, 2]);
        let b = set_of([1, 2, 3]);
        let c = set_of([4, 5]);

        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(b.is_superset(&a));
        assert!(a.is_disjoint(&c));
        assert!(!a.is_disjoint(&b));
    }

    #[test]
    fn test_set_operations() {
        let a = set_of([1, 2, 3, 4]);
        let b = set_of([3, 4, 5, 6]);

        assert_eq!(sorted(a.union(&b)), [1, 2, 3, 4, 5, 6]);
        assert_eq!(sorted(a.intersection(&b)), [3, 4]);
        assert_eq!(sorted(b.intersection(&a)), [3, 4]);
        assert_eq!(sorted(a.difference(&b)), [1, 2]);
        assert_eq!(sorted(b.difference(&a)), [5, 6]);
        assert_eq!(sorted(a.symmetric_difference(&b)), [1, 2, 5, 6]);
    }

    #[test]
    fn test_set_operations_bounds_and_fuse() {
        let a = set_of(0..10);
        let b = set_of(5..8);
        let empty = set_of(0..0);

        assert_eq!(a.intersection(&b).size_hint(), (0, Some(3)));
        assert_eq!(a.difference(&b).size_hint(), (0, Some(10)));
        assert_eq!(sorted(a.union(&empty)), sorted(a.iter()));
        assert_eq!(a.intersection(&empty).count(), 0);
        assert_eq!(empty.difference(&a).count(), 0);

        let mut diff = b.difference(&a);
        assert_eq!(diff.next(), None);
        assert_eq!(diff.next(), None);

        let mut union = b.union(&b);
        assert_eq!(union.by_ref().count(), 3);
        assert_eq!(union.next(), None);
    }

    #[test]
    fn test_retain_drain_clear() {
        let mut set = set_of(0..100);
        set.retain(|&x| x % 3 == 0);
        assert_eq!(set.len(), 34);
        assert!(set.iter().all(|x| x % 3 == 0));

        let drained = sorted(set.drain().collect::<Vec<_>>().iter());
        assert_eq!(drained.len(), 34);
        assert!(set.is_empty());

        set.insert(1);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_growth_keeps_members() {
        let mut set: HashSet<u64, SipHashBuilder> = HashSet::new();
        for i in 0..5000u64 {
            assert!(set.insert(i));
            assert!(set.len() <= set.capacity());
        }
        for i in 0..5000u64 {
            assert!(set.contains(&i));
        }
        assert!(!set.contains(&5000));

        set.shrink_to_fit();
        assert_eq!(set.capacity(), 5000);
        assert!((0..5000u64).all(|i| set.contains(&i)));
    }

    #[test]
    fn test_eq_extend_into_iter() {
        let a = set_of(0..10);
        let mut b = set_of([]);
        b.extend((0..10).rev());
        assert_eq!(a, b);

        b.insert(10);
        assert_ne!(a, b);

        let mut values: Vec<i32> = b.into_iter().collect();
        values.sort();
        assert_eq!(values, (0..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_debug() {
        let set = set_of([42]);
        assert_eq!(format!("{set:?}"), "{42}");
    }

    #[test]
    fn test_stats() {
        let set = set_of(0..64);
        let stats = set.debug_stats();
        assert_eq!(stats.populated, 64);
        assert_eq!(set.probe_histogram().total(), 64);
    }
}
