use alloc::vec::Vec;
use core::fmt::Debug;

use crate::cfg::trace;
use crate::cursor::Cursor;
pub use crate::entry::Entry;
pub use crate::entry::OccupiedEntry;
pub use crate::entry::VacantEntry;
pub use crate::iter::Drain;
pub use crate::iter::IntoIter;
pub use crate::iter::Iter;
pub use crate::iter::IterMut;
use crate::policy::GrowthPolicy;
use crate::policy::INITIAL_CAPACITY;
use crate::probe::Probe;
use crate::probe::place;
use crate::probe::probe;
use crate::probe::vacate;
use crate::scale::MAX_CAPACITY;
use crate::slot::Slot;
use crate::slot::empty_slots;
#[cfg(any(test, feature = "stats"))]
use crate::stats::DebugStats;
#[cfg(any(test, feature = "stats"))]
use crate::stats::ProbeHistogram;

/// A growable open-addressing hash table using linear probing.
///
/// Every entry is stored directly in a slot array together with its 64-bit
/// hash. The home slot of an entry is derived from its hash by MAD
/// compression ([`scale`](crate::scale::scale)); collisions are resolved by
/// scanning forward from the home slot, wrapping at the end of the array.
///
/// The table is driven by a hash and an equality predicate rather than by a
/// key type, which lets callers store entries whose key is embedded in the
/// value. An entry matches a lookup when its stored hash equals the requested
/// hash *and* the predicate accepts it.
///
/// # Growth
///
/// Before an [`entry`](Self::entry) lookup the table checks its load against
/// its [`GrowthPolicy`]. When the load is above the threshold, every entry is
/// rehashed into a larger slot array. Growth replaces the slot array
/// wholesale, so any slot index observed earlier (for example through
/// [`Entry::index`] or [`Cursor::index`]) is meaningless afterward. Cursors
/// and entries borrow the table, so they cannot outlive such a change.
///
/// # Examples
///
/// ```rust
/// use core::hash::Hash;
/// use core::hash::Hasher;
///
/// use mad_hash::hash_table::Entry;
/// use mad_hash::hash_table::HashTable;
/// use siphasher::sip::SipHasher;
///
/// struct Symbol {
///     name: &'static str,
///     id: u32,
/// }
///
/// fn hash_name(name: &str) -> u64 {
///     let mut hasher = SipHasher::new();
///     name.hash(&mut hasher);
///     hasher.finish()
/// }
///
/// let mut symbols: HashTable<Symbol> = HashTable::new();
/// for name in ["main", "parse", "main", "emit"] {
///     let next_id = symbols.len() as u32;
///     match symbols.entry(hash_name(name), |s| s.name == name) {
///         Entry::Vacant(entry) => {
///             entry.insert(Symbol { name, id: next_id });
///         }
///         Entry::Occupied(_) => {}
///     }
/// }
///
/// assert_eq!(symbols.len(), 3);
/// let emit = symbols.find(hash_name("emit"), |s| s.name == "emit");
/// assert_eq!(emit.map(|s| s.id), Some(2));
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    slots: Vec<Slot<V>>,
    populated: usize,
    policy: GrowthPolicy,
}

impl<V> Debug for HashTable<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("populated", &self.populated)
            .field("capacity", &self.slots.len())
            .field("policy", &self.policy)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with 7 slots and the default growth policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let table: HashTable<u64> = HashTable::new();
    /// assert_eq!(table.capacity(), 7);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty table with exactly `capacity` slots.
    ///
    /// A capacity of zero allocates nothing; the first insertion grows the
    /// table to 7 slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not below
    /// [`MAX_CAPACITY`](crate::scale::MAX_CAPACITY).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_policy(capacity, GrowthPolicy::default())
    }

    /// Creates an empty table with 7 slots that grows according to `policy`.
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self::with_capacity_and_policy(INITIAL_CAPACITY, policy)
    }

    /// Creates an empty table with exactly `capacity` slots that grows
    /// according to `policy`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not below
    /// [`MAX_CAPACITY`](crate::scale::MAX_CAPACITY).
    pub fn with_capacity_and_policy(capacity: usize, policy: GrowthPolicy) -> Self {
        assert!(
            capacity < MAX_CAPACITY,
            "capacity {capacity} exceeds the maximum of {MAX_CAPACITY}"
        );

        Self {
            slots: empty_slots(capacity),
            populated: 0,
            policy,
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots in the table.
    ///
    /// This is the physical slot count, not the number of entries the table
    /// accepts before growing. See [`GrowthPolicy`] for the threshold.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the policy controlling when and how far the table grows.
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Looks up the entry for `hash` and `eq`, making room for it first if
    /// the table is above its load threshold.
    ///
    /// The returned entry is either occupied by the matching value or vacant
    /// at the slot where the value belongs. Nothing is inserted until
    /// [`VacantEntry::insert`] is called.
    ///
    /// Growing may happen even when the entry turns out to be occupied; it
    /// invalidates every slot index observed before the call.
    ///
    /// # Panics
    ///
    /// Panics if the table has no free slot for the entry even after an
    /// extra growth step. The load threshold is meant to keep this from
    /// happening; reaching it indicates a broken invariant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// for n in 0..6u64 {
    ///     table.entry(n, |&v: &u64| v == n).or_insert(n);
    /// }
    ///
    /// // 5 of 7 slots is above the default 70% threshold, so the sixth
    /// // insertion grew the table.
    /// assert_eq!(table.capacity(), 14);
    /// assert_eq!(table.len(), 6);
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        if self.policy.needs_growth(self.populated, self.slots.len()) {
            self.grow(self.policy.grown_capacity(self.slots.len()));
        }

        let mut outcome = probe(&self.slots, hash, &eq);
        if outcome == Probe::Full {
            trace!(
                capacity = self.slots.len(),
                populated = self.populated,
                "table full under the load threshold; growing again"
            );
            self.grow(self.policy.grown_capacity(self.slots.len()));
            outcome = probe(&self.slots, hash, &eq);
        }

        match outcome {
            Probe::Found(index) => Entry::Occupied(OccupiedEntry {
                slots: self.slots.as_mut_slice(),
                populated: &mut self.populated,
                index,
            }),
            Probe::Vacant(index) => Entry::Vacant(VacantEntry {
                slots: self.slots.as_mut_slice(),
                populated: &mut self.populated,
                index,
                hash,
            }),
            Probe::Full => panic!(
                "hash table still full after growing to {} slots",
                self.slots.len()
            ),
        }
    }

    /// Returns a reference to the value matching `hash` and `eq`.
    ///
    /// This never grows the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.entry(42, |&v: &u64| v == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&v| v == 42), Some(&42));
    /// assert_eq!(table.find(43, |&v| v == 43), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        if self.populated == 0 {
            return None;
        }

        match probe(&self.slots, hash, eq) {
            Probe::Found(index) => self.slots[index].get(),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns a mutable reference to the value matching `hash` and `eq`.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        if self.populated == 0 {
            return None;
        }

        match probe(&self.slots, hash, eq) {
            Probe::Found(index) => self.slots[index].get_mut(),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns a cursor at the value matching `hash` and `eq`, or at the end
    /// position if there is none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.entry(3, |&v: &u64| v == 3).or_insert(3);
    ///
    /// assert_eq!(table.cursor(3, |&v| v == 3).get(), Some(&3));
    /// assert!(table.cursor(4, |&v| v == 4).is_end());
    /// ```
    pub fn cursor(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Cursor<'_, V> {
        if self.populated == 0 {
            return Cursor::end(&self.slots);
        }

        match probe(&self.slots, hash, eq) {
            Probe::Found(index) => Cursor::at(&self.slots, index),
            Probe::Vacant(_) | Probe::Full => Cursor::end(&self.slots),
        }
    }

    /// Returns a cursor at the first occupied slot, or at the end position if
    /// the table is empty.
    pub fn cursor_front(&self) -> Cursor<'_, V> {
        Cursor::front(&self.slots)
    }

    /// Returns a cursor at the end position.
    pub fn cursor_end(&self) -> Cursor<'_, V> {
        Cursor::end(&self.slots)
    }

    /// Removes and returns the value matching `hash` and `eq`.
    ///
    /// The freed slot is closed up by shifting later entries of the same
    /// probe run back toward their home slots, so lookups never need to skip
    /// over deleted markers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.entry(42, |&v: &u64| v == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&v| v == 42), Some(42));
    /// assert_eq!(table.remove(42, |&v| v == 42), None);
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        if self.populated == 0 {
            return None;
        }

        match probe(&self.slots, hash, eq) {
            Probe::Found(index) => {
                self.populated -= 1;
                vacate(&mut self.slots, index).map(|(_, value)| value)
            }
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Rehashes every entry into a new array of `new_capacity` slots.
    ///
    /// Growth normally happens on its own during [`entry`](Self::entry);
    /// calling this directly sizes the table explicitly. All slot indices
    /// observed before the call are invalidated.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` is smaller than [`len`](Self::len) or not
    /// below [`MAX_CAPACITY`](crate::scale::MAX_CAPACITY).
    pub fn grow(&mut self, new_capacity: usize) {
        assert!(
            new_capacity >= self.populated,
            "cannot fit {} entries into {new_capacity} slots",
            self.populated
        );
        assert!(
            new_capacity < MAX_CAPACITY,
            "capacity {new_capacity} exceeds the maximum of {MAX_CAPACITY}"
        );

        trace!(
            old_capacity = self.slots.len(),
            new_capacity,
            populated = self.populated,
            "rehashing table"
        );
        self.rehash(new_capacity);
    }

    /// Grows the table so that `additional` more entries fit without
    /// crossing the load threshold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let mut table: HashTable<u64> = HashTable::new();
    /// table.reserve(100);
    /// let capacity = table.capacity();
    ///
    /// for n in 0..100u64 {
    ///     table.entry(n, |&v| v == n).or_insert(n);
    /// }
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let required = self.policy.capacity_for(self.populated.saturating_add(additional));
        if required > self.slots.len() {
            self.grow(required);
        }
    }

    /// Rehashes the table into exactly [`len`](Self::len) slots.
    ///
    /// This removes all headroom, so the next insertion grows the table
    /// again. An empty table releases its slot array entirely.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let mut table: HashTable<u64> = HashTable::with_capacity(1000);
    /// table.entry(5, |&v| v == 5).or_insert(5);
    /// table.entry(10, |&v| v == 10).or_insert(10);
    ///
    /// table.shrink_to_fit();
    /// assert_eq!(table.capacity(), 2);
    /// assert_eq!(table.find(10, |&v| v == 10), Some(&10));
    /// ```
    pub fn shrink_to_fit(&mut self) {
        if self.slots.len() == self.populated {
            return;
        }

        trace!(
            old_capacity = self.slots.len(),
            new_capacity = self.populated,
            "shrinking table"
        );
        self.rehash(self.populated);
    }

    fn rehash(&mut self, new_capacity: usize) {
        let old = core::mem::replace(&mut self.slots, empty_slots(new_capacity));

        let mut placed = 0;
        for (hash, item) in old.into_iter().filter_map(|mut slot| slot.take()) {
            if place(&mut self.slots, hash, item).is_err() {
                unreachable!("rehash target has at least as many slots as entries");
            }
            placed += 1;
        }

        debug_assert_eq!(placed, self.populated, "entries lost during rehash");
        self.populated = placed;
    }

    /// Removes all entries, keeping the current capacity.
    pub fn clear(&mut self) {
        self.slots.fill_with(Slot::default);
        self.populated = 0;
    }

    /// Keeps only the entries for which `f` returns `true`.
    ///
    /// The surviving entries are re-placed into a fresh slot array of the
    /// same capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// for n in 0..5u64 {
    ///     table.entry(n, |&v: &u64| v == n).or_insert(n);
    /// }
    /// table.retain(|v| *v % 2 == 0);
    /// assert_eq!(table.len(), 3);
    /// assert_eq!(table.find(1, |&v| v == 1), None);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&mut V) -> bool) {
        let capacity = self.slots.len();
        let old = core::mem::replace(&mut self.slots, empty_slots(capacity));

        self.populated = 0;
        for (hash, mut item) in old.into_iter().filter_map(|mut slot| slot.take()) {
            if f(&mut item) {
                if place(&mut self.slots, hash, item).is_err() {
                    unreachable!("retained entries fit in the current capacity");
                }
                self.populated += 1;
            }
        }
    }

    /// Returns an iterator over the entries in physical slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.slots, self.populated)
    }

    /// Returns a mutable iterator over the entries in physical slot order.
    ///
    /// Changing the parts of an entry its hash was derived from breaks
    /// subsequent lookups for it.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut::new(&mut self.slots, self.populated)
    }

    /// Removes every entry, returning them through an iterator.
    ///
    /// The table keeps its capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// for n in 0..3u64 {
    ///     table.entry(n, |&v: &u64| v == n).or_insert(n);
    /// }
    ///
    /// let mut drained: Vec<u64> = table.drain().collect();
    /// drained.sort();
    /// assert_eq!(drained, [0, 1, 2]);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        let capacity = self.slots.len();
        let slots = core::mem::replace(&mut self.slots, empty_slots(capacity));
        let len = core::mem::take(&mut self.populated);
        Drain::new(slots, len)
    }

    /// Returns occupancy and probe-length statistics for the table.
    ///
    /// Only available in tests or with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        DebugStats::collect(&self.slots, self.populated)
    }

    /// Computes a histogram of how far entries sit from their home slots.
    ///
    /// Only available in tests or with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        ProbeHistogram::collect(&self.slots)
    }
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.slots, self.populated)
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut HashTable<V> {
    type IntoIter = IterMut<'a, V>;
    type Item = &'a mut V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
