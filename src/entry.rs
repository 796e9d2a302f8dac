use crate::probe::vacate;
use crate::slot::Slot;

/// A view into a single entry of a table, which may be vacant or occupied.
///
/// This enum is constructed by the `entry` methods on
/// [`HashTable`](crate::HashTable) and
/// [`BoundedTable`](crate::bounded_table::BoundedTable). Holding an entry
/// borrows the table mutably, so the slot it refers to cannot move while the
/// entry is alive.
///
/// # Examples
///
/// ```rust
/// use mad_hash::hash_table::Entry;
/// use mad_hash::hash_table::HashTable;
///
/// let mut table = HashTable::new();
///
/// match table.entry(7, |&(k, _): &(u32, &str)| k == 7) {
///     Entry::Vacant(entry) => {
///         entry.insert((7, "seven"));
///     }
///     Entry::Occupied(entry) => {
///         println!("Already present: {:?}", entry.get());
///     }
/// }
/// assert_eq!(table.len(), 1);
/// ```
pub enum Entry<'a, V> {
    /// No slot matched; the entry remembers the empty slot to claim.
    Vacant(VacantEntry<'a, V>),
    /// A slot with an equal hash and item was found.
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable reference
    /// to the entry's value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mad_hash::hash_table::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// let value = table.entry(1, |&v: &u64| v == 10).or_insert(10);
    /// assert_eq!(*value, 10);
    ///
    /// let existing = table.entry(1, |&v: &u64| v == 10).or_insert(99);
    /// assert_eq!(*existing, 10);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the value produced by `default` if the entry is vacant and
    /// returns a mutable reference to the entry's value.
    ///
    /// The closure is not called when the entry is occupied.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to an occupied entry and returns a mutable reference to its
    /// value. Returns `None` without inserting anything when the entry is
    /// vacant.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the entry's value.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }

    /// The physical slot index this entry refers to.
    pub fn index(&self) -> usize {
        match self {
            Entry::Occupied(entry) => entry.index,
            Entry::Vacant(entry) => entry.index,
        }
    }
}

/// A view into a vacant slot of a table.
///
/// The slot is the first empty one on the probe path of the requested hash.
/// It is only claimed, and the table's length only changes, once
/// [`insert`](VacantEntry::insert) is called.
pub struct VacantEntry<'a, V> {
    pub(crate) slots: &'a mut [Slot<V>],
    pub(crate) populated: &'a mut usize,
    pub(crate) index: usize,
    pub(crate) hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Claims the slot for `value` and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        debug_assert!(!self.slots[self.index].is_occupied());
        *self.populated += 1;

        let slots = self.slots;
        let slot = &mut slots[self.index];
        *slot = Slot::Occupied {
            hash: self.hash,
            item: value,
        };
        match slot {
            Slot::Occupied { item, .. } => item,
            Slot::Empty => unreachable!("slot was just filled"),
        }
    }

    /// The hash this entry would be inserted under.
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

/// A view into an occupied slot of a table.
pub struct OccupiedEntry<'a, V> {
    pub(crate) slots: &'a mut [Slot<V>],
    pub(crate) populated: &'a mut usize,
    pub(crate) index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        match &self.slots[self.index] {
            Slot::Occupied { item, .. } => item,
            Slot::Empty => unreachable!("occupied entry points at an empty slot"),
        }
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        match &mut self.slots[self.index] {
            Slot::Occupied { item, .. } => item,
            Slot::Empty => unreachable!("occupied entry points at an empty slot"),
        }
    }

    /// Converts the entry into a mutable reference with the lifetime of the
    /// table borrow.
    pub fn into_mut(self) -> &'a mut V {
        let slots = self.slots;
        match &mut slots[self.index] {
            Slot::Occupied { item, .. } => item,
            Slot::Empty => unreachable!("occupied entry points at an empty slot"),
        }
    }

    /// Removes the entry from the table and returns its value.
    ///
    /// Later entries of the same probe cluster may move to keep every key
    /// reachable.
    pub fn remove(self) -> V {
        *self.populated -= 1;
        match vacate(self.slots, self.index) {
            Some((_, value)) => value,
            None => unreachable!("occupied entry points at an empty slot"),
        }
    }
}
