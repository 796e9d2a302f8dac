use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::cfg::trace;
use crate::cursor::Cursor;
use crate::entry::Entry;
use crate::entry::OccupiedEntry;
use crate::entry::VacantEntry;
use crate::error::Error;
use crate::iter::Iter;
use crate::iter::IterMut;
use crate::probe::Probe;
use crate::probe::probe;
use crate::probe::vacate;
use crate::slot::Slot;
#[cfg(any(test, feature = "stats"))]
use crate::stats::DebugStats;
#[cfg(any(test, feature = "stats"))]
use crate::stats::ProbeHistogram;

/// An open-addressing table with exactly `N` inline slots.
///
/// The table never grows. Lookups and inserts probe the same way as
/// [`HashTable`](crate::HashTable), so a table holding `N` entries still
/// answers every lookup correctly; a miss on a full table simply scans all
/// `N` slots.
///
/// Inserting a new entry into a full table through [`entry`](Self::entry)
/// is a fatal error: capacity is expected to be chosen up front for a known
/// key set. [`try_entry`](Self::try_entry) reports
/// [`Error::CapacityExceeded`] instead.
///
/// # Examples
///
/// ```rust
/// use mad_hash::bounded_table::BoundedTable;
///
/// let mut table: BoundedTable<u32, 3> = BoundedTable::new();
/// for n in 0..3u32 {
///     table.entry(n as u64, |&v| v == n).or_insert(n);
/// }
/// assert!(table.is_full());
/// assert_eq!(table.find(2, |&v| v == 2), Some(&2));
/// assert!(table.try_entry(9, |&v| v == 9).is_err());
/// ```
#[derive(Clone)]
pub struct BoundedTable<T, const N: usize> {
    slots: [Slot<T>; N],
    populated: usize,
}

impl<T, const N: usize> Debug for BoundedTable<T, N>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BoundedTable")
            .field("populated", &self.populated)
            .field("capacity", &N)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<T, const N: usize> Default for BoundedTable<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BoundedTable<T, N> {
    /// Creates an empty table.
    pub const fn new() -> Self {
        Self {
            slots: [const { Slot::Empty }; N],
            populated: 0,
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

    /// Returns `true` if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.populated == N
    }

    /// Returns the number of slots, `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Looks up the entry for `hash` and `eq`.
    ///
    /// # Panics
    ///
    /// Panics if no entry matches and the table is full.
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Entry<'_, T> {
        match self.try_entry(hash, eq) {
            Ok(entry) => entry,
            Err(err) => {
                trace!(capacity = N, "insert into full bounded table");
                panic!("{err}");
            }
        }
    }

    /// Looks up the entry for `hash` and `eq`, reporting
    /// [`Error::CapacityExceeded`] if no entry matches and the table is full.
    pub fn try_entry(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Result<Entry<'_, T>, Error> {
        match probe(&self.slots, hash, eq) {
            Probe::Found(index) => Ok(Entry::Occupied(OccupiedEntry {
                slots: &mut self.slots,
                populated: &mut self.populated,
                index,
            })),
            Probe::Vacant(index) => Ok(Entry::Vacant(VacantEntry {
                slots: &mut self.slots,
                populated: &mut self.populated,
                index,
                hash,
            })),
            Probe::Full => Err(Error::CapacityExceeded { capacity: N }),
        }
    }

    /// Returns a reference to the value matching `hash` and `eq`.
    pub fn find(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        match probe(&self.slots, hash, eq) {
            Probe::Found(index) => self.slots[index].get(),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns a mutable reference to the value matching `hash` and `eq`.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&mut T> {
        match probe(&self.slots, hash, eq) {
            Probe::Found(index) => self.slots[index].get_mut(),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns a cursor at the value matching `hash` and `eq`, or at the end
    /// position if there is none.
    pub fn cursor(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Cursor<'_, T> {
        match probe(&self.slots, hash, eq) {
            Probe::Found(index) => Cursor::at(&self.slots, index),
            Probe::Vacant(_) | Probe::Full => Cursor::end(&self.slots),
        }
    }

    /// Returns a cursor at the first occupied slot.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::front(&self.slots)
    }

    /// Returns a cursor at the end position.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::end(&self.slots)
    }

    /// Removes and returns the value matching `hash` and `eq`.
    ///
    /// The removed value is dropped out of its slot immediately and later
    /// entries of the same probe run shift back to close the gap.
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<T> {
        match probe(&self.slots, hash, eq) {
            Probe::Found(index) => {
                self.populated -= 1;
                vacate(&mut self.slots, index).map(|(_, value)| value)
            }
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.slots.fill_with(Slot::default);
        self.populated = 0;
    }

    /// Returns an iterator over the entries in physical slot order.
    ///
    /// The order depends only on the hashes of the entries and `N`, so it is
    /// reproducible for a deterministic hasher.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.slots, self.populated)
    }

    /// Returns a mutable iterator over the entries in physical slot order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.slots, self.populated)
    }

    /// Returns occupancy and probe-length statistics for the table.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        DebugStats::collect(&self.slots, self.populated)
    }

    /// Computes a histogram of how far entries sit from their home slots.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        ProbeHistogram::collect(&self.slots)
    }
}

impl<T, const N: usize> IntoIterator for BoundedTable<T, N> {
    type IntoIter = IntoIter<T, N>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_iter(),
            remaining: self.populated,
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedTable<T, N> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator over the entries of a [`BoundedTable`].
pub struct IntoIter<T, const N: usize> {
    slots: core::array::IntoIter<Slot<T>, N>,
    remaining: usize,
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots.by_ref().find_map(Slot::into_item)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}
