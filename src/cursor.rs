//! Bidirectional traversal of the occupied slots of a table.

use crate::slot::Slot;

/// A bidirectional cursor over the occupied slots of a table.
///
/// A cursor either points at an occupied slot or at the end position, which
/// sits one past the last physical slot. Moving forward from the last
/// occupied slot (or backward from the first) lands on the end position, and
/// moving off the end position wraps around to the first (or last) occupied
/// slot, so every movement is defined.
///
/// A cursor borrows its table. Any operation that could move or reallocate
/// slots (inserting, growing, erasing) needs a mutable borrow, so positions
/// can never be observed across such a change.
///
/// # Examples
///
/// ```rust
/// use mad_hash::hash_table::HashTable;
///
/// let mut table = HashTable::new();
/// for n in 0..3u64 {
///     table.entry(n, |&v: &u64| v == n).or_insert(n);
/// }
///
/// let mut cursor = table.cursor_front();
/// let mut seen = Vec::new();
/// while let Some(value) = cursor.get() {
///     seen.push(*value);
///     cursor.move_next();
/// }
/// assert!(cursor.is_end());
/// seen.sort();
/// assert_eq!(seen, [0, 1, 2]);
/// ```
pub struct Cursor<'a, T> {
    slots: &'a [Slot<T>],
    position: usize,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.slots, other.slots) && self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> core::fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("capacity", &self.slots.len())
            .finish()
    }
}

impl<'a, T> Cursor<'a, T> {
    /// A cursor at the first occupied slot, or at the end if there is none.
    pub(crate) fn front(slots: &'a [Slot<T>]) -> Self {
        let mut cursor = Self::end(slots);
        cursor.move_next();
        cursor
    }

    pub(crate) fn end(slots: &'a [Slot<T>]) -> Self {
        Self {
            position: slots.len(),
            slots,
        }
    }

    /// A cursor at `index`, which must be an occupied slot.
    pub(crate) fn at(slots: &'a [Slot<T>], index: usize) -> Self {
        debug_assert!(slots[index].is_occupied());
        Self {
            slots,
            position: index,
        }
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.position == self.slots.len()
    }

    /// The physical slot index the cursor points at, or `None` at the end.
    pub fn index(&self) -> Option<usize> {
        (!self.is_end()).then_some(self.position)
    }

    /// The entry under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&'a T> {
        self.slots.get(self.position).and_then(Slot::get)
    }

    /// The stored hash of the entry under the cursor, or `None` at the end.
    pub fn hash(&self) -> Option<u64> {
        self.slots.get(self.position).and_then(Slot::hash)
    }

    /// Advances to the next occupied slot, or to the end position.
    pub fn move_next(&mut self) {
        let start = if self.is_end() { 0 } else { self.position + 1 };
        self.position = self.slots[start..]
            .iter()
            .position(Slot::is_occupied)
            .map_or(self.slots.len(), |offset| start + offset);
    }

    /// Retreats to the previous occupied slot, or to the end position.
    pub fn move_prev(&mut self) {
        let stop = self.position;
        self.position = self.slots[..stop]
            .iter()
            .rposition(Slot::is_occupied)
            .unwrap_or(self.slots.len());
    }

    /// Returns the entry after the cursor without moving it.
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut next = *self;
        next.move_next();
        next.get()
    }

    /// Returns the entry before the cursor without moving it.
    pub fn peek_prev(&self) -> Option<&'a T> {
        let mut prev = *self;
        prev.move_prev();
        prev.get()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::slot::empty_slots;

    fn sample() -> Vec<Slot<char>> {
        let mut slots = empty_slots(6);
        for (index, item) in [(1, 'a'), (2, 'b'), (4, 'c')] {
            slots[index] = Slot::Occupied {
                hash: index as u64,
                item,
            };
        }
        slots
    }

    #[test]
    fn forward_skips_empty_slots() {
        let slots = sample();
        let mut cursor = Cursor::front(&slots);
        assert_eq!(cursor.index(), Some(1));
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&'b'));
        cursor.move_next();
        assert_eq!(cursor.index(), Some(4));
        cursor.move_next();
        assert!(cursor.is_end());
        assert_eq!(cursor.get(), None);
        assert_eq!(cursor, Cursor::end(&slots));
    }

    #[test]
    fn backward_skips_empty_slots() {
        let slots = sample();
        let mut cursor = Cursor::end(&slots);
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&'c'));
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&'b'));
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&'a'));
        assert_eq!(cursor.hash(), Some(1));
        cursor.move_prev();
        assert!(cursor.is_end());
    }

    #[test]
    fn end_wraps_in_both_directions() {
        let slots = sample();
        let mut cursor = Cursor::end(&slots);
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&'a'));

        let end = Cursor::end(&slots);
        assert_eq!(end.peek_next(), Some(&'a'));
        assert_eq!(end.peek_prev(), Some(&'c'));
    }

    #[test]
    fn peeking_does_not_move() {
        let slots = sample();
        let cursor = Cursor::at(&slots, 2);
        assert_eq!(cursor.peek_prev(), Some(&'a'));
        assert_eq!(cursor.peek_next(), Some(&'c'));
        assert_eq!(cursor.get(), Some(&'b'));
    }

    #[test]
    fn empty_table_is_always_at_end() {
        let slots = empty_slots::<char>(4);
        let mut cursor = Cursor::front(&slots);
        assert!(cursor.is_end());
        cursor.move_prev();
        assert!(cursor.is_end());
        cursor.move_next();
        assert!(cursor.is_end());

        let none: Vec<Slot<char>> = Vec::new();
        let mut cursor = Cursor::front(&none);
        cursor.move_next();
        assert!(cursor.is_end());
    }
}
