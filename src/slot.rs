/// A single cell of an open-addressing table.
///
/// The empty state is its own variant, so every 64-bit value (including 0)
/// is a valid hash and an empty cell never holds stale key or value data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<T> {
    /// Nothing is stored here. Probes stop at the first empty slot.
    Empty,
    /// A live entry together with the full hash it was inserted under.
    Occupied {
        /// The unscaled hash of the entry's key.
        hash: u64,
        /// The stored entry.
        item: T,
    },
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<T> Slot<T> {
    #[inline(always)]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    #[inline(always)]
    pub(crate) fn hash(&self) -> Option<u64> {
        match self {
            Slot::Occupied { hash, .. } => Some(*hash),
            Slot::Empty => None,
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self) -> Option<&T> {
        match self {
            Slot::Occupied { item, .. } => Some(item),
            Slot::Empty => None,
        }
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied { item, .. } => Some(item),
            Slot::Empty => None,
        }
    }

    /// Empties the slot, returning the hash and entry that lived here.
    #[inline(always)]
    pub(crate) fn take(&mut self) -> Option<(u64, T)> {
        match core::mem::take(self) {
            Slot::Occupied { hash, item } => Some((hash, item)),
            Slot::Empty => None,
        }
    }

    #[inline(always)]
    pub(crate) fn into_item(self) -> Option<T> {
        match self {
            Slot::Occupied { item, .. } => Some(item),
            Slot::Empty => None,
        }
    }
}

/// Allocates `capacity` empty slots.
pub(crate) fn empty_slots<T>(capacity: usize) -> alloc::vec::Vec<Slot<T>> {
    let mut slots = alloc::vec::Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}
