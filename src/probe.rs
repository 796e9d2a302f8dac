use crate::scale::scale;
use crate::slot::Slot;

/// Outcome of a linear probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// An occupied slot holding the target.
    Found(usize),
    /// The first empty slot on the probe path. The target is absent and this
    /// is where it belongs.
    Vacant(usize),
    /// Every slot was visited without finding the target or an empty slot.
    Full,
}

/// Scans forward from the scaled home index of `hash`, wrapping at the end,
/// until it finds the target or the first empty slot.
///
/// A slot is the target when its stored hash equals `hash` and `eq` accepts
/// its entry. At most `slots.len()` slots are visited.
#[inline]
pub(crate) fn probe<T>(slots: &[Slot<T>], hash: u64, eq: impl Fn(&T) -> bool) -> Probe {
    let capacity = slots.len();
    if capacity == 0 {
        return Probe::Full;
    }

    let start = scale(hash, capacity);
    let (tail, head) = slots.split_at(start);
    for (index, slot) in head
        .iter()
        .enumerate()
        .map(|(offset, slot)| (start + offset, slot))
        .chain(tail.iter().enumerate())
    {
        match slot {
            Slot::Empty => return Probe::Vacant(index),
            Slot::Occupied { hash: stored, item } if *stored == hash && eq(item) => {
                return Probe::Found(index);
            }
            Slot::Occupied { .. } => {}
        }
    }

    Probe::Full
}

/// Scans forward from the scaled home index of `hash` for the first empty
/// slot.
#[inline]
pub(crate) fn find_vacant<T>(slots: &[Slot<T>], hash: u64) -> Option<usize> {
    let capacity = slots.len();
    if capacity == 0 {
        return None;
    }

    let start = scale(hash, capacity);
    (start..capacity)
        .chain(0..start)
        .find(|&index| !slots[index].is_occupied())
}

/// Places an entry that is known to be absent, returning its index.
///
/// Used when rebuilding a table, where no two entries compare equal and the
/// equality check can be skipped.
#[inline]
pub(crate) fn place<T>(slots: &mut [Slot<T>], hash: u64, item: T) -> Result<usize, T> {
    match find_vacant(slots, hash) {
        Some(index) => {
            slots[index] = Slot::Occupied { hash, item };
            Ok(index)
        }
        None => Err(item),
    }
}

/// Removes the entry at `index` and closes the gap it leaves behind.
///
/// Entries further along the same cluster are shifted back into the hole
/// whenever the hole lies on their probe path, so every remaining entry stays
/// reachable from its home index without tombstones.
pub(crate) fn vacate<T>(slots: &mut [Slot<T>], index: usize) -> Option<(u64, T)> {
    let removed = slots[index].take()?;
    let capacity = slots.len();

    let mut hole = index;
    let mut next = (index + 1) % capacity;
    while let Some(hash) = slots[next].hash() {
        let home = scale(hash, capacity);
        if !cyclically_within(home, hole, next) {
            slots.swap(hole, next);
            hole = next;
        }
        next = (next + 1) % capacity;
    }

    Some(removed)
}

/// Whether `index` lies in the half-open ring interval `(after, through]`.
#[inline(always)]
fn cyclically_within(index: usize, after: usize, through: usize) -> bool {
    if after <= through {
        after < index && index <= through
    } else {
        after < index || index <= through
    }
}
