//! Probe-length and occupancy statistics.
//!
//! Compiled for tests and with the `stats` feature.

use alloc::vec::Vec;

use crate::scale::scale;
use crate::slot::Slot;

/// Occupancy and memory statistics for a table.
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub populated: usize,
    /// Total number of slots
    pub capacity: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Longest distance of any entry from its home slot
    pub max_probe_length: usize,
    /// Mean distance of entries from their home slot
    pub mean_probe_length: f64,
    /// Longest run of consecutive occupied slots, counting across the wrap
    pub longest_cluster: usize,
    /// Total memory in bytes used by the slots
    pub total_bytes: usize,
    /// Memory in bytes held by empty slots
    pub wasted_bytes: usize,
}

impl DebugStats {
    pub(crate) fn collect<T>(slots: &[Slot<T>], populated: usize) -> Self {
        let capacity = slots.len();
        let distances: Vec<usize> = probe_lengths(slots).collect();
        let slot_size = core::mem::size_of::<Slot<T>>();

        DebugStats {
            populated,
            capacity,
            load_factor: if capacity == 0 {
                0.0
            } else {
                populated as f64 / capacity as f64
            },
            max_probe_length: distances.iter().copied().max().unwrap_or(0),
            mean_probe_length: if distances.is_empty() {
                0.0
            } else {
                distances.iter().sum::<usize>() as f64 / distances.len() as f64
            },
            longest_cluster: longest_cluster(slots),
            total_bytes: capacity * slot_size,
            wasted_bytes: (capacity - populated) * slot_size,
        }
    }

    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Probe length: max {}, mean {:.2}",
            self.max_probe_length, self.mean_probe_length
        );
        println!("Longest cluster: {} slots", self.longest_cluster);
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Memory: {} bytes wasted ({:.02}%)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

/// Histogram of probe lengths.
///
/// Bin `n` counts the entries stored `n` slots past their home slot on the
/// forward scan, so bin 0 holds entries that sit exactly where their hash
/// scales to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    /// Entry counts indexed by probe length.
    pub bins: Vec<usize>,
}

impl ProbeHistogram {
    pub(crate) fn collect<T>(slots: &[Slot<T>]) -> Self {
        let mut bins = Vec::new();
        for distance in probe_lengths(slots) {
            if bins.len() <= distance {
                bins.resize(distance + 1, 0);
            }
            bins[distance] += 1;
        }
        ProbeHistogram { bins }
    }

    /// Total number of entries counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.bins.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let full = units / 8;
            let rem = units % 8;
            let mut bar = "█".repeat(full);
            if rem > 0 {
                let ch = match rem {
                    1 => '▏',
                    2 => '▎',
                    3 => '▍',
                    4 => '▌',
                    5 => '▋',
                    6 => '▊',
                    7 => '▉',
                    _ => unreachable!(),
                };
                bar.push(ch);
            }
            bar
        };

        for (length, &count) in self.bins.iter().enumerate() {
            println!("{:>4} | {} ({})", length, make_bar(count), count);
        }
    }
}

/// Forward distance from `home` to `index` on a ring of `capacity` slots.
fn wrapped_distance(home: usize, index: usize, capacity: usize) -> usize {
    if index >= home {
        index - home
    } else {
        capacity - home + index
    }
}

fn probe_lengths<T>(slots: &[Slot<T>]) -> impl Iterator<Item = usize> + '_ {
    let capacity = slots.len();
    slots.iter().enumerate().filter_map(move |(index, slot)| {
        let hash = slot.hash()?;
        Some(wrapped_distance(scale(hash, capacity), index, capacity))
    })
}

fn longest_cluster<T>(slots: &[Slot<T>]) -> usize {
    if slots.iter().all(Slot::is_occupied) {
        return slots.len();
    }

    // Start just after an empty slot so clusters spanning the wrap are
    // counted in one piece.
    let Some(empty) = slots.iter().position(|slot| !slot.is_occupied()) else {
        return slots.len();
    };

    let mut longest = 0;
    let mut run = 0;
    for offset in 1..=slots.len() {
        if slots[(empty + offset) % slots.len()].is_occupied() {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}
