#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod cfg;
mod entry;
mod iter;
mod probe;
mod slot;

#[cfg(any(test, feature = "stats"))]
mod stats;

pub mod cursor;
pub mod error;
pub mod policy;
pub mod scale;

/// A growable, closure-driven open-addressing table.
///
/// This is the engine beneath [`HashMap`] and [`HashSet`]. Callers supply
/// the hash of each entry along with an equality predicate, which makes it
/// usable for entries whose key is derived rather than stored directly.
pub mod hash_table;

/// A growable hash map with MAD-scaled linear probing.
///
/// Keys are hashed once with a pluggable `BuildHasher`; the resulting hash
/// and the pair are stored together in a [`HashTable`].
pub mod hash_map;

/// A growable hash set with MAD-scaled linear probing.
pub mod hash_set;

/// A fixed-capacity table whose slots live inline.
pub mod bounded_table;

/// A fixed-capacity hash map sized by a const generic.
pub mod bounded_hash_map;

/// A fixed-capacity hash set sized by a const generic.
pub mod bounded_hash_set;

pub use bounded_hash_map::BoundedHashMap;
pub use bounded_hash_set::BoundedHashSet;
pub use cursor::Cursor;
pub use error::Error;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use policy::GrowthPolicy;
#[cfg(any(test, feature = "stats"))]
pub use stats::DebugStats;
#[cfg(any(test, feature = "stats"))]
pub use stats::ProbeHistogram;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by [`HashMap`] and [`HashSet`] when none is
        /// given. Randomly seeded per instance.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;

        /// The hasher builder used by the bounded containers when none is
        /// given. Seeded identically in every instance, so iteration order is
        /// reproducible for a given key set and capacity.
        pub type FixedHashBuilder = foldhash::fast::FixedState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by [`HashMap`] and [`HashSet`] when none is
        /// given. Randomly seeded per instance.
        pub type DefaultHashBuilder = std::hash::RandomState;

        /// The hasher builder used by the bounded containers when none is
        /// given. Seeded identically in every instance, so iteration order is
        /// reproducible for a given key set and capacity.
        pub type FixedHashBuilder = core::hash::BuildHasherDefault<std::hash::DefaultHasher>;
    } else {
        /// Placeholder used when no hasher feature is enabled. It cannot be
        /// constructed; pass a hasher builder through `with_hasher` instead.
        #[derive(Clone, Copy, Debug)]
        pub enum DefaultHashBuilder {}

        /// Placeholder used when no hasher feature is enabled. It cannot be
        /// constructed; pass a hasher builder through `with_hasher` instead.
        pub type FixedHashBuilder = DefaultHashBuilder;

        /// The hasher produced by the placeholder builder. It cannot be
        /// constructed.
        #[derive(Clone, Copy, Debug)]
        pub enum UnavailableHasher {}

        impl core::hash::BuildHasher for DefaultHashBuilder {
            type Hasher = UnavailableHasher;

            fn build_hasher(&self) -> Self::Hasher {
                match *self {}
            }
        }

        impl core::hash::Hasher for UnavailableHasher {
            fn finish(&self) -> u64 {
                match *self {}
            }

            fn write(&mut self, _bytes: &[u8]) {
                match *self {}
            }
        }
    }
}
