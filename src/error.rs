//! The error type shared by all tables.

use thiserror::Error;

/// Recoverable failures reported by table operations.
///
/// Conditions that leave a table in a state that cannot be trusted, such as
/// a growable table that is still full after growing, or overflowing a
/// fixed-capacity table through a non-`try_` method, are panics instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A non-creating lookup did not find the key.
    #[error("key does not exist in the table")]
    KeyNotFound,
    /// A fixed-capacity table has no free slot for a new key.
    #[error("table is full: all {capacity} slots are occupied")]
    CapacityExceeded {
        /// The fixed number of slots of the table.
        capacity: usize,
    },
}
