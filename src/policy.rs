//! Load-factor and growth tuning for growable tables.
//!
//! The default maximum load is selected at compile time through cargo
//! features, in order of precedence:
//!
//! - `load-factor-fifty`: grow once more than 50% of the slots are occupied.
//! - `load-factor-eighty-five`: grow once more than 85% are occupied.
//! - `load-factor-seventy` (default): grow once more than 70% are occupied.
//!
//! Neither the threshold nor the growth ratio is load-bearing for
//! correctness; they only trade memory for probe length. Use
//! [`GrowthPolicy::new`] to pick values at runtime.

cfg_if::cfg_if! {
    if #[cfg(feature = "load-factor-fifty")] {
        /// Default occupancy percentage above which a growable table grows.
        pub const DEFAULT_MAX_LOAD_PERCENT: usize = 50;
    } else if #[cfg(feature = "load-factor-eighty-five")] {
        /// Default occupancy percentage above which a growable table grows.
        pub const DEFAULT_MAX_LOAD_PERCENT: usize = 85;
    } else {
        /// Default occupancy percentage above which a growable table grows.
        pub const DEFAULT_MAX_LOAD_PERCENT: usize = 70;
    }
}

/// Default factor by which a growable table multiplies its capacity.
pub const DEFAULT_GROWTH_RATIO: f64 = 2.0;

/// Number of slots a growable table starts with.
pub const INITIAL_CAPACITY: usize = 7;

/// When and by how much a growable table grows.
///
/// Before every find-or-create operation the table checks
/// `len * 100 / capacity > max_load_percent` and, if it holds, rehashes into
/// a table of `max(capacity + 1, floor(capacity * growth_ratio))` slots.
///
/// # Examples
///
/// ```rust
/// use mad_hash::GrowthPolicy;
///
/// let policy = GrowthPolicy::new(50, 1.5);
/// assert_eq!(policy.grown_capacity(10), 15);
/// assert_eq!(policy.grown_capacity(1), 2);
/// assert_eq!(policy.grown_capacity(0), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthPolicy {
    max_load_percent: usize,
    growth_ratio: f64,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            max_load_percent: DEFAULT_MAX_LOAD_PERCENT,
            growth_ratio: DEFAULT_GROWTH_RATIO,
        }
    }
}

impl GrowthPolicy {
    /// Creates a policy.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < max_load_percent < 100` and `growth_ratio > 1.0`.
    /// A table allowed to fill every slot could no longer report a miss
    /// without scanning all of it, and a ratio of at most one would never
    /// make room.
    pub fn new(max_load_percent: usize, growth_ratio: f64) -> Self {
        assert!(
            max_load_percent > 0 && max_load_percent < 100,
            "max load must be between 1 and 99 percent, got {max_load_percent}"
        );
        assert!(
            growth_ratio > 1.0,
            "growth ratio must be greater than 1, got {growth_ratio}"
        );

        Self {
            max_load_percent,
            growth_ratio,
        }
    }

    /// The occupancy percentage above which the table grows.
    pub fn max_load_percent(&self) -> usize {
        self.max_load_percent
    }

    /// The factor by which the capacity is multiplied on growth.
    pub fn growth_ratio(&self) -> f64 {
        self.growth_ratio
    }

    /// Whether a table with `len` entries in `capacity` slots must grow
    /// before the next insertion.
    #[inline]
    pub fn needs_growth(&self, len: usize, capacity: usize) -> bool {
        capacity == 0 || len.saturating_mul(100) / capacity > self.max_load_percent
    }

    /// The capacity to grow to from `capacity`.
    pub fn grown_capacity(&self, capacity: usize) -> usize {
        if capacity == 0 {
            return INITIAL_CAPACITY;
        }

        let scaled = (capacity as f64 * self.growth_ratio) as usize;
        scaled.max(capacity + 1)
    }

    /// The smallest capacity that holds `len` entries without exceeding the
    /// load threshold.
    pub fn capacity_for(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }

        // floor(len * 100 / c) <= p  <=>  c > len * 100 / (p + 1)
        len.saturating_mul(100) / (self.max_load_percent + 1) + 1
    }
}
