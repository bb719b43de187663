//! Growth policy configuration.

use dynarr_core::ConfigError;

/// Rule for choosing a new capacity when an append finds the array full.
///
/// Validated at construction; immutable afterwards. The default doubles
/// capacity starting from one slot, which keeps append amortized O(1) and
/// bounds the number of reallocations for `n` appends by `O(log n)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GrowthPolicy {
    factor: usize,
    min_capacity: usize,
}

impl GrowthPolicy {
    /// Default multiplicative growth factor.
    pub const DEFAULT_FACTOR: usize = 2;

    /// Default capacity of the first allocation.
    pub const DEFAULT_MIN_CAPACITY: usize = 1;

    /// The default doubling policy: `max(1, capacity * 2)`.
    pub const DOUBLING: Self = Self {
        factor: Self::DEFAULT_FACTOR,
        min_capacity: Self::DEFAULT_MIN_CAPACITY,
    };

    /// Create a policy growing by `factor`, never allocating fewer than
    /// `min_capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `factor < 2` or `min_capacity == 0`.
    pub fn new(factor: usize, min_capacity: usize) -> Result<Self, ConfigError> {
        if factor < 2 {
            return Err(ConfigError::FactorTooSmall { factor });
        }
        if min_capacity == 0 {
            return Err(ConfigError::ZeroMinimumCapacity);
        }
        Ok(Self {
            factor,
            min_capacity,
        })
    }

    /// Multiplicative growth factor.
    pub fn factor(&self) -> usize {
        self.factor
    }

    /// Capacity of the first allocation.
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Capacity to grow to from `current` so that at least `required` slots
    /// fit.
    ///
    /// Saturates at `usize::MAX`; the allocation layer rejects anything that
    /// does not fit in `isize::MAX` bytes.
    pub fn next_capacity(&self, current: usize, required: usize) -> usize {
        current
            .saturating_mul(self.factor)
            .max(self.min_capacity)
            .max(required)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::DOUBLING
    }
}
