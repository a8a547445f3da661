use serde::{Deserialize, Serialize};

/// Rounding policy applied when a value is trimmed to a significant-digit
/// budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Discard the excess digits (truncate toward zero).
    Down,
    /// Round to the nearest neighbour; ties move away from zero.
    HalfUp,
    /// Round to the nearest neighbour; ties move to the even neighbour.
    HalfEven,
}

/// Working precision of a calculation: a significant-digit count plus the
/// rounding mode applied when results are trimmed to that count.
///
/// Contexts are small copyable values; policy layers widen them with
/// [`DecimalContext::with_guard_digits`] before intermediate steps and round
/// back to the caller's context at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalContext {
    precision: u32,
    rounding: RoundingMode,
}

impl DecimalContext {
    /// Creates a context with the given significant-digit count and half-up
    /// rounding, the default rounding of the library.
    ///
    /// # Panics
    ///
    /// Panics if `precision` is zero; every calculation needs at least one
    /// significant digit.
    pub fn new(precision: u32) -> Self {
        Self::with_rounding(precision, RoundingMode::HalfUp)
    }

    /// Creates a context with an explicit rounding mode.
    ///
    /// # Panics
    ///
    /// Panics if `precision` is zero.
    pub fn with_rounding(precision: u32, rounding: RoundingMode) -> Self {
        assert!(
            precision >= 1,
            "context precision must be at least one significant digit"
        );
        Self {
            precision,
            rounding,
        }
    }

    /// Significant-digit budget of this context.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Rounding mode of this context.
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Returns a context widened by `extra` guard digits, same rounding.
    pub fn with_guard_digits(&self, extra: u32) -> Self {
        Self {
            precision: self.precision + extra,
            rounding: self.rounding,
        }
    }
}
