//! Arbitrary-precision decimal arithmetic substrate.
//!
//! [`Decimal`] stores an unscaled [`num_bigint::BigInt`] together with a
//! power-of-ten scale, so every finite decimal fraction is represented
//! exactly. Addition, subtraction and multiplication are exact; division and
//! significant-digit rounding are bounded by a [`DecimalContext`], which
//! pairs a significant-digit budget with a [`RoundingMode`].
//!
//! The representation keeps trailing zeros: `1.20` and `1.2` are numerically
//! equal (and compare equal) but carry different scales. Rounding a value
//! whose digit count is already within the context budget returns it
//! unchanged.

mod context;
mod value;

pub use context::{DecimalContext, RoundingMode};
pub use value::{Decimal, ParseDecimalError};

#[cfg(test)]
mod tests;
