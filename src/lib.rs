#![forbid(unsafe_code)]

//! Core library entry point for the `bigdec-math` crate.
//!
//! The crate supplies high-precision transcendental and algebraic functions
//! over an arbitrary-precision decimal type. The heart of the library is the
//! adaptive series summation engine in [`series`], which evaluates a
//! Taylor-like series to a caller-specified number of significant digits and
//! caches the exact rational term factors across calls. The modules layered
//! on top of it are numeric policies:
//!
//! * [`decimal`]: the arbitrary-precision [`Decimal`] value type together
//!   with the [`DecimalContext`] precision/rounding parameter.
//! * [`functions`]: exp, logarithms, trigonometric functions, roots and
//!   powers, each combining argument reduction with a series evaluation or a
//!   Newton iteration.
//! * [`constants`]: process-wide caches for ln 2, ln 3, ln 10, π and e.

pub mod constants;
pub mod decimal;
pub mod functions;
pub mod series;

use core::fmt;

pub use constants::{e, pi};
pub use decimal::{Decimal, DecimalContext, ParseDecimalError, RoundingMode};
pub use functions::{cos, exp, ln, log10, log2, pow, root, sin, sqrt};

/// Result type used throughout the library to surface arithmetic failures.
pub type MathResult<T> = core::result::Result<T, MathError>;

/// Error enumeration for decimal arithmetic failures.
///
/// Every failure is reported to the immediate caller; the library performs
/// no retries and no partial-result recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// A quotient was requested with an exactly-zero divisor.
    DivisionByZero,
    /// The logarithm of zero or of a negative value was requested.
    LogarithmOfNonPositive,
    /// An even-degree root of a negative value was requested.
    RootOfNegative {
        /// Degree of the offending root.
        degree: u32,
    },
    /// A zeroth root has no defined value.
    ZeroRootDegree,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DivisionByZero => write!(f, "division by zero"),
            MathError::LogarithmOfNonPositive => {
                write!(f, "logarithm of a non-positive argument")
            }
            MathError::RootOfNegative { degree } => {
                write!(f, "root of degree {} of a negative argument", degree)
            }
            MathError::ZeroRootDegree => write!(f, "root of degree zero"),
        }
    }
}

impl std::error::Error for MathError {}
