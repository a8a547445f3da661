//! Adaptive power-series summation.
//!
//! The centre of this module is [`SeriesEngine`], which evaluates one
//! Taylor-like series to a caller-specified number of significant digits.
//! A concrete series is described by a [`SeriesDefinition`]: a recurrence
//! over the exact rational term factors plus a constructor for the power
//! sequence of the input value. The engine owns an append-only cache of the
//! factors the recurrence has produced so far, so repeated evaluations (at
//! the same or at a different precision) never re-derive them.
//!
//! # Invariants
//!
//! * Cached factors are exact rationals, deterministic and independent of
//!   the requested precision; the cache only ever changes latency, never a
//!   numeric result.
//! * The cache grows in strict index order and never shrinks; most factor
//!   recurrences derive each factor from the previous state, so out-of-order
//!   extension would corrupt them.
//! * One evaluation per engine instance runs at a time: the whole call holds
//!   the cache lock (see [`SeriesEngine::calculate`]).

mod engine;
mod powers;

pub use engine::{FactorRecurrence, SeriesDefinition, SeriesEngine};
pub use powers::{AllPowers, EvenPowers, OddPowers, PowerSequence};

#[cfg(test)]
mod tests;
