//! High-level math functions layered on the series engine.
//!
//! Each function is a numeric policy: it selects guard digits, reduces its
//! argument into the range where its series (or Newton iteration) converges
//! quickly, delegates the summation to [`crate::series::SeriesEngine`], and
//! rounds back to the caller's context. The engines live in process-wide
//! statics so their factor caches persist across calls.

mod exp;
mod log;
mod pow;
mod root;
mod trig;

pub use exp::exp;
pub use log::{ln, log10, log2};
pub use pow::pow;
pub use root::{root, sqrt};
pub use trig::{cos, sin};

pub(crate) use log::atanh_engine;
