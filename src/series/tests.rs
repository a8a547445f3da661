use core::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::{AllPowers, FactorRecurrence, SeriesDefinition, SeriesEngine};
use crate::decimal::{Decimal, DecimalContext};

/// Reciprocal factorials `1/i!`, the exponential series factors.
struct ReciprocalFactorials {
    factorial: BigInt,
    index: u64,
}

impl FactorRecurrence for ReciprocalFactorials {
    fn current(&self) -> BigRational {
        BigRational::new(BigInt::one(), self.factorial.clone())
    }

    fn advance(&mut self) {
        self.index += 1;
        self.factorial *= BigInt::from(self.index);
    }
}

struct ExponentialSeries;

impl SeriesDefinition for ExponentialSeries {
    type Factors = ReciprocalFactorials;
    type Powers = AllPowers;

    fn factor_recurrence(&self) -> Self::Factors {
        ReciprocalFactorials {
            factorial: BigInt::one(),
            index: 0,
        }
    }

    fn power_sequence(&self, x: &Decimal, ctx: &DecimalContext) -> Self::Powers {
        AllPowers::new(x, ctx)
    }
}

#[test]
fn exponential_series_at_one_ok() {
    let engine = SeriesEngine::new(ExponentialSeries);
    let ctx = DecimalContext::new(20);
    let result = engine
        .calculate(&Decimal::one(), &ctx)
        .expect("series converges");
    let euler = Decimal::from_str("2.7182818284590452354").expect("reference literal");
    assert_eq!(result, euler);
}

#[test]
fn factor_cache_grows_in_order_ok() {
    let engine = SeriesEngine::new(ExponentialSeries);
    assert_eq!(engine.cached_factors(), 0);

    let ctx = DecimalContext::new(10);
    engine
        .calculate(&Decimal::one(), &ctx)
        .expect("series converges");
    let after_first = engine.cached_factors();
    assert!(after_first > 0);

    // a repeated call at the same precision needs no new factors
    engine
        .calculate(&Decimal::one(), &ctx)
        .expect("series converges");
    assert_eq!(engine.cached_factors(), after_first);

    // a higher precision extends the cache instead of rebuilding it
    let wide = DecimalContext::new(40);
    engine
        .calculate(&Decimal::one(), &wide)
        .expect("series converges");
    assert!(engine.cached_factors() > after_first);
}

#[test]
fn warm_cache_result_matches_cold_ok() {
    let x = Decimal::from_str("0.37").expect("test literal");
    let ctx = DecimalContext::new(25);

    let cold = SeriesEngine::new(ExponentialSeries);
    let cold_result = cold.calculate(&x, &ctx).expect("series converges");

    let warm = SeriesEngine::new(ExponentialSeries);
    for precision in [5u32, 12, 60] {
        warm.calculate(&x, &DecimalContext::new(precision))
            .expect("series converges");
    }
    let warm_result = warm.calculate(&x, &ctx).expect("series converges");

    assert_eq!(cold_result, warm_result);
}
