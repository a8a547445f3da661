use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use crate::decimal::{Decimal, DecimalContext};
use crate::series::{AllPowers, FactorRecurrence, SeriesDefinition, SeriesEngine};
use crate::MathResult;

const GUARD_DIGITS: u32 = 6;

/// Reciprocal factorial factors `1/i!` of the exponential series.
struct ExpFactors {
    factorial: BigInt,
    index: u64,
}

impl FactorRecurrence for ExpFactors {
    fn current(&self) -> BigRational {
        BigRational::new(BigInt::one(), self.factorial.clone())
    }

    fn advance(&mut self) {
        self.index += 1;
        self.factorial *= BigInt::from(self.index);
    }
}

struct ExpSeries;

impl SeriesDefinition for ExpSeries {
    type Factors = ExpFactors;
    type Powers = AllPowers;

    fn factor_recurrence(&self) -> Self::Factors {
        ExpFactors {
            factorial: BigInt::one(),
            index: 0,
        }
    }

    fn power_sequence(&self, x: &Decimal, ctx: &DecimalContext) -> Self::Powers {
        AllPowers::new(x, ctx)
    }
}

static EXP_ENGINE: OnceLock<SeriesEngine<ExpSeries>> = OnceLock::new();

fn exp_engine() -> &'static SeriesEngine<ExpSeries> {
    EXP_ENGINE.get_or_init(|| SeriesEngine::new(ExpSeries))
}

/// Exponential function.
///
/// Negative arguments evaluate as the reciprocal of `exp(−x)`. Arguments
/// above one are halved (exactly) until the series argument is at most one
/// and the series result is squared back the same number of times, with one
/// extra guard digit per squaring.
pub fn exp(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    if x.is_zero() {
        return Ok(Decimal::one());
    }
    let work = ctx.with_guard_digits(GUARD_DIGITS);
    if x.is_negative() {
        let reciprocal = exp_positive(&x.abs(), &work)?;
        return Ok(Decimal::one().div(&reciprocal, &work)?.round(ctx));
    }
    Ok(exp_positive(x, &work)?.round(ctx))
}

fn exp_positive(x: &Decimal, work: &DecimalContext) -> MathResult<Decimal> {
    let one = Decimal::one();
    let mut reduced = x.clone();
    let mut halvings = 0u32;
    while reduced > one {
        reduced = reduced.half();
        halvings += 1;
    }
    // each squaring roughly doubles the relative error
    let inner = work.with_guard_digits(halvings);
    let mut result = exp_engine().calculate(&reduced, &inner)?;
    for _ in 0..halvings {
        result = result.mul(&result).round(&inner);
    }
    Ok(result.round(work))
}
