use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use crate::constants;
use crate::decimal::{Decimal, DecimalContext};
use crate::series::{EvenPowers, FactorRecurrence, OddPowers, SeriesDefinition, SeriesEngine};
use crate::MathResult;

const GUARD_DIGITS: u32 = 6;

/// Alternating reciprocal odd factorials `±1/(2i+1)!`, the sine series.
struct SinFactors {
    factorial: BigInt,
    index: u64,
    negative: bool,
}

impl FactorRecurrence for SinFactors {
    fn current(&self) -> BigRational {
        let numerator = if self.negative {
            -BigInt::one()
        } else {
            BigInt::one()
        };
        BigRational::new(numerator, self.factorial.clone())
    }

    fn advance(&mut self) {
        self.index += 1;
        let n = self.index;
        self.factorial *= BigInt::from(2 * n) * BigInt::from(2 * n + 1);
        self.negative = !self.negative;
    }
}

struct SinSeries;

impl SeriesDefinition for SinSeries {
    type Factors = SinFactors;
    type Powers = OddPowers;

    fn factor_recurrence(&self) -> Self::Factors {
        SinFactors {
            factorial: BigInt::one(),
            index: 0,
            negative: false,
        }
    }

    fn power_sequence(&self, x: &Decimal, ctx: &DecimalContext) -> Self::Powers {
        OddPowers::new(x, ctx)
    }

    fn evaluates_in_pairs(&self) -> bool {
        true
    }
}

/// Alternating reciprocal even factorials `±1/(2i)!`, the cosine series.
struct CosFactors {
    factorial: BigInt,
    index: u64,
    negative: bool,
}

impl FactorRecurrence for CosFactors {
    fn current(&self) -> BigRational {
        let numerator = if self.negative {
            -BigInt::one()
        } else {
            BigInt::one()
        };
        BigRational::new(numerator, self.factorial.clone())
    }

    fn advance(&mut self) {
        self.index += 1;
        let n = self.index;
        self.factorial *= BigInt::from(2 * n - 1) * BigInt::from(2 * n);
        self.negative = !self.negative;
    }
}

struct CosSeries;

impl SeriesDefinition for CosSeries {
    type Factors = CosFactors;
    type Powers = EvenPowers;

    fn factor_recurrence(&self) -> Self::Factors {
        CosFactors {
            factorial: BigInt::one(),
            index: 0,
            negative: false,
        }
    }

    fn power_sequence(&self, x: &Decimal, ctx: &DecimalContext) -> Self::Powers {
        EvenPowers::new(x, ctx)
    }

    fn evaluates_in_pairs(&self) -> bool {
        true
    }
}

static SIN_ENGINE: OnceLock<SeriesEngine<SinSeries>> = OnceLock::new();
static COS_ENGINE: OnceLock<SeriesEngine<CosSeries>> = OnceLock::new();

fn sin_engine() -> &'static SeriesEngine<SinSeries> {
    SIN_ENGINE.get_or_init(|| SeriesEngine::new(SinSeries))
}

fn cos_engine() -> &'static SeriesEngine<CosSeries> {
    COS_ENGINE.get_or_init(|| SeriesEngine::new(CosSeries))
}

/// Sine. The argument is reduced modulo 2π before the series runs; the
/// reduction widens the working precision by the argument's integer-digit
/// count to absorb the cancellation.
pub fn sin(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    let work = reduction_context(x, ctx);
    let reduced = reduce_two_pi(x, &work)?;
    Ok(sin_engine().calculate(&reduced, &work)?.round(ctx))
}

/// Cosine, reduced the same way as [`sin`].
pub fn cos(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    let work = reduction_context(x, ctx);
    let reduced = reduce_two_pi(x, &work)?;
    Ok(cos_engine().calculate(&reduced, &work)?.round(ctx))
}

fn reduction_context(x: &Decimal, ctx: &DecimalContext) -> DecimalContext {
    let magnitude = x.scientific_exponent().max(0) as u32;
    ctx.with_guard_digits(GUARD_DIGITS + magnitude)
}

fn reduce_two_pi(x: &Decimal, work: &DecimalContext) -> MathResult<Decimal> {
    let two_pi = constants::pi(&work.with_guard_digits(2))?.double();
    if x.abs() < two_pi {
        return Ok(x.clone());
    }
    let turns = x.div(&two_pi, work)?.trunc();
    Ok(x.sub(&turns.mul(&two_pi)))
}
