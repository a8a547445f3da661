use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use crate::constants;
use crate::decimal::{Decimal, DecimalContext};
use crate::series::{FactorRecurrence, OddPowers, SeriesDefinition, SeriesEngine};
use crate::{MathError, MathResult};

const GUARD_DIGITS: u32 = 8;

/// Odd reciprocal factors `1/(2i+1)` of the area hyperbolic tangent series.
pub(crate) struct AtanhFactors {
    index: u64,
}

impl FactorRecurrence for AtanhFactors {
    fn current(&self) -> BigRational {
        BigRational::new(BigInt::one(), BigInt::from(2 * self.index + 1))
    }

    fn advance(&mut self) {
        self.index += 1;
    }
}

/// `atanh(z) = z + z³/3 + z⁵/5 + …`; all terms share the sign of `z`.
pub(crate) struct AtanhSeries;

impl SeriesDefinition for AtanhSeries {
    type Factors = AtanhFactors;
    type Powers = OddPowers;

    fn factor_recurrence(&self) -> Self::Factors {
        AtanhFactors { index: 0 }
    }

    fn power_sequence(&self, x: &Decimal, ctx: &DecimalContext) -> Self::Powers {
        OddPowers::new(x, ctx)
    }
}

static ATANH_ENGINE: OnceLock<SeriesEngine<AtanhSeries>> = OnceLock::new();

pub(crate) fn atanh_engine() -> &'static SeriesEngine<AtanhSeries> {
    ATANH_ENGINE.get_or_init(|| SeriesEngine::new(AtanhSeries))
}

/// Natural logarithm.
///
/// Arguments in `[0.75, 1.5)` feed the area hyperbolic tangent series
/// directly. Smaller arguments evaluate as `−ln(1/x)`, whose reciprocal
/// lands above 4/3 and clear of the cancellation zone near one. Larger
/// arguments split off the power-of-ten exponent (`ln x = ln m + b·ln 10`)
/// and factor the mantissa by the 2·3-smooth table {1,2,3,4,6,8,9} so the
/// series argument also lands in `[0.75, 1.5)`.
pub fn ln(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    if !x.is_positive() {
        return Err(MathError::LogarithmOfNonPositive);
    }
    let work = ctx.with_guard_digits(GUARD_DIGITS);
    Ok(ln_positive(x, &work)?.round(ctx))
}

/// Base-two logarithm, `ln(x) / ln(2)`.
pub fn log2(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    if !x.is_positive() {
        return Err(MathError::LogarithmOfNonPositive);
    }
    let work = ctx.with_guard_digits(4);
    let numerator = ln(x, &work)?;
    Ok(numerator.div(&constants::ln_2(&work)?, &work)?.round(ctx))
}

/// Base-ten logarithm, `ln(x) / ln(10)`.
pub fn log10(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    if !x.is_positive() {
        return Err(MathError::LogarithmOfNonPositive);
    }
    let work = ctx.with_guard_digits(4);
    let numerator = ln(x, &work)?;
    Ok(numerator.div(&constants::ln_10(&work)?, &work)?.round(ctx))
}

fn ln_positive(x: &Decimal, work: &DecimalContext) -> MathResult<Decimal> {
    let one = Decimal::one();
    if *x == one {
        return Ok(Decimal::zero());
    }
    let lower = Decimal::new(BigInt::from(75), 2);
    let upper = Decimal::new(BigInt::from(15), 1);
    if *x >= lower && *x < upper {
        return ln_series(x, work);
    }
    if *x < one {
        let reciprocal = one.div(x, &work.with_guard_digits(2))?;
        return Ok(ln_positive(&reciprocal, work)?.negate());
    }
    let exponent = x.scientific_exponent();
    let mantissa = x.move_point_left(exponent);
    let (factor, twos, threes) = smooth_factor(&mantissa);
    let argument = if factor == 1 {
        mantissa
    } else {
        mantissa.div_bigint(&BigInt::from(factor), &work.with_guard_digits(2))?
    };
    let mut result = ln_series(&argument, work)?;
    if twos != 0 {
        result = result.add(&constants::ln_2(work)?.mul_bigint(&BigInt::from(twos)));
    }
    if threes != 0 {
        result = result.add(&constants::ln_3(work)?.mul_bigint(&BigInt::from(threes)));
    }
    if exponent != 0 {
        result = result.add(&constants::ln_10(work)?.mul_bigint(&BigInt::from(exponent)));
    }
    Ok(result)
}

/// `ln(y) = 2·atanh((y−1)/(y+1))` for y near one.
fn ln_series(x: &Decimal, work: &DecimalContext) -> MathResult<Decimal> {
    let one = Decimal::one();
    let z = x.sub(&one).div(&x.add(&one), work)?;
    Ok(atanh_engine().calculate(&z, work)?.double())
}

/// Picks the largest factor `2^a·3^c` whose bracket contains the mantissa,
/// keeping `mantissa / factor` inside `[0.75, 1.5)`.
fn smooth_factor(mantissa: &Decimal) -> (u32, i64, i64) {
    let brackets: [(i32, i64, u32, i64, i64); 6] = [
        (15, 1, 1, 0, 0),
        (25, 1, 2, 1, 0),
        (35, 1, 3, 0, 1),
        (5, 0, 4, 2, 0),
        (7, 0, 6, 1, 1),
        (85, 1, 8, 3, 0),
    ];
    for (unscaled, scale, factor, twos, threes) in brackets {
        if *mantissa < Decimal::new(BigInt::from(unscaled), scale) {
            return (factor, twos, threes);
        }
    }
    (9, 0, 2)
}
