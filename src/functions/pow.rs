use crate::decimal::{Decimal, DecimalContext};
use crate::{MathError, MathResult};

use super::exp::exp;
use super::log::ln;

const GUARD_DIGITS: u32 = 6;

/// Raises `x` to the power `y`.
///
/// Integral exponents within `i64` range use binary exponentiation and
/// accept any base, negative exponents included (as the reciprocal).
/// Fractional exponents evaluate as `exp(y·ln x)`; the domain error for a
/// non-positive base surfaces from the logarithm.
pub fn pow(x: &Decimal, y: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    let work = ctx.with_guard_digits(GUARD_DIGITS);
    if x.is_zero() {
        if y.is_zero() {
            return Ok(Decimal::one());
        }
        if y.is_negative() {
            return Err(MathError::DivisionByZero);
        }
        return Ok(Decimal::zero());
    }
    if let Some(exponent) = y.to_i64() {
        return Ok(powi(x, exponent, &work)?.round(ctx));
    }
    let ln_x = ln(x, &work)?;
    Ok(exp(&y.mul(&ln_x), &work)?.round(ctx))
}

/// Integer power by binary exponentiation, rounding at the working
/// precision after every multiplication.
pub(crate) fn powi(x: &Decimal, exponent: i64, work: &DecimalContext) -> MathResult<Decimal> {
    if exponent == 0 {
        return Ok(Decimal::one());
    }
    let mut remaining = exponent.unsigned_abs();
    let mut base = x.clone();
    let mut acc = Decimal::one();
    while remaining > 0 {
        if remaining & 1 == 1 {
            acc = acc.mul(&base).round(work);
        }
        remaining >>= 1;
        if remaining > 0 {
            base = base.mul(&base).round(work);
        }
    }
    if exponent < 0 {
        acc = Decimal::one().div(&acc, work)?;
    }
    Ok(acc)
}
