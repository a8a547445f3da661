use num_bigint::BigInt;

use crate::decimal::{Decimal, DecimalContext};
use crate::{MathError, MathResult};

use super::pow::powi;

const GUARD_DIGITS: u32 = 4;

/// Square root by Newton iteration, `g′ = (g + x/g) / 2`.
///
/// The iteration is seeded from an f64 mantissa/exponent estimate and stops
/// once the step is relatively below `10^(−precision − 1)`.
pub fn sqrt(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    if x.is_negative() {
        return Err(MathError::RootOfNegative { degree: 2 });
    }
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let work = ctx.with_guard_digits(GUARD_DIGITS);
    let mut guess = initial_guess(x, 2);
    loop {
        let next = guess.add(&x.div(&guess, &work)?).half().round(&work);
        let done = step_within_tolerance(&next, &guess, ctx.precision());
        guess = next;
        if done {
            break;
        }
    }
    Ok(guess.round(ctx))
}

/// Root of arbitrary degree by Newton iteration,
/// `g′ = ((n−1)·g + x/gⁿ⁻¹) / n`.
///
/// Odd-degree roots of negative values are the negated root of the absolute
/// value; even-degree roots of negative values and degree-zero roots fail.
pub fn root(degree: u32, x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    if degree == 0 {
        return Err(MathError::ZeroRootDegree);
    }
    if x.is_negative() {
        if degree % 2 == 0 {
            return Err(MathError::RootOfNegative { degree });
        }
        return Ok(root(degree, &x.abs(), ctx)?.negate());
    }
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    if degree == 1 {
        return Ok(x.round(ctx));
    }
    let work = ctx.with_guard_digits(GUARD_DIGITS);
    let degree_minus_one = Decimal::from(degree - 1);
    let degree_int = BigInt::from(degree);
    let mut guess = initial_guess(x, degree);
    loop {
        let power = powi(&guess, i64::from(degree) - 1, &work)?;
        let next = degree_minus_one
            .mul(&guess)
            .add(&x.div(&power, &work)?)
            .div_bigint(&degree_int, &work)?;
        let done = step_within_tolerance(&next, &guess, ctx.precision());
        guess = next;
        if done {
            break;
        }
    }
    Ok(guess.round(ctx))
}

/// Seed `(m·10^r)^(1/n) · 10^q` with `b = q·n + r`, keeping the f64
/// computation inside its exponent range. A degenerate seed falls back to
/// one, which only costs extra iterations.
fn initial_guess(x: &Decimal, degree: u32) -> Decimal {
    let (mantissa, exponent) = x.to_mantissa_exponent();
    let d = i64::from(degree);
    let quotient = exponent.div_euclid(d);
    let remainder = exponent.rem_euclid(d);
    let scaled = mantissa * 10f64.powi(remainder.min(308) as i32);
    let seed = scaled.powf(1.0 / f64::from(degree));
    let guess = Decimal::from_f64_approx(seed).move_point_right(quotient);
    if guess.is_zero() {
        Decimal::one()
    } else {
        guess
    }
}

fn step_within_tolerance(next: &Decimal, previous: &Decimal, precision: u32) -> bool {
    let step = next.sub(previous).abs();
    step.move_point_right(i64::from(precision) + 1) <= next.abs()
}
