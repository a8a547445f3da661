//! Shared high-precision constants.
//!
//! Each constant keeps one process-wide cache entry tagged with the highest
//! precision it has been requested at. Lower-precision requests round the
//! cached value down; a higher-precision request recomputes the constant at
//! the new precision (plus guard digits) and replaces the entry. The
//! derivations avoid [`crate::functions::ln`] itself, which depends on these
//! caches:
//!
//! * `ln 2 = 2·atanh(1/3)`
//! * `ln 3 = ln 2 + 2·atanh(1/5)`
//! * `ln 10 = 3·ln 2 + 2·atanh(1/9)`
//! * `π = 16·atan(1/5) − 4·atan(1/239)` (Machin)
//! * `e = exp(1)`

use std::sync::{Mutex, OnceLock};

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::decimal::{Decimal, DecimalContext};
use crate::functions::{atanh_engine, exp};
use crate::series::{FactorRecurrence, OddPowers, SeriesDefinition, SeriesEngine};
use crate::MathResult;

const GUARD_DIGITS: u32 = 4;

/// Alternating odd reciprocal factors `±1/(2i+1)`, the arctangent series.
struct AtanFactors {
    index: u64,
    negative: bool,
}

impl FactorRecurrence for AtanFactors {
    fn current(&self) -> BigRational {
        let numerator = BigInt::from(if self.negative { -1 } else { 1 });
        BigRational::new(numerator, BigInt::from(2 * self.index + 1))
    }

    fn advance(&mut self) {
        self.index += 1;
        self.negative = !self.negative;
    }
}

struct AtanSeries;

impl SeriesDefinition for AtanSeries {
    type Factors = AtanFactors;
    type Powers = OddPowers;

    fn factor_recurrence(&self) -> Self::Factors {
        AtanFactors {
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

static ATAN_ENGINE: OnceLock<SeriesEngine<AtanSeries>> = OnceLock::new();

fn atan_engine() -> &'static SeriesEngine<AtanSeries> {
    ATAN_ENGINE.get_or_init(|| SeriesEngine::new(AtanSeries))
}

struct CachedConstant {
    precision: u32,
    value: Decimal,
}

type ConstantSlot = OnceLock<Mutex<Option<CachedConstant>>>;

static LN_2: ConstantSlot = OnceLock::new();
static LN_3: ConstantSlot = OnceLock::new();
static LN_10: ConstantSlot = OnceLock::new();
static PI: ConstantSlot = OnceLock::new();
static EULER: ConstantSlot = OnceLock::new();

fn cached(
    slot: &'static ConstantSlot,
    ctx: &DecimalContext,
    compute: impl FnOnce(&DecimalContext) -> MathResult<Decimal>,
) -> MathResult<Decimal> {
    let mutex = slot.get_or_init(|| Mutex::new(None));
    let mut entry = mutex
        .lock()
        .expect("constant cache poisoned by an earlier panic");
    if let Some(existing) = entry.as_ref() {
        if existing.precision >= ctx.precision() {
            return Ok(existing.value.round(ctx));
        }
    }
    let work = ctx.with_guard_digits(GUARD_DIGITS);
    let value = compute(&work)?;
    *entry = Some(CachedConstant {
        precision: ctx.precision(),
        value: value.clone(),
    });
    Ok(value.round(ctx))
}

/// Natural logarithm of two.
pub fn ln_2(ctx: &DecimalContext) -> MathResult<Decimal> {
    cached(&LN_2, ctx, |work| {
        let third = Decimal::one().div_bigint(&BigInt::from(3), work)?;
        Ok(atanh_engine().calculate(&third, work)?.double())
    })
}

/// Natural logarithm of three.
pub fn ln_3(ctx: &DecimalContext) -> MathResult<Decimal> {
    cached(&LN_3, ctx, |work| {
        let fifth = Decimal::new(BigInt::from(2), 1);
        let correction = atanh_engine().calculate(&fifth, work)?.double();
        Ok(ln_2(work)?.add(&correction))
    })
}

/// Natural logarithm of ten.
pub fn ln_10(ctx: &DecimalContext) -> MathResult<Decimal> {
    cached(&LN_10, ctx, |work| {
        let ninth = Decimal::one().div_bigint(&BigInt::from(9), work)?;
        let correction = atanh_engine().calculate(&ninth, work)?.double();
        Ok(ln_2(work)?.mul_bigint(&BigInt::from(3)).add(&correction))
    })
}

/// The circle constant π.
pub fn pi(ctx: &DecimalContext) -> MathResult<Decimal> {
    cached(&PI, ctx, |work| {
        let fifth = Decimal::new(BigInt::from(2), 1);
        let near = atan_engine().calculate(&fifth, work)?;
        let far_arg = Decimal::one().div_bigint(&BigInt::from(239), work)?;
        let far = atan_engine().calculate(&far_arg, work)?;
        Ok(near
            .mul_bigint(&BigInt::from(16))
            .sub(&far.mul_bigint(&BigInt::from(4))))
    })
}

/// Euler's number e.
pub fn e(ctx: &DecimalContext) -> MathResult<Decimal> {
    cached(&EULER, ctx, |work| exp(&Decimal::one(), work))
}
