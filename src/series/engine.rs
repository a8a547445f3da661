use std::sync::{Mutex, MutexGuard};

use num_rational::BigRational;

use crate::decimal::{Decimal, DecimalContext};
use crate::MathResult;

use super::powers::PowerSequence;

/// Recurrence producing the exact rational factor of each series term.
///
/// The recurrence points at one factor at a time, starting at term zero.
/// [`current`](FactorRecurrence::current) may be called repeatedly;
/// [`advance`](FactorRecurrence::advance) moves to the next term's factor.
/// Factors are pure rational arithmetic: the same recurrence state always
/// yields the same factor, regardless of any requested decimal precision.
pub trait FactorRecurrence: Send {
    /// Factor of the term the recurrence currently points at.
    fn current(&self) -> BigRational;

    /// Advances the recurrence to the next term's factor.
    fn advance(&mut self);
}

/// Description of one concrete series.
///
/// A definition supplies the two capabilities the engine cannot know:
/// how term factors are generated and how powers of the input value are
/// produced. Alternating-sign series additionally opt into paired
/// evaluation, where two consecutive terms are summed before each
/// convergence check.
pub trait SeriesDefinition: Send {
    /// Recurrence over the term factors.
    type Factors: FactorRecurrence;

    /// Power sequence of the input value.
    type Powers: PowerSequence;

    /// Creates the factor recurrence, positioned at term zero.
    fn factor_recurrence(&self) -> Self::Factors;

    /// Creates the power sequence for `x` at the working precision,
    /// positioned at the power of term zero.
    fn power_sequence(&self, x: &Decimal, ctx: &DecimalContext) -> Self::Powers;

    /// Whether terms are produced and summed two at a time before each
    /// convergence check. Fixed at construction.
    fn evaluates_in_pairs(&self) -> bool {
        false
    }
}

/// Factor recurrence state plus the factors it has produced so far.
///
/// Extension appends the recurrence's current factor and then advances it,
/// strictly in index order. Entries are never evicted: the cache is bounded
/// by the highest term index any call has ever needed.
struct FactorCache<R> {
    recurrence: R,
    factors: Vec<BigRational>,
}

impl<R: FactorRecurrence> FactorCache<R> {
    fn factor(&mut self, index: usize) -> &BigRational {
        while self.factors.len() <= index {
            let factor = self.recurrence.current();
            self.factors.push(factor);
            self.recurrence.advance();
        }
        &self.factors[index]
    }
}

/// Summation engine for one series.
///
/// An engine is created once per series and reused for the lifetime of the
/// function it backs; its factor cache grows across calls. Calls on the same
/// engine are serialized for their full duration, because cache extension is
/// a multi-step recurrence that must complete in strict index order and a
/// narrower lock could interleave two extensions corruptly. Engines for
/// different series are fully independent.
pub struct SeriesEngine<S: SeriesDefinition> {
    definition: S,
    paired: bool,
    cache: Mutex<FactorCache<S::Factors>>,
}

impl<S: SeriesDefinition> SeriesEngine<S> {
    /// Creates the engine with an empty factor cache.
    pub fn new(definition: S) -> SeriesEngine<S> {
        let recurrence = definition.factor_recurrence();
        let paired = definition.evaluates_in_pairs();
        SeriesEngine {
            definition,
            paired,
            cache: Mutex::new(FactorCache {
                recurrence,
                factors: Vec::new(),
            }),
        }
    }

    /// Number of term factors cached so far.
    pub fn cached_factors(&self) -> usize {
        self.lock_cache().factors.len()
    }

    /// Sums the series for `x` until the latest term (or term pair) drops to
    /// the acceptable error `10^(−precision − 1)`, then rounds the sum to
    /// the context precision.
    ///
    /// At least one full step is evaluated before the first convergence
    /// check. The result is deterministic for a given `(x, ctx)` pair and
    /// identical whether the factor cache is cold or warm.
    pub fn calculate(&self, x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
        let mut cache = self.lock_cache();
        let tolerance = Decimal::power_of_ten(-i64::from(ctx.precision()) - 1);
        let mut powers = self.definition.power_sequence(x, ctx);

        let mut sum = Decimal::zero();
        let mut index = 0usize;
        loop {
            let mut term = term_value(cache.factor(index), powers.current(), ctx)?;
            powers.advance();
            index += 1;

            if self.paired {
                let second = term_value(cache.factor(index), powers.current(), ctx)?;
                powers.advance();
                index += 1;
                term = term.add(&second);
            }

            sum = sum.add(&term);
            if term.abs() <= tolerance {
                break;
            }
        }
        Ok(sum.round(ctx))
    }

    fn lock_cache(&self) -> MutexGuard<'_, FactorCache<S::Factors>> {
        self.cache
            .lock()
            .expect("series factor cache poisoned by an earlier panic")
    }
}

/// One series term: `numerator × xⁱ / denominator`, rounded at the working
/// precision.
fn term_value(
    factor: &BigRational,
    power: &Decimal,
    ctx: &DecimalContext,
) -> MathResult<Decimal> {
    power
        .mul_bigint(factor.numer())
        .div_bigint(factor.denom(), ctx)
}
