use crate::decimal::{Decimal, DecimalContext};

/// Stateful producer of successive powers of a fixed base value.
///
/// The engine calls [`current`](PowerSequence::current) and
/// [`advance`](PowerSequence::advance) in strict alternation: read the power
/// of the term being summed, then prepare the next one. Every step is
/// rounded at the working precision captured when the sequence was created.
pub trait PowerSequence {
    /// Returns the power the sequence currently points at, without
    /// advancing.
    fn current(&self) -> &Decimal;

    /// Computes the next power and makes it current.
    fn advance(&mut self);
}

/// The full power sequence `x⁰, x¹, x², …`.
pub struct AllPowers {
    base: Decimal,
    current: Decimal,
    ctx: DecimalContext,
}

impl AllPowers {
    /// Starts the sequence at `x⁰ = 1`.
    pub fn new(x: &Decimal, ctx: &DecimalContext) -> AllPowers {
        AllPowers {
            base: x.clone(),
            current: Decimal::one(),
            ctx: *ctx,
        }
    }
}

impl PowerSequence for AllPowers {
    fn current(&self) -> &Decimal {
        &self.current
    }

    fn advance(&mut self) {
        self.current = self.current.mul(&self.base).round(&self.ctx);
    }
}

/// The even power sequence `x⁰, x², x⁴, …`, stepping by a precomputed
/// square.
pub struct EvenPowers {
    square: Decimal,
    current: Decimal,
    ctx: DecimalContext,
}

impl EvenPowers {
    /// Starts the sequence at `x⁰ = 1`.
    pub fn new(x: &Decimal, ctx: &DecimalContext) -> EvenPowers {
        EvenPowers {
            square: x.mul(x).round(ctx),
            current: Decimal::one(),
            ctx: *ctx,
        }
    }
}

impl PowerSequence for EvenPowers {
    fn current(&self) -> &Decimal {
        &self.current
    }

    fn advance(&mut self) {
        self.current = self.current.mul(&self.square).round(&self.ctx);
    }
}

/// The odd power sequence `x¹, x³, x⁵, …`, stepping by a precomputed
/// square.
pub struct OddPowers {
    square: Decimal,
    current: Decimal,
    ctx: DecimalContext,
}

impl OddPowers {
    /// Starts the sequence at `x¹`.
    pub fn new(x: &Decimal, ctx: &DecimalContext) -> OddPowers {
        OddPowers {
            square: x.mul(x).round(ctx),
            current: x.clone(),
            ctx: *ctx,
        }
    }
}

impl PowerSequence for OddPowers {
    fn current(&self) -> &Decimal {
        &self.current
    }

    fn advance(&mut self) {
        self.current = self.current.mul(&self.square).round(&self.ctx);
    }
}
