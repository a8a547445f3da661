use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

use super::context::{DecimalContext, RoundingMode};
use crate::{MathError, MathResult};

/// Arbitrary-precision decimal value.
///
/// The numeric value is `unscaled × 10^(−scale)`. The representation is not
/// normalised: trailing zeros in the unscaled value are kept, so equal
/// numbers may carry different scales. Comparisons and equality are numeric.
///
/// Addition, subtraction and multiplication are exact and can grow the digit
/// count without bound; division and [`Decimal::round`] trim the result to
/// the significant-digit budget of a [`DecimalContext`].
#[derive(Debug, Clone)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i64,
}

impl Decimal {
    /// Creates a decimal with the given unscaled value and power-of-ten
    /// scale.
    pub fn new(unscaled: BigInt, scale: i64) -> Decimal {
        Decimal { unscaled, scale }
    }

    /// The value zero.
    pub fn zero() -> Decimal {
        Decimal::new(BigInt::zero(), 0)
    }

    /// The value one.
    pub fn one() -> Decimal {
        Decimal::new(BigInt::one(), 0)
    }

    /// The value `10^exponent`, exact for any sign of the exponent.
    pub fn power_of_ten(exponent: i64) -> Decimal {
        Decimal::new(BigInt::one(), -exponent)
    }

    /// Builds a decimal from the shortest base-ten rendering of an `f64`.
    ///
    /// Non-finite inputs yield zero. The conversion is approximate by nature
    /// and intended for seeding iterations, not for exact arithmetic.
    pub fn from_f64_approx(value: f64) -> Decimal {
        if !value.is_finite() {
            return Decimal::zero();
        }
        let formatted = format!("{:e}", value);
        formatted.parse().unwrap_or_else(|_| Decimal::zero())
    }

    /// Unscaled integer value.
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// Power-of-ten scale; the numeric value is `unscaled × 10^(−scale)`.
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Whether the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    /// Whether the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.unscaled.sign() == Sign::Minus
    }

    /// Whether the value is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.unscaled.sign() == Sign::Plus
    }

    /// Number of significant decimal digits of the unscaled value. Zero is
    /// defined to have one digit.
    pub fn digits(&self) -> u64 {
        if self.unscaled.is_zero() {
            return 1;
        }
        count_digits(self.unscaled.magnitude())
    }

    /// Power-of-ten exponent `b` of the scientific form `m × 10^b` with
    /// `1 ≤ |m| < 10`. Zero yields zero.
    pub fn scientific_exponent(&self) -> i64 {
        if self.unscaled.is_zero() {
            return 0;
        }
        self.digits() as i64 - 1 - self.scale
    }

    /// Absolute value.
    pub fn abs(&self) -> Decimal {
        Decimal::new(self.unscaled.abs(), self.scale)
    }

    /// Additive inverse.
    pub fn negate(&self) -> Decimal {
        Decimal::new(-&self.unscaled, self.scale)
    }

    /// Exact sum.
    pub fn add(&self, rhs: &Decimal) -> Decimal {
        match self.scale.cmp(&rhs.scale) {
            Ordering::Equal => Decimal::new(&self.unscaled + &rhs.unscaled, self.scale),
            Ordering::Less => {
                let lifted = &self.unscaled * pow10_int((rhs.scale - self.scale) as u64);
                Decimal::new(lifted + &rhs.unscaled, rhs.scale)
            }
            Ordering::Greater => {
                let lifted = &rhs.unscaled * pow10_int((self.scale - rhs.scale) as u64);
                Decimal::new(&self.unscaled + lifted, self.scale)
            }
        }
    }

    /// Exact difference.
    pub fn sub(&self, rhs: &Decimal) -> Decimal {
        self.add(&rhs.negate())
    }

    /// Exact product.
    pub fn mul(&self, rhs: &Decimal) -> Decimal {
        Decimal::new(&self.unscaled * &rhs.unscaled, self.scale + rhs.scale)
    }

    /// Exact product with an integer.
    pub fn mul_bigint(&self, rhs: &BigInt) -> Decimal {
        Decimal::new(&self.unscaled * rhs, self.scale)
    }

    /// Exact doubling.
    pub fn double(&self) -> Decimal {
        Decimal::new(&self.unscaled * 2u32, self.scale)
    }

    /// Exact halving (multiplies the unscaled value by five and shifts the
    /// scale).
    pub fn half(&self) -> Decimal {
        Decimal::new(&self.unscaled * 5u32, self.scale + 1)
    }

    /// Exact multiplication by `10^places`.
    pub fn move_point_right(&self, places: i64) -> Decimal {
        Decimal::new(self.unscaled.clone(), self.scale - places)
    }

    /// Exact division by `10^places`.
    pub fn move_point_left(&self, places: i64) -> Decimal {
        Decimal::new(self.unscaled.clone(), self.scale + places)
    }

    /// Quotient rounded to the context precision.
    ///
    /// The result carries at most `ctx.precision()` significant digits and
    /// is correctly rounded in one step: the discarded digits of the long
    /// division participate in the rounding decision directly.
    pub fn div(&self, rhs: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
        if rhs.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Decimal::zero());
        }
        let precision = ctx.precision() as i64;
        let shift = (precision + 1 + rhs.digits() as i64 - self.digits() as i64).max(0) as u64;
        let scaled = self.unscaled.magnitude() * &pow10_uint(shift);
        let (quotient, remainder) = scaled.div_rem(rhs.unscaled.magnitude());
        let sign = if self.is_negative() == rhs.is_negative() {
            Sign::Plus
        } else {
            Sign::Minus
        };
        Ok(round_parts(
            sign,
            quotient,
            remainder,
            rhs.unscaled.magnitude(),
            self.scale - rhs.scale + shift as i64,
            ctx,
        ))
    }

    /// Quotient by an integer divisor, rounded to the context precision.
    pub fn div_bigint(&self, rhs: &BigInt, ctx: &DecimalContext) -> MathResult<Decimal> {
        if rhs.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Decimal::zero());
        }
        let precision = ctx.precision() as i64;
        let rhs_digits = count_digits(rhs.magnitude()) as i64;
        let shift = (precision + 1 + rhs_digits - self.digits() as i64).max(0) as u64;
        let scaled = self.unscaled.magnitude() * &pow10_uint(shift);
        let (quotient, remainder) = scaled.div_rem(rhs.magnitude());
        let sign = if self.is_negative() == (rhs.sign() == Sign::Minus) {
            Sign::Plus
        } else {
            Sign::Minus
        };
        Ok(round_parts(
            sign,
            quotient,
            remainder,
            rhs.magnitude(),
            self.scale + shift as i64,
            ctx,
        ))
    }

    /// Rounds to the context's significant-digit budget. Values already
    /// within the budget are returned unchanged, trailing zeros included.
    pub fn round(&self, ctx: &DecimalContext) -> Decimal {
        if self.unscaled.is_zero() {
            return Decimal::zero();
        }
        if self.digits() <= u64::from(ctx.precision()) {
            return self.clone();
        }
        round_parts(
            self.unscaled.sign(),
            self.unscaled.magnitude().clone(),
            BigUint::zero(),
            &BigUint::one(),
            self.scale,
            ctx,
        )
    }

    /// Integer part, truncated toward zero, at scale zero.
    pub fn trunc(&self) -> Decimal {
        if self.scale <= 0 {
            return self.clone();
        }
        let divisor = pow10_uint(self.scale as u64);
        let magnitude = self.unscaled.magnitude() / &divisor;
        Decimal::new(BigInt::from_biguint(self.unscaled.sign(), magnitude), 0)
    }

    /// Whether the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        if self.scale <= 0 || self.unscaled.is_zero() {
            return true;
        }
        let divisor = pow10_uint(self.scale as u64);
        (self.unscaled.magnitude() % &divisor).is_zero()
    }

    /// The value as an `i64` when it is integral and in range.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        let integral = if self.scale <= 0 {
            &self.unscaled * pow10_int((-self.scale) as u64)
        } else {
            &self.unscaled / pow10_int(self.scale as u64)
        };
        integral.to_i64()
    }

    /// Splits the value into an approximate mantissa in `[1, 10)` (negative
    /// for negative values) and its power-of-ten exponent. Zero yields
    /// `(0.0, 0)`.
    pub fn to_mantissa_exponent(&self) -> (f64, i64) {
        if self.is_zero() {
            return (0.0, 0);
        }
        let digits = self.unscaled.magnitude().to_str_radix(10);
        let take = digits.len().min(17);
        let mut mantissa = 0.0f64;
        for byte in digits.bytes().take(take) {
            mantissa = mantissa * 10.0 + f64::from(byte - b'0');
        }
        mantissa /= 10f64.powi(take as i32 - 1);
        if self.is_negative() {
            mantissa = -mantissa;
        }
        (mantissa, self.scientific_exponent())
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => self.unscaled.cmp(&other.unscaled),
            Ordering::Less => {
                let lifted = &self.unscaled * pow10_int((other.scale - self.scale) as u64);
                lifted.cmp(&other.unscaled)
            }
            Ordering::Greater => {
                let lifted = &other.unscaled * pow10_int((self.scale - other.scale) as u64);
                self.unscaled.cmp(&lifted)
            }
        }
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Decimal {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Decimal {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Decimal {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Decimal {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unscaled.is_zero() {
            return write!(f, "0");
        }
        let digits = self.unscaled.magnitude().to_str_radix(10);
        let sign = if self.is_negative() { "-" } else { "" };
        if self.scale <= 0 {
            let zeros = "0".repeat((-self.scale) as usize);
            write!(f, "{}{}{}", sign, digits, zeros)
        } else {
            let scale = self.scale as usize;
            if digits.len() > scale {
                let (int_part, frac_part) = digits.split_at(digits.len() - scale);
                write!(f, "{}{}.{}", sign, int_part, frac_part)
            } else {
                let zeros = "0".repeat(scale - digits.len());
                write!(f, "{}0.{}{}", sign, zeros, digits)
            }
        }
    }
}

/// Error produced when parsing a decimal literal fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseDecimalError {
    /// The input contained no digits.
    MissingDigits,
    /// An unexpected character was encountered in the numeric body.
    InvalidCharacter {
        /// Byte position of the offending character within the body.
        position: usize,
    },
    /// The exponent part was missing, malformed or out of range.
    InvalidExponent,
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseDecimalError::MissingDigits => write!(f, "decimal literal contains no digits"),
            ParseDecimalError::InvalidCharacter { position } => {
                write!(f, "invalid character at position {}", position)
            }
            ParseDecimalError::InvalidExponent => write!(f, "invalid exponent"),
        }
    }
}

impl std::error::Error for ParseDecimalError {}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (mantissa_part, exponent) = match input.find(['e', 'E']) {
            Some(split) => {
                let exponent: i64 = input[split + 1..]
                    .parse()
                    .map_err(|_| ParseDecimalError::InvalidExponent)?;
                (&input[..split], exponent)
            }
            None => (input, 0),
        };
        let (negative, body) = match mantissa_part.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa_part.strip_prefix('+').unwrap_or(mantissa_part)),
        };
        let mut digits = String::with_capacity(body.len());
        let mut frac_len = 0i64;
        let mut seen_point = false;
        let mut seen_digit = false;
        for (position, ch) in body.char_indices() {
            match ch {
                '0'..='9' => {
                    digits.push(ch);
                    seen_digit = true;
                    if seen_point {
                        frac_len += 1;
                    }
                }
                '.' if !seen_point => {
                    seen_point = true;
                }
                _ => return Err(ParseDecimalError::InvalidCharacter { position }),
            }
        }
        if !seen_digit {
            return Err(ParseDecimalError::MissingDigits);
        }
        let magnitude =
            BigUint::from_str(&digits).map_err(|_| ParseDecimalError::MissingDigits)?;
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Ok(Decimal::new(
            BigInt::from_biguint(sign, magnitude),
            frac_len - exponent,
        ))
    }
}

/// Rounds `sign × (quotient + remainder / divisor) × 10^(−scale)` to the
/// context precision in a single step.
///
/// `remainder` must be strictly smaller than `divisor`. The caller arranges
/// the quotient to carry at least the target digit count whenever the
/// remainder is non-zero, so the trimmed digits and the open remainder feed
/// one rounding decision and no double rounding occurs.
fn round_parts(
    sign: Sign,
    quotient: BigUint,
    remainder: BigUint,
    divisor: &BigUint,
    scale: i64,
    ctx: &DecimalContext,
) -> Decimal {
    let precision = u64::from(ctx.precision());
    let digits = if quotient.is_zero() {
        0
    } else {
        count_digits(&quotient)
    };
    let drop = digits.saturating_sub(precision);
    let step = pow10_uint(drop);
    let (mut head, tail) = quotient.div_rem(&step);
    let mut scale = scale - drop as i64;
    if carry_required(&head, &tail, &remainder, divisor, &step, ctx.rounding()) {
        head = head + 1u32;
        if count_digits(&head) > precision {
            // the carry produced an exact power of ten
            head = head / 10u32;
            scale -= 1;
        }
    }
    Decimal::new(BigInt::from_biguint(sign, head), scale)
}

fn carry_required(
    head: &BigUint,
    tail: &BigUint,
    remainder: &BigUint,
    divisor: &BigUint,
    step: &BigUint,
    mode: RoundingMode,
) -> bool {
    if tail.is_zero() && remainder.is_zero() {
        return false;
    }
    match mode {
        RoundingMode::Down => false,
        RoundingMode::HalfUp | RoundingMode::HalfEven => {
            let twice = (tail * divisor + remainder) * 2u32;
            let full = step * divisor;
            match twice.cmp(&full) {
                Ordering::Less => false,
                Ordering::Greater => true,
                Ordering::Equal => match mode {
                    RoundingMode::HalfEven => head.is_odd(),
                    _ => true,
                },
            }
        }
    }
}

fn pow10_uint(exponent: u64) -> BigUint {
    Pow::pow(&BigUint::from(10u32), exponent)
}

fn pow10_int(exponent: u64) -> BigInt {
    BigInt::from(pow10_uint(exponent))
}

fn count_digits(value: &BigUint) -> u64 {
    value.to_str_radix(10).len() as u64
}
