use core::cmp::Ordering;
use core::str::FromStr;

use num_bigint::BigInt;

use super::{Decimal, DecimalContext, ParseDecimalError, RoundingMode};
use crate::MathError;

fn dec(literal: &str) -> Decimal {
    Decimal::from_str(literal).expect("test literal should parse")
}

#[test]
fn parse_display_roundtrip_ok() {
    for literal in ["0", "1", "-1", "12.34", "-0.005", "1000", "0.125"] {
        let value = dec(literal);
        assert_eq!(value.to_string(), literal);
    }
}

#[test]
fn parse_exponent_notation_ok() {
    assert_eq!(dec("1e3"), dec("1000"));
    assert_eq!(dec("1.5e-2"), dec("0.015"));
    assert_eq!(dec("-2.5E1"), dec("-25"));
    assert_eq!(dec("5e0"), dec("5"));
}

#[test]
fn parse_rejects_garbage_err() {
    assert_eq!(Decimal::from_str(""), Err(ParseDecimalError::MissingDigits));
    assert_eq!(
        Decimal::from_str("."),
        Err(ParseDecimalError::MissingDigits)
    );
    assert_eq!(
        Decimal::from_str("12a4"),
        Err(ParseDecimalError::InvalidCharacter { position: 2 })
    );
    assert_eq!(
        Decimal::from_str("1e"),
        Err(ParseDecimalError::InvalidExponent)
    );
}

#[test]
fn exact_ring_operations_ok() {
    let a = dec("1.5");
    let b = dec("0.25");
    assert_eq!(a.add(&b), dec("1.75"));
    assert_eq!(a.sub(&b), dec("1.25"));
    assert_eq!(a.mul(&b), dec("0.375"));
    assert_eq!(a.double(), dec("3"));
    assert_eq!(a.half(), dec("0.75"));
    assert_eq!(a.negate(), dec("-1.5"));
    assert_eq!(a.negate().abs(), a);
}

#[test]
fn comparison_is_numeric_ok() {
    assert_eq!(dec("1.20").cmp(&dec("1.2")), Ordering::Equal);
    assert_eq!(dec("1.2"), dec("1.200"));
    assert!(dec("-3") < dec("0.001"));
    assert!(dec("10") > dec("9.999999"));
}

#[test]
fn round_significant_digits_ok() {
    let ctx = DecimalContext::new(3);
    assert_eq!(dec("123456").round(&ctx), dec("123000"));
    assert_eq!(dec("0.0012349").round(&ctx), dec("0.00123"));
    assert_eq!(dec("2.7182818").round(&ctx), dec("2.72"));
    // values already within the budget stay untouched
    assert_eq!(dec("1.5").round(&ctx), dec("1.5"));
}

#[test]
fn round_carry_into_extra_digit_ok() {
    let ctx = DecimalContext::new(3);
    assert_eq!(dec("999.9").round(&ctx), dec("1000"));
    assert_eq!(dec("0.09999").round(&ctx), dec("0.1"));
}

#[test]
fn rounding_modes_differ_on_ties_ok() {
    let value = dec("0.125");
    assert_eq!(
        value.round(&DecimalContext::with_rounding(2, RoundingMode::HalfUp)),
        dec("0.13")
    );
    assert_eq!(
        value.round(&DecimalContext::with_rounding(2, RoundingMode::HalfEven)),
        dec("0.12")
    );
    assert_eq!(
        dec("0.129").round(&DecimalContext::with_rounding(2, RoundingMode::Down)),
        dec("0.12")
    );
}

#[test]
fn division_rounds_once_ok() {
    let ctx = DecimalContext::new(5);
    let one = Decimal::one();
    assert_eq!(one.div(&dec("3"), &ctx).expect("finite quotient"), dec("0.33333"));
    assert_eq!(
        dec("2").div(&dec("3"), &ctx).expect("finite quotient"),
        dec("0.66667")
    );
    assert_eq!(one.div(&dec("8"), &ctx).expect("finite quotient"), dec("0.125"));
    assert_eq!(
        dec("-1").div(&dec("3"), &ctx).expect("finite quotient"),
        dec("-0.33333")
    );
}

#[test]
fn division_by_zero_err() {
    let ctx = DecimalContext::new(5);
    assert_eq!(
        Decimal::one().div(&Decimal::zero(), &ctx),
        Err(MathError::DivisionByZero)
    );
    assert_eq!(
        Decimal::one().div_bigint(&BigInt::from(0), &ctx),
        Err(MathError::DivisionByZero)
    );
}

#[test]
fn integer_inspection_ok() {
    assert!(dec("42").is_integer());
    assert!(dec("42.000").is_integer());
    assert!(!dec("42.5").is_integer());
    assert_eq!(dec("42.000").to_i64(), Some(42));
    assert_eq!(dec("-7").to_i64(), Some(-7));
    assert_eq!(dec("42.5").to_i64(), None);
    assert_eq!(dec("123.9").trunc(), dec("123"));
    assert_eq!(dec("-123.9").trunc(), dec("-123"));
}

#[test]
fn scientific_inspection_ok() {
    assert_eq!(dec("123.45").scientific_exponent(), 2);
    assert_eq!(dec("0.00123").scientific_exponent(), -3);
    assert_eq!(dec("1").scientific_exponent(), 0);
    let (mantissa, exponent) = dec("123.45").to_mantissa_exponent();
    assert_eq!(exponent, 2);
    assert!((mantissa - 1.2345).abs() < 1e-12);
    let (mantissa, exponent) = dec("-0.05").to_mantissa_exponent();
    assert_eq!(exponent, -2);
    assert!((mantissa + 5.0).abs() < 1e-12);
}

#[test]
fn point_moves_are_exact_ok() {
    assert_eq!(dec("1.5").move_point_right(2), dec("150"));
    assert_eq!(dec("1.5").move_point_left(2), dec("0.015"));
    assert_eq!(Decimal::power_of_ten(-3), dec("0.001"));
    assert_eq!(Decimal::power_of_ten(2), dec("100"));
}

#[test]
fn from_f64_seed_is_close_ok() {
    let seed = Decimal::from_f64_approx(1.4142135623730951);
    let diff = seed.sub(&dec("1.4142135623730951")).abs();
    assert!(diff < Decimal::power_of_ten(-15));
    assert_eq!(Decimal::from_f64_approx(f64::NAN), Decimal::zero());
}
