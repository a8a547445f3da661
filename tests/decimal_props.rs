//! Property tests for the decimal substrate and the public functions.

use proptest::prelude::*;

use bigdec_math::{exp, Decimal, DecimalContext};

fn decimal_from(unscaled: i64, scale: i64) -> Decimal {
    Decimal::new(unscaled.into(), scale)
}

proptest! {
    #[test]
    fn parse_display_roundtrip(unscaled in any::<i64>(), scale in -20i64..20) {
        let value = decimal_from(unscaled, scale);
        let reparsed: Decimal = value.to_string().parse().expect("own rendering parses");
        prop_assert_eq!(reparsed, value);
    }

    #[test]
    fn addition_commutes(
        a in any::<i64>(), sa in -10i64..10,
        b in any::<i64>(), sb in -10i64..10,
    ) {
        let a = decimal_from(a, sa);
        let b = decimal_from(b, sb);
        prop_assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn multiplication_commutes(
        a in any::<i64>(), sa in -10i64..10,
        b in any::<i64>(), sb in -10i64..10,
    ) {
        let a = decimal_from(a, sa);
        let b = decimal_from(b, sb);
        prop_assert_eq!(a.mul(&b), b.mul(&a));
    }

    #[test]
    fn rounding_is_idempotent(
        unscaled in any::<i64>(), scale in -10i64..10,
        precision in 1u32..30,
    ) {
        let ctx = DecimalContext::new(precision);
        let rounded = decimal_from(unscaled, scale).round(&ctx);
        prop_assert_eq!(rounded.round(&ctx), rounded);
    }

    #[test]
    fn division_multiplies_back(
        a in any::<i64>(), b in any::<i64>().prop_filter("divisor", |b| *b != 0),
    ) {
        let ctx = DecimalContext::new(25);
        let a = Decimal::from(a);
        let b = Decimal::from(b);
        let quotient = a.div(&b, &ctx).expect("divisor is non-zero");
        let difference = quotient.mul(&b).sub(&a).abs();
        // a correctly rounded quotient reconstructs the dividend to well
        // within its own precision
        prop_assert!(difference.move_point_right(20) <= a.abs());
    }

    #[test]
    fn exp_is_deterministic(
        mantissa in -999i64..1000, scale in 0i64..3,
        precision in 5u32..40,
    ) {
        let x = decimal_from(mantissa, scale);
        let ctx = DecimalContext::new(precision);
        let first = exp(&x, &ctx).expect("finite argument");
        let second = exp(&x, &ctx).expect("finite argument");
        prop_assert_eq!(first.to_string(), second.to_string());
    }
}
