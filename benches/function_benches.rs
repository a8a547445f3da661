use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bigdec_math::{exp, ln, pow, sin, sqrt};
use bigdec_math::{Decimal, DecimalContext, MathResult};

type MathFn = fn(&Decimal, &DecimalContext) -> MathResult<Decimal>;

fn pow_of_base(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    let base = Decimal::new(123456.into(), 3);
    pow(&base, x, ctx)
}

fn bench_functions(c: &mut Criterion) {
    let functions: &[(&str, MathFn)] = &[
        ("exp", exp),
        ("ln", ln),
        ("sin", sin),
        ("sqrt", sqrt),
        ("pow", pow_of_base),
    ];
    let x: Decimal = "1.37".parse().expect("bench literal");

    for (name, function) in functions {
        let mut group = c.benchmark_group(*name);
        for precision in [50u32, 100, 300] {
            group.bench_with_input(
                BenchmarkId::from_parameter(precision),
                &precision,
                |b, &precision| {
                    let ctx = DecimalContext::new(precision);
                    b.iter(|| function(black_box(&x), &ctx).expect("value in domain"));
                },
            );
        }
        group.finish();
    }
}

criterion_group!(benches, bench_functions);
criterion_main!(benches);
