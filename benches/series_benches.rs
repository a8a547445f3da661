use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use bigdec_math::series::{AllPowers, FactorRecurrence, SeriesDefinition, SeriesEngine};
use bigdec_math::{Decimal, DecimalContext};

/// Exponential-series factors, used here as a representative recurrence.
struct ReciprocalFactorials {
    factorial: BigInt,
    index: u64,
}

impl FactorRecurrence for ReciprocalFactorials {
    fn current(&self) -> BigRational {
        BigRational::new(BigInt::one(), self.factorial.clone())
    }

    fn advance(&mut self) {
        self.index += 1;
        self.factorial *= BigInt::from(self.index);
    }
}

struct ExponentialSeries;

impl SeriesDefinition for ExponentialSeries {
    type Factors = ReciprocalFactorials;
    type Powers = AllPowers;

    fn factor_recurrence(&self) -> Self::Factors {
        ReciprocalFactorials {
            factorial: BigInt::one(),
            index: 0,
        }
    }

    fn power_sequence(&self, x: &Decimal, ctx: &DecimalContext) -> Self::Powers {
        AllPowers::new(x, ctx)
    }
}

fn bench_cold_vs_warm_cache(c: &mut Criterion) {
    let x = Decimal::one();
    let ctx = DecimalContext::new(50);

    let mut group = c.benchmark_group("factor_cache");
    group.bench_function("cold", |b| {
        b.iter(|| {
            let engine = SeriesEngine::new(ExponentialSeries);
            engine.calculate(black_box(&x), &ctx).expect("series converges")
        });
    });

    let warm = SeriesEngine::new(ExponentialSeries);
    warm.calculate(&x, &ctx).expect("series converges");
    group.bench_function("warm", |b| {
        b.iter(|| warm.calculate(black_box(&x), &ctx).expect("series converges"));
    });
    group.finish();
}

fn bench_precision_sweep(c: &mut Criterion) {
    let x = Decimal::one();
    let engine = SeriesEngine::new(ExponentialSeries);

    let mut group = c.benchmark_group("summation_precision");
    for precision in [20u32, 50, 100, 200] {
        group.bench_with_input(
            BenchmarkId::from_parameter(precision),
            &precision,
            |b, &precision| {
                let ctx = DecimalContext::new(precision);
                b.iter(|| engine.calculate(black_box(&x), &ctx).expect("series converges"));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_cold_vs_warm_cache, bench_precision_sweep);
criterion_main!(benches);
