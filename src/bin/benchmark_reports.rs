//! Benchmark harness for the math function implementations.
//!
//! Writes one CSV report per function group: a header row naming the
//! columns, a units row, then one row per sample value with the median
//! evaluation time in nanoseconds. Fields are fixed eight characters wide.
//! A data point whose evaluation fails arithmetically (for example the
//! logarithm of a negative sample) is written as a blank field; the run
//! continues.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bigdec_math::{cos, exp, ln, log10, log2, pow, root, sin, sqrt};
use bigdec_math::{Decimal, DecimalContext, MathResult};

type MathFn = fn(&Decimal, &DecimalContext) -> MathResult<Decimal>;

const REFERENCE_PRECISION: u32 = 300;
const WARMUP_PRECISION: u32 = 7;
const DEFAULT_REPEATS: usize = 10;

struct ReportSpec {
    file_name: &'static str,
    start: &'static str,
    end: &'static str,
    step: &'static str,
    columns: &'static [(&'static str, MathFn)],
}

const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        file_name: "perf_standard_funcs_from_0_to_2.csv",
        start: "0",
        end: "2",
        step: "0.01",
        columns: &[
            ("exp", exp),
            ("sqrt", sqrt),
            ("root2", root2),
            ("root3", root3),
            ("sin", sin),
            ("cos", cos),
        ],
    },
    ReportSpec {
        file_name: "perf_slow_funcs_from_0.01_to_2.csv",
        start: "0.01",
        end: "2",
        step: "0.01",
        columns: &[("exp", exp), ("log", ln), ("log2", log2), ("log10", log10)],
    },
    ReportSpec {
        file_name: "perf_very_slow_funcs_from_0.01_to_2.csv",
        start: "0.01",
        end: "2",
        step: "0.01",
        columns: &[("exp", exp), ("log", ln), ("pow", pow_of_base)],
    },
    ReportSpec {
        file_name: "perf_very_slow_funcs_from_-10_to_10.csv",
        start: "-10",
        end: "10",
        step: "0.1",
        columns: &[("exp", exp), ("log", ln), ("pow", pow_of_base)],
    },
];

fn root2(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    root(2, x, ctx)
}

fn root3(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    root(3, x, ctx)
}

/// `123.456^x`, the classic slow pow sample.
fn pow_of_base(x: &Decimal, ctx: &DecimalContext) -> MathResult<Decimal> {
    let base = Decimal::new(123456.into(), 3);
    pow(&base, x, ctx)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut output_dir = PathBuf::from("reports");
    let mut repeats = DEFAULT_REPEATS;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                if let Some(value) = args.next() {
                    output_dir = PathBuf::from(value);
                }
            }
            "--repeats" => {
                if let Some(value) = args.next() {
                    repeats = value
                        .parse()
                        .unwrap_or_else(|err| panic!("invalid --repeats value: {err}"));
                }
            }
            _ => {}
        }
    }

    fs::create_dir_all(&output_dir)
        .unwrap_or_else(|err| panic!("failed to create report directory {output_dir:?}: {err}"));

    for spec in REPORTS {
        info!(report = spec.file_name, "writing");
        let contents = render_report(spec, repeats);
        let path = output_dir.join(spec.file_name);
        fs::write(&path, contents)
            .unwrap_or_else(|err| panic!("failed to write {}: {err}", path.display()));
        info!(report = spec.file_name, "finished");
    }
}

fn render_report(spec: &ReportSpec, repeats: usize) -> String {
    let start: Decimal = parse_literal(spec.start);
    let end: Decimal = parse_literal(spec.end);
    let step: Decimal = parse_literal(spec.step);
    let ctx = DecimalContext::new(REFERENCE_PRECISION);
    let warmup_ctx = DecimalContext::new(WARMUP_PRECISION);

    // warm up every function over the full range so the factor and constant
    // caches are populated before timing starts
    let mut x = start.clone();
    while x <= end {
        for (_, function) in spec.columns {
            let _ = function(&x, &warmup_ctx);
        }
        x = x.add(&step);
    }

    let mut out = String::new();
    out.push_str(&format!("{:>8}", "x"));
    for (label, _) in spec.columns {
        out.push(',');
        out.push_str(&format!("{:>8}", label));
    }
    out.push('\n');

    out.push_str(&format!("{:>8}", "number"));
    for _ in spec.columns {
        out.push(',');
        out.push_str(&format!("{:>8}", "number"));
    }
    out.push('\n');

    let mut x = start;
    while x <= end {
        out.push_str(&format!("{:8.3}", decimal_to_f64(&x)));
        for (_, function) in spec.columns {
            out.push(',');
            match measure(*function, &x, &ctx, repeats) {
                Some(nanos) => out.push_str(&format!("{:8}", nanos)),
                None => out.push_str("        "),
            }
        }
        out.push('\n');
        x = x.add(&step);
    }
    out
}

/// Median evaluation time over `repeats` runs, or `None` when the function
/// fails arithmetically for this sample.
fn measure(function: MathFn, x: &Decimal, ctx: &DecimalContext, repeats: usize) -> Option<u64> {
    let mut nanos = Vec::with_capacity(repeats);
    for _ in 0..repeats.max(1) {
        let started = Instant::now();
        function(x, ctx).ok()?;
        nanos.push(started.elapsed().as_nanos() as u64);
    }
    nanos.sort_unstable();
    let half = nanos.len() / 2;
    if nanos.len() % 2 == 0 {
        Some((nanos[half - 1] + nanos[half]) / 2)
    } else {
        Some(nanos[half])
    }
}

fn parse_literal(literal: &str) -> Decimal {
    literal
        .parse()
        .unwrap_or_else(|err| panic!("invalid report literal {literal:?}: {err}"))
}

fn decimal_to_f64(value: &Decimal) -> f64 {
    let (mantissa, exponent) = value.to_mantissa_exponent();
    mantissa * 10f64.powi(exponent as i32)
}
