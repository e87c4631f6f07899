//! Builtin benchmarks
//!
//! Measures literal parsing, radix formatting and range membership.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pycompat::builtins::{call, hex, parse_int, range};
use pycompat::Value;

fn bench_parse_int(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_int");

    let literals = [
        ("decimal", "9223372036854775807", 10),
        ("hex_marker", "-0x7fffffffffffffff", 16),
        ("binary", "0b1011011101111011111", 2),
        ("base36", "  zzzzzzzzzzzz  ", 36),
    ];

    for (name, literal, base) in literals.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), literal, |b, literal| {
            b.iter(|| parse_int(black_box(literal), *base))
        });
    }

    group.finish();
}

fn bench_radix_format(c: &mut Criterion) {
    c.bench_function("hex_i64_min", |b| b.iter(|| hex(black_box(&i64::MIN))));
}

fn bench_range_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_count");

    for (start, stop, step) in [(-1_000_000_000i64, 1_000_000_000, 1000), (0, i64::MAX, 7), (i64::MAX, i64::MIN, -3)] {
        let r = range(start, stop, step).unwrap();
        group.bench_with_input(BenchmarkId::new("step", step), &r, |b, r| {
            b.iter(|| r.count(black_box(999_999_000)))
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let args = [Value::from(-7), Value::from(2)];
    c.bench_function("call_divmod", |b| b.iter(|| call("divmod", black_box(&args))));
}

criterion_group!(
    benches,
    bench_parse_int,
    bench_radix_format,
    bench_range_count,
    bench_dispatch
);
criterion_main!(benches);
