use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const TOKENS: &[(&str, &str)] = &[
    ("decimal", "12345678987654321"),
    ("real", "-3.14159265358979"),
    ("exponent", "1.5e-12"),
    ("hex", "0x7fff.ff"),
    ("binary", "1011011.01e101b2"),
    ("base36", "kst.rs@36"),
    ("arc", "55d12'9.21\"n"),
];

pub fn number_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_number");
    for (name, token) in TOKENS {
        group.bench_function(format!("long::{name}"), |b| {
            b.iter(|| black_box(kst::parse_long(black_box(token))))
        });
        group.bench_function(format!("real::{name}"), |b| {
            b.iter(|| black_box(kst::parse_real(black_box(token))))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("format_real");
    for v in [0.1, -123456.789, 6.02214076e23, 5e-324] {
        group.bench_function(format!("{v:e}"), |b| {
            b.iter(|| black_box(kst::number::format_real(black_box(v))))
        });
    }
    group.finish();
}

criterion_group!(benches, number_benchmarks);
criterion_main!(benches);
