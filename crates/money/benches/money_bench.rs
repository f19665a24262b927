use criterion::{Criterion, criterion_group, criterion_main};
use money::{Money, carry};
use std::hint::black_box;

fn bench_sum(c: &mut Criterion) {
    let a = Money::new("USD", 1_234, 560_000_000);
    let b = Money::new("USD", -17, -990_000_000);

    c.bench_function("money/sum", |bench| {
        bench.iter(|| black_box(&a).sum(black_box(&b)).unwrap());
    });
}

fn bench_multiply_slow(c: &mut Criterion) {
    let price = Money::new("USD", 19, 990_000_000);

    c.bench_function("money/multiply_slow_x10", |bench| {
        bench.iter(|| black_box(&price).multiply_slow(black_box(10)).unwrap());
    });

    c.bench_function("money/multiply_slow_x100", |bench| {
        bench.iter(|| black_box(&price).multiply_slow(black_box(100)).unwrap());
    });
}

fn bench_carry(c: &mut Criterion) {
    c.bench_function("money/carry", |bench| {
        bench.iter(|| carry(black_box(8.845_643_520_566), black_box(956_000_000.49)));
    });
}

criterion_group!(benches, bench_sum, bench_multiply_slow, bench_carry);
criterion_main!(benches);
