//! Benchmarks for the Mian-Chowla engine.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mianchowla::MianChowla;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for num_terms in [50usize, 100, 200].iter() {
        group.bench_with_input(
            BenchmarkId::new("terms", num_terms),
            num_terms,
            |b, &n| {
                b.iter(|| {
                    let mut mc = MianChowla::new();
                    black_box(mc.term(n - 1).unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_extend_by_one(c: &mut Criterion) {
    c.bench_function("extend_after_100", |b| {
        let mut base = MianChowla::new();
        base.ensure_extended_to(99).unwrap();

        b.iter(|| {
            let mut mc = base.clone();
            black_box(mc.extend_by_one().unwrap())
        })
    });
}

fn bench_find_difference_recorded(c: &mut Criterion) {
    c.bench_function("find_difference_recorded", |b| {
        let mut mc = MianChowla::new();
        mc.ensure_extended_to(199).unwrap();
        let d = mc.term(199).unwrap() - mc.term(0).unwrap();

        b.iter(|| black_box(mc.find_difference(black_box(d), None).unwrap()))
    });
}

fn bench_find_difference_sweep(c: &mut Criterion) {
    c.bench_function("find_difference_sweep_1_to_200", |b| {
        b.iter(|| {
            let mut mc = MianChowla::new();
            for d in 1..=200u64 {
                black_box(mc.find_difference(d, Some(100)).unwrap());
            }
        })
    });
}

fn bench_differences_up_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("differences_up_to");

    for index in [25usize, 50, 100].iter() {
        let mut mc = MianChowla::new();
        mc.ensure_extended_to(*index).unwrap();

        group.bench_with_input(BenchmarkId::new("index", index), index, |b, &i| {
            b.iter(|| black_box(mc.differences_up_to(i).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generate,
    bench_extend_by_one,
    bench_find_difference_recorded,
    bench_find_difference_sweep,
    bench_differences_up_to,
);

criterion_main!(benches);
