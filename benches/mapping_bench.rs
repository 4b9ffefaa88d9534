// SPDX-License-Identifier: MIT OR Apache-2.0
//! Benchmarks for chain building, strategy lookup, and combinator mapping.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use errmap::{Error, HashableMapper, IgnoreListMapper, ListMapper, Mapper, MultiErr, chain};

// ── Helpers ─────────────────────────────────────────────────────────────

fn chain_of(n: usize) -> Error {
    chain::combine((0..n).map(|i| Error::new(format!("error {i}"))))
        .unwrap_or_else(|| Error::new("empty"))
}

fn hashable_with(n: usize) -> HashableMapper {
    (0..n)
        .fold(HashableMapper::builder(), |b, i| {
            b.append(format!("key {i}"), format!("TARGET_{i}"))
        })
        .build()
}

fn list_with(n: usize) -> ListMapper {
    (0..n)
        .fold(ListMapper::builder(), |b, i| {
            b.append(format!("key {i}"), format!("TARGET_{i}"))
        })
        .build()
}

// ── Chains ──────────────────────────────────────────────────────────────

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");
    for n in [2usize, 8, 32] {
        let errs: Vec<Error> = (0..n).map(|i| Error::new(format!("error {i}"))).collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &errs, |b, errs| {
            b.iter(|| chain::combine(black_box(errs.clone())));
        });
    }
    group.finish();
}

// ── Strategies ──────────────────────────────────────────────────────────

fn bench_hashable_vs_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy_miss");
    let err = chain_of(8);
    for n in [8usize, 64, 512] {
        let hashable = hashable_with(n);
        let list = list_with(n);
        group.bench_with_input(BenchmarkId::new("hashable", n), &err, |b, err| {
            b.iter(|| hashable.map(black_box(err)).is_some());
        });
        group.bench_with_input(BenchmarkId::new("list", n), &err, |b, err| {
            b.iter(|| list.map(black_box(err)).is_some());
        });
    }
    group.finish();
}

fn bench_template_match(c: &mut Criterion) {
    let list = ListMapper::builder()
        .append_template("user {} not found", "NOT_FOUND")
        .build();
    let err = errmap::errorf!("user {} not found", 42);
    c.bench_function("template_match", |b| {
        b.iter(|| list.map(black_box(&err)).is_some());
    });
}

// ── Combinator ──────────────────────────────────────────────────────────

fn bench_mapped(c: &mut Criterion) {
    let mappers = MultiErr::builder()
        .mapper(IgnoreListMapper::builder().append("context canceled").build())
        .mapper(list_with(16))
        .mapper(hashable_with(256))
        .build();
    let hit = chain::append(Some(chain_of(4)), Some(Error::new("key 200")));
    let miss = Some(chain_of(4));

    let mut group = c.benchmark_group("mapped");
    group.bench_function("hit", |b| {
        b.iter(|| mappers.mapped(black_box(hit.clone()), None));
    });
    group.bench_function("miss_with_default", |b| {
        b.iter(|| mappers.mapped(black_box(miss.clone()), Some(Error::new("DEFAULT"))));
    });
    group.bench_function("status_fallback", |b| {
        b.iter(|| mappers.mapped_with_status(black_box(miss.clone()), Some(Error::new("DEFAULT"))));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_combine,
    bench_hashable_vs_list,
    bench_template_match,
    bench_mapped
);
criterion_main!(benches);
