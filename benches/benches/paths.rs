// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use canopy_turtle::{PathSet, SequenceTable, branch_path};

fn collatz(n: u64) -> Vec<u64> {
    let mut seq = vec![n];
    let mut v = n;
    while v > 1 {
        v = if v % 2 == 0 { v / 2 } else { 3 * v + 1 };
        seq.push(v);
    }
    seq
}

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("turtle/branch_path");
    for n in [27_u64, 703, 77_031] {
        let seq = collatz(n);
        group.bench_function(BenchmarkId::from_parameter(seq.len()), |b| {
            b.iter(|| black_box(branch_path(black_box(0.35), &seq, 10.0)));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("turtle/path_set");
    let table = SequenceTable::from_sequences((0..10_000_u64).map(|n| collatz(n.max(1))));
    for rows in [100_usize, 1_000, 10_000] {
        group.bench_function(BenchmarkId::new("generate", rows), |b| {
            b.iter(|| black_box(PathSet::generate(&table, 1..rows, 0.35, 10.0)));
        });
    }
    group.finish();

    let text: String = (1..2_000_u64)
        .map(|n| {
            let values: Vec<String> = collatz(n).iter().map(u64::to_string).collect();
            format!("{n},\"{}\"\n", values.join(", "))
        })
        .collect();
    c.bench_function("turtle/table_parse/2000", |b| {
        b.iter(|| black_box(SequenceTable::parse(black_box(&text)).map(|t| t.len())));
    });
}

criterion_group!(benches, bench_paths);
criterion_main!(benches);
