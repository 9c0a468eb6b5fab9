//! Benchmarks for the sliding-block puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use klotski::persistence::parse_board;
use klotski::solver::{solve, Algorithm, Options};

const CLASSIC: &str = "^11^\nv11v\n^<>^\nv22v\n2..2";

/// Benchmark parsing a puzzle file into a board.
fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_board", |b| b.iter(|| parse_board(black_box(CLASSIC))));
}

/// Benchmark the full A* solve of the classic opening.
fn bench_astar_classic(c: &mut Criterion) {
    let board = parse_board(CLASSIC).unwrap();
    c.bench_function("astar_classic", |b| {
        b.iter(|| solve(black_box(&board), Options::default()))
    });
}

/// Benchmark the exhaustive DFS solve of the classic opening.
fn bench_dfs_classic(c: &mut Criterion) {
    let board = parse_board(CLASSIC).unwrap();
    let options = Options {
        algorithm: Algorithm::Dfs,
        ..Options::default()
    };
    let mut group = c.benchmark_group("dfs");
    group.sample_size(10);
    group.bench_function("classic", |b| {
        b.iter(|| solve(black_box(&board), options))
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_astar_classic, bench_dfs_classic);
criterion_main!(benches);
