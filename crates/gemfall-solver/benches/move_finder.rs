//! Benchmarks for move finders.
//!
//! Compares the cloning reference finder with the local finder on fixed 8×8
//! boards.
//!
//! # Benchmarks
//!
//! - **`has_valid_move`**: deadlock check, the query run after every cascade.
//! - **`valid_moves`**: full enumeration of valid swaps, as used by hints.
//!
//! # Test Data
//!
//! - **`late_move`**: valid swaps exist only around the bottom-right corner, so
//!   both finders scan almost every pair before finding one.
//! - **`deadlocked`**: no valid swap at all; the worst case for the deadlock check.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench move_finder
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main};
use gemfall_core::Grid;
use gemfall_solver::{BoxedMoveFinder, ExhaustiveFinder, LocalFinder};

const GRIDS: [(&str, &str); 2] = [
    (
        "late_move",
        "
        ABCDABCD
        CDABCDAB
        ABCDABCD
        CDABCDAB
        ABCDABCD
        CDABCDAB
        ABCDABCD
        CDABCDDA
        ",
    ),
    (
        "deadlocked",
        "
        ABCDABCD
        CDABCDAB
        ABCDABCD
        CDABCDAB
        ABCDABCD
        CDABCDAB
        ABCDABCD
        CDABCDAB
        ",
    ),
];

fn finders() -> [BoxedMoveFinder; 2] {
    [Box::new(ExhaustiveFinder::new()), Box::new(LocalFinder::new())]
}

fn bench_has_valid_move(c: &mut Criterion) {
    for (label, text) in GRIDS {
        let grid = Grid::from_str(text).unwrap();
        for finder in finders() {
            c.bench_with_input(
                BenchmarkId::new(format!("has_valid_move/{}", finder.name()), label),
                &grid,
                |b, grid| b.iter(|| finder.has_valid_move(hint::black_box(grid))),
            );
        }
    }
}

fn bench_valid_moves(c: &mut Criterion) {
    for (label, text) in GRIDS {
        let grid = Grid::from_str(text).unwrap();
        for finder in finders() {
            c.bench_with_input(
                BenchmarkId::new(format!("valid_moves/{}", finder.name()), label),
                &grid,
                |b, grid| b.iter(|| finder.valid_moves(hint::black_box(grid))),
            );
        }
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(8));
    targets =
        bench_has_valid_move,
        bench_valid_moves
);
criterion_main!(benches);
