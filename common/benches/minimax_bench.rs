use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tictactoe_common::engine::tictactoe::{Board, PRO_DEPTH_CAP, get_best_move};

fn bench_best_move_after_corner(depth_cap: Option<usize>) {
    let board: Board = "X........".parse().expect("valid board");
    black_box(get_best_move(black_box(&board), depth_cap));
}

fn bench_best_move_empty_board(depth_cap: Option<usize>) {
    let board = Board::new();
    black_box(get_best_move(black_box(&board), depth_cap));
}

fn bench_best_move_mid_game(depth_cap: Option<usize>) {
    let board: Board = "X.O.X...O".parse().expect("valid board");
    black_box(get_best_move(black_box(&board), depth_cap));
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group.bench_function("hard_empty", |b| {
        b.iter(|| bench_best_move_empty_board(None))
    });

    group.bench_function("hard_after_corner", |b| {
        b.iter(|| bench_best_move_after_corner(None))
    });

    group.bench_function("hard_mid_game", |b| {
        b.iter(|| bench_best_move_mid_game(None))
    });

    group.bench_function("pro_after_corner", |b| {
        b.iter(|| bench_best_move_after_corner(Some(PRO_DEPTH_CAP)))
    });

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
