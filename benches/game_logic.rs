use criterion::{black_box, criterion_group, criterion_main, Criterion};
use block_grid::core::{create_piece, EngineConfig, GameEngine, Grid};
use block_grid::engine::{best_placement, enumerate_placements};
use block_grid::types::PieceKind;

fn started(seed: u32) -> GameEngine {
    let mut game = GameEngine::with_config(EngineConfig::default().with_seed(seed))
        .expect("default config is valid");
    game.start().expect("fresh game starts");
    game
}

fn bench_can_place(c: &mut Criterion) {
    let grid = Grid::default();
    let piece = create_piece(PieceKind::Plus.index()).expect("catalog piece");

    c.bench_function("can_place_plus", |b| {
        b.iter(|| grid.can_place(black_box(&piece), black_box(2), black_box(2)))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_row_and_column", |b| {
        b.iter(|| {
            let mut grid = Grid::default();
            for i in 0..5 {
                grid.set(i, 2, 1).expect("cell on grid");
                grid.set(2, i, 1).expect("cell on grid");
            }
            let done = grid.find_completed_lines();
            grid.clear(&done.blocks);
            done.lines
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut piece = create_piece(PieceKind::J.index()).expect("catalog piece");

    c.bench_function("rotate_piece", |b| {
        b.iter(|| {
            piece.rotate();
        })
    });
}

fn bench_spawn_piece(c: &mut Criterion) {
    let mut game = started(12345);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            game.spawn_piece();
        })
    });
}

fn bench_planner(c: &mut Criterion) {
    let game = started(12345);

    c.bench_function("enumerate_placements", |b| {
        b.iter(|| enumerate_placements(black_box(&game)))
    });
    c.bench_function("best_placement", |b| {
        b.iter(|| best_placement(black_box(&game)))
    });
}

criterion_group!(
    benches,
    bench_can_place,
    bench_line_clear,
    bench_rotate,
    bench_spawn_piece,
    bench_planner
);
criterion_main!(benches);
