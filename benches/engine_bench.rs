use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use tilemerge::board::{compress_and_merge, is_game_over, Board, Direction, ALL_DIRECTIONS};
use tilemerge::protocol::{decode_state, encode_state};
use tilemerge::spawn::SpawnRules;

/// A mid-game position with merges available in every direction.
const MIDGAME: [u8; 16] = [1, 1, 2, 3, 0, 2, 2, 4, 5, 0, 4, 4, 6, 6, 0, 1];

/// A terminal position: full, no equal neighbours.
const CHECKERBOARD: [u8; 16] = [2, 4, 2, 4, 4, 2, 4, 2, 2, 4, 2, 4, 4, 2, 4, 2];

fn bench_compress_and_merge(c: &mut Criterion) {
    let line = [2u8, 2, 0, 2];
    c.bench_function("compress_and_merge_4", |b| {
        b.iter(|| compress_and_merge(black_box(&line)))
    });
}

fn bench_slide(c: &mut Criterion) {
    let board = Board::from_tiles(4, MIDGAME.to_vec()).unwrap();
    c.bench_function("slide_all_directions", |b| {
        b.iter(|| {
            for dir in ALL_DIRECTIONS {
                black_box(board.slide(black_box(dir)));
            }
        })
    });
}

fn bench_make_move(c: &mut Criterion) {
    let rules = SpawnRules::default();
    let start = Board::from_tiles(4, MIDGAME.to_vec()).unwrap();
    c.bench_function("make_move_left_with_spawn", |b| {
        let mut rng = SmallRng::seed_from_u64(1);
        b.iter(|| {
            let mut board = start.clone();
            board.make_move(black_box(Direction::Left), &rules, &mut rng)
        })
    });
}

fn bench_is_game_over(c: &mut Criterion) {
    c.bench_function("is_game_over_terminal", |b| {
        b.iter(|| is_game_over(4, black_box(&CHECKERBOARD)))
    });
}

fn bench_random_game(c: &mut Criterion) {
    let rules = SpawnRules::default();
    c.bench_function("random_game_4x4", |b| {
        let mut rng = SmallRng::seed_from_u64(7);
        b.iter(|| {
            let mut board = Board::new(4, &rules, &mut rng);
            let mut i = 0usize;
            let mut stuck = 0;
            while !board.game_over() && stuck < 4 {
                if board.make_move(ALL_DIRECTIONS[i % 4], &rules, &mut rng) {
                    stuck = 0;
                } else {
                    stuck += 1;
                }
                i += 1;
            }
            board.score()
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let board = Board::from_tiles(4, MIDGAME.to_vec()).unwrap();
    let json = encode_state(&board);
    c.bench_function("encode_state", |b| b.iter(|| encode_state(black_box(&board))));
    c.bench_function("decode_state", |b| b.iter(|| decode_state(black_box(&json))));
}

criterion_group!(
    benches,
    bench_compress_and_merge,
    bench_slide,
    bench_make_move,
    bench_is_game_over,
    bench_random_game,
    bench_snapshot
);
criterion_main!(benches);
