use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_sumblocks::core::{GameSnapshot, GameState, Grid};
use tui_sumblocks::engine::Session;
use tui_sumblocks::term::{FrameBuffer, GameView, Viewport};
use tui_sumblocks::types::{Block, BlockId, GameAction, Mode, Phase, COLS, ROWS};

fn bench_click(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.init_game(Mode::Time);
    let mut col = 0u8;

    c.bench_function("block_click", |b| {
        b.iter(|| {
            col = (col + 1) % COLS as u8;
            state.handle_block_click(black_box(9), black_box(col));
            if state.phase() != Phase::Playing {
                state.apply_action(GameAction::Restart);
            }
        })
    });
}

fn bench_compact(c: &mut Criterion) {
    c.bench_function("compact_checkerboard", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            // Every other row filled, so every block has to fall.
            for row in (0..ROWS).step_by(2) {
                let blocks = std::array::from_fn(|col| Block {
                    id: BlockId((row * COLS + col) as u32),
                    value: 5,
                });
                grid.fill_row(row, blocks);
            }
            black_box(grid.compact_columns());
        })
    });
}

fn bench_add_row(c: &mut Criterion) {
    c.bench_function("add_row_to_game_over", |b| {
        b.iter(|| {
            let mut state = GameState::new(7);
            state.init_game(Mode::Classic);
            while state.add_row() {}
            black_box(state.phase());
        })
    });
}

fn bench_advance(c: &mut Criterion) {
    let mut session = Session::new(3);
    session.apply(GameAction::Start(Mode::Time));

    c.bench_function("session_advance_50ms", |b| {
        b.iter(|| {
            session.advance(black_box(50));
            if session.game().phase() == Phase::GameOver {
                session.apply(GameAction::Restart);
            }
        })
    });
}

fn bench_snapshot_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.init_game(Mode::Time);
    let view = GameView::default();
    let vp = Viewport::new(100, 30);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });

    c.bench_function("render_into_100x30", |b| {
        b.iter(|| {
            view.render_into(black_box(&snap), None, vp, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_click,
    bench_compact,
    bench_add_row,
    bench_advance,
    bench_snapshot_render
);
criterion_main!(benches);
