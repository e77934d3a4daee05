//! Game state tests - selection, scoring, row insertion and lifecycle

use tui_sumblocks::core::{GameEvent, GameState};
use tui_sumblocks::types::{
    Block, BlockId, GameAction, Mode, Phase, Position, COLS, INITIAL_ROWS, ROWS, TARGET_MAX,
    TARGET_MIN, TIME_LIMIT_SECS,
};

/// Start a game, replace the grid with `rows` (last entry = bottom row) and
/// force the target.
fn setup(mode: Mode, rows: &[[u8; COLS]], target: u32) -> GameState {
    let mut gs = GameState::new(7);
    gs.apply_action(GameAction::Start(mode));
    gs.grid_mut().clear();
    let first = ROWS - rows.len();
    for (i, values) in rows.iter().enumerate() {
        for (col, &v) in values.iter().enumerate() {
            if v != 0 {
                let block = Block {
                    id: BlockId(500 + (i * COLS + col) as u32),
                    value: v,
                };
                gs.grid_mut().set(first + i, col, Some(block));
            }
        }
    }
    gs.set_target(target);
    gs
}

const FOUR_ROWS: [[u8; COLS]; 4] = [
    [2, 2, 2, 2, 2, 2],
    [3, 3, 3, 3, 3, 3],
    [4, 4, 4, 4, 4, 4],
    [9, 6, 1, 1, 1, 1],
];

fn click(gs: &mut GameState, row: u8, col: u8) {
    gs.apply_action(GameAction::Click { row, col });
}

/// Depth-first search for cells whose values sum exactly to `target`.
fn find_subset(cells: &[(Position, u8)], target: u32, start: usize, picked: &mut Vec<Position>) -> bool {
    if target == 0 {
        return true;
    }
    for i in start..cells.len() {
        let (pos, value) = cells[i];
        if value as u32 <= target {
            picked.push(pos);
            if find_subset(cells, target - value as u32, i + 1, picked) {
                return true;
            }
            picked.pop();
        }
    }
    false
}

#[test]
fn test_new_game_waits_on_start_screen() {
    let gs = GameState::new(1);
    assert_eq!(gs.phase(), Phase::Start);
    assert_eq!(gs.grid().block_count(), 0);
    assert_eq!(gs.score(), 0);
}

#[test]
fn test_init_fills_bottom_rows_with_valid_values() {
    let mut gs = GameState::new(99);
    gs.init_game(Mode::Classic);

    assert_eq!(gs.phase(), Phase::Playing);
    assert_eq!(gs.grid().block_count(), INITIAL_ROWS * COLS);
    for row in 0..ROWS - INITIAL_ROWS {
        assert!(!gs.grid().row_occupied(row));
    }
    for (_, block) in gs.grid().blocks() {
        assert!((1..=9).contains(&block.value));
    }
    assert!((TARGET_MIN..=TARGET_MAX).contains(&gs.target()));
    assert_eq!(gs.time_left(), TIME_LIMIT_SECS);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(1234);
    let mut b = GameState::new(1234);
    a.init_game(Mode::Time);
    b.init_game(Mode::Time);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_exact_sum_clears_scores_and_adds_row_in_classic() {
    let mut gs = setup(Mode::Classic, &FOUR_ROWS, 15);
    let before = gs.grid().block_count();

    click(&mut gs, 9, 0);
    assert_eq!(gs.selection_sum(), 9);
    click(&mut gs, 9, 1);

    assert_eq!(gs.score(), 15);
    assert_eq!(gs.high_score(), 15);
    assert!(gs.selection().is_empty());
    assert!((TARGET_MIN..=TARGET_MAX).contains(&gs.target()));
    // Two cleared, one fresh row inserted.
    assert_eq!(gs.grid().block_count(), before - 2 + COLS);
    assert!(gs.grid().row(ROWS - 1).iter().all(|c| c.is_some()));

    let events = gs.drain_events();
    assert!(events.contains(&GameEvent::Cleared { blocks: 2, points: 15 }));
    assert!(events.contains(&GameEvent::RowAdded));
}

#[test]
fn test_exact_sum_resets_timer_in_time_mode() {
    let mut gs = setup(Mode::Time, &FOUR_ROWS, 15);
    for _ in 0..5 {
        gs.tick_second();
    }
    assert_eq!(gs.time_left(), TIME_LIMIT_SECS - 5);
    let before = gs.grid().block_count();

    click(&mut gs, 9, 0);
    click(&mut gs, 9, 1);

    assert_eq!(gs.score(), 15);
    assert_eq!(gs.time_left(), TIME_LIMIT_SECS);
    // No row insertion on success in time mode.
    assert_eq!(gs.grid().block_count(), before - 2);
}

#[test]
fn test_overshoot_drops_selection_without_penalty() {
    let mut gs = setup(Mode::Classic, &FOUR_ROWS, 10);
    let before = gs.grid().clone();

    click(&mut gs, 9, 0);
    click(&mut gs, 9, 1);

    assert!(gs.selection().is_empty());
    assert_eq!(gs.selection_sum(), 0);
    assert_eq!(gs.score(), 0);
    assert_eq!(gs.target(), 10);
    assert_eq!(gs.grid(), &before);
}

#[test]
fn test_clicking_selected_block_deselects_it() {
    let mut gs = setup(Mode::Classic, &FOUR_ROWS, 30);
    click(&mut gs, 6, 0);
    click(&mut gs, 7, 0);
    assert_eq!(gs.selection_sum(), 5);

    click(&mut gs, 6, 0);
    assert_eq!(gs.selection(), &[Position::new(7, 0)]);
    assert_eq!(gs.selection_sum(), 3);
}

#[test]
fn test_invalid_clicks_are_noops() {
    let mut gs = setup(Mode::Classic, &FOUR_ROWS, 30);
    click(&mut gs, 0, 0); // empty
    click(&mut gs, ROWS as u8, 0); // out of bounds
    click(&mut gs, 9, COLS as u8);
    assert!(gs.selection().is_empty());

    gs.toggle_pause();
    click(&mut gs, 9, 0);
    assert!(gs.selection().is_empty());
}

#[test]
fn test_gravity_after_clear_keeps_column_order() {
    let rows = [
        [1, 0, 0, 0, 0, 0],
        [2, 0, 0, 0, 0, 0],
        [3, 0, 0, 0, 0, 0],
        [4, 0, 0, 0, 0, 0],
    ];
    let mut gs = setup(Mode::Time, &rows, 3);
    let ids = |gs: &GameState| -> Vec<Option<u32>> {
        gs.grid().column(0).iter().map(|c| c.map(|b| b.id.0)).collect()
    };
    let before = ids(&gs);

    click(&mut gs, 8, 0);

    let after = ids(&gs);
    assert_eq!(after[ROWS - 1], before[ROWS - 1]);
    assert_eq!(after[ROWS - 2], before[ROWS - 3]);
    assert_eq!(after[ROWS - 3], before[ROWS - 4]);
    assert_eq!(after[ROWS - 4], None);
}

#[test]
fn test_add_row_until_game_over() {
    let mut gs = GameState::new(5);
    gs.init_game(Mode::Classic);

    for _ in 0..ROWS - INITIAL_ROWS {
        assert!(gs.add_row());
    }
    assert_eq!(gs.grid().block_count(), ROWS * COLS);
    assert_eq!(gs.phase(), Phase::Playing);

    let full = gs.grid().clone();
    assert!(!gs.add_row());
    assert_eq!(gs.phase(), Phase::GameOver);
    assert_eq!(gs.grid(), &full);

    // Game over is terminal until restart.
    assert!(!gs.add_row());
    let snap = gs.snapshot();
    click(&mut gs, 9, 0);
    assert_eq!(gs.snapshot(), snap);
}

#[test]
fn test_add_row_carries_selection_with_blocks() {
    let mut gs = setup(Mode::Classic, &FOUR_ROWS, 30);
    click(&mut gs, 9, 0);
    assert!(gs.add_row());
    assert_eq!(gs.selection(), &[Position::new(8, 0)]);
    assert_eq!(gs.grid().get(8, 0).map(|b| b.value), Some(9));
    assert_eq!(gs.selection_sum(), 9);
}

#[test]
fn test_high_score_survives_restart_and_menu() {
    let mut gs = setup(Mode::Classic, &FOUR_ROWS, 15);
    click(&mut gs, 9, 0);
    click(&mut gs, 9, 1);
    assert_eq!(gs.high_score(), 15);

    gs.apply_action(GameAction::Restart);
    assert_eq!(gs.phase(), Phase::Playing);
    assert_eq!(gs.score(), 0);
    assert_eq!(gs.high_score(), 15);

    gs.apply_action(GameAction::BackToStart);
    assert_eq!(gs.phase(), Phase::Start);
    assert_eq!(gs.high_score(), 15);

    // Restart from the start screen does nothing.
    gs.apply_action(GameAction::Restart);
    assert_eq!(gs.phase(), Phase::Start);
}

#[test]
fn test_pause_only_while_playing() {
    let mut gs = GameState::new(3);
    gs.toggle_pause();
    assert!(!gs.paused());

    gs.init_game(Mode::Time);
    assert!(gs.countdown_key().is_some());
    gs.toggle_pause();
    assert!(gs.paused());
    assert!(gs.countdown_key().is_none());
    assert!(!gs.tick_second());
    assert_eq!(gs.time_left(), TIME_LIMIT_SECS);
}

#[test]
fn test_tip_requests_and_stale_replies() {
    let mut gs = GameState::new(11);
    gs.init_game(Mode::Classic);
    let first = gs.take_tip_request().expect("init requests a tip");
    assert_eq!(first.mode, Mode::Classic);
    assert!(gs.take_tip_request().is_none());

    gs.apply_action(GameAction::Restart);
    let second = gs.take_tip_request().expect("restart requests a tip");
    assert!(second.id > first.id);

    assert!(!gs.apply_tip(first.id, "old news"));
    assert_ne!(gs.tip(), "old news");
    assert!(gs.apply_tip(second.id, "Go for 9 + 1."));
    assert_eq!(gs.tip(), "Go for 9 + 1.");
}

#[test]
fn test_random_grid_can_be_cleared_by_search() {
    let mut gs = GameState::new(2024);
    gs.init_game(Mode::Time);

    let mut cleared = 0;
    for _ in 0..10 {
        let cells: Vec<(Position, u8)> = gs.grid().blocks().map(|(p, b)| (p, b.value)).collect();
        let mut picked = Vec::new();
        if !find_subset(&cells, gs.target(), 0, &mut picked) {
            break;
        }
        let score = gs.score();
        let target = gs.target();
        for pos in &picked {
            click(&mut gs, pos.row, pos.col);
        }
        assert_eq!(gs.score(), score + target);
        assert!(gs.selection().is_empty());
        cleared += 1;
    }
    assert!(cleared > 0);
    assert_eq!(gs.high_score(), gs.score());
}
