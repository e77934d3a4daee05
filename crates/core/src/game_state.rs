//! Game state module - the grid/selection/scoring state machine
//!
//! Ties together the grid, the RNG and the rules. Every operation here is a
//! total function over the state: invalid input (clicking an empty cell,
//! clicking while paused) is a no-op rather than an error.
//!
//! The controller never performs I/O. Side effects that leave the core are
//! queued for the caller instead:
//!
//! - tip requests via [`GameState::take_tip_request`]
//! - lifecycle events via [`GameState::drain_events`]
//! - countdown scheduling via [`GameState::countdown_key`]

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Ordered set of selected positions.
pub type Selection = ArrayVec<Position, GRID_CELLS>;

/// Undrained events kept; when full the oldest one is dropped.
pub const MAX_PENDING_EVENTS: usize = 16;

/// Something noteworthy that happened during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Started(Mode),
    Cleared { blocks: u8, points: u32 },
    Overshoot { sum: u32 },
    RowAdded,
    GameOver { score: u32 },
}

/// Identifies one continuous playing+time+unpaused interval.
///
/// Any transition of phase, mode or pause flag produces a new epoch, so a
/// scheduler holding an old key knows its timer is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownKey {
    pub epoch: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    rng: SimpleRng,
    next_block_id: u32,
    selection: Selection,
    selection_sum: u32,
    target: u32,
    score: u32,
    high_score: u32,
    time_left: u32,
    mode: Mode,
    phase: Phase,
    paused: bool,
    /// Monotonic game id (increments on every init).
    episode_id: u32,
    /// Bumped on every phase/mode/pause transition.
    timer_epoch: u32,
    tip: String,
    /// Id of the most recently issued tip request.
    tip_seq: u64,
    pending_tip: Option<TipRequest>,
    events: ArrayVec<GameEvent, MAX_PENDING_EVENTS>,
}

impl GameState {
    /// Create a new game with the given RNG seed, waiting on the start screen.
    pub fn new(seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            rng: SimpleRng::new(seed),
            next_block_id: 0,
            selection: Selection::new(),
            selection_sum: 0,
            target: 0,
            score: 0,
            high_score: 0,
            time_left: TIME_LIMIT_SECS,
            mode: Mode::Classic,
            phase: Phase::Start,
            paused: false,
            episode_id: 0,
            timer_epoch: 0,
            tip: DEFAULT_TIP.to_string(),
            tip_seq: 0,
            pending_tip: None,
            events: ArrayVec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for puzzle setups. Does not touch the selection.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn set_target(&mut self, target: u32) {
        self.target = target;
    }

    pub fn selection(&self) -> &[Position] {
        &self.selection
    }

    pub fn selection_sum(&self) -> u32 {
        self.selection_sum
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn tip(&self) -> &str {
        &self.tip
    }

    /// Single dispatch entry point for front ends.
    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::Click { row, col } => self.handle_block_click(row, col),
            GameAction::Start(mode) => self.init_game(mode),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Restart => {
                if self.phase != Phase::Start {
                    self.init_game(self.mode);
                }
            }
            GameAction::BackToStart => self.back_to_start(),
        }
    }

    /// Reset everything except the high score and start playing.
    pub fn init_game(&mut self, mode: Mode) {
        // Playing is only entered from Start.
        if self.phase != Phase::Start {
            self.back_to_start();
        }

        self.mode = mode;
        self.score = 0;
        self.selection.clear();
        self.selection_sum = 0;
        self.target = self.rng.target();
        self.time_left = TIME_LIMIT_SECS;

        self.grid.clear();
        for row in ROWS - INITIAL_ROWS..ROWS {
            let blocks = self.random_row();
            self.grid.fill_row(row, blocks);
        }

        self.phase = Phase::Playing;
        self.paused = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.bump_timer_epoch();
        self.push_event(GameEvent::Started(mode));
        self.request_tip();
    }

    /// Insert a fresh bottom row, or end the game if the top row is occupied.
    ///
    /// Returns true if a row was inserted. On game over the grid is left
    /// untouched.
    pub fn add_row(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        if self.grid.row_occupied(0) {
            self.end_game();
            return false;
        }

        let blocks = self.random_row();
        self.grid.push_bottom_row(blocks);

        // Row 0 was empty, so every selected block moved up exactly one row.
        for pos in self.selection.iter_mut() {
            pos.row -= 1;
        }

        self.push_event(GameEvent::RowAdded);
        true
    }

    /// Toggle selection of a cell and resolve the new sum against the target.
    pub fn handle_block_click(&mut self, row: u8, col: u8) {
        if self.phase != Phase::Playing || self.paused {
            return;
        }

        let pos = Position::new(row, col);
        if self.grid.get_at(pos).is_none() {
            return;
        }

        if let Some(i) = self.selection.iter().position(|&p| p == pos) {
            self.selection.remove(i);
        } else {
            let _ = self.selection.try_push(pos);
        }

        let sum = self.grid.sum_at(&self.selection);
        self.selection_sum = sum;

        if sum == self.target {
            let positions = self.selection.clone();
            self.handle_success(&positions);
        } else if sum > self.target {
            self.selection.clear();
            self.selection_sum = 0;
            self.push_event(GameEvent::Overshoot { sum });
        }
    }

    /// Clear the given cells, score the target and apply gravity.
    pub fn handle_success(&mut self, positions: &[Position]) {
        if self.phase != Phase::Playing {
            return;
        }

        let points = self.target;
        let mut blocks = 0u8;
        for &pos in positions {
            if self.grid.take(pos).is_some() {
                blocks += 1;
            }
        }

        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
        }

        self.grid.compact_columns();
        self.selection.clear();
        self.selection_sum = 0;
        self.target = self.rng.target();
        self.push_event(GameEvent::Cleared { blocks, points });

        match self.mode {
            Mode::Classic => {
                self.add_row();
            }
            Mode::Time => {
                self.time_left = TIME_LIMIT_SECS;
            }
        }

        if self.rng.chance_percent(TIP_REFRESH_PERCENT) {
            self.request_tip();
        }
    }

    /// One countdown tick. Only has an effect while the countdown runs.
    ///
    /// Returns true if the countdown expired (and a row insertion was attempted).
    pub fn tick_second(&mut self) -> bool {
        if self.countdown_key().is_none() {
            return false;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return false;
        }

        self.add_row();
        self.time_left = TIME_LIMIT_SECS;
        true
    }

    pub fn toggle_pause(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.paused = !self.paused;
        self.bump_timer_epoch();
    }

    /// Leave the current game for the start screen. The high score is kept.
    pub fn back_to_start(&mut self) {
        if self.phase == Phase::Start {
            return;
        }
        self.phase = Phase::Start;
        self.paused = false;
        self.selection.clear();
        self.selection_sum = 0;
        self.bump_timer_epoch();
    }

    /// Some(key) exactly while playing in time mode and not paused.
    pub fn countdown_key(&self) -> Option<CountdownKey> {
        let running = self.phase == Phase::Playing && self.mode == Mode::Time && !self.paused;
        running.then_some(CountdownKey {
            epoch: self.timer_epoch,
        })
    }

    /// Hand the latest unsent tip request to the I/O layer.
    pub fn take_tip_request(&mut self) -> Option<TipRequest> {
        self.pending_tip.take()
    }

    /// Apply tip text for a request. Replies to superseded requests are
    /// dropped. Returns true if the text was applied.
    pub fn apply_tip(&mut self, request_id: u64, text: &str) -> bool {
        if request_id != self.tip_seq {
            return false;
        }
        self.tip.clear();
        self.tip.push_str(text);
        true
    }

    /// Events produced since the last drain, oldest first. At most the
    /// newest [`MAX_PENDING_EVENTS`] are kept.
    pub fn drain_events(&mut self) -> ArrayVec<GameEvent, MAX_PENDING_EVENTS> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_value_grid(&mut out.grid);

        out.selected = [[false; COLS]; ROWS];
        for pos in &self.selection {
            out.selected[pos.row as usize][pos.col as usize] = true;
        }
        out.selection_len = self.selection.len() as u8;
        out.selection_sum = self.selection_sum;
        out.target = self.target;
        out.score = self.score;
        out.high_score = self.high_score;
        out.time_left = self.time_left;
        out.mode = self.mode;
        out.phase = self.phase;
        out.paused = self.paused;
        out.episode_id = self.episode_id;

        if out.tip != self.tip {
            out.tip.clear();
            out.tip.push_str(&self.tip);
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        self.paused = false;
        self.selection.clear();
        self.selection_sum = 0;
        self.bump_timer_epoch();
        self.push_event(GameEvent::GameOver { score: self.score });
    }

    fn request_tip(&mut self) {
        self.tip_seq = self.tip_seq.wrapping_add(1);
        self.pending_tip = Some(TipRequest {
            id: self.tip_seq,
            score: self.score,
            mode: self.mode,
        });
    }

    fn random_row(&mut self) -> [Block; COLS] {
        std::array::from_fn(|_| self.new_block())
    }

    fn new_block(&mut self) -> Block {
        let id = BlockId(self.next_block_id);
        self.next_block_id = self.next_block_id.wrapping_add(1);
        Block {
            id,
            value: self.rng.block_value(),
        }
    }

    fn bump_timer_epoch(&mut self) {
        self.timer_epoch = self.timer_epoch.wrapping_add(1);
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
