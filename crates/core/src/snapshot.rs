use crate::types::{Mode, Phase, COLS, ROWS};

/// Read-only view of everything the front end draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Block values, 0 = empty.
    pub grid: [[u8; COLS]; ROWS],
    pub selected: [[bool; COLS]; ROWS],
    pub selection_len: u8,
    pub selection_sum: u32,
    pub target: u32,
    pub score: u32,
    pub high_score: u32,
    pub time_left: u32,
    pub mode: Mode,
    pub phase: Phase,
    pub paused: bool,
    pub episode_id: u32,
    pub tip: String,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && !self.paused
    }

    pub fn is_selected(&self, row: usize, col: usize) -> bool {
        self.selected
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn block_count(&self) -> usize {
        self.grid.iter().flatten().filter(|&&v| v != 0).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; COLS]; ROWS],
            selected: [[false; COLS]; ROWS],
            selection_len: 0,
            selection_sum: 0,
            target: 0,
            score: 0,
            high_score: 0,
            time_left: 0,
            mode: Mode::Classic,
            phase: Phase::Start,
            paused: false,
            episode_id: 0,
            tip: String::new(),
        }
    }
}
