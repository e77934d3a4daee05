//! Session: the game controller plus its countdown, driven by a front end.
//!
//! Every entry point re-syncs the countdown with the controller afterwards,
//! so there is exactly one armed timer per playing+time+unpaused interval.

use crate::core::{GameEvent, GameSnapshot, GameState};
use crate::countdown::Countdown;
use crate::types::{GameAction, TipReply, TipRequest, COUNTDOWN_TICK_MS};

#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    countdown: Countdown,
    last_event: Option<GameEvent>,
}

impl Session {
    pub fn new(seed: u32) -> Self {
        Self::with_tick_ms(seed, COUNTDOWN_TICK_MS)
    }

    pub fn with_tick_ms(seed: u32, tick_ms: u32) -> Self {
        Self {
            game: GameState::new(seed),
            countdown: Countdown::new(tick_ms),
            last_event: None,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Most recent event, for transient UI feedback.
    pub fn last_event(&self) -> Option<GameEvent> {
        self.last_event
    }

    pub fn apply(&mut self, action: GameAction) {
        self.game.apply_action(action);
        self.after_transition();
    }

    /// Advance wall-clock time. Returns the number of countdown ticks applied.
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        self.countdown.sync(self.game.countdown_key());
        let fired = self.countdown.advance(dt_ms);

        let mut applied = 0;
        for _ in 0..fired {
            // A tick may end the game, which cancels the countdown.
            if !self.countdown.is_armed() {
                break;
            }
            self.game.tick_second();
            applied += 1;
            self.after_transition();
        }
        applied
    }

    pub fn take_tip_request(&mut self) -> Option<TipRequest> {
        self.game.take_tip_request()
    }

    /// Apply a tip reply; stale replies are dropped.
    pub fn apply_tip(&mut self, reply: &TipReply) -> bool {
        let applied = self.game.apply_tip(reply.request_id, &reply.text);
        if !applied {
            log::debug!("dropping stale tip for request {}", reply.request_id);
        }
        applied
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    fn after_transition(&mut self) {
        self.countdown.sync(self.game.countdown_key());

        for event in self.game.drain_events() {
            match event {
                GameEvent::Started(mode) => {
                    log::info!(
                        "game {} started in {} mode (target {})",
                        self.game.episode_id(),
                        mode.as_str(),
                        self.game.target()
                    );
                }
                GameEvent::Cleared { blocks, points } => {
                    log::info!(
                        "cleared {} blocks for {} points (score {})",
                        blocks,
                        points,
                        self.game.score()
                    );
                }
                GameEvent::Overshoot { sum } => {
                    log::debug!("selection overshot target: {} > {}", sum, self.game.target());
                }
                GameEvent::RowAdded => {
                    log::debug!("row inserted");
                }
                GameEvent::GameOver { score } => {
                    log::info!(
                        "game {} over with score {} (best {})",
                        self.game.episode_id(),
                        score,
                        self.game.high_score()
                    );
                }
            }
            self.last_event = Some(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mode, Phase, COLS, TIME_LIMIT_SECS};

    #[test]
    fn test_time_mode_idle_inserts_one_row_per_limit() {
        let mut s = Session::new(11);
        s.apply(GameAction::Start(Mode::Time));
        let before = s.game().grid().block_count();

        let ticks = s.advance(TIME_LIMIT_SECS * 1000);
        assert_eq!(ticks, TIME_LIMIT_SECS);
        assert_eq!(s.game().grid().block_count(), before + COLS);
        assert_eq!(s.game().time_left(), TIME_LIMIT_SECS);
        assert_eq!(s.last_event(), Some(GameEvent::RowAdded));
    }

    #[test]
    fn test_classic_mode_has_no_countdown() {
        let mut s = Session::new(11);
        s.apply(GameAction::Start(Mode::Classic));
        assert!(!s.countdown().is_armed());
        assert_eq!(s.advance(60_000), 0);
        assert_eq!(s.game().time_left(), TIME_LIMIT_SECS);
    }

    #[test]
    fn test_pause_cancels_and_resume_rearms() {
        let mut s = Session::new(11);
        s.apply(GameAction::Start(Mode::Time));
        s.advance(1500);
        assert_eq!(s.game().time_left(), TIME_LIMIT_SECS - 1);

        s.apply(GameAction::TogglePause);
        assert!(!s.countdown().is_armed());
        s.advance(10_000);
        assert_eq!(s.game().time_left(), TIME_LIMIT_SECS - 1);

        s.apply(GameAction::TogglePause);
        assert!(s.countdown().is_armed());
        // The half second accumulated before pausing was discarded.
        assert_eq!(s.countdown().remaining_ms(), Some(1000));
    }

    #[test]
    fn test_back_to_start_cancels_countdown() {
        let mut s = Session::new(11);
        s.apply(GameAction::Start(Mode::Time));
        s.apply(GameAction::BackToStart);
        assert_eq!(s.game().phase(), Phase::Start);
        assert!(!s.countdown().is_armed());
    }

    #[test]
    fn test_idle_time_mode_eventually_ends_game() {
        let mut s = Session::new(11);
        s.apply(GameAction::Start(Mode::Time));

        // 6 insertions fill the grid to the top; the 7th ends the game.
        s.advance(TIME_LIMIT_SECS * 1000 * 20);
        assert_eq!(s.game().phase(), Phase::GameOver);
        assert!(!s.countdown().is_armed());
        assert!(matches!(s.last_event(), Some(GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_stale_tip_reply_is_dropped() {
        let mut s = Session::new(11);
        s.apply(GameAction::Start(Mode::Classic));
        let first = s.take_tip_request().unwrap();
        s.apply(GameAction::Restart);
        let second = s.take_tip_request().unwrap();

        assert!(!s.apply_tip(&TipReply {
            request_id: first.id,
            text: "old".to_string(),
        }));
        assert!(s.apply_tip(&TipReply {
            request_id: second.id,
            text: "fresh".to_string(),
        }));
        assert_eq!(s.snapshot().tip, "fresh");
    }
}
