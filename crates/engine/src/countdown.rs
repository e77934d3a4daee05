//! The one-second countdown scheduler.
//!
//! A single owned timer, armed only while the game reports a
//! [`CountdownKey`]. Any change of key (pause, resume, mode switch, game
//! over, back to start, restart) cancels the running timer and drops its
//! partial second, so no tick scheduled for an old state can fire into a
//! new one.

use crate::core::CountdownKey;

#[derive(Debug, Clone)]
pub struct Countdown {
    period_ms: u32,
    armed: Option<CountdownKey>,
    elapsed_ms: u32,
}

impl Countdown {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            armed: None,
            elapsed_ms: 0,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn armed_key(&self) -> Option<CountdownKey> {
        self.armed
    }

    /// Milliseconds until the next tick, if armed.
    pub fn remaining_ms(&self) -> Option<u32> {
        self.armed.map(|_| self.period_ms - self.elapsed_ms)
    }

    /// Arm, re-arm or cancel to match the game's current key.
    ///
    /// Returns true if the timer changed.
    pub fn sync(&mut self, key: Option<CountdownKey>) -> bool {
        if self.armed == key {
            return false;
        }

        if let Some(old) = self.armed {
            log::debug!("countdown cancelled (epoch {})", old.epoch);
        }
        self.armed = key;
        self.elapsed_ms = 0;
        if let Some(new) = key {
            log::debug!("countdown armed (epoch {}, {}ms)", new.epoch, self.period_ms);
        }
        true
    }

    /// Advance the timer and return how many whole ticks elapsed.
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        if self.armed.is_none() {
            return 0;
        }
        let total = self.elapsed_ms.saturating_add(dt_ms);
        self.elapsed_ms = total % self.period_ms;
        total / self.period_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(epoch: u32) -> Option<CountdownKey> {
        Some(CountdownKey { epoch })
    }

    #[test]
    fn test_idle_countdown_never_fires() {
        let mut c = Countdown::new(1000);
        assert_eq!(c.advance(5000), 0);
        assert_eq!(c.remaining_ms(), None);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut c = Countdown::new(1000);
        assert!(c.sync(key(1)));
        assert_eq!(c.advance(999), 0);
        assert_eq!(c.advance(1), 1);
        assert_eq!(c.advance(2500), 2);
        assert_eq!(c.remaining_ms(), Some(500));
    }

    #[test]
    fn test_same_key_keeps_partial_second() {
        let mut c = Countdown::new(1000);
        c.sync(key(1));
        c.advance(600);
        assert!(!c.sync(key(1)));
        assert_eq!(c.advance(400), 1);
    }

    #[test]
    fn test_new_key_cancels_partial_second() {
        let mut c = Countdown::new(1000);
        c.sync(key(1));
        c.advance(900);
        assert!(c.sync(key(2)));
        assert_eq!(c.advance(200), 0);
        assert_eq!(c.remaining_ms(), Some(800));
    }

    #[test]
    fn test_cancel_disarms() {
        let mut c = Countdown::new(1000);
        c.sync(key(1));
        assert!(c.sync(None));
        assert!(!c.is_armed());
        assert_eq!(c.advance(10_000), 0);
    }
}
