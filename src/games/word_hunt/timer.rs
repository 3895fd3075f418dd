//! Wall-clock countdown for a timed game.
//!
//! Remaining time is reduced by the real elapsed time between ticks, so a
//! slow or suspended caller never stretches the game.

use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Default game length.
pub const GAME_DURATION: Duration = Duration::from_secs(120);

/// Countdown driven by explicit ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration: Duration,
    remaining: Duration,
    last_tick: Option<Instant>,
    expired: bool,
}

impl Countdown {
    /// Creates a stopped countdown of the given length.
    #[instrument]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: duration,
            last_tick: None,
            expired: false,
        }
    }

    /// Full length of the countdown.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whether the countdown is running.
    pub fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Whether the countdown reached zero.
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Resets to full length and starts counting from `now`.
    #[instrument(skip(self))]
    pub fn start_at(&mut self, now: Instant) {
        self.remaining = self.duration;
        self.expired = false;
        self.last_tick = Some(now);
        debug!(duration_ms = self.duration.as_millis() as u64, "Countdown started");
    }

    /// Stops counting without resetting the remaining time.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        self.last_tick = None;
    }

    /// Resets to full length and stops.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.expired = false;
        self.last_tick = None;
    }

    /// Subtracts the time elapsed since the previous tick.
    ///
    /// Returns true exactly once: on the tick that reaches zero. A stopped or
    /// already expired countdown returns false.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_tick else {
            return false;
        };
        let elapsed = now.saturating_duration_since(last);
        self.last_tick = Some(now);
        self.remaining = self.remaining.saturating_sub(elapsed);

        if self.remaining.is_zero() && !self.expired {
            self.expired = true;
            self.last_tick = None;
            debug!("Countdown expired");
            return true;
        }
        false
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(GAME_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_countdown_ignores_ticks() {
        let mut countdown = Countdown::new(Duration::from_secs(10));
        assert!(!countdown.tick_at(Instant::now() + Duration::from_secs(60)));
        assert_eq!(countdown.remaining(), Duration::from_secs(10));
    }

    #[test]
    fn test_uses_elapsed_wall_clock() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(10));
        countdown.start_at(t0);
        assert!(!countdown.tick_at(t0 + Duration::from_millis(16)));
        // A long gap (backgrounded tab) is charged in full.
        assert!(!countdown.tick_at(t0 + Duration::from_secs(7)));
        assert_eq!(countdown.remaining(), Duration::from_secs(3));
    }

    #[test]
    fn test_expires_once() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(2));
        countdown.start_at(t0);
        assert!(countdown.tick_at(t0 + Duration::from_secs(5)));
        assert!(countdown.is_expired());
        assert!(!countdown.tick_at(t0 + Duration::from_secs(6)));
        assert_eq!(countdown.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_reset_restores_duration() {
        let t0 = Instant::now();
        let mut countdown = Countdown::default();
        countdown.start_at(t0);
        countdown.tick_at(t0 + Duration::from_secs(30));
        countdown.reset();
        assert_eq!(countdown.remaining(), GAME_DURATION);
        assert!(!countdown.is_running());
    }
}
