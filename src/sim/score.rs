//! Run score: time-based accrual plus gem bonuses

use serde::{Deserialize, Serialize};

/// Score for the current run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    value: u64,
    /// Timestamp of the last time-based award (None until the run's first tick)
    last_award_time: Option<f64>,
}

impl ScoreTracker {
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Back to zero for a new run
    pub fn reset(&mut self) {
        self.value = 0;
        self.last_award_time = None;
    }

    /// Award `floor(scroll_speed)` once more than `interval` seconds have
    /// passed since the previous award. Returns whether the score changed.
    ///
    /// The first tick after [`reset`](Self::reset) only starts the timer, so
    /// a new run never collects points left over from the previous one.
    pub fn tick(&mut self, now: f64, scroll_speed: f32, interval: f64) -> bool {
        let Some(last) = self.last_award_time else {
            self.last_award_time = Some(now);
            return false;
        };
        if now - last > interval {
            self.value += scroll_speed.max(0.0).floor() as u64;
            self.last_award_time = Some(now);
            true
        } else {
            false
        }
    }

    /// Flat bonus, independent of the timer
    pub fn add_bonus(&mut self, points: u64) {
        self.value += points;
    }

    /// Overwrite the score (host-driven scenarios and debugging)
    pub fn set(&mut self, value: u64) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_starts_timer() {
        let mut score = ScoreTracker::default();
        assert!(!score.tick(100.0, 5.0, 1.0));
        assert_eq!(score.value(), 0);
        // Exactly one second is not enough
        assert!(!score.tick(101.0, 5.0, 1.0));
        assert!(score.tick(101.01, 5.7, 1.0));
        assert_eq!(score.value(), 5);
    }

    #[test]
    fn test_timer_resets_after_award() {
        let mut score = ScoreTracker::default();
        score.tick(0.0, 5.0, 1.0);
        score.tick(1.5, 5.0, 1.0);
        assert!(!score.tick(2.4, 6.0, 1.0));
        assert!(score.tick(2.6, 6.0, 1.0));
        assert_eq!(score.value(), 11);
    }

    #[test]
    fn test_bonus_ignores_timer() {
        let mut score = ScoreTracker::default();
        score.tick(0.0, 5.0, 1.0);
        score.add_bonus(50);
        assert_eq!(score.value(), 50);
        assert!(!score.tick(0.5, 5.0, 1.0));
        assert_eq!(score.value(), 50);
    }

    #[test]
    fn test_reset() {
        let mut score = ScoreTracker::default();
        score.tick(0.0, 5.0, 1.0);
        score.add_bonus(50);
        score.reset();
        assert_eq!(score.value(), 0);
        assert!(!score.tick(10.0, 5.0, 1.0));
    }
}
