//! Timer module - the fall scheduler owned by the game
//!
//! `FallTimer` accumulates elapsed time and reports how many automatic
//! descents are due. It only counts while armed. Every arm, cancel, or
//! interval change bumps a generation counter so a real-time driver holding a
//! deadline computed earlier can tell that it went stale.

use crate::types::BASE_FALL_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallTimer {
    interval_ms: u32,
    elapsed_ms: u32,
    armed: bool,
    generation: u64,
}

impl FallTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            armed: false,
            generation: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time accumulated toward the next descent
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Start counting from zero
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed_ms = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Stop counting and drop any partial progress
    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Change the interval; partial progress toward the next descent restarts
    pub fn set_interval(&mut self, interval_ms: u32) {
        let interval_ms = interval_ms.max(1);
        if interval_ms == self.interval_ms {
            return;
        }
        self.interval_ms = interval_ms;
        self.elapsed_ms = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Advance by `elapsed_ms` and return the number of descents now due
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.armed {
            return 0;
        }
        let total = self.elapsed_ms.saturating_add(elapsed_ms);
        self.elapsed_ms = total % self.interval_ms;
        total / self.interval_ms
    }
}

impl Default for FallTimer {
    fn default() -> Self {
        Self::new(BASE_FALL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = FallTimer::new(1000);
        assert_eq!(timer.advance(5000), 0);
    }

    #[test]
    fn test_advance_counts_due_descents() {
        let mut timer = FallTimer::new(1000);
        timer.arm();
        assert_eq!(timer.advance(999), 0);
        assert_eq!(timer.advance(1), 1);
        assert_eq!(timer.advance(2500), 2);
        assert_eq!(timer.elapsed_ms(), 500);
    }

    #[test]
    fn test_cancel_drops_progress_and_bumps_generation() {
        let mut timer = FallTimer::new(1000);
        timer.arm();
        timer.advance(900);
        let gen = timer.generation();

        timer.cancel();
        assert!(!timer.is_armed());
        assert!(timer.generation() > gen);
        assert_eq!(timer.advance(2000), 0);

        timer.arm();
        assert_eq!(timer.advance(100), 0);
    }

    #[test]
    fn test_set_interval() {
        let mut timer = FallTimer::new(1000);
        timer.arm();
        timer.advance(600);
        let gen = timer.generation();

        timer.set_interval(1000);
        assert_eq!(timer.generation(), gen);

        timer.set_interval(900);
        assert_eq!(timer.interval_ms(), 900);
        assert!(timer.generation() > gen);
        assert_eq!(timer.advance(899), 0);
        assert_eq!(timer.advance(1), 1);
    }
}
