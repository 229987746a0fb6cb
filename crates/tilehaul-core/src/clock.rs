//! Fixed-interval production clock.
//!
//! Frames arrive at a variable rate; production ticks must not. The clock
//! accumulates elapsed milliseconds and releases one production tick per
//! whole interval, carrying the remainder into the next frame.

use crate::fixed::{Frames, Millis};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimulationClock {
    interval_ms: Millis,
    accumulated_ms: Millis,
    elapsed_ms: Millis,
    frame: Frames,
    production_ticks: u64,
}

impl SimulationClock {
    /// A clock firing once per `interval_ms`. An interval of 0 is clamped to 1.
    pub fn new(interval_ms: Millis) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulated_ms: 0,
            elapsed_ms: 0,
            frame: 0,
            production_ticks: 0,
        }
    }

    /// Record one frame of `elapsed_ms` and return the number of production
    /// ticks now due.
    pub fn advance(&mut self, elapsed_ms: Millis) -> u32 {
        self.frame += 1;
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);

        let mut due = 0u32;
        while self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms -= self.interval_ms;
            due = due.saturating_add(1);
        }
        self.production_ticks += u64::from(due);
        due
    }

    pub fn interval_ms(&self) -> Millis {
        self.interval_ms
    }

    /// Time carried toward the next production tick.
    pub fn accumulated_ms(&self) -> Millis {
        self.accumulated_ms
    }

    /// Total simulated time.
    pub fn elapsed_ms(&self) -> Millis {
        self.elapsed_ms
    }

    pub fn frame(&self) -> Frames {
        self.frame
    }

    pub fn production_ticks(&self) -> u64 {
        self.production_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tick_before_interval() {
        let mut clock = SimulationClock::new(1000);
        assert_eq!(clock.advance(999), 0);
        assert_eq!(clock.accumulated_ms(), 999);
        assert_eq!(clock.advance(1), 1);
        assert_eq!(clock.accumulated_ms(), 0);
    }

    #[test]
    fn remainder_carries_forward() {
        let mut clock = SimulationClock::new(1000);
        assert_eq!(clock.advance(1500), 1);
        assert_eq!(clock.accumulated_ms(), 500);
        assert_eq!(clock.advance(600), 1);
        assert_eq!(clock.accumulated_ms(), 100);
    }

    #[test]
    fn long_frame_releases_several_ticks() {
        let mut clock = SimulationClock::new(1000);
        assert_eq!(clock.advance(3000), 3);
        assert_eq!(clock.production_ticks(), 3);
    }

    #[test]
    fn jittery_frames_still_tick_once_per_second() {
        let mut clock = SimulationClock::new(1000);
        let pattern = [16, 17, 17, 15, 18, 16];
        let mut total = 0;
        let mut ticks = 0;
        while total < 10_000 {
            let dt = pattern[clock.frame() as usize % pattern.len()];
            total += dt;
            ticks += clock.advance(dt);
        }
        assert_eq!(u64::from(ticks), total / 1000);
    }

    #[test]
    fn counts_frames_including_zero_length() {
        let mut clock = SimulationClock::new(1000);
        clock.advance(0);
        clock.advance(0);
        assert_eq!(clock.frame(), 2);
        assert_eq!(clock.elapsed_ms(), 0);
    }

    #[test]
    fn zero_interval_clamped() {
        let clock = SimulationClock::new(0);
        assert_eq!(clock.interval_ms(), 1);
    }
}
