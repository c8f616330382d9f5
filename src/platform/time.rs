//! Frame pacing
//!
//! Decides how many simulation ticks each animation frame owes.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TICK_HZ, MAX_FRAME_DT, MAX_SUBSTEPS};

/// How ticks relate to display frames
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TickPacing {
    /// One tick per animation frame. Game speed follows the display
    /// refresh rate.
    #[default]
    PerFrame,
    /// Fixed timestep at `hz` ticks per second, independent of refresh rate
    Fixed { hz: f32 },
}

/// Turns animation-frame timestamps into tick counts
#[derive(Debug, Clone)]
pub struct FrameClock {
    pacing: TickPacing,
    accumulator: f32,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new(pacing: TickPacing) -> Self {
        let pacing = match pacing {
            TickPacing::Fixed { hz } if !(hz > 0.0 && hz.is_finite()) => {
                log::warn!("Invalid tick rate {hz}, using {DEFAULT_TICK_HZ} Hz");
                TickPacing::Fixed { hz: DEFAULT_TICK_HZ }
            }
            other => other,
        };
        Self {
            pacing,
            accumulator: 0.0,
            last_time: None,
        }
    }

    pub fn pacing(&self) -> TickPacing {
        self.pacing
    }

    /// Number of ticks to run for a frame stamped `now_ms` (milliseconds,
    /// as handed to `requestAnimationFrame` callbacks)
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let last = self.last_time.replace(now_ms);

        let TickPacing::Fixed { hz } = self.pacing else {
            return 1;
        };

        let step = 1.0 / hz;
        let dt = match last {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => step,
        };
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= step && ticks < MAX_SUBSTEPS {
            self.accumulator -= step;
            ticks += 1;
        }

        // Drop backlog we could not catch up on
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(step);
        }

        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_frame_always_one_tick() {
        let mut clock = FrameClock::new(TickPacing::PerFrame);
        assert_eq!(clock.advance(0.0), 1);
        assert_eq!(clock.advance(1.0), 1);
        assert_eq!(clock.advance(5000.0), 1);
    }

    #[test]
    fn test_fixed_step_counts() {
        // 64 Hz keeps every step an exact binary fraction
        let mut clock = FrameClock::new(TickPacing::Fixed { hz: 64.0 });
        assert_eq!(clock.advance(1000.0), 1);
        assert_eq!(clock.advance(1031.25), 2);
        // Half a step: nothing owed yet
        assert_eq!(clock.advance(1039.0625), 0);
        assert_eq!(clock.advance(1046.875), 1);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut clock = FrameClock::new(TickPacing::Fixed { hz: 1000.0 });
        clock.advance(0.0);
        assert_eq!(clock.advance(2000.0), MAX_SUBSTEPS);
        // Backlog was dropped, so a normal frame is back to normal
        assert!(clock.advance(2001.0) <= 2);
    }

    #[test]
    fn test_clock_going_backwards_runs_nothing() {
        let mut clock = FrameClock::new(TickPacing::Fixed { hz: 64.0 });
        clock.advance(1000.0);
        assert_eq!(clock.advance(900.0), 0);
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        let clock = FrameClock::new(TickPacing::Fixed { hz: 0.0 });
        assert_eq!(clock.pacing(), TickPacing::Fixed { hz: DEFAULT_TICK_HZ });
    }
}
