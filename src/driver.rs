//! Fixed timestep frame driver
//!
//! Turns variable wall-clock frame times into whole simulation steps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::session::Session;
use crate::sim::{RunEvent, TickInput};

/// Result of one host frame
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Simulation steps run this frame
    pub steps: u32,
    pub events: Vec<RunEvent>,
}

/// Accumulator-based driver feeding a [`Session`]
#[derive(Debug, Clone, Default)]
pub struct FixedStepDriver {
    accumulator: f32,
    input: TickInput,
    /// Host frames seen
    pub frames: u64,
}

impl FixedStepDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a jump key-down edge; fires on the next step only
    pub fn queue_jump(&mut self) {
        self.input.jump = true;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Fraction of a step left in the accumulator, for interpolated drawing
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    /// Run as many whole steps as `frame_dt` covers
    pub fn advance(&mut self, session: &mut Session, frame_dt: f32) -> FrameReport {
        self.frames += 1;
        // Long frames are clamped, not caught up
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut report = FrameReport::default();
        while self.accumulator >= SIM_DT && report.steps < MAX_SUBSTEPS {
            let input = self.input.clone();
            report.events.extend(session.frame(&input, SIM_DT));
            self.accumulator -= SIM_DT;
            report.steps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Character;
    use crate::tuning::RunTuning;

    fn playing_session() -> Session {
        let mut session = Session::new(RunTuning::classic(), 11);
        session.open_character_select();
        session.select_character(Character::Human);
        session
    }

    #[test]
    fn test_one_step_per_frame_at_tick_rate() {
        let mut session = playing_session();
        let mut driver = FixedStepDriver::new();
        let mut total = 0;
        for _ in 0..60 {
            // A hair over one step, like a real vsync'd frame
            total += driver.advance(&mut session, SIM_DT * 1.0001).steps;
        }
        assert_eq!(total, 60);
        assert_eq!(session.run.time_ticks, 60);
        assert_eq!(driver.frames, 60);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut session = playing_session();
        let mut driver = FixedStepDriver::new();
        assert_eq!(driver.advance(&mut session, SIM_DT * 0.6).steps, 0);
        assert!(driver.alpha() > 0.5);
        assert_eq!(driver.advance(&mut session, SIM_DT * 0.6).steps, 1);
    }

    #[test]
    fn test_long_frame_clamped() {
        let mut session = playing_session();
        let mut driver = FixedStepDriver::new();
        // Half a second of wall clock only buys 0.1s of simulation
        let report = driver.advance(&mut session, 0.5);
        assert_eq!(report.steps, 6);
        assert!(report.steps <= MAX_SUBSTEPS);
        assert!(driver.alpha() < 1.0);
        // Nothing left over to catch up on
        assert_eq!(driver.advance(&mut session, 0.0).steps, 0);
        assert_eq!(session.run.time_ticks, 6);
    }

    #[test]
    fn test_negative_frame_ignored() {
        let mut session = playing_session();
        let mut driver = FixedStepDriver::new();
        assert_eq!(driver.advance(&mut session, -1.0).steps, 0);
        assert_eq!(driver.alpha(), 0.0);
    }

    #[test]
    fn test_jump_fires_once() {
        let mut session = playing_session();
        let mut driver = FixedStepDriver::new();
        driver.queue_jump();
        let report = driver.advance(&mut session, SIM_DT * 3.5);
        assert_eq!(report.steps, 3);
        let jumps = report
            .events
            .iter()
            .filter(|e| **e == RunEvent::Jumped)
            .count();
        assert_eq!(jumps, 1);
        assert!(!session.run.player.is_grounded());
    }
}
