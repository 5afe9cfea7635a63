//! Scan controller: mode handling and the per-tick scan cycle
//!
//! Sans-IO: the controller decides, the firmware's scan task executes.
//! Each tick the task asks for a plan, performs the hardware steps the
//! plan names (position, settle, sample), and feeds the raw result back.
//! Keeping the decisions here makes every scenario host-testable.

use crate::mode::Mode;
use crate::ranging::{self, Reading};
use crate::sweep::SweepState;

/// Task pacing in one place, so no period is an inline literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanTiming {
    /// Wait after commanding the servo before sampling, ms
    pub settle_ms: u64,
    /// Pause between scan cycles while scanning, ms
    pub scan_period_ms: u64,
    /// Pause between mode polls while stopped, ms
    pub idle_period_ms: u64,
    /// Activity LED half-period while scanning, ms
    pub blink_period_ms: u64,
    /// Liveness message interval, ms
    pub heartbeat_period_ms: u64,
}

impl Default for ScanTiming {
    fn default() -> Self {
        Self {
            settle_ms: 50,
            scan_period_ms: 100,
            idle_period_ms: 200,
            blink_period_ms: 200,
            heartbeat_period_ms: 5000,
        }
    }
}

/// What the scan task should do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickPlan {
    /// Not scanning: wait out the idle period, touch nothing
    Idle,
    /// Scanning: position the servo at `angle`, settle, then sample
    Sample { angle: u8 },
}

/// Outcome of a toggle event, naming the side effects the shell owes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeChange {
    /// Emit the start notification, show the pass glyph, clear the display
    Started,
    /// Emit the stop notification, show the fail glyph, home the servo
    Stopped,
}

/// Snapshot for the info button: side-effect free
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InfoReport {
    pub angle: u8,
    pub scanning: bool,
}

/// Owns the sweep state and mode; the scan task's single source of truth
#[derive(Debug, Clone)]
pub struct ScanController {
    sweep: SweepState,
    mode: Mode,
}

impl Default for ScanController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanController {
    /// Boot state: parked at 0°, stopped
    pub fn new() -> Self {
        Self {
            sweep: SweepState::new(),
            mode: Mode::Stopped,
        }
    }

    /// Current operating mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current logical sweep angle
    pub fn angle(&self) -> u8 {
        self.sweep.angle()
    }

    /// Decide what this tick does
    ///
    /// While stopped this is a full no-op: no sweep mutation, no actuator
    /// command, just a long pause on the task side.
    pub fn tick_plan(&self) -> TickPlan {
        if self.mode.is_scanning() {
            TickPlan::Sample {
                angle: self.sweep.angle(),
            }
        } else {
            TickPlan::Idle
        }
    }

    /// Fold a raw echo duration into the sweep
    ///
    /// Applies the validity gate at the angle the sample was taken, then
    /// advances the sweep unconditionally so a run of bad samples never
    /// stalls progress.
    pub fn complete_sample(&mut self, raw_us: u32) -> Option<Reading> {
        let reading = ranging::gate(self.sweep.angle(), raw_us);
        self.sweep.advance();
        reading
    }

    /// Handle the toggle button
    ///
    /// Stopping homes only the physical servo (via the returned outcome);
    /// the logical sweep angle is deliberately left alone, so the next
    /// session resumes sweeping from wherever this one left off.
    pub fn on_toggle(&mut self) -> ModeChange {
        self.mode = self.mode.toggled();
        if self.mode.is_scanning() {
            ModeChange::Started
        } else {
            ModeChange::Stopped
        }
    }

    /// Handle the info button
    pub fn info(&self) -> InfoReport {
        InfoReport {
            angle: self.sweep.angle(),
            scanning: self.mode.is_scanning(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranging::US_PER_CM;

    /// Run scan cycles with no echo until the sweep sits at `angle`
    fn wind_to_angle(ctl: &mut ScanController, angle: u8) {
        while ctl.angle() != angle {
            assert!(matches!(ctl.tick_plan(), TickPlan::Sample { .. }));
            ctl.complete_sample(0);
        }
    }

    #[test]
    fn test_stopped_tick_is_noop() {
        let ctl = ScanController::new();
        assert_eq!(ctl.tick_plan(), TickPlan::Idle);
        assert_eq!(ctl.angle(), 0);
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut ctl = ScanController::new();

        assert_eq!(ctl.on_toggle(), ModeChange::Started);
        assert_eq!(ctl.mode(), Mode::Scanning);

        assert_eq!(ctl.on_toggle(), ModeChange::Stopped);
        assert_eq!(ctl.mode(), Mode::Stopped);
    }

    #[test]
    fn test_full_cycle_at_45_degrees() {
        let mut ctl = ScanController::new();
        ctl.on_toggle();
        wind_to_angle(&mut ctl, 45);

        assert_eq!(ctl.tick_plan(), TickPlan::Sample { angle: 45 });
        let reading = ctl.complete_sample(120 * US_PER_CM).unwrap();
        assert_eq!(reading.angle, 45);
        assert_eq!(reading.distance_cm, 120);

        // Sweep advanced by one step after the accepted reading
        assert_eq!(ctl.angle(), 50);
    }

    #[test]
    fn test_rejected_sample_still_advances() {
        let mut ctl = ScanController::new();
        ctl.on_toggle();

        assert_eq!(ctl.complete_sample(0), None);
        assert_eq!(ctl.angle(), 5);

        assert_eq!(ctl.complete_sample(400 * US_PER_CM), None);
        assert_eq!(ctl.angle(), 10);
    }

    #[test]
    fn test_stop_preserves_logical_angle() {
        // Stopping homes the physical servo but not the sweep state, so
        // the next session resumes mid-arc
        let mut ctl = ScanController::new();
        ctl.on_toggle();
        wind_to_angle(&mut ctl, 45);

        assert_eq!(ctl.on_toggle(), ModeChange::Stopped);
        assert_eq!(ctl.angle(), 45);

        ctl.on_toggle();
        assert_eq!(ctl.tick_plan(), TickPlan::Sample { angle: 45 });
    }

    #[test]
    fn test_info_reports_angle_and_mode() {
        let mut ctl = ScanController::new();
        assert_eq!(
            ctl.info(),
            InfoReport {
                angle: 0,
                scanning: false
            }
        );

        ctl.on_toggle();
        wind_to_angle(&mut ctl, 30);
        let report = ctl.info();
        assert_eq!(report.angle, 30);
        assert!(report.scanning);

        // Info never mutates anything
        assert_eq!(ctl.angle(), 30);
        assert_eq!(ctl.mode(), Mode::Scanning);
    }

    #[test]
    fn test_default_timing_values() {
        let timing = ScanTiming::default();
        assert_eq!(timing.settle_ms, 50);
        assert_eq!(timing.scan_period_ms, 100);
        assert_eq!(timing.idle_period_ms, 200);
        assert_eq!(timing.blink_period_ms, 200);
        assert_eq!(timing.heartbeat_period_ms, 5000);
    }
}
