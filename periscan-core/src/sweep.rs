//! Sweep state: triangle-wave angle progression
//!
//! The servo bounces between 0° and 180° in fixed steps. Direction flips
//! exactly at a bound; the bound value itself is always visited, never
//! skipped past (bounce/reflect, not wraparound).

/// Degrees moved per scan cycle
pub const STEP_DEGREES: u8 = 5;

/// Upper sweep bound in degrees (lower bound is 0)
pub const ANGLE_MAX: u8 = 180;

/// Direction of the sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepDirection {
    /// Toward 180°
    #[default]
    Up,
    /// Toward 0°
    Down,
}

impl SweepDirection {
    /// Signed step multiplier for this direction
    pub fn sign(self) -> i16 {
        match self {
            SweepDirection::Up => 1,
            SweepDirection::Down => -1,
        }
    }
}

/// Current sweep position and direction
///
/// Invariant: `angle` is always within `[0, ANGLE_MAX]`. Lives for the
/// whole process; only the scan controller mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepState {
    angle: u8,
    direction: SweepDirection,
}

impl Default for SweepState {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepState {
    /// Start of sweep: 0°, moving up
    pub fn new() -> Self {
        Self {
            angle: 0,
            direction: SweepDirection::Up,
        }
    }

    /// Current angle in degrees
    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// Current direction
    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    /// Advance one step, clamping and reversing at the bounds
    pub fn advance(&mut self) {
        self.advance_by(STEP_DEGREES);
    }

    /// Advance by an arbitrary step size
    ///
    /// Clamp-then-reverse must hold for any step, including steps that do
    /// not divide the arc evenly and would overshoot a bound.
    pub fn advance_by(&mut self, step: u8) {
        let next = i16::from(self.angle) + self.direction.sign() * i16::from(step);

        if next >= i16::from(ANGLE_MAX) {
            self.angle = ANGLE_MAX;
            self.direction = SweepDirection::Down;
        } else if next <= 0 {
            self.angle = 0;
            self.direction = SweepDirection::Up;
        } else {
            self.angle = next as u8;
        }
    }
}
