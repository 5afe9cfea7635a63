//! Scan mode state machine
//!
//! Two states, one trigger: the toggle button flips between them. All
//! periodic behavior is a function of the current mode.

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Servo parked, no sampling
    #[default]
    Stopped,
    /// Sweeping and sampling
    Scanning,
}

impl Mode {
    /// The state the toggle event moves to
    pub fn toggled(self) -> Self {
        match self {
            Mode::Stopped => Mode::Scanning,
            Mode::Scanning => Mode::Stopped,
        }
    }

    /// Check if a scan is active
    pub fn is_scanning(&self) -> bool {
        matches!(self, Mode::Scanning)
    }
}
