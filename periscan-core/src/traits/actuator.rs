//! Actuator trait for the sweep servo

/// A positionable actuator with a `[0, 180]` degree range
///
/// Implemented by the PWM servo driver; a mock implementation backs the
/// controller tests.
pub trait Actuator {
    /// Hardware fault reported by the underlying output
    type Error;

    /// Command the actuator to the given angle in degrees
    ///
    /// Implementations clamp to `[0, 180]`. Returning does not mean the
    /// actuator has physically arrived; callers allow a settle time
    /// before trusting a position-dependent measurement.
    fn set_angle(&mut self, degrees: u8) -> Result<(), Self::Error>;

    /// Return to the 0° home position
    fn home(&mut self) -> Result<(), Self::Error> {
        self.set_angle(0)
    }
}
