//! Range sensor trait for the ultrasonic rangefinder

/// A trigger/echo ranging device reporting raw echo time
#[allow(async_fn_in_trait)]
pub trait RangeSensor {
    /// Hardware fault reported by the underlying pins
    type Error;

    /// Run one ranging cycle and return the echo duration in microseconds
    ///
    /// Returns 0 when no echo completes within the sensor's timeout; the
    /// timeout is a normal outcome, never an error. Errors are reserved
    /// for pin-level faults.
    async fn measure_raw_us(&mut self) -> Result<u32, Self::Error>;
}
