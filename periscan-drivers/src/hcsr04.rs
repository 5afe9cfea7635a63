//! HC-SR04 ultrasonic rangefinder
//!
//! One ranging cycle: a fixed-width pulse on the trigger pin, then timing
//! the high pulse the sensor answers with on the echo pin. Both edges
//! share a single 30 ms deadline; a timed-out cycle reports 0 µs, the
//! no-echo sentinel, and is never an error.

use embassy_futures::select::{select, Either};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::{delay::DelayNs, digital::Wait};

use periscan_core::ranging::ECHO_TIMEOUT_US;
use periscan_core::traits::RangeSensor;

/// Low time before the trigger pulse, µs
const TRIGGER_SETTLE_US: u32 = 2;

/// Trigger pulse width, µs
const TRIGGER_PULSE_US: u32 = 10;

/// Monotonic microsecond clock, supplied by the platform
pub trait Now {
    fn now_us(&self) -> u64;
}

/// Pin-level fault during a ranging cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<T, E> {
    /// Trigger output failed
    Trigger(T),
    /// Echo input failed
    Echo(E),
}

/// HC-SR04 on a trigger/echo pin pair
pub struct HcSr04<TRIG, ECHO, DELAY, CLK> {
    trigger: TRIG,
    echo: ECHO,
    delay: DELAY,
    clock: CLK,
}

impl<TRIG, ECHO, DELAY, CLK> HcSr04<TRIG, ECHO, DELAY, CLK>
where
    TRIG: OutputPin,
    ECHO: Wait,
    DELAY: DelayNs,
    CLK: Now,
{
    /// Create a new driver; the trigger pin should idle low
    pub fn new(trigger: TRIG, echo: ECHO, delay: DELAY, clock: CLK) -> Self {
        Self {
            trigger,
            echo,
            delay,
            clock,
        }
    }
}

impl<TRIG, ECHO, DELAY, CLK> RangeSensor for HcSr04<TRIG, ECHO, DELAY, CLK>
where
    TRIG: OutputPin,
    ECHO: Wait,
    DELAY: DelayNs,
    CLK: Now,
{
    type Error = SensorError<TRIG::Error, ECHO::Error>;

    async fn measure_raw_us(&mut self) -> Result<u32, Self::Error> {
        // Fixed-width trigger pulse: low 2 µs, high 10 µs, low
        self.trigger.set_low().map_err(SensorError::Trigger)?;
        self.delay.delay_us(TRIGGER_SETTLE_US).await;
        self.trigger.set_high().map_err(SensorError::Trigger)?;
        self.delay.delay_us(TRIGGER_PULSE_US).await;
        self.trigger.set_low().map_err(SensorError::Trigger)?;

        // Rising edge of the echo pulse, or timeout
        let cycle_start_us = self.clock.now_us();
        match select(
            self.echo.wait_for_high(),
            self.delay.delay_us(ECHO_TIMEOUT_US),
        )
        .await
        {
            Either::First(edge) => edge.map_err(SensorError::Echo)?,
            Either::Second(()) => return Ok(0),
        }

        // Falling edge ends the pulse. The wait for the rising edge has
        // already spent part of the deadline, so only the remainder is
        // granted here; a pulse that outlives it is also no echo.
        let start_us = self.clock.now_us();
        let remaining_us =
            ECHO_TIMEOUT_US.saturating_sub((start_us - cycle_start_us) as u32);
        match select(self.echo.wait_for_low(), self.delay.delay_us(remaining_us)).await {
            Either::First(edge) => edge.map_err(SensorError::Echo)?,
            Either::Second(()) => return Ok(0),
        }

        Ok((self.clock.now_us() - start_us) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embedded_hal::digital::ErrorType;

    /// Trigger pin that accepts every edge
    struct QuietTrigger;

    impl ErrorType for QuietTrigger {
        type Error = Infallible;
    }

    impl OutputPin for QuietTrigger {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    /// Echo pin scripted with a number of edges to deliver; once the
    /// budget is spent every wait parks forever, leaving the timeout arm
    /// to resolve the race.
    struct ScriptedEcho {
        rising: u8,
        falling: u8,
    }

    impl ErrorType for ScriptedEcho {
        type Error = Infallible;
    }

    impl Wait for ScriptedEcho {
        async fn wait_for_high(&mut self) -> Result<(), Infallible> {
            if self.rising == 0 {
                core::future::pending::<()>().await;
            }
            self.rising -= 1;
            Ok(())
        }

        async fn wait_for_low(&mut self) -> Result<(), Infallible> {
            if self.falling == 0 {
                core::future::pending::<()>().await;
            }
            self.falling -= 1;
            Ok(())
        }

        async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
            self.wait_for_high().await
        }

        async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
            self.wait_for_low().await
        }

        async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
            core::future::pending::<()>().await;
            Ok(())
        }
    }

    /// Delay that completes immediately, so a parked echo wait always
    /// loses the race to the timeout arm
    struct InstantDelay;

    impl DelayNs for InstantDelay {
        async fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Clock that advances a fixed step on every read
    struct SteppingClock {
        now: Cell<u64>,
        step_us: u64,
    }

    impl SteppingClock {
        fn new(step_us: u64) -> Self {
            Self {
                now: Cell::new(0),
                step_us,
            }
        }
    }

    impl Now for SteppingClock {
        fn now_us(&self) -> u64 {
            let t = self.now.get();
            self.now.set(t + self.step_us);
            t
        }
    }

    fn sensor(echo: ScriptedEcho) -> HcSr04<QuietTrigger, ScriptedEcho, InstantDelay, SteppingClock> {
        HcSr04::new(QuietTrigger, echo, InstantDelay, SteppingClock::new(100))
    }

    #[test]
    fn missing_rising_edge_reports_no_echo() {
        let mut sensor = sensor(ScriptedEcho {
            rising: 0,
            falling: 0,
        });
        assert_eq!(block_on(sensor.measure_raw_us()), Ok(0));
    }

    #[test]
    fn missing_falling_edge_reports_no_echo() {
        let mut sensor = sensor(ScriptedEcho {
            rising: 1,
            falling: 0,
        });
        assert_eq!(block_on(sensor.measure_raw_us()), Ok(0));
    }

    #[test]
    fn pulse_width_comes_from_the_clock() {
        // Clock reads: cycle start, pulse start, pulse end. One 100 µs
        // step between the last two is the reported width.
        let mut sensor = sensor(ScriptedEcho {
            rising: 1,
            falling: 1,
        });
        assert_eq!(block_on(sensor.measure_raw_us()), Ok(100));
    }
}
