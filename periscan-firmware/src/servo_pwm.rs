//! RP2040 PWM slice as a `SetDutyCycle` channel for the servo driver
//!
//! The slice is clocked down to 1 MHz (125 MHz system clock / 125) with a
//! wrap of 20 000 ticks, giving the 50 Hz servo frame with one tick per
//! microsecond. Duty counts therefore equal pulse microseconds.

use core::convert::Infallible;

use embassy_rp::pwm::{Config, Pwm};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};

/// PWM ticks per servo frame (20 ms at 1 MHz)
pub const FRAME_TICKS: u16 = 20_000;

/// Clock divider taking the 125 MHz system clock to 1 MHz
pub const CLOCK_DIVIDER: u8 = 125;

/// Build the slice configuration for the servo frame
pub fn servo_frame_config() -> Config {
    let mut config = Config::default();
    config.divider = CLOCK_DIVIDER.into();
    config.top = FRAME_TICKS - 1;
    config.compare_a = 0;
    config
}

/// Channel A of a PWM slice configured by [`servo_frame_config`]
pub struct ServoPwmChannel {
    pwm: Pwm<'static>,
    config: Config,
}

impl ServoPwmChannel {
    pub fn new(pwm: Pwm<'static>, config: Config) -> Self {
        Self { pwm, config }
    }
}

impl ErrorType for ServoPwmChannel {
    type Error = Infallible;
}

impl SetDutyCycle for ServoPwmChannel {
    fn max_duty_cycle(&self) -> u16 {
        FRAME_TICKS
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.config.compare_a = duty;
        self.pwm.set_config(&self.config);
        Ok(())
    }
}
