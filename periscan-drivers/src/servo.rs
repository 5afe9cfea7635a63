//! PWM hobby-servo actuator
//!
//! Standard hobby servos expect a 50 Hz frame with a 500-2400 µs pulse
//! mapping linearly onto the 0-180° range. The driver converts an angle
//! to a duty fraction of the 20 ms frame, so it works on any PWM channel
//! exposing `SetDutyCycle` as long as the channel is configured for 50 Hz.

use embedded_hal::pwm::SetDutyCycle;

use periscan_core::traits::Actuator;

/// Pulse width commanding 0°, µs
pub const MIN_PULSE_US: u32 = 500;

/// Pulse width commanding 180°, µs
pub const MAX_PULSE_US: u32 = 2400;

/// Servo frame period (50 Hz), µs
pub const REFRESH_INTERVAL_US: u32 = 20_000;

/// Widest angle the pulse range covers, degrees
pub const MAX_DEGREES: u32 = 180;

/// Map an angle to its pulse width, clamping to the servo's range
pub fn angle_to_pulse_us(degrees: u8) -> u32 {
    let degrees = u32::from(degrees).min(MAX_DEGREES);
    MIN_PULSE_US + degrees * (MAX_PULSE_US - MIN_PULSE_US) / MAX_DEGREES
}

/// Hobby servo on a PWM channel configured for a 20 ms frame
pub struct PwmServo<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Wrap a PWM channel already running at the 50 Hz servo frame rate
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Get access to the underlying PWM channel
    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}

impl<P: SetDutyCycle> Actuator for PwmServo<P> {
    type Error = P::Error;

    fn set_angle(&mut self, degrees: u8) -> Result<(), Self::Error> {
        let pulse_us = angle_to_pulse_us(degrees);
        let max_duty = u32::from(self.pwm.max_duty_cycle());
        let duty = pulse_us * max_duty / REFRESH_INTERVAL_US;
        self.pwm.set_duty_cycle(duty as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Mock PWM channel whose max duty equals the frame length in µs,
    /// so commanded duty counts read directly as pulse microseconds
    struct MockPwm {
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            REFRESH_INTERVAL_US as u16
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_pulse_endpoints() {
        assert_eq!(angle_to_pulse_us(0), MIN_PULSE_US);
        assert_eq!(angle_to_pulse_us(180), MAX_PULSE_US);
    }

    #[test]
    fn test_pulse_midpoint() {
        assert_eq!(angle_to_pulse_us(90), 1450);
    }

    #[test]
    fn test_pulse_clamps_past_range() {
        assert_eq!(angle_to_pulse_us(200), MAX_PULSE_US);
    }

    #[test]
    fn test_set_angle_writes_duty() {
        let mut servo = PwmServo::new(MockPwm { duty: 0 });
        servo.set_angle(90).unwrap();
        assert_eq!(servo.pwm().duty, 1450);
    }

    #[test]
    fn test_home_parks_at_min_pulse() {
        let mut servo = PwmServo::new(MockPwm { duty: 0 });
        servo.set_angle(135).unwrap();
        servo.home().unwrap();
        assert_eq!(servo.pwm().duty, MIN_PULSE_US as u16);
    }
}
