//! Ranging math: echo time to distance, and the validity gate
//!
//! The HC-SR04 reports distance as the round-trip time of an ultrasonic
//! pulse. Dividing the echo duration in microseconds by 58 gives
//! centimeters. A duration of 0 means the sensor timed out waiting for
//! the echo; that is a normal outcome, not an error, and is encoded as a
//! 0-distance sentinel which the gate suppresses.

/// Maximum wait for the echo pulse before declaring no detection
pub const ECHO_TIMEOUT_US: u32 = 30_000;

/// Round-trip microseconds per centimeter (speed of sound)
pub const US_PER_CM: u32 = 58;

/// Readings at or beyond this distance are discarded as noise
pub const MAX_RANGE_CM: u16 = 400;

/// One accepted angle/distance sample
///
/// Ephemeral: produced by the scan controller, serialized immediately,
/// never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Servo angle at sample time, degrees
    pub angle: u8,
    /// Measured distance in centimeters
    pub distance_cm: u16,
}

/// Convert a raw echo duration to centimeters
///
/// The 0 timeout sentinel maps to 0 cm, which the validity gate drops.
pub fn echo_to_cm(raw_us: u32) -> u16 {
    (raw_us / US_PER_CM) as u16
}

/// Range filter: only `0 < distance < 400` is a credible measurement
pub fn in_range(distance_cm: u16) -> bool {
    distance_cm > 0 && distance_cm < MAX_RANGE_CM
}

/// Convert and gate a raw echo duration at the given angle
///
/// Returns `None` for the timeout sentinel and for out-of-range values;
/// the caller advances the sweep either way.
pub fn gate(angle: u8, raw_us: u32) -> Option<Reading> {
    let distance_cm = echo_to_cm(raw_us);
    in_range(distance_cm).then_some(Reading { angle, distance_cm })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_conversion() {
        assert_eq!(echo_to_cm(580), 10);
        assert_eq!(echo_to_cm(58), 1);
        assert_eq!(echo_to_cm(57), 0); // floor division
        assert_eq!(echo_to_cm(6960), 120);
    }

    #[test]
    fn test_timeout_sentinel_is_zero() {
        assert_eq!(echo_to_cm(0), 0);
    }

    #[test]
    fn test_gate_bounds() {
        assert!(!in_range(0));
        assert!(in_range(1));
        assert!(in_range(399));
        assert!(!in_range(400));
        assert!(!in_range(401));
    }

    #[test]
    fn test_gate_accepts_valid_reading() {
        let reading = gate(45, 120 * US_PER_CM).unwrap();
        assert_eq!(reading.angle, 45);
        assert_eq!(reading.distance_cm, 120);
    }

    #[test]
    fn test_gate_drops_timeout() {
        assert_eq!(gate(90, 0), None);
    }

    #[test]
    fn test_gate_drops_out_of_range() {
        // 400 cm and beyond is presumed noise
        assert_eq!(gate(90, 400 * US_PER_CM), None);
        assert_eq!(gate(90, ECHO_TIMEOUT_US), None);
    }
}
