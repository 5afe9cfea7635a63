//! Telemetry line encoding and parsing

use core::fmt::Write;

use heapless::String;

/// Mode transition to scanning
pub const LINE_START: &str = "Radar Start";
/// Mode transition to stopped
pub const LINE_STOP: &str = "Radar Stop";
/// Liveness heartbeat
pub const LINE_READY: &str = "System Ready";

/// Longest encoded line ("System Ready" at 12, readings at most 9)
pub const MAX_LINE_LEN: usize = 16;

/// One telemetry line, device to host
///
/// The line terminator is owned by the transport, not the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryLine {
    /// Scan session started
    Start,
    /// Scan session stopped
    Stop,
    /// Unconditional heartbeat
    Ready,
    /// Accepted angle/distance sample
    Reading { angle: u8, distance_cm: u16 },
}

impl TelemetryLine {
    /// Encode this line, without terminator
    pub fn encode(&self) -> String<MAX_LINE_LEN> {
        let mut out = String::new();
        match self {
            TelemetryLine::Start => {
                let _ = out.push_str(LINE_START);
            }
            TelemetryLine::Stop => {
                let _ = out.push_str(LINE_STOP);
            }
            TelemetryLine::Ready => {
                let _ = out.push_str(LINE_READY);
            }
            TelemetryLine::Reading { angle, distance_cm } => {
                // "<angle>,<distance>", plain decimal, no spaces
                let _ = write!(out, "{},{}", angle, distance_cm);
            }
        }
        out
    }

    /// Parse one received line (host side)
    ///
    /// Trailing CR/LF is tolerated so consumers on CRLF serial stacks
    /// still parse. Returns `None` for anything outside the contract,
    /// including readings with an angle beyond 180°.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);

        match line {
            LINE_START => return Some(TelemetryLine::Start),
            LINE_STOP => return Some(TelemetryLine::Stop),
            LINE_READY => return Some(TelemetryLine::Ready),
            _ => {}
        }

        let (angle, distance) = line.split_once(',')?;
        let angle: u8 = angle.parse().ok()?;
        let distance_cm: u16 = distance.parse().ok()?;
        if angle > 180 {
            return None;
        }
        Some(TelemetryLine::Reading { angle, distance_cm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_mode_lines() {
        assert_eq!(TelemetryLine::Start.encode(), "Radar Start");
        assert_eq!(TelemetryLine::Stop.encode(), "Radar Stop");
        assert_eq!(TelemetryLine::Ready.encode(), "System Ready");
    }

    #[test]
    fn test_encode_reading_exact() {
        let line = TelemetryLine::Reading {
            angle: 45,
            distance_cm: 120,
        };
        assert_eq!(line.encode(), "45,120");
    }

    #[test]
    fn test_encode_reading_extremes() {
        let line = TelemetryLine::Reading {
            angle: 0,
            distance_cm: 1,
        };
        assert_eq!(line.encode(), "0,1");

        let line = TelemetryLine::Reading {
            angle: 180,
            distance_cm: 399,
        };
        assert_eq!(line.encode(), "180,399");
    }

    #[test]
    fn test_parse_round_trip() {
        let lines = [
            TelemetryLine::Start,
            TelemetryLine::Stop,
            TelemetryLine::Ready,
            TelemetryLine::Reading {
                angle: 45,
                distance_cm: 120,
            },
        ];
        for original in lines {
            assert_eq!(TelemetryLine::parse(&original.encode()), Some(original));
        }
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        assert_eq!(
            TelemetryLine::parse("45,120\r\n"),
            Some(TelemetryLine::Reading {
                angle: 45,
                distance_cm: 120
            })
        );
        assert_eq!(TelemetryLine::parse("Radar Start\n"), Some(TelemetryLine::Start));
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert_eq!(TelemetryLine::parse(""), None);
        assert_eq!(TelemetryLine::parse("Radar"), None);
        assert_eq!(TelemetryLine::parse("45;120"), None);
        assert_eq!(TelemetryLine::parse("45,120,7"), None);
        assert_eq!(TelemetryLine::parse("forty,five"), None);
        assert_eq!(TelemetryLine::parse("45, 120"), None); // no spaces in contract
    }

    #[test]
    fn test_parse_rejects_out_of_range_angle() {
        assert_eq!(TelemetryLine::parse("181,10"), None);
        assert_eq!(TelemetryLine::parse("300,10"), None);
    }
}
