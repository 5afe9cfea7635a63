//! Periscan Serial Telemetry Protocol
//!
//! This crate defines the line-oriented text protocol between the scanner
//! and the host-side visualizer. It is the only wire contract external
//! consumers see.
//!
//! # Protocol Overview
//!
//! Every message is one newline-terminated ASCII line:
//!
//! ```text
//! Radar Start        mode transition to scanning
//! Radar Stop         mode transition to stopped
//! System Ready       liveness heartbeat, every 5 s regardless of mode
//! <angle>,<distance> one accepted reading, e.g. "45,120"
//! ```
//!
//! Angle and distance are plain decimal integers, comma-separated, no
//! spaces. The device side only encodes; the host side only parses.

#![no_std]
#![deny(unsafe_code)]

pub mod line;

pub use line::{TelemetryLine, LINE_READY, LINE_START, LINE_STOP, MAX_LINE_LEN};
