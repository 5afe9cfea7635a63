//! Board-agnostic core logic for the Periscan sweeping rangefinder
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuator, range sensor)
//! - Sweep state (triangle-wave angle progression)
//! - Ranging math (echo time to centimeters, validity gate)
//! - Scan mode state machine
//! - The sans-IO scan controller driven by the firmware's scan task

#![no_std]
#![deny(unsafe_code)]

pub mod controller;
pub mod mode;
pub mod ranging;
pub mod sweep;
pub mod traits;
