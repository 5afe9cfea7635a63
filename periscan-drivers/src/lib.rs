//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in periscan-core, written against `embedded-hal` / `embedded-hal-async`
//! so they stay portable and host-testable:
//!
//! - Hobby-servo actuator on any PWM channel (`SetDutyCycle`)
//! - HC-SR04 ultrasonic rangefinder on a trigger/echo pin pair

#![no_std]
#![deny(unsafe_code)]

pub mod hcsr04;
pub mod servo;

pub use hcsr04::{HcSr04, Now, SensorError};
pub use servo::PwmServo;
