//! Scan task - main coordination loop
//!
//! Owns the scan controller, the servo and the rangefinder. Each cycle:
//! position the servo, let it settle, sample, hand the raw echo to the
//! controller, and queue the accepted reading for transmission. Between
//! cycles (and the whole time while stopped) the pacing timer races the
//! button channel so toggle/info presses are handled promptly.

use core::fmt::Write as _;

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Delay, Instant, Timer};
use heapless::String;

use periscan_core::controller::{ModeChange, ScanController, ScanTiming, TickPlan};
use periscan_core::traits::{Actuator, RangeSensor};
use periscan_drivers::{HcSr04, Now, PwmServo};
use periscan_protocol::TelemetryLine;

use crate::channels::{ButtonEvent, DisplayCommand, Glyph, BUTTON_EVENTS, DISPLAY, SCAN_ACTIVE, TELEMETRY};
use crate::servo_pwm::ServoPwmChannel;

/// Hold time for each info screen, ms
const INFO_DWELL_MS: u64 = 1000;

/// Boot banner hold times, ms
const BOOT_GLYPH_MS: u64 = 1000;
const BOOT_BANNER_MS: u64 = 500;
const BOOT_HOME_MS: u64 = 1000;

/// Microsecond clock for the rangefinder, backed by the system timer
pub struct UptimeClock;

impl Now for UptimeClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}

type Servo = PwmServo<ServoPwmChannel>;
type Ranger = HcSr04<Output<'static>, Input<'static>, Delay, UptimeClock>;

/// Scan task - owns the controller and the scan hardware
#[embassy_executor::task]
pub async fn scan_task(mut servo: Servo, mut sensor: Ranger, timing: ScanTiming) {
    info!("Scan task started");

    let mut controller = ScanController::new();

    // Boot sequence: pass glyph, name banner, servo to home
    DISPLAY.send(DisplayCommand::Glyph(Glyph::Pass)).await;
    Timer::after_millis(BOOT_GLYPH_MS).await;
    DISPLAY.send(DisplayCommand::Text(text("RADAR"))).await;
    Timer::after_millis(BOOT_BANNER_MS).await;
    let _ = servo.home();
    Timer::after_millis(BOOT_HOME_MS).await;

    info!("Boot complete, waiting for toggle");

    loop {
        match controller.tick_plan() {
            TickPlan::Idle => {
                // Stopped: nothing to command, just stay responsive
                match select(
                    BUTTON_EVENTS.receive(),
                    Timer::after_millis(timing.idle_period_ms),
                )
                .await
                {
                    Either::First(event) => {
                        handle_button(event, &mut controller, &mut servo).await;
                    }
                    Either::Second(()) => {}
                }
            }

            TickPlan::Sample { angle } => {
                // Position first, then settle; sampling before the servo
                // arrives would measure the previous angle
                let _ = servo.set_angle(angle);
                Timer::after_millis(timing.settle_ms).await;

                let raw_us = match sensor.measure_raw_us().await {
                    Ok(us) => us,
                    Err(_) => {
                        // Pin fault: skip the sample, keep sweeping
                        warn!("Rangefinder fault at {}°", angle);
                        0
                    }
                };

                if let Some(reading) = controller.complete_sample(raw_us) {
                    trace!("Reading: {}° -> {} cm", reading.angle, reading.distance_cm);
                    TELEMETRY
                        .send(TelemetryLine::Reading {
                            angle: reading.angle,
                            distance_cm: reading.distance_cm,
                        })
                        .await;
                }

                match select(
                    BUTTON_EVENTS.receive(),
                    Timer::after_millis(timing.scan_period_ms),
                )
                .await
                {
                    Either::First(event) => {
                        handle_button(event, &mut controller, &mut servo).await;
                    }
                    Either::Second(()) => {}
                }
            }
        }
    }
}

/// Dispatch one button event through the controller
async fn handle_button(event: ButtonEvent, controller: &mut ScanController, servo: &mut Servo) {
    match event {
        ButtonEvent::ToggleScan => match controller.on_toggle() {
            ModeChange::Started => {
                info!("Scan started");
                DISPLAY.send(DisplayCommand::Glyph(Glyph::Pass)).await;
                TELEMETRY.send(TelemetryLine::Start).await;
                DISPLAY.send(DisplayCommand::Clear).await;
                SCAN_ACTIVE.signal(true);
            }
            ModeChange::Stopped => {
                info!("Scan stopped at {}°", controller.angle());
                DISPLAY.send(DisplayCommand::Glyph(Glyph::Fail)).await;
                TELEMETRY.send(TelemetryLine::Stop).await;
                // Physical reset only; the logical sweep angle stays put
                let _ = servo.home();
                SCAN_ACTIVE.signal(false);
            }
        },

        ButtonEvent::ShowInfo => {
            let report = controller.info();
            let mut angle_text: String<16> = String::new();
            let _ = write!(angle_text, "ANG:{}", report.angle);
            DISPLAY.send(DisplayCommand::Text(angle_text)).await;
            Timer::after_millis(INFO_DWELL_MS).await;
            let mode_text = if report.scanning { "SCAN:ON" } else { "SCAN:OFF" };
            DISPLAY.send(DisplayCommand::Text(text(mode_text))).await;
        }
    }
}

/// Build a display string from a short literal
fn text(s: &str) -> String<16> {
    let mut out = String::new();
    let _ = out.push_str(s);
    out
}
