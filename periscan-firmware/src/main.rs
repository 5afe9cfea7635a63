//! Periscan - Sweeping Ultrasonic Rangefinder Firmware
//!
//! Main firmware binary for RP2040 boards carrying a servo-mounted
//! HC-SR04. Sweeps the sensor across a 180° arc and streams accepted
//! angle/distance readings over UART to a host-side visualizer.
//!
//! Named after the Greek "periskopeo" meaning "to look around" -
//! which is this firmware's whole job, five degrees at a time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use periscan_core::controller::ScanTiming;
use periscan_drivers::{HcSr04, PwmServo};

use crate::channels::ButtonEvent;
use crate::servo_pwm::{servo_frame_config, ServoPwmChannel};
use crate::tasks::UptimeClock;

mod channels;
mod oled;
mod servo_pwm;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Periscan firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let timing = ScanTiming::default();

    // Telemetry UART to the host (115200 baud default)
    let uart_config = UartConfig::default();
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();
    info!("Telemetry UART initialized");

    // Servo on GPIO2: PWM slice 1 channel A, 50 Hz frame, 1 µs ticks
    let pwm_config = servo_frame_config();
    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, pwm_config.clone());
    let servo = PwmServo::new(ServoPwmChannel::new(pwm, pwm_config));
    info!("Servo PWM initialized");

    // HC-SR04 on GPIO9 (trigger) / GPIO10 (echo)
    let trigger = Output::new(p.PIN_9, Level::Low);
    let echo = Input::new(p.PIN_10, Pull::None);
    let sensor = HcSr04::new(trigger, echo, Delay, UptimeClock);
    info!("Rangefinder initialized");

    // Buttons (active low) and the onboard activity LED
    let toggle_button = Input::new(p.PIN_14, Pull::Up);
    let info_button = Input::new(p.PIN_15, Pull::Up);
    let led = Output::new(p.PIN_25, Level::Low);

    // Status OLED on I2C0 (SDA GPIO4, SCL GPIO5)
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    info!("I2C initialized");

    // Spawn tasks
    spawner.spawn(tasks::scan_task(servo, sensor, timing)).unwrap();
    spawner
        .spawn(tasks::button_task(toggle_button, ButtonEvent::ToggleScan))
        .unwrap();
    spawner
        .spawn(tasks::button_task(info_button, ButtonEvent::ShowInfo))
        .unwrap();
    spawner.spawn(tasks::blink_task(led, timing)).unwrap();
    spawner.spawn(tasks::heartbeat_task(timing)).unwrap();
    spawner.spawn(tasks::serial_tx_task(tx)).unwrap();
    spawner.spawn(tasks::display_task(i2c)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
