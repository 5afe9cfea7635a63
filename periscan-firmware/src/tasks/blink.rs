//! Activity LED task
//!
//! Blinks the indicator while a scan is running, holds it off otherwise.
//! Mode flips arrive via the `SCAN_ACTIVE` signal from the scan task.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use periscan_core::controller::ScanTiming;

use crate::channels::SCAN_ACTIVE;

/// Activity LED task
#[embassy_executor::task]
pub async fn blink_task(mut led: Output<'static>, timing: ScanTiming) {
    info!("Blink task started");

    let mut scanning = false;

    loop {
        if scanning {
            led.toggle();
            match select(
                Timer::after_millis(timing.blink_period_ms),
                SCAN_ACTIVE.wait(),
            )
            .await
            {
                Either::First(()) => {}
                Either::Second(active) => scanning = active,
            }
        } else {
            // Never park the LED lit between sessions
            led.set_low();
            scanning = SCAN_ACTIVE.wait().await;
        }
    }
}
