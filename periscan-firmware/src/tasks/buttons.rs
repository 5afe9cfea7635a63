//! Button input tasks
//!
//! One task instance per button. Presses are debounced on both edges and
//! forwarded as events; holding a button does not retrigger.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use crate::channels::{ButtonEvent, BUTTON_EVENTS};

/// Debounce time after each edge, ms
const DEBOUNCE_MS: u64 = 20;

/// Button task - waits for presses on one active-low input
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(mut pin: Input<'static>, event: ButtonEvent) {
    info!("Button task started for {:?}", event);

    loop {
        pin.wait_for_falling_edge().await;
        Timer::after_millis(DEBOUNCE_MS).await;
        if pin.is_high() {
            // Bounce, not a press
            continue;
        }

        debug!("Button: {:?}", event);
        BUTTON_EVENTS.send(event).await;

        pin.wait_for_high().await;
        Timer::after_millis(DEBOUNCE_MS).await;
    }
}
