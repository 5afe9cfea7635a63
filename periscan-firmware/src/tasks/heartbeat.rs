//! Heartbeat task
//!
//! Queues the liveness line at a fixed interval, in every mode. External
//! consumers key their link-health indication off this.

use defmt::*;
use embassy_time::{Duration, Ticker};

use periscan_core::controller::ScanTiming;
use periscan_protocol::TelemetryLine;

use crate::channels::TELEMETRY;

/// Heartbeat task - unconditional periodic liveness message
#[embassy_executor::task]
pub async fn heartbeat_task(timing: ScanTiming) {
    info!("Heartbeat task started");

    let mut ticker = Ticker::every(Duration::from_millis(timing.heartbeat_period_ms));

    // First line goes out right away so a freshly attached listener sees
    // the link come up without waiting a full period
    loop {
        TELEMETRY.send(TelemetryLine::Ready).await;
        ticker.next().await;
    }
}
