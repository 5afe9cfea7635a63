//! Serial transmit task
//!
//! Drains the telemetry channel and writes newline-terminated lines to
//! the UART. A failed write drops that line and moves on; telemetry is
//! never worth stalling the scanner for.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::TELEMETRY;

/// Serial TX task - sends telemetry lines to the host
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let line = TELEMETRY.receive().await;
        let encoded = line.encode();

        if let Err(e) = tx.write_all(encoded.as_bytes()).await {
            warn!("Telemetry write failed: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(b"\n").await {
            warn!("Telemetry write failed: {:?}", e);
        }
    }
}
