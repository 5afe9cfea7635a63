//! Status display task
//!
//! Drains the display channel and drives the OLED. Display faults are
//! logged and ignored; the scanner keeps running headless.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};

use crate::channels::{DisplayCommand, Glyph, DISPLAY};
use crate::oled::Oled;

/// Row/column for text banners (doubled cells)
const TEXT_ROW: u8 = 3;
const TEXT_COL: u8 = 1;

/// Display task - renders commands on the status OLED
#[embassy_executor::task]
pub async fn display_task(i2c: I2c<'static, Async>) {
    info!("Display task started");

    let mut oled = Oled::new(i2c);
    if oled.init().await.is_err() {
        warn!("OLED init failed, display output disabled");
    }

    loop {
        let command = DISPLAY.receive().await;

        match command {
            DisplayCommand::Clear => {
                oled.clear();
            }
            DisplayCommand::Glyph(Glyph::Pass) => {
                oled.clear();
                oled.draw_check();
            }
            DisplayCommand::Glyph(Glyph::Fail) => {
                oled.clear();
                oled.draw_cross();
            }
            DisplayCommand::Text(text) => {
                oled.clear();
                oled.draw_text(TEXT_ROW, TEXT_COL, &text);
            }
        }

        if oled.flush().await.is_err() {
            warn!("OLED flush failed");
        }
    }
}
