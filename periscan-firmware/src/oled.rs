//! SSD1306 OLED status display driver
//!
//! Minimal driver for 128x64 SSD1306 modules via I2C: a page-organized
//! frame buffer, a font covering the handful of characters the status UI
//! uses, and drawn pass/fail glyphs. Horizontal addressing mode lets the
//! whole buffer go out in a single write.

/// SSD1306 I2C address (typically 0x3C or 0x3D)
const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_ADDR_MODE: u8 = 0x20;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
}

/// SSD1306 OLED driver
pub struct Oled<I2C> {
    i2c: I2C,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Create a new driver
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Initialize the display
    pub async fn init(&mut self) -> Result<(), I2C::Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE | 0x00,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_ADDR_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c).await?;
        }

        Ok(())
    }

    /// Send a command to the display
    async fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(SSD1306_ADDR, &[0x00, cmd]).await
    }

    /// Clear the frame buffer
    pub fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    /// Draw text into the buffer, doubled in size so a short banner is
    /// readable at a glance. Rows are page pairs (0-6), columns are 12 px
    /// cells (0-9).
    pub fn draw_text(&mut self, row: u8, col: u8, text: &str) {
        if row as usize + 1 >= PAGES {
            return;
        }

        let mut x = (col as usize) * 12;
        for ch in text.chars() {
            if x + 12 > WIDTH {
                break;
            }
            let glyph = glyph(ch);
            for (i, &column) in glyph.iter().enumerate() {
                let (top, bottom) = stretch_column(column);
                self.buffer[row as usize][x + 2 * i] = top;
                self.buffer[row as usize][x + 2 * i + 1] = top;
                self.buffer[row as usize + 1][x + 2 * i] = bottom;
                self.buffer[row as usize + 1][x + 2 * i + 1] = bottom;
            }
            x += 12;
        }
    }

    /// Set one pixel in the buffer
    fn set_pixel(&mut self, x: usize, y: usize) {
        if x < WIDTH && y < HEIGHT {
            self.buffer[y / 8][x] |= 1 << (y % 8);
        }
    }

    /// Draw a centered check mark
    pub fn draw_check(&mut self) {
        let (cx, cy) = (WIDTH / 2, HEIGHT / 2);
        // Short arm down-right, long arm up-right
        for i in 0..8 {
            self.set_pixel(cx - 12 + i, cy + i - 4);
            self.set_pixel(cx - 12 + i, cy + i - 3);
        }
        for i in 0..16 {
            self.set_pixel(cx - 4 + i, cy + 4 - i);
            self.set_pixel(cx - 4 + i, cy + 3 - i);
        }
    }

    /// Draw a centered cross
    pub fn draw_cross(&mut self) {
        let (cx, cy) = (WIDTH / 2, HEIGHT / 2);
        for i in 0..24 {
            self.set_pixel(cx - 12 + i, cy - 12 + i);
            self.set_pixel(cx - 11 + i, cy - 12 + i);
            self.set_pixel(cx - 12 + i, cy + 12 - i);
            self.set_pixel(cx - 11 + i, cy + 12 - i);
        }
    }

    /// Flush the frame buffer to the display
    pub async fn flush(&mut self) -> Result<(), I2C::Error> {
        // Full-buffer window, then one data burst
        self.command(cmd::SET_COLUMN_ADDR).await?;
        self.command(0).await?;
        self.command((WIDTH - 1) as u8).await?;
        self.command(cmd::SET_PAGE_ADDR).await?;
        self.command(0).await?;
        self.command((PAGES - 1) as u8).await?;

        let mut data = [0u8; WIDTH * PAGES + 1];
        data[0] = 0x40; // Data mode
        for (page, chunk) in self.buffer.iter().zip(data[1..].chunks_mut(WIDTH)) {
            chunk.copy_from_slice(page);
        }
        self.i2c.write(SSD1306_ADDR, &data).await
    }
}

/// Double each bit of a font column into two output pages
fn stretch_column(column: u8) -> (u8, u8) {
    let mut top = 0u8;
    let mut bottom = 0u8;
    for bit in 0..4 {
        if column & (1 << bit) != 0 {
            top |= 0b11 << (2 * bit);
        }
        if column & (1 << (bit + 4)) != 0 {
            bottom |= 0b11 << (2 * bit);
        }
    }
    (top, bottom)
}

/// 5x7 column glyphs for the characters the status UI uses
fn glyph(ch: char) -> [u8; 5] {
    match ch {
        '0' => [0x3E, 0x51, 0x49, 0x45, 0x3E],
        '1' => [0x00, 0x42, 0x7F, 0x40, 0x00],
        '2' => [0x42, 0x61, 0x51, 0x49, 0x46],
        '3' => [0x21, 0x41, 0x45, 0x4B, 0x31],
        '4' => [0x18, 0x14, 0x12, 0x7F, 0x10],
        '5' => [0x27, 0x45, 0x45, 0x45, 0x39],
        '6' => [0x3C, 0x4A, 0x49, 0x49, 0x30],
        '7' => [0x01, 0x71, 0x09, 0x05, 0x03],
        '8' => [0x36, 0x49, 0x49, 0x49, 0x36],
        '9' => [0x06, 0x49, 0x49, 0x29, 0x1E],
        ':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        'A' => [0x7E, 0x11, 0x11, 0x11, 0x7E],
        'C' => [0x3E, 0x41, 0x41, 0x41, 0x22],
        'D' => [0x7F, 0x41, 0x41, 0x22, 0x1C],
        'F' => [0x7F, 0x09, 0x09, 0x09, 0x01],
        'G' => [0x3E, 0x41, 0x49, 0x49, 0x7A],
        'N' => [0x7F, 0x04, 0x08, 0x10, 0x7F],
        'O' => [0x3E, 0x41, 0x41, 0x41, 0x3E],
        'R' => [0x7F, 0x09, 0x19, 0x29, 0x46],
        'S' => [0x46, 0x49, 0x49, 0x49, 0x31],
        _ => [0x00, 0x00, 0x00, 0x00, 0x00],
    }
}
