//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication. The scan task
//! is the sole owner of the controller state; everything else reaches it
//! (or is reached) through these.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::String;

use periscan_protocol::TelemetryLine;

/// Channel capacity for button events
const BUTTON_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound telemetry lines
const TELEMETRY_CHANNEL_SIZE: usize = 16;

/// Channel capacity for display commands
const DISPLAY_CHANNEL_SIZE: usize = 8;

/// A debounced button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum ButtonEvent {
    /// Start/stop the scan
    ToggleScan,
    /// Show current angle and mode
    ShowInfo,
}

/// Pass/fail indicator shown on mode transitions and at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Glyph {
    Pass,
    Fail,
}

/// Commands for the status display task
#[derive(Debug, Clone, PartialEq, Eq, defmt::Format)]
pub enum DisplayCommand {
    /// Blank the screen
    Clear,
    /// Show a pass/fail glyph
    Glyph(Glyph),
    /// Show a short text banner
    Text(String<16>),
}

/// Button presses from the input tasks
pub static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Telemetry lines awaiting serial transmission
pub static TELEMETRY: Channel<CriticalSectionRawMutex, TelemetryLine, TELEMETRY_CHANNEL_SIZE> =
    Channel::new();

/// Pending display updates
pub static DISPLAY: Channel<CriticalSectionRawMutex, DisplayCommand, DISPLAY_CHANNEL_SIZE> =
    Channel::new();

/// Mode flips for the activity LED (true while scanning)
pub static SCAN_ACTIVE: Signal<CriticalSectionRawMutex, bool> = Signal::new();
