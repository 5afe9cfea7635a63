//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod blink;
pub mod buttons;
pub mod display;
pub mod heartbeat;
pub mod scan;
pub mod serial_tx;

pub use blink::blink_task;
pub use buttons::button_task;
pub use display::display_task;
pub use heartbeat::heartbeat_task;
pub use scan::{scan_task, UptimeClock};
pub use serial_tx::serial_tx_task;
