//! PS/2 keyboard device side.
//!
//! This module implements the keyboard half of the two-wire PS/2 bus:
//!
//! 1. **Line transport** - drives the clock and data lines and generates
//!    the ~12.5 kHz device clock.
//! 2. **Frame codec** - 11-bit frames (start, 8 data bits LSB-first,
//!    odd parity, stop) in both directions.
//! 3. **Command interpreter** - the host command set, including the
//!    two-byte Set LEDs and Set Typematic commands.
//! 4. **Scancode tables** - HID usage → Set 2 scancode mapping.

pub mod command;
pub mod frame;
pub mod line;
pub mod scancode;

use crate::error::Error;

pub use command::{Action, Command, Pending, Reply, Session};
pub use frame::FrameCodec;
pub use line::{GpioLines, Lines};

// Device → host responses.

/// Command acknowledged.
pub const ACK: u8 = 0xFA;
/// Last frame was corrupt; send it again.
pub const RESEND: u8 = 0xFE;
/// Basic assurance test passed.
pub const BAT_OK: u8 = 0xAA;
/// Reply to the Echo command.
pub const ECHO: u8 = 0xEE;

// Scancode framing bytes.

/// Prefix for extended (E0) keys.
pub const EXTENDED: u8 = 0xE0;
/// Prefix for the Pause key sequence.
pub const EXTENDED_PAUSE: u8 = 0xE1;
/// Break (key release) prefix.
pub const BREAK: u8 = 0xF0;

/// Byte-level view of the bus used by the control loop.
///
/// [`FrameCodec`] is the hardware implementation; tests substitute a
/// recorder.
pub trait Ps2Bus {
    /// Transmit one byte to the host.
    ///
    /// Returns [`Error::BusBusy`] if the host never released the bus.
    fn send(&mut self, data: u8) -> Result<(), Error>;

    /// Clock in one byte the host has requested to send.
    fn receive(&mut self) -> Result<u8, Error>;

    /// Busy-wait.
    fn pause_ms(&mut self, ms: u32);
}
