//! Frame codec - 11-bit PS/2 frames over [`Lines`].
//!
//! ```text
//!  start  d0 d1 d2 d3 d4 d5 d6 d7  parity  stop
//!    0    ------ LSB first ------   odd     1
//! ```
//!
//! Host → device frames are the same 11 bits, clocked by the device and
//! followed by a device-driven acknowledge bit.

use super::line::Lines;
use super::Ps2Bus;
use crate::config::{SEND_RETRIES, SEND_RETRY_INTERVAL_US};
use crate::error::Error;
use crate::signals::Signals;

/// Bits in one frame.
pub const FRAME_BITS: usize = 11;

/// Odd parity bit for `data`: set when `data` has an even number of ones.
pub fn parity(data: u8) -> bool {
    data.count_ones() % 2 == 0
}

/// The 11 bus levels a device → host frame puts on the data line.
pub fn encode(data: u8) -> [bool; FRAME_BITS] {
    let mut bits = [false; FRAME_BITS];
    for (i, bit) in bits[1..9].iter_mut().enumerate() {
        *bit = data >> i & 1 != 0;
    }
    bits[9] = parity(data);
    bits[10] = true;
    bits
}

/// Sends and receives frames on a set of lines.
///
/// The receive interrupt is masked through [`Signals`] for the whole of
/// each transfer so the clock edges we generate ourselves are never
/// mistaken for a host request.
pub struct FrameCodec<'a, L> {
    lines: L,
    signals: &'a Signals,
}

impl<'a, L: Lines> FrameCodec<'a, L> {
    pub fn new(lines: L, signals: &'a Signals) -> Self {
        Self { lines, signals }
    }

    pub fn lines(&self) -> &L {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }

    /// Transmit one byte once the host leaves the bus idle.
    ///
    /// Polls for an idle bus every millisecond, up to [`SEND_RETRIES`]
    /// times, then gives up with [`Error::BusBusy`].
    pub fn send_frame(&mut self, data: u8) -> Result<(), Error> {
        for _ in 0..SEND_RETRIES {
            if self.lines.bus_idle() {
                self.signals.set_irq_enabled(false);
                self.lines.set_activity(true);
                for bit in encode(data) {
                    self.lines.set_bit(bit);
                }
                self.lines.set_activity(false);
                self.signals.set_irq_enabled(true);
                return Ok(());
            }
            self.lines.delay_us(SEND_RETRY_INTERVAL_US);
        }
        Err(Error::BusBusy { data })
    }

    /// Clock in a byte from the host and acknowledge it.
    ///
    /// The acknowledge is sent whatever the parity; a parity failure is
    /// reported afterwards so the caller can ask for a resend.
    pub fn receive_frame(&mut self) -> Result<u8, Error> {
        self.signals.set_irq_enabled(false);
        self.lines.set_activity(true);

        // Start bit is already on the wire.
        self.lines.cycle_clock();

        let mut data = 0u8;
        let mut expected = true;
        for i in 0..8 {
            if self.lines.data_is_high() {
                data |= 1 << i;
                expected = !expected;
            }
            self.lines.cycle_clock();
        }

        let parity_ok = self.lines.data_is_high() == expected;
        // Stop bit.
        self.lines.cycle_clock();

        // Acknowledge, then release data.
        self.lines.set_bit(false);
        self.lines.set_data(true);

        self.signals.set_irq_enabled(true);
        self.lines.set_activity(false);

        if parity_ok {
            Ok(data)
        } else {
            Err(Error::Parity { data })
        }
    }
}

impl<L: Lines> Ps2Bus for FrameCodec<'_, L> {
    fn send(&mut self, data: u8) -> Result<(), Error> {
        self.send_frame(data)
    }

    fn receive(&mut self) -> Result<u8, Error> {
        self.receive_frame()
    }

    fn pause_ms(&mut self, ms: u32) {
        self.lines.delay_us(ms * 1_000);
    }
}
