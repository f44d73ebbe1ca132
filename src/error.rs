//! Unified error type for usb2ps2.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Every error is absorbed by the control loop; none is fatal.

/// Top-level error type used across the protocol engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The host kept clock or data low for the whole retry window,
    /// so the byte was never put on the wire.
    BusBusy {
        /// Byte that was dropped.
        data: u8,
    },

    /// A host-to-device frame failed its odd-parity check.
    Parity {
        /// Data bits as sampled.
        data: u8,
    },
}
