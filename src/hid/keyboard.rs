//! USB HID keyboard input report (boot protocol).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Number of key-usage slots in a boot report.
pub const KEY_SLOTS: usize = 6;

pub const MOD_LEFT_CTRL: u8 = 0x01;
pub const MOD_RIGHT_CTRL: u8 = 0x10;

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (0x00 unless the keyboard reports a phantom state).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; KEY_SLOTS],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; KEY_SLOTS],
        }
    }

    /// Parse from the raw bytes of a boot-protocol input report.
    ///
    /// Longer buffers are accepted; only the first 8 bytes are read.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < KEYBOARD_REPORT_SIZE {
            return None;
        }
        Some(Self {
            modifier: data[0],
            reserved: data[1],
            keycodes: [data[2], data[3], data[4], data[5], data[6], data[7]],
        })
    }

    /// Returns `true` if `code` occupies any of the key slots.
    pub fn contains(&self, code: u8) -> bool {
        self.keycodes.iter().any(|&k| k == code)
    }

    /// Either Ctrl key is held.
    pub fn control_held(&self) -> bool {
        self.modifier & (MOD_LEFT_CTRL | MOD_RIGHT_CTRL) != 0
    }

    /// Returns `true` if no keys are pressed (release event).
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}
