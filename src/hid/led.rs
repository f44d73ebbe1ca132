//! Keyboard LED output report.
//!
//! The PS/2 Set LEDs argument and the HID LED output report both use the
//! three low bits, but in different orders:
//! ```text
//!          bit 0    bit 1    bit 2
//! PS/2     Scroll   Num      Caps
//! HID      Num      Caps     Scroll
//! ```

/// Single-byte HID LED output report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedReport(pub u8);

impl LedReport {
    pub const NUM_LOCK: u8 = 0x01;
    pub const CAPS_LOCK: u8 = 0x02;
    pub const SCROLL_LOCK: u8 = 0x04;

    pub const OFF: Self = Self(0);
    pub const ALL: Self = Self(Self::NUM_LOCK | Self::CAPS_LOCK | Self::SCROLL_LOCK);

    /// Convert a PS/2 Set LEDs argument.
    ///
    /// Values with bits above the three LED bits turn everything off.
    pub fn from_ps2(mask: u8) -> Self {
        if mask > 0x07 {
            return Self::OFF;
        }
        let mut out = 0;
        if mask & 0x01 != 0 {
            out |= Self::SCROLL_LOCK;
        }
        if mask & 0x02 != 0 {
            out |= Self::NUM_LOCK;
        }
        if mask & 0x04 != 0 {
            out |= Self::CAPS_LOCK;
        }
        Self(out)
    }

    pub fn as_byte(self) -> u8 {
        self.0
    }
}
