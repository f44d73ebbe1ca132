//! USB HID usage → PS/2 Set 2 scancode tables.
//!
//! Indices are USB HID Keyboard/Keypad page usage IDs (HID Usage Tables,
//! section 10); values are IBM PC/AT Set 2 make codes. A zero entry means
//! the usage has no Set 2 equivalent.
//!
//! The table is kept exactly as deployed adapters ship it, including two
//! quirks: usages 0x31 (`\`) and 0x32 (non-US `#`) both map to 0x5D, and
//! usage 0x02 (POST Fail) maps to the 0xFC self-test failure code.

/// Make codes for the 8 modifier bits of a boot report, LSB first:
/// LCtrl, LShift, LAlt, LGUI, RCtrl, RShift, RAlt, RGUI.
pub const MODIFIER_TO_PS2: [u8; 8] = [0x14, 0x12, 0x11, 0x1F, 0x14, 0x59, 0x11, 0x27];

/// Make codes indexed by HID usage, 0x00 through 0x73 (F24).
#[rustfmt::skip]
pub const HID_TO_PS2: [u8; 116] = [
    // 0x00  -     Roll  POST  -     A     B     C     D     E     F     G     H     I     J     K     L
    0x00, 0x00, 0xFC, 0x00, 0x1C, 0x32, 0x21, 0x23, 0x24, 0x2B, 0x34, 0x33, 0x43, 0x3B, 0x42, 0x4B,
    // 0x10  M     N     O     P     Q     R     S     T     U     V     W     X     Y     Z     1     2
    0x3A, 0x31, 0x44, 0x4D, 0x15, 0x2D, 0x1B, 0x2C, 0x3C, 0x2A, 0x1D, 0x22, 0x35, 0x1A, 0x16, 0x1E,
    // 0x20  3     4     5     6     7     8     9     0     Enter Esc   Bksp  Tab   Space -     =     [
    0x26, 0x25, 0x2E, 0x36, 0x3D, 0x3E, 0x46, 0x45, 0x5A, 0x76, 0x66, 0x0D, 0x29, 0x4E, 0x55, 0x54,
    // 0x30  ]     \     #     ;     '     `     ,     .     /     Caps  F1    F2    F3    F4    F5    F6
    0x5B, 0x5D, 0x5D, 0x4C, 0x52, 0x0E, 0x41, 0x49, 0x4A, 0x58, 0x05, 0x06, 0x04, 0x0C, 0x03, 0x0B,
    // 0x40  F7    F8    F9    F10   F11   F12   PrtSc ScrLk Pause Ins   Home  PgUp  Del   End   PgDn  Right
    0x83, 0x0A, 0x01, 0x09, 0x78, 0x07, 0x7C, 0x7E, 0x7E, 0x70, 0x6C, 0x7D, 0x71, 0x69, 0x7A, 0x74,
    // 0x50  Left  Down  Up    NumLk KP/   KP*   KP-   KP+   KPEnt KP1   KP2   KP3   KP4   KP5   KP6   KP7
    0x6B, 0x72, 0x75, 0x77, 0x4A, 0x7C, 0x7B, 0x79, 0x5A, 0x69, 0x72, 0x7A, 0x6B, 0x73, 0x74, 0x6C,
    // 0x60  KP8   KP9   KP0   KP.   \|    App   Power KP=   F13   F14   F15   F16   F17   F18   F19   F20
    0x75, 0x7D, 0x70, 0x71, 0x61, 0x2F, 0x37, 0x0F, 0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0x40,
    // 0x70  F21   F22   F23   F24
    0x48, 0x50, 0x57, 0x5F,
];

/// HID usage of the Pause/Break key.
pub const HID_PAUSE: u8 = 0x48;

/// Pause pressed on its own. Pause has no break code; the sequence
/// carries its own release.
pub const PAUSE_SEQUENCE: [u8; 8] = [0xE1, 0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77];

/// Pause pressed with Ctrl held: the Break key.
pub const BREAK_SEQUENCE: [u8; 5] = [0xE0, 0x7E, 0xE0, 0xF0, 0x7E];

/// Set 2 make code for a HID usage, or `None` if the usage is out of
/// range or has no mapping.
pub fn make_code(usage: u8) -> Option<u8> {
    match HID_TO_PS2.get(usage as usize) {
        Some(&0) | None => None,
        Some(&code) => Some(code),
    }
}

/// Keys that need the 0xE0 prefix, by HID usage: Print Screen, the
/// navigation cluster (Pause through Up), keypad `/` and Enter,
/// Application, Power, and everything from 0x81 up.
pub fn is_extended(usage: u8) -> bool {
    matches!(usage, 0x46 | 0x48..=0x52 | 0x54 | 0x58 | 0x65 | 0x66 | 0x81..=0xFF)
}

/// Modifier bits whose Set 2 code carries the 0xE0 prefix: both GUI keys,
/// right Ctrl, right Alt.
pub fn modifier_is_extended(bit: usize) -> bool {
    bit > 2 && bit != 5
}
