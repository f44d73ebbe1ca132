//! HID boot report → PS/2 Set 2 event translation.
//!
//! Each report is compared with the previous one:
//!
//! 1. Modifier bits that changed become make or break codes.
//! 2. Keys that disappeared become break codes (break pass).
//! 3. Keys that appeared become make codes (make pass).
//!
//! Pause is special: pressing it sends a self-contained sequence (the
//! Break variant when Ctrl is held) and releasing it sends nothing.
//! Pause never repeats.

use crate::hid::KeyboardReport;
use crate::ps2::scancode::{
    is_extended, make_code, modifier_is_extended, BREAK_SEQUENCE, HID_PAUSE, MODIFIER_TO_PS2,
    PAUSE_SEQUENCE,
};
use crate::ps2::{BREAK, EXTENDED};
use heapless::Vec;

/// Room for every modifier changing plus six breaks and six makes.
pub const MAX_SCANCODE_BYTES: usize = 96;

pub type Scancodes = Vec<u8, MAX_SCANCODE_BYTES>;

/// What a report did to auto-repeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RepeatChange {
    /// Nothing pressed or released that affects repeat.
    Keep,
    /// A key was released: stop repeating.
    Cancel,
    /// A key was pressed: it becomes the repeating key.
    Arm(u8),
}

/// Bytes to send for one report, in order, plus the repeat outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    pub scancodes: Scancodes,
    pub repeat: RepeatChange,
}

/// Holds the last translated report.
#[derive(Clone, Debug, Default)]
pub struct Translator {
    snapshot: KeyboardReport,
}

impl Translator {
    pub const fn new() -> Self {
        Self {
            snapshot: KeyboardReport::empty(),
        }
    }

    pub fn snapshot(&self) -> &KeyboardReport {
        &self.snapshot
    }

    /// Diff `report` against the snapshot and make it the new snapshot.
    pub fn translate(&mut self, report: &KeyboardReport) -> Translation {
        let mut out = Translation {
            scancodes: Scancodes::new(),
            repeat: RepeatChange::Keep,
        };

        self.modifiers(report, &mut out);
        self.breaks(report, &mut out);
        self.makes(report, &mut out);

        self.snapshot = *report;
        out
    }

    fn modifiers(&self, report: &KeyboardReport, out: &mut Translation) {
        let changed = report.modifier ^ self.snapshot.modifier;
        for (bit, &code) in MODIFIER_TO_PS2.iter().enumerate() {
            let mask = 1 << bit;
            if changed & mask == 0 {
                continue;
            }
            if modifier_is_extended(bit) {
                push(out, EXTENDED);
            }
            if report.modifier & mask == 0 {
                push(out, BREAK);
            }
            push(out, code);
        }
    }

    fn breaks(&self, report: &KeyboardReport, out: &mut Translation) {
        for &usage in &self.snapshot.keycodes {
            if usage == 0 || usage == HID_PAUSE || report.contains(usage) {
                continue;
            }
            let Some(code) = make_code(usage) else {
                continue;
            };

            out.repeat = RepeatChange::Cancel;
            if is_extended(usage) {
                push(out, EXTENDED);
            }
            push(out, BREAK);
            push(out, code);
        }
    }

    fn makes(&self, report: &KeyboardReport, out: &mut Translation) {
        for &usage in &report.keycodes {
            if usage == 0 || self.snapshot.contains(usage) {
                continue;
            }
            let Some(code) = make_code(usage) else {
                continue;
            };

            if usage == HID_PAUSE {
                let sequence: &[u8] = if report.control_held() {
                    &BREAK_SEQUENCE
                } else {
                    &PAUSE_SEQUENCE
                };
                for &byte in sequence {
                    push(out, byte);
                }
                continue;
            }

            out.repeat = RepeatChange::Arm(usage);
            if is_extended(usage) {
                push(out, EXTENDED);
            }
            push(out, code);
        }
    }
}

/// Make code sequence for a repeating key.
pub fn repeat_sequence(usage: u8) -> Option<Vec<u8, 2>> {
    let code = make_code(usage)?;
    let mut bytes = Vec::new();
    if is_extended(usage) {
        let _ = bytes.push(EXTENDED);
    }
    let _ = bytes.push(code);
    Some(bytes)
}

// Capacity covers the worst case, so a failed push cannot happen.
fn push(out: &mut Translation, byte: u8) {
    let _ = out.scancodes.push(byte);
}
