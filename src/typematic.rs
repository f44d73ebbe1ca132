//! Typematic (auto-repeat) settings and scheduler.
//!
//! Only the most recently pressed key repeats. The scheduler is a
//! one-shot deadline that the runtime sleeps on; each firing re-arms it
//! at the repeat interval for as long as a key is armed.
//!
//! Times are monotonic microsecond timestamps supplied by the caller.

use crate::config::{
    DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_US, REPEAT_DELAYS_MS,
    REPEAT_INTERVAL_BASE_US, REPEAT_INTERVAL_STEP_US,
};

/// Delay and rate set by the host's Set Typematic command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TypematicSettings {
    /// Time between repeats (µs).
    pub interval_us: u32,
    /// Time from key press to the first repeat (ms).
    pub delay_ms: u16,
}

impl TypematicSettings {
    pub const DEFAULT: Self = Self {
        interval_us: DEFAULT_REPEAT_INTERVAL_US,
        delay_ms: DEFAULT_REPEAT_DELAY_MS,
    };

    /// Decode the Set Typematic argument.
    ///
    /// Bits 0-4 select the interval in 15 ms steps above 35 ms; bits 5-6
    /// select the delay. Bit 7 is ignored.
    pub fn from_rate_byte(byte: u8) -> Self {
        let rate = u32::from(byte & 0x1F);
        let delay = usize::from((byte & 0x60) >> 5);
        Self {
            interval_us: REPEAT_INTERVAL_BASE_US + rate * REPEAT_INTERVAL_STEP_US,
            delay_ms: REPEAT_DELAYS_MS[delay],
        }
    }

    pub fn delay_us(&self) -> u64 {
        u64::from(self.delay_ms) * 1_000
    }
}

impl Default for TypematicSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Repeat state: at most one key, at most one pending deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Repeater {
    key: Option<u8>,
    deadline: Option<u64>,
}

impl Repeater {
    pub const fn new() -> Self {
        Self {
            key: None,
            deadline: None,
        }
    }

    /// Make `usage` the repeating key, superseding any other.
    pub fn arm(&mut self, usage: u8, now_us: u64, settings: &TypematicSettings) {
        self.key = Some(usage);
        self.deadline = Some(now_us + settings.delay_us());
    }

    /// Stop repeating.
    pub fn cancel(&mut self) {
        self.key = None;
        self.deadline = None;
    }

    /// Key currently armed for repeat.
    pub fn key(&self) -> Option<u8> {
        self.key
    }

    /// When the timer next fires.
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Timer callback. Returns the key to repeat if the deadline has
    /// passed and a key is still armed; re-arms at the repeat interval.
    pub fn fire(&mut self, now_us: u64, settings: &TypematicSettings) -> Option<u8> {
        match self.deadline {
            Some(deadline) if now_us >= deadline => {}
            _ => return None,
        }

        match self.key {
            Some(key) => {
                self.deadline = Some(now_us + u64::from(settings.interval_us));
                Some(key)
            }
            None => {
                self.deadline = None;
                None
            }
        }
    }
}
