//! Status blink - flash every keyboard LED once after reset or mount.

use crate::config::{BLINK_ON_US, BLINK_START_US};
use crate::hid::LedReport;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkState {
    #[default]
    Idle,
    /// Armed; LEDs go on at the deadline.
    Pending { deadline: u64 },
    /// LEDs on; they go off at the deadline.
    Lit { deadline: u64 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blink {
    state: BlinkState,
}

impl Blink {
    pub const fn new() -> Self {
        Self {
            state: BlinkState::Idle,
        }
    }

    /// Start (or restart) the sequence.
    pub fn arm(&mut self, now_us: u64) {
        self.state = BlinkState::Pending {
            deadline: now_us + BLINK_START_US,
        };
    }

    pub fn state(&self) -> BlinkState {
        self.state
    }

    pub fn is_blinking(&self) -> bool {
        self.state != BlinkState::Idle
    }

    pub fn deadline(&self) -> Option<u64> {
        match self.state {
            BlinkState::Idle => None,
            BlinkState::Pending { deadline } | BlinkState::Lit { deadline } => Some(deadline),
        }
    }

    /// Timer callback. Returns the LED report to write, if any.
    ///
    /// With no keyboard attached there is nothing to light, so the
    /// sequence just ends.
    pub fn fire(&mut self, now_us: u64, attached: bool) -> Option<LedReport> {
        match self.state {
            BlinkState::Pending { deadline } if now_us >= deadline => {
                if attached {
                    self.state = BlinkState::Lit {
                        deadline: now_us + BLINK_ON_US,
                    };
                    Some(LedReport::ALL)
                } else {
                    self.state = BlinkState::Idle;
                    None
                }
            }
            BlinkState::Lit { deadline } if now_us >= deadline => {
                self.state = BlinkState::Idle;
                attached.then_some(LedReport::OFF)
            }
            _ => None,
        }
    }
}
