//! Host command interpreter.
//!
//! Host → device command bytes (keyboard perspective):
//! ```text
//! 0xFF Reset            ACK, (10 ms), BAT 0xAA     - no trailing ACK
//! 0xFE Resend           last byte sent             - no ACK
//! 0xEE Echo             0xEE                       - no ACK
//! 0xF2 Read ID          ACK, 0xAB, 0x83            - no trailing ACK
//! 0xED Set LEDs         ACK, then 1 argument byte  → ACK
//! 0xF3 Set Typematic    ACK, then 1 argument byte  → ACK
//! 0xF4 Enable           ACK
//! 0xF5 Disable          restore defaults, ACK
//! 0xF6 Set Defaults     restore defaults, enable, ACK
//! other                 ACK
//! ```
//!
//! The interpreter never touches the bus. It returns a [`Reply`] listing
//! what the control loop must do, in order.

use super::{ACK, BAT_OK, ECHO};
use crate::config::{BAT_DELAY_MS, KEYBOARD_ID};
use crate::hid::LedReport;
use crate::typematic::TypematicSettings;
use heapless::Vec;

/// Host command bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Reset,
    Resend,
    Echo,
    ReadId,
    SetLeds,
    SetTypematic,
    Enable,
    Disable,
    SetDefaults,
    /// Anything else - acknowledged and otherwise ignored.
    Other(u8),
}

impl From<u8> for Command {
    fn from(byte: u8) -> Self {
        match byte {
            0xFF => Command::Reset,
            0xFE => Command::Resend,
            0xEE => Command::Echo,
            0xF2 => Command::ReadId,
            0xED => Command::SetLeds,
            0xF3 => Command::SetTypematic,
            0xF4 => Command::Enable,
            0xF5 => Command::Disable,
            0xF6 => Command::SetDefaults,
            other => Command::Other(other),
        }
    }
}

/// Argument byte the interpreter is waiting for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pending {
    #[default]
    None,
    Leds,
    Typematic,
}

/// One step the control loop carries out for a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Transmit a byte to the host.
    Send(u8),
    /// Busy-wait before the next action.
    Pause(u32),
    /// Write the keyboard LEDs.
    SetLeds(LedReport),
    /// Start the status blink sequence.
    ArmBlink,
}

/// Ordered actions for one received byte.
pub type Reply = Vec<Action, 4>;

/// Bus session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Scanning enabled - key events are forwarded to the host.
    pub enabled: bool,
    /// Second byte of a two-byte command still to come.
    pub pending: Pending,
    /// Last byte put on the wire, for Resend.
    pub last_sent: u8,
    /// Typematic delay and rate.
    pub typematic: TypematicSettings,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub const fn new() -> Self {
        Self {
            enabled: true,
            pending: Pending::None,
            last_sent: 0,
            typematic: TypematicSettings::DEFAULT,
        }
    }

    /// Note a byte that made it onto the wire.
    pub fn record_sent(&mut self, data: u8) {
        self.last_sent = data;
    }

    /// Interpret one byte received from the host.
    pub fn handle(&mut self, byte: u8) -> Reply {
        let mut reply = Reply::new();

        match self.pending {
            Pending::Leds => {
                self.pending = Pending::None;
                push(&mut reply, Action::SetLeds(LedReport::from_ps2(byte)));
            }
            Pending::Typematic => {
                self.pending = Pending::None;
                self.typematic = TypematicSettings::from_rate_byte(byte);
                debug!(
                    "typematic: delay {} ms, interval {} us",
                    self.typematic.delay_ms,
                    self.typematic.interval_us
                );
            }
            Pending::None => {
                let command = Command::from(byte);
                debug!("host command {}", command);

                match command {
                    Command::Reset => {
                        push(&mut reply, Action::Send(ACK));
                        self.enabled = true;
                        push(&mut reply, Action::ArmBlink);
                        push(&mut reply, Action::Pause(BAT_DELAY_MS));
                        push(&mut reply, Action::Send(BAT_OK));
                        return reply;
                    }
                    Command::Resend => {
                        push(&mut reply, Action::Send(self.last_sent));
                        return reply;
                    }
                    Command::Echo => {
                        push(&mut reply, Action::Send(ECHO));
                        return reply;
                    }
                    Command::ReadId => {
                        push(&mut reply, Action::Send(ACK));
                        for id in KEYBOARD_ID {
                            push(&mut reply, Action::Send(id));
                        }
                        return reply;
                    }
                    Command::SetLeds => self.pending = Pending::Leds,
                    Command::SetTypematic => self.pending = Pending::Typematic,
                    Command::Enable => self.enabled = true,
                    Command::Disable | Command::SetDefaults => {
                        self.enabled = command == Command::SetDefaults;
                        self.typematic = TypematicSettings::DEFAULT;
                        push(&mut reply, Action::SetLeds(LedReport::OFF));
                    }
                    Command::Other(_) => {}
                }
            }
        }

        push(&mut reply, Action::Send(ACK));
        reply
    }
}

// Every reply above fits in the capacity by construction.
fn push(reply: &mut Reply, action: Action) {
    let _ = reply.push(action);
}
