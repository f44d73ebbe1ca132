//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, bus timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// GPIO pin assignments (Raspberry Pi Pico defaults)
//
// The bus side uses separate input and output pins per line. Outputs drive
// NPN transistors that pull the open-collector PS/2 lines low, so the
// output pins are active-high while the bus itself is active-low.
//
//   Clock in   → GP14
//   Clock out  → GP15
//   Data out   → GP16
//   Data in    → GP17
//   Status LED → GP25 (on-board)

// PS/2 bus timing

/// Idle settle before the clock is asserted (µs).
pub const CLOCK_SETTLE_US: u32 = 20;

/// Time the clock line is held low (µs).
pub const CLOCK_HOLD_US: u32 = 40;

/// Time the clock line is released after a pulse (µs).
pub const CLOCK_RELEASE_US: u32 = 20;

/// Attempts made to find the bus idle before a byte is dropped.
pub const SEND_RETRIES: u8 = 100;

/// Wait between bus-idle checks (µs).
pub const SEND_RETRY_INTERVAL_US: u32 = 1_000;

/// Gap between the reset ACK and the BAT completion code (ms).
pub const BAT_DELAY_MS: u32 = 10;

// Typematic

/// Slowest-to-fastest repeat interval base (µs) - rate value 0.
pub const REPEAT_INTERVAL_BASE_US: u32 = 35_000;

/// Repeat interval increment per rate step (µs).
pub const REPEAT_INTERVAL_STEP_US: u32 = 15_000;

/// Power-on repeat interval (µs).
pub const DEFAULT_REPEAT_INTERVAL_US: u32 = REPEAT_INTERVAL_BASE_US;

/// Power-on delay before the first repeat (ms).
pub const DEFAULT_REPEAT_DELAY_MS: u16 = 250;

/// Initial delays selected by bits 5-6 of the Set Typematic byte (ms).
pub const REPEAT_DELAYS_MS: [u16; 4] = [250, 500, 750, 1000];

// Status blink

/// Delay from arming to the LEDs turning on (µs).
pub const BLINK_START_US: u64 = 1_000;

/// Time the LEDs stay lit (µs).
pub const BLINK_ON_US: u64 = 500_000;

// Identity

/// Reply to Read ID (0xF2): MF2 keyboard with translation.
pub const KEYBOARD_ID: [u8; 2] = [0xAB, 0x83];
