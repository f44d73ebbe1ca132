//! usb2ps2 - present a USB boot keyboard to a PS/2 host.
//!
//! The whole protocol engine lives in this library so it can be tested on
//! the host with `cargo test --lib`; nothing here touches hardware except
//! through the [`ps2::Lines`], [`ps2::Ps2Bus`] and [`hid::UsbKeyboard`]
//! traits.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and only adds the RP2040 pin setup and the Embassy control task.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module below.
mod fmt;

// ═══════════════════════════════════════════════════════════════════════════
// Protocol modules
// ═══════════════════════════════════════════════════════════════════════════

pub mod blink;
pub mod config;
pub mod controller;
pub mod error;
pub mod hid;
pub mod ps2;
pub mod signals;
pub mod translate;
pub mod typematic;

pub use controller::Controller;
pub use error::Error;
pub use signals::Signals;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - cross-module checks that need no fakes
// ═══════════════════════════════════════════════════════════════════════════
