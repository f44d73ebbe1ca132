//! HID report types and the USB collaborator contract.
//!
//! The USB host stack itself lives outside this crate. It hands us
//! [`UsbEvent`]s and accepts LED reports and resume requests through
//! [`UsbKeyboard`].

pub mod keyboard;
pub mod led;


pub use keyboard::KeyboardReport;
pub use led::LedReport;

/// Identifies one HID interface on the USB bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress {
    /// USB device address.
    pub device: u8,
    /// HID interface instance on that device.
    pub instance: u8,
}

impl DeviceAddress {
    pub const fn new(device: u8, instance: u8) -> Self {
        Self { device, instance }
    }
}

/// Events produced by the USB host stack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbEvent {
    /// A boot-protocol keyboard interface was enumerated.
    Mounted(DeviceAddress),
    /// A previously mounted interface went away.
    Unmounted(DeviceAddress),
    /// An input report arrived. Delivery pauses until
    /// [`UsbKeyboard::resume`] is called for the same interface.
    Report(DeviceAddress, KeyboardReport),
}

/// Outbound half of the USB collaborator.
pub trait UsbKeyboard {
    /// Write a LED output report to the keyboard at `address`.
    fn set_leds(&mut self, address: DeviceAddress, leds: LedReport);

    /// Ask for the next input report from `address`.
    fn resume(&mut self, address: DeviceAddress);
}
