//! USB host link - the boundary between the USB host stack and the
//! control task.
//!
//! The host stack publishes keyboard mount, unmount and report events on
//! [`EVENTS`]. In the other direction the control task queues LED output
//! reports and "ready for the next report" requests, which the host stack
//! drains from [`LED_REPORTS`] and [`RESUME`].
//!
//! The host stack task must keep draining both queues: write each
//! [`LED_REPORTS`] entry as a HID SET_REPORT (output) to that interface,
//! and re-arm the interrupt IN transfer for each [`RESUME`] entry. An
//! undrained queue fills after four entries and every further push is
//! dropped with a warning.

use defmt::warn;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use usb2ps2::hid::{DeviceAddress, LedReport, UsbEvent, UsbKeyboard};

/// Host stack → control task.
pub static EVENTS: Channel<CriticalSectionRawMutex, UsbEvent, 8> = Channel::new();

/// Control task → host stack: LED output reports to write.
pub static LED_REPORTS: Channel<CriticalSectionRawMutex, (DeviceAddress, LedReport), 4> =
    Channel::new();

/// Control task → host stack: interfaces ready for their next report.
pub static RESUME: Channel<CriticalSectionRawMutex, DeviceAddress, 4> = Channel::new();

/// [`UsbKeyboard`] over the link channels.
///
/// Never blocks: the control task must not stall the PS/2 bus waiting on
/// USB, so a full queue drops the request.
pub struct UsbHostLink;

impl UsbKeyboard for UsbHostLink {
    fn set_leds(&mut self, address: DeviceAddress, leds: LedReport) {
        if LED_REPORTS.try_send((address, leds)).is_err() {
            warn!("LED report queue full - dropping {}", leds);
        }
    }

    fn resume(&mut self, address: DeviceAddress) {
        if RESUME.try_send(address).is_err() {
            warn!("resume queue full - dropping {}", address);
        }
    }
}
