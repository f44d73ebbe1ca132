//! Control loop state - ties the bus, the USB collaborator, and the timers
//! together.
//!
//! The runtime feeds the controller three kinds of input:
//!
//! - USB events ([`Controller::on_usb_event`]),
//! - clock edges from the host ([`Controller::on_clock_edge`]),
//! - timer expiries ([`Controller::on_timer`], due at
//!   [`Controller::next_deadline`]).
//!
//! and then calls [`Controller::dispatch`], which services a pending host
//! request before a pending repeat.

use crate::blink::Blink;
use crate::hid::{DeviceAddress, KeyboardReport, LedReport, UsbEvent, UsbKeyboard};
use crate::ps2::{Action, Ps2Bus, Session, RESEND};
use crate::signals::Signals;
use crate::translate::{repeat_sequence, RepeatChange, Translator};
use crate::typematic::Repeater;

pub struct Controller<'a, B, U> {
    bus: B,
    usb: U,
    signals: &'a Signals,
    session: Session,
    translator: Translator,
    repeater: Repeater,
    blink: Blink,
    attached: Option<DeviceAddress>,
}

impl<'a, B: Ps2Bus, U: UsbKeyboard> Controller<'a, B, U> {
    pub fn new(bus: B, usb: U, signals: &'a Signals) -> Self {
        Self {
            bus,
            usb,
            signals,
            session: Session::new(),
            translator: Translator::new(),
            repeater: Repeater::new(),
            blink: Blink::new(),
            attached: None,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn usb(&self) -> &U {
        &self.usb
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn repeater(&self) -> &Repeater {
        &self.repeater
    }

    pub fn blink(&self) -> &Blink {
        &self.blink
    }

    /// The keyboard reports are taken from, if one is mounted.
    pub fn attached(&self) -> Option<DeviceAddress> {
        self.attached
    }

    // ── USB side ────────────────────────────────────────────────

    pub fn on_usb_event(&mut self, event: UsbEvent, now_us: u64) {
        match event {
            UsbEvent::Mounted(address) => self.mount(address, now_us),
            UsbEvent::Unmounted(address) => self.unmount(address),
            UsbEvent::Report(address, report) => self.report(address, &report, now_us),
        }
    }

    fn mount(&mut self, address: DeviceAddress, now_us: u64) {
        info!(
            "keyboard mounted: device {} instance {}",
            address.device,
            address.instance
        );
        self.attached = Some(address);
        self.blink.arm(now_us);
        self.usb.resume(address);
    }

    fn unmount(&mut self, address: DeviceAddress) {
        if self.attached == Some(address) {
            info!(
                "keyboard unmounted: device {} instance {}",
                address.device,
                address.instance
            );
            self.attached = None;
        }
    }

    fn report(&mut self, address: DeviceAddress, report: &KeyboardReport, now_us: u64) {
        if self.attached != Some(address) {
            return;
        }
        if !self.session.enabled || report.reserved != 0 {
            self.usb.resume(address);
            return;
        }

        let translation = self.translator.translate(report);
        match translation.repeat {
            RepeatChange::Keep => {}
            RepeatChange::Cancel => self.repeater.cancel(),
            RepeatChange::Arm(usage) => {
                self.repeater.arm(usage, now_us, &self.session.typematic)
            }
        }
        for &byte in &translation.scancodes {
            self.send(byte);
        }
        self.usb.resume(address);
    }

    fn write_leds(&mut self, leds: LedReport) {
        if let Some(address) = self.attached {
            self.usb.set_leds(address, leds);
        }
    }

    // ── Interrupt and timer side ─────────────────────────────────

    /// Clock-edge handler. Returns `true` if a host request was raised.
    pub fn on_clock_edge(&self, data_high: bool) -> bool {
        self.signals.on_clock_edge(data_high)
    }

    /// Run every timer whose deadline has passed.
    pub fn on_timer(&mut self, now_us: u64) {
        if self.repeater.fire(now_us, &self.session.typematic).is_some() {
            self.signals.raise_repeat();
        }
        if let Some(leds) = self.blink.fire(now_us, self.attached.is_some()) {
            self.write_leds(leds);
        }
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.repeater.deadline(), self.blink.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── Control loop body ─────────────────────────────────────────

    /// Service pending signals: host request first, then repeat.
    pub fn dispatch(&mut self, now_us: u64) {
        if self.signals.take_host_request() {
            self.service_host(now_us);
        }
        if self.signals.take_repeat() {
            self.service_repeat();
        }
    }

    fn service_host(&mut self, now_us: u64) {
        let byte = match self.bus.receive() {
            Ok(byte) => byte,
            Err(e) => {
                warn!("receive failed: {}", e);
                self.send(RESEND);
                return;
            }
        };

        for action in self.session.handle(byte) {
            match action {
                Action::Send(data) => self.send(data),
                Action::Pause(ms) => self.bus.pause_ms(ms),
                Action::SetLeds(leds) => self.write_leds(leds),
                Action::ArmBlink => self.blink.arm(now_us),
            }
        }
    }

    fn service_repeat(&mut self) {
        let Some(usage) = self.repeater.key() else {
            return;
        };
        if let Some(bytes) = repeat_sequence(usage) {
            for byte in bytes {
                self.send(byte);
            }
        }
    }

    fn send(&mut self, data: u8) {
        match self.bus.send(data) {
            Ok(()) => self.session.record_sent(data),
            Err(e) => warn!("dropped {=u8:#x}: {}", data, e),
        }
    }
}
