//! Integration tests for the usb2ps2 protocol engine.
//!
//! Everything goes through the public API with fake hardware: a byte-level
//! bus for most scenarios and a bit-level line recorder for the full
//! frame path.

use std::collections::VecDeque;

use usb2ps2::hid::{DeviceAddress, KeyboardReport, LedReport, UsbEvent, UsbKeyboard};
use usb2ps2::ps2::frame::parity;
use usb2ps2::ps2::{FrameCodec, Lines, Ps2Bus};
use usb2ps2::{Controller, Error, Signals};

// ═══════════════════════════════════════════════════════════════════════════
// Fakes
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct RecordingBus {
    sent: Vec<u8>,
    incoming: VecDeque<Result<u8, Error>>,
    paused_ms: u32,
}

impl Ps2Bus for RecordingBus {
    fn send(&mut self, data: u8) -> Result<(), Error> {
        self.sent.push(data);
        Ok(())
    }

    fn receive(&mut self) -> Result<u8, Error> {
        self.incoming.pop_front().unwrap_or(Ok(0))
    }

    fn pause_ms(&mut self, ms: u32) {
        self.paused_ms += ms;
    }
}

#[derive(Default)]
struct RecordingUsb {
    leds: Vec<LedReport>,
    resumes: usize,
}

impl UsbKeyboard for RecordingUsb {
    fn set_leds(&mut self, _address: DeviceAddress, leds: LedReport) {
        self.leds.push(leds);
    }

    fn resume(&mut self, _address: DeviceAddress) {
        self.resumes += 1;
    }
}

/// Data level at every clock pulse, plus a queue of host-driven bits.
#[derive(Default)]
struct WireLines {
    data: bool,
    pulses: Vec<bool>,
    host_bits: VecDeque<bool>,
}

impl Lines for WireLines {
    fn set_clock(&mut self, high: bool) {
        if !high {
            self.pulses.push(self.data);
        }
    }

    fn set_data(&mut self, high: bool) {
        self.data = high;
    }

    fn clock_is_high(&mut self) -> bool {
        true
    }

    fn data_is_high(&mut self) -> bool {
        self.host_bits.pop_front().unwrap_or(true)
    }

    fn delay_us(&mut self, _us: u32) {}

    fn set_activity(&mut self, _on: bool) {}
}

const KBD: DeviceAddress = DeviceAddress::new(1, 0);

type Fake<'a> = Controller<'a, RecordingBus, RecordingUsb>;

fn attached(signals: &Signals) -> Fake<'_> {
    let mut c = Controller::new(RecordingBus::default(), RecordingUsb::default(), signals);
    c.on_usb_event(UsbEvent::Mounted(KBD), 0);
    // Let the mount blink run out.
    c.on_timer(1_000);
    c.on_timer(501_000);
    c
}

fn report(modifier: u8, keys: &[u8]) -> UsbEvent {
    let mut raw = [0u8; 8];
    raw[0] = modifier;
    raw[2..2 + keys.len()].copy_from_slice(keys);
    let report = KeyboardReport::from_bytes(&raw).expect("8-byte report");
    UsbEvent::Report(KBD, report)
}

fn host_command(c: &mut Fake<'_>, byte: u8, now: u64) {
    c.bus_mut().incoming.push_back(Ok(byte));
    c.on_clock_edge(false);
    c.dispatch(now);
}

fn take_sent(c: &mut Fake<'_>) -> Vec<u8> {
    std::mem::take(&mut c.bus_mut().sent)
}

// ═══════════════════════════════════════════════════════════════════════════
// Key events
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn typing_a_letter() {
    let signals = Signals::new();
    let mut c = attached(&signals);

    c.on_usb_event(report(0, &[0x04]), 1_000_000);
    c.on_usb_event(report(0, &[]), 1_050_000);

    assert_eq!(take_sent(&mut c), [0x1C, 0xF0, 0x1C]);
    // Mount plus one per report.
    assert_eq!(c.usb().resumes, 3);
}

#[test]
fn shifted_arrow_key() {
    let signals = Signals::new();
    let mut c = attached(&signals);

    c.on_usb_event(report(0x02, &[0x4F]), 1_000_000);
    c.on_usb_event(report(0x02, &[]), 1_050_000);
    c.on_usb_event(report(0x00, &[]), 1_100_000);

    assert_eq!(
        take_sent(&mut c),
        [0x12, 0xE0, 0x74, 0xE0, 0xF0, 0x74, 0xF0, 0x12]
    );
}

#[test]
fn pause_and_ctrl_break() {
    let signals = Signals::new();
    let mut c = attached(&signals);

    c.on_usb_event(report(0, &[0x48]), 1_000_000);
    c.on_usb_event(report(0, &[]), 1_010_000);
    assert_eq!(
        take_sent(&mut c),
        [0xE1, 0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77]
    );

    c.on_usb_event(report(0x01, &[0x48]), 1_020_000);
    assert_eq!(take_sent(&mut c), [0x14, 0xE0, 0x7E, 0xE0, 0xF0, 0x7E]);

    // Pause never repeats.
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn second_key_takes_over_repeat() {
    let signals = Signals::new();
    let mut c = attached(&signals);

    c.on_usb_event(report(0, &[0x04]), 1_000_000);
    c.on_usb_event(report(0, &[0x04, 0x05]), 1_100_000);
    take_sent(&mut c);

    // A's deadline would have been 1.25 s; B's is 1.35 s.
    c.on_timer(1_250_000);
    c.dispatch(1_250_000);
    assert!(take_sent(&mut c).is_empty());

    c.on_timer(1_350_000);
    c.dispatch(1_350_000);
    assert_eq!(take_sent(&mut c), [0x32]);
}

#[test]
fn typematic_rate_applies_to_repeat() {
    let signals = Signals::new();
    let mut c = attached(&signals);

    // 500 ms delay, 35 + 2 × 15 = 65 ms interval.
    host_command(&mut c, 0xF3, 600_000);
    host_command(&mut c, 0x22, 600_100);
    take_sent(&mut c);

    c.on_usb_event(report(0, &[0x04]), 1_000_000);
    take_sent(&mut c);

    for now in [1_499_999, 1_500_000, 1_564_999, 1_565_000] {
        c.on_timer(now);
        c.dispatch(now);
    }
    assert_eq!(take_sent(&mut c), [0x1C, 0x1C]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Host commands
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn read_id() {
    let signals = Signals::new();
    let mut c = attached(&signals);

    host_command(&mut c, 0xF2, 600_000);
    assert_eq!(take_sent(&mut c), [0xFA, 0xAB, 0x83]);
}

#[test]
fn reset_runs_self_test_and_blinks() {
    let signals = Signals::new();
    let mut c = attached(&signals);
    let leds_before = c.usb().leds.len();

    host_command(&mut c, 0xFF, 600_000);
    assert_eq!(take_sent(&mut c), [0xFA, 0xAA]);
    assert_eq!(c.bus().paused_ms, 10);

    c.on_timer(601_000);
    c.on_timer(1_101_000);
    assert_eq!(
        &c.usb().leds[leds_before..],
        [LedReport::ALL, LedReport::OFF]
    );
}

#[test]
fn set_leds_with_caps_lock() {
    let signals = Signals::new();
    let mut c = attached(&signals);

    host_command(&mut c, 0xED, 600_000);
    host_command(&mut c, 0x04, 600_100);

    assert_eq!(take_sent(&mut c), [0xFA, 0xFA]);
    assert_eq!(c.usb().leds.last(), Some(&LedReport(LedReport::CAPS_LOCK)));
}

#[test]
fn disable_then_enable() {
    let signals = Signals::new();
    let mut c = attached(&signals);

    host_command(&mut c, 0xF5, 600_000);
    c.on_usb_event(report(0, &[0x04]), 700_000);
    assert_eq!(take_sent(&mut c), [0xFA]);

    host_command(&mut c, 0xF4, 800_000);
    c.on_usb_event(report(0, &[0x04]), 900_000);
    assert_eq!(take_sent(&mut c), [0xFA, 0x1C]);
}

#[test]
fn corrupt_frame_asks_for_resend_then_resend_repeats_it() {
    let signals = Signals::new();
    let mut c = attached(&signals);

    c.bus_mut().incoming.push_back(Err(Error::Parity { data: 0xF2 }));
    c.on_clock_edge(false);
    c.dispatch(600_000);
    assert_eq!(take_sent(&mut c), [0xFE]);

    c.on_usb_event(report(0, &[0x04]), 700_000);
    host_command(&mut c, 0xFE, 800_000);
    assert_eq!(take_sent(&mut c), [0x1C, 0x1C]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Full frame path
// ═══════════════════════════════════════════════════════════════════════════

fn host_frame(data: u8) -> VecDeque<bool> {
    let mut bits: VecDeque<bool> = (0..8).map(|i| data >> i & 1 != 0).collect();
    bits.push_back(parity(data));
    bits
}

fn decode_frames(pulses: &[bool]) -> Vec<u8> {
    pulses
        .chunks(11)
        .map(|frame| {
            assert!(!frame[0], "start bit");
            assert!(frame[10], "stop bit");
            let data = (0..8).fold(0u8, |acc, i| acc | (frame[1 + i] as u8) << i);
            assert_eq!(frame[9], parity(data), "parity of {data:#04x}");
            data
        })
        .collect()
}

#[test]
fn read_id_over_the_wire() {
    let signals = Signals::new();
    let lines = WireLines {
        host_bits: host_frame(0xF2),
        ..Default::default()
    };
    let mut c = Controller::new(
        FrameCodec::new(lines, &signals),
        RecordingUsb::default(),
        &signals,
    );

    assert!(c.on_clock_edge(false));
    c.dispatch(0);

    let pulses = &c.bus().lines().pulses;
    // Receive clocks 11 pulses (ending with the low ACK bit), then three
    // device frames follow.
    assert_eq!(pulses.len(), 11 + 3 * 11);
    assert!(!pulses[10]);
    assert_eq!(decode_frames(&pulses[11..]), [0xFA, 0xAB, 0x83]);
    assert!(signals.irq_enabled());
}
