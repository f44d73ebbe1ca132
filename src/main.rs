//! usb2ps2 firmware - RP2040 USB keyboard to PS/2 host adapter.
//!
//! Pin map (Raspberry Pi Pico):
//! ```text
//! GP14  clock in      GP15  clock out (inverting driver)
//! GP17  data in       GP16  data out  (inverting driver)
//! GP25  activity LED
//! ```
//!
//! One Embassy task owns the [`Controller`]. It sleeps until the host
//! releases the clock line, a USB event arrives, or the next timer
//! deadline, then lets the controller service whatever is pending.

#![no_std]
#![no_main]

mod usb;

use defmt::info;
use embassy_executor::Spawner;
use embassy_futures::select::{select3, Either3};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Delay, Instant, Timer};
use usb2ps2::ps2::{FrameCodec, GpioLines, Lines};
use usb2ps2::{Controller, Signals};
use {defmt_rtt as _, panic_probe as _};

static SIGNALS: Signals = Signals::new();

type BoardLines = GpioLines<
    Output<'static>,
    Output<'static>,
    Input<'static>,
    Input<'static>,
    Output<'static>,
    Delay,
>;
type BoardController = Controller<'static, FrameCodec<'static, BoardLines>, usb::UsbHostLink>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("usb2ps2 starting");

    let lines = GpioLines::new(
        Output::new(p.PIN_15, Level::Low),
        Output::new(p.PIN_16, Level::Low),
        Input::new(p.PIN_14, Pull::None),
        Input::new(p.PIN_17, Pull::None),
        Output::new(p.PIN_25, Level::Low),
        Delay,
    );
    let controller = Controller::new(
        FrameCodec::new(lines, &SIGNALS),
        usb::UsbHostLink,
        &SIGNALS,
    );

    spawner.spawn(control(controller)).expect("spawn control task");
}

fn now_us() -> u64 {
    Instant::now().as_micros()
}

#[embassy_executor::task]
async fn control(mut controller: BoardController) {
    loop {
        let wake = controller
            .next_deadline()
            .map(Instant::from_micros)
            .unwrap_or(Instant::MAX);

        let lines = controller.bus_mut().lines_mut();
        if lines.clock_is_high() && !lines.data_is_high() {
            // Host started a request while we were busy; its edge is gone.
            controller.on_clock_edge(false);
        } else {
            let woke = select3(
                lines.wait_for_clock_rise(),
                usb::EVENTS.receive(),
                Timer::at(wake),
            )
            .await;
            match woke {
                Either3::First(()) => {
                    let data_high = controller.bus_mut().lines_mut().data_is_high();
                    controller.on_clock_edge(data_high);
                }
                Either3::Second(event) => controller.on_usb_event(event, now_us()),
                Either3::Third(()) => {}
            }
        }

        let now = now_us();
        controller.on_timer(now);
        controller.dispatch(now);
    }
}
