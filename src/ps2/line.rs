//! Line transport - raw access to the PS/2 clock and data lines.
//!
//! Each bus line is a pair of pins: an input that reads the line and an
//! output that pulls it low through a transistor. Writing `true` to an
//! output therefore drives the bus *low*; the trait below hides that
//! inversion and speaks in bus levels (`true` = high = released).

use crate::config::{CLOCK_HOLD_US, CLOCK_RELEASE_US, CLOCK_SETTLE_US};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::digital::Wait;

/// Access to the two bus lines plus the activity LED.
pub trait Lines {
    /// Set the clock line to `high` (released) or low (asserted).
    fn set_clock(&mut self, high: bool);

    /// Set the data line to `high` (released) or low (asserted).
    fn set_data(&mut self, high: bool);

    /// Sample the clock line.
    fn clock_is_high(&mut self) -> bool;

    /// Sample the data line.
    fn data_is_high(&mut self) -> bool;

    /// Busy-wait for `us` microseconds.
    fn delay_us(&mut self, us: u32);

    /// Drive the activity indicator.
    fn set_activity(&mut self, on: bool);

    /// Emit one device clock pulse: settle, hold low, release.
    fn cycle_clock(&mut self) {
        self.delay_us(CLOCK_SETTLE_US);
        self.set_clock(false);
        self.delay_us(CLOCK_HOLD_US);
        self.set_clock(true);
        self.delay_us(CLOCK_RELEASE_US);
    }

    /// Put `bit` on the data line and clock it out.
    fn set_bit(&mut self, bit: bool) {
        self.set_data(bit);
        self.cycle_clock();
    }

    /// Both lines released - nobody is talking.
    fn bus_idle(&mut self) -> bool {
        self.clock_is_high() && self.data_is_high()
    }
}

/// [`Lines`] over `embedded-hal` GPIO pins.
pub struct GpioLines<CO, DO, CI, DI, LED, D> {
    clock_out: CO,
    data_out: DO,
    clock_in: CI,
    data_in: DI,
    led: LED,
    delay: D,
}

impl<CO, DO, CI, DI, LED, D> GpioLines<CO, DO, CI, DI, LED, D>
where
    CO: OutputPin,
    DO: OutputPin,
    CI: InputPin,
    DI: InputPin,
    LED: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the pins and release both lines.
    pub fn new(clock_out: CO, data_out: DO, clock_in: CI, data_in: DI, led: LED, delay: D) -> Self {
        let mut lines = Self {
            clock_out,
            data_out,
            clock_in,
            data_in,
            led,
            delay,
        };
        lines.set_clock(true);
        lines.set_data(true);
        lines
    }
}

impl<CO, DO, CI, DI, LED, D> GpioLines<CO, DO, CI, DI, LED, D>
where
    CI: InputPin + Wait,
{
    /// Wait for a rising edge on the clock line.
    ///
    /// A host that wants to send releases clock after pulling data low,
    /// so this edge is the "host is talking" interrupt source.
    pub async fn wait_for_clock_rise(&mut self) {
        let _ = self.clock_in.wait_for_rising_edge().await;
    }
}

impl<CO, DO, CI, DI, LED, D> Lines for GpioLines<CO, DO, CI, DI, LED, D>
where
    CO: OutputPin,
    DO: OutputPin,
    CI: InputPin,
    DI: InputPin,
    LED: OutputPin,
    D: DelayNs,
{
    fn set_clock(&mut self, high: bool) {
        let _ = if high {
            self.clock_out.set_low()
        } else {
            self.clock_out.set_high()
        };
    }

    fn set_data(&mut self, high: bool) {
        let _ = if high {
            self.data_out.set_low()
        } else {
            self.data_out.set_high()
        };
    }

    fn clock_is_high(&mut self) -> bool {
        self.clock_in.is_high().unwrap_or(true)
    }

    fn data_is_high(&mut self) -> bool {
        self.data_in.is_high().unwrap_or(true)
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn set_activity(&mut self, on: bool) {
        let _ = if on {
            self.led.set_high()
        } else {
            self.led.set_low()
        };
    }
}
