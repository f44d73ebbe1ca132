//! Flags shared between interrupt/timer context and the control loop.
//!
//! Producers (the clock-edge handler and the typematic timer) only ever
//! *set* a flag. The control loop is the only consumer: it clears a flag
//! before acting on it, so a request raised while it works is kept for
//! the next pass. Plain load/store keeps this usable on cores without
//! compare-and-swap (Cortex-M0+).

use core::sync::atomic::{AtomicBool, Ordering};

pub struct Signals {
    /// Clock-edge interrupt may raise host requests.
    irq_enabled: AtomicBool,
    /// Host pulled data low and released clock: it wants to send.
    host_request: AtomicBool,
    /// Typematic timer fired for the armed key.
    repeat_fired: AtomicBool,
}

impl Signals {
    pub const fn new() -> Self {
        Self {
            irq_enabled: AtomicBool::new(true),
            host_request: AtomicBool::new(false),
            repeat_fired: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn irq_enabled(&self) -> bool {
        self.irq_enabled.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set_irq_enabled(&self, enabled: bool) {
        self.irq_enabled.store(enabled, Ordering::Release);
    }

    /// Clock-edge interrupt handler body.
    ///
    /// Raises a host request if the interrupt is unmasked and the host is
    /// holding data low. Returns `true` if a request was raised.
    pub fn on_clock_edge(&self, data_high: bool) -> bool {
        if self.irq_enabled() && !data_high {
            self.host_request.store(true, Ordering::Release);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn raise_repeat(&self) {
        self.repeat_fired.store(true, Ordering::Release);
    }

    /// Consume a pending host request.
    pub fn take_host_request(&self) -> bool {
        take(&self.host_request)
    }

    /// Consume a pending repeat.
    pub fn take_repeat(&self) -> bool {
        take(&self.repeat_fired)
    }

    pub fn host_request_pending(&self) -> bool {
        self.host_request.load(Ordering::Acquire)
    }

    pub fn repeat_pending(&self) -> bool {
        self.repeat_fired.load(Ordering::Acquire)
    }
}

impl Default for Signals {
    fn default() -> Self {
        Self::new()
    }
}

fn take(flag: &AtomicBool) -> bool {
    if flag.load(Ordering::Acquire) {
        flag.store(false, Ordering::Release);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_with_data_low_raises_request() {
        let signals = Signals::new();
        assert!(signals.on_clock_edge(false));
        assert!(signals.take_host_request());
        assert!(!signals.take_host_request());
    }

    #[test]
    fn edge_with_data_high_is_ignored() {
        let signals = Signals::new();
        assert!(!signals.on_clock_edge(true));
        assert!(!signals.host_request_pending());
    }

    #[test]
    fn masked_interrupt_is_ignored() {
        let signals = Signals::new();
        signals.set_irq_enabled(false);
        assert!(!signals.on_clock_edge(false));
        assert!(!signals.host_request_pending());
    }

    #[test]
    fn repeat_flag_is_taken_once() {
        let signals = Signals::new();
        signals.raise_repeat();
        signals.raise_repeat();
        assert!(signals.repeat_pending());
        assert!(signals.take_repeat());
        assert!(!signals.repeat_pending());
        assert!(!signals.take_repeat());
    }
}
