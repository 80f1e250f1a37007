//! Busy-wait delays
//!
//! The delay is a counted spin, three CPU cycles per loop, with no timer involved. Interrupts
//! that fire during the spin stretch it.

use crate::clock::Sysclk;
use embedded_hal::delay::DelayNs;

/// CPU cycles taken by one iteration of the delay loop
pub const CYCLES_PER_LOOP: u32 = 3;

/// Delay provider struct
pub struct Delay {
    freq: u32,
}

impl Delay {
    /// Delay provider calibrated to the configured system clock
    pub fn new(sysclk: &Sysclk) -> Self {
        Delay {
            freq: sysclk.freq(),
        }
    }

    /// Number of delay loops spanning `ms` milliseconds
    pub const fn loops_for_ms(&self, ms: u32) -> u32 {
        let cycles = self.freq as u64 * ms as u64 / 1_000;
        let loops = cycles / CYCLES_PER_LOOP as u64;
        if loops > u32::MAX as u64 {
            u32::MAX
        } else {
            loops as u32
        }
    }

    /// Spin for `loops` iterations of the delay loop
    #[inline]
    pub fn delay_loops(&mut self, loops: u32) {
        spin(loops)
    }
}

#[cfg(feature = "tm4c123gh6pm")]
#[inline(always)]
fn spin(loops: u32) {
    cortex_m::asm::delay(loops.saturating_mul(CYCLES_PER_LOOP));
}

#[cfg(not(feature = "tm4c123gh6pm"))]
#[inline(always)]
fn spin(loops: u32) {
    for _ in 0..loops {
        core::hint::spin_loop();
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = self.freq as u64 * ns as u64 / 1_000_000_000;
        self.delay_loops((cycles / CYCLES_PER_LOOP as u64) as u32);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_loops(self.loops_for_ms(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SysctlExt;
    use crate::sim::SimBoard;

    #[test]
    fn two_seconds_at_40mhz() {
        let board = SimBoard::new();
        let delay = Delay::new(&board.sysctl.constrain().pll(5).freeze());
        assert_eq!(delay.loops_for_ms(2_000), 26_666_666);
        assert_eq!(delay.loops_for_ms(0), 0);
    }
}
