//! Peripheral clock gating.

use crate::hw_traits::sysctl::{SysctlPeriph, RCGC_R0};
use crate::util::BitsExt;

/// Peripherals that can be gated on through the run-mode clock gating registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    /// Synchronous serial interface 0
    Ssi0,
    /// GPIO port A
    GpioA,
}

/// Whether the peripheral reports ready after being clocked
pub fn peripheral_ready<S: SysctlPeriph>(sysctl: &S, periph: Peripheral) -> bool {
    let pr = match periph {
        Peripheral::Ssi0 => sysctl.prssi_rd(),
        Peripheral::GpioA => sysctl.prgpio_rd(),
    };
    pr.check(RCGC_R0) != 0
}

/// Gate the peripheral's run-mode clock on and spin until it reports ready.
pub fn peripheral_enable<S: SysctlPeriph>(sysctl: &S, periph: Peripheral) {
    match periph {
        Peripheral::Ssi0 => sysctl.rcgcssi_wr(sysctl.rcgcssi_rd().set(RCGC_R0)),
        Peripheral::GpioA => sysctl.rcgcgpio_wr(sysctl.rcgcgpio_rd().set(RCGC_R0)),
    }
    while !peripheral_ready(sysctl, periph) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBoard;
    use std::vec::Vec;

    #[test]
    fn enable_polls_until_ready() {
        let board = SimBoard::new();
        board.sysctl.ready_after(3);
        assert!(!peripheral_ready(&board.sysctl, Peripheral::GpioA));

        board.log.clear();
        peripheral_enable(&board.sysctl, Peripheral::GpioA);

        let polls: Vec<u32> = board
            .log
            .entries()
            .iter()
            .filter(|a| a.reg == "prgpio")
            .map(|a| a.value)
            .collect();
        assert_eq!(polls, [0, 0, 0, 1]);
        assert!(peripheral_ready(&board.sysctl, Peripheral::GpioA));
        assert!(!peripheral_ready(&board.sysctl, Peripheral::Ssi0));
    }

    #[test]
    fn enabling_a_ready_peripheral_does_not_wait() {
        let board = SimBoard::new();
        peripheral_enable(&board.sysctl, Peripheral::Ssi0);
        board.sysctl.ready_after(5);
        board.log.clear();

        peripheral_enable(&board.sysctl, Peripheral::Ssi0);
        let polls = board
            .log
            .entries()
            .iter()
            .filter(|a| a.reg == "prssi")
            .count();
        assert_eq!(polls, 1);
    }
}
