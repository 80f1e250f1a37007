//! The DAC stepping program.
//!
//! [`bring_up`] runs once: system clock to 40 MHz, then SSI0. [`run`] then steps the DAC through
//! [`CYCLE`] forever, waiting [`STEP_DELAY_MS`] after every step.
//!
//! The last step writes 2500 straight to the port without encoding and without waiting for FIFO
//! space. If the FIFO happens to be full the word is dropped.

use crate::clock::{Sysclk, SysctlExt, Xtal};
use crate::dac::Tlv5616;
use crate::hw_traits::gpio::GpioPeriph;
use crate::hw_traits::ssi::SsiPeriph;
use crate::hw_traits::sysctl::SysctlPeriph;
use crate::init::SsiInit;
use crate::ssi::{Ssi, SsiConfig};
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiBus;
use embedded_hal_nb::spi::FullDuplex;

/// Crystal on the board
pub const XTAL: Xtal = Xtal::_16MHz;
/// PLL divisor: 200 MHz / 5 = 40 MHz
pub const SYSDIV: u8 = 5;
/// Pause after each step, 26 666 666 delay loops at 40 MHz
pub const STEP_DELAY_MS: u32 = 2_000;

/// One step of the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Encode the code with the DAC's control bits and send it, waiting for FIFO space
    Dac(u16),
    /// Push the word as-is if the FIFO has space
    Raw(u16),
}

/// Steps performed on every pass
pub const CYCLE: [Step; 5] = [
    Step::Dac(100),
    Step::Dac(500),
    Step::Dac(1000),
    Step::Dac(2000),
    Step::Raw(2500),
];

/// Configure the system clock, then SSI0 with strategy `I`. Returns the clock token and the only
/// handle to the port.
pub fn bring_up<I, S, G, P>(sysctl: &S, gpioa: &G, ssi: P) -> (Sysclk, Ssi<P>)
where
    I: SsiInit,
    S: SysctlPeriph,
    G: GpioPeriph,
    P: SsiPeriph,
{
    let sysclk = sysctl.constrain().xtal(XTAL).pll(SYSDIV).freeze();
    let ssi = SsiConfig::new(ssi).init::<I, S, G>(sysctl, gpioa, &sysclk);
    (sysclk, ssi)
}

/// Perform one pass over [`CYCLE`]
pub fn run_cycle<B, D>(bus: &mut B, dac: &Tlv5616, delay: &mut D) -> Result<(), B::Error>
where
    B: SpiBus<u16> + FullDuplex<u16>,
    D: DelayNs,
{
    for step in CYCLE {
        match step {
            Step::Dac(code) => dac.output(bus, code)?,
            Step::Raw(word) => match <B as FullDuplex<u16>>::write(bus, word) {
                Ok(()) | Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(e)) => return Err(e),
            },
        }
        delay.delay_ms(STEP_DELAY_MS);
    }
    Ok(())
}

/// Repeat [`run_cycle`] forever. Only returns if the bus reports an error.
pub fn run<B, D>(bus: &mut B, dac: &Tlv5616, delay: &mut D) -> Result<Infallible, B::Error>
where
    B: SpiBus<u16> + FullDuplex<u16>,
    D: DelayNs,
{
    loop {
        run_cycle(bus, dac, delay)?;
    }
}
