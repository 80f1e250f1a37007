//! Steps a TLV5616 on SSI0 through 100, 500, 1000, 2000 and 2500 with two seconds between steps.
//!
//! Wiring: `PA2` -> SCLK, `PA3` -> FS, `PA5` -> DIN.

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_probe as _;
use tm4c123_ssi_dac::{dac::Tlv5616, delay::Delay, init::DefaultInit, pac, sequence};

#[entry]
fn main() -> ! {
    let periph = pac::Peripherals::take().unwrap();

    let (sysclk, mut ssi) = sequence::bring_up::<DefaultInit, _, _, _>(
        &periph.SYSCTL,
        &periph.GPIO_PORTA,
        periph.SSI0,
    );
    let settings = ssi.settings();
    defmt::info!(
        "sysclk {=u32} Hz, ssi0 {=u32} Hz: {}",
        sysclk.freq(),
        settings.bit_rate(&sysclk),
        settings
    );

    let dac = Tlv5616::default();
    let mut delay = Delay::new(&sysclk);

    match sequence::run(&mut ssi, &dac, &mut delay) {
        Ok(never) => match never {},
        Err(never) => match never {},
    }
}
