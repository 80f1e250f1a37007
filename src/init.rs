//! SSI bring-up strategies.
//!
//! Both strategies gate SSI0 and GPIO port A on, route `PA2`/`PA3`/`PA5` to SSI0, and leave the
//! port enabled as a master on the system clock with the requested frame format, data size and
//! bit rate. [`RegisterInit`] edits the registers field by field; [`DriverInit`] goes through the
//! [`driverlib`](crate::driverlib) routines. The divisors they pick may differ, the serial clock
//! they produce does not.
//!
//! [`DefaultInit`] is chosen at build time: `RegisterInit` with the `register-init` feature,
//! `DriverInit` otherwise.

use crate::clock::Sysclk;
use crate::driverlib;
use crate::driverlib::sysctl::Peripheral;
use crate::gpio::{pctl_for, PinFunction, Pins};
use crate::hw_traits::gpio::GpioPeriph;
use crate::hw_traits::ssi::{
    SsiPeriph, CC_CS_MASK, CPSR_CPSDVSR_MASK, CR0_DSS_MASK, CR0_SCR_MASK, CR0_SCR_SHIFT, CR1_MS,
    CR1_SSE,
};
use crate::hw_traits::sysctl::{SysctlPeriph, RCGC_R0};
use crate::ssi::{ClockSource, FrameFormat, Role, SsiParams};
use crate::util::BitsExt;

/// A way of configuring SSI0 and its pins.
pub trait SsiInit {
    /// Configure and enable `ssi` according to `params`
    fn init<S: SysctlPeriph, G: GpioPeriph, P: SsiPeriph>(
        sysctl: &S,
        gpioa: &G,
        ssi: &P,
        sysclk: &Sysclk,
        params: &SsiParams,
    );
}

/// Direct register manipulation.
pub struct RegisterInit;

/// Calls into the driver-library routines.
pub struct DriverInit;

/// Strategy selected by the `register-init` feature
#[cfg(feature = "register-init")]
pub type DefaultInit = RegisterInit;
/// Strategy selected by the `register-init` feature
#[cfg(not(feature = "register-init"))]
pub type DefaultInit = DriverInit;

const MAX_CPSDVSR: u32 = 254;
const MAX_SCR: u32 = 255;

/// Prescaler and SCR for the register path: the prescaler alone carries the division while it
/// fits, rounded up to an even value; SCR only grows for rates the prescaler cannot reach.
fn register_divisors(sysclk: u32, bit_rate: u32) -> (u32, u32) {
    let ratio = (sysclk / bit_rate.max(1)).max(2);
    let mut scr = 0;
    loop {
        let cpsdvsr = ratio.div_ceil(scr + 1).next_multiple_of(2);
        if cpsdvsr <= MAX_CPSDVSR || scr == MAX_SCR {
            return (cpsdvsr.min(MAX_CPSDVSR), scr);
        }
        scr += 1;
    }
}

impl SsiInit for RegisterInit {
    fn init<S: SysctlPeriph, G: GpioPeriph, P: SsiPeriph>(
        sysctl: &S,
        gpioa: &G,
        ssi: &P,
        sysclk: &Sysclk,
        params: &SsiParams,
    ) {
        sysctl.rcgcssi_wr(sysctl.rcgcssi_rd().set(RCGC_R0));
        sysctl.rcgcgpio_wr(sysctl.rcgcgpio_rd().set(RCGC_R0));
        // Give the clock gate a few cycles to take effect
        let _ = sysctl.rcgcgpio_rd();

        let pins = Pins::SSI0_THREE_WIRE.mask();
        let (pctl_mask, pctl_bits) = pctl_for(&PinFunction::SSI0_THREE_WIRE);
        gpioa.afsel_wr(gpioa.afsel_rd().set_mask(pins));
        gpioa.pctl_wr(gpioa.pctl_rd().clear_mask(pctl_mask).set_mask(pctl_bits));
        gpioa.amsel_wr(0);
        gpioa.den_wr(gpioa.den_rd().set_mask(pins));

        // Frame format, clock and size may only change while the port is disabled
        ssi.cr1_wr(ssi.cr1_rd().clear(CR1_SSE));
        ssi.cr1_wr(ssi.cr1_rd().clear(CR1_MS));
        ssi.cc_wr(ssi.cc_rd().clear_mask(CC_CS_MASK));

        let (cpsdvsr, scr) = register_divisors(sysclk.freq(), params.bit_rate);
        ssi.cpsr_wr(
            ssi.cpsr_rd()
                .clear_mask(CPSR_CPSDVSR_MASK)
                .set_mask(cpsdvsr),
        );
        ssi.cr0_wr(
            ssi.cr0_rd()
                .clear_mask(CR0_SCR_MASK)
                .set_mask(scr << CR0_SCR_SHIFT),
        );
        ssi.cr0_wr(
            ssi.cr0_rd()
                .clear_mask(FrameFormat::CR0_MASK)
                .set_mask(params.frame_format.cr0_bits()),
        );
        ssi.cr0_wr(
            ssi.cr0_rd()
                .clear_mask(CR0_DSS_MASK)
                .set_mask(params.data_size.dss()),
        );

        ssi.cr1_wr(ssi.cr1_rd().set(CR1_SSE));
    }
}

impl SsiInit for DriverInit {
    fn init<S: SysctlPeriph, G: GpioPeriph, P: SsiPeriph>(
        sysctl: &S,
        gpioa: &G,
        ssi: &P,
        sysclk: &Sysclk,
        params: &SsiParams,
    ) {
        driverlib::sysctl::peripheral_enable(sysctl, Peripheral::Ssi0);
        driverlib::sysctl::peripheral_enable(sysctl, Peripheral::GpioA);

        for function in PinFunction::SSI0_THREE_WIRE {
            driverlib::gpio::pin_configure(gpioa, function);
        }
        driverlib::gpio::pin_type_ssi(gpioa, Pins::SSI0_THREE_WIRE);

        driverlib::ssi::disable(ssi);
        driverlib::ssi::clock_source_set(ssi, ClockSource::System);
        driverlib::ssi::config_set_exp_clk(
            ssi,
            sysclk.freq(),
            params.frame_format,
            Role::Master,
            params.bit_rate,
            params.data_size,
        );
        driverlib::ssi::enable(ssi);
    }
}
