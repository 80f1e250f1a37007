//! System clock configuration.
//!
//! The clock is configured once through a builder obtained from [`SysctlExt::constrain`]. Choosing
//! a crystal is optional (16 MHz by default), choosing between the PLL and the bare main oscillator
//! is mandatory. [`ClockConfig::freeze`] applies the configuration and returns a [`Sysclk`] token;
//! peripherals that derive their timing from the system clock ask for a `&Sysclk`, so they cannot
//! be configured before the clock is.
//!
//! ```ignore
//! let sysclk = periph.SYSCTL.constrain().xtal(Xtal::_16MHz).pll(5).freeze();
//! assert_eq!(sysclk.freq(), 40_000_000);
//! ```

use crate::hw_traits::sysctl::{
    SysctlPeriph, MISC_MOSCPUPMIS, MISC_PLLLMIS, RCC2_USERCC2, RCC_BYPASS, RCC_MOSCDIS,
    RCC_OSCSRC_MASK, RCC_PWRDN, RCC_SYSDIV_MASK, RCC_SYSDIV_SHIFT, RCC_USESYSDIV, RCC_XTAL_MASK,
    RCC_XTAL_SHIFT, RIS_MOSCPUPRIS, RIS_PLLLRIS,
};
use crate::util::BitsExt;

/// PLL output frequency. The legacy `RCC` divider path always sees it halved.
pub const PLL_FREQ: u32 = 400_000_000;

const PLL_MIN_DIV: u8 = 4;
const OSC_MIN_DIV: u8 = 1;
const MAX_DIV: u8 = 16;

/// External crystal frequency on the main oscillator pins, encoded as the `RCC.XTAL` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Xtal {
    _8MHz = 0x0E,
    _10MHz = 0x10,
    _12MHz = 0x11,
    _16MHz = 0x15,
    _20MHz = 0x18,
    _24MHz = 0x19,
    _25MHz = 0x1A,
}

impl Xtal {
    /// Crystal frequency in Hz
    pub const fn freq(self) -> u32 {
        match self {
            Xtal::_8MHz => 8_000_000,
            Xtal::_10MHz => 10_000_000,
            Xtal::_12MHz => 12_000_000,
            Xtal::_16MHz => 16_000_000,
            Xtal::_20MHz => 20_000_000,
            Xtal::_24MHz => 24_000_000,
            Xtal::_25MHz => 25_000_000,
        }
    }

    #[inline(always)]
    fn code(self) -> u32 {
        self as u32
    }
}

#[doc(hidden)]
pub struct Undefined;
#[doc(hidden)]
pub struct PllDefined(u8);
#[doc(hidden)]
pub struct OscDefined(u8);

#[doc(hidden)]
pub trait SysclkSource {
    fn sysdiv(&self) -> u8;
    fn uses_pll(&self) -> bool;
    fn freq(&self, xtal: Xtal) -> u32;
}

impl SysclkSource for PllDefined {
    fn sysdiv(&self) -> u8 {
        self.0
    }

    fn uses_pll(&self) -> bool {
        true
    }

    fn freq(&self, _xtal: Xtal) -> u32 {
        (PLL_FREQ / 2) / self.0 as u32
    }
}

impl SysclkSource for OscDefined {
    fn sysdiv(&self) -> u8 {
        self.0
    }

    fn uses_pll(&self) -> bool {
        false
    }

    fn freq(&self, xtal: Xtal) -> u32 {
        xtal.freq() / self.0 as u32
    }
}

/// Builder object containing the system clock configuration.
pub struct ClockConfig<'a, S: SysctlPeriph, MODE> {
    periph: &'a S,
    xtal: Xtal,
    mode: MODE,
}

/// Extension trait allowing the system control block to be turned into the clock configuration
/// builder object.
pub trait SysctlExt: SysctlPeriph + Sized {
    /// Borrows the system control block as a clock configuration builder
    fn constrain(&self) -> ClockConfig<'_, Self, Undefined>;
}

impl<S: SysctlPeriph> SysctlExt for S {
    fn constrain(&self) -> ClockConfig<'_, Self, Undefined> {
        ClockConfig {
            periph: self,
            xtal: Xtal::_16MHz,
            mode: Undefined,
        }
    }
}

impl<'a, S: SysctlPeriph, MODE> ClockConfig<'a, S, MODE> {
    /// Select the crystal fitted to the main oscillator
    pub const fn xtal(mut self, xtal: Xtal) -> Self {
        self.xtal = xtal;
        self
    }
}

impl<'a, S: SysctlPeriph> ClockConfig<'a, S, Undefined> {
    /// Run from the PLL. Frequency is `200 MHz / sysdiv`; `sysdiv` is clamped to 4..=16.
    pub fn pll(self, sysdiv: u8) -> ClockConfig<'a, S, PllDefined> {
        ClockConfig {
            periph: self.periph,
            xtal: self.xtal,
            mode: PllDefined(sysdiv.clamp(PLL_MIN_DIV, MAX_DIV)),
        }
    }

    /// Run straight from the main oscillator with the PLL powered down. Frequency is
    /// `xtal / sysdiv`; `sysdiv` is clamped to 1..=16.
    pub fn main_osc(self, sysdiv: u8) -> ClockConfig<'a, S, OscDefined> {
        ClockConfig {
            periph: self.periph,
            xtal: self.xtal,
            mode: OscDefined(sysdiv.clamp(OSC_MIN_DIV, MAX_DIV)),
        }
    }
}

impl<'a, S: SysctlPeriph, MODE: SysclkSource> ClockConfig<'a, S, MODE> {
    fn configure_periph(&self) {
        let periph = self.periph;

        // Hand control to the legacy RCC register
        periph.rcc2_wr(periph.rcc2_rd().clear(RCC2_USERCC2));

        let prev = periph.rcc_rd();
        // The PLL only relocks when it is powered up or its reference changes
        let relock = self.mode.uses_pll()
            && (prev.check(RCC_PWRDN) != 0
                || prev & RCC_XTAL_MASK != self.xtal.code() << RCC_XTAL_SHIFT);

        // Run from the raw oscillator while the PLL is reconfigured
        let mut rcc = prev.set(RCC_BYPASS).clear(RCC_USESYSDIV);
        periph.rcc_wr(rcc);

        // The main oscillator must be running before it is selected
        if rcc.check(RCC_MOSCDIS) != 0 {
            periph.misc_wr(0u32.set(MISC_MOSCPUPMIS));
            rcc = rcc.clear(RCC_MOSCDIS);
            periph.rcc_wr(rcc);
            while periph.ris_rd().check(RIS_MOSCPUPRIS) == 0 {}
        }

        rcc = rcc
            .clear_mask(RCC_XTAL_MASK | RCC_OSCSRC_MASK)
            .set_mask(self.xtal.code() << RCC_XTAL_SHIFT);
        rcc = if self.mode.uses_pll() {
            rcc.clear(RCC_PWRDN)
        } else {
            rcc.set(RCC_PWRDN)
        };
        if relock {
            // Drop any lock flag left over from an earlier configuration
            periph.misc_wr(0u32.set(MISC_PLLLMIS));
        }
        periph.rcc_wr(rcc);
        if relock {
            while periph.ris_rd().check(RIS_PLLLRIS) == 0 {}
        }

        rcc = rcc
            .clear_mask(RCC_SYSDIV_MASK)
            .set_mask(((self.mode.sysdiv() - 1) as u32) << RCC_SYSDIV_SHIFT)
            .set(RCC_USESYSDIV);
        if self.mode.uses_pll() {
            rcc = rcc.clear(RCC_BYPASS);
        }
        periph.rcc_wr(rcc);
    }

    /// Apply the clock configuration and return the system clock token
    pub fn freeze(self) -> Sysclk {
        self.configure_periph();
        let freq = self.mode.freq(self.xtal);

        #[cfg(feature = "defmt")]
        defmt::debug!("sysclk configured: {=u32} Hz (xtal {})", freq, self.xtal);

        Sysclk(freq)
    }
}

/// Configured system clock. Only [`ClockConfig::freeze`] produces one.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sysclk(u32);

impl Sysclk {
    /// Frequency of the system clock in Hz
    #[inline(always)]
    pub const fn freq(&self) -> u32 {
        self.0
    }
}
