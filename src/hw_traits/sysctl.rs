/// `RCC.MOSCDIS`: main oscillator disable
pub(crate) const RCC_MOSCDIS: u8 = 0;
/// `RCC.OSCSRC`: oscillator source, 0 selects the main oscillator
pub(crate) const RCC_OSCSRC_MASK: u32 = 0x0000_0030;
/// `RCC.XTAL`: crystal value
pub(crate) const RCC_XTAL_MASK: u32 = 0x0000_07C0;
pub(crate) const RCC_XTAL_SHIFT: u8 = 6;
/// `RCC.BYPASS`: run from the oscillator rather than the PLL
pub(crate) const RCC_BYPASS: u8 = 11;
/// `RCC.PWRDN`: PLL power down
pub(crate) const RCC_PWRDN: u8 = 13;
/// `RCC.USESYSDIV`: apply the system clock divider
pub(crate) const RCC_USESYSDIV: u8 = 22;
/// `RCC.SYSDIV`: system clock divisor minus one
pub(crate) const RCC_SYSDIV_MASK: u32 = 0x0780_0000;
pub(crate) const RCC_SYSDIV_SHIFT: u8 = 23;

/// `RCC2.USERCC2`: let RCC2 override RCC
pub(crate) const RCC2_USERCC2: u8 = 31;

/// `RIS.PLLLRIS`: PLL lock raw interrupt status
pub(crate) const RIS_PLLLRIS: u8 = 6;
/// `RIS.MOSCPUPRIS`: main oscillator power-up raw interrupt status
pub(crate) const RIS_MOSCPUPRIS: u8 = 8;

/// `MISC.PLLLMIS`: write 1 to clear the latched PLL lock flag
pub(crate) const MISC_PLLLMIS: u8 = 6;
/// `MISC.MOSCPUPMIS`: write 1 to clear the latched oscillator power-up flag
pub(crate) const MISC_MOSCPUPMIS: u8 = 8;

/// Run-mode clock gating bit for module 0 (SSI0, GPIO port A)
pub(crate) const RCGC_R0: u8 = 0;

/// System control registers used for clocking and peripheral gating.
pub trait SysctlPeriph {
    /// Run-mode clock configuration
    fn rcc_rd(&self) -> u32;
    /// Run-mode clock configuration
    fn rcc_wr(&self, bits: u32);

    /// Run-mode clock configuration 2
    fn rcc2_rd(&self) -> u32;
    /// Run-mode clock configuration 2
    fn rcc2_wr(&self, bits: u32);

    /// Raw interrupt status
    fn ris_rd(&self) -> u32;
    /// Masked interrupt status and clear, write 1 to clear
    fn misc_wr(&self, bits: u32);

    /// SSI run-mode clock gating
    fn rcgcssi_rd(&self) -> u32;
    /// SSI run-mode clock gating
    fn rcgcssi_wr(&self, bits: u32);

    /// GPIO run-mode clock gating
    fn rcgcgpio_rd(&self) -> u32;
    /// GPIO run-mode clock gating
    fn rcgcgpio_wr(&self, bits: u32);

    /// SSI peripheral ready
    fn prssi_rd(&self) -> u32;

    /// GPIO peripheral ready
    fn prgpio_rd(&self) -> u32;
}

#[cfg(feature = "tm4c123gh6pm")]
mod pac_impl {
    use super::SysctlPeriph;
    use tm4c123x as pac;

    impl SysctlPeriph for pac::SYSCTL {
        reg_methods!(rcc, rcc_rd, rcc_wr);
        reg_methods!(rcc2, rcc2_rd, rcc2_wr);
        reg_rd!(ris, ris_rd);
        reg_wr!(misc, misc_wr);
        reg_methods!(rcgcssi, rcgcssi_rd, rcgcssi_wr);
        reg_methods!(rcgcgpio, rcgcgpio_rd, rcgcgpio_wr);
        reg_rd!(prssi, prssi_rd);
        reg_rd!(prgpio, prgpio_rd);
    }
}
