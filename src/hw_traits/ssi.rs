/// `CR0.DSS`: data size select, bits minus one
pub(crate) const CR0_DSS_MASK: u32 = 0x0000_000F;
/// `CR0.FRF`: frame format
pub(crate) const CR0_FRF_MASK: u32 = 0x0000_0030;
pub(crate) const CR0_FRF_SHIFT: u8 = 4;
/// `CR0.SPO`: clock polarity (Freescale format only)
pub(crate) const CR0_SPO: u8 = 6;
/// `CR0.SPH`: clock phase (Freescale format only)
pub(crate) const CR0_SPH: u8 = 7;
/// `CR0.SCR`: serial clock rate
pub(crate) const CR0_SCR_MASK: u32 = 0x0000_FF00;
pub(crate) const CR0_SCR_SHIFT: u8 = 8;

/// `CR1.SSE`: port enable
pub(crate) const CR1_SSE: u8 = 1;
/// `CR1.MS`: slave select, cleared for master
pub(crate) const CR1_MS: u8 = 2;

/// `SR.TFE`: transmit FIFO empty
pub(crate) const SR_TFE: u8 = 0;
/// `SR.TNF`: transmit FIFO not full
pub(crate) const SR_TNF: u8 = 1;
/// `SR.RNE`: receive FIFO not empty
pub(crate) const SR_RNE: u8 = 2;
/// `SR.BSY`: busy shifting a frame
pub(crate) const SR_BSY: u8 = 4;

/// `CPSR.CPSDVSR`: clock prescale divisor, even values 2..=254
pub(crate) const CPSR_CPSDVSR_MASK: u32 = 0x0000_00FF;

/// `CC.CS`: baud clock source
pub(crate) const CC_CS_MASK: u32 = 0x0000_000F;

/// Synchronous serial interface registers.
pub trait SsiPeriph {
    /// Control 0: frame format, data size, clock rate
    fn cr0_rd(&self) -> u32;
    /// Control 0: frame format, data size, clock rate
    fn cr0_wr(&self, bits: u32);

    /// Control 1: enable and master/slave select
    fn cr1_rd(&self) -> u32;
    /// Control 1: enable and master/slave select
    fn cr1_wr(&self, bits: u32);

    /// Clock prescale
    fn cpsr_rd(&self) -> u32;
    /// Clock prescale
    fn cpsr_wr(&self, bits: u32);

    /// Clock configuration
    fn cc_rd(&self) -> u32;
    /// Clock configuration
    fn cc_wr(&self, bits: u32);

    /// Status
    fn sr_rd(&self) -> u32;

    /// Data, popping the receive FIFO
    fn dr_rd(&self) -> u32;
    /// Data, pushing into the transmit FIFO
    fn dr_wr(&self, bits: u32);
}

#[cfg(feature = "tm4c123gh6pm")]
mod pac_impl {
    use super::SsiPeriph;
    use tm4c123x as pac;

    macro_rules! ssi_impl {
        ($($SSI:ident),*) => {
            $(
                impl SsiPeriph for pac::$SSI {
                    reg_methods!(cr0, cr0_rd, cr0_wr);
                    reg_methods!(cr1, cr1_rd, cr1_wr);
                    reg_methods!(cpsr, cpsr_rd, cpsr_wr);
                    reg_methods!(cc, cc_rd, cc_wr);
                    reg_rd!(sr, sr_rd);
                    reg_methods!(dr, dr_rd, dr_wr);
                }
            )*
        };
    }

    ssi_impl!(SSI0, SSI1, SSI2, SSI3);
}
