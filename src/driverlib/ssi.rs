//! SSI configuration and data routines.

use crate::hw_traits::ssi::{SsiPeriph, CR0_SCR_SHIFT, CR1_MS, CR1_SSE, SR_BSY, SR_RNE, SR_TNF};
use crate::ssi::{ClockSource, DataSize, FrameFormat, Role};
use crate::util::BitsExt;

const MAX_CPSDVSR: u32 = 254;
const MAX_SCR: u32 = 255;

/// Prescaler and serial clock rate for `bit_rate`, searched with the smallest even prescaler that
/// keeps SCR within eight bits. `bit_rate` is limited to half of `ssi_clk`.
pub(crate) fn exp_clk_divisors(ssi_clk: u32, bit_rate: u32) -> (u32, u32) {
    let max_bit_rate = (ssi_clk / bit_rate.max(1)).max(2);
    let mut prediv = 0;
    loop {
        prediv += 2;
        let scr = max_bit_rate / prediv - 1;
        if scr <= MAX_SCR || prediv >= MAX_CPSDVSR {
            return (prediv, scr.min(MAX_SCR));
        }
    }
}

/// Configure role, bit rate, frame format and data size in one go. The port should be disabled;
/// this leaves it disabled.
pub fn config_set_exp_clk<P: SsiPeriph>(
    ssi: &P,
    ssi_clk: u32,
    format: FrameFormat,
    role: Role,
    bit_rate: u32,
    data_size: DataSize,
) {
    let cr1 = match role {
        Role::Master => 0,
        Role::Slave => 0u32.set(CR1_MS),
    };
    ssi.cr1_wr(cr1);

    let (prediv, scr) = exp_clk_divisors(ssi_clk, bit_rate);
    ssi.cpsr_wr(prediv);
    ssi.cr0_wr((scr << CR0_SCR_SHIFT) | format.cr0_bits() | data_size.dss());
}

/// Select the baud clock source
pub fn clock_source_set<P: SsiPeriph>(ssi: &P, source: ClockSource) {
    ssi.cc_wr(source as u32);
}

/// Set `CR1.SSE`
pub fn enable<P: SsiPeriph>(ssi: &P) {
    ssi.cr1_wr(ssi.cr1_rd().set(CR1_SSE));
}

/// Clear `CR1.SSE`
pub fn disable<P: SsiPeriph>(ssi: &P) {
    ssi.cr1_wr(ssi.cr1_rd().clear(CR1_SSE));
}

/// Whether a frame is being shifted out or the transmit FIFO still holds data
pub fn busy<P: SsiPeriph>(ssi: &P) -> bool {
    ssi.sr_rd().check(SR_BSY) != 0
}

/// Spin until the transmit FIFO has room, then push `data`
pub fn data_put<P: SsiPeriph>(ssi: &P, data: u32) {
    while ssi.sr_rd().check(SR_TNF) == 0 {}
    ssi.dr_wr(data);
}

/// Push `data` into the transmit FIFO if it has room. Returns whether the word was queued.
pub fn data_put_non_blocking<P: SsiPeriph>(ssi: &P, data: u32) -> bool {
    if ssi.sr_rd().check(SR_TNF) != 0 {
        ssi.dr_wr(data);
        true
    } else {
        false
    }
}

/// Pop a word from the receive FIFO if one is waiting.
pub fn data_get_non_blocking<P: SsiPeriph>(ssi: &P) -> Option<u32> {
    if ssi.sr_rd().check(SR_RNE) != 0 {
        Some(ssi.dr_rd())
    } else {
        None
    }
}
