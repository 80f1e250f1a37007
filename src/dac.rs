//! TLV5616 12-bit DAC.
//!
//! The TLV5616 takes one 16-bit TI-format frame per update: the speed bit (14), the power bit (13)
//! and the 12-bit code in bits 11..0, which selects `code / 4096` of the reference voltage.

use bitflags::bitflags;
use embedded_hal::spi::SpiBus;

/// Bits of the frame that carry the code
pub const CODE_MASK: u16 = 0x0FFF;

/// Largest code the converter accepts
pub const MAX_CODE: u16 = CODE_MASK;

bitflags! {
    /// Control bits sent alongside every code. The empty set is slow settling at normal power.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Control: u16 {
        /// Fast settling mode
        const FAST = 0x4000;
        /// Power down the output stage
        const POWER_DOWN = 0x2000;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Control {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Control({=u16:#x})", self.bits())
    }
}

/// Build the frame for `code`. Only the low 12 bits of `code` are kept, so out-of-range codes
/// wrap rather than fail.
#[inline]
pub const fn encode(code: u16, control: Control) -> u16 {
    (code & CODE_MASK) | control.bits()
}

/// A TLV5616 hanging off an SSI port. The driver does not own the bus; hand it the bus for every
/// update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tlv5616 {
    control: Control,
}

impl Default for Tlv5616 {
    fn default() -> Self {
        Tlv5616::new(Control::empty())
    }
}

impl Tlv5616 {
    /// Driver sending `control` with every code
    pub const fn new(control: Control) -> Self {
        Tlv5616 { control }
    }

    /// Control bits sent with every code
    pub const fn control(&self) -> Control {
        self.control
    }

    /// Frame that [`Tlv5616::output`] would send for `code`
    #[inline]
    pub const fn word(&self, code: u16) -> u16 {
        encode(code, self.control)
    }

    /// Send `code` to the converter, blocking until the frame is queued
    pub fn output<B: SpiBus<u16>>(&self, bus: &mut B, code: u16) -> Result<(), B::Error> {
        bus.write(&[self.word(code)])
    }
}
