//! Port A pin assignments for SSI0.
//!
//! SSI0 lives on port A: `PA2` = SSI0CLK, `PA3` = SSI0FSS, `PA4` = SSI0RX, `PA5` = SSI0TX. The DAC
//! is wired three-wire (clock, frame select, transmit data), so `PA4` is left as GPIO.

use bitflags::bitflags;

/// `PCTL` encoding selecting SSI0 on port A
const PCTL_SSI0: u32 = 2;
const PCTL_FIELD: u32 = 0xF;

bitflags! {
    /// Set of port A pins, one bit per pin as in the `AFSEL`/`DEN`/`AMSEL` registers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Pins: u8 {
        /// `PA2`
        const PA2 = 1 << 2;
        /// `PA3`
        const PA3 = 1 << 3;
        /// `PA4`
        const PA4 = 1 << 4;
        /// `PA5`
        const PA5 = 1 << 5;
    }
}

impl Pins {
    /// The pins of the three-wire hookup: clock, frame select, transmit data
    pub const SSI0_THREE_WIRE: Pins = Pins::PA2.union(Pins::PA3).union(Pins::PA5);

    /// Register mask for this pin set
    #[inline(always)]
    pub const fn mask(self) -> u32 {
        self.bits() as u32
    }
}

/// A digital function that can be muxed onto a port A pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinFunction {
    /// SSI0 serial clock on `PA2`
    Ssi0Clk,
    /// SSI0 frame select on `PA3`
    Ssi0Fss,
    /// SSI0 receive data on `PA4`
    Ssi0Rx,
    /// SSI0 transmit data on `PA5`
    Ssi0Tx,
}

impl PinFunction {
    /// Functions routed for the three-wire DAC hookup
    pub const SSI0_THREE_WIRE: [PinFunction; 3] = [
        PinFunction::Ssi0Clk,
        PinFunction::Ssi0Fss,
        PinFunction::Ssi0Tx,
    ];

    /// Pin number within port A
    pub const fn pin(self) -> u8 {
        match self {
            PinFunction::Ssi0Clk => 2,
            PinFunction::Ssi0Fss => 3,
            PinFunction::Ssi0Rx => 4,
            PinFunction::Ssi0Tx => 5,
        }
    }

    /// `PCTL` bits occupied by this pin
    #[inline(always)]
    pub const fn pctl_mask(self) -> u32 {
        PCTL_FIELD << (self.pin() * 4)
    }

    /// `PCTL` bits selecting this function
    #[inline(always)]
    pub const fn pctl_bits(self) -> u32 {
        PCTL_SSI0 << (self.pin() * 4)
    }
}

/// `PCTL` mask and value covering a list of functions
pub(crate) fn pctl_for(functions: &[PinFunction]) -> (u32, u32) {
    functions.iter().fold((0, 0), |(mask, bits), f| {
        (mask | f.pctl_mask(), bits | f.pctl_bits())
    })
}
