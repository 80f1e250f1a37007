//! Register access traits for the peripherals this crate touches.
//!
//! Everything above this layer talks to the hardware through these traits, so the same clock,
//! SSI and DAC code runs against the `tm4c123x` PAC on the device and against simulated register
//! files on the host.

// Generates read/write accessors over a PAC register, using raw bits
#[cfg(feature = "tm4c123gh6pm")]
macro_rules! reg_methods {
    ($reg:ident, $rd:ident, $wr:ident) => {
        #[inline(always)]
        fn $rd(&self) -> u32 {
            self.$reg.read().bits()
        }

        #[inline(always)]
        fn $wr(&self, bits: u32) {
            self.$reg.write(|w| unsafe { w.bits(bits) });
        }
    };
}

#[cfg(feature = "tm4c123gh6pm")]
macro_rules! reg_rd {
    ($reg:ident, $rd:ident) => {
        #[inline(always)]
        fn $rd(&self) -> u32 {
            self.$reg.read().bits()
        }
    };
}

// Write-only accessor, for write-1-to-clear registers
#[cfg(feature = "tm4c123gh6pm")]
macro_rules! reg_wr {
    ($reg:ident, $wr:ident) => {
        #[inline(always)]
        fn $wr(&self, bits: u32) {
            self.$reg.write(|w| unsafe { w.bits(bits) });
        }
    };
}

pub mod gpio;
pub mod ssi;
pub mod sysctl;
