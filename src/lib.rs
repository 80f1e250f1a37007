//! SSI0 bring-up for the TM4C123GH6PM driving a TLV5616 12-bit DAC, built on [`embedded_hal`].
//! Here are the [`datasheet`] and the [`DAC datasheet`] for reference.
//!
//! [`embedded_hal`]: https://github.com/rust-embedded/embedded-hal
//! [`datasheet`]: https://www.ti.com/lit/ds/symlink/tm4c123gh6pm.pdf
//! [`DAC datasheet`]: https://www.ti.com/lit/ds/symlink/tlv5616.pdf
//!
//! # Usage
//!
//! Enable the `tm4c123gh6pm` feature to get the register-access impls for the `tm4c123x` PAC
//! peripherals. Without it the crate builds for the host, where the clock, SSI and DAC logic runs
//! against simulated registers.
//!
//! Bring-up order is enforced by types: [`clock::ClockConfig::freeze`] hands out the
//! [`clock::Sysclk`] token that [`ssi::SsiConfig::init`] requires.
//!
//! The SSI can be configured by editing its registers directly or through the
//! [`driverlib`] routines. The `register-init` feature picks the former as
//! [`init::DefaultInit`].
//!
//! # Examples
//!
//! `device-examples/tm4c123gh6pm` holds the firmware that cycles the DAC forever. Build it from
//! that directory with `cargo build --release` and flash it with your probe of choice.

#![no_std]
#![deny(missing_docs)]

#[cfg(test)]
extern crate std;

pub mod clock;
pub mod dac;
pub mod delay;
pub mod driverlib;
pub mod gpio;
pub mod init;
pub mod prelude;
pub mod sequence;
pub mod ssi;

#[doc(hidden)]
pub mod hw_traits;
mod util;

#[cfg(test)]
mod sim;

#[cfg(feature = "tm4c123gh6pm")]
pub use tm4c123x as pac;
