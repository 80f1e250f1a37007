//! Peripheral routines shaped after the vendor driver library.
//!
//! Each function is a short, self-contained register sequence for one job: gate a peripheral's
//! clock on, mux a pin, derive SSI divisors from a bit rate. [`crate::init::DriverInit`] builds the
//! SSI bring-up out of these, and [`crate::ssi::Ssi`] uses the data routines for its non-blocking
//! path.

pub mod gpio;
pub mod ssi;
pub mod sysctl;
