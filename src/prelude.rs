//! Prelude

pub use crate::clock::SysctlExt as _tm4c123_ssi_dac_SysctlExt;
pub use crate::hw_traits::gpio::GpioPeriph as _tm4c123_ssi_dac_GpioPeriph;
pub use crate::hw_traits::ssi::SsiPeriph as _tm4c123_ssi_dac_SsiPeriph;
pub use crate::hw_traits::sysctl::SysctlPeriph as _tm4c123_ssi_dac_SysctlPeriph;
pub use crate::init::SsiInit as _tm4c123_ssi_dac_SsiInit;
