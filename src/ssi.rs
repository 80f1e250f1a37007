//! Synchronous serial interface
//!
//! Begin with [`SsiConfig::new()`], adjust the defaults if needed (master, TI synchronous serial
//! frame format, 16-bit frames, 2 MHz), then call [`SsiConfig::init()`] with one of the
//! [`SsiInit`] strategies to get an [`Ssi`]. Initialisation needs the [`Sysclk`] token, so the
//! system clock is always configured first.
//!
//! [`Ssi`] implements the embedded-hal [`SpiBus`](embedded_hal::spi::SpiBus) trait for 16-bit
//! words, and a non-blocking implementation through [`embedded-hal-nb`](embedded_hal_nb)'s
//! [`FullDuplex`](embedded_hal_nb::spi::FullDuplex) trait. Transfers cannot fail, so the error type
//! is [`Infallible`].
//!
//! Pins used for SSI0: {CLK: `PA2`, FSS: `PA3`, TX: `PA5`}.

use crate::clock::Sysclk;
use crate::driverlib;
use crate::hw_traits::gpio::GpioPeriph;
use crate::hw_traits::ssi::{
    SsiPeriph, CC_CS_MASK, CPSR_CPSDVSR_MASK, CR0_DSS_MASK, CR0_FRF_MASK, CR0_FRF_SHIFT,
    CR0_SCR_MASK, CR0_SCR_SHIFT, CR0_SPH, CR0_SPO, CR1_MS, CR1_SSE, SR_TFE,
};
use crate::hw_traits::sysctl::SysctlPeriph;
use crate::init::{DefaultInit, SsiInit};
use crate::util::BitsExt;
use core::convert::Infallible;
use embedded_hal::spi::{Mode, Phase, Polarity};
use nb::Error::WouldBlock;

/// Bit rate the DAC link runs at
pub const DEFAULT_BIT_RATE: u32 = 2_000_000;

/// Frame format on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameFormat {
    /// Freescale SPI with the given clock polarity and phase
    Freescale(Mode),
    /// Texas Instruments synchronous serial: FSS pulses high for one clock before each frame
    Ti,
    /// National Microwire
    Microwire,
}

impl FrameFormat {
    pub(crate) const CR0_MASK: u32 = CR0_FRF_MASK | (1 << CR0_SPO) | (1 << CR0_SPH);

    /// `CR0` bits for this format: `FRF`, plus `SPO`/`SPH` in Freescale mode
    pub(crate) fn cr0_bits(self) -> u32 {
        match self {
            FrameFormat::Freescale(mode) => {
                let mut bits = 0u32;
                if mode.polarity == Polarity::IdleHigh {
                    bits = bits.set(CR0_SPO);
                }
                if mode.phase == Phase::CaptureOnSecondTransition {
                    bits = bits.set(CR0_SPH);
                }
                bits
            }
            FrameFormat::Ti => 1 << CR0_FRF_SHIFT,
            FrameFormat::Microwire => 2 << CR0_FRF_SHIFT,
        }
    }

    fn from_cr0(cr0: u32) -> Self {
        match cr0.field(CR0_FRF_MASK, CR0_FRF_SHIFT) {
            1 => FrameFormat::Ti,
            2 => FrameFormat::Microwire,
            _ => FrameFormat::Freescale(Mode {
                polarity: if cr0.check(CR0_SPO) != 0 {
                    Polarity::IdleHigh
                } else {
                    Polarity::IdleLow
                },
                phase: if cr0.check(CR0_SPH) != 0 {
                    Phase::CaptureOnSecondTransition
                } else {
                    Phase::CaptureOnFirstTransition
                },
            }),
        }
    }
}

/// Which end drives the serial clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Drive the clock and frame select
    Master,
    /// Follow an external clock
    Slave,
}

/// Baud clock source, encoded as the `CC.CS` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// System clock
    System = 0x0,
    /// Precision internal oscillator (16 MHz)
    Piosc = 0x5,
}

/// Bits per frame, encoded as the `CR0.DSS` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum DataSize {
    _4 = 0x3,
    _5 = 0x4,
    _6 = 0x5,
    _7 = 0x6,
    _8 = 0x7,
    _9 = 0x8,
    _10 = 0x9,
    _11 = 0xA,
    _12 = 0xB,
    _13 = 0xC,
    _14 = 0xD,
    _15 = 0xE,
    _16 = 0xF,
}

impl DataSize {
    /// Number of bits per frame
    pub const fn bits(self) -> u8 {
        self as u8 + 1
    }

    #[inline(always)]
    pub(crate) fn dss(self) -> u32 {
        self as u32
    }
}

/// Parameters requested for an SSI port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SsiParams {
    /// Requested bit rate in Hz
    pub bit_rate: u32,
    /// Frame format
    pub frame_format: FrameFormat,
    /// Bits per frame
    pub data_size: DataSize,
}

/// Struct used to configure an SSI port in master mode
pub struct SsiConfig<P: SsiPeriph> {
    periph: P,
    params: SsiParams,
}

impl<P: SsiPeriph> SsiConfig<P> {
    /// Create a new configuration for the DAC link: TI frames, 16 bits, 2 MHz
    pub fn new(periph: P) -> Self {
        SsiConfig {
            periph,
            params: SsiParams {
                bit_rate: DEFAULT_BIT_RATE,
                frame_format: FrameFormat::Ti,
                data_size: DataSize::_16,
            },
        }
    }

    /// Set the bit rate in Hz. It is limited to half the system clock.
    #[inline]
    pub fn bit_rate(mut self, hz: u32) -> Self {
        self.params.bit_rate = hz;
        self
    }

    /// Set the frame format
    #[inline]
    pub fn frame_format(mut self, format: FrameFormat) -> Self {
        self.params.frame_format = format;
        self
    }

    /// Set the number of bits per frame
    #[inline]
    pub fn data_size(mut self, size: DataSize) -> Self {
        self.params.data_size = size;
        self
    }

    /// Parameters that will be applied
    pub fn params(&self) -> &SsiParams {
        &self.params
    }

    /// Gate the port and its pins on, configure the hardware with strategy `I` and enable it
    pub fn init<I: SsiInit, S: SysctlPeriph, G: GpioPeriph>(
        self,
        sysctl: &S,
        gpioa: &G,
        sysclk: &Sysclk,
    ) -> Ssi<P> {
        I::init(sysctl, gpioa, &self.periph, sysclk, &self.params);

        #[cfg(feature = "defmt")]
        defmt::debug!("ssi configured: {}", SsiSettings::read(&self.periph));

        Ssi {
            periph: self.periph,
        }
    }

    /// [`SsiConfig::init`] with the strategy picked at build time (see [`DefaultInit`])
    pub fn init_default<S: SysctlPeriph, G: GpioPeriph>(
        self,
        sysctl: &S,
        gpioa: &G,
        sysclk: &Sysclk,
    ) -> Ssi<P> {
        self.init::<DefaultInit, S, G>(sysctl, gpioa, sysclk)
    }
}

/// Settings decoded from the SSI registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SsiSettings {
    /// `CR1.SSE`
    pub enabled: bool,
    /// `CR1.MS`
    pub role: Role,
    /// `CR0.FRF`, `CR0.SPO`, `CR0.SPH`
    pub frame_format: FrameFormat,
    /// `CR0.DSS` as a bit count
    pub data_bits: u8,
    /// `CC.CS`, `None` for a reserved encoding
    pub clock_source: Option<ClockSource>,
    /// `CPSR.CPSDVSR`
    pub prescaler: u8,
    /// `CR0.SCR`
    pub scr: u8,
}

impl SsiSettings {
    /// Decode the current register contents
    pub fn read<P: SsiPeriph>(periph: &P) -> Self {
        let cr0 = periph.cr0_rd();
        let cr1 = periph.cr1_rd();
        SsiSettings {
            enabled: cr1.check(CR1_SSE) != 0,
            role: if cr1.check(CR1_MS) != 0 {
                Role::Slave
            } else {
                Role::Master
            },
            frame_format: FrameFormat::from_cr0(cr0),
            data_bits: (cr0 & CR0_DSS_MASK) as u8 + 1,
            clock_source: match periph.cc_rd() & CC_CS_MASK {
                0x0 => Some(ClockSource::System),
                0x5 => Some(ClockSource::Piosc),
                _ => None,
            },
            prescaler: (periph.cpsr_rd() & CPSR_CPSDVSR_MASK) as u8,
            scr: cr0.field(CR0_SCR_MASK, CR0_SCR_SHIFT) as u8,
        }
    }

    /// Serial clock frequency produced from `sysclk`: `sysclk / (CPSDVSR * (1 + SCR))`. Zero while
    /// the prescaler is unprogrammed.
    pub fn bit_rate(&self, sysclk: &Sysclk) -> u32 {
        let div = self.prescaler as u32 * (1 + self.scr as u32);
        if div == 0 {
            0
        } else {
            sysclk.freq() / div
        }
    }
}

/// A configured and enabled SSI port. This is the only handle to the peripheral; pass it to
/// whatever needs to transmit.
pub struct Ssi<P: SsiPeriph> {
    periph: P,
}

impl<P: SsiPeriph> Ssi<P> {
    /// Spin until the transmit FIFO has room, then queue `word`. There is no timeout: if the
    /// port never drains this never returns.
    #[inline]
    pub fn write_blocking(&mut self, word: u16) {
        driverlib::ssi::data_put(&self.periph, word as u32);
    }

    /// Queue `word` if the transmit FIFO has room, otherwise return `WouldBlock`.
    #[inline]
    pub fn send(&mut self, word: u16) -> nb::Result<(), Infallible> {
        if driverlib::ssi::data_put_non_blocking(&self.periph, word as u32) {
            Ok(())
        } else {
            Err(WouldBlock)
        }
    }

    /// Pop a received word, or `WouldBlock` if the receive FIFO is empty.
    #[inline]
    pub fn recv(&mut self) -> nb::Result<u16, Infallible> {
        match driverlib::ssi::data_get_non_blocking(&self.periph) {
            Some(word) => Ok(word as u16),
            None => Err(WouldBlock),
        }
    }

    /// Whether frames are still being shifted out
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.periph.sr_rd().check(SR_TFE) == 0 || driverlib::ssi::busy(&self.periph)
    }

    /// Decode the port's current configuration
    pub fn settings(&self) -> SsiSettings {
        SsiSettings::read(&self.periph)
    }

    /// Release the peripheral
    pub fn free(self) -> P {
        self.periph
    }

    // The DAC hookup has no receive pin, so the receive FIFO only ever holds filler. Clear it
    // before a read so the caller gets the words clocked in for its own frames.
    fn discard_rx(&mut self) {
        while self.is_busy() {}
        while driverlib::ssi::data_get_non_blocking(&self.periph).is_some() {}
    }
}

mod ehal1 {
    use super::*;
    use embedded_hal::spi::{ErrorType, SpiBus};
    use nb::block;

    impl<P: SsiPeriph> ErrorType for Ssi<P> {
        type Error = Infallible;
    }

    impl<P: SsiPeriph> SpiBus<u16> for Ssi<P> {
        /// Clock out zeros and store the words received in `words`.
        fn read(&mut self, words: &mut [u16]) -> Result<(), Self::Error> {
            self.discard_rx();
            for word in words {
                self.write_blocking(0);
                *word = block!(self.recv())?;
            }
            Ok(())
        }

        /// Queue `words` for transmission, spinning on the transmit FIFO for each one.
        /// Received words are left in the receive FIFO.
        fn write(&mut self, words: &[u16]) -> Result<(), Self::Error> {
            for word in words {
                self.write_blocking(*word);
            }
            Ok(())
        }

        /// Write `write` while reading into `read`. The shorter side is padded with zeros or
        /// has its extra received words dropped.
        fn transfer(&mut self, read: &mut [u16], write: &[u16]) -> Result<(), Self::Error> {
            self.discard_rx();
            let mut read_words = read.iter_mut();
            let mut write_words = write.iter();
            const DUMMY_WRITE: u16 = 0x0000;
            let mut dummy_read = 0;

            loop {
                let (rd, wr) = match (read_words.next(), write_words.next()) {
                    (Some(rd), Some(wr)) => (rd, wr),
                    (Some(rd), None) => (rd, &DUMMY_WRITE),
                    (None, Some(wr)) => (&mut dummy_read, wr),
                    (None, None) => break,
                };

                self.write_blocking(*wr);
                *rd = block!(self.recv())?;
            }
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u16]) -> Result<(), Self::Error> {
            self.discard_rx();
            for word in words {
                self.write_blocking(*word);
                *word = block!(self.recv())?;
            }
            Ok(())
        }

        /// Spin until the transmit FIFO is empty and the last frame has left the shifter.
        fn flush(&mut self) -> Result<(), Self::Error> {
            while self.is_busy() {}
            Ok(())
        }
    }
}

mod ehal_nb1 {
    use super::*;
    use embedded_hal_nb::spi::FullDuplex;

    impl<P: SsiPeriph> FullDuplex<u16> for Ssi<P> {
        fn read(&mut self) -> nb::Result<u16, Self::Error> {
            self.recv()
        }

        fn write(&mut self, word: u16) -> nb::Result<(), Self::Error> {
            self.send(word)
        }
    }
}

#[cfg(feature = "embedded-hal-02")]
mod ehal02 {
    use super::*;
    use embedded_hal_02::spi::FullDuplex;

    fn never<T>(err: nb::Error<Infallible>) -> nb::Error<T> {
        match err {
            nb::Error::WouldBlock => nb::Error::WouldBlock,
            nb::Error::Other(never) => match never {},
        }
    }

    impl<P: SsiPeriph> FullDuplex<u16> for Ssi<P> {
        type Error = void::Void;

        fn read(&mut self) -> nb::Result<u16, Self::Error> {
            self.recv().map_err(never)
        }

        fn send(&mut self, word: u16) -> nb::Result<(), Self::Error> {
            Ssi::send(self, word).map_err(never)
        }
    }

    // Implementing FullDuplex above gets us a blocking write and transfer implementation for free
    impl<P: SsiPeriph> embedded_hal_02::blocking::spi::write::Default<u16> for Ssi<P> {}
    impl<P: SsiPeriph> embedded_hal_02::blocking::spi::transfer::Default<u16> for Ssi<P> {}
}
