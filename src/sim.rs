//! Simulated SYSCTL, GPIO port A and SSI0 register files for host tests.
//!
//! Registers start at their datasheet reset values. Every access goes into a shared log so tests
//! can check ordering. The SSI transmit FIFO drains instantly unless stalled, and each
//! transmitted word clocks the configured MISO word into the receive FIFO.

use crate::hw_traits::gpio::GpioPeriph;
use crate::hw_traits::ssi::{SsiPeriph, SR_RNE, SR_TFE, SR_TNF};
use crate::hw_traits::sysctl::{
    SysctlPeriph, RCC_MOSCDIS, RCC_PWRDN, RCC_XTAL_MASK, RIS_MOSCPUPRIS, RIS_PLLLRIS,
};
use crate::util::BitsExt;
use core::cell::{Cell, RefCell};
use core::ops::Deref;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

const RCC_RESET: u32 = 0x078E_3AD1;
const RCC2_RESET: u32 = 0x07C0_6810;
const DR2R_RESET: u32 = 0x0000_00FF;
const SR_RESET: u32 = (1 << SR_TFE) | (1 << SR_TNF);
const FIFO_DEPTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    Sysctl,
    Gpio,
    Ssi,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    pub block: Block,
    pub reg: &'static str,
    pub write: bool,
    pub value: u32,
}

#[derive(Default)]
pub struct Log(RefCell<Vec<Access>>);

impl Log {
    fn record(&self, block: Block, reg: &'static str, write: bool, value: u32) {
        self.0.borrow_mut().push(Access {
            block,
            reg,
            write,
            value,
        });
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn entries(&self) -> Vec<Access> {
        self.0.borrow().clone()
    }
}

macro_rules! sim_reg {
    ($block:expr, $reg:ident, $rd:ident, $wr:ident) => {
        sim_reg!($block, $reg, $rd);

        fn $wr(&self, bits: u32) {
            self.log.record($block, stringify!($reg), true, bits);
            self.$reg.set(bits);
        }
    };
    ($block:expr, $reg:ident, $rd:ident) => {
        fn $rd(&self) -> u32 {
            let value = self.$reg.get();
            self.log.record($block, stringify!($reg), false, value);
            value
        }
    };
}

pub struct SimSysctl {
    log: Rc<Log>,
    pub rcc: Cell<u32>,
    pub rcc2: Cell<u32>,
    pub rcgcssi: Cell<u32>,
    pub rcgcgpio: Cell<u32>,
    ris: Cell<u32>,
    prssi: Cell<u32>,
    prgpio: Cell<u32>,
    mosc_pending: Cell<Option<u32>>,
    pll_pending: Cell<Option<u32>>,
    prssi_pending: Cell<Option<u32>>,
    prgpio_pending: Cell<Option<u32>>,
    mosc_delay: Cell<u32>,
    lock_delay: Cell<u32>,
    ready_delay: Cell<u32>,
}

// Counts down one status poll; raises `flag` in `reg` once the count is spent
fn settle(pending: &Cell<Option<u32>>, reg: &Cell<u32>, flag: u32) {
    match pending.get() {
        Some(0) => {
            pending.set(None);
            reg.set(reg.get() | flag);
        }
        Some(n) => pending.set(Some(n - 1)),
        None => {}
    }
}

impl SimSysctl {
    /// The oscillator reports power-up after `polls` unsuccessful status reads
    pub fn mosc_after(&self, polls: u32) {
        self.mosc_delay.set(polls);
    }

    /// The PLL reports lock after `polls` unsuccessful status reads
    pub fn lock_after(&self, polls: u32) {
        self.lock_delay.set(polls);
    }

    /// Newly gated peripherals report ready after `polls` unsuccessful reads of their PR register
    pub fn ready_after(&self, polls: u32) {
        self.ready_delay.set(polls);
    }

    pub fn snapshot(&self) -> [u32; 4] {
        [
            self.rcc.get(),
            self.rcc2.get(),
            self.rcgcssi.get(),
            self.rcgcgpio.get(),
        ]
    }

    fn gate(&self, rcgc: &Cell<u32>, pr: &Cell<u32>, pending: &Cell<Option<u32>>, bits: u32) {
        rcgc.set(bits);
        pr.set(pr.get() & bits);
        if bits & !pr.get() != 0 {
            pending.set(Some(self.ready_delay.get()));
        }
    }

    fn ready(
        &self,
        reg: &'static str,
        pr: &Cell<u32>,
        rcgc: &Cell<u32>,
        pending: &Cell<Option<u32>>,
    ) -> u32 {
        settle(pending, pr, rcgc.get());
        let value = pr.get();
        self.log.record(Block::Sysctl, reg, false, value);
        value
    }
}

impl SysctlPeriph for SimSysctl {
    sim_reg!(Block::Sysctl, rcc, rcc_rd);
    sim_reg!(Block::Sysctl, rcc2, rcc2_rd, rcc2_wr);
    sim_reg!(Block::Sysctl, rcgcssi, rcgcssi_rd);
    sim_reg!(Block::Sysctl, rcgcgpio, rcgcgpio_rd);

    // Starting the oscillator or restarting the PLL begins a power-up or lock countdown
    fn rcc_wr(&self, bits: u32) {
        self.log.record(Block::Sysctl, "rcc", true, bits);
        let old = self.rcc.replace(bits);
        if old.check(RCC_MOSCDIS) != 0 && bits.check(RCC_MOSCDIS) == 0 {
            self.mosc_pending.set(Some(self.mosc_delay.get()));
        }
        let pll_on = bits.check(RCC_PWRDN) == 0;
        let restarted =
            old.check(RCC_PWRDN) != 0 || old & RCC_XTAL_MASK != bits & RCC_XTAL_MASK;
        if pll_on && restarted {
            self.pll_pending.set(Some(self.lock_delay.get()));
        } else if !pll_on {
            self.pll_pending.set(None);
        }
    }

    fn ris_rd(&self) -> u32 {
        settle(&self.mosc_pending, &self.ris, 1 << RIS_MOSCPUPRIS);
        settle(&self.pll_pending, &self.ris, 1 << RIS_PLLLRIS);
        let value = self.ris.get();
        self.log.record(Block::Sysctl, "ris", false, value);
        value
    }

    fn misc_wr(&self, bits: u32) {
        self.log.record(Block::Sysctl, "misc", true, bits);
        self.ris.set(self.ris.get() & !bits);
    }

    fn rcgcssi_wr(&self, bits: u32) {
        self.log.record(Block::Sysctl, "rcgcssi", true, bits);
        self.gate(&self.rcgcssi, &self.prssi, &self.prssi_pending, bits);
    }

    fn rcgcgpio_wr(&self, bits: u32) {
        self.log.record(Block::Sysctl, "rcgcgpio", true, bits);
        self.gate(&self.rcgcgpio, &self.prgpio, &self.prgpio_pending, bits);
    }

    fn prssi_rd(&self) -> u32 {
        self.ready("prssi", &self.prssi, &self.rcgcssi, &self.prssi_pending)
    }

    fn prgpio_rd(&self) -> u32 {
        self.ready("prgpio", &self.prgpio, &self.rcgcgpio, &self.prgpio_pending)
    }
}

pub struct SimGpio {
    log: Rc<Log>,
    pub afsel: Cell<u32>,
    pub pctl: Cell<u32>,
    pub amsel: Cell<u32>,
    pub den: Cell<u32>,
    pub dr2r: Cell<u32>,
}

impl SimGpio {
    pub fn snapshot(&self) -> [u32; 5] {
        [
            self.afsel.get(),
            self.pctl.get(),
            self.amsel.get(),
            self.den.get(),
            self.dr2r.get(),
        ]
    }
}

impl GpioPeriph for SimGpio {
    sim_reg!(Block::Gpio, afsel, afsel_rd, afsel_wr);
    sim_reg!(Block::Gpio, pctl, pctl_rd, pctl_wr);
    sim_reg!(Block::Gpio, amsel, amsel_rd, amsel_wr);
    sim_reg!(Block::Gpio, den, den_rd, den_wr);
    sim_reg!(Block::Gpio, dr2r, dr2r_rd, dr2r_wr);
}

pub struct SsiState {
    log: Rc<Log>,
    pub cr0: Cell<u32>,
    pub cr1: Cell<u32>,
    pub cpsr: Cell<u32>,
    pub cc: Cell<u32>,
    tx: RefCell<Vec<u16>>,
    rx: RefCell<VecDeque<u16>>,
    miso: Cell<u16>,
    stalled: Cell<bool>,
    stall_remaining: Cell<u32>,
    stalled_polls: Cell<u32>,
}

/// Shared handle to the SSI state, so a test can keep inspecting the port after handing a clone
/// to an `Ssi`.
#[derive(Clone)]
pub struct SimSsi(Rc<SsiState>);

impl Deref for SimSsi {
    type Target = SsiState;

    fn deref(&self) -> &SsiState {
        &self.0
    }
}

impl SimSsi {
    /// Keep the transmit FIFO full until released
    pub fn stall(&self, stalled: bool) {
        self.stalled.set(stalled);
    }

    /// Report the transmit FIFO full for the next `polls` status reads
    pub fn stall_for(&self, polls: u32) {
        self.stall_remaining.set(polls);
    }

    pub fn status_polls_while_stalled(&self) -> u32 {
        self.stalled_polls.get()
    }

    /// Word the DAC side clocks back for every transmitted frame
    pub fn set_miso(&self, word: u16) {
        self.miso.set(word);
    }

    pub fn transmitted(&self) -> Vec<u16> {
        self.tx.borrow().clone()
    }

    pub fn snapshot(&self) -> [u32; 4] {
        [
            self.cr0.get(),
            self.cr1.get(),
            self.cpsr.get(),
            self.cc.get(),
        ]
    }

    fn tx_full(&self) -> bool {
        if self.stalled.get() {
            return true;
        }
        let remaining = self.stall_remaining.get();
        if remaining > 0 {
            self.stall_remaining.set(remaining - 1);
            return true;
        }
        false
    }
}

impl SsiPeriph for SimSsi {
    sim_reg!(Block::Ssi, cr0, cr0_rd, cr0_wr);
    sim_reg!(Block::Ssi, cr1, cr1_rd, cr1_wr);
    sim_reg!(Block::Ssi, cpsr, cpsr_rd, cpsr_wr);
    sim_reg!(Block::Ssi, cc, cc_rd, cc_wr);

    fn sr_rd(&self) -> u32 {
        let mut sr = SR_RESET;
        if self.tx_full() {
            self.stalled_polls.set(self.stalled_polls.get() + 1);
            sr = sr.clear(SR_TNF).clear(SR_TFE);
        }
        if !self.rx.borrow().is_empty() {
            sr = sr.set(SR_RNE);
        }
        self.log.record(Block::Ssi, "sr", false, sr);
        sr
    }

    fn dr_rd(&self) -> u32 {
        let value = self.rx.borrow_mut().pop_front().unwrap_or(0) as u32;
        self.log.record(Block::Ssi, "dr", false, value);
        value
    }

    fn dr_wr(&self, bits: u32) {
        self.log.record(Block::Ssi, "dr", true, bits);
        self.tx.borrow_mut().push(bits as u16);
        let mut rx = self.rx.borrow_mut();
        if rx.len() < FIFO_DEPTH {
            rx.push_back(self.miso.get());
        }
    }
}

pub struct SimBoard {
    pub log: Rc<Log>,
    pub sysctl: SimSysctl,
    pub gpioa: SimGpio,
    pub ssi0: SimSsi,
}

impl SimBoard {
    pub fn new() -> Self {
        let log = Rc::new(Log::default());
        SimBoard {
            sysctl: SimSysctl {
                log: log.clone(),
                rcc: Cell::new(RCC_RESET),
                rcc2: Cell::new(RCC2_RESET),
                rcgcssi: Cell::new(0),
                rcgcgpio: Cell::new(0),
                ris: Cell::new(0),
                prssi: Cell::new(0),
                prgpio: Cell::new(0),
                mosc_pending: Cell::new(None),
                pll_pending: Cell::new(None),
                prssi_pending: Cell::new(None),
                prgpio_pending: Cell::new(None),
                mosc_delay: Cell::new(0),
                lock_delay: Cell::new(0),
                ready_delay: Cell::new(0),
            },
            gpioa: SimGpio {
                log: log.clone(),
                afsel: Cell::new(0),
                pctl: Cell::new(0),
                amsel: Cell::new(0),
                den: Cell::new(0),
                dr2r: Cell::new(DR2R_RESET),
            },
            ssi0: SimSsi(Rc::new(SsiState {
                log: log.clone(),
                cr0: Cell::new(0),
                cr1: Cell::new(0),
                cpsr: Cell::new(0),
                cc: Cell::new(0),
                tx: RefCell::new(Vec::new()),
                rx: RefCell::new(VecDeque::new()),
                miso: Cell::new(0),
                stalled: Cell::new(false),
                stall_remaining: Cell::new(0),
                stalled_polls: Cell::new(0),
            })),
            log,
        }
    }

    pub fn snapshot(&self) -> ([u32; 4], [u32; 5], [u32; 4]) {
        (
            self.sysctl.snapshot(),
            self.gpioa.snapshot(),
            self.ssi0.snapshot(),
        )
    }
}
