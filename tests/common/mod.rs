//! Host-side stand-ins for the board peripherals
//!
//! Each mock hands out a cloneable handle so a test can keep inspecting
//! or feeding a peripheral after the driver has taken ownership of it.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::{Rc, Weak};

use ascii32::hal::Clock;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, ErrorKind, SpiBus};

// ============================================================================
// NMEA helpers
// ============================================================================

/// XOR checksum of a sentence body
pub fn xor(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Frame `body` as `$body*HH`
pub fn framed(body: &str) -> String {
    format!("${}*{:02X}", body, xor(body))
}

/// Frame `body` as `$body*HH\r\n`
pub fn nmea(body: &str) -> Vec<u8> {
    format!("{}\r\n", framed(body)).into_bytes()
}

// ============================================================================
// Clock
// ============================================================================

/// Millisecond clock under test control
///
/// `auto_step` is added after every read so busy-wait loops make progress.
#[derive(Clone, Default)]
pub struct MockClock {
    now: Rc<Cell<u32>>,
    auto_step: Rc<Cell<u32>>,
}

impl MockClock {
    pub fn new(start: u32) -> Self {
        let clock = Self::default();
        clock.set(start);
        clock
    }

    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set_auto_step(&self, ms: u32) {
        self.auto_step.set(ms);
    }

    pub fn get(&self) -> u32 {
        self.now.get()
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.auto_step.get()));
        now
    }
}

// ============================================================================
// Serial port
// ============================================================================

#[derive(Default)]
struct SerialState {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    on_flush: Vec<u8>,
}

/// Serial port with a scripted receive queue
#[derive(Clone, Default)]
pub struct MockSerial {
    state: Rc<RefCell<SerialState>>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the driver to read
    pub fn feed(&self, bytes: &[u8]) {
        self.state.borrow_mut().rx.extend(bytes.iter().copied());
    }

    /// Bytes that become readable once the driver flushes its output
    pub fn respond_on_flush(&self, bytes: &[u8]) {
        self.state.borrow_mut().on_flush.extend_from_slice(bytes);
    }

    /// Everything the driver wrote
    pub fn written(&self) -> Vec<u8> {
        self.state.borrow().tx.clone()
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().rx.len()
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = Infallible;
}

impl embedded_io::Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut state = self.state.borrow_mut();
        let mut n = 0;
        while n < buf.len() {
            match state.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io::ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.state.borrow().rx.is_empty())
    }
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.state.borrow_mut().tx.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        let response = std::mem::take(&mut state.on_flush);
        state.rx.extend(response);
        Ok(())
    }
}

// ============================================================================
// SPI bus, chip select and shutdown pins
// ============================================================================

/// Something that happened on the radio interface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    CsLow,
    CsHigh,
    SdnLow,
    SdnHigh,
    /// Bytes sent on MOSI
    Transfer([u8; 2]),
    Flush,
    /// `critical_section::with` entered
    CriticalEnter,
    /// `critical_section::with` left
    CriticalExit,
}

struct BusState {
    regs: [u8; 128],
    events: Vec<Event>,
    fail_spi: bool,
    rssi_sequence: VecDeque<u8>,
}

/// Shared view of the simulated receiver
#[derive(Clone)]
pub struct RadioBus {
    state: Rc<RefCell<BusState>>,
}

impl RadioBus {
    /// Receiver whose status flags report reset and chip-ready immediately
    ///
    /// Critical sections entered on this thread are logged to the newest bus.
    pub fn new() -> Self {
        let mut regs = [0u8; 128];
        regs[0x04] = 0x03;
        let state = Rc::new(RefCell::new(BusState {
            regs,
            events: Vec::new(),
            fail_spi: false,
            rssi_sequence: VecDeque::new(),
        }));
        CRITICAL_LOG.with(|log| *log.borrow_mut() = Rc::downgrade(&state));
        Self { state }
    }

    pub fn spi(&self) -> MockSpi {
        MockSpi { bus: self.clone() }
    }

    pub fn cs(&self) -> MockPin {
        MockPin { bus: self.clone(), role: PinRole::Cs }
    }

    pub fn sdn(&self) -> MockPin {
        MockPin { bus: self.clone(), role: PinRole::Sdn }
    }

    pub fn reg(&self, addr: u8) -> u8 {
        self.state.borrow().regs[usize::from(addr & 0x7F)]
    }

    pub fn set_reg(&self, addr: u8, value: u8) {
        self.state.borrow_mut().regs[usize::from(addr & 0x7F)] = value;
    }

    /// Values returned by successive RSSI reads; falls back to the register
    pub fn script_rssi(&self, values: &[u8]) {
        self.state.borrow_mut().rssi_sequence.extend(values.iter().copied());
    }

    pub fn fail_spi(&self, fail: bool) {
        self.state.borrow_mut().fail_spi = fail;
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    /// Address bytes of every transfer, in order
    pub fn transfers(&self) -> Vec<[u8; 2]> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Transfer(frame) => Some(frame),
                _ => None,
            })
            .collect()
    }

    /// `(register, value)` of every write transaction, in order
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.transfers()
            .into_iter()
            .filter(|f| f[0] & 0x80 != 0)
            .map(|f| (f[0] & 0x7F, f[1]))
            .collect()
    }
}

// ============================================================================
// Critical section
// ============================================================================

thread_local! {
    static CRITICAL_LOG: RefCell<Weak<RefCell<BusState>>> = RefCell::new(Weak::new());
}

fn log_critical(event: Event) {
    CRITICAL_LOG.with(|log| {
        if let Some(state) = log.borrow().upgrade() {
            state.borrow_mut().events.push(event);
        }
    });
}

/// Host critical section that only records entry and exit
///
/// Each test thread owns its simulated bus, so no real exclusion is needed.
struct RecordingCriticalSection;
critical_section::set_impl!(RecordingCriticalSection);

unsafe impl critical_section::Impl for RecordingCriticalSection {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        log_critical(Event::CriticalEnter);
    }

    unsafe fn release(_state: critical_section::RawRestoreState) {
        log_critical(Event::CriticalExit);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockSpiError;

impl spi::Error for MockSpiError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct MockSpi {
    bus: RadioBus,
}

impl spi::ErrorType for MockSpi {
    type Error = MockSpiError;
}

impl SpiBus<u8> for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut frame = [0u8; 2];
        let n = write.len().min(2);
        frame[..n].copy_from_slice(&write[..n]);
        self.transfer_in_place(&mut frame)?;
        let m = read.len().min(2);
        read[..m].copy_from_slice(&frame[..m]);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut state = self.bus.state.borrow_mut();
        if state.fail_spi {
            return Err(MockSpiError);
        }
        assert_eq!(words.len(), 2, "register transactions are two bytes");

        let frame = [words[0], words[1]];
        state.events.push(Event::Transfer(frame));

        let addr = usize::from(frame[0] & 0x7F);
        if frame[0] & 0x80 != 0 {
            state.regs[addr] = frame[1];
        } else {
            let value = if addr == 0x26 {
                let regs_value = state.regs[addr];
                state.rssi_sequence.pop_front().unwrap_or(regs_value)
            } else {
                state.regs[addr]
            };
            words[0] = 0;
            words[1] = value;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.bus.state.borrow_mut().events.push(Event::Flush);
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum PinRole {
    Cs,
    Sdn,
}

pub struct MockPin {
    bus: RadioBus,
    role: PinRole,
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let event = match self.role {
            PinRole::Cs => Event::CsLow,
            PinRole::Sdn => Event::SdnLow,
        };
        self.bus.state.borrow_mut().events.push(event);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let event = match self.role {
            PinRole::Cs => Event::CsHigh,
            PinRole::Sdn => Event::SdnHigh,
        };
        self.bus.state.borrow_mut().events.push(event);
        Ok(())
    }
}

// ============================================================================
// Delay
// ============================================================================

/// Delay that only records how long it was asked to wait
#[derive(Clone, Default)]
pub struct MockDelay {
    total_ns: Rc<Cell<u64>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns.get() / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}
