//! GPS session: line assembly and update tracking
//!
//! Bytes are pulled from the serial port only while the port reports them
//! ready, so [`GpsSession::update`] never blocks and can be called from a
//! polling loop. A `\n` completes a line, which is validated and stored;
//! a line that outgrows the buffer is dropped.

use embedded_io::{Read, ReadReady};

use super::sentence::{GpsRecord, SentenceKind};
use crate::hal::Clock;

/// GPS driver error
///
/// Malformed sentences and buffer overflows are not errors; only the
/// serial transport can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GpsError<E> {
    /// The serial port reported an error
    Serial(E),
}

#[cfg(feature = "embedded")]
impl<E: defmt::Format> defmt::Format for GpsError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Serial(e) => defmt::write!(f, "GPS serial error: {}", e),
        }
    }
}

/// Line assembly state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    /// A line is being received; the record may be mid-update
    #[default]
    Assembling,
    /// The last line was terminated; the record is safe to read
    Ready,
}

#[cfg(feature = "embedded")]
impl defmt::Format for SessionState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Assembling => defmt::write!(f, "ASSEMBLING"),
            Self::Ready => defmt::write!(f, "READY"),
        }
    }
}

/// GPS receiver session
///
/// Owns the serial port, a millisecond clock, the caller-provided line
/// buffer and the [`GpsRecord`] that sentences are parsed into.
pub struct GpsSession<'a, S, C> {
    pub(super) serial: S,
    pub(super) clock: C,
    line: &'a mut [u8],
    index: usize,
    state: SessionState,
    rx_time: u32,
    record: GpsRecord,
}

impl<'a, S, C: Clock> GpsSession<'a, S, C> {
    /// Create a session over `serial` using `line` as the assembly buffer
    ///
    /// The session starts in [`SessionState::Assembling`]: nothing has been
    /// received yet.
    pub fn new(serial: S, clock: C, line: &'a mut [u8]) -> Self {
        Self {
            serial,
            clock,
            line,
            index: 0,
            state: SessionState::Assembling,
            rx_time: 0,
            record: GpsRecord::new(),
        }
    }

    /// Feed one received byte
    ///
    /// Returns the kind of sentence stored when `byte` completes a valid line.
    pub fn push_byte(&mut self, byte: u8) -> Option<SentenceKind> {
        if byte == b'\n' {
            return self.finish_line();
        }

        self.state = SessionState::Assembling;
        if self.line.is_empty() {
            return None;
        }

        self.line[self.index] = byte;
        self.index += 1;
        if self.index >= self.line.len() {
            debug!("GPS: line exceeds {} bytes, discarded", self.line.len());
            self.index = 0;
        }
        None
    }

    fn finish_line(&mut self) -> Option<SentenceKind> {
        self.rx_time = self.clock.now_ms();

        let mut end = self.index;
        if end > 0 && self.line[end - 1] == b'\r' {
            end -= 1;
        }

        let kind = self.record.ingest(&self.line[..end]);
        if kind.is_none() {
            debug!("GPS: rejected {} byte sentence", end);
        }

        self.index = 0;
        self.state = SessionState::Ready;
        kind
    }

    /// True when no line is being assembled and the record may be read
    #[must_use]
    pub fn available(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// Current line assembly state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The GPS record, whatever its state
    #[must_use]
    pub const fn data(&self) -> &GpsRecord {
        &self.record
    }

    /// The GPS record, only when no line is being assembled
    #[must_use]
    pub fn fix(&self) -> Option<&GpsRecord> {
        self.available().then_some(&self.record)
    }

    /// Mark the current record as consumed
    ///
    /// `available` stays false until the next line is terminated.
    pub fn mark_consumed(&mut self) {
        self.state = SessionState::Assembling;
    }

    /// Milliseconds since the last line terminator
    #[must_use]
    pub fn age(&self) -> u32 {
        self.clock.elapsed_since(self.rx_time)
    }

    /// Timestamp of the last line terminator
    #[must_use]
    pub const fn last_rx_ms(&self) -> u32 {
        self.rx_time
    }

    /// Bytes of the current partial line
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Capacity of the line buffer
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.line.len()
    }

    /// Drop any partial line
    pub(super) fn reset_line(&mut self) {
        self.index = 0;
    }

    /// Give back the serial port, clock and line buffer
    pub fn release(self) -> (S, C, &'a mut [u8]) {
        (self.serial, self.clock, self.line)
    }
}

impl<S, C> GpsSession<'_, S, C>
where
    S: Read + ReadReady,
    C: Clock,
{
    /// Drain all bytes the serial port has ready
    ///
    /// Never waits for more input.
    pub fn update(&mut self) -> Result<(), GpsError<S::Error>> {
        let mut byte = [0u8; 1];
        while self.serial.read_ready().map_err(GpsError::Serial)? {
            if self.serial.read(&mut byte).map_err(GpsError::Serial)? == 0 {
                break;
            }
            if let Some(kind) = self.push_byte(byte[0]) {
                trace!("GPS: stored {} sentence", kind_name(kind));
            }
        }
        Ok(())
    }
}

const fn kind_name(kind: SentenceKind) -> &'static str {
    match kind {
        SentenceKind::Rmc => "RMC",
        SentenceKind::Gga => "GGA",
        SentenceKind::Other => "unhandled",
    }
}
