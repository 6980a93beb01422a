//! GPS Driver
//!
//! Streaming NMEA-0183 reception over a serial port: line assembly,
//! frame and checksum validation, tokenizing and fixed-width field storage.

pub mod checksum;
pub mod diagnostics;
pub mod sentence;
pub mod session;

pub use diagnostics::DiagnosticReport;
pub use sentence::{DateTime, GpsRecord, Sentence, SentenceKind};
pub use session::{GpsError, GpsSession, SessionState};
