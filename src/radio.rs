//! Radio Driver
//!
//! Si4313 sub-GHz FSK receiver on the SPI bus: register access,
//! tuning, signal strength and spectrum scanning.

pub mod frequency;
pub mod registers;
pub mod rssi;
pub mod scan;
pub mod si4313;

pub use frequency::{FrequencyWords, UnsupportedFrequency};
pub use registers::{RadioError, RegisterBus};
pub use rssi::rssi_to_dbm;
pub use si4313::Si4313;
pub use crate::types::ScanSample;
