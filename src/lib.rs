//! ASCII32 Board Support Library
//!
//! This library provides the two peripheral drivers found on the ASCII32
//! tracker board: a streaming NMEA-0183 GPS parser fed from a serial port,
//! and a driver for the Si4313 sub-GHz FSK receiver on the SPI bus.
//!
//! # Architecture
//!
//! The crate is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      BOARD FACADE                            │
//! │          Board (forwards to the two drivers)                 │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │          GPS DRIVER          │        RADIO DRIVER          │
//! │  Session │ Sentence │ Check  │  Si4313 │ Scan │ Frequency  │
//! │          │  store   │  sum   │         │      │ RSSI map   │
//! ├──────────────────────────────┼──────────────────────────────┤
//! │  embedded-io serial + Clock  │ RegisterBus (SPI + CS, crit. │
//! │                              │ section per transaction)     │
//! ├──────────────────────────────┴──────────────────────────────┤
//! │            embedded-hal / embedded-io / critical-section     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **No dynamic memory**: fixed-width `heapless` strings and caller-owned buffers
//! - **No global state**: every driver instance owns its buffers and pins
//! - **Generic over embedded-hal**: the same code runs on target and in host tests
//! - **Silent discard**: malformed sentences never surface as errors
//! - **Explicit error handling**: transport errors are returned as `Result`
//!
//! # Building
//!
//! `std` (the default) and `embedded` are mutually exclusive.
//!
//! ```text
//! cargo test  # host tests
//! cargo build --release --no-default-features --features embedded --target thumbv7em-none-eabihf
//! ```
//!
//! Register transactions run inside `critical_section::with`. The target
//! build gets its implementation from `cortex-m`; host applications enable
//! `critical-section-std`.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(all(feature = "std", feature = "embedded"))]
compile_error!("features `std` and `embedded` are mutually exclusive; build the target with `--no-default-features --features embedded`");

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

#[macro_use]
mod fmt;

/// Hardware Abstraction Layer
///
/// Time source trait and its target implementation.
pub mod hal;

/// GPS Driver
///
/// Line assembly, NMEA validation and field extraction.
pub mod gps;

/// Radio Driver
///
/// Si4313 register protocol, tuning, RSSI and spectrum scanning.
pub mod radio;

/// Board facade combining both drivers
pub mod board;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::board::Board;
    pub use crate::config::*;
    pub use crate::gps::{DateTime, GpsError, GpsRecord, GpsSession, SessionState};
    pub use crate::hal::Clock;
    pub use crate::radio::{RadioError, ScanSample, Si4313};
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::digital::OutputPin;
    pub use embedded_hal::spi::SpiBus;

    // Embassy
    #[cfg(feature = "embedded")]
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
