//! Shared types used across the board drivers
//!
//! This module defines the small domain types shared between the radio
//! tuning logic, the scanner and the board facade.

use crate::config::{
    HIGH_BAND_CARRIER_UNIT, HIGH_BAND_MIN_MHZ, HIGH_BAND_STEP_MHZ, LOW_BAND_CARRIER_UNIT,
    LOW_BAND_MIN_MHZ, LOW_BAND_STEP_MHZ, MAX_FREQUENCY_MHZ,
};

/// Receiver sub-band
///
/// The Si4313 synthesizer covers its tuning range in two sub-bands that use
/// different band-select bits and channel spacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubBand {
    /// 240 - 479 MHz
    Low,
    /// 480 - 959 MHz
    High,
}

impl SubBand {
    /// Get the sub-band for a frequency in MHz
    #[must_use]
    pub const fn from_mhz(mhz: u16) -> Option<Self> {
        if mhz >= LOW_BAND_MIN_MHZ && mhz < HIGH_BAND_MIN_MHZ {
            Some(Self::Low)
        } else if mhz >= HIGH_BAND_MIN_MHZ && mhz < MAX_FREQUENCY_MHZ {
            Some(Self::High)
        } else {
            None
        }
    }

    /// Lowest frequency of the sub-band
    #[must_use]
    pub const fn start_mhz(self) -> u16 {
        match self {
            Self::Low => LOW_BAND_MIN_MHZ,
            Self::High => HIGH_BAND_MIN_MHZ,
        }
    }

    /// Highest frequency of the sub-band (inclusive)
    #[must_use]
    pub const fn end_mhz(self) -> u16 {
        match self {
            Self::Low => HIGH_BAND_MIN_MHZ - 1,
            Self::High => MAX_FREQUENCY_MHZ - 1,
        }
    }

    /// Width of one band-select step
    #[must_use]
    pub const fn step_mhz(self) -> u16 {
        match self {
            Self::Low => LOW_BAND_STEP_MHZ,
            Self::High => HIGH_BAND_STEP_MHZ,
        }
    }

    /// Carrier register increment per MHz inside a step
    #[must_use]
    pub const fn carrier_unit(self) -> u16 {
        match self {
            Self::Low => LOW_BAND_CARRIER_UNIT,
            Self::High => HIGH_BAND_CARRIER_UNIT,
        }
    }

    /// Fixed bits OR-ed into the band-select register
    ///
    /// Bit 6 (`sbsel`) is always set; the high band also sets `hbsel` (bit 5).
    #[must_use]
    pub const fn select_bits(self) -> u8 {
        match self {
            Self::Low => 0x40,
            Self::High => 0x60,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SubBand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(f, "240-479 MHz"),
            Self::High => defmt::write!(f, "480-959 MHz"),
        }
    }
}

/// One point of a spectrum scan
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSample {
    /// Frequency in MHz
    pub freq: u16,
    /// Estimated signal level in dBm
    pub db: i16,
}

impl ScanSample {
    /// Create a new sample
    #[must_use]
    pub const fn new(freq: u16, db: i16) -> Self {
        Self { freq, db }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ScanSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} MHz: {} dBm", self.freq, self.db);
    }
}
