//! Frequency to band-select/carrier encoding
//!
//! The synthesizer is programmed with a band-select register and a 16-bit
//! nominal carrier word. Within a sub-band, each band-select step covers
//! 10 MHz (low band) or 20 MHz (high band) and the carrier word picks the
//! MHz inside that step.

use crate::types::SubBand;

/// Frequency outside the two supported sub-bands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedFrequency(pub u16);

#[cfg(feature = "embedded")]
impl defmt::Format for UnsupportedFrequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} MHz not supported", self.0);
    }
}

/// Register values for one frequency
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyWords {
    /// Sub-band the frequency falls in
    pub sub_band: SubBand,
    /// Value for the band-select register
    pub band_select: u8,
    /// Nominal carrier word
    pub carrier: u16,
}

impl FrequencyWords {
    /// Carrier high byte (`FREQCARR1`)
    #[must_use]
    pub const fn carrier_hi(&self) -> u8 {
        self.carrier.to_be_bytes()[0]
    }

    /// Carrier low byte (`FREQCARR0`)
    #[must_use]
    pub const fn carrier_lo(&self) -> u8 {
        self.carrier.to_be_bytes()[1]
    }
}

/// Encode a frequency in MHz
///
/// # Errors
///
/// Returns [`UnsupportedFrequency`] below 240 MHz and from 960 MHz up.
pub const fn encode(mhz: u16) -> Result<FrequencyWords, UnsupportedFrequency> {
    let Some(sub_band) = SubBand::from_mhz(mhz) else {
        return Err(UnsupportedFrequency(mhz));
    };

    let offset = mhz - sub_band.start_mhz();
    let step = sub_band.step_mhz();

    // offset / step is at most 23, always fits the 5-bit band field
    #[allow(clippy::cast_possible_truncation)]
    let band_select = (offset / step) as u8 | sub_band.select_bits();
    let carrier = (offset % step) * sub_band.carrier_unit();

    Ok(FrequencyWords {
        sub_band,
        band_select,
        carrier,
    })
}
