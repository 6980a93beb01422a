//! Spectrum scanning
//!
//! Sweeps the receiver across a range of frequencies in fixed steps,
//! recording the signal level at each one.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::registers::{BusError, RadioError};
use super::si4313::Si4313;
use crate::config::{LOW_BAND_MIN_MHZ, MAX_FREQUENCY_MHZ, SCAN_STEP_MHZ};
use crate::types::ScanSample;

impl<SPI, CS, SDN, D> Si4313<SPI, CS, SDN, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    SDN: OutputPin<Error = CS::Error>,
    D: DelayNs,
{
    /// Scan `start..stop` MHz into `out`
    ///
    /// `stop` is exclusive. One sample is taken per [`SCAN_STEP_MHZ`]; the
    /// sweep ends early when `out` is full. Returns the number of samples
    /// written. The receiver is left tuned to the last scanned frequency.
    ///
    /// # Errors
    ///
    /// A range reaching below 240 MHz or above 960 MHz is rejected before
    /// anything is tuned.
    pub fn scan(
        &mut self,
        start: u16,
        stop: u16,
        out: &mut [ScanSample],
    ) -> Result<usize, BusError<SPI, CS>> {
        if start < LOW_BAND_MIN_MHZ || stop > MAX_FREQUENCY_MHZ {
            warn!("Si4313: scan {}-{} MHz not supported", start, stop);
            return Err(RadioError::UnsupportedRange { start, stop });
        }

        let steps = (start..stop).step_by(usize::from(SCAN_STEP_MHZ));
        let mut count = 0;
        for (freq, slot) in steps.zip(out.iter_mut()) {
            self.change_freq(freq)?;
            *slot = ScanSample::new(freq, self.dbm()?);
            count += 1;
        }

        debug!("Si4313: scanned {} points from {} MHz", count, start);
        Ok(count)
    }
}
