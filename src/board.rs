//! Board facade
//!
//! Bundles the GPS session and the receiver driver of one board and
//! forwards calls to them.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use embedded_io::{Read, ReadReady};

use crate::gps::{GpsError, GpsRecord, GpsSession};
use crate::hal::Clock;
use crate::radio::registers::BusError;
use crate::radio::Si4313;
use crate::types::ScanSample;

/// ASCII32 board: one GPS and one receiver
pub struct Board<'a, S, C, SPI, CS, SDN, D> {
    gps: GpsSession<'a, S, C>,
    radio: Si4313<SPI, CS, SDN, D>,
}

impl<'a, S, C, SPI, CS, SDN, D> Board<'a, S, C, SPI, CS, SDN, D>
where
    C: Clock,
    SPI: SpiBus<u8>,
    CS: OutputPin,
    SDN: OutputPin<Error = CS::Error>,
    D: DelayNs,
{
    /// Combine already constructed drivers
    pub fn new(gps: GpsSession<'a, S, C>, radio: Si4313<SPI, CS, SDN, D>) -> Self {
        Self { gps, radio }
    }

    /// Initialize the receiver
    ///
    /// The GPS session needs no initialization beyond construction.
    pub fn begin(&mut self) -> Result<(), BusError<SPI, CS>> {
        self.radio.init()
    }

    /// True when the GPS record may be read
    #[must_use]
    pub fn gps_available(&self) -> bool {
        self.gps.available()
    }

    /// Current GPS record
    #[must_use]
    pub fn gps_data(&self) -> &GpsRecord {
        self.gps.data()
    }

    /// Milliseconds since the last GPS line
    #[must_use]
    pub fn gps_age(&self) -> u32 {
        self.gps.age()
    }

    /// Mark the GPS record as consumed
    pub fn gps_clear_flag(&mut self) {
        self.gps.mark_consumed();
    }

    /// Write a receiver register
    pub fn radio_write_reg(&mut self, addr: u8, value: u8) -> Result<(), BusError<SPI, CS>> {
        self.radio.write_reg(addr, value)
    }

    /// Read a receiver register
    pub fn radio_read_reg(&mut self, addr: u8) -> Result<u8, BusError<SPI, CS>> {
        self.radio.read_reg(addr)
    }

    /// Tune the receiver
    pub fn radio_change_freq(&mut self, mhz: u16) -> Result<(), BusError<SPI, CS>> {
        self.radio.change_freq(mhz)
    }

    /// Raw RSSI
    pub fn radio_rssi(&mut self) -> Result<u8, BusError<SPI, CS>> {
        self.radio.rssi()
    }

    /// Received power in dBm
    pub fn radio_dbm(&mut self) -> Result<i16, BusError<SPI, CS>> {
        self.radio.dbm()
    }

    /// Spectrum scan, see [`Si4313::scan`]
    pub fn radio_scan(
        &mut self,
        start: u16,
        stop: u16,
        out: &mut [ScanSample],
    ) -> Result<usize, BusError<SPI, CS>> {
        self.radio.scan(start, stop, out)
    }

    /// The GPS session
    pub fn gps(&mut self) -> &mut GpsSession<'a, S, C> {
        &mut self.gps
    }

    /// The receiver driver
    pub fn radio(&mut self) -> &mut Si4313<SPI, CS, SDN, D> {
        &mut self.radio
    }

    /// Split back into the two drivers
    pub fn release(self) -> (GpsSession<'a, S, C>, Si4313<SPI, CS, SDN, D>) {
        (self.gps, self.radio)
    }
}

impl<S, C, SPI, CS, SDN, D> Board<'_, S, C, SPI, CS, SDN, D>
where
    S: Read + ReadReady,
    C: Clock,
{
    /// Drain pending GPS bytes
    pub fn gps_update(&mut self) -> Result<(), GpsError<S::Error>> {
        self.gps.update()
    }
}
