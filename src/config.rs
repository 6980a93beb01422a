//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the ASCII32 board.
//! Buffer sizes, NMEA field widths, receiver tuning limits and the fixed
//! receiver register configuration are centralized here.

use crate::radio::registers::reg;

/// GPS serial baud rate
pub const GPS_BAUD_RATE: u32 = 9_600;

/// Line buffer size for GPS line assembly
pub const GPS_LINE_BUFFER_SIZE: usize = 96;

/// GPS polling interval for the target main loop
pub const GPS_POLL_INTERVAL_MS: u64 = 10;

/// Maximum number of comma-separated tokens kept per sentence
pub const MAX_FIELDS: usize = 20;

/// Sentence type token of the recommended minimum navigation sentence
pub const RMC_TYPE: &str = "$GPRMC";

/// Sentence type token of the fix data sentence
pub const GGA_TYPE: &str = "$GPGGA";

/// Declared widths of the GPS record slots, in characters
pub mod field {
    //! Fixed widths of the textual GPS record fields

    /// UTC time of fix (`hhmmss.sss`)
    pub const UTC: usize = 10;
    /// Status (`A` or `V`)
    pub const STATUS: usize = 1;
    /// Latitude (`ddmm.mmmm`)
    pub const LAT: usize = 10;
    /// Hemisphere (`N`/`S`, `E`/`W`)
    pub const HEMISPHERE: usize = 1;
    /// Longitude (`dddmm.mmmm`)
    pub const LON: usize = 11;
    /// Speed over ground in knots
    pub const SPEED: usize = 8;
    /// Course over ground in degrees
    pub const COURSE: usize = 8;
    /// Date (`ddmmyy`)
    pub const DATE: usize = 6;
    /// RMC token 10
    pub const CHECKSUM: usize = 8;
    /// Fix quality indicator
    pub const QUALITY: usize = 1;
    /// Satellites in use
    pub const NUM_SAT: usize = 2;
    /// Horizontal dilution of precision
    pub const PRECISION: usize = 6;
    /// Altitude above mean sea level
    pub const ALTITUDE: usize = 8;
    /// Each date-time component
    pub const DATETIME_PART: usize = 2;
}

/// MTK hot restart command sent by the diagnostic handshake
pub const MTK_HOT_RESTART: &str = "$PMTK101*32";

/// Prefix of the MTK "initialization done" message
pub const MTK_INIT_PREFIX: &str = "$PMTK011,MTKGPS";

/// Prefix of the MTK "system startup" message
pub const MTK_SYS_PREFIX: &str = "$PMTK010,001";

/// Timeout for each diagnostic line read
pub const DIAG_TIMEOUT_MS: u32 = 1_000;

/// Number of lines inspected by the diagnostic handshake
pub const DIAG_MAX_RETRY: u8 = 5;

/// Line buffer length used by the diagnostic handshake
pub const DIAG_LINE_LEN: usize = 20;

/// SPI clock for the receiver
pub const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Lowest supported receive frequency
pub const LOW_BAND_MIN_MHZ: u16 = 240;

/// Start of the high sub-band
pub const HIGH_BAND_MIN_MHZ: u16 = 480;

/// First unsupported frequency above the high sub-band
pub const MAX_FREQUENCY_MHZ: u16 = 960;

/// Band-select step in the low sub-band
pub const LOW_BAND_STEP_MHZ: u16 = 10;

/// Band-select step in the high sub-band
pub const HIGH_BAND_STEP_MHZ: u16 = 20;

/// Carrier register increment per MHz in the low sub-band
pub const LOW_BAND_CARRIER_UNIT: u16 = 0x1900;

/// Carrier register increment per MHz in the high sub-band
pub const HIGH_BAND_CARRIER_UNIT: u16 = 0x0C80;

/// Spectrum scan step
pub const SCAN_STEP_MHZ: u16 = 1;

/// PLL settling time after a frequency change
pub const PLL_SETTLE_MS: u32 = 1;

/// Poll limit while waiting for reset and chip-ready flags
pub const INIT_POLL_LIMIT: u16 = 100;

/// Raw RSSI anchor for the low calibration point
pub const RSSI_LOW_RAW: i32 = 8;

/// Power at the low calibration point
pub const RSSI_LOW_DBM: i32 = -118;

/// Raw RSSI anchor for the high calibration point
pub const RSSI_HIGH_RAW: i32 = 208;

/// Power at the high calibration point
pub const RSSI_HIGH_DBM: i32 = -20;

/// Receiver configuration written by `Si4313::init`
///
/// FSK, 20 ppm crystal tolerance, Fc = 905 MHz, 9.6 kbps,
/// AFC disabled, 70 kHz deviation.
pub const RX_CONFIG: [(u8, u8); 16] = [
    (reg::FREQSEL, 0x75),
    (reg::FREQCARR1, 0x4B),
    (reg::FREQCARR0, 0x00),
    (reg::IFBW, 0xAE),
    (reg::CLKRATIO, 0x39),
    (reg::CLKOFFS2, 0x20),
    (reg::CLKOFFS1, 0x68),
    (reg::CLKOFFS0, 0xDC),
    (reg::CLKLPGAIN1, 0x00),
    (reg::CLKLPGAIN0, 0x10),
    (reg::AFCOVRD, 0x00),
    (reg::AFCCTRL, 0x0A),
    (reg::AFCLIMITER, 0x50),
    (reg::CLKOVERD, 0x03),
    (reg::AGCOVERD1, 0x60),
    // RSSI offset adjustment disabled
    (reg::PRECTRL, 0x20),
];

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Receiver SPI clock
    pub const RADIO_SCK: &str = "PA5";

    /// Receiver SPI MISO
    pub const RADIO_MISO: &str = "PA6";

    /// Receiver SPI MOSI
    pub const RADIO_MOSI: &str = "PA7";

    /// Receiver chip select (active low)
    pub const RADIO_CS: &str = "PA4";

    /// Receiver shutdown (active high)
    pub const RADIO_SDN: &str = "PB0";

    /// GPS UART TX (to module RX)
    pub const GPS_TX: &str = "PA9";

    /// GPS UART RX (from module TX)
    pub const GPS_RX: &str = "PA10";
}
