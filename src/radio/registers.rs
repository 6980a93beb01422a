//! Register access over SPI
//!
//! Every transaction is two bytes: the register address with bit 7 as the
//! direction flag (0 = read, 1 = write), then the data byte. Chip select is
//! driven by hand so the whole CS-low window can sit inside a critical
//! section; an interrupt handler touching the bus cannot split a transfer.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::frequency::UnsupportedFrequency;

/// Si4313 register addresses
pub mod reg {
    //! Register map (subset used by the driver)

    /// Device type code
    pub const DEVICE_TYPE: u8 = 0x00;
    /// Device version code
    pub const DEVICE_VERSION: u8 = 0x01;
    /// Device status
    pub const DEVICE_STATUS: u8 = 0x02;
    /// Interrupt/status 1 (cleared on read)
    pub const INTPSTAT1: u8 = 0x03;
    /// Interrupt/status 2 (cleared on read)
    pub const INTPSTAT2: u8 = 0x04;
    /// Operating and function control 1
    pub const CONTROL1: u8 = 0x07;
    /// Operating and function control 2
    pub const CONTROL2: u8 = 0x08;
    /// IF filter bandwidth
    pub const IFBW: u8 = 0x1C;
    /// AFC loop gearshift override
    pub const AFCOVRD: u8 = 0x1D;
    /// AFC timing control
    pub const AFCCTRL: u8 = 0x1E;
    /// Clock recovery gearshift override
    pub const CLKOVERD: u8 = 0x1F;
    /// Clock recovery oversampling ratio
    pub const CLKRATIO: u8 = 0x20;
    /// Clock recovery offset 2
    pub const CLKOFFS2: u8 = 0x21;
    /// Clock recovery offset 1
    pub const CLKOFFS1: u8 = 0x22;
    /// Clock recovery offset 0
    pub const CLKOFFS0: u8 = 0x23;
    /// Clock recovery timing loop gain 1
    pub const CLKLPGAIN1: u8 = 0x24;
    /// Clock recovery timing loop gain 0
    pub const CLKLPGAIN0: u8 = 0x25;
    /// Received signal strength indicator
    pub const RSSI: u8 = 0x26;
    /// AFC limiter
    pub const AFCLIMITER: u8 = 0x2A;
    /// Preamble detection control
    pub const PRECTRL: u8 = 0x35;
    /// AGC override 1
    pub const AGCOVERD1: u8 = 0x69;
    /// Modulation mode control 2
    pub const MODCTRL2: u8 = 0x71;
    /// Frequency band select
    pub const FREQSEL: u8 = 0x75;
    /// Nominal carrier frequency, high byte
    pub const FREQCARR1: u8 = 0x76;
    /// Nominal carrier frequency, low byte
    pub const FREQCARR0: u8 = 0x77;
}

/// Bit positions inside status and control registers
pub mod bits {
    //! Register bit positions

    /// `CONTROL1`: software register reset
    pub const SWRES: u8 = 7;
    /// `INTPSTAT2`: power-on reset
    pub const IPOR: u8 = 0;
    /// `INTPSTAT2`: chip ready
    pub const ICHIPRDY: u8 = 1;
}

/// Direction flag set on write transactions
pub const WRITE_FLAG: u8 = 0x80;

/// Radio driver error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioError<SPI, PIN> {
    /// SPI bus error
    Spi(SPI),
    /// Chip select or shutdown pin error
    Pin(PIN),
    /// Frequency outside 240-959 MHz; nothing was written
    UnsupportedFrequency(u16),
    /// Scan range outside 240-960 MHz; nothing was scanned
    UnsupportedRange {
        /// Requested start frequency
        start: u16,
        /// Requested stop frequency
        stop: u16,
    },
}

impl<SPI, PIN> From<UnsupportedFrequency> for RadioError<SPI, PIN> {
    fn from(e: UnsupportedFrequency) -> Self {
        Self::UnsupportedFrequency(e.0)
    }
}

#[cfg(feature = "embedded")]
impl<SPI: defmt::Format, PIN: defmt::Format> defmt::Format for RadioError<SPI, PIN> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Spi(e) => defmt::write!(f, "SPI error: {}", e),
            Self::Pin(e) => defmt::write!(f, "Pin error: {}", e),
            Self::UnsupportedFrequency(mhz) => {
                defmt::write!(f, "Unsupported frequency: {} MHz", mhz);
            }
            Self::UnsupportedRange { start, stop } => {
                defmt::write!(f, "Unsupported range: {}-{} MHz", start, stop);
            }
        }
    }
}

/// Error type produced by a bus built from `SPI` and `CS`
pub type BusError<SPI, CS> = RadioError<
    <SPI as embedded_hal::spi::ErrorType>::Error,
    <CS as embedded_hal::digital::ErrorType>::Error,
>;

/// Register-oriented SPI link to the receiver
pub struct RegisterBus<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> RegisterBus<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create the bus and deselect the chip
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, BusError<SPI, CS>> {
        cs.set_high().map_err(RadioError::Pin)?;
        Ok(Self { spi, cs })
    }

    /// Read a single register
    pub fn read_reg(&mut self, addr: u8) -> Result<u8, BusError<SPI, CS>> {
        let mut frame = [addr & !WRITE_FLAG, 0x00];
        self.transaction(&mut frame)?;
        Ok(frame[1])
    }

    /// Write a single register
    pub fn write_reg(&mut self, addr: u8, value: u8) -> Result<(), BusError<SPI, CS>> {
        let mut frame = [addr | WRITE_FLAG, value];
        self.transaction(&mut frame)
    }

    fn transaction(&mut self, frame: &mut [u8; 2]) -> Result<(), BusError<SPI, CS>> {
        critical_section::with(|_| {
            self.cs.set_low().map_err(RadioError::Pin)?;
            let transfer = self
                .spi
                .transfer_in_place(frame)
                .and_then(|()| self.spi.flush());
            // CS goes high even when the transfer failed
            let release = self.cs.set_high();
            transfer.map_err(RadioError::Spi)?;
            release.map_err(RadioError::Pin)
        })
    }

    /// Give back the SPI bus and chip select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}
