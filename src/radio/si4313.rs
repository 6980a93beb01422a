//! `Si4313` Sub-GHz Receiver Driver
//!
//! Brings the receiver out of shutdown, resets it, loads the fixed FSK
//! receive configuration and provides tuning and signal strength readout.
//!
//! The `Si4313` covers 240-960 MHz in two synthesizer sub-bands; see
//! [`super::frequency`] for the register encoding.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::frequency;
use super::registers::{bits, reg, BusError, RadioError, RegisterBus};
use super::rssi::rssi_to_dbm;
use crate::config::{INIT_POLL_LIMIT, PLL_SETTLE_MS, RX_CONFIG};

/// `Si4313` driver
pub struct Si4313<SPI, CS, SDN, D> {
    bus: RegisterBus<SPI, CS>,
    sdn: SDN,
    delay: D,
    frequency: Option<u16>,
}

impl<SPI, CS, SDN, D> Si4313<SPI, CS, SDN, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    SDN: OutputPin<Error = CS::Error>,
    D: DelayNs,
{
    /// Create a new driver
    ///
    /// Deselects the chip and pulls SDN low so the receiver powers up.
    pub fn new(spi: SPI, cs: CS, mut sdn: SDN, delay: D) -> Result<Self, BusError<SPI, CS>> {
        let bus = RegisterBus::new(spi, cs)?;
        sdn.set_low().map_err(RadioError::Pin)?;
        Ok(Self {
            bus,
            sdn,
            delay,
            frequency: None,
        })
    }

    /// Reset the receiver and load the receive configuration
    ///
    /// Status flags that never appear are logged and initialization
    /// carries on.
    pub fn init(&mut self) -> Result<(), BusError<SPI, CS>> {
        // Clear pending interrupt flags
        self.bus.read_reg(reg::INTPSTAT1)?;
        self.bus.read_reg(reg::INTPSTAT2)?;

        self.bus.write_reg(reg::CONTROL1, 1 << bits::SWRES)?;

        if !self.wait_status(1 << bits::IPOR)? {
            warn!("Si4313: no power-on reset flag after {} polls", INIT_POLL_LIMIT);
        }
        self.bus.read_reg(reg::INTPSTAT2)?;

        if !self.wait_status(1 << bits::ICHIPRDY)? {
            warn!("Si4313: chip not ready after {} polls", INIT_POLL_LIMIT);
        }
        self.bus.read_reg(reg::INTPSTAT2)?;

        for (addr, value) in RX_CONFIG {
            self.bus.write_reg(addr, value)?;
        }

        // FSK, then receiver and crystal oscillator on
        self.bus.write_reg(reg::MODCTRL2, 0x02)?;
        self.bus.write_reg(reg::CONTROL1, 0x05)?;

        // RX_CONFIG leaves the synthesizer at 905 MHz
        self.frequency = Some(905);
        info!("Si4313: receiver enabled");
        Ok(())
    }

    /// Poll `INTPSTAT2` until any bit of `mask` is set
    fn wait_status(&mut self, mask: u8) -> Result<bool, BusError<SPI, CS>> {
        for _ in 0..INIT_POLL_LIMIT {
            if self.bus.read_reg(reg::INTPSTAT2)? & mask != 0 {
                return Ok(true);
            }
            self.delay.delay_ms(1);
        }
        Ok(false)
    }

    /// Read a single register
    pub fn read_reg(&mut self, addr: u8) -> Result<u8, BusError<SPI, CS>> {
        self.bus.read_reg(addr)
    }

    /// Write a single register
    pub fn write_reg(&mut self, addr: u8, value: u8) -> Result<(), BusError<SPI, CS>> {
        self.bus.write_reg(addr, value)
    }

    /// Tune to `mhz`
    ///
    /// Waits for the PLL to settle before returning. Unsupported
    /// frequencies are reported and leave the current tuning untouched.
    pub fn change_freq(&mut self, mhz: u16) -> Result<(), BusError<SPI, CS>> {
        let words = match frequency::encode(mhz) {
            Ok(words) => words,
            Err(e) => {
                warn!("Si4313: {} MHz not supported (240-959 MHz)", mhz);
                return Err(e.into());
            }
        };

        self.bus.write_reg(reg::FREQSEL, words.band_select)?;
        self.bus.write_reg(reg::FREQCARR1, words.carrier_hi())?;
        self.bus.write_reg(reg::FREQCARR0, words.carrier_lo())?;

        self.delay.delay_ms(PLL_SETTLE_MS);
        self.frequency = Some(mhz);
        Ok(())
    }

    /// Last frequency successfully tuned, in MHz
    #[must_use]
    pub const fn frequency(&self) -> Option<u16> {
        self.frequency
    }

    /// Raw RSSI register value
    pub fn rssi(&mut self) -> Result<u8, BusError<SPI, CS>> {
        self.bus.read_reg(reg::RSSI)
    }

    /// Approximate received power in dBm
    pub fn dbm(&mut self) -> Result<i16, BusError<SPI, CS>> {
        self.rssi().map(rssi_to_dbm)
    }

    /// Put the receiver in shutdown (SDN high)
    ///
    /// Register contents are lost; call [`Self::power_on`] and
    /// [`Self::init`] again afterwards.
    pub fn shutdown(&mut self) -> Result<(), BusError<SPI, CS>> {
        self.frequency = None;
        self.sdn.set_high().map_err(RadioError::Pin)
    }

    /// Leave shutdown (SDN low)
    pub fn power_on(&mut self) -> Result<(), BusError<SPI, CS>> {
        self.sdn.set_low().map_err(RadioError::Pin)
    }

    /// Give back the SPI bus, pins and delay
    pub fn release(self) -> (SPI, CS, SDN, D) {
        let (spi, cs) = self.bus.release();
        (spi, cs, self.sdn, self.delay)
    }
}
