//! ASCII32 Board Main Application
//!
//! Entry point for the tracker firmware. Brings up the GPS UART and the
//! receiver SPI bus, then runs one task per driver.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{self, BufferedUart};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ascii32::gps::{DateTime, GpsSession};
use ascii32::hal::timer::{EmbassyClock, RateLimiter};
use ascii32::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<peripherals::USART1>;
});

type GpsPort = BufferedUart<'static>;
type Radio = Si4313<Spi<'static, Blocking>, Output<'static>, Output<'static>, Delay>;

/// Frequencies swept by the radio task (US ISM band)
const SCAN_START_MHZ: u16 = 902;
const SCAN_STOP_MHZ: u16 = 928;
const SCAN_POINTS: usize = (SCAN_STOP_MHZ - SCAN_START_MHZ) as usize;

static GPS_LINE: StaticCell<[u8; GPS_LINE_BUFFER_SIZE]> = StaticCell::new();
static GPS_TX_BUF: StaticCell<[u8; 32]> = StaticCell::new();
static GPS_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Latest GPS date/time, handed from the GPS task to the radio task
static LATEST_TIME: Signal<CriticalSectionRawMutex, DateTime> = Signal::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ASCII32 firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // GPS on USART1
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = GPS_BAUD_RATE;
    let uart = match BufferedUart::new(
        p.USART1,
        Irqs,
        p.PA10, // RX
        p.PA9,  // TX
        GPS_TX_BUF.init([0; 32]),
        GPS_RX_BUF.init([0; 256]),
        uart_config,
    ) {
        Ok(uart) => uart,
        Err(_) => defmt::panic!("GPS UART configuration rejected"),
    };
    let gps = GpsSession::new(uart, EmbassyClock::new(), GPS_LINE.init([0; GPS_LINE_BUFFER_SIZE]));

    info!("GPS UART initialized at {} baud", GPS_BAUD_RATE);

    // Receiver on SPI1
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(SPI_FREQUENCY_HZ);
    let spi = Spi::new_blocking(p.SPI1, p.PA5, p.PA7, p.PA6, spi_config);
    let cs = Output::new(p.PA4, Level::High, Speed::VeryHigh);
    let sdn = Output::new(p.PB0, Level::High, Speed::Low);

    let radio = match Si4313::new(spi, cs, sdn, Delay) {
        Ok(radio) => radio,
        Err(e) => defmt::panic!("Receiver setup failed: {}", e),
    };

    info!("Receiver SPI initialized at {} Hz", SPI_FREQUENCY_HZ);

    spawner.must_spawn(gps_task(gps));
    spawner.must_spawn(radio_task(radio));

    info!("Tasks spawned");
}

/// GPS task - confirms the module at start-up, then polls for sentences
#[embassy_executor::task]
async fn gps_task(mut gps: GpsSession<'static, GpsPort, EmbassyClock>) {
    match gps.diagnostics() {
        Ok(report) => info!("{}", report),
        Err(e) => warn!("GPS diagnostics failed: {}", e),
    }

    let mut report_limiter = RateLimiter::from_ms(5_000);

    loop {
        if let Err(e) = gps.update() {
            warn!("GPS update failed: {}", e);
        }

        if let Some(fix) = gps.fix() {
            LATEST_TIME.signal(fix.datetime.clone());

            if report_limiter.check() {
                info!(
                    "GPS {} {}{} {}{} alt {} sats {} (age {} ms)",
                    fix.status.as_str(),
                    fix.lat.as_str(),
                    fix.lat_hem.as_str(),
                    fix.lon.as_str(),
                    fix.lon_hem.as_str(),
                    fix.altitude.as_str(),
                    fix.num_sat.as_str(),
                    gps.age()
                );
            }
            gps.mark_consumed();
        }

        Timer::after(Duration::from_millis(GPS_POLL_INTERVAL_MS)).await;
    }
}

/// Radio task - sweeps the ISM band and reports the strongest signal
#[embassy_executor::task]
async fn radio_task(mut radio: Radio) {
    if let Err(e) = radio.init() {
        warn!("Receiver init failed: {}", e);
    }

    let mut samples = [ScanSample::default(); SCAN_POINTS];

    loop {
        match radio.scan(SCAN_START_MHZ, SCAN_STOP_MHZ, &mut samples) {
            Ok(count) => {
                if let Some(peak) = samples[..count].iter().max_by_key(|s| s.db) {
                    match LATEST_TIME.try_take() {
                        Some(t) => info!(
                            "{}:{}:{} peak {}",
                            t.hour.as_str(),
                            t.minute.as_str(),
                            t.second.as_str(),
                            peak
                        ),
                        None => info!("peak {}", peak),
                    }
                }
            }
            Err(e) => warn!("Scan failed: {}", e),
        }

        Timer::after(Duration::from_secs(1)).await;
    }
}
