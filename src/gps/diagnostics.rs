//! Blocking line reader and MTK start-up handshake
//!
//! Used once at bring-up to confirm that an MTK chipset GPS is attached:
//! the module is hot-restarted and must answer with its init and
//! system-startup messages. Not part of the normal update path.

use embedded_io::{Read, ReadReady, Write};

use super::session::{GpsError, GpsSession};
use crate::config::{
    DIAG_LINE_LEN, DIAG_MAX_RETRY, DIAG_TIMEOUT_MS, MTK_HOT_RESTART, MTK_INIT_PREFIX,
    MTK_SYS_PREFIX,
};
use crate::hal::Clock;

/// Outcome of [`GpsSession::diagnostics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticReport {
    /// The MTK init message was seen
    pub init_confirmed: bool,
    /// The MTK system startup message was seen
    pub startup_confirmed: bool,
}

impl DiagnosticReport {
    /// Both conditions confirmed
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.init_confirmed && self.startup_confirmed
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DiagnosticReport {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "GPS type MTK: {}, system startup: {}",
            self.init_confirmed,
            self.startup_confirmed
        );
    }
}

impl<S, C> GpsSession<'_, S, C>
where
    S: Read + ReadReady,
    C: Clock,
{
    /// Read the next line into `buf`, blocking for at most `timeout_ms`
    ///
    /// Returns the line length including the `\n`, or `None` when the
    /// buffer fills or the timeout expires first.
    pub fn get_next_line(
        &mut self,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<Option<usize>, GpsError<S::Error>> {
        if buf.is_empty() {
            return Ok(None);
        }

        let start = self.clock.now_ms();
        let mut len = 0;
        let mut byte = [0u8; 1];

        loop {
            while self.serial.read_ready().map_err(GpsError::Serial)? {
                if self.serial.read(&mut byte).map_err(GpsError::Serial)? == 0 {
                    break;
                }
                buf[len] = byte[0];
                len += 1;
                if byte[0] == b'\n' {
                    return Ok(Some(len));
                }
                if len == buf.len() {
                    return Ok(None);
                }
            }

            if self.clock.elapsed_since(start) >= timeout_ms {
                return Ok(None);
            }
            core::hint::spin_loop();
        }
    }
}

impl<S, C> GpsSession<'_, S, C>
where
    S: Read + ReadReady + Write,
    C: Clock,
{
    /// Hot-restart the module and wait for its start-up messages
    ///
    /// Any partial line in the assembly buffer is discarded.
    pub fn diagnostics(&mut self) -> Result<DiagnosticReport, GpsError<S::Error>> {
        // Flush whatever is pending so only post-restart output is inspected
        let mut scratch = [0u8; 1];
        while self.serial.read_ready().map_err(GpsError::Serial)? {
            if self.serial.read(&mut scratch).map_err(GpsError::Serial)? == 0 {
                break;
            }
        }

        self.serial
            .write_all(MTK_HOT_RESTART.as_bytes())
            .map_err(GpsError::Serial)?;
        self.serial.write_all(b"\r\n").map_err(GpsError::Serial)?;
        self.serial.flush().map_err(GpsError::Serial)?;

        let mut report = DiagnosticReport::default();
        let mut line = [0u8; DIAG_LINE_LEN];

        for _ in 0..DIAG_MAX_RETRY {
            if report.passed() {
                break;
            }

            let Some(len) = self.get_next_line(&mut line, DIAG_TIMEOUT_MS)? else {
                continue;
            };
            let Some(start) = line[..len].iter().position(|&b| b == b'$') else {
                continue;
            };
            let msg = &line[start..len];

            if !report.init_confirmed && msg.starts_with(MTK_INIT_PREFIX.as_bytes()) {
                report.init_confirmed = true;
                continue;
            }
            if !report.startup_confirmed && msg.starts_with(MTK_SYS_PREFIX.as_bytes()) {
                report.startup_confirmed = true;
            }
        }

        info!("GPS type MTK: {}", report.init_confirmed);
        info!("GPS system startup: {}", report.startup_confirmed);

        self.reset_line();
        Ok(report)
    }
}
