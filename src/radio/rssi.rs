//! RSSI to dBm conversion
//!
//! Straight line through two points read off the receiver's RSSI-vs-input
//! power curve. Values outside the calibration points extrapolate.

use crate::config::{RSSI_HIGH_DBM, RSSI_HIGH_RAW, RSSI_LOW_DBM, RSSI_LOW_RAW};

/// Approximate input power in dBm for a raw RSSI reading
///
/// Integer interpolation; division truncates toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn rssi_to_dbm(raw: u8) -> i16 {
    let x = raw as i32;
    let dbm = (x - RSSI_LOW_RAW) * (RSSI_HIGH_DBM - RSSI_LOW_DBM) / (RSSI_HIGH_RAW - RSSI_LOW_RAW)
        + RSSI_LOW_DBM;
    // Range is -121..=3 for any u8 input
    dbm as i16
}
