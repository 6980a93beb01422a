//! NMEA frame and checksum validation
//!
//! A sentence is `$<body>*<HH>` where `HH` is the XOR of every body byte,
//! written as two uppercase hex digits.

/// Running XOR of `bytes`
#[must_use]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, &b| acc ^ b)
}

/// Value of an uppercase hex digit
///
/// Lowercase digits are rejected, matching what NMEA talkers emit.
#[must_use]
pub const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Verify framing and checksum of a sentence
///
/// `line` must not include the trailing CR/LF.
#[must_use]
pub fn verify_sentence(line: &[u8]) -> bool {
    let len = line.len();

    // Shortest frame is "$*HH"
    if len < 4 || line[0] != b'$' || line[len - 3] != b'*' {
        return false;
    }

    let (Some(hi), Some(lo)) = (hex_digit(line[len - 2]), hex_digit(line[len - 1])) else {
        return false;
    };

    checksum(&line[1..len - 3]) == (hi << 4) | lo
}
