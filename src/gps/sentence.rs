//! Sentence tokenizer and GPS field store
//!
//! Validated sentences are split on `,` and selected tokens are copied
//! into fixed-width text slots. Nothing is converted to numbers: the record
//! keeps exactly what the receiver sent, truncated to each slot's width.

use heapless::{String, Vec};

use super::checksum::verify_sentence;
use crate::config::{field, GGA_TYPE, MAX_FIELDS, RMC_TYPE};

/// A tokenized sentence borrowing from the line buffer
///
/// Tokens are raw byte slices; only the ones that get stored are read as
/// text, so a stray non-ASCII byte elsewhere does not cost the sentence.
#[derive(Clone, Debug)]
pub struct Sentence<'a> {
    tokens: Vec<&'a [u8], MAX_FIELDS>,
}

impl<'a> Sentence<'a> {
    /// Split a sentence into comma-separated tokens
    ///
    /// The checksum suffix (`*HH`) is not part of any token. Tokens past
    /// [`MAX_FIELDS`] are dropped.
    #[must_use]
    pub fn tokenize(line: &'a [u8]) -> Self {
        let body = line
            .iter()
            .rposition(|&b| b == b'*')
            .map_or(line, |star| &line[..star]);

        let mut tokens = Vec::new();
        for token in body.split(|&b| b == b',') {
            if tokens.push(token).is_err() {
                break;
            }
        }
        Self { tokens }
    }

    /// Raw bytes of token `index`, empty when the sentence is shorter
    #[must_use]
    pub fn raw_field(&self, index: usize) -> &'a [u8] {
        self.tokens.get(index).copied().unwrap_or(&[])
    }

    /// Token `index` as text
    ///
    /// `""` when the sentence is shorter or the token is not valid UTF-8.
    #[must_use]
    pub fn field(&self, index: usize) -> &'a str {
        core::str::from_utf8(self.raw_field(index)).unwrap_or("")
    }

    /// Sentence type token, e.g. `$GPRMC`
    #[must_use]
    pub fn kind_token(&self) -> &'a str {
        self.field(0)
    }

    /// Number of tokens kept
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no token was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Sentence types understood by the field store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentenceKind {
    /// Recommended minimum navigation data (`$GPRMC`)
    Rmc,
    /// Fix data (`$GPGGA`)
    Gga,
    /// Any other sentence; validated but not stored
    Other,
}

impl SentenceKind {
    /// Classify a sentence type token
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            RMC_TYPE => Self::Rmc,
            GGA_TYPE => Self::Gga,
            _ => Self::Other,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SentenceKind {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Rmc => defmt::write!(f, "RMC"),
            Self::Gga => defmt::write!(f, "GGA"),
            Self::Other => defmt::write!(f, "other"),
        }
    }
}

/// Date and time split out of the RMC time and date fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DateTime {
    /// Hour (`hh`)
    pub hour: String<{ field::DATETIME_PART }>,
    /// Minute (`mm`)
    pub minute: String<{ field::DATETIME_PART }>,
    /// Second (`ss`)
    pub second: String<{ field::DATETIME_PART }>,
    /// Day of month (`dd`)
    pub day: String<{ field::DATETIME_PART }>,
    /// Month (`mm`)
    pub month: String<{ field::DATETIME_PART }>,
    /// Two-digit year (`yy`)
    pub year: String<{ field::DATETIME_PART }>,
}

impl DateTime {
    /// Derive from `hhmmss[.sss]` and `ddmmyy`
    ///
    /// Short inputs leave the missing parts empty.
    #[must_use]
    pub fn from_fields(utc: &str, date: &str) -> Self {
        let mut dt = Self::default();
        store(&mut dt.hour, pair(utc, 0));
        store(&mut dt.minute, pair(utc, 2));
        store(&mut dt.second, pair(utc, 4));
        store(&mut dt.day, pair(date, 0));
        store(&mut dt.month, pair(date, 2));
        store(&mut dt.year, pair(date, 4));
        dt
    }
}

/// Last known GPS fix, as text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GpsRecord {
    /// UTC time of fix
    pub utc: String<{ field::UTC }>,
    /// `A` = valid, `V` = warning
    pub status: String<{ field::STATUS }>,
    /// Latitude
    pub lat: String<{ field::LAT }>,
    /// Latitude hemisphere
    pub lat_hem: String<{ field::HEMISPHERE }>,
    /// Longitude
    pub lon: String<{ field::LON }>,
    /// Longitude hemisphere
    pub lon_hem: String<{ field::HEMISPHERE }>,
    /// Speed over ground, knots
    pub speed: String<{ field::SPEED }>,
    /// Course over ground, degrees
    pub course: String<{ field::COURSE }>,
    /// Date (`ddmmyy`)
    pub date: String<{ field::DATE }>,
    /// Token 10 of the RMC sentence (magnetic variation on most receivers)
    pub checksum: String<{ field::CHECKSUM }>,
    /// Fix quality indicator
    pub quality: String<{ field::QUALITY }>,
    /// Number of satellites in use
    pub num_sat: String<{ field::NUM_SAT }>,
    /// Horizontal dilution of precision
    pub precision: String<{ field::PRECISION }>,
    /// Altitude above mean sea level
    pub altitude: String<{ field::ALTITUDE }>,
    /// Date and time derived from `utc` and `date`
    pub datetime: DateTime,
}

impl GpsRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, tokenize and store one line (without CR/LF)
    ///
    /// Returns `None` and leaves the record untouched when the frame or
    /// checksum is bad.
    pub fn ingest(&mut self, line: &[u8]) -> Option<SentenceKind> {
        if !verify_sentence(line) {
            return None;
        }
        Some(self.apply(&Sentence::tokenize(line)))
    }

    /// Store the fields of a tokenized sentence
    pub fn apply(&mut self, sentence: &Sentence<'_>) -> SentenceKind {
        let kind = SentenceKind::from_token(sentence.kind_token());
        match kind {
            SentenceKind::Rmc => {
                self.apply_rmc(sentence);
                self.datetime = DateTime::from_fields(&self.utc, &self.date);
            }
            SentenceKind::Gga => self.apply_gga(sentence),
            SentenceKind::Other => {}
        }
        kind
    }

    fn apply_rmc(&mut self, s: &Sentence<'_>) {
        store(&mut self.utc, s.field(1));
        store(&mut self.status, s.field(2));
        store(&mut self.lat, s.field(3));
        store(&mut self.lat_hem, s.field(4));
        store(&mut self.lon, s.field(5));
        store(&mut self.lon_hem, s.field(6));
        store(&mut self.speed, s.field(7));
        store(&mut self.course, s.field(8));
        store(&mut self.date, s.field(9));
        store(&mut self.checksum, s.field(10));
    }

    fn apply_gga(&mut self, s: &Sentence<'_>) {
        store(&mut self.quality, s.field(6));
        store(&mut self.num_sat, s.field(7));
        store(&mut self.precision, s.field(8));
        store(&mut self.altitude, s.field(9));
    }
}

/// Clear `slot`, then copy as much of `value` as fits
fn store<const N: usize>(slot: &mut String<N>, value: &str) {
    slot.clear();
    for c in value.chars() {
        if slot.push(c).is_err() {
            break;
        }
    }
}

/// Up to two characters of `s` starting at byte `start`
fn pair(s: &str, start: usize) -> &str {
    let end = (start + 2).min(s.len());
    s.get(start..end).unwrap_or("")
}
