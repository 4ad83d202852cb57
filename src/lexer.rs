use chrono::NaiveTime;

use std::str::{self, FromStr};

const FIELD_SEPARATOR: u8 = b',';
const UTC_FORMAT: &str = "%H%M%S%.f";

/// Splits the payload of a sentence (the bytes between `$` and `*`) into
/// its comma separated fields.
///
/// The address field (talker id and type tag) is skipped, so the first item
/// is field 1. Every item is a sub-slice of the input, nothing is copied.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Fields<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        let rest = payload
            .iter()
            .position(|&b| b == FIELD_SEPARATOR)
            .map(|i| &payload[i + 1..]);
        Fields { rest }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.iter().position(|&b| b == FIELD_SEPARATOR) {
            Some(end) => {
                self.rest = Some(&rest[end + 1..]);
                Some(&rest[..end])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Parse a field as `T`, `None` if empty or malformed.
#[inline]
pub fn number<T: FromStr>(field: &[u8]) -> Option<T> {
    str::from_utf8(field).ok()?.trim().parse().ok()
}

/// Decimal field, zero if empty or malformed.
#[inline]
pub fn decimal(field: &[u8]) -> f64 {
    number(field).unwrap_or(0.0)
}

/// Integer field, zero if empty, malformed or out of range.
#[inline]
pub fn integer<T: FromStr + Default>(field: &[u8]) -> T {
    number(field).unwrap_or_default()
}

/// First character of a single character field.
#[inline]
pub fn indicator(field: &[u8]) -> Option<char> {
    field.first().map(|&b| char::from(b))
}

/// Parses a `hhmmss.sss` field as time of day.
pub fn utc(field: &[u8]) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(str::from_utf8(field).ok()?, UTC_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_fields_after_address() {
        let fields: Vec<&[u8]> = Fields::new(b"GPVTG,054.7,T,,M").collect();
        assert_eq!(fields, vec![&b"054.7"[..], &b"T"[..], &b""[..], &b"M"[..]]);
    }

    #[test]
    fn trailing_separator_yields_empty_field() {
        let fields: Vec<&[u8]> = Fields::new(b"GPGGA,1,,").collect();
        assert_eq!(fields, vec![&b"1"[..], &b""[..], &b""[..]]);
    }

    #[test]
    fn address_only_has_no_fields() {
        assert_eq!(Fields::new(b"GPGGA").count(), 0);
        assert_eq!(Fields::new(b"").count(), 0);
    }

    #[test]
    fn lenient_numbers() {
        assert_eq!(decimal(b"545.4"), 545.4);
        assert_eq!(decimal(b"-12.5"), -12.5);
        assert_eq!(decimal(b""), 0.0);
        assert_eq!(decimal(b"M"), 0.0);
        assert_eq!(integer::<u8>(b"08"), 8);
        assert_eq!(integer::<u8>(b"300"), 0);
        assert_eq!(integer::<u16>(b"0042"), 42);
        assert_eq!(number::<f64>(b""), None);
    }

    #[test]
    fn coordinates_are_read_as_plain_decimals() {
        assert_eq!(decimal(b"4807.038"), 4807.038);
        assert_eq!(decimal(b"01131.000"), 1131.0);
        assert_eq!(decimal(b"00000.000"), 0.0);
    }

    #[test]
    fn indicators() {
        assert_eq!(indicator(b"A"), Some('A'));
        assert_eq!(indicator(b""), None);
    }

    #[test]
    fn utc_time() {
        assert_eq!(utc(b"123519"), NaiveTime::from_hms_opt(12, 35, 19));
        assert_eq!(
            utc(b"155338.50"),
            NaiveTime::from_hms_milli_opt(15, 53, 38, 500)
        );
        assert_eq!(utc(b""), None);
        assert_eq!(utc(b"256199"), None);
    }
}
