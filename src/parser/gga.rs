//! The *GGA* sentence: time, position and quality of a fix.

use chrono::NaiveTime;

use crate::err::ParseError;
use crate::lexer::{self, Fields};

/// A GGA sentence is usable from this many fields on.
pub const GGA_MIN_FIELDS: usize = 10;
/// Field count of a GGA sentence carrying the FAA mode indicator.
pub const GGA_FIELDS_WITH_MODE: usize = 15;

/// Indicator of the quality of gps data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixQuality {
    FixNotAvailable,
    GpsFix,
    DifferentialGpsFix,
    PpsFix,
    RealTimeKinematic,
    FloatRtk,
    Estimated,
    ManualInputMode,
    SimulationMode,
    /// A code outside of `0..=8`.
    Other(u8),
}

impl FixQuality {
    /// The numeric code as transmitted.
    pub fn code(self) -> u8 {
        match self {
            FixQuality::FixNotAvailable => 0,
            FixQuality::GpsFix => 1,
            FixQuality::DifferentialGpsFix => 2,
            FixQuality::PpsFix => 3,
            FixQuality::RealTimeKinematic => 4,
            FixQuality::FloatRtk => 5,
            FixQuality::Estimated => 6,
            FixQuality::ManualInputMode => 7,
            FixQuality::SimulationMode => 8,
            FixQuality::Other(code) => code,
        }
    }
}

impl From<u8> for FixQuality {
    fn from(code: u8) -> Self {
        match code {
            0 => FixQuality::FixNotAvailable,
            1 => FixQuality::GpsFix,
            2 => FixQuality::DifferentialGpsFix,
            3 => FixQuality::PpsFix,
            4 => FixQuality::RealTimeKinematic,
            5 => FixQuality::FloatRtk,
            6 => FixQuality::Estimated,
            7 => FixQuality::ManualInputMode,
            8 => FixQuality::SimulationMode,
            other => FixQuality::Other(other),
        }
    }
}

impl Default for FixQuality {
    fn default() -> Self {
        FixQuality::FixNotAvailable
    }
}

/// A parsed GGA sentence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixRecord {
    /// Time of day as transmitted, `hhmmss.ss`.
    pub time: f64,
    /// Universal Time Coordinated, if the time field is well-formed.
    pub utc: Option<NaiveTime>,
    /// Latitude as transmitted (`ddmm.mmmm`), positive only for the `N`
    /// hemisphere.
    pub latitude: f64,
    /// Longitude as transmitted (`dddmm.mmmm`).
    /// Negative for the `E` hemisphere, positive otherwise. The planar frame
    /// built on top of this is oriented accordingly.
    pub longitude: f64,
    pub fix_quality: FixQuality,
    /// Number of satellites in use.
    pub sat_count: u8,
    /// Horizontal dilution of precision.
    pub hdop: f64,
    /// Antenna altitude above/below mean-sea-level (geoid) in meters.
    pub altitude: f64,
    /// Difference between the WGS-84 ellipsoid and mean-sea-level in meters.
    pub geoid_separation: f64,
    /// Age of differential data in seconds, zero when not transmitted.
    pub dgps_age: f64,
    /// Differential reference station id, zero when not transmitted.
    pub dgps_station: u16,
    /// FAA mode indicator, only present on 15 field sentences.
    pub faa_mode: Option<char>,
}

impl FixRecord {
    /// A zero longitude is what receivers send before they have a fix.
    pub fn has_position(&self) -> bool {
        self.longitude != 0.0
    }
}

/// Parse the fields of a GGA sentence.
pub(crate) fn parse(fields: Fields) -> Result<FixRecord, ParseError> {
    let mut fix = FixRecord::default();
    let mut mode = None;
    let mut count = 0;

    for (index, field) in fields.enumerate() {
        count = index + 1;
        match count {
            1 => {
                fix.time = lexer::decimal(field);
                fix.utc = lexer::utc(field);
            }
            2 => fix.latitude = lexer::decimal(field),
            3 => {
                if field.first() != Some(&b'N') {
                    fix.latitude *= -1.0;
                }
            }
            4 => fix.longitude = lexer::decimal(field),
            5 => {
                if field.first() == Some(&b'E') {
                    fix.longitude *= -1.0;
                }
            }
            6 => fix.fix_quality = FixQuality::from(lexer::integer::<u8>(field)),
            7 => fix.sat_count = lexer::integer(field),
            8 => fix.hdop = lexer::decimal(field),
            9 => fix.altitude = lexer::decimal(field),
            11 => fix.geoid_separation = lexer::decimal(field),
            13 => fix.dgps_age = lexer::decimal(field),
            14 => fix.dgps_station = lexer::integer(field),
            15 => mode = lexer::indicator(field),
            // units and anything past the mode indicator
            _ => (),
        }
    }

    if count < GGA_MIN_FIELDS {
        return Err(ParseError::Incomplete(count, GGA_MIN_FIELDS));
    }
    if count == GGA_FIELDS_WITH_MODE {
        fix.faa_mode = mode;
    }
    Ok(fix)
}
