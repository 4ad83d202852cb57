//! The *VTG* sentence: track made good and ground speed.

use crate::err::ParseError;
use crate::lexer::{self, Fields};

/// A VTG sentence is only usable with all fields up to the mode indicator.
pub const VTG_FIELDS: usize = 9;

/// A parsed VTG sentence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityRecord {
    /// Track angle relative to true north, degrees.
    pub track_true: f64,
    /// Track angle relative to magnetic north, zero when not transmitted.
    pub track_magnetic: f64,
    pub speed_knots: f64,
    pub speed_kmh: f64,
    pub faa_mode: Option<char>,
}

impl VelocityRecord {
    /// Ground speed in meters per second.
    pub fn speed_mps(&self) -> f64 {
        self.speed_kmh / 3.6
    }
}

/// Parse the fields of a VTG sentence.
pub(crate) fn parse(fields: Fields) -> Result<VelocityRecord, ParseError> {
    let mut velocity = VelocityRecord::default();
    let mut count = 0;

    for (index, field) in fields.enumerate() {
        count = index + 1;
        match count {
            1 => velocity.track_true = lexer::decimal(field),
            3 => velocity.track_magnetic = lexer::decimal(field),
            5 => velocity.speed_knots = lexer::decimal(field),
            7 => velocity.speed_kmh = lexer::decimal(field),
            9 => velocity.faa_mode = lexer::indicator(field),
            _ => (),
        }
    }

    if count != VTG_FIELDS {
        return Err(ParseError::Incomplete(count, VTG_FIELDS));
    }
    Ok(velocity)
}
