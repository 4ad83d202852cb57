//! Sentence dispatch for the *GGA* and *VTG* sentences of the *NMEA 0183*
//! protocol.

use crate::checksum;
use crate::err::ParseError;
use crate::framer::RawSentence;
use crate::lexer::Fields;

pub mod gga;
pub mod vtg;

pub use self::gga::{FixQuality, FixRecord};
pub use self::vtg::VelocityRecord;

/// The sentence types this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceType {
    Gga,
    Vtg,
}

impl SentenceType {
    /// Map a three character type tag, `None` for every other sentence.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"GGA" => Some(SentenceType::Gga),
            b"VTG" => Some(SentenceType::Vtg),
            _ => None,
        }
    }
}

/// A parsed sentence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sentence {
    Gga(FixRecord),
    Vtg(VelocityRecord),
}

impl Sentence {
    pub fn sentence_type(&self) -> SentenceType {
        match self {
            Sentence::Gga(_) => SentenceType::Gga,
            Sentence::Vtg(_) => SentenceType::Vtg,
        }
    }
}

/// Hand a checksum-valid sentence to the parser matching its type tag.
///
/// Sentence types other than GGA and VTG are not an error, they yield
/// `Ok(None)`.
pub fn dispatch(sentence: &RawSentence) -> Result<Option<Sentence>, ParseError> {
    let kind = match sentence.type_tag().and_then(SentenceType::from_tag) {
        Some(kind) => kind,
        None => return Ok(None),
    };
    let fields = Fields::new(sentence.payload());
    let parsed = match kind {
        SentenceType::Gga => Sentence::Gga(gga::parse(fields)?),
        SentenceType::Vtg => Sentence::Vtg(vtg::parse(fields)?),
    };
    Ok(Some(parsed))
}

/// Validate the checksum of `sentence`, then dispatch it.
pub fn parse_sentence(sentence: &RawSentence) -> Result<Option<Sentence>, ParseError> {
    checksum::check(sentence.as_bytes(), sentence.content_len())?;
    dispatch(sentence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line: &[u8]) -> RawSentence {
        RawSentence::new(line).unwrap()
    }

    #[test]
    fn dispatches_gga() {
        let sentence = raw(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47");
        let parsed = parse_sentence(&sentence).unwrap().unwrap();
        assert_eq!(parsed.sentence_type(), SentenceType::Gga);
        assert_matches!(parsed, Sentence::Gga(FixRecord { sat_count: 8, .. }));
    }

    #[test]
    fn dispatches_vtg_with_any_talker() {
        let sentence = raw(b"$GNVTG,,T,,M,0.018,N,0.033,K,D*31");
        assert_matches!(
            parse_sentence(&sentence),
            Ok(Some(Sentence::Vtg(VelocityRecord { faa_mode: Some('D'), .. })))
        );
    }

    #[test]
    fn unknown_types_are_a_no_op() {
        let sentence = raw(b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A");
        assert_matches!(parse_sentence(&sentence), Ok(None));
        let sentence = raw(b"$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*74");
        assert_matches!(dispatch(&sentence), Ok(None));
    }

    #[test]
    fn checksum_gates_parsing() {
        let sentence = raw(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*48");
        assert_matches!(
            parse_sentence(&sentence),
            Err(ParseError::InvalidChecksum(0x48, 0x47))
        );
    }

    #[test]
    fn incomplete_sentences_are_reported() {
        let sentence = raw(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4*7E");
        assert_matches!(parse_sentence(&sentence), Err(ParseError::Incomplete(9, 10)));
    }
}
