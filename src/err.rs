use std::error::Error;

quick_error! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum FrameError {
        Overflow(capacity: usize) {
            description("Sentence overflow")
            display("Sentence longer than {} bytes, dropped until the next '$'", capacity)
        }
        MissingChecksumMarker {
            description("Missing checksum marker")
            display("Line terminator without a '*' three characters before it")
        }
    }
}

quick_error! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum ParseError {
        Frame(err: FrameError) {
            from()
            description(err.description())
            display("Could not parse due to a framing error: {}", err)
            cause(err)
        }
        MissingChecksumMarker {
            description("Missing checksum marker")
            display("Sentence does not carry a '*' at its checksum position")
        }
        MalformedChecksum {
            description("Malformed checksum")
            display("Checksum trailer is not two hexadecimal digits")
        }
        InvalidChecksum(expected: u8, actual: u8) {
            description("Invalid checksum")
            display("Expected checksum \"{:02X}\", found checksum \"{:02X}\"", expected, actual)
        }
        MalformedAddress {
            description("Malformed address field")
            display("Sentence does not start with '$' followed by talker id and type tag")
        }
        Incomplete(found: usize, required: usize) {
            description("Incomplete sentence")
            display("Sentence carries {} fields, {} are required", found, required)
        }
    }
}

quick_error! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum Rejection {
        Parse(err: ParseError) {
            from()
            description(err.description())
            display("Sentence rejected: {}", err)
            cause(err)
        }
        NoFix {
            description("No fix")
            display("Fix sentence carries a zero longitude, no position available yet")
        }
    }
}

impl From<FrameError> for Rejection {
    fn from(err: FrameError) -> Self {
        Rejection::Parse(err.into())
    }
}

// Quick error can't handle from for tuples
impl From<(u8, u8)> for ParseError {
    fn from((expected, actual): (u8, u8)) -> Self {
        ParseError::InvalidChecksum(expected, actual)
    }
}
