//! Allocation-free NMEA 0183 pipeline for positioning receivers.
//!
//! Bytes from the receiver's serial line are fed one at a time into a
//! [`Receiver`](receiver/struct.Receiver.html). Complete sentences are
//! checksum-validated, dispatched to the *GGA* or *VTG* parser and folded
//! into a [`Snapshot`](state/struct.Snapshot.html) that also carries the
//! position projected onto a local planar frame.

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
extern crate arrayvec;
extern crate chrono;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub mod err;
#[macro_use]
mod macros;
pub mod checksum;
pub mod framer;
mod lexer;
pub mod parser;
pub mod port;
pub mod projection;
pub mod receiver;
pub mod state;

pub use err::{FrameError, ParseError, Rejection};
pub use framer::{RawSentence, StreamFramer};
pub use parser::{FixQuality, FixRecord, Sentence, VelocityRecord};
pub use port::{ByteSink, ByteSource, ReadSource};
pub use projection::{Angles, Meters, Projector};
pub use receiver::{Receiver, Stats};
pub use state::{PlanarPosition, ReceiverState, SharedSnapshot, Snapshot, Update};
