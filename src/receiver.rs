//! Drives the whole pipeline: frame, validate, parse, aggregate.

use std::io;
use std::sync::Arc;

use crate::err::{ParseError, Rejection};
use crate::framer::StreamFramer;
use crate::parser;
use crate::port::{ByteSink, ByteSource};
use crate::projection::Projector;
use crate::state::{ReceiverState, SharedSnapshot, Snapshot, Update};

/// Counters of what happened to the framed sentences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Sentences that were framed successfully.
    pub sentences: u32,
    pub updates: u32,
    pub framing_errors: u32,
    pub checksum_errors: u32,
    pub incomplete: u32,
    /// Valid sentences of a type other than GGA or VTG.
    pub unrecognized: u32,
    /// GGA sentences without a position.
    pub no_fix: u32,
}

impl Stats {
    fn record(&mut self, rejection: &Rejection) {
        let counter = match rejection {
            Rejection::Parse(ParseError::Frame(_)) => &mut self.framing_errors,
            Rejection::Parse(ParseError::Incomplete(..)) => &mut self.incomplete,
            Rejection::Parse(_) => &mut self.checksum_errors,
            Rejection::NoFix => &mut self.no_fix,
        };
        *counter = counter.wrapping_add(1);
    }
}

/// A positioning receiver fed byte by byte.
///
/// Owns the framer and the aggregate state; nothing in here blocks or
/// allocates.
#[derive(Debug, Default)]
pub struct Receiver {
    framer: StreamFramer,
    state: ReceiverState,
    projector: Projector,
    stats: Stats,
    shared: Option<Arc<SharedSnapshot>>,
}

impl Receiver {
    pub fn new() -> Self {
        Receiver::default()
    }

    /// Use `projector` for the planar position instead of the default earth.
    pub fn with_projector(projector: Projector) -> Self {
        Receiver {
            projector,
            ..Receiver::default()
        }
    }

    /// Feed one byte from the receiver.
    ///
    /// Returns `None` until a sentence is complete. A complete sentence either
    /// updated the state, or it was rejected and the state is unchanged.
    /// Rejections are never fatal, the next sentence is processed normally.
    pub fn feed(&mut self, byte: u8) -> Option<Result<Update, Rejection>> {
        let outcome = self.process(byte)?;
        match outcome {
            Ok(update) => {
                self.stats.updates = self.stats.updates.wrapping_add(1);
                if let Some(ref shared) = self.shared {
                    shared.publish(self.state.snapshot());
                }
                debug!("{:?} accepted: {:?}", update, self.state.snapshot());
            }
            Err(ref rejection) => {
                self.stats.record(rejection);
                match rejection {
                    Rejection::Parse(ParseError::Frame(_)) | Rejection::Parse(ParseError::Incomplete(..)) => {
                        debug!("{}", rejection)
                    }
                    Rejection::Parse(_) => warn!("{}", rejection),
                    Rejection::NoFix => trace!("{}", rejection),
                }
            }
        }
        Some(outcome)
    }

    fn process(&mut self, byte: u8) -> Option<Result<Update, Rejection>> {
        let raw = try_some!(self.framer.push(byte).transpose())?;
        self.stats.sentences = self.stats.sentences.wrapping_add(1);
        trace!("framed {}", raw);

        let sentence = match try_some!(parser::parse_sentence(&raw)) {
            Some(sentence) => sentence,
            None => {
                self.stats.unrecognized = self.stats.unrecognized.wrapping_add(1);
                trace!("ignoring {}", raw);
                return None;
            }
        };
        Some(self.state.apply(&sentence, &self.projector))
    }

    /// Poll `source` for a single byte and feed it.
    ///
    /// Returns `Ok(Some(_))` when that byte completed an accepted sentence.
    /// Only I/O errors of the source are surfaced as errors.
    pub fn poll<S: ByteSource>(&mut self, source: &mut S) -> io::Result<Option<Update>> {
        let byte = match source.read_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };
        Ok(self.feed(byte).and_then(Result::ok))
    }

    /// Relay correction data (e.g. RTCM from an NTRIP caster) to the
    /// receiver.
    pub fn forward_corrections<W: ByteSink>(&self, sink: &mut W, data: &[u8]) -> io::Result<()> {
        trace!("forwarding {} bytes of correction data", data.len());
        sink.forward(data)
    }

    /// A handle for readers in other execution contexts.
    ///
    /// Every accepted sentence is published to it from then on. The handle
    /// keeps its own fresh flag, independent of [`take_fresh`].
    ///
    /// [`take_fresh`]: #method.take_fresh
    pub fn share(&mut self) -> Arc<SharedSnapshot> {
        let state = &self.state;
        Arc::clone(self.shared.get_or_insert_with(|| {
            let shared = SharedSnapshot::new();
            shared.publish(state.snapshot());
            Arc::new(shared)
        }))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// The snapshot, if it changed since the last call.
    pub fn take_fresh(&mut self) -> Option<Snapshot> {
        self.state.take_fresh()
    }

    pub fn state(&self) -> &ReceiverState {
        &self.state
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Drop a partially received sentence, e.g. after reopening the port.
    pub fn resync(&mut self) {
        self.framer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::FrameError;
    use std::collections::VecDeque;

    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
    const VTG: &[u8] = b"$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25\r\n";

    fn feed_all(receiver: &mut Receiver, bytes: &[u8]) -> Vec<Result<Update, Rejection>> {
        bytes.iter().filter_map(|&b| receiver.feed(b)).collect()
    }

    #[test]
    fn accepts_fix_and_velocity() {
        let mut receiver = Receiver::new();
        assert_eq!(feed_all(&mut receiver, GGA), vec![Ok(Update::Fix)]);
        assert_eq!(feed_all(&mut receiver, VTG), vec![Ok(Update::Velocity)]);

        let snapshot = receiver.take_fresh().unwrap();
        assert_eq!(snapshot.sat_count, 8);
        assert_eq!(snapshot.speed_knots, 5.5);
        assert!(receiver.take_fresh().is_none());
        assert_eq!(
            receiver.stats(),
            Stats {
                sentences: 2,
                updates: 2,
                ..Stats::default()
            }
        );
    }

    #[test]
    fn counts_rejections() {
        let mut receiver = Receiver::new();
        let input: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*48\n\
            $GPGGA,123519\n\
            $GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4*7E\n\
            $GPGGA,123519,4807.038,N,0.0,E,1,08,0.9,545.4,M,46.9,M,,*45\n\
            $GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\n";
        let out = feed_all(&mut receiver, input);
        assert_eq!(out.len(), 4);
        assert_matches!(out[0], Err(Rejection::Parse(ParseError::InvalidChecksum(0x48, 0x47))));
        assert_matches!(out[1], Err(Rejection::Parse(ParseError::Frame(FrameError::MissingChecksumMarker))));
        assert_matches!(out[2], Err(Rejection::Parse(ParseError::Incomplete(9, 10))));
        assert_matches!(out[3], Err(Rejection::NoFix));

        assert_eq!(
            receiver.stats(),
            Stats {
                sentences: 4,
                updates: 0,
                framing_errors: 1,
                checksum_errors: 1,
                incomplete: 1,
                unrecognized: 1,
                no_fix: 1,
            }
        );
        assert_eq!(receiver.snapshot(), Snapshot::default());
    }

    #[test]
    fn polls_one_byte_at_a_time() {
        let mut receiver = Receiver::new();
        let mut source: VecDeque<u8> = GGA.iter().cloned().collect();
        let mut updates = Vec::new();
        let mut polls = 0;
        while !source.is_empty() {
            polls += 1;
            if let Some(update) = receiver.poll(&mut source).unwrap() {
                updates.push(update);
            }
        }
        assert_eq!(polls, GGA.len());
        assert_eq!(updates, vec![Update::Fix]);
        assert_eq!(receiver.poll(&mut source).unwrap(), None);
    }

    #[test]
    fn coordinates_are_published_as_transmitted() {
        let mut receiver = Receiver::new();
        feed_all(&mut receiver, GGA);
        let snapshot = receiver.snapshot();
        assert_eq!(snapshot.latitude, 4807.038);
        assert_eq!(snapshot.longitude, -1131.0);
        let expected = Projector::default().angle_to_meters(4807.038, -1131.0);
        assert_eq!(snapshot.position.east, expected.x);
    }

    #[test]
    fn shared_handle_sees_every_update() {
        let mut receiver = Receiver::new();
        let shared = receiver.share();
        assert!(shared.take_fresh().is_none());

        feed_all(&mut receiver, GGA);
        assert_eq!(shared.read().sat_count, 8);
        assert!(receiver.take_fresh().is_some());
        // consuming on the receiver does not consume the shared copy
        assert_eq!(shared.take_fresh().map(|s| s.sat_count), Some(8));
        assert!(shared.take_fresh().is_none());

        feed_all(&mut receiver, VTG);
        let snapshot = shared.take_fresh().unwrap();
        assert_eq!(snapshot.speed_knots, 5.5);
        assert_eq!(snapshot.latitude, 4807.038);
        assert!(Arc::ptr_eq(&shared, &receiver.share()));
    }

    #[test]
    fn custom_projector() {
        let projector = Projector::new(1.0);
        let mut receiver = Receiver::with_projector(projector);
        feed_all(&mut receiver, GGA);
        let snapshot = receiver.snapshot();
        let expected = projector.angle_to_meters(snapshot.latitude, snapshot.longitude);
        assert_eq!(snapshot.position.east, expected.x);
        assert_eq!(receiver.projector().radius(), 1.0);
    }

    #[test]
    fn resync_drops_partial_sentence() {
        let mut receiver = Receiver::new();
        assert!(feed_all(&mut receiver, &GGA[..20]).is_empty());
        receiver.resync();
        assert!(feed_all(&mut receiver, &GGA[20..]).is_empty());
        assert_eq!(receiver.stats(), Stats::default());
    }

    #[test]
    fn forwards_corrections() {
        let receiver = Receiver::new();
        let mut sink = Vec::new();
        receiver.forward_corrections(&mut sink, b"\xd3\x00\x00").unwrap();
        assert_eq!(sink, b"\xd3\x00\x00".to_vec());
    }
}
