//! The aggregate receiver state and how it is published.
//!
//! Every accepted sentence produces a complete new [`Snapshot`] which then
//! replaces the previous one in a single assignment. Readers in another
//! execution context go through [`SharedSnapshot`], so a snapshot is always
//! read as a whole and never as a mix of two fixes.
//!
//! [`Snapshot`]: struct.Snapshot.html
//! [`SharedSnapshot`]: struct.SharedSnapshot.html

use chrono::NaiveTime;
use std::sync::{PoisonError, RwLock};

use crate::err::Rejection;
use crate::parser::{FixQuality, FixRecord, Sentence, VelocityRecord};
use crate::projection::{Meters, Projector};

/// Position in the local planar frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanarPosition {
    /// Projected x, meters.
    pub east: f64,
    /// Projected y, meters.
    pub north: f64,
    pub altitude: f64,
}

impl PlanarPosition {
    fn project(projector: &Projector, latitude: f64, longitude: f64, altitude: f64) -> Self {
        let Meters { x, y } = projector.angle_to_meters(latitude, longitude);
        PlanarPosition {
            east: x,
            north: y,
            altitude,
        }
    }

    /// `[east, altitude, north]`, the axis order of the firmware's vectors.
    pub fn as_array(&self) -> [f64; 3] {
        [self.east, self.altitude, self.north]
    }
}

/// What an accepted sentence changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Position, time and quality from a GGA sentence.
    Fix,
    /// Speed from a VTG sentence.
    Velocity,
}

/// The latest accepted fix and velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Time of day of the fix, `hhmmss.ss`.
    pub time: f64,
    pub utc: Option<NaiveTime>,
    pub fix_quality: FixQuality,
    pub sat_count: u8,
    pub hdop: f64,
    pub dgps_age: f64,
    /// Ground speed in m/s.
    pub speed: f64,
    pub speed_knots: f64,
    pub position: PlanarPosition,
    /// Set on every update, cleared once the snapshot was consumed.
    pub fresh: bool,
}

impl Snapshot {
    /// Project the current latitude and longitude.
    pub fn position_meters(&self, projector: &Projector) -> Meters {
        projector.angle_to_meters(self.latitude, self.longitude)
    }

    fn with_fix(&self, fix: &FixRecord, projector: &Projector) -> Snapshot {
        Snapshot {
            latitude: fix.latitude,
            longitude: fix.longitude,
            altitude: fix.altitude,
            time: fix.time,
            utc: fix.utc,
            fix_quality: fix.fix_quality,
            sat_count: fix.sat_count,
            hdop: fix.hdop,
            dgps_age: fix.dgps_age,
            position: PlanarPosition::project(projector, fix.latitude, fix.longitude, fix.altitude),
            fresh: true,
            ..*self
        }
    }

    fn with_velocity(&self, velocity: &VelocityRecord) -> Snapshot {
        Snapshot {
            speed: velocity.speed_mps(),
            speed_knots: velocity.speed_knots,
            fresh: true,
            ..*self
        }
    }
}

/// Single-writer owner of the current snapshot.
#[derive(Debug, Clone, Default)]
pub struct ReceiverState {
    current: Snapshot,
}

impl ReceiverState {
    pub fn new() -> Self {
        ReceiverState::default()
    }

    /// Fold a parsed sentence into the state.
    ///
    /// A fix with a zero longitude is rejected with `Rejection::NoFix` and
    /// leaves the state untouched.
    pub fn apply(&mut self, sentence: &Sentence, projector: &Projector) -> Result<Update, Rejection> {
        let (next, update) = match sentence {
            Sentence::Gga(fix) => {
                if !fix.has_position() {
                    return Err(Rejection::NoFix);
                }
                (self.current.with_fix(fix, projector), Update::Fix)
            }
            Sentence::Vtg(velocity) => (self.current.with_velocity(velocity), Update::Velocity),
        };
        self.current = next;
        Ok(update)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.current
    }

    pub fn is_fresh(&self) -> bool {
        self.current.fresh
    }

    /// Return the snapshot if it was updated since the last call, and mark
    /// it consumed.
    pub fn take_fresh(&mut self) -> Option<Snapshot> {
        if !self.current.fresh {
            return None;
        }
        let snapshot = self.current;
        self.current.fresh = false;
        Some(snapshot)
    }
}

/// A snapshot shared with readers in other execution contexts.
///
/// The writer publishes complete snapshots, readers always get a copy of one
/// complete snapshot. `Receiver::share` hands out a handle that is published
/// to after every accepted sentence; a standalone handle has to be fed with
/// `publish` after each `Ok` from `ReceiverState::apply`.
///
/// The fresh flag is the one of the last published snapshot and is consumed
/// independently of the writer's own.
#[derive(Debug, Default)]
pub struct SharedSnapshot {
    inner: RwLock<Snapshot>,
}

impl SharedSnapshot {
    pub fn new() -> Self {
        SharedSnapshot::default()
    }

    pub fn publish(&self, snapshot: Snapshot) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = snapshot;
    }

    pub fn read(&self) -> Snapshot {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Like [`ReceiverState::take_fresh`], for a reader that consumes
    /// updates.
    ///
    /// [`ReceiverState::take_fresh`]: struct.ReceiverState.html#method.take_fresh
    pub fn take_fresh(&self) -> Option<Snapshot> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !guard.fresh {
            return None;
        }
        let snapshot = *guard;
        guard.fresh = false;
        Some(snapshot)
    }
}
