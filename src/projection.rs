//! Spherical Mercator projection between geodetic angles and a planar,
//! metric frame.

use std::f64::consts::PI;

/// Earth's radius in meters as used by the projection.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// A point of the planar frame, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Meters {
    pub x: f64,
    pub y: f64,
}

/// Geodetic angles in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angles {
    pub latitude: f64,
    pub longitude: f64,
}

/// Forward and inverse projection around a sphere of the given radius.
///
/// Latitudes have to stay clear of the poles: nothing is clamped and the
/// result at `|latitude| >= 90` is meaningless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    radius: f64,
}

impl Default for Projector {
    fn default() -> Self {
        Projector::new(EARTH_RADIUS)
    }
}

impl Projector {
    pub const fn new(radius: f64) -> Self {
        Projector { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Half of the equator, the extent of the frame along x.
    #[inline]
    fn origin(&self) -> f64 {
        PI * self.radius
    }

    pub fn angle_to_meters(&self, latitude: f64, longitude: f64) -> Meters {
        let x = longitude * self.origin() / 180.0;
        let y = ((90.0 + latitude) * PI / 360.0).tan().ln() / (PI / 180.0);
        Meters {
            x,
            y: y * self.origin() / 180.0,
        }
    }

    pub fn meters_to_angles(&self, x: f64, y: f64) -> Angles {
        let longitude = x / self.origin() * 180.0;
        let latitude = y / self.origin() * 180.0;
        let latitude = 180.0 / PI * (2.0 * (latitude * PI / 180.0).exp().atan() - PI / 2.0);
        Angles {
            latitude,
            longitude,
        }
    }
}

/// [`Projector::angle_to_meters`](struct.Projector.html#method.angle_to_meters)
/// with the default earth radius.
pub fn angle_to_meters(latitude: f64, longitude: f64) -> Meters {
    Projector::default().angle_to_meters(latitude, longitude)
}

/// [`Projector::meters_to_angles`](struct.Projector.html#method.meters_to_angles)
/// with the default earth radius.
pub fn meters_to_angles(x: f64, y: f64) -> Angles {
    Projector::default().meters_to_angles(x, y)
}
