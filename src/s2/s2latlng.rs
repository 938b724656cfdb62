use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::S2Error;
use crate::s1::S1Angle;
use crate::s2::s2point::S2Point;
use crate::util::math::{remainder, Vector2};

/// An S2LatLng represents a point on the unit sphere as a pair of
/// latitude-longitude coordinates. Like the rest of the "geometry on the
/// sphere" classes, these are immutable values.
///
/// The latitude and longitude are stored in radians. A coordinate is valid
/// if the latitude is in [-Pi/2, Pi/2] and the longitude is in [-Pi, Pi];
/// use `normalized()` to bring an arbitrary pair into this range.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct S2LatLng {
    // Stored as (lat, lng).
    coords: Vector2<f64>,
}

impl S2LatLng {
    pub fn new(lat: S1Angle, lng: S1Angle) -> S2LatLng {
        S2LatLng::from_radians(lat.radians(), lng.radians())
    }

    pub fn from_radians(lat_radians: f64, lng_radians: f64) -> S2LatLng {
        S2LatLng {
            coords: Vector2::new(lat_radians, lng_radians),
        }
    }

    pub fn from_degrees(lat_degrees: f64, lng_degrees: f64) -> S2LatLng {
        S2LatLng::new(
            S1Angle::from_degrees(lat_degrees),
            S1Angle::from_degrees(lng_degrees),
        )
    }

    /// Convert a direction vector (not necessarily unit length) to an
    /// S2LatLng.
    pub fn from_point(p: &S2Point) -> S2LatLng {
        let result = S2LatLng::from_radians(S2LatLng::latitude(p), S2LatLng::longitude(p));
        debug_assert!(result.is_valid());
        result
    }

    /// The latitude of the given direction vector, in radians.
    pub fn latitude(p: &S2Point) -> f64 {
        // We use atan2 rather than asin because the input vector is not
        // necessarily unit length, and atan2 is much more accurate than
        // asin near the poles.
        f64::atan2(p.z(), (p.x() * p.x() + p.y() * p.y()).sqrt())
    }

    /// The longitude of the given direction vector, in radians.
    pub fn longitude(p: &S2Point) -> f64 {
        // The x- and y-coordinates may be zero, in which case atan2 returns
        // zero and the longitude of the poles comes out as zero as well.
        f64::atan2(p.y(), p.x())
    }

    pub fn lat(&self) -> S1Angle {
        S1Angle::from_radians(self.coords.x())
    }

    pub fn lng(&self) -> S1Angle {
        S1Angle::from_radians(self.coords.y())
    }

    /// Return true if the latitude is between -90 and 90 degrees inclusive
    /// and the longitude is between -180 and 180 degrees inclusive.
    pub fn is_valid(&self) -> bool {
        self.lat().radians().abs() <= PI / 2.0 && self.lng().radians().abs() <= PI
    }

    /// Clamps the latitude to the range [-90, 90] degrees, and reduces the
    /// longitude to the range [-180, 180] degrees.
    pub fn normalized(&self) -> S2LatLng {
        S2LatLng::from_radians(
            self.lat().radians().clamp(-PI / 2.0, PI / 2.0),
            remainder(self.lng().radians(), 2.0 * PI),
        )
    }

    /// Like `to_point`, but reports an out-of-range coordinate as an error
    /// instead of debug-asserting. Use this on untrusted input; `to_point`
    /// together with `normalized()` is the usual path.
    pub fn try_to_point(&self) -> Result<S2Point, S2Error> {
        if !self.is_valid() {
            return Err(S2Error::InvalidCoordinate(
                self.lat().radians(),
                self.lng().radians(),
            ));
        }
        Ok(self.to_point())
    }

    /// Converts to a unit-length direction vector. Requires a valid
    /// coordinate.
    pub fn to_point(&self) -> S2Point {
        debug_assert!(self.is_valid());
        let phi = self.lat().radians();
        let theta = self.lng().radians();
        let cosphi = phi.cos();
        S2Point::new(theta.cos() * cosphi, theta.sin() * cosphi, phi.sin())
    }

    /// Return the distance (measured along the surface of the sphere) to the
    /// given point. Both points must be valid.
    pub fn get_distance(&self, o: &S2LatLng) -> S1Angle {
        // This implements the Haversine formula, which is numerically stable
        // for both large and small distances.
        debug_assert!(self.is_valid());
        debug_assert!(o.is_valid());
        let lat1 = self.lat().radians();
        let lat2 = o.lat().radians();
        let lng1 = self.lng().radians();
        let lng2 = o.lng().radians();
        let dlat = (0.5 * (lat2 - lat1)).sin();
        let dlng = (0.5 * (lng2 - lng1)).sin();
        let x = dlat * dlat + dlng * dlng * lat1.cos() * lat2.cos();
        S1Angle::from_radians(2.0 * f64::asin(f64::min(1.0, x).sqrt()))
    }
}

impl Add for S2LatLng {
    type Output = S2LatLng;

    fn add(self, rhs: S2LatLng) -> S2LatLng {
        S2LatLng {
            coords: self.coords + rhs.coords,
        }
    }
}

impl Sub for S2LatLng {
    type Output = S2LatLng;

    fn sub(self, rhs: S2LatLng) -> S2LatLng {
        S2LatLng {
            coords: self.coords - rhs.coords,
        }
    }
}

impl fmt::Display for S2LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lat().degrees(), self.lng().degrees())
    }
}
