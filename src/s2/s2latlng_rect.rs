use std::f64::consts::PI;
use std::fmt;

use crate::r1::R1Interval;
use crate::s1::{S1Angle, S1Interval};
use crate::s2::s2edge_util;
use crate::s2::s2latlng::S2LatLng;
use crate::s2::s2point::S2Point;

/// An S2LatLngRect represents a closed latitude-longitude rectangle. It is
/// capable of representing the empty and full rectangles as well as single
/// points. Note that the latitude-longitude space is considered to have a
/// *cylindrical* topology rather than a spherical one, i.e. the poles have
/// multiple lat/lng representations. An S2LatLngRect may be defined so that
/// it includes some representations of a pole but not others.
///
/// Because S2LatLngRect uses S1Interval to store the longitude range,
/// longitudes of -180 degrees are treated specially. Except for empty
/// and full longitude spans, -180 degree longitudes will turn into +180
/// degrees. This sign flip causes lng_lo() to be greater than lng_hi(),
/// indicating that the rectangle will wrap around through -180 instead of
/// through +179. Thus the math is consistent within the library, but the
/// sign flip can be surprising, especially when working with map
/// projections where -180 and +180 are at opposite ends of the flattened
/// map. See the comments on S1Interval for more details.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct S2LatLngRect {
    lat: R1Interval,
    lng: S1Interval,
}

impl S2LatLngRect {
    /// Construct a rectangle from minimum and maximum latitudes and
    /// longitudes. If lo.lng() > hi.lng(), the rectangle spans the 180
    /// degree longitude line. Both points must be normalized, with
    /// lo.lat() <= hi.lat(). The rectangle contains all the points p such
    /// that 'lo' <= p <= 'hi', where '<=' is defined in the obvious way.
    pub fn new(lo: &S2LatLng, hi: &S2LatLng) -> S2LatLngRect {
        let result = S2LatLngRect {
            lat: R1Interval::new(lo.lat().radians(), hi.lat().radians()),
            lng: S1Interval::new(lo.lng().radians(), hi.lng().radians()),
        };
        debug_assert!(result.is_valid());
        result
    }

    /// Construct a rectangle from a latitude interval (in radians, clamped
    /// implicitly by the caller to [-Pi/2, Pi/2]) and a longitude interval.
    pub fn from_intervals(lat: R1Interval, lng: S1Interval) -> S2LatLngRect {
        S2LatLngRect { lat, lng }
    }

    /// The canonical empty rectangle.
    pub fn empty() -> S2LatLngRect {
        S2LatLngRect {
            lat: R1Interval::empty(),
            lng: S1Interval::empty(),
        }
    }

    /// The full rectangle, covering the whole sphere.
    pub fn full() -> S2LatLngRect {
        S2LatLngRect {
            lat: S2LatLngRect::full_lat(),
            lng: S1Interval::full(),
        }
    }

    /// The full allowable range of latitudes.
    pub fn full_lat() -> R1Interval {
        R1Interval::new(-PI / 2.0, PI / 2.0)
    }

    /// Construct a rectangle of the given size centered around the given
    /// point. The center needs to be normalized, but the size does not
    /// (it may be up to 360 degrees in longitude and 180 in latitude).
    /// The latitude interval is clamped to the poles.
    pub fn from_center_size(center: &S2LatLng, size: &S2LatLng) -> S2LatLngRect {
        S2LatLngRect::from_point(center).expanded(&S2LatLng::from_radians(
            0.5 * size.lat().radians(),
            0.5 * size.lng().radians(),
        ))
    }

    /// Construct a rectangle containing a single normalized point.
    pub fn from_point(p: &S2LatLng) -> S2LatLngRect {
        debug_assert!(p.is_valid());
        S2LatLngRect::new(p, p)
    }

    /// Construct the minimal bounding rectangle containing the two given
    /// normalized points. This is equivalent to starting with an empty
    /// rectangle and calling `add_point()` twice. Note that it is different
    /// than the `new` constructor, where the first point is always used as
    /// the lower-left corner of the resulting rectangle.
    pub fn from_point_pair(p1: &S2LatLng, p2: &S2LatLng) -> S2LatLngRect {
        debug_assert!(p1.is_valid());
        debug_assert!(p2.is_valid());
        S2LatLngRect {
            lat: R1Interval::from_point_pair(p1.lat().radians(), p2.lat().radians()),
            lng: S1Interval::from_point_pair(p1.lng().radians(), p2.lng().radians()),
        }
    }

    /// Return the minimal bounding rectangle containing the geodesic edge
    /// between the two given unit vectors. The bound accounts for the fact
    /// that the minimum or maximum latitude of the edge may occur in its
    /// interior rather than at the endpoints.
    pub fn from_edge(a: &S2Point, b: &S2Point) -> S2LatLngRect {
        let r =
            S2LatLngRect::from_point_pair(&S2LatLng::from_point(a), &S2LatLng::from_point(b));

        // Check whether the min/max latitude occurs in the edge interior.
        // We find the normal to the plane containing AB, and then a vector
        // "dir" in this plane that also passes through the equator. We use
        // robust_cross_prod to ensure that the edge normal is accurate even
        // when the two points are very close together.
        let ab = s2edge_util::robust_cross_prod(a, b);
        let dir = ab.cross_prod(&S2Point::new(0.0, 0.0, 1.0));
        let da = dir.dot_prod(a);
        let db = dir.dot_prod(b);
        if da * db >= 0.0 {
            // Minimum and maximum latitude are attained at the vertices.
            return r;
        }
        // Minimum/maximum latitude occurs in the edge interior. This affects
        // the latitude bounds but not the longitude bounds.
        let abs_lat = f64::acos((ab.z() / ab.norm()).abs());
        if da < 0.0 {
            // It's possible that abs_lat < lat.lo() due to numerical errors.
            S2LatLngRect {
                lat: R1Interval::new(r.lat.lo(), abs_lat),
                lng: r.lng,
            }
        } else {
            S2LatLngRect {
                lat: R1Interval::new(-abs_lat, r.lat.hi()),
                lng: r.lng,
            }
        }
    }

    pub fn lat_lo(&self) -> S1Angle {
        S1Angle::from_radians(self.lat.lo())
    }

    pub fn lat_hi(&self) -> S1Angle {
        S1Angle::from_radians(self.lat.hi())
    }

    pub fn lng_lo(&self) -> S1Angle {
        S1Angle::from_radians(self.lng.lo())
    }

    pub fn lng_hi(&self) -> S1Angle {
        S1Angle::from_radians(self.lng.hi())
    }

    pub fn lat(&self) -> &R1Interval {
        &self.lat
    }

    pub fn lng(&self) -> &S1Interval {
        &self.lng
    }

    pub fn lo(&self) -> S2LatLng {
        S2LatLng::new(self.lat_lo(), self.lng_lo())
    }

    pub fn hi(&self) -> S2LatLng {
        S2LatLng::new(self.lat_hi(), self.lng_hi())
    }

    /// Return true if the rectangle is valid, which essentially just means
    /// that the latitude bounds do not exceed Pi/2 in absolute value and
    /// the longitude bounds do not exceed Pi in absolute value. Also, if
    /// either the latitude or longitude bound is empty then both must be.
    pub fn is_valid(&self) -> bool {
        self.lat.lo().abs() <= PI / 2.0
            && self.lat.hi().abs() <= PI / 2.0
            && self.lng.is_valid()
            && self.lat.is_empty() == self.lng.is_empty()
    }

    /// Return true if the rectangle is empty, i.e. it contains no points.
    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    /// Return true if the rectangle is full, i.e. it contains all points.
    pub fn is_full(&self) -> bool {
        self.lat == S2LatLngRect::full_lat() && self.lng.is_full()
    }

    /// Return true if lng_lo() > lng_hi(), i.e. the rectangle crosses the
    /// 180 degree longitude line.
    pub fn is_inverted(&self) -> bool {
        self.lng.is_inverted()
    }

    /// Return the k-th vertex of the rectangle (k = 0,1,2,3) in CCW order
    /// (lower left, lower right, upper right, upper left).
    pub fn get_vertex(&self, k: i32) -> S2LatLng {
        // Twiddle bits to return the points in CCW order.
        let i = (k >> 1) & 1;
        S2LatLng::from_radians(self.lat[i as usize], self.lng[(i ^ (k & 1)) as usize])
    }

    /// Return the center of the rectangle in latitude-longitude space
    /// (in general this is not the center of the region on the sphere).
    pub fn get_center(&self) -> S2LatLng {
        S2LatLng::from_radians(self.lat.get_center(), self.lng.get_center())
    }

    /// Return the width and height of this rectangle in latitude-longitude
    /// space. Empty rectangles have a negative width and height.
    pub fn get_size(&self) -> S2LatLng {
        S2LatLng::from_radians(self.lat.get_length(), self.lng.get_length())
    }

    /// Return the surface area of this rectangle on the unit sphere.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        // The area of a rectangle is the difference in longitudes times the
        // difference of the sines of the latitudes.
        self.lng.get_length() * (self.lat_hi().radians().sin() - self.lat_lo().radians().sin()).abs()
    }

    /// Return true if the rectangle contains the given point, which must be
    /// a normalized latitude-longitude coordinate.
    pub fn contains(&self, ll: &S2LatLng) -> bool {
        debug_assert!(ll.is_valid());
        self.lat.contains(ll.lat().radians()) && self.lng.contains(ll.lng().radians())
    }

    /// Return true if and only if the given point is contained in the
    /// interior of the region (i.e. the region excluding its boundary).
    pub fn interior_contains(&self, ll: &S2LatLng) -> bool {
        debug_assert!(ll.is_valid());
        self.lat.interior_contains(ll.lat().radians())
            && self.lng.interior_contains(ll.lng().radians())
    }

    /// Return true if the rectangle contains the given unit-length point.
    pub fn contains_point(&self, p: &S2Point) -> bool {
        self.contains(&S2LatLng::from_point(p))
    }

    /// Return true if the interior of the rectangle contains the given
    /// unit-length point.
    pub fn interior_contains_point(&self, p: &S2Point) -> bool {
        self.interior_contains(&S2LatLng::from_point(p))
    }

    /// Return true if and only if the rectangle contains the given other
    /// rectangle.
    pub fn contains_rect(&self, other: &S2LatLngRect) -> bool {
        self.lat.contains_interval(&other.lat) && self.lng.contains_interval(&other.lng)
    }

    /// Return true if and only if the interior of this rectangle contains
    /// all points of the given other rectangle (including its boundary).
    pub fn interior_contains_rect(&self, other: &S2LatLngRect) -> bool {
        self.lat.interior_contains_interval(&other.lat)
            && self.lng.interior_contains_interval(&other.lng)
    }

    /// Return true if this rectangle and the given other rectangle have any
    /// points in common.
    pub fn intersects(&self, other: &S2LatLngRect) -> bool {
        self.lat.intersects(&other.lat) && self.lng.intersects(&other.lng)
    }

    /// Return true if and only if the interior of this rectangle intersects
    /// any point (including the boundary) of the given other rectangle.
    pub fn interior_intersects(&self, other: &S2LatLngRect) -> bool {
        self.lat.interior_intersects(&other.lat) && self.lng.interior_intersects(&other.lng)
    }

    /// Increase the size of the bounding rectangle to include the given
    /// point. The rectangle is expanded by the minimum amount possible. The
    /// point must be normalized.
    pub fn add_point(&self, ll: &S2LatLng) -> S2LatLngRect {
        debug_assert!(ll.is_valid());
        S2LatLngRect {
            lat: self.lat.add_point(ll.lat().radians()),
            lng: self.lng.add_point(ll.lng().radians()),
        }
    }

    /// Like `add_point`, but takes a unit-length direction vector.
    pub fn add_point_xyz(&self, p: &S2Point) -> S2LatLngRect {
        self.add_point(&S2LatLng::from_point(p))
    }

    /// Return a rectangle that has been expanded by margin.lat() on each
    /// side in the latitude direction, and by margin.lng() on each side in
    /// the longitude direction. If either margin is empty, then shrink the
    /// interval on the corresponding sides instead. The resulting rectangle
    /// may be empty. Any expansion of an empty rectangle remains empty. The
    /// latitude interval is clamped to the maximum allowable range; the
    /// longitude interval wraps as needed. Both margins must be
    /// non-negative.
    pub fn expanded(&self, margin: &S2LatLng) -> S2LatLngRect {
        debug_assert!(margin.lat().radians() >= 0.0);
        debug_assert!(margin.lng().radians() >= 0.0);
        if self.is_empty() {
            return *self;
        }
        S2LatLngRect {
            lat: self
                .lat
                .expanded(margin.lat().radians())
                .intersection(&S2LatLngRect::full_lat()),
            lng: self.lng.expanded(margin.lng().radians()),
        }
    }

    /// Return the smallest rectangle containing the union of this rectangle
    /// and the given rectangle.
    pub fn union(&self, other: &S2LatLngRect) -> S2LatLngRect {
        S2LatLngRect {
            lat: self.lat.union(&other.lat),
            lng: self.lng.union(&other.lng),
        }
    }

    /// Return the smallest rectangle containing the intersection of this
    /// rectangle and the given rectangle. Note that the region of
    /// intersection may consist of two disjoint rectangles, in which case a
    /// single rectangle spanning both of them is returned.
    pub fn intersection(&self, other: &S2LatLngRect) -> S2LatLngRect {
        let lat = self.lat.intersection(&other.lat);
        let lng = self.lng.intersection(&other.lng);
        if lat.is_empty() || lng.is_empty() {
            // The lat/lng ranges must either be both empty or both non-empty.
            return S2LatLngRect::empty();
        }
        S2LatLngRect { lat, lng }
    }

    /// Return the minimum distance (measured along the surface of the
    /// sphere) from a given point to the rectangle (both its boundary and
    /// its interior). The rectangle must be non-empty.
    pub fn get_distance(&self, p: &S2LatLng) -> S1Angle {
        let a = self;
        debug_assert!(!a.is_empty());
        debug_assert!(p.is_valid());

        // If the point is in the longitude span of the rectangle, the
        // closest point is directly above or below it.
        if a.lng.contains(p.lng().radians()) {
            return S1Angle::from_radians(f64::max(
                0.0,
                f64::max(
                    p.lat().radians() - a.lat.hi(),
                    a.lat.lo() - p.lat().radians(),
                ),
            ));
        }

        // Otherwise, the closest point lies on one of the two longitudinal
        // edges. Pick the edge that is nearest in longitude-space, and
        // compute the distance to the geodesic segment joining its corners.
        let interval = S1Interval::new(a.lng.hi(), a.lng.complement().get_center());
        let mut a_lng = a.lng.lo();
        if interval.contains(p.lng().radians()) {
            a_lng = a.lng.hi();
        }
        let lo = S2LatLng::from_radians(a.lat.lo(), a_lng).to_point();
        let hi = S2LatLng::from_radians(a.lat.hi(), a_lng).to_point();
        let lo_cross_hi = S2LatLng::from_radians(0.0, a_lng - PI / 2.0)
            .normalized()
            .to_point();
        s2edge_util::get_distance_with_normal(&p.to_point(), &lo, &hi, &lo_cross_hi)
    }

    /// Return the minimum distance (measured along the surface of the
    /// sphere) between this rectangle and the given other rectangle. Both
    /// rectangles must be non-empty.
    pub fn get_distance_to_rect(&self, other: &S2LatLngRect) -> S1Angle {
        let a = self;
        let b = other;
        debug_assert!(!a.is_empty());
        debug_assert!(!b.is_empty());

        // First, handle the trivial cases where the longitude intervals
        // overlap.
        if a.lng.intersects(&b.lng) {
            if a.lat.intersects(&b.lat) {
                // Intersection between a and b.
                return S1Angle::from_radians(0.0);
            }
            // We found an overlap in the longitude interval, but not in the
            // latitude interval. This means the two rectangles are one above
            // the other in latitude-space.
            let (lo, hi) = if a.lat.lo() > b.lat.hi() {
                (&b.lat, &a.lat)
            } else {
                (&a.lat, &b.lat)
            };
            debug_assert!(lo.hi() < hi.lo());
            return S1Angle::from_radians(hi.lo() - lo.hi());
        }

        // The longitude intervals don't overlap. In this case, the closest
        // points occur somewhere on the pair of longitudinal edges which are
        // nearest in longitude-space.
        let lo_hi = S1Interval::from_point_pair(a.lng.lo(), b.lng.hi());
        let hi_lo = S1Interval::from_point_pair(a.lng.hi(), b.lng.lo());
        let (a_lng, b_lng) = if lo_hi.get_length() < hi_lo.get_length() {
            (a.lng.lo(), b.lng.hi())
        } else {
            (a.lng.hi(), b.lng.lo())
        };

        // The shortest distance between the two longitudinal segments will
        // include at least one segment endpoint. We could probably narrow
        // this down further to a single point-edge distance by comparing the
        // relative latitudes of the endpoints, but for the sake of clarity we
        // do all four point-edge distance tests.
        let a_lo = S2LatLng::from_radians(a.lat.lo(), a_lng).to_point();
        let a_hi = S2LatLng::from_radians(a.lat.hi(), a_lng).to_point();
        let a_lo_cross_hi = S2LatLng::from_radians(0.0, a_lng - PI / 2.0)
            .normalized()
            .to_point();
        let b_lo = S2LatLng::from_radians(b.lat.lo(), b_lng).to_point();
        let b_hi = S2LatLng::from_radians(b.lat.hi(), b_lng).to_point();
        let b_lo_cross_hi = S2LatLng::from_radians(0.0, b_lng - PI / 2.0)
            .normalized()
            .to_point();

        s2edge_util::get_distance_with_normal(&a_lo, &b_lo, &b_hi, &b_lo_cross_hi)
            .min(s2edge_util::get_distance_with_normal(&a_hi, &b_lo, &b_hi, &b_lo_cross_hi))
            .min(s2edge_util::get_distance_with_normal(&b_lo, &a_lo, &a_hi, &a_lo_cross_hi))
            .min(s2edge_util::get_distance_with_normal(&b_hi, &a_lo, &a_hi, &a_lo_cross_hi))
    }

    /// Return true if the latitude and longitude intervals of the two
    /// rectangles are the same up to the given tolerance.
    pub fn approx_equals(&self, other: &S2LatLngRect, max_error: f64) -> bool {
        self.lat.approx_equals(&other.lat, max_error)
            && self.lng.approx_equals(&other.lng, max_error)
    }
}

impl fmt::Display for S2LatLngRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Lo={}, Hi={}]", self.lo(), self.hi())
    }
}
