use std::f64::consts::PI;
use std::ops::Index;

use crate::util::math::{remainder, Vector2};

/// An S1Interval represents a closed interval on a unit circle (also known
/// as a one-dimensional sphere). It is capable of representing the empty
/// interval (containing no points), the full interval (containing all
/// points), and zero-length intervals (containing a single point).
///
/// Points are represented by the angle they make with the positive x-axis in
/// the range [-Pi, Pi]. An interval is represented by its lower and upper
/// bounds (both inclusive, since the interval is closed). The lower bound may
/// be greater than the upper bound, in which case the interval is "inverted"
/// (i.e. it passes through the point (-1, 0)).
///
/// Note that the point (-1, 0) has two valid representations, Pi and -Pi.
/// The normalized representation of this point internally is Pi, so that
/// endpoints of normal intervals are in the range (-Pi, Pi]. The only
/// exceptions are the empty and full intervals, represented as (Pi, -Pi)
/// and (-Pi, Pi) respectively.
#[derive(Debug, Copy, Clone)]
pub struct S1Interval {
    bounds: Vector2<f64>,
}

impl S1Interval {
    /// Constructor. Both endpoints must be in the range -Pi to Pi inclusive.
    /// The value -Pi is converted internally to Pi except for the full()
    /// and empty() intervals.
    pub fn new(lo: f64, hi: f64) -> S1Interval {
        let mut result = S1Interval::new_raw(lo, hi);
        if lo == -PI && hi != PI {
            result.bounds[0] = PI;
        }
        if hi == -PI && lo != PI {
            result.bounds[1] = PI;
        }
        debug_assert!(result.is_valid());
        result
    }

    /// Internal constructor that assumes both arguments are already
    /// normalized.
    fn new_raw(lo: f64, hi: f64) -> S1Interval {
        S1Interval {
            bounds: Vector2::new(lo, hi),
        }
    }

    /// Returns the empty interval.
    pub fn empty() -> S1Interval {
        S1Interval::new_raw(PI, -PI)
    }

    /// Returns the full interval.
    pub fn full() -> S1Interval {
        S1Interval::new_raw(-PI, PI)
    }

    /// Convenience method to construct an interval containing a single point.
    pub fn from_point(mut p: f64) -> S1Interval {
        if p == -PI {
            p = PI;
        }
        S1Interval::new_raw(p, p)
    }

    /// Convenience method to construct the minimal interval containing the
    /// two given points. This is equivalent to starting with an empty
    /// interval and calling `add_point()` twice, but it is more efficient.
    pub fn from_point_pair(mut p1: f64, mut p2: f64) -> S1Interval {
        debug_assert!(p1.abs() <= PI && p2.abs() <= PI);
        if p1 == -PI {
            p1 = PI;
        }
        if p2 == -PI {
            p2 = PI;
        }
        if positive_distance(p1, p2) <= PI {
            S1Interval::new_raw(p1, p2)
        } else {
            S1Interval::new_raw(p2, p1)
        }
    }

    pub fn lo(&self) -> f64 {
        self.bounds[0]
    }

    pub fn hi(&self) -> f64 {
        self.bounds[1]
    }

    /// An interval is valid if neither bound exceeds Pi in absolute value,
    /// and the value -Pi appears only in the empty and full intervals.
    pub fn is_valid(&self) -> bool {
        self.lo().abs() <= PI
            && self.hi().abs() <= PI
            && !(self.lo() == -PI && self.hi() != PI)
            && !(self.hi() == -PI && self.lo() != PI)
    }

    /// Return true if the interval contains all points on the unit circle.
    pub fn is_full(&self) -> bool {
        self.hi() - self.lo() == 2.0 * PI
    }

    /// Return true if the interval is empty, i.e. it contains no points.
    pub fn is_empty(&self) -> bool {
        self.lo() - self.hi() == 2.0 * PI
    }

    /// Return true if lo() > hi(). (This is true for empty intervals.)
    pub fn is_inverted(&self) -> bool {
        self.lo() > self.hi()
    }

    /// Return the midpoint of the interval. For full and empty intervals,
    /// the result is arbitrary.
    pub fn get_center(&self) -> f64 {
        let center = 0.5 * (self.lo() + self.hi());
        if !self.is_inverted() {
            return center;
        }
        // Return the center in the range (-Pi, Pi].
        if center <= 0.0 {
            center + PI
        } else {
            center - PI
        }
    }

    /// Return the length of the interval. The length of an empty interval
    /// is negative.
    pub fn get_length(&self) -> f64 {
        let mut length = self.hi() - self.lo();
        if length >= 0.0 {
            return length;
        }
        length += 2.0 * PI;
        if length > 0.0 {
            length
        } else {
            -1.0
        }
    }

    /// Return the complement of the interior of the interval. An interval and
    /// its complement have the same boundary but do not share any interior
    /// values. The complement operator is not a bijection, since the
    /// complement of a singleton interval (containing a single value) is the
    /// same as the complement of an empty interval.
    pub fn complement(&self) -> S1Interval {
        if self.lo() == self.hi() {
            return S1Interval::full();
        }
        // Handles empty and full.
        S1Interval::new_raw(self.hi(), self.lo())
    }

    /// Return true if the interval (which is closed) contains the point "p".
    pub fn contains(&self, mut p: f64) -> bool {
        debug_assert!(p.abs() <= PI);
        if p == -PI {
            p = PI;
        }
        self.fast_contains(p)
    }

    /// Return true if the interval (which is closed) contains the point "p".
    /// Skips the normalization of the value -Pi to Pi.
    pub fn fast_contains(&self, p: f64) -> bool {
        if self.is_inverted() {
            (p >= self.lo() || p <= self.hi()) && !self.is_empty()
        } else {
            p >= self.lo() && p <= self.hi()
        }
    }

    /// Return true if the interior of the interval contains the point "p".
    pub fn interior_contains(&self, mut p: f64) -> bool {
        debug_assert!(p.abs() <= PI);
        if p == -PI {
            p = PI;
        }
        if self.is_inverted() {
            p > self.lo() || p < self.hi()
        } else {
            (p > self.lo() && p < self.hi()) || self.is_full()
        }
    }

    /// Return true if the interval contains the given interval "y". Works for
    /// empty, full, and singleton intervals.
    pub fn contains_interval(&self, y: &S1Interval) -> bool {
        // It might be helpful to compare the structure of these tests to
        // the simpler `contains(f64)` method above.
        if self.is_inverted() {
            if y.is_inverted() {
                return y.lo() >= self.lo() && y.hi() <= self.hi();
            }
            (y.lo() >= self.lo() || y.hi() <= self.hi()) && !self.is_empty()
        } else {
            if y.is_inverted() {
                return self.is_full() || y.is_empty();
            }
            y.lo() >= self.lo() && y.hi() <= self.hi()
        }
    }

    /// Returns true if the interior of this interval contains the entire
    /// interval "y". Note that x.interior_contains_interval(x) is true only
    /// when x is the empty or full interval, and
    /// x.interior_contains_interval(S1Interval::from_point(x.lo())) is
    /// equivalent to x.interior_contains(x.lo()).
    pub fn interior_contains_interval(&self, y: &S1Interval) -> bool {
        if self.is_inverted() {
            if !y.is_inverted() {
                return y.lo() > self.lo() || y.hi() < self.hi();
            }
            (y.lo() > self.lo() && y.hi() < self.hi()) || y.is_empty()
        } else {
            if y.is_inverted() {
                return self.is_full() || y.is_empty();
            }
            (y.lo() > self.lo() && y.hi() < self.hi()) || self.is_full()
        }
    }

    /// Return true if the two intervals contain any points in common. Note
    /// that the point +/-Pi has two representations, so the intervals
    /// [-Pi,-3] and [2,Pi] intersect, for example.
    pub fn intersects(&self, y: &S1Interval) -> bool {
        if self.is_empty() || y.is_empty() {
            return false;
        }
        if self.is_inverted() {
            // Every non-empty inverted interval contains Pi.
            y.is_inverted() || y.lo() <= self.hi() || y.hi() >= self.lo()
        } else {
            if y.is_inverted() {
                return y.lo() <= self.hi() || y.hi() >= self.lo();
            }
            y.lo() <= self.hi() && y.hi() >= self.lo()
        }
    }

    /// Return true if the interior of this interval contains any point of the
    /// interval "y" (including its boundary). Works for empty, full, and
    /// singleton intervals.
    pub fn interior_intersects(&self, y: &S1Interval) -> bool {
        if self.is_empty() || y.is_empty() || self.lo() == self.hi() {
            return false;
        }
        if self.is_inverted() {
            y.is_inverted() || y.lo() < self.hi() || y.hi() > self.lo()
        } else {
            if y.is_inverted() {
                return y.lo() < self.hi() || y.hi() > self.lo();
            }
            (y.lo() < self.hi() && y.hi() > self.lo()) || self.is_full()
        }
    }

    /// Expand the interval by the minimum amount necessary so that it
    /// contains the given point "p" (an angle in the range [-Pi, Pi]).
    pub fn add_point(&self, mut p: f64) -> S1Interval {
        debug_assert!(p.abs() <= PI);
        if p == -PI {
            p = PI;
        }
        if self.fast_contains(p) {
            return *self;
        }
        if self.is_empty() {
            return S1Interval::from_point(p);
        }
        // Compute distance from p to each endpoint.
        if positive_distance(p, self.lo()) < positive_distance(self.hi(), p) {
            S1Interval::new_raw(p, self.hi())
        } else {
            S1Interval::new_raw(self.lo(), p)
        }
    }

    /// Return an interval that has been expanded on each side by the given
    /// distance "margin". If "margin" is negative, then shrink the interval on
    /// each side by "margin" instead. The resulting interval may be empty or
    /// full. Any expansion (positive or negative) of a full interval remains
    /// full, and any expansion of an empty interval remains empty.
    pub fn expanded(&self, margin: f64) -> S1Interval {
        if margin >= 0.0 {
            if self.is_empty() {
                return *self;
            }
            // Check whether this interval will be full after expansion,
            // allowing for a 1-bit rounding error when computing each endpoint.
            if self.get_length() + 2.0 * margin + 2.0 * f64::EPSILON >= 2.0 * PI {
                return S1Interval::full();
            }
        } else {
            if self.is_full() {
                return *self;
            }
            // Check whether this interval will be empty after expansion,
            // allowing for a 1-bit rounding error when computing each endpoint.
            if self.get_length() + 2.0 * margin - 2.0 * f64::EPSILON <= 0.0 {
                return S1Interval::empty();
            }
        }
        let mut result = S1Interval::new(
            remainder(self.lo() - margin, 2.0 * PI),
            remainder(self.hi() + margin, 2.0 * PI),
        );
        if result.lo() <= -PI {
            result.bounds[0] = PI;
        }
        result
    }

    /// Return the smallest interval that contains this interval and the
    /// given interval "y".
    pub fn union(&self, y: &S1Interval) -> S1Interval {
        // The y.is_full() case is handled correctly in all cases by the code
        // below, but can follow three separate code paths depending on whether
        // this interval is inverted, is non-inverted but contains Pi, or
        // neither.
        if y.is_empty() {
            return *self;
        }
        if self.fast_contains(y.lo()) {
            if self.fast_contains(y.hi()) {
                // Either this interval contains y, or the union is the full
                // interval.
                if self.contains_interval(y) {
                    return *self;
                }
                return S1Interval::full();
            }
            return S1Interval::new_raw(self.lo(), y.hi());
        }
        if self.fast_contains(y.hi()) {
            return S1Interval::new_raw(y.lo(), self.hi());
        }
        // This interval contains neither endpoint of y. This means that
        // either y contains all of this interval, or the two intervals are
        // disjoint.
        if self.is_empty() || y.fast_contains(self.lo()) {
            return *y;
        }
        // Check which pair of endpoints are closer together.
        let dlo = positive_distance(y.hi(), self.lo());
        let dhi = positive_distance(self.hi(), y.lo());
        if dlo < dhi {
            S1Interval::new_raw(y.lo(), self.hi())
        } else {
            S1Interval::new_raw(self.lo(), y.hi())
        }
    }

    /// Return the smallest interval that contains the intersection of this
    /// interval with "y". Note that the region of intersection may consist
    /// of two disjoint intervals.
    pub fn intersection(&self, y: &S1Interval) -> S1Interval {
        if y.is_empty() {
            return S1Interval::empty();
        }
        if self.fast_contains(y.lo()) {
            if self.fast_contains(y.hi()) {
                // Either this interval contains y, or the region of
                // intersection consists of two disjoint subintervals. In
                // either case, we want to return the shorter of the two
                // original intervals.
                if y.get_length() < self.get_length() {
                    return *y;
                }
                return *self;
            }
            return S1Interval::new_raw(y.lo(), self.hi());
        }
        if self.fast_contains(y.hi()) {
            return S1Interval::new_raw(self.lo(), y.hi());
        }
        // This interval contains neither endpoint of y. This means that
        // either y contains all of this interval, or the two intervals are
        // disjoint.
        if y.fast_contains(self.lo()) {
            return *self;
        }
        debug_assert!(!self.intersects(y));
        S1Interval::empty()
    }

    /// Return true if this interval can be transformed into the given
    /// interval by moving each endpoint by at most "max_error" (and without
    /// the endpoints crossing, which would invert the interval). Empty and
    /// full intervals are considered to start at an arbitrary point on the
    /// unit circle, thus any interval with (length <= 2*max_error) matches
    /// the empty interval, and any interval with
    /// (length >= 2*Pi - 2*max_error) matches the full interval.
    pub fn approx_equals(&self, y: &S1Interval, max_error: f64) -> bool {
        if self.is_empty() {
            return y.get_length() <= 2.0 * max_error;
        }
        if y.is_empty() {
            return self.get_length() <= 2.0 * max_error;
        }
        if self.is_full() {
            return y.get_length() >= 2.0 * (PI - max_error);
        }
        if y.is_full() {
            return self.get_length() >= 2.0 * (PI - max_error);
        }
        // The purpose of the last test below is to verify that moving the
        // endpoints does not invert the interval, e.g. [-1e20, 1e20] vs.
        // [1e20, -1e20].
        remainder(y.lo() - self.lo(), 2.0 * PI).abs() <= max_error
            && remainder(y.hi() - self.hi(), 2.0 * PI).abs() <= max_error
            && (self.get_length() - y.get_length()).abs() <= 2.0 * max_error
    }
}

impl Default for S1Interval {
    /// The default interval is empty.
    fn default() -> Self {
        S1Interval::empty()
    }
}

impl Index<usize> for S1Interval {
    type Output = f64;

    /// The recommended style is to use `lo()` and `hi()` whenever possible,
    /// but this is useful when the endpoint to be selected is not constant.
    fn index(&self, index: usize) -> &Self::Output {
        &self.bounds[index]
    }
}

impl PartialEq for S1Interval {
    /// Return true if two intervals contain the same set of points.
    fn eq(&self, other: &Self) -> bool {
        (self.lo() == other.lo() && self.hi() == other.hi())
            || (self.is_empty() && other.is_empty())
    }
}

/// Compute the distance from "a" to "b" in the range [0, 2*Pi). This is
/// equivalent to (remainder(b - a - Pi, 2 * Pi) + Pi), except that it is
/// more numerically stable (it does not lose precision for very small
/// positive distances).
fn positive_distance(a: f64, b: f64) -> f64 {
    let d = b - a;
    if d >= 0.0 {
        return d;
    }
    // We want to ensure that if b == Pi and a == (-Pi + eps),
    // the return result is approximately 2*Pi and not zero.
    (b + PI) - (a - PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Some standard intervals for testing, mirroring the quadrant layout
    // of the unit circle.
    fn quad1() -> S1Interval {
        S1Interval::new(0.0, PI / 2.0)
    }
    fn quad2() -> S1Interval {
        S1Interval::new(PI / 2.0, PI)
    }
    fn quad3() -> S1Interval {
        S1Interval::new(PI, -PI / 2.0)
    }
    fn quad12() -> S1Interval {
        S1Interval::new(0.0, PI)
    }
    fn quad23() -> S1Interval {
        S1Interval::new(PI / 2.0, -PI / 2.0) // inverted
    }
    fn quad341() -> S1Interval {
        S1Interval::new(PI, PI / 2.0) // inverted
    }

    #[test]
    fn test_constructors_and_accessors() {
        assert_eq!(quad12().lo(), 0.0);
        assert_eq!(quad12().hi(), PI);
        assert_eq!(quad34().lo(), PI);
        assert_eq!(quad34().hi(), 0.0);

        // The constructor canonicalizes -Pi to Pi.
        let i = S1Interval::new(-PI, -PI / 2.0);
        assert_eq!(i.lo(), PI);

        assert!(S1Interval::empty().is_valid());
        assert!(S1Interval::empty().is_empty());
        assert!(!S1Interval::empty().is_full());
        assert!(S1Interval::full().is_valid());
        assert!(S1Interval::full().is_full());
        assert!(!S1Interval::full().is_empty());
        assert!(S1Interval::default().is_empty());
    }

    fn quad34() -> S1Interval {
        S1Interval::new(PI, 0.0) // inverted
    }

    #[test]
    fn test_center_and_length() {
        assert_eq!(quad12().get_center(), PI / 2.0);
        assert_eq!(quad12().get_length(), PI);
        assert_eq!(S1Interval::new(3.1, 2.9).get_center(), 3.0 - PI);
        assert_eq!(S1Interval::new(-2.9, -3.1).get_center(), PI - 3.0);
        assert_eq!(S1Interval::full().get_length(), 2.0 * PI);
        assert!(S1Interval::empty().get_length() < 0.0);
    }

    #[test]
    fn test_contains_point() {
        assert!(!S1Interval::empty().contains(0.0));
        assert!(S1Interval::full().contains(PI));
        assert!(S1Interval::full().contains(-PI));

        let q12 = quad12();
        assert!(q12.contains(0.0) && q12.contains(PI) && q12.contains(-PI));
        assert!(q12.interior_contains(PI / 2.0));
        assert!(!q12.interior_contains(0.0));

        let q23 = quad23();
        assert!(q23.contains(PI) && q23.contains(-PI));
        assert!(!q23.contains(0.0));
        assert!(q23.interior_contains(PI) && q23.interior_contains(-PI));
    }

    #[test]
    fn test_contains_interval() {
        assert!(S1Interval::full().contains_interval(&quad12()));
        assert!(quad12().contains_interval(&S1Interval::empty()));
        assert!(!quad1().contains_interval(&quad12()));
        assert!(quad12().contains_interval(&quad1()));
        assert!(quad23().contains_interval(&quad3()));
        assert!(!quad23().interior_contains_interval(&quad3()));
    }

    #[test]
    fn test_intersects() {
        assert!(!S1Interval::empty().intersects(&S1Interval::full()));
        assert!(quad12().intersects(&quad23()));
        assert!(!quad1().intersects(&quad3()));
        assert!(quad2().intersects(&quad3()));
        assert!(!quad2().interior_intersects(&quad3()));
        assert!(quad23().interior_intersects(&quad341()));
    }

    #[test]
    fn test_union_intersection() {
        assert_eq!(quad1().union(&quad2()), quad12());
        assert_eq!(quad12().intersection(&quad23()), quad2());
        assert_eq!(quad3().union(&quad1()), quad341().union(&quad3()).intersection(&quad341()));
        assert_eq!(S1Interval::empty().union(&quad1()), quad1());
        assert!(quad1().intersection(&quad3()).is_empty());

        // Union that wraps through the seam.
        let a = S1Interval::new(3.0, PI);
        let b = S1Interval::new(-PI, -3.0);
        assert_eq!(a.union(&b), S1Interval::new(3.0, -3.0));
    }

    #[test]
    fn test_add_point() {
        let mut r = S1Interval::empty();
        r = r.add_point(0.0);
        assert_eq!(r, S1Interval::from_point(0.0));
        r = r.add_point(PI / 2.0);
        assert_eq!(r, quad1());
        r = r.add_point(-PI / 2.0);
        // Shortest expansion keeps the interval within a half circle.
        assert_eq!(r, S1Interval::new(-PI / 2.0, PI / 2.0));
        let s = S1Interval::from_point(0.0).add_point(PI).add_point(-PI);
        assert!(s.contains(PI));
    }

    #[test]
    fn test_expanded() {
        assert!(S1Interval::empty().expanded(1.0).is_empty());
        assert!(S1Interval::full().expanded(1.0).is_full());
        assert_eq!(quad1().expanded(0.0), quad1());
        // Expanding past a half circle on each side gives the full interval.
        assert!(quad12().expanded(PI / 2.0 + 1e-9).is_full());
        // Expansion across the seam.
        let e = S1Interval::new(PI - 0.1, PI).expanded(0.2);
        assert!(e.is_inverted());
        assert!(e.contains(-PI + 0.05));
        // Negative margin shrinks.
        assert_eq!(quad12().expanded(-PI / 4.0), S1Interval::new(PI / 4.0, 3.0 * PI / 4.0));
        assert!(quad1().expanded(-PI).is_empty());
    }

    #[test]
    fn test_complement() {
        assert!(S1Interval::empty().complement().is_full());
        assert!(S1Interval::full().complement().is_empty());
        assert!(S1Interval::from_point(PI).complement().is_full());
        assert_eq!(quad12().complement(), quad34());
    }

    #[test]
    fn test_from_point_pair() {
        assert_eq!(S1Interval::from_point_pair(-PI, PI), S1Interval::from_point(PI));
        assert_eq!(S1Interval::from_point_pair(PI, -PI), S1Interval::from_point(PI));
        let i = S1Interval::from_point_pair(3.0, -3.0);
        assert!(i.is_inverted());
        assert_eq!(i.lo(), 3.0);
        assert_eq!(i.hi(), -3.0);
        let j = S1Interval::from_point_pair(-1.0, 1.0);
        assert_eq!(j, S1Interval::new(-1.0, 1.0));
    }

    #[test]
    fn test_approx_equals() {
        let empty = S1Interval::empty();
        assert!(empty.approx_equals(&empty, 1e-15));
        assert!(S1Interval::from_point(1.0).approx_equals(&empty, 1e-15));
        assert!(!quad1().approx_equals(&empty, 1e-15));
        assert!(S1Interval::new(1.0, 1.0 + 1e-16).approx_equals(&S1Interval::from_point(1.0), 1e-15));
    }
}
