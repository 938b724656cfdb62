use std::ops::{Index, IndexMut};

use crate::util::math::Vector2;

/// An R1Interval represents a closed, bounded interval on the real line.
/// It is capable of representing the empty interval (containing no points)
/// and zero-length intervals (containing a single point).
///
/// This class is intended to be copied by value as desired.  It uses
/// the default copy constructor and assignment operator.
#[derive(Debug, Copy, Clone)]
pub struct R1Interval {
    bounds: Vector2<f64>,
}

impl R1Interval {
    /// If lo > hi, the interval is empty.
    pub fn new(lo: f64, hi: f64) -> R1Interval {
        R1Interval {
            bounds: Vector2::new(lo, hi),
        }
    }

    /// Returns the canonical empty interval (1, 0).
    pub fn empty() -> R1Interval {
        R1Interval::new(1.0, 0.0)
    }

    pub fn from_point(p: f64) -> R1Interval {
        R1Interval::new(p, p)
    }

    /// Convenience method to construct the minimal interval containing the
    /// two given points. This is equivalent to starting with an empty
    /// interval and calling `add_point()` twice, but it is more efficient.
    pub fn from_point_pair(p1: f64, p2: f64) -> R1Interval {
        if p1 <= p2 {
            R1Interval::new(p1, p2)
        } else {
            R1Interval::new(p2, p1)
        }
    }

    /// The low bound of the interval.
    pub fn lo(&self) -> f64 {
        self.bounds[0]
    }

    /// The high bound of the interval.
    pub fn hi(&self) -> f64 {
        self.bounds[1]
    }

    pub fn bounds(&self) -> &Vector2<f64> {
        &self.bounds
    }

    pub fn bounds_mut(&mut self) -> &mut Vector2<f64> {
        &mut self.bounds
    }

    /// Return true if the interval is empty, i.e. it contains no points.
    pub fn is_empty(&self) -> bool {
        self.lo() > self.hi()
    }

    /// Return the center of the interval.  For empty intervals,
    /// the result is arbitrary.
    pub fn get_center(&self) -> f64 {
        0.5 * (self.lo() + self.hi())
    }

    /// Return the length of the interval.  The length of an empty interval
    /// is negative.
    pub fn get_length(&self) -> f64 {
        self.hi() - self.lo()
    }

    /// Returns true if the given point is in the closed interval [lo, hi].
    pub fn contains(&self, p: f64) -> bool {
        p >= self.lo() && p <= self.hi()
    }

    /// Returns true if the given point is in the open interval (lo, hi).
    pub fn interior_contains(&self, p: f64) -> bool {
        p > self.lo() && p < self.hi()
    }

    /// Returns true if this interval contains the interval "y".
    pub fn contains_interval(&self, y: &R1Interval) -> bool {
        if y.is_empty() {
            return true;
        }
        y.lo() >= self.lo() && y.hi() <= self.hi()
    }

    /// Returns true if the interior of this interval contains the entire
    /// interval "y" (including its boundary).
    pub fn interior_contains_interval(&self, y: &R1Interval) -> bool {
        if y.is_empty() {
            return true;
        }
        y.lo() > self.lo() && y.hi() < self.hi()
    }

    /// Returns true if this interval intersects the given interval,
    /// i.e. if they have any points in common.
    pub fn intersects(&self, y: &R1Interval) -> bool {
        if self.lo() <= y.lo() {
            y.lo() <= self.hi() && !y.is_empty()
        } else {
            self.lo() <= y.hi() && !self.is_empty()
        }
    }

    /// Returns true if the interior of this interval intersects any point
    /// of the given interval (including its boundary).
    pub fn interior_intersects(&self, y: &R1Interval) -> bool {
        y.lo() < self.hi() && self.lo() < y.hi() && self.lo() < self.hi() && y.lo() <= y.hi()
    }

    /// Expand the interval so that it contains the given point "p".
    pub fn add_point(&self, p: f64) -> R1Interval {
        if self.is_empty() {
            R1Interval::from_point(p)
        } else if p < self.lo() {
            R1Interval::new(p, self.hi())
        } else if p > self.hi() {
            R1Interval::new(self.lo(), p)
        } else {
            *self
        }
    }

    /// Return an interval that has been expanded on each side by the given
    /// distance "margin". If "margin" is negative, then shrink the interval on
    /// each side by "margin" instead. The resulting interval may be empty. Any
    /// expansion of an empty interval remains empty.
    pub fn expanded(&self, margin: f64) -> R1Interval {
        if self.is_empty() {
            return *self;
        }
        R1Interval::new(self.lo() - margin, self.hi() + margin)
    }

    /// Return the smallest interval that contains this interval and the
    /// given interval "y".
    pub fn union(&self, y: &R1Interval) -> R1Interval {
        if self.is_empty() {
            return *y;
        }
        if y.is_empty() {
            return *self;
        }
        R1Interval::new(self.lo().min(y.lo()), self.hi().max(y.hi()))
    }

    /// Return the intersection of this interval with the given interval.
    /// Empty intervals do not need to be special-cased.
    pub fn intersection(&self, y: &R1Interval) -> R1Interval {
        R1Interval::new(self.lo().max(y.lo()), self.hi().min(y.hi()))
    }

    /// Return true if this interval can be transformed into the given
    /// interval by moving each endpoint by at most "max_error". The empty
    /// interval is considered to be positioned arbitrarily on the real
    /// line, thus any interval with (length <= 2*max_error) matches it.
    pub fn approx_equals(&self, y: &R1Interval, max_error: f64) -> bool {
        if self.is_empty() {
            return y.get_length() <= 2.0 * max_error;
        }
        if y.is_empty() {
            return self.get_length() <= 2.0 * max_error;
        }
        (y.lo() - self.lo()).abs() <= max_error && (y.hi() - self.hi()).abs() <= max_error
    }
}

impl Default for R1Interval {
    /// The default interval is empty.
    fn default() -> Self {
        R1Interval::empty()
    }
}

impl PartialEq for R1Interval {
    /// Return true if two intervals contain the same set of points.
    fn eq(&self, other: &Self) -> bool {
        (self.lo() == other.lo() && self.hi() == other.hi())
            || (self.is_empty() && other.is_empty())
    }
}

impl Index<usize> for R1Interval {
    type Output = f64;

    /// The recommended style is to use `lo()` and `hi()` whenever possible,
    /// but these methods are useful when the endpoint to be selected is not constant.
    fn index(&self, index: usize) -> &Self::Output {
        &self.bounds[index]
    }
}

impl IndexMut<usize> for R1Interval {
    /// The recommended style is to use `lo()` and `hi()` whenever possible,
    /// but these methods are useful when the endpoint to be selected is not constant.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.bounds[index]
    }
}
