use std::ops::{Index, IndexMut};

use crate::r1::R1Interval;
use crate::s2::r2::R2Point;

/// An R2Rect represents a closed axis-aligned rectangle in the (x,y) plane.
/// The cell decomposition uses it to carry cube-space (u,v) bounds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct R2Rect {
    bounds: [R1Interval; 2],
}

impl R2Rect {
    /// Construct a rectangle from the given intervals along the x- and
    /// y-axes. The two intervals must either be both empty or both
    /// non-empty.
    pub fn new(x: R1Interval, y: R1Interval) -> R2Rect {
        R2Rect { bounds: [x, y] }
    }

    /// Returns the canonical empty rectangle (both intervals empty).
    pub fn empty() -> R2Rect {
        R2Rect::new(R1Interval::empty(), R1Interval::empty())
    }

    pub fn from_point(p: &R2Point) -> R2Rect {
        R2Rect::new(R1Interval::from_point(p.x()), R1Interval::from_point(p.y()))
    }

    pub fn x(&self) -> &R1Interval {
        &self.bounds[0]
    }

    pub fn y(&self) -> &R1Interval {
        &self.bounds[1]
    }

    /// Return true if the rectangle is empty, i.e. it contains no points.
    pub fn is_empty(&self) -> bool {
        self.x().is_empty()
    }

    pub fn get_center(&self) -> R2Point {
        R2Point::new(self.x().get_center(), self.y().get_center())
    }

    /// Return the vertex in direction "i" along the x-axis (0=lo, 1=hi) and
    /// direction "j" along the y-axis.
    pub fn get_vertex_ij(&self, i: usize, j: usize) -> R2Point {
        R2Point::new(self.bounds[0][i], self.bounds[1][j])
    }

    /// Return true if the rectangle contains the given point. The
    /// rectangle is closed, so points on the boundary are contained.
    pub fn contains(&self, p: &R2Point) -> bool {
        self.x().contains(p.x()) && self.y().contains(p.y())
    }
}

impl Default for R2Rect {
    fn default() -> Self {
        R2Rect::empty()
    }
}

impl Index<usize> for R2Rect {
    type Output = R1Interval;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bounds[index]
    }
}

impl IndexMut<usize> for R2Rect {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.bounds[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rect() {
        let empty = R2Rect::empty();
        assert!(empty.is_empty());
        assert!(!empty.contains(&R2Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_contains() {
        let r = R2Rect::new(R1Interval::new(0.0, 0.5), R1Interval::new(0.25, 1.0));
        assert!(r.contains(&R2Point::new(0.25, 0.5)));
        assert!(r.contains(&R2Point::new(0.0, 0.25)));
        assert!(!r.contains(&R2Point::new(0.75, 0.5)));
        assert_eq!(r.get_center(), R2Point::new(0.25, 0.625));
        assert_eq!(r.get_vertex_ij(0, 1), R2Point::new(0.0, 1.0));
    }
}
