//! Operations on geodesic edges (great circle segments) of the unit
//! sphere: point-to-edge distance and crossing predicates.

use crate::s1::S1Angle;
use crate::s2::s2point::S2Point;

/// A predicate that determines whether the points a, b, c are
/// counterclockwise when viewed from outside the sphere, using a simple
/// (non-robust) sign test.
///
/// The arguments are rotated so that `simple_ccw(a, b, c)` and
/// `simple_ccw(c, b, a)` can never both be true for the same floating
/// point evaluation, which the wedge tests in `get_distance` rely on.
pub fn simple_ccw(a: &S2Point, b: &S2Point, c: &S2Point) -> bool {
    // We compute the signed volume of the parallelepiped ABC. The usual
    // formula for this is (AxB).C, but we compute it here using (CxA).B
    // in order to ensure that ABC and CBA are not both CCW. This follows
    // from the following identities (which are true numerically, not just
    // mathematically):
    //
    //     (1) x.CrossProd(y) == -(y.CrossProd(x))
    //     (2) (-x).DotProd(y) == -(x.DotProd(y))
    c.cross_prod(a).dot_prod(b) > 0.0
}

/// Return a vector orthogonal to both a and b, with unspecified norm.
/// Unlike `a.cross_prod(&b)`, this is numerically well-behaved when a and
/// b are nearly parallel: (b+a) and (b-a) are then nearly perpendicular,
/// so their cross product is far from zero even though a x b is not. If a
/// and b are exactly equal or exactly opposite, an arbitrary vector
/// orthogonal to a is returned.
pub fn robust_cross_prod(a: &S2Point, b: &S2Point) -> S2Point {
    let x = (*b + *a).cross_prod(&(*b - *a));
    if x != S2Point::new(0.0, 0.0, 0.0) {
        return x;
    }
    // The only result that makes sense mathematically is to return zero,
    // but we find it more convenient to return an arbitrary orthogonal
    // vector.
    a.ortho()
}

/// Return the minimum spherical distance from x to the geodesic segment
/// (a, b). All three points must be unit length.
pub fn get_distance(x: &S2Point, a: &S2Point, b: &S2Point) -> S1Angle {
    get_distance_with_normal(x, a, b, &robust_cross_prod(a, b))
}

/// Like `get_distance`, but takes the precomputed (robust) cross product
/// of a and b, for callers that evaluate many points against one edge.
pub fn get_distance_with_normal(
    x: &S2Point,
    a: &S2Point,
    b: &S2Point,
    a_cross_b: &S2Point,
) -> S1Angle {
    debug_assert!((x.norm2() - 1.0).abs() < 1e-14);
    debug_assert!((a.norm2() - 1.0).abs() < 1e-14);
    debug_assert!((b.norm2() - 1.0).abs() < 1e-14);

    // There are three cases. If x is located in the spherical wedge defined
    // by a, b, and the axis a_cross_b, then the closest point to x is on the
    // segment ab. Otherwise the closest point is either a or b.
    if simple_ccw(a_cross_b, a, x) && simple_ccw(x, b, a_cross_b) {
        // The closest point to x lies on the segment ab. We compute the
        // distance to the corresponding great circle. The result is accurate
        // for small distances but not necessarily for large distances
        // (approaching Pi/2).
        let sin_dist = x.dot_prod(a_cross_b).abs() / a_cross_b.norm();
        return S1Angle::from_radians(f64::asin(f64::min(1.0, sin_dist)));
    }

    // Otherwise, the closest point is either a or b. The cheapest method is
    // just to compute the minimum of the two linear (as opposed to spherical)
    // distances and convert the result to an angle. Again, this method is
    // accurate for small but not large distances.
    let linear_dist2 = f64::min((*x - *a).norm2(), (*x - *b).norm2());
    S1Angle::from_radians(2.0 * f64::asin(f64::min(1.0, 0.5 * linear_dist2.sqrt())))
}

/// Return true if the geodesic edge AB crosses the geodesic edge CD at a
/// point that is interior to both edges. Properties:
///
///  (1) simple_crossing(b,a,c,d) == simple_crossing(a,b,c,d)
///  (2) simple_crossing(c,d,a,b) == simple_crossing(a,b,c,d)
pub fn simple_crossing(a: &S2Point, b: &S2Point, c: &S2Point, d: &S2Point) -> bool {
    // We compute simple_ccw for triangles ACB, CBD, BDA, and DAC. All
    // of these triangles need to have the same orientation (CW or CCW)
    // for an intersection to exist. Note that this is slightly more
    // restrictive than the corresponding definition for planar edges,
    // since we need to exclude pairs of line segments that would
    // otherwise "intersect" by crossing two antipodal points.
    let ab = a.cross_prod(b);
    let acb = -ab.dot_prod(c);
    let bda = ab.dot_prod(d);
    if acb * bda <= 0.0 {
        return false;
    }
    let cd = c.cross_prod(d);
    let cbd = -cd.dot_prod(b);
    let dac = cd.dot_prod(a);
    acb * cbd > 0.0 && acb * dac > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn pt(x: f64, y: f64, z: f64) -> S2Point {
        S2Point::new(x, y, z).normalize()
    }

    fn check_distance(x: S2Point, a: S2Point, b: S2Point, expected: f64) {
        assert_relative_eq!(
            get_distance(&x, &a, &b).radians(),
            expected,
            epsilon = 1e-14,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_distance_to_edge() {
        let a = pt(1.0, 0.0, 0.0);
        let b = pt(0.0, 1.0, 0.0);

        // Points whose closest point is in the edge interior.
        check_distance(pt(1.0, 1.0, 0.0), a, b, 0.0);
        check_distance(pt(1.0, 1.0, 1.0), a, b, (1.0f64 / 3.0).sqrt().asin());
        check_distance(pt(0.0, 0.0, 1.0), a, b, PI / 2.0);

        // Points whose closest point is an endpoint.
        check_distance(pt(1.0, -1.0, 0.0), a, b, PI / 4.0);
        check_distance(pt(-1.0, 0.0, 0.0), a, b, PI);
        check_distance(pt(-1.0, -1.0, 0.0), a, b, 0.75 * PI);
    }

    #[test]
    fn test_distance_to_degenerate_edge() {
        let a = pt(1.0, 0.0, 0.0);
        check_distance(pt(0.0, 1.0, 0.0), a, a, PI / 2.0);
        check_distance(a, a, a, 0.0);
    }

    #[test]
    fn test_simple_ccw() {
        let a = pt(1.0, 0.0, 0.0);
        let b = pt(0.0, 1.0, 0.0);
        let c = pt(0.0, 0.0, 1.0);
        assert!(simple_ccw(&c, &a, &b));
        assert!(simple_ccw(&a, &b, &c));
        assert!(!simple_ccw(&c, &b, &a));
    }

    #[test]
    fn test_robust_cross_prod() {
        // Nominally parallel vectors still produce an orthogonal result.
        let a = pt(1.0, 0.0, 0.0);
        let b = pt(1.0, 1e-10, 0.0);
        let x = robust_cross_prod(&a, &a);
        assert_relative_eq!(x.dot_prod(&a), 0.0, epsilon = 1e-15);
        assert!(x.norm() > 0.0);
        let y = robust_cross_prod(&a, &b);
        assert!(y.norm() > 0.0);
        assert_relative_eq!(y.dot_prod(&a), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_simple_crossing() {
        let a = pt(1.0, 0.0, 0.0);
        let b = pt(0.0, 1.0, 0.0);
        let c = pt(1.0, 1.0, 1.0);
        let d = pt(1.0, 1.0, -1.0);
        // CD crosses AB at (1,1,0)/sqrt(2).
        assert!(simple_crossing(&a, &b, &c, &d));
        assert!(simple_crossing(&c, &d, &a, &b));
        assert!(simple_crossing(&b, &a, &c, &d));
        // An edge that stays on one side does not cross.
        let e = pt(1.0, -1.0, 1.0);
        assert!(!simple_crossing(&a, &b, &c, &e));
        // Sharing an endpoint is not an interior crossing.
        assert!(!simple_crossing(&a, &b, &a, &c));
    }
}
