use num_traits::ToPrimitive;

// This file contains documentation of the various coordinate systems used
// throughout the library. Most importantly, S2 defines a framework for
// decomposing the unit sphere into a hierarchy of "cells". Each cell is a
// quadrilateral bounded by four geodesics. The top level of the hierarchy is
// obtained by projecting the six faces of a cube onto the unit sphere, and
// lower levels are obtained by subdividing each cell into four children
// recursively. Cells are numbered such that sequentially increasing cells
// follow a continuous space-filling curve over the entire sphere. The
// transformation is designed to make the cells at each level fairly uniform
// in size.
//
////////////////////////// S2Cell Decomposition /////////////////////////
//
// The following methods define the cube-to-sphere projection used by
// the S2Cell decomposition.
//
// In the process of converting a latitude-longitude pair to a 64-bit cell
// id, the following coordinate systems are used:
//
//  (id)
//    An S2CellId is a 64-bit encoding of a face and a Hilbert curve position
//    on that face. The Hilbert curve position implicitly encodes both the
//    position of a cell and its subdivision level (see s2cell_id.rs).
//
//  (face, i, j)
//    Leaf-cell coordinates. "i" and "j" are integers in the range
//    [0,(2**30)-1] that identify a particular leaf cell on the given face.
//    The (i, j) coordinate system is right-handed on each face, and the
//    faces are oriented such that Hilbert curves connect continuously from
//    one face to the next.
//
//  (face, s, t)
//    Cell-space coordinates. "s" and "t" are real numbers in the range
//    [0,1] that identify a point on the given face. For example, the point
//    (s, t) = (0.5, 0.5) corresponds to the center of the top-level face
//    cell. This point is also a vertex of exactly four cells at each
//    subdivision level greater than zero.
//
//  (face, si, ti)
//    Discrete cell-space coordinates. These are obtained by multiplying
//    "s" and "t" by 2**31 and rounding to the nearest unsigned integer.
//    Discrete coordinates lie in the range [0,2**31]. This coordinate
//    system can represent the edge and center positions of all cells with
//    no loss of precision (including non-leaf cells). In binary, each
//    coordinate of a level-k cell center ends with a 1 followed by
//    (30 - k) 0s. The coordinates of its edges end with (at least)
//    (31 - k) 0s.
//
//  (face, u, v)
//    Cube-space coordinates in the range [-1,1].  To make the cells at each
//    level more uniform in size after they are projected onto the sphere,
//    we apply a nonlinear transformation of the form u=f(s), v=f(t).
//    The (u, v) coordinates after this transformation give the actual
//    coordinates on the cube face (modulo some 90 degree rotations) before
//    it is projected onto the unit sphere.
//
//  (x, y, z)
//    Direction vector (S2Point). Direction vectors are not necessarily unit
//    length, and are often chosen to be points on the biunit cube
//    [-1,+1]x[-1,+1]x[-1,+1]. They can be be normalized to obtain the
//    corresponding point on the unit sphere.
//
//  (lat, lng)
//    Latitude and longitude (S2LatLng). Latitudes must be between -90 and
//    90 degrees inclusive, and longitudes must be between -180 and 180
//    degrees inclusive.
//
// Note that the (i, j), (s, t), (si, ti), and (u, v) coordinate systems are
// right-handed on all six faces.

/// The maximum absolute error in U/V coordinates when converting from XYZ.
///
/// The XYZ -> UV conversion is a single division per coordinate, which is
/// promised to be at most 0.5*DBL_EPSILON absolute error for values with
/// magnitude less than two.
pub const MAX_XYZ_TO_UV_ERROR: f64 = 0.5 * f64::EPSILON;

/// This is the number of levels needed to specify a leaf cell. This
/// constant is defined here so that the conversion functions below can be
/// implemented without including s2cell_id.rs. Please see s2cell_id.rs for
/// other useful constants and conversion functions.
pub const MAX_CELL_LEVEL: i32 = 30;

/// The maximum index of a valid leaf cell plus one. The range of valid leaf
/// cell indices is [0..LIMIT_IJ-1].
pub const LIMIT_IJ: i32 = 1 << MAX_CELL_LEVEL; // == S2CellId::MAX_SIZE

/// The maximum value of an si- or ti-coordinate. The range of valid (si,ti)
/// values is [0..MAX_SITI].
pub const MAX_SITI: u32 = 1 << (MAX_CELL_LEVEL + 1);

/// Absolute error tolerance absorbed by cell bounding rectangles to cover
/// asin/atan2 roundoff when computing vertex latitudes and longitudes.
pub const MAX_ERROR: f64 = 1.0 / (1u64 << 51) as f64;

/// The maximum edge aspect ratio of a cell under the quadratic projection,
/// i.e. the longest edge divided by the shortest edge of the same cell.
pub const MAX_EDGE_ASPECT: f64 = 1.44261527445268292;

/// The maximum diagonal aspect ratio of a cell, sqrt(3).
pub const MAX_DIAG_ASPECT: f64 = 1.7320508075688772;

/// Convert an s- or t-value to the corresponding u- or v-value. This is
/// a non-linear transformation from [0,1] to [-1,1] that attempts to
/// make the cell sizes more uniform.
///
/// This is the canonical (quadratic) projection: every consumer of cell
/// ids must use it, since the Hilbert encoding is calibrated against it.
/// It is about 3x faster than the exact tangent projection and keeps the
/// cell-area nonuniformity bounded by about 2.1.
pub fn st_to_uv(s: f64) -> f64 {
    if s >= 0.5 {
        (1.0 / 3.0) * (4.0 * s * s - 1.0)
    } else {
        (1.0 / 3.0) * (1.0 - 4.0 * (1.0 - s) * (1.0 - s))
    }
}

/// The inverse of the STtoUV transformation. Note that it is not always
/// true that UVtoST(STtoUV(x)) == x due to numerical errors.
pub fn uv_to_st(u: f64) -> f64 {
    if u >= 0.0 {
        0.5 * (1.0 + 3.0 * u).sqrt()
    } else {
        1.0 - 0.5 * (1.0 - 3.0 * u).sqrt()
    }
}

/// The linear variant of the cell-space transform. Faster than the
/// quadratic projection but with cell-area nonuniformity of about 5.2.
/// Provided for auditing consumers that depend on its numerics; the cell
/// decomposition itself always uses `st_to_uv`.
pub fn st_to_uv_linear(s: f64) -> f64 {
    2.0 * s - 1.0
}

pub fn uv_to_st_linear(u: f64) -> f64 {
    0.5 * (u + 1.0)
}

/// The exact tangent variant of the cell-space transform. Gives the most
/// uniform cell sizes but costs two trigonometric evaluations. Provided
/// for auditing; the cell decomposition itself always uses `st_to_uv`.
pub fn st_to_uv_tangent(s: f64) -> f64 {
    let u = (std::f64::consts::FRAC_PI_4 * (2.0 * s - 1.0)).tan();
    // tan(Pi/4) is slightly less than 1.0 in double precision; nudge the
    // result so that st_to_uv_tangent(1.0) == 1.0 exactly.
    u + (1.0 / (1u64 << 53) as f64) * u
}

pub fn uv_to_st_tangent(u: f64) -> f64 {
    (2.0 * std::f64::consts::FRAC_1_PI) * (u.atan() + std::f64::consts::FRAC_PI_4)
}

/// Convert the i- or j-index of a leaf cell to the minimum corresponding s-
/// or t-value contained by that cell. The argument must be in the range
/// [0..2**30], i.e. up to one position beyond the normal range of valid leaf
/// cell indices.
pub fn ij_to_st_min(i: i32) -> f64 {
    debug_assert!((0..=LIMIT_IJ).contains(&i));

    (1.0 / LIMIT_IJ as f64) * (i as f64)
}

/// Return the i- or j-index of the leaf cell containing the given
/// s- or t-value. If the argument is outside the range spanned by valid
/// leaf cell indices, return the index of the closest valid leaf cell (i.e.,
/// return values are clamped to the range of valid leaf cell indices).
///
/// # Examples
/// ```
/// use s2tiling::s2::{st_to_ij, LIMIT_IJ};
///
/// let s = 0.5_f64;
/// assert_eq!(st_to_ij(s), LIMIT_IJ / 2);
/// ```
pub fn st_to_ij(s: f64) -> i32 {
    let index = (LIMIT_IJ as f64 * s - 0.5).round() as i32;
    index.clamp(0, LIMIT_IJ - 1)
}

/// Convert an si- or ti-value to the corresponding s- or t-value.
pub fn siti_to_st(si: u32) -> f64 {
    debug_assert!(si <= MAX_SITI);

    (1.0 / MAX_SITI as f64) * (si as f64)
}

/// Return the si- or ti-coordinate that is nearest to the given s- or
/// t-value. The result may be outside the range of valid (si,ti)-values.
pub fn st_to_siti(s: f64) -> u32 {
    (s * MAX_SITI as f64)
        .round()
        .to_u32()
        .expect("st_to_siti: error when converting")
}

/// Convert (face, u, v) coordinates to a direction vector (not
/// necessarily unit length).
#[rustfmt::skip]
pub fn face_uv_to_xyz(face: i32, u: f64, v: f64) -> S2Point {
    match face {
        0 => S2Point::new( 1.0,    u,    v),
        1 => S2Point::new(  -u,  1.0,    v),
        2 => S2Point::new(  -u,   -v,  1.0),
        3 => S2Point::new(-1.0,   -v,   -u),
        4 => S2Point::new(   v, -1.0,   -u),
        5 => S2Point::new(   v,    u, -1.0),
        _ => panic!("invalid face: {face}"),
    }
}

/// Given a *valid* face for the given point p (meaning that dot product
/// of p with the face normal is positive), return the corresponding
/// u and v values, which may lie outside the range [-1,1].
#[rustfmt::skip]
pub fn valid_face_xyz_to_uv(face: i32, p: &S2Point) -> (f64, f64) {
    debug_assert!(p.dot_prod(&get_norm(face)) > 0.0);
    match face {
        0 => ( p.y() / p.x(),  p.z() / p.x()),
        1 => (-p.x() / p.y(),  p.z() / p.y()),
        2 => (-p.x() / p.z(), -p.y() / p.z()),
        3 => ( p.z() / p.x(),  p.y() / p.x()),
        4 => ( p.z() / p.y(), -p.x() / p.y()),
        5 => (-p.y() / p.z(), -p.x() / p.z()),
        _ => panic!("invalid face: {face}"),
    }
}

/// If the dot product of p with the given face normal is positive, return
/// the corresponding u and v values (which may lie outside the range
/// [-1,1]). Otherwise return None ("p is not on this face").
pub fn face_xyz_to_uv(face: i32, p: &S2Point) -> Option<(f64, f64)> {
    if face < 3 {
        if p[face as usize] <= 0.0 {
            return None;
        }
    } else if p[(face - 3) as usize] >= 0.0 {
        return None;
    }
    Some(valid_face_xyz_to_uv(face, p))
}

/// Convert a direction vector (not necessarily unit length) to
/// (face, u, v) coordinates.
pub fn xyz_to_face_uv(p: &S2Point) -> (i32, f64, f64) {
    let face = get_face(p);
    let (u, v) = valid_face_xyz_to_uv(face, p);
    (face, u, v)
}

/// Return the face containing the given direction vector. (For points on
/// the boundary between faces, the result is arbitrary but repeatable.)
pub fn get_face(p: &S2Point) -> i32 {
    let face = p.largest_abs_component();
    if p[face as usize] < 0.0 {
        face + 3
    } else {
        face
    }
}

/// Return the unit-length normal for the given face.
pub fn get_norm(face: i32) -> S2Point {
    face_uv_to_xyz(face, 0.0, 0.0)
}

/// Return the u-axis for the given face.
#[rustfmt::skip]
pub fn get_u_axis(face: i32) -> S2Point {
    match face {
        0 => S2Point::new( 0.0,  1.0,  0.0),
        1 => S2Point::new(-1.0,  0.0,  0.0),
        2 => S2Point::new(-1.0,  0.0,  0.0),
        3 => S2Point::new( 0.0,  0.0, -1.0),
        4 => S2Point::new( 0.0,  0.0, -1.0),
        5 => S2Point::new( 0.0,  1.0,  0.0),
        _ => panic!("invalid face: {face}"),
    }
}

/// Return the v-axis for the given face.
#[rustfmt::skip]
pub fn get_v_axis(face: i32) -> S2Point {
    match face {
        0 => S2Point::new( 0.0,  0.0,  1.0),
        1 => S2Point::new( 0.0,  0.0,  1.0),
        2 => S2Point::new( 0.0, -1.0,  0.0),
        3 => S2Point::new( 0.0, -1.0,  0.0),
        4 => S2Point::new( 1.0,  0.0,  0.0),
        5 => S2Point::new( 1.0,  0.0,  0.0),
        _ => panic!("invalid face: {face}"),
    }
}

/// Return the outward-facing normal of the plane through the two sphere
/// points corresponding to cube-space coordinates (u, -1) and (u, +1) on
/// the given face (i.e. the plane of a line of constant u).
#[rustfmt::skip]
pub fn get_u_norm(face: i32, u: f64) -> S2Point {
    match face {
        0 => S2Point::new(   u, -1.0,  0.0),
        1 => S2Point::new( 1.0,    u,  0.0),
        2 => S2Point::new( 1.0,  0.0,    u),
        3 => S2Point::new(  -u,  0.0,  1.0),
        4 => S2Point::new( 0.0,   -u,  1.0),
        5 => S2Point::new( 0.0, -1.0,   -u),
        _ => panic!("invalid face: {face}"),
    }
}

/// Return the outward-facing normal of the plane of a line of constant v
/// on the given face.
#[rustfmt::skip]
pub fn get_v_norm(face: i32, v: f64) -> S2Point {
    match face {
        0 => S2Point::new(  -v,  0.0,  1.0),
        1 => S2Point::new( 0.0,   -v,  1.0),
        2 => S2Point::new( 0.0, -1.0,   -v),
        3 => S2Point::new(   v, -1.0,  0.0),
        4 => S2Point::new( 1.0,    v,  0.0),
        5 => S2Point::new( 1.0,  0.0,    v),
        _ => panic!("invalid face: {face}"),
    }
}

pub mod internal;
pub mod r2;
pub mod s2cell;
pub mod s2cell_id;
pub mod s2edge_util;
pub mod s2latlng;
pub mod s2latlng_rect;
pub mod s2point;
pub mod s2region;
pub mod s2region_coverer;

pub use s2cell::S2Cell;
pub use s2cell_id::S2CellId;
pub use s2latlng::S2LatLng;
pub use s2latlng_rect::S2LatLngRect;
pub use s2point::S2Point;
pub use s2region::S2Region;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_st_uv_conversions() {
        // Fixed points of the quadratic transform.
        assert_eq!(st_to_uv(0.0), -1.0);
        assert_eq!(st_to_uv(0.5), 0.0);
        assert_eq!(st_to_uv(1.0), 1.0);
        assert_eq!(uv_to_st(-1.0), 0.0);
        assert_eq!(uv_to_st(0.0), 0.5);
        assert_eq!(uv_to_st(1.0), 1.0);

        // Round trips to within 1e-15.
        for k in 0..=1000 {
            let s = k as f64 / 1000.0;
            assert_relative_eq!(uv_to_st(st_to_uv(s)), s, epsilon = 1e-15, max_relative = 1e-15);
            let u = 2.0 * s - 1.0;
            assert_relative_eq!(st_to_uv(uv_to_st(u)), u, epsilon = 1e-15, max_relative = 1e-15);
        }
    }

    #[test]
    fn test_st_uv_variants() {
        for k in 0..=100 {
            let s = k as f64 / 100.0;
            assert_relative_eq!(uv_to_st_linear(st_to_uv_linear(s)), s, epsilon = 1e-15);
            assert_relative_eq!(
                uv_to_st_tangent(st_to_uv_tangent(s)),
                s,
                epsilon = 1e-14,
                max_relative = 1e-14
            );
        }
        assert_eq!(st_to_uv_linear(0.5), 0.0);
        assert_eq!(st_to_uv_tangent(0.5), 0.0);
        assert_eq!(st_to_uv_tangent(1.0), 1.0);
    }

    #[test]
    fn test_face_uv_to_xyz() {
        // The center of each face should be its unit normal, and the normals
        // of consecutive axis faces should be cyclic rotations of each other.
        let mut sum = S2Point::zero();
        for face in 0..6 {
            let center = face_uv_to_xyz(face, 0.0, 0.0);
            assert_eq!(center, get_norm(face));
            assert_eq!(center[center.largest_abs_component() as usize].abs(), 1.0);
            sum = sum + center.abs();
        }
        assert_eq!(sum, S2Point::new(2.0, 2.0, 2.0));

        // The axes on each face must form a right-handed coordinate frame.
        for face in 0..6 {
            assert_eq!(get_u_axis(face).cross_prod(&get_v_axis(face)), get_norm(face));
        }

        // Check that the Hilbert curves on each face combine to form a
        // continuous curve over the entire cube: the u-axis of one face must
        // match the v-axis of the next.
        for face in 0..6 {
            let sign = if face & 1 != 0 { -1.0 } else { 1.0 };
            assert_eq!(face_uv_to_xyz(face, sign, -sign), face_uv_to_xyz((face + 1) % 6, -1.0, -1.0));
        }
    }

    #[test]
    fn test_uv_norms() {
        // Check that the norm of the u-line matches the cross product of the
        // two points defining it.
        for face in 0..6 {
            for k in -10..=10 {
                let u = k as f64 / 10.0;
                let a = face_uv_to_xyz(face, u, -1.0);
                let b = face_uv_to_xyz(face, u, 1.0);
                assert_relative_eq!(a.cross_prod(&b).normalize(), get_u_norm(face, u).normalize(), epsilon = 1e-15);
                let c = face_uv_to_xyz(face, -1.0, u);
                let d = face_uv_to_xyz(face, 1.0, u);
                assert_relative_eq!(c.cross_prod(&d).normalize(), get_v_norm(face, u).normalize(), epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_face_xyz_to_uv() {
        let p = S2Point::new(1.1, 1.2, 1.3);
        let p_neg = S2Point::new(-1.1, -1.2, -1.3);
        assert_eq!(face_xyz_to_uv(0, &p), Some((1.2 / 1.1, 1.3 / 1.1)));
        assert_eq!(face_xyz_to_uv(0, &p_neg), None);

        // Round trip through every face.
        for face in 0..6 {
            let center = get_norm(face);
            assert_eq!(get_face(&center), face);
            let (u, v) = valid_face_xyz_to_uv(face, &center);
            assert_eq!((u, v), (0.0, 0.0));
            let (f, u, v) = xyz_to_face_uv(&face_uv_to_xyz(face, 0.3, -0.7));
            assert_eq!(f, face);
            assert_relative_eq!(u, 0.3, epsilon = 1e-15);
            assert_relative_eq!(v, -0.7, epsilon = 1e-15);
        }
    }
}
