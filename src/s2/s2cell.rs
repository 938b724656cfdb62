// Copyright 2005 Google Inc. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS-IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

// Original Author: ericv@google.com (Eric Veach)

use std::f64::consts::PI;

use lazy_static::lazy_static;

use crate::r1::R1Interval;
use crate::r2::R2Rect;
use crate::s1::S1Interval;
use crate::s2::{
    face_uv_to_xyz, face_xyz_to_uv, get_u_axis, get_u_norm, get_v_axis, get_v_norm, MAX_ERROR,
};
use crate::s2::r2::R2Point;
use crate::s2::s2cell_id::S2CellId;
use crate::s2::s2latlng::S2LatLng;
use crate::s2::s2latlng_rect::S2LatLngRect;
use crate::s2::s2point::S2Point;
use crate::s2::s2region::S2Region;

lazy_static! {
    /// The latitude reached by the four vertices of the two polar face
    /// cells: asin(sqrt(1/3)), less the bounding-rectangle error margin.
    pub static ref POLE_MIN_LAT: f64 = f64::asin((1.0f64 / 3.0).sqrt()) - MAX_ERROR;
}

/// An S2Cell is an S2Region object that represents a cell. Unlike S2CellId's,
/// it supports efficient containment and intersection tests. However, it is
/// also a more expensive representation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct S2Cell {
    id: S2CellId,
    face: i32,
    level: i32,
    orientation: i32,
    uv: R2Rect,
}

impl S2Cell {
    /// Creates an S2Cell from the given cell id, decoding its face, level,
    /// orientation and cube-space bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use s2tiling::s2::{S2Cell, S2CellId};
    ///
    /// let cell = S2Cell::new(S2CellId::from_face(2));
    /// assert_eq!(cell.face(), 2);
    /// assert_eq!(cell.level(), 0);
    /// ```
    pub fn new(id: S2CellId) -> Self {
        let (face, i, j, orientation) = id.to_face_ij_orientation();
        let level = id.level();
        S2Cell {
            id,
            face,
            orientation,
            level,
            uv: S2CellId::ij_level_to_bound_uv(i, j, level),
        }
    }

    /// The cell at level 0 covering the given face.
    pub fn from_face(face: i32) -> Self {
        S2Cell::new(S2CellId::from_face(face))
    }

    /// The leaf cell containing the given point.
    pub fn from_point(p: &S2Point) -> Self {
        S2Cell::new(S2CellId::from_point(p))
    }

    /// The leaf cell containing the given normalized latitude-longitude.
    pub fn from_lat_lng(ll: &S2LatLng) -> Self {
        S2Cell::new(S2CellId::from_lat_lng(ll))
    }

    pub fn id(&self) -> S2CellId {
        self.id
    }

    pub fn face(&self) -> i32 {
        self.face
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// The Hilbert curve orientation of this cell, as a combination of
    /// the swap and invert masks.
    pub fn orientation(&self) -> i32 {
        self.orientation
    }

    pub fn is_leaf(&self) -> bool {
        self.level == S2CellId::MAX_LEVEL
    }

    /// The bounds of this cell in (u,v)-space.
    pub fn get_bound_uv(&self) -> &R2Rect {
        &self.uv
    }

    /// Return the k-th vertex of the cell (k = 0,1,2,3) in the order SW,
    /// SE, NE, NW. The returned vector is not necessarily unit length.
    pub fn get_vertex_raw(&self, k: i32) -> S2Point {
        debug_assert!((0..4).contains(&k));
        face_uv_to_xyz(
            self.face,
            self.uv[0][((k >> 1) ^ (k & 1)) as usize],
            self.uv[1][(k >> 1) as usize],
        )
    }

    /// Return the k-th vertex of the cell, normalized to unit length.
    pub fn get_vertex(&self, k: i32) -> S2Point {
        self.get_vertex_raw(k).normalize()
    }

    /// Return the inward-facing normal of the great circle passing through
    /// the edge from vertex k to vertex k+1 (mod 4). The normals returned
    /// by get_edge_raw are not necessarily unit length, and follow the
    /// edge order S, E, N, W.
    pub fn get_edge_raw(&self, k: i32) -> S2Point {
        match k {
            0 => get_v_norm(self.face, self.uv[1][0]), // South
            1 => get_u_norm(self.face, self.uv[0][1]), // East
            2 => -get_v_norm(self.face, self.uv[1][1]), // North
            _ => -get_u_norm(self.face, self.uv[0][0]), // West
        }
    }

    /// Like `get_edge_raw`, normalized to unit length.
    pub fn get_edge(&self, k: i32) -> S2Point {
        self.get_edge_raw(k).normalize()
    }

    /// The direction vector of the cell center, not necessarily unit
    /// length.
    pub fn get_center_raw(&self) -> S2Point {
        self.id.to_point_raw()
    }

    /// The unit-length direction vector of the cell center.
    pub fn get_center(&self) -> S2Point {
        self.get_center_raw().normalize()
    }

    /// The average area of cells at the given level, in steradians. All
    /// cells at a given level partition the 4*Pi steradians of the sphere
    /// into 6 * 4^level pieces.
    pub fn average_area_at_level(level: i32) -> f64 {
        (4.0 * PI / 6.0) * 0.25f64.powi(level)
    }

    /// The average area of cells at this cell's level.
    pub fn average_area(&self) -> f64 {
        S2Cell::average_area_at_level(self.level)
    }

    /// Return true if the cell contains the given point. The point does
    /// not need to be unit length.
    pub fn contains_point(&self, p: &S2Point) -> bool {
        // We can't just call xyz_to_face_uv, because for points that lie on
        // the boundary between two faces (i.e. u or v is +1/-1) we need to
        // return true for both adjacent cells.
        match face_xyz_to_uv(self.face, p) {
            Some((u, v)) => self.uv.contains(&R2Point::new(u, v)),
            None => false,
        }
    }

    /// Latitude of the cell corner selected by (i, j), where i selects the
    /// u-extreme and j the v-extreme.
    fn get_latitude(&self, i: usize, j: usize) -> f64 {
        let p = face_uv_to_xyz(self.face, self.uv[0][i], self.uv[1][j]);
        f64::atan2(p.z(), (p.x() * p.x() + p.y() * p.y()).sqrt())
    }

    /// Longitude of the cell corner selected by (i, j).
    fn get_longitude(&self, i: usize, j: usize) -> f64 {
        let p = face_uv_to_xyz(self.face, self.uv[0][i], self.uv[1][j]);
        f64::atan2(p.y(), p.x())
    }
}

impl S2Region for S2Cell {
    fn get_rect_bound(&self) -> S2LatLngRect {
        if self.level > 0 {
            // Except for cells at level 0, the latitude and longitude
            // extremes are attained at the vertices. Furthermore, the
            // latitude range is determined by one pair of diagonally
            // opposite vertices and the longitude range is determined by
            // the other pair.
            //
            // We first determine which corner (i,j) of the cell has the
            // largest absolute latitude. To maximize latitude, we want to
            // find the point in the cell that has the largest absolute
            // z-coordinate and the smallest absolute x- and y-coordinates.
            // To do this we look at each coordinate (u and v), and
            // determine whether we want to minimize or maximize that
            // coordinate based on the axis directions and the cell's (u,v)
            // quadrant.
            let u = self.uv[0].lo() + self.uv[0].hi();
            let v = self.uv[1].lo() + self.uv[1].hi();
            let i = if get_u_axis(self.face).z() == 0.0 {
                (u < 0.0) as usize
            } else {
                (u > 0.0) as usize
            };
            let j = if get_v_axis(self.face).z() == 0.0 {
                (v < 0.0) as usize
            } else {
                (v > 0.0) as usize
            };

            // The remaining expansion absorbs the asin/atan2 roundoff in
            // computing the vertex latitudes and longitudes.
            let lat = R1Interval::from_point_pair(
                self.get_latitude(i, j),
                self.get_latitude(1 - i, 1 - j),
            )
            .expanded(MAX_ERROR)
            .intersection(&S2LatLngRect::full_lat());
            if lat.lo() == -PI / 2.0 || lat.hi() == PI / 2.0 {
                // A vertex touches a pole; the cell spans all longitudes
                // there.
                return S2LatLngRect::from_intervals(lat, S1Interval::full());
            }
            let lng = S1Interval::from_point_pair(
                self.get_longitude(i, 1 - j),
                self.get_longitude(1 - i, j),
            );
            return S2LatLngRect::from_intervals(lat, lng.expanded(MAX_ERROR));
        }

        // The 4 cells around the equator extend to +/-45 degrees latitude
        // at the midpoints of their top and bottom edges. The two cells
        // covering the poles extend down to +/-35.26 degrees at their
        // vertices.
        match self.face {
            0 => S2LatLngRect::from_intervals(
                R1Interval::new(-PI / 4.0, PI / 4.0),
                S1Interval::new(-PI / 4.0, PI / 4.0),
            ),
            1 => S2LatLngRect::from_intervals(
                R1Interval::new(-PI / 4.0, PI / 4.0),
                S1Interval::new(PI / 4.0, 3.0 * PI / 4.0),
            ),
            2 => S2LatLngRect::from_intervals(
                R1Interval::new(*POLE_MIN_LAT, PI / 2.0),
                S1Interval::full(),
            ),
            3 => S2LatLngRect::from_intervals(
                R1Interval::new(-PI / 4.0, PI / 4.0),
                S1Interval::new(3.0 * PI / 4.0, -3.0 * PI / 4.0),
            ),
            4 => S2LatLngRect::from_intervals(
                R1Interval::new(-PI / 4.0, PI / 4.0),
                S1Interval::new(-3.0 * PI / 4.0, -PI / 4.0),
            ),
            _ => S2LatLngRect::from_intervals(
                R1Interval::new(-PI / 2.0, -*POLE_MIN_LAT),
                S1Interval::full(),
            ),
        }
    }

    fn contains(&self, p: &S2Point) -> bool {
        self.contains_point(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_faces() {
        // Check that each face vertex and edge appears exactly the
        // expected number of times across all six face cells, and that the
        // coordinate frames are consistent.
        for face in 0..6 {
            let cell = S2Cell::from_face(face);
            assert_eq!(cell.id(), S2CellId::from_face(face));
            assert_eq!(cell.face(), face);
            assert_eq!(cell.level(), 0);
            // Top-level faces have alternating orientations to get RH
            // coordinates.
            assert_eq!(cell.orientation(), face & 1);
            assert!(!cell.is_leaf());
            // The raw vertices of a face cell are corners of the unit cube.
            for k in 0..4 {
                let v = cell.get_vertex_raw(k);
                assert_eq!(v.abs(), S2Point::new(1.0, 1.0, 1.0));
            }
            // Edge normals face into the cell.
            let center = cell.get_center();
            for k in 0..4 {
                assert!(cell.get_edge(k).dot_prod(&center) > 0.0);
            }
            // The center of a face cell is the face normal.
            assert_eq!(cell.get_center(), crate::s2::get_norm(face));
        }
    }

    #[test]
    fn test_face_cell_rect_bounds() {
        // The hard-coded level 0 bounds.
        let expected_lat: [(f64, f64); 6] = [
            (-PI / 4.0, PI / 4.0),
            (-PI / 4.0, PI / 4.0),
            (*POLE_MIN_LAT, PI / 2.0),
            (-PI / 4.0, PI / 4.0),
            (-PI / 4.0, PI / 4.0),
            (-PI / 2.0, -*POLE_MIN_LAT),
        ];
        for face in 0..6 {
            let bound = S2Cell::from_face(face).get_rect_bound();
            assert_eq!(bound.lat_lo().radians(), expected_lat[face as usize].0);
            assert_eq!(bound.lat_hi().radians(), expected_lat[face as usize].1);
            if face == 2 || face == 5 {
                assert!(bound.lng().is_full());
            }
        }
        // The two inverted / seam-crossing equatorial faces.
        let f3 = S2Cell::from_face(3).get_rect_bound();
        assert!(f3.is_inverted());
        assert_eq!(f3.lng_lo().radians(), 3.0 * PI / 4.0);
        assert_eq!(f3.lng_hi().radians(), -3.0 * PI / 4.0);
    }

    #[test]
    fn test_rect_bound_contains_cell() {
        // The bounding rectangle of a cell contains its center and all
        // four of its (normalized) vertices, at a sampling of levels and
        // positions.
        let points = [
            S2LatLng::from_degrees(0.0, 0.0),
            S2LatLng::from_degrees(45.0, 45.0),
            S2LatLng::from_degrees(-37.0, 178.5),
            S2LatLng::from_degrees(85.0, -123.0),
            S2LatLng::from_degrees(-90.0, 0.0),
        ];
        for ll in &points {
            let leaf = S2CellId::from_lat_lng(ll);
            for level in [1, 4, 11, 20, 30] {
                let cell = S2Cell::new(leaf.parent(level));
                let bound = cell.get_rect_bound();
                assert!(bound.contains_point(&cell.get_center()));
                for k in 0..4 {
                    assert!(bound.contains_point(&cell.get_vertex(k)));
                    assert!(cell.contains_point(&cell.get_vertex_raw(k)));
                }
            }
        }
    }

    #[test]
    fn test_vertex_order_is_ccw() {
        // Vertices must be in CCW order around the cell, which means each
        // consecutive triple (v[k], v[k+1], center) keeps the same sign.
        let cell = S2Cell::new(S2CellId::from_lat_lng(&S2LatLng::from_degrees(10.0, 20.0)).parent(9));
        let center = cell.get_center();
        for k in 0..4 {
            let a = cell.get_vertex(k);
            let b = cell.get_vertex((k + 1) & 3);
            assert!(crate::s2::s2edge_util::simple_ccw(&a, &b, &center));
        }
    }

    #[test]
    fn test_edges_bound_the_cell() {
        // Every point of the cell has non-negative dot product with every
        // inward edge normal; use the vertices as the extreme points.
        let cell = S2Cell::new(
            S2CellId::from_lat_lng(&S2LatLng::from_degrees(-33.0, 151.0)).parent(7),
        );
        for k in 0..4 {
            let edge = cell.get_edge(k);
            for v in 0..4 {
                assert!(edge.dot_prod(&cell.get_vertex(v)) > -1e-15);
            }
            // The two vertices on the edge itself are (nearly) on its
            // great circle.
            let va = cell.get_vertex(k);
            let vb = cell.get_vertex((k + 1) & 3);
            assert!(edge.dot_prod(&va).abs() < 1e-15);
            assert!(edge.dot_prod(&vb).abs() < 1e-15);
        }
    }

    #[test]
    fn test_average_area() {
        // The six face cells partition the sphere.
        assert_relative_eq!(6.0 * S2Cell::average_area_at_level(0), 4.0 * PI);
        // Each level quarters the area.
        assert_relative_eq!(
            S2Cell::average_area_at_level(5),
            4.0 * S2Cell::average_area_at_level(6)
        );
        let leaf = S2Cell::from_lat_lng(&S2LatLng::from_degrees(1.0, 2.0));
        assert_eq!(leaf.average_area(), S2Cell::average_area_at_level(30));
    }

    #[test]
    fn test_rect_bound_at_poles() {
        // A cell whose vertex touches the pole must span all longitudes.
        let south = S2CellId::from_lat_lng(&S2LatLng::from_degrees(-90.0, 0.0));
        let cell = S2Cell::new(south.parent(5));
        let bound = cell.get_rect_bound();
        assert!(bound.lng().is_full());
        assert_eq!(bound.lat_lo().radians(), -PI / 2.0);
    }

    #[test]
    fn test_level0_ancestor_bound() {
        // The level-0 ancestor of the leaf containing (Pi/4, 0) is the
        // face 0 cell, whose bound is the quarter-sphere square.
        let leaf = S2CellId::from_lat_lng(&S2LatLng::from_radians(PI / 4.0, 0.0));
        let cell = S2Cell::new(leaf.parent(0));
        let bound = cell.get_rect_bound();
        assert_eq!(bound.lat_lo().radians(), -PI / 4.0);
        assert_eq!(bound.lat_hi().radians(), PI / 4.0);
        assert_eq!(bound.lng_lo().radians(), -PI / 4.0);
        assert_eq!(bound.lng_hi().radians(), PI / 4.0);
    }
}
