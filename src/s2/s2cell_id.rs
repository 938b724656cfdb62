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

use std::fmt;

use lazy_static::lazy_static;

use crate::{
    error::S2Error,
    r1::R1Interval,
    r2::R2Rect,
    s2::{
        face_uv_to_xyz, ij_to_st_min, siti_to_st, st_to_ij, st_to_uv, uv_to_st, xyz_to_face_uv,
        internal::{INVERT_MASK, POS_TO_IJ, POS_TO_ORIENTATION, SWAP_MASK},
        s2latlng::S2LatLng,
        s2point::S2Point,
    },
};

/// An S2CellId is a 64-bit unsigned integer that uniquely identifies a
/// cell in the S2 cell decomposition. It has the following format:
///
///   id = [face][face_pos]
///
///   face:     a 3-bit number (range 0..5) encoding the cube face.
///
///   face_pos: a 61-bit number encoding the position of the center of this
///             cell along the Hilbert curve over this face.
///
/// Sequentially increasing cell ids follow a continuous space-filling curve
/// over the entire sphere. They have the following properties:
///
///  - The id of a cell at level k consists of a 3-bit face number followed
///    by k bit pairs that recursively select one of the four children of
///    each cell. The next bit is always 1, and all other bits are 0.
///    Therefore, the level of a cell is determined by the position of its
///    lowest-numbered bit that is turned on (for a cell at level k, this
///    position is 2 * (S2CellId::MAX_LEVEL - k).)
///
///  - The id of a parent cell is at the midpoint of the range of ids spanned
///    by its children (or by its descendants at any level).
///
/// Leaf cells are often used to represent points on the unit sphere, and
/// this class provides methods for converting directly between these two
/// representations. For cells that represent 2D regions rather than
/// discrete point, it is better to use the S2Cell class.
///
/// All methods require `is_valid()` to be true unless otherwise specified
/// (although not all methods enforce this).
///
/// This class is intended to be copied by value as desired.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct S2CellId {
    id: u64,
}

/// The following lookup tables are used to convert efficiently between an
/// (i,j) cell index and the corresponding position along the Hilbert curve.
/// "lookup_pos" maps 4 bits of "i", 4 bits of "j", and 2 bits representing the
/// orientation of the current cell into 8 bits representing the order in which
/// that subcell is visited by the Hilbert curve, plus 2 bits indicating the
/// new orientation of the Hilbert curve within that subcell. (Cell
/// orientations are represented as combination of s2::internal::SWAP_MASK and
/// s2::internal::INVERT_MASK.)
///
/// "lookup_ij" is an inverted table used for mapping in the opposite
/// direction.
const LOOKUP_BITS: i32 = 4;
const LOOKUP_TABLE_SIZE: usize = 1 << (2 * LOOKUP_BITS + 2);

lazy_static! {
    static ref LOOKUP_TABLES: ([u16; LOOKUP_TABLE_SIZE], [u16; LOOKUP_TABLE_SIZE]) =
        init_lookup_tables();
    static ref LOOKUP_POS: &'static [u16; LOOKUP_TABLE_SIZE] = &LOOKUP_TABLES.0;
    static ref LOOKUP_IJ: &'static [u16; LOOKUP_TABLE_SIZE] = &LOOKUP_TABLES.1;
}

#[rustfmt::skip]
fn init_lookup_tables() -> ([u16; LOOKUP_TABLE_SIZE], [u16; LOOKUP_TABLE_SIZE]) {
    let mut lookup_pos = [0u16; LOOKUP_TABLE_SIZE];
    let mut lookup_ij = [0u16; LOOKUP_TABLE_SIZE];

    // The tables are filled by the recursive Hilbert construction: at each
    // level, the traversal order and child orientations of a subcell are
    // given by POS_TO_IJ / POS_TO_ORIENTATION for the parent orientation.
    #[allow(clippy::too_many_arguments)]
    fn init_lookup_cell(
        level: i32, i: i32, j: i32, orig_orientation: i32, pos: i32, orientation: i32,
        lookup_pos: &mut [u16; LOOKUP_TABLE_SIZE], lookup_ij: &mut [u16; LOOKUP_TABLE_SIZE]
    ) {
        if level == LOOKUP_BITS {
            let ij: i32 = (i << LOOKUP_BITS) + j;
            lookup_pos[((ij << 2) + orig_orientation) as usize] = ((pos << 2) + orientation) as u16;
            lookup_ij[((pos << 2) + orig_orientation) as usize] = ((ij << 2) + orientation) as u16;
        } else {
            let level = level + 1;
            let i = i << 1;
            let j = j << 1;
            let pos = pos << 2;
            let r: [i32; 4] = POS_TO_IJ[orientation as usize];
            init_lookup_cell(level, i + (r[0] >> 1), j + (r[0] & 1), orig_orientation, pos,
                orientation ^ POS_TO_ORIENTATION[0], lookup_pos, lookup_ij);
            init_lookup_cell(level, i + (r[1] >> 1), j + (r[1] & 1), orig_orientation, pos + 1,
                orientation ^ POS_TO_ORIENTATION[1], lookup_pos, lookup_ij);
            init_lookup_cell(level, i + (r[2] >> 1), j + (r[2] & 1), orig_orientation, pos + 2,
                orientation ^ POS_TO_ORIENTATION[2], lookup_pos, lookup_ij);
            init_lookup_cell(level, i + (r[3] >> 1), j + (r[3] & 1), orig_orientation, pos + 3,
                orientation ^ POS_TO_ORIENTATION[3], lookup_pos, lookup_ij);
        }
    }

    init_lookup_cell(0, 0, 0, 0, 0, 0, &mut lookup_pos, &mut lookup_ij);
    init_lookup_cell(0, 0, 0, SWAP_MASK, 0, SWAP_MASK, &mut lookup_pos, &mut lookup_ij);
    init_lookup_cell(0, 0, 0, INVERT_MASK, 0, INVERT_MASK, &mut lookup_pos, &mut lookup_ij);
    init_lookup_cell(0, 0, 0, SWAP_MASK | INVERT_MASK, 0, SWAP_MASK | INVERT_MASK, &mut lookup_pos, &mut lookup_ij);

    (lookup_pos, lookup_ij)
}

impl S2CellId {
    // Although only 60 bits are needed to represent the index of a leaf cell, the
    // extra position bit lets us encode each cell as its Hilbert curve position
    // at the cell center, which is halfway along the portion of the Hilbert curve
    // that fills that cell.
    pub const FACE_BITS: i32 = 3;
    pub const NUM_FACES: i32 = 6;
    pub const MAX_LEVEL: i32 = 30;
    pub const POS_BITS: i32 = 2 * S2CellId::MAX_LEVEL + 1;
    pub const MAX_SIZE: i32 = 1 << S2CellId::MAX_LEVEL;

    // The id of the first face cell plus one face worth of positions; ids at
    // or beyond this value have run off the end of the Hilbert curve.
    const WRAP_OFFSET: u64 = (S2CellId::NUM_FACES as u64) << S2CellId::POS_BITS;

    /// Creates a new S2CellId from a 64-bit unsigned integer. The argument
    /// is not checked; use `S2CellId::try_from(u64)` to validate untrusted
    /// input.
    ///
    /// # Examples
    ///
    /// ```
    /// use s2tiling::s2::s2cell_id::S2CellId;
    ///
    /// let cell_id = S2CellId::new(0x1000000000000000);
    /// assert_eq!(cell_id.id(), 0x1000000000000000);
    /// ```
    pub fn new(id: u64) -> S2CellId {
        S2CellId { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Which cube face this cell belongs to, in the range 0..5.
    pub fn face(&self) -> i32 {
        (self.id >> S2CellId::POS_BITS) as i32
    }

    /// The position of the cell center along the Hilbert curve over this
    /// face, in the range 0..(2**POS_BITS-1).
    pub fn pos(&self) -> u64 {
        self.id & (u64::MAX >> S2CellId::FACE_BITS)
    }

    /// Return the subdivision level of the cell (range 0..MAX_LEVEL).
    pub fn level(&self) -> i32 {
        // A special case for leaf cells is not worthwhile.
        debug_assert!(self.id != 0);
        S2CellId::MAX_LEVEL - (self.id.trailing_zeros() as i32 >> 1)
    }

    /// Returns an invalid cell id.
    ///
    /// # Examples
    ///
    /// ```
    /// use s2tiling::s2::s2cell_id::S2CellId;
    ///
    /// let invalid = S2CellId::none();
    /// assert!(!invalid.is_valid());
    /// ```
    pub fn none() -> S2CellId {
        S2CellId::new(0)
    }

    /// Returns an invalid cell id guaranteed to be larger than any valid
    /// cell id. Useful for creating indexes.
    pub fn sentinel() -> S2CellId {
        S2CellId::new(u64::MAX)
    }

    /// Return the cell corresponding to a given cube face, at level 0.
    pub fn from_face(face: i32) -> S2CellId {
        debug_assert!((0..S2CellId::NUM_FACES).contains(&face));
        S2CellId::new(((face as u64) << S2CellId::POS_BITS) + S2CellId::lsb_for_level(0))
    }

    /// Return a cell given its face (range 0..5), Hilbert curve position
    /// within that face (an unsigned integer of which the high POS_BITS are
    /// significant), and level (range 0..MAX_LEVEL). The given position will
    /// be modified to correspond to the Hilbert curve position at the center
    /// of the returned cell.
    pub fn from_face_pos_level(face: i32, pos: u64, level: i32) -> Result<S2CellId, S2Error> {
        if !(0..S2CellId::NUM_FACES).contains(&face) {
            return Err(S2Error::InvalidCellId((face as u64) << S2CellId::POS_BITS));
        }
        if !(0..=S2CellId::MAX_LEVEL).contains(&level) {
            return Err(S2Error::InvalidLevel(level));
        }
        let cell = S2CellId::new(((face as u64) << S2CellId::POS_BITS) + (pos | 1));
        Ok(cell.parent(level))
    }

    /// Construct a leaf cell containing the given point. Usually there is
    /// exactly one such cell, but for points along the edge of a cell, any
    /// adjacent cell may be (deterministically) chosen. The point does not
    /// need to be normalized.
    pub fn from_point(p: &S2Point) -> S2CellId {
        let (face, u, v) = xyz_to_face_uv(p);
        let i = st_to_ij(uv_to_st(u));
        let j = st_to_ij(uv_to_st(v));
        S2CellId::from_face_ij(face, i, j)
    }

    /// Construct a leaf cell containing the given normalized latitude and
    /// longitude.
    pub fn from_lat_lng(ll: &S2LatLng) -> S2CellId {
        S2CellId::from_point(&ll.to_point())
    }

    /// The direction vector towards the center of the cell. The vector
    /// returned by this method is not necessarily unit length.
    pub fn to_point_raw(&self) -> S2Point {
        let (face, si, ti) = self.get_center_siti();
        face_uv_to_xyz(
            face,
            st_to_uv(siti_to_st(si)),
            st_to_uv(siti_to_st(ti)),
        )
    }

    /// The unit-length direction vector towards the center of the cell.
    pub fn to_point(&self) -> S2Point {
        self.to_point_raw().normalize()
    }

    /// The latitude-longitude of the cell center.
    pub fn to_lat_lng(&self) -> S2LatLng {
        S2LatLng::from_point(&self.to_point_raw())
    }

    /// Return the (face, si, ti) coordinates of the center of the cell.
    /// Note that although (si,ti) coordinates span the range [0,2**31] in
    /// general, the cell center coordinates are always in the range
    /// [1,2**31-1] and therefore can be represented using a signed 32-bit
    /// integer.
    pub fn get_center_siti(&self) -> (i32, u32, u32) {
        // First we compute the discrete (i,j) coordinates of a leaf cell
        // contained within the given cell. Given that cells are represented
        // by the Hilbert curve position corresponding at their center, it
        // turns out that the cell returned by to_face_ij_orientation is
        // always one of two leaf cells closest to the center of the cell
        // (unless the given cell is a leaf cell itself, in which case there
        // is only one possibility).
        //
        // Given a cell of size s >= 2 (i.e. not a leaf cell), and letting
        // (imin, jmin) be the coordinates of its lower left-hand corner, the
        // leaf cell returned by to_face_ij_orientation is either
        // (imin + s/2, jmin + s/2) (imin + s/2 - 1, jmin + s/2 - 1). The
        // first case is the one we want. We can distinguish these two cases
        // by looking at the low bit of "i" or "j". In the second case the
        // low bit is one, unless s == 2 (i.e. the level just above leaf
        // cells) in which case the low bit is zero.
        //
        // In the code below, the expression ((i ^ (int(id_) >> 2)) & 1)
        // is true if we are in the second case described above.
        let (face, i, j, _) = self.to_face_ij_orientation();
        let delta: i64 = if self.is_leaf() {
            1
        } else if ((i as u64 ^ (self.id >> 2)) & 1) != 0 {
            2
        } else {
            0
        };
        let si = (2 * i as i64 + delta) as u32;
        let ti = (2 * j as i64 + delta) as u32;
        (face, si, ti)
    }

    /// Return the edge length of this cell in (i,j)-space.
    pub fn get_size_ij(&self) -> i32 {
        S2CellId::get_size_ij_at_level(self.level())
    }

    /// Like `get_size_ij()`, but return the size of cells at the given level.
    pub fn get_size_ij_at_level(level: i32) -> i32 {
        debug_assert!((0..=S2CellId::MAX_LEVEL).contains(&level));
        1 << (S2CellId::MAX_LEVEL - level)
    }

    /// Return the edge length of this cell in (s,t)-space.
    pub fn get_size_st(&self) -> f64 {
        S2CellId::get_size_st_at_level(self.level())
    }

    /// Like `get_size_st()`, but return the size of cells at the given level.
    pub fn get_size_st_at_level(level: i32) -> f64 {
        ij_to_st_min(S2CellId::get_size_ij_at_level(level))
    }

    /// Return true if id() represents a valid cell.
    ///
    /// All methods require is_valid() to be true unless otherwise specified
    /// (although not all methods enforce this).
    pub fn is_valid(&self) -> bool {
        self.face() < S2CellId::NUM_FACES && (self.lsb() & 0x1555555555555555) != 0
    }

    /// Return true if this is a leaf cell (more efficient than checking
    /// whether level() == MAX_LEVEL).
    pub fn is_leaf(&self) -> bool {
        self.id & 1 != 0
    }

    /// Return true if this is a top-level face cell (more efficient than
    /// checking whether level() == 0).
    pub fn is_face(&self) -> bool {
        self.id & (S2CellId::lsb_for_level(0) - 1) == 0
    }

    /// Return the child position (0..3) of this cell within its parent.
    /// Requires level() >= 1.
    pub fn child_position(&self) -> i32 {
        self.child_position_at(self.level())
    }

    /// Return the child position (0..3) of this cell's ancestor at the given
    /// level within its parent. For example, `child_position_at(1)` returns
    /// the position of this cell's level-1 ancestor within its top-level
    /// face cell.
    pub fn child_position_at(&self, level: i32) -> i32 {
        debug_assert!(self.is_valid());
        debug_assert!((1..=self.level()).contains(&level));
        (self.id >> (2 * (S2CellId::MAX_LEVEL - level) + 1)) as i32 & 3
    }

    /// Return the cell at the previous level containing this cell.
    /// Requires that this cell is not a face cell.
    pub fn immediate_parent(&self) -> S2CellId {
        debug_assert!(self.is_valid());
        debug_assert!(!self.is_face());
        let new_lsb = self.lsb() << 2;
        S2CellId::new((self.id & new_lsb.wrapping_neg()) | new_lsb)
    }

    /// Return the cell at the given level containing this cell.
    /// Requires 0 <= level <= this cell's level.
    pub fn parent(&self, level: i32) -> S2CellId {
        debug_assert!(self.is_valid());
        debug_assert!((0..=self.level()).contains(&level));
        let new_lsb = S2CellId::lsb_for_level(level);
        S2CellId::new((self.id & new_lsb.wrapping_neg()) | new_lsb)
    }

    /// Return the immediate child of this cell at the given traversal order
    /// position (in the range 0 to 3). This cell must not be a leaf cell.
    pub fn child(&self, position: i32) -> S2CellId {
        debug_assert!(self.is_valid());
        debug_assert!(!self.is_leaf());
        debug_assert!((0..4).contains(&position));
        // To change the level, we need to move the lowest-set bit two
        // positions downward. We do this by subtracting (4 * new_lsb) and
        // adding new_lsb. Then to advance to the given child cell, we add
        // (2 * position * new_lsb).
        let new_lsb = self.lsb() >> 2;
        let offset = (2 * position as i64 + 1 - 4).wrapping_mul(new_lsb as i64);
        S2CellId::new(self.id.wrapping_add(offset as u64))
    }

    /// Return the first child of this cell in Hilbert curve order. This
    /// cell must not be a leaf cell.
    pub fn child_begin(&self) -> S2CellId {
        debug_assert!(self.is_valid());
        debug_assert!(!self.is_leaf());
        let old_lsb = self.lsb();
        S2CellId::new(self.id - old_lsb + (old_lsb >> 2))
    }

    /// Return the first descendant of this cell at the given level, in
    /// Hilbert curve order. The level must be no smaller than this cell's.
    pub fn child_begin_at(&self, level: i32) -> S2CellId {
        debug_assert!(self.is_valid());
        debug_assert!((self.level()..=S2CellId::MAX_LEVEL).contains(&level));
        S2CellId::new(self.id - self.lsb() + S2CellId::lsb_for_level(level))
    }

    /// Return the id just past the last child of this cell in Hilbert curve
    /// order. This cell must not be a leaf cell.
    pub fn child_end(&self) -> S2CellId {
        debug_assert!(self.is_valid());
        debug_assert!(!self.is_leaf());
        let old_lsb = self.lsb();
        S2CellId::new(self.id + old_lsb + (old_lsb >> 2))
    }

    /// Return the id just past the last descendant of this cell at the
    /// given level, in Hilbert curve order.
    pub fn child_end_at(&self, level: i32) -> S2CellId {
        debug_assert!(self.is_valid());
        debug_assert!((self.level()..=S2CellId::MAX_LEVEL).contains(&level));
        S2CellId::new(self.id + self.lsb() + S2CellId::lsb_for_level(level))
    }

    /// Return the next cell at the same level along the Hilbert curve.
    /// Works correctly when advancing from one face to the next, but does
    /// *not* wrap around from the last face to the first or vice versa.
    pub fn next(&self) -> S2CellId {
        S2CellId::new(self.id.wrapping_add(self.lsb() << 1))
    }

    /// Return the previous cell at the same level along the Hilbert curve.
    /// Works correctly when advancing from one face to the previous, but
    /// does *not* wrap around from the first face to the last or vice versa.
    pub fn prev(&self) -> S2CellId {
        S2CellId::new(self.id.wrapping_sub(self.lsb() << 1))
    }

    /// Like `next()`, but wraps around from the last face to the first and
    /// vice versa. Should *not* be used for iteration in conjunction with
    /// `child_begin_at()`, `child_end_at()`, `begin()`, or `end()`.
    pub fn next_wrap(&self) -> S2CellId {
        debug_assert!(self.is_valid());
        let n = self.next();
        if n.id < S2CellId::WRAP_OFFSET {
            n
        } else {
            S2CellId::new(n.id.wrapping_sub(S2CellId::WRAP_OFFSET))
        }
    }

    /// Like `prev()`, but wraps around from the first face to the last and
    /// vice versa.
    pub fn prev_wrap(&self) -> S2CellId {
        debug_assert!(self.is_valid());
        let p = self.prev();
        if p.id < S2CellId::WRAP_OFFSET {
            p
        } else {
            S2CellId::new(p.id.wrapping_add(S2CellId::WRAP_OFFSET))
        }
    }

    /// The first id of the range of leaf cells spanned by this cell.
    pub fn range_min(&self) -> S2CellId {
        S2CellId::new(self.id - (self.lsb() - 1))
    }

    /// The last id of the range of leaf cells spanned by this cell.
    pub fn range_max(&self) -> S2CellId {
        S2CellId::new(self.id + (self.lsb() - 1))
    }

    /// Return true if the given cell is contained within this one.
    pub fn contains(&self, other: &S2CellId) -> bool {
        debug_assert!(self.is_valid());
        debug_assert!(other.is_valid());
        *other >= self.range_min() && *other <= self.range_max()
    }

    /// Return true if the given cell intersects this one.
    pub fn intersects(&self, other: &S2CellId) -> bool {
        debug_assert!(self.is_valid());
        debug_assert!(other.is_valid());
        other.range_min() <= self.range_max() && other.range_max() >= self.range_min()
    }

    /// Return the cell at the given level containing the leaf cell with the
    /// given (i,j)-coordinates on the given face.
    pub fn from_face_ij(face: i32, i: i32, j: i32) -> S2CellId {
        // Optimization notes:
        //  - Non-overlapping bit fields can be combined with either "+" or
        //    "|". Expressions are generally faster with "+" because the
        //    optimizer can often treat it as a carry-free operation.
        let mut n: u64 = (face as u64) << (S2CellId::POS_BITS - 1);
        // Alternating faces have opposite Hilbert curve orientations; this
        // is necessary in order for all faces to have a right-handed
        // coordinate system.
        let mut bits: i32 = face & SWAP_MASK;

        // Each iteration maps 4 bits of "i" and "j" into 8 bits of the
        // Hilbert curve position. The lookup table transforms the combined
        // "iiiijjjjoo" into "ppppppppoo", where o is the orientation.
        for k in (0..8).rev() {
            let mask = (1 << LOOKUP_BITS) - 1;
            bits += ((i >> (k * LOOKUP_BITS)) & mask) << (LOOKUP_BITS + 2);
            bits += ((j >> (k * LOOKUP_BITS)) & mask) << 2;
            bits = LOOKUP_POS[bits as usize] as i32;
            n |= ((bits >> 2) as u64) << (k * 2 * LOOKUP_BITS);
            bits &= SWAP_MASK | INVERT_MASK;
        }

        S2CellId::new(n * 2 + 1)
    }

    /// Like `from_face_ij()`, but i and j may lie outside the valid leaf
    /// cell range [0, MAX_SIZE-1], in which case the result is the leaf cell
    /// on the *adjacent* face obtained by projecting through cube space.
    pub fn from_face_ij_wrap(face: i32, i: i32, j: i32) -> S2CellId {
        // Convert i and j to the coordinates of a leaf cell just beyond the
        // boundary of this face. This prevents 32-bit overflow in the case
        // of finding the neighbors of a face cell.
        let i = i.clamp(-1, S2CellId::MAX_SIZE);
        let j = j.clamp(-1, S2CellId::MAX_SIZE);

        // We want to wrap these coordinates onto the appropriate adjacent
        // face. The easiest way to do this is to convert the (i,j)
        // coordinates to (x,y,z) coordinates; this defines a (u,v)
        // coordinate on the adjacent face that is then requantized. Note
        // that the code below is careful to use a linear mapping in both
        // directions: the requantization must not go through the quadratic
        // transform, since the Hilbert encoding is defined directly on
        // (s,t) and the linear map is its own inverse here.
        //
        // The clamp limit is the smallest number above 1.0, so that points
        // just beyond the face boundary reproject strictly inside the
        // adjacent face.
        const SCALE: f64 = 1.0 / S2CellId::MAX_SIZE as f64;
        const LIMIT: f64 = 1.0 + f64::EPSILON;
        let u = (SCALE * ((2 * (i - S2CellId::MAX_SIZE / 2) + 1) as f64)).clamp(-LIMIT, LIMIT);
        let v = (SCALE * ((2 * (j - S2CellId::MAX_SIZE / 2) + 1) as f64)).clamp(-LIMIT, LIMIT);

        // Find the leaf cell coordinates on the adjacent face, and convert
        // them to a cell id at the appropriate level.
        let (face, u, v) = xyz_to_face_uv(&face_uv_to_xyz(face, u, v));
        S2CellId::from_face_ij(face, st_to_ij(0.5 * (u + 1.0)), st_to_ij(0.5 * (v + 1.0)))
    }

    /// Dispatch to `from_face_ij()` or `from_face_ij_wrap()` depending on
    /// whether the (i,j) coordinates are known to be on the same face.
    pub fn from_face_ij_same(face: i32, i: i32, j: i32, same_face: bool) -> S2CellId {
        if same_face {
            S2CellId::from_face_ij(face, i, j)
        } else {
            S2CellId::from_face_ij_wrap(face, i, j)
        }
    }

    /// Converts this cell ID to (face, i, j, orientation), where "i" and
    /// "j" are the coordinates of the leaf cell at the Hilbert curve
    /// position encoded by this id, and "orientation" is the Hilbert curve
    /// orientation of the cell (a combination of SWAP_MASK and INVERT_MASK).
    pub fn to_face_ij_orientation(&self) -> (i32, i32, i32, i32) {
        let (mut i, mut j) = (0, 0);
        let face = self.face();
        let mut bits = face & SWAP_MASK;

        // Each iteration maps 8 bits of the Hilbert curve position into
        // 4 bits each of "i" and "j". The lookup table transforms the
        // combined "ppppppppoo" into "iiiijjjjoo".
        fn get_bits(k: i32, id: u64, bits: &mut i32, i: &mut i32, j: &mut i32, lookup_ij: &[u16]) {
            let nbits = if k == 7 {
                S2CellId::MAX_LEVEL - 7 * LOOKUP_BITS
            } else {
                LOOKUP_BITS
            };
            *bits += (((id >> (k * 2 * LOOKUP_BITS + 1)) & ((1 << (2 * nbits)) - 1)) as i32) << 2;
            *bits = lookup_ij[*bits as usize] as i32;
            *i += (*bits >> (LOOKUP_BITS + 2)) << (k * LOOKUP_BITS);
            *j += ((*bits >> 2) & ((1 << LOOKUP_BITS) - 1)) << (k * LOOKUP_BITS);
            *bits &= SWAP_MASK | INVERT_MASK;
        }

        for k in (0..8).rev() {
            get_bits(k, self.id, &mut bits, &mut i, &mut j, &LOOKUP_IJ[..]);
        }

        // The position of a non-leaf cell at level "n" consists of a prefix
        // of 2*n bits that identifies the cell, followed by a suffix of
        // 2*(MAX_LEVEL-n)+1 bits of the form 10*. If n is even, the
        // orientation of the Hilbert curve at this cell is the same as the
        // orientation computed above; otherwise the orientation has the
        // swap bit flipped, because the suffix contains an odd number of
        // "00" child selections (each of which toggles the swap bit).
        debug_assert_eq!(0, POS_TO_ORIENTATION[2]);
        debug_assert_eq!(SWAP_MASK, POS_TO_ORIENTATION[0]);
        let orientation = if self.lsb() & 0x1111111111111110 != 0 {
            bits ^ SWAP_MASK
        } else {
            bits
        };

        (face, i, j, orientation)
    }

    /// Return the four cells that are adjacent across this cell's four
    /// edges, in the order down, right, up, left (i.e. S, E, N, W relative
    /// to the (i,j) coordinate frame of the face). All neighbors are
    /// guaranteed to be distinct and at the same level as this cell.
    pub fn get_edge_neighbors(&self) -> [S2CellId; 4] {
        let level = self.level();
        let size = S2CellId::get_size_ij_at_level(level);
        let (face, i, j, _) = self.to_face_ij_orientation();

        // Edges 0, 1, 2, 3 are in the down, right, up, left directions.
        [
            S2CellId::from_face_ij_same(face, i, j - size, j - size >= 0).parent(level),
            S2CellId::from_face_ij_same(face, i + size, j, i + size < S2CellId::MAX_SIZE)
                .parent(level),
            S2CellId::from_face_ij_same(face, i, j + size, j + size < S2CellId::MAX_SIZE)
                .parent(level),
            S2CellId::from_face_ij_same(face, i - size, j, i - size >= 0).parent(level),
        ]
    }

    /// Return the lowest-numbered bit that is on for this cell id, which is
    /// equal to (uint64_t{1} << (2 * (kMaxLevel - level))).  So for example,
    /// a.lsb() <= b.lsb() if and only if a.level() >= b.level(), but the
    /// first test is more efficient.
    pub fn lsb(&self) -> u64 {
        self.id & self.id.wrapping_neg()
    }

    /// Return the lowest-numbered bit of cell ids at the given level.
    pub fn lsb_for_level(level: i32) -> u64 {
        1_u64 << (2 * (S2CellId::MAX_LEVEL - level))
    }

    /// Return the bound in (u,v)-space for the cell at the given level
    /// containing the leaf cell with the given (i,j)-coordinates.
    pub fn ij_level_to_bound_uv(i: i32, j: i32, level: i32) -> R2Rect {
        let cell_size = S2CellId::get_size_ij_at_level(level);
        let mut intervals = [R1Interval::default(); 2];

        for (d, interval) in intervals.iter_mut().enumerate() {
            let ij = if d == 0 { i } else { j };
            let ij_lo = ij & -cell_size;
            let ij_hi = ij_lo + cell_size;
            *interval = R1Interval::new(
                st_to_uv(ij_to_st_min(ij_lo)),
                st_to_uv(ij_to_st_min(ij_hi)),
            );
        }

        R2Rect::new(intervals[0], intervals[1])
    }

    /// Encode this cell id as a compact token. The token is a hex string
    /// with the trailing zero nibbles removed, so that tokens of nearby
    /// levels share prefixes. The zero (invalid) id encodes as "X" to avoid
    /// the empty string.
    pub fn to_token(&self) -> String {
        if self.id == 0 {
            return "X".to_string();
        }
        let num_zero_nibbles = (self.id.trailing_zeros() / 4) as usize;
        let hex = format!("{:016x}", self.id);
        hex[..16 - num_zero_nibbles].to_string()
    }

    /// Decode a cell id from a token created by `to_token()`.
    pub fn from_token(token: &str) -> Result<S2CellId, S2Error> {
        if token == "X" {
            return Ok(S2CellId::none());
        }
        if token.is_empty() || token.len() > 16 {
            return Err(S2Error::InvalidToken(token.to_string()));
        }
        let mut id: u64 = 0;
        for c in token.chars() {
            let digit = c
                .to_digit(16)
                .ok_or_else(|| S2Error::InvalidToken(token.to_string()))?;
            id = (id << 4) | digit as u64;
        }
        Ok(S2CellId::new(id << (4 * (16 - token.len()))))
    }
}

impl TryFrom<u64> for S2CellId {
    type Error = S2Error;

    /// Validating conversion from a raw 64-bit value.
    fn try_from(id: u64) -> Result<S2CellId, S2Error> {
        let cell = S2CellId::new(id);
        if cell.is_valid() {
            Ok(cell)
        } else {
            Err(S2Error::InvalidCellId(id))
        }
    }
}

impl From<S2CellId> for S2Point {
    fn from(val: S2CellId) -> S2Point {
        val.to_point_raw().normalize()
    }
}

impl fmt::Display for S2CellId {
    /// Formats the cell as "face/child positions", e.g. "2/0123".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "Invalid: {:016x}", self.id);
        }
        write!(f, "{}/", self.face())?;
        for level in 1..=self.level() {
            write!(f, "{}", self.child_position_at(level))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_default_constructor_and_validity() {
        assert!(!S2CellId::none().is_valid());
        assert!(!S2CellId::sentinel().is_valid());
        assert!(S2CellId::try_from(0u64).is_err());
        // Face bits >= 6.
        assert!(S2CellId::try_from(0xE000000000000001).is_err());
        for face in 0..6 {
            let id = S2CellId::from_face(face);
            assert!(id.is_valid());
            assert!(id.is_face());
            assert_eq!(id.face(), face);
            assert_eq!(id.level(), 0);
            assert_eq!(S2CellId::try_from(id.id()).unwrap(), id);
        }
    }

    #[test]
    fn test_face_cell_ids() {
        // The id of a face cell has the face bits followed by the level-0
        // sentinel bit.
        assert_eq!(S2CellId::from_face(0).id(), 0x1000000000000000);
        assert_eq!(S2CellId::from_face(1).id(), 0x3000000000000000);
        assert_eq!(S2CellId::from_face(5).id(), 0xb000000000000000);
    }

    #[test]
    fn test_from_face_pos_level() {
        let leaf = S2CellId::from_face_ij(3, 12345, 67890);
        let rebuilt = S2CellId::from_face_pos_level(3, leaf.pos(), S2CellId::MAX_LEVEL).unwrap();
        assert_eq!(rebuilt, leaf);
        assert_eq!(
            S2CellId::from_face_pos_level(3, leaf.pos(), 10).unwrap(),
            leaf.parent(10)
        );
        assert_eq!(
            S2CellId::from_face_pos_level(0, 0, 31),
            Err(S2Error::InvalidLevel(31))
        );
        assert!(S2CellId::from_face_pos_level(6, 0, 0).is_err());
    }

    #[test]
    fn test_level_and_lsb() {
        for level in 0..=S2CellId::MAX_LEVEL {
            let id = S2CellId::from_face_ij(1, 1 << 20, 1 << 12).parent(level);
            assert_eq!(id.level(), level);
            assert_eq!(id.lsb(), S2CellId::lsb_for_level(level));
            assert_eq!(id.get_size_ij(), 1 << (S2CellId::MAX_LEVEL - level));
            assert_eq!(id.is_leaf(), level == S2CellId::MAX_LEVEL);
            assert_eq!(id.is_face(), level == 0);
        }
    }

    #[test]
    fn test_parent_child_relationships() {
        let id = S2CellId::from_face_ij(3, 0x12345678, 0x23456789).parent(27);
        assert!(id.is_valid());
        assert_eq!(id.level(), 27);

        assert_eq!(id.child_begin_at(id.level() + 2).level(), 29);
        assert_eq!(id.child_begin().immediate_parent(), id);
        for position in 0..4 {
            assert_eq!(id.child(position).immediate_parent(), id);
            assert_eq!(id.child(position).child_position(), position);
            assert!(id.contains(&id.child(position)));
        }
        assert_eq!(id.child_begin(), id.child(0));
        assert_eq!(id.child_end(), id.child(3).next());

        // Every ancestor of a leaf cell contains it.
        let leaf = S2CellId::from_face_ij(2, 0x2345678, 0x1234567);
        for k in 0..=S2CellId::MAX_LEVEL {
            assert!(leaf.parent(S2CellId::MAX_LEVEL - k).contains(&leaf));
        }

        // The parent id is the midpoint of the range spanned by its children.
        assert!(id.range_min() < id.child(1) && id.child(2) <= id.range_max());
        assert_eq!(id.range_min(), id.child_begin_at(S2CellId::MAX_LEVEL));
        assert_eq!(id.range_max().next(), id.child_end_at(S2CellId::MAX_LEVEL));
    }

    #[test]
    fn test_face_ij_round_trip() {
        // Exact (face, i, j) recovery, including orientation consistency.
        let cases = [
            (0, 0, 0),
            (0, 0, 1),
            (1, 1 << 29, 1 << 28),
            (2, 123456, 654321),
            (3, S2CellId::MAX_SIZE - 1, 0),
            (4, 7, S2CellId::MAX_SIZE - 1),
            (5, S2CellId::MAX_SIZE - 1, S2CellId::MAX_SIZE - 1),
        ];
        for &(face, i, j) in &cases {
            let id = S2CellId::from_face_ij(face, i, j);
            assert!(id.is_leaf());
            let (f, i2, j2, _) = id.to_face_ij_orientation();
            assert_eq!((f, i2, j2), (face, i, j));
        }
    }

    #[test]
    fn test_hilbert_curve_continuity() {
        // Consecutive leaf cells along the curve are edge-adjacent in
        // (i,j)-space (within one face), so each step moves exactly one
        // unit in exactly one coordinate.
        let mut id = S2CellId::from_face_ij(0, 100, 200);
        for _ in 0..1000 {
            let next = id.next();
            let (f1, i1, j1, _) = id.to_face_ij_orientation();
            let (f2, i2, j2, _) = next.to_face_ij_orientation();
            assert_eq!(f1, f2);
            assert_eq!((i1 - i2).abs() + (j1 - j2).abs(), 1);
            id = next;
        }
    }

    #[test]
    fn test_ordering_follows_curve() {
        // The leaf at (0,0) is immediately followed by (0,1), and ids
        // compare as unsigned integers.
        let c1 = S2CellId::from_face_ij(0, 0, 0);
        let c2 = S2CellId::from_face_ij(0, 0, 1);
        assert_eq!(c2, c1.next());
        assert!(c1 < c2);
        assert_eq!(c2.prev(), c1);
    }

    #[test]
    fn test_wrap() {
        // next() does not wrap; next_wrap() does.
        let last = S2CellId::from_face(5).child_end_at(S2CellId::MAX_LEVEL).prev();
        let first = S2CellId::from_face(0).child_begin_at(S2CellId::MAX_LEVEL);
        assert!(!last.next().is_valid());
        assert_eq!(last.next_wrap(), first);
        assert_eq!(first.prev_wrap(), last);

        let last_face = S2CellId::from_face(5);
        assert_eq!(last_face.next_wrap(), S2CellId::from_face(0));
    }

    #[test]
    fn test_edge_neighbors_of_face_cell() {
        // The neighbors of the face 0 cell are the four adjacent faces in
        // S, E, N, W order.
        let neighbors = S2CellId::from_face(0).get_edge_neighbors();
        let expected = [5, 1, 2, 4];
        for (neighbor, face) in neighbors.iter().zip(expected) {
            assert!(neighbor.is_face());
            assert_eq!(neighbor.face(), face);
        }
    }

    #[test]
    fn test_edge_neighbors_interior() {
        // Check the edge neighbors of some random interior cells: they must
        // be at the same level, distinct, and adjacent in (i,j)-space.
        let id = S2CellId::from_face_ij(1, 1 << 22, 3 << 20).parent(12);
        let size = id.get_size_ij();
        let (face, i, j, _) = id.to_face_ij_orientation();
        let offsets = [(0, -size), (size, 0), (0, size), (-size, 0)];
        for (neighbor, (di, dj)) in id.get_edge_neighbors().iter().zip(offsets) {
            assert_eq!(neighbor.level(), id.level());
            assert_ne!(*neighbor, id);
            let (nf, ni, nj, _) = neighbor.to_face_ij_orientation();
            assert_eq!(nf, face);
            // The decoded leaf coordinates both lie within their cells; the
            // cell-relative offset is what must match.
            assert_eq!(ni & -size, (i & -size) + di);
            assert_eq!(nj & -size, (j & -size) + dj);
        }
    }

    #[test]
    fn test_from_point_recovers_face() {
        // A point at latitude 45 degrees on the Greenwich meridian is on
        // face 0, and its level-0 ancestor is the face cell.
        let ll = S2LatLng::from_radians(PI / 4.0, 0.0);
        let leaf = S2CellId::from_lat_lng(&ll);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.face(), 0);
        assert_eq!(leaf.parent(0).id(), 0x1000000000000000);
    }

    #[test]
    fn test_point_round_trip_stays_in_cell() {
        // The center of the leaf cell containing p is within the leaf
        // cell diagonal of p. The leaf diagonal is no larger than
        // sqrt(2) * Pi / 2^30 in (s,t)-space stretched by the projection,
        // bounded here by a conservative 1e-8 radians.
        let points = [
            S2Point::new(1.0, 0.0, 0.0),
            S2Point::new(0.5, 0.5, 0.5),
            S2Point::new(-0.3, 0.9, -0.2),
            S2Point::new(0.0001, -1.0, 0.0001),
            S2Point::new(-0.7, -0.7, 0.1),
        ];
        for p in &points {
            let p = p.normalize();
            let id = S2CellId::from_point(&p);
            let center = id.to_point();
            assert_eq!(crate::s2::get_face(&center), crate::s2::get_face(&p));
            assert!(center.angle(&p) < 1e-8);
        }
    }

    #[test]
    fn test_lat_lng_round_trip() {
        for lat_deg in [-89, -45, -10, 0, 10, 45, 89] {
            for lng_deg in [-179, -90, -1, 0, 1, 90, 179] {
                let ll = S2LatLng::from_degrees(lat_deg as f64, lng_deg as f64);
                let id = S2CellId::from_lat_lng(&ll);
                let center = id.to_lat_lng();
                // A leaf cell is about 1e-9 radians across.
                assert!(ll.get_distance(&center).radians() < 1e-8);
            }
        }
    }

    #[test]
    fn test_tokens() {
        let id = S2CellId::from_face_ij(2, 123456, 654321);
        let token = id.to_token();
        assert!(!token.is_empty());
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(token.len() <= 16);
        assert_eq!(S2CellId::from_token(&token).unwrap(), id);

        // Trailing zero nibbles are stripped.
        assert_eq!(S2CellId::from_face(0).to_token(), "1");
        assert_eq!(S2CellId::from_token("1").unwrap(), S2CellId::from_face(0));
        assert_eq!(S2CellId::from_face_ij(5, 0, 0).parent(3).to_token().len(), 16 - 13);

        // The zero id encodes as "X" and round-trips.
        assert_eq!(S2CellId::none().to_token(), "X");
        assert_eq!(S2CellId::from_token("X").unwrap(), S2CellId::none());

        // Bad tokens are rejected.
        assert!(S2CellId::from_token("").is_err());
        assert!(S2CellId::from_token("0123456789abcdef0").is_err());
        assert!(S2CellId::from_token("not-hex!").is_err());

        // Tokens round-trip across levels.
        for level in [0, 1, 5, 14, 29, 30] {
            let cell = S2CellId::from_face_ij(4, 0x2468ace, 0x13579bd).parent(level);
            assert_eq!(S2CellId::from_token(&cell.to_token()).unwrap(), cell);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", S2CellId::from_face(3)), "3/");
        assert_eq!(format!("{}", S2CellId::from_face(4).child(0)), "4/0");
        assert_eq!(format!("{}", S2CellId::from_face(4).child(0).child(2)), "4/02");
        assert_eq!(
            format!("{}", S2CellId::none()),
            "Invalid: 0000000000000000"
        );
    }

    #[test]
    fn test_contains_and_intersects() {
        let parent = S2CellId::from_face_ij(0, 1 << 10, 1 << 10).parent(5);
        let child = parent.child(2).child(3);
        assert!(parent.contains(&child));
        assert!(!child.contains(&parent));
        assert!(parent.intersects(&child) && child.intersects(&parent));
        let sibling = parent.next();
        assert!(!parent.contains(&sibling));
        assert!(!parent.intersects(&sibling));
    }

    #[test]
    fn test_center_siti() {
        // The center of a face cell is at (2^30, 2^30), and leaf centers
        // are odd.
        let (_, si, ti) = S2CellId::from_face(2).get_center_siti();
        assert_eq!((si, ti), (1 << 30, 1 << 30));
        let leaf = S2CellId::from_face_ij(2, 12, 34);
        let (_, si, ti) = leaf.get_center_siti();
        assert_eq!((si, ti), (2 * 12 + 1, 2 * 34 + 1));
    }
}
