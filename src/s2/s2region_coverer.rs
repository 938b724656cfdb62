//! Approximate covering of a region by cells at a fixed subdivision level.
//!
//! The covering is computed with a flood fill over the level-L grid: it
//! contains the connected component (under edge adjacency) of cells whose
//! bounding rectangles intersect the region, starting from a seed cell.
//! A region that is disconnected across the +/-180 degree seam may
//! therefore leave a component uncovered if the seed falls in only one
//! component; callers needing more completeness can run the covering again
//! from additional start points.

use std::collections::HashSet;

use crate::error::S2Error;
use crate::s2::s2cell::S2Cell;
use crate::s2::s2cell_id::S2CellId;
use crate::s2::s2latlng_rect::S2LatLngRect;
use crate::s2::s2point::S2Point;
use crate::s2::s2region::S2Region;

/// Return the set of cells at the given level whose bounding rectangles
/// intersect the given region, seeded at the cell containing `start`. The
/// seed cell is always part of the output, even in the pathological case
/// where rounding near the seam makes its bound miss the region.
///
/// The output is in discovery order; sort it for Hilbert curve order. The
/// running time is proportional to the number of cells returned, so
/// callers that need bounded work should pre-check the region area against
/// `4 * S2Cell::average_area_at_level(level)`.
pub fn get_simple_covering<R: S2Region + ?Sized>(
    region: &R,
    start: &S2Point,
    level: i32,
) -> Result<Vec<S2CellId>, S2Error> {
    if !(0..=S2CellId::MAX_LEVEL).contains(&level) {
        return Err(S2Error::InvalidLevel(level));
    }
    Ok(flood_fill(region, S2CellId::from_point(start).parent(level)))
}

/// Covering of a latitude-longitude rectangle, seeded at its center.
pub fn get_rect_covering(
    rect: &S2LatLngRect,
    level: i32,
) -> Result<Vec<S2CellId>, S2Error> {
    get_simple_covering(rect, &rect.get_center().to_point(), level)
}

fn flood_fill<R: S2Region + ?Sized>(region: &R, start: S2CellId) -> Vec<S2CellId> {
    let bound = region.get_rect_bound();
    let mut examined = HashSet::new();
    let mut frontier = vec![start];
    let mut output = vec![start];
    examined.insert(start);
    while let Some(id) = frontier.pop() {
        for neighbor in id.get_edge_neighbors() {
            if !examined.insert(neighbor) {
                continue;
            }
            if S2Cell::new(neighbor).get_rect_bound().intersects(&bound) {
                output.push(neighbor);
                frontier.push(neighbor);
            }
        }
    }
    output
}
