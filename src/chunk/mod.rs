//! # Chunk Module
//!
//! Pure functions mapping world block coordinates to 16x16x16 chunk coordinates.
//!
//! Callers use chunk sets to refresh or invalidate only the part of the world a region
//! touches. The shift amount is tied to the world's storage layout and is not configurable.
//!
//! ## Coordinate Spaces
//! - **Block**: a position in the world, one unit per voxel
//! - **Chunk column**: `(x >> 4, z >> 4)`, returned as a `Point2` whose `y` is the chunk Z
//! - **Chunk cube**: `(x >> 4, y >> 4, z >> 4)`, the vertical subdivision of a column
//!
//! Arithmetic right shift floors toward negative infinity, so block `-1` lives in chunk `-1`
//! and block `-16` lives in chunk `-1` as well.

use std::collections::HashSet;

use cgmath::{Point2, Point3};

/// Number of bits dropped from a block coordinate to reach its chunk coordinate.
pub const CHUNK_SHIFTS: i32 = 4;
/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 1 << CHUNK_SHIFTS;
/// Number of bits dropped from a chunk coordinate to reach its region file coordinate.
pub const REGION_FILE_SHIFTS: i32 = 5;

/// Chunk column containing the given block.
pub fn to_chunk(position: Point3<i32>) -> Point2<i32> {
    Point2::new(position.x >> CHUNK_SHIFTS, position.z >> CHUNK_SHIFTS)
}

/// Chunk cube containing the given block.
pub fn to_chunk_cube(position: Point3<i32>) -> Point3<i32> {
    Point3::new(
        position.x >> CHUNK_SHIFTS,
        position.y >> CHUNK_SHIFTS,
        position.z >> CHUNK_SHIFTS,
    )
}

/// Every chunk column overlapped by the inclusive box `[min, max]`.
///
/// # Arguments
/// * `min` - Minimum corner of the box, in block coordinates
/// * `max` - Maximum corner of the box, in block coordinates
///
/// # Returns
/// The set of chunk columns; empty if `min` is not below `max` on every axis.
pub fn chunk_range(min: Point3<i32>, max: Point3<i32>) -> HashSet<Point2<i32>> {
    if min.x > max.x || min.z > max.z {
        return HashSet::new();
    }

    let low = to_chunk(min);
    let high = to_chunk(max);

    (low.x..=high.x)
        .flat_map(|x| (low.y..=high.y).map(move |z| Point2::new(x, z)))
        .collect()
}

/// Every chunk cube overlapped by the inclusive box `[min, max]`.
pub fn chunk_cube_range(min: Point3<i32>, max: Point3<i32>) -> HashSet<Point3<i32>> {
    if min.x > max.x || min.y > max.y || min.z > max.z {
        return HashSet::new();
    }

    let low = to_chunk_cube(min);
    let high = to_chunk_cube(max);

    (low.x..=high.x)
        .flat_map(|x| {
            (low.y..=high.y)
                .flat_map(move |y| (low.z..=high.z).map(move |z| Point3::new(x, y, z)))
        })
        .collect()
}

/// Sorts block positions so that positions in the same chunk are adjacent.
///
/// The order is region file (32x32 chunks), then chunk, then Y from top to bottom, then
/// the remaining coordinates. Applying changes in this order touches each chunk once.
pub fn sort_by_chunk_locality(positions: &mut [Point3<i32>]) {
    positions.sort_by_key(|position| {
        let chunk = to_chunk(*position);
        (
            chunk.x >> REGION_FILE_SHIFTS,
            chunk.y >> REGION_FILE_SHIFTS,
            chunk.x,
            chunk.y,
            std::cmp::Reverse(position.y),
            position.x,
            position.z,
        )
    });
}
