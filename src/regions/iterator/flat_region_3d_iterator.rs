use cgmath::{Point2, Point3};

use super::FlatRegionIter;
use crate::math::BlockPoint2Ext;

/// Extrudes a footprint iterator over a vertical span.
///
/// Every column is finished bottom to top before the next column starts.
#[derive(Debug)]
pub struct FlatRegion3DIterator<'a> {
    footprint: FlatRegionIter<'a>,
    min_y: i32,
    max_y: i32,
    column: Option<Point2<i32>>,
    next_y: i32,
}

impl<'a> FlatRegion3DIterator<'a> {
    /// Creates a column iterator over `[min_y, max_y]`.
    ///
    /// # Arguments
    /// * `footprint` - Horizontal positions to extrude
    /// * `min_y` - Bottom of every column, inclusive
    /// * `max_y` - Top of every column, inclusive
    pub fn new(mut footprint: FlatRegionIter<'a>, min_y: i32, max_y: i32) -> Self {
        let column = if min_y <= max_y { footprint.next() } else { None };
        Self {
            footprint,
            min_y,
            max_y,
            column,
            next_y: min_y,
        }
    }
}

impl Iterator for FlatRegion3DIterator<'_> {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        let column = self.column?;
        let position = column.at_y(self.next_y);

        if self.next_y < self.max_y {
            self.next_y += 1;
        } else {
            self.next_y = self.min_y;
            self.column = self.footprint.next();
        }

        Some(position)
    }
}
