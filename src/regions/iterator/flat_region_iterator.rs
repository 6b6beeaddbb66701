use cgmath::{Point2, Point3};

use crate::math::BlockPoint2Ext;
use crate::regions::RegionShape;

/// Scans the footprint of a region's bounding box at its lowest layer.
///
/// A column is yielded when the region contains its bottom block. X changes fastest.
#[derive(Debug)]
pub struct FlatRegionIterator<'a> {
    region: &'a dyn RegionShape,
    y: i32,
    min: Point2<i32>,
    max: Point2<i32>,
    cursor: Option<Point2<i32>>,
}

impl<'a> FlatRegionIterator<'a> {
    /// Creates a footprint scan over `region`.
    pub fn new(region: &'a dyn RegionShape) -> Self {
        let min: Point3<i32> = region.minimum_point();
        let max: Point3<i32> = region.maximum_point();
        let empty = min.x > max.x || min.z > max.z;

        Self {
            region,
            y: min.y,
            min: Point2::new(min.x, min.z),
            max: Point2::new(max.x, max.z),
            cursor: (!empty).then_some(Point2::new(min.x, min.z)),
        }
    }
}

impl Iterator for FlatRegionIterator<'_> {
    type Item = Point2<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.cursor {
            let mut step = current;
            step.x += 1;
            if step.x > self.max.x {
                step.x = self.min.x;
                step.y += 1;
            }
            self.cursor = (step.y <= self.max.y).then_some(step);

            if self.region.contains(current.at_y(self.y)) {
                return Some(current);
            }
        }
        None
    }
}
