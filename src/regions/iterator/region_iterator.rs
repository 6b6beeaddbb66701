use cgmath::Point3;

use crate::regions::RegionShape;

/// Scans the bounding box of any region and yields the positions it contains.
///
/// X changes fastest, then Y, then Z. Each call to `next` may test many positions before
/// finding one inside the region, so prefer a shape's own iterator when it has one.
#[derive(Debug)]
pub struct RegionIterator<'a> {
    region: &'a dyn RegionShape,
    min: Point3<i32>,
    max: Point3<i32>,
    cursor: Option<Point3<i32>>,
}

impl<'a> RegionIterator<'a> {
    /// Creates a scanning iterator over `region`.
    pub fn new(region: &'a dyn RegionShape) -> Self {
        let min = region.minimum_point();
        let max = region.maximum_point();
        let empty = min.x > max.x || min.y > max.y || min.z > max.z;

        Self {
            region,
            min,
            max,
            cursor: (!empty).then_some(min),
        }
    }

    fn advance(&mut self, from: Point3<i32>) {
        let mut step = from;
        step.x += 1;
        if step.x > self.max.x {
            step.x = self.min.x;
            step.y += 1;
            if step.y > self.max.y {
                step.y = self.min.y;
                step.z += 1;
            }
        }
        self.cursor = (step.z <= self.max.z).then_some(step);
    }
}

impl Iterator for RegionIterator<'_> {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.cursor {
            self.advance(current);
            if self.region.contains(current) {
                return Some(current);
            }
        }
        None
    }
}
