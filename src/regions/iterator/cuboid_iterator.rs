use cgmath::Point3;

/// Walks every position of an inclusive box.
///
/// X changes fastest, then Z, then Y, so each horizontal layer is finished before moving up.
#[derive(Debug, Clone)]
pub struct CuboidIterator {
    min: Point3<i32>,
    max: Point3<i32>,
    next: Option<Point3<i32>>,
}

impl CuboidIterator {
    /// Creates an iterator over `[min, max]`. An inverted box yields nothing.
    pub fn new(min: Point3<i32>, max: Point3<i32>) -> Self {
        let empty = min.x > max.x || min.y > max.y || min.z > max.z;
        Self {
            min,
            max,
            next: (!empty).then_some(min),
        }
    }
}

impl Iterator for CuboidIterator {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let mut step = current;

        step.x += 1;
        if step.x > self.max.x {
            step.x = self.min.x;
            step.z += 1;
            if step.z > self.max.z {
                step.z = self.min.z;
                step.y += 1;
            }
        }

        self.next = (step.y <= self.max.y).then_some(step);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(next) = self.next else {
            return (0, Some(0));
        };
        let layer = (self.max.x - self.min.x + 1) as usize * (self.max.z - self.min.z + 1) as usize;
        let row = (self.max.x - self.min.x + 1) as usize;
        let remaining = (self.max.y - next.y) as usize * layer
            + (self.max.z - next.z) as usize * row
            + (self.max.x - next.x + 1) as usize;
        (remaining, Some(remaining))
    }
}
