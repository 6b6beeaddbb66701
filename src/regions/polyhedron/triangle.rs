use cgmath::Point3;

use super::edge::Edge;
use super::{cross, dot, widen, Wide};

/// An oriented hull face.
///
/// The normal is `(b - a) x (c - a)` in exact integer arithmetic and points out of the hull.
/// A position is *above* the face when it lies strictly on the normal's side of its plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triangle {
    vertices: [Point3<i32>; 3],
    normal: Wide,
    max_dot: i128,
}

impl Triangle {
    /// Creates the face `a -> b -> c`.
    pub fn new(a: Point3<i32>, b: Point3<i32>, c: Point3<i32>) -> Self {
        let origin = widen(a);
        let normal = cross(sub(widen(b), origin), sub(widen(c), origin));
        Self {
            vertices: [a, b, c],
            normal,
            max_dot: dot(normal, origin),
        }
    }

    /// Vertex `index`, wrapping around after the third.
    pub fn vertex(&self, index: usize) -> Point3<i32> {
        self.vertices[index % 3]
    }

    /// All three vertices in winding order.
    pub fn vertices(&self) -> [Point3<i32>; 3] {
        self.vertices
    }

    /// Edge from vertex `index` to the next one.
    pub fn edge(&self, index: usize) -> Edge {
        Edge::new(self.vertex(index), self.vertex(index + 1))
    }

    /// Returns `true` if `position` is strictly outside the face's plane.
    pub fn above(&self, position: Point3<i32>) -> bool {
        dot(self.normal, widen(position)) > self.max_dot
    }

    /// Returns `true` if `position` is strictly inside the face's plane.
    pub fn below(&self, position: Point3<i32>) -> bool {
        dot(self.normal, widen(position)) < self.max_dot
    }

    /// Returns `true` for a face whose vertices are collinear.
    pub fn is_degenerate(&self) -> bool {
        self.normal == [0, 0, 0]
    }

    pub(crate) fn normal(&self) -> Wide {
        self.normal
    }
}

fn sub(a: Wide, b: Wide) -> Wide {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_sides() {
        let floor = Triangle::new(
            Point3::new(0, 0, 0),
            Point3::new(0, 0, 4),
            Point3::new(4, 0, 0),
        );

        assert!(floor.above(Point3::new(1, 1, 1)), "normal points up");
        assert!(floor.below(Point3::new(9, -1, 9)));

        let on_plane = Point3::new(100, 0, -100);
        assert!(!floor.above(on_plane) && !floor.below(on_plane));
    }

    #[test]
    fn test_reversed_winding_flips_sides() {
        let up = Triangle::new(
            Point3::new(0, 0, 0),
            Point3::new(0, 0, 1),
            Point3::new(1, 0, 0),
        );
        let down = Triangle::new(
            Point3::new(0, 0, 0),
            Point3::new(1, 0, 0),
            Point3::new(0, 0, 1),
        );
        let p = Point3::new(0, 5, 0);
        assert!(up.above(p));
        assert!(down.below(p));
    }

    #[test]
    fn test_large_coordinates_do_not_overflow() {
        let far = i32::MAX - 1;
        let triangle = Triangle::new(
            Point3::new(-far, -far, -far),
            Point3::new(far, -far, -far),
            Point3::new(-far, far, -far),
        );
        assert!(triangle.above(Point3::new(0, 0, far)));
        assert!(!triangle.is_degenerate());
    }

    #[test]
    fn test_edges_wrap_around() {
        let t = Triangle::new(
            Point3::new(0, 0, 0),
            Point3::new(1, 0, 0),
            Point3::new(0, 1, 0),
        );
        assert_eq!(t.edge(2), Edge::new(Point3::new(0, 1, 0), Point3::new(0, 0, 0)));
        assert!(Triangle::new(t.vertex(0), t.vertex(1), Point3::new(2, 0, 0)).is_degenerate());
    }
}
