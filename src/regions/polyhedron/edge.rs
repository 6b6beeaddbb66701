use cgmath::Point3;

use super::triangle::Triangle;

/// A directed hull edge.
///
/// Equality ignores direction, so the two half-edges shared by neighbouring triangles
/// compare equal. The direction is still kept: a triangle built from an edge with
/// [`Edge::create_triangle`] inherits the winding of the triangle the edge came from.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    start: Point3<i32>,
    end: Point3<i32>,
}

impl Edge {
    /// Creates an edge from `start` to `end`.
    pub fn new(start: Point3<i32>, end: Point3<i32>) -> Self {
        Self { start, end }
    }

    /// First endpoint.
    pub fn start(&self) -> Point3<i32> {
        self.start
    }

    /// Second endpoint.
    pub fn end(&self) -> Point3<i32> {
        self.end
    }

    /// Joins this edge to `vertex`, keeping the edge's direction.
    pub fn create_triangle(&self, vertex: Point3<i32>) -> Triangle {
        Triangle::new(self.start, self.end, vertex)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl Eq for Edge {}
