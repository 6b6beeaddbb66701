//! # Convex Hull
//!
//! Exact convex hulls of integer vertex sets.
//!
//! All geometry is evaluated in `i128`, so membership never depends on floating point
//! rounding. The hull degrades with its input:
//! - no vertices: empty
//! - one distinct vertex: a point
//! - collinear vertices: a segment
//! - coplanar vertices: a flat convex polygon
//! - anything else: a closed triangle mesh
//!
//! The mesh is built incrementally. Each new vertex removes the faces it can see; the edges
//! on the border of the removed patch are joined to the vertex to close the mesh again.

use std::cell::Cell;

use cgmath::Point3;
use log::trace;

mod edge;
mod triangle;

pub use edge::Edge;
pub use triangle::Triangle;

/// An integer vector wide enough for products of `i32` differences.
pub(crate) type Wide = [i128; 3];

pub(crate) fn widen(p: Point3<i32>) -> Wide {
    [p.x as i128, p.y as i128, p.z as i128]
}

pub(crate) fn cross(a: Wide, b: Wide) -> Wide {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn dot(a: Wide, b: Wide) -> i128 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn offset(from: Point3<i32>, to: Point3<i32>) -> Wide {
    let (a, b) = (widen(from), widen(to));
    [b[0] - a[0], b[1] - a[1], b[2] - a[2]]
}

/// A planar convex polygon embedded in 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatHull {
    /// Any face of the polygon, used for the plane test.
    plane: Triangle,
    /// Axis dropped when projecting onto the plane.
    dropped_axis: usize,
    /// Outline in counter-clockwise order in the projected coordinates.
    outline: Vec<Point3<i32>>,
    /// Fan of the outline, once in each winding.
    triangles: Vec<Triangle>,
}

/// The convex hull of a vertex set.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Hull {
    /// No vertices.
    #[default]
    Empty,
    /// A single distinct vertex.
    Point(Point3<i32>),
    /// Collinear vertices, as the two extreme ones.
    Segment(Point3<i32>, Point3<i32>),
    /// Coplanar vertices.
    Flat(FlatHull),
    /// A closed triangle mesh with outward normals.
    Solid(Vec<Triangle>),
}

impl Hull {
    /// Builds the hull of `vertices`.
    pub fn build(vertices: &[Point3<i32>]) -> Self {
        let Some(&a) = vertices.first() else {
            return Hull::Empty;
        };
        let Some(&b) = vertices.iter().find(|&&v| v != a) else {
            return Hull::Point(a);
        };

        let ab = offset(a, b);
        let Some(&c) = vertices
            .iter()
            .find(|&&v| cross(ab, offset(a, v)) != [0, 0, 0])
        else {
            return Self::segment(a, ab, vertices);
        };

        let base = Triangle::new(a, b, c);
        let Some(&d) = vertices
            .iter()
            .find(|&&v| base.above(v) || base.below(v))
        else {
            return Hull::Flat(FlatHull::new(base, vertices));
        };

        let mut triangles = vec![base.clone(), Triangle::new(a, c, b)];
        add_to_mesh(&mut triangles, d);
        for &vertex in vertices {
            add_to_mesh(&mut triangles, vertex);
        }

        trace!(
            "convex hull of {} vertices has {} faces",
            vertices.len(),
            triangles.len()
        );
        Hull::Solid(triangles)
    }

    fn segment(a: Point3<i32>, direction: Wide, vertices: &[Point3<i32>]) -> Self {
        let along = |v: &Point3<i32>| dot(direction, offset(a, *v));
        let start = vertices.iter().copied().min_by_key(|v| along(v)).unwrap_or(a);
        let end = vertices.iter().copied().max_by_key(|v| along(v)).unwrap_or(a);
        Hull::Segment(start, end)
    }

    /// Returns `true` for a hull with a non-zero area face, i.e. flat or solid.
    pub fn has_faces(&self) -> bool {
        matches!(self, Hull::Flat(_) | Hull::Solid(_))
    }

    /// The faces of the hull; empty for points and segments.
    pub fn triangles(&self) -> &[Triangle] {
        match self {
            Hull::Flat(flat) => &flat.triangles,
            Hull::Solid(triangles) => triangles,
            Hull::Empty | Hull::Point(_) | Hull::Segment(..) => &[],
        }
    }

    /// Membership test, boundary included.
    ///
    /// `last_rejection` remembers the face that rejected the previous position; nearby
    /// queries are usually rejected by the same face, so it is tested first.
    pub fn contains(&self, position: Point3<i32>, last_rejection: &Cell<Option<usize>>) -> bool {
        match self {
            Hull::Empty => false,
            Hull::Point(p) => *p == position,
            Hull::Segment(start, end) => {
                let direction = offset(*start, *end);
                let relative = offset(*start, position);
                cross(direction, relative) == [0, 0, 0]
                    && (0..=dot(direction, direction)).contains(&dot(direction, relative))
            }
            Hull::Flat(flat) => flat.contains(position),
            Hull::Solid(triangles) => {
                if let Some(cached) = last_rejection.get().and_then(|i| triangles.get(i)) {
                    if cached.above(position) {
                        return false;
                    }
                }

                match triangles.iter().position(|t| t.above(position)) {
                    Some(index) => {
                        last_rejection.set(Some(index));
                        false
                    }
                    None => true,
                }
            }
        }
    }
}

/// Adds `vertex` to a closed mesh, replacing every face that can see it.
fn add_to_mesh(triangles: &mut Vec<Triangle>, vertex: Point3<i32>) {
    let mut border: Vec<Edge> = Vec::new();
    let mut any_visible = false;

    triangles.retain(|triangle| {
        if !triangle.above(vertex) {
            return true;
        }
        any_visible = true;
        for index in 0..3 {
            let edge = triangle.edge(index);
            match border.iter().position(|e| *e == edge) {
                Some(shared) => {
                    border.remove(shared);
                }
                None => border.push(edge),
            }
        }
        false
    });

    if any_visible {
        triangles.extend(border.iter().map(|edge| edge.create_triangle(vertex)));
    }
}

impl FlatHull {
    fn new(plane: Triangle, vertices: &[Point3<i32>]) -> Self {
        let normal = plane.normal();
        let dropped_axis = (0..3)
            .max_by_key(|&axis| normal[axis].abs())
            .unwrap_or(1);

        let outline = Self::outline(dropped_axis, normal[dropped_axis] < 0, vertices);

        let mut triangles = Vec::new();
        if let Some((&first, rest)) = outline.split_first() {
            for pair in rest.windows(2) {
                triangles.push(Triangle::new(first, pair[0], pair[1]));
                triangles.push(Triangle::new(first, pair[1], pair[0]));
            }
        }

        Self {
            plane,
            dropped_axis,
            outline,
            triangles,
        }
    }

    fn project(dropped_axis: usize, p: Point3<i32>) -> (i128, i128) {
        let w = widen(p);
        match dropped_axis {
            0 => (w[1], w[2]),
            1 => (w[2], w[0]),
            _ => (w[0], w[1]),
        }
    }

    fn turn(o: (i128, i128), a: (i128, i128), b: (i128, i128)) -> i128 {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    }

    /// Monotone chain hull of the projected vertices, counter-clockwise, without collinear
    /// points. When the plane faces the negative dropped axis the order is reversed so the
    /// outline winds the same way as `plane`.
    fn outline(dropped_axis: usize, flipped: bool, vertices: &[Point3<i32>]) -> Vec<Point3<i32>> {
        let mut sorted: Vec<_> = vertices.to_vec();
        sorted.sort_by_key(|&p| Self::project(dropped_axis, p));
        sorted.dedup();

        let mut hull: Vec<Point3<i32>> = Vec::with_capacity(sorted.len() + 1);
        for &p in &sorted {
            Self::push_convex(&mut hull, 2, dropped_axis, p);
        }
        let lower_len = hull.len() + 1;
        for &p in sorted.iter().rev().skip(1) {
            Self::push_convex(&mut hull, lower_len, dropped_axis, p);
        }
        hull.pop();

        if flipped {
            hull.reverse();
        }
        hull
    }

    /// Pushes `p`, first popping every trailing point that would not make a left turn.
    /// Points below index `floor - 1` are never popped.
    fn push_convex(hull: &mut Vec<Point3<i32>>, floor: usize, dropped_axis: usize, p: Point3<i32>) {
        while hull.len() >= floor {
            let n = hull.len();
            let turn = Self::turn(
                Self::project(dropped_axis, hull[n - 2]),
                Self::project(dropped_axis, hull[n - 1]),
                Self::project(dropped_axis, p),
            );
            if turn > 0 {
                break;
            }
            hull.pop();
        }
        hull.push(p);
    }

    fn contains(&self, position: Point3<i32>) -> bool {
        if self.plane.above(position) || self.plane.below(position) {
            return false;
        }

        let q = Self::project(self.dropped_axis, position);
        let sign = if self.plane.normal()[self.dropped_axis] < 0 { -1 } else { 1 };
        let n = self.outline.len();
        (0..n).all(|i| {
            let a = Self::project(self.dropped_axis, self.outline[i]);
            let b = Self::project(self.dropped_axis, self.outline[(i + 1) % n]);
            sign * Self::turn(a, b, q) >= 0
        })
    }

    /// Outline vertices in winding order.
    pub fn outline_vertices(&self) -> &[Point3<i32>] {
        &self.outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_corners(size: i32) -> Vec<Point3<i32>> {
        let mut corners = Vec::new();
        for x in [0, size] {
            for y in [0, size] {
                for z in [0, size] {
                    corners.push(Point3::new(x, y, z));
                }
            }
        }
        corners
    }

    fn count_inside(hull: &Hull, min: i32, max: i32) -> usize {
        let cache = Cell::new(None);
        let mut count = 0;
        for x in min..=max {
            for y in min..=max {
                for z in min..=max {
                    if hull.contains(Point3::new(x, y, z), &cache) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    #[test]
    fn test_degenerate_inputs() {
        let cache = Cell::new(None);
        assert_eq!(Hull::build(&[]), Hull::Empty);

        let point = Hull::build(&[Point3::new(1, 2, 3), Point3::new(1, 2, 3)]);
        assert!(point.contains(Point3::new(1, 2, 3), &cache));
        assert!(!point.has_faces());

        let segment = Hull::build(&[
            Point3::new(2, 2, 2),
            Point3::new(0, 0, 0),
            Point3::new(4, 4, 4),
        ]);
        assert!(matches!(segment, Hull::Segment(..)));
        assert_eq!(count_inside(&segment, -1, 5), 5);
    }

    #[test]
    fn test_cube_hull_contains_every_block() {
        let hull = Hull::build(&cube_corners(3));

        assert!(hull.has_faces());
        assert!(hull.triangles().iter().all(|t| !t.is_degenerate()));
        assert_eq!(count_inside(&hull, -2, 6), 64);
    }

    #[test]
    fn test_tetrahedron() {
        let hull = Hull::build(&[
            Point3::new(0, 0, 0),
            Point3::new(3, 0, 0),
            Point3::new(0, 3, 0),
            Point3::new(0, 0, 3),
        ]);

        assert_eq!(hull.triangles().len(), 4);
        // x + y + z <= 3 with non-negative coordinates
        assert_eq!(count_inside(&hull, -1, 4), 20);
    }

    #[test]
    fn test_interior_vertices_change_nothing() {
        let mut vertices = cube_corners(4);
        let solid = Hull::build(&vertices);
        vertices.push(Point3::new(2, 2, 2));
        vertices.push(Point3::new(4, 2, 2));

        assert_eq!(count_inside(&Hull::build(&vertices), -1, 5), count_inside(&solid, -1, 5));
    }

    #[test]
    fn test_flat_hull_is_a_filled_polygon() {
        let hull = Hull::build(&[
            Point3::new(0, 5, 0),
            Point3::new(4, 5, 0),
            Point3::new(4, 5, 4),
            Point3::new(0, 5, 4),
            Point3::new(2, 5, 2),
        ]);

        let Hull::Flat(flat) = &hull else {
            panic!("coplanar input should give a flat hull, got {hull:?}");
        };
        assert_eq!(flat.outline_vertices().len(), 4);
        assert_eq!(hull.triangles().len(), 4);
        assert_eq!(count_inside(&hull, -1, 6), 25);
    }

    #[test]
    fn test_tilted_flat_hull() {
        // the plane x = y, a 3 wide diagonal strip
        let hull = Hull::build(&[
            Point3::new(0, 0, 0),
            Point3::new(2, 2, 0),
            Point3::new(0, 0, 2),
            Point3::new(2, 2, 2),
        ]);

        assert!(matches!(hull, Hull::Flat(_)));
        assert_eq!(count_inside(&hull, -1, 3), 9);
    }

    #[test]
    fn test_rejection_cache_is_reused() {
        let hull = Hull::build(&cube_corners(2));
        let cache = Cell::new(None);

        assert!(!hull.contains(Point3::new(10, 1, 1), &cache));
        let rejected_by = cache.get();
        assert!(rejected_by.is_some());
        assert!(!hull.contains(Point3::new(11, 1, 1), &cache));
        assert_eq!(cache.get(), rejected_by);
        assert!(hull.contains(Point3::new(1, 1, 1), &cache));
    }
}
