//! # Convex Polyhedral Region
//!
//! The convex hull of a growing set of vertices.
//!
//! The hull is derived state: it is rebuilt from the vertex list every time a vertex is added
//! or the region is moved, and is never shared between regions.

use std::cell::Cell;

use cgmath::{Point3, Vector3};
use log::debug;

use super::iterator::RegionIterator;
use super::polyhedron::{Hull, Triangle};
use super::{RegionIter, RegionShape};
use crate::error::{RegionError, RegionResult};
use crate::math::BlockPoint3Ext;
use crate::world::WorldContext;

/// The convex hull of a set of block positions.
#[derive(Debug, Clone, Default)]
pub struct ConvexPolyhedralRegion {
    /// Distinct vertices in insertion order.
    vertices: Vec<Point3<i32>>,
    hull: Hull,
    /// Face that rejected the most recent containment query.
    last_triangle: Cell<Option<usize>>,
    world: WorldContext,
}

impl PartialEq for ConvexPolyhedralRegion {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.world == other.world
    }
}

impl ConvexPolyhedralRegion {
    /// Creates a region without vertices.
    pub fn new(world: WorldContext) -> Self {
        Self {
            world,
            ..Self::default()
        }
    }

    /// Creates a detached region from the given vertices.
    pub fn from_vertices(vertices: impl IntoIterator<Item = Point3<i32>>) -> Self {
        let mut region = Self::default();
        for vertex in vertices {
            region.add_vertex(vertex);
        }
        region
    }

    /// Adds a vertex and rebuilds the hull.
    ///
    /// # Returns
    /// `false` if the vertex was already present.
    pub fn add_vertex(&mut self, vertex: Point3<i32>) -> bool {
        if self.vertices.contains(&vertex) {
            return false;
        }

        self.vertices.push(vertex);
        self.rebuild();
        debug!(
            "convex region now has {} vertices and {} faces",
            self.vertices.len(),
            self.hull.triangles().len()
        );
        true
    }

    /// Removes every vertex.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.rebuild();
    }

    /// Returns `true` once the vertices span at least a triangle.
    pub fn is_defined(&self) -> bool {
        self.hull.has_faces()
    }

    /// Distinct vertices in insertion order. Vertices inside the hull are kept.
    pub fn vertices(&self) -> &[Point3<i32>] {
        &self.vertices
    }

    /// Faces of the hull with outward normals. A flat hull lists each face in both windings.
    pub fn triangles(&self) -> &[Triangle] {
        self.hull.triangles()
    }

    fn rebuild(&mut self) {
        self.hull = Hull::build(&self.vertices);
        self.last_triangle.set(None);
    }
}

impl RegionShape for ConvexPolyhedralRegion {
    fn shape_name(&self) -> &'static str {
        "polyhedron"
    }

    fn minimum_point(&self) -> Point3<i32> {
        let mut vertices = self.vertices.iter().copied();
        let first = vertices.next().unwrap_or(Point3::new(0, 0, 0));
        vertices.fold(first, BlockPoint3Ext::min_components)
    }

    fn maximum_point(&self) -> Point3<i32> {
        let mut vertices = self.vertices.iter().copied();
        let first = vertices.next().unwrap_or(Point3::new(0, 0, 0));
        vertices.fold(first, BlockPoint3Ext::max_components)
    }

    /// The mean of the vertices.
    fn center(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::new(0.0, 0.0, 0.0);
        }

        let sum = self
            .vertices
            .iter()
            .fold(Vector3::new(0.0, 0.0, 0.0), |sum, v| {
                sum + Vector3::new(v.x as f64, v.y as f64, v.z as f64)
            });
        Point3::new(0.0, 0.0, 0.0) + sum / self.vertices.len() as f64
    }

    fn contains(&self, position: Point3<i32>) -> bool {
        if !position.contained_within(self.minimum_point(), self.maximum_point()) {
            return false;
        }
        self.hull.contains(position, &self.last_triangle)
    }

    fn expand(&mut self, _changes: &[Vector3<i32>]) -> RegionResult<()> {
        Err(RegionError::unsupported(
            self.shape_name(),
            "expansion is not supported",
        ))
    }

    fn contract(&mut self, _changes: &[Vector3<i32>]) -> RegionResult<()> {
        Err(RegionError::unsupported(
            self.shape_name(),
            "contraction is not supported",
        ))
    }

    fn shift(&mut self, change: Vector3<i32>) {
        for vertex in &mut self.vertices {
            *vertex += change;
        }
        self.rebuild();
    }

    fn iter(&self) -> RegionIter<'_> {
        RegionIter::Scan(RegionIterator::new(self))
    }

    fn world(&self) -> &WorldContext {
        &self.world
    }

    fn set_world(&mut self, world: WorldContext) {
        self.world = world;
    }
}
