use std::collections::HashMap;

use cgmath::Point3;
use log::debug;

use super::{RegionSelection, SelectorLimits, ShapeDescriptionSink, ShapeEvent};
use crate::error::{RegionError, RegionResult};
use crate::regions::ConvexPolyhedralRegion;
use crate::world::WorldContext;

/// Convex hull selection built from any number of picked vertices.
#[derive(Debug, Clone, Default)]
pub struct ConvexPolyhedralSelector {
    pos1: Option<Point3<i32>>,
    region: ConvexPolyhedralRegion,
}

impl ConvexPolyhedralSelector {
    /// Creates an empty selector in the given world.
    pub fn new(world: WorldContext) -> Self {
        Self {
            pos1: None,
            region: ConvexPolyhedralRegion::new(world),
        }
    }

    /// Wraps an existing region, taking its first vertex as the primary position.
    pub(crate) fn from_region(region: ConvexPolyhedralRegion) -> Self {
        let mut selector = Self { pos1: None, region };
        selector.learn_changes();
        selector
    }
}

impl RegionSelection for ConvexPolyhedralSelector {
    type Shape = ConvexPolyhedralRegion;

    fn select_primary(
        &mut self,
        position: Point3<i32>,
        _limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        if self.pos1 == Some(position) && self.region.vertices() == [position] {
            return Ok(false);
        }

        self.clear();
        self.pos1 = Some(position);
        debug!("convex selection: restarted at {position:?}");
        Ok(self.region.add_vertex(position))
    }

    fn select_secondary(
        &mut self,
        position: Point3<i32>,
        limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        let count = self.region.vertices().len();
        if SelectorLimits::reached(limits.polyhedron_vertex_limit, count) {
            debug!(
                "convex selection: vertex limit of {:?} reached",
                limits.polyhedron_vertex_limit
            );
            return Ok(false);
        }

        Ok(self.region.add_vertex(position))
    }

    fn is_defined(&self) -> bool {
        self.region.is_defined()
    }

    fn incomplete_region(&self) -> &ConvexPolyhedralRegion {
        &self.region
    }

    fn incomplete_region_mut(&mut self) -> &mut ConvexPolyhedralRegion {
        &mut self.region
    }

    fn primary_position(&self) -> RegionResult<Point3<i32>> {
        self.pos1.ok_or(RegionError::IncompleteSelection)
    }

    fn learn_changes(&mut self) {
        self.pos1 = self.region.vertices().first().copied();
    }

    fn clear(&mut self) {
        self.pos1 = None;
        self.region.clear();
    }

    fn type_name(&self) -> &'static str {
        "convex polyhedron"
    }

    fn type_id(&self) -> &'static str {
        "polyhedron"
    }

    fn protocol_version(&self) -> u32 {
        3
    }

    fn information_lines(&self) -> Vec<String> {
        vec![
            format!("Vertices: {}", self.region.vertices().len()),
            format!("Triangles: {}", self.region.triangles().len()),
        ]
    }

    /// Emits every vertex as a numbered point, then every hull face as a triple of point ids.
    fn describe_shape(&self, sink: &mut dyn ShapeDescriptionSink) {
        let area = self.area();
        let mut ids = HashMap::with_capacity(self.region.vertices().len());
        for (id, vertex) in self.region.vertices().iter().enumerate() {
            ids.insert(*vertex, id);
            sink.dispatch(ShapeEvent::point(id, *vertex, area));
        }

        for triangle in self.region.triangles() {
            let vertices: Vec<usize> = triangle
                .vertices()
                .iter()
                .filter_map(|v| ids.get(v).copied())
                .collect();
            sink.dispatch(ShapeEvent::Polygon { vertices });
        }
    }
}
