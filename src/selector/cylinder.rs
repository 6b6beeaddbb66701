use cgmath::{Point3, Vector2};
use log::debug;

use super::{RegionSelection, SelectorLimits, ShapeDescriptionSink, ShapeEvent};
use crate::error::{RegionError, RegionResult};
use crate::math::abs2;
use crate::regions::{CylinderRegion, FlatRegion, RegionShape};
use crate::world::WorldContext;

/// Center-then-radius cylinder selection.
///
/// The primary pick sets the center and the first layer. Every secondary pick grows the
/// radius far enough to reach the picked column and grows the height to reach its layer.
#[derive(Debug, Clone, Default)]
pub struct CylinderSelector {
    /// The picked center, `None` before the first primary pick.
    center: Option<Point3<i32>>,
    region: CylinderRegion,
}

impl CylinderSelector {
    /// Creates an empty selector in the given world.
    pub fn new(world: WorldContext) -> Self {
        Self {
            center: None,
            region: CylinderRegion::empty(world),
        }
    }

    /// Creates a selection from explicit dimensions.
    pub fn with_shape(
        world: WorldContext,
        center: Point3<i32>,
        radius: Vector2<f64>,
        min_y: i32,
        max_y: i32,
    ) -> Self {
        let mut region = CylinderRegion::new(center, radius, min_y, max_y);
        region.set_world(world);
        Self {
            center: Some(Point3::new(center.x, region.minimum_y(), center.z)),
            region,
        }
    }
}

impl RegionSelection for CylinderSelector {
    type Shape = CylinderRegion;

    fn select_primary(
        &mut self,
        position: Point3<i32>,
        _limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        if self.center == Some(position) {
            return Ok(false);
        }

        let mut region = CylinderRegion::empty(self.region.world().clone());
        region.set_center(position);
        region.set_y(position.y);
        self.region = region;
        self.center = Some(position);
        debug!("cylinder selection: center at {position:?}");
        Ok(true)
    }

    fn select_secondary(
        &mut self,
        position: Point3<i32>,
        _limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        if self.center.is_none() {
            return Ok(false);
        }

        let center = self.region.center_2d();
        let reach = abs2(Vector2::new(
            (position.x - center.x) as f64,
            (position.z - center.y) as f64,
        ));
        let widened = self.region.extend_radius(reach);
        let heightened = self.region.set_y(position.y);
        if widened || heightened {
            debug!(
                "cylinder selection: radius {:?}, layers {}..={}",
                self.region.radius(),
                self.region.minimum_y(),
                self.region.maximum_y()
            );
        }
        Ok(widened || heightened)
    }

    fn is_defined(&self) -> bool {
        self.center.is_some() && self.region.radius() != Vector2::new(0.0, 0.0)
    }

    fn incomplete_region(&self) -> &CylinderRegion {
        &self.region
    }

    fn incomplete_region_mut(&mut self) -> &mut CylinderRegion {
        &mut self.region
    }

    fn primary_position(&self) -> RegionResult<Point3<i32>> {
        self.center.ok_or(RegionError::IncompleteSelection)
    }

    fn learn_changes(&mut self) {
        if self.center.is_some() {
            let center = self.region.center_2d();
            self.center = Some(Point3::new(center.x, self.region.minimum_y(), center.y));
        }
    }

    fn clear(&mut self) {
        self.center = None;
        self.region = CylinderRegion::empty(self.region.world().clone());
    }

    fn type_name(&self) -> &'static str {
        "cylinder"
    }

    fn type_id(&self) -> &'static str {
        "cylinder"
    }

    fn protocol_version(&self) -> u32 {
        1
    }

    fn information_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(center) = self.center {
            lines.push(format!("Center: ({}, {})", center.x, center.z));
        }
        let radius = self.region.radius();
        if radius != Vector2::new(0.0, 0.0) {
            lines.push(format!("Radius: {:.3} x {:.3}", radius.x, radius.y));
        }
        if self.region.has_y() {
            lines.push(format!(
                "Layers: {} to {}",
                self.region.minimum_y(),
                self.region.maximum_y()
            ));
        }
        lines
    }

    fn describe_shape(&self, sink: &mut dyn ShapeDescriptionSink) {
        let center = self.region.center_2d();
        sink.dispatch(ShapeEvent::cylinder(
            Point3::new(center.x, self.region.minimum_y(), center.y),
            self.region.radius(),
        ));
        sink.dispatch(ShapeEvent::MinMax {
            min: self.region.minimum_y(),
            max: self.region.maximum_y(),
        });
    }
}
