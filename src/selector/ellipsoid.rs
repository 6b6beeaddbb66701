use cgmath::{Point3, Vector3};
use log::debug;

use super::{RegionSelection, SelectorLimits, ShapeDescriptionSink, ShapeEvent};
use crate::error::{RegionError, RegionResult};
use crate::math::abs3;
use crate::regions::{EllipsoidRegion, RegionShape};
use crate::world::WorldContext;

/// Center-then-radius ellipsoid selection.
#[derive(Debug, Clone, Default)]
pub struct EllipsoidSelector {
    started: bool,
    region: EllipsoidRegion,
}

impl EllipsoidSelector {
    /// Creates an empty selector in the given world.
    pub fn new(world: WorldContext) -> Self {
        Self {
            started: false,
            region: EllipsoidRegion::empty(world),
        }
    }

    /// Creates a selection from an explicit center and radius.
    pub fn with_shape(world: WorldContext, center: Point3<i32>, radius: Vector3<f64>) -> Self {
        let mut region = EllipsoidRegion::new(center, radius);
        region.set_world(world);
        Self {
            started: true,
            region,
        }
    }

    fn has_radius(&self) -> bool {
        self.region.radius() != Vector3::new(0.0, 0.0, 0.0)
    }
}

impl RegionSelection for EllipsoidSelector {
    type Shape = EllipsoidRegion;

    fn select_primary(
        &mut self,
        position: Point3<i32>,
        _limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        if self.started && position == self.region.center_block() && !self.has_radius() {
            return Ok(false);
        }

        self.region.set_center(position);
        self.region.set_radius(Vector3::new(0.0, 0.0, 0.0));
        self.started = true;
        debug!("ellipsoid selection: center at {position:?}");
        Ok(true)
    }

    fn select_secondary(
        &mut self,
        position: Point3<i32>,
        _limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        if !self.started {
            return Ok(false);
        }

        let offset = position - self.region.center_block();
        let reach = abs3(Vector3::new(offset.x as f64, offset.y as f64, offset.z as f64));
        let grown = self.region.extend_radius(reach);
        if grown {
            debug!("ellipsoid selection: radius {:?}", self.region.radius());
        }
        Ok(grown)
    }

    fn is_defined(&self) -> bool {
        self.started && self.has_radius()
    }

    fn incomplete_region(&self) -> &EllipsoidRegion {
        &self.region
    }

    fn incomplete_region_mut(&mut self) -> &mut EllipsoidRegion {
        &mut self.region
    }

    fn primary_position(&self) -> RegionResult<Point3<i32>> {
        if !self.started {
            return Err(RegionError::IncompleteSelection);
        }
        Ok(self.region.center_block())
    }

    /// The center is read straight from the region, so only the started flag can go stale.
    fn learn_changes(&mut self) {
        self.started |= self.has_radius();
    }

    fn clear(&mut self) {
        self.started = false;
        self.region.set_center(Point3::new(0, 0, 0));
        self.region.set_radius(Vector3::new(0.0, 0.0, 0.0));
    }

    fn type_name(&self) -> &'static str {
        "ellipsoid"
    }

    fn type_id(&self) -> &'static str {
        "ellipsoid"
    }

    fn protocol_version(&self) -> u32 {
        1
    }

    fn information_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.started {
            let c = self.region.center_block();
            lines.push(format!("Center: ({}, {}, {})", c.x, c.y, c.z));
        }
        if self.has_radius() {
            let r = self.region.radius();
            lines.push(format!("X/Y/Z radius: ({:.1}, {:.1}, {:.1})", r.x, r.y, r.z));
        }
        lines
    }

    fn describe_shape(&self, sink: &mut dyn ShapeDescriptionSink) {
        sink.dispatch(ShapeEvent::EllipsoidCenter {
            center: self.region.center_block().into(),
        });
        sink.dispatch(ShapeEvent::ellipsoid_radius(self.region.radius()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> SelectorLimits {
        SelectorLimits::unlimited()
    }

    #[test]
    fn test_center_then_radius() {
        let mut selector = EllipsoidSelector::default();
        assert!(!selector.select_secondary(Point3::new(1, 1, 1), &limits()).unwrap());

        assert!(selector.select_primary(Point3::new(0, 64, 0), &limits()).unwrap());
        assert!(!selector.is_defined());
        assert!(!selector.select_primary(Point3::new(0, 64, 0), &limits()).unwrap());

        assert!(selector.select_secondary(Point3::new(-3, 66, 1), &limits()).unwrap());
        assert!(selector.is_defined());
        assert_eq!(selector.incomplete_region().radius(), Vector3::new(3.0, 2.0, 1.0));
        assert!(!selector.select_secondary(Point3::new(1, 65, 0), &limits()).unwrap());
    }

    #[test]
    fn test_repicking_center_of_a_defined_selection_resets_it() {
        let mut selector =
            EllipsoidSelector::with_shape(WorldContext::detached(), Point3::new(0, 0, 0), Vector3::new(2.0, 2.0, 2.0));
        assert!(selector.select_primary(Point3::new(0, 0, 0), &limits()).unwrap());
        assert!(!selector.is_defined());
    }

    #[test]
    fn test_clear() {
        let mut selector =
            EllipsoidSelector::with_shape(WorldContext::detached(), Point3::new(5, 5, 5), Vector3::new(2.0, 2.0, 2.0));
        selector.clear();
        assert!(!selector.is_defined());
        assert!(selector.primary_position().is_err());
        assert!(selector.information_lines().is_empty());
    }

    #[test]
    fn test_describe_shape() {
        let selector =
            EllipsoidSelector::with_shape(WorldContext::detached(), Point3::new(1, 2, 3), Vector3::new(4.0, 5.0, 6.0));
        let mut events = Vec::new();
        selector.describe_shape(&mut events);

        assert_eq!(
            events,
            vec![
                ShapeEvent::EllipsoidCenter { center: [1, 2, 3] },
                ShapeEvent::EllipsoidRadius {
                    radius: [4.0, 5.0, 6.0]
                },
            ]
        );
    }
}
