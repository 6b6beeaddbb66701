//! # Selector Module
//!
//! Interactive builders that turn a sequence of picked block positions into a region.
//!
//! Each selector family is a small state machine:
//!
//! ```text
//!   Empty --primary--> PrimaryPicked --secondary--> Defined
//!     ^                                               |  ^
//!     +------------------- clear() -------------------+  +-- secondary (refine)
//! ```
//!
//! Picks return whether anything observable changed, so callers can skip redundant updates.
//! Point-sequence selectors keep their first pick next to the region they build; after the
//! region has been changed directly, [`RegionSelection::learn_changes`] (or
//! [`RegionSelector::sync`]) re-derives it.

use std::str::FromStr;

use cgmath::{Point3, Vector2, Vector3};
use log::debug;
use phf::phf_map;

use crate::error::{RegionError, RegionResult};
use crate::math::BlockPoint2Ext;
use crate::regions::{ConvexPolyhedralRegion, Region, RegionShape};
use crate::world::WorldContext;

pub mod convex_polyhedral;
pub mod cuboid;
pub mod cylinder;
pub mod describe;
pub mod ellipsoid;
pub mod limits;
pub mod polygonal;

pub use convex_polyhedral::ConvexPolyhedralSelector;
pub use cuboid::CuboidSelector;
pub use cylinder::CylinderSelector;
pub use describe::{ShapeDescriptionSink, ShapeEvent};
pub use ellipsoid::EllipsoidSelector;
pub use limits::SelectorLimits;
pub use polygonal::Polygonal2DSelector;

/// The picking protocol shared by every selector family.
pub trait RegionSelection {
    /// The region type being built.
    type Shape: RegionShape + ?Sized;

    /// Sets or resets the anchor of the selection.
    ///
    /// # Returns
    /// `false` if nothing changed, e.g. when the same position is picked twice.
    ///
    /// # Errors
    /// [`RegionError::ReferenceLost`] if the region needs the world and it has been dropped.
    fn select_primary(
        &mut self,
        position: Point3<i32>,
        limits: &SelectorLimits,
    ) -> RegionResult<bool>;

    /// Extends or completes the selection.
    ///
    /// # Returns
    /// `false` if nothing changed, including when a vertex limit has been reached.
    ///
    /// # Errors
    /// Same as [`RegionSelection::select_primary`].
    fn select_secondary(
        &mut self,
        position: Point3<i32>,
        limits: &SelectorLimits,
    ) -> RegionResult<bool>;

    /// Returns `true` when [`RegionSelection::region`] would succeed.
    fn is_defined(&self) -> bool;

    /// The region in whatever state it is, complete or not.
    fn incomplete_region(&self) -> &Self::Shape;

    /// Mutable access to the region in whatever state it is.
    ///
    /// Call [`RegionSelection::learn_changes`] after changing it.
    fn incomplete_region_mut(&mut self) -> &mut Self::Shape;

    /// The finished region.
    ///
    /// # Errors
    /// [`RegionError::IncompleteSelection`] until the selection is defined.
    fn region(&self) -> RegionResult<&Self::Shape> {
        if !self.is_defined() {
            return Err(RegionError::IncompleteSelection);
        }
        Ok(self.incomplete_region())
    }

    /// Mutable access to the finished region.
    ///
    /// # Errors
    /// [`RegionError::IncompleteSelection`] until the selection is defined.
    fn region_mut(&mut self) -> RegionResult<&mut Self::Shape> {
        if !self.is_defined() {
            return Err(RegionError::IncompleteSelection);
        }
        Ok(self.incomplete_region_mut())
    }

    /// The anchor position of the selection.
    ///
    /// # Errors
    /// [`RegionError::IncompleteSelection`] before the first primary pick.
    fn primary_position(&self) -> RegionResult<Point3<i32>>;

    /// Re-derives cached pick state from the region after it was changed directly.
    fn learn_changes(&mut self);

    /// Returns to the empty state, keeping the world.
    fn clear(&mut self);

    /// Number of selected blocks, `None` while incomplete.
    fn area(&self) -> Option<u64> {
        self.is_defined().then(|| self.incomplete_region().area())
    }

    /// Human-readable name of the selector family.
    fn type_name(&self) -> &'static str;

    /// Stable identifier used in [`ShapeEvent::Shape`].
    fn type_id(&self) -> &'static str;

    /// Version of the event layout emitted by [`RegionSelection::describe_shape`].
    fn protocol_version(&self) -> u32;

    /// Short status lines for display.
    fn information_lines(&self) -> Vec<String>;

    /// Emits the geometry of the current state. The output depends only on that state.
    fn describe_shape(&self, sink: &mut dyn ShapeDescriptionSink);

    /// Emits a [`ShapeEvent::Shape`] header followed by [`RegionSelection::describe_shape`].
    fn describe_selection(&self, sink: &mut dyn ShapeDescriptionSink) {
        sink.dispatch(ShapeEvent::Shape {
            type_id: self.type_id(),
            protocol_version: self.protocol_version(),
        });
        self.describe_shape(sink);
    }

    /// Moves the selection to another world.
    fn set_world(&mut self, world: WorldContext) {
        self.incomplete_region_mut().set_world(world);
    }
}

/// The selector families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    /// Two opposite corners.
    Cuboid,
    /// Center, then radius and height.
    Cylinder,
    /// Center, then radius.
    Ellipsoid,
    /// Polygon vertices and a height.
    Polygon2D,
    /// Convex hull vertices.
    ConvexPolyhedron,
}

static SELECTOR_NAMES: phf::Map<&'static str, SelectorKind> = phf_map! {
    "cuboid" => SelectorKind::Cuboid,
    "cyl" => SelectorKind::Cylinder,
    "cylinder" => SelectorKind::Cylinder,
    "ellipsoid" => SelectorKind::Ellipsoid,
    "sphere" => SelectorKind::Ellipsoid,
    "poly" => SelectorKind::Polygon2D,
    "polygon" => SelectorKind::Polygon2D,
    "polygon2d" => SelectorKind::Polygon2D,
    "convex" => SelectorKind::ConvexPolyhedron,
    "hull" => SelectorKind::ConvexPolyhedron,
    "polyhedron" => SelectorKind::ConvexPolyhedron,
};

impl SelectorKind {
    /// Resolves a selector name or alias, ignoring case.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] for an unknown name.
    pub fn from_name(name: &str) -> RegionResult<Self> {
        SELECTOR_NAMES
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| RegionError::invalid(format!("unknown selector type '{name}'")))
    }
}

impl FromStr for SelectorKind {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Any selector.
#[derive(Debug, Clone)]
pub enum RegionSelector {
    /// See [`CuboidSelector`].
    Cuboid(CuboidSelector),
    /// See [`CylinderSelector`].
    Cylinder(CylinderSelector),
    /// See [`EllipsoidSelector`].
    Ellipsoid(EllipsoidSelector),
    /// See [`Polygonal2DSelector`].
    Polygon2D(Polygonal2DSelector),
    /// See [`ConvexPolyhedralSelector`].
    ConvexPolyhedron(ConvexPolyhedralSelector),
}

macro_rules! dispatch {
    ($selector:expr, $inner:ident => $body:expr) => {
        match $selector {
            RegionSelector::Cuboid($inner) => $body,
            RegionSelector::Cylinder($inner) => $body,
            RegionSelector::Ellipsoid($inner) => $body,
            RegionSelector::Polygon2D($inner) => $body,
            RegionSelector::ConvexPolyhedron($inner) => $body,
        }
    };
}

impl RegionSelector {
    /// Creates an empty selector of the given kind.
    pub fn new(kind: SelectorKind, world: WorldContext) -> Self {
        match kind {
            SelectorKind::Cuboid => CuboidSelector::new(world).into(),
            SelectorKind::Cylinder => CylinderSelector::new(world).into(),
            SelectorKind::Ellipsoid => EllipsoidSelector::new(world).into(),
            SelectorKind::Polygon2D => Polygonal2DSelector::new(world).into(),
            SelectorKind::ConvexPolyhedron => ConvexPolyhedralSelector::new(world).into(),
        }
    }

    /// The family of this selector.
    pub fn kind(&self) -> SelectorKind {
        match self {
            RegionSelector::Cuboid(_) => SelectorKind::Cuboid,
            RegionSelector::Cylinder(_) => SelectorKind::Cylinder,
            RegionSelector::Ellipsoid(_) => SelectorKind::Ellipsoid,
            RegionSelector::Polygon2D(_) => SelectorKind::Polygon2D,
            RegionSelector::ConvexPolyhedron(_) => SelectorKind::ConvexPolyhedron,
        }
    }

    /// Builds a selector of another family from this one.
    ///
    /// The same family is a plain copy. An incomplete selection converts to an empty
    /// selector in the same world. A complete one is fitted into the new shape from its
    /// bounding box:
    /// - cuboid: the box itself
    /// - cylinder and ellipsoid: centered on the box, reaching its upper corner
    /// - polygon: the outline from [`RegionShape::polygonize`], extruded over the box height
    /// - convex polyhedron: the same outline at the bottom and top layers
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if the outline cannot be described within `limits`,
    /// or [`RegionError::ReferenceLost`] if the world has been dropped.
    pub fn convert(&self, kind: SelectorKind, limits: &SelectorLimits) -> RegionResult<Self> {
        if kind == self.kind() {
            return Ok(self.clone());
        }

        let world = self.incomplete_region().world().clone();
        let Ok(old) = self.region() else {
            debug!("converting incomplete {:?} selection to empty {kind:?}", self.kind());
            return Ok(Self::new(kind, world));
        };

        let min = old.minimum_point();
        let max = old.maximum_point();
        let center = Point3::new(
            (min.x + max.x).div_euclid(2),
            (min.y + max.y).div_euclid(2),
            (min.z + max.z).div_euclid(2),
        );
        let reach = Vector3::new(
            (max.x - center.x) as f64,
            (max.y - center.y) as f64,
            (max.z - center.z) as f64,
        );

        let converted = match kind {
            SelectorKind::Cuboid => CuboidSelector::with_corners(world, min, max).into(),
            SelectorKind::Cylinder => {
                let radius = Vector2::new(reach.x, reach.z);
                CylinderSelector::with_shape(world, center, radius, min.y, max.y).into()
            }
            SelectorKind::Ellipsoid => EllipsoidSelector::with_shape(world, center, reach).into(),
            SelectorKind::Polygon2D => {
                let outline = old.polygonize(limits.polygon_vertex_limit)?;
                Polygonal2DSelector::with_points(world, outline, min.y, max.y)?.into()
            }
            SelectorKind::ConvexPolyhedron => {
                let cap = limits.polyhedron_vertex_limit.map(|limit| limit / 2);
                let mut region = ConvexPolyhedralRegion::new(world);
                for point in old.polygonize(cap)? {
                    region.add_vertex(point.at_y(min.y));
                    region.add_vertex(point.at_y(max.y));
                }
                ConvexPolyhedralSelector::from_region(region).into()
            }
        };

        debug!("converted {:?} selection to {kind:?}", self.kind());
        Ok(converted)
    }

    /// Re-derives cached pick state from the region. Same as [`RegionSelection::learn_changes`].
    pub fn sync(&mut self) {
        self.learn_changes();
    }

    /// Applies `change` to the region under construction, then calls [`RegionSelector::sync`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cgmath::{Point3, Vector3};
    /// use voxel_region::regions::RegionShape;
    /// use voxel_region::selector::{RegionSelection, RegionSelector, SelectorKind, SelectorLimits};
    /// use voxel_region::world::WorldContext;
    ///
    /// let limits = SelectorLimits::unlimited();
    /// let mut selector = RegionSelector::new(SelectorKind::Cuboid, WorldContext::detached());
    /// selector.select_primary(Point3::new(0, 0, 0), &limits).unwrap();
    /// selector.select_secondary(Point3::new(3, 3, 3), &limits).unwrap();
    ///
    /// selector.modify_region(|region| region.shift(Vector3::new(10, 0, 0)));
    /// assert_eq!(selector.primary_position().unwrap(), Point3::new(10, 0, 0));
    /// ```
    pub fn modify_region<R>(&mut self, change: impl FnOnce(&mut dyn RegionShape) -> R) -> R {
        let result = change(self.incomplete_region_mut());
        self.sync();
        result
    }

    /// A copy of the finished region.
    ///
    /// # Errors
    /// [`RegionError::IncompleteSelection`] until the selection is defined.
    pub fn to_region(&self) -> RegionResult<Region> {
        if !self.is_defined() {
            return Err(RegionError::IncompleteSelection);
        }

        Ok(match self {
            RegionSelector::Cuboid(s) => s.incomplete_region().clone().into(),
            RegionSelector::Cylinder(s) => s.incomplete_region().clone().into(),
            RegionSelector::Ellipsoid(s) => s.incomplete_region().clone().into(),
            RegionSelector::Polygon2D(s) => s.incomplete_region().clone().into(),
            RegionSelector::ConvexPolyhedron(s) => s.incomplete_region().clone().into(),
        })
    }
}

impl RegionSelection for RegionSelector {
    type Shape = dyn RegionShape;

    fn select_primary(
        &mut self,
        position: Point3<i32>,
        limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        dispatch!(self, s => s.select_primary(position, limits))
    }

    fn select_secondary(
        &mut self,
        position: Point3<i32>,
        limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        dispatch!(self, s => s.select_secondary(position, limits))
    }

    fn is_defined(&self) -> bool {
        dispatch!(self, s => s.is_defined())
    }

    fn incomplete_region(&self) -> &Self::Shape {
        dispatch!(self, s => s.incomplete_region())
    }

    fn incomplete_region_mut(&mut self) -> &mut Self::Shape {
        dispatch!(self, s => s.incomplete_region_mut())
    }

    fn primary_position(&self) -> RegionResult<Point3<i32>> {
        dispatch!(self, s => s.primary_position())
    }

    fn learn_changes(&mut self) {
        dispatch!(self, s => s.learn_changes())
    }

    fn clear(&mut self) {
        dispatch!(self, s => s.clear())
    }

    fn area(&self) -> Option<u64> {
        dispatch!(self, s => s.area())
    }

    fn type_name(&self) -> &'static str {
        dispatch!(self, s => s.type_name())
    }

    fn type_id(&self) -> &'static str {
        dispatch!(self, s => s.type_id())
    }

    fn protocol_version(&self) -> u32 {
        dispatch!(self, s => s.protocol_version())
    }

    fn information_lines(&self) -> Vec<String> {
        dispatch!(self, s => s.information_lines())
    }

    fn describe_shape(&self, sink: &mut dyn ShapeDescriptionSink) {
        dispatch!(self, s => s.describe_shape(sink))
    }
}

impl From<CuboidSelector> for RegionSelector {
    fn from(value: CuboidSelector) -> Self {
        RegionSelector::Cuboid(value)
    }
}

impl From<CylinderSelector> for RegionSelector {
    fn from(value: CylinderSelector) -> Self {
        RegionSelector::Cylinder(value)
    }
}

impl From<EllipsoidSelector> for RegionSelector {
    fn from(value: EllipsoidSelector) -> Self {
        RegionSelector::Ellipsoid(value)
    }
}

impl From<Polygonal2DSelector> for RegionSelector {
    fn from(value: Polygonal2DSelector) -> Self {
        RegionSelector::Polygon2D(value)
    }
}

impl From<ConvexPolyhedralSelector> for RegionSelector {
    fn from(value: ConvexPolyhedralSelector) -> Self {
        RegionSelector::ConvexPolyhedron(value)
    }
}
