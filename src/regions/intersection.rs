//! # Region Intersection
//!
//! A composite of several member regions.
//!
//! The name is historical. A position belongs to the composite when **any** member contains
//! it, so the region behaves as the union of its members. Code that builds on this type
//! (cuboid faces and walls, for one) relies on that behavior.

use std::collections::HashSet;

use cgmath::{Point2, Point3, Vector3};

use super::iterator::UnionIterator;
use super::{Region, RegionIter, RegionShape};
use crate::error::{RegionError, RegionResult};
use crate::math::BlockPoint3Ext;
use crate::world::WorldContext;

/// Several regions treated as one. Membership is the union of the members.
#[derive(Debug, Clone)]
pub struct RegionIntersection {
    members: Vec<Region>,
    world: WorldContext,
}

impl RegionIntersection {
    /// Combines `members` into one region living in the first member's world.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if `members` is empty.
    pub fn new(members: Vec<Region>) -> RegionResult<Self> {
        let Some(first) = members.first() else {
            return Err(RegionError::invalid("an intersection needs at least one region"));
        };

        let world = first.world().clone();
        Ok(Self { members, world })
    }

    pub(crate) fn from_members(world: WorldContext, members: Vec<Region>) -> Self {
        Self { members, world }
    }

    /// The member regions in the order they were given.
    pub fn members(&self) -> &[Region] {
        &self.members
    }

    fn bounds(&self) -> (Point3<i32>, Point3<i32>) {
        let mut members = self.members.iter();
        let Some(first) = members.next() else {
            let origin = Point3::new(0, 0, 0);
            return (origin, origin);
        };

        members.fold(
            (first.minimum_point(), first.maximum_point()),
            |(min, max), member| {
                (
                    min.min_components(member.minimum_point()),
                    max.max_components(member.maximum_point()),
                )
            },
        )
    }
}

impl RegionShape for RegionIntersection {
    fn shape_name(&self) -> &'static str {
        "intersection"
    }

    fn minimum_point(&self) -> Point3<i32> {
        self.bounds().0
    }

    fn maximum_point(&self) -> Point3<i32> {
        self.bounds().1
    }

    /// Any member containing `position` is enough: this is a union, not an intersection.
    fn contains(&self, position: Point3<i32>) -> bool {
        self.members.iter().any(|member| member.contains(position))
    }

    fn expand(&mut self, _changes: &[Vector3<i32>]) -> RegionResult<()> {
        Err(RegionError::unsupported(
            self.shape_name(),
            "cannot expand a region intersection",
        ))
    }

    fn contract(&mut self, _changes: &[Vector3<i32>]) -> RegionResult<()> {
        Err(RegionError::unsupported(
            self.shape_name(),
            "cannot contract a region intersection",
        ))
    }

    fn shift(&mut self, change: Vector3<i32>) {
        for member in &mut self.members {
            member.shift(change);
        }
    }

    fn chunks(&self) -> HashSet<Point2<i32>> {
        self.members.iter().flat_map(|m| m.chunks()).collect()
    }

    fn chunk_cubes(&self) -> HashSet<Point3<i32>> {
        self.members.iter().flat_map(|m| m.chunk_cubes()).collect()
    }

    fn iter(&self) -> RegionIter<'_> {
        RegionIter::Union(UnionIterator::new(&self.members))
    }

    fn world(&self) -> &WorldContext {
        &self.world
    }

    fn set_world(&mut self, world: WorldContext) {
        for member in &mut self.members {
            member.set_world(world.clone());
        }
        self.world = world;
    }
}
