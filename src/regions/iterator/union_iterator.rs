use cgmath::Point3;

use super::RegionIter;
use crate::regions::{Region, RegionShape};

/// Chains the iterators of several regions.
///
/// A position yielded by member `i` is skipped when an earlier member already contains it,
/// so overlapping members do not produce duplicates.
#[derive(Debug)]
pub struct UnionIterator<'a> {
    members: &'a [Region],
    index: usize,
    current: Option<Box<RegionIter<'a>>>,
}

impl<'a> UnionIterator<'a> {
    /// Creates an iterator over the union of `members`.
    pub fn new(members: &'a [Region]) -> Self {
        Self {
            members,
            index: 0,
            current: None,
        }
    }
}

impl Iterator for UnionIterator<'_> {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        let members = self.members;

        loop {
            let member = members.get(self.index)?;
            let current = self.current.get_or_insert_with(|| Box::new(member.iter()));
            let earlier = &members[..self.index];

            if let Some(position) = current.find(|p| !earlier.iter().any(|m| m.contains(*p))) {
                return Some(position);
            }

            self.current = None;
            self.index += 1;
        }
    }
}
