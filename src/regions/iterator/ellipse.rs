//! Ellipse and ellipsoid row spans.
//!
//! Containment for the rounded shapes is `sum((d_i / r_i)^2) <= 1` evaluated in floating
//! point. The iterators below find each row's extent with the very same expression, so a
//! position is enumerated exactly when the shape's `contains` accepts it.

use cgmath::{Point2, Point3, Vector2, Vector3};

/// Squared normalized offset along one axis.
pub(crate) fn axis_term(offset: i32, radius: f64) -> f64 {
    let scaled = offset as f64 / radius;
    scaled * scaled
}

/// The containment threshold applied to a sum of [`axis_term`]s.
pub(crate) fn within(sum: f64) -> bool {
    sum <= 1.0
}

/// Largest `h` in `[0, limit]` with `within(prefix + axis_term(h, radius))`.
///
/// Returns `None` when not even `h = 0` is inside. Since the term grows with `|h|`, every
/// offset in `[-h, h]` is inside and every other one is not.
pub(crate) fn half_span(prefix: f64, radius: f64, limit: i32) -> Option<i32> {
    if limit < 0 || !within(prefix) {
        return None;
    }

    let estimate = radius * (1.0 - prefix).max(0.0).sqrt();
    let mut h = (estimate.floor() as i32).clamp(0, limit);

    while h < limit && within(prefix + axis_term(h + 1, radius)) {
        h += 1;
    }
    while h > 0 && !within(prefix + axis_term(h, radius)) {
        h -= 1;
    }

    Some(h)
}

/// Enumerates the (x, z) positions inside an axis-aligned ellipse.
///
/// X changes slowest; each X row yields one contiguous Z span.
#[derive(Debug, Clone)]
pub struct EllipseFootprintIterator {
    center: Point2<i32>,
    radius: Vector2<f64>,
    extent: Vector2<i32>,
    dx: i32,
    dz: i32,
    dz_end: i32,
}

impl EllipseFootprintIterator {
    /// Creates an iterator over the ellipse.
    ///
    /// # Arguments
    /// * `center` - Center block of the ellipse
    /// * `radius` - Radii along X and Z, as used by the containment test
    /// * `extent` - Largest offset from the center on each axis
    pub fn new(center: Point2<i32>, radius: Vector2<f64>, extent: Vector2<i32>) -> Self {
        let mut iter = Self {
            center,
            radius,
            extent,
            dx: -extent.x,
            dz: 1,
            dz_end: 0,
        };
        iter.start_row();
        iter
    }

    fn start_row(&mut self) {
        let prefix = axis_term(self.dx, self.radius.x);
        match half_span(prefix, self.radius.y, self.extent.y) {
            Some(h) => {
                self.dz = -h;
                self.dz_end = h;
            }
            None => {
                self.dz = 1;
                self.dz_end = 0;
            }
        }
    }
}

impl Iterator for EllipseFootprintIterator {
    type Item = Point2<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.dx <= self.extent.x {
            if self.dz <= self.dz_end {
                let position = Point2::new(self.center.x + self.dx, self.center.y + self.dz);
                self.dz += 1;
                return Some(position);
            }
            self.dx += 1;
            if self.dx <= self.extent.x {
                self.start_row();
            }
        }
        None
    }
}

/// Enumerates the positions inside an axis-aligned ellipsoid.
///
/// X changes fastest, then Z, then Y. Each (y, z) row yields one contiguous X span.
#[derive(Debug, Clone)]
pub struct EllipsoidIterator {
    center: Point3<i32>,
    radius: Vector3<f64>,
    extent: Vector3<i32>,
    dy: i32,
    dz: i32,
    dx: i32,
    dx_end: i32,
}

impl EllipsoidIterator {
    /// Creates an iterator over the ellipsoid.
    pub fn new(center: Point3<i32>, radius: Vector3<f64>, extent: Vector3<i32>) -> Self {
        let mut iter = Self {
            center,
            radius,
            extent,
            dy: -extent.y,
            dz: -extent.z,
            dx: 1,
            dx_end: 0,
        };
        iter.start_row();
        iter
    }

    /// Sum of the Y and Z terms, in the order `contains` adds them.
    pub(crate) fn row_prefix(dy: i32, dz: i32, radius: Vector3<f64>) -> f64 {
        axis_term(dy, radius.y) + axis_term(dz, radius.z)
    }

    fn start_row(&mut self) {
        let prefix = Self::row_prefix(self.dy, self.dz, self.radius);
        match half_span(prefix, self.radius.x, self.extent.x) {
            Some(h) => {
                self.dx = -h;
                self.dx_end = h;
            }
            None => {
                self.dx = 1;
                self.dx_end = 0;
            }
        }
    }
}

impl Iterator for EllipsoidIterator {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.dy <= self.extent.y {
            if self.dx <= self.dx_end {
                let position = Point3::new(
                    self.center.x + self.dx,
                    self.center.y + self.dy,
                    self.center.z + self.dz,
                );
                self.dx += 1;
                return Some(position);
            }

            self.dz += 1;
            if self.dz > self.extent.z {
                self.dz = -self.extent.z;
                self.dy += 1;
            }
            if self.dy <= self.extent.y {
                self.start_row();
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_span_matches_predicate() {
        for radius in [0.5, 1.5, 2.5, 3.2, 7.5] {
            let limit = radius as i32;
            for prefix in [0.0, 0.25, 0.5, 0.99, 1.0] {
                let Some(h) = half_span(prefix, radius, limit) else {
                    panic!("prefix {prefix} should leave room for h = 0");
                };
                assert!(within(prefix + axis_term(h, radius)));
                if h < limit {
                    assert!(
                        !within(prefix + axis_term(h + 1, radius)),
                        "span for r={radius} prefix={prefix} stopped early at {h}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_half_span_rejects_outside_rows() {
        assert_eq!(half_span(1.01, 4.5, 4), None);
        assert_eq!(half_span(0.0, 4.5, -1), None);
    }

    #[test]
    fn test_unit_ellipse_is_a_plus_sign() {
        let points: Vec<_> = EllipseFootprintIterator::new(
            Point2::new(0, 0),
            Vector2::new(1.5, 1.5),
            Vector2::new(1, 1),
        )
        .collect();

        assert_eq!(points.len(), 9, "(1/1.5)^2 * 2 < 1, so the corners are inside");

        let small: Vec<_> = EllipseFootprintIterator::new(
            Point2::new(0, 0),
            Vector2::new(1.2, 1.2),
            Vector2::new(1, 1),
        )
        .collect();
        assert_eq!(small.len(), 5);
    }

    #[test]
    fn test_ellipsoid_rows_are_symmetric() {
        let points: Vec<_> = EllipsoidIterator::new(
            Point3::new(10, 20, 30),
            Vector3::new(2.5, 1.5, 2.5),
            Vector3::new(2, 1, 2),
        )
        .collect();

        for p in &points {
            let mirrored = Point3::new(20 - p.x, 40 - p.y, 60 - p.z);
            assert!(points.contains(&mirrored), "{p:?} has no mirror image");
        }
        assert!(points.contains(&Point3::new(10, 20, 30)));
    }
}
