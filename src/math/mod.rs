//! # Block Math
//!
//! Small extensions over `cgmath` for integer block coordinates.
//!
//! Positions are `Point3<i32>`, deltas are `Vector3<i32>`. Horizontal (footprint) positions
//! are `Point2<i32>` where the second component is the world **Z** axis, so `p.y` on a
//! `Point2` always means Z.

use cgmath::{Point2, Point3, Vector2, Vector3};

/// Helpers on 3D block positions.
pub trait BlockPoint3Ext: Sized {
    /// Component-wise minimum.
    fn min_components(self, other: Self) -> Self;
    /// Component-wise maximum.
    fn max_components(self, other: Self) -> Self;
    /// Copy with the X component replaced.
    fn with_x(self, x: i32) -> Self;
    /// Copy with the Y component replaced.
    fn with_y(self, y: i32) -> Self;
    /// Copy with the Z component replaced.
    fn with_z(self, z: i32) -> Self;
    /// Horizontal projection onto (x, z).
    fn xz(self) -> Point2<i32>;
    /// Copy with Y clamped to `[min_y, max_y]`.
    fn clamp_y(self, min_y: i32, max_y: i32) -> Self;
    /// Inclusive box test.
    fn contained_within(self, min: Self, max: Self) -> bool;
    /// Lossless conversion to a real-valued point.
    fn to_f64(self) -> Point3<f64>;
}

impl BlockPoint3Ext for Point3<i32> {
    fn min_components(self, other: Self) -> Self {
        Point3::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    fn max_components(self, other: Self) -> Self {
        Point3::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    fn with_x(self, x: i32) -> Self {
        Point3::new(x, self.y, self.z)
    }

    fn with_y(self, y: i32) -> Self {
        Point3::new(self.x, y, self.z)
    }

    fn with_z(self, z: i32) -> Self {
        Point3::new(self.x, self.y, z)
    }

    fn xz(self) -> Point2<i32> {
        Point2::new(self.x, self.z)
    }

    fn clamp_y(self, min_y: i32, max_y: i32) -> Self {
        self.with_y(num_traits::clamp(self.y, min_y, max_y))
    }

    fn contained_within(self, min: Self, max: Self) -> bool {
        self.x >= min.x
            && self.x <= max.x
            && self.y >= min.y
            && self.y <= max.y
            && self.z >= min.z
            && self.z <= max.z
    }

    fn to_f64(self) -> Point3<f64> {
        Point3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

/// Helpers on horizontal (x, z) block positions.
pub trait BlockPoint2Ext: Sized {
    /// Component-wise minimum.
    fn min_components(self, other: Self) -> Self;
    /// Component-wise maximum.
    fn max_components(self, other: Self) -> Self;
    /// Lifts the footprint position to a 3D position at height `y`.
    fn at_y(self, y: i32) -> Point3<i32>;
    /// Lossless conversion to a real-valued point.
    fn to_f64(self) -> Point2<f64>;
}

impl BlockPoint2Ext for Point2<i32> {
    fn min_components(self, other: Self) -> Self {
        Point2::new(self.x.min(other.x), self.y.min(other.y))
    }

    fn max_components(self, other: Self) -> Self {
        Point2::new(self.x.max(other.x), self.y.max(other.y))
    }

    fn at_y(self, y: i32) -> Point3<i32> {
        Point3::new(self.x, y, self.y)
    }

    fn to_f64(self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }
}

/// Component-wise absolute value.
pub fn abs2(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(v.x.abs(), v.y.abs())
}

/// Component-wise absolute value.
pub fn abs3(v: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x.abs(), v.y.abs(), v.z.abs())
}

/// Component-wise maximum.
pub fn max2(a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(a.x.max(b.x), a.y.max(b.y))
}

/// Component-wise maximum.
pub fn max3(a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

/// Sum of several integer deltas.
pub fn sum_deltas(changes: &[Vector3<i32>]) -> Vector3<i32> {
    changes
        .iter()
        .fold(Vector3::new(0, 0, 0), |total, change| total + *change)
}

/// Sum of the component-wise magnitudes of several integer deltas.
pub fn sum_magnitudes(changes: &[Vector3<i32>]) -> Vector3<i32> {
    changes.iter().fold(Vector3::new(0, 0, 0), |total, change| {
        total + Vector3::new(change.x.abs(), change.y.abs(), change.z.abs())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_and_max_are_component_wise() {
        let a = Point3::new(1, 8, -3);
        let b = Point3::new(4, 2, -9);

        assert_eq!(a.min_components(b), Point3::new(1, 2, -9));
        assert_eq!(a.max_components(b), Point3::new(4, 8, -3));
    }

    #[test]
    fn footprint_round_trip_keeps_z() {
        let p = Point3::new(3, 70, -12);
        assert_eq!(p.xz(), Point2::new(3, -12));
        assert_eq!(p.xz().at_y(5), Point3::new(3, 5, -12));
    }

    #[test]
    fn clamp_only_touches_y() {
        let p = Point3::new(-5, 300, 5);
        assert_eq!(p.clamp_y(0, 255), Point3::new(-5, 255, 5));
        assert_eq!(p.with_y(-1).clamp_y(0, 255), Point3::new(-5, 0, 5));
    }

    #[test]
    fn delta_sums() {
        let changes = [Vector3::new(2, -4, 0), Vector3::new(-6, 0, 1)];
        assert_eq!(sum_deltas(&changes), Vector3::new(-4, -4, 1));
        assert_eq!(sum_magnitudes(&changes), Vector3::new(8, 4, 1));
    }
}
