//! # Shape Description
//!
//! Events that describe a selection to an outside observer, typically a client drawing the
//! selection outline. Selectors emit them through a [`ShapeDescriptionSink`]; what the sink
//! does with them is up to the caller.

use cgmath::{Point2, Point3, Vector2, Vector3};
use serde::Serialize;

/// One piece of selection geometry.
///
/// Serialized with an `event` tag, e.g. `{"event":"min_max","min":0,"max":10}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ShapeEvent {
    /// Announces the kind of selection the following events belong to.
    Shape {
        /// Selector type id, e.g. `"cuboid"`.
        type_id: &'static str,
        /// Version of the event layout for this selector type.
        protocol_version: u32,
    },
    /// A numbered 3D point.
    Point {
        /// Index of the point within the selection.
        id: usize,
        /// Block position.
        position: [i32; 3],
        /// Number of selected blocks, absent while the selection is incomplete.
        area: Option<u64>,
    },
    /// A numbered polygon vertex.
    Point2D {
        /// Index of the vertex.
        id: usize,
        /// Position as (x, z).
        position: [i32; 2],
        /// Number of selected blocks, absent while the selection is incomplete.
        area: Option<u64>,
    },
    /// Vertical span of an extruded selection.
    MinMax {
        /// Bottom layer.
        min: i32,
        /// Top layer.
        max: i32,
    },
    /// Center and radius of a cylinder.
    Cylinder {
        /// Center block.
        center: [i32; 3],
        /// Geometric radius along X and Z.
        radius: [f64; 2],
    },
    /// Center of an ellipsoid.
    EllipsoidCenter {
        /// Center block.
        center: [i32; 3],
    },
    /// Radius of an ellipsoid.
    EllipsoidRadius {
        /// Geometric radius along each axis.
        radius: [f64; 3],
    },
    /// A hull face, as indices into the previously emitted points.
    Polygon {
        /// Point ids of the face vertices in winding order.
        vertices: Vec<usize>,
    },
}

impl ShapeEvent {
    pub(crate) fn point(id: usize, position: Point3<i32>, area: Option<u64>) -> Self {
        ShapeEvent::Point {
            id,
            position: position.into(),
            area,
        }
    }

    pub(crate) fn point_2d(id: usize, position: Point2<i32>, area: Option<u64>) -> Self {
        ShapeEvent::Point2D {
            id,
            position: position.into(),
            area,
        }
    }

    pub(crate) fn cylinder(center: Point3<i32>, radius: Vector2<f64>) -> Self {
        ShapeEvent::Cylinder {
            center: center.into(),
            radius: radius.into(),
        }
    }

    pub(crate) fn ellipsoid_radius(radius: Vector3<f64>) -> Self {
        ShapeEvent::EllipsoidRadius {
            radius: radius.into(),
        }
    }
}

/// Receiver of [`ShapeEvent`]s.
pub trait ShapeDescriptionSink {
    /// Accepts the next event.
    fn dispatch(&mut self, event: ShapeEvent);
}

impl ShapeDescriptionSink for Vec<ShapeEvent> {
    fn dispatch(&mut self, event: ShapeEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_tagged() {
        let json = serde_json::to_value(ShapeEvent::MinMax { min: 2, max: 9 }).unwrap();
        assert_eq!(json, serde_json::json!({ "event": "min_max", "min": 2, "max": 9 }));

        let json = serde_json::to_value(ShapeEvent::point(3, Point3::new(1, -2, 3), None)).unwrap();
        assert_eq!(json["event"], "point");
        assert_eq!(json["position"], serde_json::json!([1, -2, 3]));
        assert!(json["area"].is_null());
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<ShapeEvent> = Vec::new();
        sink.dispatch(ShapeEvent::EllipsoidCenter { center: [0, 0, 0] });
        sink.dispatch(ShapeEvent::ellipsoid_radius(Vector3::new(1.0, 2.0, 3.0)));

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink[1],
            ShapeEvent::EllipsoidRadius {
                radius: [1.0, 2.0, 3.0]
            }
        );
    }
}
