//! End-to-end picking sessions through the public selector API.

use cgmath::{Point2, Point3, Vector3};
use voxel_region::regions::{FlatRegion, RegionShape};
use voxel_region::selector::{
    Polygonal2DSelector, RegionSelection, RegionSelector, SelectorKind, SelectorLimits, ShapeEvent,
};
use voxel_region::world::{FixedHeight, WorldContext};
use voxel_region::RegionError;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pick(selector: &mut RegionSelector, primary: Point3<i32>, secondary: &[Point3<i32>]) {
    let limits = SelectorLimits::unlimited();
    selector.select_primary(primary, &limits).unwrap();
    for position in secondary {
        selector.select_secondary(*position, &limits).unwrap();
    }
}

#[test]
fn cuboid_session() {
    init_logger();
    let limits = SelectorLimits::unlimited();
    let mut selector = RegionSelector::new(SelectorKind::Cuboid, WorldContext::detached());

    assert!(selector.select_primary(Point3::new(0, 0, 0), &limits).unwrap());
    assert!(!selector.is_defined());
    assert!(matches!(selector.region(), Err(RegionError::IncompleteSelection)));

    assert!(selector.select_secondary(Point3::new(3, 3, 3), &limits).unwrap());
    assert!(selector.is_defined());
    assert_eq!(selector.area(), Some(64));
    assert!(!selector.select_secondary(Point3::new(3, 3, 3), &limits).unwrap());

    selector.clear();
    assert!(!selector.is_defined());
    assert!(selector.primary_position().is_err());
}

#[test]
fn every_family_reaches_a_defined_state() {
    init_logger();
    let sessions: [(SelectorKind, Point3<i32>, Vec<Point3<i32>>); 5] = [
        (SelectorKind::Cuboid, Point3::new(0, 5, 0), vec![Point3::new(2, 6, 2)]),
        (SelectorKind::Cylinder, Point3::new(0, 5, 0), vec![Point3::new(3, 8, 0)]),
        (SelectorKind::Ellipsoid, Point3::new(0, 50, 0), vec![Point3::new(2, 52, 3)]),
        (
            SelectorKind::Polygon2D,
            Point3::new(0, 5, 0),
            vec![Point3::new(6, 5, 0), Point3::new(0, 7, 6)],
        ),
        (
            SelectorKind::ConvexPolyhedron,
            Point3::new(0, 0, 0),
            vec![Point3::new(4, 0, 0), Point3::new(0, 4, 0), Point3::new(0, 0, 4)],
        ),
    ];

    for (kind, primary, secondary) in sessions {
        let mut selector = RegionSelector::new(kind, WorldContext::detached());
        pick(&mut selector, primary, &secondary);

        assert!(selector.is_defined(), "{kind:?}");
        let region = selector.to_region().unwrap();
        assert_eq!(selector.area(), Some(region.area()), "{kind:?}");
        assert!(region.contains(primary), "{kind:?} must contain its first pick");
        assert!(!selector.information_lines().is_empty(), "{kind:?}");
    }
}

#[test]
fn polygon_vertex_limit_leaves_the_region_untouched() {
    let limits = SelectorLimits::from_json(r#"{ "polygon_vertex_limit": 4 }"#).unwrap();
    let mut selector = RegionSelector::new(SelectorKind::Polygon2D, WorldContext::detached());
    selector.select_primary(Point3::new(0, 0, 0), &limits).unwrap();
    for position in [Point3::new(8, 0, 0), Point3::new(8, 0, 8), Point3::new(0, 0, 8)] {
        assert!(selector.select_secondary(position, &limits).unwrap());
    }

    let before = selector.to_region().unwrap();
    assert!(!selector.select_secondary(Point3::new(-4, 9, 4), &limits).unwrap());
    let after = selector.to_region().unwrap();

    assert_eq!(after.area(), before.area());
    assert_eq!(after.minimum_point(), before.minimum_point());
    assert_eq!(after.maximum_point(), before.maximum_point());
}

#[test]
fn conversions_keep_the_bounding_box() {
    init_logger();
    let mut cuboid = RegionSelector::new(SelectorKind::Cuboid, WorldContext::detached());
    pick(&mut cuboid, Point3::new(-4, 20, -4), &[Point3::new(4, 26, 4)]);
    let limits = SelectorLimits::unlimited();

    for kind in [
        SelectorKind::Cylinder,
        SelectorKind::Ellipsoid,
        SelectorKind::Polygon2D,
        SelectorKind::ConvexPolyhedron,
    ] {
        let converted = cuboid.convert(kind, &limits).unwrap();
        assert_eq!(converted.kind(), kind);
        assert!(converted.is_defined(), "{kind:?}");

        let region = converted.to_region().unwrap();
        let (min, max) = (region.minimum_point(), region.maximum_point());
        assert!(min.y >= 20 && max.y <= 26, "{kind:?} spans {min:?}..{max:?}");
        assert!(region.contains(Point3::new(0, 23, 0)), "{kind:?}");
        assert!(region.area() <= cuboid.area().unwrap(), "{kind:?}");
    }
}

#[test]
fn modify_region_resyncs_the_anchor() {
    let mut selector: RegionSelector = Polygonal2DSelector::with_points(
        WorldContext::detached(),
        vec![Point2::new(0, 0), Point2::new(4, 0), Point2::new(4, 4)],
        10,
        12,
    )
    .unwrap()
    .into();

    selector.modify_region(|region| region.shift(Vector3::new(-2, 5, 7)));
    assert_eq!(selector.primary_position().unwrap(), Point3::new(-2, 15, 7));

    let expanded = selector.modify_region(|region| region.expand(&[Vector3::new(0, 3, 0)]));
    assert_eq!(expanded, Ok(()));
    assert_eq!(selector.incomplete_region().maximum_point().y, 20);
}

#[test]
fn selections_follow_the_world_height() {
    let world = FixedHeight::new(0, 63).shared();
    let limits = SelectorLimits::unlimited();
    let mut selector = RegionSelector::new(SelectorKind::Polygon2D, WorldContext::attached(&world));

    selector.select_primary(Point3::new(0, 60, 0), &limits).unwrap();
    selector.select_secondary(Point3::new(5, 90, 0), &limits).unwrap();
    selector.select_secondary(Point3::new(0, 61, 5), &limits).unwrap();

    let RegionSelector::Polygon2D(polygon) = &selector else {
        panic!("expected a polygon selector");
    };
    assert_eq!(polygon.region().unwrap().maximum_y(), 63);

    drop(world);
    assert_eq!(
        selector.select_secondary(Point3::new(9, 60, 9), &limits),
        Err(RegionError::ReferenceLost("world"))
    );
}

#[test]
fn shape_events_serialize_as_tagged_json() {
    let mut selector = RegionSelector::new(SelectorKind::Cylinder, WorldContext::detached());
    pick(&mut selector, Point3::new(1, 4, 1), &[Point3::new(4, 6, 1)]);

    let mut events = Vec::new();
    selector.describe_selection(&mut events);
    assert!(matches!(
        events[0],
        ShapeEvent::Shape {
            type_id: "cylinder",
            protocol_version: 1
        }
    ));

    let json = serde_json::to_value(&events).unwrap();
    let tags: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["event"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(tags, ["shape", "cylinder", "min_max"]);
    assert_eq!(json[1]["center"], serde_json::json!([1, 4, 1]));
    assert_eq!(json[2], serde_json::json!({ "event": "min_max", "min": 4, "max": 6 }));
}

#[test]
fn selector_names_resolve_from_configuration_text() {
    for (name, kind) in [
        ("cuboid", SelectorKind::Cuboid),
        ("Cylinder", SelectorKind::Cylinder),
        ("sphere", SelectorKind::Ellipsoid),
        ("poly", SelectorKind::Polygon2D),
        ("convex", SelectorKind::ConvexPolyhedron),
    ] {
        assert_eq!(name.parse::<SelectorKind>(), Ok(kind));
    }
}
