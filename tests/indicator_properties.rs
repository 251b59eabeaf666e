use radar_map::geometry::{INSET_MARGIN, bearing_angle_degrees, boundary_intersection, format_distance};
use radar_map::{
    IndicatorProjector, LatLng, MapProjection, Marker, MarkerStore, Point, RecomputeScheduler,
    Viewport, ViewportController, ViewportEvent,
};

fn viewport(center: LatLng, zoom: f64, width: f64, height: f64) -> Viewport {
    Viewport::new(center, zoom).with_size(Point::new(width, height))
}

/// Markers on a ring around the center, plus a few inside the view.
fn ring_markers(center: LatLng) -> Vec<Marker> {
    let mut markers: Vec<Marker> = (0..24)
        .map(|i| {
            let angle = (i as f64 * 15.0 + 7.0).to_radians();
            let position = LatLng::new(
                center.lat + 0.3 * angle.sin(),
                center.lng + 0.5 * angle.cos(),
            );
            Marker::new(position, format!("ring {i}"))
        })
        .collect();
    markers.push(Marker::new(center, "center"));
    markers.push(Marker::new(
        LatLng::new(center.lat + 0.001, center.lng - 0.001),
        "near",
    ));
    markers
}

#[test]
fn indicators_stay_inside_inset_rectangle() {
    let center = LatLng::new(50.0755, 14.4378);
    for (zoom, width, height) in [(10.0, 800.0, 600.0), (12.5, 400.0, 300.0), (14.0, 1280.0, 720.0)] {
        let view = viewport(center, zoom, width, height);
        let out = IndicatorProjector::default().recompute(&view, &ring_markers(center));
        assert!(!out.is_empty());
        for indicator in &out {
            assert!(indicator.x >= INSET_MARGIN - 1e-9 && indicator.x <= width - INSET_MARGIN + 1e-9);
            assert!(indicator.y >= INSET_MARGIN - 1e-9 && indicator.y <= height - INSET_MARGIN + 1e-9);
        }
    }
}

#[test]
fn on_screen_markers_never_get_indicators() {
    let center = LatLng::new(50.0755, 14.4378);
    let view = viewport(center, 10.0, 800.0, 600.0);
    let markers = ring_markers(center);
    let bounds = view.visible_bounds();

    let out = IndicatorProjector::default().recompute(&view, &markers);

    for marker in markers.iter().filter(|m| bounds.contains(&m.position)) {
        assert!(out.iter().all(|indicator| indicator.id != marker.id), "{}", marker.label);
    }
    let center_id = markers.iter().find(|m| m.label == "center").unwrap().id;
    assert!(out.iter().all(|indicator| indicator.id != center_id));
}

#[test]
fn indicator_ids_are_unique_and_visible() {
    let center = LatLng::new(50.0755, 14.4378);
    let mut store = MarkerStore::new(ring_markers(center));
    let hidden = store.rows()[3].marker.id;
    store.toggle_visibility(hidden);

    let snapshot = store.visible_snapshot();
    let out = IndicatorProjector::default().recompute(&viewport(center, 11.0, 800.0, 600.0), &snapshot);

    let mut ids: Vec<_> = out.iter().map(|indicator| indicator.id).collect();
    assert!(!ids.contains(&hidden));
    assert!(ids.iter().all(|id| snapshot.iter().any(|m| m.id == *id)));
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn axis_aligned_marker_rotation_matches_atan2() {
    let center = LatLng::new(50.0, 14.0);
    let view = viewport(center, 12.0, 800.0, 600.0);
    let markers = [
        Marker::new(LatLng::new(50.0, 14.5), "east"),
        Marker::new(LatLng::new(50.0, 13.5), "west"),
        Marker::new(LatLng::new(50.3, 14.0), "north"),
        Marker::new(LatLng::new(49.7, 14.0), "south"),
    ];

    let out = IndicatorProjector::default().recompute(&view, &markers);
    assert_eq!(out.len(), 4);

    let center_px = view.project(&center);
    for (indicator, marker) in out.iter().zip(&markers) {
        let target = view.project(&marker.position);
        let expected = (target.y - center_px.y).atan2(target.x - center_px.x).to_degrees() + 90.0;
        assert!((indicator.rotation_degrees - expected).abs() < 1e-6, "{}", marker.label);
    }

    let rotations: Vec<_> = out.iter().map(|i| i.rotation_degrees).collect();
    assert!((rotations[0] - 90.0).abs() < 1e-6);
    assert!((rotations[1] - 270.0).abs() < 1e-6);
    assert!((rotations[2] - 0.0).abs() < 1e-6);
    assert!((rotations[3] - 180.0).abs() < 1e-6);
}

#[test]
fn recompute_is_idempotent() {
    let center = LatLng::new(50.0755, 14.4378);
    let view = viewport(center, 10.0, 800.0, 600.0);
    let markers = ring_markers(center);
    let projector = IndicatorProjector::default();

    assert_eq!(projector.recompute(&view, &markers), projector.recompute(&view, &markers));
}

#[test]
fn reordering_markers_only_reorders_output() {
    let center = LatLng::new(50.0755, 14.4378);
    let view = viewport(center, 10.0, 800.0, 600.0);
    let markers = ring_markers(center);
    let mut reversed = markers.clone();
    reversed.reverse();

    let projector = IndicatorProjector::default();
    let forward = projector.recompute(&view, &markers);
    let mut backward = projector.recompute(&view, &reversed);
    backward.reverse();

    assert_eq!(forward, backward);
}

#[test]
fn seed_markers_from_prague_view() {
    let store = MarkerStore::new(radar_map::assets::load_seed_markers().unwrap());
    let view = viewport(LatLng::new(50.0755, 14.4378), 13.0, 800.0, 600.0);

    let out = IndicatorProjector::default().recompute(&view, &store.visible_snapshot());

    // Praha is on screen; Brno and Ostrava are far to the south-east
    let labels: Vec<_> = out.iter().map(|i| i.marker_label.as_str()).collect();
    assert_eq!(labels, vec!["Brno", "Ostrava"]);
    assert!(out.iter().all(|i| i.distance_label.ends_with(" km")));
    assert!(out.iter().all(|i| i.rotation_degrees > 90.0 && i.rotation_degrees < 180.0));
}

#[test]
fn scheduler_follows_view_events() {
    let center = LatLng::new(50.0, 14.0);
    let mut controller = ViewportController::new(Viewport::new(center, 12.0));
    let events = controller.subscribe();
    let mut scheduler = RecomputeScheduler::default();
    let markers = vec![Marker::new(LatLng::new(50.0, 14.5), "east")];

    controller.resize(Point::new(800.0, 600.0));
    for _ in 0..5 {
        controller.pan_by(Point::new(-10.0, 0.0));
    }
    controller.click(Point::new(10.0, 10.0));

    let mut clicks = 0;
    for event in events.try_iter() {
        match event {
            ViewportEvent::Changed => scheduler.request(),
            ViewportEvent::Click(_) => clicks += 1,
        }
    }
    assert_eq!(clicks, 1);

    assert!(scheduler.flush(controller.viewport(), &markers));
    assert!(!scheduler.flush(controller.viewport(), &markers));
    assert_eq!(scheduler.indicators().len(), 1);
}

#[test]
fn reference_values() {
    assert_eq!(format_distance(949.0), "949 m");
    assert_eq!(format_distance(950.0), "1.0 km");
    assert_eq!(format_distance(1500.0), "1.5 km");

    let hit = boundary_intersection(
        Point::new(100.0, 100.0),
        Point::new(300.0, 100.0),
        Point::new(400.0, 300.0),
        50.0,
    )
    .unwrap();
    assert_eq!(hit, Point::new(350.0, 100.0));

    assert!((bearing_angle_degrees(Point::new(0.0, 0.0), Point::new(1.0, 0.0)) - 90.0).abs() < 1e-9);
}
