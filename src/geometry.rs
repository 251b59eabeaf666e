//! Pure geometry for placing off-screen indicators on the viewport edge.

use crate::geo::Point;

/// Distance in pixels between the viewport edge and the rectangle indicators are clamped to.
pub const INSET_MARGIN: f64 = 50.0;

/// Distances at or above this many meters are shown in kilometers.
///
/// Kept below 1000 so that 950..1000 m reads "1.0 km" instead of flickering
/// between "999 m" and "1.0 km" while panning.
pub const KM_THRESHOLD_METERS: f64 = 950.0;

/// Returns `true` if `point` lies inside the `size.x` x `size.y` viewport (edges inclusive).
pub fn is_inside_viewport(point: Point, size: Point) -> bool {
    point.x >= 0.0 && point.x <= size.x && point.y >= 0.0 && point.y <= size.y
}

/// Finds where the ray from `center` towards `target` leaves the viewport shrunk by `margin`.
///
/// Edges are tested in the order left, right, top, bottom. A crossing counts
/// when it lies ahead of `center` and within the span of its edge. The
/// crossing with the smallest ray parameter wins; on equal parameters the
/// edge tested first wins.
///
/// Returns `None` when `target == center` or when no edge is crossed.
pub fn boundary_intersection(
    center: Point,
    target: Point,
    viewport_size: Point,
    margin: f64,
) -> Option<Point> {
    let left = margin;
    let right = viewport_size.x - margin;
    let top = margin;
    let bottom = viewport_size.y - margin;

    let delta_x = target.x - center.x;
    let delta_y = target.y - center.y;

    let mut best: Option<(f64, Point)> = None;
    let mut consider = |t: f64, point: Point| {
        if best.is_none_or(|(best_t, _)| t < best_t) {
            best = Some((t, point));
        }
    };

    if delta_x != 0.0 {
        for edge_x in [left, right] {
            let t = (edge_x - center.x) / delta_x;
            let y = center.y + t * delta_y;
            if t > 0.0 && y >= top && y <= bottom {
                consider(t, Point::new(edge_x, y));
            }
        }
    }

    if delta_y != 0.0 {
        for edge_y in [top, bottom] {
            let t = (edge_y - center.y) / delta_y;
            let x = center.x + t * delta_x;
            if t > 0.0 && x >= left && x <= right {
                consider(t, Point::new(x, edge_y));
            }
        }
    }

    best.map(|(_, point)| point)
}

/// Rotation in degrees for an arrow glyph that points up by default so that
/// it points from `center` towards `target`.
///
/// Not normalized; callers use it as a periodic rotation.
pub fn bearing_angle_degrees(center: Point, target: Point) -> f64 {
    (target.y - center.y).atan2(target.x - center.x).to_degrees() + 90.0
}

/// Formats a distance as `"949 m"` or `"1.5 km"`.
pub fn format_distance(meters: f64) -> String {
    if meters < KM_THRESHOLD_METERS {
        format!("{} m", meters.round())
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
