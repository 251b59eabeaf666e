//! Computes edge-pinned arrows for markers that are outside the visible map area.

use crate::geometry::{INSET_MARGIN, bearing_angle_degrees, boundary_intersection, format_distance};
use crate::markers::Marker;
use crate::viewport::MapProjection;
use serde::Serialize;
use uuid::Uuid;

/// Where and how to draw the arrow for one off-screen marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorDescriptor {
    /// Id of the marker this indicator points at.
    pub id: Uuid,
    /// Container pixel position on the inset boundary.
    pub x: f64,
    pub y: f64,
    /// Rotation for an arrow glyph that points up by default.
    pub rotation_degrees: f64,
    /// Distance from the view center, e.g. `"2.0 km"`.
    pub distance_label: String,
    pub marker_label: String,
}

/// Projects markers onto the viewport boundary.
///
/// Stateless between calls: the output depends only on the arguments of
/// [`IndicatorProjector::recompute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorProjector {
    margin: f64,
}

impl Default for IndicatorProjector {
    fn default() -> Self {
        Self {
            margin: INSET_MARGIN,
        }
    }
}

impl IndicatorProjector {
    pub fn with_margin(margin: f64) -> Self {
        Self { margin }
    }

    /// Builds the indicator list for `markers`, in marker order.
    ///
    /// Markers inside the visible bounds, markers whose position is not
    /// finite, and markers whose direction does not cross the inset boundary
    /// produce no indicator.
    pub fn recompute(
        &self,
        viewport: &impl MapProjection,
        markers: &[Marker],
    ) -> Vec<IndicatorDescriptor> {
        let Some(size) = viewport.size() else {
            return Vec::new();
        };
        // NaN sizes fail these comparisons too
        if markers.is_empty() || !(size.x > 0.0 && size.y > 0.0) {
            return Vec::new();
        }
        if !(size.x > 2.0 * self.margin && size.y > 2.0 * self.margin) {
            log::debug!(
                "Viewport {}x{} leaves no room inside a {} px margin",
                size.x,
                size.y,
                self.margin
            );
            return Vec::new();
        }

        let bounds = viewport.visible_bounds();
        let center_geo = viewport.center();
        let center = viewport.project(&center_geo);

        let mut indicators = Vec::new();
        for marker in markers {
            if !marker.position.is_finite() {
                log::warn!(
                    "Skipping marker {} ({:?}) with invalid position {:?}",
                    marker.id,
                    marker.label,
                    marker.position
                );
                continue;
            }
            if bounds.contains(&marker.position) {
                continue;
            }

            let target = viewport.project(&marker.position);
            let Some(edge) = boundary_intersection(center, target, size, self.margin) else {
                log::debug!("No boundary crossing for marker {}", marker.id);
                continue;
            };

            indicators.push(IndicatorDescriptor {
                id: marker.id,
                x: edge.x,
                y: edge.y,
                rotation_degrees: bearing_angle_degrees(center, target),
                distance_label: format_distance(center_geo.distance_to(&marker.position)),
                marker_label: marker.label.clone(),
            });
        }

        indicators
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{EARTH_RADIUS_METERS, LatLng, LatLngBounds, Point};
    use crate::viewport::Viewport;

    /// Flat projection where one degree is one pixel and north is up.
    struct FlatView {
        size: Option<Point>,
        center: LatLng,
    }

    impl MapProjection for FlatView {
        fn size(&self) -> Option<Point> {
            self.size
        }

        fn visible_bounds(&self) -> LatLngBounds {
            let size = self.size.unwrap_or_default();
            LatLngBounds::new(
                LatLng::new(self.center.lat - size.y / 2.0, self.center.lng - size.x / 2.0),
                LatLng::new(self.center.lat + size.y / 2.0, self.center.lng + size.x / 2.0),
            )
        }

        fn center(&self) -> LatLng {
            self.center
        }

        fn project(&self, lat_lng: &LatLng) -> Point {
            let size = self.size.unwrap_or_default();
            Point::new(
                lat_lng.lng - self.center.lng + size.x / 2.0,
                self.center.lat - lat_lng.lat + size.y / 2.0,
            )
        }
    }

    fn flat(width: f64, height: f64) -> FlatView {
        FlatView {
            size: Some(Point::new(width, height)),
            center: LatLng::new(0.0, 0.0),
        }
    }

    fn marker(lat: f64, lng: f64, label: &str) -> Marker {
        Marker::new(LatLng::new(lat, lng), label)
    }

    #[test]
    fn test_uninitialized_viewport_yields_nothing() {
        let view = FlatView {
            size: None,
            center: LatLng::new(0.0, 0.0),
        };
        let markers = [marker(0.0, 500.0, "far")];
        assert!(IndicatorProjector::default().recompute(&view, &markers).is_empty());
    }

    #[test]
    fn test_degenerate_viewport_sizes_yield_nothing() {
        let markers = [marker(50.0, 15.0, "one degree east")];
        for (width, height) in [
            (0.0, 0.0),
            (-5.0, 300.0),
            (80.0, 80.0),
            (100.0, 101.0),
            (f64::NAN, 300.0),
        ] {
            let viewport =
                Viewport::new(LatLng::new(50.0, 14.0), 12.0).with_size(Point::new(width, height));
            let out = IndicatorProjector::default().recompute(&viewport, &markers);
            assert!(out.is_empty(), "{width}x{height}");
        }
    }

    #[test]
    fn test_small_viewport_with_small_margin_still_works() {
        let markers = [marker(50.0, 15.0, "one degree east")];
        let viewport =
            Viewport::new(LatLng::new(50.0, 14.0), 12.0).with_size(Point::new(80.0, 80.0));
        let out = IndicatorProjector::with_margin(10.0).recompute(&viewport, &markers);

        assert_eq!(out.len(), 1);
        assert!((out[0].x - 70.0).abs() < 1e-6);
        assert!(out[0].y >= 10.0 && out[0].y <= 70.0);
    }

    #[test]
    fn test_empty_markers_yield_nothing() {
        assert!(IndicatorProjector::default().recompute(&flat(400.0, 300.0), &[]).is_empty());
    }

    #[test]
    fn test_on_screen_marker_is_skipped() {
        let markers = [marker(10.0, 10.0, "near")];
        assert!(
            IndicatorProjector::default()
                .recompute(&flat(400.0, 300.0), &markers)
                .is_empty()
        );
    }

    #[test]
    fn test_off_screen_marker_to_the_right() {
        let markers = [marker(0.0, 500.0, "east")];
        let out = IndicatorProjector::default().recompute(&flat(400.0, 300.0), &markers);

        assert_eq!(out.len(), 1);
        let indicator = &out[0];
        assert_eq!(indicator.id, markers[0].id);
        assert!((indicator.x - 350.0).abs() < 1e-9);
        assert!((indicator.y - 150.0).abs() < 1e-9);
        assert!((indicator.rotation_degrees - 90.0).abs() < 1e-6);
        assert_eq!(indicator.marker_label, "east");
    }

    #[test]
    fn test_non_finite_marker_does_not_blank_overlay() {
        let markers = [
            marker(f64::NAN, 500.0, "broken"),
            marker(0.0, f64::INFINITY, "also broken"),
            marker(-400.0, 0.0, "south"),
        ];
        let out = IndicatorProjector::default().recompute(&flat(400.0, 300.0), &markers);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].marker_label, "south");
        assert!((out[0].y - 250.0).abs() < 1e-9);
        assert!((out[0].rotation_degrees - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_custom_margin() {
        let markers = [marker(0.0, -500.0, "west")];
        let out = IndicatorProjector::with_margin(10.0).recompute(&flat(400.0, 300.0), &markers);
        assert!((out[0].x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_km_east_of_prague_area() {
        let center = LatLng::new(50.0, 14.0);
        let viewport = Viewport::new(center, 15.0).with_size(Point::new(400.0, 300.0));
        let dlng = (2000.0 / (EARTH_RADIUS_METERS * 50f64.to_radians().cos())).to_degrees();
        let markers = [marker(50.0, 14.0 + dlng, "two km east")];

        let out = IndicatorProjector::default().recompute(&viewport, &markers);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].distance_label, "2.0 km");
        assert!((out[0].rotation_degrees - 90.0).abs() < 1e-6);
        assert!((out[0].x - 350.0).abs() < 1e-6);
        assert!((out[0].y - 150.0).abs() < 1e-6);
    }
}
