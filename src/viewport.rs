//! The live map view: Web Mercator transforms between geographic and container
//! pixel coordinates, plus a controller that mutates the view and notifies listeners.

use crate::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::mpsc;

/// Width and height of one map tile in pixels at integer zoom levels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Default view: central Prague.
pub const DEFAULT_CENTER: LatLng = LatLng::new(50.0755, 14.4378);
pub const DEFAULT_ZOOM: f64 = 13.0;

/// Read-only view of a map viewport, as consumed by the indicator projector.
pub trait MapProjection {
    /// Pixel size of the viewport, or `None` before it has been laid out.
    fn size(&self) -> Option<Point>;

    /// Geographic bounds of the visible area.
    fn visible_bounds(&self) -> LatLngBounds;

    /// Geographic center of the view.
    fn center(&self) -> LatLng;

    /// Projects a geographic coordinate to container pixels.
    fn project(&self, lat_lng: &LatLng) -> Point;
}

/// Center, zoom and pixel size of the map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    center: LatLng,
    zoom: f64,
    /// Not persisted; the size comes from the layout on every start.
    #[serde(skip)]
    size: Option<Point>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

impl Viewport {
    /// Creates a viewport that has not been laid out yet.
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center: normalize_center(center),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size: None,
        }
    }

    pub fn with_size(mut self, size: Point) -> Self {
        self.size = Some(size);
        self
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Size of the whole world in pixels at `zoom`.
    fn world_size(zoom: f64) -> f64 {
        TILE_SIZE * 2_f64.powf(zoom)
    }

    /// Projects to absolute world pixels at `zoom` (origin at the north-west corner of the world).
    pub fn project_world(lat_lng: &LatLng, zoom: f64) -> Point {
        let scale = Self::world_size(zoom);
        let lat = lat_lng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

        let x = (lat_lng.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;

        Point::new(x, y)
    }

    /// Inverse of [`Viewport::project_world`].
    pub fn unproject_world(point: Point, zoom: f64) -> LatLng {
        let scale = Self::world_size(zoom);
        let lng = point.x / scale * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * point.y / scale)).sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    /// Container pixel position of the view center.
    fn half_size(&self) -> Point {
        self.size.unwrap_or_default().scale(0.5)
    }

    /// Converts container pixels to a geographic coordinate.
    pub fn unproject(&self, point: Point) -> LatLng {
        let center_world = Self::project_world(&self.center, self.zoom);
        let world = center_world.add(point.subtract(self.half_size()));
        Self::unproject_world(world, self.zoom)
    }

    /// Ground resolution at the view center.
    pub fn meters_per_pixel(&self) -> f64 {
        let circumference = 2.0 * PI * crate::geo::EARTH_RADIUS_METERS;
        circumference * self.center.lat.to_radians().cos() / Self::world_size(self.zoom)
    }
}

impl MapProjection for Viewport {
    fn size(&self) -> Option<Point> {
        self.size
    }

    fn visible_bounds(&self) -> LatLngBounds {
        let size = self.size.unwrap_or_default();
        let north_west = self.unproject(Point::new(0.0, 0.0));
        let south_east = self.unproject(size);
        LatLngBounds::new(
            LatLng::new(south_east.lat, north_west.lng),
            LatLng::new(north_west.lat, south_east.lng),
        )
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn project(&self, lat_lng: &LatLng) -> Point {
        let center_world = Self::project_world(&self.center, self.zoom);
        Self::project_world(lat_lng, self.zoom)
            .subtract(center_world)
            .add(self.half_size())
    }
}

/// Clamps latitude to the Mercator limit and wraps longitude into [-180, 180).
fn normalize_center(center: LatLng) -> LatLng {
    LatLng::new(
        center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
        (center.lng + 180.0).rem_euclid(360.0) - 180.0,
    )
}

/// Notifications emitted by [`ViewportController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// The view was panned, zoomed or resized.
    Changed,
    /// The map was clicked at the given coordinate.
    Click(LatLng),
}

/// Owns the live [`Viewport`] and notifies subscribers about changes and clicks.
pub struct ViewportController {
    viewport: Viewport,
    subscribers: Vec<mpsc::Sender<ViewportEvent>>,
}

impl ViewportController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            subscribers: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns a receiver for all future events. Dropping it unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::Receiver<ViewportEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: ViewportEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    /// Replaces the view with `next`, emitting [`ViewportEvent::Changed`] if anything differs.
    fn update(&mut self, next: Viewport) -> bool {
        if next == self.viewport {
            return false;
        }
        log::trace!(
            "View changed: center {}, zoom {:.2}",
            next.center,
            next.zoom
        );
        self.viewport = next;
        self.emit(ViewportEvent::Changed);
        true
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> bool {
        let next = Viewport {
            size: self.viewport.size,
            ..Viewport::new(center, zoom)
        };
        self.update(next)
    }

    /// Moves the map content by `delta` pixels, as a drag gesture does.
    pub fn pan_by(&mut self, delta: Point) -> bool {
        if delta.x == 0.0 && delta.y == 0.0 {
            return false;
        }
        let zoom = self.viewport.zoom;
        let center_world = Viewport::project_world(&self.viewport.center, zoom);
        let center = Viewport::unproject_world(center_world.subtract(delta), zoom);
        self.set_view(center, zoom)
    }

    /// Changes the zoom while keeping the coordinate under `focus` (container pixels) in place.
    pub fn zoom_around(&mut self, zoom: f64, focus: Point) -> bool {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if self.viewport.size.is_none() {
            return self.set_view(self.viewport.center, zoom);
        }

        let focus_geo = self.viewport.unproject(focus);
        let focus_world = Viewport::project_world(&focus_geo, zoom);
        let center_world = focus_world.subtract(focus.subtract(self.viewport.half_size()));
        let center = Viewport::unproject_world(center_world, zoom);
        self.set_view(center, zoom)
    }

    pub fn resize(&mut self, size: Point) -> bool {
        let next = self.viewport.clone().with_size(size);
        self.update(next)
    }

    /// Centers on `bounds` at the largest integer zoom at which they fit
    /// inside the viewport shrunk by `padding` on every side.
    ///
    /// Does nothing until the viewport has a size.
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64) -> bool {
        let Some(size) = self.viewport.size else {
            return false;
        };
        let available = Point::new(size.x - 2.0 * padding, size.y - 2.0 * padding);

        let span_at = |zoom: f64| {
            let north_west = Viewport::project_world(&bounds.north_west(), zoom);
            let south_east = Viewport::project_world(&bounds.south_east(), zoom);
            south_east.subtract(north_west)
        };

        let mut zoom = MIN_ZOOM;
        while zoom < MAX_ZOOM {
            let span = span_at(zoom + 1.0);
            if span.x > available.x || span.y > available.y {
                break;
            }
            zoom += 1.0;
        }

        let north_west = Viewport::project_world(&bounds.north_west(), zoom);
        let south_east = Viewport::project_world(&bounds.south_east(), zoom);
        let center = Viewport::unproject_world(north_west.add(south_east).scale(0.5), zoom);

        log::debug!("Fitting bounds {bounds:?} at zoom {zoom}");
        self.set_view(center, zoom)
    }

    /// Reports a click at `point` (container pixels) to subscribers.
    pub fn click(&mut self, point: Point) {
        let lat_lng = self.viewport.unproject(point);
        self.emit(ViewportEvent::Click(lat_lng));
    }
}
