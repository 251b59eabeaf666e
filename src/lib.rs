//! Map markers with edge-pinned direction indicators for markers outside the view.
//!
//! The [`indicators::IndicatorProjector`] turns a [`viewport::MapProjection`]
//! and a snapshot of visible [`markers::Marker`]s into a list of
//! [`indicators::IndicatorDescriptor`]s; [`scheduler::RecomputeScheduler`]
//! limits that work to one pass per frame.

pub mod assets;
pub mod geo;
pub mod geometry;
pub mod indicators;
pub mod markers;
pub mod scheduler;
pub mod validation;
pub mod viewport;

pub use geo::{LatLng, LatLngBounds, Point};
pub use indicators::{IndicatorDescriptor, IndicatorProjector};
pub use markers::{Marker, MarkerRow, MarkerStore};
pub use scheduler::RecomputeScheduler;
pub use viewport::{MapProjection, Viewport, ViewportController, ViewportEvent};
