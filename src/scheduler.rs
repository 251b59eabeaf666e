//! Coalesces change notifications into at most one indicator recompute per frame.

use crate::indicators::{IndicatorDescriptor, IndicatorProjector};
use crate::markers::Marker;
use crate::viewport::MapProjection;

/// Dirty flag in front of an [`IndicatorProjector`].
///
/// Call [`request`](Self::request) whenever the view or the marker set
/// changes and [`flush`](Self::flush) once per frame with the current state.
#[derive(Debug, Default)]
pub struct RecomputeScheduler {
    projector: IndicatorProjector,
    pending: bool,
    indicators: Vec<IndicatorDescriptor>,
}

impl RecomputeScheduler {
    /// Marks the indicators as stale. Repeated requests before the next flush coalesce.
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Recomputes from `viewport` and `markers` if a request is pending.
    ///
    /// Returns `true` if the indicator list was replaced.
    pub fn flush(&mut self, viewport: &impl MapProjection, markers: &[Marker]) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.indicators = self.projector.recompute(viewport, markers);
        log::trace!("Recomputed {} indicators", self.indicators.len());
        true
    }

    /// The list produced by the most recent flush.
    pub fn indicators(&self) -> &[IndicatorDescriptor] {
        &self.indicators
    }
}
