//! User markers and the store that owns them.

use crate::geo::LatLng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A labelled point on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Stable for the lifetime of the marker.
    pub id: Uuid,
    pub position: LatLng,
    pub label: String,
}

impl Marker {
    /// Creates a marker with a fresh random id.
    pub fn new(position: LatLng, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            label: label.into(),
        }
    }
}

/// A marker together with its visibility toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRow {
    pub marker: Marker,
    pub visible: bool,
}

/// Ordered list of markers. Order is insertion order and is preserved by every operation.
#[derive(Debug, Default)]
pub struct MarkerStore {
    rows: Vec<MarkerRow>,
}

impl MarkerStore {
    /// Creates a store where every seed marker is visible.
    pub fn new(seed: impl IntoIterator<Item = Marker>) -> Self {
        Self {
            rows: seed
                .into_iter()
                .map(|marker| MarkerRow {
                    marker,
                    visible: true,
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[MarkerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&MarkerRow> {
        self.rows.iter().find(|row| row.marker.id == id)
    }

    /// Appends a new visible marker and returns its id.
    pub fn add(&mut self, position: LatLng, label: impl Into<String>) -> Uuid {
        let marker = Marker::new(position, label);
        let id = marker.id;
        log::info!("Added marker {:?} at {}", marker.label, marker.position);
        self.rows.push(MarkerRow {
            marker,
            visible: true,
        });
        id
    }

    /// Removes the marker with `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.marker.id != id);
        let removed = self.rows.len() != before;
        if removed {
            log::info!("Removed marker {id}");
        }
        removed
    }

    /// Flips the visibility of the marker with `id`. Returns `false` if there was none.
    pub fn toggle_visibility(&mut self, id: Uuid) -> bool {
        match self.rows.iter_mut().find(|row| row.marker.id == id) {
            Some(row) => {
                row.visible = !row.visible;
                true
            }
            None => false,
        }
    }

    /// Makes every marker visible. Returns whether anything changed.
    pub fn show_all(&mut self) -> bool {
        self.set_all_visible(true)
    }

    /// Hides every marker. Returns whether anything changed.
    pub fn hide_all(&mut self) -> bool {
        self.set_all_visible(false)
    }

    fn set_all_visible(&mut self, visible: bool) -> bool {
        let mut changed = false;
        for row in &mut self.rows {
            changed |= row.visible != visible;
            row.visible = visible;
        }
        changed
    }

    /// `true` if the store is non-empty and every marker is visible.
    pub fn all_visible(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|row| row.visible)
    }

    /// `true` if the store is non-empty and every marker is hidden.
    pub fn all_hidden(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|row| !row.visible)
    }

    /// Visible markers in store order.
    pub fn visible_snapshot(&self) -> Vec<Marker> {
        self.rows
            .iter()
            .filter(|row| row.visible)
            .map(|row| row.marker.clone())
            .collect()
    }
}
