//! Color constants for the map, markers and indicators.

use eframe::egui::Color32;

// Base map
pub const MAP_BACKGROUND: Color32 = Color32::from_rgb(232, 236, 228);
pub const GRATICULE_LINE: Color32 = Color32::from_rgba_premultiplied(90, 100, 110, 60);
pub const GRATICULE_TEXT: Color32 = Color32::from_rgb(110, 118, 126);

// Marker pins
pub const MARKER_FILL: Color32 = Color32::from_rgb(220, 38, 38);
pub const MARKER_STROKE: Color32 = Color32::from_rgb(127, 29, 29);

// Indicators
pub const DISTANCE_CHIP_FILL: Color32 = Color32::from_rgb(37, 99, 235);
pub const DISTANCE_CHIP_TEXT: Color32 = Color32::WHITE;
pub const LABEL_BACKGROUND: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 235);
pub const LABEL_TEXT: Color32 = Color32::from_rgb(30, 30, 30);
pub const LABEL_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 70);

// Scale bar
pub const SCALE_BAR_LINE: Color32 = Color32::from_rgb(60, 60, 60);

// Form
pub const FORM_ERROR: Color32 = Color32::from_rgb(220, 38, 38);
