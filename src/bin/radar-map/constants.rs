use eframe::egui;

/// Width of the sidebar panel in pixels.
pub const SIDEBAR_WIDTH: f32 = 320.0;

/// Zoom levels added or removed per keyboard press.
pub const KEY_ZOOM_STEP: f64 = 1.0;

/// Zoom levels added or removed per scroll wheel event.
pub const SCROLL_ZOOM_STEP: f64 = 0.25;

/// Padding in pixels kept around markers when fitting the view to them.
pub const FIT_PADDING: f64 = 24.0;

/// Approximate spacing of graticule lines in pixels.
pub const GRATICULE_SPACING: f64 = 120.0;

/// Distance between an indicator arrow and its labels, along the arrow.
pub const INDICATOR_LABEL_OFFSET: f32 = 40.0;

/// Side length of the indicator arrow glyph.
pub const ARROW_SIZE: f32 = 34.0;

/// Storage key for the last map view.
pub const VIEW_STORAGE_KEY: &str = "radar_map_view";

/// Shortest scale bar in pixels; the bar grows to the next round length.
pub const SCALE_BAR_MIN_WIDTH: f64 = 60.0;

/// Offset of the scale bar's bottom-left corner from the map's bottom-left corner.
pub const SCALE_BAR_OFFSET: egui::Vec2 = egui::vec2(10.0, -24.0);

/// Side length of the on-map zoom buttons.
pub const ZOOM_BUTTON_SIZE: f32 = 28.0;
