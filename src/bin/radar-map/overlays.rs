//! Overlay visibility settings and drawing functions for the map panel.

use crate::colors;
use crate::constants::{
    ARROW_SIZE, GRATICULE_SPACING, INDICATOR_LABEL_OFFSET, SCALE_BAR_MIN_WIDTH, SCALE_BAR_OFFSET,
};
use eframe::egui;
use radar_map::assets::{AssetLoadError, DIRECTION_ARROW, load_direction_arrow};
use radar_map::geometry::{format_distance, is_inside_viewport};
use radar_map::{IndicatorDescriptor, LatLng, MapProjection, Marker, Point, Viewport};
use std::borrow::Cow;

/// Controls visibility of the optional overlay types on the map.
#[derive(Clone, Copy)]
pub struct OverlayVisibility {
    pub graticule: bool,
    pub marker_labels: bool,
    pub indicators: bool,
    pub scale_bar: bool,
}

impl Default for OverlayVisibility {
    fn default() -> Self {
        Self {
            graticule: true,
            marker_labels: true,
            indicators: true,
            scale_bar: true,
        }
    }
}

/// Converts a container point of the map to a screen position.
fn to_screen(map_rect: egui::Rect, point: Point) -> egui::Pos2 {
    map_rect.min + egui::vec2(point.x as f32, point.y as f32)
}

/// Picks a 1/2/5 x 10^n step no smaller than `raw`.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10_f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude)
}

/// Wraps the embedded arrow SVG so the egui_extras loader can render it.
pub fn arrow_image_source() -> Result<egui::ImageSource<'static>, AssetLoadError> {
    let bytes = match load_direction_arrow()? {
        Cow::Borrowed(data) => egui::load::Bytes::Static(data),
        Cow::Owned(data) => egui::load::Bytes::Shared(data.into()),
    };
    Ok(egui::ImageSource::Bytes {
        uri: format!("bytes://{DIRECTION_ARROW}").into(),
        bytes,
    })
}

/// Picks a round ground length for the scale bar and returns it with its width in pixels.
fn scale_bar_length(meters_per_pixel: f64, min_width: f64) -> Option<(f64, f64)> {
    if !(meters_per_pixel.is_finite() && meters_per_pixel > 0.0) {
        return None;
    }
    let meters = nice_step(meters_per_pixel * min_width);
    Some((meters, meters / meters_per_pixel))
}

/// Draws a metric scale bar in the bottom-left corner of the map.
pub fn draw_scale_bar(ui: &mut egui::Ui, map_rect: egui::Rect, viewport: &Viewport) {
    let Some((meters, width)) = scale_bar_length(viewport.meters_per_pixel(), SCALE_BAR_MIN_WIDTH)
    else {
        return;
    };
    let painter = ui.painter();

    let bottom_left = map_rect.left_bottom() + SCALE_BAR_OFFSET;
    let rect = egui::Rect::from_min_max(
        bottom_left - egui::vec2(0.0, 18.0),
        bottom_left + egui::vec2(width as f32, 0.0),
    );
    painter.rect_filled(rect, 0.0, colors::LABEL_BACKGROUND);

    let stroke = egui::Stroke::new(2.0, colors::SCALE_BAR_LINE);
    painter.line_segment([rect.left_top(), rect.left_bottom()], stroke);
    painter.line_segment([rect.left_bottom(), rect.right_bottom()], stroke);
    painter.line_segment([rect.right_top(), rect.right_bottom()], stroke);

    painter.text(
        rect.left_center() + egui::vec2(5.0, 0.0),
        egui::Align2::LEFT_CENTER,
        format_distance(meters),
        egui::FontId::proportional(11.0),
        colors::LABEL_TEXT,
    );
}

/// Draws the background and a latitude/longitude grid in place of map imagery.
pub fn draw_graticule(ui: &mut egui::Ui, map_rect: egui::Rect, viewport: &Viewport) {
    let painter = ui.painter();
    painter.rect_filled(map_rect, 0.0, colors::MAP_BACKGROUND);

    let Some(size) = viewport.size() else {
        return;
    };
    let bounds = viewport.visible_bounds();
    let center = viewport.center();

    let lng_span = bounds.north_east.lng - bounds.south_west.lng;
    let lat_span = bounds.north_east.lat - bounds.south_west.lat;
    if !(lng_span > 0.0 && lat_span > 0.0) {
        return;
    }

    let stroke = egui::Stroke::new(1.0, colors::GRATICULE_LINE);
    let font_id = egui::FontId::monospace(10.0);

    let lng_step = nice_step(lng_span * GRATICULE_SPACING / size.x);
    let decimals = (-lng_step.log10()).ceil().max(0.0) as usize;
    let mut lng = (bounds.south_west.lng / lng_step).ceil() * lng_step;
    while lng <= bounds.north_east.lng {
        let x = to_screen(map_rect, viewport.project(&LatLng::new(center.lat, lng))).x;
        painter.vline(x, map_rect.y_range(), stroke);
        painter.text(
            egui::pos2(x + 3.0, map_rect.bottom() - 3.0),
            egui::Align2::LEFT_BOTTOM,
            format!("{lng:.decimals$}°"),
            font_id.clone(),
            colors::GRATICULE_TEXT,
        );
        lng += lng_step;
    }

    let lat_step = nice_step(lat_span * GRATICULE_SPACING / size.y);
    let decimals = (-lat_step.log10()).ceil().max(0.0) as usize;
    let mut lat = (bounds.south_west.lat / lat_step).ceil() * lat_step;
    while lat <= bounds.north_east.lat {
        let y = to_screen(map_rect, viewport.project(&LatLng::new(lat, center.lng))).y;
        painter.hline(map_rect.x_range(), y, stroke);
        painter.text(
            egui::pos2(map_rect.left() + 3.0, y - 2.0),
            egui::Align2::LEFT_BOTTOM,
            format!("{lat:.decimals$}°"),
            font_id.clone(),
            colors::GRATICULE_TEXT,
        );
        lat += lat_step;
    }
}

/// Draws pins for the visible markers that fall inside the map panel.
pub fn draw_markers(
    ui: &mut egui::Ui,
    map_rect: egui::Rect,
    viewport: &Viewport,
    markers: &[Marker],
    show_labels: bool,
) {
    let Some(size) = viewport.size() else {
        return;
    };
    let painter = ui.painter();

    for marker in markers {
        let point = viewport.project(&marker.position);
        if !is_inside_viewport(point, size) {
            continue;
        }
        let pos = to_screen(map_rect, point);

        painter.circle(
            pos,
            7.0,
            colors::MARKER_FILL,
            egui::Stroke::new(2.0, colors::MARKER_STROKE),
        );

        if show_labels && !marker.label.is_empty() {
            let font_id = egui::FontId::proportional(13.0);
            let text_pos = pos + egui::vec2(0.0, -11.0);

            // Shadow
            painter.text(
                text_pos + egui::vec2(1.0, 1.0),
                egui::Align2::CENTER_BOTTOM,
                &marker.label,
                font_id.clone(),
                colors::LABEL_SHADOW,
            );
            painter.text(
                text_pos,
                egui::Align2::CENTER_BOTTOM,
                &marker.label,
                font_id,
                colors::LABEL_TEXT,
            );
        }
    }
}

/// Draws a rounded text chip centered on `center` and returns its rectangle.
fn draw_chip(
    painter: &egui::Painter,
    center: egui::Pos2,
    text: &str,
    font_id: egui::FontId,
    text_color: egui::Color32,
    fill: egui::Color32,
) -> egui::Rect {
    let galley = painter.layout_no_wrap(text.to_owned(), font_id, text_color);
    let text_size = galley.size();
    let rect = egui::Rect::from_center_size(center, text_size + egui::vec2(16.0, 6.0));

    painter.rect_filled(
        rect.translate(egui::vec2(0.0, 1.0)),
        rect.height() / 2.0,
        colors::LABEL_SHADOW,
    );
    painter.rect_filled(rect, rect.height() / 2.0, fill);
    painter.galley(rect.center() - text_size / 2.0, galley, text_color);
    rect
}

/// Draws one arrow per indicator, with its distance and marker label kept upright.
pub fn draw_indicators(
    ui: &mut egui::Ui,
    map_rect: egui::Rect,
    indicators: &[IndicatorDescriptor],
    arrow: Option<&egui::ImageSource<'static>>,
) {
    let painter = ui.painter();

    for indicator in indicators {
        let pos = to_screen(map_rect, Point::new(indicator.x, indicator.y));
        let angle = indicator.rotation_degrees.to_radians() as f32;

        if let Some(arrow) = arrow {
            egui::Image::new(arrow.clone())
                .rotate(angle, egui::Vec2::splat(0.5))
                .paint_at(ui, egui::Rect::from_center_size(pos, egui::Vec2::splat(ARROW_SIZE)));
        }

        // Labels sit behind the arrow tail, towards the view center
        let (sin, cos) = angle.sin_cos();
        let anchor = pos + egui::vec2(-sin, cos) * INDICATOR_LABEL_OFFSET;

        let chip = draw_chip(
            painter,
            anchor,
            &indicator.distance_label,
            egui::FontId::proportional(12.0),
            colors::DISTANCE_CHIP_TEXT,
            colors::DISTANCE_CHIP_FILL,
        );

        if !indicator.marker_label.is_empty() {
            let label_center = egui::pos2(anchor.x, chip.bottom() + 12.0);
            draw_chip(
                painter,
                label_center,
                &indicator.marker_label,
                egui::FontId::proportional(11.0),
                colors::LABEL_TEXT,
                colors::LABEL_BACKGROUND,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(0.7), 1.0);
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(1.3), 2.0);
        assert_eq!(nice_step(30.0), 50.0);
        assert!((nice_step(0.0031) - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_scale_bar_length() {
        assert_eq!(scale_bar_length(1.0, 60.0), Some((100.0, 100.0)));
        assert_eq!(scale_bar_length(10.0, 60.0), Some((1000.0, 100.0)));

        let (meters, width) = scale_bar_length(3.0, 60.0).unwrap();
        assert_eq!(meters, 200.0);
        assert!((width - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_bar_width_stays_near_minimum() {
        for mpp in [0.3, 1.7, 4.9, 12.0, 77.0, 1234.5] {
            let (_, width) = scale_bar_length(mpp, 60.0).unwrap();
            assert!((60.0..=150.0 + 1e-9).contains(&width), "{mpp}: {width}");
        }
    }

    #[test]
    fn test_scale_bar_needs_positive_resolution() {
        assert_eq!(scale_bar_length(0.0, 60.0), None);
        assert_eq!(scale_bar_length(f64::NAN, 60.0), None);
    }

    #[test]
    fn test_arrow_image_source_is_svg() {
        let source = arrow_image_source().unwrap();
        let egui::ImageSource::Bytes { uri, .. } = source else {
            panic!("expected embedded bytes");
        };
        assert!(uri.ends_with(".svg"));
    }
}
