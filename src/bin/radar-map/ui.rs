//! UI rendering methods for the Radar Map application.

use crate::RadarMapApp;
use crate::colors;
use crate::constants::{KEY_ZOOM_STEP, SCROLL_ZOOM_STEP, SIDEBAR_WIDTH, ZOOM_BUTTON_SIZE};
use crate::overlays::{draw_graticule, draw_indicators, draw_markers, draw_scale_bar};
use eframe::egui;
use radar_map::validation::FormField;
use radar_map::{MapProjection, Point};
use uuid::Uuid;

/// A change requested from a marker list row.
enum RowAction {
    Toggle(Uuid),
    Remove(Uuid),
}

impl RadarMapApp {
    /// Handles keyboard shortcuts for zoom, view reset and overlay toggles.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (zoom_in, zoom_out, reset, toggle_labels) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                i.key_pressed(egui::Key::Minus),
                i.key_pressed(egui::Key::Num0),
                i.key_pressed(egui::Key::L),
            )
        });

        let viewport = self.controller.viewport();
        let zoom = viewport.zoom();
        let center = viewport.size().unwrap_or_default().scale(0.5);
        if zoom_in {
            self.controller.zoom_around(zoom + KEY_ZOOM_STEP, center);
        }
        if zoom_out {
            self.controller.zoom_around(zoom - KEY_ZOOM_STEP, center);
        }
        if reset {
            self.reset_view();
        }
        if toggle_labels {
            self.overlays.marker_labels = !self.overlays.marker_labels;
        }
    }

    /// Renders the bottom status bar with controls hint and the current view.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Scroll: Zoom | Drag: Pan | Click: Pick position | +/-: Zoom | 0: Fit | L: Labels");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let viewport = self.controller.viewport();
                    ui.label(format!(
                        "{} | zoom {:.2} | {} off-screen",
                        viewport.center(),
                        viewport.zoom(),
                        self.scheduler.indicators().len()
                    ));
                });
            });
        });
    }

    /// Renders the right sidebar panel.
    pub fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("sidebar")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_sidebar_content(ui);
                });
            });
    }

    /// Renders the sidebar content: marker list, overlay toggles and the add-marker form.
    fn show_sidebar_content(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.strong("Markers");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("Total: {}", self.markers.len()));
            });
        });
        ui.separator();

        ui.horizontal(|ui| {
            let empty = self.markers.is_empty();
            if ui
                .add_enabled(!empty && !self.markers.all_visible(), egui::Button::new("Show all"))
                .clicked()
                && self.markers.show_all()
            {
                self.scheduler.request();
            }
            if ui
                .add_enabled(!empty && !self.markers.all_hidden(), egui::Button::new("Hide all"))
                .clicked()
                && self.markers.hide_all()
            {
                self.scheduler.request();
            }
            if ui
                .add_enabled(!empty, egui::Button::new("Fit"))
                .on_hover_text("Fit view to visible markers (0)")
                .clicked()
            {
                self.reset_view();
            }
        });

        ui.add_space(8.0);
        self.show_marker_list(ui);

        ui.add_space(12.0);

        ui.strong("Overlays");
        ui.separator();
        ui.checkbox(&mut self.overlays.indicators, "Off-screen arrows");
        ui.checkbox(&mut self.overlays.marker_labels, "Marker labels");
        ui.checkbox(&mut self.overlays.graticule, "Grid");
        ui.checkbox(&mut self.overlays.scale_bar, "Scale bar");

        ui.add_space(12.0);
        self.show_marker_form(ui);
    }

    /// Renders one row per marker with visibility and remove controls.
    fn show_marker_list(&mut self, ui: &mut egui::Ui) {
        if self.markers.is_empty() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label("No markers yet");
                    ui.weak("Click the map or fill in the form below to add one.");
                });
            });
            return;
        }

        let mut action = None;
        for row in self.markers.rows() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    let mut visible = row.visible;
                    if ui
                        .checkbox(&mut visible, "")
                        .on_hover_text(if row.visible { "Hide marker" } else { "Show marker" })
                        .changed()
                    {
                        action = Some(RowAction::Toggle(row.marker.id));
                    }

                    ui.vertical(|ui| {
                        let label = egui::RichText::new(&row.marker.label).strong();
                        ui.label(if row.visible { label } else { label.weak() });
                        ui.weak(row.marker.position.to_string());
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button("🗑")
                            .on_hover_text("Remove marker")
                            .clicked()
                        {
                            action = Some(RowAction::Remove(row.marker.id));
                        }
                    });
                });
            });
        }

        match action {
            Some(RowAction::Toggle(id)) => {
                if self.markers.toggle_visibility(id) {
                    self.scheduler.request();
                }
            }
            Some(RowAction::Remove(id)) => {
                let label = self.markers.get(id).map(|row| row.marker.label.clone());
                if self.markers.remove(id) {
                    self.scheduler.request();
                    if let Some(label) = label {
                        self.notify_info(format!("Removed {label}"));
                    }
                }
            }
            None => {}
        }
    }

    /// Renders the add-marker form.
    fn show_marker_form(&mut self, ui: &mut egui::Ui) {
        ui.strong("Add marker");
        ui.separator();
        ui.weak("Click the map to pick coordinates.");
        ui.add_space(4.0);

        let mut edited = Vec::new();

        ui.label("Label");
        if ui
            .add(egui::TextEdit::singleline(&mut self.form.label).hint_text("e.g. Praha"))
            .changed()
        {
            edited.push(FormField::Label);
        }
        self.show_field_errors(ui, FormField::Label);

        ui.columns(2, |columns| {
            columns[0].label("Latitude");
            if columns[0]
                .add(egui::TextEdit::singleline(&mut self.form.lat).hint_text("50.087"))
                .changed()
            {
                edited.push(FormField::Lat);
            }
            columns[1].label("Longitude");
            if columns[1]
                .add(egui::TextEdit::singleline(&mut self.form.lng).hint_text("14.421"))
                .changed()
            {
                edited.push(FormField::Lng);
            }
        });
        self.show_field_errors(ui, FormField::Lat);
        self.show_field_errors(ui, FormField::Lng);

        self.touched_fields.extend(edited);

        ui.add_space(4.0);
        if ui.button("Save").clicked() {
            self.submit_form();
        }
    }

    /// Shows validation messages for `field` once the user has touched it.
    fn show_field_errors(&self, ui: &mut egui::Ui, field: FormField) {
        if !self.touched_fields.contains(&field) {
            return;
        }
        let Err(errors) = self.form.validate() else {
            return;
        };
        for error in errors.iter().filter(|e| e.field() == field) {
            ui.colored_label(colors::FORM_ERROR, error.to_string());
        }
    }

    /// Renders the central panel containing the map view.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.show_map(ui);
            });
    }

    /// Handles map input, flushes pending indicator work and draws the map with overlays.
    fn show_map(&mut self, ui: &mut egui::Ui) {
        let (viewport_rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let viewport_size = viewport_rect.size();

        self.controller.resize(Point::new(
            f64::from(viewport_size.x),
            f64::from(viewport_size.y),
        ));
        if self.fit_pending {
            self.fit_pending = false;
            self.reset_view();
        }

        self.handle_scroll_zoom(ui, viewport_rect);

        if response.dragged() {
            let delta = response.drag_delta();
            self.controller
                .pan_by(Point::new(f64::from(delta.x), f64::from(delta.y)));
        }

        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            let local = pos - viewport_rect.min;
            self.controller
                .click(Point::new(f64::from(local.x), f64::from(local.y)));
        }

        self.show_zoom_controls(ui.ctx(), viewport_rect);

        // Frame boundary: apply every view and marker change of this frame at once
        self.poll_view_events();
        let visible = self.markers.visible_snapshot();
        self.scheduler.flush(self.controller.viewport(), &visible);

        ui.set_clip_rect(viewport_rect);

        let viewport = self.controller.viewport();
        if self.overlays.graticule {
            draw_graticule(ui, viewport_rect, viewport);
        } else {
            ui.painter()
                .rect_filled(viewport_rect, 0.0, colors::MAP_BACKGROUND);
        }

        draw_markers(
            ui,
            viewport_rect,
            viewport,
            &visible,
            self.overlays.marker_labels,
        );

        if self.overlays.indicators {
            draw_indicators(
                ui,
                viewport_rect,
                self.scheduler.indicators(),
                self.arrow.as_ref(),
            );
        }

        if self.overlays.scale_bar {
            draw_scale_bar(ui, viewport_rect, viewport);
        }
    }

    /// Renders the floating zoom buttons in the top-left corner of the map.
    fn show_zoom_controls(&mut self, ctx: &egui::Context, map_rect: egui::Rect) {
        let margin = 10.0;
        let button_size = egui::Vec2::splat(ZOOM_BUTTON_SIZE);

        let (zoom_in, zoom_out) = egui::Area::new(egui::Id::new("zoom_controls"))
            .fixed_pos(map_rect.min + egui::vec2(margin, margin))
            .interactable(true)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .inner_margin(2.0)
                    .show(ui, |ui| {
                        ui.spacing_mut().item_spacing.y = 2.0;
                        let zoom_in = ui
                            .add(egui::Button::new("+").min_size(button_size))
                            .on_hover_text("Zoom in (+)")
                            .clicked();
                        let zoom_out = ui
                            .add(egui::Button::new("−").min_size(button_size))
                            .on_hover_text("Zoom out (-)")
                            .clicked();
                        (zoom_in, zoom_out)
                    })
                    .inner
            })
            .inner;

        let viewport = self.controller.viewport();
        let zoom = viewport.zoom();
        let center = viewport.size().unwrap_or_default().scale(0.5);
        if zoom_in {
            self.controller.zoom_around(zoom + KEY_ZOOM_STEP, center);
        }
        if zoom_out {
            self.controller.zoom_around(zoom - KEY_ZOOM_STEP, center);
        }
    }

    /// Handles scroll wheel zoom, zooming towards the mouse position.
    fn handle_scroll_zoom(&mut self, ui: &mut egui::Ui, viewport_rect: egui::Rect) {
        let hover_pos = ui.input(|i| i.pointer.hover_pos());
        let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);

        let Some(hover) = hover_pos.filter(|p| viewport_rect.contains(*p)) else {
            return;
        };
        if scroll_delta == 0.0 {
            return;
        }

        let step = if scroll_delta > 0.0 {
            SCROLL_ZOOM_STEP
        } else {
            -SCROLL_ZOOM_STEP
        };
        let focus = hover - viewport_rect.min;
        let zoom = self.controller.viewport().zoom() + step;
        self.controller
            .zoom_around(zoom, Point::new(f64::from(focus.x), f64::from(focus.y)));
    }
}
