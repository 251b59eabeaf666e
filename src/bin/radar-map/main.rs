#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod colors;
mod constants;
mod overlays;
mod ui;

use constants::{FIT_PADDING, VIEW_STORAGE_KEY};
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use overlays::{OverlayVisibility, arrow_image_source};
use radar_map::assets::load_seed_markers;
use radar_map::validation::{FormField, MarkerForm};
use radar_map::viewport::{DEFAULT_CENTER, DEFAULT_ZOOM};
use radar_map::{
    LatLngBounds, MarkerStore, RecomputeScheduler, Viewport, ViewportController, ViewportEvent,
};
use std::collections::HashSet;
use std::sync::mpsc;

/// Main application state for the Radar Map viewer.
pub struct RadarMapApp {
    markers: MarkerStore,
    controller: ViewportController,
    view_events: mpsc::Receiver<ViewportEvent>,
    scheduler: RecomputeScheduler,
    overlays: OverlayVisibility,
    /// Indicator arrow glyph; indicators are drawn without it if loading failed.
    arrow: Option<egui::ImageSource<'static>>,
    form: MarkerForm,
    touched_fields: HashSet<FormField>,
    /// Fit the view to the markers once the map panel has a size.
    fit_pending: bool,
    toasts: Toasts,
}

impl RadarMapApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut toasts = Toasts::new()
            .anchor(egui::Align2::LEFT_TOP, (10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let seed = load_seed_markers().unwrap_or_else(|err| {
            log::error!("Failed to load seed markers: {err}");
            add_error_toast(&mut toasts, err.to_string());
            Vec::new()
        });

        let arrow = arrow_image_source()
            .inspect_err(|err| {
                log::error!("Failed to load indicator arrow: {err}");
                add_error_toast(&mut toasts, err.to_string());
            })
            .ok();

        // Restore the last view; without one, fit to the markers on the first frame
        let stored_view: Option<Viewport> = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, VIEW_STORAGE_KEY));
        let fit_pending = stored_view.is_none();
        if let Some(view) = &stored_view {
            log::info!("Restored view at zoom {:.2}", view.zoom());
        }

        let mut controller = ViewportController::new(stored_view.unwrap_or_default());
        let view_events = controller.subscribe();

        let mut scheduler = RecomputeScheduler::default();
        scheduler.request();

        Self {
            markers: MarkerStore::new(seed),
            controller,
            view_events,
            scheduler,
            overlays: OverlayVisibility::default(),
            arrow,
            form: MarkerForm::default(),
            touched_fields: HashSet::new(),
            fit_pending,
            toasts,
        }
    }

    /// Fits the view to the visible markers, or returns to the default view when there are none.
    fn reset_view(&mut self) {
        let visible = self.markers.visible_snapshot();
        match LatLngBounds::from_points(visible.iter().map(|marker| &marker.position)) {
            Some(bounds) => {
                self.controller.fit_bounds(&bounds, FIT_PADDING);
            }
            None => {
                self.controller.set_view(DEFAULT_CENTER, DEFAULT_ZOOM);
            }
        }
    }

    /// Drains view events: changes schedule a recompute, clicks fill the form.
    fn poll_view_events(&mut self) {
        loop {
            match self.view_events.try_recv() {
                Ok(ViewportEvent::Changed) => self.scheduler.request(),
                Ok(ViewportEvent::Click(lat_lng)) => {
                    self.form.fill_from_click(lat_lng);
                    self.touched_fields.insert(FormField::Lat);
                    self.touched_fields.insert(FormField::Lng);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    log::warn!("Viewport event channel disconnected");
                    break;
                }
            }
        }
    }

    /// Validates the form and adds the marker, or reveals all field errors.
    fn submit_form(&mut self) {
        match self.form.validate() {
            Ok(new_marker) => {
                self.markers.add(new_marker.position, new_marker.label.clone());
                self.scheduler.request();
                self.form.reset();
                self.touched_fields.clear();
                self.notify_info(format!("Added {}", new_marker.label));
            }
            Err(errors) => {
                log::debug!("Marker form rejected: {errors:?}");
                self.touched_fields
                    .extend([FormField::Label, FormField::Lat, FormField::Lng]);
            }
        }
    }

    fn notify_info(&mut self, text: String) {
        self.toasts.add(Toast {
            kind: ToastKind::Info,
            text: text.into(),
            options: ToastOptions::default().duration_in_seconds(3.0),
            ..Default::default()
        });
    }
}

fn add_error_toast(toasts: &mut Toasts, text: String) {
    toasts.add(Toast {
        kind: ToastKind::Error,
        text: text.into(),
        options: ToastOptions::default()
            .duration_in_seconds(10.0)
            .show_icon(true),
        ..Default::default()
    });
}

impl eframe::App for RadarMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_input(ctx);

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_central_panel(ctx);

        // Show toasts
        self.toasts.show(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, VIEW_STORAGE_KEY, self.controller.viewport());
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Radar Map"),
        ..Default::default()
    };

    eframe::run_native(
        "Radar Map",
        options,
        Box::new(|cc| Ok(Box::new(RadarMapApp::new(cc)))),
    )
}
