//! Prints the off-screen indicators for a map view as JSON.

use clap::Parser;
use radar_map::assets::{AssetLoadError, load_markers_file, load_seed_markers};
use radar_map::geometry::INSET_MARGIN;
use radar_map::viewport::{DEFAULT_CENTER, DEFAULT_ZOOM};
use radar_map::{IndicatorProjector, LatLng, Point, Viewport};
use std::path::PathBuf;
use thiserror::Error;

/// Compute off-screen marker indicators for a map view
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Latitude of the view center
    #[arg(long, default_value_t = DEFAULT_CENTER.lat, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the view center
    #[arg(long, default_value_t = DEFAULT_CENTER.lng, allow_hyphen_values = true)]
    lng: f64,

    /// Zoom level
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    zoom: f64,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Inset margin of the indicator boundary in pixels
    #[arg(long, default_value_t = INSET_MARGIN)]
    margin: f64,

    /// RON marker list; defaults to the bundled seed markers
    #[arg(short, long)]
    markers: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Markers(#[from] AssetLoadError),
    #[error("failed to serialize indicators: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> Result<(), CliError> {
    env_logger::init();
    let args = CliArgs::parse();

    let markers = match &args.markers {
        Some(path) => load_markers_file(path)?,
        None => load_seed_markers()?,
    };
    log::info!("Loaded {} markers", markers.len());

    let viewport = Viewport::new(LatLng::new(args.lat, args.lng), args.zoom)
        .with_size(Point::new(args.width, args.height));
    let indicators = IndicatorProjector::with_margin(args.margin).recompute(&viewport, &markers);
    log::info!(
        "{} of {} markers are off-screen",
        indicators.len(),
        markers.len()
    );

    println!("{}", serde_json::to_string_pretty(&indicators)?);
    Ok(())
}
