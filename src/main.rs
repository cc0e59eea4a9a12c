use anyhow::{Context, Result};
use clap::Parser;
use photoroute::constants::{DEFAULT_OUTPUT_FILE, DEFAULT_ZOOM};
use photoroute::Settings;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "photoroute", version, about = "Draw a day-colored route of geotagged photos on a map")]
struct Cli {
    /// Folder with the photos (not searched recursively)
    #[arg(value_name = "DIR")]
    folder: PathBuf,

    /// Where to write the HTML map
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Initial zoom level of the map
    #[arg(long, default_value_t = DEFAULT_ZOOM, value_parser = clap::value_parser!(u8).range(1..=19))]
    zoom: u8,

    /// Log every photo, not just the skipped ones
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("🗺️  PhotoRoute v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = Settings::new(&cli.folder)
        .with_output(&cli.output)
        .with_zoom(cli.zoom);

    let summary = photoroute::run(&settings)
        .with_context(|| format!("Failed to map photos in {}", settings.photos_dir.display()))?;

    info!(
        "🎉 Done: {} of {} files mapped across {} days ({} skipped)",
        summary.mapped, summary.examined, summary.days, summary.skipped
    );

    Ok(())
}
