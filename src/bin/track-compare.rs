//! track-compare - align two GPX tracks and report their similarity
//!
//! Usage:
//!   track-compare <gpx_file1> <gpx_file2> [--cutoff <m>] [--even <m>] [--ignore-elevation]
//!                 [--output <alignment.json>]
//!
//! Points from every segment of the first track in each file are joined into one
//! sequence before comparison.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use gpx::{read, Gpx};
use log::{error, info};
use track_aligner::geo_utils::polyline_length;
use track_aligner::{compare_tracks, AlignConfig, GpsPoint};

#[derive(Parser)]
#[command(name = "track-compare")]
#[command(about = "Align two GPS tracks point by point and report their similarity", long_about = None)]
struct Cli {
    /// First GPX file
    gpx_file1: PathBuf,

    /// Second GPX file
    gpx_file2: PathBuf,

    /// Cutoff distance in meters for similar points
    #[arg(short, long, default_value = "10")]
    cutoff: f64,

    /// Evenly distribute points every N meters before aligning
    #[arg(short, long)]
    even: Option<f64>,

    /// Ignore elevation when measuring point distances
    #[arg(short, long)]
    ignore_elevation: bool,

    /// Write the alignment and preprocessed tracks as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let track1 = load_track(&cli.gpx_file1)?;
    let track2 = load_track(&cli.gpx_file2)?;
    info!(
        "Loaded {} ({} points, {:.0}m) and {} ({} points, {:.0}m)",
        cli.gpx_file1.display(),
        track1.len(),
        polyline_length(&track1),
        cli.gpx_file2.display(),
        track2.len(),
        polyline_length(&track2)
    );

    let config = AlignConfig {
        use_elevation: !cli.ignore_elevation,
        redistribute_spacing: cli.even,
        ..AlignConfig::from_cutoff(cli.cutoff)
    };

    let comparison = compare_tracks(&track1, &track2, &config).map_err(|e| e.to_string())?;
    if comparison.reversed {
        info!("Detected a track that needs to be reversed");
    }

    if let Some(path) = &cli.output {
        let file = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &comparison)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        writer
            .flush()
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        info!("Saved alignment to '{}'", path.display());
    }

    info!("Track similarity: {:.2}%", comparison.similarity * 100.0);
    Ok(())
}

/// Parse a GPX file into a single point sequence.
fn load_track(path: &Path) -> Result<Vec<GpsPoint>, String> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let gpx: Gpx = read(BufReader::new(file)).map_err(|e| format!("{}: {}", path.display(), e))?;

    let track = gpx
        .tracks
        .first()
        .ok_or_else(|| format!("{}: no tracks found", path.display()))?;

    let points: Vec<GpsPoint> = track
        .segments
        .iter()
        .flat_map(|segment| &segment.points)
        .map(|pt| {
            let point = pt.point();
            GpsPoint {
                latitude: point.y(),
                longitude: point.x(),
                elevation: pt.elevation,
            }
        })
        .collect();

    if points.is_empty() {
        return Err(format!("{}: no track points found", path.display()));
    }
    Ok(points)
}
