//! Line Merge Visualization Tool
//!
//! A GUI application for grouping line series and visualizing the merged
//! result. The `render` subcommand draws the same display set straight to a
//! PNG without opening a window.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use eframe::egui;

use linemerge::app::App;
use linemerge::datagen::{self, DemoDataConfig};
use linemerge::plotting::{render_png, ChartStyle, ChartTheme};
use linemerge::session::{FrameCapture, Session};
use linemerge::types::{PartitionId, Series};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Args)]
struct DataArgs {
    /// Number of generated series
    #[arg(long, default_value_t = 10)]
    series: usize,

    /// Samples per generated series
    #[arg(long, default_value_t = 10)]
    points: usize,

    /// Lower sample bound, inclusive
    #[arg(long, default_value_t = -100, allow_negative_numbers = true)]
    low: i32,

    /// Upper sample bound, inclusive
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    high: i32,

    /// RNG seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,

    /// JSON seed file used instead of generated data
    #[arg(long)]
    seed_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the display set to a PNG without opening a window
    Render {
        /// Output image path
        #[arg(long)]
        out: PathBuf,

        /// Group to pre-populate, as NAME=LABEL,LABEL,... (repeatable)
        #[arg(long = "group", value_name = "NAME=LABELS")]
        groups: Vec<String>,

        /// Image width in pixels
        #[arg(long, default_value_t = 1024)]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value_t = 768)]
        height: u32,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::debug!("{args:#?}");

    let seed = load_seed(&args.data)?;
    match args.command {
        Some(Command::Render {
            out,
            groups,
            width,
            height,
        }) => render_to_file(seed, &out, &groups, (width, height)),
        None => run_gui(seed, demo_config(&args.data)),
    }
}

fn demo_config(data: &DataArgs) -> DemoDataConfig {
    DemoDataConfig {
        series: data.series,
        points: data.points,
        low: data.low,
        high: data.high,
        seed: data.seed,
    }
}

fn load_seed(data: &DataArgs) -> Result<Vec<Series>> {
    if let Some(path) = &data.seed_file {
        datagen::load_seed_file(path)
    } else {
        Ok(datagen::generate(&demo_config(data)))
    }
}

fn render_to_file(
    seed: Vec<Series>,
    out: &Path,
    groups: &[String],
    size: (u32, u32),
) -> Result<()> {
    let mut session = Session::new(seed, FrameCapture::default())?;
    for spec in groups {
        apply_group_arg(&mut session, spec)?;
    }

    render_png(
        session.sink().frame(),
        out,
        size,
        &ChartTheme::default(),
        &ChartStyle::default(),
    )
    .map_err(|e| anyhow!("failed to render chart to {out:?}: {e}"))?;
    log::info!("wrote {out:?}");
    Ok(())
}

/// Parse one `--group NAME=LABEL,LABEL,...` argument and apply it.
fn apply_group_arg(session: &mut Session<FrameCapture>, spec: &str) -> Result<()> {
    let (name, labels) = spec
        .split_once('=')
        .with_context(|| format!("bad group spec {spec:?}, expected NAME=LABEL,..."))?;
    let id = session
        .add_group(name)
        .with_context(|| format!("failed to create group {name:?}"))?;
    for label in labels.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        session
            .move_series(label, PartitionId::Individual, PartitionId::Group(id))
            .with_context(|| format!("failed to add {label:?} to group {name:?}"))?;
    }
    Ok(())
}

fn run_gui(seed: Vec<Series>, demo_cfg: DemoDataConfig) -> Result<()> {
    let session = Session::new(seed, FrameCapture::default())?;
    let app = App::new(session, demo_cfg);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Line Merge"),
        ..Default::default()
    };

    eframe::run_native(
        "Line Merge",
        options,
        Box::new(move |_cc| Ok(Box::new(app) as Box<dyn eframe::App>)),
    )
    .map_err(|e| anyhow!("failed to run application: {e}"))?;
    Ok(())
}
