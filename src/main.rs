//! `gridplot` CLI - render matrix rows as grayscale PNG images.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gridplot::grid::Matrix;
use gridplot::{
    load_matrix, plot_grid, Frame, ImageSink, MontageSink, Order, PlotOptions, PngSink,
    RenderOptions, ValueRange,
};

/// Render each row of a matrix as a d1 x d2 grayscale image.
#[derive(Parser, Debug)]
#[command(name = "gridplot")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input matrix (.npy, .csv or .tsv), one flattened image per row.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Grid height (rows per image).
    #[arg(long, value_name = "INT")]
    d1: usize,

    /// Grid width (columns per image).
    #[arg(long, value_name = "INT")]
    d2: usize,

    /// Title attached to every image and used as the file name stem.
    #[arg(short, long, default_value = "")]
    title: String,

    /// Reshape order: c (row-major) or f (column-major).
    #[arg(long, default_value = "c", value_name = "ORDER")]
    order: Order,

    /// Output directory for per-row images.
    #[arg(short, long, default_value = "plots", value_name = "DIR")]
    output: PathBuf,

    /// Write a single tiled sheet to this file instead of one file per row.
    #[arg(long, value_name = "FILE", conflicts_with = "output")]
    montage: Option<PathBuf>,

    /// Pixel block size for each grid cell.
    #[arg(short, long, default_value = "8", value_name = "INT")]
    scale: u32,

    /// Value mapped to black. Requires --vmax.
    #[arg(long, requires = "vmax", allow_negative_numbers = true, value_name = "FLOAT")]
    vmin: Option<f32>,

    /// Value mapped to white. Requires --vmin.
    #[arg(long, requires = "vmin", allow_negative_numbers = true, value_name = "FLOAT")]
    vmax: Option<f32>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

/// Sink wrapper advancing a progress bar for every rendered frame.
struct ProgressSink<S> {
    inner: S,
    pb: ProgressBar,
}

impl<S: ImageSink> ImageSink for ProgressSink<S> {
    fn render(&mut self, frame: &Frame<'_>) -> gridplot::Result<()> {
        self.inner.render(frame)?;
        self.pb.inc(1);
        Ok(())
    }

    fn finish(&mut self) -> gridplot::Result<()> {
        self.pb.finish_and_clear();
        self.inner.finish()
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gridplot={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let render = RenderOptions {
        scale: args.scale,
        range: match (args.vmin, args.vmax) {
            (Some(vmin), Some(vmax)) => ValueRange::Fixed { vmin, vmax },
            _ => ValueRange::Auto,
        },
    };
    let options = PlotOptions {
        title: args.title.clone(),
        order: args.order,
    };

    let x = load_matrix(&args.input).context("Failed to load input matrix")?;

    let pb = ProgressBar::new(x.nrows() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Rendering [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let (count, destination) = match &args.montage {
        Some(path) => {
            let sink = MontageSink::new(path, render).context("Failed to set up montage")?;
            (render_rows(&x, args, &options, sink, pb)?, path)
        }
        None => {
            let sink = PngSink::new(&args.output, render).context("Failed to set up output")?;
            (render_rows(&x, args, &options, sink, pb)?, &args.output)
        }
    };

    println!("Rendered {count} images into {}", destination.display());

    Ok(())
}

/// Drive `plot_grid` through `sink` while advancing `pb`.
fn render_rows<S: ImageSink>(
    x: &Matrix,
    args: &Args,
    options: &PlotOptions,
    sink: S,
    pb: ProgressBar,
) -> Result<usize> {
    let mut sink = ProgressSink { inner: sink, pb };
    plot_grid(x.view(), args.d1, args.d2, options, &mut sink).context("Failed to plot grid")
}
