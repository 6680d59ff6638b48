use std::{
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use samplegrid_core::{
    load_batch, load_config, save_batch, FilePreviewer, GridLayout, LinePrompt, Previewer,
    SampleBatch, SaveRequest, TerminalPreviewer, ViewerConfig,
};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Preview a batch of image samples stored in an .npz file and optionally save them.
#[derive(Parser, Debug)]
#[command(name = "samplegrid")]
#[command(version)]
#[command(about = "Process and save image samples.")]
struct Args {
    /// Input .npz file containing samples
    input: PathBuf,

    /// Number of rows in display grid [default: 2]
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns in display grid [default: 5]
    #[arg(long)]
    cols: Option<usize>,

    /// Skip displaying the images
    #[arg(long)]
    no_show: bool,

    /// Save the images
    #[arg(long)]
    save: bool,

    /// Base name for saved files (prompted for when omitted)
    #[arg(long)]
    name: Option<String>,

    /// Output directory [default: output]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Image format (png, jpg, etc.) [default: png]
    #[arg(long)]
    format: Option<String>,

    /// JSON file with default settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the preview grid to this image file instead of the terminal
    #[arg(long)]
    preview_file: Option<PathBuf>,

    /// Terminal preview width in columns [default: 100]
    #[arg(long)]
    preview_width: Option<u32>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Flags merged over the configuration file.
#[derive(Debug)]
struct Settings {
    layout: GridLayout,
    preview_width: u32,
    request: SaveRequest,
}

impl Settings {
    fn resolve(args: &Args, config: ViewerConfig) -> Self {
        Self {
            layout: GridLayout::new(
                args.rows.unwrap_or(config.rows),
                args.cols.unwrap_or(config.cols),
            ),
            preview_width: args.preview_width.unwrap_or(config.preview_width),
            request: SaveRequest {
                name: args.name.clone(),
                output_dir: args.output_dir.clone().unwrap_or(config.output_dir),
                format: args.format.clone().unwrap_or(config.format),
                default_name: config.default_name,
            },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref()).context("failed to load configuration")?;
    let settings = Settings::resolve(args, config);
    debug!(?settings, "resolved settings");

    println!("Loading file: {}", args.input.display());
    let batch = load_batch(&args.input)
        .with_context(|| format!("failed to load samples from {}", args.input.display()))?;
    println!("Loaded {} samples", batch.len());

    if !args.no_show {
        show_preview(&batch, &settings, args.preview_file.as_deref())?;
    }

    if args.save {
        let mut prompt = LinePrompt::stdio();
        let mut out = io::stdout();
        let summary = save_batch(&batch, &settings.request, &mut prompt, &mut out)
            .context("failed to save samples")?;

        println!("\nSaving Results:");
        println!("{summary}");
    }

    Ok(())
}

fn show_preview(
    batch: &SampleBatch,
    settings: &Settings,
    preview_file: Option<&Path>,
) -> Result<()> {
    let mut previewer: Box<dyn Previewer> = match preview_file {
        Some(path) => Box::new(FilePreviewer::new(path)),
        None => Box::new(TerminalPreviewer::new(io::stdout(), settings.preview_width)),
    };
    previewer
        .show(batch, &settings.layout)
        .context("failed to render preview")?;

    if let Some(path) = preview_file {
        println!("Preview written to {}", path.display());
    }
    Ok(())
}
