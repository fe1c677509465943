use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};

use sigpad::Config;
use sigpad::export::{self, ImageFormat};
use sigpad::pad::{FixedHost, PadBuilder};
use sigpad::replay;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SIGPAD_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "sigpad")]
#[command(version = VERSION, about = "Handwritten signature pad with velocity-based stroke width")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded input script and export the resulting signature
    Replay(ReplayArgs),
    /// Print where the configuration file is looked up
    ConfigPath,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// JSON script of timed input events
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Output file (defaults to a timestamped name in the current directory)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Image format: png or jpeg
    #[arg(long, short = 'f', value_name = "FORMAT")]
    format: Option<String>,

    /// Lossy quality between 0.0 and 1.0
    #[arg(long, short = 'q', value_name = "QUALITY")]
    quality: Option<f64>,

    /// Config file to use instead of the default location
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Undo this many strokes before exporting
    #[arg(long, value_name = "N", default_value_t = 0)]
    undo: usize,

    /// Print a data URL to stdout instead of writing a file
    #[arg(long)]
    data_url: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay(args) => run_replay(args),
        Command::ConfigPath => {
            println!("{}", Config::get_config_path()?.display());
            Ok(())
        }
    }
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = match &args.format {
        Some(name) => ImageFormat::parse(name)
            .ok_or_else(|| anyhow!("Unsupported image format '{}' (expected png or jpeg)", name))?,
        None => config.export.format,
    };
    let quality = args.quality.unwrap_or(config.export.quality);

    let events = replay::load_script(&args.script)?;
    let capabilities = replay::host_capabilities(&events)?;

    let runtime = tokio::runtime::Runtime::new()
        .context("Failed to create Tokio runtime for image decoding")?;
    let mut pad = PadBuilder::from_config(&config)
        .host(
            FixedHost::at_origin(config.canvas.width, config.canvas.height)
                .with_capabilities(capabilities),
        )
        .runtime(runtime.handle().clone())
        .on_end(|event| log::debug!("Stroke ended at {:?}", event.position))
        .build()
        .context("Failed to create signature pad")?;

    let last = replay::replay(&mut pad, &events, Instant::now())?;
    pad.tick(last + config.throttle_interval())?;
    runtime.block_on(pad.settle())?;

    for _ in 0..args.undo {
        pad.undo()?;
        runtime.block_on(pad.settle())?;
    }

    log::info!(
        "Replayed {} events into {} strokes",
        events.len(),
        pad.history().len()
    );

    if args.data_url {
        println!("{}", pad.to_data_url(format, Some(quality))?);
        return Ok(());
    }

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(export::generate_filename(
            &config.export.filename_template,
            format,
        ))
    });
    let bytes = pad.export_image(format, Some(quality))?;
    fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write image to {}", output.display()))?;

    println!(
        "Saved {} stroke(s) to {}",
        pad.history().len(),
        output.display()
    );
    Ok(())
}
