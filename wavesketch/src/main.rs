//! wavesketch - Main entry point
//!
//! Renders the waveform of a PCM WAV file as SVG, or prints its format
//! properties with `--info`.
//!
//! Settings priority: command-line flags → environment → TOML config file →
//! built-in defaults.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use wavesketch::decoder::validate_resolution;
use wavesketch::{ByteSink, WaveInfo, WaveformDecoder};
use wavesketch_common::config::ConfigResolver;
use wavesketch_common::logging;

/// Command-line arguments for wavesketch
#[derive(Parser, Debug)]
#[command(name = "wavesketch")]
#[command(about = "Render PCM WAV waveforms as SVG")]
#[command(version)]
struct Args {
    /// Input WAV file
    input: PathBuf,

    /// Write SVG here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fraction of frame samples per output column (0.000001 to 1)
    #[arg(short, long, env = "WAVESKETCH_RESOLUTION")]
    resolution: Option<f64>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print format properties instead of rendering
    #[arg(long)]
    info: bool,

    /// With --info, print JSON
    #[arg(long, requires = "info")]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(args: Args) -> Result<()> {
    let (config, source) = ConfigResolver::new("wavesketch")
        .load(args.config.as_deref())
        .context("Failed to load configuration")?;

    logging::init_tracing(&logging::default_directive(
        env!("CARGO_PKG_NAME"),
        &config.logging.level,
    ))
    .context("Failed to initialize logging")?;

    info!("Starting wavesketch v{}", env!("CARGO_PKG_VERSION"));
    match source.fallback_warning() {
        Some(warning) => warn!("{}", warning),
        None => debug!("Configuration source: {:?}", source),
    }

    let decoder = WaveformDecoder::open(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    if args.info {
        let info = decoder
            .info()
            .context("Decoder reported no header after a successful load")?;
        return print_info(&info, args.json);
    }

    let resolution = args.resolution.unwrap_or(config.render.resolution);
    // Reject before -o truncates an existing file
    validate_resolution(resolution)?;
    info!("Rendering {} at resolution {}", args.input.display(), resolution);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| {
                    wavesketch::Error::Access(format!(
                        "Failed to open output file {} for writing: {}",
                        path.display(),
                        e
                    ))
                })?;
            let mut sink = BufWriter::new(file);
            let svg = decoder.render(resolution, Some(&mut sink as &mut dyn ByteSink))?;
            info!("Wrote {} bytes to {}", svg.len(), path.display());
        }
        None => {
            let svg = decoder.render(resolution, None)?;
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(svg.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .and_then(|_| stdout.flush())
                .map_err(|e| wavesketch::Error::Write(format!("Failed to write to stdout: {}", e)))?;
        }
    }

    Ok(())
}

fn print_info(info: &WaveInfo, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(info).context("Failed to serialize info")?
        );
        return Ok(());
    }

    println!("Channels:            {}", info.channels);
    println!("Sample rate:         {} Hz", info.sample_rate);
    println!("Byte rate:           {} B/s", info.byte_rate);
    println!("Bit rate:            {} kbit/s", info.kilobits_per_second);
    println!("Bits per sample:     {}", info.bits_per_sample);
    println!("Block align:         {}", info.block_align);
    println!("Total samples:       {}", info.total_samples);
    println!(
        "Duration:            {} s ({:.3} s)",
        info.total_seconds, info.total_seconds_precise
    );
    println!(
        "Payload:             {} bytes at offset {}",
        info.payload_size, info.payload_offset
    );
    Ok(())
}

/// Library error codes become the exit status; anything else exits with 1
fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<wavesketch::Error>())
        .map(|e| e.code() as u8)
        .unwrap_or(1)
}
