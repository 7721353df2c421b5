use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpost::models::PanelSpec;
use inkpost::protocol;
use inkpost::rendering::{convert_photo, decode_photo_png, encode_preview_png, ConvertOptions};
use inkpost::transport;

#[derive(Parser)]
#[command(name = "inkpost")]
#[command(about = "Photo uploader pipeline for BLE e-paper calendar panels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Tone curve and binarization flags shared by the photo commands
#[derive(Args)]
struct ToneArgs {
    /// Gamma exponent (1.0 = identity)
    #[arg(long, default_value_t = 0.8)]
    gamma: f64,

    /// Black clipping level (0-255)
    #[arg(long, default_value_t = 69)]
    black: u8,

    /// White clipping level (0-255)
    #[arg(long, default_value_t = 160)]
    white: u8,

    /// Binarization: "atkinson", "floyd-steinberg", "sierra-lite", or "threshold"
    #[arg(long, default_value = "atkinson")]
    dither: String,
}

impl ToneArgs {
    fn to_options(&self) -> anyhow::Result<ConvertOptions> {
        let strategy = inkpost::rendering::BinarizeStrategy::parse(&self.dither)
            .ok_or_else(|| anyhow::anyhow!("unknown dither strategy: {}", self.dither))?;
        Ok(ConvertOptions {
            tone: mono_dither::ToneCurve::new()
                .gamma(self.gamma)
                .black(self.black)
                .white(self.white),
            strategy,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a photo PNG to the panel's packed 1-bit format
    Convert {
        /// Input photo (PNG, already scaled to the panel resolution)
        input: PathBuf,

        /// Output path for the packed buffer
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the dithered preview as a PNG
        #[arg(short, long)]
        preview: Option<PathBuf>,

        #[command(flatten)]
        tone: ToneArgs,
    },
    /// Build a picture command payload for a device slot
    Picture {
        /// Input photo (PNG, already scaled to the panel resolution)
        input: PathBuf,

        /// Target picture slot (0-3)
        #[arg(short, long, default_value_t = 0)]
        slot: u8,

        /// Output path for the command JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        tone: ToneArgs,
    },
    /// Build a calendar week-start preference command payload
    Calendar {
        /// Start weeks on Monday
        #[arg(long)]
        monday_first: bool,

        /// Output path for the command JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpost=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Convert {
            input,
            output,
            preview,
            tone,
        } => run_convert(&input, &output, preview.as_deref(), &tone),
        Commands::Picture {
            input,
            slot,
            output,
            tone,
        } => run_picture(&input, slot, output.as_deref(), &tone),
        Commands::Calendar {
            monday_first,
            output,
        } => run_calendar(monday_first, output.as_deref()),
    }
}

/// Convert a photo to the packed panel format (and optionally a preview PNG)
fn run_convert(
    input: &Path,
    output: &Path,
    preview: Option<&Path>,
    tone: &ToneArgs,
) -> anyhow::Result<()> {
    let panel = PanelSpec::CALENDAR_2IN9;
    let photo = decode_photo_png(&std::fs::read(input)?)?;
    let result = convert_photo(&photo, panel, &tone.to_options()?)?;

    std::fs::write(output, result.packed.data())?;
    tracing::info!(
        path = %output.display(),
        bytes = result.packed.data().len(),
        writes = transport::write_count(result.packed.data().len()),
        "Packed buffer written"
    );

    if let Some(preview_path) = preview {
        let png_bytes = encode_preview_png(&result.preview)?;
        std::fs::write(preview_path, &png_bytes)?;
        tracing::info!(
            path = %preview_path.display(),
            bytes = png_bytes.len(),
            "Preview written"
        );
    }
    Ok(())
}

/// Build a `pic` command payload from a photo
fn run_picture(
    input: &Path,
    slot: u8,
    output: Option<&Path>,
    tone: &ToneArgs,
) -> anyhow::Result<()> {
    let panel = PanelSpec::CALENDAR_2IN9;
    let photo = decode_photo_png(&std::fs::read(input)?)?;
    let result = convert_photo(&photo, panel, &tone.to_options()?)?;
    let png_bytes = encode_preview_png(&result.preview)?;

    let command = protocol::Command::picture(slot, &png_bytes)?;
    let json = command.to_json()?;
    tracing::info!(
        slot,
        payload = json.len(),
        writes = transport::write_count(json.len()),
        pacing_secs = transport::transfer_estimate(json.len()).as_secs_f64(),
        "Picture command built"
    );

    write_payload(&json, output)
}

/// Build a `cal` command payload
fn run_calendar(monday_first: bool, output: Option<&Path>) -> anyhow::Result<()> {
    let json = protocol::Command::calendar(monday_first).to_json()?;
    write_payload(&json, output)
}

fn write_payload(json: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(path = %path.display(), "Command payload written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
