use std::{
    fs,
    io::{self, Cursor, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use image::ImageFormat;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use udcode::{read_info, UdcBuilder, UdcReader};

#[derive(Parser, Debug)]
#[command(name = "udcode")]
#[command(version)]
#[command(
    about = "Convert any file to a camera-scannable square image and back.",
    long_about = None,
    after_help = "Examples:\n  udcode encode document.pdf output.png\n  udcode encode secret.zip code.png --no-compress\n  udcode decode scanned.png restored.pdf\n  cat file.bin | udcode encode - - > image.png\n  udcode decode -q image.png - > output.bin\n  udcode info image.png"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a file to an image
    Encode {
        /// Input file, "-" for stdin
        input: PathBuf,

        /// Output PNG image, "-" for stdout
        output: PathBuf,

        /// Disable compression (useful for pre-compressed data)
        #[arg(long)]
        no_compress: bool,

        /// Zlib compression level (0-9)
        #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(0..=9))]
        level: u32,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Convert an image back to a file
    Decode {
        /// Input PNG image, "-" for stdin
        input: PathBuf,

        /// Output file, "-" for stdout
        #[arg(default_value = "-")]
        output: PathBuf,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Display image information without decoding the payload
    Info {
        /// Input PNG image
        image: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = match &cli.command {
        Commands::Encode { quiet, .. } | Commands::Decode { quiet, .. } => *quiet,
        Commands::Info { .. } => false,
    };
    init_tracing(quiet);

    let result = match cli.command {
        Commands::Encode { input, output, no_compress, level, .. } => {
            run_encode(&input, &output, !no_compress, level)
        }
        Commands::Decode { input, output, .. } => run_decode(&input, &output),
        Commands::Info { image } => run_info(&image),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if is_stdio(path) {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf).context("failed to read stdin")?;
        return Ok(buf);
    }
    if !path.exists() {
        bail!("input file '{}' not found", path.display());
    }
    fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if is_stdio(path) {
        let mut out = io::stdout().lock();
        out.write_all(bytes).context("failed to write stdout")?;
        return out.flush().context("failed to flush stdout");
    }
    fs::write(path, bytes).with_context(|| format!("failed to write '{}'", path.display()))
}

fn run_encode(input: &Path, output: &Path, compress: bool, level: u32) -> Result<()> {
    let data = read_input(input)?;
    let grid = UdcBuilder::new(&data).compress(compress).compression_level(level).build()?;
    let img = grid.to_image();

    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png).context("failed to encode PNG")?;
    write_output(output, png.get_ref())?;

    let target = if is_stdio(output) { "stdout".to_string() } else { output.display().to_string() };
    info!("Created square image: {target}");
    for line in grid.report().to_string().lines() {
        info!("  {line}");
    }
    Ok(())
}

fn run_decode(input: &Path, output: &Path) -> Result<()> {
    let bytes = read_input(input)?;
    let img = image::load_from_memory(&bytes).context("failed to load image")?.to_rgb8();
    let decoded = UdcReader::read(&img)?;
    write_output(output, decoded.data())?;

    if !is_stdio(output) {
        info!("Decoded: {} ({} bytes)", output.display(), decoded.data().len());
    }
    match decoded.verify() {
        Ok(()) => info!("  CRC: OK"),
        Err(e) => warn!("  CRC: FAILED ({e})"),
    }
    Ok(())
}

fn run_info(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("image '{}' not found", path.display());
    }
    let img = image::open(path)
        .with_context(|| format!("failed to open '{}'", path.display()))?
        .to_rgb8();
    let info = read_info(&img);

    println!("Image Information:");
    println!("  File: {}", path.display());
    for line in info.to_string().lines() {
        println!("  {line}");
    }
    if info.header.is_none() {
        warn!("No readable header in '{}'", path.display());
    }
    Ok(())
}
