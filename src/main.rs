use std::io::{stderr, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use image::Rgb;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

use qrlogo::config::{
    parse_hex_color, LogoQrJob, QrCodeEcc, QrConfig, Version, DEFAULT_LOGO_PATH,
    DEFAULT_OUTPUT_PATH, DEFAULT_URL,
};
use qrlogo::generate_logo_qr_and_save;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "qrlogo")]
#[command(version)]
#[command(about = "Generate a QR code with a logo at its center", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = DEFAULT_URL, help = "Data to encode")]
    url: String,
    #[arg(short, long, default_value = DEFAULT_LOGO_PATH, help = "Logo image to paste")]
    logo: PathBuf,
    #[arg(
        short,
        long,
        default_value = DEFAULT_OUTPUT_PATH,
        help = "Output file",
        long_help = "Output file. The format is determined from the extension (png, jpg, bmp, ...). \
        An existing file is overwritten."
    )]
    output: PathBuf,
    #[arg(long, default_value = "2", help = "QR version (1-40)")]
    symbol_version: Version,
    #[arg(long, default_value = "H", help = "Error correction level: L, M, Q or H")]
    ecc: QrCodeEcc,
    #[arg(long, default_value_t = 10, help = "Pixels per module")]
    box_size: u32,
    #[arg(long, default_value_t = 4, help = "Quiet zone width, in modules")]
    border: u32,
    #[arg(long, help = "Fail instead of raising the version when the data does not fit")]
    no_fit: bool,
    #[arg(long, default_value = "#000000", value_parser = parse_hex_color)]
    fill_color: Rgb<u8>,
    #[arg(long, default_value = "#ffffff", value_parser = parse_hex_color)]
    back_color: Rgb<u8>,
}

impl From<Cli> for LogoQrJob {
    fn from(cli: Cli) -> Self {
        LogoQrJob {
            payload: cli.url,
            logo_path: cli.logo,
            output_path: cli.output,
            qr: QrConfig::default()
                .with_version(cli.symbol_version)
                .with_ecc(cli.ecc)
                .with_module_size(cli.box_size)
                .with_border(cli.border)
                .with_fit(!cli.no_fit)
                .with_colors(cli.fill_color, cli.back_color),
        }
    }
}

fn init_logger() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let console_layer = fmt::layer()
        .with_writer(stderr)
        .with_ansi(stderr().is_terminal())
        .with_level(true)
        .without_time()
        .compact()
        .with_filter(env_filter);

    registry().with(console_layer).init();
}

fn main() -> Result<()> {
    init_logger();
    let job = LogoQrJob::from(Cli::parse());
    let generated = generate_logo_qr_and_save(&job)
        .with_context(|| format!("could not generate {}", job.output_path.display()))?;
    println!(
        "QR code with logo generated: {} ({}x{}, version {})",
        generated.path.display(),
        generated.width,
        generated.height,
        generated.version
    );
    Ok(())
}
