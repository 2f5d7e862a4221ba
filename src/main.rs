use clap::{Parser, Subcommand};
use responsive_variants::imaging::capabilities;
use responsive_variants::{config, output, process};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "responsive-variants")]
#[command(about = "Generate responsive WebP and JPEG variants of site photos")]
#[command(long_about = "\
Generate responsive WebP and JPEG variants of site photos

With no arguments, runs the built-in batch: each configured source image is
written as <base_name>_<size>w.webp and <base_name>_<size>w.jpg for every
configured size (400px and 800px by default) into assets/images/optimized.

Missing sources are skipped; sources that fail to decode are reported and
the rest of the batch continues.

Settings can be overridden in responsive-variants.toml.
Run 'responsive-variants gen-config' to print a documented config file.")]
#[command(version = env!("RESPONSIVE_VARIANTS_VERSION"))]
struct Cli {
    /// Config file (defaults to ./responsive-variants.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock config file with all options documented
    GenConfig,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "responsive_variants=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    init_tracing();

    output::print_banner(&capabilities::input_formats());

    let missing = capabilities::missing_codecs();
    if !missing.is_empty() {
        output::print_missing_codecs(&missing);
        return ExitCode::FAILURE;
    }

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match process::process(&config) {
        Ok(report) => {
            output::print_summary(&config, &report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
