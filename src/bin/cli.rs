//! godocs CLI
//!
//! Fetches the documentation of one Go package and prints it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use godocs::{
    error::Result,
    models::Config,
    parsers::Site,
    render,
    services::{HttpSearcher, Searcher},
};

/// godocs - View Go package documentation
#[derive(Parser, Debug)]
#[command(name = "godocs", version, about = "View Go package documentation")]
struct Cli {
    /// Package import path, e.g. net/http
    module: String,

    /// Path to the configuration file
    #[arg(short, long, default_value = "godocs.toml")]
    config: PathBuf,

    /// Documentation site (overrides the configuration)
    #[arg(short, long)]
    site: Option<Site>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Markdown,
    Outline,
    Json,
}

/// Initialize logging; `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli, mut config: Config) -> Result<()> {
    if let Some(site) = cli.site {
        config.searcher.site = Some(site);
    }
    config.validate()?;

    let searcher = HttpSearcher::new(config.searcher)?;
    let package = searcher.search(&cli.module).await?;

    let output = match cli.format {
        Format::Markdown => render::markdown(&package),
        Format::Outline => render::outline(&package),
        Format::Json => serde_json::to_string_pretty(&package)?,
    };
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load_optional(&cli.config) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("error: could not load {}: {e}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.debug {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logging(level);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Search failed: {e:?}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
