//! cinemeta CLI
//!
//! Resumable enrichment of a movie dataset from the IMDb API and IMDb
//! title pages.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

mod commands;
mod error;
mod progress;

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "cinemeta")]
#[command(about = "Enrich a movie dataset with IMDb metadata and posters", long_about = None)]
struct Cli {
    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by the enrichment jobs.
#[derive(Args, Clone)]
pub(crate) struct JobArgs {
    /// Input dataset (JSONL, one record per line)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output dataset; if it exists the run resumes from it
    #[arg(short, long)]
    pub output: PathBuf,

    /// Save after this many processed records (0 = only at the end)
    #[arg(long)]
    pub save_interval: Option<usize>,

    /// Pause between requests, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Maximum number of records to process
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Show what would be fetched without fetching or saving
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Disable the run log file
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in description, genres, release date and credits from the IMDb API
    Enrich {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Scrape poster URLs from IMDb title pages
    Posters {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Manage the API configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Interactively set up the API key
    Setup,

    /// Print the config file path
    Path,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let result = match cli.command {
        Commands::Enrich { job } => commands::enrich::run_enrich(job, cli.quiet),
        Commands::Posters { job } => commands::enrich::run_posters(job, cli.quiet),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Setup => commands::config::run_config_setup(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Plain messages at info, level-tagged otherwise. `RUST_LOG` still wins.
fn init_logging(quiet: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        })
        .init();
}

/// Print a blank line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
