use std::path::Path;
use std::time::Duration;

use cinemeta_core::CompletionPolicy;
use cinemeta_lib::{BatchEnricher, DEFAULT_SAVE_INTERVAL, EnrichOptions, EnrichStats, RunLog};
use cinemeta_scraper::{ApiConfig, EnrichmentSource, ImdbApiSource, PosterPageSource, ScrapeError};
use cinemeta_store::{JsonlStore, StartMode};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::progress::BarProgress;
use crate::{CliError, JobArgs};

/// Default checkpoint interval for poster runs.
const POSTER_SAVE_INTERVAL: usize = 100;

/// Fill metadata fields from the IMDb API.
pub(crate) fn run_enrich(job: JobArgs, quiet: bool) -> Result<(), CliError> {
    let config = ApiConfig::load().map_err(|e| match e {
        ScrapeError::Config(msg) => CliError::config(format!(
            "{msg}. Run 'cinemeta config setup' to store an API key."
        )),
        other => other.into(),
    })?;
    log::debug!("Using {:?}", config);

    let source = ImdbApiSource::new(config)?;
    run_job(
        &source,
        CompletionPolicy::metadata(),
        options(&job, DEFAULT_SAVE_INTERVAL),
        &job,
        quiet,
    )
}

/// Fill poster fields by scraping IMDb title pages.
pub(crate) fn run_posters(job: JobArgs, quiet: bool) -> Result<(), CliError> {
    let source = PosterPageSource::new(cinemeta_scraper::config::DEFAULT_TIMEOUT)?;
    run_job(
        &source,
        CompletionPolicy::posters(),
        options(&job, POSTER_SAVE_INTERVAL),
        &job,
        quiet,
    )
}

fn options(job: &JobArgs, default_interval: usize) -> EnrichOptions {
    EnrichOptions {
        save_interval: job.save_interval.unwrap_or(default_interval),
        request_delay: Duration::from_millis(job.delay_ms),
        limit: job.limit,
        dry_run: job.dry_run,
        ..Default::default()
    }
}

fn run_job(
    source: &dyn EnrichmentSource,
    policy: CompletionPolicy,
    options: EnrichOptions,
    job: &JobArgs,
    quiet: bool,
) -> Result<(), CliError> {
    if same_file(&job.input, &job.output) {
        return Err(CliError::config(
            "--input and --output must be different files",
        ));
    }

    let mode = StartMode::detect(&job.output);

    let dry_run = options.dry_run;
    let progress = BarProgress::new(source.name(), quiet);
    let stats = BatchEnricher::new(source, JsonlStore, policy, options).run(
        &job.input,
        &job.output,
        &mode,
        &progress,
    )?;
    let run_log = progress.into_log();

    crate::log_blank();
    print_summary(&stats, dry_run);

    if !dry_run && !job.no_log {
        let log_path = RunLog::path_for(&job.output);
        match run_log.write_to_file(&log_path, &stats) {
            Ok(()) => log::info!(
                "Log written to {}",
                log_path.display().if_supports_color(Stdout, |t| t.cyan()),
            ),
            Err(e) => log::warn!("Failed to write log {}: {}", log_path.display(), e),
        }
    }

    Ok(())
}

/// True when both paths name the same file, resolving links and `.`/`..`
/// when both exist.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn print_summary(stats: &EnrichStats, dry_run: bool) {
    if dry_run {
        log::info!(
            "Dry run: {} of {} records would be fetched",
            stats.selected,
            stats.total,
        );
        return;
    }

    log::info!(
        "{} {} enriched, {} already complete",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.enriched,
        stats.already_complete(),
    );
    if stats.not_found > 0 {
        log::info!(
            "  {} not found",
            stats.not_found.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    if stats.rate_limited > 0 {
        log::info!(
            "  {} still rate limited, re-run to retry",
            stats.rate_limited.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    if stats.failed > 0 {
        log::info!(
            "  {} failed",
            stats.failed.if_supports_color(Stdout, |t| t.red()),
        );
    }
    if stats.skipped_missing_id > 0 {
        log::info!(
            "  {} skipped without an IMDb id",
            stats.skipped_missing_id.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_file_sees_through_dot_segments() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("movies.jsonl");
        std::fs::write(&input, "{}\n").unwrap();

        assert!(same_file(&input, &tmp.path().join(".").join("movies.jsonl")));
        let sub = tmp.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        assert!(same_file(&input, &sub.join("..").join("movies.jsonl")));
    }

    #[test]
    fn distinct_or_missing_files_differ() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("movies.jsonl");
        std::fs::write(&input, "{}\n").unwrap();

        assert!(!same_file(&input, &tmp.path().join("enriched.jsonl")));
        assert!(same_file(&input, &input));
    }
}
