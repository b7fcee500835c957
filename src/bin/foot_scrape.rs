use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::error;

use foot_stats::config::AppConfig;
use foot_stats::logging::init_logging;
use foot_stats::notify::{Notifier, WebhookNotifier};
use foot_stats::pipeline::{ScrapeOptions, StepOutcome, run_scrape};
use foot_stats::scrape::HtmlTableSource;
use foot_stats::store::{MatchStore, SqliteStore, default_db_path};

/// Fetch and save match data from the results website.
#[derive(Debug, Parser)]
#[command(name = "foot_scrape", version)]
struct Cli {
    /// Country whose results table to fetch
    #[arg(short = 'c', long, default_value = "England")]
    country: String,

    /// Results CSV, also the baseline for new-row detection
    #[arg(short = 'o', long, default_value = "matches.csv")]
    output: PathBuf,

    /// Save the rows to the SQLite database when new rows were found
    #[arg(short = 's', long = "save-to-db")]
    save_to_db: bool,

    /// Send a notification when new rows were found
    #[arg(short = 'e', long = "send-email")]
    send_email: bool,

    /// SQLite file (overrides FOOT_DB_PATH)
    #[arg(long)]
    db: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cfg = AppConfig::from_env();
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let source = HtmlTableSource::from_config(&cfg);

    let mut store = if cli.save_to_db {
        open_store(cli.db.clone().or_else(|| cfg.db_path.clone()))
    } else {
        None
    };

    let notifier = if cli.send_email {
        match WebhookNotifier::from_config(&cfg) {
            Ok(n) => Some(n),
            Err(err) => {
                error!(error = %err, "notifications unavailable");
                None
            }
        }
    } else {
        None
    };

    let opts = ScrapeOptions {
        country: cli.country,
        output: cli.output,
        save_to_db: cli.save_to_db,
        send_email: cli.send_email,
    };

    let report = run_scrape(
        &opts,
        &source,
        store.as_mut().map(|s| s as &mut dyn MatchStore),
        notifier.as_ref().map(|n| n as &dyn Notifier),
    )?;

    println!("Country: {}", opts.country);
    println!("Rows fetched: {} ({} with unusable scores)", report.fetched, report.issues);
    println!("CSV {}: {}", opts.output.display(), report.csv);
    println!(
        "Baseline: {} -> {} ({} new)",
        report.delta.baseline,
        report.delta.fetched,
        report.delta.added()
    );
    println!("Database: {}", report.database);
    println!("Notification: {}", report.notification);

    if report.has_failures() {
        let failed = [
            ("csv", &report.csv),
            ("database", &report.database),
            ("notification", &report.notification),
        ]
        .into_iter()
        .filter(|(_, outcome)| matches!(outcome, StepOutcome::Failed(_)))
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
        return Err(anyhow!("run finished with failed steps: {}", failed.join(", ")));
    }
    Ok(())
}

fn open_store(path: Option<PathBuf>) -> Option<SqliteStore> {
    let opened = path
        .or_else(default_db_path)
        .context("unable to resolve sqlite path")
        .and_then(|path| {
            SqliteStore::open(&path).with_context(|| format!("open sqlite db {}", path.display()))
        });
    match opened {
        Ok(store) => Some(store),
        Err(err) => {
            error!(error = %format!("{err:#}"), "database unavailable");
            None
        }
    }
}
