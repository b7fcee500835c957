//! One scrape run: FETCH -> PARSE -> PERSIST -> DIFF -> (NOTIFY | SKIP).
//!
//! Only a failed fetch ends the run early. Every later step reports its own
//! failure in [`RunReport`] and the run carries on.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::dataset::{read_baseline_len, write_raw_rows};
use crate::diff::RowDelta;
use crate::matches::{RawMatchRow, enrich};
use crate::notify::{Notifier, new_rows_message};
use crate::scrape::MatchSource;
use crate::store::MatchStore;

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub country: String,
    pub output: PathBuf,
    pub save_to_db: bool,
    pub send_email: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done(usize),
    /// Not requested on the command line.
    Disabled,
    /// Requested, but there were no new rows.
    Skipped,
    Failed(String),
}

impl StepOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done(n) => write!(f, "done ({n})"),
            Self::Disabled => write!(f, "disabled"),
            Self::Skipped => write!(f, "skipped (no new rows)"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub fetched: usize,
    pub issues: usize,
    pub csv: StepOutcome,
    pub delta: RowDelta,
    pub database: StepOutcome,
    pub notification: StepOutcome,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.csv.is_failed() || self.database.is_failed() || self.notification.is_failed()
    }
}

pub fn run_scrape(
    opts: &ScrapeOptions,
    source: &dyn MatchSource,
    store: Option<&mut dyn MatchStore>,
    notifier: Option<&dyn Notifier>,
) -> Result<RunReport> {
    let baseline = match read_baseline_len(&opts.output) {
        Ok(len) => len,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "baseline unreadable; treating it as empty");
            None
        }
    };

    let rows = source
        .fetch(&opts.country)
        .with_context(|| format!("fetch failed for {}", opts.country))?;
    info!(country = %opts.country, rows = rows.len(), "fetched match rows");

    let batch = enrich(&rows);
    if !batch.issues.is_empty() {
        warn!(issues = batch.issues.len(), "some rows have unusable scores");
    }

    let csv = match write_raw_rows(&opts.output, &rows) {
        Ok(()) => {
            info!(path = %opts.output.display(), rows = rows.len(), "results file written");
            StepOutcome::Done(rows.len())
        }
        Err(err) => {
            let msg = format!("{err:#}");
            error!(path = %opts.output.display(), error = %msg, "results file not written");
            StepOutcome::Failed(msg)
        }
    };

    let delta = RowDelta::new(baseline, rows.len());
    let (database, notification) = if delta.has_new_rows() {
        info!(added = delta.added(), "new rows detected");
        let database = save_rows(opts, store, &rows);
        let notification = send_notification(opts, notifier, &delta);
        (database, notification)
    } else {
        info!(rows = delta.fetched, "no new rows; downstream actions skipped");
        (
            skipped_unless_disabled(opts.save_to_db),
            skipped_unless_disabled(opts.send_email),
        )
    };

    Ok(RunReport {
        fetched: rows.len(),
        issues: batch.issues.len(),
        csv,
        delta,
        database,
        notification,
    })
}

fn save_rows(
    opts: &ScrapeOptions,
    store: Option<&mut dyn MatchStore>,
    rows: &[RawMatchRow],
) -> StepOutcome {
    if !opts.save_to_db {
        return StepOutcome::Disabled;
    }
    let Some(store) = store else {
        error!("database save requested but no store is available");
        return StepOutcome::Failed("no database available".to_string());
    };
    match store.persist(&opts.country, rows) {
        Ok(n) => StepOutcome::Done(n),
        Err(err) => {
            error!(error = %err, "database save failed");
            StepOutcome::Failed(err.to_string())
        }
    }
}

fn send_notification(
    opts: &ScrapeOptions,
    notifier: Option<&dyn Notifier>,
    delta: &RowDelta,
) -> StepOutcome {
    if !opts.send_email {
        return StepOutcome::Disabled;
    }
    let Some(notifier) = notifier else {
        error!("notification requested but no transport is available");
        return StepOutcome::Failed("no notification transport available".to_string());
    };
    let (subject, body) = new_rows_message(&opts.country, delta);
    match notifier.send(&subject, &body) {
        Ok(()) => StepOutcome::Done(1),
        Err(err) => {
            error!(error = %err, "notification failed");
            StepOutcome::Failed(err.to_string())
        }
    }
}

fn skipped_unless_disabled(requested: bool) -> StepOutcome {
    if requested {
        StepOutcome::Skipped
    } else {
        StepOutcome::Disabled
    }
}
