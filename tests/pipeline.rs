use std::cell::RefCell;
use std::fs;
use std::path::Path;

use foot_stats::dataset::{read_raw_rows, write_raw_rows};
use foot_stats::error::{FetchError, NotifyError, PersistError};
use foot_stats::matches::RawMatchRow;
use foot_stats::notify::Notifier;
use foot_stats::pipeline::{ScrapeOptions, StepOutcome, run_scrape};
use foot_stats::scrape::MatchSource;
use foot_stats::store::{MatchStore, SqliteStore};

struct FixedSource(Vec<RawMatchRow>);

impl MatchSource for FixedSource {
    fn fetch(&self, _country: &str) -> Result<Vec<RawMatchRow>, FetchError> {
        Ok(self.0.clone())
    }
}

struct DownSource;

impl MatchSource for DownSource {
    fn fetch(&self, _country: &str) -> Result<Vec<RawMatchRow>, FetchError> {
        Err(FetchError::Status {
            url: "https://results.example/England".to_string(),
            status: 503,
        })
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: RefCell<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.sent
            .borrow_mut()
            .push((subject.to_string(), body.to_string()));
        Ok(())
    }
}

struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send(&self, _subject: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Status(500))
    }
}

struct FailingStore;

impl MatchStore for FailingStore {
    fn persist(&mut self, _country: &str, _rows: &[RawMatchRow]) -> Result<usize, PersistError> {
        Err(PersistError::Sqlite(rusqlite::Error::InvalidQuery))
    }
}

fn fixture_rows(n: usize) -> Vec<RawMatchRow> {
    (0..n)
        .map(|i| {
            RawMatchRow::new(
                &format!("{:02}/08/2023", i + 1),
                &format!("Home {i}"),
                "1 - 0",
                &format!("Away {i}"),
            )
        })
        .collect()
}

fn options(output: &Path) -> ScrapeOptions {
    ScrapeOptions {
        country: "England".to_string(),
        output: output.to_path_buf(),
        save_to_db: true,
        send_email: true,
    }
}

#[test]
fn identical_refetch_skips_downstream_actions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("matches.csv");
    write_raw_rows(&output, &fixture_rows(10)).expect("seed baseline");

    let mut store = SqliteStore::open_in_memory().expect("store");
    let notifier = RecordingNotifier::default();
    let report = run_scrape(
        &options(&output),
        &FixedSource(fixture_rows(10)),
        Some(&mut store),
        Some(&notifier),
    )
    .expect("run");

    assert!(!report.delta.has_new_rows());
    assert_eq!(report.csv, StepOutcome::Done(10));
    assert_eq!(report.database, StepOutcome::Skipped);
    assert_eq!(report.notification, StepOutcome::Skipped);
    assert!(notifier.sent.borrow().is_empty());
    assert!(store.load_rows("England").expect("load").is_empty());
}

#[test]
fn grown_dataset_saves_and_notifies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("matches.csv");
    write_raw_rows(&output, &fixture_rows(10)).expect("seed baseline");

    let mut store = SqliteStore::open_in_memory().expect("store");
    let notifier = RecordingNotifier::default();
    let report = run_scrape(
        &options(&output),
        &FixedSource(fixture_rows(12)),
        Some(&mut store),
        Some(&notifier),
    )
    .expect("run");

    assert!(report.delta.has_new_rows());
    assert_eq!(report.delta.added(), 2);
    assert_eq!(report.database, StepOutcome::Done(12));
    assert_eq!(report.notification, StepOutcome::Done(1));
    assert!(!report.has_failures());

    let sent = notifier.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "New match data available");
    assert!(sent[0].1.contains("2 new match row(s)"));
    assert_eq!(read_raw_rows(&output).expect("csv").len(), 12);
    assert_eq!(store.load_rows("England").expect("load").len(), 12);
}

#[test]
fn first_run_counts_everything_as_new() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("matches.csv");
    let opts = ScrapeOptions {
        save_to_db: false,
        send_email: false,
        ..options(&output)
    };

    let report = run_scrape(&opts, &FixedSource(fixture_rows(3)), None, None).expect("run");
    assert_eq!(report.delta.baseline, 0);
    assert!(report.delta.has_new_rows());
    assert_eq!(report.database, StepOutcome::Disabled);
    assert_eq!(report.notification, StepOutcome::Disabled);
    assert!(output.exists());
}

#[test]
fn fetch_failure_ends_run_and_keeps_baseline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("matches.csv");
    write_raw_rows(&output, &fixture_rows(4)).expect("seed baseline");
    let before = fs::read(&output).expect("read");

    let err = run_scrape(&options(&output), &DownSource, None, None).expect_err("fetch fails");
    assert!(format!("{err:#}").contains("503"));
    assert_eq!(fs::read(&output).expect("read"), before);
}

#[test]
fn downstream_failures_are_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("matches.csv");

    let mut store = FailingStore;
    let report = run_scrape(
        &options(&output),
        &FixedSource(fixture_rows(2)),
        Some(&mut store),
        Some(&FailingNotifier),
    )
    .expect("run still completes");

    assert_eq!(report.csv, StepOutcome::Done(2));
    assert!(report.database.is_failed());
    assert!(report.notification.is_failed());
    assert!(report.has_failures());
    assert_eq!(read_raw_rows(&output).expect("csv").len(), 2);
}

#[test]
fn bad_scores_are_counted_but_still_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("matches.csv");
    let mut rows = fixture_rows(2);
    rows.push(RawMatchRow::new("03/08/2023", "Leeds", "abc - 1", "Hull"));
    let opts = ScrapeOptions {
        save_to_db: false,
        send_email: false,
        ..options(&output)
    };

    let report = run_scrape(&opts, &FixedSource(rows), None, None).expect("run");
    assert_eq!(report.fetched, 3);
    assert_eq!(report.issues, 1);
    assert_eq!(read_raw_rows(&output).expect("csv").len(), 3);
}

#[test]
fn csv_write_failure_still_diffs_saves_and_notifies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").expect("write blocker");
    let output = blocker.join("matches.csv");

    let mut store = SqliteStore::open_in_memory().expect("store");
    let notifier = RecordingNotifier::default();
    let report = run_scrape(
        &options(&output),
        &FixedSource(fixture_rows(3)),
        Some(&mut store),
        Some(&notifier),
    )
    .expect("run still completes");

    assert!(report.csv.is_failed());
    assert!(report.delta.has_new_rows());
    assert_eq!(report.database, StepOutcome::Done(3));
    assert_eq!(report.notification, StepOutcome::Done(1));
    assert_eq!(notifier.sent.borrow().len(), 1);
    assert!(report.has_failures());
    assert_eq!(store.load_rows("England").expect("load").len(), 3);
}

#[test]
fn unreadable_baseline_counts_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A directory where the results file should be: opening succeeds, reading does not.
    let output = dir.path().join("matches.csv");
    fs::create_dir(&output).expect("mkdir");

    let notifier = RecordingNotifier::default();
    let opts = ScrapeOptions {
        save_to_db: false,
        ..options(&output)
    };
    let report = run_scrape(&opts, &FixedSource(fixture_rows(2)), None, Some(&notifier))
        .expect("run still completes");

    assert_eq!(report.delta.baseline, 0);
    assert_eq!(report.delta.added(), 2);
    assert_eq!(report.database, StepOutcome::Disabled);
    assert_eq!(report.notification, StepOutcome::Done(1));
    assert!(report.csv.is_failed());
}
