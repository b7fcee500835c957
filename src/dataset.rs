//! CSV files read and written by both tools.
//!
//! Writes go to a sibling `.tmp` file that is renamed over the target once
//! complete, so a crash never leaves a half-written baseline behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use csv::{ByteRecord, StringRecord};
use serde::Serialize;
use tracing::warn;

use crate::error::ScoreError;
use crate::matches::{EnrichedBatch, Match, RawMatchRow, enrich, missing_team_column};
use crate::score::parse_goals;
use crate::team_stats::TeamStats;

pub const RAW_HEADER: [&str; 4] = ["date", "home_team", "score", "away_team"];
pub const STATS_HEADER: [&str; 6] = [
    "home_team",
    "matches_played",
    "goals_scored",
    "wins",
    "draws",
    "losses",
];
pub const MATCHES_HEADER: [&str; 6] = [
    "date",
    "home_team",
    "away_team",
    "home_score",
    "away_score",
    "winner",
];

#[derive(Debug, Serialize)]
struct MatchExportRow<'a> {
    date: &'a str,
    home_team: &'a str,
    away_team: &'a str,
    home_score: Option<u32>,
    away_score: Option<u32>,
    winner: String,
}

/// Number of data rows in a previously written file, or `None` when the
/// file does not exist yet.
pub fn read_baseline_len(path: &Path) -> Result<Option<usize>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open baseline {}", path.display()))?;
    let mut count = 0usize;
    for record in reader.byte_records() {
        record.with_context(|| format!("read baseline {}", path.display()))?;
        count += 1;
    }
    Ok(Some(count))
}

pub fn read_raw_rows(path: &Path) -> Result<Vec<RawMatchRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut out = Vec::new();
    for (idx, row) in reader.deserialize::<RawMatchRow>().enumerate() {
        out.push(row.with_context(|| format!("decode row {idx} of {}", path.display()))?);
    }
    Ok(out)
}

pub fn write_raw_rows(path: &Path, rows: &[RawMatchRow]) -> Result<()> {
    write_records(path, &RAW_HEADER, rows)
}

pub fn write_team_stats(path: &Path, stats: &[TeamStats]) -> Result<()> {
    write_records(path, &STATS_HEADER, stats)
}

pub fn write_matches(path: &Path, matches: &[Match]) -> Result<()> {
    let rows = matches
        .iter()
        .map(|m| MatchExportRow {
            date: &m.date,
            home_team: &m.home_team,
            away_team: &m.away_team,
            home_score: m.home_score,
            away_score: m.away_score,
            winner: m.winner_label(),
        })
        .collect::<Vec<_>>();
    write_records(path, &MATCHES_HEADER, &rows)
}

/// Load a match file in either the scraped shape
/// (`date,home_team,score,away_team`) or the pre-scored shape
/// (`date,home_team,away_team,home_score,away_score[,winner]`).
pub fn load_matches(path: &Path) -> Result<EnrichedBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let headers = reader
        .byte_headers()
        .map(decode_lossy)
        .with_context(|| format!("read header of {}", path.display()))?;
    let shape = FileShape::detect(&headers)
        .with_context(|| format!("unsupported column layout in {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("read row {idx} of {}", path.display()))?;
        if std::str::from_utf8(record.as_slice()).is_err() {
            warn!(row = idx, path = %path.display(), "row is not valid utf-8; decoded lossily");
        }
        records.push(decode_lossy(&record));
    }

    Ok(match shape {
        FileShape::Raw(cols) => {
            let rows = records.iter().map(|r| cols.raw_row(r)).collect::<Vec<_>>();
            enrich(&rows)
        }
        FileShape::Scored(cols) => scored_batch(&cols, &records),
    })
}

#[derive(Debug, Clone, Copy)]
struct RawColumns {
    date: Option<usize>,
    home_team: usize,
    score: usize,
    away_team: usize,
}

impl RawColumns {
    fn raw_row(&self, record: &StringRecord) -> RawMatchRow {
        RawMatchRow {
            date: field(record, self.date),
            home_team: field(record, Some(self.home_team)),
            score: field(record, Some(self.score)),
            away_team: field(record, Some(self.away_team)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ScoredColumns {
    date: Option<usize>,
    home_team: usize,
    away_team: usize,
    home_score: usize,
    away_score: usize,
}

#[derive(Debug, Clone, Copy)]
enum FileShape {
    Raw(RawColumns),
    Scored(ScoredColumns),
}

impl FileShape {
    fn detect(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let home_team = find("home_team").ok_or_else(|| anyhow!("missing home_team column"))?;
        let away_team = find("away_team").ok_or_else(|| anyhow!("missing away_team column"))?;
        let date = find("date");

        if let Some(score) = find("score") {
            return Ok(Self::Raw(RawColumns {
                date,
                home_team,
                score,
                away_team,
            }));
        }
        match (find("home_score"), find("away_score")) {
            (Some(home_score), Some(away_score)) => Ok(Self::Scored(ScoredColumns {
                date,
                home_team,
                away_team,
                home_score,
                away_score,
            })),
            _ => Err(anyhow!(
                "expected a score column or home_score/away_score columns"
            )),
        }
    }
}

fn scored_batch(cols: &ScoredColumns, records: &[StringRecord]) -> EnrichedBatch {
    let mut batch = EnrichedBatch {
        matches: Vec::with_capacity(records.len()),
        issues: Vec::new(),
    };
    for (idx, record) in records.iter().enumerate() {
        let home_team = field(record, Some(cols.home_team));
        let away_team = field(record, Some(cols.away_team));
        let home_raw = field(record, Some(cols.home_score));
        let away_raw = field(record, Some(cols.away_score));
        let raw_score = format!("{} - {}", home_raw.trim(), away_raw.trim());

        let mut home_score = None;
        let mut away_score = None;
        if let Some(column) = missing_team_column(&home_team, &away_team) {
            batch.push_issue(idx, &raw_score, ScoreError::MissingTeam { column });
        } else {
            match (
                parse_goals(&raw_score, &home_raw),
                parse_goals(&raw_score, &away_raw),
            ) {
                (Ok(h), Ok(a)) => {
                    home_score = Some(h);
                    away_score = Some(a);
                }
                (Err(err), _) | (_, Err(err)) => batch.push_issue(idx, &raw_score, err),
            }
        }

        batch.matches.push(Match {
            date: field(record, cols.date).trim().to_string(),
            home_team: home_team.trim().to_string(),
            away_team: away_team.trim().to_string(),
            raw_score,
            home_score,
            away_score,
        });
    }
    batch
}

/// Text fields from a byte record, with invalid UTF-8 replaced by U+FFFD.
fn decode_lossy(record: &ByteRecord) -> StringRecord {
    record
        .iter()
        .map(|f| String::from_utf8_lossy(f).into_owned())
        .collect::<Vec<_>>()
        .into()
}

fn field(record: &StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i))
        .unwrap_or_default()
        .to_string()
}

fn write_records<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let tmp = tmp_path(path);
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .with_context(|| format!("create {}", tmp.display()))?;
        writer.write_record(header).context("write csv header")?;
        for (idx, row) in rows.iter().enumerate() {
            writer
                .serialize(row)
                .with_context(|| format!("write row {idx}"))?;
        }
        writer.flush().with_context(|| format!("flush {}", tmp.display()))?;
    }
    fs::rename(&tmp, path).with_context(|| format!("swap {} into place", path.display()))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::tmp_path;
    use std::path::Path;

    #[test]
    fn tmp_path_is_sibling() {
        assert_eq!(
            tmp_path(Path::new("out/matches.csv")),
            Path::new("out/matches.csv.tmp")
        );
    }
}
