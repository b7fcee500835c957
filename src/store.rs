use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, params};
use tracing::info;

use crate::error::PersistError;
use crate::matches::RawMatchRow;
use crate::outcome::classify;
use crate::score::parse_score;

const APP_DIR: &str = "foot_stats";
const DB_FILE: &str = "matches.sqlite";

/// Relational sink for scraped rows.
pub trait MatchStore {
    /// Store `rows` for `country`, returning how many were written.
    fn persist(&mut self, country: &str, rows: &[RawMatchRow]) -> Result<usize, PersistError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub country: String,
    pub date: String,
    pub home_team: String,
    pub score: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub outcome: Option<String>,
}

pub struct SqliteStore {
    conn: Connection,
}

pub fn default_db_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_DATA_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(APP_DIR).join(DB_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR)
            .join(DB_FILE),
    )
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, PersistError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| PersistError::Directory {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, PersistError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn load_rows(&self, country: &str) -> Result<Vec<StoredRow>, PersistError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT country, date, home_team, score, away_team,
                   home_score, away_score, outcome
            FROM matches
            WHERE country = ?1
            ORDER BY id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![country], |row| {
            Ok(StoredRow {
                country: row.get(0)?,
                date: row.get(1)?,
                home_team: row.get(2)?,
                score: row.get(3)?,
                away_team: row.get(4)?,
                home_score: row.get(5)?,
                away_score: row.get(6)?,
                outcome: row.get(7)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Number of recorded scrape runs for `country`.
    pub fn run_count(&self, country: &str) -> Result<usize, PersistError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM scrape_runs WHERE country = ?1",
            params![country],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl MatchStore for SqliteStore {
    fn persist(&mut self, country: &str, rows: &[RawMatchRow]) -> Result<usize, PersistError> {
        let started_at = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        let mut written = 0usize;
        for row in rows {
            upsert_row(&tx, country, row)?;
            written += 1;
        }
        tx.execute(
            "INSERT INTO scrape_runs(country, started_at, finished_at, rows_written)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                country,
                started_at,
                Utc::now().to_rfc3339(),
                written as i64
            ],
        )?;
        tx.commit()?;
        info!(country, rows = written, "rows saved to database");
        Ok(written)
    }
}

pub fn init_schema(conn: &Connection) -> Result<(), PersistError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS matches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            country TEXT NOT NULL,
            date TEXT NOT NULL,
            home_team TEXT NOT NULL,
            score TEXT NOT NULL,
            away_team TEXT NOT NULL,
            home_score INTEGER NULL,
            away_score INTEGER NULL,
            outcome TEXT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(country, date, home_team, away_team)
        );
        CREATE INDEX IF NOT EXISTS idx_matches_country ON matches(country);

        CREATE TABLE IF NOT EXISTS scrape_runs (
            run_id INTEGER PRIMARY KEY AUTOINCREMENT,
            country TEXT NOT NULL,
            started_at TEXT NOT NULL,
            finished_at TEXT NOT NULL,
            rows_written INTEGER NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn upsert_row(
    tx: &rusqlite::Transaction<'_>,
    country: &str,
    row: &RawMatchRow,
) -> Result<(), PersistError> {
    let parsed = parse_score(&row.score).ok();
    let home_score = parsed.map(|(h, _)| h);
    let away_score = parsed.map(|(_, a)| a);
    let outcome = classify(home_score, away_score)
        .code()
        .map(|c| c.to_string());

    tx.execute(
        r#"
        INSERT INTO matches (
            country, date, home_team, score, away_team,
            home_score, away_score, outcome, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(country, date, home_team, away_team) DO UPDATE SET
            score = excluded.score,
            home_score = excluded.home_score,
            away_score = excluded.away_score,
            outcome = excluded.outcome,
            updated_at = excluded.updated_at
        "#,
        params![
            country,
            row.date.trim(),
            row.home_team.trim(),
            row.score,
            row.away_team.trim(),
            home_score,
            away_score,
            outcome,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}
