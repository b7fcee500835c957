use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RowIssue, ScoreError};
use crate::outcome::{MatchOutcome, classify};
use crate::score::parse_score;

/// One scraped results-table row, exactly as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatchRow {
    pub date: String,
    pub home_team: String,
    pub score: String,
    pub away_team: String,
}

impl RawMatchRow {
    pub fn new(date: &str, home_team: &str, score: &str, away_team: &str) -> Self {
        Self {
            date: date.to_string(),
            home_team: home_team.to_string(),
            score: score.to_string(),
            away_team: away_team.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub raw_score: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl Match {
    pub fn outcome(&self) -> MatchOutcome {
        classify(self.home_score, self.away_score)
    }

    /// Whether the match can feed numeric aggregates.
    pub fn is_scored(&self) -> bool {
        self.home_score.is_some()
            && self.away_score.is_some()
            && !self.home_team.trim().is_empty()
            && !self.away_team.trim().is_empty()
    }

    pub fn winner_label(&self) -> String {
        self.outcome().winner_label(&self.home_team, &self.away_team)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnrichedBatch {
    pub matches: Vec<Match>,
    pub issues: Vec<RowIssue>,
}

impl EnrichedBatch {
    pub fn scored_len(&self) -> usize {
        self.matches.iter().filter(|m| m.is_scored()).count()
    }

    /// Record a row-scoped failure. The row keeps its place in `matches`.
    pub fn push_issue(&mut self, row: usize, raw_score: &str, error: ScoreError) {
        warn!(row, raw = raw_score, error = %error, "row excluded from aggregates");
        self.issues.push(RowIssue {
            row,
            raw_score: raw_score.to_string(),
            error,
        });
    }
}

pub fn enrich(rows: &[RawMatchRow]) -> EnrichedBatch {
    let mut batch = EnrichedBatch {
        matches: Vec::with_capacity(rows.len()),
        issues: Vec::new(),
    };

    for (idx, row) in rows.iter().enumerate() {
        let mut home_score = None;
        let mut away_score = None;

        if let Some(column) = missing_team_column(&row.home_team, &row.away_team) {
            batch.push_issue(idx, &row.score, ScoreError::MissingTeam { column });
        } else {
            match parse_score(&row.score) {
                Ok((home, away)) => {
                    home_score = Some(home);
                    away_score = Some(away);
                }
                Err(err) => batch.push_issue(idx, &row.score, err),
            }
        }

        batch.matches.push(Match {
            date: row.date.trim().to_string(),
            home_team: row.home_team.trim().to_string(),
            away_team: row.away_team.trim().to_string(),
            raw_score: row.score.clone(),
            home_score,
            away_score,
        });
    }

    batch
}

pub fn missing_team_column(home_team: &str, away_team: &str) -> Option<&'static str> {
    if home_team.trim().is_empty() {
        Some("home_team")
    } else if away_team.trim().is_empty() {
        Some("away_team")
    } else {
        None
    }
}
