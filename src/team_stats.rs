//! Per-team aggregates folded from a match list.
//!
//! Every scored match is visited once and credited to both of its sides.
//! The result is recomputed from scratch on each call; nothing is updated in
//! place between runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matches::Match;
use crate::outcome::MatchOutcome;

/// Aggregate record for one team. `losses` always equals
/// `matches_played - wins - draws`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    #[serde(rename = "home_team")]
    pub team: String,
    pub matches_played: u32,
    pub goals_scored: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl TeamStats {
    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.matches_played)
    }

    pub fn draw_rate(&self) -> f64 {
        ratio(self.draws, self.matches_played)
    }

    pub fn loss_rate(&self) -> f64 {
        ratio(self.losses, self.matches_played)
    }

    pub fn avg_goals(&self) -> f64 {
        ratio(self.goals_scored, self.matches_played)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    played: u32,
    goals: u32,
    wins: u32,
    draws: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

impl Tally {
    fn record(&mut self, side: Side, goals: u32, outcome: MatchOutcome) {
        self.played += 1;
        self.goals += goals;
        match (outcome, side) {
            (MatchOutcome::HomeWin, Side::Home) | (MatchOutcome::AwayWin, Side::Away) => {
                self.wins += 1
            }
            (MatchOutcome::Draw, _) => self.draws += 1,
            _ => {}
        }
    }

    fn into_stats(self, team: String) -> TeamStats {
        TeamStats {
            team,
            matches_played: self.played,
            goals_scored: self.goals,
            wins: self.wins,
            draws: self.draws,
            losses: self.played - self.wins - self.draws,
        }
    }
}

/// One row per team that appears in at least one scored match, ordered by
/// team name.
pub fn compute_team_stats(matches: &[Match]) -> Vec<TeamStats> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for m in matches {
        if !m.is_scored() {
            continue;
        }
        let (Some(home_goals), Some(away_goals)) = (m.home_score, m.away_score) else {
            continue;
        };
        let outcome = m.outcome();
        tallies
            .entry(m.home_team.as_str())
            .or_default()
            .record(Side::Home, home_goals, outcome);
        tallies
            .entry(m.away_team.as_str())
            .or_default()
            .record(Side::Away, away_goals, outcome);
    }

    tallies
        .into_iter()
        .map(|(team, tally)| tally.into_stats(team.to_string()))
        .collect()
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}
