use clap::ValueEnum;

use crate::team_stats::TeamStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum PlotType {
    #[default]
    All,
    Percentage,
    TotalGoals,
}

impl PlotType {
    pub fn includes_percentage(self) -> bool {
        matches!(self, Self::All | Self::Percentage)
    }

    pub fn includes_total_goals(self) -> bool {
        matches!(self, Self::All | Self::TotalGoals)
    }
}

/// Win/draw/loss split for one team, in percent of matches played.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeShare {
    pub team: String,
    pub played: u32,
    pub win_pct: f64,
    pub draw_pct: f64,
    pub loss_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringProfile {
    pub team: String,
    pub total_goals: u32,
    pub avg_goals: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSet {
    pub shares: Option<Vec<OutcomeShare>>,
    pub scoring: Option<Vec<ScoringProfile>>,
}

impl ChartSet {
    pub fn build(stats: &[TeamStats], plot: PlotType) -> Self {
        Self {
            shares: plot.includes_percentage().then(|| outcome_shares(stats)),
            scoring: plot.includes_total_goals().then(|| scoring_profile(stats)),
        }
    }
}

pub fn outcome_shares(stats: &[TeamStats]) -> Vec<OutcomeShare> {
    stats
        .iter()
        .map(|s| OutcomeShare {
            team: s.team.clone(),
            played: s.matches_played,
            win_pct: s.win_rate() * 100.0,
            draw_pct: s.draw_rate() * 100.0,
            loss_pct: s.loss_rate() * 100.0,
        })
        .collect()
}

pub fn scoring_profile(stats: &[TeamStats]) -> Vec<ScoringProfile> {
    stats
        .iter()
        .map(|s| ScoringProfile {
            team: s.team.clone(),
            total_goals: s.goals_scored,
            avg_goals: s.avg_goals(),
        })
        .collect()
}
