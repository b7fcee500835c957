use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
    Unknown,
}

pub fn classify(home_score: Option<u32>, away_score: Option<u32>) -> MatchOutcome {
    let (Some(home), Some(away)) = (home_score, away_score) else {
        return MatchOutcome::Unknown;
    };
    match home.cmp(&away) {
        Ordering::Greater => MatchOutcome::HomeWin,
        Ordering::Less => MatchOutcome::AwayWin,
        Ordering::Equal => MatchOutcome::Draw,
    }
}

impl MatchOutcome {
    /// Single-letter code stored alongside persisted rows.
    pub fn code(self) -> Option<char> {
        match self {
            Self::HomeWin => Some('H'),
            Self::AwayWin => Some('A'),
            Self::Draw => Some('D'),
            Self::Unknown => None,
        }
    }

    /// Value of the `winner` column: the winning team, `draw`, or empty.
    pub fn winner_label(self, home_team: &str, away_team: &str) -> String {
        match self {
            Self::HomeWin => home_team.to_string(),
            Self::AwayWin => away_team.to_string(),
            Self::Draw => "draw".to_string(),
            Self::Unknown => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_numeric_comparison() {
        assert_eq!(classify(Some(2), Some(1)), MatchOutcome::HomeWin);
        assert_eq!(classify(Some(0), Some(3)), MatchOutcome::AwayWin);
        assert_eq!(classify(Some(1), Some(1)), MatchOutcome::Draw);
        assert_eq!(classify(None, Some(1)), MatchOutcome::Unknown);
        assert_eq!(classify(Some(1), None), MatchOutcome::Unknown);
    }

    #[test]
    fn winner_label_and_code() {
        assert_eq!(MatchOutcome::HomeWin.winner_label("Leeds", "Hull"), "Leeds");
        assert_eq!(MatchOutcome::AwayWin.winner_label("Leeds", "Hull"), "Hull");
        assert_eq!(MatchOutcome::Draw.winner_label("Leeds", "Hull"), "draw");
        assert_eq!(MatchOutcome::Unknown.winner_label("Leeds", "Hull"), "");
        assert_eq!(MatchOutcome::Draw.code(), Some('D'));
        assert_eq!(MatchOutcome::Unknown.code(), None);
    }
}
