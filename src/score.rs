use crate::error::ScoreError;

const UNKNOWN_TOKEN: &str = "?";

/// Largest goal count accepted for one side; larger tokens are parse errors.
pub const MAX_GOALS: u32 = 999;

/// Parse a scoreline such as `"2 - 1"` or `"2:1"` into `(home, away)`.
///
/// A bare `?` token stands for a goal count the source did not publish and
/// is read as `0`.
pub fn parse_score(raw: &str) -> Result<(u32, u32), ScoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScoreError::Schema {
            raw: raw.to_string(),
            parts: 0,
        });
    }

    let parts = trimmed.split(['-', ':']).collect::<Vec<_>>();
    let [home, away] = parts.as_slice() else {
        return Err(ScoreError::Schema {
            raw: raw.to_string(),
            parts: parts.len(),
        });
    };

    Ok((parse_goals(raw, home)?, parse_goals(raw, away)?))
}

/// Convert one side of a score. Also used for pre-split `home_score` /
/// `away_score` columns.
pub fn parse_goals(raw: &str, token: &str) -> Result<u32, ScoreError> {
    let token = token.trim();
    if token == UNKNOWN_TOKEN {
        return Ok(0);
    }
    match token.parse::<u32>() {
        Ok(goals) if goals <= MAX_GOALS => Ok(goals),
        _ => Err(ScoreError::Parse {
            raw: raw.to_string(),
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_and_spacing() {
        assert_eq!(parse_score("2 - 1"), Ok((2, 1)));
        assert_eq!(parse_score("2-1"), Ok((2, 1)));
        assert_eq!(parse_score(" 0:0 "), Ok((0, 0)));
        assert_eq!(parse_score("10 : 3"), Ok((10, 3)));
    }

    #[test]
    fn question_mark_is_zero() {
        assert_eq!(parse_score("? - 3"), Ok((0, 3)));
        assert_eq!(parse_score("? - ?"), Ok((0, 0)));
    }

    #[test]
    fn wrong_part_count_is_schema_error() {
        assert_eq!(
            parse_score("3"),
            Err(ScoreError::Schema {
                raw: "3".to_string(),
                parts: 1
            })
        );
        assert!(matches!(
            parse_score("1 - 2 - 3"),
            Err(ScoreError::Schema { parts: 3, .. })
        ));
        assert!(matches!(
            parse_score("   "),
            Err(ScoreError::Schema { parts: 0, .. })
        ));
    }

    #[test]
    fn bad_token_names_offender() {
        let err = parse_score("abc - 1").unwrap_err();
        assert_eq!(
            err,
            ScoreError::Parse {
                raw: "abc - 1".to_string(),
                token: "abc".to_string()
            }
        );
        assert!(!err.is_schema());
        assert!(matches!(
            parse_score("2 - "),
            Err(ScoreError::Parse { token, .. }) if token.is_empty()
        ));
    }

    #[test]
    fn implausible_goal_counts_are_rejected() {
        assert_eq!(parse_score("999 - 0"), Ok((999, 0)));
        assert_eq!(
            parse_score("4000000000 - 0"),
            Err(ScoreError::Parse {
                raw: "4000000000 - 0".to_string(),
                token: "4000000000".to_string()
            })
        );
        assert!(matches!(
            parse_goals("1000", "1000"),
            Err(ScoreError::Parse { .. })
        ));
    }
}
