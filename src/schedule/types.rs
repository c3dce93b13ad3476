use serde::{Deserialize, Serialize};

/// Outcome of a completed game from the home team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Tie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub week: u32,
    pub home_team: String,      // Short team code, e.g. "KC"
    pub away_team: String,
    pub home_score: Option<u32>, // None until the game is played
    pub away_score: Option<u32>,
    pub result: Option<i32>,    // home_score - away_score
}

impl Game {
    /// A game counts once both scores are known
    pub fn is_completed(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    /// Signed margin for the home team, falling back to the score difference
    /// when the feed left `result` empty. The fallback saturates at the i32
    /// bounds, keeping its sign.
    pub fn margin(&self) -> Option<i32> {
        if !self.is_completed() {
            return None;
        }
        self.result.or_else(|| match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => {
                let diff = i64::from(home) - i64::from(away);
                Some(i32::try_from(diff).unwrap_or(if diff > 0 { i32::MAX } else { i32::MIN }))
            }
            _ => None,
        })
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.margin().map(|m| match m {
            m if m > 0 => Outcome::HomeWin,
            m if m < 0 => Outcome::AwayWin,
            _ => Outcome::Tie,
        })
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// The other side of the game, if `team` played in it
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.home_team == team {
            Some(self.away_team.as_str())
        } else if self.away_team == team {
            Some(self.home_team.as_str())
        } else {
            None
        }
    }

    /// True if `team` won this completed game
    pub fn is_win_for(&self, team: &str) -> bool {
        match self.outcome() {
            Some(Outcome::HomeWin) => self.home_team == team,
            Some(Outcome::AwayWin) => self.away_team == team,
            _ => false,
        }
    }

    /// True if `team` lost this completed game
    pub fn is_loss_for(&self, team: &str) -> bool {
        match self.outcome() {
            Some(Outcome::HomeWin) => self.away_team == team,
            Some(Outcome::AwayWin) => self.home_team == team,
            _ => false,
        }
    }

    pub fn is_tie_for(&self, team: &str) -> bool {
        self.outcome() == Some(Outcome::Tie) && self.involves(team)
    }
}
