use std::collections::HashMap;

use crate::schedule::Game;

/// Win/loss/tie counts for one team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Compute a team's record over the completed games in `games`.
///
/// With `through_week`, only games played in that week or earlier count.
/// A team that never appears gets an all-zero record.
pub fn team_record(games: &[Game], team: &str, through_week: Option<u32>) -> Record {
    games
        .iter()
        .filter(|g| g.is_completed())
        .filter(|g| match through_week {
            Some(limit) => g.week <= limit,
            None => true,
        })
        .fold(Record::default(), |mut record, game| {
            if game.is_win_for(team) {
                record.wins += 1;
            } else if game.is_loss_for(team) {
                record.losses += 1;
            } else if game.is_tie_for(team) {
                record.ties += 1;
            }
            record
        })
}

/// Anything that can answer "what is this team's full-season record?"
///
/// Implemented by a raw game slice (recomputes on every lookup) and by
/// [`RecordBook`] (computed once per run).
pub trait RecordSource {
    fn record_of(&self, team: &str) -> Record;
}

impl RecordSource for [Game] {
    fn record_of(&self, team: &str) -> Record {
        team_record(self, team, None)
    }
}

/// Full-season records for every team, built in one pass over the games
#[derive(Debug, Clone, Default)]
pub struct RecordBook {
    records: HashMap<String, Record>,
}

impl RecordBook {
    pub fn from_games(games: &[Game]) -> Self {
        let mut records: HashMap<String, Record> = HashMap::new();
        for game in games.iter().filter(|g| g.is_completed()) {
            // A team listed on both sides still played one game
            let sides = if game.home_team == game.away_team { 1 } else { 2 };
            for team in [&game.home_team, &game.away_team].into_iter().take(sides) {
                let record = records.entry(team.clone()).or_default();
                if game.is_win_for(team) {
                    record.wins += 1;
                } else if game.is_loss_for(team) {
                    record.losses += 1;
                } else if game.is_tie_for(team) {
                    record.ties += 1;
                }
            }
        }
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for RecordBook {
    fn record_of(&self, team: &str) -> Record {
        self.records.get(team).copied().unwrap_or_default()
    }
}
