//! Hand-built schedules shared by the ranking tests.

use crate::schedule::Game;

pub fn game(week: u32, home: &str, away: &str, home_score: u32, away_score: u32) -> Game {
    Game {
        week,
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score: Some(home_score),
        away_score: Some(away_score),
        result: Some(home_score as i32 - away_score as i32),
    }
}

pub fn unplayed(week: u32, home: &str, away: &str) -> Game {
    Game {
        week,
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score: None,
        away_score: None,
        result: None,
    }
}

/// Week 1: KC beats BAL, BUF beats NYJ.
/// Week 2: KC beats BUF, BAL beats NYJ.
pub fn week_2_schedule() -> Vec<Game> {
    vec![
        game(1, "KC", "BAL", 27, 20),
        game(1, "BUF", "NYJ", 24, 17),
        game(2, "KC", "BUF", 28, 21),
        game(2, "BAL", "NYJ", 21, 14),
    ]
}

/// Four home teams play a different visitor each week; SF and LAR tie in week 2.
pub fn week_4_schedule() -> Vec<Game> {
    vec![
        game(1, "PHI", "NE", 25, 20),
        game(1, "KC", "LAC", 44, 21),
        game(1, "DAL", "NYG", 40, 0),
        game(1, "SF", "ARI", 30, 10),
        game(2, "PHI", "BUF", 34, 28),
        game(2, "KC", "CHI", 41, 10),
        game(2, "DAL", "NYJ", 30, 10),
        game(2, "SF", "LAR", 30, 30),
        game(3, "PHI", "WAS", 25, 11),
        game(3, "KC", "MIN", 28, 20),
        game(3, "DAL", "MIA", 20, 17),
        game(3, "SF", "SEA", 42, 27),
        game(4, "PHI", "TB", 25, 11),
        game(4, "KC", "DEN", 19, 8),
        game(4, "DAL", "CLE", 20, 17),
        game(4, "SF", "LV", 35, 14),
    ]
}

/// Week 1: KC ties BAL, BUF beats NYJ.
/// Week 2: KC beats BUF, BAL beats NYJ.
pub fn schedule_with_ties() -> Vec<Game> {
    vec![
        game(1, "KC", "BAL", 24, 24),
        game(1, "BUF", "NYJ", 24, 17),
        game(2, "KC", "BUF", 28, 21),
        game(2, "BAL", "NYJ", 21, 14),
    ]
}

/// Week 1 played, week 2 still to come.
pub fn schedule_incomplete() -> Vec<Game> {
    vec![
        game(1, "KC", "BAL", 27, 20),
        game(1, "BUF", "NYJ", 24, 17),
        unplayed(2, "KC", "BUF"),
        unplayed(2, "BAL", "NYJ"),
    ]
}

/// NYJ loses to KC and BAL.
pub fn schedule_no_wins() -> Vec<Game> {
    vec![game(1, "KC", "NYJ", 27, 20), game(2, "BAL", "NYJ", 21, 14)]
}

/// KC beats NYJ and BAL.
pub fn schedule_no_losses() -> Vec<Game> {
    vec![game(1, "KC", "NYJ", 27, 20), game(2, "KC", "BAL", 28, 21)]
}
