use super::types::Game;

/// Keep only games that have been played (both scores present)
pub fn completed_games(games: &[Game]) -> Vec<Game> {
    games.iter().filter(|g| g.is_completed()).cloned().collect()
}

/// Latest week with at least one completed game, 0 when nothing has been played
pub fn current_week(games: &[Game]) -> u32 {
    games
        .iter()
        .filter(|g| g.is_completed())
        .map(|g| g.week)
        .max()
        .unwrap_or(0)
}
