use tracing::trace;

use super::record::RecordSource;
use crate::schedule::Game;

/// Win percentage with ties counted as half a win.
/// Returns 0.0 for a team that has not played.
pub fn win_pct(wins: u32, losses: u32, ties: u32) -> f64 {
    let total_games = wins + losses + ties;
    if total_games == 0 {
        return 0.0;
    }
    (wins as f64 + 0.5 * ties as f64) / total_games as f64
}

/// Sum of the current win totals of every opponent `team` has beaten
pub fn weighted_wins(games: &[Game], team: &str) -> f64 {
    weighted_wins_with(games, team, games)
}

/// Negative sum of the current loss totals of every opponent `team` lost to
pub fn weighted_losses(games: &[Game], team: &str) -> f64 {
    weighted_losses_with(games, team, games)
}

/// [`weighted_wins`] with opponent records taken from `records`
pub fn weighted_wins_with<S>(games: &[Game], team: &str, records: &S) -> f64
where
    S: RecordSource + ?Sized,
{
    let mut weighted = 0.0;
    for game in games.iter().filter(|g| g.is_win_for(team)) {
        if let Some(opponent) = game.opponent_of(team) {
            weighted += records.record_of(opponent).wins as f64;
        }
    }
    trace!("{} weighted wins: {}", team, weighted);
    weighted
}

/// [`weighted_losses`] with opponent records taken from `records`.
///
/// The penalty is the opponent's loss count, not its win count.
pub fn weighted_losses_with<S>(games: &[Game], team: &str, records: &S) -> f64
where
    S: RecordSource + ?Sized,
{
    let mut weighted = 0.0;
    for game in games.iter().filter(|g| g.is_loss_for(team)) {
        if let Some(opponent) = game.opponent_of(team) {
            weighted -= records.record_of(opponent).losses as f64;
        }
    }
    trace!("{} weighted losses: {}", team, weighted);
    weighted
}

/// Ranking key: weighted wins plus (non-positive) weighted losses
pub fn total_score(weighted_wins: f64, weighted_losses: f64) -> f64 {
    weighted_wins + weighted_losses
}
