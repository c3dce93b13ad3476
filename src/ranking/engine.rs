use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

use super::record::{team_record, RecordBook};
use super::score::{total_score, weighted_losses_with, weighted_wins_with, win_pct};
use crate::schedule::Game;

/// One team's line in the power ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRanking {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_pct: f64,
    pub weighted_wins: f64,
    pub weighted_losses: f64, // Always <= 0
    pub total: f64,
}

/// Every team that appears in at least one completed game, in lexicographic order
pub fn ranked_teams(games: &[Game]) -> BTreeSet<&str> {
    games
        .iter()
        .filter(|g| g.is_completed())
        .flat_map(|g| [g.home_team.as_str(), g.away_team.as_str()])
        .collect()
}

/// Score a single team against the season's games
fn rank_team(games: &[Game], team: &str, book: &RecordBook) -> TeamRanking {
    let record = team_record(games, team, None);
    let weighted_wins = weighted_wins_with(games, team, book);
    let weighted_losses = weighted_losses_with(games, team, book);
    let total = total_score(weighted_wins, weighted_losses);

    debug!(
        "{}: {}-{}-{} ww={} wl={} total={}",
        team, record.wins, record.losses, record.ties, weighted_wins, weighted_losses, total
    );

    TeamRanking {
        team: team.to_string(),
        wins: record.wins,
        losses: record.losses,
        ties: record.ties,
        win_pct: win_pct(record.wins, record.losses, record.ties),
        weighted_wins,
        weighted_losses,
        total,
    }
}

/// Rank every team with a completed game, best total first.
///
/// Teams are scored in lexicographic order and the sort is stable, so equal
/// totals stay in team-code order. Values are unrounded; rounding happens
/// when the snapshot is built.
pub fn rank_all(games: &[Game]) -> Vec<TeamRanking> {
    let book = RecordBook::from_games(games);

    let mut rankings: Vec<TeamRanking> = ranked_teams(games)
        .into_iter()
        .map(|team| rank_team(games, team, &book))
        .collect();

    // Sort by total descending; Vec::sort_by is stable
    rankings.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

    debug!("Ranked {} teams", rankings.len());
    rankings
}
