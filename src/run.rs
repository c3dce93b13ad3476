use anyhow::Result;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::ranking::rank_all;
use crate::schedule::{completed_games, current_week, load_games, Game, LoadOptions};
use crate::snapshot::{save_snapshot, Snapshot};

/// Why a run ended without producing rankings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoCompletedGames,
    NotEnoughWeeks { current_week: u32, required: u32 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCompletedGames => write!(f, "No completed games found"),
            SkipReason::NotEnoughWeeks {
                current_week,
                required,
            } => write!(
                f,
                "Current week is {}. Calculations start after week {}",
                current_week, required
            ),
        }
    }
}

/// Result of one pipeline run
#[derive(Debug)]
pub enum RunOutcome {
    /// Rankings were computed; `path` is None on a dry run
    Ranked {
        snapshot: Snapshot,
        path: Option<PathBuf>,
    },
    Skipped(SkipReason),
}

/// Rank the season's games and wrap them in a snapshot for the current week.
///
/// Returns a skip reason instead when nothing has been played or fewer than
/// `min_completed_weeks` weeks are complete.
pub fn build_snapshot(
    games: &[Game],
    season: u32,
    min_completed_weeks: u32,
) -> Result<Snapshot, SkipReason> {
    let completed = completed_games(games);
    info!("Found {} completed games", completed.len());

    if completed.is_empty() {
        return Err(SkipReason::NoCompletedGames);
    }

    let week = current_week(&completed);
    info!("Current completed week: {}", week);

    if week < min_completed_weeks {
        return Err(SkipReason::NotEnoughWeeks {
            current_week: week,
            required: min_completed_weeks,
        });
    }

    info!("Calculating rankings for week {}", week);
    let rankings = rank_all(&completed);
    Ok(Snapshot::now(week, season, &rankings))
}

/// Load games, rank them and persist the snapshot (unless `dry_run`)
pub async fn run(config: &Config, options: &LoadOptions, dry_run: bool) -> Result<RunOutcome> {
    info!("Starting weighted wins calculation for the {} season", config.season);

    let games = load_games(config, options).await?;
    info!("Loaded {} scheduled games", games.len());

    let snapshot = match build_snapshot(&games, config.season, config.min_completed_weeks) {
        Ok(snapshot) => snapshot,
        Err(reason) => {
            info!("{}. Nothing to write.", reason);
            return Ok(RunOutcome::Skipped(reason));
        }
    };

    let path = if dry_run {
        info!("Dry run, snapshot not written");
        None
    } else {
        Some(save_snapshot(&config.output_dir, &snapshot)?)
    };

    Ok(RunOutcome::Ranked { snapshot, path })
}
