pub mod engine;
pub mod record;
pub mod score;

#[cfg(test)]
pub(crate) mod fixtures;

pub use engine::{rank_all, ranked_teams, TeamRanking};
pub use record::{team_record, Record, RecordBook, RecordSource};
pub use score::{total_score, weighted_losses, weighted_wins, win_pct};
