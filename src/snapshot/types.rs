use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ranking::TeamRanking;

/// Persisted output of one ranking run for one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    pub week: u32,
    pub season: u32,
    pub rankings: Vec<TeamRanking>,
}

impl Snapshot {
    /// Build a snapshot stamped with the current time
    pub fn now(week: u32, season: u32, rankings: &[TeamRanking]) -> Self {
        format_week_data(week, season, rankings, Utc::now())
    }
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Copy a ranking entry into its published form: win_pct to 3 decimals,
/// weighted scores to 2. Every field is listed so none is dropped.
pub fn format_team_ranking(ranking: &TeamRanking) -> TeamRanking {
    TeamRanking {
        team: ranking.team.clone(),
        wins: ranking.wins,
        losses: ranking.losses,
        ties: ranking.ties,
        win_pct: round_to(ranking.win_pct, 3),
        weighted_wins: round_to(ranking.weighted_wins, 2),
        weighted_losses: round_to(ranking.weighted_losses, 2),
        total: round_to(ranking.total, 2),
    }
}

/// Wrap rankings in the snapshot envelope. Order is kept as given.
pub fn format_week_data(
    week: u32,
    season: u32,
    rankings: &[TeamRanking],
    timestamp: DateTime<Utc>,
) -> Snapshot {
    Snapshot {
        timestamp,
        week,
        season,
        rankings: rankings.iter().map(format_team_ranking).collect(),
    }
}

/// ISO-8601 timestamps with an explicit `+00:00` offset
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
