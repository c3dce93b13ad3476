use anyhow::Result;
use serde::Deserialize;
use std::io::Read;
use tracing::debug;

use super::types::Game;
use crate::error::RankingError;

/// Columns every schedule source must provide
pub const REQUIRED_FIELDS: [&str; 6] = [
    "week",
    "home_team",
    "away_team",
    "home_score",
    "away_score",
    "result",
];

/// Check that every required field is present.
/// Reports all missing fields at once (not just the first).
pub fn validate_fields<'a, I>(fields: I) -> Result<(), RankingError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = fields.into_iter().map(str::trim).collect();
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !present.contains(field))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RankingError::MissingFields { fields: missing })
    }
}

/// One schedule row as it comes off the wire.
///
/// Numbers are read as floats so both `27` and `27.0` are accepted; empty
/// CSV cells and JSON nulls become `None`.
#[derive(Debug, Deserialize)]
struct RawGame {
    #[serde(default)]
    season: Option<f64>,
    week: Option<f64>,
    home_team: String,
    away_team: String,
    home_score: Option<f64>,
    away_score: Option<f64>,
    result: Option<f64>,
}

impl RawGame {
    fn into_game(self, row: usize) -> Result<Game, RankingError> {
        let malformed = |reason: String| RankingError::MalformedRow { row, reason };

        let week = match self.week {
            Some(w) => to_u32(w).filter(|w| *w > 0).ok_or_else(|| {
                malformed(format!("week must be a positive integer, got {}", w))
            })?,
            None => return Err(malformed("week is empty".to_string())),
        };

        let home_team = self.home_team.trim().to_string();
        let away_team = self.away_team.trim().to_string();
        if home_team.is_empty() || away_team.is_empty() {
            return Err(malformed("team code is empty".to_string()));
        }
        if home_team == away_team {
            return Err(malformed(format!("{} is listed as both home and away", home_team)));
        }

        let home_score = score(self.home_score, "home_score").map_err(&malformed)?;
        let away_score = score(self.away_score, "away_score").map_err(&malformed)?;
        let result = match self.result {
            Some(r) if r.fract() == 0.0 && r >= i32::MIN as f64 && r <= i32::MAX as f64 => {
                Some(r as i32)
            }
            Some(r) => {
                return Err(malformed(format!("result must be a 32-bit integer, got {}", r)))
            }
            None => None,
        };

        Ok(Game {
            week,
            home_team,
            away_team,
            home_score,
            away_score,
            result,
        })
    }

    fn in_season(&self, season: Option<u32>) -> bool {
        match (season, self.season) {
            (Some(wanted), Some(row)) => to_whole(row) == Some(wanted as u64),
            // Sources without a season column are taken as-is
            _ => true,
        }
    }
}

fn to_whole(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Some(value as u64)
    } else {
        None
    }
}

fn to_u32(value: f64) -> Option<u32> {
    to_whole(value).and_then(|v| u32::try_from(v).ok())
}

fn score(value: Option<f64>, field: &str) -> Result<Option<u32>, String> {
    match value {
        None => Ok(None),
        Some(v) => to_u32(v)
            .map(Some)
            .ok_or_else(|| format!("{} must be a non-negative 32-bit integer, got {}", field, v)),
    }
}

/// Parse an nflverse-style CSV schedule.
///
/// Extra columns are ignored. When `season` is given and the file carries a
/// `season` column, rows from other seasons are dropped.
pub fn parse_csv<R: Read>(rdr: R, season: Option<u32>) -> Result<Vec<Game>> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader
        .headers()
        .map_err(|e| RankingError::InvalidInput {
            reason: format!("Failed to read CSV header: {}", e),
        })?
        .clone();
    validate_fields(headers.iter())?;

    let mut games = Vec::new();
    for (idx, record) in reader.deserialize::<RawGame>().enumerate() {
        // Row numbers are 1-based and skip the header line
        let row = idx + 2;
        let raw = record.map_err(|e| RankingError::MalformedRow {
            row,
            reason: e.to_string(),
        })?;
        if raw.in_season(season) {
            games.push(raw.into_game(row)?);
        }
    }

    debug!("Parsed {} games from CSV", games.len());
    Ok(games)
}

/// Parse a JSON array of game objects.
///
/// Every object must carry all required keys, `null` values allowed.
pub fn parse_json<R: Read>(rdr: R, season: Option<u32>) -> Result<Vec<Game>> {
    let values: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_reader(rdr).map_err(|e| RankingError::InvalidInput {
            reason: format!("Failed to parse JSON schedule: {}", e),
        })?;

    let mut games = Vec::new();
    for (idx, object) in values.into_iter().enumerate() {
        let row = idx + 1;
        validate_fields(object.keys().map(String::as_str))?;
        let raw: RawGame = serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| RankingError::MalformedRow {
                row,
                reason: e.to_string(),
            })?;
        if raw.in_season(season) {
            games.push(raw.into_game(row)?);
        }
    }

    debug!("Parsed {} games from JSON", games.len());
    Ok(games)
}
