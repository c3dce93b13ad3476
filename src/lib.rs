pub mod config;
pub mod error;
pub mod output;
pub mod ranking;
pub mod run;
pub mod schedule;
pub mod snapshot;

pub use error::RankingError;
