pub mod storage;
pub mod types;

pub use storage::{
    backup_path, latest_snapshot_week, load_snapshot, save_snapshot, snapshot_path,
};
pub use types::{format_team_ranking, format_week_data, round_to, Snapshot};
