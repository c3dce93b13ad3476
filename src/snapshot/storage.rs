use super::types::Snapshot;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::RankingError;

/// Path of the snapshot for `week` (`{dir}/week_{week}.json`)
pub fn snapshot_path(dir: &Path, week: u32) -> PathBuf {
    dir.join(format!("week_{}.json", week))
}

/// Path the previous snapshot is copied to before an overwrite
pub fn backup_path(dir: &Path, week: u32) -> PathBuf {
    dir.join(format!("week_{}.json.backup", week))
}

/// Load a snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot at {}", path.display()))?;

    serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse snapshot at {}", path.display()))
}

/// Highest week with a snapshot in `dir`, if any
pub fn latest_snapshot_week(dir: &Path) -> Result<Option<u32>> {
    if !dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list snapshot directory {}", dir.display()))?;

    let mut latest = None;
    for entry in entries {
        let entry = entry.context("Failed to read snapshot directory entry")?;
        let name = entry.file_name();
        let week = name
            .to_str()
            .and_then(|n| n.strip_prefix("week_"))
            .and_then(|n| n.strip_suffix(".json"))
            .and_then(|n| n.parse::<u32>().ok());
        if let Some(week) = week {
            latest = latest.max(Some(week));
        }
    }
    Ok(latest)
}

fn persistence_error(path: &Path, reason: String) -> anyhow::Error {
    RankingError::Persistence {
        path: path.display().to_string(),
        reason,
    }
    .into()
}

fn write_atomically(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, snapshot).context("Failed to serialize snapshot")?;
    file.write_all(b"\n").context("Failed to write snapshot")?;

    file.commit().context("Failed to commit snapshot")?;
    Ok(())
}

/// Read the written file back and compare it with what was meant to be written.
/// On mismatch `backup`, the copy made by this save, is put back in place.
fn verify_written(path: &Path, expected: &Snapshot, backup: Option<&Path>) -> Result<()> {
    let problem = match load_snapshot(path) {
        Ok(written) if &written == expected => return Ok(()),
        Ok(_) => "content read back differs from snapshot".to_string(),
        Err(e) => format!("{:#}", e),
    };

    if let Some(backup) = backup {
        info!("Restoring {} from backup", path.display());
        if let Err(e) = fs::copy(backup, path) {
            warn!("Failed to restore backup: {}", e);
        }
    }

    Err(persistence_error(path, problem))
}

/// Save a snapshot as `week_{N}.json` under `dir`.
///
/// An existing file for the same week is first copied to
/// `week_{N}.json.backup`. The new content is written atomically and then
/// read back; if it does not match, the backup is restored and an error is
/// returned.
pub fn save_snapshot(dir: &Path, snapshot: &Snapshot) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory at {}", dir.display()))
        .map_err(|e| persistence_error(dir, format!("{:#}", e)))?;

    let path = snapshot_path(dir, snapshot.week);
    let backup = backup_path(dir, snapshot.week);

    let mut backed_up = false;
    if path.exists() {
        info!("Creating backup of existing {}", path.display());
        match fs::copy(&path, &backup) {
            Ok(_) => backed_up = true,
            Err(e) => warn!("Failed to create backup: {}", e),
        }
    }

    info!("Writing snapshot to {}", path.display());
    write_atomically(&path, snapshot).map_err(|e| persistence_error(&path, format!("{:#}", e)))?;

    let size = fs::metadata(&path)
        .map_err(|e| persistence_error(&path, e.to_string()))?
        .len();
    info!("Wrote {} bytes to {}", size, path.display());

    verify_written(&path, snapshot, backed_up.then_some(backup.as_path()))?;
    info!("Snapshot validation successful");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{fixtures, rank_all};

    fn sample_snapshot(week: u32) -> Snapshot {
        Snapshot::now(week, 2025, &rank_all(&fixtures::week_2_schedule()))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = sample_snapshot(2);

        let path = save_snapshot(dir.path(), &snapshot).unwrap();
        assert_eq!(path, dir.path().join("week_2.json"));

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_save_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("rankings");

        save_snapshot(&nested, &sample_snapshot(3)).unwrap();
        assert!(nested.join("week_3.json").exists());
    }

    #[test]
    fn test_no_backup_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        save_snapshot(dir.path(), &sample_snapshot(2)).unwrap();
        assert!(!backup_path(dir.path(), 2).exists());
    }

    #[test]
    fn test_overwrite_keeps_backup() {
        let dir = tempfile::tempdir().unwrap();
        let first = sample_snapshot(2);
        save_snapshot(dir.path(), &first).unwrap();

        let mut second = sample_snapshot(2);
        second.rankings.truncate(1);
        save_snapshot(dir.path(), &second).unwrap();

        let current = load_snapshot(&snapshot_path(dir.path(), 2)).unwrap();
        let backup = load_snapshot(&backup_path(dir.path(), 2)).unwrap();
        assert_eq!(current, second);
        assert_eq!(backup, first);
    }

    #[test]
    fn test_written_file_is_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_snapshot(dir.path(), &sample_snapshot(2)).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("{\n  \"timestamp\""));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn test_verify_restores_backup_on_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = sample_snapshot(2);
        let path = snapshot_path(dir.path(), 2);
        let backup = backup_path(dir.path(), 2);

        fs::write(&backup, serde_json::to_string(&snapshot).unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = verify_written(&path, &snapshot, Some(backup.as_path())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::Persistence { .. })
        ));
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_verify_ignores_backup_from_earlier_run() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = sample_snapshot(2);
        let path = snapshot_path(dir.path(), 2);
        let backup = backup_path(dir.path(), 2);

        let stale = Snapshot::now(2, 2024, &[]);
        fs::write(&backup, serde_json::to_string(&stale).unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = verify_written(&path, &snapshot, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::Persistence { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_first_write_leaves_stale_backup_alone() {
        let dir = tempfile::tempdir().unwrap();
        let stale = Snapshot::now(2, 2024, &[]);
        fs::write(backup_path(dir.path(), 2), serde_json::to_string(&stale).unwrap()).unwrap();

        let snapshot = sample_snapshot(2);
        save_snapshot(dir.path(), &snapshot).unwrap();

        assert_eq!(load_snapshot(&snapshot_path(dir.path(), 2)).unwrap(), snapshot);
        assert_eq!(load_snapshot(&backup_path(dir.path(), 2)).unwrap(), stale);
    }

    #[test]
    fn test_latest_snapshot_week() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_snapshot_week(dir.path()).unwrap(), None);

        for week in [2, 10, 3] {
            save_snapshot(dir.path(), &sample_snapshot(week)).unwrap();
        }
        // Backups and unrelated files are ignored
        fs::write(dir.path().join("week_11.json.backup"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        assert_eq!(latest_snapshot_week(dir.path()).unwrap(), Some(10));
    }

    #[test]
    fn test_latest_snapshot_week_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_snapshot_week(&dir.path().join("nope")).unwrap(), None);
    }

    #[test]
    fn test_load_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&snapshot_path(dir.path(), 5)).unwrap_err();
        assert!(err.to_string().contains("week_5.json"));
    }
}
