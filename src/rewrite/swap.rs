use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Crash-safe file replacement, modeled as a scoped resource.
///
/// `begin` renames the original to a `.bak` sibling. `commit` writes the new
/// content to the original path and deletes the backup only after the write
/// succeeds. Dropping an uncommitted swap renames the backup back.
///
/// If the write inside `commit` fails, the backup is deliberately left in
/// place and the original filename is absent; the `.bak` file is the
/// recovery point for the operator.
#[derive(Debug)]
pub struct FileSwap {
    original: PathBuf,
    backup: PathBuf,
    resolved: bool,
}

impl FileSwap {
    /// Acquire the swap by renaming `path` to `path.bak`
    pub fn begin(path: &Path) -> Result<Self> {
        let mut backup = path.as_os_str().to_owned();
        backup.push(".bak");
        let backup = PathBuf::from(backup);

        fs::rename(path, &backup)?;

        Ok(FileSwap {
            original: path.to_path_buf(),
            backup,
            resolved: false,
        })
    }

    /// Path of the backup file while the swap is open
    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    /// Write `content` to the original path, then delete the backup
    pub fn commit(mut self, content: &str) -> Result<()> {
        // A failed write must leave the backup untouched as the recovery
        // point, so the automatic rollback is disarmed first.
        self.resolved = true;
        fs::write(&self.original, content)?;
        fs::remove_file(&self.backup)?;
        Ok(())
    }

    /// Restore the original file by renaming the backup back
    pub fn roll_back(mut self) -> Result<()> {
        self.resolved = true;
        fs::rename(&self.backup, &self.original)?;
        Ok(())
    }
}

impl Drop for FileSwap {
    fn drop(&mut self) {
        if !self.resolved {
            let _ = fs::rename(&self.backup, &self.original);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_commit_replaces_content_and_removes_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("module.py");
        fs::write(&path, "old\n").unwrap();

        let swap = FileSwap::begin(&path).unwrap();
        let backup = swap.backup_path().to_path_buf();
        assert!(backup.exists());
        assert!(!path.exists());

        swap.commit("new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!backup.exists());
    }

    #[test]
    fn test_roll_back_restores_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("module.py");
        fs::write(&path, "old\n").unwrap();

        let swap = FileSwap::begin(&path).unwrap();
        swap.roll_back().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n");
    }

    #[test]
    fn test_drop_without_commit_rolls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("module.py");
        fs::write(&path, "old\n").unwrap();

        {
            let _swap = FileSwap::begin(&path).unwrap();
            // dropped uncommitted
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n");
    }

    #[test]
    fn test_backup_suffix_is_appended_not_substituted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("module.pyi");
        fs::write(&path, "stub\n").unwrap();

        let swap = FileSwap::begin(&path).unwrap();
        // `module.pyi.bak`, so a sibling `module.py` backup cannot collide
        assert!(swap
            .backup_path()
            .to_string_lossy()
            .ends_with("module.pyi.bak"));
        swap.roll_back().unwrap();
    }

    #[test]
    fn test_begin_fails_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.py");
        assert!(FileSwap::begin(&path).is_err());
    }
}
