//! Transactional publish of run artifacts.
//!
//! Artifacts are written into a staging directory inside the output
//! directory and moved into place together, so a failed run never leaves a
//! manifest without its checklist (or the reverse).
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Staged outputs waiting to be published into `dest_root`.
pub struct Staging {
    txn: TempDir,
    dest_root: PathBuf,
}

impl Staging {
    /// Create the output directory if needed and open a staging area in it.
    pub fn new(dest_root: &Path) -> Result<Self> {
        fs::create_dir_all(dest_root)
            .with_context(|| format!("create {}", dest_root.display()))?;
        let txn = tempfile::Builder::new()
            .prefix(".mfr-txn-")
            .tempdir_in(dest_root)
            .with_context(|| format!("create staging dir in {}", dest_root.display()))?;
        Ok(Self {
            txn,
            dest_root: dest_root.to_path_buf(),
        })
    }

    fn staging_root(&self) -> PathBuf {
        self.txn.path().join("staging")
    }

    fn backup_root(&self) -> PathBuf {
        self.txn.path().join("backup")
    }

    pub fn write_text(&self, file_name: &str, text: &str) -> Result<()> {
        let staging_root = self.staging_root();
        fs::create_dir_all(&staging_root)
            .with_context(|| format!("create {}", staging_root.display()))?;
        let path = staging_root.join(file_name);
        fs::write(&path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Move every staged file into the output directory, restoring any
    /// overwritten files if one of the moves fails.
    pub fn publish(self) -> Result<Vec<PathBuf>> {
        let files = collect_files(&self.staging_root())?;
        let backup_root = self.backup_root();
        fs::create_dir_all(&backup_root)
            .with_context(|| format!("create {}", backup_root.display()))?;

        let mut published = Vec::new();
        let mut backups: Vec<(PathBuf, PathBuf)> = Vec::new();
        for file in files {
            let Some(name) = file.file_name() else {
                continue;
            };
            let dest = self.dest_root.join(name);
            if dest.exists() {
                let backup = backup_root.join(name);
                if let Err(err) = backup_file(&dest, &backup) {
                    rollback_publish(&published, &backups);
                    return Err(err);
                }
                backups.push((dest.clone(), backup));
            }
            if let Err(err) = publish_file(&file, &dest) {
                rollback_publish(&published, &backups);
                return Err(err);
            }
            tracing::debug!(path = %dest.display(), "published");
            published.push(dest);
        }
        Ok(published)
    }
}

fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !root.exists() {
        return Ok(files);
    }
    for entry in fs::read_dir(root).with_context(|| format!("read {}", root.display()))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn backup_file(dest: &Path, backup: &Path) -> Result<()> {
    fs::rename(dest, backup)
        .or_else(|_| fs::copy(dest, backup).map(|_| ()))
        .with_context(|| format!("backup {}", dest.display()))?;
    Ok(())
}

fn publish_file(source: &Path, dest: &Path) -> Result<()> {
    fs::rename(source, dest)
        .or_else(|_| fs::copy(source, dest).map(|_| ()))
        .with_context(|| format!("publish {}", dest.display()))?;
    Ok(())
}

fn rollback_publish(published: &[PathBuf], backups: &[(PathBuf, PathBuf)]) {
    for path in published {
        if path.exists() {
            let _ = fs::remove_file(path);
        }
    }
    for (dest, backup) in backups {
        let _ = fs::rename(backup, dest).or_else(|_| fs::copy(backup, dest).map(|_| ()));
    }
}
