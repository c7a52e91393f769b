//! Output files published by rename
//!
//! A [`StagedFile`] is written in full to a hidden `.name.partial` sibling of its
//! target. Nothing appears at the target until [`StagedFile::commit`]; dropping an
//! uncommitted file removes the partial.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Result, ViatomError};

/// A fully written output waiting to be moved into place.
#[derive(Debug)]
pub struct StagedFile {
    partial: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedFile {
    /// Write `target`'s contents to its partial sibling.
    ///
    /// The data is flushed and synced before this returns. On failure the partial is
    /// removed and the error names `target`.
    pub fn write_with<P, F>(target: P, write: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    {
        let target = target.as_ref().to_path_buf();
        let staged = Self { partial: partial_path(&target), target, committed: false };
        debug!("Staging {}", staged.partial.display());

        let written = File::create(&staged.partial).and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()
        });

        match written {
            Ok(()) => Ok(staged),
            Err(e) => Err(ViatomError::output_error(&staged.target, e)),
        }
    }

    /// Final location of the file
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the file into place and return its path.
    pub fn commit(mut self) -> Result<PathBuf> {
        std::fs::rename(&self.partial, &self.target)
            .map_err(|e| ViatomError::output_error(&self.target, e))?;
        self.committed = true;
        Ok(std::mem::take(&mut self.target))
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.partial);
        }
    }
}

/// Commit staged files in order.
///
/// If any commit fails, files already moved into place are removed again and the
/// remaining partials are discarded, so either every output exists or none does.
pub fn commit_all(files: Vec<StagedFile>) -> Result<Vec<PathBuf>> {
    let mut committed = Vec::with_capacity(files.len());

    for file in files {
        match file.commit() {
            Ok(path) => committed.push(path),
            Err(e) => {
                for path in &committed {
                    warn!("Removing {} after failed commit", path.display());
                    let _ = std::fs::remove_file(path);
                }
                return Err(e);
            }
        }
    }

    Ok(committed)
}

/// Temporary name used while an output file is being written
pub(crate) fn partial_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;

    fn stage(target: &Path, text: &str) -> crate::Result<StagedFile> {
        StagedFile::write_with(target, |w| w.write_all(text.as_bytes()))
    }

    #[test]
    fn nothing_appears_before_commit() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("out.csv");

        let staged = stage(&target, "a,b\n")?;
        assert!(!target.exists());
        assert!(partial_path(&target).exists());

        assert_eq!(staged.commit()?, target);
        assert_eq!(std::fs::read_to_string(&target)?, "a,b\n");
        assert!(!partial_path(&target).exists());
        Ok(())
    }

    #[test]
    fn dropping_uncommitted_file_removes_partial() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("out.csv");

        drop(stage(&target, "a,b\n")?);
        assert!(!target.exists());
        assert!(!partial_path(&target).exists());
        Ok(())
    }

    #[test]
    fn failed_write_removes_partial() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("out.csv");

        let error = StagedFile::write_with(&target, |w| {
            w.write_all(b"half a row")?;
            Err(io::Error::other("disk full"))
        })
        .unwrap_err();

        assert_eq!(error.kind(), "IOFailure");
        assert!(!partial_path(&target).exists());
        assert!(!target.exists());
        Ok(())
    }

    #[test]
    fn failed_commit_rolls_back_earlier_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let kept = dir.path().join("a");
        let lost = dir.path().join("b");
        std::fs::create_dir(&kept)?;
        std::fs::create_dir(&lost)?;

        let csv = kept.join("out.csv");
        let files = vec![stage(&csv, "a,b\n")?, stage(&lost.join("summary.yaml"), "x: 1\n")?];
        std::fs::remove_dir_all(&lost)?;

        let error = commit_all(files).unwrap_err();
        assert_eq!(error.kind(), "IOFailure");
        assert!(!csv.exists());
        assert!(!partial_path(&csv).exists());
        Ok(())
    }

    #[test]
    fn commit_all_publishes_every_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let csv = dir.path().join("out.csv");
        let yaml = dir.path().join("summary.yaml");

        let committed = commit_all(vec![stage(&csv, "a\n")?, stage(&yaml, "b: 1\n")?])?;
        assert_eq!(committed, vec![csv.clone(), yaml.clone()]);
        assert!(csv.exists() && yaml.exists());
        Ok(())
    }

    #[test]
    fn partial_path_is_hidden_sibling() {
        assert_eq!(partial_path(Path::new("/tmp/out.csv")), Path::new("/tmp/.out.csv.partial"));
    }
}
