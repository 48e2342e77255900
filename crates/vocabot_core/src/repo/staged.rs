//! Write-to-temporary-then-rename helper.

use super::{RepoError, RepoResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Fully written temp file waiting to replace its target.
///
/// Dropping without `commit` removes the temp file and leaves the target as-is.
#[derive(Debug)]
pub struct StagedWrite {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    /// Writes `contents` to a temp file next to `target`.
    ///
    /// The temp file lives in the target's directory so the final rename
    /// never crosses filesystems.
    pub(crate) fn stage(target: &Path, contents: &[u8]) -> RepoResult<Self> {
        let dir = parent_dir(target);
        fs::create_dir_all(dir).map_err(|err| RepoError::io(dir, err))?;

        let mut temp = tempfile::Builder::new()
            .prefix(".vocabot-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|err| RepoError::io(dir, err))?;
        temp.write_all(contents)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|err| RepoError::io(temp.path(), err))?;

        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Atomically replaces the target with the staged bytes.
    pub fn commit(self) -> RepoResult<()> {
        let target = self.target;
        self.temp
            .persist(&target)
            .map_err(|err| RepoError::io(&target, err.error))?;
        Ok(())
    }
}

fn parent_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
