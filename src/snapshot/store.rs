use std::fs::Permissions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::SnapshotError;
use crate::models::{ArtifactInfo, Snapshot};

/// Result of [`SnapshotStore::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The file already held an equal snapshot and was not touched.
    Unchanged,
    /// The file was (re)written. `previous` is the record count of the prior
    /// snapshot, if one could be read.
    Written { previous: Option<usize> },
}

/// The persisted snapshot file. It is the only state that outlives a pass.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the prior snapshot. `Ok(None)` when there is no file.
    pub fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| SnapshotError::Read {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<ArtifactInfo> =
            serde_json::from_str(&content).map_err(|source| SnapshotError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(records.into_iter().collect()))
    }

    /// Persist `snapshot` unless the file already holds the same set.
    ///
    /// An unreadable or malformed prior file counts as absent. Only failures to
    /// create the directory or write the file are returned; the prior file is
    /// replaced atomically, so it survives a failed write.
    pub fn commit(&self, snapshot: &Snapshot) -> Result<CommitOutcome, SnapshotError> {
        let prior = match self.load() {
            Ok(prior) => prior,
            Err(e) => {
                warn!(error = %e, "ignoring prior snapshot");
                None
            }
        };

        if prior.as_ref() == Some(snapshot) {
            debug!(path = %self.path.display(), "snapshot unchanged");
            return Ok(CommitOutcome::Unchanged);
        }

        self.write(snapshot)?;
        info!(path = %self.path.display(), records = snapshot.len(), "snapshot written");
        Ok(CommitOutcome::Written {
            previous: prior.map(|p| p.len()),
        })
    }

    fn write(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let content = to_canonical_json(snapshot)?;
        let write_err = |source: std::io::Error| SnapshotError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        if let Some(perms) = self.target_permissions()? {
            tmp.as_file().set_permissions(perms).map_err(write_err)?;
        }
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Permissions the rewritten file should carry: the prior file's, else
    /// `0644` on unix. A fresh temp file is owner-only.
    fn target_permissions(&self) -> Result<Option<Permissions>, SnapshotError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(meta.permissions())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(default_permissions()),
            Err(source) => Err(SnapshotError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

/// Pretty JSON array in snapshot order, with a trailing newline. Equal
/// snapshots always serialize to identical bytes.
pub fn to_canonical_json(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    let records: Vec<&ArtifactInfo> = snapshot.iter().collect();
    let mut json = serde_json::to_string_pretty(&records)?;
    json.push('\n');
    Ok(json)
}
