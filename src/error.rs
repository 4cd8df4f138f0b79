//! Error types for the resolution pipeline and snapshot storage.
//!
//! Resolution errors are recovered per scope; only storage write failures
//! escape a pass.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while resolving a scope's artifacts or their descriptors.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not find {coordinate} (looked for {path})")]
    ArtifactNotFound { coordinate: String, path: PathBuf },

    #[error("conflicting versions of {module}: {}", .versions.join(", "))]
    Conflict { module: String, versions: Vec<String> },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while reading or writing the persisted snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Prior snapshot is unreadable. Recovered by treating it as absent.
    #[error("could not read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Prior snapshot is not a valid record array. Recovered by treating it as absent.
    #[error("malformed snapshot {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
