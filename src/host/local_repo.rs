use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::trace;

use super::{ArtifactEngine, DescriptorCandidate, DescriptorQuery};
use crate::error::ResolveError;
use crate::models::{Coordinate, DependencyScope, ResolvedArtifact};

/// Resolution engine backed by a Maven-layout directory such as
/// `~/.m2/repository`.
///
/// Files live at `{root}/{group as path}/{name}/{version}/{name}-{version}.{ext}`.
pub struct LocalRepository {
    root: PathBuf,
    descriptor_extension: String,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>, descriptor_extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            descriptor_extension: descriptor_extension.into(),
        }
    }

    /// Directory holding every file of one coordinate.
    pub fn version_dir(&self, coordinate: &Coordinate) -> PathBuf {
        let mut dir = self.root.clone();
        dir.extend(coordinate.group.split('.'));
        dir.push(&coordinate.name);
        dir.push(&coordinate.version);
        dir
    }

    pub fn artifact_path(&self, coordinate: &Coordinate, extension: &str) -> PathBuf {
        self.version_dir(coordinate).join(format!(
            "{}-{}.{}",
            coordinate.name, coordinate.version, extension
        ))
    }

    /// Canonical descriptor path, where a fetched POM is stored.
    pub fn descriptor_path(&self, coordinate: &Coordinate) -> PathBuf {
        self.artifact_path(coordinate, &self.descriptor_extension)
    }
}

impl ArtifactEngine for LocalRepository {
    fn resolve(&self, scope: &DependencyScope) -> Result<Vec<ResolvedArtifact>, ResolveError> {
        check_conflicts(scope)?;

        let mut resolved = Vec::with_capacity(scope.dependencies.len());
        for dep in &scope.dependencies {
            let path = dep
                .file
                .clone()
                .unwrap_or_else(|| self.artifact_path(&dep.coordinate, &dep.extension));

            if !path.is_file() {
                return Err(ResolveError::ArtifactNotFound {
                    coordinate: dep.coordinate.to_string(),
                    path,
                });
            }

            let file = std::path::absolute(&path)
                .map_err(|source| ResolveError::Io { path, source })?;
            trace!(scope = %scope.name, artifact = %dep.coordinate, file = %file.display(), "resolved");
            resolved.push(ResolvedArtifact {
                coordinate: dep.coordinate.clone(),
                file,
            });
        }
        Ok(resolved)
    }
}

/// A scope may reference the same module twice with the same version, but not
/// with two different ones.
fn check_conflicts(scope: &DependencyScope) -> Result<(), ResolveError> {
    let mut versions: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for dep in &scope.dependencies {
        let seen = versions.entry(dep.coordinate.module()).or_default();
        if !seen.contains(&dep.coordinate.version) {
            seen.push(dep.coordinate.version.clone());
        }
    }

    match versions.into_iter().find(|(_, v)| v.len() > 1) {
        Some((module, versions)) => Err(ResolveError::Conflict { module, versions }),
        None => Ok(()),
    }
}

impl DescriptorQuery for LocalRepository {
    /// Every `*.{ext}` file in the coordinate's directory is a candidate; the
    /// caller picks the one whose name matches.
    fn query(&self, coordinate: &Coordinate) -> Result<Vec<DescriptorCandidate>, ResolveError> {
        let dir = self.version_dir(coordinate);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(ResolveError::Io { path: dir, source }),
        };

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    candidates.push(DescriptorCandidate::Failed(e.to_string()));
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.descriptor_extension.as_str())
            {
                continue;
            }
            match std::path::absolute(&path) {
                Ok(abs) => candidates.push(DescriptorCandidate::Resolved(abs)),
                Err(e) => candidates.push(DescriptorCandidate::Failed(e.to_string())),
            }
        }
        candidates.sort();
        Ok(candidates)
    }
}
