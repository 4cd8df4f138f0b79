//! In-memory host used by unit tests.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::error::ResolveError;
use crate::host::{ArtifactEngine, DescriptorCandidate, DescriptorQuery};
use crate::models::{Coordinate, DeclaredDependency, DependencyScope, ResolvedArtifact};
use crate::resolver::{ArtifactResolver, MetadataLocator};

/// Binaries live at `/location/{name}`, descriptors at
/// `/poms/{name}-{version}.pom`.
#[derive(Default)]
pub struct FakeHost {
    scopes: BTreeMap<String, Vec<Coordinate>>,
    with_pom: BTreeSet<String>,
    failing_scopes: BTreeSet<String>,
    failing_descriptors: BTreeSet<String>,
    mirrored: BTreeSet<String>,
    resolve_calls: Cell<usize>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artifact(
        mut self,
        scope: &str,
        group: &str,
        name: &str,
        version: &str,
        has_pom: bool,
    ) -> Self {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .push(Coordinate::new(group, name, version));
        if has_pom {
            self.with_pom.insert(name.to_string());
        }
        self
    }

    pub fn failing(mut self, scope: &str) -> Self {
        self.failing_scopes.insert(scope.to_string());
        self
    }

    pub fn failing_descriptor(mut self, name: &str) -> Self {
        self.failing_descriptors.insert(name.to_string());
        self
    }

    /// Also serve `name`'s descriptor from `/mirror/poms`, under the same file
    /// name.
    pub fn mirrored_descriptor(mut self, name: &str) -> Self {
        self.mirrored.insert(name.to_string());
        self
    }

    pub fn scope(&self, name: &str) -> DependencyScope {
        let mut scope = DependencyScope::new(name);
        scope.dependencies = self
            .scopes
            .get(name)
            .into_iter()
            .flatten()
            .map(|c| DeclaredDependency::new(&c.group, &c.name, &c.version))
            .collect();
        scope
    }

    pub fn resolver(&self) -> ArtifactResolver<'_> {
        ArtifactResolver::new(self, MetadataLocator::new(self, "pom"))
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.get()
    }
}

impl ArtifactEngine for FakeHost {
    fn resolve(&self, scope: &DependencyScope) -> Result<Vec<ResolvedArtifact>, ResolveError> {
        self.resolve_calls.set(self.resolve_calls.get() + 1);
        if self.failing_scopes.contains(&scope.name) {
            return Err(ResolveError::Conflict {
                module: "g:conflicted".to_string(),
                versions: vec!["1".to_string(), "2".to_string()],
            });
        }
        Ok(scope
            .dependencies
            .iter()
            .map(|d| ResolvedArtifact {
                coordinate: d.coordinate.clone(),
                file: PathBuf::from(format!("/location/{}", d.coordinate.name)),
            })
            .collect())
    }
}

impl DescriptorQuery for FakeHost {
    fn query(&self, coordinate: &Coordinate) -> Result<Vec<DescriptorCandidate>, ResolveError> {
        if self.failing_descriptors.contains(&coordinate.name) {
            return Err(ResolveError::Io {
                path: PathBuf::from("/poms"),
                source: std::io::Error::other("repository unreachable"),
            });
        }
        if !self.with_pom.contains(&coordinate.name) {
            return Ok(Vec::new());
        }
        let mut candidates = vec![
            DescriptorCandidate::Resolved(PathBuf::from(format!(
                "/poms/{}-{}.pom",
                coordinate.name, coordinate.version
            ))),
            DescriptorCandidate::Resolved(PathBuf::from(format!(
                "/poms/{}-{}-relocated.pom",
                coordinate.name, coordinate.version
            ))),
        ];
        if self.mirrored.contains(&coordinate.name) {
            candidates.push(DescriptorCandidate::Resolved(PathBuf::from(format!(
                "/mirror/poms/{}-{}.pom",
                coordinate.name, coordinate.version
            ))));
        }
        Ok(candidates)
    }
}
