//! Seams to the host build: where scopes come from and how their artifacts and
//! descriptors are resolved.
//!
//! Scope sources read a build description file from the project directory:
//! - [`graph`] — explicit `dependency-graph.json` export.
//! - [`gradle`] — `gradle.lockfile`, one scope per configuration.
//! - [`maven`] — `pom.xml`, one scope per `<scope>` value.
//!
//! [`local_repo`] resolves both binaries and descriptors against a
//! Maven-layout directory.

use std::path::Path;

use anyhow::Result;

use crate::error::ResolveError;
use crate::models::{Coordinate, DependencyScope, ResolvedArtifact};

pub mod detector;
pub mod gradle;
pub mod graph;
pub mod local_repo;
pub mod maven;

/// Turns a build description into dependency scopes.
pub trait ScopeSource {
    fn scopes(&self, path: &Path) -> Result<Vec<DependencyScope>>;
}

/// Resolves a scope's declared dependencies to binary files.
pub trait ArtifactEngine {
    fn resolve(&self, scope: &DependencyScope) -> Result<Vec<ResolvedArtifact>, ResolveError>;
}

/// One result of a descriptor lookup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DescriptorCandidate {
    Resolved(std::path::PathBuf),
    Failed(String),
}

/// Looks up descriptor documents (POMs) for a coordinate.
pub trait DescriptorQuery {
    fn query(&self, coordinate: &Coordinate) -> Result<Vec<DescriptorCandidate>, ResolveError>;
}
