use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One license-relevant record: a shipped artifact plus its descriptor (POM).
///
/// Equality, hashing and ordering cover all five fields, so two records built
/// from the same values are the same snapshot entry. Field order is also the
/// serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(rename = "pomLocation", default)]
    pub descriptor_location: Option<String>,
    #[serde(rename = "fileLocation")]
    pub binary_location: String,
}

impl ArtifactInfo {
    pub fn new(
        coordinate: &Coordinate,
        descriptor_location: Option<String>,
        binary_location: impl Into<String>,
    ) -> Self {
        Self {
            group: coordinate.group.clone(),
            name: coordinate.name.clone(),
            version: coordinate.version.clone(),
            descriptor_location,
            binary_location: binary_location.into(),
        }
    }
}

/// A deduplicated set of [`ArtifactInfo`] records.
///
/// Backed by an ordered set: two snapshots with the same members compare equal
/// and iterate in the same order regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: BTreeSet<ArtifactInfo>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtifactInfo> {
        self.records.iter()
    }

    /// Union `other` into this snapshot, consuming it.
    pub fn union(mut self, other: impl IntoIterator<Item = ArtifactInfo>) -> Self {
        self.records.extend(other);
        self
    }
}

impl FromIterator<ArtifactInfo> for Snapshot {
    fn from_iter<I: IntoIterator<Item = ArtifactInfo>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Maven-style `group:name:version` coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(group: &str, name: &str, version: &str) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// `group:name`, the identity used for version conflict detection.
    pub fn module(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// A dependency as declared in a scope, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub coordinate: Coordinate,
    /// Binary file extension, `jar` unless the build says otherwise.
    pub extension: String,
    /// Location already resolved by the build, bypassing repository lookup.
    pub file: Option<PathBuf>,
}

impl DeclaredDependency {
    pub fn new(group: &str, name: &str, version: &str) -> Self {
        Self {
            coordinate: Coordinate::new(group, name, version),
            extension: "jar".to_string(),
            file: None,
        }
    }
}

/// A named grouping of dependencies in the host build (a Gradle configuration,
/// a Maven scope).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyScope {
    pub name: String,
    /// Whether the build can resolve this scope at all. Adapters that cannot
    /// tell leave it `true`.
    pub resolvable: bool,
    /// Names of every scope this one inherits from, transitively.
    pub ancestors: BTreeSet<String>,
    pub dependencies: Vec<DeclaredDependency>,
}

impl DependencyScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolvable: true,
            ancestors: BTreeSet::new(),
            dependencies: Vec::new(),
        }
    }
}

/// Output of the host resolution engine for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub coordinate: Coordinate,
    /// Absolute path of the binary.
    pub file: PathBuf,
}
