//! Turns eligible dependency scopes into [`ArtifactInfo`] records.
//!
//! Each scope is a failure boundary: anything that goes wrong while resolving
//! its artifacts or their descriptors yields [`ScopeResolution::Failed`] for
//! that scope alone.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::ResolveError;
use crate::host::ArtifactEngine;
use crate::models::{ArtifactInfo, DependencyScope};
use crate::scope::classifier::is_eligible;

pub mod locator;

pub use locator::MetadataLocator;

/// What one scope contributes to the snapshot.
#[derive(Debug)]
pub enum ScopeResolution {
    /// Not eligible for license reporting; nothing was resolved.
    Skipped,
    Resolved(BTreeSet<ArtifactInfo>),
    Failed(ResolveError),
}

impl ScopeResolution {
    /// Records to fold into the snapshot; empty unless resolution succeeded.
    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactInfo> {
        match self {
            ScopeResolution::Resolved(set) => Some(set.iter()),
            ScopeResolution::Skipped | ScopeResolution::Failed(_) => None,
        }
        .into_iter()
        .flatten()
    }
}

pub struct ArtifactResolver<'a> {
    engine: &'a dyn ArtifactEngine,
    locator: MetadataLocator<'a>,
}

impl<'a> ArtifactResolver<'a> {
    pub fn new(engine: &'a dyn ArtifactEngine, locator: MetadataLocator<'a>) -> Self {
        Self { engine, locator }
    }

    pub fn resolve(&self, scope: &DependencyScope) -> ScopeResolution {
        if !is_eligible(scope) {
            return ScopeResolution::Skipped;
        }
        match self.try_resolve(scope) {
            Ok(set) => ScopeResolution::Resolved(set),
            Err(e) => ScopeResolution::Failed(e),
        }
    }

    fn try_resolve(&self, scope: &DependencyScope) -> Result<BTreeSet<ArtifactInfo>, ResolveError> {
        let mut infos = BTreeSet::new();

        for artifact in self.engine.resolve(scope)? {
            let descriptors = self.locator.locate_descriptors(&artifact.coordinate)?;
            if descriptors.is_empty() {
                // Without a descriptor the artifact is left out of the report.
                debug!(scope = %scope.name, artifact = %artifact.coordinate, "no descriptor found, omitting");
                continue;
            }

            let binary = artifact.file.to_string_lossy().into_owned();
            for descriptor in descriptors {
                infos.insert(ArtifactInfo::new(
                    &artifact.coordinate,
                    Some(descriptor.to_string_lossy().into_owned()),
                    binary.clone(),
                ));
            }
        }

        Ok(infos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn test_cannot_resolve_returns_empty() {
        let host = FakeHost::new().with_artifact("compile", "g", "a", "1", true);
        let mut scope = host.scope("compile");
        scope.resolvable = false;

        let resolution = host.resolver().resolve(&scope);
        assert!(matches!(resolution, ScopeResolution::Skipped));
        assert_eq!(resolution.artifacts().count(), 0);
    }

    #[test]
    fn test_test_compile_returns_empty() {
        let host = FakeHost::new().with_artifact("testCompile", "g", "a", "1", true);
        let resolution = host.resolver().resolve(&host.scope("testCompile"));
        assert_eq!(resolution.artifacts().count(), 0);
        assert_eq!(host.resolve_calls(), 0);
    }

    #[test]
    fn test_annotation_processor_returns_empty() {
        let host = FakeHost::new().with_artifact("annotationProcessor", "g", "a", "1", true);
        let resolution = host.resolver().resolve(&host.scope("annotationProcessor"));
        assert!(matches!(resolution, ScopeResolution::Skipped));
        assert_eq!(host.resolve_calls(), 0);
    }

    #[test]
    fn test_resolution_failure_returns_empty() {
        let host = FakeHost::new()
            .with_artifact("compile", "g", "a", "1", true)
            .failing("compile");
        let resolution = host.resolver().resolve(&host.scope("compile"));
        assert!(matches!(resolution, ScopeResolution::Failed(_)));
        assert_eq!(resolution.artifacts().count(), 0);
    }

    #[test]
    fn test_descriptor_query_failure_fails_scope() {
        let host = FakeHost::new()
            .with_artifact("compile", "g", "a", "1", true)
            .with_artifact("compile", "g", "b", "1", true)
            .failing_descriptor("b");
        let resolution = host.resolver().resolve(&host.scope("compile"));
        assert!(matches!(resolution, ScopeResolution::Failed(_)));
    }

    #[test]
    fn test_resolves_artifact_with_descriptor() {
        let host = FakeHost::new().with_artifact("compile", "group0", "artifact0", "0.0", true);
        let resolution = host.resolver().resolve(&host.scope("compile"));

        let infos: Vec<_> = resolution.artifacts().collect();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].group, "group0");
        assert_eq!(infos[0].name, "artifact0");
        assert_eq!(infos[0].version, "0.0");
        assert_eq!(infos[0].binary_location, "/location/artifact0");
        assert_eq!(
            infos[0].descriptor_location.as_deref(),
            Some("/poms/artifact0-0.0.pom")
        );
    }

    #[test]
    fn test_each_matching_descriptor_yields_a_record() {
        let host = FakeHost::new()
            .with_artifact("compile", "g", "twice", "1", true)
            .mirrored_descriptor("twice");
        let resolution = host.resolver().resolve(&host.scope("compile"));

        let infos: Vec<_> = resolution.artifacts().collect();
        assert_eq!(infos.len(), 2);
        assert!(infos.iter().all(|i| i.binary_location == "/location/twice"));
        let poms: Vec<_> = infos.iter().filter_map(|i| i.descriptor_location.as_deref()).collect();
        assert_eq!(poms, vec!["/mirror/poms/twice-1.pom", "/poms/twice-1.pom"]);
    }

    #[test]
    fn test_artifact_without_descriptor_is_omitted() {
        let host = FakeHost::new()
            .with_artifact("implementation", "g", "with-pom", "1", true)
            .with_artifact("implementation", "g", "no-pom", "1", false);
        let resolution = host.resolver().resolve(&host.scope("implementation"));

        let names: Vec<_> = resolution.artifacts().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["with-pom"]);
    }

    #[test]
    fn test_duplicate_artifacts_collapse() {
        let host = FakeHost::new()
            .with_artifact("api", "g", "a", "1", true)
            .with_artifact("api", "g", "a", "1", true);
        let resolution = host.resolver().resolve(&host.scope("api"));
        assert_eq!(resolution.artifacts().count(), 1);
    }
}
