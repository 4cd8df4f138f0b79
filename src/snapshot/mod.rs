//! Folding scope results into a [`Snapshot`] and persisting it.
//!
//! - [`aggregate_outcomes`] — union of every scope's contribution.
//! - [`store`] — compare against the file on disk and rewrite only on change.

pub mod store;

use tracing::{debug, warn};

use crate::models::{DependencyScope, Snapshot};
use crate::resolver::{ArtifactResolver, ScopeResolution};

/// A scope's name together with what resolving it produced.
#[derive(Debug)]
pub struct ScopeOutcome {
    pub scope: String,
    pub resolution: ScopeResolution,
}

/// Resolve every scope, one at a time, in the order given.
pub fn resolve_all<'s>(
    resolver: &ArtifactResolver<'_>,
    scopes: impl IntoIterator<Item = &'s DependencyScope>,
) -> Vec<ScopeOutcome> {
    scopes
        .into_iter()
        .map(|scope| ScopeOutcome {
            scope: scope.name.clone(),
            resolution: resolver.resolve(scope),
        })
        .collect()
}

/// Union of all contributions. Failed scopes contribute nothing.
pub fn aggregate_outcomes(outcomes: &[ScopeOutcome]) -> Snapshot {
    outcomes.iter().fold(Snapshot::new(), |snapshot, outcome| {
        match &outcome.resolution {
            ScopeResolution::Skipped => debug!(scope = %outcome.scope, "not eligible, skipped"),
            ScopeResolution::Failed(e) => {
                warn!(scope = %outcome.scope, error = %e, "could not resolve scope, contributing nothing")
            }
            ScopeResolution::Resolved(set) => {
                debug!(scope = %outcome.scope, records = set.len(), "resolved")
            }
        }
        snapshot.union(outcome.resolution.artifacts().cloned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn test_same_artifact_in_two_scopes_dedups() {
        let host = FakeHost::new()
            .with_artifact("compile", "g", "shared", "1", true)
            .with_artifact("implementation", "g", "shared", "1", true);
        let scopes = [host.scope("compile"), host.scope("implementation")];

        let snapshot = aggregate_outcomes(&resolve_all(&host.resolver(), &scopes));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_failed_scope_does_not_abort_pass() {
        let host = FakeHost::new()
            .with_artifact("compile", "g", "lost", "1", true)
            .with_artifact("implementation", "g", "kept", "1", true)
            .with_artifact("api", "g", "also-kept", "2", true)
            .failing("compile");
        let scopes = [
            host.scope("compile"),
            host.scope("implementation"),
            host.scope("api"),
        ];

        let outcomes = resolve_all(&host.resolver(), &scopes);
        assert!(matches!(outcomes[0].resolution, ScopeResolution::Failed(_)));

        let snapshot = aggregate_outcomes(&outcomes);
        let names: Vec<_> = snapshot.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["also-kept", "kept"]);
    }

    #[test]
    fn test_scope_order_does_not_matter() {
        let host = FakeHost::new()
            .with_artifact("compile", "g", "a", "1", true)
            .with_artifact("compile", "g", "b", "1", true)
            .with_artifact("api", "g", "b", "1", true)
            .with_artifact("api", "g", "c", "1", true)
            .with_artifact("testCompile", "g", "d", "1", true);
        let forward = [host.scope("compile"), host.scope("api"), host.scope("testCompile")];
        let backward = [host.scope("testCompile"), host.scope("api"), host.scope("compile")];

        let resolver = host.resolver();
        let a = aggregate_outcomes(&resolve_all(&resolver, &forward));
        let b = aggregate_outcomes(&resolve_all(&resolver, &backward));
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_no_scopes_gives_empty_snapshot() {
        let host = FakeHost::new();
        let snapshot = aggregate_outcomes(&resolve_all(&host.resolver(), &Vec::<DependencyScope>::new()));
        assert!(snapshot.is_empty());
    }
}
