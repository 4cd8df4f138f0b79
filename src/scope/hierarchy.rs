use std::collections::{BTreeMap, BTreeSet};

use crate::models::DependencyScope;

/// Fill in each scope's `ancestors` from direct `extends` edges.
///
/// `extends` maps a scope name to the scopes it directly inherits from. The
/// result is the transitive closure; cycles are tolerated and a scope never
/// lists itself. Parents that are not among `scopes` still count as ancestors.
pub fn apply_hierarchy(scopes: &mut [DependencyScope], extends: &BTreeMap<String, Vec<String>>) {
    for scope in scopes.iter_mut() {
        let mut seen = BTreeSet::new();
        let mut pending: Vec<&str> = extends
            .get(&scope.name)
            .map(|parents| parents.iter().map(String::as_str).collect())
            .unwrap_or_default();

        while let Some(parent) = pending.pop() {
            if parent == scope.name || !seen.insert(parent.to_string()) {
                continue;
            }
            if let Some(grandparents) = extends.get(parent) {
                pending.extend(grandparents.iter().map(String::as_str));
            }
        }

        scope.ancestors.extend(seen);
    }
}
