use crate::models::DependencyScope;

const TEST_PREFIXES: [&str; 2] = ["test", "androidTest"];
const TEST_ANCESTORS: [&str; 2] = ["testCompile", "androidTestCompile"];
const PACKAGED_PREFIXES: [&str; 3] = ["compile", "implementation", "api"];

/// Whether a scope's dependencies belong in the license report.
///
/// A scope qualifies when it can be resolved, is not test-only, and is packaged
/// into the final binary.
pub fn is_eligible(scope: &DependencyScope) -> bool {
    can_be_resolved(scope) && !is_test(scope) && is_packaged(scope)
}

pub fn can_be_resolved(scope: &DependencyScope) -> bool {
    scope.resolvable
}

/// Test scopes are recognised by name prefix or by inheriting from one of the
/// test compile scopes anywhere in the hierarchy.
pub fn is_test(scope: &DependencyScope) -> bool {
    TEST_PREFIXES.iter().any(|p| scope.name.starts_with(p))
        || scope
            .ancestors
            .iter()
            .any(|a| TEST_ANCESTORS.contains(&a.as_str()))
}

pub fn is_packaged(scope: &DependencyScope) -> bool {
    PACKAGED_PREFIXES.iter().any(|p| scope.name.starts_with(p))
}
