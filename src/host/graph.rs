use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{Coordinate, DeclaredDependency, DependencyScope};
use crate::scope::hierarchy::apply_hierarchy;

/// Root of a `dependency-graph.json` export.
#[derive(Debug, Deserialize)]
struct GraphExport {
    #[serde(default)]
    scopes: Vec<GraphScope>,
}

#[derive(Debug, Deserialize)]
struct GraphScope {
    name: String,
    #[serde(default = "default_resolvable")]
    resolvable: bool,
    /// Direct parents only; ancestors are derived.
    #[serde(default)]
    extends: Vec<String>,
    #[serde(default)]
    dependencies: Vec<GraphDependency>,
}

#[derive(Debug, Deserialize)]
struct GraphDependency {
    group: String,
    name: String,
    version: String,
    #[serde(default = "default_extension")]
    extension: String,
    file: Option<PathBuf>,
}

fn default_resolvable() -> bool {
    true
}

fn default_extension() -> String {
    "jar".to_string()
}

/// Scope source for an explicit JSON export of the build's dependency graph.
///
/// This is the only source that can carry `resolvable = false` and prebound
/// artifact files straight from the build.
pub struct GraphSource;

impl GraphSource {
    pub fn new() -> Self {
        Self
    }
}

impl super::ScopeSource for GraphSource {
    fn scopes(&self, path: &Path) -> Result<Vec<DependencyScope>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let base = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        parse_graph(&content, base).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Relative `file` entries are taken from `base`, the graph file's directory.
fn parse_graph(content: &str, base: &Path) -> Result<Vec<DependencyScope>> {
    let export: GraphExport = serde_json::from_str(content)?;

    let mut extends = BTreeMap::new();
    let mut scopes = Vec::with_capacity(export.scopes.len());

    for s in export.scopes {
        extends.insert(s.name.clone(), s.extends);
        let mut scope = DependencyScope::new(s.name);
        scope.resolvable = s.resolvable;
        scope.dependencies = s
            .dependencies
            .into_iter()
            .map(|d| DeclaredDependency {
                coordinate: Coordinate {
                    group: d.group,
                    name: d.name,
                    version: d.version,
                },
                extension: d.extension,
                file: d.file.map(|f| base.join(f)),
            })
            .collect();
        scopes.push(scope);
    }

    apply_hierarchy(&mut scopes, &extends);
    Ok(scopes)
}
