use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::models::{DeclaredDependency, DependencyScope};

const DEFAULT_SCOPE: &str = "compile";
const DEFAULT_TYPE: &str = "jar";

/// Scope source for Maven projects.
///
/// Each `<dependency>` in `pom.xml` lands in the scope named by its `<scope>`
/// element (`compile` when absent). `<type>` becomes the artifact extension.
/// Dependencies without a literal `<version>` are skipped, since property and
/// BOM interpolation is left to Maven.
pub struct MavenPomSource;

impl MavenPomSource {
    pub fn new() -> Self {
        Self
    }
}

impl super::ScopeSource for MavenPomSource {
    fn scopes(&self, path: &Path) -> Result<Vec<DependencyScope>> {
        let content = std::fs::read_to_string(path)?;
        parse_pom_xml(&content)
    }
}

#[derive(Default)]
struct PomDependency {
    group_id: String,
    artifact_id: String,
    version: String,
    scope: String,
    kind: String,
}

impl PomDependency {
    fn into_declared(self) -> Option<(String, DeclaredDependency)> {
        if self.artifact_id.is_empty() || self.version.is_empty() || self.version.contains("${")
        {
            return None;
        }
        let mut dep = DeclaredDependency::new(&self.group_id, &self.artifact_id, &self.version);
        dep.extension = if self.kind.is_empty() {
            DEFAULT_TYPE.to_string()
        } else {
            self.kind
        };
        let scope = if self.scope.is_empty() {
            DEFAULT_SCOPE.to_string()
        } else {
            self.scope
        };
        Some((scope, dep))
    }
}

/// Parse the `<dependencies>` block of a POM using the quick-xml event API.
///
/// `<dependencyManagement>` entries are declarations, not dependencies, and are
/// ignored.
fn parse_pom_xml(content: &str) -> Result<Vec<DependencyScope>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut scopes: BTreeMap<String, DependencyScope> = BTreeMap::new();
    let mut buf = Vec::new();

    let mut path: Vec<String> = Vec::new();
    let mut current: Option<PomDependency> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                if name == "dependency" && is_project_dependencies(&path) {
                    current = Some(PomDependency::default());
                }
                path.push(name);
            }
            Event::End(_) => {
                if let Some(name) = path.pop() {
                    if name == "dependency" && is_project_dependencies(&path) {
                        if let Some((scope, dep)) = current.take().and_then(|d| d.into_declared())
                        {
                            scopes
                                .entry(scope.clone())
                                .or_insert_with(|| DependencyScope::new(scope))
                                .dependencies
                                .push(dep);
                        }
                    }
                }
            }
            Event::Text(ref e) => {
                // Only direct children of <dependency>, not <exclusion> fields.
                if let (Some(dep), [.., parent, tag]) = (current.as_mut(), path.as_slice()) {
                    if parent == "dependency" {
                        let text = e.unescape().unwrap_or_default().into_owned();
                        match tag.as_str() {
                            "groupId" => dep.group_id = text,
                            "artifactId" => dep.artifact_id = text,
                            "version" => dep.version = text,
                            "scope" => dep.scope = text,
                            "type" => dep.kind = text,
                            _ => {}
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(scopes.into_values().collect())
}

/// True inside `project > dependencies` or a profile's `dependencies`. Managed
/// versions and build plugin dependencies never ship.
fn is_project_dependencies(path: &[String]) -> bool {
    match path {
        [.., parent, last] if last == "dependencies" => {
            parent != "dependencyManagement" && parent != "plugin"
        }
        _ => false,
    }
}
