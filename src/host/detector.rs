use std::path::{Path, PathBuf};

use super::gradle::GradleLockfileSource;
use super::graph::GraphSource;
use super::maven::MavenPomSource;
use super::ScopeSource;

/// Build description formats that can supply dependency scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Graph,
    GradleLockfile,
    MavenPom,
}

impl SourceKind {
    /// Infer the format from a file name; anything unrecognised is read as a
    /// graph export.
    pub fn from_path(path: &Path) -> Self {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if file_name.ends_with(".lockfile") {
            SourceKind::GradleLockfile
        } else if file_name == "pom.xml" || file_name.ends_with(".pom") {
            SourceKind::MavenPom
        } else {
            SourceKind::Graph
        }
    }

    pub fn source(self) -> Box<dyn ScopeSource> {
        match self {
            SourceKind::Graph => Box::new(GraphSource::new()),
            SourceKind::GradleLockfile => Box::new(GradleLockfileSource::new()),
            SourceKind::MavenPom => Box::new(MavenPomSource::new()),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Graph => write!(f, "dependency graph"),
            SourceKind::GradleLockfile => write!(f, "Gradle lockfile"),
            SourceKind::MavenPom => write!(f, "Maven POM"),
        }
    }
}

/// Pick the most precise scope source present in `path`.
///
/// A graph export carries hierarchy and resolvability, so it wins over a
/// lockfile, which wins over a POM.
pub fn detect_source(path: &Path) -> Option<(SourceKind, PathBuf)> {
    [
        ("dependency-graph.json", SourceKind::Graph),
        ("gradle.lockfile", SourceKind::GradleLockfile),
        ("pom.xml", SourceKind::MavenPom),
    ]
    .into_iter()
    .map(|(file, kind)| (kind, path.join(file)))
    .find(|(_, file)| file.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_path() {
        assert_eq!(SourceKind::from_path(Path::new("a/gradle.lockfile")), SourceKind::GradleLockfile);
        assert_eq!(SourceKind::from_path(Path::new("pom.xml")), SourceKind::MavenPom);
        assert_eq!(SourceKind::from_path(Path::new("graph.json")), SourceKind::Graph);
    }

    #[test]
    fn test_detect_prefers_graph() {
        let dir = tempdir().unwrap();
        assert_eq!(detect_source(dir.path()), None);

        fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();
        assert_eq!(detect_source(dir.path()).unwrap().0, SourceKind::MavenPom);

        fs::write(dir.path().join("gradle.lockfile"), "").unwrap();
        assert_eq!(detect_source(dir.path()).unwrap().0, SourceKind::GradleLockfile);

        fs::write(dir.path().join("dependency-graph.json"), "{}").unwrap();
        let (kind, file) = detect_source(dir.path()).unwrap();
        assert_eq!(kind, SourceKind::Graph);
        assert_eq!(file, dir.path().join("dependency-graph.json"));
    }
}
