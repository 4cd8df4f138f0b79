use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::DependencyScope;
use crate::scope::hierarchy::apply_hierarchy;

/// Root configuration structure, deserialized from `.license-snapshot/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Per-scope hierarchy and resolvability overrides, keyed by scope name.
    #[serde(default)]
    pub scopes: HashMap<String, ScopeOverride>,
}

/// Where the snapshot is written.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Relative paths are resolved against the project directory.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    ["build", "generated", "third_party_licenses", "dependencies.json"]
        .iter()
        .collect()
}

/// Where artifacts and descriptors are resolved from.
#[derive(Debug, Deserialize)]
pub struct RepositoryConfig {
    /// Maven-layout directory. Defaults to `~/.m2/repository`.
    pub local: Option<PathBuf>,
    /// Base URL used by `--online` to fetch missing descriptors.
    #[serde(default = "default_remote")]
    pub remote: String,
    #[serde(default = "default_descriptor_extension")]
    pub descriptor_extension: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            local: None,
            remote: default_remote(),
            descriptor_extension: default_descriptor_extension(),
        }
    }
}

fn default_remote() -> String {
    "https://repo1.maven.org/maven2".to_string()
}

fn default_descriptor_extension() -> String {
    "pom".to_string()
}

impl RepositoryConfig {
    /// Configured local repository (relative to the project), else
    /// `~/.m2/repository`, else `.m2/repository` under the project when there
    /// is no home directory.
    pub fn local_root(&self, project_path: &Path) -> PathBuf {
        if let Some(local) = &self.local {
            return project_path.join(local);
        }
        dirs::home_dir()
            .unwrap_or_else(|| project_path.to_path_buf())
            .join(".m2")
            .join("repository")
    }
}

/// Adjustments for one scope that the build description cannot express.
#[derive(Debug, Default, Deserialize)]
pub struct ScopeOverride {
    /// Additional direct parents.
    #[serde(default)]
    pub extends: Vec<String>,
    pub resolvable: Option<bool>,
}

impl Config {
    /// Merge configured overrides into scopes read from the build.
    ///
    /// Extra `extends` edges are expanded transitively, so an override on an
    /// intermediate scope reaches every scope below it.
    pub fn apply_scope_overrides(&self, scopes: &mut [DependencyScope]) {
        if self.scopes.is_empty() {
            return;
        }

        let mut extends: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, o) in &self.scopes {
            extends.insert(name.clone(), o.extends.clone());
        }
        // Ancestors already known from the build act as parents too, so that
        // overrides on them propagate.
        for scope in scopes.iter() {
            extends
                .entry(scope.name.clone())
                .or_default()
                .extend(scope.ancestors.iter().cloned());
        }

        apply_hierarchy(scopes, &extends);

        for scope in scopes.iter_mut() {
            if let Some(resolvable) = self.scopes.get(&scope.name).and_then(|o| o.resolvable) {
                scope.resolvable = resolvable;
            }
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-snapshot/config.toml`
/// 3. `~/.config/license-snapshot/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-snapshot").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-snapshot")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
