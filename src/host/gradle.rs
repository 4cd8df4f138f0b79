use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use regex::Regex;

use crate::models::{DeclaredDependency, DependencyScope};

/// Scope source for Gradle dependency locking.
///
/// Parses `gradle.lockfile` lines of the form `group:artifact:version=conf1,conf2`
/// into one scope per configuration. The `empty=` line lists configurations that
/// resolve to nothing. Lockfiles carry no hierarchy, so ancestors come from
/// configuration overrides only.
pub struct GradleLockfileSource;

impl GradleLockfileSource {
    pub fn new() -> Self {
        Self
    }
}

impl super::ScopeSource for GradleLockfileSource {
    fn scopes(&self, path: &Path) -> Result<Vec<DependencyScope>> {
        let content = std::fs::read_to_string(path)?;
        parse_gradle_lockfile(&content)
    }
}

fn parse_gradle_lockfile(content: &str) -> Result<Vec<DependencyScope>> {
    let re = Regex::new(r"^([^:=\s]+):([^:=\s]+):([^=\s]+)=(.*)$")?;
    let mut scopes: BTreeMap<String, DependencyScope> = BTreeMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(configs) = line.strip_prefix("empty=") {
            for name in split_configurations(configs) {
                scopes
                    .entry(name.to_string())
                    .or_insert_with(|| DependencyScope::new(name));
            }
            continue;
        }

        if let Some(caps) = re.captures(line) {
            let dep = DeclaredDependency::new(&caps[1], &caps[2], &caps[3]);
            for name in split_configurations(&caps[4]) {
                scopes
                    .entry(name.to_string())
                    .or_insert_with(|| DependencyScope::new(name))
                    .dependencies
                    .push(dep.clone());
            }
        }
    }

    Ok(scopes.into_values().collect())
}

fn split_configurations(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|c| !c.is_empty())
}
