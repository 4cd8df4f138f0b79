//! `license-snapshot` — record the license-relevant dependencies of a build.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and load config ([`config::load_config`]).
//! 2. Read dependency scopes from the build description ([`host`]).
//! 3. Optionally fetch missing POMs into the local repository (`--online`, [`registry`]).
//! 4. Resolve every eligible scope ([`scope::classifier`], [`resolver`]).
//! 5. Fold the results into one snapshot ([`snapshot::aggregate_outcomes`]).
//! 6. Rewrite the snapshot file only if it changed ([`snapshot::store`]).
//! 7. Render the requested report ([`report`]).

mod cli;
mod config;
mod error;
mod host;
mod models;
mod registry;
mod report;
mod resolver;
mod scope;
mod snapshot;
#[cfg(test)]
mod testing;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use config::load_config;
use host::detector::{detect_source, SourceKind};
use host::local_repo::LocalRepository;
use resolver::{ArtifactResolver, MetadataLocator};
use snapshot::store::{to_canonical_json, SnapshotStore};
use snapshot::{aggregate_outcomes, resolve_all};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;

    // Pick the build description: explicit --graph, else auto-detect
    let (kind, graph_file) = match &cli.graph {
        Some(file) => (SourceKind::from_path(file), file.clone()),
        None => match detect_source(&path) {
            Some(found) => found,
            None => {
                eprintln!(
                    "No dependency-graph.json, gradle.lockfile or pom.xml found in {}",
                    path.display()
                );
                std::process::exit(1);
            }
        },
    };

    let mut scopes = kind.source().scopes(&graph_file)?;
    config.apply_scope_overrides(&mut scopes);

    if !cli.quiet {
        eprintln!(
            "  {} {} {} scopes",
            "→".cyan(),
            kind,
            scopes.len()
        );
    }

    let repo_root = match &cli.repository {
        Some(root) => under_project(&path, root),
        None => config.repository.local_root(&path),
    };
    let extension = config.repository.descriptor_extension.as_str();
    let repo = LocalRepository::new(repo_root, extension);

    // Online: fill the local repository with descriptors it lacks
    if cli.online {
        let missing = registry::missing_descriptors(&scopes, &repo);
        if !missing.is_empty() {
            let stored = registry::prefetch_descriptors(
                &missing,
                &repo,
                &config.repository.remote,
                extension,
                cli.quiet,
            )
            .await?;
            if !cli.quiet {
                eprintln!(
                    "  {} fetched {} of {} missing descriptors",
                    "→".cyan(),
                    stored,
                    missing.len()
                );
            }
        }
    }

    let resolver = ArtifactResolver::new(&repo, MetadataLocator::new(&repo, extension));
    let outcomes = resolve_all(&resolver, &scopes);
    let snapshot = aggregate_outcomes(&outcomes);

    let output = under_project(&path, cli.output.as_ref().unwrap_or(&config.output.path));

    let store = SnapshotStore::new(output);
    let outcome = store
        .commit(&snapshot)
        .with_context(|| format!("persisting snapshot to {}", store.path().display()))?;

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(
                &snapshot,
                &outcomes,
                outcome,
                store.path(),
                cli.verbose,
                cli.quiet,
            );
        }
        ReportFormat::Json => {
            print!("{}", to_canonical_json(&snapshot)?);
        }
    }

    Ok(())
}

/// Relative paths on the command line and in config are taken from the
/// project directory, not the working directory.
fn under_project(project: &Path, path: &Path) -> PathBuf {
    project.join(path)
}

/// Diagnostics go to stderr. `RUST_LOG` wins; otherwise `--verbose` selects
/// debug and the default is warnings only.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
