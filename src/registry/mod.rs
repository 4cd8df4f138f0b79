//! Fetching descriptor documents missing from the local repository.
//!
//! [`prefetch_descriptors`] downloads every absent POM for the eligible scopes
//! into the local repository before the pipeline runs, so resolution itself
//! stays offline and sequential.

pub mod maven;

use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::Result;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::host::local_repo::LocalRepository;
use crate::models::{Coordinate, DependencyScope};
use crate::scope::classifier::is_eligible;

const BATCH_SIZE: usize = 75;

/// Coordinates of eligible scopes whose descriptor is not on disk yet.
pub fn missing_descriptors(scopes: &[DependencyScope], repo: &LocalRepository) -> Vec<Coordinate> {
    scopes
        .iter()
        .filter(|s| is_eligible(s))
        .flat_map(|s| s.dependencies.iter().map(|d| &d.coordinate))
        .filter(|c| !repo.descriptor_path(c).exists())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Download missing descriptors into `repo`. Returns how many were stored.
///
/// Individual fetch or write failures only cost that descriptor.
pub async fn prefetch_descriptors(
    coordinates: &[Coordinate],
    repo: &LocalRepository,
    remote: &str,
    extension: &str,
    quiet: bool,
) -> Result<usize> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let pb = if !quiet {
        let pb = ProgressBar::new(coordinates.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut stored = 0;
    for batch in coordinates.chunks(BATCH_SIZE) {
        let futures: Vec<_> = batch
            .iter()
            .map(|c| maven::fetch_descriptor(&client, remote, c, extension))
            .collect();

        let results = join_all(futures).await;

        for (coordinate, result) in batch.iter().zip(results) {
            match result {
                Ok(Some(document)) => match store(repo, coordinate, &document) {
                    Ok(()) => stored += 1,
                    Err(e) => debug!(artifact = %coordinate, error = %e, "could not store descriptor"),
                },
                Ok(None) => debug!(artifact = %coordinate, "descriptor not in remote repository"),
                Err(e) => debug!(artifact = %coordinate, error = %e, "descriptor fetch failed"),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    Ok(stored)
}

fn store(repo: &LocalRepository, coordinate: &Coordinate, document: &str) -> std::io::Result<()> {
    let path = repo.descriptor_path(coordinate);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, document)
}
