use anyhow::Result;
use reqwest::Client;

use crate::models::Coordinate;

/// URL of a coordinate's descriptor in a Maven-layout remote repository.
pub fn descriptor_url(remote: &str, coordinate: &Coordinate, extension: &str) -> String {
    let group_path = coordinate.group.replace('.', "/");
    format!(
        "{}/{}/{}/{}/{}-{}.{}",
        remote.trim_end_matches('/'),
        group_path,
        coordinate.name,
        coordinate.version,
        coordinate.name,
        coordinate.version,
        extension
    )
}

/// Fetch a descriptor document from a remote repository such as Maven Central.
///
/// Returns `Ok(None)` when the repository has no such document.
pub async fn fetch_descriptor(
    client: &Client,
    remote: &str,
    coordinate: &Coordinate,
    extension: &str,
) -> Result<Option<String>> {
    let url = descriptor_url(remote, coordinate, extension);

    let response = client
        .get(&url)
        .header("User-Agent", concat!("license-snapshot/", env!("CARGO_PKG_VERSION")))
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    Ok(Some(response.text().await?))
}
