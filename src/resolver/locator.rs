use std::path::PathBuf;

use tracing::trace;

use crate::error::ResolveError;
use crate::host::{DescriptorCandidate, DescriptorQuery};
use crate::models::Coordinate;

/// Finds the descriptor document (POM) belonging to a coordinate.
pub struct MetadataLocator<'a> {
    query: &'a dyn DescriptorQuery,
    extension: String,
}

impl<'a> MetadataLocator<'a> {
    pub fn new(query: &'a dyn DescriptorQuery, extension: impl Into<String>) -> Self {
        Self {
            query,
            extension: extension.into(),
        }
    }

    /// Resolved candidates named exactly `{name}-{version}.{ext}`.
    ///
    /// Failed candidates and other file names (classifiers, relocations) are
    /// dropped. Usually zero or one path comes back.
    pub fn locate_descriptors(&self, coordinate: &Coordinate) -> Result<Vec<PathBuf>, ResolveError> {
        let expected = format!(
            "{}-{}.{}",
            coordinate.name, coordinate.version, self.extension
        );

        let located = self
            .query
            .query(coordinate)?
            .into_iter()
            .filter_map(|candidate| match candidate {
                DescriptorCandidate::Resolved(path) => Some(path),
                DescriptorCandidate::Failed(reason) => {
                    trace!(artifact = %coordinate, %reason, "descriptor candidate failed");
                    None
                }
            })
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n == expected)
            })
            .collect();

        Ok(located)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedQuery(Vec<DescriptorCandidate>);

    impl DescriptorQuery for FixedQuery {
        fn query(&self, _: &Coordinate) -> Result<Vec<DescriptorCandidate>, ResolveError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenQuery;

    impl DescriptorQuery for BrokenQuery {
        fn query(&self, _: &Coordinate) -> Result<Vec<DescriptorCandidate>, ResolveError> {
            Err(ResolveError::Io {
                path: PathBuf::from("/repo"),
                source: std::io::Error::other("offline"),
            })
        }
    }

    fn coordinate() -> Coordinate {
        Coordinate::new("groupA", "deps1", "1")
    }

    #[test]
    fn test_keeps_only_matching_file_name() {
        let query = FixedQuery(vec![
            DescriptorCandidate::Resolved(PathBuf::from("/repo/deps1-1.pom")),
            DescriptorCandidate::Resolved(PathBuf::from("/repo/deps1-1-sources.pom")),
            DescriptorCandidate::Resolved(PathBuf::from("/repo/deps1-2.pom")),
            DescriptorCandidate::Failed("unreachable".to_string()),
        ]);
        let locator = MetadataLocator::new(&query, "pom");
        assert_eq!(
            locator.locate_descriptors(&coordinate()).unwrap(),
            vec![PathBuf::from("/repo/deps1-1.pom")]
        );
    }

    #[test]
    fn test_extension_is_configurable() {
        let query = FixedQuery(vec![DescriptorCandidate::Resolved(PathBuf::from(
            "/repo/deps1-1.module",
        ))]);
        assert!(MetadataLocator::new(&query, "pom")
            .locate_descriptors(&coordinate())
            .unwrap()
            .is_empty());
        assert_eq!(
            MetadataLocator::new(&query, "module")
                .locate_descriptors(&coordinate())
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_query_failure_propagates() {
        let locator = MetadataLocator::new(&BrokenQuery, "pom");
        assert!(locator.locate_descriptors(&coordinate()).is_err());
    }
}
