//! Dependency scope classification and hierarchy.
//!
//! - [`classifier`] — decides which scopes ship in the production artifact.
//! - [`hierarchy`] — expands direct `extends` edges into each scope's full
//!   ancestor set.

pub mod classifier;
pub mod hierarchy;
