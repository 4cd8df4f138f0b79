//! Report renderers for a snapshot pass.
//!
//! - [`terminal`] — colored summary box, failed scopes, and (with `--verbose`)
//!   a table of every record.
//!
//! The JSON report is the canonical snapshot serialization itself.

pub mod terminal;
