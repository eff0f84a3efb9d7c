//! Counts users by the number of distinct tracked videos they watched.
//!
//! Views are deduplicated per user ([tracker]), the resulting depths are
//! accumulated in a Fenwick tree indexed by inverted rank ([histogram]), and
//! [query] answers "at least k" and "exactly k" from it. [counts] ties the
//! three together for a single run.

pub mod base;
pub mod counts;
pub mod error;
pub mod fenwick;
pub mod histogram;
pub mod query;
pub mod reader;
pub mod report;
pub mod tracker;

#[cfg(feature = "python")]
pub mod py;

pub use counts::{IngestStats, VideoCounts};
pub use error::{Error, Result};
pub use query::{DepthCount, DepthReport, RankQueries};
