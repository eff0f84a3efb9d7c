//! Errors raised by the counting engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The tracked video set contains the same identifier twice
    #[error("video {0} appears more than once in the tracked set")]
    DuplicateVideo(String),

    /// An index or depth outside of the accepted closed range
    #[error("index {index} is out of range [{min}, {max}]")]
    OutOfRange {
        index: usize,
        min: usize,
        max: usize,
    },

    /// An update would bring a count below zero
    #[error("count at index {index} would become negative")]
    NegativeCount { index: usize },

    /// An update would bring a count above `u64::MAX`
    #[error("count at index {index} would overflow")]
    CountOverflow { index: usize },

    /// Two runs that do not track the same videos
    #[error("tracked videos differ: {0} is not tracked by both runs")]
    TrackedMismatch(String),

    /// Two structures built for different tracked set sizes
    #[error("size mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Checks that `index` lies in `[min, max]`
#[inline]
pub(crate) fn check_range(index: usize, min: usize, max: usize) -> Result<()> {
    if index < min || index > max {
        return Err(Error::OutOfRange { index, min, max });
    }
    Ok(())
}
