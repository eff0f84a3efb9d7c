//! Rank queries over a settled depth histogram

use serde::{Deserialize, Serialize};

use crate::base::{Count, Depth, Len};
use crate::error::{check_range, Result};
use crate::histogram::DepthHistogram;

/// Number of users for a given depth
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthCount {
    pub depth: Depth,
    pub users: Count,
}

impl std::fmt::Display for DepthCount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} video: {} users", self.depth, self.users)
    }
}

/// Both query families, for every depth from 0 to N
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DepthReport {
    /// Number of tracked videos
    pub videos: usize,

    /// Users who watched at least `depth` videos
    pub at_least: Vec<DepthCount>,

    /// Users who watched exactly `depth` videos
    pub exactly: Vec<DepthCount>,
}

/// Answers "at least k" and "exactly k" queries
pub struct RankQueries<'a> {
    histogram: &'a DepthHistogram,
}

impl<'a> RankQueries<'a> {
    pub fn new(histogram: &'a DepthHistogram) -> Self {
        Self { histogram }
    }

    /// Number of users who watched at least `depth` tracked videos
    /// (0 ≤ depth ≤ N)
    pub fn at_least(&self, depth: Depth) -> Result<Count> {
        let size = self.histogram.len();
        check_range(depth, 0, size)?;

        let tree = self.histogram.tree();
        if depth == 0 {
            return tree.prefix_sum(size);
        }
        tree.prefix_sum(self.histogram.rank_index(depth)?)
    }

    /// Number of users who watched exactly `depth` tracked videos
    /// (0 ≤ depth ≤ N)
    ///
    /// Users are only known once they watched a tracked video, hence
    /// `exactly(0)` is always 0.
    pub fn exactly(&self, depth: Depth) -> Result<Count> {
        check_range(depth, 0, self.histogram.len())?;

        if depth == 0 {
            return Ok(0);
        }
        self.histogram
            .tree()
            .point_value(self.histogram.rank_index(depth)?)
    }

    /// Computes both query families for all depths
    pub fn report(&self) -> Result<DepthReport> {
        let size = self.histogram.len();
        let mut at_least = Vec::with_capacity(size + 1);
        let mut exactly = Vec::with_capacity(size + 1);

        for depth in 0..=size {
            at_least.push(DepthCount {
                depth,
                users: self.at_least(depth)?,
            });
            exactly.push(DepthCount {
                depth,
                users: self.exactly(depth)?,
            });
        }

        Ok(DepthReport {
            videos: size,
            at_least,
            exactly,
        })
    }
}
