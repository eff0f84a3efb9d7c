//! Histogram of user watch depths, stored by inverted rank
//!
//! A depth `k` (1 ≤ k ≤ N) lives at tree index `N - k + 1`, so that the
//! prefix sums of the tree count users with a depth *at least* `k`.

use log::trace;

use crate::base::{Count, Depth, Len};
use crate::error::{check_range, Result};
use crate::fenwick::FenwickTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthHistogram {
    tree: FenwickTree,

    /// Number of depth changes recorded
    recorded: Count,

    /// Number of users that reached depth 1
    users: Count,
}

impl DepthHistogram {
    /// Creates an empty histogram for `size` tracked videos
    pub fn new(size: usize) -> Self {
        Self {
            tree: FenwickTree::new(size),
            recorded: 0,
            users: 0,
        }
    }

    /// Tree index of the depth `depth` (1 ≤ depth ≤ N)
    pub fn rank_index(&self, depth: Depth) -> Result<usize> {
        check_range(depth, 1, self.len())?;
        Ok(self.len() - depth + 1)
    }

    /// Records that a user just reached `depth`
    ///
    /// Depths of a user grow one by one, so the user is moved from
    /// `depth - 1` to `depth`: the histogram always holds the current depth
    /// of each user. A depth of 0 is ignored.
    pub fn record_depth(&mut self, depth: Depth) -> Result<()> {
        if depth == 0 {
            return Ok(());
        }

        let index = self.rank_index(depth)?;
        if depth > 1 {
            // depth - 1 is at index + 1
            self.tree.update(index + 1, -1)?;
        }
        self.tree.update(index, 1)?;

        if depth == 1 {
            self.users += 1;
        }
        self.recorded += 1;
        trace!("Recorded depth {} (tree index {})", depth, index);
        Ok(())
    }

    /// Number of recorded depth changes (i.e. first-time watches)
    pub fn total_recorded(&self) -> Count {
        self.recorded
    }

    /// Number of users with a depth of at least 1
    pub fn users(&self) -> Count {
        self.users
    }

    pub fn tree(&self) -> &FenwickTree {
        &self.tree
    }

    /// Adds the users of another histogram built for the same number of
    /// videos
    ///
    /// Users of `other` are assumed to be distinct from the users of this
    /// histogram.
    pub fn merge(&mut self, other: &DepthHistogram) -> Result<()> {
        self.tree.merge(&other.tree)?;
        self.recorded += other.recorded;
        self.users += other.users;
        Ok(())
    }
}

impl Len for DepthHistogram {
    fn len(&self) -> usize {
        self.tree.len()
    }
}
