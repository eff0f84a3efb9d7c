//! One counting run: deduplication, histogram and queries put together

use std::fmt::Debug;
use std::fs::File;
use std::hash::Hash;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::base::{BoxResult, Count, Depth, Len};
use crate::error::{Error, Result};
use crate::histogram::DepthHistogram;
use crate::query::{DepthReport, RankQueries};
use crate::reader::{read_events, ReadStats, ReaderOptions};
use crate::tracker::{Observation, TrackedVideos, WatchTracker};

/// What happened to the views given to a run
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    /// Total number of views
    pub views: Count,

    /// Views of videos outside the tracked set
    pub untracked: Count,

    /// Views of a video the user already watched
    pub rewatches: Count,

    /// Views that increased the depth of a user
    pub recorded: Count,
}

/// Counts users by the number of tracked videos they watched
///
/// Each run owns its tracker and histogram; views are applied as they come,
/// and queries can be issued at any point afterwards.
pub struct VideoCounts<V, U> {
    tracker: WatchTracker<V, U>,
    histogram: DepthHistogram,
    stats: IngestStats,
}

impl<V, U> VideoCounts<V, U>
where
    V: Eq + Hash + Clone + Debug,
    U: Eq + Hash + Clone + Debug,
{
    /// Creates a run for the given tracked videos (which must be distinct)
    pub fn new<I: IntoIterator<Item = V>>(videos: I) -> Result<Self> {
        let tracked = TrackedVideos::new(videos)?;
        debug!("Counting views over {} tracked videos", tracked.len());
        Ok(Self {
            histogram: DepthHistogram::new(tracked.len()),
            tracker: WatchTracker::new(tracked),
            stats: IngestStats::default(),
        })
    }

    /// Adds a view, returning the new depth of the user if it changed
    pub fn add_view(&mut self, video: &V, user: &U) -> Result<Option<Depth>> {
        self.stats.views += 1;
        match self.tracker.observe(video, user) {
            Observation::NewDepth(depth) => {
                self.histogram.record_depth(depth)?;
                self.stats.recorded += 1;
                Ok(Some(depth))
            }
            Observation::Rewatch => {
                self.stats.rewatches += 1;
                Ok(None)
            }
            Observation::Untracked => {
                self.stats.untracked += 1;
                Ok(None)
            }
        }
    }

    /// Adds a sequence of (video, user) views
    pub fn add_views<I>(&mut self, views: I) -> Result<()>
    where
        I: IntoIterator<Item = (V, U)>,
    {
        for (video, user) in views {
            self.add_view(&video, &user)?;
        }
        Ok(())
    }

    /// Adds all the views of another run over the same tracked videos (in
    /// any order)
    ///
    /// Users present in both runs are counted once, with the union of their
    /// watched videos. Statistics end up as if all the views of both runs had
    /// been given to a single run: a (video, user) pair seen by both runs
    /// counts as a rewatch.
    pub fn merge(&mut self, other: &VideoCounts<V, U>) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::SizeMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        let videos = other.tracker.tracked().videos();
        if let Some(video) = videos
            .iter()
            .find(|video| !self.tracker.tracked().contains(video))
        {
            return Err(Error::TrackedMismatch(format!("{:?}", video)));
        }

        let mut recorded = 0;
        for (user, watched) in other.tracker.watched() {
            for position in watched {
                if let Observation::NewDepth(depth) =
                    self.tracker.observe(&videos[*position], user)
                {
                    self.histogram.record_depth(depth)?;
                    recorded += 1;
                }
            }
        }

        let views = self.stats.views + other.stats.views;
        let untracked = self.stats.untracked + other.stats.untracked;
        let recorded = self.stats.recorded + recorded;
        self.stats = IngestStats {
            views,
            untracked,
            rewatches: views - untracked - recorded,
            recorded,
        };
        Ok(())
    }

    pub fn queries(&self) -> RankQueries<'_> {
        RankQueries::new(&self.histogram)
    }

    pub fn at_least(&self, depth: Depth) -> Result<Count> {
        self.queries().at_least(depth)
    }

    pub fn exactly(&self, depth: Depth) -> Result<Count> {
        self.queries().exactly(depth)
    }

    pub fn report(&self) -> Result<DepthReport> {
        self.queries().report()
    }

    pub fn histogram(&self) -> &DepthHistogram {
        &self.histogram
    }

    pub fn tracker(&self) -> &WatchTracker<V, U> {
        &self.tracker
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }
}

impl VideoCounts<String, String> {
    /// Reads the views of a log file
    pub fn read_file(&mut self, path: &Path, options: &ReaderOptions) -> BoxResult<ReadStats> {
        info!("Reading views from {}", path.display());
        let file = File::options().read(true).open(path)?;

        let mut result: Result<()> = Ok(());
        let stats = read_events(BufReader::new(file), options, |video, user| {
            if result.is_ok() {
                result = self.add_view(&video, &user).map(|_| ());
            }
        })?;
        result?;

        info!(
            "Read {} lines ({} views, {} malformed): {} users over {} videos",
            stats.lines,
            stats.events,
            stats.malformed,
            self.tracker.user_count(),
            self.len()
        );
        Ok(stats)
    }
}

impl<V, U> Len for VideoCounts<V, U> {
    fn len(&self) -> usize {
        self.histogram.len()
    }
}
