//! Tracked videos and per-user deduplication of views

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use log::trace;

use crate::base::{Depth, Len};
use crate::error::{Error, Result};

/// The ordered set of videos whose views are counted
#[derive(Debug, Clone)]
pub struct TrackedVideos<V> {
    videos: Vec<V>,
    positions: HashMap<V, usize>,
}

impl<V> TrackedVideos<V>
where
    V: Eq + Hash + Clone + Debug,
{
    /// Builds the tracked set, failing if a video is given twice
    pub fn new<I: IntoIterator<Item = V>>(videos: I) -> Result<Self> {
        let videos: Vec<V> = videos.into_iter().collect();
        let mut positions = HashMap::with_capacity(videos.len());
        for (ix, video) in videos.iter().enumerate() {
            if positions.insert(video.clone(), ix).is_some() {
                return Err(Error::DuplicateVideo(format!("{:?}", video)));
            }
        }
        Ok(Self { videos, positions })
    }

    pub fn contains(&self, video: &V) -> bool {
        self.positions.contains_key(video)
    }

    /// Position of the video in the tracked sequence
    pub fn position(&self, video: &V) -> Option<usize> {
        self.positions.get(video).copied()
    }

    pub fn videos(&self) -> &[V] {
        &self.videos
    }
}

impl<V> Len for TrackedVideos<V> {
    fn len(&self) -> usize {
        self.videos.len()
    }
}

/// Effect of a view on the depth of its user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The video is not tracked
    Untracked,
    /// The user already watched this video
    Rewatch,
    /// First view of this video by the user, who reached the given depth
    NewDepth(Depth),
}

/// Keeps, for each user, the set of distinct tracked videos they watched
///
/// Videos are stored by their position in the tracked set.
#[derive(Debug, Clone)]
pub struct WatchTracker<V, U> {
    tracked: TrackedVideos<V>,
    users: HashMap<U, HashSet<usize>>,
}

impl<V, U> WatchTracker<V, U>
where
    V: Eq + Hash + Clone + Debug,
    U: Eq + Hash + Clone + Debug,
{
    pub fn new(tracked: TrackedVideos<V>) -> Self {
        Self {
            tracked,
            users: HashMap::new(),
        }
    }

    /// Registers a view
    pub fn observe(&mut self, video: &V, user: &U) -> Observation {
        let Some(position) = self.tracked.position(video) else {
            trace!("Ignoring untracked video {:?}", video);
            return Observation::Untracked;
        };

        let watched = self.users.entry(user.clone()).or_default();
        if !watched.insert(position) {
            trace!("User {:?} already watched {:?}", user, video);
            return Observation::Rewatch;
        }
        Observation::NewDepth(watched.len())
    }

    /// Current depth of a user (0 if never seen)
    pub fn depth_of(&self, user: &U) -> Depth {
        self.users.get(user).map_or(0, |watched| watched.len())
    }

    /// Number of users with at least one tracked view
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn tracked(&self) -> &TrackedVideos<V> {
        &self.tracked
    }

    /// Iterates over users and their watched video positions
    pub(crate) fn watched(&self) -> impl Iterator<Item = (&U, &HashSet<usize>)> {
        self.users.iter()
    }
}
