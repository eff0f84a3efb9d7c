use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Poisson};
use temp_dir::TempDir;

use watch_depth::base::{Count, Depth};

pub type VideoId = usize;
pub type UserId = usize;

/// Creates the views of one user: a Poisson number of views, some of them
/// rewatches, some of them of videos outside of `0..num_videos`
pub fn create_user_views(
    lambda_views: f64,
    num_videos: usize,
    untracked_ratio: f64,
    rng: &mut dyn RngCore,
) -> Vec<VideoId> {
    let poi = Poisson::new(lambda_views).unwrap();
    let num_views = 1 + poi.sample(rng) as usize;

    (0..num_views)
        .map(|_| {
            if num_videos == 0 || rng.gen_bool(untracked_ratio) {
                // Untracked video
                num_videos + rng.gen_range(0..100)
            } else {
                rng.gen_range(0..num_videos)
            }
        })
        .collect()
}

/// A random view log together with its expected counts
pub struct TestLog {
    pub num_videos: usize,
    pub views: Vec<(VideoId, UserId)>,
}

impl TestLog {
    pub fn new(
        num_videos: usize,
        num_users: usize,
        lambda_views: f64,
        untracked_ratio: f64,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        let mut views = Vec::new();
        for user in 0..num_users {
            for video in create_user_views(lambda_views, num_videos, untracked_ratio, &mut rng) {
                views.push((video, user));
            }
        }

        // Interleave the users
        views.shuffle(&mut rng);
        debug!(
            "Created {} views for {} users over {} videos",
            views.len(),
            num_users,
            num_videos
        );

        Self { num_videos, views }
    }

    pub fn videos(&self) -> Vec<VideoId> {
        (0..self.num_videos).collect()
    }

    /// Final depth of every user with at least one tracked view
    pub fn depths(&self) -> HashMap<UserId, Depth> {
        let mut watched = HashMap::<UserId, HashSet<VideoId>>::new();
        for (video, user) in self.views.iter() {
            if *video < self.num_videos {
                watched.entry(*user).or_default().insert(*video);
            }
        }
        watched
            .into_iter()
            .map(|(user, videos)| (user, videos.len()))
            .collect()
    }

    /// Expected number of users for each depth in `0..=N`
    pub fn expected_exactly(&self) -> Vec<Count> {
        let mut counts = vec![0; self.num_videos + 1];
        for depth in self.depths().values() {
            counts[*depth] += 1;
        }
        counts
    }

    /// Expected number of users with at least each depth in `0..=N`
    pub fn expected_at_least(&self) -> Vec<Count> {
        let exactly = self.expected_exactly();
        (0..=self.num_videos)
            .map(|depth| exactly[depth..].iter().sum())
            .collect()
    }

    /// Writes the log as a `video,user` file in `dir`
    pub fn write(&self, dir: &TempDir) -> PathBuf {
        let path = dir.child("views.csv");
        let mut file = File::create(&path).expect("Could not create the log file");
        for (video, user) in self.views.iter() {
            writeln!(file, "video-{},user-{}", video, user).expect("Could not write view");
        }
        path
    }
}
