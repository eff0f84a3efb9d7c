//! Reads (video, user) views from a delimited log

use std::io::BufRead;

use derivative::Derivative;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use serde::{Deserialize, Serialize};
use simple_error::SimpleError;

use crate::base::{BoxResult, Count};

const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {pos} lines";

/// Number of lines between two progress updates
const PROGRESS_STEP: u64 = 10_000;

#[derive(Derivative, Clone, Debug)]
#[derivative(Default)]
pub struct ReaderOptions {
    /// Field separator
    #[derivative(Default(value = "','"))]
    pub delimiter: char,

    /// Column of the video identifier
    #[derivative(Default(value = "0"))]
    pub video_column: usize,

    /// Column of the user identifier
    #[derivative(Default(value = "1"))]
    pub user_column: usize,

    /// Ignore the first line
    pub skip_header: bool,

    /// Log and skip lines without a video or a user instead of failing
    pub skip_malformed: bool,

    /// Display a spinner on the terminal while reading
    pub show_progress: bool,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    /// Lines read (including header and empty lines)
    pub lines: Count,

    /// Views handed over
    pub events: Count,

    /// Skipped malformed lines
    pub malformed: Count,
}

/// Outcome of parsing a single line
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedLine {
    Empty,
    Malformed,
    View(String, String),
}

/// Extracts the (video, user) pair of a log line
pub fn parse_line(line: &str, options: &ReaderOptions) -> ParsedLine {
    if line.trim().is_empty() {
        return ParsedLine::Empty;
    }

    let fields: Vec<&str> = line.split(options.delimiter).map(str::trim).collect();
    match (
        fields.get(options.video_column),
        fields.get(options.user_column),
    ) {
        (Some(video), Some(user)) if !video.is_empty() && !user.is_empty() => {
            ParsedLine::View(video.to_string(), user.to_string())
        }
        _ => ParsedLine::Malformed,
    }
}

fn progress_bar(show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::default_spinner().template(SPINNER_TEMPLATE));
    progress
}

/// Reads all the views, calling `on_view(video, user)` for each of them
pub fn read_events<R, F>(reader: R, options: &ReaderOptions, mut on_view: F) -> BoxResult<ReadStats>
where
    R: BufRead,
    F: FnMut(String, String),
{
    let mut stats = ReadStats::default();
    let progress = progress_bar(options.show_progress);

    for line in reader.lines() {
        let line = line?;
        stats.lines += 1;
        if stats.lines % PROGRESS_STEP == 0 {
            progress.inc(PROGRESS_STEP);
        }

        if options.skip_header && stats.lines == 1 {
            continue;
        }

        match parse_line(&line, options) {
            ParsedLine::Empty => {}
            ParsedLine::View(video, user) => {
                stats.events += 1;
                on_view(video, user);
            }
            ParsedLine::Malformed if options.skip_malformed => {
                warn!("Skipping malformed line {}: {:?}", stats.lines, line);
                stats.malformed += 1;
            }
            ParsedLine::Malformed => {
                progress.abandon();
                return Err(SimpleError::new(format!(
                    "malformed line {} (expected video in column {} and user in column {}): {:?}",
                    stats.lines, options.video_column, options.user_column, line
                ))
                .into());
            }
        }
    }

    progress.finish_and_clear();
    Ok(stats)
}
