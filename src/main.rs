use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error};

use watch_depth::base::BoxResult;
use watch_depth::reader::ReaderOptions;
use watch_depth::report::{write_report, ReportFormat};
use watch_depth::VideoCounts;

/// Count the number of users who watched a sequence of videos
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Space separated list of video IDs
    #[arg(required = true)]
    videos: Vec<String>,

    /// Path to the log file
    #[arg(short = 'f', long = "file")]
    filepath: PathBuf,

    /// Output format (text, json or cbor)
    #[arg(long, default_value = "text")]
    format: ReportFormat,

    /// Field separator of the log file
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Column holding the video ID
    #[arg(long, default_value_t = 0)]
    video_column: usize,

    /// Column holding the user ID
    #[arg(long, default_value_t = 1)]
    user_column: usize,

    /// The first line of the log is a header
    #[arg(long)]
    skip_header: bool,

    /// Skip lines without a video or user instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Show a progress spinner while reading
    #[arg(long)]
    progress: bool,
}

fn run(args: Args) -> BoxResult<()> {
    debug!("Arguments: {:?}", args);

    let options = ReaderOptions {
        delimiter: args.delimiter,
        video_column: args.video_column,
        user_column: args.user_column,
        skip_header: args.skip_header,
        skip_malformed: args.skip_malformed,
        show_progress: args.progress,
    };

    let mut counts = VideoCounts::<String, String>::new(args.videos)?;
    counts.read_file(&args.filepath, &options)?;

    let report = counts.report()?;
    write_report(&report, args.format, io::stdout().lock())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;
    use watch_depth::report::ReportFormat;

    #[test]
    fn test_parse_options() {
        let args = Args::try_parse_from([
            "watch-depth",
            "-f",
            "views.tsv",
            "--format",
            "json",
            "--delimiter",
            "\t",
            "--video-column",
            "2",
            "--user-column",
            "0",
            "--skip-header",
            "10",
            "20",
        ])
        .unwrap();

        assert_eq!(args.videos, vec!["10".to_string(), "20".to_string()]);
        assert_eq!(args.filepath.to_str(), Some("views.tsv"));
        assert_eq!(args.format, ReportFormat::Json);
        assert_eq!(args.delimiter, '\t');
        assert_eq!(args.video_column, 2);
        assert_eq!(args.user_column, 0);
        assert!(args.skip_header);
        assert!(!args.skip_malformed);
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["watch-depth", "A", "--file", "log.csv"]).unwrap();
        assert_eq!(args.format, ReportFormat::Text);
        assert_eq!(args.delimiter, ',');
        assert_eq!((args.video_column, args.user_column), (0, 1));
    }

    #[test]
    fn test_rejected_arguments() {
        // Missing log file
        assert!(Args::try_parse_from(["watch-depth", "A", "B"]).is_err());
        // Missing videos
        assert!(Args::try_parse_from(["watch-depth", "-f", "log.csv"]).is_err());
        assert!(
            Args::try_parse_from(["watch-depth", "A", "-f", "log.csv", "--format", "xml"]).is_err()
        );
    }
}
