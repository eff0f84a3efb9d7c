use std::fs;

use helpers::views::TestLog;
use rstest::rstest;
use temp_dir::TempDir;

use watch_depth::{reader::ReaderOptions, VideoCounts};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_read_file() {
    init_logger();
    let dir = TempDir::new().expect("Could not create temporary directory");
    let log = TestLog::new(6, 100, 4., 0.2, Some(3));
    let path = log.write(&dir);

    let videos: Vec<String> = log.videos().iter().map(|v| format!("video-{}", v)).collect();
    let mut counts = VideoCounts::new(videos).unwrap();
    let stats = counts
        .read_file(&path, &ReaderOptions::default())
        .expect("Error while reading the log");

    assert_eq!(stats.events as usize, log.views.len());
    assert_eq!(stats.malformed, 0);

    let report = counts.report().unwrap();
    let at_least: Vec<u64> = report.at_least.iter().map(|c| c.users).collect();
    let exactly: Vec<u64> = report.exactly.iter().map(|c| c.users).collect();
    assert_eq!(at_least, log.expected_at_least());
    assert_eq!(exactly, log.expected_exactly());
}

#[rstest]
#[case(false, true)]
#[case(true, false)]
fn test_malformed_lines(#[case] skip_malformed: bool, #[case] fails: bool) {
    let dir = TempDir::new().expect("Could not create temporary directory");
    let path = dir.child("views.tsv");
    fs::write(
        &path,
        "time\tuser\tvideo\n1\tu1\tA\n2\tu1\n3\tu2\tB\n4\tu1\tB\n",
    )
    .unwrap();

    let options = ReaderOptions {
        delimiter: '\t',
        video_column: 2,
        user_column: 1,
        skip_header: true,
        skip_malformed,
        ..Default::default()
    };

    let mut counts = VideoCounts::new(["A".to_string(), "B".to_string()]).unwrap();
    let result = counts.read_file(&path, &options);
    assert_eq!(result.is_err(), fails);

    if !fails {
        let stats = result.unwrap();
        assert_eq!(stats.malformed, 1);
        assert_eq!(counts.exactly(2).unwrap(), 1);
        assert_eq!(counts.exactly(1).unwrap(), 1);
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().expect("Could not create temporary directory");
    let mut counts = VideoCounts::new(["A".to_string()]).unwrap();
    assert!(counts
        .read_file(&dir.child("missing.csv"), &ReaderOptions::default())
        .is_err());
}
