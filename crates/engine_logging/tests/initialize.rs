use std::fs;

use engine_logging::{engine_info, initialize, LogDestination, LOG_FILENAME};
use log::LevelFilter;
use tempfile::TempDir;

#[test]
fn file_destination_creates_log_dir_and_writes_lines() {
    let temp = TempDir::new().unwrap();
    let log_dir = temp.path().join("logs");
    assert!(!log_dir.exists());

    let path = initialize(LogDestination::File, LevelFilter::Info, &log_dir)
        .expect("file logger installed");
    assert_eq!(path, log_dir.join(LOG_FILENAME));

    engine_info!("Harvester started");
    log::logger().flush();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Harvester started"), "log was: {content}");
}
