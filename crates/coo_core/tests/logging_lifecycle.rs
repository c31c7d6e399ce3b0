//! Start, stop and restart of the process-wide logger.
//!
//! Kept to a single test: the subscriber is global to this binary.

use std::fs;
use std::path::{Path, PathBuf};

use coo_core::{LogConfig, init_logging};

fn log_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("coo_core_{}_{tag}.log", std::process::id()))
}

fn file_only(path: &Path, level: u8) -> LogConfig {
    LogConfig {
        console: false,
        file: Some(path.to_path_buf()),
        console_level: 0,
        file_level: level,
    }
}

#[test]
fn guards_control_the_log_file() {
    let (a, b, c) = (log_path("a"), log_path("b"), log_path("c"));

    let guard = init_logging(&file_only(&a, 2)).unwrap();
    tracing::warn!("written to a");
    tracing::debug!("below the file level");
    guard.flush();
    drop(guard);

    let closed = fs::read_to_string(&a).unwrap();
    assert!(closed.contains("logging initialized"));
    assert!(closed.contains("written to a"));
    assert!(closed.contains("logging shut down"));
    assert!(!closed.contains("below the file level"));
    tracing::error!("after shutdown");
    assert_eq!(fs::read_to_string(&a).unwrap(), closed);

    // A newer init takes over; dropping the older guard leaves it running.
    let stale = init_logging(&file_only(&b, 4)).unwrap();
    let current = init_logging(&file_only(&c, 4)).unwrap();
    drop(stale);
    tracing::debug!("written to c");
    drop(current);

    let b_text = fs::read_to_string(&b).unwrap();
    let c_text = fs::read_to_string(&c).unwrap();
    assert!(!b_text.contains("written to c"));
    assert!(c_text.contains("written to c"));
    assert!(c_text.contains("logging shut down"));
    assert_eq!(fs::read_to_string(&a).unwrap(), closed);

    for path in [a, b, c] {
        let _ = fs::remove_file(path);
    }
}
