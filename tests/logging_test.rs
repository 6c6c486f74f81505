//! File logging behavior.
//!
//! Lives in its own binary: the global subscriber can only be installed
//! once per process.

use gatherhub::config::LoggingConfig;
use gatherhub::utils::logging;

#[test]
fn file_layer_flushes_everything_logged_while_guard_is_held() {
    let dir = std::env::temp_dir().join(format!("gatherhub-logs-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create log dir");

    let guard = logging::init_logging(&LoggingConfig {
        level: "info".to_string(),
        file_path: dir.to_string_lossy().into_owned(),
    })
    .expect("init logging");

    for i in 0..50 {
        tracing::info!(line = i, "rsvp audit entry");
    }

    // Dropping the guard flushes the background writer; without the guard
    // alive until here, most of the lines above would never hit the file
    drop(guard);

    let mut contents = String::new();
    for entry in std::fs::read_dir(&dir).expect("read log dir") {
        let path = entry.expect("dir entry").path();
        contents.push_str(&std::fs::read_to_string(path).expect("read log file"));
    }
    let _ = std::fs::remove_dir_all(&dir);

    assert!(contents.contains("line=0"));
    assert!(
        contents.contains("line=49"),
        "last entry should reach the log file"
    );
}
