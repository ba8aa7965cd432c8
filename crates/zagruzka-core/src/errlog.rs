use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append-only failure log kept in the working directory.
pub const ERROR_LOG: &str = "error_log.txt";

/// Append one failure line to the error log in `dir`. Best-effort: a
/// logging failure must never mask the failure being recorded.
pub fn append_error(dir: &Path, message: &str) {
    let path = dir.join(ERROR_LOG);
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = writeln!(file, "Error: {}", message);
    }
}
