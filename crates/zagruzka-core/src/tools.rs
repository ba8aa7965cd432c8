use std::path::PathBuf;

use crate::error::{Result, ZagruzkaError};

/// External binaries the downloader cannot run without. yt-dlp does the
/// retrieval, ffmpeg the merging and transcoding.
pub const REQUIRED_TOOLS: &[&str] = &["yt-dlp", "ffmpeg"];

/// Resolve `name` on PATH, failing with remediation advice if absent.
pub fn ensure_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| ZagruzkaError::MissingDependency {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_reports_its_name() {
        let err = ensure_tool("definitely-not-a-real-binary-zxq").unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-binary-zxq"));
        assert!(err.to_string().contains("not installed or not in PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn present_tool_resolves_to_a_path() {
        let path = ensure_tool("sh").unwrap();
        assert!(path.is_absolute());
    }
}
