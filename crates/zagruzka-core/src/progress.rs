use regex::Regex;
use serde::Deserialize;

/// One progress update from yt-dlp, deserialized from a line produced by
/// `--progress-template download:%(progress)j`. Keys the extractor omits
/// deserialize to empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressEvent {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "_percent_str", default)]
    pub percent_str: String,
    #[serde(default)]
    pub filename: String,
}

/// Reduces raw progress events to a completion percentage in `[0, 100]`.
///
/// One normalizer per in-flight download. A malformed event never moves the
/// percentage and never aborts anything; it is logged and skipped.
pub struct ProgressNormalizer {
    ansi: Regex,
    current_percent: f64,
}

impl ProgressNormalizer {
    pub fn new() -> Self {
        Self {
            // ESC [ <params> m, the coloring yt-dlp wraps around percent text
            ansi: Regex::new("\u{1b}\\[[0-9;]*m").unwrap(),
            current_percent: 0.0,
        }
    }

    /// Feed one event. Returns the new percentage when the display sink
    /// should refresh, `None` when the event was ignored or unparseable.
    pub fn observe(&mut self, event: &ProgressEvent) -> Option<f64> {
        if event.status != "downloading" {
            return None;
        }

        let cleaned = self.ansi.replace_all(&event.percent_str, "");
        let trimmed = cleaned.trim().trim_end_matches('%').trim_end();

        match trimmed.parse::<f64>() {
            Ok(pct) if pct.is_finite() => {
                self.current_percent = pct.clamp(0.0, 100.0);
                Some(self.current_percent)
            }
            _ => {
                tracing::warn!(
                    percent_str = %event.percent_str,
                    filename = %event.filename,
                    "unparseable progress value, keeping previous"
                );
                None
            }
        }
    }

    /// Last successfully parsed percentage.
    pub fn percent(&self) -> f64 {
        self.current_percent
    }
}

impl Default for ProgressNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
