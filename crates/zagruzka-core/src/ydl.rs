use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;

use crate::error::{Result, ZagruzkaError};
use crate::progress::ProgressEvent;
use crate::quality::QualityTier;

/// A validated download request.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub dest_dir: PathBuf,
    pub tier: QualityTier,
    pub allow_playlist: bool,
}

impl DownloadRequest {
    /// Validate the URL prefix up front; everything else about the link is
    /// the extractor's business.
    pub fn new(
        url: impl Into<String>,
        dest_dir: impl Into<PathBuf>,
        tier: QualityTier,
    ) -> Result<Self> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ZagruzkaError::InvalidUrl { url });
        }
        Ok(Self {
            url,
            dest_dir: dest_dir.into(),
            tier,
            allow_playlist: false,
        })
    }

    pub fn allow_playlist(mut self, allow: bool) -> Self {
        self.allow_playlist = allow;
        self
    }
}

/// Configuration handed to the yt-dlp boundary. Only these options exist;
/// anything else cannot be expressed.
#[derive(Debug, Clone)]
pub struct YdlOptions {
    pub output_template: PathBuf,
    pub format: String,
    pub merge_output_format: String,
    pub allow_playlist: bool,
}

impl YdlOptions {
    pub fn for_request(request: &DownloadRequest) -> Self {
        let resolved = request.tier.resolve();
        Self {
            output_template: request.dest_dir.join("%(title)s.%(ext)s"),
            format: resolved.selector.to_string(),
            merge_output_format: resolved.container.to_string(),
            allow_playlist: request.allow_playlist,
        }
    }

    /// Lower the options to a yt-dlp argument vector. The mp3 container goes
    /// through the extractor's transcode path instead of a merge.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            self.output_template.to_string_lossy().into_owned(),
            "--newline".to_string(),
            "--progress-template".to_string(),
            "download:%(progress)j".to_string(),
        ];

        if self.merge_output_format == "mp3" {
            args.extend([
                "-x".to_string(),
                "--audio-format".to_string(),
                "mp3".to_string(),
            ]);
        } else {
            args.extend([
                "--merge-output-format".to_string(),
                self.merge_output_format.clone(),
            ]);
        }

        if self.allow_playlist {
            args.push("--yes-playlist".to_string());
        } else {
            args.push("--no-playlist".to_string());
        }

        args
    }
}

/// Run the blocking download, feeding each progress event through
/// `on_progress` as it arrives. Returns once yt-dlp exits.
///
/// Stdout lines that are not progress JSON (extractor chatter, merge
/// notices) are skipped; they are not progress events.
pub async fn download<F>(request: &DownloadRequest, mut on_progress: F) -> Result<()>
where
    F: FnMut(&ProgressEvent),
{
    tokio::fs::create_dir_all(&request.dest_dir).await?;

    let options = YdlOptions::for_request(request);
    let mut child = Command::new("yt-dlp")
        .args(options.to_args())
        .arg(&request.url)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain stderr concurrently so a chatty extractor cannot block on a
    // full pipe while we sit on stdout.
    let stderr = child.stderr.take();
    let stderr_task = tokio::spawn(async move {
        let mut buf = String::new();
        if let Some(mut stderr) = stderr {
            let _ = stderr.read_to_string(&mut buf).await;
        }
        buf
    });

    if let Some(stdout) = child.stdout.take() {
        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines.next_line().await? {
            match serde_json::from_str::<ProgressEvent>(&line) {
                Ok(event) => on_progress(&event),
                Err(_) => tracing::trace!(%line, "non-progress output"),
            }
        }
    }

    let status = child.wait().await?;
    let stderr_text = stderr_task.await.unwrap_or_default();

    if !status.success() {
        let reason = if stderr_text.trim().is_empty() {
            format!("{}", status)
        } else {
            stderr_text.trim().to_string()
        };
        return Err(ZagruzkaError::DownloadFailed {
            url: request.url.clone(),
            reason,
        });
    }

    Ok(())
}
