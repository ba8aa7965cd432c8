//! Zagruzka Core Library
//!
//! Core functionality for downloading video and audio through yt-dlp:
//! quality-tier resolution, invocation options, progress normalization,
//! and the small bits of bookkeeping around a download run.

pub mod errlog;
pub mod error;
pub mod progress;
pub mod quality;
pub mod tools;
pub mod usage;
pub mod ydl;

// Re-export commonly used items at crate root
pub use errlog::{ERROR_LOG, append_error};
pub use error::{Result, ZagruzkaError};
pub use progress::{ProgressEvent, ProgressNormalizer};
pub use quality::{QualityTier, ResolvedFormat};
pub use tools::{REQUIRED_TOOLS, ensure_tool};
pub use usage::{dir_size, format_size};
pub use ydl::{DownloadRequest, YdlOptions, download};
