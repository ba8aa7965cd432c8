use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZagruzkaError {
    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("{name} is not installed or not in PATH. Please install {name} and try again.")]
    MissingDependency { name: String },

    #[error("Invalid URL {url:?}: expected a link starting with http:// or https://")]
    InvalidUrl { url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ZagruzkaError>;
