use thiserror::Error;

/// Errors produced by the gallery library.
///
/// None of these are fatal for a running gallery: the controller turns
/// source errors into fallbacks and storage errors into log lines.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned {status} for {url}")]
    Upstream { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("index {index} out of range for {len} visible photos")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
