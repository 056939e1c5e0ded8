use thiserror::Error;

pub type Result<T> = std::result::Result<T, GiftError>;

/// Failures talking to the marketplace or setting the client up.
#[derive(Debug, Error)]
pub enum GiftError {
    #[error("network: {0}")]
    Http(#[from] wreq::Error),
    #[error("http {status} from {url}")]
    Status { status: u16, url: String },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("config: {0}")]
    Config(String),
}

impl GiftError {
    /// True for errors caused by the upstream service rather than by us.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            GiftError::Http(_) | GiftError::Status { .. } | GiftError::Json(_)
        )
    }
}
