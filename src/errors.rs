use thiserror::Error;

pub type PalaverResult<T> = Result<T, PalaverError>;

#[derive(Debug, Error)]
pub enum PalaverError {
    /// Failure reported by the backend inside the reply body. Displays the
    /// server's text untouched so the chat view can prefix it.
    #[error("{0}")]
    Backend(String),

    /// The backend answered, but not with a usable reply.
    #[error("{0}")]
    Api(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),
}

impl PalaverError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
