/// Failures talking to the improvement backend
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered, but reported a failure
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from backend: {0}")]
    Decode(String),

    #[error("No change to accept")]
    MissingChangeId,

    #[error("{0}")]
    Validation(String),

    /// The request never completed on this side, e.g. its task crashed
    #[error("{0}")]
    Internal(String),

    #[error("Invalid server address: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Text shown in a notification; backend messages are passed through verbatim
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(err) if err.is_timeout() => "Request timed out".to_string(),
            Self::Transport(err) if err.is_connect() => {
                "Could not reach the backend. Is the server running?".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
