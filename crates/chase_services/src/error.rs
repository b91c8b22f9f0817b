//! Service errors

use thiserror::Error;

/// Backend call failures
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Empty response from {0}")]
    Empty(String),
}

impl From<ureq::Error> for ServiceError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(401 | 403, _) => ServiceError::Unauthorized,
            ureq::Error::Status(code, response) => {
                ServiceError::Http(format!("{} returned status {}", response.get_url(), code))
            }
            ureq::Error::Transport(transport) => ServiceError::Http(transport.to_string()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
