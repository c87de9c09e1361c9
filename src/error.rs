// Error types for pawdex.
// Covers breed API failures, local store failures, and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PawError {
    #[error("Breed API error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed: API key rejected")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl PawError {
    /// Whether the error came from talking to a remote API.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            PawError::Network(_)
                | PawError::Unauthorized
                | PawError::NotFound(_)
                | PawError::HttpStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_classification() {
        assert!(PawError::Unauthorized.is_network());
        assert!(PawError::NotFound("/breeds".to_string()).is_network());
        assert!(
            PawError::HttpStatus {
                status: reqwest::StatusCode::BAD_GATEWAY,
                url: "/breeds".to_string(),
            }
            .is_network()
        );
        assert!(!PawError::Config("bad".to_string()).is_network());
        assert!(!PawError::MissingApiKey("PAWDEX_CAT_API_KEY").is_network());
    }

    #[test]
    fn test_display_messages() {
        let err = PawError::MissingApiKey("PAWDEX_DOG_API_KEY");
        assert_eq!(
            err.to_string(),
            "Missing PAWDEX_DOG_API_KEY environment variable"
        );
    }
}
