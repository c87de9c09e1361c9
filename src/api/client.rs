// Breed API HTTP client.
// Handles the per-service API key header and response status processing.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{PawError, Result};
use crate::model::Kind;

/// Header carrying the static per-service key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Client for one breed catalog (TheCatAPI or TheDogAPI).
#[derive(Debug, Clone)]
pub struct BreedClient {
    client: Client,
    base_url: String,
    kind: Kind,
}

impl BreedClient {
    /// Create a client for `kind` rooted at `base_url`.
    pub fn new(kind: Kind, base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut key = HeaderValue::from_str(api_key).map_err(|e| PawError::Other(e.to_string()))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("pawdex-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(PawError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            kind,
        })
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("GET {} ({})", url, self.kind);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(PawError::Network)?;

        self.check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PawError::Unauthorized),
            StatusCode::NOT_FOUND => Err(PawError::NotFound(url)),
            status => {
                let body = response.text().await.unwrap_or_default();
                log::warn!("{} returned {}: {}", url, status, body);
                Err(PawError::HttpStatus { status, url })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = BreedClient::new(Kind::Cat, "https://api.thecatapi.com/v1/", "key").unwrap();
        assert_eq!(client.base_url(), "https://api.thecatapi.com/v1");
        assert_eq!(client.kind(), Kind::Cat);
    }

    #[test]
    fn test_invalid_key_rejected() {
        let result = BreedClient::new(Kind::Dog, "https://api.thedogapi.com/v1", "bad\nkey");
        assert!(matches!(result, Err(PawError::Other(_))));
    }
}
