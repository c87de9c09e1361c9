// Breed API endpoint functions.
// Typed methods for listing, searching, and fetching images from a catalog.

use crate::error::Result;
use crate::model::Kind;

use super::client::BreedClient;
use super::types::{CatBreed, DogBreed, ImageRecord, RemoteBreedRecord};

impl BreedClient {
    /// Get one page of breeds. Pages are zero-based.
    pub async fn list_breeds(&self, page: u32, limit: u32) -> Result<Vec<RemoteBreedRecord>> {
        let params = [("limit", limit.to_string()), ("page", page.to_string())];
        let response = self.get_with_params("/breeds", &params).await?;
        self.decode_breeds(response).await
    }

    /// Search breeds by name.
    pub async fn search_breeds(&self, query: &str) -> Result<Vec<RemoteBreedRecord>> {
        let params = [("q", query)];
        let response = self.get_with_params("/breeds/search", &params).await?;
        self.decode_breeds(response).await
    }

    /// Get images for a breed.
    pub async fn list_images(&self, breed_id: &str, limit: u32) -> Result<Vec<ImageRecord>> {
        let params = [("breed_id", breed_id.to_string()), ("limit", limit.to_string())];
        let response = self.get_with_params("/images/search", &params).await?;
        let images: Vec<ImageRecord> = response.json().await?;
        Ok(images)
    }

    async fn decode_breeds(&self, response: reqwest::Response) -> Result<Vec<RemoteBreedRecord>> {
        let records = match self.kind() {
            Kind::Cat => {
                let breeds: Vec<CatBreed> = response.json().await?;
                breeds.into_iter().map(RemoteBreedRecord::from).collect()
            }
            Kind::Dog => {
                let breeds: Vec<DogBreed> = response.json().await?;
                breeds.into_iter().map(RemoteBreedRecord::from).collect()
            }
        };
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PawError;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cat_client(uri: &str) -> BreedClient {
        BreedClient::new(Kind::Cat, uri, "cat-key").unwrap()
    }

    #[tokio::test]
    async fn test_list_breeds_sends_key_and_paging() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/breeds"))
            .and(query_param("limit", "10"))
            .and(query_param("page", "2"))
            .and(header("x-api-key", "cat-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "beng", "name": "Bengal", "origin": null, "temperament": "Agile",
                  "image": { "url": "http://x/1.jpg" } },
                { "id": "abys", "name": "Abyssinian" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let breeds = cat_client(&server.uri()).list_breeds(2, 10).await.unwrap();
        assert_eq!(breeds.len(), 2);
        assert_eq!(breeds[0].id, "beng");
        assert!(breeds[0].origin.is_none());
        assert_eq!(breeds[1].name, "Abyssinian");
    }

    #[tokio::test]
    async fn test_search_breeds_uses_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/breeds/search"))
            .and(query_param("q", "ter"))
            .and(header("x-api-key", "dog-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 23, "name": "Border Terrier", "bred_for": "Fox bolting" }
            ])))
            .mount(&server)
            .await;

        let client = BreedClient::new(Kind::Dog, &server.uri(), "dog-key").unwrap();
        let breeds = client.search_breeds("ter").await.unwrap();
        assert_eq!(breeds.len(), 1);
        assert_eq!(breeds[0].id, "23");
        assert_eq!(breeds[0].description.as_deref(), Some("Fox bolting"));
    }

    #[tokio::test]
    async fn test_list_images() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/images/search"))
            .and(query_param("breed_id", "beng"))
            .and(query_param("limit", "3"))
            .and(header("x-api-key", "cat-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "i1", "url": "http://x/i1.jpg", "width": 10, "height": 10 },
                { "id": "i2", "url": "http://x/i2.jpg" }
            ])))
            .mount(&server)
            .await;

        let images = cat_client(&server.uri()).list_images("beng", 3).await.unwrap();
        let urls: Vec<&str> = images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["http://x/i1.jpg", "http://x/i2.jpg"]);
    }

    #[tokio::test]
    async fn test_status_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/breeds"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/breeds/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let client = cat_client(&server.uri());

        let err = client.list_breeds(0, 10).await.unwrap_err();
        assert!(matches!(err, PawError::Unauthorized));

        let err = client.search_breeds("x").await.unwrap_err();
        assert!(matches!(err, PawError::HttpStatus { status, .. } if status.as_u16() == 503));
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_malformed_body_is_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/breeds"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = cat_client(&server.uri()).list_breeds(0, 10).await.unwrap_err();
        assert!(matches!(err, PawError::Network(_)));
    }
}
