//! Client for an Unsplash-compatible stock-photo search API.

use serde::Deserialize;

use crate::error::ImageGenError;

/// Number of results requested per search.
const PER_PAGE: u32 = 10;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    urls: PhotoUrls,
}

#[derive(Deserialize)]
struct PhotoUrls {
    regular: String,
}

/// HTTP client for stock-photo search.
#[derive(Clone)]
pub struct StockPhotoClient {
    client: reqwest::Client,
    access_key: String,
    base_url: String,
}

impl StockPhotoClient {
    pub fn with_client(client: reqwest::Client, access_key: String, base_url: String) -> Self {
        Self {
            client,
            access_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search square photos matching `query` and return their regular-size
    /// URLs in ranking order.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, ImageGenError> {
        let per_page = PER_PAGE.to_string();
        let response = self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("orientation", "squarish"),
            ])
            .send()
            .await?;

        let parsed: SearchResponse = ImageGenError::parse_response(response).await?;
        Ok(parsed.results.into_iter().map(|r| r.urls.regular).collect())
    }
}
