use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const NUM_RESULTS: u32 = 3; // Enough context without flooding the transcript

/// Results from a semantic search query.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
}

/// Client for an Exa-style semantic search endpoint.
pub struct SearchClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Runs a search and returns result highlights alongside the URLs.
    pub async fn search_and_contents(&self, query: &str) -> Result<SearchResults> {
        debug!("Searching: {}", query);
        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&json!({
                "query": query,
                "type": "auto",
                "numResults": NUM_RESULTS,
                "contents": { "highlights": true },
            }))
            .send()
            .await
            .with_context(|| format!("Search request to {} failed", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("Search failed: HTTP {status} {text}");
        }

        let results: SearchResults = response
            .json()
            .await
            .context("Failed to parse search response")?;
        debug!("Search returned {} results", results.results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_parses_results() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_header("x-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results":[{"url":"https://example.com","title":"Example","highlights":["a highlight"]}]}"#,
            )
            .create_async()
            .await;

        let client = SearchClient::new(server.url(), "test-key").unwrap();
        let results = client.search_and_contents("example query").await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.results.len(), 1);
        assert_eq!(results.results[0].title.as_deref(), Some("Example"));
    }

    #[tokio::test]
    async fn test_search_non_200_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let client = SearchClient::new(server.url(), "bad-key").unwrap();
        let result = client.search_and_contents("anything").await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("401"));
    }
}
