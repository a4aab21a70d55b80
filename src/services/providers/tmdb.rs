/// TMDB (The Movie Database) metadata provider
///
/// API Flow:
/// 1. Details: /movie/{id}?api_key=..&language=.. → popularity, release date,
///    revenue, tagline, vote statistics and poster path
///
/// One request per movie, no caching and no retries.
use crate::{
    error::{AppError, AppResult},
    models::{MovieId, MovieMetadata, TmdbMovie},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            language,
        }
    }

    fn details_url(&self, id: MovieId) -> String {
        format!("{}/movie/{}", self.api_url.trim_end_matches('/'), id)
    }

    /// Performs the details request, surfacing every failure as an error
    async fn request_details(&self, id: MovieId) -> AppResult<MovieMetadata> {
        let response = self
            .http_client
            .get(self.details_url(id))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let movie: TmdbMovie = serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(response = %response_text, "Raw TMDB API response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        Ok(MovieMetadata::from(movie))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_metadata(&self, id: MovieId) -> MovieMetadata {
        match self.request_details(id).await {
            Ok(metadata) => {
                tracing::debug!(movie_id = %id, provider = self.name(), "Metadata fetched");
                metadata
            }
            Err(e) => {
                tracing::warn!(
                    movie_id = %id,
                    provider = self.name(),
                    error = %e,
                    "Metadata fetch failed, using empty record"
                );
                MovieMetadata::default()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_provider(api_url: String) -> TmdbProvider {
        TmdbProvider::new("test_key".to_string(), api_url, "en-US".to_string())
    }

    #[test]
    fn test_details_url_strips_trailing_slash() {
        let provider = create_test_provider("http://test.local/3/".to_string());
        assert_eq!(provider.details_url(MovieId(550)), "http://test.local/3/movie/550");
    }

    #[tokio::test]
    async fn test_fetch_metadata_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/550"))
            .and(query_param("api_key", "test_key"))
            .and(query_param("language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 550,
                "popularity": 61.4,
                "release_date": "1999-10-15",
                "revenue": 100853753,
                "tagline": "Mischief. Mayhem. Soap.",
                "vote_count": 26280,
                "vote_average": 8.4,
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(mock_server.uri());
        let metadata = provider.fetch_metadata(MovieId(550)).await;

        assert_eq!(metadata.release_date.as_deref(), Some("1999-10-15"));
        assert_eq!(metadata.revenue, Some(100853753));
        assert_eq!(metadata.tagline.as_deref(), Some("Mischief. Mayhem. Soap."));
        assert_eq!(metadata.vote_count, Some(26280));
    }

    #[tokio::test]
    async fn test_fetch_metadata_not_found_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/999999999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "success": false,
                "status_code": 34,
                "status_message": "The resource you requested could not be found."
            })))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(mock_server.uri());
        let metadata = provider.fetch_metadata(MovieId(999999999)).await;
        assert!(metadata.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_metadata_malformed_body_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(mock_server.uri());
        assert_eq!(provider.fetch_metadata(MovieId(1)).await, MovieMetadata::default());
    }

    #[tokio::test]
    async fn test_fetch_metadata_unreachable_is_empty() {
        // Nothing listens on port 9 of localhost in the test environment
        let provider = create_test_provider("http://127.0.0.1:9".to_string());
        assert!(provider.fetch_metadata(MovieId(1)).await.is_empty());
    }
}
