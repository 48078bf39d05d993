use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::TmdbError;
use super::types::{TmdbMovie, TmdbPage, TmdbStatus};
use crate::traits::{MoviePage, MovieService, MovieSummary};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Applied to connect and whole-request time.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDB v3 REST client (API-key authentication).
#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TmdbClient`].
#[derive(Debug, Clone)]
pub struct TmdbClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl TmdbClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<TmdbClient, TmdbError> {
        if self.api_key.trim().is_empty() {
            return Err(TmdbError::Config("TMDB API key is empty".into()));
        }
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| TmdbError::Config(format!("invalid base URL {:?}: {e}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TmdbError::Config(format!(
                "unsupported base URL scheme: {}",
                parsed.scheme()
            )));
        }

        let http = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .build()?;

        Ok(TmdbClient {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl TmdbClient {
    /// Client against the public TMDB endpoint with default timeouts.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TmdbError> {
        Self::builder().api_key(api_key).build()
    }

    /// Builder with the default base URL and timeout. The key is required.
    pub fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Check the HTTP response for errors, preferring TMDB's `status_message`.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "TMDB API error");
            let message = TmdbStatus::message_from_body(&body).unwrap_or(body);
            Err(TmdbError::Api { status, message })
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        tracing::debug!(path, "TMDB request");
        let resp = self
            .http
            .get(self.url(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| TmdbError::Parse(e.to_string()))
    }
}

impl MovieService for TmdbClient {
    type Error = TmdbError;

    async fn discover_by_person(&self, person_id: u64, page: u32) -> Result<MoviePage, TmdbError> {
        let page: TmdbPage = self
            .get_json(
                "/discover/movie",
                &[
                    ("with_people", person_id.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        Ok(page.into_movie_page())
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieSummary, TmdbError> {
        let movie: TmdbMovie = self.get_json(&format!("/movie/{movie_id}"), &[]).await?;
        Ok(movie.into_summary())
    }

    async fn similar_movies(&self, movie_id: u64, page: u32) -> Result<MoviePage, TmdbError> {
        let page: TmdbPage = self
            .get_json(
                &format!("/movie/{movie_id}/similar"),
                &[("page", page.to_string())],
            )
            .await?;
        Ok(page.into_movie_page())
    }
}
