use marquee_api::{MoviePage, MovieService, MovieSummary};

use crate::error::FetchError;

/// Only the first page of any listing is requested.
const FIRST_PAGE: u32 = 1;

/// Proxies the movie service and turns its errors into [`FetchError`].
///
/// No retries, caching or request deduplication happen here.
pub struct MovieRepository<S> {
    service: S,
    person_id: u64,
}

impl<S: MovieService> MovieRepository<S> {
    /// `person_id` is the person whose movies the list screen shows.
    pub fn new(service: S, person_id: u64) -> Self {
        Self { service, person_id }
    }

    pub fn person_id(&self) -> u64 {
        self.person_id
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Movies featuring the configured person.
    pub async fn fetch_by_person(&self) -> Result<MoviePage, FetchError> {
        self.service
            .discover_by_person(self.person_id, FIRST_PAGE)
            .await
            .map_err(|e| {
                tracing::error!(person_id = self.person_id, error = %e, "Error fetching movies");
                FetchError::new(e.to_string())
            })
    }

    pub async fn fetch_details(&self, movie_id: u64) -> Result<MovieSummary, FetchError> {
        self.service.movie_details(movie_id).await.map_err(|e| {
            tracing::error!(movie_id, error = %e, "Error fetching movie details");
            FetchError::new(e.to_string())
        })
    }

    pub async fn fetch_similar(&self, movie_id: u64) -> Result<MoviePage, FetchError> {
        self.service
            .similar_movies(movie_id, FIRST_PAGE)
            .await
            .map_err(|e| {
                tracing::error!(movie_id, error = %e, "Error fetching similar movies");
                FetchError::new(e.to_string())
            })
    }
}
