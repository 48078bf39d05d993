//! Trait definitions for movie metadata services.
//!
//! The TMDB client implements [`MovieService`], which lets the repository
//! and controllers in `marquee-core` run against any backend, including
//! scripted fakes in tests.

use std::future::Future;

use crate::images::{self, ImageSize};

/// A movie metadata service interface.
pub trait MovieService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Discover movies featuring a person (cast or crew).
    fn discover_by_person(
        &self,
        person_id: u64,
        page: u32,
    ) -> impl Future<Output = Result<MoviePage, Self::Error>> + Send;

    /// Get the details of a single movie.
    fn movie_details(
        &self,
        movie_id: u64,
    ) -> impl Future<Output = Result<MovieSummary, Self::Error>> + Send;

    /// Get movies similar to the given one.
    fn similar_movies(
        &self,
        movie_id: u64,
        page: u32,
    ) -> impl Future<Output = Result<MoviePage, Self::Error>> + Send;
}

/// A movie as shown on the list and detail screens.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
}

impl MovieSummary {
    /// Year part of the release date, when the date looks like `YYYY-...`.
    pub fn release_year(&self) -> Option<&str> {
        let date = self.release_date.as_deref()?;
        let year = date.get(..4)?;
        year.bytes().all(|b| b.is_ascii_digit()).then_some(year)
    }

    /// Poster URL on the image host at `base`, or `None` when there is no poster.
    pub fn poster_url(&self, base: &str, size: ImageSize) -> Option<String> {
        images::image_url(base, self.poster_path.as_deref(), size)
    }

    pub fn backdrop_url(&self, base: &str, size: ImageSize) -> Option<String> {
        images::image_url(base, self.backdrop_path.as_deref(), size)
    }
}

/// One page of movie results.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MoviePage {
    pub page: u32,
    pub items: Vec<MovieSummary>,
    pub total_pages: u32,
    pub total_results: u32,
}
