use serde::Deserialize;

use crate::traits::{MoviePage, MovieSummary};

// ── Movie responses ─────────────────────────────────────────────

/// A movie as returned by `/discover/movie`, `/movie/{id}` and
/// `/movie/{id}/similar`. Detail responses carry many more fields;
/// only the ones the screens use are decoded.
#[derive(Debug, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbPage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

/// Error envelope TMDB sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct TmdbStatus {
    pub status_code: Option<i64>,
    pub status_message: String,
}

impl TmdbStatus {
    /// Extract `status_message` from an error body, if it is a TMDB envelope.
    pub fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<TmdbStatus>(body)
            .ok()
            .map(|s| s.status_message)
            .filter(|m| !m.is_empty())
    }
}

// ── Conversions to shared trait types ───────────────────────────

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TmdbMovie {
    pub fn into_summary(self) -> MovieSummary {
        let title = non_empty(self.original_title)
            .or_else(|| non_empty(self.title))
            .unwrap_or_default();
        MovieSummary {
            id: self.id,
            title,
            overview: self.overview.unwrap_or_default(),
            poster_path: non_empty(self.poster_path),
            backdrop_path: non_empty(self.backdrop_path),
            release_date: non_empty(self.release_date),
        }
    }
}

impl TmdbPage {
    pub fn into_movie_page(self) -> MoviePage {
        MoviePage {
            page: self.page,
            items: self
                .results
                .into_iter()
                .map(TmdbMovie::into_summary)
                .collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}
