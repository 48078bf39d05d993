//! Movie detail screen: movie details, then similar movies.
//!
//! The similar-movies request depends on the detail request: it is issued
//! from the same task, strictly after the details were committed, and never
//! when they failed. A failed similar-movies request is not an error for
//! the screen; the section just stays empty.

use std::sync::Arc;

use marquee_api::{MovieService, MovieSummary};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::controller::{commit, until_cancelled, Generations};
use crate::repository::MovieRepository;

const DEFAULT_ERROR: &str = "Failed to load movie details";

/// Published state of the detail screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailViewState {
    pub movie: Option<MovieSummary>,
    pub similar_movies: Vec<MovieSummary>,
    pub is_loading: bool,
    pub is_loading_similar: bool,
    pub error_message: Option<String>,
}

/// What the detail screen should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView<'a> {
    Loading,
    Failed(&'a str),
    /// Not loaded yet.
    Missing,
    Loaded {
        movie: &'a MovieSummary,
        similar: SimilarView<'a>,
    },
}

/// The similar-movies section under a loaded movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarView<'a> {
    Loading,
    Empty,
    Movies(&'a [MovieSummary]),
}

impl DetailViewState {
    pub fn view(&self) -> DetailView<'_> {
        if self.is_loading {
            return DetailView::Loading;
        }
        if let Some(message) = self.error_message.as_deref() {
            return DetailView::Failed(message);
        }
        let Some(movie) = self.movie.as_ref() else {
            return DetailView::Missing;
        };
        let similar = if self.is_loading_similar {
            SimilarView::Loading
        } else if self.similar_movies.is_empty() {
            SimilarView::Empty
        } else {
            SimilarView::Movies(&self.similar_movies)
        };
        DetailView::Loaded { movie, similar }
    }
}

/// Owns the detail screen state and sequences its two requests.
pub struct DetailController<S> {
    repo: Arc<MovieRepository<S>>,
    state: watch::Sender<DetailViewState>,
    generations: Generations,
}

impl<S: MovieService> DetailController<S> {
    pub fn new(repo: Arc<MovieRepository<S>>) -> Self {
        let (state, _) = watch::channel(DetailViewState::default());
        Self {
            repo,
            state,
            generations: Generations::default(),
        }
    }

    pub fn state(&self) -> DetailViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailViewState> {
        self.state.subscribe()
    }

    /// Load `movie_id` and then its similar movies.
    ///
    /// Expected once per movie id. Calling it again supersedes any request
    /// still in flight; switching to another id clears the previous movie.
    pub async fn initialize(&self, movie_id: u64, cancel: &CancellationToken) {
        let generation = self.generations.begin();
        let started = commit(&self.state, &self.generations, generation, cancel, |s| {
            if s.movie.as_ref().map(|m| m.id) != Some(movie_id) {
                s.movie = None;
                s.similar_movies.clear();
            }
            s.is_loading = true;
            s.is_loading_similar = false;
            s.error_message = None;
        });
        if !started {
            return;
        }
        tracing::debug!(generation, movie_id, "loading movie details");

        let Some(result) = until_cancelled(cancel, self.repo.fetch_details(movie_id)).await else {
            tracing::debug!(generation, movie_id, "movie details load cancelled");
            return;
        };

        match result {
            Ok(movie) => {
                let committed = commit(&self.state, &self.generations, generation, cancel, |s| {
                    s.movie = Some(movie);
                    s.is_loading = false;
                    s.error_message = None;
                });
                if committed {
                    self.load_similar(movie_id, generation, cancel).await;
                } else {
                    tracing::debug!(generation, movie_id, "discarding superseded movie details");
                }
            }
            Err(e) => {
                let message = e.display_message(DEFAULT_ERROR);
                commit(&self.state, &self.generations, generation, cancel, |s| {
                    s.is_loading = false;
                    s.error_message = Some(message);
                });
            }
        }
    }

    async fn load_similar(&self, movie_id: u64, generation: u64, cancel: &CancellationToken) {
        let started = commit(&self.state, &self.generations, generation, cancel, |s| {
            s.is_loading_similar = true;
        });
        if !started {
            return;
        }

        let Some(result) = until_cancelled(cancel, self.repo.fetch_similar(movie_id)).await else {
            tracing::debug!(generation, movie_id, "similar movies load cancelled");
            return;
        };

        match result {
            Ok(page) => {
                commit(&self.state, &self.generations, generation, cancel, |s| {
                    s.is_loading_similar = false;
                    s.similar_movies = page.items;
                });
            }
            Err(e) => {
                tracing::debug!(movie_id, error = %e, "hiding similar movies after failure");
                commit(&self.state, &self.generations, generation, cancel, |s| {
                    s.is_loading_similar = false;
                });
            }
        }
    }
}
