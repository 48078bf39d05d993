//! Movie list screen: one request, loading / failed / loaded.

use std::sync::Arc;

use marquee_api::{MovieService, MovieSummary};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::controller::{commit, until_cancelled, Generations};
use crate::repository::MovieRepository;

const DEFAULT_ERROR: &str = "Failed to load movies";

/// Published state of the list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListViewState {
    pub movies: Vec<MovieSummary>,
    pub is_loading: bool,
    /// When set, `movies` holds whatever the last success left there and
    /// must not be rendered.
    pub error_message: Option<String>,
}

/// What the list screen should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Movies(&'a [MovieSummary]),
}

impl ListViewState {
    pub fn view(&self) -> ListView<'_> {
        if self.is_loading {
            ListView::Loading
        } else if let Some(message) = self.error_message.as_deref() {
            ListView::Failed(message)
        } else if self.movies.is_empty() {
            ListView::Empty
        } else {
            ListView::Movies(&self.movies)
        }
    }
}

/// Owns the list screen state and runs its fetch.
pub struct ListController<S> {
    repo: Arc<MovieRepository<S>>,
    state: watch::Sender<ListViewState>,
    generations: Generations,
}

impl<S: MovieService> ListController<S> {
    pub fn new(repo: Arc<MovieRepository<S>>) -> Self {
        let (state, _) = watch::channel(ListViewState::default());
        Self {
            repo,
            state,
            generations: Generations::default(),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ListViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every committed state change.
    pub fn subscribe(&self) -> watch::Receiver<ListViewState> {
        self.state.subscribe()
    }

    /// Load the person's movies.
    ///
    /// A later `start`/`retry` supersedes this one: its response is
    /// discarded when it arrives. Nothing is committed after `cancel` fires.
    pub async fn start(&self, cancel: &CancellationToken) {
        let generation = self.generations.begin();
        let started = commit(&self.state, &self.generations, generation, cancel, |s| {
            s.is_loading = true;
            s.error_message = None;
        });
        if !started {
            return;
        }
        tracing::debug!(generation, person_id = self.repo.person_id(), "loading movie list");

        let Some(result) = until_cancelled(cancel, self.repo.fetch_by_person()).await else {
            tracing::debug!(generation, "movie list load cancelled");
            return;
        };

        let committed = match result {
            Ok(page) => commit(&self.state, &self.generations, generation, cancel, |s| {
                s.movies = page.items;
                s.is_loading = false;
            }),
            Err(e) => {
                let message = e.display_message(DEFAULT_ERROR);
                commit(&self.state, &self.generations, generation, cancel, |s| {
                    s.error_message = Some(message);
                    s.is_loading = false;
                })
            }
        };
        if !committed {
            tracing::debug!(generation, "discarding superseded movie list response");
        }
    }

    /// Fetch again from scratch after an error (or to refresh).
    pub async fn retry(&self, cancel: &CancellationToken) {
        self.start(cancel).await;
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Notify;

    use super::*;
    use crate::fake::{movie, page, FakeService};

    fn setup(fake: FakeService) -> (Arc<MovieRepository<FakeService>>, ListController<FakeService>) {
        let repo = Arc::new(MovieRepository::new(fake, 71580));
        let controller = ListController::new(repo.clone());
        (repo, controller)
    }

    #[test]
    fn test_initial_state() {
        let (_, controller) = setup(FakeService::new());
        assert_eq!(controller.state(), ListViewState::default());
        assert_eq!(controller.state().view(), ListView::Empty);
    }

    #[tokio::test]
    async fn test_start_success_populates_movies_in_order() {
        let fake = FakeService::new();
        let items = vec![movie(1, "Movie 1"), movie(2, "Movie 2")];
        fake.push_discover(Ok(page(items.clone())));
        let (_, controller) = setup(fake);

        controller.start(&CancellationToken::new()).await;

        let state = controller.state();
        assert_eq!(
            state,
            ListViewState {
                movies: items,
                is_loading: false,
                error_message: None,
            }
        );
        assert!(matches!(state.view(), ListView::Movies(m) if m.len() == 2));
    }

    #[tokio::test]
    async fn test_start_failure_sets_error() {
        let fake = FakeService::new();
        fake.push_discover(Err("Network error"));
        let (_, controller) = setup(fake);

        controller.start(&CancellationToken::new()).await;

        let state = controller.state();
        assert!(!state.is_loading);
        assert_eq!(state.error_message.as_deref(), Some("Network error"));
        assert_eq!(state.view(), ListView::Failed("Network error"));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_movies() {
        let fake = FakeService::new();
        fake.push_discover(Ok(page(vec![movie(1, "Movie 1")])));
        fake.push_discover(Err("Network error"));
        let (_, controller) = setup(fake);
        let cancel = CancellationToken::new();

        controller.start(&cancel).await;
        let before = controller.state().movies;
        controller.retry(&cancel).await;

        let state = controller.state();
        assert_eq!(state.movies, before);
        assert_eq!(state.error_message.as_deref(), Some("Network error"));
        assert_eq!(state.view(), ListView::Failed("Network error"));
    }

    #[tokio::test]
    async fn test_empty_error_message_uses_default() {
        let fake = FakeService::new();
        fake.push_discover(Err(""));
        let (_, controller) = setup(fake);

        controller.start(&CancellationToken::new()).await;

        assert_eq!(
            controller.state().error_message.as_deref(),
            Some("Failed to load movies")
        );
    }

    #[tokio::test]
    async fn test_retry_after_failure_refetches() {
        let fake = FakeService::new();
        fake.push_discover(Err("Network error"));
        fake.push_discover(Ok(page(vec![movie(7, "Sherlock")])));
        let (repo, controller) = setup(fake);
        let cancel = CancellationToken::new();

        controller.start(&cancel).await;
        controller.retry(&cancel).await;

        let state = controller.state();
        assert!(state.error_message.is_none());
        assert_eq!(state.movies, vec![movie(7, "Sherlock")]);
        assert_eq!(repo.service().discover_calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_renders_empty() {
        let fake = FakeService::new();
        fake.push_discover(Ok(page(vec![])));
        let (_, controller) = setup(fake);

        controller.start(&CancellationToken::new()).await;

        assert_eq!(controller.state().view(), ListView::Empty);
    }

    #[tokio::test]
    async fn test_subscribers_see_loading_then_result() {
        let fake = FakeService::new();
        let gate = Arc::new(Notify::new());
        fake.push_discover_gated(Ok(page(vec![movie(1, "Movie 1")])), gate.clone());
        let (_, controller) = setup(fake);
        let mut rx = controller.subscribe();
        let cancel = CancellationToken::new();

        tokio::join!(controller.start(&cancel), async {
            rx.changed().await.unwrap();
            assert!(rx.borrow_and_update().is_loading);
            gate.notify_one();
            rx.changed().await.unwrap();
            let state = rx.borrow_and_update();
            assert!(!state.is_loading);
            assert_eq!(state.movies.len(), 1);
        });
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let fake = FakeService::new();
        let gate = Arc::new(Notify::new());
        fake.push_discover_gated(Ok(page(vec![movie(1, "Old")])), gate.clone());
        fake.push_discover(Ok(page(vec![movie(2, "New")])));
        let (_, controller) = setup(fake);
        let cancel = CancellationToken::new();

        tokio::join!(controller.start(&cancel), async {
            controller.retry(&cancel).await;
            gate.notify_one();
        });

        let state = controller.state();
        assert_eq!(state.movies, vec![movie(2, "New")]);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_cancel_in_flight_commits_nothing() {
        let fake = FakeService::new();
        let gate = Arc::new(Notify::new());
        fake.push_discover_gated(Ok(page(vec![movie(1, "Movie 1")])), gate.clone());
        let (_, controller) = setup(fake);
        let cancel = CancellationToken::new();

        tokio::join!(controller.start(&cancel), async {
            cancel.cancel();
            gate.notify_one();
        });

        let state = controller.state();
        assert!(state.movies.is_empty());
        assert!(state.error_message.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_fetch() {
        let (repo, controller) = setup(FakeService::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        controller.start(&cancel).await;

        assert_eq!(controller.state(), ListViewState::default());
        assert_eq!(repo.service().discover_calls(), 0);
    }
}
