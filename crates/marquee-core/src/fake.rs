//! Scripted in-memory [`MovieService`] for repository and controller tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use marquee_api::{MoviePage, MovieService, MovieSummary};
use tokio::sync::Notify;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FakeError(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Discover(u64, u32),
    Details(u64),
    Similar(u64, u32),
}

struct Scripted<T> {
    result: Result<T, FakeError>,
    gate: Option<Arc<Notify>>,
}

type Hook = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct FakeService {
    discover: Mutex<VecDeque<Scripted<MoviePage>>>,
    details: Mutex<VecDeque<Scripted<MovieSummary>>>,
    similar: Mutex<VecDeque<Scripted<MoviePage>>>,
    calls: Mutex<Vec<Call>>,
    on_similar: Mutex<Option<Hook>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_discover(&self, result: Result<MoviePage, &str>) {
        push(&self.discover, result, None);
    }

    /// Queue a discover response that is held back until `gate` is notified.
    pub fn push_discover_gated(&self, result: Result<MoviePage, &str>, gate: Arc<Notify>) {
        push(&self.discover, result, Some(gate));
    }

    pub fn push_details(&self, result: Result<MovieSummary, &str>) {
        push(&self.details, result, None);
    }

    pub fn push_details_gated(&self, result: Result<MovieSummary, &str>, gate: Arc<Notify>) {
        push(&self.details, result, Some(gate));
    }

    pub fn push_similar(&self, result: Result<MoviePage, &str>) {
        push(&self.similar, result, None);
    }

    pub fn push_similar_gated(&self, result: Result<MoviePage, &str>, gate: Arc<Notify>) {
        push(&self.similar, result, Some(gate));
    }

    /// Run `hook` synchronously whenever a similar-movies call is issued.
    pub fn on_similar(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.on_similar.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn discover_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Discover(..)))
    }

    pub fn similar_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Similar(..)))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn push<T>(queue: &Mutex<VecDeque<Scripted<T>>>, result: Result<T, &str>, gate: Option<Arc<Notify>>) {
    queue.lock().unwrap().push_back(Scripted {
        result: result.map_err(|m| FakeError(m.to_string())),
        gate,
    });
}

async fn respond<T>(queue: &Mutex<VecDeque<Scripted<T>>>, what: &str) -> Result<T, FakeError> {
    let next = queue.lock().unwrap().pop_front();
    let Some(scripted) = next else {
        return Err(FakeError(format!("no scripted {what} response")));
    };
    if let Some(gate) = scripted.gate {
        gate.notified().await;
    }
    scripted.result
}

impl MovieService for FakeService {
    type Error = FakeError;

    async fn discover_by_person(&self, person_id: u64, page: u32) -> Result<MoviePage, FakeError> {
        self.record(Call::Discover(person_id, page));
        respond(&self.discover, "discover").await
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieSummary, FakeError> {
        self.record(Call::Details(movie_id));
        respond(&self.details, "details").await
    }

    async fn similar_movies(&self, movie_id: u64, page: u32) -> Result<MoviePage, FakeError> {
        self.record(Call::Similar(movie_id, page));
        {
            let hook = self.on_similar.lock().unwrap();
            if let Some(hook) = hook.as_ref() {
                hook();
            }
        }
        respond(&self.similar, "similar").await
    }
}

pub fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.into(),
        overview: format!("Overview of {title}"),
        poster_path: Some(format!("/poster{id}.jpg")),
        backdrop_path: None,
        release_date: Some("2024-01-01".into()),
    }
}

pub fn page(items: Vec<MovieSummary>) -> MoviePage {
    let total_results = items.len() as u32;
    MoviePage {
        page: 1,
        items,
        total_pages: 1,
        total_results,
    }
}
