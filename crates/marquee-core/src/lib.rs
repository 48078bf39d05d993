pub mod config;
pub mod detail;
pub mod error;
pub mod list;
pub mod repository;

mod controller;
#[cfg(test)]
mod fake;

pub use detail::{DetailController, DetailView, DetailViewState, SimilarView};
pub use error::{CoreError, FetchError};
pub use list::{ListController, ListView, ListViewState};
pub use repository::MovieRepository;

pub use tokio_util::sync::CancellationToken;
