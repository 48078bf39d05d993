pub mod images;
pub mod tmdb;
pub mod traits;

pub use images::ImageSize;
pub use tmdb::{TmdbClient, TmdbError};
pub use traits::{MoviePage, MovieService, MovieSummary};
