//! Plain-text rendering of the list and detail screens.

use std::fmt::Write;

use marquee_api::{ImageSize, MovieSummary};
use marquee_core::{DetailView, DetailViewState, ListView, ListViewState, SimilarView};

const NO_POSTER: &str = "[no poster]";
const NO_BACKDROP: &str = "[no backdrop]";
const NO_OVERVIEW: &str = "No overview available";

pub fn list_screen(state: &ListViewState, image_base: &str) -> String {
    match state.view() {
        ListView::Loading => "Loading movies...".to_string(),
        ListView::Failed(message) => format!("Error: {message}\nRun again with --retry <N> to try again."),
        ListView::Empty => "No movies found.".to_string(),
        ListView::Movies(movies) => {
            let mut out = String::new();
            for movie in movies {
                let _ = writeln!(out, "{:>8}  {}", movie.id, heading(movie));
                let _ = writeln!(out, "{:>8}  {}", "", poster(movie, image_base, ImageSize::W500));
            }
            out.trim_end().to_string()
        }
    }
}

pub fn detail_screen(state: &DetailViewState, image_base: &str) -> String {
    match state.view() {
        DetailView::Loading => "Loading movie...".to_string(),
        DetailView::Failed(message) => format!("Error: {message}"),
        DetailView::Missing => "No movie selected.".to_string(),
        DetailView::Loaded { movie, similar } => {
            let mut out = String::new();
            let _ = writeln!(out, "{}", heading(movie));
            let _ = writeln!(out, "Poster: {}", poster(movie, image_base, ImageSize::W500));
            let backdrop = movie
                .backdrop_url(image_base, ImageSize::W500)
                .unwrap_or_else(|| NO_BACKDROP.to_string());
            let _ = writeln!(out, "Backdrop: {backdrop}");
            let _ = writeln!(out);
            let _ = writeln!(out, "Overview");
            if movie.overview.trim().is_empty() {
                let _ = writeln!(out, "  {NO_OVERVIEW}");
            } else {
                let _ = writeln!(out, "  {}", movie.overview.trim());
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "Similar movies");
            match similar {
                SimilarView::Loading => {
                    let _ = writeln!(out, "  Loading...");
                }
                SimilarView::Empty => {
                    let _ = writeln!(out, "  None");
                }
                SimilarView::Movies(movies) => {
                    for m in movies {
                        let _ = writeln!(
                            out,
                            "  {:>8}  {}  {}",
                            m.id,
                            heading(m),
                            poster(m, image_base, ImageSize::W200)
                        );
                    }
                }
            }
            out.trim_end().to_string()
        }
    }
}

fn heading(movie: &MovieSummary) -> String {
    match movie.release_year() {
        Some(year) => format!("{} ({year})", movie.title),
        None => movie.title.clone(),
    }
}

fn poster(movie: &MovieSummary, image_base: &str, size: ImageSize) -> String {
    movie
        .poster_url(image_base, size)
        .unwrap_or_else(|| NO_POSTER.to_string())
}
