//! TMDB image URL derivation.
//!
//! Images are served from a separate host as `<host>/t/p/<size><path>`,
//! where `path` is the `poster_path` / `backdrop_path` from an API response.

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org";

/// Image width variants used by the screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    /// Thumbnail grid (similar movies).
    W200,
    /// Detail header and list rows.
    #[default]
    W500,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W200 => "w200",
            Self::W500 => "w500",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build an image URL, or `None` when the path is missing or empty so the
/// caller can show a placeholder instead.
pub fn image_url(base_url: &str, path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let base = base_url.trim_end_matches('/');
    let sep = if path.starts_with('/') { "" } else { "/" };
    Some(format!("{base}/t/p/{size}{sep}{path}"))
}
