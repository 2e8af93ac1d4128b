//! Image CDN URLs

/// Rendition served by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    /// 500px wide, used for poster cards
    W500,
    /// Full resolution, used for backdrops
    Original,
}

impl PosterSize {
    /// Path segment for this size
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

/// Builds image URLs from the relative paths TMDB returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl {
    base: String,
}

impl ImageUrl {
    /// Create a builder for the CDN at `base`
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        let len = base.trim_end_matches('/').len();
        base.truncate(len);
        Self { base }
    }

    /// URL of `path` at `size`
    #[must_use]
    pub fn poster(&self, path: &str, size: PosterSize) -> String {
        let separator = if path.starts_with('/') { "" } else { "/" };
        format!("{}/{}{separator}{path}", self.base, size.as_str())
    }

    /// Full-resolution backdrop URL
    #[must_use]
    pub fn backdrop(&self, path: &str) -> String {
        self.poster(path, PosterSize::Original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url() {
        let images = ImageUrl::new("https://image.tmdb.org/t/p");
        assert_eq!(
            images.poster("/abc.jpg", PosterSize::W500),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn test_backdrop_url_uses_original() {
        let images = ImageUrl::new("https://image.tmdb.org/t/p/");
        assert_eq!(
            images.backdrop("xyz.jpg"),
            "https://image.tmdb.org/t/p/original/xyz.jpg"
        );
    }
}
