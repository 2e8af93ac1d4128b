//! Display names for TMDB genre ids and ISO-639-1 language codes

/// TMDB movie genres
pub const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// Languages offered as feed filters
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("hi", "Hindi"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("ml", "Malayalam"),
    ("kn", "Kannada"),
    ("bn", "Bengali"),
    ("mr", "Marathi"),
    ("pa", "Punjabi"),
    ("gu", "Gujarati"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("fr", "French"),
    ("es", "Spanish"),
];

/// Name of genre `id`, if known
#[must_use]
pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(genre, _)| *genre == id)
        .map(|(_, name)| *name)
}

/// Comma-joined names of `ids`; unknown ids are skipped
#[must_use]
pub fn genre_names(ids: &[u32]) -> String {
    ids.iter()
        .filter_map(|&id| genre_name(id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Name of language `code`, or the code itself when unknown
#[must_use]
pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map_or(code, |(_, name)| *name)
}
