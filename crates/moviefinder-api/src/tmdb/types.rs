//! TMDB API response types and request parameters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// --- Movie listing ---

/// Response body shared by `search/movie` and `discover/movie`.
///
/// Every field is optional: the controller decides what a missing
/// `results` collection means instead of failing the decode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MoviePage {
    /// Current page number.
    pub page: Option<u32>,
    /// Movies on this page.
    pub results: Option<Vec<Movie>>,
    /// Total number of pages.
    pub total_pages: Option<u32>,
    /// Total number of results.
    pub total_results: Option<u32>,
    /// Explanatory message, sent by TMDB alongside unusable payloads.
    pub status_message: Option<String>,
}

/// A single movie record.
///
/// Only `id` is required. The presentation fields are typed for
/// convenience; everything else is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Remaining API fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Movie {
    /// Returns the release year (`"2008"` for `"2008-07-16"`).
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Request Parameters ---

/// Parameters for the `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Response language, omitted from the request when `None`.
    pub language: Option<String>,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            language: None,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Parameters for the `discover/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Sort order (e.g. `popularity.desc`).
    pub sort_by: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Response language, omitted from the request when `None`.
    pub language: Option<String>,
}

impl DiscoverMovieParams {
    /// Creates new discover params with the given sort order.
    pub fn new(sort_by: impl Into<String>) -> Self {
        Self {
            sort_by: sort_by.into(),
            page: 1,
            language: None,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_movie_keeps_unknown_fields() {
        // Arrange
        let json = r#"{"id":268,"title":"Batman","genre_ids":[14,28],"adult":false}"#;

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, 268);
        assert_eq!(movie.title.as_deref(), Some("Batman"));
        assert_eq!(movie.extra["genre_ids"], serde_json::json!([14, 28]));
        assert_eq!(movie.extra["adult"], Value::Bool(false));
    }

    #[test]
    fn test_movie_only_id_is_required() {
        // Arrange & Act
        let movie: Movie = serde_json::from_str(r#"{"id":1}"#).unwrap();

        // Assert
        assert!(movie.title.is_none());
        assert!(movie.vote_average.is_none());
        assert!(movie.extra.is_empty());
    }

    #[test]
    fn test_release_year() {
        // Arrange
        let mut movie: Movie =
            serde_json::from_str(r#"{"id":1,"release_date":"1989-06-21"}"#).unwrap();

        // Act & Assert
        assert_eq!(movie.release_year(), Some("1989"));

        movie.release_date = Some(String::new());
        assert_eq!(movie.release_year(), None);

        movie.release_date = None;
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_page_without_results() {
        // Arrange
        let json = r#"{"status_message":"The resource you requested could not be found."}"#;

        // Act
        let page: MoviePage = serde_json::from_str(json).unwrap();

        // Assert
        assert!(page.results.is_none());
        assert!(page.total_pages.is_none());
        assert_eq!(
            page.status_message.as_deref(),
            Some("The resource you requested could not be found.")
        );
    }

    #[test]
    fn test_params_builders() {
        // Arrange & Act
        let search = SearchMovieParams::new("batman").page(3).language("ja-JP");
        let discover = DiscoverMovieParams::new("popularity.desc").page(2);

        // Assert
        assert_eq!(search.query, "batman");
        assert_eq!(search.page, 3);
        assert_eq!(search.language.as_deref(), Some("ja-JP"));
        assert_eq!(discover.sort_by, "popularity.desc");
        assert_eq!(discover.page, 2);
        assert!(discover.language.is_none());
    }
}
