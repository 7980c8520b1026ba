//! Request shape selection for the movie listing endpoints.

use anyhow::Result;
use tracing::instrument;

use super::api::LocalMovieApi;
use super::types::{DiscoverMovieParams, MoviePage, SearchMovieParams};

/// Sort order used when no search text is given.
pub const POPULARITY_DESC: &str = "popularity.desc";

/// Highest page number TMDB serves for listing endpoints.
pub const MAX_PAGE: u32 = 500;

/// One outbound movie listing request.
///
/// Built from the debounced query text and the page number; exactly one
/// endpoint is used per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    /// `search/movie?query={query}&page={page}`.
    Search {
        /// Search text (never empty).
        query: String,
        /// Result page.
        page: u32,
    },
    /// `discover/movie?sort_by=popularity.desc&page={page}`.
    Discover {
        /// Result page.
        page: u32,
    },
}

impl MovieQuery {
    /// Picks the request shape for `query` and `page`.
    ///
    /// Empty text means "no filter": popular movies are listed instead.
    #[must_use]
    pub fn new(query: &str, page: u32) -> Self {
        if query.is_empty() {
            Self::Discover { page }
        } else {
            Self::Search {
                query: String::from(query),
                page,
            }
        }
    }

    /// Returns the requested page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        match self {
            Self::Search { page, .. } | Self::Discover { page } => *page,
        }
    }

    /// Returns the search text, or `""` for discover requests.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Search { query, .. } => query,
            Self::Discover { .. } => "",
        }
    }
}

/// Sends `query` to the matching endpoint.
///
/// # Errors
///
/// Returns whatever the underlying API call returns.
#[instrument(skip_all, fields(page = query.page()))]
pub async fn fetch_movies(
    api: &(impl LocalMovieApi + Sync),
    query: &MovieQuery,
    language: Option<&str>,
) -> Result<MoviePage> {
    match query {
        MovieQuery::Search { query, page } => {
            let mut params = SearchMovieParams::new(query.as_str()).page(*page);
            if let Some(language) = language {
                params = params.language(language);
            }
            api.search_movie(&params).await
        }
        MovieQuery::Discover { page } => {
            let mut params = DiscoverMovieParams::new(POPULARITY_DESC).page(*page);
            if let Some(language) = language {
                params = params.language(language);
            }
            api.discover_movie(&params).await
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use super::*;

    /// Records which endpoint was hit with which parameters.
    #[derive(Debug, Default)]
    struct RecordingApi {
        searches: Mutex<Vec<SearchMovieParams>>,
        discovers: Mutex<Vec<DiscoverMovieParams>>,
    }

    impl LocalMovieApi for RecordingApi {
        async fn search_movie(&self, params: &SearchMovieParams) -> Result<MoviePage> {
            self.searches.lock().unwrap().push(params.clone());
            Ok(MoviePage::default())
        }

        async fn discover_movie(&self, params: &DiscoverMovieParams) -> Result<MoviePage> {
            self.discovers.lock().unwrap().push(params.clone());
            Ok(MoviePage::default())
        }
    }

    #[test]
    fn test_non_empty_text_builds_search() {
        // Arrange & Act
        let query = MovieQuery::new("batman", 2);

        // Assert
        assert_eq!(
            query,
            MovieQuery::Search {
                query: String::from("batman"),
                page: 2,
            }
        );
        assert_eq!(query.page(), 2);
        assert_eq!(query.text(), "batman");
    }

    #[test]
    fn test_empty_text_builds_discover() {
        // Arrange & Act
        let query = MovieQuery::new("", 1);

        // Assert
        assert_eq!(query, MovieQuery::Discover { page: 1 });
        assert_eq!(query.text(), "");
    }

    #[test]
    fn test_whitespace_is_still_a_search() {
        // Arrange & Act
        let query = MovieQuery::new(" ", 1);

        // Assert
        assert!(matches!(query, MovieQuery::Search { .. }));
    }

    #[tokio::test]
    async fn test_fetch_search_uses_search_endpoint_only() {
        // Arrange
        let api = RecordingApi::default();
        let query = MovieQuery::new("batman", 3);

        // Act
        fetch_movies(&api, &query, Some("en-US")).await.unwrap();

        // Assert
        let searches = api.searches.lock().unwrap();
        assert_eq!(
            *searches,
            vec![SearchMovieParams::new("batman").page(3).language("en-US")]
        );
        assert!(api.discovers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_discover_sorts_by_popularity() {
        // Arrange
        let api = RecordingApi::default();
        let query = MovieQuery::new("", 4);

        // Act
        fetch_movies(&api, &query, None).await.unwrap();

        // Assert
        let discovers = api.discovers.lock().unwrap();
        assert_eq!(
            *discovers,
            vec![DiscoverMovieParams::new(POPULARITY_DESC).page(4)]
        );
        assert!(api.searches.lock().unwrap().is_empty());
    }
}
