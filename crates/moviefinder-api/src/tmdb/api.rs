//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{DiscoverMovieParams, MoviePage, SearchMovieParams};

/// TMDB movie listing API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Searches movies by title text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server answers with a
    /// non-success status, or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<MoviePage>;

    /// Lists movies in the given sort order without a text filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server answers with a
    /// non-success status, or JSON parsing fails.
    async fn discover_movie(&self, params: &DiscoverMovieParams) -> Result<MoviePage>;
}
