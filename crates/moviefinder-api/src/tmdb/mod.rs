//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 `search/movie` and
//! `discover/movie` endpoints.

mod api;
mod client;
mod query;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use query::{MAX_PAGE, MovieQuery, POPULARITY_DESC, fetch_movies};
pub use types::{DiscoverMovieParams, Movie, MoviePage, SearchMovieParams};
