//! API client library for moviefinder.
//!
//! Provides the TMDB movie search/discover client and the request shapes
//! the browse controller dispatches.

/// TMDB API client.
pub mod tmdb;
