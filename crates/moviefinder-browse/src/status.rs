//! Fetch status shared by the controller and its front ends.

use std::fmt;

/// Message shown for any transport-level failure.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Message shown when a response carries no movies and no explanation.
pub const NO_MOVIES_MESSAGE: &str = "No movies found.";

/// Why the latest request produced no movie list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Non-success status, network error or undecodable body.
    Transport,
    /// The API answered but the results collection was empty or missing.
    NoResults(String),
}

impl FetchError {
    /// User-visible text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport => TRANSPORT_ERROR_MESSAGE,
            Self::NoResults(message) => message,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FetchError {}

/// State of the most recently dispatched request.
///
/// `Idle` -> `Loading` -> `Loaded` | `Failed`, and back to `Loading` on
/// the next dispatch. Loading and an error are never observable together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Nothing dispatched yet.
    #[default]
    Idle,
    /// A request is outstanding.
    Loading,
    /// The movie list holds the latest page.
    Loaded,
    /// The latest request failed.
    Failed(FetchError),
}

impl FetchStatus {
    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Error text, present only in `Failed`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(error) => Some(error.message()),
            Self::Idle | Self::Loading | Self::Loaded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message() {
        // Arrange
        let error = FetchError::Transport;

        // Act & Assert
        assert_eq!(
            error.to_string(),
            "Error fetching movies. Please try again later."
        );
    }

    #[test]
    fn test_no_results_uses_given_message() {
        // Arrange
        let error = FetchError::NoResults(String::from("no results"));

        // Act & Assert
        assert_eq!(error.message(), "no results");
    }

    #[test]
    fn test_loading_and_error_are_exclusive() {
        // Arrange
        let statuses = [
            FetchStatus::Idle,
            FetchStatus::Loading,
            FetchStatus::Loaded,
            FetchStatus::Failed(FetchError::Transport),
        ];

        // Act & Assert
        for status in &statuses {
            assert!(!(status.is_loading() && status.error_message().is_some()));
        }
        assert_eq!(FetchStatus::default(), FetchStatus::Idle);
    }
}
