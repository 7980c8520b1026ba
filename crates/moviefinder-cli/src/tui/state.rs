//! Movie browser state management.

use std::time::Instant;

use anyhow::Result;
use moviefinder_api::tmdb::{Movie, MoviePage};
use moviefinder_browse::{BrowseController, FetchTicket};
use ratatui::widgets::ListState;

/// State for the movie browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Query, pagination and fetch status.
    controller: BrowseController,
    /// Selection and scroll offset of the movie list.
    pub list_state: ListState,
}

impl BrowserState {
    /// Wraps a controller with the cursor at the top.
    #[must_use]
    pub fn new(controller: BrowseController) -> Self {
        Self {
            controller,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    /// Underlying controller.
    #[must_use]
    pub const fn controller(&self) -> &BrowseController {
        &self.controller
    }

    /// Cursor position in the movie list.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Returns the movie under the cursor.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        self.controller.movies().get(self.cursor())
    }

    /// Moves the cursor to the first row and scrolls back to the top.
    fn scroll_to_top(&mut self) {
        self.list_state = ListState::default().with_selected(Some(0));
    }

    /// Dispatches the initial popular-movies request.
    pub fn start(&mut self) -> Option<FetchTicket> {
        self.controller.start()
    }

    /// Appends a character to the query.
    pub fn push_char(&mut self, ch: char, now: Instant) {
        let mut query = String::from(self.controller.query());
        query.push(ch);
        self.controller.input(query, now);
    }

    /// Removes the last character of the query.
    pub fn pop_char(&mut self, now: Instant) {
        let mut query = String::from(self.controller.query());
        if query.pop().is_some() {
            self.controller.input(query, now);
        }
    }

    /// Clears the query.
    pub fn clear_query(&mut self, now: Instant) {
        self.controller.input(String::new(), now);
    }

    /// Searches for the typed query without waiting.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        self.controller.submit()
    }

    /// Advances debounce time.
    pub fn tick(&mut self, now: Instant) -> Option<FetchTicket> {
        self.controller.tick(now)
    }

    /// Goes to the previous page, scrolling back to the top.
    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        let ticket = self.controller.previous_page();
        if ticket.is_some() {
            self.scroll_to_top();
        }
        ticket
    }

    /// Goes to the next page, scrolling back to the top.
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let ticket = self.controller.next_page();
        if ticket.is_some() {
            self.scroll_to_top();
        }
        ticket
    }

    /// Applies a finished request. The cursor returns to the top when the
    /// outcome is applied.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<MoviePage>) -> bool {
        let applied = self.controller.complete(ticket, result);
        if applied {
            self.scroll_to_top();
        }
        applied
    }

    /// Moves the cursor up.
    pub fn move_up(&mut self) {
        let current = self.cursor();
        self.list_state.select(Some(current.saturating_sub(1)));
    }

    /// Moves the cursor down, stopping at the last movie.
    pub fn move_down(&mut self) {
        let current = self.cursor();
        let last = self.controller.movies().len().saturating_sub(1);
        if current < last {
            self.list_state.select(Some(current.saturating_add(1)));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::arithmetic_side_effects)]

    use std::time::Duration;

    use moviefinder_api::tmdb::MovieQuery;
    use serde_json::Map;

    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: Some(format!("Movie {id}")),
            original_language: Some(String::from("en")),
            release_date: None,
            vote_average: None,
            poster_path: None,
            overview: None,
            extra: Map::new(),
        }
    }

    fn page_of(ids: &[u64], total_pages: u32) -> MoviePage {
        MoviePage {
            page: Some(1),
            results: Some(ids.iter().copied().map(movie).collect()),
            total_pages: Some(total_pages),
            total_results: None,
            status_message: None,
        }
    }

    fn loaded_state(ids: &[u64], total_pages: u32) -> BrowserState {
        let mut state = BrowserState::new(BrowseController::new(QUIET));
        let ticket = state.start().unwrap();
        state.complete(&ticket, Ok(page_of(ids, total_pages)));
        state
    }

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let state = BrowserState::new(BrowseController::new(QUIET));

        // Assert
        assert_eq!(state.cursor(), 0);
        assert!(state.selected_movie().is_none());
        assert_eq!(state.controller().query(), "");
    }

    #[test]
    fn test_move_down_up() {
        // Arrange
        let mut state = loaded_state(&[1, 2], 1);

        // Act & Assert
        state.move_down();
        assert_eq!(state.cursor(), 1);
        state.move_down(); // should stay at 1
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.selected_movie().unwrap().id, 2);
        state.move_up();
        assert_eq!(state.cursor(), 0);
        state.move_up(); // should stay at 0
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_move_down_on_empty_list() {
        // Arrange
        let mut state = BrowserState::new(BrowseController::new(QUIET));

        // Act
        state.move_down();

        // Assert
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_typing_edits_query() {
        // Arrange
        let mut state = BrowserState::new(BrowseController::new(QUIET));
        let t0 = Instant::now();

        // Act
        for ch in "bat".chars() {
            state.push_char(ch, t0);
        }
        state.pop_char(t0);

        // Assert
        assert_eq!(state.controller().query(), "ba");
        state.clear_query(t0);
        assert_eq!(state.controller().query(), "");
    }

    #[test]
    fn test_pop_on_empty_query_is_noop() {
        // Arrange
        let mut state = BrowserState::new(BrowseController::new(QUIET));
        let t0 = Instant::now();

        // Act
        state.pop_char(t0);

        // Assert
        assert!(state.tick(t0 + QUIET).is_none());
    }

    #[test]
    fn test_typed_query_settles_into_search() {
        // Arrange
        let mut state = loaded_state(&[1], 1);
        let t0 = Instant::now();

        // Act
        for ch in "up".chars() {
            state.push_char(ch, t0);
        }
        let ticket = state.tick(t0 + QUIET).unwrap();

        // Assert
        assert_eq!(ticket.query(), &MovieQuery::new("up", 1));
    }

    #[test]
    fn test_page_change_scrolls_to_top() {
        // Arrange
        let mut state = loaded_state(&[1, 2, 3], 4);
        state.move_down();
        state.move_down();
        *state.list_state.offset_mut() = 2;

        // Act
        let ticket = state.next_page().unwrap();

        // Assert
        assert_eq!(ticket.query(), &MovieQuery::Discover { page: 2 });
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.list_state.offset(), 0);
    }

    #[test]
    fn test_blocked_page_change_keeps_cursor() {
        // Arrange
        let mut state = loaded_state(&[1, 2, 3], 1);
        state.move_down();

        // Act
        let previous = state.previous_page();
        let next = state.next_page();

        // Assert
        assert!(previous.is_none());
        assert!(next.is_none());
        assert_eq!(state.cursor(), 1);
    }
}
