//! Search-and-pagination fetch controller.
//!
//! Owns all view state. Every mutation re-evaluates the
//! `(debounced query, page)` pair; when it differs from the pair last
//! dispatched, the controller enters `Loading` and hands back a
//! [`FetchTicket`]. The driver performs the request (sequentially via
//! [`BrowseController::fetch`] or concurrently on its own) and passes the
//! outcome to [`BrowseController::complete`].

use std::time::{Duration, Instant};

use anyhow::Result;
use moviefinder_api::tmdb::{LocalMovieApi, Movie, MoviePage, MovieQuery, fetch_movies};

use crate::debounce::DebounceGate;
use crate::pagination::Pagination;
use crate::status::{FetchError, FetchStatus, NO_MOVIES_MESSAGE};

/// A dispatched request and its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: MovieQuery,
}

impl FetchTicket {
    /// Monotonically increasing dispatch number.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// The request to send.
    #[must_use]
    pub const fn query(&self) -> &MovieQuery {
        &self.query
    }
}

/// Controller state for one browsing session.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowseController {
    /// Raw input debounce.
    gate: DebounceGate,
    /// Last value emitted by the gate.
    debounced: String,
    pagination: Pagination,
    movies: Vec<Movie>,
    status: FetchStatus,
    /// Response language passed to TMDB.
    language: Option<String>,
    /// Request most recently dispatched.
    last_dispatched: Option<MovieQuery>,
    /// Sequence number of the last dispatched ticket.
    last_seq: u64,
    /// Sequence number still awaiting its response.
    awaiting: Option<u64>,
}

impl BrowseController {
    /// Creates a controller with an empty query on page 1.
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            gate: DebounceGate::new(quiet_period),
            debounced: String::new(),
            pagination: Pagination::new(),
            movies: Vec::new(),
            status: FetchStatus::Idle,
            language: None,
            last_dispatched: None,
            last_seq: 0,
            awaiting: None,
        }
    }

    /// Sets the response language sent with every request.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Response language, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Raw query text as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        self.gate.value()
    }

    /// Query text the current results were requested for.
    #[must_use]
    pub fn debounced_query(&self) -> &str {
        &self.debounced
    }

    /// Current page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.pagination.page()
    }

    /// Last known total pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.pagination.total_pages()
    }

    /// Page bounds.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Movies from the last successful response.
    ///
    /// After a transport failure this still holds the previous list.
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Current fetch status.
    #[must_use]
    pub const fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Error text of the latest resolved request.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }

    /// When the debounce gate next needs a [`tick`](Self::tick).
    #[must_use]
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.gate.deadline()
    }

    /// Dispatches the initial request (popular movies, page 1).
    ///
    /// Runs immediately, without waiting for the quiet period.
    pub fn start(&mut self) -> Option<FetchTicket> {
        self.dispatch_if_changed()
    }

    /// Records raw query text. No request is made until the quiet period
    /// elapses; see [`tick`](Self::tick).
    pub fn input(&mut self, raw: impl Into<String>, now: Instant) -> bool {
        self.gate.input(raw, now)
    }

    /// Advances debounce time.
    ///
    /// When the gate emits, the emitted text becomes the debounced query
    /// and the page is reset to 1 before the request pair is re-evaluated.
    pub fn tick(&mut self, now: Instant) -> Option<FetchTicket> {
        let emitted = self.gate.poll(now)?;
        self.settle(emitted)
    }

    /// Settles the typed query immediately instead of waiting for the
    /// quiet period. No-op when nothing is pending.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        let emitted = self.gate.flush()?;
        self.settle(emitted)
    }

    fn settle(&mut self, emitted: String) -> Option<FetchTicket> {
        tracing::debug!(query = %emitted, "Search query settled");
        self.debounced = emitted;
        self.pagination.reset();
        self.dispatch_if_changed()
    }

    /// Moves to the previous page. No-op on page 1.
    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        if self.pagination.previous() {
            self.dispatch_if_changed()
        } else {
            None
        }
    }

    /// Moves to the next page. No-op on the last page.
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if self.pagination.next() {
            self.dispatch_if_changed()
        } else {
            None
        }
    }

    /// Jumps to `page`, clamped to the last known total.
    pub fn go_to_page(&mut self, page: u32) -> Option<FetchTicket> {
        if self.pagination.go_to(page) {
            self.dispatch_if_changed()
        } else {
            None
        }
    }

    fn dispatch_if_changed(&mut self) -> Option<FetchTicket> {
        let query = MovieQuery::new(&self.debounced, self.pagination.page());
        if self.last_dispatched.as_ref() == Some(&query) {
            return None;
        }
        Some(self.begin(query))
    }

    /// Enters `Loading` and issues the next ticket.
    fn begin(&mut self, query: MovieQuery) -> FetchTicket {
        self.last_seq = self.last_seq.saturating_add(1);
        self.awaiting = Some(self.last_seq);
        self.status = FetchStatus::Loading;
        self.last_dispatched = Some(query.clone());
        tracing::debug!(seq = self.last_seq, ?query, "Dispatching movie request");
        FetchTicket {
            seq: self.last_seq,
            query,
        }
    }

    /// Reconciles the outcome of `ticket` into the view state.
    ///
    /// Only the most recently dispatched ticket is applied; responses to
    /// superseded tickets are dropped. Returns whether the outcome was
    /// applied.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<MoviePage>) -> bool {
        if self.awaiting != Some(ticket.seq) {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.last_seq,
                "Discarding stale movie response"
            );
            return false;
        }
        self.awaiting = None;

        match result {
            Ok(page) => self.apply_page(page),
            Err(err) => {
                let cause = format!("{err:#}");
                tracing::error!(error = %cause, "Error fetching movies");
                self.status = FetchStatus::Failed(FetchError::Transport);
            }
        }
        true
    }

    fn apply_page(&mut self, page: MoviePage) {
        match page.results {
            Some(results) if !results.is_empty() => {
                self.pagination.set_total(page.total_pages.unwrap_or(1));
                self.movies = results;
                self.status = FetchStatus::Loaded;
            }
            _ => {
                if let Some(total_pages) = page.total_pages {
                    self.pagination.set_total(total_pages);
                }
                let message = page
                    .status_message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| String::from(NO_MOVIES_MESSAGE));
                tracing::info!(message = %message, "No movies in response");
                self.movies.clear();
                self.status = FetchStatus::Failed(FetchError::NoResults(message));
            }
        }
    }

    /// Sends `ticket` through `api` and reconciles the outcome.
    ///
    /// Suspends only on the network call. Returns whether the outcome was
    /// applied (see [`complete`](Self::complete)).
    pub async fn fetch(
        &mut self,
        api: &(impl LocalMovieApi + Sync),
        ticket: &FetchTicket,
    ) -> bool {
        let result = fetch_movies(api, ticket.query(), self.language.as_deref()).await;
        self.complete(ticket, result)
    }
}

impl Default for BrowseController {
    fn default() -> Self {
        Self::new(crate::debounce::DEFAULT_QUIET_PERIOD)
    }
}
