//! Search-and-pagination controller for moviefinder.
//!
//! Turns raw keystrokes and page buttons into TMDB listing requests and
//! reconciles the responses into one observable view state. The crate is
//! front-end agnostic: drivers feed input and time in, dispatch the
//! returned tickets, and hand the results back.

/// Request dispatch and response reconciliation.
pub mod controller;
/// Quiet-period gate for search input.
pub mod debounce;
/// Previous/next page bounds.
pub mod pagination;
/// Consolidated fetch status.
pub mod status;

pub use controller::{BrowseController, FetchTicket};
pub use debounce::{DEFAULT_QUIET_PERIOD, DebounceGate};
pub use pagination::Pagination;
pub use status::{FetchError, FetchStatus, NO_MOVIES_MESSAGE, TRANSPORT_ERROR_MESSAGE};
