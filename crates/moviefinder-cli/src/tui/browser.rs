//! Movie browser TUI main loop.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use moviefinder_api::tmdb::{MoviePage, TmdbClient, fetch_movies};
use moviefinder_browse::{BrowseController, FetchTicket};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::state::BrowserState;
use super::ui;

/// Upper bound on how long the loop waits before redrawing and polling keys.
const TICK: Duration = Duration::from_millis(50);

/// Requests awaiting their response.
type InFlight<'a> = FuturesUnordered<LocalBoxFuture<'a, (FetchTicket, Result<MoviePage>)>>;

/// Outcome of a single key press.
#[derive(Debug)]
enum KeyAction {
    /// Keep running.
    Continue,
    /// Send this request.
    Fetch(FetchTicket),
    /// Leave the browser.
    Quit,
}

/// Runs the movie browser TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser(client: &TmdbClient, controller: BrowseController) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut state = BrowserState::new(controller);

    let result = run_event_loop(&mut terminal, &mut state, client).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Sends one request, pairing the outcome with its ticket.
fn dispatch<'a>(
    client: &'a TmdbClient,
    language: Option<&'a str>,
    ticket: FetchTicket,
) -> LocalBoxFuture<'a, (FetchTicket, Result<MoviePage>)> {
    async move {
        let result = fetch_movies(client, ticket.query(), language).await;
        (ticket, result)
    }
    .boxed_local()
}

/// Main event loop.
///
/// Responses, key presses and debounce deadlines are interleaved on the
/// current thread; several requests may be in flight at once.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    client: &TmdbClient,
) -> Result<()> {
    let language = state.controller().language().map(String::from);
    let mut in_flight: InFlight<'_> = FuturesUnordered::new();

    if let Some(ticket) = state.start() {
        in_flight.push(dispatch(client, language.as_deref(), ticket));
    }

    loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        let wait = state
            .controller()
            .debounce_deadline()
            .map_or(TICK, |deadline| {
                deadline.saturating_duration_since(Instant::now()).min(TICK)
            });

        tokio::select! {
            Some((ticket, result)) = in_flight.next(), if !in_flight.is_empty() => {
                state.complete(&ticket, result);
            }
            () = tokio::time::sleep(wait) => {}
        }

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")?
                && key.kind == KeyEventKind::Press
            {
                match handle_input(state, key.code, key.modifiers, Instant::now()) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Fetch(ticket) => {
                        in_flight.push(dispatch(client, language.as_deref(), ticket));
                    }
                    KeyAction::Continue => {}
                }
            }
        }

        if let Some(ticket) = state.tick(Instant::now()) {
            in_flight.push(dispatch(client, language.as_deref(), ticket));
        }
    }
}

/// Handles a key press.
fn handle_input(
    state: &mut BrowserState,
    key: KeyCode,
    modifiers: KeyModifiers,
    now: Instant,
) -> KeyAction {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let ticket = match key {
        KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Char('u') if ctrl => {
            state.clear_query(now);
            None
        }
        KeyCode::Char(ch) => {
            state.push_char(ch, now);
            None
        }
        KeyCode::Backspace => {
            state.pop_char(now);
            None
        }
        KeyCode::Enter => state.submit(),
        KeyCode::Left | KeyCode::PageUp => state.previous_page(),
        KeyCode::Right | KeyCode::PageDown => state.next_page(),
        KeyCode::Up => {
            state.move_up();
            None
        }
        KeyCode::Down => {
            state.move_down();
            None
        }
        _ => None,
    };
    ticket.map_or(KeyAction::Continue, KeyAction::Fetch)
}
