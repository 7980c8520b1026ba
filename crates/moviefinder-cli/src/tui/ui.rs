//! TUI rendering logic for the movie browser.

use moviefinder_api::tmdb::Movie;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, Paragraph, Wrap};

use super::state::BrowserState;

/// Placeholder for missing vote, year or language.
const NOT_AVAILABLE: &str = "N/A";

/// Draws the movie browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);
    draw_main(frame, chunks[1], state);
    draw_footer(frame, chunks[2]);
}

/// Draws the search box and page indicator.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let controller = state.controller();
    let search = Paragraph::new(format!("{}_", controller.query()))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" Search "));
    frame.render_widget(search, header_chunks[0]);

    let page_text = format!(
        "Page {} of {}",
        controller.page(),
        controller.total_pages()
    );
    let page = Paragraph::new(page_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Movie Finder "),
    );
    frame.render_widget(page, header_chunks[1]);
}

/// Draws the loading indicator, the error or the movie list.
#[allow(clippy::indexing_slicing)]
fn draw_main(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let controller = state.controller();
    let title = if controller.debounced_query().is_empty() {
        String::from(" Popular ")
    } else {
        format!(" Results for \"{}\" ", controller.debounced_query())
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if controller.is_loading() {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Cyan))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if let Some(message) = controller.error_message() {
        let error = Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(error, area);
        return;
    }

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let items: Vec<ListItem> = controller
        .movies()
        .iter()
        .map(|movie| ListItem::new(movie_row(movie)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("\u{25b8} ")
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(list, pane_chunks[0], &mut state.list_state);
    draw_detail(frame, pane_chunks[1], state);
}

/// Draws the overview of the movie under the cursor.
fn draw_detail(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let overview = state
        .selected_movie()
        .and_then(|movie| movie.overview.as_deref())
        .unwrap_or_default();
    let detail = Paragraph::new(overview)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Overview "));
    frame.render_widget(detail, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect) {
    let help_text = "Type to search  Enter: search now  Ctrl-U: clear  \u{2190}/\u{2192}: page  \u{2191}\u{2193}: move  Esc: quit";
    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// One list line: title, vote, language and year.
fn movie_row(movie: &Movie) -> String {
    let title = movie.title.as_deref().unwrap_or("(untitled)");
    let vote = movie
        .vote_average
        .filter(|vote| *vote > 0.0)
        .map_or_else(|| String::from(NOT_AVAILABLE), |vote| format!("{vote:.1}"));
    let language = movie
        .original_language
        .as_deref()
        .unwrap_or(NOT_AVAILABLE);
    let year = movie.release_year().unwrap_or(NOT_AVAILABLE);
    format!("{title}  \u{2605} {vote}  [{language}]  {year}")
}
