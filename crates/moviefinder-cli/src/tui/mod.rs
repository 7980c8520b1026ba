//! TUI module for interactive terminal interfaces.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod browser;
/// Movie browser state types.
pub mod state;
mod ui;

pub use browser::run_browser;
