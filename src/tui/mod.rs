//! Interactive board.
//!
//! An input line that re-parses on every keystroke, above the task list.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Focus};

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::core::Clock;
use crate::error::TaskflowError;
use crate::features::board::ListFilter;
use crate::storage::TaskStore;

/// Run the TUI until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or a store operation fails.
pub fn run(store: &TaskStore, clock: &dyn Clock, filter: ListFilter) -> Result<(), TaskflowError> {
    let mut app = App::new(store, clock, filter)?;

    enable_raw_mode().map_err(|e| TaskflowError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| TaskflowError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| TaskflowError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<(), TaskflowError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| TaskflowError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            match action {
                event::Action::Quit => break,
                event::Action::Submit => app.submit()?,
                event::Action::Refresh => app.refresh()?,
                event::Action::Toggle => app.toggle_selected()?,
                event::Action::Delete => app.delete_selected()?,
                event::Action::CycleFilter => app.cycle_filter()?,
            }
        }
    }

    Ok(())
}
