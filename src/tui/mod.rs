//! Live terminal dashboard.
//!
//! Shows the running session timer, the status selector and the history
//! window, redrawn on every tick. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;
pub use event::{action_for, Action};

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::StaffdeskError;
use crate::portal::Portal;

/// Run the dashboard until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub fn run(portal: &mut Portal, tick: Duration) -> Result<(), StaffdeskError> {
    enable_raw_mode()
        .map_err(|e| StaffdeskError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| StaffdeskError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StaffdeskError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(portal);
    let result = run_app(&mut terminal, &mut app, tick);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_>,
    tick: Duration,
) -> Result<(), StaffdeskError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| StaffdeskError::Terminal(format!("Failed to draw: {e}")))?;

        // No key within the tick: loop round and redraw the timer.
        let Some(action) = event::next_action(tick)? else {
            continue;
        };
        match action {
            Action::Quit => break,
            Action::ToggleWork => app.toggle_work()?,
            Action::SetStatus(status) => app.set_status(status)?,
            Action::Next => app.select_next(),
            Action::Previous => app.select_previous(),
            Action::Help => app.show_help(),
            Action::Dismiss => app.clear_notice(),
        }
    }

    Ok(())
}
