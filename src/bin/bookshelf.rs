//! BookShelf TUI Application
//!
//! Log in, pick a genre, search and read book details from the terminal.
//! `users.json` and `books.json` are read from (and created in) the current
//! working directory.

use crossterm::event;
use log::info;
use std::time::Duration;

use bookshelf::tui::{handle_event, render, restore_terminal, setup_terminal, AppState};
use bookshelf::{logging, App, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    logging::init(&config.log_path)?;
    info!("Starting BookShelf with {config:?}");

    let app = App::new(&config)?;
    let mut state = AppState::new(app);
    let mut terminal = setup_terminal()?;

    let result = run(&mut terminal, &mut state);

    restore_terminal(&mut terminal)?;
    info!("Exiting BookShelf");
    result
}

fn run(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| render(f, state))?;

        if state.should_quit() {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, state);
        }
    }
}
