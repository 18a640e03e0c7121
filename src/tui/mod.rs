//! Terminal front end: ratatui rendering and crossterm key handling.

pub mod events;
pub mod state;
pub mod terminal;
pub mod ui;

pub use events::handle_event;
pub use state::AppState;
pub use terminal::{restore_terminal, setup_terminal};
pub use ui::render;
