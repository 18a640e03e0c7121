use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppState, FormField, TextInput};
use crate::{Action, Screen};

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    if let Event::Key(key_event) = event {
        if key_event.kind == KeyEventKind::Release {
            return;
        }
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            state.dispatch(Action::Quit);
            return;
        }

        match state.screen() {
            Screen::Login => handle_login(key_event, state),
            Screen::Register => handle_register(key_event, state),
            Screen::BookList => handle_book_list(key_event, state),
            Screen::Detail => handle_detail(key_event, state),
        }
    }
}

/// Shared text editing keys. Returns `true` if the key was consumed.
fn edit_input(event: KeyEvent, input: &mut TextInput) -> bool {
    match event.code {
        KeyCode::Char(c) if !event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            input.insert(c);
        }
        KeyCode::Backspace => {
            input.backspace();
        }
        KeyCode::Delete => {
            input.delete();
        }
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => return false,
    }
    true
}

fn handle_login(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.login_focus = state.login_focus.toggle();
        }
        KeyCode::Enter => submit_login(state, false),
        KeyCode::Char('a') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            submit_login(state, true)
        }
        KeyCode::F(2) => {
            state.dispatch(Action::OpenRegister);
        }
        KeyCode::Esc => {
            state.dispatch(Action::Quit);
        }
        _ => {
            let input = match state.login_focus {
                FormField::Username => &mut state.login_username,
                FormField::Password => &mut state.login_password,
            };
            if edit_input(event, input) {
                state.clear_error();
            }
        }
    }
}

fn submit_login(state: &mut AppState, admin_only: bool) {
    let action = Action::Login {
        username: state.login_username.value.clone(),
        password: state.login_password.value.clone(),
        admin_only,
    };
    state.dispatch(action);
}

fn handle_register(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.register_focus = state.register_focus.toggle();
        }
        KeyCode::Enter => {
            let action = Action::Register {
                username: state.register_username.value.clone(),
                password: state.register_password.value.clone(),
            };
            state.dispatch(action);
        }
        KeyCode::Esc => {
            state.dispatch(Action::Back);
        }
        _ => {
            let input = match state.register_focus {
                FormField::Username => &mut state.register_username,
                FormField::Password => &mut state.register_password,
            };
            if edit_input(event, input) {
                state.clear_error();
            }
        }
    }
}

fn handle_book_list(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => {
            if state.selected_row > 0 {
                state.selected_row -= 1;
            }
        }
        KeyCode::Down => {
            if state.selected_row < state.app.visible_books().len().saturating_sub(1) {
                state.selected_row += 1;
            }
        }
        KeyCode::Tab => state.cycle_genre(1),
        KeyCode::BackTab => state.cycle_genre(-1),
        KeyCode::Enter => match state.app.visible_books().get(state.selected_row) {
            Some(book) => {
                let action = Action::OpenBook {
                    genre: book.genre.clone(),
                    title: book.title.clone(),
                };
                state.dispatch(action);
            }
            None => state.set_error("No book selected".to_string()),
        },
        KeyCode::F(10) => {
            state.dispatch(Action::Logout);
        }
        KeyCode::Esc => {
            state.dispatch(Action::Quit);
        }
        _ => {
            let before = state.search.value.len();
            if edit_input(event, &mut state.search) && state.search.value.len() != before {
                state.search_changed();
            }
        }
    }
}

fn handle_detail(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
            state.dispatch(Action::Back);
        }
        KeyCode::Char('q') => {
            state.dispatch(Action::Quit);
        }
        _ => {}
    }
}
