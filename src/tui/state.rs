use crate::{Action, App, Notice, Screen};

/// Which input on the login or register form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum FormField {
    #[default]
    Username,
    Password,
}

impl FormField {
    pub(crate) fn toggle(self) -> Self {
        match self {
            FormField::Username => FormField::Password,
            FormField::Password => FormField::Username,
        }
    }
}

/// Single-line text input with a cursor.
///
/// `cursor` is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TextInput {
    pub(crate) value: String,
    pub(crate) cursor: usize,
}

impl TextInput {
    pub(crate) fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub(crate) fn backspace(&mut self) -> bool {
        match self.value[..self.cursor].chars().next_back() {
            Some(c) => {
                self.cursor -= c.len_utf8();
                self.value.remove(self.cursor);
                true
            }
            None => false,
        }
    }

    pub(crate) fn delete(&mut self) -> bool {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub(crate) fn left(&mut self) {
        if let Some(c) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub(crate) fn right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub(crate) fn home(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub(crate) fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub(crate) fn display_cursor(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }
}

/// Terminal front-end state: the controller plus everything that only
/// matters for drawing and editing (inputs, focus, selection, messages).
pub struct AppState {
    /// Controller owning stores, session and navigation.
    pub(crate) app: App,
    /// Login form inputs.
    pub(crate) login_username: TextInput,
    pub(crate) login_password: TextInput,
    pub(crate) login_focus: FormField,
    /// Register form inputs.
    pub(crate) register_username: TextInput,
    pub(crate) register_password: TextInput,
    pub(crate) register_focus: FormField,
    /// Search box on the book list.
    pub(crate) search: TextInput,
    /// Currently selected row in the book table.
    pub(crate) selected_row: usize,
    /// Error message to display.
    pub(crate) error_message: Option<String>,
    /// Informational message to display.
    pub(crate) success_message: Option<String>,
}

impl AppState {
    pub fn new(app: App) -> Self {
        Self {
            app,
            login_username: TextInput::default(),
            login_password: TextInput::default(),
            login_focus: FormField::Username,
            register_username: TextInput::default(),
            register_password: TextInput::default(),
            register_focus: FormField::Username,
            search: TextInput::default(),
            selected_row: 0,
            error_message: None,
            success_message: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.app.should_quit()
    }

    pub fn screen(&self) -> Screen {
        self.app.screen()
    }

    /// Forward `action` to the controller and update the view state.
    pub(crate) fn dispatch(&mut self, action: Action) {
        let before = self.app.screen();
        let notice = self.app.dispatch(action);
        let after = self.app.screen();

        match (before, after) {
            (Screen::Login, Screen::BookList) => {
                self.login_password.clear();
                self.search.clear();
                self.selected_row = 0;
            }
            (Screen::Register, Screen::Login) => {
                self.register_username.clear();
                self.register_password.clear();
                self.register_focus = FormField::Username;
            }
            _ => {}
        }
        self.clamp_selection();

        match notice {
            Some(Notice::Error(message)) => self.set_error(message),
            Some(Notice::Info(message)) => self.set_success(message),
            None if before != after => {
                self.clear_error();
                self.clear_success();
            }
            None => {}
        }
    }

    /// Push the current search box contents to the controller.
    pub(crate) fn search_changed(&mut self) {
        let query = self.search.value.clone();
        self.dispatch(Action::Search(query));
        self.selected_row = 0;
    }

    /// Step the genre selector by `step` entries, wrapping around.
    pub(crate) fn cycle_genre(&mut self, step: isize) {
        let genres = self.app.genres();
        let current = genres
            .iter()
            .position(|g| g == self.app.genre().as_str())
            .unwrap_or(0);
        let len = genres.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;
        self.dispatch(Action::SelectGenre(genres[next].as_str().into()));
        self.selected_row = 0;
    }

    pub(crate) fn clamp_selection(&mut self) {
        let len = self.app.visible_books().len();
        if self.selected_row >= len {
            self.selected_row = len.saturating_sub(1);
        }
    }

    pub(crate) fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.success_message = None;
        self.error_message = Some(message);
    }

    pub(crate) fn clear_success(&mut self) {
        self.success_message = None;
    }

    pub(crate) fn set_success(&mut self, message: String) {
        self.error_message = None;
        self.success_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &str) -> TextInput {
        TextInput {
            value: text.to_string(),
            cursor: text.len(),
        }
    }

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut field = input("café");
        assert_eq!(field.display_cursor(), 4);

        field.left();
        assert_eq!(field.cursor, 3);
        field.right();
        assert_eq!(field.cursor, 5);

        assert!(field.backspace());
        assert_eq!(field.value, "caf");
        field.insert('é');
        field.home();
        assert!(field.delete());
        assert_eq!(field.value, "afé");
        field.end();
        assert!(!field.delete());
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut field = input("ab");
        field.home();
        assert!(!field.backspace());
        assert_eq!(field.value, "ab");
    }

    #[test]
    fn focus_toggles() {
        assert_eq!(FormField::Username.toggle(), FormField::Password);
        assert_eq!(FormField::Password.toggle(), FormField::Username);
    }
}
