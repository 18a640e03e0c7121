use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::state::{AppState, FormField, TextInput};
use crate::Screen;

/// Main render function that dispatches to the appropriate screen renderer.
pub fn render(f: &mut Frame, state: &AppState) {
    match state.screen() {
        Screen::Login => render_login(f, state),
        Screen::Register => render_register(f, state),
        Screen::BookList => render_book_list(f, state),
        Screen::Detail => render_detail(f, state),
    }
}

fn title_widget(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn help_widget(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Draw a bordered text input; `masked` replaces every char with `*`.
fn render_input(f: &mut Frame, area: Rect, label: &str, input: &TextInput, focused: bool, masked: bool) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border);

    let text = if masked {
        "*".repeat(input.value.chars().count())
    } else {
        input.value.clone()
    };
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .block(block);
    f.render_widget(widget, area);

    if focused {
        let cursor_x = area.x + input.display_cursor() as u16 + 1;
        let cursor_y = area.y + 1;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Two-field username/password form shared by the login and register screens.
fn form_layout(f: &Frame) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area())
}

fn render_login(f: &mut Frame, state: &AppState) {
    let chunks = form_layout(f);

    f.render_widget(title_widget("Welcome to BookShelf"), chunks[0]);
    render_input(
        f,
        chunks[1],
        "Username",
        &state.login_username,
        state.login_focus == FormField::Username,
        false,
    );
    render_input(
        f,
        chunks[2],
        "Password",
        &state.login_password,
        state.login_focus == FormField::Password,
        true,
    );
    f.render_widget(
        help_widget("Enter: Login | Ctrl+A: Login as Admin | Tab: Switch Field | F2: Register | Esc: Quit"),
        chunks[3],
    );

    render_status_bar(f, chunks[5], state);
}

fn render_register(f: &mut Frame, state: &AppState) {
    let chunks = form_layout(f);

    f.render_widget(title_widget("Create account"), chunks[0]);
    render_input(
        f,
        chunks[1],
        "Choose username",
        &state.register_username,
        state.register_focus == FormField::Username,
        false,
    );
    render_input(
        f,
        chunks[2],
        "Choose password",
        &state.register_password,
        state.register_focus == FormField::Password,
        true,
    );
    f.render_widget(
        help_widget("Enter: Sign Up | Tab: Switch Field | Esc: Back"),
        chunks[3],
    );

    render_status_bar(f, chunks[5], state);
}

fn render_book_list(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    let session = state.app.session();
    let user = match session.current_user() {
        Some(name) if session.is_admin() => format!("{name} (admin)"),
        Some(name) => name.to_string(),
        None => "guest".to_string(),
    };
    let title_text = format!(
        "BookShelf | {} | {} of {} books | {}",
        state.app.genre(),
        state.app.visible_books().len(),
        state.app.catalog().book_count(),
        user
    );
    f.render_widget(title_widget(&title_text), chunks[0]);

    render_input(f, chunks[1], "Search books", &state.search, true, false);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(30)])
        .split(chunks[2]);

    let current = state.app.genre().as_str();
    let genre_rows: Vec<Row> = state
        .app
        .genres()
        .into_iter()
        .map(|g| {
            let style = if g == current {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if g == current { "» " } else { "  " };
            Row::new(vec![Cell::from(format!("{marker}{g}"))]).style(style)
        })
        .collect();
    let genre_table = Table::new(genre_rows, [Constraint::Min(20)])
        .block(Block::default().borders(Borders::ALL).title(" Genres "));
    f.render_widget(genre_table, body[0]);

    let visible_row_limit = (body[1].height.saturating_sub(4) as usize).max(1);
    let visible_start = state
        .selected_row
        .saturating_sub(visible_row_limit.saturating_sub(1));

    let rows: Vec<Row> = state
        .app
        .visible_books()
        .iter()
        .enumerate()
        .skip(visible_start)
        .take(visible_row_limit)
        .map(|(i, book)| {
            let style = if i == state.selected_row {
                highlight_style()
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                Cell::from(book.genre.clone()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(20),
            Constraint::Length(14),
        ],
    )
    .header(
        Row::new(vec!["Title", "Author", "Genre"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1),
    )
    .block(Block::default().borders(Borders::ALL).title(" Books "));
    f.render_widget(table, body[1]);

    f.render_widget(
        help_widget("Type: Search | Up/Down: Select | Enter: Open | Tab/Shift+Tab: Genre | F10: Logout | Esc: Quit"),
        chunks[3],
    );

    render_status_bar(f, chunks[4], state);
}

fn render_detail(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    let detail = state.app.detail();
    let title = detail.map(|d| d.title.as_str()).unwrap_or("No book selected");
    f.render_widget(title_widget(title), chunks[0]);

    let byline = detail
        .map(|d| format!("{} | {}", d.byline, d.genre))
        .unwrap_or_default();
    let byline_widget = Paragraph::new(byline)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(" Author "));
    f.render_widget(byline_widget, chunks[1]);

    let description = detail
        .map(|d| d.description.clone())
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "No description available".to_string());
    let description_widget = Paragraph::new(description)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Description "));
    f.render_widget(description_widget, chunks[2]);

    f.render_widget(help_widget("Esc: Back | q: Quit"), chunks[3]);

    render_status_bar(f, chunks[4], state);
}

/// Render the status bar at the bottom.
fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let status_text = if let Some(ref error) = state.error_message {
        format!(" Error: {}", error)
    } else if let Some(ref success) = state.success_message {
        format!(" Status: {}", success)
    } else {
        match state.app.session().current_user() {
            Some(user) => format!(" Logged in as: {}", user),
            None => " Not logged in".to_string(),
        }
    };

    let style = if state.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}
