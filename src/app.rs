//! Application controller.
//!
//! The front end turns user input into discrete [`Action`]s and hands them to
//! [`App::dispatch`]. The controller runs guards against the stores, moves the
//! [`Navigator`] and returns a [`Notice`] for the status line. All failures are
//! reported as notices; none of them end the program.

use log::{debug, warn};

use crate::config::Config;
use crate::error::{NavError, StorageError};
use crate::filter::{self, GenreSelection};
use crate::models::{BookSummary, Catalog};
use crate::navigation::{Direction, NavEvent, Navigator, Screen};
use crate::session::Session;
use crate::store::{CatalogStore, CredentialStore};

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login {
        username: String,
        password: String,
        admin_only: bool,
    },
    OpenRegister,
    Register {
        username: String,
        password: String,
    },
    /// Leave the register or detail screen.
    Back,
    SelectGenre(GenreSelection),
    Search(String),
    OpenBook {
        genre: String,
        title: String,
    },
    Logout,
    Quit,
}

impl Action {
    /// Variant name, for logging without leaking form contents.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Login { .. } => "Login",
            Action::OpenRegister => "OpenRegister",
            Action::Register { .. } => "Register",
            Action::Back => "Back",
            Action::SelectGenre(_) => "SelectGenre",
            Action::Search(_) => "Search",
            Action::OpenBook { .. } => "OpenBook",
            Action::Logout => "Logout",
            Action::Quit => "Quit",
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    fn error(err: impl std::fmt::Display) -> Self {
        Notice::Error(err.to_string())
    }
}

/// The book shown on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub genre: String,
    pub title: String,
    /// Author line as displayed, e.g. `"by Dr. Q"`.
    pub byline: String,
    pub description: String,
}

pub struct App {
    credentials: CredentialStore,
    catalog_store: CatalogStore,
    session: Session,
    navigator: Navigator,
    catalog: Catalog,
    genre: GenreSelection,
    query: String,
    visible: Vec<BookSummary>,
    detail: Option<DetailView>,
    should_quit: bool,
}

impl App {
    /// Build the controller and run first-start setup: the default admin
    /// account and the sample catalog are written if their files are missing.
    pub fn new(config: &Config) -> Result<Self, StorageError> {
        let credentials = CredentialStore::new(&config.users_path);
        let catalog_store = CatalogStore::new(&config.books_path);
        catalog_store.ensure_default()?;
        credentials.ensure_default()?;

        Ok(Self {
            credentials,
            catalog_store,
            session: Session::default(),
            navigator: Navigator::new(),
            catalog: Catalog::default(),
            genre: GenreSelection::All,
            query: String::new(),
            visible: Vec::new(),
            detail: None,
            should_quit: false,
        })
    }

    // -- accessors -----------------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.navigator.last_direction()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Genre selector labels, starting with "All Genres".
    pub fn genres(&self) -> Vec<String> {
        filter::genres(&self.catalog)
    }

    pub fn genre(&self) -> &GenreSelection {
        &self.genre
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows of the book list for the current genre and query.
    pub fn visible_books(&self) -> &[BookSummary] {
        &self.visible
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // -- dispatch ------------------------------------------------------------

    /// Handle one action. Returns the message to show, if any.
    pub fn dispatch(&mut self, action: Action) -> Option<Notice> {
        debug!("Dispatch {} on {}", action.name(), self.screen().name());
        match action {
            Action::Login {
                username,
                password,
                admin_only,
            } => Some(self.login(&username, &password, admin_only)),
            Action::OpenRegister => self.navigate(NavEvent::OpenRegister).err(),
            Action::Register { username, password } => Some(self.register(&username, &password)),
            Action::Back => self.navigate(NavEvent::Back).err(),
            Action::SelectGenre(genre) => {
                if self.screen() == Screen::BookList {
                    self.genre = genre;
                    self.refresh();
                }
                None
            }
            Action::Search(query) => {
                if self.screen() == Screen::BookList {
                    self.query = query;
                    self.refresh();
                }
                None
            }
            Action::OpenBook { genre, title } => self.open_book(&genre, &title),
            Action::Logout => Some(self.logout()),
            Action::Quit => {
                self.should_quit = true;
                None
            }
        }
    }

    fn navigate(&mut self, event: NavEvent) -> Result<(), Notice> {
        self.navigator.apply(event).map(|_| ()).map_err(|e| {
            warn!("{e}");
            Notice::error(e)
        })
    }

    fn permits(&self, event: NavEvent) -> Result<(), NavError> {
        self.navigator.check(event).map(|_| ())
    }

    fn login(&mut self, username: &str, password: &str, admin_only: bool) -> Notice {
        if let Err(e) = self.permits(NavEvent::LoginSucceeded) {
            return Notice::error(e);
        }

        let user = match self.credentials.authenticate(username, password, admin_only) {
            Ok(user) => user,
            Err(e) => return Notice::error(e),
        };

        // Every login starts from a freshly loaded catalog and an unfiltered list.
        let catalog = match self.catalog_store.load() {
            Ok(catalog) => catalog,
            Err(e) => return Notice::error(format!("Storage error: {e}")),
        };
        self.catalog = catalog;
        self.genre = GenreSelection::All;
        self.query.clear();
        self.detail = None;
        self.refresh();

        self.session.begin(&user);
        match self.navigate(NavEvent::LoginSucceeded) {
            Ok(()) => Notice::Info(format!("Welcome, {}", user.username)),
            Err(notice) => notice,
        }
    }

    fn register(&mut self, username: &str, password: &str) -> Notice {
        if let Err(e) = self.permits(NavEvent::Registered) {
            return Notice::error(e);
        }
        if let Err(e) = self.credentials.register(username, password) {
            return Notice::error(e);
        }
        match self.navigate(NavEvent::Registered) {
            Ok(()) => Notice::Info("Registered! You can now login".to_string()),
            Err(notice) => notice,
        }
    }

    fn open_book(&mut self, genre: &str, title: &str) -> Option<Notice> {
        if let Err(e) = self.permits(NavEvent::OpenBook) {
            return Some(Notice::error(e));
        }
        let book = match self.catalog.find(genre, title) {
            Ok(book) => book,
            Err(e) => {
                warn!("{e}: {title:?} in {genre:?}");
                return Some(Notice::error(e));
            }
        };
        self.detail = Some(DetailView {
            genre: genre.to_string(),
            title: book.title.clone(),
            byline: format!("by {}", book.author),
            description: book.description.clone(),
        });
        self.navigate(NavEvent::OpenBook).err()
    }

    fn logout(&mut self) -> Notice {
        if let Err(notice) = self.navigate(NavEvent::Logout) {
            return notice;
        }
        self.session.clear();
        self.detail = None;
        Notice::Info("Logged out".to_string())
    }

    fn refresh(&mut self) {
        self.visible = filter::filter(&self.catalog, &self.genre, &self.query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_in(dir: &tempfile::TempDir) -> App {
        App::new(&Config::in_dir(dir.path())).unwrap()
    }

    fn login(app: &mut App, user: &str, pass: &str, admin_only: bool) -> Option<Notice> {
        app.dispatch(Action::Login {
            username: user.into(),
            password: pass.into(),
            admin_only,
        })
    }

    #[test]
    fn new_seeds_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(&dir);
        assert!(dir.path().join("users.json").exists());
        assert!(dir.path().join("books.json").exists());
        assert_eq!(app.screen(), Screen::Login);
        assert!(app.visible_books().is_empty());
    }

    #[test]
    fn failed_login_stays_on_login() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        let notice = login(&mut app, "admin", "wrong", false).unwrap();
        assert_eq!(notice, Notice::Error("Invalid credentials".into()));
        assert_eq!(app.screen(), Screen::Login);
        assert!(!app.session().is_authenticated());

        let notice = login(&mut app, "", "", false).unwrap();
        assert_eq!(notice.text(), "Please enter username and password");
    }

    #[test]
    fn login_loads_catalog_and_sets_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        let notice = login(&mut app, "admin", "admin", true).unwrap();
        assert!(!notice.is_error());
        assert_eq!(app.screen(), Screen::BookList);
        assert_eq!(app.last_direction(), Some(Direction::Forward));
        assert_eq!(app.session().current_user(), Some("admin"));
        assert!(app.session().is_admin());
        assert_eq!(app.visible_books().len(), 4);
        assert_eq!(app.genres()[0], "All Genres");
    }

    #[test]
    fn admin_login_refused_for_regular_user() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.dispatch(Action::OpenRegister);
        app.dispatch(Action::Register {
            username: "reader".into(),
            password: "pw".into(),
        });

        let notice = login(&mut app, "reader", "pw", true).unwrap();
        assert_eq!(notice, Notice::Error("Not an admin account".into()));
        assert_eq!(app.screen(), Screen::Login);
    }

    #[test]
    fn register_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        assert_eq!(app.dispatch(Action::OpenRegister), None);
        assert_eq!(app.screen(), Screen::Register);

        let dup = app.dispatch(Action::Register {
            username: "admin".into(),
            password: "x".into(),
        });
        assert_eq!(dup, Some(Notice::Error("Username already exists".into())));
        assert_eq!(app.screen(), Screen::Register);

        let ok = app.dispatch(Action::Register {
            username: "reader".into(),
            password: "pw".into(),
        });
        assert_eq!(ok, Some(Notice::Info("Registered! You can now login".into())));
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(app.last_direction(), Some(Direction::Back));

        let notice = login(&mut app, "reader", "pw", false).unwrap();
        assert!(!notice.is_error());
        assert!(!app.session().is_admin());
    }

    #[test]
    fn search_and_genre_update_visible_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        login(&mut app, "admin", "admin", false);

        app.dispatch(Action::Search("quantum".into()));
        assert_eq!(app.visible_books().len(), 1);
        assert_eq!(app.visible_books()[0].genre, "Science");

        app.dispatch(Action::SelectGenre("Fiction".into()));
        assert!(app.visible_books().is_empty());

        app.dispatch(Action::Search(String::new()));
        assert_eq!(app.visible_books().len(), 2);
    }

    #[test]
    fn relogin_resets_filter_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        login(&mut app, "admin", "admin", false);
        app.dispatch(Action::SelectGenre("Mystery".into()));
        app.dispatch(Action::Search("key".into()));

        assert_eq!(app.dispatch(Action::Logout), Some(Notice::Info("Logged out".into())));
        assert!(!app.session().is_authenticated());

        login(&mut app, "admin", "admin", false);
        assert_eq!(app.genre(), &GenreSelection::All);
        assert_eq!(app.query(), "");
        assert_eq!(app.visible_books().len(), 4);
    }

    #[test]
    fn open_book_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        login(&mut app, "admin", "admin", false);

        let missing = app.dispatch(Action::OpenBook {
            genre: "Fiction".into(),
            title: "Quantum Patterns".into(),
        });
        assert_eq!(missing, Some(Notice::Error("Book not found".into())));
        assert_eq!(app.screen(), Screen::BookList);

        let opened = app.dispatch(Action::OpenBook {
            genre: "Science".into(),
            title: "Quantum Patterns".into(),
        });
        assert_eq!(opened, None);
        assert_eq!(app.screen(), Screen::Detail);
        let detail = app.detail().unwrap();
        assert_eq!(detail.byline, "by Dr. Q");
        assert_eq!(detail.description, "An introduction to...");

        app.dispatch(Action::Back);
        assert_eq!(app.screen(), Screen::BookList);
    }

    #[test]
    fn actions_out_of_place_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        let notice = app.dispatch(Action::Logout).unwrap();
        assert!(notice.is_error());
        assert_eq!(app.screen(), Screen::Login);

        assert!(app.dispatch(Action::Back).unwrap().is_error());
        assert_eq!(app.dispatch(Action::Search("x".into())), None);
        assert_eq!(app.query(), "");

        app.dispatch(Action::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn broken_users_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        std::fs::write(dir.path().join("users.json"), "not json").unwrap();

        let notice = login(&mut app, "admin", "admin", false).unwrap();
        assert!(notice.is_error());
        assert!(notice.text().starts_with("Storage error:"));
        assert_eq!(app.screen(), Screen::Login);
    }
}
