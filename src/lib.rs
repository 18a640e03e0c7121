//! BookShelf: a small book catalog browser behind a username/password login.
//!
//! The library holds everything that is not presentation: the JSON-backed
//! credential and catalog stores, the catalog filter, the screen navigation
//! state machine and the [`App`] controller that ties them together. The
//! `bookshelf` binary puts a terminal front end on top of it.
//!
//! # Quick Start
//!
//! ```no_run
//! use bookshelf::{Action, App, Config};
//!
//! let mut app = App::new(&Config::default()).unwrap();
//! app.dispatch(Action::Login {
//!     username: "admin".into(),
//!     password: "admin".into(),
//!     admin_only: true,
//! });
//! for book in app.visible_books() {
//!     println!("{} by {} ({})", book.title, book.author, book.genre);
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod session;
pub mod store;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use app::{Action, App, DetailView, Notice};
pub use config::Config;
pub use error::{AuthError, LookupError, NavError, RegisterError, StorageError};
pub use filter::{books_by_genre, filter, genres, GenreSelection, ALL_GENRES};
pub use models::{BookRecord, BookSummary, Catalog, Genre, UserRecord, UsersFile};
pub use navigation::{Direction, NavEvent, Navigator, Screen, Transition};
pub use session::Session;
pub use store::{hash_password, CatalogStore, CredentialStore};
