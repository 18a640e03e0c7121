//! Genre scoping and free-text search over an in-memory [`Catalog`].
//!
//! Everything here is a pure function of its arguments. Results keep catalog
//! order: genres in file order, books in file order within each genre.

use std::fmt;

use crate::models::{BookRecord, BookSummary, Catalog};

/// Label of the selection that spans every genre.
pub const ALL_GENRES: &str = "All Genres";

/// Which part of the catalog the book list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenreSelection {
    #[default]
    All,
    Genre(String),
}

impl GenreSelection {
    /// Parse a display label; the [`ALL_GENRES`] label maps to [`GenreSelection::All`].
    pub fn parse(label: &str) -> Self {
        if label == ALL_GENRES {
            Self::All
        } else {
            Self::Genre(label.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_GENRES,
            Self::Genre(name) => name,
        }
    }

    fn includes(&self, genre: &str) -> bool {
        match self {
            Self::All => true,
            Self::Genre(name) => name == genre,
        }
    }
}

impl From<&str> for GenreSelection {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl fmt::Display for GenreSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector labels: [`ALL_GENRES`] followed by each genre in catalog order.
pub fn genres(catalog: &Catalog) -> Vec<String> {
    std::iter::once(ALL_GENRES.to_string())
        .chain(catalog.genres.iter().map(|g| g.name.clone()))
        .collect()
}

/// Every book in scope, tagged with the genre it came from.
pub fn books_by_genre(catalog: &Catalog, selection: &GenreSelection) -> Vec<BookSummary> {
    in_scope(catalog, selection)
        .map(|(genre, book)| BookSummary::from_record(genre, book))
        .collect()
}

/// Books in scope whose title or author contains `query`, ignoring case.
///
/// A query that is empty after trimming matches everything, so this is then
/// the same as [`books_by_genre`].
pub fn filter(catalog: &Catalog, selection: &GenreSelection, query: &str) -> Vec<BookSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return books_by_genre(catalog, selection);
    }

    in_scope(catalog, selection)
        .filter(|(_, book)| {
            book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
        .map(|(genre, book)| BookSummary::from_record(genre, book))
        .collect()
}

fn in_scope<'a>(
    catalog: &'a Catalog,
    selection: &'a GenreSelection,
) -> impl Iterator<Item = (&'a str, &'a BookRecord)> + 'a {
    catalog
        .genres
        .iter()
        .filter(move |g| selection.includes(&g.name))
        .flat_map(|g| g.books.iter().map(move |b| (g.name.as_str(), b)))
}
