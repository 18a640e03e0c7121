use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// One account in `users.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Lowercase hex SHA-256 of the password, stored under the `password` key.
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Top-level shape of `users.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersFile {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl UsersFile {
    /// Exact, case-sensitive username lookup.
    pub fn find(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.find(username).is_some()
    }
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "desc", default)]
    pub description: String,
}

impl BookRecord {
    pub fn new(title: &str, author: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
        }
    }
}

/// A named genre and the books filed under it, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub name: String,
    pub books: Vec<BookRecord>,
}

/// Top-level shape of `books.json`.
///
/// On disk `genres` is a JSON object keyed by genre name. It is held as a
/// `Vec` so that the order genres appear in the file is the order they are
/// listed and saved back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, with = "genre_map")]
    pub genres: Vec<Genre>,
}

impl Catalog {
    /// Look up a genre by exact name.
    pub fn genre(&self, name: &str) -> Option<&Genre> {
        self.genres.iter().find(|g| g.name == name)
    }

    /// Find the first book titled `title` inside `genre`.
    ///
    /// Titles are only unique per genre, so both halves of the key are needed.
    pub fn find(&self, genre: &str, title: &str) -> Result<&BookRecord, LookupError> {
        self.genre(genre)
            .and_then(|g| g.books.iter().find(|b| b.title == title))
            .ok_or_else(|| LookupError::BookNotFound {
                genre: genre.to_string(),
                title: title.to_string(),
            })
    }

    /// Total number of books across all genres.
    pub fn book_count(&self) -> usize {
        self.genres.iter().map(|g| g.books.len()).sum()
    }
}

/// A row of the book list: just enough to display and to open the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl BookSummary {
    pub(crate) fn from_record(genre: &str, book: &BookRecord) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: genre.to_string(),
        }
    }
}

/// (De)serializes `Vec<Genre>` as an insertion-ordered JSON object.
mod genre_map {
    use super::*;
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(genres: &[Genre], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(genres.iter().map(|g| (&g.name, &g.books)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Genre>, D::Error> {
        deserializer.deserialize_map(GenreMapVisitor)
    }

    struct GenreMapVisitor;

    impl<'de> Visitor<'de> for GenreMapVisitor {
        type Value = Vec<Genre>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping genre names to lists of books")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut genres: Vec<Genre> = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, books)) = map.next_entry::<String, Vec<BookRecord>>()? {
                // Repeated key: last value wins, first position is kept.
                match genres.iter_mut().find(|g| g.name == name) {
                    Some(existing) => existing.books = books,
                    None => genres.push(Genre { name, books }),
                }
            }
            Ok(genres)
        }
    }
}
