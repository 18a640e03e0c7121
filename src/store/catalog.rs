use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{read_json, write_if_absent, write_json};
use crate::error::StorageError;
use crate::models::{BookRecord, Catalog, Genre};

/// The catalog written on first run: three genres, four books.
pub fn sample_catalog() -> Catalog {
    Catalog {
        genres: vec![
            Genre {
                name: "Fiction".to_string(),
                books: vec![
                    BookRecord::new("The Last Garden", "A. Author", "A charming tale of..."),
                    BookRecord::new("Wind and Stars", "E. Writer", "Space meets..."),
                ],
            },
            Genre {
                name: "Science".to_string(),
                books: vec![BookRecord::new(
                    "Quantum Patterns",
                    "Dr. Q",
                    "An introduction to...",
                )],
            },
            Genre {
                name: "Mystery".to_string(),
                books: vec![BookRecord::new(
                    "The Missing Key",
                    "Sleuth",
                    "A whodunit set in...",
                )],
            },
        ],
    }
}

/// Read-mostly book catalog backed by `books.json`.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed the sample catalog if the file does not exist. Returns `true` when seeded.
    pub fn ensure_default(&self) -> Result<bool, StorageError> {
        let created = write_if_absent(&self.path, sample_catalog)?;
        if created {
            info!("Seeded {:?} with the sample catalog", self.path);
        }
        Ok(created)
    }

    pub fn load(&self) -> Result<Catalog, StorageError> {
        self.ensure_default()?;
        let catalog: Catalog = read_json(&self.path)?;
        debug!(
            "Loaded {} books in {} genres from {:?}",
            catalog.book_count(),
            catalog.genres.len(),
            self.path
        );
        Ok(catalog)
    }

    pub fn save(&self, catalog: &Catalog) -> Result<(), StorageError> {
        write_json(&self.path, catalog)
    }
}
