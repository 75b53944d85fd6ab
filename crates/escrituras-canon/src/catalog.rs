//! The book catalog: canonical names, slugs, and volume codes.
//!
//! The catalog is embedded at compile time from `data/libros.jsonl` (one
//! JSON object per line, field names matching the original verse metadata)
//! and deserialized once into a process-wide static. After that it is
//! read-only; every resolution call shares the same table.

use crate::types::{BookEntry, VolumeCode};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading the catalog from its data source.
///
/// These can only surface at startup (or from [`BookCatalog::from_jsonl`]
/// in tests); they are never per-request errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("duplicate book name: '{0}'")]
    DuplicateName(String),

    #[error("duplicate slug '{slug}' in volume {volume}")]
    DuplicateSlug { volume: VolumeCode, slug: String },

    #[error("catalog data source is empty")]
    Empty,
}

/// The static table of canon books.
///
/// Lookup is by exact canonical name; fuzzy and alias matching live in
/// [`crate::alias`], built from this table.
pub struct BookCatalog {
    entries: Vec<BookEntry>,
    by_name: HashMap<String, usize>,
}

impl BookCatalog {
    /// Parse a catalog from JSONL content, checking invariants.
    pub fn from_jsonl(data: &str) -> Result<Self, CatalogError> {
        let mut entries: Vec<BookEntry> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut slugs: HashMap<(VolumeCode, String), usize> = HashMap::new();

        for (i, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let entry: BookEntry =
                serde_json::from_str(line).map_err(|source| CatalogError::Parse {
                    line: i + 1,
                    source,
                })?;

            if by_name.contains_key(&entry.name) {
                return Err(CatalogError::DuplicateName(entry.name));
            }
            if slugs
                .insert((entry.volume, entry.slug.clone()), entries.len())
                .is_some()
            {
                return Err(CatalogError::DuplicateSlug {
                    volume: entry.volume,
                    slug: entry.slug,
                });
            }

            by_name.insert(entry.name.clone(), entries.len());
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { entries, by_name })
    }

    /// Look up a book by its exact canonical name.
    pub fn lookup(&self, canonical_name: &str) -> Option<&BookEntry> {
        self.by_name.get(canonical_name).map(|&i| &self.entries[i])
    }

    /// All entries, in data-source order (canon order).
    pub fn iter(&self) -> impl Iterator<Item = &BookEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entry(&self, index: usize) -> &BookEntry {
        &self.entries[index]
    }

    pub(crate) fn index_of(&self, canonical_name: &str) -> Option<usize> {
        self.by_name.get(canonical_name).copied()
    }
}

/// Embedded catalog data, one JSON record per book.
static CATALOG_DATA: &str = include_str!("../data/libros.jsonl");

/// Global book catalog, loaded lazily from the embedded JSONL.
///
/// # Panics
///
/// Panics if the embedded data is invalid. This can only happen if the data
/// file was edited incorrectly; it is a build defect, not a runtime
/// condition, so it is a fatal startup error rather than a per-request one.
static CATALOG: Lazy<BookCatalog> = Lazy::new(|| {
    let catalog = BookCatalog::from_jsonl(CATALOG_DATA)
        .expect("invalid embedded book catalog - this is a bug");
    debug!(books = catalog.len(), "loaded book catalog");
    catalog
});

/// Access the process-wide book catalog.
pub fn catalog() -> &'static BookCatalog {
    &CATALOG
}
