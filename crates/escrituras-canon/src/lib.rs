//! Static canon data and book-name matching for scripture citations.
//!
//! This crate is the data layer of the citation resolution engine. It owns:
//! - [`BookCatalog`]: the table of canonical book names, slugs, and volume
//!   codes for all five subdivisions of the canon, embedded at compile time
//!   and loaded once per process;
//! - [`normalize`]: the text canonicalization used everywhere a book name is
//!   compared (case folding, diacritic stripping, whitespace collapsing);
//! - [`AliasIndex`]: resolution of raw book-name fragments (abbreviations,
//!   Roman numerals, ordinal prefixes, accent variants) to catalog entries.
//!
//! The grammar layer (`escrituras-ref`) builds citation parsing and
//! identifier rendering on top of this crate.
//!
//! # Example
//!
//! ```rust
//! use escrituras_canon::{aliases, VolumeCode};
//!
//! let book = aliases().resolve("génesis").unwrap();
//! assert_eq!(book.slug, "genesis");
//! assert_eq!(book.volume, VolumeCode::AT);
//! ```
//!
//! All tables are built on first use and are read-only afterwards, so they
//! may be shared freely across threads.

pub mod alias;
pub mod catalog;
pub mod normalize;
pub mod types;

// Re-export main types
pub use alias::{AliasIndex, aliases};
pub use catalog::{BookCatalog, CatalogError, catalog};
pub use normalize::{normalize, slugify};
pub use types::{BookEntry, VolumeCode};
