//! Identifier rendering: a [`Reference`] to the fixed-format store key.
//!
//! The identifier shape is the store's primary-key contract:
//! `{VOLUME}-{slug}-{chapter:02}-{verse:03}`, e.g. `AT-genesis-01-001`,
//! `BM-1-nefi-02-015`, `DyC-secciones-76-022`. Rendering is pure and
//! infallible; anything malformed was already rejected by the parser.

use crate::error::Result;
use crate::parser::{Reference, parse};
use escrituras_canon::VolumeCode;

/// Render the canonical identifier for a reference.
///
/// A ranged reference renders its first verse; ranges are expanded to
/// individual references before identifiers are built, except for the
/// covenants compact style (see [`build_range`]).
pub fn build(reference: &Reference) -> String {
    format!(
        "{}-{}-{:02}-{:03}",
        reference.book.volume, reference.book.slug, reference.chapter, reference.verse
    )
}

/// Render an identifier keeping the covenants-volume compact range suffix.
///
/// The legacy store citation style for the covenants volume kept the range
/// upper bound in the key (`DyC-secciones-76-022-024`). Only that volume
/// uses the compact form; for every other reference, and for non-ranged
/// covenants references, this is identical to [`build`].
pub fn build_range(reference: &Reference) -> String {
    let mut id = build(reference);
    if reference.book.volume == VolumeCode::DyC {
        if let Some(end) = reference.verse_end {
            id.push_str(&format!("-{:03}", end));
        }
    }
    id
}

/// Parse a citation and render its identifier in one step.
///
/// # Example
///
/// ```rust
/// assert_eq!(escrituras_ref::resolve("Génesis 1:1").unwrap(), "AT-genesis-01-001");
/// ```
pub fn resolve(citation: &str) -> Result<String> {
    parse(citation).map(|reference| build(&reference))
}
