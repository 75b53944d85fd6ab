//! Value types for the canon catalog.

use serde::Deserialize;
use std::fmt;

/// Volume subdivision of the canon.
///
/// The string forms are the volume prefixes used in store identifiers
/// (`AT-genesis-01-001`, `DyC-secciones-76-022`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum VolumeCode {
    /// Antiguo Testamento.
    AT,
    /// Nuevo Testamento.
    NT,
    /// Libro de Mormón.
    BM,
    /// Doctrina y Convenios (sections and official declarations).
    DyC,
    /// Perla de Gran Precio.
    PGP,
}

impl VolumeCode {
    /// The identifier prefix for this volume.
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeCode::AT => "AT",
            VolumeCode::NT => "NT",
            VolumeCode::BM => "BM",
            VolumeCode::DyC => "DyC",
            VolumeCode::PGP => "PGP",
        }
    }
}

impl fmt::Display for VolumeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One book (or numbered-unit pseudo-book) of the canon.
///
/// Entries are immutable after catalog load. `slug` is the lowercase
/// hyphenated form used in identifiers; it is unique within a volume.
/// `name` is the canonical Spanish title, unique across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookEntry {
    /// Canonical book name, e.g. `"Génesis"`, `"1 Nefi"`.
    #[serde(rename = "libro")]
    pub name: String,

    /// Identifier slug, e.g. `"genesis"`, `"1-nefi"`. For the two
    /// covenants-volume units this is a fixed literal (`"secciones"`,
    /// `"declaraciones-oficiales"`).
    pub slug: String,

    /// Volume the book belongs to.
    #[serde(rename = "volumen")]
    pub volume: VolumeCode,
}
