//! Text normalization for book-name matching.
//!
//! Every comparison of a book name against the catalog goes through
//! [`normalize`], both when the alias tables are built and when a raw
//! fragment is resolved, so matching is insensitive to case, accents, and
//! stray punctuation by construction.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize text for matching.
///
/// Performs:
/// - NFD decomposition, dropping combining marks (`"Génesis"` → `"Genesis"`)
/// - lowercase conversion
/// - non-alphanumeric characters replaced with a space
/// - whitespace collapsed to single spaces, trimmed
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| c.to_lowercase())
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let tokens: Vec<&str> = stripped.split_whitespace().collect();
    tokens.join(" ")
}

/// Normalize and hyphenate, producing the slug form of a name.
///
/// This is the rule the catalog's slugs follow (`"1 Nefi"` → `"1-nefi"`,
/// `"José Smith—Mateo"` → `"jose-smith-mateo"`); it exists so tests can
/// check the data file against it, not to invent slugs at resolution time.
pub fn slugify(text: &str) -> String {
    normalize(text).replace(' ', "-")
}
