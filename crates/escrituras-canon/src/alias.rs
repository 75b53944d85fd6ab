//! Book-name alias resolution.
//!
//! Maps a raw book-name fragment ("Gén.", "III Juan", "1ra de Juan",
//! "mosiah") to a catalog entry. The index is built once from the catalog
//! and the registered abbreviation table; resolution tries, in order:
//!
//! 1. exact match against a canonical name;
//! 2. case-insensitive exact match;
//! 3. normalized-text match against normalized canonical names and
//!    registered aliases;
//! 4. ordinal/Roman-numeral prefix rewriting (`III` → `3`, `1ra de` → `1`),
//!    after which steps 1–3 are retried once.
//!
//! The ordering is a deliberate tie-break: a canonical name always wins over
//! an alias spelling. There is no fuzzy or substring matching.

use crate::catalog::{BookCatalog, catalog};
use crate::normalize::normalize;
use crate::types::BookEntry;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Registered abbreviations, mapped to canonical names.
///
/// These are the customary Spanish abbreviations of the canon plus a few
/// alternate titles. Keys are stored normalized, so the dotted and accented
/// raw forms here also cover their undotted/unaccented spellings.
const REGISTERED_ALIASES: &[(&str, &str)] = &[
    // Antiguo Testamento
    ("Gén.", "Génesis"),
    ("Éx.", "Éxodo"),
    ("Lev.", "Levítico"),
    ("Núm.", "Números"),
    ("Deut.", "Deuteronomio"),
    ("Jos.", "Josué"),
    ("Jue.", "Jueces"),
    ("1 Sam.", "1 Samuel"),
    ("2 Sam.", "2 Samuel"),
    ("1 Rey.", "1 Reyes"),
    ("2 Rey.", "2 Reyes"),
    ("1 Crón.", "1 Crónicas"),
    ("2 Crón.", "2 Crónicas"),
    ("Esd.", "Esdras"),
    ("Neh.", "Nehemías"),
    ("Est.", "Ester"),
    ("Sal.", "Salmos"),
    ("Salmo", "Salmos"),
    ("Prov.", "Proverbios"),
    ("Ecl.", "Eclesiastés"),
    ("Cant.", "Cantares"),
    ("Cantar de los Cantares", "Cantares"),
    ("Isa.", "Isaías"),
    ("Jer.", "Jeremías"),
    ("Lam.", "Lamentaciones"),
    ("Ezeq.", "Ezequiel"),
    ("Dan.", "Daniel"),
    ("Os.", "Oseas"),
    ("Abd.", "Abdías"),
    ("Jon.", "Jonás"),
    ("Miq.", "Miqueas"),
    ("Nah.", "Nahúm"),
    ("Hab.", "Habacuc"),
    ("Sof.", "Sofonías"),
    ("Hag.", "Hageo"),
    ("Zac.", "Zacarías"),
    ("Mal.", "Malaquías"),
    // Nuevo Testamento
    ("Mat.", "Mateo"),
    ("Mar.", "Marcos"),
    ("Luc.", "Lucas"),
    ("Jn.", "Juan"),
    ("Hech.", "Hechos"),
    ("Rom.", "Romanos"),
    ("1 Cor.", "1 Corintios"),
    ("2 Cor.", "2 Corintios"),
    ("Gál.", "Gálatas"),
    ("Efe.", "Efesios"),
    ("Filip.", "Filipenses"),
    ("Col.", "Colosenses"),
    ("1 Tes.", "1 Tesalonicenses"),
    ("2 Tes.", "2 Tesalonicenses"),
    ("1 Tim.", "1 Timoteo"),
    ("2 Tim.", "2 Timoteo"),
    ("Filem.", "Filemón"),
    ("Heb.", "Hebreos"),
    ("Sant.", "Santiago"),
    ("1 Ped.", "1 Pedro"),
    ("2 Ped.", "2 Pedro"),
    ("1 Jn.", "1 Juan"),
    ("2 Jn.", "2 Juan"),
    ("3 Jn.", "3 Juan"),
    ("Jud.", "Judas"),
    ("Apoc.", "Apocalipsis"),
    // Libro de Mormón
    ("1 Ne.", "1 Nefi"),
    ("2 Ne.", "2 Nefi"),
    ("Jac.", "Jacob"),
    ("Jar.", "Jarom"),
    ("P. de Morm.", "Palabras de Mormón"),
    ("Mos.", "Mosíah"),
    ("Hel.", "Helamán"),
    ("3 Ne.", "3 Nefi"),
    ("4 Ne.", "4 Nefi"),
    ("Morm.", "Mormón"),
    ("Moro.", "Moroni"),
    // Perla de Gran Precio
    ("Moi.", "Moisés"),
    ("Abr.", "Abraham"),
    ("JS—M", "José Smith—Mateo"),
    ("JS—H", "José Smith—Historia"),
    ("A. de F.", "Artículos de Fe"),
];

/// Roman-numeral book prefix: `I Juan`, `III Juan`, optionally `II de Juan`.
///
/// Pattern breakdown:
///   ^(iv|iii|ii|i|v)  - the numeral (longest alternatives first)
///   \s+(?:de\s+)?     - separator, optional "de" connector
///   (\p{L}.*)         - the rest must start with a letter
static ROMAN_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(iv|iii|ii|i|v)\s+(?:de\s+)?(\p{L}.*)$")
        .expect("invalid Roman prefix regex")
});

/// Ordinal book prefix: `1ra Juan`, `2da. de Pedro`, `1a Juan`, `3ro Juan`.
static ORDINAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([1-5])\s*(?:era|ra|da|ro|do|a|o)?\.?\s+(?:de\s+)?(\p{L}.*)$")
        .expect("invalid ordinal prefix regex")
});

/// Rewrite a Roman-numeral or Spanish-ordinal book prefix to a plain digit.
///
/// Returns the input unchanged when no rewrite applies.
fn rewrite_numeral_prefix(fragment: &str) -> String {
    if let Some(caps) = ORDINAL_PREFIX.captures(fragment) {
        return format!("{} {}", &caps[1], &caps[2]);
    }
    if let Some(caps) = ROMAN_PREFIX.captures(fragment) {
        let digit = match caps[1].to_lowercase().as_str() {
            "i" => "1",
            "ii" => "2",
            "iii" => "3",
            "iv" => "4",
            _ => "5",
        };
        return format!("{} {}", digit, &caps[2]);
    }
    fragment.to_string()
}

/// Alias index over the book catalog, built once per process.
pub struct AliasIndex {
    lower: HashMap<String, usize>,
    normalized: HashMap<String, usize>,
}

impl AliasIndex {
    fn build(catalog: &BookCatalog) -> Self {
        let mut lower = HashMap::new();
        let mut normalized = HashMap::new();

        // Canonical names first, so an alias can never shadow one.
        for (i, book) in catalog.iter().enumerate() {
            lower.insert(book.name.to_lowercase(), i);
            normalized.insert(normalize(&book.name), i);
        }
        for (alias, canonical) in REGISTERED_ALIASES {
            let i = catalog
                .index_of(canonical)
                .expect("registered alias points at a book missing from the catalog");
            normalized.entry(normalize(alias)).or_insert(i);
        }
        // Space-free spellings ("1nefi", "palabrasdemormon").
        for (i, book) in catalog.iter().enumerate() {
            let compact = normalize(&book.name).replace(' ', "");
            normalized.entry(compact).or_insert(i);
        }

        Self { lower, normalized }
    }

    /// Resolve a raw book-name fragment to a catalog entry.
    pub fn resolve(&self, raw: &str) -> Option<&'static BookEntry> {
        let raw = raw.trim();
        if let Some(i) = self.try_match(raw) {
            return Some(catalog().entry(i));
        }
        let rewritten = rewrite_numeral_prefix(raw);
        if rewritten != raw {
            if let Some(i) = self.try_match(&rewritten) {
                return Some(catalog().entry(i));
            }
        }
        None
    }

    /// Steps 1-3 of the resolution order.
    fn try_match(&self, fragment: &str) -> Option<usize> {
        if let Some(i) = catalog().index_of(fragment) {
            return Some(i);
        }
        if let Some(&i) = self.lower.get(&fragment.to_lowercase()) {
            return Some(i);
        }
        self.normalized.get(&normalize(fragment)).copied()
    }
}

static ALIASES: LazyLock<AliasIndex> = LazyLock::new(|| AliasIndex::build(catalog()));

/// Access the process-wide alias index.
pub fn aliases() -> &'static AliasIndex {
    &ALIASES
}
