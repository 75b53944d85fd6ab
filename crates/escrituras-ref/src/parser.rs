//! Citation parsing: one citation string to one [`Reference`].
//!
//! The grammar is `<book> <chapter>[:<verse>[-<verse_end>]]`, with two
//! special recognizers for the covenants volume, which is addressed by a
//! numbered unit (a section or an official declaration) instead of
//! book-plus-chapter.

use crate::error::{Error, Result};
use escrituras_canon::{BookEntry, aliases, catalog};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// One resolved citation.
///
/// `verse_end`, when present, is strictly greater than `verse`; a
/// single-verse reference carries `None`. For the covenants volume,
/// `chapter` holds the section or declaration number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub book: &'static BookEntry,
    pub chapter: u32,
    pub verse: u32,
    pub verse_end: Option<u32>,
}

impl Reference {
    /// Whether this reference spans more than one verse.
    pub fn is_ranged(&self) -> bool {
        self.verse_end.is_some()
    }

    /// The last verse covered (the verse itself when not ranged).
    pub fn last_verse(&self) -> u32 {
        self.verse_end.unwrap_or(self.verse)
    }

    /// Expand into one single-verse reference per covered verse, in order.
    pub fn expand_verses(&self) -> impl Iterator<Item = Reference> {
        let base = *self;
        (self.verse..=self.last_verse()).map(move |verse| Reference {
            verse,
            verse_end: None,
            ..base
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book.name, self.chapter, self.verse)?;
        if let Some(end) = self.verse_end {
            write!(f, "-{}", end)?;
        }
        Ok(())
    }
}

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

static COLON_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*:\s*").expect("invalid colon spacing regex"));

static DASH_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*").expect("invalid dash spacing regex"));

/// Covenants-volume section citation: `DyC 76:22`, `D. y C. 76`,
/// `Doctrina y Convenios 76:22-24`, `Sección 76`.
static SECTION_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:d\.?\s*y\.?\s*c\.?|doctrina y convenios|secci[oó]n(?:es)?)\s+(\d+)(?::(\d+)(?:-(\d+))?)?$")
        .expect("invalid section citation regex")
});

/// Official-declaration citation: `Declaración Oficial 2`, `D. O. 1:1`.
static DECLARATION_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:declaraci[oó]n(?:es)? oficial(?:es)?|d\.?\s*o\.?)\s+(\d+)(?::(\d+)(?:-(\d+))?)?$")
        .expect("invalid declaration citation regex")
});

/// Ordinary book citation.
///
/// Pattern breakdown:
///   (?<book>\d*\s*\p{L}[\p{L}\s.—]*?) - optional leading number, then the
///                                       name fragment (lazy, no digits, so
///                                       the chapter is never swallowed)
///   \s+(?<chapter>\d+)                - mandatory chapter
///   (?::(?<verse>\d+)(?:-(?<end>\d+))?)? - optional verse and range end
static BOOK_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<book>\d*\s*\p{L}[\p{L}\s.—]*?)\s+(?<chapter>\d+)(?::(?<verse>\d+)(?:-(?<end>\d+))?)?$")
        .expect("invalid book citation regex")
});

/// Collapse whitespace and drop spaces around `:` and `-` so the grammar
/// regexes only ever see one spelling of separators.
fn tidy(citation: &str) -> String {
    let citation = SPACE_RUNS.replace_all(citation.trim(), " ");
    let citation = COLON_SPACING.replace_all(&citation, ":");
    DASH_SPACING.replace_all(&citation, "-").into_owned()
}

fn parse_number(digits: &str, citation: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|_| Error::InvalidFormat(citation.to_string()))
}

/// Assemble a reference once the book is known, validating the numbers.
fn numbered_reference(
    book: &'static BookEntry,
    citation: &str,
    chapter: &str,
    verse: Option<&str>,
    verse_end: Option<&str>,
) -> Result<Reference> {
    let chapter = parse_number(chapter, citation)?;
    let verse = match verse {
        Some(digits) => parse_number(digits, citation)?,
        None => 1,
    };
    if chapter == 0 || verse == 0 {
        return Err(Error::InvalidFormat(citation.to_string()));
    }
    let verse_end = match verse_end {
        Some(digits) => {
            let end = parse_number(digits, citation)?;
            if end < verse {
                return Err(Error::InvalidRange(format!("{}-{}", verse, end)));
            }
            if end == verse { None } else { Some(end) }
        }
        None => None,
    };
    Ok(Reference {
        book,
        chapter,
        verse,
        verse_end,
    })
}

/// The fixed covenants-volume entries are part of the embedded catalog; the
/// catalog load would have panicked at startup if they were missing.
fn unit_entry(canonical_name: &str) -> &'static BookEntry {
    catalog()
        .lookup(canonical_name)
        .expect("catalog is missing a covenants unit entry - this is a bug")
}

/// Parse one citation into a [`Reference`].
///
/// The covenants-volume recognizers run before the general grammar; the
/// general grammar resolves its book fragment through the alias index.
///
/// # Example
///
/// ```rust
/// let r = escrituras_ref::parse("Génesis 1:1-3").unwrap();
/// assert_eq!(r.book.slug, "genesis");
/// assert_eq!((r.chapter, r.verse, r.verse_end), (1, 1, Some(3)));
/// ```
pub fn parse(citation: &str) -> Result<Reference> {
    let tidied = tidy(citation);
    if tidied.is_empty() {
        return Err(Error::InvalidFormat(citation.to_string()));
    }

    if let Some(caps) = SECTION_REF.captures(&tidied) {
        return numbered_reference(
            unit_entry("Doctrina y Convenios"),
            citation,
            &caps[1],
            caps.get(2).map(|m| m.as_str()),
            caps.get(3).map(|m| m.as_str()),
        );
    }
    if let Some(caps) = DECLARATION_REF.captures(&tidied) {
        return numbered_reference(
            unit_entry("Declaraciones Oficiales"),
            citation,
            &caps[1],
            caps.get(2).map(|m| m.as_str()),
            caps.get(3).map(|m| m.as_str()),
        );
    }

    let caps = BOOK_REF
        .captures(&tidied)
        .ok_or_else(|| Error::InvalidFormat(citation.to_string()))?;
    let fragment = caps.name("book").map(|m| m.as_str()).unwrap_or_default();
    let book = aliases()
        .resolve(fragment)
        .ok_or_else(|| Error::UnknownBook(fragment.to_string()))?;
    numbered_reference(
        book,
        citation,
        &caps["chapter"],
        caps.name("verse").map(|m| m.as_str()),
        caps.name("end").map(|m| m.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use escrituras_canon::VolumeCode;

    #[test]
    fn test_parse_simple_citation() {
        let r = parse("Juan 3:16").unwrap();
        assert_eq!(r.book.name, "Juan");
        assert_eq!(r.chapter, 3);
        assert_eq!(r.verse, 16);
        assert_eq!(r.verse_end, None);
    }

    #[test]
    fn test_omitted_verse_defaults_to_one() {
        let r = parse("Salmos 23").unwrap();
        assert_eq!(r.book.name, "Salmos");
        assert_eq!(r.chapter, 23);
        assert_eq!(r.verse, 1);
    }

    #[test]
    fn test_parse_range() {
        let r = parse("Génesis 1:1-3").unwrap();
        assert_eq!((r.chapter, r.verse, r.verse_end), (1, 1, Some(3)));
        assert!(r.is_ranged());
        assert_eq!(r.last_verse(), 3);
    }

    #[test]
    fn test_degenerate_range_collapses() {
        let r = parse("Juan 1:1-1").unwrap();
        assert_eq!(r.verse_end, None);
    }

    #[test]
    fn test_backwards_range_is_invalid() {
        assert_eq!(
            parse("Juan 1:5-3"),
            Err(Error::InvalidRange("5-3".to_string()))
        );
    }

    #[test]
    fn test_missing_chapter_is_invalid() {
        assert!(matches!(parse("Génesis"), Err(Error::InvalidFormat(_))));
        assert!(matches!(parse(""), Err(Error::InvalidFormat(_))));
        assert!(matches!(parse("3:16"), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_zero_chapter_or_verse_is_invalid() {
        assert!(matches!(parse("Juan 0:1"), Err(Error::InvalidFormat(_))));
        assert!(matches!(parse("Juan 1:0"), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_unknown_book() {
        assert_eq!(
            parse("Xyzzy 1:1"),
            Err(Error::UnknownBook("Xyzzy".to_string()))
        );
    }

    #[test]
    fn test_numbered_book_names() {
        let r = parse("1 Nefi 2:15").unwrap();
        assert_eq!(r.book.slug, "1-nefi");
        assert_eq!((r.chapter, r.verse), (2, 15));

        let r = parse("2da de Pedro 1:5-7").unwrap();
        assert_eq!(r.book.name, "2 Pedro");
        assert_eq!((r.chapter, r.verse, r.verse_end), (1, 5, Some(7)));

        let r = parse("III Juan 1:2").unwrap();
        assert_eq!(r.book.name, "3 Juan");
    }

    #[test]
    fn test_abbreviated_book() {
        let r = parse("Gén. 1:1").unwrap();
        assert_eq!(r.book.name, "Génesis");
    }

    #[test]
    fn test_whitespace_is_forgiving() {
        let r = parse("  Juan   3 : 16 ").unwrap();
        assert_eq!((r.chapter, r.verse), (3, 16));

        let r = parse("Juan 1:1 - 3").unwrap();
        assert_eq!(r.verse_end, Some(3));
    }

    #[test]
    fn test_section_citations() {
        for citation in ["DyC 76:22", "D. y C. 76:22", "Doctrina y Convenios 76:22"] {
            let r = parse(citation).unwrap();
            assert_eq!(r.book.slug, "secciones", "for {citation:?}");
            assert_eq!(r.book.volume, VolumeCode::DyC);
            assert_eq!((r.chapter, r.verse), (76, 22));
        }

        let r = parse("Sección 76").unwrap();
        assert_eq!(r.book.slug, "secciones");
        assert_eq!((r.chapter, r.verse), (76, 1));
    }

    #[test]
    fn test_section_range_keeps_upper_bound() {
        let r = parse("DyC 76:22-24").unwrap();
        assert_eq!((r.chapter, r.verse, r.verse_end), (76, 22, Some(24)));
    }

    #[test]
    fn test_declaration_citations() {
        let r = parse("Declaración Oficial 1").unwrap();
        assert_eq!(r.book.slug, "declaraciones-oficiales");
        assert_eq!((r.chapter, r.verse), (1, 1));

        let r = parse("D. O. 2:1").unwrap();
        assert_eq!(r.book.slug, "declaraciones-oficiales");
        assert_eq!((r.chapter, r.verse), (2, 1));
    }

    #[test]
    fn test_display_round_trip() {
        for citation in ["Juan 3:16", "Génesis 1:1-3", "1 Nefi 2:15"] {
            let r = parse(citation).unwrap();
            assert_eq!(r.to_string(), citation);
            assert_eq!(parse(&r.to_string()).unwrap(), r);
        }

        // Abbreviations render back as the canonical name.
        let r = parse("Gén. 1:1").unwrap();
        assert_eq!(r.to_string(), "Génesis 1:1");

        let r = parse("DyC 76:22").unwrap();
        assert_eq!(r.to_string(), "Doctrina y Convenios 76:22");
        assert_eq!(parse(&r.to_string()).unwrap(), r);
    }

    #[test]
    fn test_expand_verses() {
        let r = parse("Juan 1:1-3").unwrap();
        let verses: Vec<String> = r.expand_verses().map(|v| v.to_string()).collect();
        assert_eq!(verses, vec!["Juan 1:1", "Juan 1:2", "Juan 1:3"]);

        let r = parse("Juan 3:16").unwrap();
        assert_eq!(r.expand_verses().count(), 1);
    }

    #[test]
    fn test_pearl_books() {
        let r = parse("Moisés 1:39").unwrap();
        assert_eq!(r.book.slug, "moises");
        assert_eq!(r.book.volume, VolumeCode::PGP);

        let r = parse("José Smith—Mateo 1:4").unwrap();
        assert_eq!(r.book.slug, "jose-smith-mateo");
    }
}
