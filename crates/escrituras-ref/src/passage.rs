//! Passage expansion: a comma-separated passage expression to the ordered
//! list of single-verse citations it denotes.
//!
//! Segments are classified independently; a segment that fails to resolve
//! is recorded next to the successes instead of aborting the whole passage,
//! so callers decide what a partially-resolved passage is worth.

use crate::error::Error;
use crate::parser::{Reference, parse};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Bare verse range segment, e.g. `14-15`.
static BARE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*-\s*(\d+)$").expect("invalid bare range regex"));

/// Bare verse segment, e.g. `14`.
static BARE_VERSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("invalid bare verse regex"));

/// A passage segment that failed to resolve, with its error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentError {
    pub segment: String,
    pub error: Error,
}

/// Result of expanding a passage: resolved citations in canonical order,
/// plus every segment that failed. Neither list is ever silently truncated.
#[derive(Debug, Clone, Default)]
pub struct PassageExpansion {
    /// Single-verse citation strings, deduplicated and sorted by
    /// (book name, chapter, verse).
    pub citations: Vec<String>,

    /// Segments that did not resolve, in input order.
    pub errors: Vec<SegmentError>,
}

impl PassageExpansion {
    /// Whether every segment resolved.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Classify and expand one segment against the inherited context.
///
/// Returns the single-verse references the segment denotes, in range order.
fn expand_segment(segment: &str, last: Option<Reference>) -> Result<Vec<Reference>, Error> {
    if let Some(caps) = BARE_RANGE.captures(segment) {
        let Some(prev) = last else {
            return Err(Error::InvalidRange(segment.to_string()));
        };
        let start: u32 = caps[1]
            .parse()
            .map_err(|_| Error::InvalidFormat(segment.to_string()))?;
        let end: u32 = caps[2]
            .parse()
            .map_err(|_| Error::InvalidFormat(segment.to_string()))?;
        if start == 0 || end < start {
            return Err(Error::InvalidRange(segment.to_string()));
        }
        let spanned = Reference {
            book: prev.book,
            chapter: prev.chapter,
            verse: start,
            verse_end: if end == start { None } else { Some(end) },
        };
        return Ok(spanned.expand_verses().collect());
    }

    if BARE_VERSE.is_match(segment) {
        let Some(prev) = last else {
            return Err(Error::InvalidFormat(segment.to_string()));
        };
        let verse: u32 = segment
            .parse()
            .map_err(|_| Error::InvalidFormat(segment.to_string()))?;
        if verse == 0 {
            return Err(Error::InvalidFormat(segment.to_string()));
        }
        return Ok(vec![Reference {
            book: prev.book,
            chapter: prev.chapter,
            verse,
            verse_end: None,
        }]);
    }

    // Full reference, with or without an inline range.
    Ok(parse(segment)?.expand_verses().collect())
}

/// Expand a passage expression into single-verse citations.
///
/// Bare verse numbers and bare ranges inherit book and chapter from the
/// most recently produced citation in the same passage. Output is
/// deduplicated and canonically ordered regardless of input order:
///
/// ```rust
/// let expansion = escrituras_ref::expand("Juan 1:1, 3, 5-7, 1");
/// assert_eq!(
///     expansion.citations,
///     ["Juan 1:1", "Juan 1:3", "Juan 1:5", "Juan 1:6", "Juan 1:7"]
/// );
/// assert!(expansion.is_complete());
/// ```
pub fn expand(passage: &str) -> PassageExpansion {
    let mut resolved: Vec<Reference> = Vec::new();
    let mut errors: Vec<SegmentError> = Vec::new();
    let mut last: Option<Reference> = None;

    for segment in passage.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match expand_segment(segment, last) {
            Ok(references) => {
                last = references.last().copied();
                resolved.extend(references);
            }
            Err(error) => {
                warn!(segment, %error, "failed to expand passage segment");
                errors.push(SegmentError {
                    segment: segment.to_string(),
                    error,
                });
            }
        }
    }

    resolved.sort_by(|a, b| {
        (&a.book.name, a.chapter, a.verse).cmp(&(&b.book.name, b.chapter, b.verse))
    });
    // Expanded references are all single-verse, so plain equality dedups.
    resolved.dedup();

    PassageExpansion {
        citations: resolved.iter().map(Reference::to_string).collect(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_pure_range() {
        let expansion = expand("Juan 1:1-3");
        assert_eq!(expansion.citations, ["Juan 1:1", "Juan 1:2", "Juan 1:3"]);
        assert!(expansion.is_complete());
    }

    #[test]
    fn test_expand_single_citation() {
        let expansion = expand("Juan 3:16");
        assert_eq!(expansion.citations, ["Juan 3:16"]);
    }

    #[test]
    fn test_bare_verse_inherits_book_and_chapter() {
        let expansion = expand("Juan 1:1-3, 14");
        assert_eq!(
            expansion.citations,
            ["Juan 1:1", "Juan 1:2", "Juan 1:3", "Juan 1:14"]
        );
        assert!(expansion.is_complete());
    }

    #[test]
    fn test_bare_range_inherits_book_and_chapter() {
        let expansion = expand("Juan 1:1, 14-15");
        assert_eq!(expansion.citations, ["Juan 1:1", "Juan 1:14", "Juan 1:15"]);
    }

    #[test]
    fn test_dedup_and_canonical_order() {
        let expansion = expand("Juan 1:1, 3, 5-7, 1");
        assert_eq!(
            expansion.citations,
            ["Juan 1:1", "Juan 1:3", "Juan 1:5", "Juan 1:6", "Juan 1:7"]
        );
    }

    #[test]
    fn test_books_sort_lexicographically() {
        let expansion = expand("Juan 1:1, Génesis 1:1");
        assert_eq!(expansion.citations, ["Génesis 1:1", "Juan 1:1"]);
    }

    #[test]
    fn test_bare_range_without_prior_citation() {
        let expansion = expand("14-15, Juan 1:1");
        assert_eq!(
            expansion.errors,
            [SegmentError {
                segment: "14-15".to_string(),
                error: Error::InvalidRange("14-15".to_string()),
            }]
        );
        // The failure does not abort the rest of the passage.
        assert_eq!(expansion.citations, ["Juan 1:1"]);
    }

    #[test]
    fn test_bare_verse_without_prior_citation() {
        let expansion = expand("14");
        assert!(expansion.citations.is_empty());
        assert_eq!(expansion.errors.len(), 1);
        assert!(matches!(expansion.errors[0].error, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_unknown_book_segment_is_partial_failure() {
        let expansion = expand("Xyzzy 1:1, Juan 1:1");
        assert_eq!(expansion.citations, ["Juan 1:1"]);
        assert_eq!(expansion.errors.len(), 1);
        assert_eq!(
            expansion.errors[0].error,
            Error::UnknownBook("Xyzzy".to_string())
        );
    }

    #[test]
    fn test_inheritance_follows_most_recent_citation() {
        // The bare verse inherits from Génesis 2, not from Juan 1.
        let expansion = expand("Juan 1:1, Génesis 2:3, 5");
        assert_eq!(
            expansion.citations,
            ["Génesis 2:3", "Génesis 2:5", "Juan 1:1"]
        );
    }

    #[test]
    fn test_backwards_bare_range() {
        let expansion = expand("Juan 1:5, 4-2");
        assert_eq!(expansion.citations, ["Juan 1:5"]);
        assert_eq!(
            expansion.errors[0].error,
            Error::InvalidRange("4-2".to_string())
        );
    }

    #[test]
    fn test_covenants_sections_expand_like_books() {
        let expansion = expand("DyC 76:22-24");
        assert_eq!(
            expansion.citations,
            [
                "Doctrina y Convenios 76:22",
                "Doctrina y Convenios 76:23",
                "Doctrina y Convenios 76:24"
            ]
        );
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let expansion = expand("Juan 1:1,, ");
        assert_eq!(expansion.citations, ["Juan 1:1"]);
        assert!(expansion.is_complete());
    }
}
