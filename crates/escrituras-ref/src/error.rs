//! Error types for citation parsing and passage expansion.

/// Result type alias for escrituras-ref operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Validation failures of the citation grammar.
///
/// All variants are deterministic, local failures. Nothing here is
/// transient; retrying the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The book-name fragment resolved to nothing after every alias step.
    #[error("unknown book: '{0}'")]
    UnknownBook(String),

    /// The citation (or passage segment) matched no recognized grammar.
    #[error("invalid citation format: '{0}'")]
    InvalidFormat(String),

    /// A verse range ran backwards, or a bare range had no preceding
    /// citation in the passage to inherit a book and chapter from.
    #[error("invalid verse range: '{0}'")]
    InvalidRange(String),
}
