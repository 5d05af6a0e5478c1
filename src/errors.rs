//! Error types for cursor reads and parse failures.
//!
//! The taxonomy is two-tier: `EndOfInput` and `NotMatched` are recoverable,
//! meaning a choice or repetition combinator restores the cursor and may try
//! another branch; everything else propagates. `Fatal` is the commit marker
//! produced by [`crate::modifier::cut`] and is never retried.

use thiserror::Error;

/// Errors produced by cursor operations and failed parses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ended before a value could be produced.
    #[error("end of input")]
    EndOfInput,
    /// Input has the wrong shape for this parser.
    #[error("input did not match")]
    NotMatched,
    /// A numeric value exceeded the range of its destination integer.
    #[error("integer overflow")]
    Overflow,
    /// A byte-domain operation was attempted while bits were still cached.
    #[error("{0} unread bits before the next byte boundary")]
    RemainingBits(u32),
    /// A seek resolved to a negative or unrepresentable offset.
    #[error("seek target out of bounds")]
    OutOfBounds,
    /// More than 64 bits were requested in a single read.
    #[error("more than 64 bits requested in a single read")]
    TooManyBits,
    /// A forward parser was run before being defined.
    #[error("forward parser used before being defined")]
    Unbound,
    /// A failure promoted past backtracking; choice combinators must not
    /// retry after seeing this.
    #[error("fatal: {0}")]
    Fatal(#[source] Box<ParseError>),
    /// A failure wrapped with a grammar-level label for reporting.
    #[error("{label}: {source}")]
    Labeled {
        /// Name of the grammar rule that failed.
        label: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Wraps `cause` in the fatal tag.
    pub fn fatal(cause: ParseError) -> ParseError {
        ParseError::Fatal(Box::new(cause))
    }

    /// Wraps this error with a grammar-level label. Recoverability and
    /// fatality are preserved through the wrapping.
    pub fn label(self, label: &'static str) -> ParseError {
        ParseError::Labeled {
            label,
            source: Box::new(self),
        }
    }

    /// True if this error, or any cause it wraps, carries the fatal tag.
    pub fn is_fatal(&self) -> bool {
        match self {
            ParseError::Fatal(_) => true,
            ParseError::Labeled { source, .. } => source.is_fatal(),
            _ => false,
        }
    }

    /// True if a choice or repetition combinator may backtrack past this
    /// error and try another branch.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ParseError::EndOfInput | ParseError::NotMatched => true,
            ParseError::Labeled { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}
