//! The error types of the crate.

use std::{error, fmt, result};

macro_rules! impl_from_error {
    ($type: ty, $variant: path, $from: ty) => {
        impl From<$from> for $type {
            fn from(e: $from) -> $type {
                $variant(e)
            }
        }
    };
}

/// Errors that can occur while turning a source string into an item
/// stream. Surfaced to the caller rather than swallowed or retried.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenizationError {
    /// The width oracle returned a negative width for some text.
    NegativeWidth {
        /// The text that was measured.
        text: String,
        /// The (negative) width the oracle returned.
        width: f64,
    },

    /// The hyphenation oracle produced an empty syllable for a word.
    EmptySyllable {
        /// The word that was being hyphenated.
        word: String,
    },
}

impl fmt::Display for TokenizationError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenizationError::NegativeWidth { text, width } => write!(
                fmt,
                "width oracle returned negative width {} for {:?}",
                width, text
            ),
            TokenizationError::EmptySyllable { word } => {
                write!(fmt, "hyphenation oracle produced an empty syllable for {:?}", word)
            }
        }
    }
}

impl error::Error for TokenizationError {}

/// The error type of the crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The active set of candidate breakpoints emptied mid-sweep: no chain
    /// of legal breaks can satisfy the given threshold. Recoverable by
    /// relaxing the threshold, enabling hyphenation, or widening the line.
    NoFeasibleSolution,

    /// The width or hyphenation oracle produced invalid output while
    /// tokenizing a paragraph.
    Tokenization(TokenizationError),

    /// The item stream violates an invariant the optimizer relies on (it
    /// is missing the mandatory terminator trio, or contains an item the
    /// optimizer does not know how to interpret). Indicates a bug in the
    /// caller that built the stream, not a property of the input text.
    InvariantViolation(String),
}

impl_from_error!(Error, Error::Tokenization, TokenizationError);

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NoFeasibleSolution => write!(
                fmt,
                "no sequence of breakpoints satisfies the adjustment-ratio threshold"
            ),
            Error::Tokenization(e) => write!(fmt, "tokenization error: {}", e),
            Error::InvariantViolation(msg) => write!(fmt, "invariant violation: {}", msg),
        }
    }
}

impl error::Error for Error {}

/// The result type of the crate.
pub type Result<T> = result::Result<T, Error>;
