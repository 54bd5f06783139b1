use thiserror::Error;

/// Errors raised by the text and binary codecs.
///
/// Every error is fatal to the call that produced it; the value under
/// construction is discarded and nothing is retried internally. Text errors
/// carry the 1-based line and column of the offending token's start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input text could not be tokenised: an unexpected character, an
    /// unterminated string or comment, a control byte inside a string, or a
    /// number the platform converter rejects.
    #[error("{msg} at line {line} column {column}")]
    Lex {
        msg: String,
        line: u32,
        column: u32,
    },

    /// The token stream is not a valid document: an unexpected token, a
    /// missing key, a duplicate key, or trailing input after the root value.
    #[error("{msg} at line {line} column {column}")]
    Parse {
        msg: String,
        line: u32,
        column: u32,
    },

    /// Nesting exceeded the configured maximum. Raised identically by the
    /// parser, the encoder, and the decoder.
    #[error("maximum nesting depth of {limit} exceeded")]
    Depth { limit: usize },

    /// A length bound was exceeded: input text, a decoded string or key, the
    /// decoded dictionary, or a value too large to frame in 32 bits.
    #[error("{what} length {actual} exceeds limit of {limit}")]
    Size {
        what: &'static str,
        actual: usize,
        limit: usize,
    },

    /// The binary frame is malformed: bad magic or version, an unknown or
    /// unsupported tag, a key index outside the dictionary, truncated input,
    /// or trailing bytes after the root value.
    #[error("{0}")]
    Format(String),
}
