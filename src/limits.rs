//! Defence-in-depth bounds for both codecs.
//!
//! Adversarial input must not be able to exhaust the stack (nesting depth)
//! or force large allocations (input size, string lengths, dictionary size)
//! before a cheaper check fails. Every codec entry point takes these bounds;
//! the `*_with_limits` variants accept a custom set.

/// Bounds applied while parsing text and decoding binary frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth of arrays and objects. Applies to the parser,
    /// the encoder, and the decoder alike.
    pub max_depth: usize,
    /// Maximum text input size in bytes, checked before lexing starts.
    pub max_input_len: usize,
    /// Maximum number of entries in a decoded key dictionary.
    pub max_dict: usize,
    /// Maximum byte length of a decoded string or dictionary key.
    pub max_str_len: usize,
}

impl Limits {
    /// The standard bounds: depth 256, input 1 MB, dictionary 65 536
    /// entries, strings 1 MB.
    pub const fn standard() -> Self {
        Self {
            max_depth: 256,
            max_input_len: 1_000_000,
            max_dict: 65_536,
            max_str_len: 1_000_000,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}
