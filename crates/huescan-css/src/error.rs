//! Errors raised while reading color tokens.
//!
//! None of these are fatal: the extractor logs the token and drops it.

use thiserror::Error;

use crate::color::ColorFormat;

/// A token that could not be turned into a canonical color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The token is not any known color syntax.
    #[error("not a color: '{0}'")]
    UnknownFormat(String),

    /// The token looks like a color but a component did not parse.
    #[error("malformed {format} color: '{token}'")]
    Invalid {
        /// Offending token.
        token: String,
        /// Format it was detected as.
        format: ColorFormat,
    },
}
