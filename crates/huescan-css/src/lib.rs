//! Color and style-variable extraction for stylesheet sources.
//!
//! # Scope
//!
//! This crate implements:
//! - **Token extraction** - hex literals, `rgb()`/`rgba()`/`hsl()`/`hsla()`
//!   calls and the `transparent`/`currentcolor` keywords, found in free text
//!
//! - **Color pipeline** ([CSS Color Level 4](https://www.w3.org/TR/css-color-4/))
//!   - Format detection into a closed [`ColorFormat`] enum
//!   - Normalization of every format into canonical HSLA
//!   - Validity checking (`NaN` components reject the token)
//!
//! - **Aggregation** - a registry keyed by canonical value that counts
//!   occurrences and the files they came from
//!
//! - **Ranking** - a stable hue / vividness / lightness / alpha order and a
//!   popularity filter
//!
//! - **Variables** - `@less`, `$scss` and `--custom` declarations resolved per
//!   file, including references and `fade()`
//!
//! # Not Implemented
//!
//! - Stylesheet validation
//! - Cross-file variable scoping
//! - Color spaces other than sRGB hex/rgb/hsl
//! - Named colors other than the two keywords

/// Per-file extraction and the run aggregator.
pub mod aggregate;
/// Format detection and canonical HSLA.
pub mod color;
/// Recoverable color errors.
pub mod error;
/// Ordering and popularity filtering.
pub mod rank;
/// Cross-file color registry.
pub mod registry;
/// Candidate token extraction.
pub mod tokens;
/// Variable declarations and resolution.
pub mod variables;

pub use aggregate::{
    Aggregator, ColorReport, Extracted, FileExtraction, FileVariables, Report, SearchMode,
    VariablesReport, extract_file,
};
pub use color::{
    AlphaUnits, CanonicalColor, ColorFormat, ColorKey, Hsla, Keyword, ParsedColor, check_color,
};
pub use error::ColorError;
pub use rank::{Swatch, filter_by_popularity, sort_swatches};
pub use registry::{ColorEntry, ColorRegistry};
pub use tokens::{ColorToken, extract_tokens};
pub use variables::{ResolvedVariable, VariableKind, VariableTable, VariableValue};
