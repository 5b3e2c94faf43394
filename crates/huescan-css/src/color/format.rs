//! Color syntax detection.

use super::{AlphaUnits, ColorFormat};

/// Classify a raw token.
///
/// Rules are tried in order and the first match wins; `None` means the token
/// is not color syntax and must be dropped.
///
/// ```
/// use huescan_css::color::{detect_format, ColorFormat};
///
/// assert_eq!(detect_format("#ABC"), Some(ColorFormat::Hex));
/// assert_eq!(detect_format(" HSLA(0, 0%, 0%, .5) "), Some(ColorFormat::Hsla));
/// assert_eq!(detect_format("#abcde"), None);
/// ```
#[must_use]
pub fn detect_format(token: &str) -> Option<ColorFormat> {
    let token = token.trim().to_ascii_lowercase();

    if token.starts_with("hsla") {
        return Some(ColorFormat::Hsla);
    }
    if token.starts_with("hsl") {
        return Some(ColorFormat::Hsl);
    }
    if token.starts_with("rgba") {
        return Some(ColorFormat::Rgba);
    }
    if token.starts_with("rgb") {
        return Some(ColorFormat::Rgb);
    }
    if token.starts_with('#') {
        match token.chars().count() {
            4 | 7 => return Some(ColorFormat::Hex),
            5 | 9 => return Some(ColorFormat::Hexa),
            _ => {}
        }
    }
    if token.contains("currentcolor") || token.contains("transparent") {
        return Some(ColorFormat::Keyword);
    }

    None
}

/// The argument list of a functional notation, split into trimmed parts.
///
/// Everything between the first `(` and the last `)` is taken. Legacy
/// comma-separated arguments are split on commas; modern space-separated
/// arguments are split on whitespace and the `/` that introduces alpha.
///
/// Returns `None` when there is no parenthesized list.
#[must_use]
pub fn function_args(token: &str) -> Option<Vec<&str>> {
    let open = token.find('(')?;
    let close = token.rfind(')')?;
    if close <= open {
        return None;
    }
    let inner = &token[open + 1..close];

    if inner.contains(',') {
        Some(inner.split(',').map(str::trim).collect())
    } else {
        Some(
            inner
                .split(|c: char| c.is_whitespace() || c == '/')
                .filter(|part| !part.is_empty())
                .collect(),
        )
    }
}

/// Whether the alpha argument is a percentage.
///
/// Only functional notations carry a written alpha; everything else is
/// [`AlphaUnits::Fraction`].
#[must_use]
pub fn alpha_units(token: &str, format: ColorFormat) -> AlphaUnits {
    if !format.is_function() {
        return AlphaUnits::Fraction;
    }

    match function_args(token).as_deref() {
        Some([_, _, _, alpha, ..]) if alpha.contains('%') => AlphaUnits::Percent,
        _ => AlphaUnits::Fraction,
    }
}
