//! Color tokens and their canonical HSLA form.
//!
//! A raw token goes through three steps before it can be aggregated:
//!
//! 1. [`detect_format`] classifies the syntax (`#rgb`, `rgba(...)`, a keyword, ...)
//! 2. [`normalize`] converts it into a [`CanonicalColor`]
//! 3. [`CanonicalColor::is_valid`] rejects anything that did not parse cleanly
//!
//! [`check_color`] runs the whole pipeline.

mod format;
mod normalize;

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::error::ColorError;

pub use format::{alpha_units, detect_format, function_args};
pub use normalize::{hsl_to_rgb, normalize, rgb_to_hsl};

/// Syntax family of a color token.
///
/// Derived purely from the token text, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#rgb` or `#rrggbb`
    Hex,
    /// `#rgba` or `#rrggbbaa`
    Hexa,
    /// `rgb(...)`
    Rgb,
    /// `rgba(...)`
    Rgba,
    /// `hsl(...)`
    Hsl,
    /// `hsla(...)`
    Hsla,
    /// `transparent` or `currentcolor`
    Keyword,
}

impl ColorFormat {
    /// Whether the token is a functional notation with an argument list.
    #[must_use]
    pub const fn is_function(self) -> bool {
        matches!(self, Self::Rgb | Self::Rgba | Self::Hsl | Self::Hsla)
    }
}

/// How the alpha argument of a functional color is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphaUnits {
    /// `0.5`, already in the 0-1 range
    #[default]
    Fraction,
    /// `50%`, must be divided by 100
    Percent,
}

/// Color keywords that have no numeric value of their own.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    /// `currentcolor`
    CurrentColor,
    /// `transparent`
    Transparent,
}

/// Canonical hue / saturation / lightness / alpha.
///
/// `h` is a whole number of degrees in `[0, 360)`, `s` and `l` are
/// percentages rounded to one decimal, and `a` is `None` when the source
/// syntax had no alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsla {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation, 0-100.
    pub s: f64,
    /// Lightness, 0-100.
    pub l: f64,
    /// Alpha, 0-1, or `None` when opaque by construction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Hsla {
    /// Build an opaque color.
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l, a: None }
    }

    /// Same color with an explicit alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a: Some(a), ..self }
    }

    /// No component is `NaN` or infinite. A missing alpha is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.h.is_finite()
            && self.s.is_finite()
            && self.l.is_finite()
            && self.a.is_none_or(f64::is_finite)
    }

    /// Alpha is present and below one half.
    #[must_use]
    pub fn is_low_alpha(&self) -> bool {
        self.a.is_some_and(|a| a < 0.5)
    }

    /// Dark swatches need light text: lightness under 50 and not mostly see-through.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.l < 50.0 && !self.is_low_alpha()
    }

    /// sRGB channels for drawing a swatch.
    #[must_use]
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        hsl_to_rgb(self.h, self.s / 100.0, self.l / 100.0)
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            Some(a) => write!(f, "hsla({}, {}%, {}%, {})", self.h, self.s, self.l, a),
            None => write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l),
        }
    }
}

/// The aggregation value of a color token.
///
/// Keywords are kept as their own category instead of being forced into a
/// made-up HSLA value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalColor {
    /// A color with numeric channels.
    Numeric(Hsla),
    /// `transparent` / `currentcolor`.
    Keyword(Keyword),
}

impl CanonicalColor {
    /// See [`Hsla::is_valid`]. Keywords are always valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Numeric(hsla) => hsla.is_valid(),
            Self::Keyword(_) => true,
        }
    }

    /// See [`Hsla::is_dark`]. Keywords are never dark.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        match self {
            Self::Numeric(hsla) => hsla.is_dark(),
            Self::Keyword(_) => false,
        }
    }

    /// The numeric value, if any.
    #[must_use]
    pub const fn as_hsla(&self) -> Option<&Hsla> {
        match self {
            Self::Numeric(hsla) => Some(hsla),
            Self::Keyword(_) => None,
        }
    }

    /// Registry key for this value.
    #[must_use]
    pub fn key(&self) -> ColorKey {
        ColorKey::from(self)
    }
}

impl fmt::Display for CanonicalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(hsla) => fmt::Display::fmt(hsla, f),
            Self::Keyword(keyword) => fmt::Display::fmt(keyword, f),
        }
    }
}

/// Composite `h-s-l-a` key.
///
/// Numbers use Rust's shortest round-trip formatting, so equal values give
/// equal keys. A missing alpha serializes as `none`, which no number can
/// produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ColorKey(String);

impl ColorKey {
    /// The key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&CanonicalColor> for ColorKey {
    fn from(color: &CanonicalColor) -> Self {
        // -0.0 and 0.0 compare equal and must share a key.
        let part = |v: f64| if v == 0.0 { 0.0 } else { v };
        match color {
            CanonicalColor::Numeric(hsla) => {
                let alpha = hsla
                    .a
                    .map_or_else(|| "none".to_string(), |a| part(a).to_string());
                Self(format!(
                    "{}-{}-{}-{alpha}",
                    part(hsla.h),
                    part(hsla.s),
                    part(hsla.l)
                ))
            }
            CanonicalColor::Keyword(keyword) => Self(format!("keyword-{keyword}")),
        }
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token that made it through the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedColor {
    /// Token exactly as found in the source.
    pub token: String,
    /// Detected syntax.
    pub format: ColorFormat,
    /// Alpha notation of the token.
    pub alpha_units: AlphaUnits,
    /// Canonical value.
    pub color: CanonicalColor,
}

/// Detect, normalize and validate a token.
///
/// # Errors
///
/// [`ColorError::UnknownFormat`] when the token is not color syntax at all,
/// [`ColorError::Invalid`] when it looks like a color but a component did not
/// parse. Both are recoverable: callers drop the token and carry on.
///
/// # Example
/// ```
/// use huescan_css::color::{check_color, CanonicalColor, Hsla};
///
/// let parsed = check_color("#FF0000").unwrap();
/// assert_eq!(parsed.color, CanonicalColor::Numeric(Hsla::new(0.0, 100.0, 50.0)));
/// assert!(check_color("#zzz").is_err());
/// ```
pub fn check_color(token: &str) -> Result<ParsedColor, ColorError> {
    let format =
        detect_format(token).ok_or_else(|| ColorError::UnknownFormat(token.to_string()))?;
    let units = alpha_units(token, format);
    let color = normalize(token, format, units);

    if !color.is_valid() {
        return Err(ColorError::Invalid {
            token: token.to_string(),
            format,
        });
    }

    Ok(ParsedColor {
        token: token.to_string(),
        format,
        alpha_units: units,
        color,
    })
}
