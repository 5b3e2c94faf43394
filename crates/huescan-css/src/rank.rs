//! Deterministic ordering of aggregated colors.
//!
//! Colors are grouped by hue, then by `saturation + lightness` (a cheap
//! stand-in for vividness), then by lightness, then by alpha. Keyword colors
//! have no position on the wheel and always come after numeric ones.

use std::cmp::Ordering;

use crate::color::{CanonicalColor, Hsla};

/// What a report needs from a ranked color, whatever produced it.
pub trait Swatch {
    /// Canonical value used for ordering, `None` when the item is not a color.
    fn color(&self) -> Option<&CanonicalColor>;
    /// Text shown for the color.
    fn display(&self) -> &str;
    /// Whether the swatch needs light text.
    fn is_dark(&self) -> bool;
    /// Times the color was seen.
    fn occurrences(&self) -> usize;
    /// Distinct files it was seen in.
    fn file_count(&self) -> usize;
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Compare two numeric colors.
///
/// ```
/// use std::cmp::Ordering;
/// use huescan_css::color::Hsla;
/// use huescan_css::rank::compare_hsla;
///
/// let a = Hsla::new(10.0, 50.0, 50.0);
/// let b = Hsla::new(10.0, 60.0, 40.0);
/// // Same hue, s + l is 100 for both, so lightness decides.
/// assert_eq!(compare_hsla(&b, &a), Ordering::Less);
/// ```
#[must_use]
pub fn compare_hsla(a: &Hsla, b: &Hsla) -> Ordering {
    ascending(a.h, b.h)
        .then_with(|| ascending(a.s + a.l, b.s + b.l))
        .then_with(|| ascending(a.l, b.l))
        .then_with(|| compare_alpha(a.a, b.a))
}

/// Alpha `1` counts as no alpha. A translucent color sorts before an opaque one.
fn compare_alpha(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.filter(|&v| v != 1.0);
    let b = b.filter(|&v| v != 1.0);
    match (a, b) {
        (Some(a), Some(b)) => ascending(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare any two canonical colors. Keywords sort last, by name.
#[must_use]
pub fn compare_colors(a: &CanonicalColor, b: &CanonicalColor) -> Ordering {
    match (a, b) {
        (CanonicalColor::Numeric(a), CanonicalColor::Numeric(b)) => compare_hsla(a, b),
        (CanonicalColor::Numeric(_), CanonicalColor::Keyword(_)) => Ordering::Less,
        (CanonicalColor::Keyword(_), CanonicalColor::Numeric(_)) => Ordering::Greater,
        (CanonicalColor::Keyword(a), CanonicalColor::Keyword(b)) => {
            a.to_string().cmp(&b.to_string())
        }
    }
}

/// Sort in place. The sort is stable: ties keep their current order.
///
/// Items without a color sort after every color.
pub fn sort_swatches<T: Swatch>(items: &mut [T]) {
    items.sort_by(|a, b| match (a.color(), b.color()) {
        (Some(a), Some(b)) => compare_colors(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Drop entries seen fewer than `threshold` times. `0` keeps everything.
///
/// Returns how many entries were dropped.
pub fn filter_by_popularity<T: Swatch>(items: &mut Vec<T>, threshold: usize) -> usize {
    if threshold == 0 {
        return 0;
    }
    let before = items.len();
    items.retain(|item| item.occurrences() >= threshold);
    let dropped = before - items.len();
    tracing::info!("filter by popularity: {before} > {}", items.len());
    dropped
}
