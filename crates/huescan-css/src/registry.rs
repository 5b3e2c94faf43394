//! Cross-file aggregation of colors keyed by canonical value.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::color::{CanonicalColor, ColorFormat, ColorKey, ParsedColor};
use crate::rank::Swatch;

/// Everything known about one canonical color.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorEntry {
    /// Aggregation key.
    pub key: ColorKey,
    /// Canonical value.
    pub color: CanonicalColor,
    /// First-seen token, prettified for display.
    pub display: String,
    /// Syntax of the first-seen token.
    pub format: ColorFormat,
    /// Files the color appears in.
    pub files: BTreeSet<PathBuf>,
    /// Number of occurrences, independent of how many files.
    pub count: usize,
    /// Whether the swatch needs light text.
    pub is_dark: bool,
}

impl ColorEntry {
    fn new(parsed: &ParsedColor, file: &Path) -> Self {
        Self {
            key: parsed.color.key(),
            color: parsed.color,
            display: prettify(&parsed.token, parsed.format),
            format: parsed.format,
            files: BTreeSet::from([file.to_path_buf()]),
            count: 1,
            is_dark: parsed.color.is_dark(),
        }
    }
}

impl Swatch for ColorEntry {
    fn color(&self) -> Option<&CanonicalColor> {
        Some(&self.color)
    }

    fn display(&self) -> &str {
        &self.display
    }

    fn is_dark(&self) -> bool {
        self.is_dark
    }

    fn occurrences(&self) -> usize {
        self.count
    }

    fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Map from canonical color to its aggregated entry.
///
/// Entries keep first-insertion order so that a stable sort over them is
/// reproducible for a given traversal order.
#[derive(Debug, Default, Clone)]
pub struct ColorRegistry {
    entries: Vec<ColorEntry>,
    index: HashMap<ColorKey, usize>,
}

impl ColorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `parsed` in `file`.
    ///
    /// Returns `true` when this is the first time the canonical value is seen.
    pub fn record(&mut self, parsed: &ParsedColor, file: &Path) -> bool {
        let key = parsed.color.key();
        if let Some(&i) = self.index.get(&key) {
            let entry = &mut self.entries[i];
            entry.count += 1;
            if !entry.files.contains(file) {
                let _ = entry.files.insert(file.to_path_buf());
            }
            return false;
        }

        let _ = self.index.insert(key, self.entries.len());
        self.entries.push(ColorEntry::new(parsed, file));
        true
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn get(&self, key: &ColorKey) -> Option<&ColorEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &ColorEntry> {
        self.entries.iter()
    }

    /// Take the entries, in first-seen order.
    #[must_use]
    pub fn into_entries(self) -> Vec<ColorEntry> {
        self.entries
    }
}

/// Display form of a token.
///
/// Whitespace is removed, a `0.` that starts a number becomes `.`, and plain
/// hex is upper-cased (hex with alpha keeps its case).
///
/// ```
/// use huescan_css::color::ColorFormat;
/// use huescan_css::registry::prettify;
///
/// assert_eq!(prettify("#fafafa", ColorFormat::Hex), "#FAFAFA");
/// assert_eq!(prettify("rgba(0, 0, 0, 0.5)", ColorFormat::Rgba), "rgba(0,0,0,.5)");
/// assert_eq!(prettify("hsla(10, 10.5%, 20%, 0.25)", ColorFormat::Hsla), "hsla(10,10.5%,20%,.25)");
/// ```
#[must_use]
pub fn prettify(token: &str, format: ColorFormat) -> String {
    let token = if format == ColorFormat::Hex {
        token.to_uppercase()
    } else {
        token.to_string()
    };

    let chars: Vec<char> = token.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        let starts_number = i == 0 || (!chars[i - 1].is_ascii_digit() && chars[i - 1] != '.');
        if c == '0' && chars.get(i + 1) == Some(&'.') && starts_number {
            continue;
        }
        out.push(c);
    }
    out
}
