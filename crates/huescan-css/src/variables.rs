//! Style variable declarations (`@less`, `$scss`, `--custom`) and their values.
//!
//! Variables are scoped to the file they are declared in. Each file gets its
//! own [`VariableTable`]; nothing resolves across files.
//!
//! ## Classification
//!
//! A declared value is, in order of preference:
//!
//! 1. a color literal (`@primary: #336699;`)
//! 2. a reference to an earlier color variable in the same file
//!    (`@link: @primary;`, `--link: var(--primary);`)
//! 3. an alpha fade of an earlier color variable (`@muted: fade(@primary, 20%);`)
//! 4. anything else, kept verbatim
//!
//! References copy the value they point at. Redeclaring the target later does
//! not change references that were already resolved.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum_macros::Display;

use crate::color::{CanonicalColor, check_color};
use crate::rank::Swatch;
use crate::registry::prettify;
use crate::tokens::opens_line_comment;

static FADE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^fade\(\s*([^,\s]+)\s*,\s*(-?\d+(?:\.\d+)?)\s*%?\s*\)$")
        .expect("fade pattern is valid")
});

static VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^var\(\s*(--[\w-]+)\s*\)$").expect("var pattern is valid"));

/// At-rules that share the `@` sigil with LESS variables but are not declarations.
const DIRECTIVES: &[&str] = &[
    "media",
    "import",
    "include",
    "mixin",
    "extend",
    "use",
    "forward",
    "supports",
    "keyframes",
    "font-face",
    "charset",
    "if",
    "else",
    "each",
    "for",
    "while",
    "function",
    "return",
];

/// One `name: value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// Variable name including its sigil.
    pub name: String,
    /// Value with terminator and trailing comment removed.
    pub raw_value: String,
    /// 1-based source line.
    pub line: usize,
}

/// Parse a single line as a declaration.
///
/// ```
/// use huescan_css::variables::parse_declaration;
///
/// let decl = parse_declaration("  @primary: #336699; // brand", 4).unwrap();
/// assert_eq!(decl.name, "@primary");
/// assert_eq!(decl.raw_value, "#336699");
///
/// assert!(parse_declaration("@media (max-width: 600px) {", 1).is_none());
/// assert!(parse_declaration("color: red;", 1).is_none());
/// ```
#[must_use]
pub fn parse_declaration(line: &str, line_number: usize) -> Option<Declaration> {
    let text = line.trim_start();
    if !(text.starts_with('@') || text.starts_with('$') || text.starts_with("--")) {
        return None;
    }
    if is_directive(text) {
        return None;
    }

    let (name, value) = text.split_once(':')?;
    let name = name.trim();
    if name.trim_start_matches(['@', '$', '-']).is_empty() {
        return None;
    }

    Some(Declaration {
        name: name.to_string(),
        raw_value: clean_value(value),
        line: line_number,
    })
}

fn is_directive(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('@') else {
        return false;
    };
    let word: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase();
    DIRECTIVES.contains(&word.as_str())
}

/// Strip a trailing `//` comment, the `;` terminator and SCSS flags.
///
/// Comments are recognized the same way as in [`strip_comments`], so
/// `url(//cdn...)` and `http://` survive.
///
/// [`strip_comments`]: crate::tokens::strip_comments
fn clean_value(value: &str) -> String {
    let end = value
        .match_indices("//")
        .find(|&(at, _)| opens_line_comment(value[..at].chars().next_back()))
        .map_or(value.len(), |(at, _)| at);

    let mut value = value[..end].trim().trim_end_matches(';').trim_end();
    for flag in ["!default", "!global"] {
        if let Some(stripped) = value.strip_suffix(flag) {
            value = stripped.trim_end();
        }
    }
    value.to_string()
}

/// Kind of value a variable holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum VariableKind {
    /// The value is itself a color.
    ColorLiteral,
    /// The value points at (or fades) another color variable.
    ColorReference,
    /// Not a color.
    OpaqueValue,
}

/// Resolved value of a variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VariableValue {
    /// A color written directly.
    ColorLiteral {
        /// Canonical value.
        color: CanonicalColor,
        /// Prettified literal.
        display: String,
    },
    /// A snapshot of another color variable, possibly with adjusted alpha.
    ColorReference {
        /// Name of the variable that was referenced.
        target: String,
        /// Canonical value at resolution time.
        color: CanonicalColor,
        /// Display string.
        display: String,
    },
    /// Anything that is not a color.
    OpaqueValue {
        /// Value as written.
        value: String,
    },
}

/// A declaration together with what its value turned out to be.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVariable {
    /// Variable name including its sigil.
    pub name: String,
    /// Value as written.
    pub raw_value: String,
    /// Line of the latest declaration.
    pub line: usize,
    /// Number of declarations of this name in the file.
    pub declarations: usize,
    /// Classification.
    pub value: VariableValue,
    /// Whether the swatch needs light text. Always `false` for opaque values.
    pub is_dark: bool,
}

impl ResolvedVariable {
    fn new(decl: Declaration, value: VariableValue) -> Self {
        let is_dark = match &value {
            VariableValue::ColorLiteral { color, .. }
            | VariableValue::ColorReference { color, .. } => color.is_dark(),
            VariableValue::OpaqueValue { .. } => false,
        };
        Self {
            name: decl.name,
            raw_value: decl.raw_value,
            line: decl.line,
            declarations: 1,
            value,
            is_dark,
        }
    }

    /// Classification of the value.
    #[must_use]
    pub const fn kind(&self) -> VariableKind {
        match self.value {
            VariableValue::ColorLiteral { .. } => VariableKind::ColorLiteral,
            VariableValue::ColorReference { .. } => VariableKind::ColorReference,
            VariableValue::OpaqueValue { .. } => VariableKind::OpaqueValue,
        }
    }

    /// Canonical color, for color-valued variables.
    #[must_use]
    pub const fn canonical(&self) -> Option<&CanonicalColor> {
        match &self.value {
            VariableValue::ColorLiteral { color, .. }
            | VariableValue::ColorReference { color, .. } => Some(color),
            VariableValue::OpaqueValue { .. } => None,
        }
    }

    /// Whether the variable holds a color.
    #[must_use]
    pub const fn is_color(&self) -> bool {
        self.canonical().is_some()
    }

    fn display_text(&self) -> &str {
        match &self.value {
            VariableValue::ColorLiteral { display, .. }
            | VariableValue::ColorReference { display, .. } => display,
            VariableValue::OpaqueValue { value } => value,
        }
    }
}

impl Swatch for ResolvedVariable {
    fn color(&self) -> Option<&CanonicalColor> {
        self.canonical()
    }

    fn display(&self) -> &str {
        self.display_text()
    }

    fn is_dark(&self) -> bool {
        self.is_dark
    }

    fn occurrences(&self) -> usize {
        self.declarations
    }

    fn file_count(&self) -> usize {
        1
    }
}

/// Variables declared in one file, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    entries: Vec<ResolvedVariable>,
    index: HashMap<String, usize>,
}

impl VariableTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a whole file.
    #[must_use]
    pub fn from_source(text: &str) -> Self {
        let mut table = Self::new();
        for (i, line) in text.lines().enumerate() {
            if let Some(decl) = parse_declaration(line, i + 1) {
                table.declare(decl);
            }
        }
        table
    }

    /// Classify a declaration against what has been declared so far and store it.
    ///
    /// Redeclaring a name replaces its value in place and bumps its counter.
    pub fn declare(&mut self, decl: Declaration) {
        let value = self.classify(&decl.raw_value);
        tracing::trace!(name = %decl.name, value = %decl.raw_value, "declare variable");

        if let Some(&i) = self.index.get(&decl.name) {
            let declarations = self.entries[i].declarations + 1;
            self.entries[i] = ResolvedVariable {
                declarations,
                ..ResolvedVariable::new(decl, value)
            };
            return;
        }

        let _ = self.index.insert(decl.name.clone(), self.entries.len());
        self.entries.push(ResolvedVariable::new(decl, value));
    }

    fn classify(&self, raw: &str) -> VariableValue {
        if let Ok(parsed) = check_color(raw) {
            return VariableValue::ColorLiteral {
                color: parsed.color,
                display: prettify(&parsed.token, parsed.format),
            };
        }

        if let Some((target, color, display)) = self.reference(raw) {
            return VariableValue::ColorReference {
                target: target.to_string(),
                color,
                display,
            };
        }

        if let Some(value) = self.fade(raw) {
            return value;
        }

        VariableValue::OpaqueValue {
            value: raw.to_string(),
        }
    }

    /// A bare name or `var(--name)` that points at a color variable.
    fn reference<'a>(&'a self, raw: &'a str) -> Option<(&'a str, CanonicalColor, String)> {
        let name = VAR_RE
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map_or(raw, |m| m.as_str());
        let var = self.get(name)?;
        let color = *var.canonical()?;
        Some((name, color, var.display_text().to_string()))
    }

    /// `fade(<name>, <percent>)`: the target's alpha (1 when opaque) minus
    /// `percent / 100`, clamped into `[0, 1]`.
    fn fade(&self, raw: &str) -> Option<VariableValue> {
        let caps = FADE_RE.captures(raw)?;
        let (target, color, _) = self.reference(caps.get(1)?.as_str())?;
        let percent: f64 = caps.get(2)?.as_str().parse().ok()?;
        let hsla = *color.as_hsla()?;

        let alpha = (hsla.a.unwrap_or(1.0) - percent / 100.0).clamp(0.0, 1.0);
        let alpha = (alpha * 100.0).round() / 100.0;
        let faded = hsla.with_alpha(alpha);

        Some(VariableValue::ColorReference {
            target: target.to_string(),
            color: CanonicalColor::Numeric(faded),
            display: faded.to_string(),
        })
    }

    /// Look up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedVariable> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// All variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedVariable> {
        self.entries.iter()
    }

    /// Color-valued variables, in declaration order.
    pub fn colors(&self) -> impl Iterator<Item = &ResolvedVariable> {
        self.entries.iter().filter(|v| v.is_color())
    }

    /// Non-color variables, in declaration order.
    pub fn others(&self) -> impl Iterator<Item = &ResolvedVariable> {
        self.entries.iter().filter(|v| !v.is_color())
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no declaration was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
