//! Finding candidate color tokens in stylesheet text.
//!
//! This is deliberately permissive. Anything shaped like a hex literal, a
//! color function or a color keyword is returned; the color pipeline decides
//! what is real. `#zzz` is a token here and is dropped later.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?P<func>\b(?:rgba?|hsla?)\([^()]*\))|(?P<hex>#[0-9a-z]{3,8}\b)|(?P<kw>\b(?:transparent|currentcolor)\b)",
    )
    .expect("token pattern is valid")
});

/// A raw color candidate and where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorToken {
    /// Token text exactly as written.
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

/// Extract candidate tokens in source order.
///
/// Comments are ignored. Hex-shaped tokens are skipped inside selectors,
/// where `#abc` is an id, and when glued to a preceding word character or
/// `&` (`a#fff`, `&#123;`). A token is in a selector when the next `{`, `;`
/// or `}` after it is a `{` and its statement is not an at-rule, so a
/// selector list split over several lines is skipped as a whole.
///
/// ```
/// use huescan_css::tokens::extract_tokens;
///
/// let tokens = extract_tokens("a { color: #FFF; background: rgba(0, 0, 0, .5); }");
/// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["#FFF", "rgba(0, 0, 0, .5)"]);
/// ```
#[must_use]
pub fn extract_tokens(text: &str) -> Vec<ColorToken> {
    let source = strip_comments(text);
    let boundaries: Vec<(usize, char)> = source
        .char_indices()
        .filter(|&(_, c)| matches!(c, '{' | ';' | '}'))
        .collect();
    let mut tokens = Vec::new();
    let mut offset = 0;

    for (index, raw_line) in source.split_inclusive('\n').enumerate() {
        let line = raw_line.trim_end_matches(['\n', '\r']);

        for caps in TOKEN_RE.captures_iter(line) {
            let Some(m) = caps.get(0) else { continue };

            if caps.name("hex").is_some() {
                let glued = line[..m.start()]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '&');
                if glued || in_selector(&source, &boundaries, offset + m.start()) {
                    continue;
                }
            }

            tokens.push(ColorToken {
                text: m.as_str().to_string(),
                line: index + 1,
            });
        }

        offset += raw_line.len();
    }

    tokens
}

/// Whether the statement around `at` is a rule's selector.
fn in_selector(source: &str, boundaries: &[(usize, char)], at: usize) -> bool {
    let next = boundaries.partition_point(|&(pos, _)| pos < at);
    if boundaries.get(next).is_none_or(|&(_, c)| c != '{') {
        return false;
    }
    let start = next
        .checked_sub(1)
        .and_then(|prev| boundaries.get(prev))
        .map_or(0, |&(pos, _)| pos + 1);
    !source[start..at].trim_start().starts_with('@')
}

/// Blank out `/* */` and `//` comments, keeping newlines so line numbers hold.
#[must_use]
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        if c == '/' && chars.peek() == Some(&'*') {
            let _ = chars.next();
            out.push_str("  ");
            let mut last = '\0';
            for inner in chars.by_ref() {
                out.push(if inner == '\n' { '\n' } else { ' ' });
                if last == '*' && inner == '/' {
                    break;
                }
                last = inner;
            }
            prev = Some(' ');
            continue;
        }

        if c == '/' && chars.peek() == Some(&'/') && opens_line_comment(prev) {
            for inner in chars.by_ref() {
                if inner == '\n' {
                    out.push('\n');
                    break;
                }
            }
            prev = Some('\n');
            continue;
        }

        out.push(c);
        prev = Some(c);
    }

    out
}

/// Whether a `//` preceded by `prev` starts a comment.
///
/// Only at the start of a line or after whitespace, `;`, `{` or `}`, which
/// leaves `url(//cdn...)` and `http://` alone.
pub(crate) fn opens_line_comment(prev: Option<char>) -> bool {
    prev.is_none_or(|p| p.is_whitespace() || matches!(p, ';' | '{' | '}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        extract_tokens(source).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_line_numbers() {
        let tokens = extract_tokens("a {\n  color: #fff;\n\n  border-color: transparent;\n}");
        assert_eq!(
            tokens,
            vec![
                ColorToken {
                    text: "#fff".to_string(),
                    line: 2
                },
                ColorToken {
                    text: "transparent".to_string(),
                    line: 4
                },
            ]
        );
    }

    #[test]
    fn test_id_selectors_are_skipped() {
        assert_eq!(texts("#fade {\n  color: #bead;\n}"), ["#bead"]);
        assert!(texts("a#fff { }").is_empty());
    }

    #[test]
    fn test_multiline_selector_list_is_skipped() {
        assert!(texts("#add,\n#bad {\n  margin: 0;\n}\n").is_empty());
        assert_eq!(
            texts("ul > #cafe,\nol #fade\n{\n  color: #bead;\n}"),
            ["#bead"]
        );
        assert_eq!(texts("a { color: #fff }\n#dad,\n#fed { top: 0; }"), ["#fff"]);
    }

    #[test]
    fn test_hex_in_at_rule_before_block_is_kept() {
        assert_eq!(texts("@include tint(#abc) {\n  top: 0;\n}"), ["#abc"]);
    }

    #[test]
    fn test_declaration_without_semicolon_is_kept() {
        assert_eq!(texts("a {\n  color: #add\n}"), ["#add"]);
    }

    #[test]
    fn test_malformed_hex_is_still_a_candidate() {
        assert_eq!(texts("color: #zzz;"), ["#zzz"]);
    }

    #[test]
    fn test_too_long_hash_is_not_a_token() {
        assert!(texts("content: #abcdefabcdef;").is_empty());
    }

    #[test]
    fn test_nested_function_is_not_a_literal() {
        assert!(texts("color: rgba(var(--rgb), 0.5);").is_empty());
    }

    #[test]
    fn test_comments_are_ignored() {
        let source = "/* #111\n #222 */ color: #333; // #444\nbackground: url(//cdn/x.png) #555;";
        assert_eq!(texts(source), ["#333", "#555"]);
        assert_eq!(extract_tokens(source)[1].line, 3);
    }

    #[test]
    fn test_case_insensitive_functions() {
        assert_eq!(
            texts("color: HSLA(10, 20%, 30%, .4); fill: CurrentColor"),
            ["HSLA(10, 20%, 30%, .4)", "CurrentColor"]
        );
    }
}
