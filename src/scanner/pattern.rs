// src/scanner/pattern.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// What a rule matches: one character, an inclusive character range, or a
/// multi-character literal (keywords, `//`, ...).
///
/// A range with equal bounds is kept distinct from a singleton until the
/// collapse pass, so that an explicit singleton can still override it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pattern {
    Single(char),
    Range(char, char),
    Text(String),
}

impl Pattern {
    /// Classify an unescaped pattern string. `c1..c2` with `c1 <= c2` is a
    /// range, one character is a singleton, anything else is text.
    pub fn parse(text: &str) -> Pattern {
        let chars: Vec<char> = text.chars().collect();
        match chars.as_slice() {
            &[c] => Pattern::Single(c),
            &[lo, '.', '.', hi] if lo <= hi => Pattern::Range(lo, hi),
            _ => Pattern::Text(text.to_string()),
        }
    }

    #[inline]
    pub fn is_range(&self) -> bool {
        matches!(self, Pattern::Range(..))
    }

    /// Bounds of a range pattern.
    #[inline]
    pub fn span(&self) -> Option<(char, char)> {
        match *self {
            Pattern::Range(lo, hi) => Some((lo, hi)),
            _ => None,
        }
    }

    /// Number of characters in a range beyond the first (`0..9` has width 9).
    pub fn width(&self) -> Option<u32> {
        self.span().map(|(lo, hi)| (hi as u32).saturating_sub(lo as u32))
    }

    /// Whether this pattern matches the single character `c`.
    pub fn contains(&self, c: char) -> bool {
        match *self {
            Pattern::Single(s) => s == c,
            Pattern::Range(lo, hi) => lo <= c && c <= hi,
            Pattern::Text(_) => false,
        }
    }

    /// The unescaped textual form, which is also the canonical sort key.
    pub fn raw(&self) -> String {
        match self {
            Pattern::Single(c) => c.to_string(),
            Pattern::Range(lo, hi) => format!("{lo}..{hi}"),
            Pattern::Text(s) => s.clone(),
        }
    }

    /// The escaped form used in scanner descriptions.
    pub fn escaped(&self, lookahead: bool) -> String {
        let body = match self {
            Pattern::Single(c) => visible(*c).to_string(),
            Pattern::Range(lo, hi) => format!("{}..{}", visible(*lo), visible(*hi)),
            Pattern::Text(s) => s.clone(),
        };
        let mut out = String::with_capacity(body.len() + 2);
        if lookahead {
            out.push('\\');
        }
        if body.starts_with('\\') {
            out.push('\\');
        }
        out.push_str(&body);
        out
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.escaped(false))
    }
}

// Space and newline can't appear inside a whitespace-separated token.
fn visible(c: char) -> char {
    match c {
        ' ' => 's',
        '\n' => 'n',
        other => other,
    }
}

/// A pattern token with its backslash escapes resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaped<'a> {
    /// Consumed when matched.
    Literal(&'a str),
    /// Examined but not consumed.
    Lookahead(&'a str),
}

impl<'a> Escaped<'a> {
    pub fn is_lookahead(&self) -> bool {
        matches!(self, Escaped::Lookahead(_))
    }

    pub fn text(&self) -> &'a str {
        match *self {
            Escaped::Literal(s) | Escaped::Lookahead(s) => s,
        }
    }

    pub fn into_pattern(self) -> (bool, Pattern) {
        (self.is_lookahead(), Pattern::parse(self.text()))
    }
}

/// Resolve backslashes in one pattern token:
///
/// ```text
///   \\\...  -> \...   lookahead
///   \\...   -> \...
///   \s      -> space  lookahead
///   \n      -> newline lookahead
///   \x      -> None (bad lookahead)
///   \...    -> ...    lookahead
///   ...     -> ...
/// ```
pub fn unescape(token: &str) -> Option<Escaped<'_>> {
    if token.starts_with("\\\\\\") {
        Some(Escaped::Lookahead(&token[2..]))
    } else if let Some(rest) = token.strip_prefix('\\') {
        if rest.starts_with('\\') {
            return Some(Escaped::Literal(rest));
        }
        match rest {
            "s" => Some(Escaped::Lookahead(" ")),
            "n" => Some(Escaped::Lookahead("\n")),
            _ if rest.chars().count() == 1 => None,
            _ => Some(Escaped::Lookahead(rest)),
        }
    } else {
        Some(Escaped::Literal(token))
    }
}

/// Decode a token straight to `(lookahead, pattern)`.
pub fn decode(token: &str) -> Option<(bool, Pattern)> {
    unescape(token).map(Escaped::into_pattern)
}

/// Successor of a character, stepping over the surrogate gap.
pub(crate) fn char_after(c: char) -> char {
    match c {
        '\u{D7FF}' => '\u{E000}',
        _ => char::from_u32(c as u32 + 1).unwrap_or(c),
    }
}

/// Predecessor of a character, stepping over the surrogate gap.
pub(crate) fn char_before(c: char) -> char {
    match c {
        '\u{E000}' => '\u{D7FF}',
        '\0' => c,
        _ => char::from_u32(c as u32 - 1).unwrap_or(c),
    }
}
