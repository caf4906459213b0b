// src/scanner/rules.rs
use log::debug;
use serde::{Deserialize, Serialize};

use super::pattern::{Pattern, unescape};
use crate::error::CompileError;

/// One pattern-to-target transition taken from a line of a scanner
/// description. `line` is kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub line: usize,
    pub base: String,
    pub lookahead: bool,
    pub pattern: Pattern,
    pub target: String,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
}

impl Rule {
    /// Copy of this rule matching a different pattern.
    pub fn with_pattern(&self, pattern: Pattern) -> Rule {
        Rule {
            pattern,
            ..self.clone()
        }
    }
}

// A bare `\` stands for "anything else": newline, space and the printable
// ASCII range, each as a lookahead range so explicit rules can override them.
const ANY_EXPANSION: [Pattern; 3] = [
    Pattern::Range('\n', '\n'),
    Pattern::Range(' ', ' '),
    Pattern::Range('!', '~'),
];

#[inline]
fn starts_lower(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

#[inline]
fn starts_upper(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Parse all the rule lines of a description into atomic rules, one pattern
/// each. Lines that don't start with a lowercase letter are comments.
pub fn parse_rules(text: &str) -> Result<Vec<Rule>, CompileError> {
    let mut rules = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if !starts_lower(line) {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        parse_line(i + 1, &tokens, &mut rules)?;
    }
    debug!("[rules] parsed {} atomic rules", rules.len());
    Ok(rules)
}

/// Expand one tokenized line `base pattern... target [TYPE]` into `out`.
pub fn parse_line(line: usize, tokens: &[&str], out: &mut Vec<Rule>) -> Result<(), CompileError> {
    if tokens.len() < 3 {
        return Err(CompileError::IncompleteRule { line });
    }
    let (base, mut rest) = (tokens[0], &tokens[1..]);

    let mut ty = None;
    if let Some((last, init)) = rest.split_last() {
        if starts_upper(last) {
            if init.len() < 2 {
                return Err(CompileError::IncompleteRule { line });
            }
            ty = Some(last.to_string());
            rest = init;
        }
    }

    let Some((&target, patterns)) = rest.split_last() else {
        return Err(CompileError::IncompleteRule { line });
    };
    if !starts_lower(target) {
        return Err(CompileError::MissingTarget {
            line,
            found: target.to_string(),
        });
    }

    let make = |lookahead: bool, pattern: Pattern| Rule {
        line,
        base: base.to_string(),
        lookahead,
        pattern,
        target: target.to_string(),
        ty: ty.clone(),
    };

    for &token in patterns {
        if token == "\\" {
            out.extend(ANY_EXPANSION.iter().cloned().map(|p| make(true, p)));
            continue;
        }
        let escaped = unescape(token).ok_or_else(|| CompileError::BadLookahead {
            line,
            token: token.to_string(),
        })?;
        let (lookahead, pattern) = escaped.into_pattern();
        out.push(make(lookahead, pattern));
    }
    Ok(())
}
