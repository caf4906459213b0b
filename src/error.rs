// src/error.rs

/// Every way a scanner description can be rejected. All of them abort the
/// whole compilation; no partial table is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("incomplete rule on line {line}")]
    IncompleteRule { line: usize },

    #[error("expecting target state on line {line}")]
    MissingTarget { line: usize, found: String },

    #[error("unknown target {target} on line {line}")]
    UnknownTarget { line: usize, target: String },

    #[error("bad lookahead {token} on line {line}")]
    BadLookahead { line: usize, token: String },

    #[error("overlapping ranges {first} and {second} on lines {first_line} and {second_line}")]
    OverlappingRanges {
        first: String,
        second: String,
        first_line: usize,
        second_line: usize,
    },
}

impl CompileError {
    /// Source line of the (first) offending rule.
    pub fn line(&self) -> usize {
        match self {
            CompileError::IncompleteRule { line }
            | CompileError::MissingTarget { line, .. }
            | CompileError::UnknownTarget { line, .. }
            | CompileError::BadLookahead { line, .. } => *line,
            CompileError::OverlappingRanges { first_line, .. } => *first_line,
        }
    }
}
