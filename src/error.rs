use std::{fmt, io};
use thiserror::Error;

/// A 1-based line/column location in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number, starting at 1
    pub line: usize,
    /// Column number, starting at 1
    pub col: usize,
}

impl Position {
    pub(crate) fn start() -> Self {
        Position { line: 1, col: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.col)
    }
}

/// Errors produced while loading a BMFont descriptor
#[derive(Debug, Error)]
pub enum BmFontError {
    #[error("IO Error: {0}")]
    /// The source could not be opened or read
    IO(#[from] io::Error),

    /// A word token ran past the configured length ceiling
    #[error("Token length is too large to parse ({pos}). Maximum length: {max}")]
    TokenTooLong {
        /// Where the token started
        pos: Position,
        /// The configured ceiling
        max: usize,
    },

    /// The current token is not the one the grammar requires
    #[error("Unexpected token ({pos}): {got:?}. Expected token: {expected}")]
    UnexpectedToken {
        /// Where the token started
        pos: Position,
        /// The token text
        got: String,
        /// What the grammar wanted instead
        expected: String,
    },

    /// The input ended while a token was still required
    #[error("Unexpectedly reached end of input ({pos}). Expected token.")]
    UnexpectedEof {
        /// Where the input ended
        pos: Position,
    },

    /// All sections parsed but content remains
    #[error("Expected end of input ({pos}). Got: {got:?}")]
    ExpectedEnd {
        /// Where the trailing token started
        pos: Position,
        /// The trailing token text
        got: String,
    },

    /// A value is not a complete integer literal
    #[error("Expected an integer value ({pos}). Got: {got}")]
    NotAnInteger {
        /// Where the value started
        pos: Position,
        /// The value text
        got: String,
    },

    /// An integer value does not fit the field it is stored in
    #[error("Integer value out of range ({pos}). Got: {got}, allowed: {min}..={max}")]
    IntegerOutOfRange {
        /// Where the value started
        pos: Position,
        /// The value text
        got: String,
        /// Smallest value the field holds
        min: i64,
        /// Largest value the field holds
        max: i64,
    },

    /// A value that must be wrapped in double quotes is not
    #[error("Expected quoted string ({pos}). Got: {got}")]
    ExpectedQuotedString {
        /// Where the value started
        pos: Position,
        /// The value text
        got: String,
    },

    /// A `page` record lacks its `id` or `file` tag
    #[error("Page tag missing {field} (line {line})")]
    MissingPageField {
        /// Line of the page record
        line: usize,
        /// The missing key
        field: &'static str,
    },

    /// A page id does not address a declared page slot
    #[error("Page id out of range ({pos}). Got: {id}, declared pages: {pages}")]
    PageIdOutOfRange {
        /// Where the id value started
        pos: Position,
        /// The page id
        id: u32,
        /// Declared page count
        pages: usize,
    },

    /// Two page records claim the same id
    #[error("Duplicate page id ({pos}): {id}")]
    DuplicatePageId {
        /// Where the id value started
        pos: Position,
        /// The page id
        id: u32,
    },

    /// Fewer records were found than the section declared
    #[error("Fewer {section}s than specified in file. Expected: {expected}, actual: {actual}")]
    CountMismatch {
        /// Record keyword (`page`, `char`, `kerning`)
        section: &'static str,
        /// Declared count
        expected: usize,
        /// Records actually read
        actual: usize,
    },

    /// More records were found than the section declared
    #[error("More {section}s than specified in file ({pos}). Expected: {declared}")]
    TooManyRecords {
        /// Record keyword (`page`, `char`, `kerning`)
        section: &'static str,
        /// Declared count
        declared: usize,
        /// Where the surplus record starts
        pos: Position,
    },

    /// A declared count is above the configured ceiling
    #[error("Declared {section} count {declared} exceeds the limit of {limit}")]
    LimitExceeded {
        /// Record keyword (`page`, `char`, `kerning`)
        section: &'static str,
        /// Declared count
        declared: usize,
        /// Configured ceiling
        limit: usize,
    },

    /// Storage for a declared collection could not be reserved
    #[error("Out of memory allocating {count} {section} entries")]
    Allocation {
        /// Record keyword (`page`, `char`, `kerning`)
        section: &'static str,
        /// Declared count
        count: usize,
    },

    #[error("JSON Error: {0}")]
    /// Serialising a parsed font failed
    Json(#[from] serde_json::Error),
}

impl BmFontError {
    /// The source position the error refers to, if it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            BmFontError::TokenTooLong { pos, .. }
            | BmFontError::UnexpectedToken { pos, .. }
            | BmFontError::UnexpectedEof { pos }
            | BmFontError::ExpectedEnd { pos, .. }
            | BmFontError::NotAnInteger { pos, .. }
            | BmFontError::IntegerOutOfRange { pos, .. }
            | BmFontError::ExpectedQuotedString { pos, .. }
            | BmFontError::PageIdOutOfRange { pos, .. }
            | BmFontError::DuplicatePageId { pos, .. }
            | BmFontError::TooManyRecords { pos, .. } => Some(*pos),
            BmFontError::MissingPageField { line, .. } => Some(Position {
                line: *line,
                col: 1,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages_carry_position() {
        let err = BmFontError::UnexpectedToken {
            pos: Position { line: 3, col: 7 },
            got: "chars".to_string(),
            expected: "page".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected token (line 3, col 7): \"chars\". Expected token: page"
        );
        assert_eq!(err.position(), Some(Position { line: 3, col: 7 }));
    }

    #[test]
    fn test_count_mismatch_message() {
        let err = BmFontError::CountMismatch {
            section: "char",
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Fewer chars than specified in file. Expected: 3, actual: 2"
        );
        assert_eq!(err.position(), None);
    }
}
