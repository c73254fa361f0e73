//! Error types for expression compilation.
//!
//! ## Error Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | E001 | Character that cannot start a token |
//! | E002 | Malformed numeric literal |
//! | E003 | Token in an unexpected position |
//! | E004 | Expression ended early |
//! | E005 | Name not in the symbol table |
//! | E006 | Constant or variable called like a function |
//! | E007 | Function used without a call |
//! | E008 | Wrong number of call arguments |
//! | E009 | Too many tokens |
//! | E010 | Nesting too deep |

use thiserror::Error;

/// What went wrong while compiling an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprErrorKind {
    /// E001: character that cannot start a token.
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// E002: malformed numeric literal.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// E003: token in an unexpected position.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// Description of what the parser wanted.
        expected: String,
        /// Description of what it got.
        found: String,
    },

    /// E004: expression ended early.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// E005: name not in the symbol table.
    #[error("name '{0}' is not defined")]
    UnknownName(String),

    /// E006: constant or variable called like a function.
    #[error("'{0}' is not callable")]
    NotCallable(String),

    /// E007: function used without a call.
    #[error("function '{0}' must be called")]
    MissingCall(String),

    /// E008: wrong number of call arguments.
    #[error("{name}() takes {expected} argument(s), got {found}")]
    Arity {
        /// Function name.
        name: String,
        /// Accepted argument count, e.g. "1" or "1 or 2".
        expected: String,
        /// Arguments supplied.
        found: usize,
    },

    /// E009: too many tokens.
    #[error("expression is longer than {0} tokens")]
    TooLong(usize),

    /// E010: nesting too deep.
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}

impl ExprErrorKind {
    /// Returns the error code (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ExprErrorKind::UnexpectedChar(_) => "E001",
            ExprErrorKind::InvalidNumber(_) => "E002",
            ExprErrorKind::UnexpectedToken { .. } => "E003",
            ExprErrorKind::UnexpectedEnd => "E004",
            ExprErrorKind::UnknownName(_) => "E005",
            ExprErrorKind::NotCallable(_) => "E006",
            ExprErrorKind::MissingCall(_) => "E007",
            ExprErrorKind::Arity { .. } => "E008",
            ExprErrorKind::TooLong(_) => "E009",
            ExprErrorKind::TooDeep(_) => "E010",
        }
    }
}

/// A compile error with the byte offset where it was detected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}: {kind} at offset {offset}", .kind.code())]
pub struct ExprError {
    /// Error details.
    pub kind: ExprErrorKind,
    /// Byte offset into the expression text.
    pub offset: usize,
}

impl ExprError {
    /// Creates a new error at `offset`.
    pub fn new(kind: ExprErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Returns the error code (e.g., "E005").
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_offset() {
        let err = ExprError::new(ExprErrorKind::UnknownName("foo".to_string()), 4);
        assert_eq!(err.to_string(), "E005: name 'foo' is not defined at offset 4");
    }

    #[test]
    fn test_arity_message() {
        let err = ExprError::new(
            ExprErrorKind::Arity {
                name: "log".to_string(),
                expected: "1 or 2".to_string(),
                found: 3,
            },
            0,
        );
        assert_eq!(err.code(), "E008");
        assert!(err.to_string().contains("log() takes 1 or 2 argument(s), got 3"));
    }
}
