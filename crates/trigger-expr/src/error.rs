//! Error types for trigger expression tokenizing.

use thiserror::Error;

/// Errors that can occur while tokenizing a trigger expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// Unrecognized input at a specific position.
    #[error("parse error at position {position}: {message}")]
    ParseError {
        /// Byte offset in the input where the error occurred.
        position: usize,
        /// Description of the error.
        message: String,
    },

    /// A closing parenthesis without an opening one, or an opening one that is never closed.
    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParentheses {
        /// Byte offset of the offending parenthesis.
        position: usize,
    },

    /// Empty input provided.
    #[error("empty trigger expression")]
    EmptyExpression,
}

/// Result type for trigger expression operations.
pub type ExprResult<T> = std::result::Result<T, ExprError>;
