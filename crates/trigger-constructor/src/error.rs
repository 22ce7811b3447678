//! Error types for the trigger constructor.

use thiserror::Error;

/// Errors that can occur while converting between fragments and expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructorError {
    /// No fragments were given to the encoder.
    #[error("Expression cannot be empty")]
    EmptyInput,

    /// A fragment calls a function outside the whitelist.
    #[error("Incorrect function is used. [{fragment}]")]
    UnknownFunction {
        /// Lowercased function name.
        name: String,
        /// Text of the offending fragment.
        fragment: String,
    },

    /// A fragment cannot be decomposed into function calls.
    #[error("Incorrect trigger expression. [{0}]")]
    MalformedExpression(String),

    /// The tokenizer rejected the expression.
    #[error("Trigger expression parse error: {0}")]
    Tokenize(#[from] trigger_expr::ExprError),
}

/// Result type for trigger constructor operations.
pub type ConstructorResult<T> = std::result::Result<T, ConstructorError>;
