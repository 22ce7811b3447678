//! Tokenizer seam used by [`TriggerConstructor`](crate::TriggerConstructor).
//!
//! The constructor only needs a flat token list for an expression. Any
//! tokenizer that produces [`trigger_expr::Token`]s can be plugged in by
//! implementing [`Tokenize`]; the crate implements it for the reference
//! [`ExpressionTokenizer`].
//!
//! # Example
//!
//! ```rust
//! use trigger_constructor::Tokenize;
//! use trigger_expr::{ExprResult, Token};
//!
//! /// Tokenizer that rejects nothing and trims the input first.
//! struct TrimmingTokenizer;
//!
//! impl Tokenize for TrimmingTokenizer {
//!     fn tokenize(&self, expression: &str) -> ExprResult<Vec<Token>> {
//!         Ok(trigger_expr::parse(expression.trim())?.into_tokens())
//!     }
//! }
//! ```

use trigger_expr::{ExprResult, ExpressionTokenizer, Token};

/// Turns a trigger expression into tokens.
pub trait Tokenize: Send + Sync {
    /// Tokenizes `expression`.
    fn tokenize(&self, expression: &str) -> ExprResult<Vec<Token>>;
}

impl Tokenize for ExpressionTokenizer {
    fn tokenize(&self, expression: &str) -> ExprResult<Vec<Token>> {
        Ok(self.parse(expression)?.into_tokens())
    }
}
