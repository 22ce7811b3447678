//! # trigger-expr
//!
//! Tokenizer for monitoring trigger expressions.
//!
//! A trigger expression combines item function references with numbers,
//! macros and operators:
//!
//! ```text
//! (({server:log[app.log].regexp(error)})<>0) and (({server:log[app.log].iregexp(debug)})=0)
//! ```
//!
//! [`parse`] splits such a string into a [`TokenStream`] of typed [`Token`]s.
//! Function macro tokens carry [`FunctionMacroData`] with the host, item key
//! and the function call, so consumers can work with `regexp(error)` instead
//! of the full `{host:key.regexp(error)}` reference.
//!
//! ## Usage
//!
//! ```rust
//! use trigger_expr::{parse, TokenType};
//!
//! let stream = parse("{server:log.regexp(error)}<>0 and {$LIMIT}>1").unwrap();
//! assert_eq!(stream.len(), 7);
//!
//! let operators: Vec<_> = stream
//!     .iter()
//!     .filter(|t| t.token_type == TokenType::Operator)
//!     .map(|t| t.value.as_str())
//!     .collect();
//! assert_eq!(operators, vec!["<>", "and", ">"]);
//! ```
//!
//! ## Token Quick Reference
//!
//! | Token | Example |
//! |-------|---------|
//! | Open / close brace | `(` `)` |
//! | Operator | `and` `or` `not` `=` `<>` `<` `<=` `>` `>=` `#` `+` `-` `*` `/` |
//! | Number | `0` `1.5` `10K` `5m` |
//! | Function macro | `{host:key.regexp(err)}` |
//! | Macro | `{TRIGGER.VALUE}` |
//! | User macro | `{$LIMIT}` |
//! | LLD macro | `{#FSNAME}` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod token;
mod tokenizer;

pub use error::{ExprError, ExprResult};
pub use token::{FunctionMacroData, Token, TokenStream, TokenType};
pub use tokenizer::{parse, ExpressionTokenizer};
