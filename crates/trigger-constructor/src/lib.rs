//! # trigger-constructor
//!
//! Converts between the condition fragments of a regexp trigger wizard and
//! the single trigger expression stored for a monitored item.
//!
//! A wizard user enters an ordered list of conditions, each either *match*
//! or *no match*:
//!
//! | Fragment | Kind |
//! |----------|------|
//! | `regexp(error) or regexp(fatal)` | match |
//! | `iregexp(debug)` | no match |
//!
//! [`encode`] turns them into one expression over a `host:key` item,
//! and [`decode`] turns the tokens of such an expression back into the
//! fragments. Round-trips are stable: encoding the decoded fragments gives
//! the same expression again.
//!
//! ## Usage
//!
//! ```rust
//! use trigger_constructor::{decode, encode, ConditionFragment};
//!
//! let fragments = vec![
//!     ConditionFragment::matching("regexp(error) or regexp(fatal)"),
//!     ConditionFragment::not_matching("iregexp(debug)"),
//! ];
//!
//! let expression = encode("server", "log[app.log]", &fragments).unwrap();
//! assert_eq!(
//!     expression,
//!     "(({server:log[app.log].regexp(error)})<>0 or ({server:log[app.log].regexp(fatal)})<>0) \
//!      and (({server:log[app.log].iregexp(debug)})=0)"
//! );
//!
//! let stream = trigger_expr::parse(&expression).unwrap();
//! let decoded = decode(stream.tokens());
//! assert_eq!(decoded[1], ConditionFragment::not_matching("iregexp(debug)"));
//! assert_eq!(encode("server", "log[app.log]", &decoded).unwrap(), expression);
//! ```
//!
//! ## Expression Shape
//!
//! | Input | Output |
//! |-------|--------|
//! | match `f(a)` | `(({h:k.f(a)})<>0)` |
//! | no match `f(a)` | `(({h:k.f(a)})=0)` |
//! | match `f(a) and g(b)` | `(({h:k.f(a)})<>0 and ({h:k.g(b)})<>0)` |
//! | match `A`, match `B` | `(A or B)` |
//! | match `A`, no match `B` | `A and B` |
//!
//! Only `regexp` and `iregexp` may be called unless a [`ConstructorConfig`]
//! says otherwise.
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/Deserialize for [`ConditionFragment`] and [`MatchKind`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod constructor;
mod decoder;
mod encoder;
mod error;
mod fragment;
mod grammar;
mod grouper;
mod traits;

pub use config::{ConstructorConfig, ConstructorConfigBuilder, DEFAULT_FUNCTIONS};
pub use constructor::TriggerConstructor;
pub use decoder::decode;
pub use encoder::{encode, encode_with_config, render_fragment};
pub use error::{ConstructorError, ConstructorResult};
pub use fragment::{ConditionFragment, Connector, MatchKind};
pub use grammar::{parse_fragment, FragmentShape, FunctionCall};
pub use grouper::{group_tokens, is_boolean_operator, split_top_level};
pub use traits::Tokenize;

// Re-export the token types the decoder consumes
pub use trigger_expr::{Token, TokenType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _: Option<ConstructorConfig> = None;
        let _: Option<TriggerConstructor<'_>> = None;
        let _: Option<ConstructorResult<()>> = None;
        let _: Option<FragmentShape> = None;
    }

    #[test]
    fn test_re_exports() {
        let token = Token::new(TokenType::Operator, "or", 0);
        assert!(is_boolean_operator(&token));
    }
}
