//! Splitting token sequences at top-level boolean operators.

use std::borrow::Borrow;

use trigger_expr::{Token, TokenType};

/// Splits `tokens` at every `and` / `or` operator outside parentheses.
///
/// The operators themselves are dropped. The result always has one more
/// group than there are top-level boolean operators; groups may be empty.
///
/// # Example
///
/// ```rust
/// use trigger_constructor::group_tokens;
///
/// let stream = trigger_expr::parse("(1 or 2) and 3 or 4").unwrap();
/// let groups = group_tokens(stream.tokens());
///
/// let rendered: Vec<String> = groups
///     .iter()
///     .map(|g| g.iter().map(|t| t.value.as_str()).collect::<Vec<_>>().join(" "))
///     .collect();
/// assert_eq!(rendered, vec!["( 1 or 2 )", "3", "4"]);
/// ```
pub fn group_tokens(tokens: &[Token]) -> Vec<&[Token]> {
    split_top_level(tokens).0
}

/// Like [`group_tokens`], also returning the dropped operators in order.
///
/// Interleaving the groups with the operators gives back the input.
pub fn split_top_level(tokens: &[Token]) -> (Vec<&[Token]>, Vec<&Token>) {
    let mut groups = Vec::new();
    let mut operators = Vec::new();
    let mut depth: isize = 0;
    let mut start = 0;

    for (idx, token) in tokens.iter().enumerate() {
        match token.token_type {
            TokenType::OpenBrace => depth += 1,
            TokenType::CloseBrace => depth -= 1,
            _ => {}
        }

        if depth == 0 && is_boolean_operator(token) {
            groups.push(&tokens[start..idx]);
            operators.push(token);
            start = idx + 1;
        }
    }
    groups.push(&tokens[start..]);

    (groups, operators)
}

/// Returns true for an `and` / `or` operator token.
pub fn is_boolean_operator(token: &Token) -> bool {
    token.is_operator("and") || token.is_operator("or")
}

/// Returns the tokens inside the outer parentheses when the first token opens
/// a pair that the last token closes: `( a or b )` gives `a or b`, while
/// `( a ) or ( b )` gives `None`.
pub(crate) fn strip_wrapping<T: Borrow<Token>>(tokens: &[T]) -> Option<&[T]> {
    let (first, last) = match tokens {
        [first, .., last] => (as_token(first), as_token(last)),
        _ => return None,
    };
    if !first.is_open_brace() || !last.is_close_brace() {
        return None;
    }

    let mut depth: isize = 0;
    for (idx, token) in tokens.iter().enumerate() {
        match as_token(token).token_type {
            TokenType::OpenBrace => depth += 1,
            TokenType::CloseBrace => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            return (idx == tokens.len() - 1).then(|| &tokens[1..idx]);
        }
    }
    None
}

fn as_token<T: Borrow<Token>>(token: &T) -> &Token {
    token.borrow()
}
