//! Composite expression tokens back to fragments.

use tracing::{debug, trace};
use trigger_expr::{Token, TokenType};

use crate::fragment::{ConditionFragment, MatchKind};
use crate::grouper::{split_top_level, strip_wrapping};

/// Breaks a tokenized composite expression into wizard fragments.
///
/// Tokens are split at top-level `and` / `or` operators and every group
/// becomes one fragment. A group that is a bracketed run of match fragments
/// joined by `or`, as produced by [`encode`](crate::encode), is opened up
/// so each member becomes its own fragment again. Bracketed `or` groups with
/// any no-match member stay a single fragment.
///
/// Decoding never fails: unbalanced or unexpected tokens only disable the
/// parenthesis stripping.
///
/// # Example
///
/// ```rust
/// use trigger_constructor::{decode, ConditionFragment};
///
/// let stream = trigger_expr::parse(
///     "(({host:key.regexp(err)})<>0) and (({host:key.iregexp(ok)})=0)",
/// )
/// .unwrap();
///
/// assert_eq!(
///     decode(stream.tokens()),
///     vec![
///         ConditionFragment::matching("regexp(err)"),
///         ConditionFragment::not_matching("iregexp(ok)"),
///     ]
/// );
/// ```
pub fn decode(tokens: &[Token]) -> Vec<ConditionFragment> {
    let (groups, _) = split_top_level(tokens);
    debug!(tokens = tokens.len(), groups = groups.len(), "decoding trigger expression");

    let mut fragments = Vec::with_capacity(groups.len());
    for group in groups {
        match match_run(group) {
            Some(members) => {
                trace!(members = members.len(), "opening bracketed match run");
                fragments.extend(members);
            }
            None => fragments.push(decode_group(group)),
        }
    }
    fragments
}

/// Decoded members of `( (a) or (b) or ... )`, where every member is itself
/// wrapped and decodes as a match.
fn match_run(group: &[Token]) -> Option<Vec<ConditionFragment>> {
    let inner = strip_wrapping(group)?;
    let (members, operators) = split_top_level(inner);

    let is_bracketed_or = members.len() > 1
        && operators.iter().all(|op| op.value == "or")
        && members.iter().all(|member| strip_wrapping(member).is_some());
    if !is_bracketed_or {
        return None;
    }

    let decoded: Vec<_> = members.into_iter().map(decode_group).collect();
    decoded
        .iter()
        .all(|fragment| fragment.kind == MatchKind::Match)
        .then_some(decoded)
}

fn decode_group(group: &[Token]) -> ConditionFragment {
    let expression = strip_wrapping(group).unwrap_or(group);
    let rendered = render(expression);

    let kind = if has_match_suffix(&rendered) {
        MatchKind::Match
    } else {
        MatchKind::NoMatch
    };

    let operands = strip_comparators(expression);
    let operands = strip_wrapping(&operands).unwrap_or(&operands);
    let value = render(operands).trim().to_string();

    trace!(%rendered, %value, %kind, "decoded fragment");
    ConditionFragment { value, kind }
}

/// Looks for `<> 0` within the last five characters only.
fn has_match_suffix(rendered: &str) -> bool {
    let count = rendered.chars().count();
    if count < 5 {
        return false;
    }
    let tail: String = rendered.chars().skip(count - 5).collect();
    tail.contains("<> 0")
}

/// Drops every `= 0` / `<> 0` comparison.
fn strip_comparators(tokens: &[Token]) -> Vec<&Token> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        let is_comparator = token.is_operator("=") || token.is_operator("<>");
        if is_comparator {
            if let Some(next) = iter.peek() {
                if next.token_type == TokenType::Number && next.value == "0" {
                    iter.next();
                    continue;
                }
            }
        }
        kept.push(token);
    }
    kept
}

/// Space-separated token text, with function macros replaced by their call.
fn render<T: std::borrow::Borrow<Token>>(tokens: &[T]) -> String {
    tokens
        .iter()
        .map(|token| {
            let token: &Token = token.borrow();
            match (&token.token_type, &token.data) {
                (TokenType::FunctionMacro, Some(data)) => data.function.as_str(),
                _ => token.value.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
