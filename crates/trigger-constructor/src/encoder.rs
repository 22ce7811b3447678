//! Fragment list to composite expression.

use tracing::{debug, trace};

use crate::config::ConstructorConfig;
use crate::error::{ConstructorError, ConstructorResult};
use crate::fragment::{ConditionFragment, MatchKind};
use crate::grammar::{parse_fragment, FragmentShape};

/// Builds a composite trigger expression with the default function whitelist.
///
/// Each fragment becomes one parenthesized sub-expression comparing its macro
/// references against zero. Consecutive match fragments are joined with `or`
/// and, when there are two or more of them, wrapped in one extra pair of
/// parentheses; everything else is joined with `and`.
///
/// # Examples
///
/// ```rust
/// use trigger_constructor::{encode, ConditionFragment};
///
/// let expression = encode(
///     "server",
///     "log[/var/log/app.log]",
///     &[
///         ConditionFragment::matching("regexp(error)"),
///         ConditionFragment::matching("regexp(fatal)"),
///         ConditionFragment::not_matching("iregexp(debug)"),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(
///     expression,
///     "((({server:log[/var/log/app.log].regexp(error)})<>0) or \
///      (({server:log[/var/log/app.log].regexp(fatal)})<>0)) and \
///      (({server:log[/var/log/app.log].iregexp(debug)})=0)"
/// );
/// ```
///
/// # Errors
///
/// * [`ConstructorError::EmptyInput`] if `fragments` is empty
/// * [`ConstructorError::MalformedExpression`] / [`ConstructorError::UnknownFunction`]
///   for the first fragment that fails to parse
pub fn encode(source: &str, key: &str, fragments: &[ConditionFragment]) -> ConstructorResult<String> {
    encode_with_config(source, key, fragments, &ConstructorConfig::default())
}

/// Builds a composite trigger expression using `config`.
pub fn encode_with_config(
    source: &str,
    key: &str,
    fragments: &[ConditionFragment],
    config: &ConstructorConfig,
) -> ConstructorResult<String> {
    if fragments.is_empty() {
        debug!(source, key, "refusing to encode an empty fragment list");
        return Err(ConstructorError::EmptyInput);
    }
    debug!(source, key, fragments = fragments.len(), "encoding trigger expression");

    let mut result = String::new();
    let mut run = MatchRun::default();

    for fragment in fragments {
        let shape = parse_fragment(&fragment.value, config).map_err(|err| {
            debug!(fragment = %fragment.value, error = %err, "rejected fragment");
            err
        })?;
        trace!(
            fragment = %fragment.value,
            kind = %fragment.kind,
            calls = shape.calls().len(),
            "parsed fragment"
        );

        match fragment.kind {
            MatchKind::Match => {
                if run.len > 0 {
                    result.push_str(" or ");
                } else {
                    if !result.is_empty() {
                        result.push_str(" and ");
                    }
                    run.start = result.len();
                }
                run.len += 1;
            }
            MatchKind::NoMatch => {
                run.close(&mut result);
                if !result.is_empty() {
                    result.push_str(" and ");
                }
            }
        }

        result.push_str(&render_fragment(&shape, source, key, fragment.kind));
    }
    run.close(&mut result);

    Ok(result)
}

/// Renders one parsed fragment, applying the comparator of `kind` to every
/// macro reference.
///
/// * single call: `(({source:key.regexp(a)})<>0)`
/// * chain: `(({source:key.regexp(a)})<>0 and ({source:key.iregexp(b)})<>0)`
pub fn render_fragment(shape: &FragmentShape, source: &str, key: &str, kind: MatchKind) -> String {
    let comparator = kind.comparator();
    match shape {
        FragmentShape::Single(call) => {
            format!("(({}){})", call.macro_reference(source, key), comparator)
        }
        FragmentShape::Chain(links) => {
            let mut out = String::from("(");
            for (joiner, call) in links {
                if let Some(joiner) = joiner {
                    out.push(' ');
                    out.push_str(joiner.as_str());
                    out.push(' ');
                }
                out.push_str(&format!("({}){}", call.macro_reference(source, key), comparator));
            }
            out.push(')');
            out
        }
    }
}

/// Consecutive match fragments at the tail of the output buffer.
#[derive(Debug, Default)]
struct MatchRun {
    /// Byte offset of the run's first fragment.
    start: usize,
    /// Number of fragments in the run.
    len: usize,
}

impl MatchRun {
    /// Ends the run, bracketing it if it joined two or more fragments.
    fn close(&mut self, buffer: &mut String) {
        if self.len > 1 {
            buffer.insert(self.start, '(');
            buffer.push(')');
        }
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(value: &str) -> ConditionFragment {
        ConditionFragment::matching(value)
    }

    fn n(value: &str) -> ConditionFragment {
        ConditionFragment::not_matching(value)
    }

    #[test]
    fn test_single_match_fragment() {
        assert_eq!(
            encode("host", "key", &[m("regexp(err)")]).unwrap(),
            "(({host:key.regexp(err)})<>0)"
        );
    }

    #[test]
    fn test_single_no_match_fragment() {
        assert_eq!(
            encode("host", "key", &[n("regexp(err)")]).unwrap(),
            "(({host:key.regexp(err)})=0)"
        );
    }

    #[test]
    fn test_function_name_is_normalized() {
        assert_eq!(
            encode("host", "key", &[m("IRegExp(Err)")]).unwrap(),
            "(({host:key.iregexp(Err)})<>0)"
        );
    }

    #[test]
    fn test_three_match_fragments_form_one_run() {
        assert_eq!(
            encode("h", "k", &[m("regexp(a)"), m("regexp(b)"), m("regexp(c)")]).unwrap(),
            "((({h:k.regexp(a)})<>0) or (({h:k.regexp(b)})<>0) or (({h:k.regexp(c)})<>0))"
        );
    }

    #[test]
    fn test_match_then_no_match_has_no_run_brackets() {
        assert_eq!(
            encode("h", "k", &[m("regexp(a)"), n("regexp(b)")]).unwrap(),
            "(({h:k.regexp(a)})<>0) and (({h:k.regexp(b)})=0)"
        );
    }

    #[test]
    fn test_run_closed_by_no_match() {
        assert_eq!(
            encode("h", "k", &[m("regexp(a)"), m("regexp(b)"), n("regexp(c)")]).unwrap(),
            "((({h:k.regexp(a)})<>0) or (({h:k.regexp(b)})<>0)) and (({h:k.regexp(c)})=0)"
        );
    }

    #[test]
    fn test_trailing_run_after_no_match() {
        assert_eq!(
            encode("h", "k", &[n("regexp(a)"), m("regexp(b)"), m("regexp(c)")]).unwrap(),
            "(({h:k.regexp(a)})=0) and ((({h:k.regexp(b)})<>0) or (({h:k.regexp(c)})<>0))"
        );
    }

    #[test]
    fn test_match_after_no_match_is_joined_with_and() {
        assert_eq!(
            encode("h", "k", &[n("regexp(a)"), m("regexp(b)")]).unwrap(),
            "(({h:k.regexp(a)})=0) and (({h:k.regexp(b)})<>0)"
        );
    }

    #[test]
    fn test_two_separate_runs() {
        assert_eq!(
            encode(
                "h",
                "k",
                &[m("regexp(a)"), m("regexp(b)"), n("regexp(c)"), m("regexp(d)"), m("regexp(e)")]
            )
            .unwrap(),
            "((({h:k.regexp(a)})<>0) or (({h:k.regexp(b)})<>0)) and (({h:k.regexp(c)})=0) and \
             ((({h:k.regexp(d)})<>0) or (({h:k.regexp(e)})<>0))"
        );
    }

    #[test]
    fn test_no_match_fragments_are_never_bracketed() {
        assert_eq!(
            encode("h", "k", &[n("regexp(a)"), n("regexp(b)")]).unwrap(),
            "(({h:k.regexp(a)})=0) and (({h:k.regexp(b)})=0)"
        );
    }

    #[test]
    fn test_chain_applies_comparator_to_each_reference() {
        assert_eq!(
            encode("h", "k", &[m("regexp(a) and iregexp(b)")]).unwrap(),
            "(({h:k.regexp(a)})<>0 and ({h:k.iregexp(b)})<>0)"
        );
        assert_eq!(
            encode("h", "k", &[n("regexp(a)   OR iregexp(b) and regexp(c)")]).unwrap(),
            "(({h:k.regexp(a)})=0 or ({h:k.iregexp(b)})=0 and ({h:k.regexp(c)})=0)"
        );
    }

    #[test]
    fn test_chain_inside_run() {
        assert_eq!(
            encode("h", "k", &[m("regexp(a) or regexp(b)"), m("regexp(c)")]).unwrap(),
            "((({h:k.regexp(a)})<>0 or ({h:k.regexp(b)})<>0) or (({h:k.regexp(c)})<>0))"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode("h", "k", &[]), Err(ConstructorError::EmptyInput));
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            encode("h", "k", &[m("foo(bar)")]),
            Err(ConstructorError::UnknownFunction {
                name: "foo".to_string(),
                fragment: "foo(bar)".to_string(),
            })
        );
    }

    #[test]
    fn test_fails_fast_on_first_bad_fragment() {
        assert_eq!(
            encode("h", "k", &[m("regexp(a)"), n("regexp(b"), m("foo(c)")]),
            Err(ConstructorError::MalformedExpression("regexp(b".to_string()))
        );
    }

    #[test]
    fn test_empty_fragment_value_is_malformed() {
        assert_eq!(
            encode("h", "k", &[m("")]),
            Err(ConstructorError::MalformedExpression(String::new()))
        );
    }

    #[test]
    fn test_custom_whitelist() {
        let config = ConstructorConfig::builder()
            .with_allowed_functions(["str"])
            .build();
        assert_eq!(
            encode_with_config("h", "k", &[m("str(ok)")], &config).unwrap(),
            "(({h:k.str(ok)})<>0)"
        );
        assert!(matches!(
            encode_with_config("h", "k", &[m("regexp(ok)")], &config),
            Err(ConstructorError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn test_run_offsets_with_multibyte_text() {
        assert_eq!(
            encode("hóst", "kéy", &[n("regexp(ä)"), m("regexp(ö)"), m("regexp(ü)")]).unwrap(),
            "(({hóst:kéy.regexp(ä)})=0) and ((({hóst:kéy.regexp(ö)})<>0) or (({hóst:kéy.regexp(ü)})<>0))"
        );
    }
}
