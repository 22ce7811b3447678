//! Property-Based Tests for Expression Round-Trips and Token Grouping
//!
//! Properties:
//! - For any fragments the encoder accepts, encode → tokenize → decode → encode
//!   SHALL reproduce the first expression exactly.
//! - Decoding SHALL give back as many fragments as were encoded, with the same kinds.
//! - Grouping SHALL yield one group more than there are top-level `and` / `or`
//!   operators, and re-inserting the operators SHALL rebuild the token list.

use proptest::prelude::*;
use trigger_constructor::{decode, encode, split_top_level, ConditionFragment, MatchKind};
use trigger_expr::{FunctionMacroData, Token, TokenType};

const HOST: &str = "Zabbix server";
const KEY: &str = "log[/var/log/app.log,,\"skip\"]";

// ============================================================================
// ARBITRATORS
// ============================================================================

fn arb_function_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("regexp"),
        Just("iregexp"),
        Just("RegExp"),
        Just("IREGEXP"),
    ]
}

fn arb_argument() -> impl Strategy<Value = String> {
    let plain = "[a-zA-Z0-9_.*^$| -]{0,8}";
    prop_oneof![
        plain.prop_map(|s| s),
        plain.prop_map(|s| format!("^({})$", s)),
        plain.prop_map(|s| format!("\"{}) (\"", s)),
    ]
}

fn arb_call() -> impl Strategy<Value = String> {
    (arb_function_name(), arb_argument()).prop_map(|(name, arg)| format!("{}({})", name, arg))
}

fn arb_connector() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" and "), Just(" or "), Just("  AND\t"), Just(" Or ")]
}

fn arb_kind() -> impl Strategy<Value = MatchKind> {
    prop_oneof![Just(MatchKind::Match), Just(MatchKind::NoMatch)]
}

fn arb_fragment() -> impl Strategy<Value = ConditionFragment> {
    (
        arb_call(),
        prop::collection::vec((arb_connector(), arb_call()), 0..3),
        arb_kind(),
    )
        .prop_map(|(first, rest, kind)| {
            let mut value = first;
            for (connector, call) in rest {
                value.push_str(connector);
                value.push_str(&call);
            }
            ConditionFragment::new(value, kind)
        })
}

fn arb_token() -> impl Strategy<Value = Token> {
    prop_oneof![
        Just(Token::new(TokenType::OpenBrace, "(", 0)),
        Just(Token::new(TokenType::CloseBrace, ")", 0)),
        Just(Token::new(TokenType::Operator, "and", 0)),
        Just(Token::new(TokenType::Operator, "or", 0)),
        Just(Token::new(TokenType::Operator, "<>", 0)),
        Just(Token::new(TokenType::Number, "0", 0)),
        Just(Token::function_macro(
            "{h:k.regexp(a)}",
            0,
            FunctionMacroData {
                host: "h".to_string(),
                item: "k".to_string(),
                function: "regexp(a)".to_string(),
                function_name: "regexp".to_string(),
                function_param: "a".to_string(),
            },
        )),
    ]
}

fn top_level_boolean_operators(tokens: &[Token]) -> usize {
    let mut depth = 0i32;
    let mut count = 0;
    for token in tokens {
        match token.token_type {
            TokenType::OpenBrace => depth += 1,
            TokenType::CloseBrace => depth -= 1,
            TokenType::Operator if depth == 0 && (token.value == "and" || token.value == "or") => {
                count += 1
            }
            _ => {}
        }
    }
    count
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_round_trip_is_stable(fragments in prop::collection::vec(arb_fragment(), 1..7)) {
        let expression = encode(HOST, KEY, &fragments).unwrap();
        let stream = trigger_expr::parse(&expression).unwrap();
        let decoded = decode(stream.tokens());
        let again = encode(HOST, KEY, &decoded).unwrap();
        prop_assert_eq!(again, expression);
    }

    #[test]
    fn prop_decode_preserves_count_and_kinds(fragments in prop::collection::vec(arb_fragment(), 1..7)) {
        let expression = encode(HOST, KEY, &fragments).unwrap();
        let stream = trigger_expr::parse(&expression).unwrap();
        let decoded = decode(stream.tokens());

        let expected: Vec<_> = fragments.iter().map(|f| f.kind).collect();
        let actual: Vec<_> = decoded.iter().map(|f| f.kind).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_single_call_values_survive_verbatim(
        calls in prop::collection::vec((arb_call(), arb_kind()), 1..5)
    ) {
        let fragments: Vec<_> = calls
            .iter()
            .map(|(call, kind)| ConditionFragment::new(call.clone(), *kind))
            .collect();
        let expression = encode(HOST, KEY, &fragments).unwrap();
        let stream = trigger_expr::parse(&expression).unwrap();
        let decoded = decode(stream.tokens());

        for (original, back) in fragments.iter().zip(&decoded) {
            let (name, rest) = original.value.split_once('(').unwrap();
            prop_assert_eq!(&back.value, &format!("{}({}", name.to_lowercase(), rest));
        }
    }

    #[test]
    fn prop_grouping_splits_at_top_level_operators(
        tokens in prop::collection::vec(arb_token(), 0..24)
    ) {
        let (groups, operators) = split_top_level(&tokens);
        prop_assert_eq!(groups.len(), top_level_boolean_operators(&tokens) + 1);
        prop_assert_eq!(operators.len() + 1, groups.len());

        let mut rebuilt: Vec<Token> = Vec::with_capacity(tokens.len());
        for (idx, group) in groups.iter().enumerate() {
            rebuilt.extend(group.iter().cloned());
            if let Some(op) = operators.get(idx) {
                rebuilt.push((*op).clone());
            }
        }
        prop_assert_eq!(rebuilt, tokens);
    }

    #[test]
    fn prop_decode_never_panics(tokens in prop::collection::vec(arb_token(), 0..24)) {
        let fragments = decode(&tokens);
        prop_assert!(!fragments.is_empty());
    }
}
