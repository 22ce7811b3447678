//! Fragment grammar.
//!
//! A fragment is a chain of pattern function calls joined by `and` / `or`:
//!
//! ```text
//! chain     = term *(connector term)
//! term      = "(" chain ")" / call
//! call      = name "(" argument ")"
//! connector = "and" / "or"          ; case-insensitive, whole word
//! ```
//!
//! Parenthesized sub-chains are flattened in source order. Connectors have
//! no precedence over each other: `a or b and c` keeps exactly that order.
//! The argument is kept verbatim and may contain balanced parentheses and
//! double-quoted strings.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace0, satisfy},
    combinator::{all_consuming, map, not, value},
    error::{Error as NomError, ErrorKind},
    multi::many0,
    sequence::{delimited, pair, terminated},
    IResult,
};

use crate::config::ConstructorConfig;
use crate::error::{ConstructorError, ConstructorResult};
use crate::fragment::Connector;

/// One function call inside a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Lowercased function name.
    pub name: String,
    /// Text between the call's parentheses, verbatim.
    pub argument: String,
}

impl FunctionCall {
    /// Creates a call, lowercasing the function name.
    pub fn new(name: &str, argument: impl Into<String>) -> Self {
        Self {
            name: name.to_lowercase(),
            argument: argument.into(),
        }
    }

    /// Macro reference for this call on `source:key`, e.g. `{host:key.regexp(err)}`.
    pub fn macro_reference(&self, source: &str, key: &str) -> String {
        format!("{{{}:{}.{}({})}}", source, key, self.name, self.argument)
    }
}

/// Parsed structure of one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentShape {
    /// Exactly one call.
    Single(FunctionCall),
    /// Two or more calls; each call but the first carries the connector that
    /// joins it to the previous one.
    Chain(Vec<(Option<Connector>, FunctionCall)>),
}

impl FragmentShape {
    /// Calls in source order.
    pub fn calls(&self) -> Vec<&FunctionCall> {
        match self {
            FragmentShape::Single(call) => vec![call],
            FragmentShape::Chain(links) => links.iter().map(|(_, call)| call).collect(),
        }
    }
}

/// Parses fragment text and checks every function against the whitelist.
///
/// # Errors
///
/// * [`ConstructorError::MalformedExpression`] if the text is not a chain of calls
/// * [`ConstructorError::UnknownFunction`] for the first call outside the whitelist
pub fn parse_fragment(text: &str, config: &ConstructorConfig) -> ConstructorResult<FragmentShape> {
    let links = match all_consuming(delimited(ws, chain, ws))(text) {
        Ok((_, links)) => links,
        Err(_) => return Err(ConstructorError::MalformedExpression(text.to_string())),
    };

    let mut calls = Vec::with_capacity(links.len());
    for (joiner, raw) in links {
        let parsed = FunctionCall::new(raw.name, raw.argument);
        if !config.is_allowed(&parsed.name) {
            return Err(ConstructorError::UnknownFunction {
                name: parsed.name,
                fragment: text.to_string(),
            });
        }
        calls.push((joiner, parsed));
    }

    if calls.len() == 1 {
        if let Some((_, single)) = calls.pop() {
            return Ok(FragmentShape::Single(single));
        }
    }
    Ok(FragmentShape::Chain(calls))
}

// ============================================================================
// Parsers
// ============================================================================

struct RawCall<'a> {
    name: &'a str,
    argument: &'a str,
}

type Link<'a> = (Option<Connector>, RawCall<'a>);

fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn chain(input: &str) -> IResult<&str, Vec<Link<'_>>> {
    let (input, mut links) = term(input)?;
    let (input, tail) = many0(pair(connector, term))(input)?;

    for (conn, mut group) in tail {
        if let Some(head) = group.first_mut() {
            head.0 = Some(conn);
        }
        links.extend(group);
    }
    Ok((input, links))
}

fn term(input: &str) -> IResult<&str, Vec<Link<'_>>> {
    alt((
        delimited(pair(char('('), ws), chain, pair(ws, char(')'))),
        map(call, |raw| vec![(None, raw)]),
    ))(input)
}

fn connector(input: &str) -> IResult<&str, Connector> {
    delimited(
        ws,
        terminated(
            alt((
                value(Connector::And, tag_no_case("and")),
                value(Connector::Or, tag_no_case("or")),
            )),
            not(satisfy(is_word_char)),
        ),
        ws,
    )(input)
}

fn call(input: &str) -> IResult<&str, RawCall<'_>> {
    let (input, name) = take_while1(is_word_char)(input)?;
    let (input, argument) = argument(input)?;
    Ok((input, RawCall { name, argument }))
}

/// Text between a call's parentheses. Nested parentheses must balance;
/// parentheses inside double quotes are ignored.
fn argument(input: &str) -> IResult<&str, &str> {
    let Some(body) = input.strip_prefix('(') else {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)));
    };

    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;
    for (idx, c) in body.char_indices() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '(' => depth += 1,
            ')' if depth == 0 => return Ok((&body[idx + 1..], &body[..idx])),
            ')' => depth -= 1,
            _ => {}
        }
    }

    Err(nom::Err::Error(NomError::new(input, ErrorKind::Eof)))
}
